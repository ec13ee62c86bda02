use refrain::{Config, RecommendationEngine, RuleStore};
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let songs: Vec<String> = std::env::args().skip(1).collect();
    if songs.is_empty() {
        eprintln!("usage: refrain <song>...");
        return ExitCode::FAILURE;
    }

    let config = Config::from_env();
    let store = Arc::new(RuleStore::new(config.artifact_path.clone()));

    match store.refresh_if_changed() {
        Ok(true) => {}
        Ok(false) => log::warn!("No rule artifact at {:?} yet", config.artifact_path),
        Err(e) => log::error!("Initial rule load failed: {}", e),
    }

    let engine = RecommendationEngine::new(store, config.max_recommendations);

    match engine.recommend(&songs) {
        Ok(response) => match serde_json::to_string_pretty(&response) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("Failed to encode response: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            log::error!("Recommendation failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
