use std::process;
use std::sync::Arc;

mod ai;
mod api;
mod config;
mod error;
mod ideas;

use ai::GroqProvider;
use config::Config;
use ideas::IdeaGenerator;

#[tokio::main]
async fn main() {
    // A missing .env file is fine, the environment may already be set.
    let _ = dotenvy::dotenv();
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("invalid configuration: {}", e);
            process::exit(1);
        }
    };

    if config.api_key.is_none() {
        log::warn!("GROQ_API_KEY not set, idea generation requests will fail.");
    }

    let provider = match GroqProvider::new(Some(config.api_url.clone()), config.request_timeout) {
        Ok(provider) => provider,
        Err(e) => {
            log::error!("failed to build provider client: {}", e);
            process::exit(1);
        }
    };

    let generator = IdeaGenerator::new(
        Arc::new(provider),
        config.api_key.clone(),
        config.model.clone(),
    );
    let app = api::router(Arc::new(generator), &config.allowed_origins);

    let address = format!("0.0.0.0:{}", config.port);
    let listener = match tokio::net::TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(e) => {
            log::error!("failed to bind {}: {}", address, e);
            process::exit(1);
        }
    };

    log::info!(
        "Server is running on port {} (allowed origins: {})",
        config.port,
        config.allowed_origins.join(", ")
    );

    if let Err(e) = axum::serve(listener, app).await {
        log::error!("server error: {}", e);
        process::exit(1);
    }
}
