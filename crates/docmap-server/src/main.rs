//! Docmap server binary.

use std::sync::Arc;
use std::time::Duration;

use docmap_server::source::JsonFileSource;
use docmap_server::{serve, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let addr = std::env::var("DOCMAPS_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let data_path =
        std::env::var("DOCMAPS_DATA").unwrap_or_else(|_| "manuscripts.json".to_string());
    let cache_max_age = std::env::var("DOCMAPS_CACHE_MAX_AGE_SECS")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(3600);

    let state = Arc::new(AppState::new(
        Box::new(JsonFileSource::new(data_path)),
        Duration::from_secs(cache_max_age),
    ));

    serve(&addr, state).await
}
