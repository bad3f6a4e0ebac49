//! docmap-server: read-only HTTP API over the Docmap assembly engine.
//!
//! The service loads the manuscript snapshot, transforms every record
//! into Docmaps for both producers, and serves the results from a
//! process-wide single-object cache with a TTL.

pub mod cache;
pub mod html;
pub mod http;
pub mod snapshot;
pub mod source;

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use docmap_core::DocmapConfig;

use cache::SingleObjectCache;
use snapshot::Snapshot;
use source::{ManuscriptSource, SourceError};

/// Failures that surface as 5xx responses.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Docmap(#[from] docmap_core::DocmapError),
}

/// Shared application state.
pub struct AppState {
    pub config: DocmapConfig,
    pub source: Box<dyn ManuscriptSource>,
    pub cache: SingleObjectCache<Snapshot>,
}

impl AppState {
    pub fn new(source: Box<dyn ManuscriptSource>, cache_max_age: Duration) -> Self {
        Self {
            config: DocmapConfig::default(),
            source,
            cache: SingleObjectCache::new(cache_max_age),
        }
    }

    /// The current snapshot, loading it if absent or stale.
    pub async fn snapshot(&self) -> Result<Arc<Snapshot>, ServiceError> {
        self.cache
            .get_or_load(|| async {
                let records = self.source.load()?;
                snapshot::build_snapshot(&self.config, &records)
            })
            .await
    }
}

/// Create the API router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(http::banner))
        // Enhanced preprints (public variant)
        .route("/enhanced-preprints/docmaps/v2/index", get(http::public_index))
        .route(
            "/enhanced-preprints/docmaps/v2/by-publisher/elife/get-by-manuscript-id",
            get(http::public_by_manuscript_id),
        )
        // Kotahi (private variant)
        .route("/kotahi/docmaps/v1/index", get(http::kotahi_index))
        .route(
            "/kotahi/docmaps/v1/by-publisher/elife/get-by-manuscript-id",
            get(http::kotahi_by_manuscript_id),
        )
        .route(
            "/kotahi/docmaps/v1/evaluation/get-by-evaluation-id",
            get(http::evaluation_by_id),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the server.
pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("docmap server listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
