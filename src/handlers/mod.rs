mod health;
mod metrics;
mod news;

use axum::Router;
use axum::http::{Method, header};
use axum::routing::get;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

pub use health::health_handler;
pub use metrics::metrics_handler;
pub use news::{ClientKey, method_not_allowed, news_handler, preflight_handler};

pub fn router(state: Arc<AppState>) -> Router {
    // permissive CORS on every response, browser callers come from any origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route(
            "/news",
            get(news_handler)
                .options(preflight_handler)
                .fallback(method_not_allowed),
        )
        .layer(cors)
        .with_state(state)
}
