use axum::Json;
use axum::extract::{ConnectInfo, FromRequestParts, Query, State};
use axum::http::request::Parts;
use serde_json::Value;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, warn};

use crate::error::NewsError;
use crate::metrics::{RATE_LIMITED_TOTAL, REQUEST_LATENCY, REQUEST_TOTAL, UPSTREAM_ERRORS_TOTAL};
use crate::models::{Metadata, NewsParams, NewsQuery};
use crate::state::AppState;

// Rate-limit bucket for the caller: first X-Forwarded-For entry, else the
// transport peer address. Clients behind a shared proxy share a bucket.
pub struct ClientKey(pub String);

impl<S> FromRequestParts<S> for ClientKey
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Infallible> {
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        if let Some(addr) = forwarded {
            return Ok(Self(addr.to_string()));
        }

        let key = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map_or_else(|| "unknown".to_string(), |info| info.0.ip().to_string());
        Ok(Self(key))
    }
}

pub async fn news_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NewsParams>,
    ClientKey(client): ClientKey,
) -> Result<Json<Value>, NewsError> {
    REQUEST_TOTAL.inc();

    if state.limiter.is_limited(&client) {
        RATE_LIMITED_TOTAL.inc();
        warn!(%client, "rate limit exceeded");
        return Err(NewsError::RateLimited);
    }

    let query = NewsQuery::from_params(params);

    let api_key = state.api_key.as_deref().ok_or_else(|| {
        // full detail stays server-side; the caller only sees a generic message
        error!("NEWS_API_KEY environment variable is not set");
        NewsError::Unconfigured
    })?;

    let start = Instant::now();
    let payload = state.news.fetch(&query, api_key).await.inspect_err(|_| {
        UPSTREAM_ERRORS_TOTAL.inc();
    })?;
    REQUEST_LATENCY.observe(start.elapsed().as_secs_f64());

    let metadata = Metadata::for_response(&query, &payload);
    let body = match payload {
        Value::Object(mut map) => {
            let meta = serde_json::to_value(&metadata).unwrap_or(Value::Null);
            map.insert("metadata".to_string(), meta);
            Value::Object(map)
        }
        other => serde_json::json!({ "articles": other, "metadata": metadata }),
    };

    Ok(Json(body))
}

// Pre-flight negotiation: 200 with no body. CORS headers come from the layer.
pub async fn preflight_handler() {}

pub async fn method_not_allowed() -> NewsError {
    NewsError::MethodNotAllowed
}
