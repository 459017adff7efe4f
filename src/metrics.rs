use lazy_static::lazy_static;
use prometheus::{Counter, Histogram, register_counter, register_histogram};

lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("news_requests_total", "Total number of /news requests").unwrap();
    pub static ref RATE_LIMITED_TOTAL: Counter = register_counter!(
        "news_rate_limited_total",
        "Requests rejected by the local rate limiter"
    )
    .unwrap();
    pub static ref UPSTREAM_ERRORS_TOTAL: Counter = register_counter!(
        "news_upstream_errors_total",
        "Failed calls to the news provider"
    )
    .unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "news_request_latency_seconds",
        "Request latency in seconds"
    )
    .unwrap();
}
