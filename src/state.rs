use crate::config::Config;
use crate::rate_limit::RateLimiter;
use crate::upstream::NewsClient;

// app's shared state
pub struct AppState {
    pub news: NewsClient,
    pub limiter: RateLimiter,
    pub api_key: Option<String>,
}

impl AppState {
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()?;

        Ok(Self {
            news: NewsClient::new(http, config.base_url.clone()),
            limiter: RateLimiter::in_memory(config.rate_limit, config.rate_window),
            api_key: config.api_key.clone(),
        })
    }
}
