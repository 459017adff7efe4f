use clap::Parser;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "news-gateway")]
#[command(about = "Rate-limited proxy for the News API")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // Rate limit max requests per window
    #[arg(long, default_value_t = 30)]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, default_value_t = 60)]
    pub rate_window: u64,

    // Upstream request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub upstream_timeout: u64,
}

// Runtime configuration: CLI args merged with the process environment.
// The API key is resolved per request, not at boot, so a keyless process
// still serves /health and /metrics.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rate_limit: u32,
    pub rate_window: Duration,
    pub upstream_timeout: Duration,
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Config {
    pub fn load(args: &Args) -> Self {
        let api_key = std::env::var("NEWS_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());
        let base_url = std::env::var("NEWS_API_BASE_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            port: args.port,
            rate_limit: args.rate_limit,
            rate_window: Duration::from_secs(args.rate_window),
            upstream_timeout: Duration::from_secs(args.upstream_timeout),
            api_key,
            base_url,
        }
    }
}
