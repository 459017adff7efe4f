use serde_json::Value;
use tracing::{info, warn};

use crate::error::NewsError;
use crate::models::NewsQuery;

// Client for the News API. The key travels in the X-Api-Key header so it
// never appears in URLs or logs.
pub struct NewsClient {
    http: reqwest::Client,
    base_url: String,
}

impl NewsClient {
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    // Picks the endpoint and query parameters for a validated query:
    // free-text search goes to /everything, everything else to /top-headlines.
    fn endpoint(&self, query: &NewsQuery) -> (String, Vec<(&'static str, String)>) {
        match &query.search {
            Some(term) => (
                format!("{}/everything", self.base_url),
                vec![
                    ("q", term.clone()),
                    ("pageSize", query.page_size.to_string()),
                ],
            ),
            None => (
                format!("{}/top-headlines", self.base_url),
                vec![
                    ("country", "us".to_string()),
                    ("category", query.category.clone()),
                    ("pageSize", query.page_size.to_string()),
                ],
            ),
        }
    }

    pub async fn fetch(&self, query: &NewsQuery, api_key: &str) -> Result<Value, NewsError> {
        let (url, params) = self.endpoint(query);
        info!(%url, category = %query.category, page_size = query.page_size, "fetching news");

        let res = self
            .http
            .get(&url)
            .query(&params)
            .header("X-Api-Key", api_key)
            .send()
            .await?;

        let status = res.status().as_u16();
        if status == 429 {
            warn!(%url, "news api rate limit hit");
            return Err(NewsError::UpstreamRateLimited);
        }

        if !(200..300).contains(&status) {
            let message = res
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("message")
                        .and_then(Value::as_str)
                        .map(String::from)
                })
                .unwrap_or_else(|| "Failed to fetch news".to_string());
            warn!(status, %message, "news api returned an error status");
            return Err(NewsError::Upstream { status, message });
        }

        let body: Value = res.json().await?;

        // The News API also reports failures in-band on a 2xx response.
        if body.get("status").and_then(Value::as_str) == Some("error") {
            let code = body.get("code").and_then(Value::as_str).unwrap_or_default();
            if code == "rateLimited" {
                return Err(NewsError::UpstreamRateLimited);
            }
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Failed to fetch news")
                .to_string();
            warn!(code, %message, "news api reported an in-band error");
            return Err(NewsError::Upstream {
                status: 500,
                message,
            });
        }

        let articles = body
            .get("articles")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        info!(status, articles, "news api response");

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> NewsClient {
        NewsClient::new(reqwest::Client::new(), base_url.to_string())
    }

    #[test]
    fn headlines_endpoint_carries_category_and_page_size() {
        let query = NewsQuery {
            category: "business".to_string(),
            page_size: 25,
            search: None,
        };
        let (url, params) = client("https://newsapi.org/v2").endpoint(&query);

        assert_eq!(url, "https://newsapi.org/v2/top-headlines");
        assert!(params.contains(&("country", "us".to_string())));
        assert!(params.contains(&("category", "business".to_string())));
        assert!(params.contains(&("pageSize", "25".to_string())));
    }

    #[test]
    fn search_term_switches_to_everything_endpoint() {
        let query = NewsQuery {
            category: "general".to_string(),
            page_size: 20,
            search: Some("rust language".to_string()),
        };
        let (url, params) = client("https://newsapi.org/v2").endpoint(&query);

        assert_eq!(url, "https://newsapi.org/v2/everything");
        assert!(params.contains(&("q", "rust language".to_string())));
    }

    #[test]
    fn trailing_slash_in_base_url_is_tolerated() {
        let query = NewsQuery {
            category: "general".to_string(),
            page_size: 20,
            search: None,
        };
        let (url, _) = client("http://127.0.0.1:9/").endpoint(&query);
        assert_eq!(url, "http://127.0.0.1:9/top-headlines");
    }
}
