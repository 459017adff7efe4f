use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_CATEGORY: &str = "general";
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MIN_PAGE_SIZE: u32 = 1;
pub const MAX_PAGE_SIZE: u32 = 100;

// Raw query-string shape. pageSize stays a string here so non-numeric
// input is coerced during validation instead of rejected by serde.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewsParams {
    pub category: Option<String>,
    pub page_size: Option<String>,
    pub query: Option<String>,
}

// Validated outbound request shape, immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsQuery {
    pub category: String,
    pub page_size: u32,
    pub search: Option<String>,
}

impl NewsQuery {
    pub fn from_params(params: NewsParams) -> Self {
        let category = params
            .category
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        // non-numeric coerces to the minimum bound rather than erroring
        let page_size = params
            .page_size
            .map(|raw| raw.parse::<u32>().unwrap_or(MIN_PAGE_SIZE))
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE);

        let search = params.query.filter(|q| !q.is_empty());

        Self {
            category,
            page_size,
            search,
        }
    }
}

// Envelope appended to the relayed provider payload.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub timestamp: String,
    pub page_size: u32,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u64>,
}

impl Metadata {
    pub fn for_response(query: &NewsQuery, payload: &Value) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            page_size: query.page_size,
            category: query.category.clone(),
            total_results: payload.get("totalResults").and_then(Value::as_u64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(category: Option<&str>, page_size: Option<&str>, query: Option<&str>) -> NewsParams {
        NewsParams {
            category: category.map(String::from),
            page_size: page_size.map(String::from),
            query: query.map(String::from),
        }
    }

    #[test]
    fn defaults_apply_when_params_absent() {
        let q = NewsQuery::from_params(NewsParams::default());
        assert_eq!(q.category, "general");
        assert_eq!(q.page_size, 20);
        assert_eq!(q.search, None);
    }

    #[test]
    fn page_size_clamps_to_bounds() {
        let q = NewsQuery::from_params(params(None, Some("0"), None));
        assert_eq!(q.page_size, 1);

        let q = NewsQuery::from_params(params(None, Some("500"), None));
        assert_eq!(q.page_size, 100);

        let q = NewsQuery::from_params(params(None, Some("42"), None));
        assert_eq!(q.page_size, 42);
    }

    #[test]
    fn non_numeric_page_size_coerces_to_minimum() {
        let q = NewsQuery::from_params(params(None, Some("abc"), None));
        assert_eq!(q.page_size, 1);

        let q = NewsQuery::from_params(params(None, Some("-5"), None));
        assert_eq!(q.page_size, 1);
    }

    #[test]
    fn empty_strings_fall_back_to_defaults() {
        let q = NewsQuery::from_params(params(Some(""), None, Some("")));
        assert_eq!(q.category, "general");
        assert_eq!(q.search, None);
    }

    #[test]
    fn metadata_echoes_query_and_total_results() {
        let query = NewsQuery {
            category: "technology".to_string(),
            page_size: 50,
            search: None,
        };
        let payload = json!({"status": "ok", "totalResults": 123, "articles": []});

        let meta = Metadata::for_response(&query, &payload);
        assert_eq!(meta.page_size, 50);
        assert_eq!(meta.category, "technology");
        assert_eq!(meta.total_results, Some(123));
    }
}
