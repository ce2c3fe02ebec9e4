//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Chat history pagination (`?scroll-index=&batch-length=`).
///
/// The page offset is `scroll_index * batch_length`; messages come back
/// newest first.
#[derive(Debug, Deserialize)]
pub struct ScrollParams {
    #[serde(rename = "scroll-index", default)]
    pub scroll_index: i64,
    #[serde(rename = "batch-length", default = "default_batch_length")]
    pub batch_length: i64,
}

fn default_batch_length() -> i64 {
    50
}

impl ScrollParams {
    /// Clamped offset/limit pair for the SQL query.
    pub fn window(&self) -> (i64, i64) {
        let limit = self.batch_length.clamp(1, 100);
        let offset = self.scroll_index.max(0) * limit;
        (offset, limit)
    }
}

/// Filters for the profile directory listing.
///
/// List-valued filters arrive semicolon-separated, e.g.
/// `?universities=usp;unicamp&skills=design`.
#[derive(Debug, Deserialize)]
pub struct ProfileListParams {
    #[serde(default = "default_length")]
    pub length: i64,
    pub kind: Option<String>,
    pub universities: Option<String>,
    pub majors: Option<String>,
    pub skills: Option<String>,
}

fn default_length() -> i64 {
    20
}

/// Filters for the project directory listing (both semicolon-separated).
#[derive(Debug, Deserialize)]
pub struct ProjectListParams {
    #[serde(default)]
    pub categories: String,
    #[serde(default)]
    pub markets: String,
}

/// Split a semicolon-separated filter into trimmed, non-empty values.
pub fn split_filter(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_window() {
        let params = ScrollParams {
            scroll_index: 2,
            batch_length: 20,
        };
        assert_eq!(params.window(), (40, 20));
    }

    #[test]
    fn test_scroll_window_clamps() {
        let params = ScrollParams {
            scroll_index: -1,
            batch_length: 1000,
        };
        assert_eq!(params.window(), (0, 100));
    }

    #[test]
    fn test_split_filter() {
        assert_eq!(split_filter("a; b;;c "), vec!["a", "b", "c"]);
        assert!(split_filter("").is_empty());
    }
}
