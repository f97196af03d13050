//! URL and query-string construction
//!
//! Pure functions for building fully-qualified request URLs. Parameters with
//! absent or empty values are dropped entirely so they never show up as
//! `key=` in the output.

use std::fmt;

/// A scalar query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Str(value) => write!(f, "{}", value),
            QueryValue::Int(value) => write!(f, "{}", value),
            QueryValue::Bool(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Str(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Int(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Int(i64::from(value))
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

/// Build a fully-qualified URL from a base URL, a path, and query parameters.
///
/// Absent values and empty strings are omitted entirely. Every other value is
/// stringified and percent-encoded. Output order follows the input slice, so
/// a given input always produces the same URL.
pub fn build_url(base_url: &str, path: &str, params: &[(&str, Option<QueryValue>)]) -> String {
    // Handle base_url that may or may not have a trailing slash
    let mut url = format!("{}{}", base_url.trim_end_matches('/'), path);

    let mut separator = '?';
    for (key, value) in params {
        let Some(value) = value else { continue };

        let rendered = value.to_string();
        if rendered.is_empty() {
            continue;
        }

        url.push(separator);
        url.push_str(&urlencoding::encode(key));
        url.push('=');
        url.push_str(&urlencoding::encode(&rendered));
        separator = '&';
    }

    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_without_params() {
        let url = build_url("https://dev.to/api", "/articles", &[]);
        assert_eq!(url, "https://dev.to/api/articles");
    }

    #[test]
    fn test_build_url_trims_trailing_slash() {
        let url = build_url("https://dev.to/api/", "/articles", &[]);
        assert_eq!(url, "https://dev.to/api/articles");
    }

    #[test]
    fn test_build_url_skips_absent_and_empty_values() {
        let url = build_url(
            "https://dev.to/api",
            "/articles",
            &[
                ("page", Some(QueryValue::Int(1))),
                ("tag", Some(QueryValue::from("x"))),
                ("empty", Some(QueryValue::from(""))),
                ("missing", None),
            ],
        );

        assert!(url.contains("page=1"));
        assert!(url.contains("tag=x"));
        assert!(!url.contains("empty"));
        assert!(!url.contains("missing"));
    }

    #[test]
    fn test_build_url_stringifies_scalars() {
        let url = build_url(
            "https://dev.to/api",
            "/articles",
            &[
                ("top", Some(QueryValue::Int(7))),
                ("published", Some(QueryValue::Bool(true))),
                ("username", Some(QueryValue::from("ben"))),
            ],
        );

        assert_eq!(
            url,
            "https://dev.to/api/articles?top=7&published=true&username=ben"
        );
    }

    #[test]
    fn test_build_url_percent_encodes_values() {
        let url = build_url(
            "https://dev.to/api",
            "/articles",
            &[("tag", Some(QueryValue::from("c & c++")))],
        );

        assert_eq!(url, "https://dev.to/api/articles?tag=c%20%26%20c%2B%2B");
    }

    #[test]
    fn test_build_url_is_deterministic() {
        let params = [
            ("b", Some(QueryValue::Int(2))),
            ("a", Some(QueryValue::Int(1))),
        ];

        let first = build_url("https://dev.to/api", "/tags", &params);
        let second = build_url("https://dev.to/api", "/tags", &params);
        assert_eq!(first, second);
        assert_eq!(first, "https://dev.to/api/tags?b=2&a=1");
    }

    #[test]
    fn test_build_url_single_param_has_no_ampersand() {
        let url = build_url(
            "https://dev.to/api",
            "/comments",
            &[("a_id", Some(QueryValue::Int(42))), ("p_id", None)],
        );
        assert_eq!(url, "https://dev.to/api/comments?a_id=42");
    }
}
