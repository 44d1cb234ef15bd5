pub(crate) mod cors;
pub(crate) mod metrics;
pub(crate) mod rate_limiter;
pub(crate) mod trace_root;

use once_cell::sync::Lazy;
use regex::Regex;

static UUID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}")
        .expect("Invalid UUID regex")
});

/// Collapses ids in a request path so metric labels stay low-cardinality.
pub(crate) fn normalize_uri(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("/api/todos/") {
        if !rest.is_empty() && !rest.contains('/') {
            return "/api/todos/{id}".to_string();
        }
    }
    UUID_REGEX.replace_all(path, "{id}").to_string()
}

#[cfg(test)]
mod tests {
    use super::normalize_uri;

    #[test]
    fn normalize_uri_test() {
        let ok_str = normalize_uri("/api/todos/27436a8c-3f55-498a-8fb8-9a3ab17f9930");
        assert_eq!(ok_str, "/api/todos/{id}");
    }

    #[test]
    fn normalize_uri_with_malformed_id_test() {
        assert_eq!(normalize_uri("/api/todos/not-an-id"), "/api/todos/{id}");
        assert_eq!(normalize_uri("/api/todos"), "/api/todos");
        assert_eq!(normalize_uri("/health"), "/health");
    }
}
