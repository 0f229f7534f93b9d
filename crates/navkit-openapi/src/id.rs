//! Stable document ids for generated reference pages.
//!
//! Ids are derived purely from operation identity - (HTTP method, path,
//! tag) - so regenerating the fragment from an updated OpenAPI document
//! never changes the id of an operation that itself did not change.
//! Summaries and descriptions deliberately do not participate: copy edits
//! must not break hand-authored sidebar entries pointing at generated docs.

/// Lowercase slug: alphanumeric runs joined by single hyphens.
///
/// Path parameter braces are dropped, so `/v1/positions/{address}` and a
/// later rename to `{wallet}` still differ (the parameter name is part of
/// identity), while the braces themselves add no noise.
#[must_use]
pub fn slug(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_hyphen = false;
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(ch.to_ascii_lowercase());
        } else if !matches!(ch, '{' | '}') {
            pending_hyphen = true;
        }
    }
    out
}

/// Stable id for one operation, namespaced under the fragment source.
///
/// `"{source}/{slug(tag)}/{slug(method path)}"`. The source prefix keeps
/// generated ids disjoint from authored ids, so both live in one validated
/// document set without collision.
#[must_use]
pub fn operation_id(source: &str, method: &str, path: &str, tag: &str) -> String {
    format!("{source}/{}/{}", slug(tag), slug(&format!("{method} {path}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_basics() {
        assert_eq!(slug("Lending"), "lending");
        assert_eq!(slug("GET /v1/positions"), "get-v1-positions");
        assert_eq!(slug("  spaced   out  "), "spaced-out");
    }

    #[test]
    fn test_slug_drops_braces_keeps_parameter_name() {
        assert_eq!(
            slug("GET /v1/positions/{address}"),
            "get-v1-positions-address"
        );
        assert_ne!(
            slug("GET /v1/positions/{address}"),
            slug("GET /v1/positions/{wallet}")
        );
    }

    #[test]
    fn test_slug_empty_and_symbol_only() {
        assert_eq!(slug(""), "");
        assert_eq!(slug("///"), "");
    }

    #[test]
    fn test_operation_id_layout() {
        assert_eq!(
            operation_id("api-reference", "GET", "/v1/positions/{address}", "Lending"),
            "api-reference/lending/get-v1-positions-address"
        );
    }

    #[test]
    fn test_operation_id_stable_across_calls() {
        let a = operation_id("api-reference", "POST", "/v1/risk-profile", "Scoring");
        let b = operation_id("api-reference", "POST", "/v1/risk-profile", "Scoring");
        assert_eq!(a, b);
    }

    #[test]
    fn test_operation_id_distinguishes_method() {
        assert_ne!(
            operation_id("api-reference", "GET", "/v1/health", "Meta"),
            operation_id("api-reference", "POST", "/v1/health", "Meta")
        );
    }
}
