//! URL resolution for the management API and the mock-serving origin.

/// Management API root used when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/fake-it/v1";

/// Mock-serving origin used when neither an override nor a usable
/// management URL is available.
pub const DEFAULT_MOCK_URL: &str = "http://localhost:8080";

/// Resolve the base URL mocks are invoked against.
///
/// An explicit override always wins. Otherwise mocks are served from the
/// same origin as the management API, so the origin of `api_url` is used;
/// if that cannot be extracted, the local default applies.
pub fn resolve_mock_base(api_url: &str, override_url: Option<&str>) -> String {
    if let Some(url) = override_url {
        let url = url.trim().trim_end_matches('/');
        if !url.is_empty() {
            return url.to_string();
        }
    }
    origin_of(api_url).unwrap_or_else(|| DEFAULT_MOCK_URL.to_string())
}

/// Build the externally reachable URL for a mock path.
///
/// The path is normalized to exactly one leading slash; an empty path
/// resolves to the base URL plus `/`.
pub fn build_api_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// `scheme://authority` of a URL, with any path dropped.
fn origin_of(url: &str) -> Option<String> {
    let scheme_end = url.find("://")?;
    let rest = &url[scheme_end + 3..];
    let authority = match rest.find('/') {
        Some(idx) => &rest[..idx],
        None => rest,
    };
    if authority.is_empty() {
        return None;
    }
    Some(format!("{}{}", &url[..scheme_end + 3], authority))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_has_exactly_one_leading_slash() {
        for path in ["users", "/users", "//users", "///users"] {
            let url = build_api_url("http://localhost:8080", path);
            assert_eq!(url, "http://localhost:8080/users");
        }
    }

    #[test]
    fn api_url_preserves_interior_path() {
        let url = build_api_url("http://localhost:8080", "/api/v2/users");
        assert_eq!(url, "http://localhost:8080/api/v2/users");
    }

    #[test]
    fn empty_path_resolves_to_base_and_slash() {
        assert_eq!(
            build_api_url("http://localhost:8080", ""),
            "http://localhost:8080/"
        );
    }

    #[test]
    fn base_trailing_slash_never_doubles() {
        assert_eq!(
            build_api_url("http://localhost:8080/", "/users"),
            "http://localhost:8080/users"
        );
    }

    #[test]
    fn override_wins_and_is_trimmed() {
        let base = resolve_mock_base(DEFAULT_API_URL, Some("http://mocks.local:9090/"));
        assert_eq!(base, "http://mocks.local:9090");
    }

    #[test]
    fn blank_override_falls_through_to_origin() {
        let base = resolve_mock_base("https://fakeit.example.com/fake-it/v1", Some("  "));
        assert_eq!(base, "https://fakeit.example.com");
    }

    #[test]
    fn origin_comes_from_management_url() {
        assert_eq!(
            resolve_mock_base("http://localhost:8080/fake-it/v1", None),
            "http://localhost:8080"
        );
        assert_eq!(
            resolve_mock_base("https://host.example:8443/fake-it/v1", None),
            "https://host.example:8443"
        );
    }

    #[test]
    fn unparseable_management_url_uses_local_default() {
        assert_eq!(resolve_mock_base("not a url", None), DEFAULT_MOCK_URL);
        assert_eq!(resolve_mock_base("http:///fake-it", None), DEFAULT_MOCK_URL);
    }
}
