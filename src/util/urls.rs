//! Provides helpers for comparing and picking apart URLs.

use url::{form_urlencoded, Url};

/// Normalizes a URL for equality comparison: the origin and path are
/// lowercased, trailing slashes are stripped, query parameters are sorted by
/// key and the fragment is dropped. A string that doesn't parse as an
/// absolute URL falls back to a lowercased, trailing-slash-stripped copy.
/// Normalizing an already normalized URL is a no-op.
pub fn normalize(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(parsed) if parsed.has_host() => {
            let mut normalized = format!(
                "{}{}",
                parsed.origin().ascii_serialization().to_lowercase(),
                parsed.path().to_lowercase()
            );

            while normalized.ends_with('/') {
                normalized.pop();
            }

            if let Some(query) = parsed.query() {
                if !query.is_empty() {
                    let mut pairs: Vec<(String, String)> = parsed
                        .query_pairs()
                        .map(|(key, value)| (key.into_owned(), value.into_owned()))
                        .collect();
                    pairs.sort_by(|left, right| left.0.cmp(&right.0));

                    let query = form_urlencoded::Serializer::new(String::new())
                        .extend_pairs(pairs)
                        .finish();
                    normalized.push('?');
                    normalized.push_str(&query);
                }
            }

            normalized
        }
        _ => raw.to_lowercase().trim_end_matches('/').to_string(),
    }
}

/// Returns a URL's host, lowercased. `None` if the string doesn't parse as an
/// absolute URL or has no host.
pub fn host(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw).ok()?;
    parsed.host_str().map(str::to_lowercase)
}

/// Returns the value of a URL's `id` query parameter, if present.
pub fn id_param(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_strips_trailing_slash() {
        assert_eq!(
            normalize("https://Example.com/Games/"),
            "https://example.com/games"
        );
        assert_eq!(normalize("https://example.com/"), "https://example.com");
    }

    #[test]
    fn normalize_sorts_query_parameters() {
        assert_eq!(
            normalize("https://example.com/play?b=2&a=1"),
            "https://example.com/play?a=1&b=2"
        );
    }

    #[test]
    fn normalize_drops_fragment() {
        assert_eq!(
            normalize("https://example.com/play#start"),
            "https://example.com/play"
        );
    }

    #[test]
    fn normalize_falls_back_for_unparseable_input() {
        assert_eq!(normalize("Not a URL/"), "not a url");
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in &[
            "https://Example.com/Games/",
            "https://example.com/play?q=hello%20world&a=1",
            "itch.io/some-game/",
            "https://example.com/?",
        ] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn host_of_absolute_url() {
        assert_eq!(host("https://GitHub.com/foo/bar"), Some("github.com".to_string()));
        assert_eq!(host("no scheme here"), None);
    }

    #[test]
    fn id_param_of_discussion_url() {
        assert_eq!(
            id_param("https://news.ycombinator.com/item?id=18316124"),
            Some("18316124".to_string())
        );
        assert_eq!(id_param("https://news.ycombinator.com/item"), None);
    }
}
