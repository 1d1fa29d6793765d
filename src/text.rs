//! Provides cleanup helpers for the raw titles and self-post texts the API
//! returns.

use lazy_static::lazy_static;
use regex::Regex;

/// Strips HTML tags from a string, decodes the entities the API emits and
/// collapses whitespace runs.
pub fn strip_html(raw: &str) -> String {
    let mut text = String::with_capacity(raw.len());
    let mut in_tag = false;

    for ch in raw.chars() {
        match ch {
            // tags read as whitespace so "foo<p>bar" doesn't fuse words
            '<' => {
                in_tag = true;
                text.push(' ');
            }
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            _ => text.push(ch),
        }
    }

    normalize_ws(&decode_entities(&text))
}

/// Decodes the small set of HTML entities the search API actually produces.
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&#x2F;", "/")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Collapses whitespace runs into single spaces and trims the ends.
fn normalize_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes a raw submission title: markup stripped and the UTF-8-read-as-
/// Latin-1 en dash some old submissions carry mapped back to a plain dash.
pub fn normalize_title(raw: &str) -> String {
    strip_html(raw).replace("â€“", "-")
}

/// Cleans a normalized title into a catalog name: the "Show HN" prefix and
/// any separator punctuation left over from it are stripped.
pub fn clean_title(title: &str) -> String {
    lazy_static! {
        static ref PREFIX: Regex = Regex::new(r"(?i)^show hn:?\s*").unwrap();
        static ref LEFTOVER: Regex = Regex::new("^\\s*[\"-]\\s*").unwrap();
    }

    let title = PREFIX.replace(title, "");
    let title = LEFTOVER.replace(&title, "");
    title.trim().to_string()
}

/// Extracts literal URLs from free text: anything carrying an http(s) scheme
/// plus bare `www.` hosts, which get an `https://` scheme attached. Trailing
/// punctuation is not considered part of a URL. Duplicates are dropped,
/// first occurrence wins.
pub fn extract_urls(text: &str) -> Vec<String> {
    lazy_static! {
        static ref URL: Regex = Regex::new(r#"(?i)\b(?:https?://|www\.)[^\s<>"']+"#).unwrap();
    }

    let mut urls = Vec::new();
    for found in URL.find_iter(text) {
        let raw = found
            .as_str()
            .trim_end_matches(|c| matches!(c, '.' | ',' | ';' | ':' | '!' | '?' | ')' | ']'));
        let url = if raw.to_lowercase().starts_with("www.") {
            format!("https://{}", raw)
        } else {
            raw.to_string()
        };

        if !urls.contains(&url) {
            urls.push(url);
        }
    }

    urls
}
