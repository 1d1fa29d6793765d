//! Heuristic keyword classifiers that derive a game entry's structured
//! attributes from its announcement text.
//!
//! Every classifier works on the same folded input: the lowercased
//! concatenation of the submission title and self-post text. The heuristics
//! are intentionally crude, staged entries get reviewed by hand before they
//! reach the archive.

use crate::{
    game::{Genre, Platform, PlayerMode, Pricing, SourceCode},
    util::urls,
};
use strum::IntoEnumIterator;

/// Keywords that mark a game as paid.
const PAID_KEYWORDS: &[&str] = &["commercial", "paid", "buy", "purchase", "sold"];

/// Keywords that mark a game as multiplayer.
const MULTIPLAYER_KEYWORDS: &[&str] = &["multiplayer", "multi-player", "multi player", "mmo"];

/// Hosts a repository link can live on.
const CODE_HOSTS: &[&str] = &[
    "github.com",
    "gitlab.com",
    "sourcehut.org",
    "bitbucket.org",
    "codeberg.org",
];

/// Words in the announcement text that loosely indicate open source.
const OPEN_SOURCE_HINTS: &[&str] = &["github", "gitlab", "source", "open"];

/// Phrases in the game's own page that positively indicate open source.
const OPEN_SOURCE_PHRASES: &[&str] = &["open source", "open-source", "source code"];

/// Phrases that rule a positive page indication back out.
const CLOSED_SOURCE_PHRASES: &[&str] = &["closed source", "not open source", "not open-source"];

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}

/// Folds a title and description into the classifier input.
pub fn fold(title: &str, description: &str) -> String {
    format!("{} {}", title, description).to_lowercase()
}

/// Classifies the platforms a game runs on. Defaults to web when nothing
/// matches, most submissions are playable in the browser and don't say so.
pub fn platforms(folded: &str, play_url: &str) -> Vec<Platform> {
    let mut platforms = Vec::new();

    if contains_any(folded, &["web", "html", "browser"]) {
        platforms.push(Platform::Web);
    }
    if contains_any(folded, &["desktop", "windows", "mac", "linux"]) {
        platforms.push(Platform::Desktop);
    }
    if contains_any(folded, &["console", "xbox", "playstation", "game boy", "gameboy"]) {
        platforms.push(Platform::Console);
    }
    if contains_any(folded, &["android", "play store"]) || play_url.contains("play.google.com") {
        platforms.push(Platform::Android);
    }
    // " ios" with the leading space, otherwise "studios" and friends match
    if contains_any(folded, &[" ios", "app store", "iphone", "ipad"])
        || play_url.contains("apple.com")
    {
        platforms.push(Platform::Ios);
    }

    if platforms.is_empty() {
        platforms.push(Platform::Web);
    }
    platforms
}

/// Classifies whether a game is multiplayer. Single-valued: the catalog
/// records the dominant mode, not every supported one.
pub fn player_modes(folded: &str) -> Vec<PlayerMode> {
    if contains_any(folded, MULTIPLAYER_KEYWORDS) {
        vec![PlayerMode::Multi]
    } else {
        vec![PlayerMode::Single]
    }
}

/// Classifies the genres a game belongs to by matching the genre vocabulary
/// against the folded text. Defaults to action.
pub fn genres(folded: &str) -> Vec<Genre> {
    let mut genres: Vec<Genre> = Genre::iter()
        .filter(|genre| folded.contains(&genre.to_string()))
        .collect();

    if genres.is_empty() {
        genres.push(Genre::Action);
    }
    genres
}

/// Classifies whether a game costs money. Defaults to free.
pub fn pricing(folded: &str) -> Pricing {
    if contains_any(folded, PAID_KEYWORDS) {
        Pricing::Paid
    } else {
        Pricing::Free
    }
}

/// Determines what is known about a game's source code, in three tiers:
/// a candidate URL on a code host wins, then open-source hints in the
/// announcement text, then positive phrases in the game page itself.
pub fn source_code(candidate_urls: &[String], story_text: &str, page_text: &str) -> SourceCode {
    let repo = candidate_urls.iter().find(|candidate| {
        urls::host(candidate)
            .map(|host| {
                CODE_HOSTS
                    .iter()
                    .any(|code_host| host == *code_host || host.ends_with(&format!(".{}", code_host)))
            })
            .unwrap_or(false)
    });
    if let Some(url) = repo {
        return SourceCode::Url(url.clone());
    }

    if !story_text.is_empty() && contains_any(&story_text.to_lowercase(), OPEN_SOURCE_HINTS) {
        return SourceCode::Indicated;
    }

    if !page_text.is_empty() {
        let page = page_text.to_lowercase();
        if contains_any(&page, OPEN_SOURCE_PHRASES) && !contains_any(&page, CLOSED_SOURCE_PHRASES)
        {
            return SourceCode::Indicated;
        }
    }

    SourceCode::Unknown
}
