//! Provides the catalog's game entry model and its attribute types.

mod genre;
mod platform;
mod player_mode;
mod pricing;
mod source_code;

pub use genre::Genre;
pub use platform::Platform;
pub use player_mode::PlayerMode;
pub use pricing::Pricing;
pub use source_code::SourceCode;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// A single catalog entry. The serialized form matches the on-disk dataset
/// format, field for field and in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEntry {
    /// The Hacker News story id, as a string.
    pub id: String,
    /// The game's name, without the "Show HN" prefix.
    pub name: String,
    /// The cleaned self-post text of the submission. May be empty.
    pub description: String,
    /// The platforms the game runs on.
    pub platforms: Vec<Platform>,
    /// When the submission was posted.
    pub release_date: DateTime<Utc>,
    /// Whether the game is single- or multiplayer.
    pub player_modes: Vec<PlayerMode>,
    /// The Hacker News username of the submitter.
    pub author: String,
    /// The genres the game was classified into.
    pub genres: Vec<Genre>,
    /// The submission's discussion URL.
    pub hn_url: String,
    /// The submission's points at scrape or last refresh time.
    #[serde(default)]
    pub hn_points: u32,
    /// The URL the game can be played at. May be empty for entries that only
    /// ever shipped as a discussion.
    pub play_url: String,
    /// Whether the game costs money.
    pub pricing: Pricing,
    /// The site-relative URL of the entry's cover image.
    pub image_url: String,
    /// Where the game's source code lives, if known.
    #[serde(default)]
    pub source_code_url: SourceCode,
    /// Whether the entry is part of the active catalog. Stamped at compile
    /// time, never stored in the datasets.
    #[serde(skip)]
    pub is_active: bool,
}

impl GameEntry {
    /// Returns the discussion URL for a given submission id.
    pub fn hn_url_for(id: &str) -> String {
        format!("https://news.ycombinator.com/item?id={}", id)
    }

    /// Returns the site-relative cover image URL for a given submission id.
    pub fn image_url_for(id: &str) -> String {
        format!("/images/games/{}.jpg", id)
    }

    /// Returns the entry's release year.
    pub fn release_year(&self) -> i32 {
        self.release_date.year()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_json() -> &'static str {
        r#"{
            "id": "18316124",
            "name": "Pixel Wisp",
            "description": "A tiny ambient puzzle game.",
            "platforms": ["web"],
            "releaseDate": "2018-10-27T15:25:09.000Z",
            "playerModes": ["single"],
            "author": "anned",
            "genres": ["puzzle"],
            "hnUrl": "https://news.ycombinator.com/item?id=18316124",
            "hnPoints": 212,
            "playUrl": "https://pixelwisp.example.com",
            "pricing": "free",
            "imageUrl": "/images/games/18316124.jpg",
            "sourceCodeUrl": null
        }"#
    }

    #[test]
    fn deserializes_dataset_record() {
        let entry: GameEntry = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(entry.id, "18316124");
        assert_eq!(entry.name, "Pixel Wisp");
        assert_eq!(entry.platforms, vec![Platform::Web]);
        assert_eq!(entry.player_modes, vec![PlayerMode::Single]);
        assert_eq!(entry.genres, vec![Genre::Puzzle]);
        assert_eq!(entry.hn_points, 212);
        assert_eq!(entry.pricing, Pricing::Free);
        assert_eq!(entry.source_code_url, SourceCode::Unknown);
        assert!(!entry.is_active);
        assert_eq!(
            entry.release_date,
            Utc.with_ymd_and_hms(2018, 10, 27, 15, 25, 9).unwrap()
        );
    }

    #[test]
    fn serializes_with_camel_case_keys_in_dataset_order() {
        let entry: GameEntry = serde_json::from_str(sample_json()).unwrap();
        let json = serde_json::to_string_pretty(&entry).unwrap();

        let id_pos = json.find("\"id\"").unwrap();
        let release_pos = json.find("\"releaseDate\"").unwrap();
        let points_pos = json.find("\"hnPoints\"").unwrap();
        let source_pos = json.find("\"sourceCodeUrl\"").unwrap();
        assert!(id_pos < release_pos);
        assert!(release_pos < points_pos);
        assert!(points_pos < source_pos);

        assert!(!json.contains("isActive"));
        assert!(json.contains("\"playerModes\""));
    }

    #[test]
    fn missing_points_and_source_default() {
        let json = r#"{
            "id": "1",
            "name": "n",
            "description": "",
            "platforms": ["web"],
            "releaseDate": "2016-01-01T00:00:00.000Z",
            "playerModes": ["single"],
            "author": "a",
            "genres": ["action"],
            "hnUrl": "https://news.ycombinator.com/item?id=1",
            "playUrl": "",
            "pricing": "free",
            "imageUrl": "/images/games/1.jpg"
        }"#;

        let entry: GameEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.hn_points, 0);
        assert_eq!(entry.source_code_url, SourceCode::Unknown);
    }

    #[test]
    fn url_helpers_embed_the_id() {
        assert_eq!(
            GameEntry::hn_url_for("42"),
            "https://news.ycombinator.com/item?id=42"
        );
        assert_eq!(GameEntry::image_url_for("42"), "/images/games/42.jpg");
    }
}
