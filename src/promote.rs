//! Promotes reviewed staging entries into the active archive. Entries that
//! fail the catalog's integrity rules stay behind in staging, everything
//! else moves.

use crate::{
    audit,
    error::EntryError,
    game::GameEntry,
    store::{Dataset, Store},
    util::urls,
};
use log::*;
use std::path::Path;

/// The outcome of a promotion run.
#[derive(Debug)]
pub struct Outcome {
    /// How many entries moved into the archive.
    pub promoted: usize,
    /// The ids of the entries that stayed in staging, with their reasons.
    pub rejected: Vec<(String, EntryError)>,
}

/// Validates every staged entry, appends the valid ones to the archive
/// (newest first) and rewrites staging with only the rejects. Nothing is
/// written when no entry passes.
pub fn run(store: &Store, images_dir: &Path) -> anyhow::Result<Outcome> {
    let staged = store.load(Dataset::New)?;
    let mut archive = store.load(Dataset::Archive)?;
    info!("{} staged entries to validate", staged.len());

    let mut valid = Vec::new();
    let mut rejects = Vec::new();
    let mut rejected = Vec::new();
    for entry in staged {
        match validate_entry(&entry, images_dir) {
            Ok(()) => valid.push(entry),
            Err(reason) => {
                warn!("Rejected {} ({}): {}", entry.name, entry.id, reason);
                rejected.push((entry.id.clone(), reason));
                rejects.push(entry);
            }
        }
    }

    if valid.is_empty() {
        info!("No staged entry passed validation, nothing promoted");
        return Ok(Outcome {
            promoted: 0,
            rejected,
        });
    }

    let promoted = valid.len();
    archive.extend(valid);
    archive.sort_by(|left, right| right.release_date.cmp(&left.release_date));
    store.save(Dataset::Archive, &archive)?;
    store.save(Dataset::New, &rejects)?;

    info!(
        "Promoted {} entries, archive now holds {}, {} left in staging",
        promoted,
        archive.len(),
        rejects.len()
    );
    Ok(Outcome { promoted, rejected })
}

/// Validates a staged entry against the catalog's integrity rules: required
/// fields are present, the discussion and image URLs encode the entry's own
/// id, and the cover image exists on disk.
pub fn validate_entry(entry: &GameEntry, images_dir: &Path) -> Result<(), EntryError> {
    if entry.id.trim().is_empty() {
        return Err(EntryError::EmptyField("id"));
    }
    if entry.name.trim().is_empty() {
        return Err(EntryError::EmptyField("name"));
    }
    if entry.author.trim().is_empty() {
        return Err(EntryError::EmptyField("author"));
    }
    if entry.platforms.is_empty() {
        return Err(EntryError::EmptyList("platforms"));
    }
    if entry.player_modes.is_empty() {
        return Err(EntryError::EmptyList("playerModes"));
    }
    if entry.genres.is_empty() {
        return Err(EntryError::EmptyList("genres"));
    }

    if urls::id_param(&entry.hn_url).as_deref() != Some(entry.id.as_str()) {
        return Err(EntryError::HnUrlMismatch(entry.hn_url.clone()));
    }
    if audit::image_stem(&entry.image_url) != Some(entry.id.as_str()) {
        return Err(EntryError::ImageUrlMismatch(entry.image_url.clone()));
    }

    let image = images_dir.join(format!("{}.jpg", entry.id));
    if !image.is_file() {
        return Err(EntryError::MissingImage(image));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Genre, Platform, PlayerMode, Pricing, SourceCode};
    use chrono::{TimeZone, Utc};
    use std::fs;

    fn entry(id: &str) -> GameEntry {
        GameEntry {
            id: id.to_string(),
            name: format!("Game {}", id),
            description: String::new(),
            platforms: vec![Platform::Web],
            release_date: Utc.with_ymd_and_hms(2022, 2, 2, 2, 2, 2).unwrap(),
            player_modes: vec![PlayerMode::Single],
            author: "someone".to_string(),
            genres: vec![Genre::Action],
            hn_url: GameEntry::hn_url_for(id),
            hn_points: 5,
            play_url: format!("https://example.com/{}", id),
            pricing: Pricing::Free,
            image_url: GameEntry::image_url_for(id),
            source_code_url: SourceCode::Unknown,
            is_active: false,
        }
    }

    fn images_with(ids: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for id in ids {
            fs::write(dir.path().join(format!("{}.jpg", id)), b"jpg").unwrap();
        }
        dir
    }

    #[test]
    fn a_complete_entry_validates() {
        let images = images_with(&["1"]);
        assert!(validate_entry(&entry("1"), images.path()).is_ok());
    }

    #[test]
    fn missing_image_file_is_rejected() {
        let images = images_with(&[]);
        let result = validate_entry(&entry("1"), images.path());
        assert!(matches!(result, Err(EntryError::MissingImage(_))));
    }

    #[test]
    fn mismatched_discussion_url_is_rejected() {
        let images = images_with(&["1"]);
        let mut bad = entry("1");
        bad.hn_url = "https://news.ycombinator.com/item?id=2".to_string();
        assert!(matches!(
            validate_entry(&bad, images.path()),
            Err(EntryError::HnUrlMismatch(_))
        ));
    }

    #[test]
    fn mismatched_image_url_is_rejected() {
        let images = images_with(&["1"]);
        let mut bad = entry("1");
        bad.image_url = "/images/games/2.jpg".to_string();
        assert!(matches!(
            validate_entry(&bad, images.path()),
            Err(EntryError::ImageUrlMismatch(_))
        ));
    }

    #[test]
    fn empty_required_fields_are_rejected() {
        let images = images_with(&["1"]);
        let mut bad = entry("1");
        bad.author = "  ".to_string();
        assert!(matches!(
            validate_entry(&bad, images.path()),
            Err(EntryError::EmptyField("author"))
        ));

        let mut bad = entry("1");
        bad.genres.clear();
        assert!(matches!(
            validate_entry(&bad, images.path()),
            Err(EntryError::EmptyList("genres"))
        ));
    }

    #[test]
    fn run_moves_valid_entries_and_keeps_rejects_staged() {
        let data = tempfile::tempdir().unwrap();
        let store = Store::new(data.path());
        let images = images_with(&["1", "3"]);

        let mut no_image = entry("2");
        no_image.release_date = Utc.with_ymd_and_hms(2022, 3, 3, 3, 3, 3).unwrap();
        let mut newest = entry("3");
        newest.release_date = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();

        store
            .save(Dataset::New, &[entry("1"), no_image, newest])
            .unwrap();
        store.save(Dataset::Archive, &[]).unwrap();

        let outcome = run(&store, images.path()).unwrap();
        assert_eq!(outcome.promoted, 2);
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.rejected[0].0, "2");

        let archive = store.load(Dataset::Archive).unwrap();
        let archive_ids: Vec<&str> = archive.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(archive_ids, vec!["3", "1"]);

        let staged = store.load(Dataset::New).unwrap();
        assert_eq!(staged.len(), 1);
        assert_eq!(staged[0].id, "2");
    }

    #[test]
    fn run_writes_nothing_when_no_entry_passes() {
        let data = tempfile::tempdir().unwrap();
        let store = Store::new(data.path());
        let images = images_with(&[]);

        store.save(Dataset::New, &[entry("1")]).unwrap();
        store.save(Dataset::Archive, &[]).unwrap();

        let outcome = run(&store, images.path()).unwrap();
        assert_eq!(outcome.promoted, 0);
        assert_eq!(outcome.rejected.len(), 1);

        let staged = store.load(Dataset::New).unwrap();
        assert_eq!(staged.len(), 1);
        assert!(store.load(Dataset::Archive).unwrap().is_empty());
    }
}
