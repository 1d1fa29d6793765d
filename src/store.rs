//! The dataset store. Reads and rewrites the three flat JSON collections the
//! pipeline works on.

use crate::{error::StoreError, game::GameEntry};
use log::*;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

/// Identifies one of the three dataset collections.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Dataset {
    /// The unreviewed staging output of the scraper.
    New,
    /// The curated, active catalog.
    Archive,
    /// Delisted entries whose play URL died.
    Rip,
}

impl Dataset {
    /// Returns the dataset's file name inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Dataset::New => "new.json",
            Dataset::Archive => "archive.json",
            Dataset::Rip => "rip.json",
        }
    }
}

/// Provides access to the dataset files in a given data directory.
#[derive(Debug)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Returns a new store rooted at a given data directory.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Returns the path of a given dataset's file.
    pub fn path(&self, dataset: Dataset) -> PathBuf {
        self.root.join(dataset.file_name())
    }

    /// Loads all entries of a given dataset.
    pub fn load(&self, dataset: Dataset) -> anyhow::Result<Vec<GameEntry>> {
        let path = self.path(dataset);
        if !path.is_file() {
            return Err(StoreError::NoSuchFile(path).into());
        }

        let contents = fs::read_to_string(&path)?;
        let entries: Vec<GameEntry> = serde_json::from_str(&contents)?;
        debug!("Loaded {} entries from {}", entries.len(), path.display());
        Ok(entries)
    }

    /// Returns the number of entries in a given dataset.
    pub fn count(&self, dataset: Dataset) -> anyhow::Result<usize> {
        Ok(self.load(dataset)?.len())
    }

    /// Rewrites a given dataset with the given entries. The file is written
    /// to a temporary sibling first and renamed over the destination, so a
    /// failed write never leaves a truncated dataset behind.
    pub fn save(&self, dataset: Dataset, entries: &[GameEntry]) -> anyhow::Result<()> {
        fs::create_dir_all(&self.root)?;
        let path = self.path(dataset);
        let json = serde_json::to_string_pretty(entries)?;

        let mut temp = NamedTempFile::new_in(&self.root)?;
        temp.write_all(json.as_bytes())?;
        temp.persist(&path).map_err(|err| err.error)?;

        debug!("Saved {} entries to {}", entries.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Platform, PlayerMode, Pricing, SourceCode};
    use chrono::{TimeZone, Utc};

    fn entry(id: &str) -> GameEntry {
        GameEntry {
            id: id.to_string(),
            name: format!("Game {}", id),
            description: String::new(),
            platforms: vec![Platform::Web],
            release_date: Utc.with_ymd_and_hms(2020, 5, 1, 12, 0, 0).unwrap(),
            player_modes: vec![PlayerMode::Single],
            author: "someone".to_string(),
            genres: vec![crate::game::Genre::Action],
            hn_url: GameEntry::hn_url_for(id),
            hn_points: 10,
            play_url: format!("https://example.com/{}", id),
            pricing: Pricing::Free,
            image_url: GameEntry::image_url_for(id),
            source_code_url: SourceCode::Unknown,
            is_active: false,
        }
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());

        let entries = vec![entry("1"), entry("2")];
        store.save(Dataset::Archive, &entries).unwrap();

        let loaded = store.load(Dataset::Archive).unwrap();
        assert_eq!(loaded, entries);
        assert_eq!(store.count(Dataset::Archive).unwrap(), 2);
    }

    #[test]
    fn save_writes_pretty_two_space_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        store.save(Dataset::New, &[entry("7")]).unwrap();

        let raw = fs::read_to_string(store.path(Dataset::New)).unwrap();
        assert!(raw.starts_with("[\n  {\n    \"id\": \"7\""));
        assert!(raw.contains("\"imageUrl\": \"/images/games/7.jpg\""));
        assert!(!raw.contains("isActive"));
    }

    #[test]
    fn loading_a_missing_dataset_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        assert!(store.load(Dataset::Rip).is_err());
    }

    #[test]
    fn save_replaces_existing_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());

        store.save(Dataset::New, &[entry("1"), entry("2")]).unwrap();
        store.save(Dataset::New, &[entry("3")]).unwrap();

        let loaded = store.load(Dataset::New).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "3");
    }

    #[test]
    fn dataset_file_names() {
        assert_eq!(Dataset::New.file_name(), "new.json");
        assert_eq!(Dataset::Archive.file_name(), "archive.json");
        assert_eq!(Dataset::Rip.file_name(), "rip.json");
    }
}
