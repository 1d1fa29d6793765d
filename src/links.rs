//! The link checker. Re-validates the play URLs of every archived entry and
//! relocates entries whose URL died into the delisted dataset.

use crate::{
    game::GameEntry,
    store::{Dataset, Store},
    util,
    validate::UrlValidator,
};
use futures::future::try_join_all;
use log::*;
use std::{collections::HashSet, sync::Arc, time::Duration};
use tokio::time::sleep;

/// How many concurrent check batches a run is split into.
const BATCH_COUNT: usize = 5;
/// Delay between checks inside a batch.
const CHECK_DELAY: Duration = Duration::from_millis(500);

/// The outcome of a link check run.
#[derive(Debug)]
pub struct Outcome {
    /// How many entries had a play URL to check.
    pub checked: usize,
    /// The entries relocated to the delisted dataset, in check order.
    pub delisted: Vec<GameEntry>,
}

/// Checks every archived play URL and moves entries with dead URLs from the
/// active dataset to the delisted one. Both files are rewritten once, and
/// only when something actually moved.
pub async fn run(store: &Store) -> anyhow::Result<Outcome> {
    let archive = store.load(Dataset::Archive)?;
    let rip = store.load(Dataset::Rip)?;

    let candidates: Vec<GameEntry> = archive
        .iter()
        .filter(|entry| !entry.play_url.trim().is_empty())
        .cloned()
        .collect();
    let checked = candidates.len();
    info!(
        "{} of {} active entries have a play URL to check",
        checked,
        archive.len()
    );

    if candidates.is_empty() {
        return Ok(Outcome {
            checked,
            delisted: Vec::new(),
        });
    }

    let validator = Arc::new(UrlValidator::new()?);
    let batches = util::chunk(candidates, BATCH_COUNT);
    debug!("Split into {} batches", batches.len());

    let mut handles = Vec::new();
    for (index, batch) in batches.into_iter().enumerate() {
        let validator = Arc::clone(&validator);
        handles.push(tokio::spawn(async move {
            check_batch(&validator, batch, index).await
        }));
    }

    let mut dead = Vec::new();
    for batch_dead in try_join_all(handles).await? {
        dead.extend(batch_dead);
    }

    if dead.is_empty() {
        info!("All {} checked play URLs are alive", checked);
        return Ok(Outcome {
            checked,
            delisted: Vec::new(),
        });
    }

    let dead_ids: HashSet<&str> = dead.iter().map(|entry| entry.id.as_str()).collect();
    let (active, delisted) = relocate(archive, rip, &dead_ids);
    store.save(Dataset::Archive, &active)?;
    store.save(Dataset::Rip, &delisted)?;

    for entry in &dead {
        warn!("Delisted {} ({}): {}", entry.name, entry.id, entry.play_url);
    }
    info!(
        "Relocated {} of {} checked entries, {} remain active",
        dead.len(),
        checked,
        active.len()
    );

    Ok(Outcome {
        checked,
        delisted: dead,
    })
}

/// Splits the archives: entries with dead ids are appended to the delisted
/// dataset in their archive order, everything else keeps its place. Entry
/// contents are not touched either way.
pub fn relocate(
    archive: Vec<GameEntry>,
    rip: Vec<GameEntry>,
    dead_ids: &HashSet<&str>,
) -> (Vec<GameEntry>, Vec<GameEntry>) {
    let mut active = Vec::with_capacity(archive.len());
    let mut delisted = rip;

    for entry in archive {
        if dead_ids.contains(entry.id.as_str()) {
            delisted.push(entry);
        } else {
            active.push(entry);
        }
    }

    (active, delisted)
}

async fn check_batch(validator: &UrlValidator, batch: Vec<GameEntry>, index: usize) -> Vec<GameEntry> {
    debug!("Checking batch {} ({} entries)", index + 1, batch.len());

    let mut dead = Vec::new();
    for (position, entry) in batch.into_iter().enumerate() {
        if position > 0 {
            sleep(CHECK_DELAY).await;
        }

        debug!("Checking {} ({}): {}", entry.name, entry.id, entry.play_url);
        let check = validator.check(&entry.play_url).await;
        if !check.valid {
            info!("Dead play URL for {} ({}): {}", entry.name, entry.id, entry.play_url);
            dead.push(entry);
        }
    }

    debug!("Batch {} done, {} dead URLs", index + 1, dead.len());
    dead
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Genre, Platform, PlayerMode, Pricing, SourceCode};
    use chrono::{TimeZone, Utc};

    fn entry(id: &str) -> GameEntry {
        GameEntry {
            id: id.to_string(),
            name: format!("Game {}", id),
            description: String::new(),
            platforms: vec![Platform::Web],
            release_date: Utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap(),
            player_modes: vec![PlayerMode::Single],
            author: "someone".to_string(),
            genres: vec![Genre::Action],
            hn_url: GameEntry::hn_url_for(id),
            hn_points: 1,
            play_url: format!("https://example.com/{}", id),
            pricing: Pricing::Free,
            image_url: GameEntry::image_url_for(id),
            source_code_url: SourceCode::Unknown,
            is_active: false,
        }
    }

    #[test]
    fn relocate_moves_dead_entries_to_the_end_of_rip() {
        let archive = vec![entry("1"), entry("2"), entry("3")];
        let rip = vec![entry("9")];
        let dead_ids: HashSet<&str> = ["2"].iter().copied().collect();

        let (active, delisted) = relocate(archive, rip, &dead_ids);

        let active_ids: Vec<&str> = active.iter().map(|e| e.id.as_str()).collect();
        let delisted_ids: Vec<&str> = delisted.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(active_ids, vec!["1", "3"]);
        assert_eq!(delisted_ids, vec!["9", "2"]);
    }

    #[test]
    fn relocate_preserves_every_entry_exactly_once() {
        let archive = vec![entry("1"), entry("2")];
        let rip = vec![entry("3")];
        let dead_ids: HashSet<&str> = ["1", "2"].iter().copied().collect();

        let (active, delisted) = relocate(archive.clone(), rip, &dead_ids);
        assert!(active.is_empty());
        assert_eq!(delisted.len(), 3);
        assert_eq!(delisted[1], archive[0]);
        assert_eq!(delisted[2], archive[1]);
    }

    #[test]
    fn relocate_with_no_dead_ids_is_a_no_op() {
        let archive = vec![entry("1")];
        let rip = vec![entry("2")];

        let (active, delisted) = relocate(archive.clone(), rip.clone(), &HashSet::new());
        assert_eq!(active, archive);
        assert_eq!(delisted, rip);
    }
}
