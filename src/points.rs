//! Refreshes the Hacker News points of recently released entries. Points
//! settle quickly, so only the trailing month is worth re-fetching.

use crate::{
    game::GameEntry,
    hn::HnClient,
    store::{Dataset, Store},
    util,
};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use futures::future::try_join_all;
use log::*;
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::time::sleep;

/// How many concurrent fetch batches a run is split into.
const BATCH_COUNT: usize = 5;
/// Delay between item fetches inside a batch.
const FETCH_DELAY: Duration = Duration::from_millis(1000);
/// How far back entries are considered recent.
const WINDOW_DAYS: i64 = 30;

/// The outcome of a points refresh run.
#[derive(Debug)]
pub struct Outcome {
    /// How many recent entries were re-fetched.
    pub checked: usize,
    /// How many entries had changed points.
    pub updated: usize,
}

/// Re-fetches the points of every entry released in the trailing month, in
/// both archives, and rewrites the files whose entries changed.
pub async fn run(store: &Store) -> anyhow::Result<Outcome> {
    let cutoff = Utc::now() - ChronoDuration::days(WINDOW_DAYS);
    refresh_since(store, cutoff).await
}

/// Re-fetches the points of every entry released after `cutoff`.
pub async fn refresh_since(store: &Store, cutoff: DateTime<Utc>) -> anyhow::Result<Outcome> {
    let mut archive = store.load(Dataset::Archive)?;
    let mut rip = store.load(Dataset::Rip)?;

    let recent: Vec<GameEntry> = archive
        .iter()
        .chain(rip.iter())
        .filter(|entry| entry.release_date >= cutoff)
        .cloned()
        .collect();
    let checked = recent.len();
    info!(
        "{} entries released since {}",
        checked,
        cutoff.format("%Y-%m-%d")
    );

    if recent.is_empty() {
        return Ok(Outcome {
            checked,
            updated: 0,
        });
    }

    let api = Arc::new(HnClient::new()?);
    let mut handles = Vec::new();
    for (index, batch) in util::chunk(recent, BATCH_COUNT).into_iter().enumerate() {
        let api = Arc::clone(&api);
        handles.push(tokio::spawn(async move {
            fetch_batch(&api, batch, index).await
        }));
    }

    let mut fresh: HashMap<String, u32> = HashMap::new();
    for batch_fresh in try_join_all(handles).await? {
        fresh.extend(batch_fresh);
    }

    if fresh.is_empty() {
        info!("No point changes");
        return Ok(Outcome {
            checked,
            updated: 0,
        });
    }

    let updated_active = apply(&mut archive, &fresh);
    let updated_delisted = apply(&mut rip, &fresh);
    if updated_active > 0 {
        store.save(Dataset::Archive, &archive)?;
    }
    if updated_delisted > 0 {
        store.save(Dataset::Rip, &rip)?;
    }

    let updated = updated_active + updated_delisted;
    info!("Updated points on {} of {} recent entries", updated, checked);
    Ok(Outcome { checked, updated })
}

/// Writes fresh point counts into the given entries and returns how many
/// actually changed.
pub fn apply(entries: &mut [GameEntry], fresh: &HashMap<String, u32>) -> usize {
    let mut updated = 0;
    for entry in entries.iter_mut() {
        if let Some(points) = fresh.get(&entry.id) {
            if *points != entry.hn_points {
                entry.hn_points = *points;
                updated += 1;
            }
        }
    }
    updated
}

/// Fetches fresh points for a batch. A failed fetch is logged and skipped,
/// one flaky item shouldn't sink the whole refresh.
async fn fetch_batch(api: &HnClient, batch: Vec<GameEntry>, index: usize) -> Vec<(String, u32)> {
    debug!("Fetching batch {} ({} entries)", index + 1, batch.len());

    let mut fresh = Vec::new();
    for (position, entry) in batch.into_iter().enumerate() {
        if position > 0 {
            sleep(FETCH_DELAY).await;
        }

        match api.item(&entry.id).await {
            Ok(item) => match item.points {
                Some(points) if points != entry.hn_points => {
                    info!(
                        "Points for {} ({}): {} now {}",
                        entry.name, entry.id, entry.hn_points, points
                    );
                    fresh.push((entry.id, points));
                }
                Some(_) => debug!("Points unchanged for {} ({})", entry.name, entry.id),
                None => warn!("No points on item {} ({})", entry.id, entry.name),
            },
            Err(err) => warn!("Skipping {} ({}): {}", entry.name, entry.id, err),
        }
    }

    fresh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Genre, Platform, PlayerMode, Pricing, SourceCode};
    use chrono::TimeZone;

    fn entry(id: &str, points: u32) -> GameEntry {
        GameEntry {
            id: id.to_string(),
            name: format!("Game {}", id),
            description: String::new(),
            platforms: vec![Platform::Web],
            release_date: Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap(),
            player_modes: vec![PlayerMode::Single],
            author: "someone".to_string(),
            genres: vec![Genre::Action],
            hn_url: GameEntry::hn_url_for(id),
            hn_points: points,
            play_url: String::new(),
            pricing: Pricing::Free,
            image_url: GameEntry::image_url_for(id),
            source_code_url: SourceCode::Unknown,
            is_active: false,
        }
    }

    #[test]
    fn apply_updates_only_changed_entries() {
        let mut entries = vec![entry("1", 10), entry("2", 20), entry("3", 30)];
        let fresh: HashMap<String, u32> =
            vec![("1".to_string(), 15), ("2".to_string(), 20)].into_iter().collect();

        let updated = apply(&mut entries, &fresh);
        assert_eq!(updated, 1);
        assert_eq!(entries[0].hn_points, 15);
        assert_eq!(entries[1].hn_points, 20);
        assert_eq!(entries[2].hn_points, 30);
    }

    #[test]
    fn apply_ignores_unknown_ids() {
        let mut entries = vec![entry("1", 10)];
        let fresh: HashMap<String, u32> = vec![("9".to_string(), 99)].into_iter().collect();

        assert_eq!(apply(&mut entries, &fresh), 0);
        assert_eq!(entries[0].hn_points, 10);
    }
}
