//! The duplicate checker. A read-only audit across all three datasets for
//! entries sharing a name+author pair or a normalized play URL.

use crate::{
    game::GameEntry,
    store::{Dataset, Store},
    util::urls,
};
use std::{
    collections::{BTreeMap, HashSet},
    fmt,
};

/// The key space a duplicate was found in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DuplicateKind {
    /// Two entries share a name and an author.
    NameAuthor,
    /// Two entries share a normalized play URL.
    PlayUrl,
}

impl fmt::Display for DuplicateKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DuplicateKind::NameAuthor => write!(f, "name+author"),
            DuplicateKind::PlayUrl => write!(f, "play URL"),
        }
    }
}

/// One member of a duplicate group, as seen from one entry's point of view.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    /// The conflicting entry's id.
    pub id: String,
    /// The conflicting entry's name.
    pub name: String,
    /// The dataset the conflicting entry lives in.
    pub dataset: Dataset,
}

/// A single duplicate report: an entry plus everything it collides with.
#[derive(Debug, Clone)]
pub struct Duplicate {
    /// The entry's id.
    pub id: String,
    /// The entry's name.
    pub name: String,
    /// The dataset the entry lives in.
    pub dataset: Dataset,
    /// The key space the collision is in.
    pub kind: DuplicateKind,
    /// The other members of the group.
    pub conflicts_with: Vec<Conflict>,
}

/// The result of a duplicate check run.
#[derive(Debug)]
pub struct Report {
    /// Entry counts per dataset, in load order.
    pub counts: Vec<(Dataset, usize)>,
    /// Every duplicate found, name+author groups first.
    pub duplicates: Vec<Duplicate>,
}

impl Report {
    /// The total number of entries checked.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }
}

/// Loads all three datasets and reports every duplicate group. Nothing is
/// written, duplicate resolution is a manual call.
pub fn check(store: &Store) -> anyhow::Result<Report> {
    let mut datasets = Vec::new();
    for dataset in &[Dataset::Archive, Dataset::Rip, Dataset::New] {
        datasets.push((*dataset, store.load(*dataset)?));
    }

    let counts = datasets
        .iter()
        .map(|(dataset, entries)| (*dataset, entries.len()))
        .collect();

    Ok(Report {
        counts,
        duplicates: find_duplicates(&datasets),
    })
}

/// Indexes the given datasets by the exact name+author pair and by
/// normalized play URL and returns every group with more than one member.
/// Every member of a group is reported, with the others as its conflicts.
/// An entry id is reported at most once per URL group.
pub fn find_duplicates(datasets: &[(Dataset, Vec<GameEntry>)]) -> Vec<Duplicate> {
    let mut by_name_author: BTreeMap<String, Vec<(&GameEntry, Dataset)>> = BTreeMap::new();
    let mut by_play_url: BTreeMap<String, Vec<(&GameEntry, Dataset)>> = BTreeMap::new();

    for (dataset, entries) in datasets {
        for entry in entries {
            let name_key = format!("{}|{}", entry.name, entry.author);
            by_name_author.entry(name_key).or_default().push((entry, *dataset));

            if !entry.play_url.trim().is_empty() {
                by_play_url
                    .entry(urls::normalize(&entry.play_url))
                    .or_default()
                    .push((entry, *dataset));
            }
        }
    }

    let mut duplicates = Vec::new();

    for group in by_name_author.values().filter(|group| group.len() > 1) {
        for (position, (entry, dataset)) in group.iter().enumerate() {
            duplicates.push(Duplicate {
                id: entry.id.clone(),
                name: entry.name.clone(),
                dataset: *dataset,
                kind: DuplicateKind::NameAuthor,
                conflicts_with: conflicts(group, position),
            });
        }
    }

    let mut reported_urls: HashSet<&str> = HashSet::new();
    for group in by_play_url.values().filter(|group| group.len() > 1) {
        for (position, (entry, dataset)) in group.iter().enumerate() {
            if !reported_urls.insert(entry.id.as_str()) {
                continue;
            }
            duplicates.push(Duplicate {
                id: entry.id.clone(),
                name: entry.name.clone(),
                dataset: *dataset,
                kind: DuplicateKind::PlayUrl,
                conflicts_with: conflicts(group, position),
            });
        }
    }

    duplicates
}

/// Everyone in the group except the member at `position`.
fn conflicts(group: &[(&GameEntry, Dataset)], position: usize) -> Vec<Conflict> {
    group
        .iter()
        .enumerate()
        .filter(|(other, _)| *other != position)
        .map(|(_, (entry, dataset))| Conflict {
            id: entry.id.clone(),
            name: entry.name.clone(),
            dataset: *dataset,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Genre, Platform, PlayerMode, Pricing, SourceCode};
    use chrono::{TimeZone, Utc};

    fn entry(id: &str, name: &str, author: &str, play_url: &str) -> GameEntry {
        GameEntry {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            platforms: vec![Platform::Web],
            release_date: Utc.with_ymd_and_hms(2019, 6, 1, 0, 0, 0).unwrap(),
            player_modes: vec![PlayerMode::Single],
            author: author.to_string(),
            genres: vec![Genre::Action],
            hn_url: GameEntry::hn_url_for(id),
            hn_points: 0,
            play_url: play_url.to_string(),
            pricing: Pricing::Free,
            image_url: GameEntry::image_url_for(id),
            source_code_url: SourceCode::Unknown,
            is_active: false,
        }
    }

    #[test]
    fn reports_name_author_groups_mutually() {
        let datasets = vec![
            (
                Dataset::Archive,
                vec![entry("1", "Quest", "anned", "https://a.example")],
            ),
            (
                Dataset::New,
                vec![entry("2", "Quest", "anned", "https://b.example")],
            ),
        ];

        let duplicates = find_duplicates(&datasets);
        assert_eq!(duplicates.len(), 2);
        assert!(duplicates
            .iter()
            .all(|d| d.kind == DuplicateKind::NameAuthor));

        let first = &duplicates[0];
        assert_eq!(first.id, "1");
        assert_eq!(first.conflicts_with.len(), 1);
        assert_eq!(first.conflicts_with[0].id, "2");
        assert_eq!(first.conflicts_with[0].dataset, Dataset::New);

        assert_eq!(duplicates[1].conflicts_with[0].id, "1");
    }

    #[test]
    fn name_author_matching_is_exact() {
        let datasets = vec![
            (
                Dataset::Archive,
                vec![entry("1", "Quest", "anned", "https://a.example")],
            ),
            (
                Dataset::New,
                vec![entry("2", "quest", "Anned", "https://b.example")],
            ),
        ];

        assert!(find_duplicates(&datasets).is_empty());
    }

    #[test]
    fn reports_normalized_url_groups() {
        let datasets = vec![
            (
                Dataset::Archive,
                vec![entry("1", "Quest", "anned", "https://Example.com/Play/")],
            ),
            (
                Dataset::Rip,
                vec![entry("2", "Other", "bob", "https://example.com/play")],
            ),
        ];

        let duplicates = find_duplicates(&datasets);
        assert_eq!(duplicates.len(), 2);
        assert!(duplicates.iter().all(|d| d.kind == DuplicateKind::PlayUrl));
        assert_eq!(duplicates[0].conflicts_with[0].id, "2");
    }

    #[test]
    fn empty_play_urls_are_not_url_duplicates() {
        let datasets = vec![
            (Dataset::Archive, vec![entry("1", "A", "x", "")]),
            (Dataset::Rip, vec![entry("2", "B", "y", " ")]),
        ];

        assert!(find_duplicates(&datasets).is_empty());
    }

    #[test]
    fn an_entry_can_be_both_kinds_of_duplicate() {
        let datasets = vec![
            (
                Dataset::Archive,
                vec![entry("1", "Quest", "anned", "https://a.example")],
            ),
            (
                Dataset::New,
                vec![entry("2", "Quest", "anned", "https://a.example")],
            ),
        ];

        let duplicates = find_duplicates(&datasets);
        assert_eq!(duplicates.len(), 4);
        assert_eq!(
            duplicates
                .iter()
                .filter(|d| d.kind == DuplicateKind::NameAuthor)
                .count(),
            2
        );
        assert_eq!(
            duplicates
                .iter()
                .filter(|d| d.kind == DuplicateKind::PlayUrl)
                .count(),
            2
        );
    }

    #[test]
    fn same_id_is_reported_once_per_url_group() {
        let datasets = vec![
            (
                Dataset::Archive,
                vec![entry("1", "Quest", "anned", "https://a.example")],
            ),
            (
                Dataset::New,
                vec![entry("1", "Quest again", "anned", "https://a.example")],
            ),
        ];

        let duplicates = find_duplicates(&datasets);
        let url_reports: Vec<_> = duplicates
            .iter()
            .filter(|d| d.kind == DuplicateKind::PlayUrl)
            .collect();
        assert_eq!(url_reports.len(), 1);
        assert_eq!(url_reports[0].id, "1");
    }
}
