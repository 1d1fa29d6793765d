//! Read-only consistency audits: entry fields against each other and entry
//! ids against the cover images on disk.

use crate::{game::GameEntry, util::urls};
use std::{collections::BTreeSet, fs, path::Path};

/// A single consistency finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// The offending entry's id.
    pub id: String,
    /// The offending entry's name.
    pub name: String,
    /// What is wrong with it.
    pub detail: String,
}

/// Returns the file stem of an entry's image URL, the part that must equal
/// the entry id.
pub fn image_stem(image_url: &str) -> Option<&str> {
    Path::new(image_url).file_stem().and_then(|stem| stem.to_str())
}

/// Checks that every entry's image URL and discussion URL encode the entry's
/// own id.
pub fn id_consistency(entries: &[GameEntry]) -> Vec<Issue> {
    let mut issues = Vec::new();

    for entry in entries {
        match image_stem(&entry.image_url) {
            Some(stem) if stem == entry.id => {}
            _ => issues.push(Issue {
                id: entry.id.clone(),
                name: entry.name.clone(),
                detail: format!("image URL doesn't encode the entry id: {}", entry.image_url),
            }),
        }

        match urls::id_param(&entry.hn_url) {
            Some(ref id) if *id == entry.id => {}
            _ => issues.push(Issue {
                id: entry.id.clone(),
                name: entry.name.clone(),
                detail: format!(
                    "discussion URL doesn't encode the entry id: {}",
                    entry.hn_url
                ),
            }),
        }
    }

    issues
}

/// Cross-references entry ids against the cover images on disk, both ways.
#[derive(Debug)]
pub struct ImageCoverage {
    /// Ids without a cover image.
    pub missing_images: Vec<String>,
    /// Image files no entry refers to.
    pub orphan_images: Vec<String>,
}

/// Compares the given entries' ids with the `.jpg` files in the image
/// directory. Both lists come back sorted.
pub fn image_coverage(entries: &[GameEntry], images_dir: &Path) -> anyhow::Result<ImageCoverage> {
    let ids: BTreeSet<String> = entries
        .iter()
        .filter(|entry| !entry.id.is_empty())
        .map(|entry| entry.id.clone())
        .collect();

    let mut image_ids = BTreeSet::new();
    for dir_entry in fs::read_dir(images_dir)? {
        let path = dir_entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("jpg") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
            image_ids.insert(stem.to_string());
        }
    }

    Ok(ImageCoverage {
        missing_images: ids.difference(&image_ids).cloned().collect(),
        orphan_images: image_ids.difference(&ids).cloned().collect(),
    })
}
