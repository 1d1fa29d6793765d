//! The compiler. Renders the curated datasets into statically importable
//! Rust modules plus an aggregate statistics module, so the catalog site
//! ships the data as code instead of parsing JSON at runtime.
//!
//! Output is a pure function of the datasets: compiling unchanged data
//! produces byte-identical modules.

use crate::{
    game::{GameEntry, PlayerMode, SourceCode},
    store::{Dataset, Store},
};
use log::*;
use std::{collections::BTreeMap, fmt::Write, fs, path::Path};

/// Header stamped on every generated module.
const HEADER: &str = "//! Generated by the compile pipeline stage. Do not edit.\n";

/// Compiles both archives and the statistics module into `out_dir`.
pub fn run(store: &Store, out_dir: &Path) -> anyhow::Result<()> {
    let archive = store.load(Dataset::Archive)?;
    let rip = store.load(Dataset::Rip)?;

    fs::create_dir_all(out_dir)?;
    fs::write(out_dir.join("games.rs"), render_dataset("games", &archive, true))?;
    fs::write(
        out_dir.join("rip_games.rs"),
        render_dataset("rip_games", &rip, false),
    )?;
    fs::write(out_dir.join("stats.rs"), render_stats(&archive, &rip))?;

    info!(
        "Compiled {} active and {} delisted entries into {}",
        archive.len(),
        rip.len(),
        out_dir.display()
    );
    Ok(())
}

/// Renders one dataset as a Rust module exposing a single constructor
/// function. Entries keep their dataset order and every entry is stamped
/// with whether it came from the active dataset.
pub fn render_dataset(name: &str, entries: &[GameEntry], active: bool) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    out.push_str("use chrono::{DateTime, Utc};\n");
    out.push_str(
        "use hngames::game::{GameEntry, Genre, Platform, PlayerMode, Pricing, SourceCode};\n\n",
    );

    let _ = writeln!(out, "/// Returns every entry of the {} dataset.", name);
    let _ = writeln!(out, "pub fn {}() -> Vec<GameEntry> {{", name);
    out.push_str("    vec![\n");
    for entry in entries {
        render_entry(&mut out, entry, active);
    }
    out.push_str("    ]\n");
    out.push_str("}\n");
    out
}

fn render_entry(out: &mut String, entry: &GameEntry, active: bool) {
    let _ = writeln!(out, "        GameEntry {{");
    let _ = writeln!(out, "            id: {:?}.to_string(),", entry.id);
    let _ = writeln!(out, "            name: {:?}.to_string(),", entry.name);
    let _ = writeln!(
        out,
        "            description: {:?}.to_string(),",
        entry.description
    );
    let _ = writeln!(
        out,
        "            platforms: vec![{}],",
        entry
            .platforms
            .iter()
            .map(|platform| format!("Platform::{:?}", platform))
            .collect::<Vec<_>>()
            .join(", ")
    );
    let _ = writeln!(
        out,
        "            release_date: DateTime::<Utc>::from_timestamp({}, 0).expect(\"timestamp in range\"),",
        entry.release_date.timestamp()
    );
    let _ = writeln!(
        out,
        "            player_modes: vec![{}],",
        ordered_player_modes(&entry.player_modes)
            .iter()
            .map(|mode| format!("PlayerMode::{:?}", mode))
            .collect::<Vec<_>>()
            .join(", ")
    );
    let _ = writeln!(out, "            author: {:?}.to_string(),", entry.author);
    let _ = writeln!(
        out,
        "            genres: vec![{}],",
        entry
            .genres
            .iter()
            .map(|genre| format!("Genre::{:?}", genre))
            .collect::<Vec<_>>()
            .join(", ")
    );
    let _ = writeln!(out, "            hn_url: {:?}.to_string(),", entry.hn_url);
    let _ = writeln!(out, "            hn_points: {},", entry.hn_points);
    let _ = writeln!(out, "            play_url: {:?}.to_string(),", entry.play_url);
    let _ = writeln!(out, "            pricing: Pricing::{:?},", entry.pricing);
    let _ = writeln!(out, "            image_url: {:?}.to_string(),", entry.image_url);
    let _ = writeln!(
        out,
        "            source_code_url: {},",
        render_source_code(&entry.source_code_url)
    );
    let _ = writeln!(out, "            is_active: {},", active);
    let _ = writeln!(out, "        }},");
}

/// Orders player modes for rendering: single first, the rest alphabetically.
fn ordered_player_modes(modes: &[PlayerMode]) -> Vec<PlayerMode> {
    let mut modes = modes.to_vec();
    modes.sort_by_key(|mode| (*mode != PlayerMode::Single, mode.to_string()));
    modes
}

fn render_source_code(source: &SourceCode) -> String {
    match source {
        SourceCode::Url(url) => format!("SourceCode::Url({:?}.to_string())", url),
        SourceCode::Indicated => "SourceCode::Indicated".to_string(),
        SourceCode::Unknown => "SourceCode::Unknown".to_string(),
    }
}

/// Renders the statistics module: totals for both datasets and active entry
/// counts bucketed by release year.
pub fn render_stats(archive: &[GameEntry], rip: &[GameEntry]) -> String {
    let mut by_year: BTreeMap<i32, usize> = BTreeMap::new();
    for entry in archive {
        *by_year.entry(entry.release_year()).or_insert(0) += 1;
    }

    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    out.push_str("use std::collections::BTreeMap;\n\n");
    let _ = writeln!(out, "/// Number of entries in the active dataset.");
    let _ = writeln!(out, "pub const TOTAL_GAMES_COUNT: usize = {};", archive.len());
    let _ = writeln!(out, "/// Number of delisted entries.");
    let _ = writeln!(
        out,
        "pub const TOTAL_RIP_GAMES_COUNT: usize = {};",
        rip.len()
    );
    out.push('\n');
    out.push_str("/// Active entry counts by release year.\n");
    out.push_str("pub fn games_count_by_year() -> BTreeMap<i32, usize> {\n");
    out.push_str("    vec![\n");
    for (year, count) in &by_year {
        let _ = writeln!(out, "        ({}, {}),", year, count);
    }
    out.push_str("    ]\n");
    out.push_str("    .into_iter()\n");
    out.push_str("    .collect()\n");
    out.push_str("}\n");
    out
}
