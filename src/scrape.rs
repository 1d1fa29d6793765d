//! The scraper. Queries the Hacker News search API for Show HN game
//! submissions in a time window, filters out things that aren't playable
//! games, validates candidate play URLs and rewrites the staging dataset
//! with classified entries.

use crate::{
    classify,
    error::WindowError,
    game::GameEntry,
    hn::{models::Hit, HnClient},
    store::{Dataset, Store},
    text, util,
    util::urls,
    validate::UrlValidator,
};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use futures::future::try_join_all;
use log::*;
use std::{collections::HashSet, sync::Arc, time::Duration};
use tokio::time::sleep;

/// How many concurrent validation batches a run is split into.
const BATCH_COUNT: usize = 5;
/// Delay between candidate URL attempts inside a batch.
const ATTEMPT_DELAY: Duration = Duration::from_millis(200);

/// Titles containing any of these terms are not playable games and are
/// dropped outright. "board game" and "card game" are deliberately absent,
/// they throw away too many real submissions.
const TITLE_BLACKLIST: &[&str] = &[
    "game engine",
    "game editor",
    "games editor",
    "game collection",
    "game library",
    "game maker",
    "game of life",
    "tutorial",
    "ebook",
    "course",
    "framework",
    "football game",
    "for video game",
    "nfl game",
    "nhl game",
    "sdk",
    "editor",
    "plugin",
    "game of thrones",
    "games of thrones",
    "gamers",
    "gamechanger",
    "game-changer",
    "gamestop",
    "game development",
    "game design",
    "game theory",
    "gameplay",
    "emulator",
    "games list",
    "marketplace",
    "toolkit",
];

/// An explicit scrape window over submission creation time.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Window {
    /// Start of the window (midnight UTC, inclusive day).
    pub from: DateTime<Utc>,
    /// End of the window (midnight UTC, exclusive day).
    pub to: DateTime<Utc>,
}

impl Window {
    /// Parses a window from two `YYYY-MM-DD` day bounds.
    pub fn parse(from: &str, to: &str) -> Result<Self, WindowError> {
        let from = day_start(from)?;
        let to = day_start(to)?;
        if from >= to {
            return Err(WindowError::Backwards { from, to });
        }
        Ok(Self { from, to })
    }
}

fn day_start(day: &str) -> Result<DateTime<Utc>, WindowError> {
    let date = day
        .parse::<NaiveDate>()
        .map_err(|_| WindowError::InvalidDay(day.to_string()))?;
    Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

/// A preprocessed API hit: markup stripped, mojibake fixed and the ordered
/// candidate play URL list collected.
#[derive(Debug, Clone)]
pub struct RawItem {
    /// The submission id.
    pub id: String,
    /// The normalized title, "Show HN" prefix still attached.
    pub title: String,
    /// The cleaned self-post text. May be empty.
    pub story_text: String,
    /// The submitter's username.
    pub author: String,
    /// The submission's points.
    pub points: u32,
    /// When the submission was posted.
    pub created_at: DateTime<Utc>,
    /// Candidate play URLs: the attached URL first, then URLs found in the
    /// self-post text, deduplicated in order.
    pub candidate_urls: Vec<String>,
}

/// Preprocesses a raw hit into the shape the filters and classifiers expect.
pub fn preprocess(hit: &Hit) -> RawItem {
    let story_text = text::strip_html(hit.body());

    let mut candidate_urls = Vec::new();
    if let Some(url) = hit.url.as_deref() {
        if !url.is_empty() {
            candidate_urls.push(url.to_string());
        }
    }
    for found in text::extract_urls(&story_text) {
        if !candidate_urls.contains(&found) {
            candidate_urls.push(found);
        }
    }

    RawItem {
        id: hit.story_key(),
        title: text::normalize_title(hit.title.as_deref().unwrap_or("")),
        story_text,
        author: hit.author().to_string(),
        points: hit.points.unwrap_or(0),
        created_at: hit.created_at,
        candidate_urls,
    }
}

/// Returns the blacklist term a title matches, if any.
pub fn blacklisted(title: &str) -> Option<&'static str> {
    let title = title.to_lowercase();
    TITLE_BLACKLIST
        .iter()
        .copied()
        .find(|term| title.contains(term))
}

/// Builds the staged entry for an item whose validation picked `play_url`.
pub fn build_entry(item: &RawItem, play_url: &str, page_text: &str) -> GameEntry {
    let folded = classify::fold(&item.title, &item.story_text);

    GameEntry {
        id: item.id.clone(),
        name: text::clean_title(&item.title),
        description: item.story_text.clone(),
        platforms: classify::platforms(&folded, play_url),
        release_date: item.created_at,
        player_modes: classify::player_modes(&folded),
        author: item.author.clone(),
        genres: classify::genres(&folded),
        hn_url: GameEntry::hn_url_for(&item.id),
        hn_points: item.points,
        play_url: play_url.to_string(),
        pricing: classify::pricing(&folded),
        image_url: GameEntry::image_url_for(&item.id),
        source_code_url: classify::source_code(&item.candidate_urls, &item.story_text, page_text),
        is_active: false,
    }
}

/// The ids and normalized play URLs already present in the curated archives.
/// Submissions matching either are already catalogued and skipped.
struct KnownEntries {
    ids: HashSet<String>,
    play_urls: HashSet<String>,
}

impl KnownEntries {
    fn load(store: &Store) -> anyhow::Result<Self> {
        let mut ids = HashSet::new();
        let mut play_urls = HashSet::new();

        for dataset in &[Dataset::Archive, Dataset::Rip] {
            for entry in store.load(*dataset)? {
                ids.insert(entry.id);
                if !entry.play_url.is_empty() {
                    play_urls.insert(urls::normalize(&entry.play_url));
                }
            }
        }

        Ok(Self { ids, play_urls })
    }
}

/// A survivor of URL validation: the item, the play URL that resolved and
/// the page text behind it.
struct Validated {
    item: RawItem,
    play_url: String,
    page_text: String,
}

/// Drives scrape runs against the API, the URL validator and the store.
pub struct Scraper {
    api: HnClient,
    validator: Arc<UrlValidator>,
    store: Store,
}

impl Scraper {
    /// Returns a new scraper over a given store.
    pub fn new(store: Store) -> anyhow::Result<Self> {
        Ok(Self {
            api: HnClient::new()?,
            validator: Arc::new(UrlValidator::new()?),
            store,
        })
    }

    /// Scrapes every Show HN game submission inside a window and rewrites the
    /// staging dataset with the survivors.
    pub async fn scrape_window(&self, window: Window) -> anyhow::Result<()> {
        info!(
            "Scraping Show HN games from {} to {}",
            window.from.format("%Y-%m-%d"),
            window.to.format("%Y-%m-%d")
        );

        let hits = self
            .api
            .search_window(window.from.timestamp(), window.to.timestamp())
            .await?;
        info!("API returned {} hits", hits.len());

        self.process(hits).await
    }

    /// Scrapes a single submission by id and rewrites the staging dataset
    /// with it, subject to the same filters as a window scrape.
    pub async fn scrape_single(&self, id: &str) -> anyhow::Result<()> {
        info!("Scraping single submission {}", id);
        let item = self.api.item(id).await?;
        self.process(vec![item.into_hit()]).await
    }

    async fn process(&self, hits: Vec<Hit>) -> anyhow::Result<()> {
        let total = hits.len();
        let known = KnownEntries::load(&self.store)?;

        let mut items = Vec::new();
        for hit in &hits {
            let item = preprocess(hit);

            if let Some(term) = blacklisted(&item.title) {
                info!("Not a game ('{}'): {}", term, item.title);
                continue;
            }
            if known.ids.contains(&item.id) {
                info!("Already catalogued ({}): {}", item.id, item.title);
                continue;
            }

            items.push(item);
        }

        debug!("{} of {} hits left after title filtering", items.len(), total);

        let mut handles = Vec::new();
        for (index, batch) in util::chunk(items, BATCH_COUNT).into_iter().enumerate() {
            let validator = Arc::clone(&self.validator);
            handles.push(tokio::spawn(async move {
                validate_batch(&validator, batch, index).await
            }));
        }

        let mut entries = Vec::new();
        for survivors in try_join_all(handles).await? {
            for validated in survivors {
                if known.play_urls.contains(&urls::normalize(&validated.play_url)) {
                    info!(
                        "Play URL already catalogued: {} ({})",
                        validated.play_url, validated.item.title
                    );
                    continue;
                }
                entries.push(build_entry(
                    &validated.item,
                    &validated.play_url,
                    &validated.page_text,
                ));
            }
        }

        entries.sort_by_key(|entry| entry.release_date);
        self.store.save(Dataset::New, &entries)?;

        info!(
            "Staged {} of {} hits for review, {} filtered out",
            entries.len(),
            total,
            total - entries.len()
        );
        Ok(())
    }
}

async fn validate_batch(
    validator: &UrlValidator,
    batch: Vec<RawItem>,
    index: usize,
) -> Vec<Validated> {
    debug!("Validating batch {} ({} items)", index + 1, batch.len());

    let mut survivors = Vec::new();
    for item in batch {
        match validate_item(validator, &item).await {
            Some((play_url, page_text)) => survivors.push(Validated {
                item,
                play_url,
                page_text,
            }),
            None => info!("No candidate URL resolved: {}", item.title),
        }
    }

    debug!("Batch {} done, {} survivors", index + 1, survivors.len());
    survivors
}

/// Tries an item's candidate URLs in order and returns the first that
/// resolves, along with its page text. An item without a single living
/// candidate is rejected.
async fn validate_item(validator: &UrlValidator, item: &RawItem) -> Option<(String, String)> {
    for (attempt, candidate) in item.candidate_urls.iter().enumerate() {
        if attempt > 0 {
            sleep(ATTEMPT_DELAY).await;
        }

        debug!("Checking candidate for {}: {}", item.id, candidate);
        let check = validator.check(candidate).await;
        if check.valid {
            return Some((candidate.clone(), check.body));
        }
    }

    None
}
