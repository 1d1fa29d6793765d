//! Provides the client for the Algolia Hacker News search API.

pub mod models;

use crate::error::ApiError;
use log::*;
use models::{Hit, Item, SearchResponse};
use reqwest::Client;
use url::Url;

/// The user agent the pipeline identifies as to the API.
const USER_AGENT: &str = concat!("hngames/", env!("CARGO_PKG_VERSION"));
/// The root of the Algolia Hacker News API.
const API_ROOT: &str = "https://hn.algolia.com/api/v1/";
/// The fixed free-text query submissions are matched against.
const SEARCH_QUERY: &str = "game";
/// The tag filter limiting results to Show HN submissions.
const SEARCH_TAGS: &str = "show_hn";
/// The API's maximum page size. One window is expected to fit in one page.
const PAGE_SIZE: u32 = 1000;

/// A client for the Algolia Hacker News API.
#[derive(Debug)]
pub struct HnClient {
    client: Client,
}

impl HnClient {
    /// Returns a new API client.
    pub fn new() -> anyhow::Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    /// Searches Show HN game submissions created inside a given epoch second
    /// window (exclusive on both ends), newest first.
    pub async fn search_window(&self, from: i64, to: i64) -> anyhow::Result<Vec<Hit>> {
        let url = Url::parse(API_ROOT)?.join("search_by_date")?;
        let page_size = PAGE_SIZE.to_string();
        let filters = format!("created_at_i>{},created_at_i<{}", from, to);
        debug!("HN API GET {} ({})", url, filters);

        let response = self
            .client
            .get(url.clone())
            .query(&[
                ("query", SEARCH_QUERY),
                ("tags", SEARCH_TAGS),
                ("page", "0"),
                ("hitsPerPage", page_size.as_str()),
                ("numericFilters", filters.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        debug!("HN API GET {} status: {}", url, status);
        if !status.is_success() {
            return Err(ApiError::ErrorStatus(status).into());
        }

        let search: SearchResponse = response.json().await?;
        Ok(search.hits)
    }

    /// Fetches a single item by its id.
    pub async fn item(&self, id: &str) -> anyhow::Result<Item> {
        let url = Url::parse(API_ROOT)?.join("items/")?.join(id)?;
        debug!("HN API GET {}", url);

        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        debug!("HN API GET {} status: {}", url, status);
        if !status.is_success() {
            return Err(ApiError::ErrorStatus(status).into());
        }

        Ok(response.json().await?)
    }
}
