//! Response models for the Algolia Hacker News API.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One page of results from the search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    /// The matching submissions.
    pub hits: Vec<Hit>,
}

/// A single submission returned by the search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Hit {
    /// The hit's object identifier.
    #[serde(rename = "objectID")]
    pub object_id: String,
    /// The id of the story the hit belongs to, when the API provides one.
    #[serde(default)]
    pub story_id: Option<u64>,
    /// The submission title.
    #[serde(default)]
    pub title: Option<String>,
    /// The self-post body, HTML-escaped.
    #[serde(default)]
    pub story_text: Option<String>,
    /// Alternate body field some item kinds carry instead.
    #[serde(default)]
    pub text: Option<String>,
    /// The submission's attached URL.
    #[serde(default)]
    pub url: Option<String>,
    /// The submitter's username. Absent for deleted accounts.
    #[serde(default)]
    pub author: Option<String>,
    /// The submission's points.
    #[serde(default)]
    pub points: Option<u32>,
    /// When the submission was created.
    pub created_at: DateTime<Utc>,
}

impl Hit {
    /// Returns the catalog id for this hit: the story id when the API
    /// provides one, the object id otherwise.
    pub fn story_key(&self) -> String {
        match self.story_id {
            Some(id) => id.to_string(),
            None => self.object_id.clone(),
        }
    }

    /// Returns the hit's body text, applying the API's field fallback.
    pub fn body(&self) -> &str {
        self.story_text
            .as_deref()
            .or_else(|| self.text.as_deref())
            .unwrap_or("")
    }

    /// Returns the submitter's username, or an empty string for deleted
    /// accounts.
    pub fn author(&self) -> &str {
        self.author.as_deref().unwrap_or("")
    }
}

/// A single item returned by the items endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Item {
    /// The item's id.
    pub id: u64,
    /// The item title.
    #[serde(default)]
    pub title: Option<String>,
    /// The self-post body, HTML-escaped.
    #[serde(default)]
    pub text: Option<String>,
    /// The item's attached URL.
    #[serde(default)]
    pub url: Option<String>,
    /// The submitter's username.
    #[serde(default)]
    pub author: Option<String>,
    /// The item's points.
    #[serde(default)]
    pub points: Option<u32>,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Converts the item into the hit shape the scrape pipeline operates on.
    pub fn into_hit(self) -> Hit {
        Hit {
            object_id: self.id.to_string(),
            story_id: Some(self.id),
            title: self.title,
            story_text: None,
            text: self.text,
            url: self.url,
            author: self.author,
            points: self.points,
            created_at: self.created_at,
        }
    }
}
