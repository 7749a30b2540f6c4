//! Data models for the short-link service
//!
//! This module defines the stored record type together with the request and
//! response bodies exchanged with the HTTP layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single short link as held in the store and written to disk
///
/// Records are created once by the link service and afterwards only touched
/// by the access-tracking path (`access_count` and `last_accessed_at`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Generated identifier (12 lowercase hex characters)
    pub id: String,

    /// Absolute URL visitors are redirected to
    pub destination_url: String,

    /// Optional owner name, used to group links per tenant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Creation time, immutable after insert
    pub created_at: DateTime<Utc>,

    /// Number of times this link has been resolved
    #[serde(default)]
    pub access_count: u64,

    /// Time of the most recent resolve, absent until the first one
    #[serde(default)]
    pub last_accessed_at: Option<DateTime<Utc>>,
}

impl Record {
    pub fn new(id: String, destination_url: String, owner: Option<String>) -> Self {
        Self {
            id,
            destination_url,
            owner,
            created_at: Utc::now(),
            access_count: 0,
            last_accessed_at: None,
        }
    }

    /// Registers one access at `now`. `last_accessed_at` never moves backwards,
    /// even if the wall clock does.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.access_count = self.access_count.saturating_add(1);
        self.last_accessed_at = Some(self.last_accessed_at.map_or(now, |prev| prev.max(now)));
    }
}

/// Request payload for creating a new short link
///
/// # Example
/// ```json
/// {
///   "url": "https://example.com/very/long/url",
///   "owner": "octocat"
/// }
/// ```
#[derive(Deserialize, Debug, Clone)]
pub struct CreateRequest {
    /// Destination URL to shorten
    pub url: String,

    /// Optional owner name; must pass username validation when present
    pub owner: Option<String>,
}

/// Response returned after successfully creating a short link
#[derive(Serialize, Debug)]
pub struct CreateResponse {
    pub id: String,

    /// Public short URL (`{base_url}/{id}`)
    pub url: String,

    pub destination_url: String,

    pub created_at: DateTime<Utc>,
}

/// Query parameters for listing links with pagination
///
/// # Example
/// Query string: `?owner=octocat&page=2&limit=20`
#[derive(Deserialize, Debug, Default)]
pub struct ListParams {
    /// Only return links belonging to this owner
    pub owner: Option<String>,

    /// Page number, starts from 1
    pub page: Option<usize>,

    /// Items per page, capped at 100
    pub limit: Option<usize>,
}
