//! Link service: creation, resolution and access tracking
//!
//! The service owns the record store and its persistence layer. Every
//! operation runs "read state, mutate, persist" under one coarse lock, so two
//! concurrent creates cannot race on id uniqueness and two concurrent resolves
//! cannot lose an increment. Disk writes happen inline while the lock is held.
//!
//! A failed save does not roll back the in-memory change: the caller of
//! [`LinkService::create`] gets a [`LinkError::Persistence`] while the link is
//! already live in memory and will be written by the next successful save.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::{debug, error, info};
use url::Url;

use crate::error::LinkError;
use crate::id;
use crate::model::Record;
use crate::persistence::Persistence;
use crate::store::RecordStore;
use crate::username::validate_username;

/// Maximum page size accepted by [`LinkService::list`]
pub const MAX_PAGE_SIZE: usize = 100;

/// Page size used when none is given
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A freshly created link together with its public short URL
#[derive(Debug, Clone)]
pub struct CreatedLink {
    pub url: String,
    pub record: Record,
}

struct Inner {
    store: RecordStore,
    persistence: Persistence,
}

pub struct LinkService {
    inner: Mutex<Inner>,
    base_url: String,
}

impl LinkService {
    /// Loads the store from `persistence` and takes exclusive ownership of it.
    pub fn open(persistence: Persistence, base_url: impl Into<String>) -> Self {
        let store = persistence.load();
        Self {
            inner: Mutex::new(Inner { store, persistence }),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn short_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }

    /// Creates a link to `destination`, optionally tagged with an owner.
    pub fn create(&self, destination: &str, owner: Option<&str>) -> Result<CreatedLink, LinkError> {
        let destination = validate_destination(destination)?;
        let owner = match owner {
            Some(name) => {
                validate_username(name).map_err(|e| LinkError::InvalidOwner(e.to_string()))?;
                Some(name.to_string())
            }
            None => None,
        };

        let mut inner = self.lock();
        let id = id::generate(|candidate| inner.store.contains(candidate))
            .map_err(|e| LinkError::GenerationExhausted { attempts: e.attempts })?;

        let record = Record::new(id.clone(), destination, owner);
        inner.store.put(id.clone(), record.clone());

        if let Err(e) = inner.persistence.save(&inner.store) {
            error!(%id, error = %e, "link created in memory but not persisted");
            return Err(e.into());
        }

        info!(%id, destination = %record.destination_url, "created short link");
        Ok(CreatedLink {
            url: self.short_url(&id),
            record,
        })
    }

    /// Looks up `id` and records one access.
    ///
    /// Returns `None` for unknown ids without touching the store. A failed
    /// save after the access is logged and the record is still returned, so a
    /// disk problem never blocks a redirect.
    pub fn resolve(&self, id: &str) -> Option<Record> {
        let mut inner = self.lock();
        let record = match inner.store.get_mut(id) {
            Some(record) => {
                record.touch(Utc::now());
                record.clone()
            }
            None => {
                debug!(%id, "short link not found");
                return None;
            }
        };

        if let Err(e) = inner.persistence.save(&inner.store) {
            error!(%id, error = %e, "failed to persist access");
        }
        Some(record)
    }

    /// Returns the record for `id` without counting an access.
    pub fn stats(&self, id: &str) -> Option<Record> {
        self.lock().store.get(id).cloned()
    }

    /// Lists links ordered by creation time, optionally for one owner.
    ///
    /// `page` starts at 1; `limit` is clamped to [`MAX_PAGE_SIZE`].
    pub fn list(&self, owner: Option<&str>, page: usize, limit: usize) -> Vec<Record> {
        let page = page.max(1);
        let limit = limit.min(MAX_PAGE_SIZE);
        let offset = (page - 1).saturating_mul(limit);

        let inner = self.lock();
        let mut records: Vec<&Record> = inner
            .store
            .snapshot()
            .map(|(_, record)| record)
            .filter(|record| owner.map_or(true, |o| record.owner.as_deref() == Some(o)))
            .collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

        records.into_iter().skip(offset).take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Accepts absolute `http`/`https` URLs with a host and returns the trimmed input.
///
/// Control characters are rejected outright: `Url::parse` silently strips
/// tabs and newlines, but the stored string must stay usable as a
/// `Location` header.
pub fn validate_destination(raw: &str) -> Result<String, LinkError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(LinkError::InvalidDestination("URL cannot be empty".to_string()));
    }
    if raw.chars().any(char::is_control) {
        return Err(LinkError::InvalidDestination(
            "URL contains control characters".to_string(),
        ));
    }

    let parsed = Url::parse(raw).map_err(|e| LinkError::InvalidDestination(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(LinkError::InvalidDestination(format!(
            "unsupported scheme: {}",
            parsed.scheme()
        )));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(LinkError::InvalidDestination("URL has no host".to_string()));
    }

    Ok(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_validation() {
        assert!(validate_destination("https://example.com/page").is_ok());
        assert_eq!(
            validate_destination("  http://example.com  ").unwrap(),
            "http://example.com"
        );

        for bad in [
            "",
            "   ",
            "example.com/page",
            "/relative",
            "ftp://example.com",
            "javascript:alert(1)",
            "https://example.com/a\nb",
            "https://example.com/a\tb",
            "https://exa\rmple.com",
            "https://example.com/\u{7f}",
        ] {
            let err = validate_destination(bad).unwrap_err();
            assert!(err.is_invalid_input(), "{bad:?} should be rejected");
        }
    }
}
