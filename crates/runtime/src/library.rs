//! Recents and favorites.
//!
//! Two ordered document lists persisted as JSON arrays under fixed keys.
//! The lists are a convenience index over the filesystem, so every
//! operation here is fail-soft: unreadable or corrupt data reads as an
//! empty list and failed writes are logged and dropped.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::{
    config::{FAVORITES_KEY, MAX_RECENTS, RECENTS_KEY},
    store::{KeyValueStore, StoreError},
};

/// A document remembered by the index. Field names on disk match what the
/// mobile app has always written (`uri`, `name`, `lastOpened`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IndexedDocument {
    #[serde(rename = "uri")]
    pub location: String,

    #[serde(rename = "name", default)]
    pub display_name: String,

    #[serde(
        rename = "lastOpened",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_opened: Option<DateTime<Utc>>,
}

impl IndexedDocument {
    /// Document with an explicit or derived display name and no open time.
    pub fn new(location: impl Into<String>, display_name: Option<String>) -> Self {
        let location = location.into();
        let display_name = display_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| display_name_from_location(&location));

        Self {
            location,
            display_name,
            last_opened: None,
        }
    }

    /// Same as [`IndexedDocument::new`], stamped as opened right now.
    pub fn opened_now(location: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            last_opened: Some(Utc::now()),
            ..Self::new(location, display_name)
        }
    }
}

/// Last `/`-separated segment of a location, or the location itself when
/// it has none.
pub fn display_name_from_location(location: &str) -> String {
    location
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(location)
        .to_owned()
}

/// What the viewer surface needs to open a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewerSource {
    pub location: String,
    pub cache: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum List {
    Recents,
    Favorites,
}

impl List {
    fn key(self) -> &'static str {
        match self {
            List::Recents => RECENTS_KEY,
            List::Favorites => FAVORITES_KEY,
        }
    }
}

/// Owner and sole writer of the recents and favorites lists.
pub struct DocumentIndex<S: KeyValueStore> {
    store: S,
    // Serializes each load-modify-persist cycle.
    guard: Mutex<()>,
}

impl<S: KeyValueStore> DocumentIndex<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            guard: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Move `doc` to the front of recents, dropping any older entry for the
    /// same location and anything past the cap.
    pub fn record_opened(&self, doc: IndexedDocument) {
        let _lock = self.lock();

        let mut recents = self.load(List::Recents);
        recents.retain(|d| d.location != doc.location);
        recents.insert(0, doc);
        recents.truncate(MAX_RECENTS);

        self.persist(List::Recents, &recents);
    }

    /// Flip favorite membership for `doc.location` and return the membership
    /// that is now persisted.
    pub fn toggle_favorite(&self, doc: IndexedDocument) -> bool {
        let _lock = self.lock();

        let mut favorites = self.load(List::Favorites);
        let was_favorite = favorites.iter().any(|d| d.location == doc.location);

        if was_favorite {
            favorites.retain(|d| d.location != doc.location);
        } else {
            favorites.insert(0, doc);
        }

        if self.persist(List::Favorites, &favorites) {
            !was_favorite
        } else {
            was_favorite
        }
    }

    pub fn is_favorite(&self, location: &str) -> bool {
        self.load(List::Favorites)
            .iter()
            .any(|d| d.location == location)
    }

    /// Most recently opened first.
    pub fn list_recents(&self) -> Vec<IndexedDocument> {
        self.load(List::Recents)
    }

    /// Most recently favorited first.
    pub fn list_favorites(&self) -> Vec<IndexedDocument> {
        self.load(List::Favorites)
    }

    /// Drop one location from recents. Returns whether it was present.
    pub fn remove_recent(&self, location: &str) -> bool {
        let _lock = self.lock();

        let mut recents = self.load(List::Recents);
        let before = recents.len();
        recents.retain(|d| d.location != location);

        if recents.len() == before {
            return false;
        }
        self.persist(List::Recents, &recents)
    }

    pub fn clear_recents(&self) {
        let _lock = self.lock();
        self.persist(List::Recents, &[]);
    }

    /// Record `doc` as opened and hand back the viewer source for it.
    pub fn open(&self, doc: IndexedDocument) -> ViewerSource {
        let source = ViewerSource {
            location: doc.location.clone(),
            cache: true,
        };
        self.record_opened(doc);
        source
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        // The guarded data is `()`, a poisoned lock carries nothing stale.
        self.guard.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn load(&self, list: List) -> Vec<IndexedDocument> {
        let key = list.key();

        let raw = match self.store.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("[library] reading {key} failed, treating as empty: {e}");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<IndexedDocument>>(&raw) {
            Ok(mut docs) => {
                for doc in docs.iter_mut().filter(|d| d.display_name.is_empty()) {
                    doc.display_name = display_name_from_location(&doc.location);
                }
                docs
            }
            Err(e) => {
                warn!("[library] {key} is corrupt, treating as empty: {e}");
                Vec::new()
            }
        }
    }

    /// Best-effort write. Returns whether the value reached the store.
    fn persist(&self, list: List, docs: &[IndexedDocument]) -> bool {
        let key = list.key();

        let result = serde_json::to_string(docs)
            .map_err(|source| StoreError::Encode {
                key: key.to_owned(),
                source,
            })
            .and_then(|json| self.store.set_item(key, &json));

        match result {
            Ok(()) => true,
            Err(e) => {
                warn!("[library] persisting {key} failed: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "library_tests.rs"]
mod tests;
