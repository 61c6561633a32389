//! Reading and writing the group collection.
//!
//! The whole collection is serialized as one JSON array and stored under a
//! single key. Loading never fails: unreadable or malformed data is logged and
//! treated as an empty collection, and individual malformed entries are
//! dropped without discarding their well-formed siblings.

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::DEFAULT_STORAGE_KEY;
use crate::error::Result;
use crate::model::Group;
use crate::storage::KeyValueStore;

/// Loads and saves the group collection through a [`KeyValueStore`].
#[derive(Debug)]
pub struct GroupRepository<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> GroupRepository<S> {
    /// Create a repository using the default storage key.
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    /// Create a repository storing the collection under `key`.
    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// The key the collection is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the underlying store.
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Consume the repository, returning the underlying store.
    pub fn into_backend(self) -> S {
        self.backend
    }

    /// Load the stored collection.
    ///
    /// Returns an empty collection when nothing is stored, when the backend
    /// cannot be read, or when the stored value is not a JSON array.
    pub fn load(&self) -> Vec<Group> {
        self.try_load().unwrap_or_else(|e| {
            warn!("Error loading groups: {e}");
            Vec::new()
        })
    }

    /// Load the stored collection, failing only if the backend cannot be read.
    ///
    /// Undecodable data still yields an empty or partial collection. A read
    /// failure is reported instead, so callers never mistake data they could
    /// not see for an empty store and overwrite it.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the read fails.
    pub fn try_load(&self) -> Result<Vec<Group>> {
        match self.backend.get(&self.key)? {
            Some(raw) => Ok(decode_groups(&raw)),
            None => {
                debug!("No stored groups under '{}'", self.key);
                Ok(Vec::new())
            }
        }
    }

    /// Serialize `groups` and write them under the storage key, replacing
    /// whatever was stored before.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails.
    pub fn save(&mut self, groups: &[Group]) -> Result<()> {
        let raw = serde_json::to_string(groups)?;
        self.backend.set(&self.key, &raw)?;
        debug!("Saved {} groups under '{}'", groups.len(), self.key);
        Ok(())
    }
}

/// Decode a serialized collection, keeping only well-formed groups.
#[must_use]
pub fn decode_groups(raw: &str) -> Vec<Group> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("Error loading groups: {e}");
            return Vec::new();
        }
    };

    let Value::Array(entries) = value else {
        warn!("Error loading groups: stored value is not an array");
        return Vec::new();
    };

    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<Group>(entry) {
            Ok(group) if is_well_formed(&group) => Some(group),
            Ok(group) => {
                warn!("Dropping stored group {index} ({}): empty required field", group.id);
                None
            }
            Err(e) => {
                warn!("Dropping stored group {index}: {e}");
                None
            }
        })
        .collect()
}

fn is_well_formed(group: &Group) -> bool {
    group.id.0 != 0 && !group.name.is_empty() && !group.initials.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::init_test_logging;
    use crate::model::{Color, GroupId, Note, NoteId};
    use crate::storage::{MemoryStore, SqliteStore};
    use chrono::{FixedOffset, TimeZone};

    /// Backend whose reads always fail.
    #[derive(Debug, Default)]
    struct LockedStore;

    impl KeyValueStore for LockedStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(crate::Error::internal("database is locked"))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Ok(())
        }

        fn remove(&mut self, _key: &str) -> Result<bool> {
            Ok(false)
        }
    }

    fn sample_groups() -> Vec<Group> {
        let at = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2026, 1, 2, 18, 45, 0)
            .unwrap();

        let mut work = Group::new(GroupId(100), "Work Notes", Color::Cyan);
        work.notes.push(Note::new(NoteId(101), "Buy milk", &at));
        work.notes.push(Note::new(NoteId(102), "Call Sam", &at));
        let empty = Group::new(GroupId(200), "robotics", Color::Peach);
        vec![work, empty]
    }

    #[test]
    fn test_load_absent_key_is_empty() {
        let repo = GroupRepository::new(MemoryStore::new());
        assert!(repo.load().is_empty());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let groups = sample_groups();
        let mut repo = GroupRepository::new(SqliteStore::open_in_memory().unwrap());

        repo.save(&groups).unwrap();
        assert_eq!(repo.load(), groups);
    }

    #[test]
    fn test_save_overwrites_previous_value() {
        let mut groups = sample_groups();
        let mut repo = GroupRepository::new(MemoryStore::new());
        repo.save(&groups).unwrap();

        groups.truncate(1);
        repo.save(&groups).unwrap();
        assert_eq!(repo.load(), groups);
    }

    #[test]
    fn test_custom_key() {
        let mut repo = GroupRepository::with_key(MemoryStore::new(), "other");
        repo.save(&sample_groups()).unwrap();

        assert_eq!(repo.key(), "other");
        assert!(repo.backend().get("other").unwrap().is_some());
        assert!(repo.backend().get(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_load_corrupted_value_is_empty() {
        init_test_logging();
        let repo = GroupRepository::new(MemoryStore::with_entry(
            DEFAULT_STORAGE_KEY,
            "{not json at all",
        ));
        assert!(repo.load().is_empty());
    }

    #[test]
    fn test_try_load_reports_read_failure() {
        let repo = GroupRepository::new(LockedStore::default());

        let err = repo.try_load().unwrap_err();
        assert!(err.to_string().contains("database is locked"));
        assert!(repo.load().is_empty());
    }

    #[test]
    fn test_try_load_tolerates_undecodable_data() {
        let repo = GroupRepository::new(MemoryStore::with_entry(DEFAULT_STORAGE_KEY, "[1, 2"));
        assert!(repo.try_load().unwrap().is_empty());
    }

    #[test]
    fn test_load_non_array_is_empty() {
        let repo = GroupRepository::new(MemoryStore::with_entry(
            DEFAULT_STORAGE_KEY,
            r#"{"id": 1, "name": "x"}"#,
        ));
        assert!(repo.load().is_empty());
    }

    #[test]
    fn test_load_drops_entry_missing_notes() {
        let raw = r##"[
            {"id": 1, "name": "Good", "color": "#B38BFA", "initials": "GO", "notes": []},
            {"id": 2, "name": "Bad", "color": "#B38BFA", "initials": "BA"}
        ]"##;
        let repo = GroupRepository::new(MemoryStore::with_entry(DEFAULT_STORAGE_KEY, raw));

        let groups = repo.load();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "Good");
    }

    #[test]
    fn test_decode_drops_malformed_entries() {
        let raw = r##"[
            null,
            42,
            {"id": 0, "name": "Zero", "color": "#B38BFA", "initials": "ZE", "notes": []},
            {"id": 3, "name": "", "color": "#B38BFA", "initials": "EM", "notes": []},
            {"id": 4, "name": "Notes Str", "color": "#B38BFA", "initials": "NS", "notes": "x"},
            {"id": 5, "name": "Odd Color", "color": "#000000", "initials": "OC", "notes": []},
            {"id": 6, "name": "Kept", "color": "#0047FF", "initials": "KE", "notes": [
                {"id": 7, "text": "hello", "date": "1 Jan 2026", "time": "10:00 AM"}
            ]}
        ]"##;

        let groups = decode_groups(raw);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].id, GroupId(6));
        assert_eq!(groups[0].color, Color::Blue);
        assert_eq!(groups[0].notes[0].text, "hello");
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let raw = r##"[{"id": 1, "name": "Extra", "color": "#43E6FC", "initials": "EX",
                       "notes": [], "pinned": true}]"##;
        assert_eq!(decode_groups(raw).len(), 1);
    }
}
