//! The notes store: owner of all application state.
//!
//! [`NotesStore`] holds the group collection and the current selection,
//! applies user actions to them and writes the collection back through its
//! [`GroupRepository`] after every change. Views learn about changes through
//! [`NotesStore::version`] or by subscribing to [`StoreEvent`]s.

use std::fmt;

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Error, Result, ValidationError};
use crate::model::{Color, Group, GroupId, IdGenerator, Note, NoteId};
use crate::persistence::GroupRepository;
use crate::storage::KeyValueStore;
use crate::validation::{validate_note_text, NameRules};

/// A change applied to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// A group was appended to the collection.
    GroupCreated(GroupId),
    /// A note was appended to a group.
    NoteAppended {
        /// The group the note belongs to.
        group: GroupId,
        /// The new note.
        note: NoteId,
    },
    /// The selection moved to another group, or was cleared.
    SelectionChanged(Option<GroupId>),
}

type Observer = Box<dyn FnMut(&StoreEvent)>;

/// In-memory application state backed by a [`GroupRepository`].
pub struct NotesStore<S: KeyValueStore> {
    repository: GroupRepository<S>,
    groups: Vec<Group>,
    selected: Option<GroupId>,
    rules: NameRules,
    persist_empty: bool,
    ids: IdGenerator,
    clock: fn() -> DateTime<Local>,
    version: u64,
    dirty: bool,
    observers: Vec<Observer>,
}

impl<S: KeyValueStore> fmt::Debug for NotesStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotesStore")
            .field("key", &self.repository.key())
            .field("groups", &self.groups.len())
            .field("selected", &self.selected)
            .field("version", &self.version)
            .field("dirty", &self.dirty)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> NotesStore<S> {
    /// Initialize the store from whatever `repository` currently holds.
    ///
    /// Undecodable stored data opens as an empty collection.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the stored value cannot be read at all.
    /// Opening empty in that case would let the next write replace data that
    /// was never seen.
    pub fn open(repository: GroupRepository<S>) -> Result<Self> {
        let groups = repository.try_load()?;
        info!("Loaded {} groups", groups.len());
        let ids = IdGenerator::seeded_from(&groups);

        Ok(Self {
            repository,
            groups,
            selected: None,
            rules: NameRules::default(),
            persist_empty: false,
            ids,
            clock: Local::now,
            version: 0,
            dirty: false,
            observers: Vec::new(),
        })
    }

    /// Open a store over `backend` using the key, naming rules and
    /// empty-collection policy from `config`.
    ///
    /// # Errors
    ///
    /// See [`NotesStore::open`].
    pub fn with_config(backend: S, config: &Config) -> Result<Self> {
        let store = Self::open(GroupRepository::with_key(backend, config.storage.key.clone()))?
            .with_rules(config.name_rules())
            .persist_empty(config.storage.persist_empty);
        Ok(store)
    }

    /// Replace the group naming rules.
    #[must_use]
    pub fn with_rules(mut self, rules: NameRules) -> Self {
        self.rules = rules;
        self
    }

    /// Choose whether an empty collection is written to storage.
    #[must_use]
    pub fn persist_empty(mut self, persist_empty: bool) -> Self {
        self.persist_empty = persist_empty;
        self
    }

    /// Replace the clock used to stamp new notes.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Local>) -> Self {
        self.clock = clock;
        self
    }

    /// All groups, in creation order.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Look up a group by id.
    #[must_use]
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Look up a group by name, ignoring case.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.has_name(name))
    }

    /// The currently selected group, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Group> {
        self.selected.and_then(|id| self.group(id))
    }

    /// Id of the currently selected group, if any.
    #[must_use]
    pub fn selected_id(&self) -> Option<GroupId> {
        self.selected
    }

    /// The naming rules new groups are checked against.
    #[must_use]
    pub fn rules(&self) -> NameRules {
        self.rules
    }

    /// Counter bumped on every state change.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether the last write to storage failed and is still pending.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The repository the store persists through.
    pub fn repository(&self) -> &GroupRepository<S> {
        &self.repository
    }

    /// Register a callback invoked after every state change.
    pub fn subscribe(&mut self, observer: impl FnMut(&StoreEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Check a prospective group name without creating anything.
    ///
    /// # Errors
    ///
    /// Returns the first rule the name breaks.
    pub fn validate_name(&self, name: &str) -> std::result::Result<(), ValidationError> {
        self.rules.validate(name, &self.groups)
    }

    /// Create a new, empty group and append it to the collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the name is rejected; the collection is
    /// left untouched in that case.
    pub fn create_group(&mut self, name: &str, color: Color) -> Result<GroupId> {
        self.validate_name(name)?;

        let id = GroupId(self.ids.issue_at(&(self.clock)())?);
        let group = Group::new(id, name, color);
        info!("Created group '{}' ({})", group.name, id);
        self.groups.push(group);

        self.changed(StoreEvent::GroupCreated(id));
        self.persist();
        Ok(id)
    }

    /// Change the selection. `None` clears it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GroupNotFound`] if `id` names no group; the selection
    /// is left unchanged in that case.
    pub fn select_group(&mut self, id: Option<GroupId>) -> Result<()> {
        if let Some(id) = id {
            if self.group(id).is_none() {
                return Err(Error::group_not_found(id));
            }
        }

        if self.selected != id {
            debug!("Selection changed to {:?}", id);
            self.selected = id;
            self.changed(StoreEvent::SelectionChanged(id));
        }
        Ok(())
    }

    /// Append a note to a group.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the text is blank and
    /// [`Error::GroupNotFound`] if `group_id` names no group. Nothing is
    /// changed in either case.
    pub fn append_note(&mut self, group_id: GroupId, text: &str) -> Result<NoteId> {
        validate_note_text(text)?;

        let index = self
            .groups
            .iter()
            .position(|g| g.id == group_id)
            .ok_or_else(|| Error::group_not_found(group_id))?;

        let now = (self.clock)();
        let note_id = NoteId(self.ids.issue_at(&now)?);
        let group = &mut self.groups[index];
        group.notes.push(Note::new(note_id, text, &now));
        info!("Appended note {} to group '{}'", note_id, group.name);

        self.changed(StoreEvent::NoteAppended {
            group: group_id,
            note: note_id,
        });
        self.persist();
        Ok(note_id)
    }

    /// Write the collection if an earlier write failed.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the write fails again.
    pub fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.write()
    }

    fn changed(&mut self, event: StoreEvent) {
        self.version += 1;
        for observer in &mut self.observers {
            observer(&event);
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.write() {
            warn!("Failed to save groups, will retry on flush: {e}");
        }
    }

    fn write(&mut self) -> Result<()> {
        if self.groups.is_empty() && !self.persist_empty {
            self.dirty = false;
            return Ok(());
        }

        match self.repository.save(&self.groups) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                self.dirty = true;
                Err(e)
            }
        }
    }
}

impl<S: KeyValueStore> Drop for NotesStore<S> {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            warn!("Unsaved changes lost on shutdown: {e}");
        }
    }
}
