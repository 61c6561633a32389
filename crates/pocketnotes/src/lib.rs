//! `pocketnotes` - Color-tagged note groups with local persistence
//!
//! This library owns the state of a note-taking interface: named groups, the
//! append-only notes inside them, the current selection, and the key-value
//! storage the whole collection is written to after every change.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod model;
pub mod persistence;
pub mod storage;
pub mod store;
pub mod validation;
pub mod view;

pub use config::Config;
pub use error::{Error, Result, ValidationError};
pub use form::{GroupForm, NoteComposer};
pub use logging::init_logging;
pub use model::{Color, Group, GroupId, Note, NoteId};
pub use persistence::GroupRepository;
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
pub use store::{NotesStore, StoreEvent};
pub use validation::{compute_initials, validate_group_name, validate_note_text, NameRules};
