//! Transient input state for the group-creation and note-entry forms.
//!
//! These types sit between raw input and the [`NotesStore`]: they hold what
//! the user has typed so far plus the field-scoped error to display, and they
//! reset themselves after a successful submit.

use crate::error::{Error, Result, ValidationError};
use crate::model::{Color, GroupId, NoteId};
use crate::storage::KeyValueStore;
use crate::store::NotesStore;
use crate::validation::NameRules;

/// Pending values of the "create group" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupForm {
    name: String,
    color: Color,
    error: Option<ValidationError>,
    rules: NameRules,
}

impl GroupForm {
    /// An empty form whose name field is capped at `rules.max` characters.
    #[must_use]
    pub fn new(rules: NameRules) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    /// The name typed so far.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The chosen color.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// The error to show under the name field, if any.
    #[must_use]
    pub fn error(&self) -> Option<ValidationError> {
        self.error
    }

    /// Replace the name, truncated to the maximum length. Clears any error.
    pub fn set_name(&mut self, input: &str) {
        self.name = self.rules.truncate(input);
        self.error = None;
    }

    /// Pick a palette color.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Clear the name, restore the default color and drop any error.
    pub fn reset(&mut self) {
        self.name.clear();
        self.color = Color::default();
        self.error = None;
    }

    /// Try to create a group from the form's current values.
    ///
    /// On success the form is reset and the new id returned. A rejected name
    /// is kept in the form with its error and `Ok(None)` is returned.
    ///
    /// # Errors
    ///
    /// Returns any non-validation error raised by the store.
    pub fn submit<S: KeyValueStore>(
        &mut self,
        store: &mut NotesStore<S>,
    ) -> Result<Option<GroupId>> {
        match store.create_group(&self.name, self.color) {
            Ok(id) => {
                self.reset();
                Ok(Some(id))
            }
            Err(Error::Validation(e)) => {
                self.error = Some(e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Pending text of the note input box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteComposer {
    text: String,
    error: Option<ValidationError>,
}

impl NoteComposer {
    /// An empty composer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The text typed so far.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The error to show for the note field, if any.
    #[must_use]
    pub fn error(&self) -> Option<ValidationError> {
        self.error
    }

    /// Replace the text. Clears any error.
    pub fn set_text(&mut self, input: &str) {
        self.text = input.to_string();
        self.error = None;
    }

    /// Whether the send action should be enabled.
    #[must_use]
    pub fn can_send(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Append the current text to the selected group.
    ///
    /// Returns `Ok(None)` without touching anything when no group is
    /// selected. Blank text sets the field error and also returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns any non-validation error raised by the store.
    pub fn submit<S: KeyValueStore>(
        &mut self,
        store: &mut NotesStore<S>,
    ) -> Result<Option<NoteId>> {
        let Some(group) = store.selected_id() else {
            return Ok(None);
        };

        match store.append_note(group, &self.text) {
            Ok(id) => {
                self.text.clear();
                self.error = None;
                Ok(Some(id))
            }
            Err(Error::Validation(e)) => {
                self.error = Some(e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
