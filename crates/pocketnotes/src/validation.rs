//! Input validation and derived fields.
//!
//! Everything here is pure: no I/O, no state.

use crate::error::ValidationError;
use crate::model::Group;

/// Length bounds for a trimmed group name, counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameRules {
    /// Minimum number of characters.
    pub min: usize,
    /// Maximum number of characters.
    pub max: usize,
}

impl Default for NameRules {
    fn default() -> Self {
        Self { min: 2, max: 50 }
    }
}

impl NameRules {
    /// Validate a prospective group name against these rules and the
    /// existing collection.
    ///
    /// Checks run in order: required, too short, duplicate, too long. The
    /// first failing check wins.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] for the first rule the name breaks.
    pub fn validate(&self, name: &str, existing: &[Group]) -> Result<(), ValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::NameRequired);
        }

        let len = trimmed.chars().count();
        if len < self.min {
            return Err(ValidationError::NameTooShort { min: self.min });
        }

        if existing.iter().any(|g| g.has_name(trimmed)) {
            return Err(ValidationError::DuplicateName);
        }

        if len > self.max {
            return Err(ValidationError::NameTooLong { max: self.max });
        }

        Ok(())
    }

    /// Cut `input` down to at most `max` characters, the way a length-capped
    /// text field would.
    #[must_use]
    pub fn truncate(&self, input: &str) -> String {
        input.chars().take(self.max).collect()
    }
}

/// Validate a group name with the default [`NameRules`].
///
/// # Errors
///
/// Returns the [`ValidationError`] for the first rule the name breaks.
pub fn validate_group_name(name: &str, existing: &[Group]) -> Result<(), ValidationError> {
    NameRules::default().validate(name, existing)
}

/// Validate note text: anything but whitespace is accepted.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyNote`] if the trimmed text is empty.
pub fn validate_note_text(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        Err(ValidationError::EmptyNote)
    } else {
        Ok(())
    }
}

/// Derive the two-character label shown in a group's avatar.
///
/// A single word contributes its first two characters; otherwise the first
/// character of each of the first two words is used. Words are separated by
/// single spaces. An empty name yields an empty string.
#[must_use]
pub fn compute_initials(name: &str) -> String {
    let words: Vec<&str> = name.trim().split(' ').filter(|w| !w.is_empty()).collect();

    let initials: String = match words.as_slice() {
        [] => String::new(),
        [word] => word.chars().take(2).collect(),
        [first, second, ..] => first.chars().take(1).chain(second.chars().take(1)).collect(),
    };

    initials.to_uppercase()
}
