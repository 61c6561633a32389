//! Core data types for pocketnotes.
//!
//! A [`Group`] is a named, color-tagged container holding an append-only
//! sequence of [`Note`]s. The serde representation of these types is the
//! persisted storage format, so field names must not change.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::validation::compute_initials;

/// Short month names as shown in a note's date. September is `Sept`.
pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sept", "Oct", "Nov", "Dec",
];

/// Display format for a note's time, e.g. `03:07 PM`.
pub const TIME_FORMAT: &str = "%I:%M %p";

/// Identifier of a [`Group`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub i64);

/// Identifier of a [`Note`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub i64);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<GroupId> for i64 {
    fn from(id: GroupId) -> Self {
        id.0
    }
}

/// Hands out millisecond-timestamp ids that never repeat within a process.
///
/// Each id is the current time in milliseconds, bumped past the previously
/// issued id when two requests land in the same millisecond.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    /// Create a generator that will only issue ids greater than `floor`.
    #[must_use]
    pub fn starting_after(floor: i64) -> Self {
        Self { last: floor }
    }

    /// Create a generator seeded past every id already present in `groups`.
    #[must_use]
    pub fn seeded_from(groups: &[Group]) -> Self {
        let floor = groups
            .iter()
            .flat_map(|g| std::iter::once(g.id.0).chain(g.notes.iter().map(|n| n.id.0)))
            .max()
            .unwrap_or(0);
        Self::starting_after(floor)
    }

    /// Issue the next id for the given instant.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IdsExhausted`] once `i64::MAX` has been handed out.
    pub fn issue_at<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Result<i64> {
        let floor = self
            .last
            .checked_add(1)
            .ok_or(Error::IdsExhausted { last: self.last })?;
        let id = now.timestamp_millis().max(floor);
        self.last = id;
        Ok(id)
    }

    /// Issue the next id using the system clock.
    ///
    /// # Errors
    ///
    /// See [`IdGenerator::issue_at`].
    pub fn issue(&mut self) -> Result<i64> {
        self.issue_at(&Utc::now())
    }
}

/// The fixed palette a group's color is chosen from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Color {
    /// `#B38BFA`
    #[default]
    Purple,
    /// `#FF79F2`
    Pink,
    /// `#43E6FC`
    Cyan,
    /// `#F19576`
    Peach,
    /// `#0047FF`
    Blue,
    /// `#6691FF`
    Periwinkle,
}

impl Color {
    /// All palette entries, in picker order.
    pub const PALETTE: [Color; 6] = [
        Color::Purple,
        Color::Pink,
        Color::Cyan,
        Color::Peach,
        Color::Blue,
        Color::Periwinkle,
    ];

    /// The hex string this color is stored as.
    #[must_use]
    pub fn hex(self) -> &'static str {
        match self {
            Self::Purple => "#B38BFA",
            Self::Pink => "#FF79F2",
            Self::Cyan => "#43E6FC",
            Self::Peach => "#F19576",
            Self::Blue => "#0047FF",
            Self::Periwinkle => "#6691FF",
        }
    }

    /// Lowercase palette name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Purple => "purple",
            Self::Pink => "pink",
            Self::Cyan => "cyan",
            Self::Peach => "peach",
            Self::Blue => "blue",
            Self::Periwinkle => "periwinkle",
        }
    }

    /// Look up a palette entry by hex string (case-insensitive).
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        Self::PALETTE
            .into_iter()
            .find(|c| c.hex().eq_ignore_ascii_case(hex.trim()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}

/// Error returned when a string names no palette color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown color '{0}'")]
pub struct UnknownColor(pub String);

impl FromStr for Color {
    type Err = UnknownColor;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_hex(s)
            .or_else(|| {
                Self::PALETTE
                    .into_iter()
                    .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            })
            .ok_or_else(|| UnknownColor(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = UnknownColor;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::from_hex(&value).ok_or(UnknownColor(value))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.hex().to_string()
    }
}

/// A timestamped text entry belonging to one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier.
    pub id: NoteId,
    /// The note body, trimmed.
    pub text: String,
    /// Creation date as displayed, e.g. `17 Oct 2026` or `3 Sept 2026`.
    pub date: String,
    /// Creation time as displayed, e.g. `03:07 PM`.
    pub time: String,
}

impl Note {
    /// Build a note stamped with `at`. The date and time strings are fixed
    /// here and never recomputed.
    #[must_use]
    pub fn new<Tz: TimeZone>(id: NoteId, text: &str, at: &DateTime<Tz>) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        Self {
            id,
            text: text.trim().to_string(),
            date: format_date(at),
            time: at.format(TIME_FORMAT).to_string(),
        }
    }
}

/// Format `at` as a note date: day without padding, short month, full year.
#[must_use]
pub fn format_date<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    format!("{} {} {}", at.day(), MONTHS[at.month0() as usize], at.year())
}

/// A named, colored container for an ordered sequence of notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier.
    pub id: GroupId,
    /// Display name, trimmed. Immutable after creation.
    pub name: String,
    /// Palette color.
    pub color: Color,
    /// Two-character label derived from the name at creation.
    pub initials: String,
    /// Notes in insertion (chronological) order.
    pub notes: Vec<Note>,
}

impl Group {
    /// Create an empty group. The name must already be validated.
    #[must_use]
    pub fn new(id: GroupId, name: &str, color: Color) -> Self {
        let name = name.trim();
        Self {
            id,
            name: name.to_string(),
            color,
            initials: compute_initials(name),
            notes: Vec::new(),
        }
    }

    /// Whether `name` matches this group's name, ignoring case and
    /// surrounding whitespace.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }

    /// The most recently added note.
    #[must_use]
    pub fn last_note(&self) -> Option<&Note> {
        self.notes.last()
    }
}
