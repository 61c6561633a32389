//! Plain-text rendering of application state.
//!
//! Every function here is a pure function of its arguments and returns text
//! without terminal escape codes.

use std::fmt::Write as _;

use crate::model::{Group, GroupId, Note};
use crate::storage::KeyValueStore;
use crate::store::NotesStore;

/// Application title shown above the group list.
pub const APP_TITLE: &str = "Pocket Notes";

/// Separator between a note's date and time.
const META_SEPARATOR: &str = " \u{2022} ";

/// Render a group's avatar label, e.g. `[WN]`.
#[must_use]
pub fn render_avatar(group: &Group) -> String {
    format!("[{}]", group.initials)
}

/// Render the group list, marking the selected group with `>`.
#[must_use]
pub fn render_sidebar(groups: &[Group], selected: Option<GroupId>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{APP_TITLE}");
    for group in groups {
        let marker = if Some(group.id) == selected { '>' } else { ' ' };
        let _ = writeln!(out, "{marker} {} {}", render_avatar(group), group.name);
    }
    out
}

/// Render one note: its text followed by a `date • time` line.
#[must_use]
pub fn render_note(note: &Note) -> String {
    format!("{}\n{}{META_SEPARATOR}{}\n", note.text, note.date, note.time)
}

/// Render a group's header and every note in insertion order.
#[must_use]
pub fn render_thread(group: &Group) -> String {
    let mut out = String::new();
    let header = format!("{} {}", render_avatar(group), group.name);
    let _ = writeln!(out, "{header}");
    let _ = writeln!(out, "{}", "-".repeat(header.chars().count()));
    for note in &group.notes {
        out.push_str(&render_note(note));
        out.push('\n');
    }
    out
}

/// Placeholder shown when no group is selected.
#[must_use]
pub fn render_empty_state() -> String {
    format!(
        "{APP_TITLE}\n\
         Send and receive messages without keeping your phone online.\n\
         Use Pocket Notes on up to 4 linked devices and 1 mobile phone\n"
    )
}

/// Render the whole screen: sidebar, then the selected thread or the
/// empty state.
#[must_use]
pub fn render_store<S: KeyValueStore>(store: &NotesStore<S>) -> String {
    let mut out = render_sidebar(store.groups(), store.selected_id());
    out.push('\n');
    match store.selected() {
        Some(group) => out.push_str(&render_thread(group)),
        None => out.push_str(&render_empty_state()),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Color, NoteId};
    use crate::persistence::GroupRepository;
    use crate::storage::MemoryStore;

    fn note(id: i64, text: &str) -> Note {
        Note {
            id: NoteId(id),
            text: text.to_string(),
            date: "9 Mar 2026".to_string(),
            time: "07:15 PM".to_string(),
        }
    }

    #[test]
    fn test_sidebar_marks_selection() {
        let groups = vec![
            Group::new(GroupId(1), "Work Notes", Color::Blue),
            Group::new(GroupId(2), "robotics", Color::Pink),
        ];
        let out = render_sidebar(&groups, Some(GroupId(2)));

        assert_eq!(
            out,
            "Pocket Notes\n  [WN] Work Notes\n> [RO] robotics\n"
        );
    }

    #[test]
    fn test_render_note() {
        assert_eq!(
            render_note(&note(1, "Buy milk")),
            "Buy milk\n9 Mar 2026 \u{2022} 07:15 PM\n"
        );
    }

    #[test]
    fn test_thread_lists_notes_in_order() {
        let mut group = Group::new(GroupId(1), "Work Notes", Color::Blue);
        group.notes.push(note(2, "first"));
        group.notes.push(note(3, "second"));

        let out = render_thread(&group);
        assert!(out.starts_with("[WN] Work Notes\n---------------\n"));
        let first = out.find("first").unwrap();
        let second = out.find("second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_render_store_empty_state() {
        let store = NotesStore::open(GroupRepository::new(MemoryStore::new())).unwrap();
        let out = render_store(&store);
        assert!(out.contains("Send and receive messages"));
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn test_render_store_with_selection() {
        let mut store = NotesStore::open(GroupRepository::new(MemoryStore::new())).unwrap();
        let id = store.create_group("Crypto Club", Color::Cyan).unwrap();
        store.append_note(id, "hodl").unwrap();
        store.select_group(Some(id)).unwrap();

        let out = render_store(&store);
        assert!(out.contains("> [CC] Crypto Club"));
        assert!(out.contains("hodl"));
        assert!(!out.contains("Send and receive"));
    }
}
