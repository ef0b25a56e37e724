//! Retro Board State
//!
//! Ordered columns of sticky notes with a single drag slot. All mutation
//! happens through `&mut self` transitions, so a note is never observable
//! in two columns at once, or in none mid-move.

use std::sync::Arc;

use dragdrop_state::DragSlot;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::note::{Note, NoteColor};
use crate::ids::IdAllocator;

/// A named, ordered bucket of notes within a board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Unique identifier
    pub id: u64,
    /// Editable display name
    pub name: String,
    /// Notes in display order
    pub notes: Vec<Note>,
}

impl Column {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            notes: Vec::new(),
        }
    }

    pub fn contains_note(&self, note_id: u64) -> bool {
        self.notes.iter().any(|n| n.id == note_id)
    }
}

impl Entity for Column {
    type Id = u64;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// What is currently riding the board's drag slot
#[derive(Debug, Clone)]
pub enum DragPayload {
    /// An existing note leaving its source column
    Note { note: Note, source_column: u64 },
    /// A color swatch about to become a new note
    Swatch(NoteColor),
}

/// The retrospective board: columns, notes, and the active drag gesture.
///
/// Drag state is one shared slot per board instance. Gesture input is
/// physically serial, so a new `begin_drag` simply replaces any prior
/// uncommitted payload.
#[derive(Debug)]
pub struct Board {
    columns: Vec<Column>,
    drag: DragSlot<DragPayload>,
    ids: Arc<IdAllocator>,
}

impl Board {
    /// Placeholder name for columns added through the sidebar button
    pub const NEW_COLUMN_NAME: &'static str = "New Column";

    /// An empty board
    pub fn new(ids: Arc<IdAllocator>) -> Self {
        Self {
            columns: Vec::new(),
            drag: DragSlot::new(),
            ids,
        }
    }

    /// A fresh board with the three standard retro columns
    pub fn with_default_columns(ids: Arc<IdAllocator>) -> Self {
        let mut board = Self::new(ids);
        board.columns = vec![
            Column::new(1, "What went well"),
            Column::new(2, "What could be improved"),
            Column::new(3, "Action Items"),
        ];
        board
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Append a new column with a freshly allocated id. Always succeeds.
    pub fn add_column(&mut self) -> u64 {
        let id = self.ids.next_id();
        self.columns.push(Column::new(id, Self::NEW_COLUMN_NAME));
        id
    }

    /// Remove a column and every note in it. No-op if the id is unknown.
    pub fn remove_column(&mut self, column_id: u64) {
        self.columns.retain(|c| c.id != column_id);
    }

    /// Replace a column's display name
    pub fn rename_column(&mut self, column_id: u64, name: impl Into<String>) {
        if let Some(column) = self.column_mut(column_id) {
            column.name = name.into();
        }
    }

    /// Record a note and its current column as the active drag payload.
    /// Unknown note ids leave the slot untouched.
    pub fn begin_drag(&mut self, note_id: u64) {
        let found = self.columns.iter().find_map(|c| {
            c.notes
                .iter()
                .find(|n| n.id == note_id)
                .map(|n| (n.clone(), c.id))
        });
        if let Some((note, source_column)) = found {
            self.drag.begin(DragPayload::Note {
                note,
                source_column,
            });
        }
    }

    /// Record a pending create-from-swatch payload
    pub fn begin_color_drag(&mut self, color: NoteColor) {
        self.drag.begin(DragPayload::Swatch(color));
    }

    /// Resolve the active drag against a target column.
    ///
    /// Note payloads move the note into the target unless it already holds a
    /// note with the same id (duplicate drop events are idempotent). Swatch
    /// payloads synthesize a `"New Note"` in the target. A vanished target
    /// leaves the board untouched. The slot is cleared in every case.
    pub fn commit_drop(&mut self, target_column_id: u64) {
        match self.drag.take() {
            Some(DragPayload::Note { note, .. }) => {
                let Some(target) = self.columns.iter().position(|c| c.id == target_column_id)
                else {
                    return;
                };
                if self.columns[target].contains_note(note.id) {
                    return;
                }
                // Pull the live note out of whichever column holds it; fall
                // back to the drag-start snapshot if it was deleted mid-drag.
                let live = self.extract_note(note.id).unwrap_or(note);
                self.columns[target].notes.push(live);
            }
            Some(DragPayload::Swatch(color)) => {
                let id = self.ids.next_id();
                if let Some(column) = self.column_mut(target_column_id) {
                    column.notes.push(Note::from_swatch(id, color));
                }
            }
            None => {}
        }
    }

    /// Replace a note's text in place
    pub fn edit_note_content(&mut self, column_id: u64, note_id: u64, content: impl Into<String>) {
        if let Some(column) = self.column_mut(column_id) {
            if let Some(note) = column.notes.iter_mut().find(|n| n.id == note_id) {
                note.content = content.into();
            }
        }
    }

    /// Filter a note out of its column
    pub fn remove_note(&mut self, column_id: u64, note_id: u64) {
        if let Some(column) = self.column_mut(column_id) {
            column.notes.retain(|n| n.id != note_id);
        }
    }

    /// Locate a note anywhere on the board
    pub fn find_note(&self, note_id: u64) -> Option<(&Column, &Note)> {
        self.columns.iter().find_map(|c| {
            c.notes
                .iter()
                .find(|n| n.id == note_id)
                .map(|n| (c, n))
        })
    }

    pub fn drag_in_progress(&self) -> bool {
        self.drag.is_active()
    }

    fn column_mut(&mut self, column_id: u64) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == column_id)
    }

    fn extract_note(&mut self, note_id: u64) -> Option<Note> {
        for column in &mut self.columns {
            if let Some(pos) = column.notes.iter().position(|n| n.id == note_id) {
                return Some(column.notes.remove(pos));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_board() -> Board {
        Board::with_default_columns(Arc::new(IdAllocator::starting_at(1000)))
    }

    fn note_columns(board: &Board, note_id: u64) -> Vec<u64> {
        board
            .columns()
            .iter()
            .filter(|c| c.contains_note(note_id))
            .map(|c| c.id)
            .collect()
    }

    #[test]
    fn test_default_columns() {
        let board = test_board();
        let names: Vec<&str> = board.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            ["What went well", "What could be improved", "Action Items"]
        );
    }

    #[test]
    fn test_swatch_drop_creates_single_note() {
        let mut board = test_board();
        board.begin_color_drag(NoteColor::Yellow);
        board.commit_drop(2);

        let column = &board.columns()[1];
        assert_eq!(column.id, 2);
        assert_eq!(column.notes.len(), 1);
        assert_eq!(column.notes[0].content, "New Note");
        assert_eq!(column.notes[0].color.as_hex(), "#facc15");
        assert!(board.columns()[0].notes.is_empty());
        assert!(board.columns()[2].notes.is_empty());
        assert!(!board.drag_in_progress());
    }

    #[test]
    fn test_note_moves_between_columns() {
        let mut board = test_board();
        board.begin_color_drag(NoteColor::Red);
        board.commit_drop(1);
        let note_id = board.columns()[0].notes[0].id;

        board.begin_drag(note_id);
        board.commit_drop(3);

        assert_eq!(note_columns(&board, note_id), vec![3]);
    }

    #[test]
    fn test_duplicate_drop_is_idempotent() {
        let mut board = test_board();
        board.begin_color_drag(NoteColor::Green);
        board.commit_drop(1);
        let note_id = board.columns()[0].notes[0].id;

        board.begin_drag(note_id);
        board.commit_drop(2);
        // Second drop event for the same gesture, no intervening begin_drag.
        board.commit_drop(2);

        assert_eq!(note_columns(&board, note_id), vec![2]);
        assert_eq!(board.columns()[1].notes.len(), 1);
    }

    #[test]
    fn test_drop_on_source_column_keeps_note() {
        let mut board = test_board();
        board.begin_color_drag(NoteColor::Orange);
        board.commit_drop(1);
        let note_id = board.columns()[0].notes[0].id;

        board.begin_drag(note_id);
        board.commit_drop(1);

        assert_eq!(note_columns(&board, note_id), vec![1]);
    }

    #[test]
    fn test_drop_on_removed_column_keeps_note_in_source() {
        let mut board = test_board();
        board.begin_color_drag(NoteColor::Emerald);
        board.commit_drop(1);
        let note_id = board.columns()[0].notes[0].id;

        board.begin_drag(note_id);
        board.remove_column(3);
        board.commit_drop(3);

        assert_eq!(note_columns(&board, note_id), vec![1]);
        assert!(!board.drag_in_progress());
    }

    #[test]
    fn test_note_never_in_two_columns() {
        let mut board = test_board();
        board.begin_color_drag(NoteColor::Yellow);
        board.commit_drop(1);
        let note_id = board.columns()[0].notes[0].id;

        for target in [2, 3, 1, 2] {
            board.begin_drag(note_id);
            board.commit_drop(target);
            assert_eq!(note_columns(&board, note_id).len(), 1);
        }
    }

    #[test]
    fn test_new_drag_replaces_uncommitted_one() {
        let mut board = test_board();
        board.begin_color_drag(NoteColor::Red);
        board.commit_drop(1);
        board.begin_color_drag(NoteColor::Green);
        board.commit_drop(2);
        let red = board.columns()[0].notes[0].id;
        let green = board.columns()[1].notes[0].id;

        board.begin_drag(red);
        board.begin_drag(green);
        board.commit_drop(3);

        assert_eq!(note_columns(&board, red), vec![1]);
        assert_eq!(note_columns(&board, green), vec![3]);
    }

    #[test]
    fn test_edit_survives_drag() {
        let mut board = test_board();
        board.begin_color_drag(NoteColor::Yellow);
        board.commit_drop(1);
        let note_id = board.columns()[0].notes[0].id;

        board.begin_drag(note_id);
        board.edit_note_content(1, note_id, "Ship the fix");
        board.commit_drop(2);

        let (_, note) = board.find_note(note_id).expect("note present");
        assert_eq!(note.content, "Ship the fix");
    }

    #[test]
    fn test_rename_then_remove_other_column() {
        let mut board = test_board();
        board.begin_color_drag(NoteColor::Green);
        board.commit_drop(2);
        board.rename_column(2, "Keep doing");
        board.remove_column(3);

        let column = board
            .columns()
            .iter()
            .find(|c| c.id == 2)
            .expect("renamed column still present");
        assert_eq!(column.name, "Keep doing");
        assert_eq!(column.notes.len(), 1);
    }

    #[test]
    fn test_remove_column_discards_notes() {
        let mut board = test_board();
        board.begin_color_drag(NoteColor::Red);
        board.commit_drop(1);
        let note_id = board.columns()[0].notes[0].id;

        board.remove_column(1);

        assert!(board.find_note(note_id).is_none());
        assert_eq!(board.columns().len(), 2);
    }

    #[test]
    fn test_commit_without_payload_is_noop() {
        let mut board = test_board();
        board.commit_drop(1);
        assert!(board.columns().iter().all(|c| c.notes.is_empty()));
    }

    #[test]
    fn test_added_column_gets_placeholder_name() {
        let mut board = test_board();
        let id = board.add_column();
        assert!(id >= 1000);
        assert_eq!(board.columns().last().unwrap().name, "New Column");
    }
}
