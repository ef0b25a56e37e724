//! Sticky Note Entity
//!
//! A colored, editable text card belonging to exactly one board column.

use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// The five swatch colors offered in the board's color tray
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteColor {
    Emerald,
    Green,
    Yellow,
    Orange,
    Red,
}

impl NoteColor {
    /// CSS hex value rendered as the note background
    pub fn as_hex(&self) -> &'static str {
        match self {
            NoteColor::Emerald => "#6ee7b7",
            NoteColor::Green => "#4ade80",
            NoteColor::Yellow => "#facc15",
            NoteColor::Orange => "#fb923c",
            NoteColor::Red => "#f87171",
        }
    }

    /// Map a swatch hex value back to its color; unknown values get None
    pub fn from_hex(hex: &str) -> Option<Self> {
        match hex {
            "#6ee7b7" => Some(NoteColor::Emerald),
            "#4ade80" => Some(NoteColor::Green),
            "#facc15" => Some(NoteColor::Yellow),
            "#fb923c" => Some(NoteColor::Orange),
            "#f87171" => Some(NoteColor::Red),
            _ => None,
        }
    }

    /// All swatches in tray order
    pub fn all() -> [NoteColor; 5] {
        [
            NoteColor::Emerald,
            NoteColor::Green,
            NoteColor::Yellow,
            NoteColor::Orange,
            NoteColor::Red,
        ]
    }
}

/// A sticky note on the retro board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier
    pub id: u64,
    /// Editable text content
    pub content: String,
    /// Background color, fixed at creation
    pub color: NoteColor,
}

impl Note {
    /// Content given to notes synthesized from a color swatch drop
    pub const DEFAULT_CONTENT: &'static str = "New Note";

    pub fn new(id: u64, content: impl Into<String>, color: NoteColor) -> Self {
        Self {
            id,
            content: content.into(),
            color,
        }
    }

    /// A fresh note as created by dropping a swatch onto a column
    pub fn from_swatch(id: u64, color: NoteColor) -> Self {
        Self::new(id, Self::DEFAULT_CONTENT, color)
    }
}

impl Entity for Note {
    type Id = u64;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        for color in NoteColor::all() {
            assert_eq!(NoteColor::from_hex(color.as_hex()), Some(color));
        }
        assert_eq!(NoteColor::from_hex("#000000"), None);
    }

    #[test]
    fn test_color_serializes_lowercase() {
        let json = serde_json::to_string(&NoteColor::Emerald).unwrap();
        assert_eq!(json, "\"emerald\"");
    }

    #[test]
    fn test_swatch_note_defaults() {
        let note = Note::from_swatch(7, NoteColor::Yellow);
        assert_eq!(note.id(), 7);
        assert_eq!(note.content, "New Note");
        assert_eq!(note.color, NoteColor::Yellow);
    }
}
