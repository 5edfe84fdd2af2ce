//! Move input: letter designators and the side-relative edge model.
//!
//! A move names a dot by row and column letter ('A' onward, case-insensitive)
//! and one side of the unit square rooted at that dot. Side parsing is total:
//! unrecognized text becomes `Side::NoSide`, which every consumer rejects as
//! invalid rather than treating as a default.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::board::EdgeKind;

/// Which edge of the square rooted at the named dot a move targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
    /// No recognizable side was chosen. Always invalid to play.
    #[default]
    NoSide,
}

impl Side {
    /// Parse side text, case-insensitively.
    ///
    /// Anything other than the four side names yields `NoSide`.
    #[must_use]
    pub fn parse(text: &str) -> Side {
        match text.to_ascii_uppercase().as_str() {
            "TOP" => Side::Top,
            "RIGHT" => Side::Right,
            "BOTTOM" => Side::Bottom,
            "LEFT" => Side::Left,
            _ => Side::NoSide,
        }
    }

    /// The absolute edge this side selects for the dot at (row, col).
    ///
    /// Returns `None` for `NoSide`.
    #[must_use]
    pub fn edge_target(self, row: usize, col: usize) -> Option<(EdgeKind, usize, usize)> {
        match self {
            Side::Top => Some((EdgeKind::Horizontal, row, col)),
            Side::Bottom => Some((EdgeKind::Horizontal, row + 1, col)),
            Side::Right => Some((EdgeKind::Vertical, row, col + 1)),
            Side::Left => Some((EdgeKind::Vertical, row, col)),
            Side::NoSide => None,
        }
    }

    /// The squares a move on this side may have completed.
    ///
    /// A single edge bounds at most two squares: the square rooted at the
    /// named dot and its neighbor across the edge. Candidates outside the
    /// board are omitted.
    #[must_use]
    pub fn adjacent_squares(self, row: usize, col: usize, size: usize) -> SmallVec<[(usize, usize); 2]> {
        let mut candidates: SmallVec<[(usize, usize); 2]> = SmallVec::new();

        if self == Side::NoSide {
            return candidates;
        }
        if row < size && col < size {
            candidates.push((row, col));
        }
        match self {
            Side::Top if row > 0 => candidates.push((row - 1, col)),
            Side::Bottom if row + 1 < size => candidates.push((row + 1, col)),
            Side::Right if col + 1 < size => candidates.push((row, col + 1)),
            Side::Left if col > 0 => candidates.push((row, col - 1)),
            _ => {}
        }

        candidates
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Side::Top => "Top",
            Side::Right => "Right",
            Side::Bottom => "Bottom",
            Side::Left => "Left",
            Side::NoSide => "None",
        };
        f.write_str(name)
    }
}

/// Map a single-letter designator to a zero-based grid index.
///
/// Only 'A'..='Z' (either case) parse; empty or other text is `None`.
#[must_use]
pub fn letter_index(designator: &str) -> Option<usize> {
    let first = designator.chars().next()?.to_ascii_uppercase();
    if first.is_ascii_uppercase() {
        Some(first as usize - 'A' as usize)
    } else {
        None
    }
}

/// A proposed edge placement as entered by a player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMove {
    /// Row letter designator, stored uppercased.
    pub row: String,
    /// Column letter designator, stored uppercased.
    pub column: String,
    pub side: Side,
}

impl Default for PlayerMove {
    fn default() -> Self {
        Self {
            row: "A".to_string(),
            column: "A".to_string(),
            side: Side::NoSide,
        }
    }
}

impl PlayerMove {
    /// Create a move from raw designators and side text.
    #[must_use]
    pub fn new(row: &str, column: &str, side: &str) -> Self {
        Self {
            row: row.to_ascii_uppercase(),
            column: column.to_ascii_uppercase(),
            side: Side::parse(side),
        }
    }

    /// Zero-based row index, if the designator parses.
    #[must_use]
    pub fn row_index(&self) -> Option<usize> {
        letter_index(&self.row)
    }

    /// Zero-based column index, if the designator parses.
    #[must_use]
    pub fn column_index(&self) -> Option<usize> {
        letter_index(&self.column)
    }
}
