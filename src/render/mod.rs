//! Text rendering with full-width glyphs.
//!
//! Purely presentational: everything here reads plain engine data and picks
//! glyphs. Full-width forms keep the grid aligned because every glyph,
//! including the ideographic space, occupies one display cell of the same
//! width.

use crate::core::board::{Board, EdgeKind};
use crate::core::player::PlayerId;
use crate::engine::GameResult;

/// Fixed-width dot (full-width asterisk).
const DOT: char = '\u{FF0A}';

/// Ideographic space, same display width as the other glyphs.
const SPACE: char = '\u{3000}';

/// Horizontal bar glyph per player.
const HORIZ_BARS: [char; 2] = ['\u{FF5E}', '\u{FF1D}'];

/// Vertical bar glyph per player.
const VERT_BARS: [char; 2] = ['\u{FF5C}', '\u{FF1A}'];

/// Full-width digits 0-9.
const DIGITS: [char; 10] = [
    '\u{FF10}', '\u{FF11}', '\u{FF12}', '\u{FF13}', '\u{FF14}', '\u{FF15}', '\u{FF16}',
    '\u{FF17}', '\u{FF18}', '\u{FF19}',
];

/// Full-width letters A-Z for row and column labels.
const LETTERS: [char; 26] = [
    '\u{FF21}', '\u{FF22}', '\u{FF23}', '\u{FF24}', '\u{FF25}', '\u{FF26}', '\u{FF27}',
    '\u{FF28}', '\u{FF29}', '\u{FF2A}', '\u{FF2B}', '\u{FF2C}', '\u{FF2D}', '\u{FF2E}',
    '\u{FF2F}', '\u{FF30}', '\u{FF31}', '\u{FF32}', '\u{FF33}', '\u{FF34}', '\u{FF35}',
    '\u{FF36}', '\u{FF37}', '\u{FF38}', '\u{FF39}', '\u{FF3A}',
];

fn horiz_bar(player: PlayerId) -> char {
    HORIZ_BARS[player.index()]
}

fn vert_bar(player: PlayerId) -> char {
    VERT_BARS[player.index()]
}

/// The legend line mapping each player to their bar glyphs.
#[must_use]
pub fn legend() -> String {
    format!(
        "Player 1: {}{}  Player 2: {}{}",
        HORIZ_BARS[0], VERT_BARS[0], HORIZ_BARS[1], VERT_BARS[1]
    )
}

/// The announcement line for a finished game.
#[must_use]
pub fn result_line(result: GameResult) -> String {
    match result {
        GameResult::Winner(player) => {
            format!("Congratulations! You won {player}")
        }
        GameResult::Draw => "The game is a tie!".to_string(),
    }
}

/// Render the whole board as aligned full-width text.
#[must_use]
pub fn board_text(board: &Board) -> String {
    let size = board.size();
    let mut out = String::new();

    header_row(&mut out, size);
    for row in 0..size {
        horizontal_row(&mut out, board, row);
        vertical_row(&mut out, board, row);
    }
    horizontal_row(&mut out, board, size);

    out
}

/// Column labels across the top.
fn header_row(out: &mut String, size: usize) {
    for _ in 0..3 {
        out.push(SPACE);
    }
    for col in 0..size {
        out.push(SPACE);
        out.push(LETTERS[col]);
        out.push(SPACE);
        out.push(SPACE);
    }
    out.push('\n');
}

/// A row of dots with any horizontal connections between them.
fn horizontal_row(out: &mut String, board: &Board, row: usize) {
    out.push(SPACE);
    out.push(SPACE);
    for col in 0..board.size() {
        out.push(DOT);
        match board.edge(EdgeKind::Horizontal, row, col) {
            Some(player) => {
                let bar = horiz_bar(player);
                for _ in 0..3 {
                    out.push(bar);
                }
            }
            None => {
                for _ in 0..3 {
                    out.push(SPACE);
                }
            }
        }
    }
    out.push(DOT);
    out.push('\n');
}

/// A labeled row of vertical connections and claimed-square digits.
fn vertical_row(out: &mut String, board: &Board, row: usize) {
    let size = board.size();

    out.push(LETTERS[row]);
    out.push(SPACE);
    for col in 0..size {
        match board.edge(EdgeKind::Vertical, row, col) {
            Some(player) => out.push(vert_bar(player)),
            None => out.push(SPACE),
        }
        match board.square_owner(row, col) {
            Some(owner) => {
                out.push(SPACE);
                out.push(DIGITS[owner.number() as usize]);
                out.push(SPACE);
            }
            None => {
                for _ in 0..3 {
                    out.push(SPACE);
                }
            }
        }
    }
    if let Some(player) = board.edge(EdgeKind::Vertical, row, size) {
        out.push(vert_bar(player));
    }
    out.push('\n');
}
