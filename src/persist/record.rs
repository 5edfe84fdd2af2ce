//! The flat-record persistence format.
//!
//! A saved game is a single delimited record holding, in fixed order:
//!
//! 1. `new_game` flag
//! 2. board size N
//! 3. current player
//! 4. status message
//! 5. last move's column, row, and side
//! 6. last processed turn counter
//! 7. every horizontal edge cell, row-major
//! 8. every vertical edge cell, row-major
//! 9. every square owner cell, row-major
//!
//! Ownership cells are written as integers with 0 meaning unowned. Decoding
//! goes through a typed field cursor that validates every field and the
//! total record length; round-tripping a [`Snapshot`] through
//! [`Snapshot::encode`] and [`Snapshot::decode`] reproduces it exactly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::board::{Board, EdgeKind, MAX_SIZE};
use crate::core::moves::{PlayerMove, Side};
use crate::core::player::{PlayerId, MAX_PLAYERS};
use crate::core::state::GameState;
use crate::engine::Game;

/// Field delimiter for the flat record.
pub const SEPARATOR: char = ',';

/// Failure to encode, decode, or store a saved game.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("record ended before all fields were read")]
    Truncated,
    #[error("record has unexpected trailing fields")]
    TrailingFields,
    #[error("invalid integer field {0:?}")]
    BadInt(String),
    #[error("invalid boolean field {0:?}")]
    BadBool(String),
    #[error("board size {0} is out of range")]
    InvalidSize(usize),
    #[error("player number {0} is out of range")]
    InvalidPlayer(u8),
    #[error("grid cell count does not match the board size")]
    GridMismatch,
    #[error("status message contains the field separator")]
    UnencodableStatus,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Typed cursor over the fields of one record.
struct Fields<'a> {
    inner: std::str::Split<'a, char>,
}

impl<'a> Fields<'a> {
    fn new(record: &'a str) -> Self {
        Self {
            inner: record.split(SEPARATOR),
        }
    }

    fn next_str(&mut self) -> Result<&'a str, PersistError> {
        self.inner.next().ok_or(PersistError::Truncated)
    }

    fn next_bool(&mut self) -> Result<bool, PersistError> {
        match self.next_str()? {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(PersistError::BadBool(other.to_string())),
        }
    }

    fn next_int<T: std::str::FromStr>(&mut self) -> Result<T, PersistError> {
        let field = self.next_str()?;
        field
            .parse()
            .map_err(|_| PersistError::BadInt(field.to_string()))
    }

    /// Check that every field has been consumed.
    fn finish(mut self) -> Result<(), PersistError> {
        if self.inner.next().is_some() {
            return Err(PersistError::TrailingFields);
        }
        Ok(())
    }
}

/// A complete, self-contained copy of one game's state.
///
/// Ownership cells use the record encoding directly: 0 for unowned, else the
/// owning player's number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub new_game: bool,
    pub size: usize,
    pub current_player: u8,
    pub status: String,
    pub last_move: PlayerMove,
    pub last_turn: u64,
    pub horizontal: Vec<u8>,
    pub vertical: Vec<u8>,
    pub squares: Vec<u8>,
}

fn cell_to_int(owner: Option<PlayerId>) -> u8 {
    owner.map(PlayerId::number).unwrap_or(0)
}

fn int_to_cell(value: u8) -> Result<Option<PlayerId>, PersistError> {
    match value {
        0 => Ok(None),
        n if PlayerId::new(n).is_valid(MAX_PLAYERS) => Ok(Some(PlayerId::new(n))),
        n => Err(PersistError::InvalidPlayer(n)),
    }
}

impl Snapshot {
    /// Capture the full state of a running game.
    #[must_use]
    pub fn capture(game: &Game) -> Self {
        let board = game.board();
        let state = game.state();

        Self {
            new_game: state.new_game,
            size: board.size(),
            current_player: state.current_player.number(),
            status: state.status().to_string(),
            last_move: state.last_move.clone(),
            last_turn: state.last_turn,
            horizontal: board.edge_cells(EdgeKind::Horizontal).map(cell_to_int).collect(),
            vertical: board.edge_cells(EdgeKind::Vertical).map(cell_to_int).collect(),
            squares: board.square_cells().map(cell_to_int).collect(),
        }
    }

    /// Encode as one flat record.
    ///
    /// Fails only if the status message contains the separator, which no
    /// engine-produced message does.
    pub fn encode(&self) -> Result<String, PersistError> {
        if self.status.contains(SEPARATOR) {
            return Err(PersistError::UnencodableStatus);
        }

        let mut fields: Vec<String> = vec![
            self.new_game.to_string(),
            self.size.to_string(),
            self.current_player.to_string(),
            self.status.clone(),
            self.last_move.column.clone(),
            self.last_move.row.clone(),
            self.last_move.side.to_string(),
            self.last_turn.to_string(),
        ];
        fields.extend(self.horizontal.iter().map(u8::to_string));
        fields.extend(self.vertical.iter().map(u8::to_string));
        fields.extend(self.squares.iter().map(u8::to_string));

        Ok(fields.join(&SEPARATOR.to_string()))
    }

    /// Decode one flat record.
    pub fn decode(record: &str) -> Result<Self, PersistError> {
        let mut fields = Fields::new(record);

        let new_game = fields.next_bool()?;
        let size: usize = fields.next_int()?;
        if size < 2 || size > MAX_SIZE {
            return Err(PersistError::InvalidSize(size));
        }
        let current_player: u8 = fields.next_int()?;
        if !PlayerId::new(current_player).is_valid(MAX_PLAYERS) {
            return Err(PersistError::InvalidPlayer(current_player));
        }
        let status = fields.next_str()?.to_string();
        let column = fields.next_str()?.to_string();
        let row = fields.next_str()?.to_string();
        let side = Side::parse(fields.next_str()?);
        let last_turn: u64 = fields.next_int()?;

        let mut read_cells = |count: usize| -> Result<Vec<u8>, PersistError> {
            let mut cells = Vec::with_capacity(count);
            for _ in 0..count {
                let value: u8 = fields.next_int()?;
                // Validate the range eagerly so a corrupt grid fails decode.
                int_to_cell(value)?;
                cells.push(value);
            }
            Ok(cells)
        };

        let horizontal = read_cells((size + 1) * size)?;
        let vertical = read_cells(size * (size + 1))?;
        let squares = read_cells(size * size)?;

        fields.finish()?;

        Ok(Self {
            new_game,
            size,
            current_player,
            status,
            last_move: PlayerMove {
                row,
                column,
                side,
            },
            last_turn,
            horizontal,
            vertical,
            squares,
        })
    }

    /// Reassemble a running game from this snapshot.
    pub fn into_game(self) -> Result<Game, PersistError> {
        if self.size < 2 || self.size > MAX_SIZE {
            return Err(PersistError::InvalidSize(self.size));
        }
        if !PlayerId::new(self.current_player).is_valid(MAX_PLAYERS) {
            return Err(PersistError::InvalidPlayer(self.current_player));
        }
        if self.horizontal.len() != (self.size + 1) * self.size
            || self.vertical.len() != self.size * (self.size + 1)
            || self.squares.len() != self.size * self.size
        {
            return Err(PersistError::GridMismatch);
        }

        let to_cells = |raw: Vec<u8>| -> Result<Vec<Option<PlayerId>>, PersistError> {
            raw.into_iter().map(int_to_cell).collect()
        };

        let board = Board::from_cells(
            self.size,
            to_cells(self.horizontal)?,
            to_cells(self.vertical)?,
            to_cells(self.squares)?,
        );

        let mut state = GameState::new();
        state.new_game = self.new_game;
        state.current_player = PlayerId::new(self.current_player);
        state.last_move = self.last_move;
        state.last_turn = self.last_turn;
        state.set_status(self.status);

        Ok(Game::from_parts(board, state))
    }
}
