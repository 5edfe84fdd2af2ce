//! The game engine: move validation, claim detection, turn and win logic.
//!
//! [`Game`] owns one board plus the scalar [`GameState`] and advances them
//! one submission at a time. The driver entry point is [`Game::submit`],
//! which also enforces the turn-counter dedup contract; [`Game::try_move`]
//! is the raw validate-and-apply operation underneath it.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::board::{Board, BoardError, MAX_SIZE, MIN_SIZE};
use crate::core::moves::{PlayerMove, Side};
use crate::core::player::{PlayerId, PlayerMap, MAX_PLAYERS};
use crate::core::state::GameState;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner with the strict maximum of claimed squares.
    Winner(PlayerId),
    /// The top claim counts tied.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Draw => false,
        }
    }
}

/// Why a move was rejected. The board is untouched in every case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("missing or unparseable row/column designator")]
    MissingDesignator,
    #[error("no side chosen")]
    NoSide,
    #[error("move is out of range")]
    OutOfRange,
    #[error("edge is already occupied")]
    Occupied,
}

impl From<BoardError> for MoveError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::OutOfBounds => MoveError::OutOfRange,
            BoardError::EdgeOccupied => MoveError::Occupied,
        }
    }
}

/// What one submission did to the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The turn counter matched the last processed submission; nothing was
    /// applied.
    Stale,
    /// The move failed validation; only the status message changed.
    Rejected(MoveError),
    /// The move was applied and the game continues. `claimed` reports
    /// whether the mover completed at least one square (and so moves again).
    Applied { claimed: bool },
    /// The move filled the board. The result was declared and the engine
    /// reset itself to a fresh game.
    Finished(GameResult),
}

/// Builder for a [`Game`].
pub struct GameBuilder {
    size: usize,
    reset_size: Option<usize>,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self {
            size: MIN_SIZE,
            reset_size: None,
        }
    }
}

impl GameBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starting board size. New games must be 3-26.
    #[must_use]
    pub fn size(mut self, size: usize) -> Self {
        assert!(
            (MIN_SIZE..=MAX_SIZE).contains(&size),
            "Board size must be 3-26"
        );
        self.size = size;
        self
    }

    /// Board size used when the engine resets after a finished game.
    /// Defaults to the starting size.
    #[must_use]
    pub fn reset_size(mut self, size: usize) -> Self {
        assert!(
            (MIN_SIZE..=MAX_SIZE).contains(&size),
            "Board size must be 3-26"
        );
        self.reset_size = Some(size);
        self
    }

    /// Build a fresh game with player 1 to move.
    #[must_use]
    pub fn build(self) -> Game {
        Game {
            board: Board::new(self.size),
            state: GameState::new(),
            reset_size: self.reset_size.unwrap_or(self.size),
        }
    }
}

/// A running dots and boxes game.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    state: GameState,
    reset_size: usize,
}

impl Default for Game {
    fn default() -> Self {
        GameBuilder::new().build()
    }
}

impl Game {
    /// A fresh default-sized game.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reassemble a game from persisted parts. The reset size defaults to
    /// the restored board size, raised to the minimum for new games.
    pub(crate) fn from_parts(board: Board, state: GameState) -> Self {
        let reset_size = board.size().max(MIN_SIZE);
        Self {
            board,
            state,
            reset_size,
        }
    }

    /// The board, for rendering and queries.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Board size N.
    #[must_use]
    pub fn size(&self) -> usize {
        self.board.size()
    }

    /// Scalar state, for the persistence boundary.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current_player
    }

    /// Take the pending status message, clearing it.
    pub fn take_status(&mut self) -> String {
        self.state.take_status()
    }

    /// Claimed-square counts per player.
    #[must_use]
    pub fn scores(&self) -> PlayerMap<u32> {
        self.board.claim_counts(MAX_PLAYERS)
    }

    /// Whether the board is full (the game-over condition).
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.board.is_full()
    }

    /// Override the size used for the automatic post-game reset.
    pub fn set_reset_size(&mut self, size: usize) {
        assert!(
            (MIN_SIZE..=MAX_SIZE).contains(&size),
            "Board size must be 3-26"
        );
        self.reset_size = size;
    }

    /// Validate a move for the current player and apply it.
    ///
    /// On success the edge is placed, the move becomes `last_move`, and any
    /// squares it completed are claimed for the mover; returns whether at
    /// least one square was claimed. On failure nothing changes.
    pub fn try_move(&mut self, mv: &PlayerMove) -> Result<bool, MoveError> {
        let row = mv.row_index().ok_or(MoveError::MissingDesignator)?;
        let col = mv.column_index().ok_or(MoveError::MissingDesignator)?;
        let (kind, edge_row, edge_col) =
            mv.side.edge_target(row, col).ok_or(MoveError::NoSide)?;

        let player = self.state.current_player;
        self.board.set_edge(kind, edge_row, edge_col, player)?;

        debug!(%player, row, col, side = %mv.side, "edge placed");

        self.state.new_game = false;
        self.state.last_move = mv.clone();

        Ok(self.detect_claims(row, col, mv.side))
    }

    /// Claim every square the edge just placed may have completed.
    ///
    /// An edge bounds at most two squares; each candidate is re-checked
    /// against the full board state before claiming.
    fn detect_claims(&mut self, row: usize, col: usize, side: Side) -> bool {
        let player = self.state.current_player;
        let mut claimed = false;

        for (r, c) in side.adjacent_squares(row, col, self.board.size()) {
            if self.board.claim_square(r, c, player) {
                debug!(%player, row = r, col = c, "square claimed");
                claimed = true;
            }
        }

        claimed
    }

    /// Tally claims and declare the outcome. Only meaningful on a full board.
    fn declare_result(&self) -> GameResult {
        let counts = self.board.claim_counts(MAX_PLAYERS);
        match counts.leaders() {
            Some((_, leaders)) if leaders.len() == 1 => GameResult::Winner(leaders[0]),
            _ => GameResult::Draw,
        }
    }

    /// Throw away the finished game and start a fresh one.
    pub fn reset(&mut self) {
        self.board = Board::new(self.reset_size);
        self.state = GameState::new();
    }

    /// Process one external submission: a proposed move plus the driver's
    /// turn counter.
    ///
    /// A submission is processed only when `turn` differs from the last
    /// processed value; re-reads of unchanged input are reported as
    /// [`TurnOutcome::Stale`] and leave the game untouched. Rejected moves
    /// change only the status message. When a move fills the board the
    /// result is declared and the engine resets itself before returning.
    pub fn submit(&mut self, mv: &PlayerMove, turn: u64) -> TurnOutcome {
        if turn == self.state.last_turn {
            let player = self.state.current_player;
            self.state.set_status(format!("Your move {player}."));
            return TurnOutcome::Stale;
        }

        let outcome = match self.try_move(mv) {
            Ok(claimed) => {
                if claimed {
                    let player = self.state.current_player;
                    self.state.set_status(format!("Your move again {player}."));
                } else {
                    let next = self.state.current_player.next(MAX_PLAYERS);
                    self.state.current_player = next;
                    self.state.set_status(format!("Your move {next}."));
                }

                if self.board.is_full() {
                    let result = self.declare_result();
                    info!(?result, "game over");
                    self.reset();
                    TurnOutcome::Finished(result)
                } else {
                    TurnOutcome::Applied { claimed }
                }
            }
            Err(err) => {
                let player = self.state.current_player;
                let message = match err {
                    MoveError::Occupied => format!(
                        "That position is already occupied. Please try again {player}."
                    ),
                    _ => format!("Invalid move. Please try again {player}."),
                };
                self.state.set_status(message);
                TurnOutcome::Rejected(err)
            }
        };

        self.state.last_turn = turn;
        outcome
    }
}
