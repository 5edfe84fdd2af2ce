//! Scalar game state carried between submissions.
//!
//! The board grids live in [`crate::core::Board`]; everything else a running
//! game needs to resume from a saved record lives here:
//!
//! - whose turn it is
//! - the last move applied and the last processed turn counter
//! - the one-shot status message shown to players
//! - whether the game is still untouched (`new_game`)
//!
//! The status message has clear-on-read semantics: the presentation layer
//! takes it exactly once per submission, so a stale message is never shown
//! twice.

use serde::{Deserialize, Serialize};

use super::moves::PlayerMove;
use super::player::PlayerId;

/// Scalar state for one running game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// True until the first valid move of a game is applied.
    pub new_game: bool,

    /// Whose turn it is.
    pub current_player: PlayerId,

    /// The last move applied to the board.
    pub last_move: PlayerMove,

    /// The last processed turn counter. A submission whose counter equals
    /// this value is a re-read of old input and is ignored.
    pub last_turn: u64,

    /// Pending status message. Cleared when taken for display.
    status: String,
}

impl GameState {
    /// State for a fresh game: player 1 to move, nothing applied yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            new_game: true,
            current_player: PlayerId::ONE,
            last_move: PlayerMove::default(),
            last_turn: 0,
            status: format!("Your move {}.", PlayerId::ONE),
        }
    }

    /// Replace the pending status message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
    }

    /// Peek at the pending status message without clearing it.
    ///
    /// The persistence boundary uses this; presentation goes through
    /// [`GameState::take_status`].
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Take the pending status message, leaving it empty.
    pub fn take_status(&mut self) -> String {
        std::mem::take(&mut self.status)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
