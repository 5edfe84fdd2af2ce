//! Game engine: rules for advancing board and state one submission at a time.

pub mod game;

pub use game::{Game, GameBuilder, GameResult, MoveError, TurnOutcome};
