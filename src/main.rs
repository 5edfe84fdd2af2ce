//! CLI driver: load the saved game, submit one move, render, save.

use std::path::PathBuf;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use dots_boxes::{
    render, FileStore, Game, GameBuilder, PlayerMove, Snapshot, Store, TurnOutcome,
};

/// Play one move of dots and boxes.
///
/// The game lives in the save file between invocations. Submit a move by
/// naming a dot (row and column letters), a side of the square rooted at
/// that dot, and a turn number different from the previous one; run with no
/// arguments to see the current board.
#[derive(Parser)]
#[command(name = "dots-boxes", version)]
struct Args {
    /// Row letter of the dot (A..)
    #[arg(long, default_value = "A")]
    row: String,

    /// Column letter of the dot (A..)
    #[arg(long, default_value = "A")]
    column: String,

    /// Side of the square at that dot: top, right, bottom or left
    #[arg(long, default_value = "")]
    side: String,

    /// Turn counter; change it from the saved value to submit the move
    #[arg(long, default_value_t = 0)]
    turn: u64,

    /// Save file holding the game between invocations
    #[arg(long, default_value = "dotgame.txt")]
    file: PathBuf,

    /// Board size for fresh games (3-26); also used after a finished game
    #[arg(long, value_parser = clap::value_parser!(u64).range(3..=26))]
    size: Option<u64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let store = FileStore::new(&args.file);

    let mut game = load_game(&store).unwrap_or_else(|| {
        GameBuilder::new()
            .size(args.size.unwrap_or(3) as usize)
            .build()
    });
    if let Some(size) = args.size {
        game.set_reset_size(size as usize);
    }

    let mv = PlayerMove::new(&args.row, &args.column, &args.side);
    let outcome = game.submit(&mv, args.turn);

    println!("{}", render::legend());
    println!();
    if let TurnOutcome::Finished(result) = outcome {
        println!("{}", render::result_line(result));
        println!();
    }
    print!("{}", render::board_text(game.board()));

    let status = game.take_status();
    if !status.is_empty() {
        println!("\n{status}");
    }

    save_game(&store, &game);
}

/// Load the saved game. Unreadable or missing saves fall back to a fresh
/// game; persistence problems are never fatal.
fn load_game(store: &FileStore) -> Option<Game> {
    let record = match store.load() {
        Ok(record) => record?,
        Err(err) => {
            warn!(%err, "could not read save file; starting fresh");
            return None;
        }
    };

    match Snapshot::decode(&record).and_then(Snapshot::into_game) {
        Ok(game) => Some(game),
        Err(err) => {
            warn!(%err, "saved game is unreadable; starting fresh");
            None
        }
    }
}

fn save_game(store: &FileStore, game: &Game) {
    let saved = Snapshot::capture(game)
        .encode()
        .and_then(|record| store.save(&record));
    if let Err(err) = saved {
        warn!(%err, "could not save game");
    }
}
