//! twenty48: 2048 in the terminal.
//!
//! Run: cargo run -- --size 4

mod cli;
mod logging;

use std::error::Error;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use twenty48_core::{App, AppConfig, Direction, Game, Status};
use twenty48_crossterm::CrosstermDriver;

use cli::Args;

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init(args.log_file.as_deref(), &args.log_level)?;

    let config = args.game_config()?;
    let rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    let game = Game::new(config, rng)?;

    if let Some(moves) = &args.play {
        play_headless(game, moves);
        return Ok(());
    }

    let mut app = App::new(AppConfig {
        game,
        driver: CrosstermDriver::new(),
    });
    app.run()?;

    let game = app.runner().game();
    println!(
        "score {}, best tile {}, {} moves",
        game.score(),
        game.board().max_tile(),
        game.moves()
    );
    Ok(())
}

/// Play `moves` on a fresh game and print each board.
fn play_headless(mut game: Game<SmallRng>, moves: &[Direction]) {
    game.start();
    println!("{}\n", game.board());
    for &dir in moves {
        let turn = game.play(dir);
        let note = if turn.changed { "" } else { " (no change)" };
        println!("{dir}{note}\n{}\n", game.board());
        if turn.status == Status::Lost {
            break;
        }
    }
    println!("score {}", game.score());
}
