mod game;
mod tui;
mod ui;

use clap::Parser;
use reversi_core::probcut::Selectivity;

/// Terminal demo for the reversi-core engine: play against it, watch it play
/// itself, or get move hints. This binary is a thin host around the engine's
/// [`reversi_core::search::Search`] API; it is not part of the spec'd core.
#[derive(Parser, Debug)]
#[command(name = "reversi", about = "Terminal Othello/Reversi engine demo")]
struct Cli {
    /// Transposition table size in MB
    #[arg(long, default_value = "64")]
    hash_size: usize,

    /// Initial AI search level (0-24)
    #[arg(short, long, default_value = "21")]
    level: usize,

    /// Initial endgame search selectivity (0=exact .. 5=most aggressive)
    #[arg(long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..=5))]
    selectivity: u8,
}

fn main() {
    let args = Cli::parse();

    ui::ui_loop(
        args.hash_size,
        args.level,
        Selectivity::from_u8(args.selectivity),
    )
    .unwrap_or_else(|err| {
        eprintln!("Failed to initialize UI: {err}");
        std::process::exit(1);
    });
}
