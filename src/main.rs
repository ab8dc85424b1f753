use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use chess_rules_engine::board::Board;
use chess_rules_engine::presets::Preset;
use chess_rules_engine::session::session_top::{run_stdio_loop, SessionOptions};

/// Interactive rules-engine session over stdin/stdout.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Layout to load: empty, standard or shuffled.
    #[arg(long, default_value = "standard")]
    preset: String,

    /// Seed for the shuffled layout.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Start the game right away.
    #[arg(long)]
    start: bool,

    /// Print the JSON snapshot after every change.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let preset = match args.preset.parse::<Preset>() {
        Ok(Preset::Shuffled { .. }) => Preset::Shuffled { seed: args.seed },
        Ok(preset) => preset,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut board = Board::with_preset(preset);
    if args.start {
        if let Err(err) = board.start_game() {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    }

    let options = SessionOptions {
        echo_json: args.json,
    };
    match run_stdio_loop(board, options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
