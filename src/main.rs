//! Terminal runner (default binary).
//!
//! Drives the engine at a fixed tick: sample the keyboard, tick the game,
//! draw the screen, wait for the next tick. On a line clear the flash frame
//! stays up for a few ticks before the rows collapse.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use blockfall::core::{Game, PieceSource};
use blockfall::input::{pump_until, InputHandler, InputSignal, DEFAULT_KEY_RELEASE_TIMEOUT_MS};
use blockfall::runner::{advance, Screen, Step, Timing};
use blockfall::term::TerminalRenderer;
use blockfall::types::{FLASH_TICKS, TICK_MS};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Seed for the piece sequence. Random when omitted.
    #[arg(short, long)]
    seed: Option<u64>,
    /// Length of one game tick in milliseconds, at most 10000.
    #[arg(long, default_value_t = TICK_MS)]
    tick_ms: u64,
    /// How many ticks completed rows flash before they collapse.
    #[arg(long, default_value_t = FLASH_TICKS)]
    flash_ticks: u32,
    /// Treat a key as released after this long without a repeat, for
    /// terminals that never report releases.
    #[arg(long, default_value_t = DEFAULT_KEY_RELEASE_TIMEOUT_MS)]
    key_release_ms: u32,
    /// Write logs to this file. Nothing is logged otherwise.
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Log filter, e.g. `debug` or `blockfall_core=trace`.
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// How a run ended.
enum Outcome {
    Quit,
    GameOver { score: u32 },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let timing = Timing::new(args.tick_ms, args.flash_ticks)?;
    init_logging(&args)?;

    let pieces = match args.seed {
        Some(seed) => PieceSource::new(seed),
        None => PieceSource::from_entropy(),
    };
    let mut game = Game::with_source(pieces);
    info!(seed = game.seed(), tick_ms = args.tick_ms, "starting");

    install_panic_hook();
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game, &args, timing);

    // Always try to restore terminal state.
    let _ = term.exit();

    match result? {
        Outcome::Quit => {
            info!(score = game.score(), "quit");
            Ok(())
        }
        Outcome::GameOver { score } => {
            println!("Game Over!! Score: {}", score);
            print!("Press Enter to exit...");
            io::stdout().flush()?;
            let mut line = String::new();
            io::stdin().read_line(&mut line)?;
            Ok(())
        }
    }
}

fn run(
    term: &mut TerminalRenderer,
    game: &mut Game,
    args: &Args,
    timing: Timing,
) -> Result<Outcome> {
    let mut screen = Screen::new();
    let mut input = InputHandler::with_key_release_timeout_ms(args.key_release_ms);
    let mut resized = false;

    screen.present(game, term)?;
    let mut last_tick = Instant::now();

    loop {
        match pump_until(&mut input, last_tick + timing.tick)? {
            InputSignal::Quit => return Ok(Outcome::Quit),
            InputSignal::Resize => {
                term.invalidate();
                screen.present(game, term)?;
                continue;
            }
            InputSignal::Timeout => {}
        }
        last_tick = Instant::now();

        let controls = input.sample(last_tick);
        let step = advance(game, controls, &mut screen, term, timing.flash, |flash| {
            let quit = wait_flash(&mut input, flash, &mut resized)?;
            last_tick = Instant::now();
            Ok(quit)
        })?;

        if resized {
            resized = false;
            term.invalidate();
            screen.present(game, term)?;
        }
        match step {
            Step::Continue => {}
            Step::Quit => return Ok(Outcome::Quit),
            Step::GameOver { score } => return Ok(Outcome::GameOver { score }),
        }
    }
}

/// Keep reading input while completed rows flash. Returns true on quit.
fn wait_flash(input: &mut InputHandler, flash: Duration, resized: &mut bool) -> Result<bool> {
    let deadline = Instant::now() + flash;
    loop {
        match pump_until(input, deadline)? {
            InputSignal::Timeout => return Ok(false),
            InputSignal::Quit => return Ok(true),
            InputSignal::Resize => *resized = true,
        }
    }
}

/// Install a file logger when `--log-file` is given. Stdout is the game
/// screen, so there is no console logging.
fn init_logging(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    let filter = EnvFilter::try_new(&args.log_level)
        .with_context(|| format!("invalid --log-level {:?}", args.log_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

/// Leave raw mode and the alternate screen before the panic message prints.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = TerminalRenderer::new().exit();
        default_hook(panic_info);
    }));
}
