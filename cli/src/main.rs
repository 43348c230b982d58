use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use sweeper_core::{Coord2, GameSession, MinePlacer, TurnOutcome};
use tracing_subscriber::filter::LevelFilter;

use input::{Action, Command, HELP, pixel_to_cell};
use settings::{Overrides, Settings};

mod input;
mod render;
mod settings;

/// Minesweeper in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// TOML file with rows, cols, mines, safe_radius and cell_size
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    rows: Option<u8>,

    #[arg(long)]
    cols: Option<u8>,

    #[arg(short, long)]
    mines: Option<u16>,

    /// Half-width of the mine-free square around the first click
    #[arg(long)]
    safe_radius: Option<u8>,

    /// Pixel size of a cell, used by `click`
    #[arg(long)]
    cell_size: Option<u32>,

    /// Seed for reproducible mine placement
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            rows: self.rows,
            cols: self.cols,
            mines: self.mines,
            safe_radius: self.safe_radius,
            cell_size: self.cell_size,
        }
    }
}

fn init_logging(verbose: &Verbosity<WarnLevel>) {
    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    }
    .apply(args.overrides());
    settings.validate()?;
    log::info!("Starting with {:?}", settings);

    let mut session = GameSession::from_config(&settings.game, args.seed)
        .context("could not set up the game")?;

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    println!("{}", render::render(&session));
    println!("type `help` for commands");

    for line in stdin.lock().lines() {
        let line = line.context("could not read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{:#}", err);
                continue;
            }
        };
        log::debug!("command: {:?}", command);

        let outcome = match command {
            Command::Quit => break,
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
            Command::New => {
                session.restart()?;
                println!("{}", render::render(&session));
                continue;
            }
            Command::Act(action, coords) => play(&mut session, action, coords)?,
            Command::Click(button, x, y) => {
                match pixel_to_cell((x, y), settings.cell_size, session.size()) {
                    Some(coords) => play(&mut session, button.action(), coords)?,
                    None => {
                        log::trace!("click at ({}, {}) is outside the grid", x, y);
                        TurnOutcome::NoChange
                    }
                }
            }
        };

        report(&session, &outcome);
        stdout.flush().context("could not write output")?;
    }

    Ok(())
}

fn play<P: MinePlacer>(
    session: &mut GameSession<P>,
    action: Action,
    coords: Coord2,
) -> anyhow::Result<TurnOutcome> {
    Ok(match action {
        Action::Reveal => session.handle_reveal(coords)?,
        Action::Flag => session.handle_flag_toggle(coords),
        Action::Chord => session.handle_chord(coords),
    })
}

fn report<P: MinePlacer>(session: &GameSession<P>, outcome: &TurnOutcome) {
    match outcome {
        TurnOutcome::NoChange => return,
        TurnOutcome::GameOver => {
            println!("the game is over, type `new` to play again");
            return;
        }
        _ => {}
    }

    println!("{}", render::render(session));
    match outcome {
        TurnOutcome::Won(_) => println!("You won!"),
        TurnOutcome::Lost { mine, .. } => {
            println!("Boom! Mine at row {}, col {}", mine.0, mine.1)
        }
        _ => {}
    }
}
