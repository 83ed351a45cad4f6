use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;

use snake_arena::game::{Controls, Game, GameOutcome};
use snake_arena::term::{self, TermInput, TermScreen};
use snake_arena::{Config, GameError, Simulation};

/// Terminal snake with portals, obstacles and a speed ramp.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// TOML config file (default: ./snake-arena.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<u16>,
    #[arg(long)]
    height: Option<u16>,
    /// Seed for obstacle and item placement
    #[arg(long)]
    seed: Option<u64>,
    /// Initial delay between ticks in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,
    #[arg(long)]
    no_obstacles: bool,
    #[arg(long)]
    no_items: bool,
    #[arg(long)]
    no_portals: bool,
    /// Write logs here instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(w) = self.width {
            config.width = w;
        }
        if let Some(h) = self.height {
            config.height = h;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(ms) = self.tick_ms {
            config.tick_ms = ms;
        }
        if self.no_obstacles {
            config.obstacles.enabled = false;
        }
        if self.no_items {
            config.items.enabled = false;
        }
        if self.no_portals {
            config.portals = false;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;

    let (cols, rows) = term::size().context("reading terminal size")?;
    if cols < config.width || rows < config.height {
        bail!(
            "terminal is {}x{}, the {}x{} grid needs a bigger window",
            cols, rows, config.width, config.height
        );
    }

    // Placement failures surface here, before the terminal is taken over.
    let sim = Simulation::new(&config)?;

    term::setup()?;
    let result = play(sim, &config);
    term::restore()?;

    let (outcome, score) = result?;
    println!("{}", outcome.message());
    println!("Score: {}", score);

    Ok(())
}

fn play(sim: Simulation, config: &Config) -> Result<(GameOutcome, u32), GameError> {
    let input = TermInput::new(config.keys.clone());
    let mut game = Game::new(sim, Controls::new(config.keys.clone()), input, TermScreen::new());

    let outcome = game.run()?;
    let score = game.score();

    let center = (config.width / 2, config.height / 2);
    let score_line = format!("Score: {}", score);
    game.renderer_mut().show_message(&[outcome.message(), score_line.as_str(), "", "Press any key"], center)?;
    game.input_mut().read_key_blocking()?;

    Ok((outcome, score))
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let default_level = if path.is_some() { "info" } else { "warn" };
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));

    if let Some(path) = path {
        let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}
