//! Seance Board - terminal seance keyboard
//!
//! Compose a message by hunting letters on an ever-shifting board, then
//! submit it for a spiritual translation.

use anyhow::Result;
use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;

use seance::config::Config;
use seance::services::OpenAiTranslator;
use seance::telemetry;
use seance::tui::{self, AppState};

/// Seance Board - terminal seance keyboard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to an alternate config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the number of board columns
    #[arg(long, value_name = "N")]
    columns: Option<u16>,

    /// Override the remote model identifier
    #[arg(long, value_name = "NAME")]
    model: Option<String>,

    /// Seed the board shuffle for a reproducible session
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Enable verbose trace logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(columns) = cli.columns {
        config.keyboard.columns = columns;
    }
    if let Some(model) = cli.model {
        config.translator.model = model;
    }
    config.validate()?;

    let rng = match cli.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let translator = Arc::new(OpenAiTranslator::from_config(&config.translator)?);

    let mut state = AppState::new(config, rng, translator);
    let mut terminal = tui::setup_terminal()?;
    let result = tui::run_tui(&mut state, &mut terminal);
    tui::restore_terminal(terminal)?;

    result
}
