use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::interactive::{InteractiveArgs, run_interactive};
use crate::logging::{self, LogArgs};
use crate::replay::{ReplayArgs, run_replay};

#[derive(Debug, Parser)]
#[command(
    name = "monoglyph",
    about = "Host screen for a single-character input field",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub log: LogArgs,

    /// Defaults to `interactive`.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Edit the field from a raw-mode terminal.
    Interactive(InteractiveArgs),

    /// Replay an edit script and print the notification transcript.
    Replay(ReplayArgs),
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    logging::init(&cli.log)?;
    match cli.command {
        Some(Commands::Replay(args)) => run_replay(args),
        Some(Commands::Interactive(args)) => run_interactive(args),
        None => run_interactive(InteractiveArgs::default()),
    }
}
