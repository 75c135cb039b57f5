use clap::{Parser, Subcommand};

use self::{explore::ExploreArg, predict::PredictArg};

mod explore;
mod predict;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Which page to run
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Print exploratory views of the player-behavior dataset
    Explore(#[clap(flatten)] ExploreArg),
    /// Predict the engagement level of one player
    Predict(#[clap(flatten)] PredictArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Explore(arg) => explore::run(&arg)?,
        Mode::Predict(arg) => predict::run(&arg)?,
    }
    Ok(())
}
