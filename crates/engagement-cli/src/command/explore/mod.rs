//! Exploration command
//!
//! Loads the dataset, runs every aggregation view once, and prints the
//! result as aligned text tables or as a JSON report.

mod table;

use std::{io::Write as _, path::PathBuf};

use anyhow::Context;
use clap::Args;
use engagement_analysis::report::ExplorationReport;
use engagement_core::Dataset;

use crate::util::Output;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct ExploreArg {
    /// Path to the player-behavior CSV file
    #[arg(
        long,
        env = "ENGAGEMENT_DATASET",
        default_value = "data/player_behavior.csv"
    )]
    dataset: PathBuf,
    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    format: ReportFormat,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ExploreArg) -> anyhow::Result<()> {
    let ExploreArg {
        dataset,
        format,
        output,
    } = arg;

    let dataset = Dataset::open(dataset).context("Failed to load dataset")?;
    let report = ExplorationReport::build(&dataset);

    match format {
        ReportFormat::Json => Output::save_json(&report, output.as_deref())?,
        ReportFormat::Text => {
            let mut out = Output::from_output_path(output.as_deref())?;
            table::write_report(&mut out, &report)
                .and_then(|()| out.flush())
                .with_context(|| format!("Failed to write report to {}", out.display_path()))?;
        }
    }
    if let Some(path) = output {
        log::info!("Report saved to {}", path.display());
    }
    Ok(())
}
