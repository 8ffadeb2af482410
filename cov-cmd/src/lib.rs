//! Command implementations for the COVID dashboard CLI.
//!
//! Provides subcommands for fetching and cleaning the remote OWID dataset
//! into fixture CSVs, and for printing aggregate summary tables from those
//! fixtures.

use clap::Subcommand;

pub mod fetch;
pub mod summary;

#[derive(Subcommand)]
pub enum Command {
    /// Download the OWID dataset and codebook, clean them, write fixtures
    Fetch {
        /// Directory the fixture CSVs are written to
        #[arg(short = 'o', long, default_value = "fixtures")]
        out_dir: String,
    },

    /// Print Total / New / Average tables from fetched fixtures
    Summary {
        /// Path to the cleaned observations CSV
        #[arg(short = 'b', long, default_value = "fixtures/observations.csv")]
        observations: String,

        /// Path to the location reference CSV
        #[arg(short = 'l', long, default_value = "fixtures/locations.csv")]
        locations: String,

        /// Metric to summarize: cases, deaths, tests, hosp_patients
        #[arg(short = 'm', long, default_value = "cases")]
        metric: String,

        /// Grouping level: country or continent
        #[arg(long, default_value = "country")]
        level: String,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Fetch { out_dir } => fetch::run_fetch(&out_dir).await,
        Command::Summary {
            observations,
            locations,
            metric,
            level,
        } => summary::run_summary(&observations, &locations, &metric, &level),
    }
}
