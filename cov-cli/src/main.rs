//! cov-cli - Command line tool for fetching and summarizing OWID COVID data.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "cov-cli",
    version,
    about = "World COVID-19 dashboard data toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: cov_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    cov_cmd::run(cli.command).await
}
