pub mod commands;
pub mod fixtures;
pub mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "bidforge",
    about = "Bidforge operator CLI",
    long_about = "Run the proposal-generation pipeline over demo data, export the catalog, \
                  inspect configuration, and smoke-validate the pipeline scenarios.",
    after_help = "Examples:\n  bidforge demo\n  bidforge catalog --output product_catalog.csv\n  bidforge smoke"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Process the sample RFP batch and export generated bids as JSON")]
    Demo {
        #[arg(long, default_value = "bids", help = "Directory the bid JSON files go into")]
        out_dir: PathBuf,
    },
    #[command(about = "Export the fixture product catalog as CSV")]
    Catalog {
        #[arg(long, default_value = "product_catalog.csv", help = "Output CSV path")]
        output: PathBuf,
    },
    #[command(about = "Run end-to-end pipeline checks with per-check timing details")]
    Smoke,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Demo { out_dir } => commands::demo::run(&out_dir),
        Command::Catalog { output } => commands::catalog::run(&output),
        Command::Smoke => commands::smoke::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
