use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use menu_cleaner::config::Config;
use menu_cleaner::logging;
use menu_cleaner::metrics;
use menu_cleaner::pipeline::{Pass, PassReport};

#[derive(Parser)]
#[command(name = "menu_cleaner")]
#[command(about = "Cleans the text, price and page columns of the menu dataset")]
#[command(version = "0.1.0")]
struct Cli {
    /// Config file (defaults to $MENU_CLEANER_CONFIG, then ./config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding Menu.csv, MenuItem.csv and MenuPage.csv
    #[arg(long, global = true)]
    input_dir: Option<PathBuf>,

    /// Directory the cleaned files are written to
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Print pass reports as JSON instead of a text summary
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean place, sponsor, event and venue in Menu.csv
    Menu,
    /// Clean price and high_price in MenuItem.csv
    MenuItem,
    /// Filter, deduplicate and annotate MenuPage.csv
    MenuPage,
    /// Run all three passes in order
    All,
}

impl Commands {
    fn passes(&self) -> Vec<Pass> {
        match self {
            Commands::Menu => vec![Pass::Menu],
            Commands::MenuItem => vec![Pass::MenuItem],
            Commands::MenuPage => vec![Pass::MenuPage],
            Commands::All => Pass::ALL.to_vec(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(dir) = cli.input_dir {
        config.paths.input_dir = dir;
    }
    if let Some(dir) = cli.output_dir {
        config.paths.output_dir = dir;
    }

    let _guard = logging::init_logging(&config.logging);

    let recorder = match &config.metrics.file {
        Some(_) => Some(metrics::init()?),
        None => None,
    };

    let mut reports: Vec<PassReport> = Vec::new();
    for pass in cli.command.passes() {
        let report = pass.run(&config).map_err(|e| {
            error!(table = pass.table_name(), "Pass failed: {}", e);
            e
        })?;
        if !cli.json {
            print!("{}", report.summary());
        }
        reports.push(report);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    if let (Some(handle), Some(path)) = (recorder, &config.metrics.file) {
        metrics::dump(&handle, path)?;
    }

    info!(passes = reports.len(), "Cleaning finished");
    Ok(())
}
