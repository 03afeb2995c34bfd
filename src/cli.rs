use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use laureate_dashboard::config::{DashboardConfig, LoadedConfig, load_config, load_config_from};
use laureate_dashboard::dashboard::logic::{Dataset, ViewBundle, load_dataset};
use laureate_dashboard::dashboard::{ReactiveController, SelectionEvent, serve_lines};
use laureate_dashboard::export::{ExportFormat, export_bundle};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "laureate-dashboard",
    about = "Category-scoped views over Nobel laureate records"
)]
pub struct Cli {
    /// Path to a JSON config file. Defaults to the platform config location.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Laureate CSV to load, overriding the configured path
    #[arg(long, global = true, env = "LAUREATE_DATA")]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the award categories and how many records each has
    Categories,
    /// Print the six views for a category as JSON
    Views {
        /// Award category label, e.g. "Physiology or Medicine". Defaults to the configured category.
        category: Option<String>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Write the six views for a category to a directory
    Export {
        /// Award category label. Defaults to the configured category.
        category: Option<String>,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
    },
    /// Read one selection per stdin line and emit one JSON bundle per line
    Listen {
        /// Skip the initial emission for the default category
        #[arg(long)]
        no_initial: bool,
    },
}

/// Resolves config: explicit file (must load), else platform file, then CLI overrides.
pub fn resolve_config(cli: &Cli) -> Result<LoadedConfig> {
    let mut loaded = match &cli.config {
        Some(path) => LoadedConfig {
            config: load_config_from(path)?,
            fallback: None,
        },
        None => load_config(),
    };
    if let Some(data) = &cli.data {
        loaded.config.data_path.clone_from(data);
    }
    Ok(loaded)
}

pub fn run_command(command: Commands, config: &DashboardConfig) -> Result<()> {
    let dataset = load_dataset(&config.data_path, config.load_options())?;

    match command {
        Commands::Categories => handle_categories(&dataset),
        Commands::Views { category, pretty } => {
            let bundle = compute_once(dataset, config, category)?;
            let json = if pretty {
                serde_json::to_string_pretty(&*bundle)?
            } else {
                serde_json::to_string(&*bundle)?
            };
            println!("{json}");
            Ok(())
        }
        Commands::Export {
            category,
            output,
            format,
        } => {
            let bundle = compute_once(dataset, config, category)?;
            for path in export_bundle(&bundle, &output, format)? {
                println!("{}", path.display());
            }
            Ok(())
        }
        Commands::Listen { no_initial } => handle_listen(dataset, config, no_initial),
    }
}

fn handle_categories(dataset: &Dataset) -> Result<()> {
    for (category, count) in dataset.category_counts() {
        println!("{category}\t{count}");
    }
    Ok(())
}

fn compute_once(
    dataset: Dataset,
    config: &DashboardConfig,
    category: Option<String>,
) -> Result<Arc<ViewBundle>> {
    let selection = category.unwrap_or_else(|| config.default_category.label().to_owned());
    let mut controller = ReactiveController::new(dataset, config.aggregation_options());
    controller
        .handle(&SelectionEvent::selected(selection))?
        .context("No category selected")
}

fn handle_listen(dataset: Dataset, config: &DashboardConfig, no_initial: bool) -> Result<()> {
    let controller = ReactiveController::new(dataset, config.aggregation_options());
    let initial = (!no_initial).then_some(config.default_category);
    let input = std::io::BufReader::new(std::io::stdin());

    let stats = serve_lines(controller, input, std::io::stdout(), initial)?;
    tracing::info!(?stats, "Listen finished");
    Ok(())
}
