//! fleetbom: engine product-tree maintenance toolkit
//!
//! Tracks the as-built parts hierarchy of each engine in a fleet, rebuilds
//! it from operator-supplied build reports, and reconciles part swaps
//! against the warehouse ledger.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use fleetbom::cli::{self, exit_codes, OutputFormat};
use fleetbom::config::load_or_default;
use fleetbom::import::ImportMode;
use fleetbom::model::SwapType;
use fleetbom::swap::SwapRequest;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fleetbom")]
#[command(version)]
#[command(about = "Engine product-tree maintenance toolkit", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success (diff/alerts: nothing to report)
    1  Changes detected / alerts present
    3  Error occurred

EXAMPLES:
    # Create an engine and import its build report
    fleetbom engine add ESN-0001
    fleetbom import 1 build-report.csv --by jdoe

    # Preview what a re-import would change
    fleetbom diff 1 build-report-v2.csv

    # Exchange an installed part for a warehouse item
    fleetbom swap 1 --remove 12 --install 3 --by jdoe

    # Rank parts approaching their life limit
    fleetbom alerts --threshold 50")]
struct Cli {
    /// Path to a config file (default: discover .fleetbom.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path of the fleet snapshot file (overrides config)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage engines
    Engine {
        #[command(subcommand)]
        command: EngineCommands,
    },

    /// Manage the warehouse inventory ledger
    Inventory {
        #[command(subcommand)]
        command: InventoryCommands,
    },

    /// Rebuild an engine's tree from a build report (replaces the tree)
    Import {
        /// Engine id
        engine_id: u64,
        /// Build report CSV file
        report: PathBuf,
        /// Duplicate-serial handling: skip (warn and continue) or strict
        #[arg(long)]
        mode: Option<ImportMode>,
        /// Operator recorded in the audit trail
        #[arg(long = "by", default_value = "unknown")]
        performed_by: String,
        /// Parse and diff only; persist nothing
        #[arg(long)]
        dry_run: bool,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
        output: OutputFormat,
    },

    /// Compare an engine's tree against a build report without persisting
    Diff {
        /// Engine id
        engine_id: u64,
        /// Build report CSV file
        report: PathBuf,
        /// Duplicate-serial handling: skip (warn and continue) or strict
        #[arg(long)]
        mode: Option<ImportMode>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
        output: OutputFormat,
    },

    /// Exchange an installed component for a warehouse item
    Swap {
        /// Engine id
        engine_id: u64,
        /// Tree node id to remove (see `fleetbom view`)
        #[arg(long)]
        remove: u64,
        /// Inventory item id to install
        #[arg(long)]
        install: u64,
        /// Swap a whole assembly subtree instead of a single part
        #[arg(long)]
        assembly: bool,
        /// Tag shared by the swaps of one assembly-level operation
        #[arg(long)]
        group: Option<String>,
        /// Operator recorded in the audit trail
        #[arg(long = "by", default_value = "unknown")]
        performed_by: String,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
        output: OutputFormat,
    },

    /// Rank components approaching or past their life limit
    Alerts {
        /// Restrict to one engine
        #[arg(long)]
        engine: Option<u64>,
        /// Alert threshold in hours remaining (overrides config)
        #[arg(long)]
        threshold: Option<f64>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
        output: OutputFormat,
    },

    /// Print one engine's product tree with node ids
    View {
        /// Engine id
        engine_id: u64,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
        output: OutputFormat,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum EngineCommands {
    /// Create a new engine with an empty tree
    Add { name: String },
    /// List all engines
    List {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
        output: OutputFormat,
    },
}

#[derive(Subcommand)]
enum InventoryCommands {
    /// Add a warehouse item
    Add {
        description: String,
        #[arg(long = "pn")]
        part_number: String,
        #[arg(long = "sn")]
        serial_number: String,
        #[arg(long, default_value = "Receiving")]
        location: String,
        /// Life limit in hours (0 = not tracked)
        #[arg(long, default_value_t = 0.0)]
        life_limit: f64,
    },
    /// List the inventory ledger
    List {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
        output: OutputFormat,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let (mut config, loaded_from) = load_or_default(cli.config.as_deref())?;
    if let Some(path) = loaded_from {
        tracing::debug!(path = %path.display(), "using config file");
    }
    if let Some(store) = cli.store {
        config.store.path = store;
    }

    let exit_code = match cli.command {
        Commands::Engine { command } => match command {
            EngineCommands::Add { name } => cli::run_engine_add(&config, &name)?,
            EngineCommands::List { output } => cli::run_engine_list(&config, output)?,
        },
        Commands::Inventory { command } => match command {
            InventoryCommands::Add {
                description,
                part_number,
                serial_number,
                location,
                life_limit,
            } => cli::run_inventory_add(
                &config,
                &description,
                &part_number,
                &serial_number,
                &location,
                life_limit,
            )?,
            InventoryCommands::List { output } => cli::run_inventory_list(&config, output)?,
        },
        Commands::Import {
            engine_id,
            report,
            mode,
            performed_by,
            dry_run,
            output,
        } => cli::run_import(
            &config,
            engine_id,
            &report,
            mode,
            &performed_by,
            dry_run,
            output,
        )?,
        Commands::Diff {
            engine_id,
            report,
            mode,
            output,
        } => cli::run_diff(&config, engine_id, &report, mode, output)?,
        Commands::Swap {
            engine_id,
            remove,
            install,
            assembly,
            group,
            performed_by,
            output,
        } => {
            let request = SwapRequest {
                engine_id,
                remove_id: remove,
                install_id: install,
                swap_type: if assembly {
                    SwapType::Assembly
                } else {
                    SwapType::Component
                },
                assembly_group: group,
                performed_by,
            };
            cli::run_swap(&config, &request, output)?
        }
        Commands::Alerts {
            engine,
            threshold,
            output,
        } => cli::run_alerts(&config, engine, threshold, output)?,
        Commands::View { engine_id, output } => cli::run_view(&config, engine_id, output)?,
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "fleetbom", &mut io::stdout());
            exit_codes::SUCCESS
        }
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}
