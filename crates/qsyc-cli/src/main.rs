//! qsyc Command-Line Interface
//!
//! Compiles unitary matrices on grid qubits into Sycamore-native
//! operations.
//!
//! ```text
//! qsyc compile --matrix toffoli.json --qubits 0,0 0,1 1,1
//! qsyc compile -m u.json -q 0,0 0,1 --grid 2x2 -O 1 --output out.json
//! qsyc gates
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use qsyc_ir::GridQubit;

mod commands;

use commands::common::Overrides;
use commands::{compile, gates, version};

/// qsyc - unitary compilation for Sycamore-style processors
#[derive(Parser)]
#[command(name = "qsyc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a unitary matrix into native operations
    Compile {
        /// Matrix file (JSON array of rows, entries as [re, im])
        #[arg(short, long)]
        matrix: String,

        /// Target qubits as row,col, most significant first
        #[arg(short, long, num_args = 1.., required = true, allow_hyphen_values = true)]
        qubits: Vec<GridQubit>,

        /// Configuration file (YAML)
        #[arg(short, long)]
        config: Option<String>,

        /// Match special cases by exact equality
        #[arg(long, conflicts_with = "atol")]
        exact: bool,

        /// Tolerance for special-case matching
        #[arg(long)]
        atol: Option<f64>,

        /// Optimization level (0-2)
        #[arg(short = 'O', long)]
        optimization_level: Option<u8>,

        /// Restrict to a rectangular device, e.g. 3x3
        #[arg(long)]
        grid: Option<String>,

        /// Write the decomposition as JSON
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List special-case gates and the native gate set
    Gates,

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Compile {
            matrix,
            qubits,
            config,
            exact,
            atol,
            optimization_level,
            grid,
            output,
        } => {
            let overrides = Overrides {
                exact,
                atol,
                optimization_level,
                grid,
            };
            compile::execute(
                &matrix,
                &qubits,
                config.as_deref(),
                &overrides,
                output.as_deref(),
            )
        }

        Commands::Gates => {
            gates::execute();
            Ok(())
        }

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
