//! Compile command implementation.

use std::fs;

use anyhow::{Context, Result};
use console::style;
use tracing::info;

use qsyc_compile::{Decomposition, Outcome, UnitaryCompiler};
use qsyc_ir::GridQubit;

use super::common::{Overrides, load_config, load_matrix};

/// Execute the compile command.
pub fn execute(
    matrix_path: &str,
    qubits: &[GridQubit],
    config_path: Option<&str>,
    overrides: &Overrides,
    output: Option<&str>,
) -> Result<()> {
    println!(
        "{} Compiling {} on {} qubit(s)",
        style("→").cyan().bold(),
        style(matrix_path).green(),
        qubits.len()
    );

    let matrix = load_matrix(matrix_path)?;
    let config = overrides.apply(load_config(config_path)?)?;
    info!(
        "Match policy {:?}, optimization level {}",
        config.match_policy, config.optimization_level
    );

    let compiler = UnitaryCompiler::from_config(&config)?;
    let decomposition = compiler.compile(qubits, &matrix)?;
    print_decomposition(&decomposition);

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&decomposition)
            .context("Failed to serialize decomposition")?;
        fs::write(path, json).with_context(|| format!("Failed to write file: {path}"))?;
        println!("  Output: {}", style(path).green());
    }

    Ok(())
}

fn print_decomposition(decomposition: &Decomposition) {
    println!("  Strategy: {}", style(decomposition.strategy).yellow());
    match &decomposition.outcome {
        Outcome::Implemented { operations } => {
            let two_qubit = operations.iter().filter(|op| op.num_qubits() > 1).count();
            println!(
                "{} {} operations ({} two-qubit)",
                style("✓").green().bold(),
                operations.len(),
                two_qubit
            );
            for op in operations {
                println!("  {op}");
            }
        }
        Outcome::NotImplemented { reason } => {
            println!("{} Not implemented: {}", style("✗").red().bold(), reason);
        }
    }
}
