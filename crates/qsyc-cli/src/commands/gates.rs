//! Gates command implementation.

use console::style;

use qsyc_compile::NativeGateSet;
use qsyc_compile::dispatch::{SINGLE_QUBIT_SPECIAL_CASES, THREE_QUBIT_SPECIAL_CASES};

/// Execute the gates command.
pub fn execute() {
    println!("{}", style("Special cases (in match order):").bold());
    println!("  {:<14} identity on any number of qubits", style("identity").cyan());
    for gate in SINGLE_QUBIT_SPECIAL_CASES {
        println!("  {:<14} emitted as a single operation", style(gate).cyan());
    }
    for gate in THREE_QUBIT_SPECIAL_CASES {
        println!("  {:<14} converted by name, then optimized", style(gate).cyan());
    }
    println!();
    println!("{}", style("Native gate set (xmon, CZ-based):").bold());
    println!("  {}", NativeGateSet::xmon().gates().join(", "));
}
