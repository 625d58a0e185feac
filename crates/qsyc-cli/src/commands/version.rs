//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - unitary compilation for Sycamore-style processors",
        style("qsyc").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qsyc-ir       Grid qubits, gates, unitaries and circuits");
    println!("  qsyc-compile  Unitary dispatch, conversion and optimization");
    println!("  qsyc-cli      Command-line interface");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}
