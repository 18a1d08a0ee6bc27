//! staffdb - worker registry CLI.

use std::process;

fn main() {
    // Logs go to stderr so stdout carries only command output.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = staffdb::cli::run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
