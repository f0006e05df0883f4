//! headers-for-firebase CLI
//!
//! Converts rules from a Netlify-style `_headers` file and keeps them
//! inside the marked region of `firebase.json`'s `hosting.headers` array.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::Cli;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    let inserted = commands::run_convert(&cli.headers, &cli.firebase)?;
    println!(
        "{} added {} targets from \"{}\" to \"{}\".",
        "Successfully".green().bold(),
        inserted,
        cli.headers.display(),
        cli.firebase.display()
    );
    Ok(())
}
