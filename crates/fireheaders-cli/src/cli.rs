//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;

/// Convert rules from a Netlify-style `_headers` file into the
/// `hosting.headers` array of `firebase.json`.
#[derive(Parser, Debug)]
#[command(name = "fireheaders")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the origin `_headers` file
    #[arg(long, default_value = "./_site/_headers")]
    pub headers: PathBuf,

    /// Path to the target `firebase.json` file
    #[arg(long, default_value = "./firebase.json")]
    pub firebase: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
