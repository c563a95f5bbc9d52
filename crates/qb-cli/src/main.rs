//! CLI frontend for Questbook adventures.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "qb",
    about = "Play and check branching text adventures",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a story interactively
    Play {
        /// Story ID to play (file stem of the story JSON)
        #[arg(short, long, default_value = "demo")]
        story: String,

        /// RNG seed for deterministic dice
        #[arg(long)]
        seed: Option<u64>,

        /// Directory containing story JSON files
        #[arg(short, long, default_value = "stories")]
        dir: PathBuf,
    },

    /// List stories in a directory
    List {
        /// Directory containing story JSON files
        #[arg(short, long, default_value = "stories")]
        dir: PathBuf,
    },

    /// Validate story files and report issues
    Check {
        /// Directory containing story JSON files
        #[arg(short, long, default_value = "stories")]
        dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play { story, seed, dir } => commands::play::run(&dir, &story, seed),
        Commands::List { dir } => commands::list::run(&dir),
        Commands::Check { dir } => commands::check::run(&dir),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
