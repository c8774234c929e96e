use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Knockoff sampler for discrete Markov chains.
#[derive(Parser)]
#[command(
    name = "knockoff",
    version,
    about = "Knockoff copies of discrete Markov chain sequences"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Sample one knockoff per input sequence.
    Sample(SampleArgs),
    /// Draw sequences from the chain model.
    Simulate(SimulateArgs),
}

/// Arguments for the `sample` subcommand.
#[derive(clap::Args)]
pub struct SampleArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "knockoff.toml")]
    pub config: PathBuf,

    /// Path to input sequences, one per line.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output path for knockoffs (stdout if omitted).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Arguments for the `simulate` subcommand.
#[derive(clap::Args)]
pub struct SimulateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "knockoff.toml")]
    pub config: PathBuf,

    /// Number of sequences to draw.
    #[arg(short = 'n', long)]
    pub count: usize,

    /// Output path for sequences (stdout if omitted).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}
