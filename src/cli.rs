use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Climate- and urbanization-adjusted Multidimensional Poverty Index.
#[derive(Parser)]
#[command(
    name = "cmpi",
    version,
    about = "Climate- and urbanization-adjusted Multidimensional Poverty Index"
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
    /// Compute standard and adjusted MPI and write a comparison report.
    Run(RunArgs),
    /// Export synthetic wards, households and climate as CSV files.
    Synth(SynthArgs),
    /// Print standard and adjusted weights for one context.
    Weights(WeightsArgs),
}

/// Arguments for the `run` subcommand.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "cmpi.toml")]
    pub config: PathBuf,

    /// Override the JSON report path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Use synthetic climate and survey data regardless of config.
    #[arg(long)]
    pub synthetic: bool,
}

/// Arguments for the `synth` subcommand.
#[derive(clap::Args)]
pub struct SynthArgs {
    /// Optional TOML configuration for generator settings.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output directory.
    #[arg(short, long, default_value = "data/samples")]
    pub output: PathBuf,

    /// Override the RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Arguments for the `weights` subcommand.
#[derive(clap::Args)]
pub struct WeightsArgs {
    /// Climate harshness in [0, 1]; out-of-range values are clamped.
    #[arg(long)]
    pub harshness: f64,

    /// Urbanization in [0, 1]; out-of-range values are clamped.
    #[arg(long)]
    pub urbanization: f64,

    /// Also adjust cooking fuel and housing.
    #[arg(long)]
    pub extended: bool,
}
