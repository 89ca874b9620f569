//! Command-line argument parsing for Tessera.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Tessera command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(
    name = "tessera",
    about = "Subdivide a globe into edge-bounded sectors and check coverage"
)]
pub struct CliArgs {
    /// Latitude in degrees separating the lateral faces from the polar caps.
    #[arg(long)]
    pub cutoff: Option<f64>,

    /// Uniform refinement depth.
    #[arg(long)]
    pub depth: Option<u32>,

    /// Vertical exaggeration applied to terrain.
    #[arg(long)]
    pub exaggeration: Option<f64>,

    /// Number of random locations to test for coverage.
    #[arg(long)]
    pub samples: Option<u32>,

    /// Seed for the location generator.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the refined leaves as JSON to this file.
    #[arg(long)]
    pub dump: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(cutoff) = args.cutoff {
            self.tessellation.latitude_cutoff_deg = cutoff;
        }
        if let Some(depth) = args.depth {
            self.tessellation.depth = depth;
        }
        if let Some(exaggeration) = args.exaggeration {
            self.tessellation.exaggeration = exaggeration;
        }
        if let Some(samples) = args.samples {
            self.sampling.samples = samples;
        }
        if let Some(seed) = args.seed {
            self.sampling.seed = seed;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
