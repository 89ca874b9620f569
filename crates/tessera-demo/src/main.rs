//! Command-line driver that builds the cube-mapped sector tessellation of a
//! globe, checks it, and optionally dumps the leaves as JSON.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p tessera-demo -- --depth 4 --samples 5000`.

mod globe_setup;
mod tessellation_demos;

use clap::Parser;
use tessera_config::{CliArgs, Config};
use tessera_globe::GlobeError;
use tessera_math::Angle;
use tracing::{error, info};

use crate::tessellation_demos::DemoError;

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Globe(#[from] GlobeError),

    #[error(transparent)]
    Demo(#[from] DemoError),
}

impl From<tessera_ebs::EbsError> for RunError {
    fn from(err: tessera_ebs::EbsError) -> Self {
        RunError::Demo(DemoError::from(err))
    }
}

fn main() {
    let args = CliArgs::parse();

    let config_dir = match args.config.clone() {
        Some(dir) => dir,
        None => match Config::default_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        },
    };

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);
    if let Err(e) = config.validate() {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let log_dir = config_dir.join("logs");
    tessera_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    if let Err(e) = run(&config, &args) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(config: &Config, args: &CliArgs) -> Result<(), RunError> {
    let globe = globe_setup::build_globe(&config.globe)?;
    let cutoff = Angle::from_degrees(config.tessellation.latitude_cutoff_deg);
    let exaggeration = config.tessellation.exaggeration;

    tessellation_demos::demonstrate_cube_mapping(cutoff)?;

    let tess = tessellation_demos::build_tessellation(&globe, cutoff, config.tessellation.depth)?;
    tessellation_demos::verify_structure(&tess);
    tessellation_demos::sample_coverage(
        &tess,
        &globe,
        config.sampling.samples,
        config.sampling.seed,
    );
    tessellation_demos::summarize_terrain(&tess, &globe, exaggeration);

    if let Some(path) = &args.dump {
        tessellation_demos::dump_leaves(&tess, &globe, exaggeration, path)?;
    }

    info!("Done");
    Ok(())
}
