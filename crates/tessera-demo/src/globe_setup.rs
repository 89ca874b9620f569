//! Builds the globe described by the config.

use tessera_config::{ElevationConfig, GlobeConfig};
use tessera_globe::{
    ConstantElevation, ElevationModel, EllipsoidalGlobe, FractalElevation, FractalParams,
    GlobeError, ZeroElevation,
};

/// The terrain model selected by `config`.
pub(crate) fn elevation_model(config: &ElevationConfig) -> Box<dyn ElevationModel> {
    match *config {
        ElevationConfig::Zero => Box::new(ZeroElevation),
        ElevationConfig::Constant { meters } => Box::new(ConstantElevation::new(meters)),
        ElevationConfig::Fractal {
            seed,
            octaves,
            lacunarity,
            persistence,
            base_frequency,
            amplitude_m,
        } => Box::new(FractalElevation::new(FractalParams {
            seed,
            octaves,
            lacunarity,
            persistence,
            base_frequency,
            amplitude: amplitude_m,
        })),
    }
}

/// Construct the ellipsoid and attach its terrain.
pub(crate) fn build_globe(config: &GlobeConfig) -> Result<EllipsoidalGlobe, GlobeError> {
    let globe = EllipsoidalGlobe::new(
        config.equatorial_radius_m,
        config.polar_radius_m,
        elevation_model(&config.elevation),
    )?;
    tracing::info!(
        equatorial_m = config.equatorial_radius_m,
        polar_m = config.polar_radius_m,
        terrain = ?config.elevation,
        "Globe ready"
    );
    Ok(globe)
}
