//! Terrain elevation models.

use noise::{NoiseFn, Simplex};
use tessera_math::Angle;

/// Source of terrain heights above the reference ellipsoid.
pub trait ElevationModel: Send + Sync {
    /// Elevation in meters at the given location.
    fn elevation(&self, latitude: Angle, longitude: Angle) -> f64;

    /// Nominal lower bound of [`Self::elevation`] over the whole globe.
    fn min_elevation(&self) -> f64;

    /// Nominal upper bound of [`Self::elevation`] over the whole globe.
    fn max_elevation(&self) -> f64;
}

/// The bare ellipsoid.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ZeroElevation;

impl ElevationModel for ZeroElevation {
    fn elevation(&self, _latitude: Angle, _longitude: Angle) -> f64 {
        0.0
    }

    fn min_elevation(&self) -> f64 {
        0.0
    }

    fn max_elevation(&self) -> f64 {
        0.0
    }
}

/// A uniform shell at a fixed height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantElevation {
    meters: f64,
}

impl ConstantElevation {
    /// Construct a constant elevation model.
    #[must_use]
    pub fn new(meters: f64) -> Self {
        Self { meters }
    }
}

impl ElevationModel for ConstantElevation {
    fn elevation(&self, _latitude: Angle, _longitude: Angle) -> f64 {
        self.meters
    }

    fn min_elevation(&self) -> f64 {
        self.meters
    }

    fn max_elevation(&self) -> f64 {
        self.meters
    }
}

/// Configuration for multi-octave fBm terrain.
#[derive(Clone, Debug, PartialEq)]
pub struct FractalParams {
    /// Seed for the simplex noise source.
    pub seed: u32,
    /// Number of noise octaves to composite. Typical range: 4–8.
    pub octaves: u32,
    /// Frequency multiplier between successive octaves. Default: 2.0.
    pub lacunarity: f64,
    /// Amplitude multiplier between successive octaves. Default: 0.5.
    pub persistence: f64,
    /// Frequency of the first octave, in cycles per unit of the direction
    /// vector. Default: 1.5 (a handful of continents).
    pub base_frequency: f64,
    /// Amplitude of the first octave in meters. Default: 4000.0.
    pub amplitude: f64,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 6,
            lacunarity: 2.0,
            persistence: 0.5,
            base_frequency: 1.5,
            amplitude: 4000.0,
        }
    }
}

/// Fractal Brownian motion over 3D simplex noise, sampled on the unit
/// direction of each location so the field is seamless across the
/// antimeridian and the poles.
pub struct FractalElevation {
    noise: Simplex,
    params: FractalParams,
    max_amplitude: f64,
}

impl FractalElevation {
    /// Create a new model with the given parameters.
    #[must_use]
    pub fn new(params: FractalParams) -> Self {
        let noise = Simplex::new(params.seed);
        let mut max_amplitude = 0.0;
        let mut amplitude = params.amplitude.abs();
        for _ in 0..params.octaves {
            max_amplitude += amplitude;
            amplitude *= params.persistence.abs();
        }
        Self {
            noise,
            params,
            max_amplitude,
        }
    }

    /// The parameters this model was built with.
    #[must_use]
    pub fn params(&self) -> &FractalParams {
        &self.params
    }
}

impl ElevationModel for FractalElevation {
    fn elevation(&self, latitude: Angle, longitude: Angle) -> f64 {
        let cos_lat = latitude.cos();
        let dir = [
            cos_lat * longitude.sin(),
            latitude.sin(),
            cos_lat * longitude.cos(),
        ];

        let mut total = 0.0;
        let mut frequency = self.params.base_frequency;
        let mut amplitude = self.params.amplitude;
        for _ in 0..self.params.octaves {
            let sample = self
                .noise
                .get([dir[0] * frequency, dir[1] * frequency, dir[2] * frequency]);
            total += sample * amplitude;
            frequency *= self.params.lacunarity;
            amplitude *= self.params.persistence;
        }
        total
    }

    fn min_elevation(&self) -> f64 {
        -self.max_amplitude
    }

    fn max_elevation(&self) -> f64 {
        self.max_amplitude
    }
}

impl std::fmt::Debug for FractalElevation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FractalElevation")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
