//! Modulator settings for the FM patch from the moving bodies.
//!
//! Body 1 drives modulator 1, body 2 modulator 2, body 3 modulator 3. The
//! body's height across the viewport picks the modulator frequency inside a
//! per-modulator band; its radius picks the modulation depth.

use crate::configuration::config::SynthConfig;
use crate::mapping::map_range;
use crate::simulation::states::Scene;

pub const MODULATOR_COUNT: usize = 3;

/// Frequency band of one modulator as multiples of the carrier frequency.
///
/// The second band is `[1/1.5, 1/2.5]`, i.e. it runs downward as the body
/// rises. This is inherited behaviour and kept on purpose.
pub const MODULATOR_BANDS: [(f64, f64); MODULATOR_COUNT] = [
    (1.5, 2.5),
    (1.0 / 1.5, 1.0 / 2.5),
    (2.5, 3.5),
];

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModulatorSetting {
    pub freq: f64,  // Hz
    pub depth: f64, // Hz of carrier deviation, may be negative
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioMapper {
    pub carrier_freq: f64,
    pub radius_min: f64,
    pub radius_max: f64,
    pub depth_min: f64,
    pub depth_max: f64,
}

impl Default for AudioMapper {
    fn default() -> Self {
        Self {
            carrier_freq: 165.0,
            radius_min: 20.0,
            radius_max: 50.0,
            depth_min: -300.0,
            depth_max: 300.0,
        }
    }
}

impl AudioMapper {
    pub fn from_config(synth: &SynthConfig, radius_min: f64, radius_max: f64) -> Self {
        Self {
            carrier_freq: synth.carrier_freq,
            radius_min,
            radius_max,
            depth_min: synth.depth_min,
            depth_max: synth.depth_max,
        }
    }

    /// Frequency inside `band` for a body at height `y`
    fn frequency(&self, band: (f64, f64), y: f64, half_height: f64) -> f64 {
        let (lo, hi) = band;
        map_range(
            y,
            -half_height,
            half_height,
            self.carrier_freq * lo,
            self.carrier_freq * hi,
        )
    }

    pub fn depth(&self, radius: f64) -> f64 {
        map_range(radius, self.radius_min, self.radius_max, self.depth_min, self.depth_max)
    }

    /// Settings for all three modulators, or `None` until the scene holds
    /// the central body plus three moving ones. A viewport with no height
    /// has no bands to map into and also gives `None`.
    pub fn map(&self, scene: &Scene, half_height: f64) -> Option<[ModulatorSetting; MODULATOR_COUNT]> {
        if scene.len() < MODULATOR_COUNT + 1 || !(half_height > 0.0 && half_height.is_finite()) {
            return None;
        }

        let mut out = [ModulatorSetting::default(); MODULATOR_COUNT];
        for ((setting, body), band) in out.iter_mut().zip(&scene.bodies[1..]).zip(MODULATOR_BANDS) {
            *setting = ModulatorSetting {
                freq: self.frequency(band, body.position.y, half_height),
                depth: self.depth(body.radius),
            };
        }
        Some(out)
    }
}
