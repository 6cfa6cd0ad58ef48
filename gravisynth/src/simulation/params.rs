//! Physical parameters for the gravity step
//!
//! `Parameters` holds runtime settings:
//! - gravitational constant `g`,
//! - the band `[min_distance_sq, max_distance_sq]` every squared separation
//!   is clamped into before dividing

use crate::configuration::config::PhysicsConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub g: f64, // gravitational constant
    pub min_distance_sq: f64, // lower clamp, keeps near-zero separations finite
    pub max_distance_sq: f64, // upper clamp, keeps far bodies pulling
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            g: 4.0,
            min_distance_sq: 100.0,
            max_distance_sq: 10_000.0,
        }
    }
}

impl From<&PhysicsConfig> for Parameters {
    fn from(cfg: &PhysicsConfig) -> Self {
        Self {
            g: cfg.gravity,
            min_distance_sq: cfg.min_distance_sq,
            max_distance_sq: cfg.max_distance_sq,
        }
    }
}
