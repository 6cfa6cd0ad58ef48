//! Colour of the central body from how close the coloured bodies are.
//!
//! Each moving body contributes an influence that falls linearly from
//! `influence_max` at distance 0 to 0 at `influence_distance`, into every
//! channel it saturates (exactly 255). Past `influence_distance` the
//! influence goes negative; nothing here clamps it.

use crate::configuration::config::ColorConfig;
use crate::mapping::map_range;
use crate::simulation::states::{Body, Rgb, Scene};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMapper {
    pub influence_distance: f64,
    pub influence_max: f64,
}

impl Default for ColorMapper {
    fn default() -> Self {
        Self {
            influence_distance: 500.0,
            influence_max: 255.0,
        }
    }
}

impl From<&ColorConfig> for ColorMapper {
    fn from(cfg: &ColorConfig) -> Self {
        Self {
            influence_distance: cfg.influence_distance,
            influence_max: cfg.influence_max,
        }
    }
}

impl ColorMapper {
    pub fn influence(&self, distance: f64) -> f64 {
        map_range(distance, 0.0, self.influence_distance, self.influence_max, 0.0)
    }

    /// Colour the central body would take given the other bodies
    pub fn central_color(&self, central: &Body, others: &[Body]) -> Rgb {
        let mut acc = [0.0; 3];

        for body in others.iter().filter(|b| b.is_moving) {
            let influence = self.influence(central.distance_to(body));
            for (total, channel) in acc.iter_mut().zip(body.color.channels()) {
                if channel == 255.0 {
                    *total += influence;
                }
            }
        }

        Rgb::new(acc[0], acc[1], acc[2])
    }

    /// Write the mapped colour onto body 0. Empty scenes are left alone.
    pub fn apply(&self, scene: &mut Scene) {
        let Some(central) = scene.central() else {
            return;
        };
        let color = self.central_color(central, &scene.bodies[1..]);
        if let Some(central) = scene.central_mut() {
            central.color = color;
        }
    }
}
