//! Force / acceleration contributors for the scene
//!
//! Defines the acceleration trait seam and the one term the toy uses:
//! pairwise gravity with the squared distance clamped into a fixed band

use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec3, Scene};

/// Collection of acceleration terms
/// Each term implements [`Acceleration`] and adds its contribution into
/// every body's `acceleration`; nothing here resets it (integration does)
#[derive(Default)]
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Run every term once over the scene
    pub fn accumulate_accels(&self, scene: &mut Scene) {
        for term in &self.terms {
            term.accelerate(&mut scene.bodies);
        }
    }
}

/// Trait for acceleration sources operating on the body collection
pub trait Acceleration {
    fn accelerate(&self, bodies: &mut [Body]);
}

impl Body {
    /// Force on `self` from `other`: along the line toward `other`, with
    /// magnitude `g * m1 * m2 / clamp(d², min, max)`
    pub fn gravity_force(&self, other: &Body, params: &Parameters) -> NVec3 {
        let r = other.position - self.position;

        // clamp keeps d² = 0 finite and lets distant bodies still pull
        let d2 = r
            .norm_squared()
            .clamp(params.min_distance_sq, params.max_distance_sq);
        let strength = params.g * self.mass() * other.mass() / d2;

        // coincident bodies have no direction, so no force
        match r.try_normalize(0.0) {
            Some(dir) => dir * strength,
            None => NVec3::zeros(),
        }
    }

    /// Add `force / mass` toward `other` into this body's acceleration
    pub fn apply_gravity(&mut self, other: &Body, params: &Parameters) {
        let force = self.gravity_force(other, params);
        self.acceleration += force / self.mass();
    }
}

/// Direct pairwise gravity with clamped squared distance
pub struct ClampedGravity {
    pub params: Parameters,
}

impl Acceleration for ClampedGravity {
    fn accelerate(&self, bodies: &mut [Body]) {
        let n = bodies.len();

        // Loop over each unordered pair (i, j) with i < j
        for j in 1..n {
            // head holds every i < j, tail[0] is body j
            let (head, tail) = bodies.split_at_mut(j);
            let bj = &mut tail[0];

            for bi in head.iter_mut() {
                // two fixed bodies never move, skip them
                if !bi.is_moving && !bj.is_moving {
                    continue;
                }
                bi.apply_gravity(bj, &self.params);
                bj.apply_gravity(bi, &self.params);
            }
        }
    }
}

/// One physics step: every term adds into the bodies' accelerations
pub fn physics_step(scene: &mut Scene, forces: &AccelSet) {
    forces.accumulate_accels(scene);
}
