//! Core state types for the orbiting-spheres toy.
//!
//! Defines the single body type and the collection that owns it:
//! - `Body`  one sphere: kinematics, orientation/spin and colour
//! - `Scene` the body collection, central body first
//!
//! There is one kind of body. The central one is told apart only by
//! `is_moving == false`, never by type.

use nalgebra::Vector3;
use rand::Rng;

pub type NVec3 = Vector3<f64>;

/// RGB colour with 0-255 channels.
///
/// Channels are `f64` because the central body's colour is written unclamped
/// by the colour mapper; the renderer clamps when it builds a material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255.0, 255.0, 255.0);
    pub const RED: Rgb = Rgb::new(255.0, 0.0, 0.0);
    pub const GREEN: Rgb = Rgb::new(0.0, 255.0, 0.0);
    pub const BLUE: Rgb = Rgb::new(0.0, 0.0, 255.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn channels(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Channels clamped into [0, 255] and scaled to [0, 1] for display
    pub fn to_unit(&self) -> [f32; 3] {
        self.channels().map(|c| (c.clamp(0.0, 255.0) / 255.0) as f32)
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub position: NVec3,
    pub velocity: NVec3,
    pub acceleration: NVec3,
    pub radius: f64,     // doubles as mass
    pub color: Rgb,
    pub is_moving: bool, // false only for the central body
    pub orientation: NVec3, // euler angles (x, y, z), unbounded
    pub spin: NVec3,     // constant per-frame angular velocity
}

impl Body {
    /// A body at rest with no orientation or spin
    pub fn new(position: NVec3, radius: f64, color: Rgb, is_moving: bool) -> Self {
        Self {
            position,
            velocity: NVec3::zeros(),
            acceleration: NVec3::zeros(),
            radius,
            color,
            is_moving,
            orientation: NVec3::zeros(),
            spin: NVec3::zeros(),
        }
    }

    /// Like [`Body::new`], with orientation uniform in [0, 2π) and spin
    /// uniform in [-spin_max, spin_max] per axis
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        position: NVec3,
        radius: f64,
        color: Rgb,
        is_moving: bool,
        spin_max: f64,
    ) -> Self {
        let tau = std::f64::consts::TAU;
        let orientation = NVec3::new(
            rng.gen_range(0.0..tau),
            rng.gen_range(0.0..tau),
            rng.gen_range(0.0..tau),
        );
        let spin = NVec3::new(
            rng.gen_range(-spin_max..=spin_max),
            rng.gen_range(-spin_max..=spin_max),
            rng.gen_range(-spin_max..=spin_max),
        );

        Self {
            orientation,
            spin,
            ..Self::new(position, radius, color, is_moving)
        }
    }

    /// Mass is always the radius; there is no separate field to drift apart
    pub fn mass(&self) -> f64 {
        self.radius
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (other.position - self.position).norm()
    }
}

/// The body collection: index 0 is the fixed central body once populated.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub bodies: Vec<Body>,
}

impl Scene {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies }
    }

    pub fn central(&self) -> Option<&Body> {
        self.bodies.first()
    }

    pub fn central_mut(&mut self) -> Option<&mut Body> {
        self.bodies.first_mut()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
