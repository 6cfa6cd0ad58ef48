//! Configuration types for loading a scene from YAML.
//!
//! This module defines a thin, `serde`-deserializable description of the toy.
//! Every section falls back to the built-in constants, so `{}` is a valid
//! scene:
//!
//! - [`PhysicsConfig`] – gravitational constant and distance clamp
//! - [`SceneConfig`]   – body spawning ranges and optional seed
//! - [`CameraConfig`]  – orbit camera zoom and mouse sensitivity
//! - [`ColorConfig`]   – central body colour response
//! - [`SynthConfig`]   – FM patch and reverb
//! - [`WindowConfig`]  – window and start-screen font
//! - [`ToyConfig`]     – top-level wrapper
//!
//! # YAML format
//!
//! ```yaml
//! physics:
//!   gravity: 4.0
//!   min_distance_sq: 100.0
//!   max_distance_sq: 10000.0
//!
//! scene:
//!   central_radius: 50.0
//!   spawn_extent: 500.0     # each axis uniform in [-extent, extent]
//!   radius_min: 20.0
//!   radius_max: 50.0
//!   spin_max: 0.05
//!   seed: 42                # omit for a fresh layout every run
//!
//! synth:
//!   carrier_freq: 165.0
//!   reverb:
//!     enabled: true
//!     seconds: 6.0
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f64,         // gravitational constant
    pub min_distance_sq: f64, // lower clamp on squared separation
    pub max_distance_sq: f64, // upper clamp on squared separation
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 4.0,
            min_distance_sq: 100.0,
            max_distance_sq: 10_000.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub central_radius: f64,
    pub spawn_extent: f64,
    pub radius_min: f64,
    pub radius_max: f64,
    pub spin_max: f64,
    pub seed: Option<u64>, // deterministic layout when set
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            central_radius: 50.0,
            spawn_extent: 500.0,
            radius_min: 20.0,
            radius_max: 50.0,
            spin_max: 0.05,
            seed: None,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub zoom: f64,              // initial orbit radius
    pub zoom_step: f64,         // change per frame while an arrow key is held
    pub mouse_sensitivity: f64, // radians per pixel
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            zoom: 1500.0,
            zoom_step: 10.0,
            mouse_sensitivity: 0.01,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ColorConfig {
    pub influence_distance: f64, // distance at which influence reaches 0
    pub influence_max: f64,      // influence at distance 0
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            influence_distance: 500.0,
            influence_max: 255.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ReverbConfig {
    pub enabled: bool,
    pub seconds: f64, // time for the tail to fall 60 dB
    pub decay: f64,   // high-frequency damping in [0, 1)
    pub amp: f64,     // wet gain mixed over the dry signal
}

impl Default for ReverbConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            seconds: 6.0,
            decay: 0.2,
            amp: 0.75,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SynthConfig {
    pub enabled: bool,
    pub carrier_freq: f64,
    pub carrier_amp: f64,
    pub depth_min: f64,
    pub depth_max: f64,
    pub sample_rate: u32,
    pub reverb: ReverbConfig,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            carrier_freq: 165.0,
            carrier_amp: 0.0625,
            depth_min: -300.0,
            depth_max: 300.0,
            sample_rate: 44_100,
            reverb: ReverbConfig::default(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub font: Option<String>, // asset path, bevy's built-in font when unset
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "gravisynth".to_string(),
            width: 1280.0,
            height: 800.0,
            font: None,
        }
    }
}

/// Top-level configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct ToyConfig {
    pub physics: PhysicsConfig,
    pub scene: SceneConfig,
    pub camera: CameraConfig,
    pub color: ColorConfig,
    pub synth: SynthConfig,
    pub window: WindowConfig,
}

impl ToyConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let cfg: ToyConfig = serde_yaml::from_str(text).context("malformed scene yaml")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        let reader = BufReader::new(file);
        let cfg: ToyConfig = serde_yaml::from_reader(reader)
            .with_context(|| format!("malformed scene yaml in {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let p = &self.physics;
        ensure!(p.min_distance_sq > 0.0, "physics.min_distance_sq must be positive");
        ensure!(
            p.min_distance_sq <= p.max_distance_sq,
            "physics.min_distance_sq must not exceed max_distance_sq"
        );

        let s = &self.scene;
        ensure!(s.central_radius > 0.0, "scene.central_radius must be positive");
        ensure!(s.radius_min > 0.0, "scene.radius_min must be positive");
        ensure!(s.radius_min < s.radius_max, "scene.radius_min must be below radius_max");
        ensure!(s.spawn_extent > 0.0, "scene.spawn_extent must be positive");
        ensure!(s.spin_max >= 0.0, "scene.spin_max must not be negative");

        ensure!(self.color.influence_distance > 0.0, "color.influence_distance must be positive");

        let synth = &self.synth;
        ensure!(synth.sample_rate > 0, "synth.sample_rate must be positive");
        ensure!(
            (0.0..1.0).contains(&synth.reverb.decay),
            "synth.reverb.decay must be in [0, 1)"
        );
        ensure!(synth.reverb.seconds > 0.0, "synth.reverb.seconds must be positive");

        Ok(())
    }
}
