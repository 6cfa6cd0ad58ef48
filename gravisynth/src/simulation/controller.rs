//! Scene controller: owns the bodies and drives one frame at a time
//!
//! Two phases. `StartScreen` holds no bodies and waits for a single start
//! trigger; `Running` is terminal. Each running frame the front end calls,
//! in order: zoom/camera, [`SceneController::advance`] (gravity, integration,
//! central colour), its own rendering, then [`SceneController::modulators`].
//!
//! Inserted into Bevy as a `Resource` and read by the visualization systems.

use bevy::prelude::Resource;
use rand::Rng;

use crate::configuration::config::{CameraConfig, SceneConfig, ToyConfig};
use crate::mapping::audio::{AudioMapper, ModulatorSetting, MODULATOR_COUNT};
use crate::mapping::color::ColorMapper;
use crate::simulation::forces::{physics_step, AccelSet, ClampedGravity};
use crate::simulation::integrator::euler_step;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec3, Rgb, Scene};

/// Colours of the moving bodies, in creation order
pub const MOVING_COLORS: [Rgb; MODULATOR_COUNT] = [Rgb::RED, Rgb::GREEN, Rgb::BLUE];

/// Pointer travel in pixels before a press counts as a drag
pub const DRAG_THRESHOLD: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    StartScreen,
    Running,
}

/// Tracks whether the pointer is being dragged.
///
/// Nothing consumes `is_dragging`; the state is kept so a later camera mode
/// can pick it up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragTracker {
    origin: Option<(f64, f64)>,
    pub is_dragging: bool,
}

impl DragTracker {
    pub fn press(&mut self, x: f64, y: f64) {
        self.origin = Some((x, y));
        self.is_dragging = false;
    }

    /// Pointer moved with the button held
    pub fn drag_to(&mut self, x: f64, y: f64) {
        if let Some((ox, oy)) = self.origin {
            if (x - ox).hypot(y - oy) > DRAG_THRESHOLD {
                self.is_dragging = true;
            }
        }
    }

    pub fn release(&mut self) {
        self.origin = None;
        self.is_dragging = false;
    }
}

#[derive(Resource)]
pub struct SceneController {
    pub phase: Phase,
    pub scene: Scene,
    pub forces: AccelSet,
    pub colors: ColorMapper,
    pub audio: AudioMapper,
    pub zoom_level: f64,
    pub drag: DragTracker,
    camera: CameraConfig,
    spawn: SceneConfig,
}

impl SceneController {
    pub fn new(cfg: &ToyConfig) -> Self {
        let params = Parameters::from(&cfg.physics);

        Self {
            phase: Phase::StartScreen,
            scene: Scene::default(),
            forces: AccelSet::new().with(ClampedGravity { params }),
            colors: ColorMapper::from(&cfg.color),
            audio: AudioMapper::from_config(&cfg.synth, cfg.scene.radius_min, cfg.scene.radius_max),
            zoom_level: cfg.camera.zoom,
            drag: DragTracker::default(),
            camera: cfg.camera.clone(),
            spawn: cfg.scene.clone(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Handle the start trigger. Creates the central body and the three
    /// moving bodies, then switches to `Running`. Returns `false` (and does
    /// nothing) when already running.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.is_running() {
            return false;
        }
        self.scene = populate(&self.spawn, rng);
        self.phase = Phase::Running;
        true
    }

    /// Arrow-key zoom: in shrinks the orbit radius, out grows it.
    /// Both held cancel out. No bounds.
    pub fn apply_zoom(&mut self, zoom_in: bool, zoom_out: bool) {
        if zoom_in {
            self.zoom_level -= self.camera.zoom_step;
        }
        if zoom_out {
            self.zoom_level += self.camera.zoom_step;
        }
    }

    /// Camera position on the orbit sphere for a pointer position in pixels.
    /// The camera always looks at the origin.
    pub fn camera_position(&self, mouse_x: f64, mouse_y: f64) -> NVec3 {
        let s = self.camera.mouse_sensitivity;
        let z = self.zoom_level;
        NVec3::new(
            (mouse_x * s).sin() * z,
            -(mouse_y * s).sin() * z,
            (mouse_x * s).cos() * z,
        )
    }

    /// Camera position, or `None` while it sits on the origin it looks at
    pub fn orbit_eye(&self, mouse_x: f64, mouse_y: f64) -> Option<NVec3> {
        let eye = self.camera_position(mouse_x, mouse_y);
        (eye.norm_squared() >= f64::from(f32::EPSILON)).then_some(eye)
    }

    /// Gravity, integration and central colour for one frame
    pub fn advance(&mut self) {
        if !self.is_running() {
            return;
        }
        physics_step(&mut self.scene, &self.forces);
        euler_step(&mut self.scene);
        self.colors.apply(&mut self.scene);
    }

    /// Modulator settings for this frame, `None` before the bodies exist
    pub fn modulators(&self, half_height: f64) -> Option<[ModulatorSetting; MODULATOR_COUNT]> {
        self.audio.map(&self.scene, half_height)
    }
}

/// Central body at the origin plus one moving body per modulator, each
/// with position uniform in [-extent, extent] and radius in [radius_min, radius_max]
pub fn populate<R: Rng + ?Sized>(cfg: &SceneConfig, rng: &mut R) -> Scene {
    let mut bodies = Vec::with_capacity(MOVING_COLORS.len() + 1);
    bodies.push(Body::spawn(
        rng,
        NVec3::zeros(),
        cfg.central_radius,
        Rgb::WHITE,
        false,
        cfg.spin_max,
    ));

    let e = cfg.spawn_extent;
    for color in MOVING_COLORS {
        let radius = rng.gen_range(cfg.radius_min..cfg.radius_max);
        let position = NVec3::new(
            rng.gen_range(-e..e),
            rng.gen_range(-e..e),
            rng.gen_range(-e..e),
        );
        bodies.push(Body::spawn(rng, position, radius, color, true, cfg.spin_max));
    }

    Scene::new(bodies)
}
