pub mod simulation;
pub mod mapping;
pub mod audio;
pub mod configuration;
pub mod visualization;

pub use simulation::states::{Body, NVec3, Rgb, Scene};
pub use simulation::params::Parameters;
pub use simulation::forces::{physics_step, AccelSet, Acceleration, ClampedGravity};
pub use simulation::integrator::euler_step;
pub use simulation::controller::{populate, DragTracker, Phase, SceneController};

pub use mapping::map_range;
pub use mapping::color::ColorMapper;
pub use mapping::audio::{AudioMapper, ModulatorSetting};

pub use audio::synth::{FmDecoder, FmPatch, PatchControl, Reverb};

pub use configuration::config::ToyConfig;

pub use visualization::vis3d::run_3d;
