//! Per-frame integration
//!
//! Explicit Euler, one step per rendered frame. There is no `dt`: the frame
//! is the time unit, so motion speed follows the display refresh rate.

use super::states::{Body, NVec3, Scene};

impl Body {
    /// Advance one frame. Fixed bodies ignore whatever acceleration they hold.
    pub fn update(&mut self) {
        if !self.is_moving {
            return;
        }

        // v_n+1 = v_n + a_n
        self.velocity += self.acceleration;
        // x_n+1 = x_n + v_n+1
        self.position += self.velocity;

        // acceleration is consumed exactly once per frame
        self.acceleration = NVec3::zeros();

        self.orientation += self.spin;
    }
}

/// Advance every body in the scene by one frame
pub fn euler_step(scene: &mut Scene) {
    for b in scene.bodies.iter_mut() {
        b.update();
    }
}
