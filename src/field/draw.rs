// draw.rs - Per-frame drawing of the particle field
//
// Frame order:
//   1. clear
//   2. integrate + reflect each particle, then dot it
//   3. link every near pair, opacity fading linearly to 0 at the threshold

use super::ParticleField;

/// Drawing target bound to the full viewport.
pub trait Surface {
    fn clear(&mut self);
    fn dot(&mut self, x: f32, y: f32, radius: f32);
    fn link(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, opacity: f32);
}

/// 1.0 when touching, 0.0 at the threshold.
#[inline]
pub fn link_opacity(distance: f32, threshold: f32) -> f32 {
    if threshold <= 0.0 { return 0.0; }
    (1.0 - distance / threshold).clamp(0.0, 1.0)
}

impl ParticleField {
    /// Run one animation frame against `surface`.
    pub fn frame<S: Surface>(&mut self, surface: &mut S) {
        surface.clear();

        for i in 0..self.len() {
            self.step_one(i);
            surface.dot(self.x[i], self.y[i], self.radius[i]);
        }

        self.for_each_link(|i, j, opacity| {
            surface.link(self.x[i], self.y[i], self.x[j], self.y[j], opacity);
        });
    }
}
