// field/ - Particle background
//
// Structure-of-Arrays particle set. Created whole, integrated in place,
// never grown or shrunk. Drawing lives in draw.rs.

mod draw;

pub use draw::{link_opacity, Surface};

use crate::config::FieldConfig;

pub struct ParticleField {
    // Bounds
    w: f32,
    h: f32,

    // Position
    pub x: Vec<f32>,
    pub y: Vec<f32>,

    // Velocity (constant magnitude, sign mirrors on contact)
    pub vx: Vec<f32>,
    pub vy: Vec<f32>,

    pub radius: Vec<f32>,

    link_distance: f32,
}

impl ParticleField {
    /// Scatter `cfg.count` particles uniformly over a `w` x `h` viewport.
    pub fn new(cfg: &FieldConfig, w: f32, h: f32, rng: &mut u32) -> Self {
        let n = cfg.count;
        let mut field = Self {
            w,
            h,
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
            vx: Vec::with_capacity(n),
            vy: Vec::with_capacity(n),
            radius: Vec::with_capacity(n),
            link_distance: cfg.link_distance,
        };

        let span = cfg.max_radius - cfg.min_radius;
        for _ in 0..n {
            field.x.push(rand(rng) * w);
            field.y.push(rand(rng) * h);
            field.vx.push((rand(rng) - 0.5) * 2.0 * cfg.max_speed);
            field.vy.push((rand(rng) - 0.5) * 2.0 * cfg.max_speed);
            field.radius.push(cfg.min_radius + rand(rng) * span);
        }
        field
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn width(&self) -> f32 { self.w }
    pub fn height(&self) -> f32 { self.h }
    pub fn link_distance(&self) -> f32 { self.link_distance }

    /// New bounds only. Particles left outside are walked back in by
    /// their own reflection on the following frames.
    pub fn resize(&mut self, w: f32, h: f32) {
        self.w = w;
        self.h = h;
    }

    /// Advance particle `i` one frame and reflect it off the bounds.
    #[inline]
    pub fn step_one(&mut self, i: usize) {
        let (x, vx) = reflect(self.x[i] + self.vx[i], self.vx[i], self.w);
        let (y, vy) = reflect(self.y[i] + self.vy[i], self.vy[i], self.h);
        self.x[i] = x;
        self.y[i] = y;
        self.vx[i] = vx;
        self.vy[i] = vy;
    }

    /// Advance every particle one frame.
    pub fn step(&mut self) {
        for i in 0..self.len() {
            self.step_one(i);
        }
    }

    /// Visit every unordered pair closer than the connection threshold.
    /// Callback receives (i, j, opacity) with i < j. No allocation.
    pub fn for_each_link(&self, mut f: impl FnMut(usize, usize, f32)) {
        let n = self.len();
        let max = self.link_distance;
        let max_sq = max * max;

        for i in 0..n {
            let (xi, yi) = (self.x[i], self.y[i]);
            for j in (i + 1)..n {
                let dx = xi - self.x[j];
                let dy = yi - self.y[j];
                let dist_sq = dx * dx + dy * dy;
                if dist_sq < max_sq {
                    f(i, j, link_opacity(dist_sq.sqrt(), max));
                }
            }
        }
    }
}

/// Mirror the velocity when the position has left [0, limit] moving
/// outward, then clamp the position back inside.
#[inline(always)]
fn reflect(pos: f32, vel: f32, limit: f32) -> (f32, f32) {
    let out_low = pos < 0.0 && vel < 0.0;
    let out_high = pos > limit && vel > 0.0;
    if out_low || out_high {
        (pos.clamp(0.0, limit.max(0.0)), -vel)
    } else {
        (pos, vel)
    }
}

// Random number generator (xorshift32), uniform in [0, 1)
#[inline(always)]
pub fn rand(rng: &mut u32) -> f32 {
    *rng ^= *rng << 13;
    *rng ^= *rng >> 17;
    *rng ^= *rng << 5;
    (*rng >> 8) as f32 * (1.0 / 16777216.0)
}

/// xorshift32 must never hold zero.
pub fn seed(raw: u32) -> u32 {
    if raw == 0 { 0xDEADBEEF } else { raw }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(count: usize, w: f32, h: f32) -> ParticleField {
        let cfg = FieldConfig { count, ..FieldConfig::default() };
        let mut rng = seed(42);
        ParticleField::new(&cfg, w, h, &mut rng)
    }

    #[test]
    fn creation_respects_config_ranges() {
        let f = field(300, 800.0, 600.0);
        assert_eq!(f.len(), 300);
        for i in 0..f.len() {
            assert!((0.0..800.0).contains(&f.x[i]));
            assert!((0.0..600.0).contains(&f.y[i]));
            assert!(f.vx[i].abs() <= 0.25 && f.vy[i].abs() <= 0.25);
            assert!((1.0..3.0).contains(&f.radius[i]));
        }
    }

    #[test]
    fn positions_stay_in_bounds_over_many_frames() {
        let mut f = field(200, 120.0, 80.0);
        for _ in 0..5000 {
            f.step();
            for i in 0..f.len() {
                assert!(f.x[i] >= 0.0 && f.x[i] <= 120.0, "x out of bounds: {}", f.x[i]);
                assert!(f.y[i] >= 0.0 && f.y[i] <= 80.0, "y out of bounds: {}", f.y[i]);
            }
        }
    }

    #[test]
    fn reflection_flips_sign_once_and_keeps_magnitude() {
        let mut f = field(1, 10.0, 10.0);
        f.x[0] = 9.9;
        f.y[0] = 5.0;
        f.vx[0] = 0.25;
        f.vy[0] = 0.0;

        f.step();
        assert_eq!(f.vx[0], -0.25);
        assert!(f.x[0] <= 10.0);

        // Moving back inward: no second flip
        f.step();
        assert_eq!(f.vx[0], -0.25);

        f.x[0] = 0.1;
        f.step();
        assert_eq!(f.vx[0], 0.25);
        assert!(f.x[0] >= 0.0);
    }

    #[test]
    fn resize_keeps_particles_and_walks_them_back() {
        let mut f = field(1, 100.0, 100.0);
        f.x[0] = 90.0;
        f.y[0] = 50.0;
        f.vx[0] = -0.25;
        f.vy[0] = 0.0;
        f.resize(50.0, 100.0);
        assert_eq!(f.len(), 1);

        // Outside the new bounds but already heading inward: no flip
        f.step();
        assert_eq!(f.vx[0], -0.25);
        assert!(f.x[0] > 50.0);
    }

    #[test]
    fn links_only_below_threshold() {
        let mut f = field(3, 1000.0, 1000.0);
        f.x.copy_from_slice(&[0.0, 60.0, 90.0]);
        f.y.copy_from_slice(&[0.0, 80.0, 120.0]);

        let mut links = Vec::new();
        f.for_each_link(|i, j, a| links.push((i, j, a)));

        // 0-1 at 100, 1-2 at 50, 0-2 at exactly 150 (excluded)
        assert_eq!(links.len(), 2);
        assert_eq!((links[0].0, links[0].1), (0, 1));
        assert!((links[0].2 - (1.0 - 100.0 / 150.0)).abs() < 1e-6);
        assert_eq!((links[1].0, links[1].1), (1, 2));
        assert!((links[1].2 - (1.0 - 50.0 / 150.0)).abs() < 1e-6);
    }

    #[test]
    fn rand_stays_in_unit_interval() {
        let mut rng = seed(0);
        for _ in 0..10_000 {
            let r = rand(&mut rng);
            assert!((0.0..1.0).contains(&r));
        }
    }
}
