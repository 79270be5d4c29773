use crate::foundation::core::{Rgba8, Vec2};

/// A single simulated point.
///
/// `lifetime` counts down from `max_lifetime`; a particle with `lifetime <= 0` is dead and is
/// removed by the owning system during the update that expired it.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Position in pixels.
    pub position: Vec2,
    /// Velocity in pixels per second.
    pub velocity: Vec2,
    /// Acceleration in pixels per second squared.
    pub acceleration: Vec2,
    /// Remaining lifetime in seconds.
    pub lifetime: f64,
    /// Lifetime at creation, in seconds.
    pub max_lifetime: f64,
    /// Nominal color; alpha is additionally faded by [`Particle::fade_ratio`].
    pub color: Rgba8,
    /// Radius in pixels.
    pub size: f64,
    /// Rotation in degrees. Not used by rendering.
    pub rotation: f64,
    /// Rotation speed in degrees per second.
    pub angular_velocity: f64,
}

impl Particle {
    /// `lifetime / max_lifetime`, clamped to `[0, 1]`.
    pub fn fade_ratio(&self) -> f64 {
        if self.max_lifetime <= 0.0 {
            return 0.0;
        }
        (self.lifetime / self.max_lifetime).clamp(0.0, 1.0)
    }

    /// Return `true` while the particle still has lifetime left.
    pub fn is_alive(&self) -> bool {
        self.lifetime > 0.0
    }

    /// Color with alpha scaled by the fade ratio.
    pub fn faded_color(&self) -> Rgba8 {
        let a = (f64::from(self.color.a) * self.fade_ratio()).round() as u8;
        self.color.with_alpha(a)
    }

    /// Advance by `dt` seconds with explicit Euler integration.
    ///
    /// Position integrates the velocity from before this step.
    pub(crate) fn step(&mut self, dt: f64) {
        self.position += self.velocity * dt;
        self.velocity += self.acceleration * dt;
        self.rotation += self.angular_velocity * dt;
        self.lifetime -= dt;
    }
}
