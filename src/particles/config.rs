use crate::foundation::core::{Rgba8, Vec2};
use crate::foundation::error::{VfxError, VfxResult};

/// Base velocity used when a template omits one (pixels per second, upward).
pub const DEFAULT_VELOCITY: Vec2 = Vec2::new(0.0, -50.0);
/// Base lifetime used when a template omits one.
pub const DEFAULT_LIFETIME_SECS: f64 = 2.0;
/// Base color used when a template omits one.
pub const DEFAULT_COLOR: Rgba8 = Rgba8::WHITE;
/// Base radius used when a template omits one.
pub const DEFAULT_SIZE_PX: f64 = 5.0;
/// Emission rate used when a system config omits one.
pub const DEFAULT_EMISSION_RATE: f64 = 50.0;

/// Per-particle template: base values plus uniform half-ranges.
///
/// Every attribute with a `*_random` companion is sampled as `base + U(-half, half)`,
/// independently per attribute and per axis.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ParticleTemplate {
    /// Base velocity.
    pub velocity: Vec2,
    /// Per-axis velocity half-range.
    pub velocity_random: Vec2,
    /// Constant acceleration (gravity, buoyancy, ...).
    pub acceleration: Vec2,
    /// Base lifetime in seconds.
    pub lifetime: f64,
    /// Lifetime half-range in seconds.
    pub lifetime_random: f64,
    /// Nominal color.
    pub color: Rgba8,
    /// Base radius in pixels.
    pub size: f64,
    /// Radius half-range in pixels.
    pub size_random: f64,
    /// Per-axis spawn offset half-range around the emitter (square, not circular).
    pub spread: f64,
    /// Rotation speed in degrees per second.
    pub angular_velocity: f64,
}

impl Default for ParticleTemplate {
    fn default() -> Self {
        Self {
            velocity: DEFAULT_VELOCITY,
            velocity_random: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            lifetime: DEFAULT_LIFETIME_SECS,
            lifetime_random: 0.0,
            color: DEFAULT_COLOR,
            size: DEFAULT_SIZE_PX,
            size_random: 0.0,
            spread: 0.0,
            angular_velocity: 0.0,
        }
    }
}

/// Configuration of one particle system.
///
/// Fixed at construction; only the emitter position may change afterwards, through
/// [`crate::ParticleSystem::set_emitter_position`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ParticleSystemConfig {
    /// Emitter position in pixels.
    pub position: Vec2,
    /// Particles per second. `0` disables continuous emission (burst-only).
    pub rate: f64,
    /// Template for generated particles.
    pub particle: ParticleTemplate,
}

impl Default for ParticleSystemConfig {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rate: DEFAULT_EMISSION_RATE,
            particle: ParticleTemplate::default(),
        }
    }
}

impl ParticleSystemConfig {
    /// Config with default template at `position` emitting `rate` particles per second.
    pub fn new(position: Vec2, rate: f64) -> Self {
        Self {
            position,
            rate,
            particle: ParticleTemplate::default(),
        }
    }

    /// Interval between continuous emissions, or `None` for burst-only systems.
    pub fn emission_interval(&self) -> Option<f64> {
        (self.rate > 0.0).then(|| 1.0 / self.rate)
    }

    /// Reject configurations that cannot produce well-formed particles.
    pub fn validate(&self) -> VfxResult<()> {
        finite_vec("position", self.position)?;
        if !self.rate.is_finite() || self.rate < 0.0 {
            return Err(VfxError::validation("rate must be finite and >= 0"));
        }
        self.particle.validate()
    }
}

impl ParticleTemplate {
    pub fn validate(&self) -> VfxResult<()> {
        finite_vec("particle.velocity", self.velocity)?;
        finite_vec("particle.acceleration", self.acceleration)?;
        finite_vec("particle.velocity_random", self.velocity_random)?;
        if self.velocity_random.x < 0.0 || self.velocity_random.y < 0.0 {
            return Err(VfxError::validation(
                "particle.velocity_random must be >= 0 on both axes",
            ));
        }
        for (name, v) in [
            ("particle.lifetime_random", self.lifetime_random),
            ("particle.size", self.size),
            ("particle.size_random", self.size_random),
            ("particle.spread", self.spread),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(VfxError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !self.angular_velocity.is_finite() {
            return Err(VfxError::validation(
                "particle.angular_velocity must be finite",
            ));
        }
        if !self.lifetime.is_finite() || self.lifetime <= 0.0 {
            return Err(VfxError::validation(
                "particle.lifetime must be finite and > 0",
            ));
        }
        // Keeps every sampled lifetime strictly positive.
        if self.lifetime_random >= self.lifetime {
            return Err(VfxError::validation(
                "particle.lifetime_random must be < particle.lifetime",
            ));
        }
        Ok(())
    }
}

fn finite_vec(name: &str, v: Vec2) -> VfxResult<()> {
    if v.x.is_finite() && v.y.is_finite() {
        Ok(())
    } else {
        Err(VfxError::validation(format!("{name} must be finite")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/config.rs"]
mod tests;
