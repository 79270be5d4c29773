use std::f64::consts::TAU;

use crate::foundation::core::Vec2;
use crate::foundation::error::{VfxError, VfxResult};
use crate::foundation::rng::FxRng;
use crate::particles::config::ParticleSystemConfig;
use crate::particles::particle::Particle;
use crate::render::frame::FrameRGBA;
use crate::render::raster::fill_circle;

/// Speed range for [`ParticleSystem::emit_radial_burst`], in pixels per second.
pub const RADIAL_BURST_SPEED: (f64, f64) = (50.0, 200.0);

/// Relative tolerance on the emission interval; absorbs rounding in accumulated step sizes.
const EMISSION_SLACK: f64 = 1e-9;

/// Particles owned by one emitter.
///
/// Particles are kept in emission order, which is also their draw order (no z-sorting).
#[derive(Clone, Debug)]
pub struct ParticleSystem {
    config: ParticleSystemConfig,
    emitter: Vec2,
    particles: Vec<Particle>,
    since_emit: f64,
    rng: FxRng,
}

impl ParticleSystem {
    /// Build a system from a validated config and its own random source.
    pub fn new(config: ParticleSystemConfig, rng: FxRng) -> VfxResult<Self> {
        config.validate()?;
        Ok(Self {
            emitter: config.position,
            config,
            particles: Vec::new(),
            since_emit: 0.0,
            rng,
        })
    }

    /// Construction-time configuration. The emitter position here is the initial one.
    pub fn config(&self) -> &ParticleSystemConfig {
        &self.config
    }

    /// Current emission point.
    pub fn emitter_position(&self) -> Vec2 {
        self.emitter
    }

    /// Move the emission point. Already-emitted particles are unaffected.
    pub fn set_emitter_position(&mut self, position: Vec2) {
        self.emitter = position;
    }

    /// Live particles in emission order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of live particles.
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Append `count` freshly generated particles.
    pub fn emit(&mut self, count: usize) {
        self.particles.reserve(count);
        for _ in 0..count {
            let p = self.spawn();
            self.particles.push(p);
        }
    }

    /// Append `count` particles fanned out evenly over a full circle.
    ///
    /// Particle `i` travels at angle `i / count * 2π` with a speed drawn from
    /// [`RADIAL_BURST_SPEED`]; every other attribute comes from the template.
    pub fn emit_radial_burst(&mut self, count: usize) {
        self.particles.reserve(count);
        for i in 0..count {
            let angle = (i as f64 / count as f64) * TAU;
            let speed = self
                .rng
                .range_f64(RADIAL_BURST_SPEED.0, RADIAL_BURST_SPEED.1);
            let mut p = self.spawn();
            p.velocity = Vec2::new(angle.cos(), angle.sin()) * speed;
            self.particles.push(p);
        }
    }

    /// Advance emission and every live particle by `dt` seconds, then purge dead particles.
    ///
    /// Continuous emission is a fixed-rate periodic emitter: at most one particle is emitted per
    /// call, and any backlog beyond one interval is dropped.
    pub fn update(&mut self, dt: f64) -> VfxResult<()> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(VfxError::validation("update dt must be finite and >= 0"));
        }

        if let Some(interval) = self.config.emission_interval() {
            let slack = interval * EMISSION_SLACK;
            self.since_emit += dt;
            if self.since_emit + slack >= interval {
                self.emit(1);
                let mut carry = (self.since_emit - interval).max(0.0) % interval;
                if interval - carry <= slack {
                    carry = 0.0;
                }
                self.since_emit = carry;
            }
        }

        for p in &mut self.particles {
            p.step(dt);
        }
        self.particles.retain(Particle::is_alive);
        Ok(())
    }

    /// Draw every live particle onto `frame` as a filled circle, oldest first.
    ///
    /// Alpha is faded by the remaining-lifetime ratio; particles whose truncated position lies
    /// outside the frame are skipped.
    pub fn render(&self, frame: &mut FrameRGBA) {
        for p in &self.particles {
            let x = p.position.x.trunc() as i64;
            let y = p.position.y.trunc() as i64;
            if !frame.contains(x, y) {
                continue;
            }
            let radius = p.size.max(0.0).trunc() as u32;
            fill_circle(frame, x, y, radius, p.faded_color());
        }
    }

    fn spawn(&mut self) -> Particle {
        let t = &self.config.particle;
        let rng = &mut self.rng;

        let position = Vec2::new(
            self.emitter.x + rng.jitter(t.spread),
            self.emitter.y + rng.jitter(t.spread),
        );
        let velocity = Vec2::new(
            t.velocity.x + rng.jitter(t.velocity_random.x),
            t.velocity.y + rng.jitter(t.velocity_random.y),
        );
        let lifetime = t.lifetime + rng.jitter(t.lifetime_random);
        let size = t.size + rng.jitter(t.size_random);
        let rotation = rng.range_f64(0.0, 360.0);

        Particle {
            position,
            velocity,
            acceleration: t.acceleration,
            lifetime,
            max_lifetime: lifetime,
            color: t.color,
            size,
            rotation,
            angular_velocity: t.angular_velocity,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/system.rs"]
mod tests;
