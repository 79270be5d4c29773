//! Ready-made particle system configurations.

use crate::foundation::core::{Rgba8, Vec2};
use crate::particles::config::{ParticleSystemConfig, ParticleTemplate};

/// Continuous rising orange flames.
pub fn fire_config(position: Vec2) -> ParticleSystemConfig {
    ParticleSystemConfig {
        position,
        rate: 100.0,
        particle: ParticleTemplate {
            velocity: Vec2::new(0.0, -50.0),
            velocity_random: Vec2::new(10.0, 10.0),
            acceleration: Vec2::new(0.0, -20.0),
            lifetime: 1.5,
            lifetime_random: 0.5,
            color: Rgba8::opaque(255, 100, 0),
            size: 10.0,
            size_random: 5.0,
            spread: 20.0,
            angular_velocity: 0.0,
        },
    }
}

/// Burst-only yellow debris falling under gravity.
///
/// Emits nothing on its own; pair with [`crate::ParticleSystem::emit_radial_burst`].
pub fn explosion_config(position: Vec2) -> ParticleSystemConfig {
    ParticleSystemConfig {
        position,
        rate: 0.0,
        particle: ParticleTemplate {
            velocity: Vec2::ZERO,
            velocity_random: Vec2::ZERO,
            acceleration: Vec2::new(0.0, 100.0),
            lifetime: 2.0,
            lifetime_random: 0.5,
            color: Rgba8::opaque(255, 255, 0),
            size: 8.0,
            size_random: 4.0,
            spread: 0.0,
            angular_velocity: 0.0,
        },
    }
}

/// Translucent sandy dust kicked up behind a runner, drifting back and settling.
pub fn dust_trail_config(position: Vec2) -> ParticleSystemConfig {
    ParticleSystemConfig {
        position,
        rate: 150.0,
        particle: ParticleTemplate {
            velocity: Vec2::new(-80.0, -40.0),
            velocity_random: Vec2::new(60.0, 30.0),
            acceleration: Vec2::new(0.0, 20.0),
            lifetime: 1.8,
            lifetime_random: 0.6,
            color: Rgba8::new(180, 160, 140, 120),
            size: 25.0,
            size_random: 15.0,
            spread: 40.0,
            angular_velocity: 0.0,
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/presets.rs"]
mod tests;
