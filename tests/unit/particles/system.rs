use super::*;
use crate::foundation::core::Rgba8;
use crate::particles::config::ParticleTemplate;

fn burst_config(spread: f64) -> ParticleSystemConfig {
    ParticleSystemConfig {
        position: Vec2::new(50.0, 40.0),
        rate: 0.0,
        particle: ParticleTemplate {
            velocity: Vec2::new(0.0, 0.0),
            velocity_random: Vec2::new(30.0, 30.0),
            lifetime: 1.0,
            lifetime_random: 0.5,
            spread,
            ..ParticleTemplate::default()
        },
    }
}

fn still_config(lifetime: f64) -> ParticleSystemConfig {
    ParticleSystemConfig {
        position: Vec2::new(5.0, 5.0),
        rate: 0.0,
        particle: ParticleTemplate {
            velocity: Vec2::ZERO,
            lifetime,
            size: 0.0,
            color: Rgba8::new(255, 0, 0, 200),
            ..ParticleTemplate::default()
        },
    }
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let mut cfg = burst_config(0.0);
    cfg.particle.lifetime = -1.0;
    assert!(ParticleSystem::new(cfg, FxRng::seeded(0)).is_err());
}

#[test]
fn burst_emits_exactly_count_within_square_spread() {
    let mut sys = ParticleSystem::new(burst_config(20.0), FxRng::seeded(11)).unwrap();
    sys.emit(200);
    assert_eq!(sys.particle_count(), 200);
    for p in sys.particles() {
        assert!((p.position.x - 50.0).abs() <= 20.0);
        assert!((p.position.y - 40.0).abs() <= 20.0);
        assert_eq!(p.lifetime, p.max_lifetime);
        assert!(p.lifetime > 0.0 && p.lifetime <= 1.5);
    }

    // Every particle dies once the longest lifetime has elapsed.
    for _ in 0..16 {
        sys.update(0.1).unwrap();
    }
    assert_eq!(sys.particle_count(), 0);
}

#[test]
fn zero_rate_never_emits_on_update() {
    let mut sys = ParticleSystem::new(burst_config(0.0), FxRng::seeded(1)).unwrap();
    for _ in 0..100 {
        sys.update(0.5).unwrap();
    }
    assert_eq!(sys.particle_count(), 0);
}

#[test]
fn emission_count_is_floor_of_elapsed_times_rate() {
    // Binary-exact steps: rate 16/s, dt = 1/64 s, 3.5 s => 56 emissions.
    let mut cfg = ParticleSystemConfig::new(Vec2::ZERO, 16.0);
    cfg.particle.lifetime = 100.0;
    let mut sys = ParticleSystem::new(cfg, FxRng::seeded(2)).unwrap();
    for _ in 0..224 {
        sys.update(1.0 / 64.0).unwrap();
    }
    assert_eq!(sys.particle_count(), 56);
}

fn count_after(rate: f64, dt: f64, steps: usize) -> usize {
    let mut cfg = ParticleSystemConfig::new(Vec2::ZERO, rate);
    cfg.particle.lifetime = 1000.0;
    let mut sys = ParticleSystem::new(cfg, FxRng::seeded(6)).unwrap();
    for _ in 0..steps {
        sys.update(dt).unwrap();
    }
    sys.particle_count()
}

#[test]
fn emission_count_holds_for_inexact_decimal_steps() {
    assert_eq!(count_after(10.0, 0.01, 100), 10);
    assert_eq!(count_after(10.0, 0.01, 1000), 100);
    assert_eq!(count_after(100.0, 0.01, 250), 250);
}

#[test]
fn emission_count_holds_when_steps_and_interval_are_unaligned() {
    assert_eq!(count_after(25.0, 1.0 / 60.0, 120), 50);
    assert_eq!(count_after(25.0, 1.0 / 60.0, 600), 250);
    assert_eq!(count_after(30.0, 1.0 / 60.0, 59), 29);
}

#[test]
fn emission_count_does_not_depend_on_step_split() {
    let mut cfg = ParticleSystemConfig::new(Vec2::ZERO, 8.0);
    cfg.particle.lifetime = 100.0;

    let mut coarse = ParticleSystem::new(cfg.clone(), FxRng::seeded(3)).unwrap();
    for _ in 0..16 {
        coarse.update(0.125).unwrap();
    }

    let mut fine = ParticleSystem::new(cfg, FxRng::seeded(3)).unwrap();
    for _ in 0..16 {
        for dt in [0.0625, 0.03125, 0.0, 0.03125] {
            fine.update(dt).unwrap();
        }
    }

    assert_eq!(coarse.particle_count(), 16);
    assert_eq!(fine.particle_count(), 16);
}

#[test]
fn oversized_step_emits_at_most_one() {
    let mut cfg = ParticleSystemConfig::new(Vec2::ZERO, 10.0);
    cfg.particle.lifetime = 100.0;
    let mut sys = ParticleSystem::new(cfg, FxRng::seeded(4)).unwrap();
    sys.update(1.0).unwrap();
    assert_eq!(sys.particle_count(), 1);

    assert_eq!(count_after(60.0, 1.0 / 30.0, 90), 90);
}

#[test]
fn lifetime_is_monotonic_and_dead_particles_are_purged() {
    let mut cfg = burst_config(0.0);
    cfg.particle.lifetime = 0.5;
    cfg.particle.lifetime_random = 0.25;
    let mut sys = ParticleSystem::new(cfg, FxRng::seeded(5)).unwrap();
    sys.emit(20);

    let dt = 1.0 / 30.0;
    let mut prev: Vec<f64> = sys.particles().iter().map(|p| p.lifetime).collect();
    for _ in 0..30 {
        sys.update(dt).unwrap();
        let now: Vec<f64> = sys.particles().iter().map(|p| p.lifetime).collect();
        let expected: Vec<f64> = prev.iter().map(|l| l - dt).filter(|l| *l > 0.0).collect();
        assert_eq!(now, expected);
        for p in sys.particles() {
            assert!(p.lifetime <= p.max_lifetime);
        }
        prev = now;
    }
    assert_eq!(sys.particle_count(), 0);
}

#[test]
fn integration_uses_velocity_before_acceleration() {
    let mut cfg = still_config(10.0);
    cfg.particle.velocity = Vec2::new(10.0, 0.0);
    cfg.particle.acceleration = Vec2::new(0.0, 4.0);
    cfg.particle.angular_velocity = 90.0;
    let mut sys = ParticleSystem::new(cfg, FxRng::seeded(6)).unwrap();
    sys.emit(1);
    let rot0 = sys.particles()[0].rotation;

    sys.update(0.5).unwrap();
    let p = &sys.particles()[0];
    assert_eq!(p.position, Vec2::new(10.0, 5.0));
    assert_eq!(p.velocity, Vec2::new(10.0, 2.0));
    assert_eq!(p.rotation, rot0 + 45.0);
    assert_eq!(p.lifetime, 9.5);
}

#[test]
fn update_rejects_bad_dt() {
    let mut sys = ParticleSystem::new(still_config(1.0), FxRng::seeded(0)).unwrap();
    assert!(sys.update(f64::NAN).is_err());
    assert!(sys.update(-0.1).is_err());
}

#[test]
fn moving_the_emitter_only_affects_new_particles() {
    let mut sys = ParticleSystem::new(still_config(5.0), FxRng::seeded(0)).unwrap();
    sys.emit(1);
    sys.set_emitter_position(Vec2::new(1.0, 2.0));
    sys.emit(1);
    assert_eq!(sys.particles()[0].position, Vec2::new(5.0, 5.0));
    assert_eq!(sys.particles()[1].position, Vec2::new(1.0, 2.0));
    assert_eq!(sys.config().position, Vec2::new(5.0, 5.0));
}

#[test]
fn fresh_particle_renders_with_full_alpha() {
    let mut sys = ParticleSystem::new(still_config(1.0), FxRng::seeded(0)).unwrap();
    sys.emit(1);
    let mut frame = FrameRGBA::new(10, 10);
    sys.render(&mut frame);
    assert_eq!(frame.pixel(5, 5), Some(Rgba8::new(255, 0, 0, 200)));
}

#[test]
fn half_spent_particle_renders_with_half_alpha() {
    let mut sys = ParticleSystem::new(still_config(1.0), FxRng::seeded(0)).unwrap();
    sys.emit(1);
    sys.update(0.5).unwrap();
    let mut frame = FrameRGBA::new(10, 10);
    sys.render(&mut frame);
    assert_eq!(frame.pixel(5, 5), Some(Rgba8::new(255, 0, 0, 100)));
}

#[test]
fn expired_particle_is_not_rendered() {
    let mut sys = ParticleSystem::new(still_config(1.0), FxRng::seeded(0)).unwrap();
    sys.emit(1);
    sys.update(1.0).unwrap();
    assert_eq!(sys.particle_count(), 0);
    let mut frame = FrameRGBA::new(10, 10);
    sys.render(&mut frame);
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn out_of_bounds_particles_are_skipped() {
    let mut cfg = still_config(1.0);
    cfg.position = Vec2::new(-1.5, 3.0);
    cfg.particle.size = 3.0;
    let mut sys = ParticleSystem::new(cfg, FxRng::seeded(0)).unwrap();
    sys.emit(1);
    let mut frame = FrameRGBA::new(10, 10);
    sys.render(&mut frame);
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn later_particles_draw_on_top() {
    let mut cfg = still_config(1.0);
    cfg.particle.color = Rgba8::opaque(255, 0, 0);
    let mut sys = ParticleSystem::new(cfg, FxRng::seeded(0)).unwrap();
    sys.emit(1);
    sys.particles[0].color = Rgba8::opaque(0, 0, 255);
    sys.emit(1);
    let mut frame = FrameRGBA::new(10, 10);
    sys.render(&mut frame);
    assert_eq!(frame.pixel(5, 5), Some(Rgba8::opaque(255, 0, 0)));
}

#[test]
fn radial_burst_fans_out_over_full_circle() {
    let mut sys = ParticleSystem::new(burst_config(0.0), FxRng::seeded(8)).unwrap();
    sys.emit_radial_burst(4);
    assert_eq!(sys.particle_count(), 4);
    for (i, p) in sys.particles().iter().enumerate() {
        let speed = p.velocity.hypot();
        assert!(speed >= RADIAL_BURST_SPEED.0 - 1e-9);
        assert!(speed <= RADIAL_BURST_SPEED.1 + 1e-9);
        let expected = (i as f64 / 4.0) * TAU;
        let dir = Vec2::new(expected.cos(), expected.sin());
        assert!((p.velocity.normalize() - dir).hypot() < 1e-9);
    }
}

#[test]
fn equal_seeds_generate_identical_particles() {
    let mut a = ParticleSystem::new(burst_config(10.0), FxRng::seeded(99)).unwrap();
    let mut b = ParticleSystem::new(burst_config(10.0), FxRng::seeded(99)).unwrap();
    a.emit(32);
    b.emit(32);
    assert_eq!(a.particles(), b.particles());
}
