use super::*;
use crate::foundation::rng::FxRng;
use crate::particles::system::ParticleSystem;

#[test]
fn presets_validate() {
    let at = Vec2::new(960.0, 740.0);
    for cfg in [fire_config(at), explosion_config(at), dust_trail_config(at)] {
        cfg.validate().unwrap();
        assert_eq!(cfg.position, at);
    }
}

#[test]
fn explosion_is_burst_only() {
    let cfg = explosion_config(Vec2::new(100.0, 100.0));
    assert_eq!(cfg.emission_interval(), None);

    let mut sys = ParticleSystem::new(cfg, FxRng::seeded(5)).unwrap();
    sys.update(1.0).unwrap();
    assert_eq!(sys.particle_count(), 0);
    sys.emit_radial_burst(200);
    assert_eq!(sys.particle_count(), 200);
}

#[test]
fn fire_rises() {
    let mut sys = ParticleSystem::new(fire_config(Vec2::new(50.0, 100.0)), FxRng::seeded(1)).unwrap();
    sys.emit(50);
    sys.update(0.5).unwrap();
    let mean_y: f64 =
        sys.particles().iter().map(|p| p.position.y).sum::<f64>() / sys.particle_count() as f64;
    assert!(mean_y < 100.0);
}
