use super::*;

#[test]
fn equal_seeds_produce_equal_streams() {
    let mut a = FxRng::seeded(42);
    let mut b = FxRng::seeded(42);
    for _ in 0..32 {
        assert_eq!(a.jitter(10.0), b.jitter(10.0));
        assert_eq!(a.range_i32(-5, 5), b.range_i32(-5, 5));
    }
}

#[test]
fn forks_are_deterministic_and_distinct_from_parent() {
    let mut a = FxRng::seeded(7);
    let mut b = FxRng::seeded(7);
    let mut fa = a.fork();
    let mut fb = b.fork();
    assert_eq!(fa.range_f64(0.0, 1.0), fb.range_f64(0.0, 1.0));
}

#[test]
fn jitter_stays_inside_half_range() {
    let mut rng = FxRng::seeded(1);
    for _ in 0..1000 {
        let v = rng.jitter(3.5);
        assert!((-3.5..=3.5).contains(&v));
    }
    assert_eq!(rng.jitter(0.0), 0.0);
    assert_eq!(rng.jitter(-1.0), 0.0);
}

#[test]
fn degenerate_ranges_return_lower_bound() {
    let mut rng = FxRng::seeded(3);
    assert_eq!(rng.range_i32(4, 4), 4);
    assert_eq!(rng.range_i32(4, 1), 4);
    assert_eq!(rng.range_f64(2.0, 2.0), 2.0);
}

#[test]
fn chance_handles_extremes() {
    let mut rng = FxRng::seeded(9);
    assert!(!rng.chance(0.0));
    assert!(rng.chance(1.0));
    assert!(rng.chance(3.0));
    assert!(!rng.chance(f64::NAN));
}
