use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert_eq!(r.len_frames(), 3);
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(3), FrameIndex(2)).is_err());
    let empty = FrameRange::new(FrameIndex(3), FrameIndex(3)).unwrap();
    assert_eq!(empty.len_frames(), 0);
    assert!(!empty.contains(FrameIndex(3)));
}

#[test]
fn fps_rejects_zero_and_converts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    let fps = Fps::new(60, 1).unwrap();
    assert_eq!(fps.frame_duration_secs(), 1.0 / 60.0);
    assert_eq!(Fps::new(30000, 1001).unwrap().frame_duration_secs(), 1001.0 / 30000.0);
}

#[test]
fn rgba8_defaults_to_opaque_white() {
    assert_eq!(Rgba8::default(), Rgba8::WHITE);
    assert_eq!(Rgba8::opaque(1, 2, 3).with_alpha(9).to_array(), [1, 2, 3, 9]);
}

#[test]
fn rgba8_deserializes_from_named_channels() {
    let c: Rgba8 = serde_json::from_value(serde_json::json!({"r": 255, "g": 100, "b": 0, "a": 255}))
        .unwrap();
    assert_eq!(c, Rgba8::opaque(255, 100, 0));
}
