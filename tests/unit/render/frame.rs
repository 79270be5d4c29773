use super::*;

#[test]
fn filled_frame_repeats_color() {
    let f = FrameRGBA::filled(3, 2, Rgba8::opaque(1, 2, 3));
    assert_eq!(f.data.len(), 24);
    assert!(f.data.chunks_exact(4).all(|px| px == [1, 2, 3, 255]));
    f.validate().unwrap();
}

#[test]
fn from_rgba8_rejects_wrong_length() {
    assert!(FrameRGBA::from_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(FrameRGBA::from_rgba8(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn pixel_access_is_bounds_checked() {
    let mut f = FrameRGBA::new(4, 4);
    f.set_pixel(3, 3, Rgba8::WHITE);
    f.set_pixel(4, 0, Rgba8::WHITE);
    assert_eq!(f.pixel(3, 3), Some(Rgba8::WHITE));
    assert_eq!(f.pixel(4, 0), None);
    assert_eq!(f.data.iter().filter(|&&b| b == 255).count(), 4);
}

#[test]
fn contains_uses_signed_coordinates() {
    let f = FrameRGBA::new(10, 5);
    assert!(f.contains(0, 0));
    assert!(f.contains(9, 4));
    assert!(!f.contains(-1, 0));
    assert!(!f.contains(10, 0));
    assert!(!f.contains(0, 5));
}
