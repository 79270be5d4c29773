use super::*;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    assert_eq!(over(dst, Rgba8::new(255, 255, 255, 0)), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    assert_eq!(over([0, 0, 0, 255], Rgba8::opaque(255, 0, 0)), [255, 0, 0, 255]);
}

#[test]
fn over_half_white_on_opaque_black_is_mid_gray() {
    assert_eq!(
        over([0, 0, 0, 255], Rgba8::new(255, 255, 255, 128)),
        [128, 128, 128, 255]
    );
}

#[test]
fn over_transparent_dst_keeps_straight_color() {
    assert_eq!(
        over([0, 0, 0, 0], Rgba8::new(100, 110, 120, 200)),
        [100, 110, 120, 200]
    );
}

#[test]
fn radius_zero_paints_one_pixel() {
    let mut f = FrameRGBA::filled(5, 5, Rgba8::BLACK);
    fill_circle(&mut f, 2, 2, 0, Rgba8::WHITE);
    let lit = f.data.chunks_exact(4).filter(|px| px[0] == 255).count();
    assert_eq!(lit, 1);
    assert_eq!(f.pixel(2, 2), Some(Rgba8::WHITE));
}

#[test]
fn circle_is_clipped_at_frame_edges() {
    let mut f = FrameRGBA::filled(4, 4, Rgba8::BLACK);
    fill_circle(&mut f, 0, 0, 2, Rgba8::WHITE);
    // Quarter disc of radius 2: offsets with dx,dy >= 0 and dx²+dy² <= 4.
    let lit = f.data.chunks_exact(4).filter(|px| px[0] == 255).count();
    assert_eq!(lit, 6);
    assert_eq!(f.pixel(2, 2), Some(Rgba8::BLACK));
}
