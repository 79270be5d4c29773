use crate::foundation::core::Rgba8;
use crate::foundation::math::mul_div255_u16;
use crate::render::frame::FrameRGBA;

/// Source-over for straight-alpha RGBA8 pixels.
pub fn over(dst: [u8; 4], src: Rgba8) -> [u8; 4] {
    let sa = u16::from(src.a);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src.to_array();
    }

    let inv = 255 - sa;
    let da = mul_div255_u16(u16::from(dst[3]), inv);
    let out_a = u32::from(sa + da);

    let s = [src.r, src.g, src.b];
    let mut out = [0u8; 4];
    for i in 0..3 {
        let num = u32::from(s[i]) * u32::from(sa) + u32::from(dst[i]) * u32::from(da);
        out[i] = ((num + out_a / 2) / out_a).min(255) as u8;
    }
    out[3] = out_a.min(255) as u8;
    out
}

/// Draw a filled circle centered on pixel `(cx, cy)`.
///
/// A pixel is covered when its integer offset from the center satisfies `dx² + dy² <= r²`, so
/// radius 0 paints exactly the center pixel. Pixels outside the frame are clipped.
pub fn fill_circle(frame: &mut FrameRGBA, cx: i64, cy: i64, radius: u32, color: Rgba8) {
    if color.a == 0 || frame.width == 0 || frame.height == 0 {
        return;
    }
    let r = i64::from(radius);
    let r2 = r * r;
    let y0 = (cy - r).max(0);
    let y1 = (cy + r).min(i64::from(frame.height) - 1);
    let x0 = (cx - r).max(0);
    let x1 = (cx + r).min(i64::from(frame.width) - 1);

    for y in y0..=y1 {
        let dy = y - cy;
        for x in x0..=x1 {
            let dx = x - cx;
            if dx * dx + dy * dy > r2 {
                continue;
            }
            let idx = ((y as usize) * (frame.width as usize) + (x as usize)) * 4;
            let d = [
                frame.data[idx],
                frame.data[idx + 1],
                frame.data[idx + 2],
                frame.data[idx + 3],
            ];
            frame.data[idx..idx + 4].copy_from_slice(&over(d, color));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
