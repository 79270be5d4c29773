//! Frame-to-frame post-processing transforms.
//!
//! Every function here is pure apart from the random source passed in explicitly: the input
//! frame is never modified and a new frame is returned. All outputs are saturated to `0..=255`.

use crate::effects::blur::{blur_frame, odd_kernel_size};
use crate::effects::request::{EffectRequest, MAX_RADIAL_STRENGTH};
use crate::foundation::core::Point;
use crate::foundation::error::{VfxError, VfxResult};
use crate::foundation::math::weighted_sum_u8;
use crate::foundation::rng::FxRng;
use crate::render::frame::FrameRGBA;

/// Kernel size of the blurred copy used by [`radial_blur`].
pub const RADIAL_BLUR_KERNEL: u32 = 15;
/// Normalized distance from the center inside which a masked radial blur leaves pixels sharp.
pub const RADIAL_MASK_THRESHOLD: f64 = 0.3;
/// Height range of the displaced glitch band, in rows.
pub const GLITCH_BAND_HEIGHT: (i32, i32) = (5, 50);
/// Horizontal displacement range of the glitch band, in pixels.
pub const GLITCH_BAND_SHIFT: i32 = 20;

/// `frame + blur(frame) * intensity`.
///
/// The kernel size is `radius` forced to the nearest odd value `>= radius`.
pub fn glow(frame: &FrameRGBA, intensity: f32, radius: u32) -> VfxResult<FrameRGBA> {
    frame.validate()?;
    let blurred = blur_frame(frame, odd_kernel_size(radius))?;
    let data = frame
        .data
        .iter()
        .zip(&blurred.data)
        .map(|(&f, &b)| weighted_sum_u8(f, 1.0, b, intensity))
        .collect();
    Ok(FrameRGBA {
        width: frame.width,
        height: frame.height,
        data,
    })
}

/// `frame * (1 - strength) + previous * strength`, with `strength` clamped to `[0, 1]`.
pub fn motion_blur(frame: &FrameRGBA, previous: &FrameRGBA, strength: f32) -> VfxResult<FrameRGBA> {
    frame.validate()?;
    previous.validate()?;
    if !frame.same_size(previous) {
        return Err(VfxError::validation(format!(
            "motion blur expects equal frame sizes, got {}x{} and {}x{}",
            frame.width, frame.height, previous.width, previous.height
        )));
    }
    let s = if strength.is_nan() {
        0.0
    } else {
        strength.clamp(0.0, 1.0)
    };
    let data = frame
        .data
        .iter()
        .zip(&previous.data)
        .map(|(&f, &p)| weighted_sum_u8(f, 1.0 - s, p, s))
        .collect();
    Ok(FrameRGBA {
        width: frame.width,
        height: frame.height,
        data,
    })
}

/// Translate the frame by a random offset in `[-intensity, intensity]` on each axis.
pub fn shake(frame: &FrameRGBA, intensity: u32, rng: &mut FxRng) -> VfxResult<FrameRGBA> {
    let i = i32::try_from(intensity)
        .map_err(|_| VfxError::validation("shake intensity is out of range"))?;
    let dx = rng.range_i32(-i, i);
    let dy = rng.range_i32(-i, i);
    shake_by(frame, dx, dy)
}

/// Translate the frame by `(dx, dy)` pixels.
///
/// Pixels moved past the edge are dropped; uncovered pixels become transparent black.
pub fn shake_by(frame: &FrameRGBA, dx: i32, dy: i32) -> VfxResult<FrameRGBA> {
    frame.validate()?;
    let w = i64::from(frame.width);
    let h = i64::from(frame.height);
    let mut out = FrameRGBA::new(frame.width, frame.height);
    let row = frame.row_bytes();

    for y in 0..h {
        let sy = y - i64::from(dy);
        if sy < 0 || sy >= h {
            continue;
        }
        let x0 = i64::from(dx).max(0);
        let x1 = (w + i64::from(dx)).min(w);
        if x0 >= x1 {
            continue;
        }
        let sx0 = x0 - i64::from(dx);
        let len = ((x1 - x0) as usize) * 4;
        let dst = (y as usize) * row + (x0 as usize) * 4;
        let src = (sy as usize) * row + (sx0 as usize) * 4;
        out.data[dst..dst + len].copy_from_slice(&frame.data[src..src + len]);
    }
    Ok(out)
}

/// Split red and blue horizontally and, with probability `intensity`, displace a band of rows.
///
/// Red wraps right by `trunc(intensity * 10)` pixels and blue wraps left by the same amount;
/// green and alpha stay in place. The band starts at a random row in `[0, height - 50]`, spans
/// 5 to 50 rows (clipped to the frame) and wraps by a random offset in `[-20, 20]`.
pub fn glitch(frame: &FrameRGBA, intensity: f32, rng: &mut FxRng) -> VfxResult<FrameRGBA> {
    frame.validate()?;
    let mut out = frame.clone();
    if frame.width == 0 || frame.height == 0 {
        return Ok(out);
    }

    let shift = (intensity * 10.0).trunc() as i64;
    let row = frame.row_bytes();
    if shift != 0 {
        for y in 0..frame.height as usize {
            let span = y * row..(y + 1) * row;
            roll_row(&mut out.data[span.clone()], &frame.data[span.clone()], shift, Some(0));
            roll_row(&mut out.data[span.clone()], &frame.data[span], -shift, Some(2));
        }
    }

    if rng.chance(f64::from(intensity)) {
        let h = i32::try_from(frame.height).unwrap_or(i32::MAX);
        let start = rng.range_i32(0, (h - GLITCH_BAND_HEIGHT.1).max(0));
        let height = rng.range_i32(GLITCH_BAND_HEIGHT.0, GLITCH_BAND_HEIGHT.1);
        let offset = rng.range_i32(-GLITCH_BAND_SHIFT, GLITCH_BAND_SHIFT);
        let end = (start + height).min(h);
        for y in start as usize..end as usize {
            let span = y * row..(y + 1) * row;
            let src = out.data[span.clone()].to_vec();
            roll_row(&mut out.data[span], &src, i64::from(offset), None);
        }
    }

    Ok(out)
}

/// Blend the frame `floor(strength * 10)` times with a fixed 15-tap blurred copy of itself.
///
/// Iteration `i` (0-based) blends with weight `(i + 1) / (strength * 10) * 0.1`. With
/// `masked`, pixels within [`RADIAL_MASK_THRESHOLD`] of `center` (distance normalized by the
/// farthest pixel) keep their input value. `center` defaults to the frame center.
pub fn radial_blur(
    frame: &FrameRGBA,
    center: Option<Point>,
    strength: f32,
    masked: bool,
) -> VfxResult<FrameRGBA> {
    frame.validate()?;
    if strength > MAX_RADIAL_STRENGTH {
        return Err(VfxError::validation(format!(
            "radial blur strength must be <= {MAX_RADIAL_STRENGTH}"
        )));
    }
    let scaled = strength * 10.0;
    if !scaled.is_finite() || scaled < 1.0 {
        return Ok(frame.clone());
    }
    let iterations = scaled.floor() as u32;

    let blurred = blur_frame(frame, RADIAL_BLUR_KERNEL)?;
    let mut data = frame.data.clone();
    for i in 0..iterations {
        let a = ((i + 1) as f32 / scaled) * 0.1;
        for (d, &b) in data.iter_mut().zip(&blurred.data) {
            *d = weighted_sum_u8(*d, 1.0 - a, b, a);
        }
    }

    if masked {
        let center = center.unwrap_or_else(|| {
            Point::new(f64::from(frame.width / 2), f64::from(frame.height / 2))
        });
        restore_center(&mut data, frame, center);
    }

    Ok(FrameRGBA {
        width: frame.width,
        height: frame.height,
        data,
    })
}

/// Validate and apply one typed request.
///
/// Motion blur without a previous frame of the same size returns the frame unchanged.
pub fn apply_effect(
    frame: &FrameRGBA,
    previous: Option<&FrameRGBA>,
    request: &EffectRequest,
    rng: &mut FxRng,
) -> VfxResult<FrameRGBA> {
    request.validate()?;
    match *request {
        EffectRequest::Glow(p) => glow(frame, p.intensity, p.radius),
        EffectRequest::MotionBlur(p) => match previous {
            Some(prev) if prev.same_size(frame) => motion_blur(frame, prev, p.strength),
            Some(_) => {
                tracing::debug!("motion blur skipped: previous frame size differs");
                Ok(frame.clone())
            }
            None => {
                tracing::debug!("motion blur skipped: no previous frame");
                Ok(frame.clone())
            }
        },
        EffectRequest::Shake(p) => shake(frame, p.intensity, rng),
        EffectRequest::Glitch(p) => glitch(frame, p.intensity, rng),
        EffectRequest::RadialBlur(p) => radial_blur(frame, p.center, p.strength, p.masked),
    }
}

/// Wrap one row horizontally: `dst[x] = src[(x - shift) mod w]`, for one channel or all.
fn roll_row(dst: &mut [u8], src: &[u8], shift: i64, channel: Option<usize>) {
    let w = (src.len() / 4) as i64;
    if w == 0 {
        return;
    }
    for x in 0..w {
        let sx = (x - shift).rem_euclid(w);
        let d = (x as usize) * 4;
        let s = (sx as usize) * 4;
        match channel {
            Some(c) => dst[d + c] = src[s + c],
            None => dst[d..d + 4].copy_from_slice(&src[s..s + 4]),
        }
    }
}

fn restore_center(data: &mut [u8], original: &FrameRGBA, center: Point) {
    let (w, h) = (original.width, original.height);
    if w == 0 || h == 0 {
        return;
    }
    let corners = [
        (0.0, 0.0),
        (f64::from(w - 1), 0.0),
        (0.0, f64::from(h - 1)),
        (f64::from(w - 1), f64::from(h - 1)),
    ];
    let max_dist = corners
        .iter()
        .map(|&(x, y)| (x - center.x).hypot(y - center.y))
        .fold(0.0f64, f64::max);

    for y in 0..h {
        for x in 0..w {
            let dist = (f64::from(x) - center.x).hypot(f64::from(y) - center.y);
            let norm = if max_dist > 0.0 { dist / max_dist } else { 0.0 };
            if norm > RADIAL_MASK_THRESHOLD {
                continue;
            }
            let idx = ((y as usize) * (w as usize) + (x as usize)) * 4;
            data[idx..idx + 4].copy_from_slice(&original.data[idx..idx + 4]);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/processor.rs"]
mod tests;
