use crate::foundation::error::{VfxError, VfxResult};
use crate::render::frame::FrameRGBA;

/// Gaussian blur of a whole frame with an odd `ksize`-tap kernel.
///
/// Sigma is derived from the kernel size with [`sigma_for_kernel`]. Samples past the frame edge
/// clamp to the nearest edge pixel.
pub fn blur_frame(frame: &FrameRGBA, ksize: u32) -> VfxResult<FrameRGBA> {
    let ksize = odd_kernel_size(ksize);
    let data = blur_rgba8(
        &frame.data,
        frame.width,
        frame.height,
        ksize / 2,
        sigma_for_kernel(ksize),
    )?;
    Ok(FrameRGBA {
        width: frame.width,
        height: frame.height,
        data,
    })
}

/// Force a kernel size to the nearest odd value `>= ksize` (minimum 1).
pub fn odd_kernel_size(ksize: u32) -> u32 {
    if ksize == 0 {
        1
    } else if ksize.is_multiple_of(2) {
        ksize + 1
    } else {
        ksize
    }
}

/// `0.3 * ((ksize - 1) * 0.5 - 1) + 0.8`.
pub fn sigma_for_kernel(ksize: u32) -> f32 {
    0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Largest kernel radius [`blur_rgba8`] accepts.
pub const MAX_BLUR_RADIUS: u32 = (i32::MAX / 2) as u32;

const ONE_Q16: u32 = 1 << 16;

/// Separable Gaussian blur of a tightly packed RGBA8 buffer with a `2 * radius + 1` tap kernel.
///
/// Weights are fixed-point (Q16) and sum to exactly one, so flat regions come back unchanged.
pub fn blur_rgba8(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> VfxResult<Vec<u8>> {
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| VfxError::evaluation("blur buffer size overflow"))?;
    if src.len() != len {
        return Err(VfxError::evaluation(format!(
            "blur buffer holds {} bytes, {width}x{height} RGBA needs {len}",
            src.len()
        )));
    }
    if radius > MAX_BLUR_RADIUS {
        return Err(VfxError::validation(format!(
            "blur radius {radius} exceeds {MAX_BLUR_RADIUS}"
        )));
    }
    if radius == 0 || len == 0 {
        return Ok(src.to_vec());
    }

    let taps = q16_taps(radius, sigma)?;
    let (w, h) = (width as usize, height as usize);
    let mut rows = vec![0u8; len];
    convolve_lines(src, &mut rows, Lines { count: h, len: w, start_step: w, step: 1 }, &taps);
    let mut out = vec![0u8; len];
    convolve_lines(&rows, &mut out, Lines { count: w, len: h, start_step: 1, step: w }, &taps);
    Ok(out)
}

/// Normalized Gaussian taps in Q16. Rounding drift lands on the center tap.
fn q16_taps(radius: u32, sigma: f32) -> VfxResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(VfxError::validation("blur sigma must be > 0"));
    }
    let r = i64::from(radius);
    let two_sigma_sq = 2.0 * f64::from(sigma).powi(2);
    let gauss: Vec<f64> = (-r..=r)
        .map(|i| (-((i * i) as f64) / two_sigma_sq).exp())
        .collect();
    let total: f64 = gauss.iter().sum();
    if !total.is_normal() {
        return Err(VfxError::evaluation("gaussian kernel sum is zero"));
    }

    let one = f64::from(ONE_Q16);
    let mut taps: Vec<u32> = gauss
        .iter()
        .map(|g| (g / total * one).round().clamp(0.0, one) as u32)
        .collect();
    let assigned: i64 = taps.iter().map(|&t| i64::from(t)).sum();
    let mid = taps.len() / 2;
    let centered = i64::from(taps[mid]) + i64::from(ONE_Q16) - assigned;
    taps[mid] = centered.clamp(0, i64::from(ONE_Q16)) as u32;
    Ok(taps)
}

/// A family of parallel pixel lines through the buffer, in pixel units.
#[derive(Clone, Copy)]
struct Lines {
    count: usize,
    len: usize,
    /// Offset between the first pixels of consecutive lines.
    start_step: usize,
    /// Offset between neighboring pixels of one line.
    step: usize,
}

/// 1-D convolution along every line; samples past either end repeat the end pixel.
fn convolve_lines(src: &[u8], dst: &mut [u8], lines: Lines, taps: &[u32]) {
    let reach = taps.len() / 2;
    let last = lines.len - 1;
    for line in 0..lines.count {
        let first = line * lines.start_step;
        for i in 0..lines.len {
            let mut acc = [0u64; 4];
            for (t, &weight) in taps.iter().enumerate() {
                let j = (i + t).saturating_sub(reach).min(last);
                let at = (first + j * lines.step) * 4;
                for (a, &v) in acc.iter_mut().zip(&src[at..at + 4]) {
                    *a += u64::from(weight) * u64::from(v);
                }
            }
            let at = (first + i * lines.step) * 4;
            for (d, a) in dst[at..at + 4].iter_mut().zip(acc) {
                *d = ((a + u64::from(ONE_Q16 / 2)) >> 16).min(255) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
