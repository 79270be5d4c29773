pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Round and saturate a floating-point channel value into `0..=255`.
pub(crate) fn saturate_u8(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

/// `a * wa + b * wb`, rounded and saturated per channel.
pub(crate) fn weighted_sum_u8(a: u8, wa: f32, b: u8, wb: f32) -> u8 {
    saturate_u8(f32::from(a) * wa + f32::from(b) * wb)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
