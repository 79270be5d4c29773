use crate::foundation::core::Point;
use crate::foundation::error::{VfxError, VfxResult};

/// Largest glow kernel accepted, in pixels.
pub const MAX_GLOW_RADIUS: u32 = 256;
/// Largest radial-blur strength accepted (`strength * 10` blend iterations).
pub const MAX_RADIAL_STRENGTH: f32 = 10.0;

/// A post-processing effect request with typed parameters.
///
/// Serialized as `{"kind": "glow", "params": {...}}`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "params", rename_all = "snake_case")]
pub enum EffectRequest {
    /// Additive gaussian glow.
    Glow(GlowParams),
    /// Blend with the previously rendered frame.
    MotionBlur(MotionBlurParams),
    /// Random whole-frame translation.
    Shake(ShakeParams),
    /// RGB channel split plus a randomly displaced band.
    Glitch(GlitchParams),
    /// Iterative self-blend with a blurred copy.
    RadialBlur(RadialBlurParams),
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GlowParams {
    /// Weight of the blurred copy added on top of the frame.
    pub intensity: f32,
    /// Kernel size in pixels, forced odd.
    pub radius: u32,
}

impl Default for GlowParams {
    fn default() -> Self {
        Self {
            intensity: 0.5,
            radius: 20,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MotionBlurParams {
    /// Weight of the previous frame, `0..=1`.
    pub strength: f32,
}

impl Default for MotionBlurParams {
    fn default() -> Self {
        Self { strength: 0.5 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShakeParams {
    /// Maximum offset in pixels on each axis.
    pub intensity: u32,
}

impl Default for ShakeParams {
    fn default() -> Self {
        Self { intensity: 5 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GlitchParams {
    /// Channel split is `trunc(intensity * 10)` pixels; band probability is `intensity`.
    pub intensity: f32,
}

impl Default for GlitchParams {
    fn default() -> Self {
        Self { intensity: 0.5 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RadialBlurParams {
    /// Blur center in pixels; the frame center when absent.
    pub center: Option<Point>,
    /// `floor(strength * 10)` blend iterations.
    pub strength: f32,
    /// Leave the area near `center` sharp.
    pub masked: bool,
}

impl Default for RadialBlurParams {
    fn default() -> Self {
        Self {
            center: None,
            strength: 0.5,
            masked: false,
        }
    }
}

impl EffectRequest {
    /// Canonical snake_case kind name.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Glow(_) => "glow",
            Self::MotionBlur(_) => "motion_blur",
            Self::Shake(_) => "shake",
            Self::Glitch(_) => "glitch",
            Self::RadialBlur(_) => "radial_blur",
        }
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> VfxResult<()> {
        match *self {
            Self::Glow(p) => {
                finite("glow.intensity", p.intensity)?;
                if p.radius > MAX_GLOW_RADIUS {
                    return Err(VfxError::validation(format!(
                        "glow.radius must be <= {MAX_GLOW_RADIUS}"
                    )));
                }
            }
            Self::MotionBlur(p) => {
                finite("motion_blur.strength", p.strength)?;
                if !(0.0..=1.0).contains(&p.strength) {
                    return Err(VfxError::validation(
                        "motion_blur.strength must be within [0, 1]",
                    ));
                }
            }
            Self::Shake(_) => {}
            Self::Glitch(p) => {
                finite("glitch.intensity", p.intensity)?;
                if p.intensity < 0.0 {
                    return Err(VfxError::validation("glitch.intensity must be >= 0"));
                }
            }
            Self::RadialBlur(p) => {
                finite("radial_blur.strength", p.strength)?;
                if !(0.0..=MAX_RADIAL_STRENGTH).contains(&p.strength) {
                    return Err(VfxError::validation(format!(
                        "radial_blur.strength must be within [0, {MAX_RADIAL_STRENGTH}]"
                    )));
                }
                if let Some(c) = p.center
                    && !(c.x.is_finite() && c.y.is_finite())
                {
                    return Err(VfxError::validation("radial_blur.center must be finite"));
                }
            }
        }
        Ok(())
    }
}

/// Build a typed request from a kind name and a JSON parameter object.
///
/// Kind matching ignores case, surrounding whitespace and `-`/`_` separators. Missing
/// parameters take their defaults; unknown kinds fail with
/// [`VfxError::UnsupportedEffectKind`].
pub fn parse_effect(kind: &str, params: &serde_json::Value) -> VfxResult<EffectRequest> {
    let normalized: String = kind
        .trim()
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if normalized.is_empty() {
        return Err(VfxError::validation("effect kind must be non-empty"));
    }

    let req = match normalized.as_str() {
        "glow" => EffectRequest::Glow(decode_params(kind, params)?),
        "motionblur" => EffectRequest::MotionBlur(decode_params(kind, params)?),
        "shake" => EffectRequest::Shake(decode_params(kind, params)?),
        "glitch" => EffectRequest::Glitch(decode_params(kind, params)?),
        "radialblur" => EffectRequest::RadialBlur(decode_params(kind, params)?),
        _ => return Err(VfxError::unsupported_effect(kind.trim())),
    };
    req.validate()?;
    Ok(req)
}

fn decode_params<T>(kind: &str, params: &serde_json::Value) -> VfxResult<T>
where
    T: serde::de::DeserializeOwned + Default,
{
    if params.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(params.clone())
        .map_err(|e| VfxError::validation(format!("invalid params for effect '{kind}': {e}")))
}

fn finite(name: &str, v: f32) -> VfxResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(VfxError::validation(format!("{name} must be finite")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/request.rs"]
mod tests;
