use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::effects::request::EffectRequest;
use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Rgba8, Vec2};
use crate::foundation::error::{VfxError, VfxResult};
use crate::particles::config::ParticleSystemConfig;

/// JSON-facing description of a particle/effect shot.
///
/// A scene is plain data: the timeline driver in [`crate::render_scene`] turns it into engine
/// calls frame by frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VfxScene {
    /// Output dimensions.
    pub canvas: Canvas,
    /// Output frame rate; also fixes the simulation step `1 / fps`.
    pub fps: Fps,
    /// Number of frames to render.
    pub duration: u64,
    /// Seed for every random draw in the shot.
    #[serde(default)]
    pub seed: u64,
    /// Color of the base frame each composite starts from.
    #[serde(default = "default_background")]
    pub background: Rgba8,
    /// Particle emitters, in registration (and draw) order.
    #[serde(default)]
    pub emitters: Vec<EmitterDef>,
    /// One-off particle bursts.
    #[serde(default)]
    pub bursts: Vec<BurstDef>,
    /// Effect schedule, applied in listed order.
    #[serde(default)]
    pub effects: Vec<ScheduledEffect>,
}

fn default_background() -> Rgba8 {
    Rgba8::BLACK
}

/// One emitter in a [`VfxScene`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmitterDef {
    pub config: ParticleSystemConfig,
    /// Emitter velocity in pixels per second, applied once the emitter has started.
    #[serde(default)]
    pub motion: Vec2,
    /// First frame on which the emitter is simulated.
    #[serde(default)]
    pub start: u64,
}

/// A burst of particles fired from an emitter on a given frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BurstDef {
    pub frame: u64,
    /// Index into [`VfxScene::emitters`].
    pub emitter: usize,
    pub count: usize,
    /// Fan particles out over a full circle instead of using the template velocity.
    #[serde(default)]
    pub radial: bool,
}

/// An effect applied on every `every`-th frame of `range`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduledEffect {
    pub effect: EffectRequest,
    pub range: FrameRange,
    #[serde(default = "default_every")]
    pub every: u64,
}

fn default_every() -> u64 {
    1
}

impl ScheduledEffect {
    /// Return `true` when the effect fires on frame `f`.
    pub fn is_active(&self, f: FrameIndex) -> bool {
        self.range.contains(f) && self.every > 0 && (f.0 - self.range.start.0) % self.every == 0
    }
}

impl VfxScene {
    /// Parse a scene from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> VfxResult<Self> {
        serde_json::from_reader(r).map_err(|e| VfxError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON string.
    pub fn from_json_str(s: &str) -> VfxResult<Self> {
        serde_json::from_str(s).map_err(|e| VfxError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> VfxResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            VfxError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Frame range covered by the scene, `[0, duration)`.
    pub fn frame_range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.duration),
        }
    }

    /// Check everything the timeline driver relies on.
    pub fn validate(&self) -> VfxResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(VfxError::validation("canvas width/height must be non-zero"));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        if self.duration == 0 {
            return Err(VfxError::validation("duration must be > 0"));
        }

        for (i, e) in self.emitters.iter().enumerate() {
            e.config
                .validate()
                .map_err(|err| VfxError::validation(format!("emitters[{i}]: {err}")))?;
            if !e.motion.x.is_finite() || !e.motion.y.is_finite() {
                return Err(VfxError::validation(format!(
                    "emitters[{i}].motion must be finite"
                )));
            }
        }

        for (i, b) in self.bursts.iter().enumerate() {
            if b.emitter >= self.emitters.len() {
                return Err(VfxError::validation(format!(
                    "bursts[{i}] references emitter {} but only {} are defined",
                    b.emitter,
                    self.emitters.len()
                )));
            }
            if b.frame >= self.duration {
                return Err(VfxError::validation(format!(
                    "bursts[{i}].frame {} is outside duration {}",
                    b.frame, self.duration
                )));
            }
            let start = self.emitters[b.emitter].start;
            if b.frame < start {
                return Err(VfxError::validation(format!(
                    "bursts[{i}] fires on frame {} but emitter {} starts on frame {start}",
                    b.frame, b.emitter
                )));
            }
        }

        for (i, s) in self.effects.iter().enumerate() {
            s.effect
                .validate()
                .map_err(|err| VfxError::validation(format!("effects[{i}]: {err}")))?;
            if s.range.start.0 > s.range.end.0 || s.range.end.0 > self.duration {
                return Err(VfxError::validation(format!(
                    "effects[{i}].range must lie within [0, {}]",
                    self.duration
                )));
            }
            if s.every == 0 {
                return Err(VfxError::validation(format!("effects[{i}].every must be >= 1")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
