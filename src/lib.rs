//! Particle simulation and post-processing effects for programmatic video.
//!
//! The core is a [`VfxEngine`] that owns particle systems and a queue of effect requests:
//!
//! - Register systems from a [`ParticleSystemConfig`] (or a preset such as [`fire_config`])
//! - Advance the simulation with [`VfxEngine::update`]
//! - Composite particles and effects over a base frame with [`VfxEngine::render`]
//!
//! A [`VfxScene`] JSON document drives the engine over a timeline with [`render_scene`], feeding
//! any [`FrameSink`] (in-memory, or MP4 through the system `ffmpeg`).
//!
//! The library never installs a `tracing` subscriber.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod effects;
pub(crate) mod engine;
/// Encoding sinks.
pub mod encode;
pub(crate) mod particles;
pub(crate) mod render;
/// JSON scene documents.
pub mod scene;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Point, Rgba8, Vec2};
pub use crate::foundation::error::{VfxError, VfxResult};
pub use crate::foundation::rng::FxRng;

pub use crate::particles::config::{
    DEFAULT_COLOR, DEFAULT_EMISSION_RATE, DEFAULT_LIFETIME_SECS, DEFAULT_SIZE_PX,
    DEFAULT_VELOCITY, ParticleSystemConfig, ParticleTemplate,
};
pub use crate::particles::particle::Particle;
pub use crate::particles::presets::{dust_trail_config, explosion_config, fire_config};
pub use crate::particles::system::{ParticleSystem, RADIAL_BURST_SPEED};

pub use crate::effects::blur::blur_rgba8;
pub use crate::effects::processor::{
    apply_effect, glitch, glow, motion_blur, radial_blur, shake, shake_by,
};
pub use crate::effects::request::{
    EffectRequest, GlitchParams, GlowParams, MAX_GLOW_RADIUS, MAX_RADIAL_STRENGTH,
    MotionBlurParams, RadialBlurParams, ShakeParams, parse_effect,
};

pub use crate::engine::vfx_engine::{EffectLifetime, PendingEffect, SystemId, VfxEngine};

pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, ensure_parent_dir, is_ffmpeg_on_path};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::render::frame::FrameRGBA;
pub use crate::render::pipeline::{RenderStats, render_scene, render_scene_frame};
pub use crate::render::raster::{fill_circle, over};
pub use crate::scene::model::{BurstDef, EmitterDef, ScheduledEffect, VfxScene};
