//! Encoding sinks.
//!
//! Sinks consume composited frames in timeline order and are driven by [`crate::render_scene`].

/// MP4 output through the system `ffmpeg`.
pub mod ffmpeg;
/// Frame sink trait and the in-memory sink.
pub mod sink;
