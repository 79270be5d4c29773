use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, Rgba8};
use crate::foundation::error::{VfxError, VfxResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::frame::FrameRGBA;

/// Options for [`FfmpegSink`] MP4 output.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output MP4 file path.
    pub out_path: PathBuf,
    /// Overwrite the output file if it already exists.
    pub overwrite: bool,
    /// Color that transparent pixels are flattened onto.
    pub background: Rgba8,
}

impl FfmpegSinkOpts {
    /// Overwriting options with a black background.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            background: Rgba8::BLACK,
        }
    }
}

/// Sink that streams opaque RGBA frames into a system `ffmpeg` process.
///
/// Output is h264 in yuv420p, which requires even dimensions.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    encoder: Option<Encoder>,
}

impl FfmpegSink {
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
        }
    }
}

/// A running `ffmpeg` child between `begin` and `end`.
struct Encoder {
    child: Child,
    stdin: ChildStdin,
    stderr: JoinHandle<std::io::Result<Vec<u8>>>,
    cfg: SinkConfig,
    opaque: Vec<u8>,
    last: Option<FrameIndex>,
}

impl Encoder {
    fn spawn(mut cmd: Command, cfg: SinkConfig) -> VfxResult<Self> {
        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| VfxError::encode(format!("spawn ffmpeg: {e}")))?;
        let (Some(stdin), Some(mut pipe)) = (child.stdin.take(), child.stderr.take()) else {
            return Err(VfxError::encode("ffmpeg pipes were not opened"));
        };
        // Drained on a thread so a chatty encoder cannot block on a full pipe.
        let stderr = std::thread::spawn(move || {
            let mut log = Vec::new();
            pipe.read_to_end(&mut log)?;
            Ok(log)
        });
        Ok(Self {
            child,
            stdin,
            stderr,
            cfg,
            opaque: vec![0; cfg.width as usize * cfg.height as usize * 4],
            last: None,
        })
    }

    fn write(&mut self, idx: FrameIndex, frame: &FrameRGBA, background: Rgba8) -> VfxResult<()> {
        if self.last.is_some_and(|last| idx <= last) {
            return Err(VfxError::encode(format!(
                "frame {} arrived after frame {}",
                idx.0,
                self.last.map_or(0, |l| l.0)
            )));
        }
        if (frame.width, frame.height) != (self.cfg.width, self.cfg.height) {
            return Err(VfxError::validation(format!(
                "frame is {}x{}, encoder expects {}x{}",
                frame.width, frame.height, self.cfg.width, self.cfg.height
            )));
        }
        flatten_over_background(&mut self.opaque, &frame.data, background)?;
        self.stdin
            .write_all(&self.opaque)
            .map_err(|e| VfxError::encode(format!("write frame {} to ffmpeg: {e}", idx.0)))?;
        self.last = Some(idx);
        Ok(())
    }

    fn finish(self) -> VfxResult<()> {
        let Self {
            mut child,
            stdin,
            stderr,
            ..
        } = self;
        // Closing stdin is the end-of-stream signal.
        drop(stdin);
        let status = child
            .wait()
            .map_err(|e| VfxError::encode(format!("wait for ffmpeg: {e}")))?;
        let log = stderr
            .join()
            .map_err(|_| VfxError::encode("ffmpeg stderr reader panicked"))?
            .map_err(|e| VfxError::encode(format!("read ffmpeg stderr: {e}")))?;
        if status.success() {
            return Ok(());
        }
        Err(VfxError::encode(format!(
            "ffmpeg failed ({status}): {}",
            String::from_utf8_lossy(&log).trim()
        )))
    }
}

/// Check a sink configuration against what the MP4 encoder accepts.
pub fn validate_encode_config(cfg: &SinkConfig) -> VfxResult<()> {
    if cfg.fps.num == 0 || cfg.fps.den == 0 {
        return Err(VfxError::validation("fps must be non-zero"));
    }
    let (w, h) = (cfg.width, cfg.height);
    if w == 0 || h == 0 || !w.is_multiple_of(2) || !h.is_multiple_of(2) {
        return Err(VfxError::validation(format!(
            "MP4 output needs even, non-zero dimensions, got {w}x{h}"
        )));
    }
    Ok(())
}

/// `ffmpeg` invocation reading raw RGBA from stdin and writing h264 MP4.
fn encode_command(opts: &FfmpegSinkOpts, cfg: &SinkConfig) -> Command {
    let mut cmd = Command::new("ffmpeg");
    cmd.arg(if opts.overwrite { "-y" } else { "-n" })
        .args(["-loglevel", "error"])
        .args(["-f", "rawvideo", "-pix_fmt", "rgba"])
        .arg("-s")
        .arg(format!("{}x{}", cfg.width, cfg.height))
        // Input rate must precede `-i` for raw input.
        .arg("-r")
        .arg(format!("{}/{}", cfg.fps.num, cfg.fps.den))
        .args(["-i", "pipe:0", "-an"])
        .args(["-c:v", "libx264", "-pix_fmt", "yuv420p"])
        .args(["-movflags", "+faststart"])
        .arg(&opts.out_path);
    cmd
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> VfxResult<()> {
        validate_encode_config(&cfg)?;
        let out = &self.opts.out_path;
        ensure_parent_dir(out)?;
        if !self.opts.overwrite && out.exists() {
            return Err(VfxError::validation(format!(
                "'{}' exists and overwrite is off",
                out.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(VfxError::encode("ffmpeg was not found on PATH"));
        }

        let encoder = Encoder::spawn(encode_command(&self.opts, &cfg), cfg)?;
        tracing::debug!(
            out = %out.display(),
            width = cfg.width,
            height = cfg.height,
            "ffmpeg started"
        );
        self.encoder = Some(encoder);
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> VfxResult<()> {
        let background = self.opts.background;
        self.encoder
            .as_mut()
            .ok_or_else(|| VfxError::encode("ffmpeg sink is not running"))?
            .write(idx, frame, background)
    }

    fn end(&mut self) -> VfxResult<()> {
        self.encoder
            .take()
            .ok_or_else(|| VfxError::encode("ffmpeg sink is not running"))?
            .finish()
    }
}

/// Composite straight-alpha RGBA8 over an opaque color; every output pixel is opaque.
fn flatten_over_background(dst: &mut [u8], src: &[u8], bg: Rgba8) -> VfxResult<()> {
    if dst.len() != src.len() || !src.len().is_multiple_of(4) {
        return Err(VfxError::validation(format!(
            "cannot flatten {} bytes into {}",
            src.len(),
            dst.len()
        )));
    }
    let under = [bg.r, bg.g, bg.b];
    for (out, px) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let alpha = u16::from(px[3]);
        for ((o, &fg), &back) in out.iter_mut().zip(px).zip(&under) {
            let mixed =
                mul_div255_u16(u16::from(fg), alpha) + mul_div255_u16(u16::from(back), 255 - alpha);
            *o = mixed.min(255) as u8;
        }
        out[3] = 255;
    }
    Ok(())
}

/// Create the directory `path` will be written into, if it has one.
pub fn ensure_parent_dir(path: &Path) -> VfxResult<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir).map_err(|e| {
            VfxError::validation(format!("create directory '{}': {e}", dir.display()))
        }),
        _ => Ok(()),
    }
}

/// Return `true` when `ffmpeg -version` runs successfully.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
