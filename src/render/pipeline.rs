use crate::encode::sink::{FrameSink, SinkConfig};
use crate::engine::vfx_engine::{SystemId, VfxEngine};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{VfxError, VfxResult};
use crate::render::frame::FrameRGBA;
use crate::scene::model::VfxScene;

/// Summary of a timeline render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames handed to the sink.
    pub frames: u64,
    /// Largest live particle count observed after any simulation step.
    pub peak_particles: usize,
}

/// Render every frame of `scene` into `sink`.
///
/// Each frame runs: emitter start and motion, scheduled bursts, one simulation step of
/// `1 / fps` seconds, scheduled effects (queued one-shot), then a composite over the scene
/// background.
#[tracing::instrument(level = "debug", skip_all, fields(frames = scene.duration))]
pub fn render_scene(scene: &VfxScene, sink: &mut dyn FrameSink) -> VfxResult<RenderStats> {
    let mut timeline = Timeline::new(scene)?;
    sink.begin(SinkConfig {
        width: scene.canvas.width,
        height: scene.canvas.height,
        fps: scene.fps,
    })?;

    let range = scene.frame_range();
    let log_every = u64::from(scene.fps.num.div_ceil(scene.fps.den)).max(1);
    let mut stats = RenderStats::default();
    for f in range.start.0..range.end.0 {
        let frame = timeline.step(FrameIndex(f))?;
        sink.push_frame(FrameIndex(f), &frame)?;
        stats.frames += 1;
        stats.peak_particles = stats.peak_particles.max(timeline.engine.particle_count());
        if (f + 1).is_multiple_of(log_every) {
            tracing::info!(
                frame = f + 1,
                of = range.len_frames(),
                particles = timeline.engine.particle_count(),
                "render progress"
            );
        }
    }

    sink.end()?;
    tracing::info!(
        frames = stats.frames,
        peak_particles = stats.peak_particles,
        "render finished"
    );
    Ok(stats)
}

/// Simulate `scene` up to and including `frame` and return that composite.
pub fn render_scene_frame(scene: &VfxScene, frame: FrameIndex) -> VfxResult<FrameRGBA> {
    if frame.0 >= scene.duration {
        return Err(VfxError::validation(format!(
            "frame {} is outside duration {}",
            frame.0, scene.duration
        )));
    }
    let mut timeline = Timeline::new(scene)?;
    let mut last = None;
    for f in 0..=frame.0 {
        last = Some(timeline.step(FrameIndex(f))?);
    }
    last.ok_or_else(|| VfxError::evaluation("no frame rendered"))
}

/// Engine state for one pass over a scene's timeline.
struct Timeline<'a> {
    scene: &'a VfxScene,
    engine: VfxEngine,
    /// Registered system per emitter; `None` until the emitter's start frame.
    systems: Vec<Option<SystemId>>,
    background: FrameRGBA,
    dt: f64,
}

impl<'a> Timeline<'a> {
    fn new(scene: &'a VfxScene) -> VfxResult<Self> {
        scene.validate()?;
        Ok(Self {
            scene,
            engine: VfxEngine::new(scene.seed),
            systems: vec![None; scene.emitters.len()],
            background: FrameRGBA::filled(
                scene.canvas.width,
                scene.canvas.height,
                scene.background,
            ),
            dt: scene.fps.frame_duration_secs(),
        })
    }

    fn step(&mut self, f: FrameIndex) -> VfxResult<FrameRGBA> {
        for (def, slot) in self.scene.emitters.iter().zip(self.systems.iter_mut()) {
            match *slot {
                Some(id) => {
                    if let Some(system) = self.engine.system_mut(id) {
                        let moved = system.emitter_position() + def.motion * self.dt;
                        system.set_emitter_position(moved);
                    }
                }
                None if def.start == f.0 => {
                    *slot = Some(self.engine.add_particle_system(def.config.clone())?);
                }
                None => {}
            }
        }

        for burst in self.scene.bursts.iter().filter(|b| b.frame == f.0) {
            let system = self.systems[burst.emitter]
                .and_then(|id| self.engine.system_mut(id))
                .ok_or_else(|| {
                    VfxError::validation(format!(
                        "burst on frame {} fires before emitter {} starts",
                        f.0, burst.emitter
                    ))
                })?;
            if burst.radial {
                system.emit_radial_burst(burst.count);
            } else {
                system.emit(burst.count);
            }
            tracing::debug!(frame = f.0, emitter = burst.emitter, count = burst.count, "burst");
        }

        self.engine.update(self.dt)?;

        for scheduled in self.scene.effects.iter().filter(|s| s.is_active(f)) {
            self.engine.add_one_shot_effect(scheduled.effect.clone())?;
        }

        self.engine.render(&self.background)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
