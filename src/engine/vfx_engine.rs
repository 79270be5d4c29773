use crate::effects::processor::apply_effect;
use crate::effects::request::{EffectRequest, parse_effect};
use crate::foundation::error::VfxResult;
use crate::foundation::rng::FxRng;
use crate::particles::config::ParticleSystemConfig;
use crate::particles::system::ParticleSystem;
use crate::render::frame::FrameRGBA;

/// Stable handle to a particle system registered with a [`VfxEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SystemId(u64);

/// How long a pending effect request stays queued.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectLifetime {
    /// Applied on every render until [`VfxEngine::clear_effects`].
    #[default]
    Persistent,
    /// Applied by the next render only.
    OneShot,
}

/// An effect request waiting in the engine queue.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingEffect {
    /// The typed request.
    pub request: EffectRequest,
    /// Queue lifetime.
    pub lifetime: EffectLifetime,
}

/// Orchestrates particle systems and the post-processing stack.
///
/// Each [`VfxEngine::render`] draws every system onto a copy of the base frame in registration
/// order, folds the pending effects over it in enqueue order, and keeps the result as the
/// previous frame for motion blur.
#[derive(Debug)]
pub struct VfxEngine {
    systems: Vec<(SystemId, ParticleSystem)>,
    effects: Vec<PendingEffect>,
    previous: Option<FrameRGBA>,
    rng: FxRng,
    next_id: u64,
}

impl Default for VfxEngine {
    fn default() -> Self {
        Self::new(0)
    }
}

impl VfxEngine {
    /// Create an empty engine. All randomness derives from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            systems: Vec::new(),
            effects: Vec::new(),
            previous: None,
            rng: FxRng::seeded(seed),
            next_id: 0,
        }
    }

    /// Validate `config` and register a new particle system.
    pub fn add_particle_system(&mut self, config: ParticleSystemConfig) -> VfxResult<SystemId> {
        let system = ParticleSystem::new(config, self.rng.fork())?;
        let id = SystemId(self.next_id);
        self.next_id += 1;
        self.systems.push((id, system));
        tracing::debug!(system = id.0, "registered particle system");
        Ok(id)
    }

    /// Borrow a registered system.
    pub fn system(&self, id: SystemId) -> Option<&ParticleSystem> {
        self.systems
            .iter()
            .find_map(|(sid, s)| (*sid == id).then_some(s))
    }

    /// Mutably borrow a registered system, e.g. to move its emitter.
    pub fn system_mut(&mut self, id: SystemId) -> Option<&mut ParticleSystem> {
        self.systems
            .iter_mut()
            .find_map(|(sid, s)| (*sid == id).then_some(s))
    }

    /// Number of registered systems.
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Live particles across every system.
    pub fn particle_count(&self) -> usize {
        self.systems.iter().map(|(_, s)| s.particle_count()).sum()
    }

    /// Queue a persistent effect request.
    pub fn add_effect(&mut self, request: EffectRequest) -> VfxResult<()> {
        self.push_effect(request, EffectLifetime::Persistent)
    }

    /// Queue an effect request consumed by the next render.
    pub fn add_one_shot_effect(&mut self, request: EffectRequest) -> VfxResult<()> {
        self.push_effect(request, EffectLifetime::OneShot)
    }

    /// Parse `kind`/`params` with [`parse_effect`] and queue the result as persistent.
    pub fn add_effect_by_kind(&mut self, kind: &str, params: &serde_json::Value) -> VfxResult<()> {
        let request = parse_effect(kind, params)?;
        self.add_effect(request)
    }

    /// Validate `request` and append it to the queue. Rejected requests leave the queue as is.
    pub fn push_effect(
        &mut self,
        request: EffectRequest,
        lifetime: EffectLifetime,
    ) -> VfxResult<()> {
        request.validate()?;
        self.effects.push(PendingEffect { request, lifetime });
        Ok(())
    }

    /// Pending effect requests in application order.
    pub fn pending_effects(&self) -> &[PendingEffect] {
        &self.effects
    }

    /// Drop every pending effect request.
    pub fn clear_effects(&mut self) {
        self.effects.clear();
    }

    /// Drop every particle system together with its particles.
    pub fn clear_particles(&mut self) {
        self.systems.clear();
    }

    /// The most recently rendered frame, if any.
    pub fn previous_frame(&self) -> Option<&FrameRGBA> {
        self.previous.as_ref()
    }

    /// Advance every system by `dt` seconds, in registration order.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn update(&mut self, dt: f64) -> VfxResult<()> {
        for (_, system) in &mut self.systems {
            system.update(dt)?;
        }
        Ok(())
    }

    /// Composite particles and pending effects over `base`.
    ///
    /// `base` is left untouched. One-shot requests are removed once applied; persistent ones
    /// stay queued.
    #[tracing::instrument(
        level = "debug",
        skip(self, base),
        fields(width = base.width, height = base.height)
    )]
    pub fn render(&mut self, base: &FrameRGBA) -> VfxResult<FrameRGBA> {
        base.validate()?;
        let mut frame = base.clone();

        for (_, system) in &self.systems {
            system.render(&mut frame);
        }

        for pending in &self.effects {
            frame = apply_effect(
                &frame,
                self.previous.as_ref(),
                &pending.request,
                &mut self.rng,
            )?;
            tracing::trace!(kind = pending.request.kind_name(), "applied effect");
        }

        self.effects
            .retain(|e| e.lifetime == EffectLifetime::Persistent);
        self.previous = Some(frame.clone());
        Ok(frame)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/vfx_engine.rs"]
mod tests;
