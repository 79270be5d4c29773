/// Convenience result type used across the VFX engine.
pub type VfxResult<T> = Result<T, VfxError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum VfxError {
    /// Invalid user-provided configuration, parameters or buffers.
    #[error("validation error: {0}")]
    Validation(String),

    /// An effect kind outside the supported set was requested.
    #[error("unsupported effect kind '{0}'")]
    UnsupportedEffectKind(String),

    /// Errors while simulating or compositing a frame.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors while handing frames to an encoder.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VfxError {
    /// Build a [`VfxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VfxError::UnsupportedEffectKind`] value.
    pub fn unsupported_effect(kind: impl Into<String>) -> Self {
        Self::UnsupportedEffectKind(kind.into())
    }

    /// Build a [`VfxError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`VfxError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`VfxError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
