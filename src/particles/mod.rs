pub(crate) mod config;
pub(crate) mod particle;
pub(crate) mod presets;
pub(crate) mod system;
