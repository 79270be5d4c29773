pub(crate) mod vfx_engine;
