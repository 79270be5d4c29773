pub(crate) mod blur;
pub(crate) mod processor;
pub(crate) mod request;
