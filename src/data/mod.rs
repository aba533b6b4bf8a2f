pub(crate) mod dataset;
pub(crate) mod jitter;
