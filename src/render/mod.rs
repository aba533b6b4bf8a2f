pub(crate) mod canvas;
pub(crate) mod compositor;
pub(crate) mod crossing;
pub(crate) mod layer;
pub(crate) mod pipeline;
pub(crate) mod raster;
