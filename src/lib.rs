//! CrossPlot renders a deterministic animated diagram: a sheared stack of progressively
//! sharper layer plots with a crossing detail view that samples one position of every layer.
//!
//! - Load a [`CrossPlotConfig`] and a [`RawDataset`]
//! - Run an [`AnimationDriver`] into a [`FrameSink`], or render one frame with
//!   [`render_single_frame`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod config;
pub(crate) mod data;
pub(crate) mod effects;
pub(crate) mod encode;
pub(crate) mod render;

pub use crate::foundation::core::{
    Affine, Canvas, FrameIndex, Point, Rgba8, Vec2, shear_y, with_alpha,
};
pub use crate::foundation::error::{CrossPlotError, CrossPlotResult};

pub use crate::config::{CrossPlotConfig, CrossingStage, FalloffConfig, LayerStage, Palette};
pub use crate::data::dataset::{
    BUILTIN_ROWS, ColumnRoles, DataRow, DatasetScale, MIX_STEP, NormalizedDataset, RawDataset,
};
pub use crate::data::jitter::{JitterRng, JitterTable, layer_bound};
pub use crate::effects::blend::{attenuate, opacity_byte};
pub use crate::effects::blur::{blur_radius, gaussian_blur};
pub use crate::effects::fx::LayerFx;
pub use crate::encode::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig, write_png};
pub use crate::render::canvas::{DrawSurface, Pen};
pub use crate::render::compositor::{ComposedFrame, FrameCompositor, LayerFalloff};
pub use crate::render::crossing::{CrossingSnapshot, render_crossing};
pub use crate::render::layer::{LayerRender, diagram_transform, layer_points, render_layer};
pub use crate::render::pipeline::{
    AnimationDriver, DriverState, RenderStats, RenderThreading, render_single_frame,
};
pub use crate::render::raster::Raster;
