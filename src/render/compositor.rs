//! Frame assembly.
//!
//! Stage 1 draws the layer stack under the layer shear, each layer blurred and faded according
//! to its depth and offset diagonally from the previous one. Stage 2 draws the crossing diagram
//! on top under its own shear. The crossing snapshot is assembled from the values the layers
//! return, so nothing from a previous frame can leak into it.

use crate::config::CrossPlotConfig;
use crate::data::dataset::NormalizedDataset;
use crate::effects::fx::LayerFx;
use crate::foundation::core::{FrameIndex, shear_y};
use crate::foundation::error::{CrossPlotError, CrossPlotResult};
use crate::render::canvas::DrawSurface;
use crate::render::crossing::{CrossingSnapshot, render_crossing};
use crate::render::layer::render_layer;
use crate::render::raster::Raster;

/// Blur/opacity progression: `sigma(zeta) = sigma_base - sigma_decrement * zeta`,
/// `alpha(zeta) = alpha_base + alpha_increment * zeta`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerFalloff {
    pub sigma_base: f32,
    pub sigma_decrement: f32,
    pub alpha_base: f32,
    pub alpha_increment: f32,
}

impl LayerFalloff {
    pub fn from_config(config: &CrossPlotConfig) -> Self {
        let layers = config.layers.max(1) as f32;
        let f = config.falloff;
        Self {
            sigma_base: f.sigma_base,
            sigma_decrement: f
                .sigma_decrement
                .unwrap_or((f.sigma_base / layers).max(0.0)),
            alpha_base: f.alpha_base,
            alpha_increment: f
                .alpha_increment
                .unwrap_or(((1.0 - f.alpha_base) / layers).max(0.0)),
        }
    }

    pub fn sigma(&self, zeta: u32) -> f32 {
        self.sigma_base - self.sigma_decrement * zeta as f32
    }

    pub fn alpha(&self, zeta: u32) -> f32 {
        self.alpha_base + self.alpha_increment * zeta as f32
    }

    pub fn fx(&self, zeta: u32) -> LayerFx {
        LayerFx {
            sigma: self.sigma(zeta),
            alpha: self.alpha(zeta),
        }
    }
}

/// A finished frame plus the snapshot its crossing diagram was drawn from.
#[derive(Clone, Debug, PartialEq)]
pub struct ComposedFrame {
    pub raster: Raster,
    pub snapshot: CrossingSnapshot,
}

pub struct FrameCompositor<'a> {
    config: &'a CrossPlotConfig,
    data: &'a NormalizedDataset,
    falloff: LayerFalloff,
}

impl<'a> FrameCompositor<'a> {
    pub fn new(config: &'a CrossPlotConfig, data: &'a NormalizedDataset) -> Self {
        Self {
            config,
            data,
            falloff: LayerFalloff::from_config(config),
        }
    }

    pub fn falloff(&self) -> LayerFalloff {
        self.falloff
    }

    /// Compose frame `tau`. `jitter` holds one value per rendered layer.
    #[tracing::instrument(level = "debug", skip(self, jitter))]
    pub fn compose(&self, tau: FrameIndex, jitter: &[u32]) -> CrossPlotResult<ComposedFrame> {
        let layers = self.config.rendered_layers() as usize;
        if jitter.len() != layers {
            return Err(CrossPlotError::render(format!(
                "frame {} has {} jitter values for {layers} layers",
                tau.0,
                jitter.len()
            )));
        }

        let mut surface = DrawSurface::new(self.config.frame_size)?;
        surface.clear(self.config.palette.background);

        let stage = self.config.layer_stage;
        surface.set_transform(shear_y(stage.shear));
        let mut samples = Vec::with_capacity(layers);
        for (zeta, &j) in (0u32..).zip(jitter) {
            let layer = render_layer(self.config, self.data, tau, zeta, j)?;
            let faded = self.falloff.fx(zeta).apply(&layer.raster)?;
            surface.draw_raster(&faded, stage.origin + stage.step * f64::from(zeta))?;
            samples.push(layer.crossing_sample);
        }
        surface.reset_transform();

        let snapshot = CrossingSnapshot::from_samples(samples);
        let crossing = self.config.crossing_stage;
        surface.set_transform(shear_y(crossing.shear));
        let diagram = render_crossing(self.config, &snapshot)?;
        surface.draw_raster(&diagram, crossing.offset)?;
        surface.reset_transform();

        Ok(ComposedFrame {
            raster: surface.finish(),
            snapshot,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
