//! Run configuration.
//!
//! Every constant of the animation lives here so a run can be reproduced from one JSON file.
//! Missing fields fall back to the defaults of the reference animation.

use std::path::{Path, PathBuf};

use crate::data::dataset::{ColumnRoles, DatasetScale, RawDataset};
use crate::data::jitter::JitterTable;
use crate::foundation::core::{Canvas, Rgba8, Vec2};
use crate::foundation::error::{CrossPlotError, CrossPlotResult};

/// Full configuration of one animation run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrossPlotConfig {
    /// Directory receiving the PNG sequence.
    pub out_dir: PathBuf,
    /// Number of frames to produce.
    pub frame_count: u32,
    /// Size of the composed output frame.
    pub frame_size: Canvas,
    /// Size of each per-layer diagram and of the crossing diagram.
    pub diagram_size: Canvas,
    /// Horizontal offset of the diagram origin from the left edge.
    pub diagram_origin_x: f64,
    /// Which raw columns feed channels A, B and C.
    pub columns: ColumnRoles,
    /// Load-time multipliers.
    pub scale: DatasetScale,
    /// Dataset index sampled for the crossing diagram.
    pub position: usize,
    /// Configured layer count. The stack renders `layers - 1` of them.
    pub layers: u32,
    /// Jitter bound per layer is `(layers - zeta) * jitter_step`.
    pub jitter_step: u32,
    /// Seed string hashed into the jitter generator.
    pub seed: String,
    pub layer_stage: LayerStage,
    pub crossing_stage: CrossingStage,
    pub falloff: FalloffConfig,
    pub palette: Palette,
    /// Optional JSON file of `[time, c1, c2, c3]` rows replacing the built-in dataset.
    pub dataset_path: Option<PathBuf>,
}

/// Placement of the layered stack.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayerStage {
    pub shear: f64,
    /// Position of layer 0.
    pub origin: Vec2,
    /// Offset added per layer index.
    pub step: Vec2,
}

/// Placement and geometry of the crossing diagram.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrossingStage {
    pub shear: f64,
    pub offset: Vec2,
    /// Horizontal distance between consecutive crossing points.
    pub point_step: f64,
}

/// Blur and opacity progression across the stack.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FalloffConfig {
    pub sigma_base: f32,
    pub alpha_base: f32,
    /// Defaults to `sigma_base / layers`.
    pub sigma_decrement: Option<f32>,
    /// Defaults to `(1 - alpha_base) / layers`.
    pub alpha_increment: Option<f32>,
}

/// Straight RGBA8 colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    pub background: Rgba8,
    pub layer: Rgba8,
    /// Color of the topmost rendered layer.
    pub highlight: Rgba8,
    /// Marker fill inside layer point outlines.
    pub marker_fill: Rgba8,
    pub crossing: Rgba8,
}

impl Default for CrossPlotConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("out"),
            frame_count: 150,
            frame_size: Canvas::new(1920, 1080),
            diagram_size: Canvas::new(1200, 500),
            diagram_origin_x: 100.0,
            columns: ColumnRoles::default(),
            scale: DatasetScale::default(),
            position: 25,
            layers: 10,
            jitter_step: 5,
            seed: "Start".to_string(),
            layer_stage: LayerStage::default(),
            crossing_stage: CrossingStage::default(),
            falloff: FalloffConfig::default(),
            palette: Palette::default(),
            dataset_path: None,
        }
    }
}

impl Default for LayerStage {
    fn default() -> Self {
        Self {
            shear: -0.3,
            origin: Vec2::new(200.0, 200.0),
            step: Vec2::new(50.0, 50.0),
        }
    }
}

impl Default for CrossingStage {
    fn default() -> Self {
        Self {
            shear: 0.724,
            offset: Vec2::new(575.0, -500.0),
            point_step: 50.0,
        }
    }
}

impl Default for FalloffConfig {
    fn default() -> Self {
        Self {
            sigma_base: 3.0,
            alpha_base: 0.1,
            sigma_decrement: None,
            alpha_increment: None,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: [0, 0, 0, 255],
            layer: [0, 255, 255, 255],
            highlight: [255, 255, 255, 255],
            marker_fill: [0, 0, 0, 255],
            crossing: [255, 69, 0, 255],
        }
    }
}

impl CrossPlotConfig {
    /// Read a JSON configuration file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> CrossPlotResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| CrossPlotError::io(path, e))?;
        let cfg: Self = serde_json::from_str(&text).map_err(|e| {
            CrossPlotError::serde(format!("parse config '{}': {e}", path.display()))
        })?;
        Ok(cfg)
    }

    /// Number of layers drawn in the stack (and length of the crossing snapshot).
    pub fn rendered_layers(&self) -> u32 {
        self.layers.saturating_sub(1)
    }

    /// Index of the topmost rendered layer, drawn in the highlight color.
    pub fn highlight_layer(&self) -> u32 {
        self.layers.saturating_sub(2)
    }

    /// Check everything that does not depend on the dataset.
    pub fn validate(&self) -> CrossPlotResult<()> {
        self.frame_size.validate("frame_size")?;
        self.diagram_size.validate("diagram_size")?;
        if self.frame_count == 0 {
            return Err(CrossPlotError::validation("frame_count must be >= 1"));
        }
        if self.layers < 2 {
            return Err(CrossPlotError::validation(format!(
                "layers must be >= 2, got {}",
                self.layers
            )));
        }
        self.columns.validate()?;
        self.scale.validate()?;

        let finite = [
            ("diagram_origin_x", self.diagram_origin_x),
            ("layer_stage.shear", self.layer_stage.shear),
            ("layer_stage.origin.x", self.layer_stage.origin.x),
            ("layer_stage.origin.y", self.layer_stage.origin.y),
            ("layer_stage.step.x", self.layer_stage.step.x),
            ("layer_stage.step.y", self.layer_stage.step.y),
            ("crossing_stage.shear", self.crossing_stage.shear),
            ("crossing_stage.offset.x", self.crossing_stage.offset.x),
            ("crossing_stage.offset.y", self.crossing_stage.offset.y),
            ("crossing_stage.point_step", self.crossing_stage.point_step),
            ("falloff.sigma_base", f64::from(self.falloff.sigma_base)),
            ("falloff.alpha_base", f64::from(self.falloff.alpha_base)),
            (
                "falloff.sigma_decrement",
                f64::from(self.falloff.sigma_decrement.unwrap_or(0.0)),
            ),
            (
                "falloff.alpha_increment",
                f64::from(self.falloff.alpha_increment.unwrap_or(0.0)),
            ),
        ];
        for (name, v) in finite {
            if !v.is_finite() {
                return Err(CrossPlotError::validation(format!(
                    "{name} must be finite, got {v}"
                )));
            }
        }

        let f = self.falloff;
        let negative_step = f.sigma_decrement.is_some_and(|d| d < 0.0)
            || f.alpha_increment.is_some_and(|d| d < 0.0);
        if negative_step {
            return Err(CrossPlotError::validation(
                "falloff sigma_decrement and alpha_increment must be non-negative",
            ));
        }

        JitterTable::entries_for(u64::from(self.frame_count), self.layers)?;
        Ok(())
    }

    /// Load the raw dataset this configuration points at.
    pub fn load_dataset(&self) -> CrossPlotResult<RawDataset> {
        match &self.dataset_path {
            Some(path) => RawDataset::from_json_file(path),
            None => Ok(RawDataset::builtin()),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
