//! One layer of the stack: a polyline over the rotated dataset with drop lines and markers.

use crate::config::CrossPlotConfig;
use crate::data::dataset::NormalizedDataset;
use crate::foundation::core::{Affine, FrameIndex, Point, with_alpha};
use crate::foundation::error::{CrossPlotError, CrossPlotResult};
use crate::render::canvas::{DrawSurface, Pen};
use crate::render::raster::Raster;

const LINE_WIDTH: f64 = 4.0;
const DROP_LINE_ALPHA: u8 = 80;
const MARKER_DIAMETER: f64 = 10.0;
const MARKER_OUTLINE_WIDTH: f64 = 2.0;

/// A rendered layer and the value it sampled at the crossing position.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerRender {
    pub raster: Raster,
    pub crossing_sample: f32,
}

/// Diagram space: origin at the bottom-left (shifted right by the configured margin), y up.
pub fn diagram_transform(config: &CrossPlotConfig) -> Affine {
    Affine::translate((
        config.diagram_origin_x,
        f64::from(config.diagram_size.height),
    )) * Affine::scale_non_uniform(1.0, -1.0)
}

/// Sampled points in dataset order: `x` from the row itself, value from the rotated row.
pub fn layer_points(
    data: &NormalizedDataset,
    tau: FrameIndex,
    zeta: u32,
    jitter: u32,
) -> Vec<Point> {
    data.rows()
        .iter()
        .enumerate()
        .map(|(index, row)| {
            Point::new(
                f64::from(row.x),
                f64::from(data.sample(index, tau.0, zeta, jitter)),
            )
        })
        .collect()
}

pub fn render_layer(
    config: &CrossPlotConfig,
    data: &NormalizedDataset,
    tau: FrameIndex,
    zeta: u32,
    jitter: u32,
) -> CrossPlotResult<LayerRender> {
    if config.position >= data.len() {
        return Err(CrossPlotError::validation(format!(
            "position {} is outside the dataset ({} rows)",
            config.position,
            data.len()
        )));
    }
    let crossing_sample = data.sample(config.position, tau.0, zeta, jitter);
    let points = layer_points(data, tau, zeta, jitter);

    let color = if zeta == config.highlight_layer() {
        config.palette.highlight
    } else {
        config.palette.layer
    };
    let line = Pen::new(color, LINE_WIDTH);
    let drop = Pen::new(with_alpha(color, DROP_LINE_ALPHA), LINE_WIDTH);
    let outline = Pen::new(color, MARKER_OUTLINE_WIDTH);

    let mut surface = DrawSurface::new(config.diagram_size)?;
    surface.set_transform(diagram_transform(config));

    for (i, &p) in points.iter().enumerate() {
        if i > 0 {
            surface.stroke_line(points[i - 1], p, line);
        }
        surface.stroke_line(p, Point::new(p.x, 0.0), drop);
    }

    // Markers go on top of every line.
    for &p in &points {
        surface.fill_circle(p, MARKER_DIAMETER, config.palette.marker_fill);
        surface.stroke_circle(p, MARKER_DIAMETER, outline);
    }

    Ok(LayerRender {
        raster: surface.finish(),
        crossing_sample,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/layer.rs"]
mod tests;
