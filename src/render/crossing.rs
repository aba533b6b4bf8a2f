use crate::config::CrossPlotConfig;
use crate::foundation::core::{Point, with_alpha};
use crate::foundation::error::CrossPlotResult;
use crate::render::canvas::{DrawSurface, Pen};
use crate::render::layer::diagram_transform;
use crate::render::raster::Raster;

const LINE_WIDTH: f64 = 6.0;
const POINT_DIAMETER: f64 = 20.0;
const DROP_ALPHA: u8 = 40;
const TICK_HEIGHT: f64 = 5.0;

/// One value per rendered layer, taken at the crossing position. Rebuilt every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct CrossingSnapshot {
    values: Vec<f32>,
}

impl CrossingSnapshot {
    pub fn from_samples(values: Vec<f32>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

pub fn render_crossing(
    config: &CrossPlotConfig,
    snapshot: &CrossingSnapshot,
) -> CrossPlotResult<Raster> {
    let color = config.palette.crossing;
    let line = Pen::new(color, LINE_WIDTH);
    let drop = Pen::new(with_alpha(color, DROP_ALPHA), POINT_DIAMETER);
    let step = config.crossing_stage.point_step;

    let mut surface = DrawSurface::new(config.diagram_size)?;
    surface.set_transform(diagram_transform(config));

    let mut prev: Option<Point> = None;
    for (i, &v) in snapshot.values().iter().enumerate() {
        let x = i as f64 * step;
        let p = Point::new(x, f64::from(v));
        if let Some(prev) = prev {
            surface.stroke_line(prev, p, line);
        }
        surface.stroke_line(p, Point::new(x, 0.0), drop);
        surface.stroke_line(Point::new(x, TICK_HEIGHT), Point::new(x, 0.0), drop);
        surface.fill_circle(p, POINT_DIAMETER, color);
        prev = Some(p);
    }

    Ok(surface.finish())
}

#[cfg(test)]
#[path = "../../tests/unit/render/crossing.rs"]
mod tests;
