//! Immediate-mode drawing surface backed by `vello_cpu`.
//!
//! Geometry is built with `kurbo` in the crate's coordinate space and converted at the boundary.
//! The current transform applies to every subsequent draw until it is reset.

use std::sync::Arc;

use kurbo::{BezPath, Circle, Shape as _};

use crate::foundation::core::{Affine, Canvas, Point, Rgba8, Vec2};
use crate::foundation::error::CrossPlotResult;
use crate::render::raster::Raster;

const PATH_TOLERANCE: f64 = 0.1;

/// Stroke descriptor: straight-alpha color and line width in local units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pen {
    pub color: Rgba8,
    pub width: f64,
}

impl Pen {
    pub const fn new(color: Rgba8, width: f64) -> Self {
        Self { color, width }
    }
}

pub struct DrawSurface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    transform: Affine,
}

impl DrawSurface {
    /// Transparent surface of the given size.
    pub fn new(size: Canvas) -> CrossPlotResult<Self> {
        let (width, height) = size.to_u16()?;
        Ok(Self {
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
            transform: Affine::IDENTITY,
        })
    }

    pub fn size(&self) -> Canvas {
        Canvas::new(u32::from(self.width), u32::from(self.height))
    }

    pub fn transform(&self) -> Affine {
        self.transform
    }

    pub fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    pub fn reset_transform(&mut self) {
        self.transform = Affine::IDENTITY;
    }

    /// Cover the whole surface with `color`, ignoring the current transform.
    pub fn clear(&mut self, color: Rgba8) {
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
    }

    pub fn stroke_line(&mut self, from: Point, to: Point, pen: Pen) {
        let mut path = BezPath::new();
        path.move_to(from);
        path.line_to(to);
        self.stroke(&path, pen);
    }

    pub fn fill_circle(&mut self, center: Point, diameter: f64, color: Rgba8) {
        let path = Circle::new(center, diameter / 2.0).to_path(PATH_TOLERANCE);
        self.prepare(color);
        self.ctx.fill_path(&bezpath_to_cpu(&path));
    }

    pub fn stroke_circle(&mut self, center: Point, diameter: f64, pen: Pen) {
        let path = Circle::new(center, diameter / 2.0).to_path(PATH_TOLERANCE);
        self.stroke(&path, pen);
    }

    /// Draw `raster` with its top-left corner at `offset`, under the current transform.
    pub fn draw_raster(&mut self, raster: &Raster, offset: Vec2) -> CrossPlotResult<()> {
        let pixmap = raster.to_pixmap()?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };

        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_transform(affine_to_cpu(self.transform * Affine::translate(offset)));
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(raster.width),
            f64::from(raster.height),
        ));
        Ok(())
    }

    /// Rasterize everything drawn so far.
    pub fn finish(mut self) -> Raster {
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);
        Raster::from_pixmap(&pixmap)
    }

    fn prepare(&mut self, color: Rgba8) {
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(self.transform));
        self.ctx.set_paint(color_to_cpu(color));
    }

    fn stroke(&mut self, path: &BezPath, pen: Pen) {
        self.prepare(pen.color);
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(pen.width));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }
}

fn color_to_cpu([r, g, b, a]: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
