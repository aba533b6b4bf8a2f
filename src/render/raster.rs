use crate::foundation::core::Canvas;
use crate::foundation::error::{CrossPlotError, CrossPlotResult};
use crate::foundation::math::{premul_rgba8, unpremul_rgba8};

/// Premultiplied RGBA8 pixel buffer, row-major, top row first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Raster {
    pub fn transparent(size: Canvas) -> CrossPlotResult<Self> {
        Ok(Self {
            width: size.width,
            height: size.height,
            data: vec![0u8; size.byte_len()?],
        })
    }

    pub fn from_premul_bytes(width: u32, height: u32, data: Vec<u8>) -> CrossPlotResult<Self> {
        if data.len() != Canvas::new(width, height).byte_len()? {
            return Err(CrossPlotError::render(
                "raster bytes must match width*height*4",
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build from straight-alpha RGBA8, e.g. a decoded PNG.
    pub fn from_straight_rgba8(width: u32, height: u32, data: &[u8]) -> CrossPlotResult<Self> {
        let mut premul = Vec::with_capacity(data.len());
        for px in data.chunks_exact(4) {
            premul.extend_from_slice(&premul_rgba8([px[0], px[1], px[2], px[3]]));
        }
        if premul.len() != data.len() {
            return Err(CrossPlotError::render(
                "raster bytes must match width*height*4",
            ));
        }
        Self::from_premul_bytes(width, height, premul)
    }

    pub fn size(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.data[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// True when no pixel has coverage.
    pub fn is_blank(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }

    pub fn covered_pixels(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] != 0).count()
    }

    /// Straight-alpha copy for encoders.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            out.extend_from_slice(&unpremul_rgba8([px[0], px[1], px[2], px[3]]));
        }
        out
    }

    pub(crate) fn from_pixmap(pixmap: &vello_cpu::Pixmap) -> Self {
        Self {
            width: u32::from(pixmap.width()),
            height: u32::from(pixmap.height()),
            data: pixmap.data_as_u8_slice().to_vec(),
        }
    }

    pub(crate) fn to_pixmap(&self) -> CrossPlotResult<vello_cpu::Pixmap> {
        let (w, h) = self.size().to_u16()?;
        let mut may_have_opacities = false;
        let mut pixels = Vec::with_capacity(self.width as usize * self.height as usize);
        for px in self.data.chunks_exact(4) {
            let a = px[3];
            may_have_opacities |= a != 255;
            pixels.push(vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a,
            });
        }

        Ok(vello_cpu::Pixmap::from_parts_with_opacity(
            pixels,
            w,
            h,
            may_have_opacities,
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
