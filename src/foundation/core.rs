use crate::foundation::error::{CrossPlotError, CrossPlotResult};

pub use kurbo::{Affine, Point, Vec2};

/// 0-based animation step (`tau`).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// 1-based number used when frames leave the pipeline.
    pub fn sequence_number(self) -> u64 {
        self.0 + 1
    }

    /// File stem of the frame on disk: `0001` for `FrameIndex(0)`.
    pub fn file_stem(self) -> String {
        format!("{:04}", self.sequence_number())
    }
}

/// Pixel dimensions of a raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Rejects sizes the CPU rasterizer cannot address (zero or above `u16::MAX`).
    pub fn validate(self, what: &str) -> CrossPlotResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CrossPlotError::validation(format!(
                "{what} must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        let limit = u32::from(u16::MAX);
        if self.width > limit || self.height > limit {
            return Err(CrossPlotError::validation(format!(
                "{what} exceeds {limit}px, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn byte_len(self) -> CrossPlotResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| CrossPlotError::render("raster buffer size overflow"))
    }

    pub(crate) fn to_u16(self) -> CrossPlotResult<(u16, u16)> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| CrossPlotError::render("raster width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| CrossPlotError::render("raster height exceeds u16"))?;
        Ok((w, h))
    }
}

/// Straight (non-premultiplied) RGBA8 color.
pub type Rgba8 = [u8; 4];

/// Same hue with the alpha channel replaced.
pub fn with_alpha(color: Rgba8, alpha: u8) -> Rgba8 {
    [color[0], color[1], color[2], alpha]
}

/// Shear that offsets `y` proportionally to `x`: `y' = y + k * x`.
pub fn shear_y(k: f64) -> Affine {
    Affine::new([1.0, k, 0.0, 1.0, 0.0, 0.0])
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
