use crate::foundation::math::mul_div255_u8;
use crate::render::raster::Raster;

/// Opacity multiplier quantized to a byte, `alpha` clamped to `[0, 1]`.
pub fn opacity_byte(alpha: f32) -> u8 {
    if !alpha.is_finite() {
        return if alpha > 0.0 { 255 } else { 0 };
    }
    (255.0 * alpha.clamp(0.0, 1.0)) as u8
}

/// Multiply every premultiplied channel by `alpha`. Returns a new raster.
pub fn attenuate(src: &Raster, alpha: f32) -> Raster {
    let op = u16::from(opacity_byte(alpha));
    let data = if op == 255 {
        src.data.clone()
    } else {
        src.data
            .iter()
            .map(|&c| mul_div255_u8(u16::from(c), op))
            .collect()
    };
    Raster {
        width: src.width,
        height: src.height,
        data,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blend.rs"]
mod tests;
