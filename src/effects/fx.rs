use crate::effects::blend::attenuate;
use crate::effects::blur::gaussian_blur;
use crate::foundation::error::CrossPlotResult;
use crate::render::raster::Raster;

/// Per-layer post-processing: Gaussian blur, then opacity attenuation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerFx {
    pub sigma: f32,
    pub alpha: f32,
}

impl LayerFx {
    /// Blur then attenuate. The input is left untouched.
    pub fn apply(&self, src: &Raster) -> CrossPlotResult<Raster> {
        let blurred = gaussian_blur(src, self.sigma)?;
        Ok(attenuate(&blurred, self.alpha))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/fx.rs"]
mod tests;
