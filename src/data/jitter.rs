//! Seeded jitter source.
//!
//! The generator is SplitMix64 seeded with the FNV-1a 64 hash of a seed string, and bounded
//! draws use a 128-bit multiply-shift. Both are fixed so the animation is reproducible on every
//! platform.
//!
//! Draws happen frame-major, layer-minor: frame `tau` consumes `layers - 1` draws after all
//! draws of frames `0..tau`. A frame's jitter therefore depends on every earlier frame, which is
//! why [`JitterTable`] replays the whole sequence up front.

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{CrossPlotError, CrossPlotResult};
use crate::foundation::math::Fnv1a64;

#[derive(Clone, Debug)]
pub struct JitterRng {
    state: u64,
}

impl JitterRng {
    const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seed from the FNV-1a 64 hash of `seed`'s UTF-8 bytes.
    pub fn from_seed_str(seed: &str) -> Self {
        let mut h = Fnv1a64::new_default();
        h.write_bytes(seed.as_bytes());
        Self::new(h.finish())
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(Self::GOLDEN_GAMMA);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform draw in `[0, bound)`. A zero bound yields 0 without advancing the state.
    pub fn next_below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        ((u128::from(self.next_u64()) * u128::from(bound)) >> 64) as u32
    }
}

/// Exclusive jitter bound of layer `zeta`: `(layers - zeta) * step`.
pub fn layer_bound(layers: u32, zeta: u32, step: u32) -> u32 {
    layers.saturating_sub(zeta).saturating_mul(step)
}

/// Precomputed jitter indexed by `[frame][layer]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JitterTable {
    layers_per_frame: usize,
    values: Vec<u32>,
}

impl JitterTable {
    /// Largest table (in draws) a run may precompute.
    pub const MAX_ENTRIES: u64 = 1 << 24;

    /// Draws needed for `frames` frames. Errors past [`Self::MAX_ENTRIES`].
    pub fn entries_for(frames: u64, layers: u32) -> CrossPlotResult<usize> {
        let per_frame = u64::from(layers.saturating_sub(1));
        frames
            .checked_mul(per_frame)
            .filter(|&n| n <= Self::MAX_ENTRIES)
            .map(|n| n as usize)
            .ok_or_else(|| {
                CrossPlotError::validation(format!(
                    "{frames} frames x {per_frame} layers exceeds {} jitter draws",
                    Self::MAX_ENTRIES
                ))
            })
    }

    /// Replay the sequential draw order for `frames` frames of `layers - 1` rendered layers.
    pub fn generate(seed: &str, frames: u64, layers: u32, step: u32) -> CrossPlotResult<Self> {
        let per_frame = layers.saturating_sub(1);
        let len = Self::entries_for(frames, layers)?;

        let mut rng = JitterRng::from_seed_str(seed);
        let mut values = Vec::with_capacity(len);
        if per_frame > 0 {
            for _ in 0..frames {
                for zeta in 0..per_frame {
                    values.push(rng.next_below(layer_bound(layers, zeta, step)));
                }
            }
        }
        Ok(Self {
            layers_per_frame: per_frame as usize,
            values,
        })
    }

    /// Jitter of frame `tau` alone. Draws of earlier frames are consumed and discarded.
    pub fn replay_row(seed: &str, tau: FrameIndex, layers: u32, step: u32) -> Vec<u32> {
        let per_frame = layers.saturating_sub(1);
        let mut rng = JitterRng::from_seed_str(seed);
        if per_frame == 0 {
            return Vec::new();
        }
        for _ in 0..tau.0 {
            for zeta in 0..per_frame {
                rng.next_below(layer_bound(layers, zeta, step));
            }
        }
        (0..per_frame)
            .map(|zeta| rng.next_below(layer_bound(layers, zeta, step)))
            .collect()
    }

    pub fn frames(&self) -> u64 {
        if self.layers_per_frame == 0 {
            return 0;
        }
        (self.values.len() / self.layers_per_frame) as u64
    }

    pub fn layers_per_frame(&self) -> usize {
        self.layers_per_frame
    }

    /// Per-layer jitter of frame `tau`.
    pub fn row(&self, tau: FrameIndex) -> CrossPlotResult<&[u32]> {
        let start = usize::try_from(tau.0)
            .ok()
            .and_then(|t| t.checked_mul(self.layers_per_frame))
            .filter(|&s| s < self.values.len())
            .ok_or_else(|| {
                CrossPlotError::render(format!(
                    "frame {} is outside the jitter table ({} frames)",
                    tau.0,
                    self.frames()
                ))
            })?;
        Ok(&self.values[start..start + self.layers_per_frame])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/jitter.rs"]
mod tests;
