//! Separable Gaussian blur over premultiplied RGBA8.
//!
//! Weights are quantized to Q16 and re-normalized so a constant region stays constant away
//! from the border. Pixels outside the image count as transparent, so coverage fades out at
//! the edges.

use crate::foundation::error::{CrossPlotError, CrossPlotResult};
use crate::render::raster::Raster;

/// Kernel radius covering three standard deviations. Non-positive or non-finite sigma gives 0.
pub fn blur_radius(sigma: f32) -> u32 {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    (3.0 * sigma).ceil() as u32
}

/// Blur `src` with matched horizontal and vertical `sigma`. Returns a new raster.
///
/// `sigma <= 0` copies the input unchanged.
pub fn gaussian_blur(src: &Raster, sigma: f32) -> CrossPlotResult<Raster> {
    let data = blur_rgba8_premul(&src.data, src.width, src.height, blur_radius(sigma), sigma)?;
    Raster::from_premul_bytes(src.width, src.height, data)
}

pub(crate) fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> CrossPlotResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| CrossPlotError::render("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(CrossPlotError::render(
            "blur_rgba8_premul expects src matching width*height*4",
        ));
    }
    if radius == 0 || expected_len == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    blur_pass(src, &mut tmp, width, height, Axis::Horizontal, &kernel);
    blur_pass(&tmp, &mut out, width, height, Axis::Vertical, &kernel);
    Ok(out)
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> CrossPlotResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(CrossPlotError::render("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(CrossPlotError::render("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = (((wf / sum) * 65536.0).round() as i64).clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Push the rounding residue into the center tap.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

/// One 1-D pass. Taps falling outside the image read as transparent.
fn blur_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, axis: Axis, kernel: &[u32]) {
    let (w, h) = (width as usize, height as usize);
    let radius = kernel.len() / 2;
    let (extent, stride) = match axis {
        Axis::Horizontal => (w, 4),
        Axis::Vertical => (h, w * 4),
    };
    for y in 0..h {
        for x in 0..w {
            let pos = match axis {
                Axis::Horizontal => x,
                Axis::Vertical => y,
            };
            let base = (y * w + x) * 4;
            let line_start = base - pos * stride;
            let first = radius.saturating_sub(pos);
            let last = (extent - 1 - pos + radius).min(kernel.len() - 1);

            let mut acc = [0u64; 4];
            for (ki, &kw) in kernel.iter().enumerate().take(last + 1).skip(first) {
                let idx = line_start + (pos + ki - radius) * stride;
                for (a, &c) in acc.iter_mut().zip(&src[idx..idx + 4]) {
                    *a += u64::from(kw) * u64::from(c);
                }
            }
            for (d, a) in dst[base..base + 4].iter_mut().zip(acc) {
                *d = q16_to_u8(a);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
