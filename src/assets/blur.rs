//! Gaussian blur over premultiplied RGBA8.
//!
//! Kernel weights are quantized to 16.16 fixed point and always sum to exactly one, so a flat
//! image comes back unchanged.

use crate::compose::canvas::Canvas;
use crate::foundation::error::{ForgeError, ForgeResult};

const ONE_Q16: u32 = 1 << 16;

/// Kernel radius that covers three standard deviations.
pub fn radius_for_sigma(sigma: f32) -> u32 {
    (sigma * 3.0).ceil().max(0.0) as u32
}

/// Separable Gaussian blur of a premultiplied canvas with clamp-to-edge sampling.
pub fn gaussian_blur(src: &Canvas, sigma: f32) -> ForgeResult<Canvas> {
    let radius = radius_for_sigma(sigma);
    let data = blur_rgba8_premul(src.data(), src.width(), src.height(), radius, sigma)?;
    Canvas::from_premul(src.width(), src.height(), data)
}

/// Blur a tightly packed buffer with a `2 * radius + 1` tap kernel, rows first. A zero radius
/// copies the input.
pub fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> ForgeResult<Vec<u8>> {
    let (w, h) = (width as usize, height as usize);
    if w.checked_mul(h).and_then(|px| px.checked_mul(4)) != Some(src.len()) {
        return Err(ForgeError::contract(format!(
            "blur expects {width}x{height} RGBA8, got {} bytes",
            src.len()
        )));
    }
    if radius == 0 || src.is_empty() {
        return Ok(src.to_vec());
    }

    let kernel = kernel_q16(radius, sigma)?;
    let mut rows = vec![0u8; src.len()];
    let mut out = vec![0u8; src.len()];
    let across = Runs {
        len: w,
        count: h,
        step: 1,
        run_step: w,
    };
    let down = Runs {
        len: h,
        count: w,
        step: w,
        run_step: 1,
    };
    convolve(src, &mut rows, across, &kernel);
    convolve(&rows, &mut out, down, &kernel);
    Ok(out)
}

fn kernel_q16(radius: u32, sigma: f32) -> ForgeResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ForgeError::contract("blur sigma must be finite and > 0"));
    }
    let r = i64::from(radius);
    let two_sigma_sq = 2.0 * f64::from(sigma).powi(2);
    let raw: Vec<f64> = (-r..=r)
        .map(|i| (-((i * i) as f64) / two_sigma_sq).exp())
        .collect();
    let total: f64 = raw.iter().sum();

    let mut kernel: Vec<u32> = raw
        .iter()
        .map(|w| (w / total * f64::from(ONE_Q16)).round() as u32)
        .collect();
    // Rounding drift goes to the center tap.
    let drift = i64::from(ONE_Q16) - kernel.iter().map(|&w| i64::from(w)).sum::<i64>();
    let center = &mut kernel[radius as usize];
    *center = (i64::from(*center) + drift).clamp(0, i64::from(ONE_Q16)) as u32;
    Ok(kernel)
}

/// `count` runs of `len` pixels; pixel `i` of run `n` sits at `n * run_step + i * step`.
#[derive(Clone, Copy)]
struct Runs {
    len: usize,
    count: usize,
    step: usize,
    run_step: usize,
}

fn convolve(src: &[u8], dst: &mut [u8], runs: Runs, kernel: &[u32]) {
    let radius = kernel.len() / 2;
    let last = runs.len - 1;
    for n in 0..runs.count {
        let base = n * runs.run_step;
        for i in 0..runs.len {
            let mut acc = [0u64; 4];
            for (k, &weight) in kernel.iter().enumerate() {
                let j = (i + k).saturating_sub(radius).min(last);
                let px = &src[(base + j * runs.step) * 4..][..4];
                for (a, &c) in acc.iter_mut().zip(px) {
                    *a += u64::from(weight) * u64::from(c);
                }
            }
            let out = &mut dst[(base + i * runs.step) * 4..][..4];
            for (o, a) in out.iter_mut().zip(acc) {
                *o = ((a + u64::from(ONE_Q16 / 2)) >> 16).min(255) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/blur.rs"]
mod tests;
