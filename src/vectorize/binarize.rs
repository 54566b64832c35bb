use std::path::Path;

use anyhow::Context as _;
use image::{RgbaImage, imageops::FilterType};

use crate::foundation::error::{SignError, SignResult};

/// Uploaded images are fitted inside this box before tracing.
pub const FIT_MAX_WIDTH: u32 = 800;
pub const FIT_MAX_HEIGHT: u32 = 400;
/// Luma threshold used for a freshly loaded image.
pub const DEFAULT_THRESHOLD: u8 = 180;

/// Downscale factor that fits `width x height` inside the upload box; never upscales.
pub fn fit_scale(width: u32, height: u32) -> f64 {
    if width == 0 || height == 0 {
        return 1.0;
    }
    (f64::from(FIT_MAX_WIDTH) / f64::from(width))
        .min(f64::from(FIT_MAX_HEIGHT) / f64::from(height))
        .min(1.0)
}

/// A fitted, fully opaque upload, cached so it can be re-thresholded.
#[derive(Clone, Debug)]
pub struct SourceImage {
    rgba: RgbaImage,
}

impl SourceImage {
    /// Fit `img` inside the upload box and composite it over white.
    pub fn from_rgba(img: RgbaImage) -> Self {
        let scale = fit_scale(img.width(), img.height());
        let fitted = if scale < 1.0 {
            let w = ((f64::from(img.width()) * scale) as u32).max(1);
            let h = ((f64::from(img.height()) * scale) as u32).max(1);
            image::imageops::resize(&img, w, h, FilterType::Triangle)
        } else {
            img
        };

        let mut rgba = RgbaImage::from_pixel(
            fitted.width(),
            fitted.height(),
            image::Rgba([255, 255, 255, 255]),
        );
        image::imageops::overlay(&mut rgba, &fitted, 0, 0);
        Self { rgba }
    }

    /// Decode PNG/JPEG bytes.
    pub fn decode(bytes: &[u8]) -> SignResult<Self> {
        let img = image::load_from_memory(bytes).context("decode uploaded image")?;
        Ok(Self::from_rgba(img.to_rgba8()))
    }

    pub fn open(path: &Path) -> SignResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read image '{}'", path.display()))?;
        Self::decode(&bytes)
    }

    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    pub fn height(&self) -> u32 {
        self.rgba.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.rgba
    }
}

fn luma(r: u8, g: u8, b: u8) -> f64 {
    f64::from(r) * 0.299 + f64::from(g) * 0.587 + f64::from(b) * 0.114
}

/// Pure black and white copy: `luma > threshold` becomes white, the rest black. Alpha is 255.
pub fn binarize(src: &RgbaImage, threshold: u8) -> RgbaImage {
    let t = f64::from(threshold);
    let mut out = src.clone();
    for px in out.pixels_mut() {
        let [r, g, b, _] = px.0;
        let v = if luma(r, g, b) > t { 255 } else { 0 };
        px.0 = [v, v, v, 255];
    }
    out
}

/// Separable Gaussian blur over an RGBA8 buffer. Radius 0 returns the input unchanged.
pub fn blur_rgba8(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> SignResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| SignError::validation("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(SignError::validation(
            "blur_rgba8 expects src matching width*height*4",
        ));
    }
    if radius == 0 || width == 0 || height == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];
    blur_pass(src, &mut tmp, width, height, &kernel, Axis::X);
    blur_pass(&tmp, &mut out, width, height, &kernel, Axis::Y);
    Ok(out)
}

/// Blur (when configured) and threshold the cached source, ready for the tracer.
pub fn prepare_bitmap(
    source: &SourceImage,
    threshold: u8,
    blur_radius: u32,
    blur_sigma: f32,
) -> SignResult<RgbaImage> {
    let img = source.pixels();
    if blur_radius == 0 {
        return Ok(binarize(img, threshold));
    }
    let blurred = blur_rgba8(img.as_raw(), img.width(), img.height(), blur_radius, blur_sigma)?;
    let blurred = RgbaImage::from_raw(img.width(), img.height(), blurred)
        .ok_or_else(|| SignError::validation("blurred buffer has unexpected size"))?;
    Ok(binarize(&blurred, threshold))
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> SignResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(SignError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| (-f64::from(i * i) / denom).exp())
        .collect();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(SignError::validation("gaussian kernel sum is zero"));
    }

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|wf| ((wf / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();
    // Push rounding error into the center tap so the kernel sums to exactly 1.0 in q16.
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let mid = weights.len() / 2;
    weights[mid] = (i64::from(weights[mid]) + 65536 - acc).clamp(0, 65536) as u32;
    Ok(weights)
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

fn blur_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32], axis: Axis) {
    let radius = (k.len() / 2) as i32;
    let (w, h) = (width as i32, height as i32);
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let d = ki as i32 - radius;
                let (sx, sy) = match axis {
                    Axis::X => ((x + d).clamp(0, w - 1), y),
                    Axis::Y => (x, (y + d).clamp(0, h - 1)),
                };
                let idx = ((sy * w + sx) as usize) * 4;
                for (c, a) in acc.iter_mut().enumerate() {
                    *a += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out = ((y * w + x) as usize) * 4;
            for (c, a) in acc.iter().enumerate() {
                dst[out + c] = ((a + 32768) >> 16).min(255) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/vectorize/binarize.rs"]
mod tests;
