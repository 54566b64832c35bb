use std::io::Cursor;

use anyhow::Context as _;

use crate::foundation::{
    core::InkColor,
    error::{SignError, SignResult},
};

/// Device pixels per SVG unit for PNG downloads.
pub const EXPORT_SCALE: f32 = 3.0;

const MAX_DIM: u32 = 16_384;

/// Rasterize SVG text at `scale` over opaque white and encode it as PNG.
///
/// The output size is the SVG's intrinsic size (its viewBox when no width/height are set)
/// times `scale`.
#[tracing::instrument(skip(svg), fields(bytes = svg.len()))]
pub fn rasterize_png(svg: &str, scale: f32) -> SignResult<Vec<u8>> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(SignError::validation("png scale must be > 0"));
    }
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(svg.as_bytes(), &opts)
        .map_err(|e| SignError::render(format!("parse svg: {e}")))?;

    let to_px = |v: f32| -> SignResult<u32> {
        let px = (v * scale).ceil();
        if !px.is_finite() || px < 1.0 || px > MAX_DIM as f32 {
            return Err(SignError::render(format!(
                "png size {px} px is out of range (max {MAX_DIM})"
            )));
        }
        Ok(px as u32)
    };
    let size = tree.size();
    let (w, h) = (to_px(size.width())?, to_px(size.height())?);

    let mut pixmap = resvg::tiny_skia::Pixmap::new(w, h)
        .ok_or_else(|| SignError::render("failed to allocate png pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    let mut opaque = vec![0u8; pixmap.data().len()];
    flatten_to_opaque_rgba8(&mut opaque, pixmap.data(), InkColor::WHITE)?;
    encode_png(&opaque, w, h)
}

/// Composite premultiplied RGBA8 over an opaque background color.
pub fn flatten_to_opaque_rgba8(dst: &mut [u8], src_premul: &[u8], bg: InkColor) -> SignResult<()> {
    if dst.len() != src_premul.len() || !dst.len().is_multiple_of(4) {
        return Err(SignError::validation(
            "flatten_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    let bg = [u16::from(bg.r), u16::from(bg.g), u16::from(bg.b)];
    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        let inv = 255 - u16::from(s[3]);
        for c in 0..3 {
            d[c] = (u16::from(s[c]) + mul_div255(bg[c], inv)).min(255) as u8;
        }
        d[3] = 255;
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    ((u32::from(x) * u32::from(y) + 127) / 255) as u16
}

/// Encode straight RGBA8 pixels as PNG bytes.
pub fn encode_png(rgba: &[u8], width: u32, height: u32) -> SignResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(width, height, rgba.to_vec())
        .ok_or_else(|| SignError::validation("png buffer does not match width*height*4"))?;
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
