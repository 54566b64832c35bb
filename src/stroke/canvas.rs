use crate::{
    foundation::{
        core::{BezPath, Canvas, InkColor},
        error::{SignError, SignResult},
    },
    stroke::{
        outline::{Outline, build_outline, outline_to_bezpath},
        process::InkPoint,
    },
};

/// An imperative 2D drawing surface that can fill paths.
pub trait InkSurface {
    /// Fill `path` (non-zero winding) with a solid color.
    fn fill_path(&mut self, path: &BezPath, color: InkColor);
}

/// Fill the polygon bounded by an outline, with rounded tip and tail.
///
/// Empty outlines are a no-op.
pub fn draw_outline<S: InkSurface + ?Sized>(surface: &mut S, outline: &Outline, color: InkColor) {
    if outline.left.is_empty() || outline.right.is_empty() {
        return;
    }
    surface.fill_path(&outline_to_bezpath(outline), color);
}

/// Draw a processed stroke; strokes too short to outline are skipped.
pub fn render_stroke<S: InkSurface + ?Sized>(
    surface: &mut S,
    processed: &[InkPoint],
    color: InkColor,
) {
    if let Some(outline) = build_outline(processed) {
        draw_outline(surface, &outline, color);
    }
}

/// CPU raster ink canvas backed by `vello_cpu`.
///
/// The canvas is redrawn from scratch on every update: all finished strokes, then the
/// in-progress one.
pub struct InkCanvas {
    canvas: Canvas,
    scale: f64,
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
}

impl InkCanvas {
    /// Create a canvas of `canvas` logical units rendered at `scale` device pixels per unit.
    pub fn new(canvas: Canvas, scale: f64) -> SignResult<Self> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(SignError::validation("ink canvas scale must be > 0"));
        }
        let to_u16 = |v: u32, what: &str| -> SignResult<u16> {
            let px = (f64::from(v) * scale).ceil();
            if px < 1.0 || px > f64::from(u16::MAX) {
                return Err(SignError::render(format!(
                    "ink canvas {what} of {px} px is out of range"
                )));
            }
            Ok(px as u16)
        };
        let width = to_u16(canvas.width, "width")?;
        let height = to_u16(canvas.height, "height")?;
        Ok(Self {
            canvas,
            scale,
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        (u32::from(self.width), u32::from(self.height))
    }

    /// Drop everything drawn so far.
    pub fn clear(&mut self) {
        self.ctx = vello_cpu::RenderContext::new(self.width, self.height);
    }

    /// Clear and repaint all finished strokes plus the optional in-progress stroke.
    pub fn redraw(
        &mut self,
        finished: &[Vec<InkPoint>],
        in_progress: Option<&[InkPoint]>,
        color: InkColor,
    ) {
        self.clear();
        for stroke in finished {
            render_stroke(self, stroke, color);
        }
        if let Some(stroke) = in_progress {
            render_stroke(self, stroke, color);
        }
    }

    /// Rasterize the current contents into premultiplied RGBA8 bytes.
    pub fn snapshot_rgba8_premul(&mut self) -> Vec<u8> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        pixmap.data_as_u8_slice().to_vec()
    }

    /// Encode the current contents as PNG over an opaque white background.
    pub fn to_png(&mut self) -> SignResult<Vec<u8>> {
        let premul = self.snapshot_rgba8_premul();
        let (w, h) = self.pixel_size();
        let mut opaque = vec![0u8; premul.len()];
        crate::export::png::flatten_to_opaque_rgba8(&mut opaque, &premul, InkColor::WHITE)?;
        crate::export::png::encode_png(&opaque, w, h)
    }
}

impl InkSurface for InkCanvas {
    fn fill_path(&mut self, path: &BezPath, color: InkColor) {
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::scale(self.scale));
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
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
#[path = "../../tests/unit/stroke/canvas.rs"]
mod tests;
