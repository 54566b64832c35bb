use quick_xml::{
    Decoder, Reader,
    events::{BytesStart, Event},
};

use crate::{
    foundation::{
        core::ViewBox,
        error::{SignError, SignResult},
    },
    path::bbox::path_bbox,
};

/// Paths at or below this many characters are tracer noise.
pub const MIN_PATH_LEN: usize = 10;
/// A path covering more than this share of the image in both directions is background.
pub const OVERSIZED_RATIO: f64 = 0.85;

/// What survives from the tracer's SVG output.
#[derive(Clone, Debug, PartialEq)]
pub struct TracedMarkup {
    pub view_box: ViewBox,
    /// `transform` of the first `<g>`, when present and non-empty.
    pub transform: Option<String>,
    /// Kept path `d` strings in document order.
    pub paths: Vec<String>,
}

/// Size of the traced bitmap, used for the viewBox fallback and the oversized filter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceFrame {
    pub width: u32,
    pub height: u32,
    /// Tracer path units per bitmap pixel.
    pub path_unit_scale: f64,
}

fn attr(e: &BytesStart<'_>, decoder: Decoder, name: &[u8]) -> SignResult<Option<String>> {
    let found = e
        .try_get_attribute(name)
        .map_err(|err| SignError::trace(format!("bad attribute in tracer output: {err}")))?;
    found
        .map(|a| {
            a.decode_and_unescape_value(decoder)
                .map(|v| v.into_owned())
                .map_err(|err| SignError::trace(format!("bad attribute value: {err}")))
        })
        .transpose()
}

fn is_white(fill: Option<&str>) -> bool {
    fill.is_some_and(|f| {
        let f = f.trim();
        f.eq_ignore_ascii_case("#ffffff") || f.eq_ignore_ascii_case("white")
    })
}

/// Leading number of a length such as `646.000000pt`.
fn length(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let end = raw
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(raw.len());
    raw[..end].parse::<f64>().ok().filter(|v| *v > 0.0)
}

/// `viewBox`, `width` and `height` of the root element.
type SvgAttrs = (Option<String>, Option<String>, Option<String>);

struct Scan {
    frame: TraceFrame,
    decoder: Decoder,
    /// Open `<g>` elements; `true` when the group is filled white.
    groups: Vec<bool>,
    first_transform: Option<Option<String>>,
    svg_attrs: Option<SvgAttrs>,
    paths: Vec<String>,
}

impl Scan {
    fn open(&mut self, e: &BytesStart<'_>, empty: bool) -> SignResult<()> {
        match e.name().as_ref() {
            b"svg" if self.svg_attrs.is_none() => {
                self.svg_attrs = Some((
                    attr(e, self.decoder, b"viewBox")?,
                    attr(e, self.decoder, b"width")?,
                    attr(e, self.decoder, b"height")?,
                ));
            }
            b"g" => {
                if self.first_transform.is_none() {
                    self.first_transform = Some(attr(e, self.decoder, b"transform")?);
                }
                let white = is_white(attr(e, self.decoder, b"fill")?.as_deref());
                if !empty {
                    self.groups.push(white);
                }
            }
            b"path" => self.path(e)?,
            _ => {}
        }
        Ok(())
    }

    fn path(&mut self, e: &BytesStart<'_>) -> SignResult<()> {
        if self.groups.iter().any(|white| *white) {
            tracing::debug!("skipping path in background group");
            return Ok(());
        }
        if is_white(attr(e, self.decoder, b"fill")?.as_deref()) {
            tracing::debug!("skipping background path");
            return Ok(());
        }
        let Some(d) = attr(e, self.decoder, b"d")? else {
            return Ok(());
        };
        if d.len() <= MIN_PATH_LEN {
            tracing::debug!(len = d.len(), "skipping short path");
            return Ok(());
        }
        let f = self.frame;
        let max_w = f64::from(f.width) * f.path_unit_scale * OVERSIZED_RATIO;
        let max_h = f64::from(f.height) * f.path_unit_scale * OVERSIZED_RATIO;
        if let Some(b) = path_bbox(d.as_str())
            && b.w > max_w
            && b.h > max_h
        {
            tracing::debug!(w = b.w, h = b.h, "skipping oversized path");
            return Ok(());
        }
        self.paths.push(d);
        Ok(())
    }
}

/// Scan tracer SVG text for paths, the first group transform and the viewBox.
///
/// Paths in white groups, white paths, paths of at most [`MIN_PATH_LEN`] characters and
/// paths spanning more than [`OVERSIZED_RATIO`] of the bitmap in both directions are dropped.
/// The viewBox falls back to `0 0 width height` from the `<svg>` attributes, then to the
/// bitmap size.
pub fn parse_markup(svg: &str, frame: TraceFrame) -> SignResult<TracedMarkup> {
    let mut reader = Reader::from_str(svg);
    let mut scan = Scan {
        frame,
        decoder: reader.decoder(),
        groups: Vec::new(),
        first_transform: None,
        svg_attrs: None,
        paths: Vec::new(),
    };

    loop {
        let event = reader.read_event().map_err(|e| {
            SignError::trace(format!(
                "tracer output is not valid XML at position {}: {e}",
                reader.error_position()
            ))
        })?;
        match event {
            Event::Start(e) => scan.open(&e, false)?,
            Event::Empty(e) => scan.open(&e, true)?,
            Event::End(e) if e.name().as_ref() == b"g" => {
                scan.groups.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let Scan {
        first_transform,
        svg_attrs,
        paths,
        ..
    } = scan;
    let (view_box, width, height) = svg_attrs.unwrap_or((None, None, None));
    let view_box = match view_box.as_deref().map(ViewBox::parse) {
        Some(Ok(vb)) => vb,
        _ => {
            let w = width
                .as_deref()
                .and_then(length)
                .unwrap_or(f64::from(frame.width));
            let h = height
                .as_deref()
                .and_then(length)
                .unwrap_or(f64::from(frame.height));
            ViewBox::new(0.0, 0.0, w, h)
        }
    };

    let transform = first_transform
        .flatten()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    tracing::debug!(kept = paths.len(), "scanned tracer output");
    Ok(TracedMarkup {
        view_box,
        transform,
        paths,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/vectorize/markup.rs"]
mod tests;
