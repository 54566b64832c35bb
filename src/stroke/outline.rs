use std::fmt::Write as _;

use crate::{
    foundation::{
        core::{BezPath, Point},
        math::round_tenth,
    },
    stroke::process::InkPoint,
};

/// The two offset boundaries of a processed stroke, index-aligned.
#[derive(Clone, Debug, PartialEq)]
pub struct Outline {
    pub left: Vec<Point>,
    pub right: Vec<Point>,
}

impl Outline {
    /// Control and end points of the rounded cap joining `left`'s end to `right`'s end.
    fn tip(&self) -> Option<(Point, Point)> {
        let l = *self.left.last()?;
        let r = *self.right.last()?;
        Some((l.midpoint(r), r))
    }

    /// Control and end points of the rounded tail joining `right`'s start back to `left`'s.
    fn tail(&self) -> Option<(Point, Point)> {
        let r = *self.right.first()?;
        let l = *self.left.first()?;
        Some((r.midpoint(l), l))
    }
}

/// Offset each centerline point by half its width along the local normal.
///
/// Returns `None` for fewer than two points.
pub fn build_outline(points: &[InkPoint]) -> Option<Outline> {
    if points.len() < 2 {
        return None;
    }
    let last = points.len() - 1;
    let mut left = Vec::with_capacity(points.len());
    let mut right = Vec::with_capacity(points.len());
    for (i, p) in points.iter().enumerate() {
        let prev = points[i.saturating_sub(1)];
        let next = points[(i + 1).min(last)];
        let tx = next.x - prev.x;
        let ty = next.y - prev.y;
        let len = (tx * tx + ty * ty).sqrt();
        let len = if len == 0.0 { 1.0 } else { len };
        let (nx, ny) = (-ty / len, tx / len);
        let hw = p.w / 2.0;
        left.push(Point::new(p.x + nx * hw, p.y + ny * hw));
        right.push(Point::new(p.x - nx * hw, p.y - ny * hw));
    }
    Some(Outline { left, right })
}

/// Closed fill path: `left` forward, quadratic tip, `right` reversed, quadratic tail.
pub fn outline_to_bezpath(outline: &Outline) -> BezPath {
    let mut path = BezPath::new();
    let (Some((tip_ctrl, tip_end)), Some((tail_ctrl, tail_end))) = (outline.tip(), outline.tail())
    else {
        return path;
    };

    path.move_to(outline.left[0]);
    for &p in &outline.left[1..] {
        path.line_to(p);
    }
    path.quad_to(tip_ctrl, tip_end);
    for &p in outline.right.iter().rev().skip(1) {
        path.line_to(p);
    }
    path.quad_to(tail_ctrl, tail_end);
    path.close_path();
    path
}

/// Serialize a processed stroke's outline as a compact SVG `d` string.
///
/// Coordinates are rounded to one decimal. Strokes with fewer than two points yield `""`.
pub fn stroke_to_svg_path(processed: &[InkPoint]) -> String {
    let Some(outline) = build_outline(processed) else {
        return String::new();
    };
    let (Some((tip_ctrl, tip_end)), Some((tail_ctrl, tail_end))) = (outline.tip(), outline.tail())
    else {
        return String::new();
    };

    fn pair(d: &mut String, p: Point) {
        let _ = write!(d, "{} {}", round_tenth(p.x), round_tenth(p.y));
    }

    let mut d = String::with_capacity(outline.left.len() * 2 * 12);
    d.push_str("M ");
    pair(&mut d, outline.left[0]);
    for &p in &outline.left[1..] {
        d.push_str(" L ");
        pair(&mut d, p);
    }
    d.push_str(" Q ");
    pair(&mut d, tip_ctrl);
    d.push_str(", ");
    pair(&mut d, tip_end);
    for &p in outline.right.iter().rev().skip(1) {
        d.push_str(" L ");
        pair(&mut d, p);
    }
    d.push_str(" Q ");
    pair(&mut d, tail_ctrl);
    d.push_str(", ");
    pair(&mut d, tail_end);
    d.push_str(" Z");
    d
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/outline.rs"]
mod tests;
