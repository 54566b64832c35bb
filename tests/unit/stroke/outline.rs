use kurbo::{PathEl, Shape as _};

use super::*;

fn flat_pair() -> Vec<InkPoint> {
    vec![InkPoint::new(0.0, 0.0, 2.0), InkPoint::new(10.0, 0.0, 2.0)]
}

#[test]
fn outline_needs_two_points() {
    assert!(build_outline(&[]).is_none());
    assert!(build_outline(&[InkPoint::new(1.0, 1.0, 2.0)]).is_none());
}

#[test]
fn outline_offsets_by_half_width_along_normal() {
    let outline = build_outline(&flat_pair()).unwrap();
    assert_eq!(outline.left, vec![Point::new(0.0, 1.0), Point::new(10.0, 1.0)]);
    assert_eq!(
        outline.right,
        vec![Point::new(0.0, -1.0), Point::new(10.0, -1.0)]
    );
}

#[test]
fn coincident_neighbours_do_not_produce_nan() {
    let pts = vec![InkPoint::new(5.0, 5.0, 2.0), InkPoint::new(5.0, 5.0, 2.0)];
    let outline = build_outline(&pts).unwrap();
    assert!(
        outline
            .left
            .iter()
            .chain(&outline.right)
            .all(|p| p.x.is_finite() && p.y.is_finite())
    );
}

#[test]
fn svg_path_has_rounded_caps_and_closes() {
    let d = stroke_to_svg_path(&flat_pair());
    assert_eq!(d, "M 0 1 L 10 1 Q 10 0, 10 -1 L 0 -1 Q 0 0, 0 1 Z");
}

#[test]
fn svg_path_rounds_to_one_decimal() {
    let pts = vec![
        InkPoint::new(0.04, 0.0, 2.5),
        InkPoint::new(3.333, 0.0, 2.5),
    ];
    let d = stroke_to_svg_path(&pts);
    assert!(d.starts_with("M 0 1.3 L 3.3 1.3"), "{d}");
    assert!(d.ends_with("Z"));
}

#[test]
fn svg_path_of_degenerate_stroke_is_empty() {
    assert_eq!(stroke_to_svg_path(&[]), "");
    assert_eq!(stroke_to_svg_path(&[InkPoint::new(0.0, 0.0, 1.0)]), "");
}

#[test]
fn bezpath_has_same_topology_as_svg_string() {
    let outline = build_outline(&flat_pair()).unwrap();
    let path = outline_to_bezpath(&outline);
    let kinds: Vec<&str> = path
        .elements()
        .iter()
        .map(|el| match el {
            PathEl::MoveTo(_) => "M",
            PathEl::LineTo(_) => "L",
            PathEl::QuadTo(..) => "Q",
            PathEl::CurveTo(..) => "C",
            PathEl::ClosePath => "Z",
        })
        .collect();
    assert_eq!(kinds, ["M", "L", "Q", "L", "Q", "Z"]);

    let bbox = path.bounding_box();
    assert_eq!((bbox.x0, bbox.x1), (0.0, 10.0));
    assert_eq!((bbox.y0, bbox.y1), (-1.0, 1.0));
}
