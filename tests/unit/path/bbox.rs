use super::*;

fn bounds(d: &str) -> [f64; 4] {
    let b = path_bbox(d).unwrap();
    [b.min_x, b.min_y, b.max_x, b.max_y]
}

#[test]
fn closed_square() {
    let b = path_bbox("M0 0 L10 0 L10 10 L0 10 Z").unwrap();
    assert_eq!(b, BBox::from_bounds(0.0, 0.0, 10.0, 10.0));
    assert_eq!((b.w, b.h, b.cx, b.cy), (10.0, 10.0, 5.0, 5.0));
}

#[test]
fn relative_commands_accumulate_against_current_point() {
    assert_eq!(
        path_bbox("m0 0 l10 0 l0 10"),
        path_bbox("M0 0 L10 0 L10 10")
    );
}

#[test]
fn empty_or_absent_path_has_no_bbox() {
    assert_eq!(path_bbox(""), None);
    assert_eq!(path_bbox(None), None);
    assert_eq!(path_bbox("M"), None);
    assert_eq!(path_bbox("Z z"), None);
    assert_eq!(path_bbox("garbage"), None);
}

#[test]
fn repeated_argument_groups_each_move_the_current_point() {
    assert_eq!(bounds("M0 0 L10 0 20 5 30 -5"), [0.0, -5.0, 30.0, 5.0]);
    assert_eq!(bounds("m0 0 l10 0 10 0 10 0"), [0.0, 0.0, 30.0, 0.0]);
}

#[test]
fn extra_moveto_pairs_are_linetos() {
    assert_eq!(bounds("m10 10 5 5 5 5"), [10.0, 10.0, 20.0, 20.0]);
    // The subpath start stays at the first pair.
    assert_eq!(bounds("m10 10 5 5 z l-20 0"), [-10.0, 10.0, 15.0, 15.0]);
}

#[test]
fn close_path_restores_subpath_start() {
    assert_eq!(bounds("M5 5 l10 0 z l0 10"), [5.0, 5.0, 15.0, 15.0]);
}

#[test]
fn relative_curves_resolve_all_points_from_segment_start() {
    assert_eq!(
        bounds("m10 10 c0 -5 10 -5 10 0 s10 5 10 0"),
        [10.0, 5.0, 30.0, 15.0]
    );
    assert_eq!(bounds("M0 0 q5 -10 10 0 t10 0"), [0.0, -10.0, 20.0, 0.0]);
}

#[test]
fn horizontal_and_vertical_lines() {
    assert_eq!(bounds("M1 1 h4 v3 H0 V-2"), [0.0, -2.0, 5.0, 4.0]);
}

#[test]
fn arcs_only_contribute_their_endpoint() {
    assert_eq!(bounds("M0 0 A 50 50 0 0 1 10 10"), [0.0, 0.0, 10.0, 10.0]);
    assert_eq!(bounds("M0 0 a5 5 0 0110 10"), [0.0, 0.0, 10.0, 10.0]);
    assert_eq!(
        bounds("M0 0 a5 5 0 0 1 10 0 5 5 0 0 1 10 0"),
        [0.0, 0.0, 20.0, 0.0]
    );
}

#[test]
fn incomplete_trailing_group_is_ignored() {
    assert_eq!(bounds("M0 0 L10 10 20"), [0.0, 0.0, 10.0, 10.0]);
    assert_eq!(bounds("M0 0 C1 1 2 2 L5 5"), [0.0, 0.0, 5.0, 5.0]);
}

#[test]
fn exponent_and_compact_numbers() {
    assert_eq!(bounds("M1e1 0L2e1-5"), [10.0, -5.0, 20.0, 0.0]);
    assert_eq!(bounds("M.5.5l.5.5"), [0.5, 0.5, 1.0, 1.0]);
}

#[test]
fn potrace_style_relative_contour() {
    // Scaled-up tracer output: absolute move, then relative cubic groups.
    let d = "M2460 1888 c-12 -11 -30 -20 -40 -20 -18 0 -20 8 -20 83 0 70 3 85 18 95 z";
    let b = path_bbox(d).unwrap();
    assert_eq!(b.min_x, 2400.0);
    assert_eq!(b.max_x, 2460.0);
    assert_eq!(b.min_y, 1868.0);
    assert_eq!(b.max_y, 2046.0);
}
