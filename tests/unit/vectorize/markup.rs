use super::*;

const POTRACE_SVG: &str = r##"<?xml version="1.0" standalone="no"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 20010904//EN"
 "http://www.w3.org/TR/2001/REC-SVG-20010904/DTD/svg10.dtd">
<svg version="1.0" xmlns="http://www.w3.org/2000/svg"
 width="200.000000pt" height="100.000000pt" viewBox="0 0 200.000000 100.000000"
 preserveAspectRatio="xMidYMid meet">
<metadata>
Created by potrace 1.16, written by Peter Selinger 2001-2019
</metadata>
<g transform="translate(0.000000,100.000000) scale(0.100000,-0.100000)"
fill="#000000" stroke="none">
<path d="M0 0 l2000 0 0 1000 -2000 0z"/>
<path d="M200 800 l0 -600 300 0 0 600 -300 0z"/>
<path d="M0 0 l1 1"/>
<path fill="white" d="M10 10 l100 0 0 100 -100 0z"/>
<path d="M1500 800 l0 -600 300 0 0 600 -300 0z"/>
</g>
<g fill="#FFFFFF"><path d="M10 10 l100 0 0 100 -100 0z"/></g>
</svg>
"##;

fn frame(width: u32, height: u32) -> TraceFrame {
    TraceFrame {
        width,
        height,
        path_unit_scale: 10.0,
    }
}

#[test]
fn keeps_ink_paths_and_passes_through_frame() {
    let m = parse_markup(POTRACE_SVG, frame(200, 100)).unwrap();
    assert_eq!(
        m.paths,
        vec![
            "M200 800 l0 -600 300 0 0 600 -300 0z".to_string(),
            "M1500 800 l0 -600 300 0 0 600 -300 0z".to_string(),
        ]
    );
    assert_eq!(m.view_box.to_string(), "0 0 200 100");
    assert_eq!(
        m.transform.as_deref(),
        Some("translate(0.000000,100.000000) scale(0.100000,-0.100000)")
    );
}

#[test]
fn oversized_filter_depends_on_bitmap_size() {
    // A bigger bitmap no longer treats the full-frame rectangle as background.
    let m = parse_markup(POTRACE_SVG, frame(400, 200)).unwrap();
    assert_eq!(m.paths.len(), 3);
    assert_eq!(m.paths[0], "M0 0 l2000 0 0 1000 -2000 0z");
}

#[test]
fn view_box_falls_back_to_size_attributes() {
    let svg = r#"<svg width="300pt" height="120pt"><g><path d="M0 0 L100 100 L0 100 Z"/></g></svg>"#;
    let m = parse_markup(svg, frame(30, 12)).unwrap();
    assert_eq!(m.view_box, ViewBox::new(0.0, 0.0, 300.0, 120.0));
    assert_eq!(m.transform, None);
    assert_eq!(m.paths.len(), 1);

    let bare = r#"<svg><path d="M0 0 L100 100 L0 100 Z"/></svg>"#;
    let m = parse_markup(bare, frame(64, 32)).unwrap();
    assert_eq!(m.view_box, ViewBox::new(0.0, 0.0, 64.0, 32.0));
    assert_eq!(m.paths.len(), 1);
}

#[test]
fn only_first_group_transform_is_used() {
    let svg = r#"<svg viewBox="0 0 10 10"><g transform="  "><g transform="scale(2)"><path d="M0 0 L5 5 L0 5 Z"/></g></g></svg>"#;
    let m = parse_markup(svg, frame(10, 10)).unwrap();
    assert_eq!(m.transform, None);
    assert_eq!(m.paths.len(), 1);
}

#[test]
fn paths_leave_white_group_scope_after_it_closes() {
    let svg = r#"<svg viewBox="0 0 10 10"><g fill="white"><path d="M0 0 L5 5 L0 5 Z"/></g><path d="M1 1 L5 5 L1 5 Z"/></svg>"#;
    let m = parse_markup(svg, frame(10, 10)).unwrap();
    assert_eq!(m.paths, vec!["M1 1 L5 5 L1 5 Z".to_string()]);
}

#[test]
fn broken_markup_is_a_trace_error() {
    let err = parse_markup("<svg><g></svg>", frame(10, 10)).unwrap_err();
    assert!(matches!(err, SignError::Trace(_)));
}

#[test]
fn empty_output_has_no_paths() {
    let m = parse_markup("", frame(10, 10)).unwrap();
    assert!(m.paths.is_empty());
    assert_eq!(m.view_box, ViewBox::new(0.0, 0.0, 10.0, 10.0));
}
