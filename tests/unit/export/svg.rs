use crate::{foundation::core::ViewBox, order::cluster::order_paths};

use super::*;

const LEFT: &str = "M0 0 L10 0 L10 10 L0 10 Z";
const RIGHT: &str = "M100 0 L110 0 L110 10 L100 10 Z";
const TRACED_TRANSFORM: &str = "translate(0,100) scale(0.1,-0.1)";

fn traced() -> SignatureArt {
    SignatureArt::traced(
        order_paths(&[RIGHT, LEFT]),
        ViewBox::new(0.0, 0.0, 200.0, 100.0),
        Some(TRACED_TRANSFORM.to_string()),
    )
}

fn drawn() -> SignatureArt {
    let mut art = SignatureArt::drawn(order_paths(&[LEFT, RIGHT]), crate::Canvas::SIGNATURE_PAD);
    // Drawn art must ignore any transform that sneaks in.
    art.transform = Some(TRACED_TRANSFORM.to_string());
    art
}

fn attr_values<'a>(svg: &'a str, key: &str) -> Vec<&'a str> {
    svg.match_indices(key)
        .map(|(at, _)| {
            let rest = &svg[at + key.len()..];
            &rest[..rest.find('s').unwrap()]
        })
        .collect()
}

fn clip_width(svg: &str) -> f64 {
    let rect = &svg[svg.find("<rect").unwrap()..];
    let rest = &rect[rect.find("width=\"").unwrap() + 7..];
    rest[..rest.find('"').unwrap()].parse().unwrap()
}

#[test]
fn static_svg_keeps_the_traced_transform() {
    let svg = static_svg(&traced());
    assert!(svg.starts_with(
        "<svg viewBox=\"0 0 200 100\" xmlns=\"http://www.w3.org/2000/svg\" style=\"width:100%;height:auto;\">"
    ));
    assert!(svg.contains(&format!(
        "<g transform=\"{TRACED_TRANSFORM}\" fill=\"#161311\" stroke=\"none\">"
    )));
    // Reveal order, not input order.
    let left = svg.find(LEFT).unwrap();
    let right = svg.find(RIGHT).unwrap();
    assert!(left < right);
    assert_eq!(svg.matches("fill-rule=\"evenodd\"").count(), 2);
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn drawn_art_never_gets_a_group_transform() {
    let svg = static_svg(&drawn());
    assert!(svg.contains("viewBox=\"0 0 600 200\""));
    assert!(!svg.contains("transform="));
    assert!(svg.contains("<g fill=\"#161311\" stroke=\"none\">"));
}

#[test]
fn letter_snippet_staggers_by_cluster() {
    let html = animated_snippet(&traced(), AnimStyle::Letter, 1.0);
    assert!(html.starts_with(SNIPPET_HEADER));
    assert!(html.contains("<div style=\"max-width:500px;\">"));
    assert!(html.contains("@keyframes sigFadeIn"));
    assert_eq!(
        attr_values(&html, "animation-delay:"),
        vec!["0.000", "0.500"]
    );
    assert_eq!(
        attr_values(&html, "animation-duration:"),
        vec!["0.200", "0.200"]
    );
}

#[test]
fn classic_snippet_honors_speed() {
    let html = animated_snippet(&drawn(), AnimStyle::Classic, 2.0);
    assert_eq!(
        attr_values(&html, "animation-delay:"),
        vec!["0.000", "0.200"]
    );
    assert_eq!(
        attr_values(&html, "animation-duration:"),
        vec!["0.120", "0.120"]
    );
    assert!(!html.contains("transform=\""));
}

#[test]
fn flow_snippet_wipes_over_the_cluster_span() {
    let html = animated_snippet(&traced(), AnimStyle::Flow, 1.0);
    assert!(html.contains("animation: sigReveal 1.50s cubic-bezier(0.25,0.1,0.25,1) forwards;"));
    assert!(html.contains("clip-path=\"url(#sig-reveal)\""));
    assert!(!html.contains("sig-p"));

    let mut empty = traced();
    empty.paths.cluster_meta.clear();
    let html = animated_snippet(&empty, AnimStyle::Flow, 0.5);
    assert!(html.contains("sigReveal 4.00s"));
}

#[test]
fn special_characters_are_escaped() {
    let mut art = traced();
    art.transform = Some("scale(1)\" onload=\"x".to_string());
    let svg = static_svg(&art);
    assert!(!svg.contains("\" onload=\""));
    assert!(svg.contains("&quot;"));
}

#[test]
fn frame_fades_paths_in_order() {
    let art = traced();
    let plan = art.reveal_plan(AnimStyle::Letter, 1.0);

    let early = frame_svg(&art, &plan, 0.1);
    assert_eq!(early.matches(" opacity=\"").count(), 2);
    assert!(early.contains("opacity=\"0.000\""));
    assert!(early.contains("scale(0.97"));
    assert!(!early.contains("<clipPath"));

    let done = frame_svg(&art, &plan, plan.total_duration() + 1.0);
    assert!(!done.contains("opacity="));
    assert!(!done.contains("scale(0.9"));
    assert_eq!(done, frame_svg(&art, &plan, 100.0));
}

#[test]
fn flow_frame_clips_to_the_wipe() {
    let art = drawn();
    let plan = art.reveal_plan(AnimStyle::Flow, 1.0);

    let start = frame_svg(&art, &plan, 0.0);
    assert!(start.contains("<clipPath id=\"sig-reveal\">"));
    assert!(clip_width(&start).abs() < 1e-9);

    let mid = clip_width(&frame_svg(&art, &plan, plan.total_duration() / 2.0));
    assert!(mid > 0.0 && mid < 600.0);

    let end = clip_width(&frame_svg(&art, &plan, plan.total_duration() * 2.0));
    assert!((end - 600.0).abs() < 1e-3);
    assert!(!frame_svg(&art, &plan, 0.0).contains("opacity="));
}

#[test]
fn fade_snippet_keeps_paths_without_metadata() {
    for style in [AnimStyle::Letter, AnimStyle::Classic] {
        let mut art = traced();
        art.paths.cluster_meta.clear();
        let html = animated_snippet(&art, style, 1.0);
        assert_eq!(html.matches("<path ").count(), 2, "{style}");
        assert_eq!(
            attr_values(&html, "animation-delay:"),
            vec!["0.000", "0.400"]
        );
        assert_eq!(
            attr_values(&html, "animation-duration:"),
            vec!["0.240", "0.240"]
        );
    }

    // Metadata for only the first path: the second one is paced classically.
    let mut art = traced();
    art.paths.cluster_meta.truncate(1);
    let html = animated_snippet(&art, AnimStyle::Letter, 1.0);
    assert_eq!(
        attr_values(&html, "animation-delay:"),
        vec!["0.000", "0.400"]
    );
}

#[test]
fn exported_times_round_halves_up() {
    // Cluster 1 at 8x starts at 0.0625s; fades last 0.025s.
    let html = animated_snippet(&traced(), AnimStyle::Letter, 8.0);
    assert_eq!(
        attr_values(&html, "animation-delay:"),
        vec!["0.000", "0.063"]
    );
    assert_eq!(
        attr_values(&html, "animation-duration:"),
        vec!["0.025", "0.025"]
    );
}

#[test]
fn easing_names_come_from_the_shared_curves() {
    let fade = animated_snippet(&traced(), AnimStyle::Classic, 1.0);
    assert!(fade.contains(&format!("animation-timing-function: {};", Ease::EaseOut.css())));
    let flow = animated_snippet(&traced(), AnimStyle::Flow, 1.0);
    assert!(flow.contains(&format!("sigReveal 1.50s {} forwards", Ease::Ease.css())));
}
