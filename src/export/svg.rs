use std::fmt::Write as _;

use quick_xml::escape::escape;

use crate::{
    foundation::{core::InkColor, math::to_fixed},
    path::bbox::path_bbox,
    session::state::SignatureArt,
    timing::{
        model::{AnimStyle, compute_timing, flow_total_duration},
        ease::Ease,
        reveal::{FADE_SHARE, PathReveal, RevealPlan},
    },
};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const SNIPPET_HEADER: &str = "<!-- Signature Animation — generated by Signature Animator -->";

fn fill() -> String {
    InkColor::INK.to_hex()
}

/// `transform` for the ink group: only traced art carries one.
fn group_transform(art: &SignatureArt) -> Option<String> {
    if art.is_fill() {
        return None;
    }
    art.transform
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(|t| escape(t).into_owned())
}

fn path_line(indent: &str, d: &str, extra: &str) -> String {
    format!(r#"{indent}<path d="{}" fill-rule="evenodd"{extra}/>"#, escape(d))
}

/// Standalone SVG with one `<path fill-rule="evenodd">` per ordered path.
#[tracing::instrument(skip(art), fields(paths = art.paths.len()))]
pub fn static_svg(art: &SignatureArt) -> String {
    let paths = art
        .paths
        .ordered_paths
        .iter()
        .map(|d| path_line("    ", d, ""))
        .collect::<Vec<_>>()
        .join("\n");
    let inner = match group_transform(art) {
        Some(t) => format!(
            "  <g transform=\"{t}\" fill=\"{}\" stroke=\"none\">\n{paths}\n  </g>",
            fill()
        ),
        None => format!("  <g fill=\"{}\" stroke=\"none\">\n{paths}\n  </g>", fill()),
    };
    format!(
        "<svg viewBox=\"{}\" xmlns=\"{SVG_NS}\" style=\"width:100%;height:auto;\">\n{inner}\n</svg>",
        art.view_box
    )
}

/// Self-contained animated SVG + CSS snippet, paced exactly like [`RevealPlan`].
#[tracing::instrument(skip(art), fields(paths = art.paths.len()))]
pub fn animated_snippet(art: &SignatureArt, style: AnimStyle, speed: f64) -> String {
    match style {
        AnimStyle::Flow => flow_snippet(art, speed),
        AnimStyle::Letter | AnimStyle::Classic => fade_snippet(art, style, speed),
    }
}

fn flow_snippet(art: &SignatureArt, speed: f64) -> String {
    let total = flow_total_duration(&art.paths.cluster_meta, speed);
    let paths = art
        .paths
        .ordered_paths
        .iter()
        .map(|d| path_line("      ", d, ""))
        .collect::<Vec<_>>()
        .join("\n");
    let inner = match group_transform(art) {
        Some(t) => format!(
            "    <g class=\"sig-paths\" clip-path=\"url(#sig-reveal)\">\n      <g transform=\"{t}\" fill=\"{}\" stroke=\"none\">\n{paths}\n      </g>\n    </g>",
            fill()
        ),
        None => format!(
            "    <g class=\"sig-paths\" clip-path=\"url(#sig-reveal)\" fill=\"{}\" stroke=\"none\">\n{paths}\n    </g>",
            fill()
        ),
    };

    format!(
        r#"{SNIPPET_HEADER}
<div style="max-width:500px;">
  <svg viewBox="{vb}" xmlns="{SVG_NS}" style="width:100%;height:auto;overflow:hidden;">
    <style>
      @keyframes sigReveal {{
        from {{ transform: translateX(-100%); }}
        to {{ transform: translateX(0); }}
      }}
      .sig-reveal-rect {{ animation: sigReveal {total}s {ease} forwards; }}
    </style>
    <defs>
      <clipPath id="sig-reveal">
        <rect x="0" y="0" width="100%" height="100%" class="sig-reveal-rect" style="transform:translateX(-100%);"/>
      </clipPath>
    </defs>
{inner}
  </svg>
</div>"#,
        vb = art.view_box,
        total = to_fixed(total, 2),
        ease = Ease::Ease.css(),
    )
}

fn fade_snippet(art: &SignatureArt, style: AnimStyle, speed: f64) -> String {
    let paths = art
        .paths
        .ordered_paths
        .iter()
        .enumerate()
        .map(|(i, d)| {
            // Paths without cluster metadata fall back to classic pacing, as in `schedule`.
            let t = compute_timing(i, art.paths.cluster_meta.get(i), style, speed);
            let extra = format!(
                r#" class="sig-p" style="animation-delay:{}s;animation-duration:{}s;""#,
                to_fixed(t.delay, 3),
                to_fixed(t.duration * FADE_SHARE, 3)
            );
            path_line("      ", d, &extra)
        })
        .collect::<Vec<_>>()
        .join("\n");
    let inner = match group_transform(art) {
        Some(t) => format!(
            "    <g transform=\"{t}\" fill=\"{}\" stroke=\"none\">\n{paths}\n    </g>",
            fill()
        ),
        None => format!("    <g fill=\"{}\" stroke=\"none\">\n{paths}\n    </g>", fill()),
    };

    format!(
        r#"{SNIPPET_HEADER}
<div style="max-width:500px;">
  <svg viewBox="{vb}" xmlns="{SVG_NS}" style="width:100%;height:auto;overflow:hidden;">
    <style>
      @keyframes sigFadeIn {{
        from {{ opacity: 0; transform: scale(0.97); }}
        to {{ opacity: 1; transform: scale(1); }}
      }}
      .sig-p {{
        opacity: 0;
        animation-name: sigFadeIn;
        animation-fill-mode: forwards;
        animation-timing-function: {ease};
      }}
    </style>
{inner}
  </svg>
</div>"#,
        vb = art.view_box,
        ease = Ease::EaseOut.css(),
    )
}

/// Static SVG of the reveal `t` seconds in, for previews and frame dumps.
///
/// Fading paths get an `opacity` and a scale about their own bbox center; the flow wipe
/// becomes a clip rect covering the revealed share of the viewBox.
#[tracing::instrument(skip(art, plan), fields(paths = art.paths.len()))]
pub fn frame_svg(art: &SignatureArt, plan: &RevealPlan, t: f64) -> String {
    let frame = plan.sample(t);
    let mut paths = String::new();
    for (i, d) in art.paths.ordered_paths.iter().enumerate() {
        let state = frame.paths.get(i).copied().unwrap_or(PathReveal::SHOWN);
        let mut extra = String::new();
        if state.opacity < 1.0 {
            let _ = write!(extra, r#" opacity="{:.3}""#, state.opacity);
        }
        if state.scale != 1.0
            && let Some(b) = path_bbox(d.as_str())
        {
            let _ = write!(
                extra,
                r#" transform="translate({cx} {cy}) scale({s:.4}) translate({ncx} {ncy})""#,
                cx = b.cx,
                cy = b.cy,
                s = state.scale,
                ncx = -b.cx,
                ncy = -b.cy,
            );
        }
        if !paths.is_empty() {
            paths.push('\n');
        }
        paths.push_str(&path_line("      ", d, &extra));
    }

    let group_open = match group_transform(art) {
        Some(t) => format!("<g transform=\"{t}\" fill=\"{}\" stroke=\"none\">", fill()),
        None => format!("<g fill=\"{}\" stroke=\"none\">", fill()),
    };

    let vb = art.view_box;
    let (defs, clip) = if plan.wipe_duration.is_some() {
        (
            format!(
                "  <defs>\n    <clipPath id=\"sig-reveal\">\n      <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/>\n    </clipPath>\n  </defs>\n",
                vb.min_x,
                vb.min_y,
                vb.width * frame.wipe,
                vb.height
            ),
            " clip-path=\"url(#sig-reveal)\"",
        )
    } else {
        (String::new(), "")
    };

    format!(
        "<svg viewBox=\"{vb}\" xmlns=\"{SVG_NS}\" style=\"width:100%;height:auto;\">\n{defs}  <g{clip}>\n    {group_open}\n{paths}\n    </g>\n  </g>\n</svg>"
    )
}

#[cfg(test)]
#[path = "../../tests/unit/export/svg.rs"]
mod tests;
