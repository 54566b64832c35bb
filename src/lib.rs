//! signanimate turns a hand-drawn or uploaded signature into an ordered, timed vector reveal.
//!
//! # Pipeline overview
//!
//! 1. **Capture**: pointer samples become variable-width ink (`process_stroke`) and are
//!    serialized as filled outline paths (`stroke_to_svg_path`).
//! 2. **Vectorize** (uploads): fit, threshold and trace an image with the system `potrace`
//!    binary, then drop background, noise and frame-sized paths (`Vectorizer`).
//! 3. **Order**: bounding boxes drive letter clustering left to right, top to bottom within
//!    a letter (`order_paths`).
//! 4. **Time**: one pure function decides each path's delay and duration (`compute_timing`),
//!    shared by the live sampler (`RevealPlan`) and the exporters.
//! 5. **Export**: static SVG, animated SVG+CSS snippet, single reveal frames and PNG.
//!
//! All mutable editing state lives in a [`Session`].
#![forbid(unsafe_code)]

mod config;
mod export;
mod foundation;
mod order;
mod path;
mod session;
mod stroke;
mod timing;
mod vectorize;

pub use config::{AnimationParams, Settings};
pub use export::png::{EXPORT_SCALE, encode_png, flatten_to_opaque_rgba8, rasterize_png};
pub use export::svg::{animated_snippet, frame_svg, static_svg};
pub use foundation::core::{Affine, BezPath, Canvas, InkColor, Point, Rect, Vec2, ViewBox};
pub use foundation::error::{SignError, SignResult};
pub use foundation::math::{catmull_rom, dist, lerp, smoothstep};
pub use order::cluster::{
    Cluster, ClusterMeta, OrderedPaths, PathItem, cluster_paths, order_paths,
};
pub use path::bbox::{BBox, path_bbox};
pub use session::state::{ArtSource, Session, SignatureArt};
pub use stroke::canvas::{InkCanvas, InkSurface, draw_outline, render_stroke};
pub use stroke::outline::{Outline, build_outline, outline_to_bezpath, stroke_to_svg_path};
pub use stroke::process::{InkPoint, ProcessedStroke, RawSample, StrokeParams, process_stroke};
pub use timing::ease::Ease;
pub use timing::model::{
    AnimStyle, Timing, compute_timing, effective_speed, flow_total_duration, schedule,
};
pub use timing::reveal::{FADE_SHARE, PathReveal, RevealFrame, RevealPlan, START_SCALE};
pub use vectorize::binarize::{
    DEFAULT_THRESHOLD, FIT_MAX_HEIGHT, FIT_MAX_WIDTH, SourceImage, binarize, blur_rgba8,
    fit_scale, prepare_bitmap,
};
pub use vectorize::markup::{
    MIN_PATH_LEN, OVERSIZED_RATIO, TraceFrame, TracedMarkup, parse_markup,
};
pub use vectorize::pipeline::{Vectorized, Vectorizer};
pub use vectorize::tracer::{POTRACE_ENV, PotraceTracer, TraceParams, Tracer};
