use std::cell::{Cell, RefCell};

use image::RgbaImage;

use super::*;

const CANNED: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 40 20">
<g transform="translate(0,20) scale(0.1,-0.1)" fill="#000000" stroke="none">
<path d="M300 150 l0 -100 50 0 0 100 -50 0z"/>
<path d="M20 180 l0 -40 60 0 0 40 -60 0z"/>
<path d="M10 100 l0 -90 80 0 0 90 -80 0z"/>
</g>
</svg>"##;

struct FakeTracer {
    ready: bool,
    calls: Cell<usize>,
    thresholds: RefCell<Vec<u8>>,
}

impl FakeTracer {
    fn new(ready: bool) -> Self {
        Self {
            ready,
            calls: Cell::new(0),
            thresholds: RefCell::new(Vec::new()),
        }
    }
}

impl Tracer for FakeTracer {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn trace(&self, bitmap: &RgbaImage, params: &TraceParams) -> SignResult<String> {
        assert!(bitmap.pixels().all(|p| p.0[3] == 255));
        self.calls.set(self.calls.get() + 1);
        self.thresholds.borrow_mut().push(params.threshold);
        Ok(CANNED.to_string())
    }
}

fn source() -> SourceImage {
    SourceImage::from_rgba(RgbaImage::from_pixel(40, 20, image::Rgba([255, 255, 255, 255])))
}

#[test]
fn traced_paths_are_filtered_and_ordered() {
    let v = Vectorizer::new(FakeTracer::new(true), TraceParams::default());
    let out = v.reprocess(&source(), 180).unwrap();
    assert_eq!(out.view_box.to_string(), "0 0 40 20");
    assert_eq!(
        out.transform.as_deref(),
        Some("translate(0,20) scale(0.1,-0.1)")
    );
    // Left cluster holds the two stacked paths, top (smaller y) first.
    assert_eq!(
        out.paths.ordered_paths,
        vec![
            "M10 100 l0 -90 80 0 0 90 -80 0z".to_string(),
            "M20 180 l0 -40 60 0 0 40 -60 0z".to_string(),
            "M300 150 l0 -100 50 0 0 100 -50 0z".to_string(),
        ]
    );
    let clusters: Vec<usize> = out.paths.cluster_meta.iter().map(|m| m.cluster_index).collect();
    assert_eq!(clusters, vec![0, 0, 1]);
}

#[test]
fn not_ready_tracer_rejects_without_tracing() {
    let v = Vectorizer::new(FakeTracer::new(false), TraceParams::default());
    let err = v.reprocess(&source(), 180).unwrap_err();
    assert!(matches!(err, SignError::TracerNotReady));
    assert!(err.is_retryable());
    assert_eq!(v.tracer().calls.get(), 0);
}

#[test]
fn reprocessing_is_idempotent_and_uses_the_new_threshold() {
    let v = Vectorizer::new(FakeTracer::new(true), TraceParams::default());
    let src = source();
    let a = v.reprocess(&src, 120).unwrap();
    let b = v.reprocess(&src, 120).unwrap();
    let c = v.reprocess(&src, 200).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, c);
    assert_eq!(*v.tracer().thresholds.borrow(), vec![120, 120, 200]);
    assert_eq!(v.params().threshold, 180);
}

#[test]
fn out_of_range_threshold_is_rejected() {
    let v = Vectorizer::new(FakeTracer::new(true), TraceParams::default());
    let err = v.reprocess(&source(), 0).unwrap_err();
    assert!(matches!(err, SignError::Validation(_)));
    assert_eq!(v.tracer().calls.get(), 0);
}
