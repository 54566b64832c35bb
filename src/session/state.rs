use crate::{
    config::Settings,
    foundation::{
        core::{Canvas, Point, ViewBox},
        error::{SignError, SignResult},
        math::lerp,
    },
    order::cluster::{OrderedPaths, order_paths},
    stroke::{
        canvas::InkCanvas,
        outline::stroke_to_svg_path,
        process::{InkPoint, ProcessedStroke, RawSample, StrokeParams, process_stroke},
    },
    timing::{model::AnimStyle, reveal::RevealPlan},
    vectorize::{
        binarize::{DEFAULT_THRESHOLD, SourceImage},
        pipeline::Vectorizer,
        tracer::{PotraceTracer, TraceParams, Tracer},
    },
};

/// Samples needed before an in-progress stroke is previewed.
const PREVIEW_MIN_SAMPLES: usize = 4;
/// Samples needed for a stroke to be kept.
const COMMIT_MIN_SAMPLES: usize = 2;

/// Where the animated paths came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtSource {
    /// Filled ink outlines drawn on the pad.
    Drawn,
    /// Tracer output for an uploaded image.
    Traced,
}

/// Renderable result: ordered paths plus the frame they live in.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SignatureArt {
    pub paths: OrderedPaths,
    pub view_box: ViewBox,
    pub transform: Option<String>,
    pub source: ArtSource,
}

impl SignatureArt {
    pub fn drawn(paths: OrderedPaths, canvas: Canvas) -> Self {
        Self {
            paths,
            view_box: canvas.view_box(),
            transform: None,
            source: ArtSource::Drawn,
        }
    }

    pub fn traced(paths: OrderedPaths, view_box: ViewBox, transform: Option<String>) -> Self {
        Self {
            paths,
            view_box,
            transform,
            source: ArtSource::Traced,
        }
    }

    /// Drawn art is filled outline geometry in canvas units and never carries a transform.
    pub fn is_fill(&self) -> bool {
        self.source == ArtSource::Drawn
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn reveal_plan(&self, style: AnimStyle, speed: f64) -> RevealPlan {
        RevealPlan::new(&self.paths, style, speed)
    }
}

/// All mutable state of one signature editing session.
///
/// Drawing input arrives as start/continue/end events; finished strokes accumulate until
/// undone or cleared. Uploaded images are cached so the threshold can be changed and the
/// trace rerun. The latest result of either path is the current [`SignatureArt`].
pub struct Session<T = PotraceTracer> {
    canvas: Canvas,
    stroke: StrokeParams,
    drawing: bool,
    has_drawn: bool,
    raw: Vec<RawSample>,
    last_smoothed: Point,
    preview: Option<ProcessedStroke>,
    finished: Vec<ProcessedStroke>,
    ink: Option<InkCanvas>,
    vectorizer: Vectorizer<T>,
    source: Option<SourceImage>,
    threshold: u8,
    art: Option<SignatureArt>,
}

impl<T: Tracer> Session<T> {
    pub fn new(tracer: T, stroke: StrokeParams, trace: TraceParams) -> Self {
        let threshold = trace.threshold;
        Self {
            canvas: Canvas::SIGNATURE_PAD,
            stroke,
            drawing: false,
            has_drawn: false,
            raw: Vec::new(),
            last_smoothed: Point::ZERO,
            preview: None,
            finished: Vec::new(),
            ink: None,
            vectorizer: Vectorizer::new(tracer, trace),
            source: None,
            threshold,
            art: None,
        }
    }

    pub fn from_settings(tracer: T, settings: &Settings) -> Self {
        Self::new(tracer, settings.stroke.clone(), settings.trace.clone())
    }

    /// Attach a raster ink canvas at `scale` pixels per canvas unit, kept in sync with strokes.
    pub fn with_ink_canvas(mut self, scale: f64) -> SignResult<Self> {
        let mut ink = InkCanvas::new(self.canvas, scale)?;
        ink.redraw(&self.finished, None, Default::default());
        self.ink = Some(ink);
        Ok(self)
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Whether anything has been drawn since the pad was last emptied.
    pub fn has_drawn(&self) -> bool {
        self.has_drawn
    }

    pub fn finished_strokes(&self) -> &[ProcessedStroke] {
        &self.finished
    }

    /// Preview of the stroke being drawn, once it has enough samples.
    pub fn preview(&self) -> Option<&[InkPoint]> {
        self.preview.as_deref()
    }

    pub fn art(&self) -> Option<&SignatureArt> {
        self.art.as_ref()
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    fn redraw(&mut self) {
        if let Some(ink) = self.ink.as_mut() {
            ink.redraw(&self.finished, self.preview.as_deref(), Default::default());
        }
    }

    /// Begin a stroke. Samples with non-finite coordinates or time are ignored.
    pub fn start_stroke(&mut self, sample: RawSample) {
        if !sample.is_finite() {
            tracing::debug!("ignoring non-finite stroke start");
            return;
        }
        self.drawing = true;
        self.has_drawn = true;
        self.raw.clear();
        self.raw.push(sample);
        self.last_smoothed = sample.point();
        self.preview = None;
    }

    /// Low-pass the sample against the previous one and append it.
    ///
    /// Returns the refreshed preview once the stroke has at least four samples.
    pub fn continue_stroke(&mut self, sample: RawSample) -> Option<&[InkPoint]> {
        if !self.drawing {
            return None;
        }
        if !sample.is_finite() {
            tracing::debug!("ignoring non-finite stroke sample");
            return self.preview.as_deref();
        }
        let k = self.stroke.smoothing;
        let smoothed = Point::new(
            lerp(sample.x, self.last_smoothed.x, k),
            lerp(sample.y, self.last_smoothed.y, k),
        );
        self.last_smoothed = smoothed;
        self.raw
            .push(RawSample::new(smoothed.x, smoothed.y, sample.t));
        if self.raw.len() < PREVIEW_MIN_SAMPLES {
            return None;
        }
        self.preview = Some(process_stroke(&self.raw, &self.stroke));
        self.redraw();
        self.preview.as_deref()
    }

    /// Finish the current stroke. Returns whether it was kept (two or more samples).
    pub fn end_stroke(&mut self) -> bool {
        if !self.drawing {
            return false;
        }
        self.drawing = false;
        self.preview = None;
        let raw = std::mem::take(&mut self.raw);
        if raw.len() < COMMIT_MIN_SAMPLES {
            self.redraw();
            return false;
        }
        self.finished.push(process_stroke(&raw, &self.stroke));
        self.redraw();
        true
    }

    /// Drop the most recent finished stroke.
    pub fn undo(&mut self) -> Option<ProcessedStroke> {
        let popped = self.finished.pop();
        if self.finished.is_empty() {
            self.has_drawn = false;
        }
        self.redraw();
        popped
    }

    /// Drop every finished stroke.
    pub fn clear(&mut self) {
        self.finished.clear();
        self.has_drawn = false;
        self.redraw();
    }

    /// Turn the finished strokes into ordered outline paths.
    ///
    /// No-op returning `None` when nothing has been drawn.
    #[tracing::instrument(skip(self), fields(strokes = self.finished.len()))]
    pub fn animate_drawing(&mut self) -> Option<&SignatureArt> {
        if self.finished.is_empty() {
            return None;
        }
        let paths: Vec<String> = self
            .finished
            .iter()
            .map(|s| stroke_to_svg_path(s))
            .filter(|d| !d.is_empty())
            .collect();
        let ordered = order_paths(&paths);
        self.art = Some(SignatureArt::drawn(ordered, self.canvas));
        self.art.as_ref()
    }

    /// Cache an uploaded image and trace it at the default threshold.
    ///
    /// The image stays cached even when the tracer is not ready, so a later
    /// [`Session::reprocess`] can pick it up.
    pub fn load_image(&mut self, source: SourceImage) -> SignResult<&SignatureArt> {
        self.load_image_at(source, DEFAULT_THRESHOLD)
    }

    /// Like [`Session::load_image`], tracing once at `threshold` instead of the default.
    pub fn load_image_at(
        &mut self,
        source: SourceImage,
        threshold: u8,
    ) -> SignResult<&SignatureArt> {
        self.source = Some(source);
        self.threshold = threshold;
        self.reprocess(threshold)
    }

    /// Retrace the cached image with a new threshold; the last result wins.
    pub fn reprocess(&mut self, threshold: u8) -> SignResult<&SignatureArt> {
        let Some(source) = self.source.as_ref() else {
            return Err(SignError::validation("no image has been loaded"));
        };
        let out = self.vectorizer.reprocess(source, threshold)?;
        self.threshold = threshold;
        let art = SignatureArt::traced(out.paths, out.view_box, out.transform);
        Ok(&*self.art.insert(art))
    }

    /// Forget the current result and the cached upload. Drawn strokes are kept.
    pub fn reset(&mut self) {
        self.art = None;
        self.source = None;
        self.threshold = DEFAULT_THRESHOLD;
    }

    /// PNG of the ink canvas over white, when one is attached.
    pub fn ink_png(&mut self) -> SignResult<Option<Vec<u8>>> {
        self.ink.as_mut().map(InkCanvas::to_png).transpose()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/state.rs"]
mod tests;
