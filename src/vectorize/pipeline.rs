use crate::{
    foundation::{
        core::ViewBox,
        error::{SignError, SignResult},
    },
    order::cluster::{OrderedPaths, order_paths},
    vectorize::{
        binarize::{SourceImage, prepare_bitmap},
        markup::{TraceFrame, parse_markup},
        tracer::{TraceParams, Tracer},
    },
};

/// Ordered result of tracing one uploaded image.
#[derive(Clone, Debug, PartialEq)]
pub struct Vectorized {
    pub view_box: ViewBox,
    pub transform: Option<String>,
    pub paths: OrderedPaths,
}

/// Threshold, trace, filter and order an uploaded image.
#[derive(Debug)]
pub struct Vectorizer<T> {
    tracer: T,
    params: TraceParams,
}

impl<T: Tracer> Vectorizer<T> {
    pub fn new(tracer: T, params: TraceParams) -> Self {
        Self { tracer, params }
    }

    pub fn tracer(&self) -> &T {
        &self.tracer
    }

    pub fn params(&self) -> &TraceParams {
        &self.params
    }

    pub fn is_ready(&self) -> bool {
        self.tracer.is_ready()
    }

    /// Run the pipeline on `source` with `threshold`.
    ///
    /// Each call starts from the cached source, so repeating a threshold gives the same
    /// result. A tracer that is not ready rejects the request with
    /// [`SignError::TracerNotReady`] instead of queueing it.
    #[tracing::instrument(skip(self, source), fields(w = source.width(), h = source.height()))]
    pub fn reprocess(&self, source: &SourceImage, threshold: u8) -> SignResult<Vectorized> {
        if !self.tracer.is_ready() {
            return Err(SignError::TracerNotReady);
        }
        let params = TraceParams {
            threshold,
            ..self.params.clone()
        };
        params.validate()?;

        let bitmap = prepare_bitmap(source, threshold, params.blur_radius, params.blur_sigma)?;
        let svg = self.tracer.trace(&bitmap, &params)?;
        let markup = parse_markup(
            &svg,
            TraceFrame {
                width: source.width(),
                height: source.height(),
                path_unit_scale: params.path_unit_scale,
            },
        )?;
        let paths = order_paths(&markup.paths);
        tracing::info!(
            paths = paths.len(),
            clusters = paths.cluster_count(),
            "vectorized"
        );
        Ok(Vectorized {
            view_box: markup.view_box,
            transform: markup.transform,
            paths,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/vectorize/pipeline.rs"]
mod tests;
