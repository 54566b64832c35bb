pub(crate) mod binarize;
pub(crate) mod markup;
pub(crate) mod pipeline;
pub(crate) mod tracer;
