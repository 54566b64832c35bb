pub(crate) mod png;
pub(crate) mod svg;
