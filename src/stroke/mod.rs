pub(crate) mod canvas;
pub(crate) mod outline;
pub(crate) mod process;
