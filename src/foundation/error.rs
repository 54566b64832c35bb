/// Convenience result type used across signanimate.
pub type SignResult<T> = Result<T, SignError>;

/// Top-level error taxonomy used by the public APIs.
///
/// Geometry, ordering and timing never fail; they return empty values for degenerate input.
/// Errors come from configuration, the external tracer and rasterization.
#[derive(thiserror::Error, Debug)]
pub enum SignError {
    /// Invalid user-provided settings or input data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The tracing engine has not been initialized; the caller should retry later.
    #[error("tracer is not ready yet, try again")]
    TracerNotReady,

    /// The tracer ran but failed or produced unusable markup.
    #[error("trace error: {0}")]
    Trace(String),

    /// Rasterization or drawing-surface failures.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SignError {
    /// Build a [`SignError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SignError::Trace`] value.
    pub fn trace(msg: impl Into<String>) -> Self {
        Self::Trace(msg.into())
    }

    /// Build a [`SignError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SignError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether the failure is the retryable "tracer not ready" condition.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TracerNotReady)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
