use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::error::{SignError, SignResult},
    stroke::process::StrokeParams,
    timing::model::AnimStyle,
    vectorize::tracer::TraceParams,
};

/// Reveal style and pacing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationParams {
    pub style: AnimStyle,
    /// Multiplier: 2 plays twice as fast, 0.5 half as fast.
    pub speed: f64,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            style: AnimStyle::Letter,
            speed: 1.0,
        }
    }
}

impl AnimationParams {
    pub fn validate(&self) -> SignResult<()> {
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(SignError::validation("animation.speed must be > 0"));
        }
        Ok(())
    }
}

/// Everything tunable about a session, loadable from JSON.
///
/// Every section and field is optional; missing values take their defaults.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    pub stroke: StrokeParams,
    pub trace: TraceParams,
    pub animation: AnimationParams,
}

impl Settings {
    pub fn from_json(json: &str) -> SignResult<Self> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| SignError::serde(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_path(path: &Path) -> SignResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read settings '{}'", path.display()))?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> SignResult<()> {
        self.stroke.validate()?;
        self.trace.validate()?;
        self.animation.validate()
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
