use std::{
    io::{Cursor, Write as _},
    path::PathBuf,
    process::{Command, Stdio},
    sync::OnceLock,
};

use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::{
    foundation::error::{SignError, SignResult},
    vectorize::binarize::DEFAULT_THRESHOLD,
};

/// Environment variable naming the `potrace` binary.
pub const POTRACE_ENV: &str = "SIGNANIMATE_POTRACE";

/// Thresholding and tracer settings for one vectorization run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TraceParams {
    /// Luma cutoff; brighter pixels become background.
    pub threshold: u8,
    /// Speckles up to this many pixels are suppressed.
    pub turdsize: u32,
    /// Curve optimization tolerance.
    pub opttolerance: f64,
    /// Corner threshold.
    pub alphamax: f64,
    pub opticurve: bool,
    /// Tracer path units per bitmap pixel.
    pub path_unit_scale: f64,
    /// Gaussian blur radius applied before thresholding; 0 disables.
    pub blur_radius: u32,
    pub blur_sigma: f32,
}

impl Default for TraceParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            turdsize: 2,
            opttolerance: 0.4,
            alphamax: 1.2,
            opticurve: true,
            path_unit_scale: 10.0,
            blur_radius: 0,
            blur_sigma: 1.0,
        }
    }
}

impl TraceParams {
    pub fn validate(&self) -> SignResult<()> {
        if !(1..=254).contains(&self.threshold) {
            return Err(SignError::validation("trace.threshold must be in 1..=254"));
        }
        if !(self.opttolerance.is_finite() && self.opttolerance >= 0.0) {
            return Err(SignError::validation("trace.opttolerance must be >= 0"));
        }
        if !(self.alphamax.is_finite() && self.alphamax >= 0.0) {
            return Err(SignError::validation("trace.alphamax must be >= 0"));
        }
        if !(self.path_unit_scale.is_finite() && self.path_unit_scale > 0.0) {
            return Err(SignError::validation("trace.path_unit_scale must be > 0"));
        }
        if self.blur_radius > 0 && !(self.blur_sigma.is_finite() && self.blur_sigma > 0.0) {
            return Err(SignError::validation("trace.blur_sigma must be > 0"));
        }
        Ok(())
    }
}

/// A raster-to-vector engine producing SVG text from a black and white bitmap.
pub trait Tracer {
    /// Whether the engine can accept work right now.
    fn is_ready(&self) -> bool;

    fn trace(&self, bitmap: &RgbaImage, params: &TraceParams) -> SignResult<String>;
}

/// Runs the system `potrace` binary, feeding a BMP on stdin and reading SVG from stdout.
#[derive(Debug)]
pub struct PotraceTracer {
    binary: PathBuf,
    /// Set once a probe succeeds; failed probes are retried on the next call.
    ready: OnceLock<()>,
}

impl PotraceTracer {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            ready: OnceLock::new(),
        }
    }

    /// Use `$SIGNANIMATE_POTRACE` when set, else `potrace` from `PATH`.
    pub fn from_env() -> Self {
        let binary = std::env::var_os(POTRACE_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("potrace"));
        Self::new(binary)
    }

    pub fn binary(&self) -> &std::path::Path {
        &self.binary
    }

    fn args(params: &TraceParams) -> Vec<String> {
        let mut args = vec![
            "--svg".to_string(),
            "--turdsize".to_string(),
            params.turdsize.to_string(),
            "--alphamax".to_string(),
            params.alphamax.to_string(),
            "--opttolerance".to_string(),
            params.opttolerance.to_string(),
        ];
        if !params.opticurve {
            args.push("--longcurve".to_string());
        }
        args.extend(["--output".to_string(), "-".to_string(), "-".to_string()]);
        args
    }
}

impl Default for PotraceTracer {
    fn default() -> Self {
        Self::from_env()
    }
}

impl Tracer for PotraceTracer {
    fn is_ready(&self) -> bool {
        if self.ready.get().is_some() {
            return true;
        }
        let ok = Command::new(&self.binary)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|s| s.success());
        if ok {
            let _ = self.ready.set(());
        } else {
            tracing::debug!(binary = %self.binary.display(), "potrace probe failed");
        }
        ok
    }

    #[tracing::instrument(skip(self, bitmap, params), fields(w = bitmap.width(), h = bitmap.height()))]
    fn trace(&self, bitmap: &RgbaImage, params: &TraceParams) -> SignResult<String> {
        let mut bmp = Vec::new();
        DynamicImage::ImageRgba8(bitmap.clone())
            .into_rgb8()
            .write_to(&mut Cursor::new(&mut bmp), ImageFormat::Bmp)
            .map_err(|e| SignError::trace(format!("failed to encode bitmap for potrace: {e}")))?;

        let mut child = Command::new(&self.binary)
            .args(Self::args(params))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                SignError::trace(format!(
                    "failed to spawn '{}' (is potrace installed?): {e}",
                    self.binary.display()
                ))
            })?;

        {
            let mut stdin = child
                .stdin
                .take()
                .ok_or_else(|| SignError::trace("failed to open potrace stdin"))?;
            stdin
                .write_all(&bmp)
                .map_err(|e| SignError::trace(format!("failed to write bitmap to potrace: {e}")))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| SignError::trace(format!("failed to wait for potrace: {e}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SignError::trace(format!(
                "potrace exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let svg = String::from_utf8(output.stdout)
            .map_err(|e| SignError::trace(format!("potrace output is not UTF-8: {e}")))?;
        tracing::debug!(bytes = svg.len(), "potrace finished");
        Ok(svg)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/vectorize/tracer.rs"]
mod tests;
