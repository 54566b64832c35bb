use crate::foundation::{
    core::Point,
    error::{SignError, SignResult},
    math::{catmull_rom, dist, lerp, smoothstep},
};

/// One pointer sample in canvas space. `t` is a monotonic timestamp in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawSample {
    pub x: f64,
    pub y: f64,
    pub t: f64,
}

impl RawSample {
    pub fn new(x: f64, y: f64, t: f64) -> Self {
        Self { x, y, t }
    }

    pub fn point(self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.t.is_finite()
    }
}

/// A centerline point carrying the ink width at that point.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InkPoint {
    pub x: f64,
    pub y: f64,
    pub w: f64,
}

impl InkPoint {
    pub fn new(x: f64, y: f64, w: f64) -> Self {
        Self { x, y, w }
    }

    pub fn point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Dense, smoothed, tapered centerline produced by [`process_stroke`].
pub type ProcessedStroke = Vec<InkPoint>;

/// Tunables for turning pointer samples into ink.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StrokeParams {
    /// Width at full speed and at the very first sample.
    pub min_width: f64,
    /// Width when the pen is (nearly) stationary.
    pub max_width: f64,
    /// Number of samples eased at each end.
    pub taper_length: usize,
    /// Share of the width driven by speed; the rest is a fixed bias.
    pub velocity_weight: f64,
    /// Low-pass factor applied to live pointer input.
    pub smoothing: f64,
}

impl Default for StrokeParams {
    fn default() -> Self {
        Self {
            min_width: 1.2,
            max_width: 5.5,
            taper_length: 12,
            velocity_weight: 0.55,
            smoothing: 0.18,
        }
    }
}

impl StrokeParams {
    pub fn validate(&self) -> SignResult<()> {
        if !(self.min_width.is_finite() && self.min_width > 0.0) {
            return Err(SignError::validation("stroke.min_width must be > 0"));
        }
        if !(self.max_width.is_finite() && self.max_width >= self.min_width) {
            return Err(SignError::validation(
                "stroke.max_width must be >= stroke.min_width",
            ));
        }
        if self.taper_length == 0 {
            return Err(SignError::validation("stroke.taper_length must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.velocity_weight) {
            return Err(SignError::validation(
                "stroke.velocity_weight must be within [0, 1]",
            ));
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(SignError::validation(
                "stroke.smoothing must be within [0, 1)",
            ));
        }
        Ok(())
    }
}

const SMOOTHING_RADIUS: usize = 3;
const SPEED_CAP: f64 = 2.0;
const SPEED_BIAS: f64 = 0.3;
/// Resampling steps per segment are clamped to this range.
const MIN_SEGMENT_STEPS: usize = 4;
const MAX_SEGMENT_STEPS: usize = 512;

/// Turn raw pointer samples into a processed stroke.
///
/// Fewer than two samples produce an empty stroke.
pub fn process_stroke(raw: &[RawSample], params: &StrokeParams) -> ProcessedStroke {
    if raw.len() < 2 {
        return Vec::new();
    }
    let mut pts = widths_from_velocity(raw, params);
    smooth_widths(&mut pts);
    taper_ends(&mut pts, params);
    resample(&pts)
}

pub(crate) fn widths_from_velocity(raw: &[RawSample], params: &StrokeParams) -> Vec<InkPoint> {
    raw.iter()
        .enumerate()
        .map(|(i, s)| {
            if i == 0 {
                return InkPoint::new(s.x, s.y, params.min_width);
            }
            let prev = raw[i - 1];
            let d = dist(prev.point(), s.point());
            let dt = (s.t - prev.t).max(1.0);
            let normalized = (d / dt / SPEED_CAP).min(1.0);
            let mix = normalized * params.velocity_weight
                + (1.0 - params.velocity_weight) * SPEED_BIAS;
            InkPoint::new(s.x, s.y, lerp(params.max_width, params.min_width, mix))
        })
        .collect()
}

pub(crate) fn smooth_widths(pts: &mut [InkPoint]) {
    let widths: Vec<f64> = pts.iter().map(|p| p.w).collect();
    for (i, p) in pts.iter_mut().enumerate() {
        let lo = i.saturating_sub(SMOOTHING_RADIUS);
        let hi = (i + SMOOTHING_RADIUS + 1).min(widths.len());
        let window = &widths[lo..hi];
        let avg = window.iter().sum::<f64>() / window.len() as f64;
        p.w = lerp(p.w, avg, 0.5);
    }
}

pub(crate) fn taper_ends(pts: &mut [InkPoint], params: &StrokeParams) {
    let n = pts.len();
    let floor = params.min_width * 0.5;
    let taper = params.taper_length as f64;
    for i in 0..params.taper_length.min(n) {
        let ease = smoothstep(i as f64 / taper);
        pts[i].w = lerp(floor, pts[i].w, ease);
        let j = n - 1 - i;
        pts[j].w = lerp(floor, pts[j].w, ease);
    }
}

fn resample(pts: &[InkPoint]) -> ProcessedStroke {
    let last = pts.len() - 1;
    let mut out: ProcessedStroke = Vec::with_capacity(pts.len() * 4);
    for i in 0..last {
        let p0 = pts[i.saturating_sub(1)];
        let p1 = pts[i];
        let p2 = pts[i + 1];
        let p3 = pts[(i + 2).min(last)];
        let steps = ((dist(p1.point(), p2.point()) / 2.0).floor() as usize)
            .clamp(MIN_SEGMENT_STEPS, MAX_SEGMENT_STEPS);
        for s in 0..=steps {
            let t = s as f64 / steps as f64;
            let pos = catmull_rom(p0.point(), p1.point(), p2.point(), p3.point(), t);
            let w = lerp(p1.w, p2.w, t);
            // Segment joints and stationary samples would repeat the previous point.
            if out.last().is_some_and(|prev| prev.point() == pos) {
                continue;
            }
            out.push(InkPoint::new(pos.x, pos.y, w));
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/process.rs"]
mod tests;
