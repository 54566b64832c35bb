use crate::{
    order::cluster::OrderedPaths,
    timing::{
        ease::Ease,
        model::{AnimStyle, Timing, effective_speed, flow_total_duration, schedule},
    },
};

/// Share of a path's duration spent fading in; matches the exported `animation-duration`.
pub const FADE_SHARE: f64 = 0.4;
/// Scale a path starts from before growing to full size.
pub const START_SCALE: f64 = 0.97;

/// Visual state of one path at a sampled instant.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PathReveal {
    pub opacity: f64,
    pub scale: f64,
}

impl PathReveal {
    pub const HIDDEN: Self = Self {
        opacity: 0.0,
        scale: START_SCALE,
    };
    pub const SHOWN: Self = Self {
        opacity: 1.0,
        scale: 1.0,
    };
}

/// A sampled frame: per-path state plus the horizontal wipe progress in `[0, 1]`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RevealFrame {
    pub paths: Vec<PathReveal>,
    pub wipe: f64,
}

/// Schedule for revealing an ordered signature, sampled by a live renderer.
///
/// Letter and classic styles fade and scale each path in with ease-out over
/// `duration * 0.4` starting at its delay. Flow shows every path under a single clip rect
/// that wipes left to right over [`flow_total_duration`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RevealPlan {
    pub style: AnimStyle,
    pub speed: f64,
    pub timings: Vec<Timing>,
    /// Wipe length in seconds (flow only).
    pub wipe_duration: Option<f64>,
}

impl RevealPlan {
    pub fn new(paths: &OrderedPaths, style: AnimStyle, speed: f64) -> Self {
        let speed = effective_speed(speed);
        let wipe_duration =
            (style == AnimStyle::Flow).then(|| flow_total_duration(&paths.cluster_meta, speed));
        Self {
            style,
            speed,
            timings: schedule(paths, style, speed),
            wipe_duration,
        }
    }

    /// Seconds until the last path is fully visible.
    pub fn total_duration(&self) -> f64 {
        match self.wipe_duration {
            Some(d) => d,
            None => self
                .timings
                .iter()
                .map(|t| t.delay + t.duration * FADE_SHARE)
                .fold(0.0, f64::max),
        }
    }

    pub fn is_complete(&self, t: f64) -> bool {
        t >= self.total_duration()
    }

    /// State of every path `t` seconds after the reveal started.
    pub fn sample(&self, t: f64) -> RevealFrame {
        let t = if t.is_nan() { 0.0 } else { t };
        if let Some(total) = self.wipe_duration {
            let progress = if total > 0.0 { t / total } else { 1.0 };
            return RevealFrame {
                paths: vec![PathReveal::SHOWN; self.timings.len()],
                wipe: Ease::Ease.apply(progress),
            };
        }

        let paths = self
            .timings
            .iter()
            .map(|timing| {
                let fade = timing.duration * FADE_SHARE;
                if t < timing.delay {
                    return PathReveal::HIDDEN;
                }
                let progress = if fade > 0.0 { (t - timing.delay) / fade } else { 1.0 };
                if progress >= 1.0 {
                    return PathReveal::SHOWN;
                }
                let e = Ease::EaseOut.apply(progress);
                PathReveal {
                    opacity: e,
                    scale: START_SCALE + (1.0 - START_SCALE) * e,
                }
            })
            .collect();
        RevealFrame { paths, wipe: 1.0 }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timing/reveal.rs"]
mod tests;
