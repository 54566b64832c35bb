use crate::order::cluster::{ClusterMeta, OrderedPaths};

/// How the reveal is paced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum AnimStyle {
    /// Letter by letter: a pause between clusters and a small stagger inside one.
    Letter,
    /// One continuous left-to-right wipe.
    Flow,
    /// Path by path at a constant interval.
    #[default]
    Classic,
}

impl AnimStyle {
    /// Lenient name lookup; unknown names fall back to [`AnimStyle::Classic`].
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "letter" => Self::Letter,
            "flow" => Self::Flow,
            "classic" => Self::Classic,
            other => {
                tracing::warn!(style = other, "unknown animation style, using classic");
                Self::Classic
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Letter => "letter",
            Self::Flow => "flow",
            Self::Classic => "classic",
        }
    }
}

impl From<String> for AnimStyle {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for AnimStyle {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl std::fmt::Display for AnimStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When one path starts revealing and for how long, in seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timing {
    pub delay: f64,
    pub duration: f64,
}

/// Speed multiplier actually used: non-finite or non-positive values mean `1.0`.
pub fn effective_speed(speed: f64) -> f64 {
    if speed.is_finite() && speed > 0.0 {
        speed
    } else {
        1.0
    }
}

/// Delay and duration of the path at `index` in reveal order.
///
/// Missing metadata always uses the classic formula.
pub fn compute_timing(
    index: usize,
    meta: Option<&ClusterMeta>,
    style: AnimStyle,
    speed: f64,
) -> Timing {
    let s = 1.0 / effective_speed(speed);
    let i = index as f64;
    match (style, meta) {
        (AnimStyle::Letter, Some(m)) => Timing {
            delay: m.cluster_index as f64 * 0.5 * s + m.index_in_cluster as f64 * 0.08 * s,
            duration: 0.5 * s,
        },
        (AnimStyle::Flow, Some(m)) => Timing {
            delay: i * 0.15 * s + m.cluster_index as f64 * 0.05 * s,
            duration: 0.45 * s,
        },
        _ => Timing {
            delay: i * 0.4 * s,
            duration: 0.6 * s,
        },
    }
}

/// Timings for every ordered path.
pub fn schedule(paths: &OrderedPaths, style: AnimStyle, speed: f64) -> Vec<Timing> {
    (0..paths.len())
        .map(|i| compute_timing(i, paths.cluster_meta.get(i), style, speed))
        .collect()
}

/// Length of the flow wipe: `(k + 1) * 0.5 * s + 0.5 * s` where `k` is the highest cluster
/// index, or `2 * s` without metadata.
pub fn flow_total_duration(meta: &[ClusterMeta], speed: f64) -> f64 {
    let s = 1.0 / effective_speed(speed);
    match meta.iter().map(|m| m.cluster_index).max() {
        Some(k) => (k as f64 + 1.0) * 0.5 * s + 0.5 * s,
        None => 2.0 * s,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timing/model.rs"]
mod tests;
