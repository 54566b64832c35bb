/// CSS timing functions used by the exported animations.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// `ease`: `cubic-bezier(0.25, 0.1, 0.25, 1)`.
    Ease,
    /// `ease-out`: `cubic-bezier(0, 0, 0.58, 1)`.
    EaseOut,
    CubicBezier(f64, f64, f64, f64),
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::CubicBezier(x1, y1, x2, y2) => {
                cubic_bezier(x1.clamp(0.0, 1.0), y1, x2.clamp(0.0, 1.0), y2, t)
            }
        }
    }

    /// The CSS spelling, as written into generated stylesheets. `ease` is spelled out as its
    /// cubic-bezier.
    pub fn css(self) -> String {
        match self {
            Self::Ease => Self::CubicBezier(0.25, 0.1, 0.25, 1.0).css(),
            Self::EaseOut => "ease-out".to_string(),
            Self::CubicBezier(x1, y1, x2, y2) => format!("cubic-bezier({x1},{y1},{x2},{y2})"),
        }
    }
}

// One coordinate of a cubic Bezier from (0,0) to (1,1) with control values a and b.
fn bezier(a: f64, b: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * a + 3.0 * inv * s * s * b + s * s * s
}

fn bezier_slope(a: f64, b: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * a + 6.0 * inv * s * (b - a) + 3.0 * s * s * (1.0 - b)
}

/// Solve `x(s) = x` for the curve parameter, then evaluate `y(s)`.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let mut s = x;
    for _ in 0..8 {
        let err = bezier(x1, x2, s) - x;
        if err.abs() < 1e-7 {
            return bezier(y1, y2, s);
        }
        let d = bezier_slope(x1, x2, s);
        if d.abs() < 1e-6 {
            break;
        }
        s -= err / d;
    }

    // Newton stalled: bisect, x(s) is monotonic for control x in [0, 1].
    let (mut lo, mut hi) = (0.0, 1.0);
    s = x;
    for _ in 0..64 {
        let v = bezier(x1, x2, s);
        if (v - x).abs() < 1e-7 {
            break;
        }
        if v < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    bezier(y1, y2, s)
}

#[cfg(test)]
#[path = "../../tests/unit/timing/ease.rs"]
mod tests;
