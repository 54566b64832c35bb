use kurbo::Point;

/// Linear interpolation `a + (b - a) * t`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Euclidean distance between two points.
pub fn dist(p: Point, q: Point) -> f64 {
    let dx = q.x - p.x;
    let dy = q.y - p.y;
    (dx * dx + dy * dy).sqrt()
}

/// Uniform Catmull-Rom interpolation between `p1` and `p2`, with `p0`/`p3` as neighbours.
///
/// `t = 0` yields `p1` and `t = 1` yields `p2`.
pub fn catmull_rom(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    fn axis(a: f64, b: f64, c: f64, d: f64, t: f64, t2: f64, t3: f64) -> f64 {
        0.5 * ((2.0 * b)
            + (-a + c) * t
            + (2.0 * a - 5.0 * b + 4.0 * c - d) * t2
            + (-a + 3.0 * b - 3.0 * c + d) * t3)
    }

    let t2 = t * t;
    let t3 = t2 * t;
    Point::new(
        axis(p0.x, p1.x, p2.x, p3.x, t, t2, t3),
        axis(p0.y, p1.y, p2.y, p3.y, t, t2, t3),
    )
}

/// Hermite smoothstep `t^2 (3 - 2t)` on `[0, 1]`.
pub fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Round to one decimal the way JavaScript's `Math.round(v * 10) / 10` does (halves go up).
pub(crate) fn round_tenth(v: f64) -> f64 {
    let r = (v * 10.0 + 0.5).floor() / 10.0;
    // Normalize -0.0 so it prints as "0".
    if r == 0.0 { 0.0 } else { r }
}

/// Fixed-point text with exact halves rounded up, the way JavaScript's `toFixed` prints
/// non-negative values (`0.0625` to 3 digits is `0.063`).
pub(crate) fn to_fixed(v: f64, digits: usize) -> String {
    let scale = 10f64.powi(digits as i32);
    let r = (v * scale + 0.5).floor() / scale;
    format!("{r:.digits$}")
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
