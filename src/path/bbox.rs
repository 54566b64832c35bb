use crate::{
    foundation::core::Point,
    path::lexer::{PathLexer, PathToken},
};

/// Axis-aligned bounds of an SVG path, with derived center and size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub cx: f64,
    pub cy: f64,
    pub w: f64,
    pub h: f64,
}

impl BBox {
    pub fn from_bounds(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
            cx: (min_x + max_x) / 2.0,
            cy: (min_y + max_y) / 2.0,
            w: max_x - min_x,
            h: max_y - min_y,
        }
    }

}

/// Running parser state: current point, subpath start and the bounds seen so far.
#[derive(Default)]
struct Tracker {
    cur: Point,
    start: Point,
    bounds: Option<[f64; 4]>,
}

impl Tracker {
    fn include(&mut self, p: Point) {
        if !(p.x.is_finite() && p.y.is_finite()) {
            return;
        }
        self.bounds = Some(match self.bounds {
            None => [p.x, p.y, p.x, p.y],
            Some([x0, y0, x1, y1]) => [x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y)],
        });
    }

    fn resolve(&self, relative: bool, x: f64, y: f64) -> Point {
        if relative {
            Point::new(self.cur.x + x, self.cur.y + y)
        } else {
            Point::new(x, y)
        }
    }

    /// Extend the bounds by every point of one segment and move to its last point.
    fn segment(&mut self, relative: bool, coords: &[f64]) {
        let mut end = self.cur;
        for xy in coords.chunks_exact(2) {
            end = self.resolve(relative, xy[0], xy[1]);
            self.include(end);
        }
        self.cur = end;
    }
}

/// Number of arguments per group for each command letter (uppercase).
fn arity(cmd: u8) -> usize {
    match cmd {
        b'M' | b'L' | b'T' => 2,
        b'H' | b'V' => 1,
        b'S' | b'Q' => 4,
        b'C' => 6,
        b'A' => 7,
        _ => 0,
    }
}

/// Read one argument group; `None` if the group is incomplete or malformed.
fn read_group(lx: &mut PathLexer<'_>, cmd: u8, buf: &mut [f64; 7]) -> Option<usize> {
    let n = arity(cmd);
    for (i, slot) in buf.iter_mut().enumerate().take(n) {
        let is_flag = cmd == b'A' && (i == 3 || i == 4);
        *slot = if is_flag {
            lx.flag()?
        } else {
            if !lx.at_number() {
                return None;
            }
            match lx.next()? {
                PathToken::Number(v) => v,
                PathToken::Command(_) => return None,
            }
        };
    }
    Some(n)
}

/// Compute the bounding box of an SVG path `d` string.
///
/// Absolute and relative forms of `M L H V C S Q T A Z` are resolved against the running
/// current point, and repeated argument groups are processed one group at a time. Curve
/// control points are included; for arcs only the endpoint is. Returns `None` when the path
/// is absent or has no coordinates.
pub fn path_bbox<'a>(d: impl Into<Option<&'a str>>) -> Option<BBox> {
    let d = d.into()?;
    let mut lx = PathLexer::new(d);
    let mut t = Tracker::default();
    let mut buf = [0.0f64; 7];

    while let Some(tok) = lx.next() {
        // Numbers outside a command's groups carry no meaning.
        let PathToken::Command(letter) = tok else {
            continue;
        };
        let relative = letter.is_ascii_lowercase();
        let cmd = letter.to_ascii_uppercase();

        if cmd == b'Z' {
            t.cur = t.start;
            continue;
        }

        let mut first = true;
        while lx.at_number() {
            let Some(n) = read_group(&mut lx, cmd, &mut buf) else {
                break;
            };
            let args = &buf[..n];
            match cmd {
                b'M' => {
                    t.segment(relative, args);
                    // Extra pairs after a moveto are implicit linetos.
                    if first {
                        t.start = t.cur;
                    }
                }
                b'L' | b'T' | b'C' | b'S' | b'Q' => t.segment(relative, args),
                b'H' => {
                    let x = if relative { t.cur.x + args[0] } else { args[0] };
                    t.cur = Point::new(x, t.cur.y);
                    t.include(t.cur);
                }
                b'V' => {
                    let y = if relative { t.cur.y + args[0] } else { args[0] };
                    t.cur = Point::new(t.cur.x, y);
                    t.include(t.cur);
                }
                b'A' => t.segment(relative, &args[5..7]),
                _ => {}
            }
            first = false;
        }
    }

    let [min_x, min_y, max_x, max_y] = t.bounds?;
    Some(BBox::from_bounds(min_x, min_y, max_x, max_y))
}

#[cfg(test)]
#[path = "../../tests/unit/path/bbox.rs"]
mod tests;
