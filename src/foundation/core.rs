use std::fmt;

use crate::foundation::error::{SignError, SignResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Logical drawing-canvas size in canvas units, independent of screen pixel density.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    /// The signature pad: 600 x 200 units.
    pub const SIGNATURE_PAD: Self = Self {
        width: 600,
        height: 200,
    };

    pub fn view_box(self) -> ViewBox {
        ViewBox::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::SIGNATURE_PAD
    }
}

/// An SVG `viewBox` (`min-x min-y width height`).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }

    /// Parse a `viewBox` attribute value: four numbers separated by whitespace and/or commas.
    pub fn parse(s: &str) -> SignResult<Self> {
        let nums = s
            .split(|c: char| c.is_ascii_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<f64>()
                    .map_err(|_| SignError::validation(format!("invalid viewBox number '{part}'")))
            })
            .collect::<SignResult<Vec<f64>>>()?;

        let &[min_x, min_y, width, height] = nums.as_slice() else {
            return Err(SignError::validation(format!(
                "viewBox needs 4 numbers, got {}",
                nums.len()
            )));
        };
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(SignError::validation("viewBox width/height must be > 0"));
        }
        Ok(Self::new(min_x, min_y, width, height))
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.min_x, self.min_y, self.width, self.height
        )
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InkColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl InkColor {
    /// The signature ink, `#161311`.
    pub const INK: Self = Self::rgb(0x16, 0x13, 0x11);
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// `#rrggbb` form used in SVG attributes.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for InkColor {
    fn default() -> Self {
        Self::INK
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
