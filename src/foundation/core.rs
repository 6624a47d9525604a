use crate::foundation::error::{SketchError, SketchResult};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in canvas pixel space, `x2 > x1` and `y2 > y1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Region {
    /// Create a validated region.
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> SketchResult<Self> {
        if x2 <= x1 || y2 <= y1 {
            return Err(SketchError::invalid_region(format!(
                "box ({x1},{y1})-({x2},{y2}) has no area"
            )));
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    /// Region covering a whole `width x height` canvas.
    pub fn canvas(width: u32, height: u32) -> SketchResult<Self> {
        let w = i32::try_from(width)
            .map_err(|_| SketchError::invalid_region("canvas width exceeds i32"))?;
        let h = i32::try_from(height)
            .map_err(|_| SketchError::invalid_region("canvas height exceeds i32"))?;
        Self::new(0, 0, w, h)
    }

    pub fn width(self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(self) -> i32 {
        self.y2 - self.y1
    }

    /// Shrink by `padding` on all four sides.
    pub fn inset(self, padding: i32) -> SketchResult<Self> {
        let (x1, y1) = (self.x1 + padding, self.y1 + padding);
        let (x2, y2) = (self.x2 - padding, self.y2 - padding);
        if x2 <= x1 || y2 <= y1 {
            return Err(SketchError::invalid_region(format!(
                "padding {padding} leaves no room inside a {}x{} box",
                self.width(),
                self.height()
            )));
        }
        Ok(Self { x1, y1, x2, y2 })
    }
}

#[derive(Clone, Copy)]
enum Anchor {
    Start,
    Center,
    End,
}

impl Anchor {
    fn place(self, start: f32, end: f32, extent: f32) -> f32 {
        match self {
            Self::Start => start,
            Self::Center => start + ((end - start - extent) / 2.0).floor(),
            Self::End => end - extent,
        }
    }

    fn place_px(self, start: i32, end: i32, extent: i32) -> i32 {
        match self {
            Self::Start => start,
            Self::Center => start + (end - start - extent).div_euclid(2),
            Self::End => end - extent,
        }
    }
}

/// Horizontal alignment of a line or pasted image inside its box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

impl Align {
    fn anchor(self) -> Anchor {
        match self {
            Self::Left => Anchor::Start,
            Self::Center => Anchor::Center,
            Self::Right => Anchor::End,
        }
    }

    /// Left edge of something `extent` wide placed inside `[left, right]`.
    pub fn place(self, left: f32, right: f32, extent: f32) -> f32 {
        self.anchor().place(left, right, extent)
    }

    /// Integer-pixel variant of [`Align::place`].
    pub fn place_px(self, left: i32, right: i32, extent: i32) -> i32 {
        self.anchor().place_px(left, right, extent)
    }
}

/// Vertical alignment of a text block or pasted image inside its box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

impl VAlign {
    fn anchor(self) -> Anchor {
        match self {
            Self::Top => Anchor::Start,
            Self::Middle => Anchor::Center,
            Self::Bottom => Anchor::End,
        }
    }

    /// Top edge of something `extent` tall placed inside `[top, bottom]`.
    pub fn place(self, top: f32, bottom: f32, extent: f32) -> f32 {
        self.anchor().place(top, bottom, extent)
    }

    /// Integer-pixel variant of [`VAlign::place`].
    pub fn place_px(self, top: i32, bottom: i32, extent: i32) -> i32 {
        self.anchor().place_px(top, bottom, extent)
    }
}

/// Opaque 8-bit sRGB color.
///
/// Deserializes from `"#RRGGBB"` or `[r, g, b]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional).
    pub fn parse_hex(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 || !s.is_ascii() {
            return Err(format!("color \"{s}\" must be #RRGGBB"));
        }

        fn hex_byte(pair: &str) -> Result<u8, String> {
            u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
        }

        Ok(Self::new(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        ))
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl std::fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr([u8; 3]),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => Self::parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Arr([r, g, b]) => Ok(Self::new(r, g, b)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
