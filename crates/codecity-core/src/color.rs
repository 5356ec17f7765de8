//! Color handling for CodeCity layouts
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, providing convenience methods for parsing CSS colors
//! and blending between them in sRGB space.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{AlphaColor, DynamicColor, Srgb};
use serde::{Serialize, Serializer};

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_hex().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use codecity_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Creates an opaque color from sRGB components in `[0, 1]`.
    pub fn from_rgb(rgb: [f32; 3]) -> Self {
        let [r, g, b] = rgb;
        Self {
            color: DynamicColor::from_alpha_color(AlphaColor::<Srgb>::new([r, g, b, 1.0])),
        }
    }

    /// Returns the sRGB components in `[0, 1]`, dropping alpha.
    pub fn rgb(self) -> [f32; 3] {
        let [r, g, b, _] = self.color.to_alpha_color::<Srgb>().components;
        [r, g, b]
    }

    /// Linearly blends between `self` (at `t = 0`) and `other` (at `t = 1`)
    /// component-wise in sRGB space.
    ///
    /// `t` is clamped to `[0, 1]`. The end points are reproduced exactly.
    ///
    /// # Examples
    ///
    /// ```
    /// use codecity_core::color::Color;
    ///
    /// let yellow = Color::new("yellow").unwrap();
    /// let blue = Color::new("blue").unwrap();
    ///
    /// assert_eq!(yellow.lerp(blue, 0.0).rgb(), yellow.rgb());
    /// assert_eq!(yellow.lerp(blue, 1.0).rgb(), blue.rgb());
    /// assert_eq!(yellow.lerp(blue, 0.5).rgb(), [0.5, 0.5, 0.5]);
    /// ```
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let from = self.rgb();
        let to = other.rgb();
        let mut blended = [0.0; 3];
        for (channel, (a, b)) in blended.iter_mut().zip(from.into_iter().zip(to)) {
            *channel = a * (1.0 - t) + b * t;
        }
        Self::from_rgb(blended)
    }

    /// Returns the color as a `#rrggbb` hex string.
    ///
    /// # Examples
    ///
    /// ```
    /// use codecity_core::color::Color;
    ///
    /// assert_eq!(Color::new("yellow").unwrap().to_hex(), "#ffff00");
    /// ```
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.rgb().map(|channel| (channel.clamp(0.0, 1.0) * 255.0).round() as u8);
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_hex())
    }
}
