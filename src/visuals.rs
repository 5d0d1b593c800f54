//! Shape kinds, colours, and the weighted shape mix.
//!
//! Every particle is one of a closed set of [`Shape`]s. Which shape a
//! particle gets is drawn from a [`ShapeMix`]: an insertion-ordered table of
//! shape → ([ratio](ShapeStyle::ratio), [colour](ShapeStyle::color)) entries.
//!
//! # Usage
//!
//! ```
//! use shapefall::visuals::{Rgb, Shape, ShapeMix, ShapeStyle};
//!
//! let mix = ShapeMix::from_styles(vec![
//!     ShapeStyle::new(Shape::Cross, 2, Rgb::new(255, 0, 0)),
//!     ShapeStyle::new(Shape::Line, 9, Rgb::new(0, 255, 0)),
//! ])
//! .unwrap();
//!
//! assert_eq!(mix.total_ratio(), 11);
//! assert_eq!(mix.pick(1.5).shape, Shape::Cross);
//! assert_eq!(mix.pick(2.5).shape, Shape::Line);
//! ```

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Shape drawn for a particle.
///
/// `Unknown` is the fallback for shape names this version does not
/// recognise; it renders exactly like [`Shape::Dot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Shape {
    /// Filled ellipse (default).
    #[default]
    Dot,

    /// Vertical streak whose length follows the particle's speed.
    Line,

    /// Plus sign made of two perpendicular strokes.
    Cross,

    /// Four-point sparkle built from two overlapping diamonds.
    Star,

    /// Outlined ellipse with a one pixel stroke.
    Circle,

    /// Unrecognised shape name, drawn as a dot.
    Unknown,
}

impl Shape {
    /// Every shape that can be named in a configuration.
    pub const ALL: [Shape; 5] = [Shape::Dot, Shape::Line, Shape::Cross, Shape::Star, Shape::Circle];

    /// Lowercase configuration name.
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Dot => "dot",
            Shape::Line => "line",
            Shape::Cross => "cross",
            Shape::Star => "star",
            Shape::Circle => "circle",
            Shape::Unknown => "unknown",
        }
    }

    /// Lenient lookup: unrecognised names map to [`Shape::Unknown`].
    ///
    /// Use [`str::parse`] when an unknown name should be rejected instead.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or(Shape::Unknown)
    }
}

impl FromStr for Shape {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shape::ALL
            .into_iter()
            .find(|shape| shape.name() == s)
            .ok_or_else(|| ConfigError::InvalidShape(s.to_string()))
    }
}

impl TryFrom<String> for Shape {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Shape> for String {
    fn from(shape: Shape) -> Self {
        shape.name().to_string()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Opaque RGB colour, written as six hex digits (`FF8800`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// White, used when no colour is configured.
    pub const WHITE: Rgb = Rgb([255, 255, 255]);

    /// Colour from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb([r, g, b])
    }

    /// Attach an alpha channel.
    pub fn with_alpha(self, alpha: u8) -> Rgba<u8> {
        let [r, g, b] = self.0;
        Rgba([r, g, b, alpha])
    }
}

impl FromStr for Rgb {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&s[i..i + 2], 16).map_err(|_| ConfigError::InvalidColor(s.to_string()))
        };
        Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "{:02X}{:02X}{:02X}", r, g, b)
    }
}

/// Alpha for a particle of `size`, linear from 0 at `min_size` to 255 at `max_size`.
///
/// A collapsed range (`max_size <= min_size`) yields fully opaque particles.
pub fn alpha_for_size(size: u32, min_size: u32, max_size: u32) -> u8 {
    if max_size <= min_size {
        return 255;
    }
    let size = size.clamp(min_size, max_size);
    (255 * u64::from(size - min_size) / u64::from(max_size - min_size)) as u8
}

/// Ratio and colour configured for one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Shape this entry configures.
    pub shape: Shape,
    /// Relative weight; weights are normalised by their sum.
    pub ratio: u32,
    /// Base colour; alpha is derived per particle from its size.
    pub color: Rgb,
}

impl ShapeStyle {
    /// Create a style entry.
    pub fn new(shape: Shape, ratio: u32, color: Rgb) -> Self {
        Self { shape, ratio, color }
    }
}

/// Insertion-ordered shape → style table used for weighted shape selection.
///
/// Never empty. Inserting a shape that is already present updates its
/// ratio and colour but keeps its original position, so selection order
/// (and therefore seeded reproducibility) follows first insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ShapeStyle>", into = "Vec<ShapeStyle>")]
pub struct ShapeMix {
    entries: Vec<ShapeStyle>,
}

impl Default for ShapeMix {
    fn default() -> Self {
        Self::single(ShapeStyle::new(Shape::Dot, 1, Rgb::WHITE))
    }
}

impl ShapeMix {
    /// Mix containing one shape.
    pub fn single(style: ShapeStyle) -> Self {
        Self { entries: vec![style] }
    }

    /// Build a mix from styles in order. Later duplicates update earlier entries.
    pub fn from_styles(styles: impl IntoIterator<Item = ShapeStyle>) -> Result<Self, ConfigError> {
        let mut entries: Vec<ShapeStyle> = Vec::new();
        for style in styles {
            match entries.iter_mut().find(|e| e.shape == style.shape) {
                Some(existing) => *existing = style,
                None => entries.push(style),
            }
        }
        if entries.is_empty() {
            return Err(ConfigError::EmptyShapeMix);
        }
        Ok(Self { entries })
    }

    /// Parse shape tokens as accepted on the command line.
    ///
    /// - one token: that shape with ratio 1, coloured `shared_color` or white
    /// - with `shared_color`: `shape ratio` pairs
    /// - without: `shape ratio color` triples
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S], shared_color: Option<&str>) -> Result<Self, ConfigError> {
        let shared = shared_color.map(str::parse::<Rgb>).transpose()?;

        if let [single] = tokens {
            let shape = single.as_ref().parse()?;
            return Ok(Self::single(ShapeStyle::new(shape, 1, shared.unwrap_or(Rgb::WHITE))));
        }

        let group = if shared.is_some() { 2 } else { 3 };
        if tokens.len() % group != 0 {
            return Err(if shared.is_some() {
                ConfigError::MissingRatio
            } else {
                ConfigError::MissingRatioAndColor
            });
        }

        let styles = tokens
            .chunks(group)
            .map(|chunk| {
                let shape = chunk[0].as_ref().parse()?;
                let ratio = chunk[1]
                    .as_ref()
                    .parse::<u32>()
                    .map_err(|_| ConfigError::InvalidRatio(chunk[1].as_ref().to_string()))?;
                let color = match shared {
                    Some(color) => color,
                    None => chunk[2].as_ref().parse()?,
                };
                Ok::<_, ConfigError>(ShapeStyle::new(shape, ratio, color))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_styles(styles)
    }

    /// Entries in selection order.
    pub fn styles(&self) -> &[ShapeStyle] {
        &self.entries
    }

    #[cfg(test)]
    pub(crate) fn get(&self, shape: Shape) -> Option<&ShapeStyle> {
        self.entries.iter().find(|e| e.shape == shape)
    }

    /// Sum of all ratios.
    pub fn total_ratio(&self) -> u32 {
        self.entries.iter().map(|e| e.ratio).sum()
    }

    /// Select the entry for a draw in `[0, total_ratio)`.
    ///
    /// Walks the entries accumulating ratios and returns the first whose
    /// running sum is `>= draw`. Draws past the end select the last entry.
    pub fn pick(&self, draw: f64) -> &ShapeStyle {
        let mut running = 0.0;
        for style in &self.entries {
            running += f64::from(style.ratio);
            if draw <= running {
                return style;
            }
        }
        &self.entries[self.entries.len() - 1]
    }
}

impl TryFrom<Vec<ShapeStyle>> for ShapeMix {
    type Error = ConfigError;

    fn try_from(styles: Vec<ShapeStyle>) -> Result<Self, Self::Error> {
        Self::from_styles(styles)
    }
}

impl From<ShapeMix> for Vec<ShapeStyle> {
    fn from(mix: ShapeMix) -> Self {
        mix.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_names_round_trip() {
        for shape in Shape::ALL {
            assert_eq!(shape.name().parse::<Shape>().unwrap(), shape);
        }
    }

    #[test]
    fn test_shape_parse_rejects_unknown() {
        let err = "hexagon".parse::<Shape>().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidShape(name) if name == "hexagon"));
    }

    #[test]
    fn test_shape_from_name_falls_back() {
        assert_eq!(Shape::from_name("star"), Shape::Star);
        assert_eq!(Shape::from_name("hexagon"), Shape::Unknown);
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!("FF0000".parse::<Rgb>().unwrap(), Rgb::new(255, 0, 0));
        assert_eq!("0a0B0c".parse::<Rgb>().unwrap(), Rgb::new(10, 11, 12));
        assert_eq!(Rgb::new(1, 171, 255).to_string(), "01ABFF");
    }

    #[test]
    fn test_parse_hex_color_rejects_malformed() {
        for bad in ["", "FFF", "FF00000", "GG0000", "#FF000"] {
            assert!(bad.parse::<Rgb>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_alpha_is_linear_in_size() {
        assert_eq!(alpha_for_size(2, 2, 10), 0);
        assert_eq!(alpha_for_size(10, 2, 10), 255);
        assert_eq!(alpha_for_size(6, 2, 10), 127);

        let mut last = 0;
        for size in 2..=10 {
            let alpha = alpha_for_size(size, 2, 10);
            assert!(alpha >= last);
            last = alpha;
        }
    }

    #[test]
    fn test_alpha_collapsed_range_is_opaque() {
        assert_eq!(alpha_for_size(5, 5, 5), 255);
    }

    #[test]
    fn test_alpha_handles_huge_size_spans() {
        assert_eq!(alpha_for_size(u32::MAX, 0, u32::MAX), 255);
        assert_eq!(alpha_for_size(u32::MAX / 2, 0, u32::MAX), 127);
        assert_eq!(alpha_for_size(20_000_000, 0, 40_000_000), 127);
    }

    #[test]
    fn test_pick_accumulates_in_insertion_order() {
        let mix = ShapeMix::from_styles(vec![
            ShapeStyle::new(Shape::Dot, 1, Rgb::WHITE),
            ShapeStyle::new(Shape::Line, 3, Rgb::WHITE),
        ])
        .unwrap();

        assert_eq!(mix.pick(0.0).shape, Shape::Dot);
        assert_eq!(mix.pick(1.0).shape, Shape::Dot);
        assert_eq!(mix.pick(1.01).shape, Shape::Line);
        assert_eq!(mix.pick(3.99).shape, Shape::Line);
        assert_eq!(mix.pick(100.0).shape, Shape::Line);
    }

    #[test]
    fn test_duplicate_shape_keeps_first_position() {
        let mix = ShapeMix::from_styles(vec![
            ShapeStyle::new(Shape::Star, 1, Rgb::WHITE),
            ShapeStyle::new(Shape::Dot, 1, Rgb::WHITE),
            ShapeStyle::new(Shape::Star, 5, Rgb::new(1, 2, 3)),
        ])
        .unwrap();

        assert_eq!(mix.styles().len(), 2);
        assert_eq!(mix.styles()[0].shape, Shape::Star);
        assert_eq!(mix.styles()[0].ratio, 5);
        assert_eq!(mix.get(Shape::Star).unwrap().color, Rgb::new(1, 2, 3));
    }

    #[test]
    fn test_empty_mix_is_rejected() {
        assert!(matches!(ShapeMix::from_styles(Vec::new()), Err(ConfigError::EmptyShapeMix)));
    }

    #[test]
    fn test_tokens_single_shape() {
        let mix = ShapeMix::from_tokens(&["cross"], None).unwrap();
        assert_eq!(mix.styles(), &[ShapeStyle::new(Shape::Cross, 1, Rgb::WHITE)]);

        let mix = ShapeMix::from_tokens(&["star"], Some("00FF00")).unwrap();
        assert_eq!(mix.styles()[0].color, Rgb::new(0, 255, 0));
    }

    #[test]
    fn test_tokens_triples() {
        let mix = ShapeMix::from_tokens(&["cross", "2", "FF0000", "line", "9", "00FF00"], None).unwrap();
        assert_eq!(mix.total_ratio(), 11);
        assert_eq!(mix.styles()[1], ShapeStyle::new(Shape::Line, 9, Rgb::new(0, 255, 0)));
    }

    #[test]
    fn test_tokens_pairs_with_shared_color() {
        let mix = ShapeMix::from_tokens(&["dot", "1", "circle", "4"], Some("0000FF")).unwrap();
        assert!(mix.styles().iter().all(|s| s.color == Rgb::new(0, 0, 255)));
        assert_eq!(mix.get(Shape::Circle).unwrap().ratio, 4);
    }

    #[test]
    fn test_tokens_grouping_errors() {
        assert!(matches!(
            ShapeMix::from_tokens(&["dot", "1"], None),
            Err(ConfigError::MissingRatioAndColor)
        ));
        assert!(matches!(
            ShapeMix::from_tokens(&["dot", "1", "line"], Some("FFFFFF")),
            Err(ConfigError::MissingRatio)
        ));
        assert!(matches!(
            ShapeMix::from_tokens(&["blob", "1", "FFFFFF"], None),
            Err(ConfigError::InvalidShape(_))
        ));
        assert!(matches!(
            ShapeMix::from_tokens(&["dot", "x", "FFFFFF"], None),
            Err(ConfigError::InvalidRatio(_))
        ));
        assert!(matches!(
            ShapeMix::from_tokens(&["dot", "1", "red"], None),
            Err(ConfigError::InvalidColor(_))
        ));
    }
}
