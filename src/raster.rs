//! CPU rasterization onto RGBA canvases.
//!
//! Shapes are built up as a [`Stamp`]: a set of covered pixels collected
//! from one or more primitives. A stamp is composited once, so pixels shared
//! by overlapping primitives of the same shape (the middle of a cross, the
//! core of a star) are blended a single time.
//!
//! Coordinates are integer pixel positions; bounding boxes are inclusive on
//! both ends, so an ellipse in `(0, 0)..=(4, 4)` spans five pixels.
//!
//! A stamp made with [`Stamp::clipped`] only collects pixels inside the
//! canvas, so shapes hanging off an edge cost their visible area only.

use glam::{IVec2, UVec2, Vec2};
use image::{Rgba, RgbaImage};

/// Pixels covered by one shape, ready to be composited.
#[derive(Debug, Clone, Default)]
pub struct Stamp {
    pixels: Vec<IVec2>,
    /// Inclusive bounds pixels must fall in, if any.
    clip: Option<(IVec2, IVec2)>,
}

impl Stamp {
    /// Empty stamp.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty stamp that ignores pixels outside a `size` canvas.
    pub fn clipped(size: UVec2) -> Self {
        Self {
            pixels: Vec::new(),
            clip: Some((IVec2::ZERO, size.as_ivec2() - IVec2::ONE)),
        }
    }

    /// One pixel wide segment between two points, endpoints included.
    pub fn line(&mut self, from: IVec2, to: IVec2) -> &mut Self {
        // Bresenham
        let delta = (to - from).abs();
        let step = IVec2::new((to.x - from.x).signum(), (to.y - from.y).signum());
        let mut err = delta.x - delta.y;
        let mut p = from;

        loop {
            self.push(p);
            if p == to {
                break;
            }
            let e2 = 2 * err;
            if e2 > -delta.y {
                err -= delta.y;
                p.x += step.x;
            }
            if e2 < delta.x {
                err += delta.x;
                p.y += step.y;
            }
        }
        self
    }

    /// Filled polygon, outline included.
    pub fn polygon(&mut self, points: &[IVec2]) -> &mut Self {
        let Some((min, max)) = bounds(points) else {
            return self;
        };

        let (min, max) = self.clip_box(min, max);
        for y in min.y..=max.y {
            for x in min.x..=max.x {
                if contains(points, Vec2::new(x as f32, y as f32)) {
                    self.pixels.push(IVec2::new(x, y));
                }
            }
        }

        for (i, &a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            self.line(a, b);
        }
        self
    }

    /// Filled ellipse inscribed in the box `min..=max`.
    pub fn ellipse(&mut self, min: IVec2, max: IVec2) -> &mut Self {
        let shape = EllipseBox::new(min, max);
        self.scan(min, max, |p| shape.inside(p, 0.0));
        self
    }

    /// One pixel wide ellipse outline inscribed in the box `min..=max`.
    pub fn ellipse_outline(&mut self, min: IVec2, max: IVec2) -> &mut Self {
        let shape = EllipseBox::new(min, max);
        self.scan(min, max, |p| shape.inside(p, 0.0) && !shape.inside(p, 1.0));
        self
    }

    /// `true` when nothing is covered.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        let mut pixels = self.pixels.clone();
        dedup(&mut pixels);
        pixels.len()
    }

    #[cfg(test)]
    pub(crate) fn covers(&self, pixel: IVec2) -> bool {
        self.pixels.contains(&pixel)
    }

    /// Blend `color` over every covered pixel inside the canvas.
    ///
    /// Blending is source-over: a translucent shape tints what is already
    /// drawn rather than replacing it.
    pub fn composite(mut self, canvas: &mut RgbaImage, color: Rgba<u8>) {
        if color[3] == 0 || self.is_empty() {
            return;
        }
        dedup(&mut self.pixels);

        let (width, height) = (canvas.width() as i32, canvas.height() as i32);
        for p in self.pixels {
            if p.x < 0 || p.y < 0 || p.x >= width || p.y >= height {
                continue;
            }
            let dst = canvas.get_pixel_mut(p.x as u32, p.y as u32);
            *dst = blend(color, *dst);
        }
    }

    fn push(&mut self, p: IVec2) {
        if let Some((lo, hi)) = self.clip {
            if p.cmplt(lo).any() || p.cmpgt(hi).any() {
                return;
            }
        }
        self.pixels.push(p);
    }

    /// `min..=max` narrowed to the clip bounds. May come back empty (`min > max`).
    fn clip_box(&self, min: IVec2, max: IVec2) -> (IVec2, IVec2) {
        match self.clip {
            Some((lo, hi)) => (min.max(lo), max.min(hi)),
            None => (min, max),
        }
    }

    fn scan(&mut self, min: IVec2, max: IVec2, mut covered: impl FnMut(Vec2) -> bool) {
        let (min, max) = self.clip_box(min, max);
        for y in min.y..=max.y {
            for x in min.x..=max.x {
                // pixel centre
                if covered(Vec2::new(x as f32 + 0.5, y as f32 + 0.5)) {
                    self.pixels.push(IVec2::new(x, y));
                }
            }
        }
    }
}

/// Ellipse inscribed in the pixel box `min..=max`, in continuous coordinates.
struct EllipseBox {
    center: Vec2,
    radii: Vec2,
}

impl EllipseBox {
    fn new(min: IVec2, max: IVec2) -> Self {
        let lo = min.as_vec2();
        let hi = max.as_vec2() + Vec2::ONE;
        Self {
            center: (lo + hi) * 0.5,
            radii: (hi - lo) * 0.5,
        }
    }

    /// Inside the ellipse shrunk by `inset` pixels on every side.
    fn inside(&self, p: Vec2, inset: f32) -> bool {
        let radii = self.radii - Vec2::splat(inset);
        if radii.x <= 0.0 || radii.y <= 0.0 {
            return inset == 0.0;
        }
        let d = (p - self.center) / radii;
        d.length_squared() <= 1.0
    }
}

/// Standard "source over" compositing of straight-alpha colours.
pub fn blend(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;

    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |s: u8, d: u8| -> u8 {
        let out = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        out.round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

fn dedup(pixels: &mut Vec<IVec2>) {
    pixels.sort_unstable_by_key(|p| (p.y, p.x));
    pixels.dedup();
}

fn bounds(points: &[IVec2]) -> Option<(IVec2, IVec2)> {
    let first = *points.first()?;
    Some(points.iter().fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p))))
}

/// Even-odd point in polygon test.
fn contains(points: &[IVec2], p: Vec2) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let a = points[i].as_vec2();
        let b = points[j].as_vec2();
        if (a.y > p.y) != (b.y > p.y) {
            let cross_x = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
