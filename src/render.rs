//! Frame rendering.
//!
//! [`FrameRenderer`] turns a particle batch into an ordered sequence of
//! transparent RGBA frames. Each frame is independent of the others: for
//! frame `i` every particle is placed with [`Particle::position_at`] and
//! drawn once per vertical tile, where tiles repeat the placement band
//! (`height_range` pixels tall) down the full canvas height.
//!
//! With the `parallel` feature frames are rendered on the rayon thread pool;
//! the output order is the same either way.

use glam::{IVec2, UVec2};
use image::RgbaImage;
use log::{debug, trace};

use crate::config::AnimationConfig;
use crate::particle::Particle;
use crate::raster::Stamp;
use crate::visuals::Shape;

impl Shape {
    /// Pixel coverage of this shape with its bounding box anchored at `anchor`,
    /// clipped to a `canvas` sized image.
    ///
    /// `trail_length` is only used by [`Shape::Line`]. [`Shape::Unknown`]
    /// draws the same filled ellipse as [`Shape::Dot`].
    pub fn stamp(&self, anchor: IVec2, size: u32, trail_length: u32, canvas: UVec2) -> Stamp {
        let s = size as i32;
        let IVec2 { x, y } = anchor;
        let mut stamp = Stamp::clipped(canvas);

        match self {
            Shape::Cross => {
                let half = s / 2;
                stamp
                    .line(IVec2::new(x + half, y), IVec2::new(x + half, y + s))
                    .line(IVec2::new(x, y + half), IVec2::new(x + s, y + half));
            }
            Shape::Line => {
                stamp.line(anchor, IVec2::new(x, y + trail_length as i32));
            }
            Shape::Star => {
                let star = s + 5;
                let half = star / 2;
                let long = star * 2 / 2;
                let short = star * 2 / 5;
                stamp
                    .polygon(&[
                        IVec2::new(x + half, y),
                        IVec2::new(x + short, y + long / 2),
                        IVec2::new(x + half, y + long),
                        IVec2::new(x + star - short, y + long / 2),
                    ])
                    .polygon(&[
                        IVec2::new(x, y + half),
                        IVec2::new(x + half, y + star - short),
                        IVec2::new(x + star, y + half),
                        IVec2::new(x + half, y + short),
                    ]);
            }
            Shape::Circle => {
                stamp.ellipse_outline(anchor, anchor + IVec2::splat(s));
            }
            Shape::Dot | Shape::Unknown => {
                stamp.ellipse(anchor, anchor + IVec2::splat(s));
            }
        }
        stamp
    }
}

/// Renders particle batches into frame sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRenderer {
    canvas: UVec2,
    height_range: u32,
    num_frames: u32,
}

impl FrameRenderer {
    /// Renderer for `num_frames` frames of `width` x `height`, tiling a band
    /// `height_range` pixels tall.
    pub fn new(width: u32, height: u32, height_range: u32, num_frames: u32) -> Self {
        Self {
            canvas: UVec2::new(width, height),
            height_range: height_range.max(1),
            num_frames,
        }
    }

    /// Renderer matching a config.
    pub fn from_config(config: &AnimationConfig) -> Self {
        Self::new(config.width, config.height, config.height_range, config.num_frames)
    }

    /// Vertical offsets of the band copies: `0, height_range, 2 * height_range, ...`
    /// up to (excluding) the canvas height.
    pub fn tile_offsets(&self) -> impl Iterator<Item = u32> {
        (0..self.canvas.y).step_by(self.height_range as usize)
    }

    /// Draw frame `frame` on a fresh transparent canvas.
    ///
    /// Tiles are drawn in order, later tiles composited source-over on
    /// earlier ones and on other particles. Where shapes overlap the colours
    /// mix; plain overwriting would instead keep only the last one drawn,
    /// alpha included.
    ///
    /// A canvas with a zero dimension has no pixels, so the frame comes back
    /// empty without placing any particle.
    pub fn render_frame(&self, frame: u32, particles: &[Particle]) -> RgbaImage {
        let mut canvas = RgbaImage::new(self.canvas.x, self.canvas.y);
        if self.canvas.cmpeq(UVec2::ZERO).any() {
            return canvas;
        }

        for particle in particles {
            for offset in self.tile_offsets() {
                let anchor = particle.position_at(frame, offset, self.canvas).floor().as_ivec2();
                particle
                    .shape
                    .stamp(anchor, particle.size, particle.trail_length.unwrap_or(0), self.canvas)
                    .composite(&mut canvas, particle.color);
            }
        }

        trace!("Rendered frame {}/{}", frame + 1, self.num_frames);
        canvas
    }

    /// Render every frame in playback order.
    pub fn render(&self, particles: &[Particle]) -> Vec<RgbaImage> {
        debug!(
            "Rendering {} frames of {}x{} ({} particles, {} tiles)",
            self.num_frames,
            self.canvas.x,
            self.canvas.y,
            particles.len(),
            self.tile_offsets().count()
        );

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            (0..self.num_frames)
                .into_par_iter()
                .map(|frame| self.render_frame(frame, particles))
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            (0..self.num_frames)
                .map(|frame| self.render_frame(frame, particles))
                .collect()
        }
    }
}
