//! The immutable particle record.

use glam::{DVec2, UVec2};
use image::Rgba;

use crate::motion::{self, Direction, Zigzag};
use crate::visuals::Shape;

/// One moving shape.
///
/// Particles are created in a batch by [`spawn_particles`](crate::spawn_particles)
/// and never change afterwards; where a particle is drawn on a given frame is
/// derived from these fields by [`Particle::position_at`].
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Spawn position (top-left of the shape's bounding box).
    pub origin: UVec2,
    /// Bounding size in pixels.
    pub size: u32,
    /// Pixels travelled per frame.
    pub speed: f64,
    /// Colour with size-derived alpha.
    pub color: Rgba<u8>,
    /// Shape drawn at each position.
    pub shape: Shape,
    /// Horizontal travel mode.
    pub direction: Direction,
    /// Zigzag swing parameters. Only consulted for [`Direction::Zigzag`].
    pub zigzag: Zigzag,
    /// Streak length, set only for [`Shape::Line`].
    pub trail_length: Option<u32>,
}

impl Particle {
    /// Anchor position at `frame` for the tile shifted down by `tile_offset`,
    /// on a canvas of size `canvas`.
    ///
    /// Computed in double precision so long loops floor to the same pixel
    /// as the closed-form position.
    pub fn position_at(&self, frame: u32, tile_offset: u32, canvas: UVec2) -> DVec2 {
        let y = motion::vertical(f64::from(self.origin.y), self.speed, frame, tile_offset, canvas.y);
        let x = motion::horizontal(
            self.direction,
            i64::from(self.origin.x),
            self.speed,
            &self.zigzag,
            frame,
            canvas.x,
        );
        DVec2::new(x as f64, y)
    }
}
