//! # shapefall - falling shapes animation generator
//!
//! Procedurally generates looping animations of small shapes (dots, lines,
//! crosses, stars, circles) drifting across a transparent canvas.
//!
//! Generation happens in two steps:
//!
//! 1. **Spawn** - [`spawn_particles`] builds an immutable batch of
//!    [`Particle`]s with random position, size, speed, shape and swing
//!    parameters, drawn from an explicit, seedable [`SpawnContext`].
//! 2. **Render** - [`FrameRenderer`] computes every particle's position for
//!    each frame index and rasterizes its shape onto a fresh RGBA canvas.
//!
//! Positions are closed-form functions of the frame index, so frames can be
//! rendered in any order (and in parallel with the `parallel` feature).
//!
//! ## Quick Start
//!
//! ```
//! use shapefall::prelude::*;
//!
//! let config = AnimationConfig::new()
//!     .with_canvas(100, 100)
//!     .with_height_range(100)
//!     .with_particle_count(10)
//!     .with_frames(4)
//!     .with_shapes(ShapeMix::from_tokens(&["star", "1", "FFD700"], None)?)
//!     .with_seed(1);
//!
//! let frames = Animation::new(config)?.render();
//! assert_eq!(frames.len(), 4);
//! # Ok::<(), shapefall::ConfigError>(())
//! ```
//!
//! ## Motion
//!
//! | Direction | Behaviour |
//! |-----------|-----------|
//! | [`Direction::Down`] | fall with one of three speeds |
//! | [`Direction::Left`] / [`Direction::Right`] | fall while crossing the canvas once per loop |
//! | [`Direction::Zigzag`] | fall while swinging side to side |
//!
//! Every direction scrolls downwards and wraps at the canvas edges. The
//! placement band (`height_range`) is tiled to fill taller canvases.

pub mod animation;
pub mod config;
mod error;
pub mod export;
pub mod motion;
pub mod particle;
pub mod raster;
pub mod render;
pub mod spawn;
pub mod visuals;

pub use animation::Animation;
pub use config::AnimationConfig;
pub use error::{ConfigError, ExportError};
pub use glam::{DVec2, IVec2, UVec2};
pub use motion::{Direction, Sway, Zigzag};
pub use particle::Particle;
pub use render::FrameRenderer;
pub use spawn::{spawn_particles, SpawnContext};
pub use visuals::{Rgb, Shape, ShapeMix, ShapeStyle};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use shapefall::prelude::*;
/// ```
pub mod prelude {
    pub use crate::animation::Animation;
    pub use crate::config::AnimationConfig;
    pub use crate::error::{ConfigError, ExportError};
    pub use crate::motion::Direction;
    pub use crate::particle::Particle;
    pub use crate::render::FrameRenderer;
    pub use crate::spawn::{spawn_particles, SpawnContext};
    pub use crate::visuals::{Rgb, Shape, ShapeMix, ShapeStyle};
}
