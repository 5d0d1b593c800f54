//! Kinematic motion model.
//!
//! Particles never integrate velocity. Their position at frame `i` is a
//! closed-form function of their immutable spawn parameters, so any frame
//! can be computed independently of every other frame.
//!
//! Vertical motion is always a downward scroll with toroidal wraparound.
//! Horizontal motion depends on the [`Direction`]:
//!
//! | Direction | Horizontal position |
//! |-----------|---------------------|
//! | [`Direction::Down`] | fixed at the spawn x |
//! | [`Direction::Left`] | `x - floor(i * speed)`, wrapped |
//! | [`Direction::Right`] | `x + floor(i * speed)`, wrapped |
//! | [`Direction::Zigzag`] | triangle wave around the spawn x, wrapped |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Travel direction shared by every particle in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Fall straight down (default).
    #[default]
    Down,
    /// Drift left while falling.
    Left,
    /// Drift right while falling.
    Right,
    /// Sway side to side while falling.
    Zigzag,
}

impl Direction {
    /// Every direction, in CLI order.
    pub const ALL: [Direction; 4] = [Direction::Down, Direction::Left, Direction::Right, Direction::Zigzag];

    /// `true` for [`Direction::Left`] and [`Direction::Right`].
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Lowercase configuration name.
    pub fn name(&self) -> &'static str {
        match self {
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Zigzag => "zigzag",
        }
    }
}

impl FromStr for Direction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|d| d.name() == s)
            .ok_or_else(|| ConfigError::InvalidDirection(s.to_string()))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which way a zigzag particle swings first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sway {
    /// Swing towards smaller x first.
    Left,
    /// Swing towards larger x first.
    Right,
}

impl Sway {
    fn sign(self) -> i64 {
        match self {
            Sway::Left => -1,
            Sway::Right => 1,
        }
    }
}

/// Smallest zigzag cycle count and period.
pub const MIN_ZIGZAG_CYCLES: u32 = 2;

/// Per-particle zigzag parameters, fixed at spawn time.
///
/// `cycles` is how many swings fit into the animation; `period` is the
/// length in frames of one swing (`num_frames / cycles`) and `amplitude`
/// the peak horizontal displacement (`width / cycles * 2`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zigzag {
    /// First swing direction.
    pub sway: Sway,
    /// Random phase in `[0, 1)` that desynchronises particles.
    pub initial_phase: f32,
    /// Number of swing cycles over the animation.
    pub cycles: u32,
    /// Frames per swing.
    pub period: u32,
    /// Frame offset derived from `initial_phase * period`.
    pub phase_offset: u32,
    /// Peak horizontal displacement in pixels.
    pub amplitude: u32,
}

impl Zigzag {
    /// Derive the swing geometry for an animation of `num_frames` frames on a
    /// canvas `width` pixels wide.
    pub fn new(sway: Sway, initial_phase: f32, cycles: u32, num_frames: u32, width: u32) -> Self {
        let cycles = cycles.max(MIN_ZIGZAG_CYCLES);
        let period = (num_frames / cycles).max(MIN_ZIGZAG_CYCLES);
        let phase_offset = (f64::from(initial_phase) * f64::from(period)) as u32;
        let amplitude = width / cycles * 2;

        Self {
            sway,
            initial_phase,
            cycles,
            period,
            phase_offset,
            amplitude,
        }
    }

    /// Signed horizontal displacement from the spawn x at `frame`.
    ///
    /// Ramps linearly from 0 to `amplitude` over one period, then back to 0
    /// over the next, mirrored when the particle sways left.
    pub fn offset(&self, frame: u32) -> i64 {
        let t = u64::from(frame) + u64::from(self.phase_offset);
        let period = u64::from(self.period);
        let progress = (t % period) as f64 / (period - 1) as f64;
        let outbound = (t / period) % 2 == 0;

        let ramp = if outbound { progress } else { 1.0 - progress };
        let travel = (f64::from(self.amplitude) * ramp) as i64;
        self.sway.sign() * travel
    }
}

/// Vertical position at `frame`: downward scroll wrapped to the canvas height.
pub fn vertical(base_y: f64, speed: f64, frame: u32, tile_offset: u32, height: u32) -> f64 {
    (base_y + f64::from(frame) * speed + f64::from(tile_offset)).rem_euclid(f64::from(height))
}

/// Horizontal position at `frame` for a particle spawned at `base_x`.
///
/// A zero `width` has nothing to wrap around, so `base_x` is returned as is.
pub fn horizontal(
    direction: Direction,
    base_x: i64,
    speed: f64,
    zigzag: &Zigzag,
    frame: u32,
    width: u32,
) -> i64 {
    if width == 0 {
        return base_x;
    }
    let width = i64::from(width);
    let travelled = (f64::from(frame) * speed).floor() as i64;
    match direction {
        Direction::Left => (base_x - travelled).rem_euclid(width),
        Direction::Right => (base_x + travelled).rem_euclid(width),
        Direction::Zigzag => (base_x + zigzag.offset(frame)).rem_euclid(width),
        Direction::Down => base_x,
    }
}
