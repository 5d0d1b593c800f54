//! Particle generation.
//!
//! All randomness flows through an explicit [`SpawnContext`], so a batch is
//! fully reproducible from its seed:
//!
//! ```
//! use shapefall::{spawn_particles, AnimationConfig, SpawnContext};
//!
//! let config = AnimationConfig::default().with_particle_count(20);
//! let a = spawn_particles(&config, &mut SpawnContext::seeded(7));
//! let b = spawn_particles(&config, &mut SpawnContext::seeded(7));
//! assert_eq!(a, b);
//! ```

use glam::UVec2;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::AnimationConfig;
use crate::motion::{Direction, Sway, Zigzag, MIN_ZIGZAG_CYCLES};
use crate::particle::Particle;
use crate::visuals::{alpha_for_size, Shape, ShapeMix, ShapeStyle};

/// Random source used while spawning particles.
///
/// Wraps any [`Rng`]; [`SpawnContext::seeded`] gives a deterministic one.
pub struct SpawnContext<R = StdRng> {
    rng: R,
}

impl SpawnContext<StdRng> {
    /// Deterministic context for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Context seeded from system entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> SpawnContext<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Random f32 in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random integer in `[min, max]` (inclusive). Returns `min` when `max < min`.
    #[inline]
    pub fn random_int(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    /// Fair coin flip between the two swing directions.
    pub fn random_sway(&mut self) -> Sway {
        if self.rng.gen_bool(0.5) {
            Sway::Left
        } else {
            Sway::Right
        }
    }

    /// Weighted draw from `mix`: uniform value in `[0, total_ratio)`.
    pub fn pick_shape<'a>(&mut self, mix: &'a ShapeMix) -> &'a ShapeStyle {
        let draw = self.rng.gen::<f64>() * f64::from(mix.total_ratio());
        mix.pick(draw)
    }
}

/// Generate `config.num_dots` particles.
///
/// Horizontal directions give every particle the same speed
/// (`width / num_frames`, one full crossing per loop). Down and zigzag
/// multiply `height_range / num_frames` by a random factor in `1..=3`.
///
/// Shapes larger than the placement band are pinned to its top-left edge
/// rather than rejected.
pub fn spawn_particles<R: Rng>(config: &AnimationConfig, ctx: &mut SpawnContext<R>) -> Vec<Particle> {
    let AnimationConfig {
        width,
        height_range,
        num_dots,
        min_size,
        max_size,
        num_frames,
        direction,
        ..
    } = *config;

    if max_size > width || max_size > height_range {
        warn!(
            "max_size {} exceeds the placement area {}x{}; particles will bunch at the edge",
            max_size, width, height_range
        );
    }

    let x_max = width.saturating_sub(max_size);
    let y_max = height_range.saturating_sub(max_size);
    let horizontal = direction.is_horizontal();

    let particles: Vec<Particle> = (0..num_dots)
        .map(|_| {
            let x = ctx.random_int(0, x_max);
            let y = ctx.random_int(0, y_max);
            let size = ctx.random_int(min_size, max_size);

            let speed = match uniform_speed(config) {
                Some(speed) => speed,
                None => f64::from(height_range) / f64::from(num_frames) * f64::from(ctx.random_int(1, 3)),
            };

            let style = *ctx.pick_shape(&config.shapes);
            let color = style.color.with_alpha(alpha_for_size(size, min_size, max_size));

            let sway = ctx.random_sway();
            let cycles = if horizontal {
                num_frames.saturating_sub(1).max(MIN_ZIGZAG_CYCLES)
            } else {
                ctx.random_int(num_frames / 50, num_frames / 40).max(MIN_ZIGZAG_CYCLES)
            };
            let initial_phase = ctx.random();

            Particle {
                origin: UVec2::new(x, y),
                size,
                speed,
                color,
                shape: style.shape,
                direction,
                zigzag: Zigzag::new(sway, initial_phase, cycles, num_frames, width),
                trail_length: (style.shape == Shape::Line).then(|| (speed * 1.5) as u32),
            }
        })
        .collect();

    debug!(
        "Spawned {} particles ({} direction, {} shape kinds)",
        particles.len(),
        direction,
        config.shapes.styles().len()
    );
    particles
}

/// Speed every particle gets for a horizontal `direction`, if it is fixed.
pub fn uniform_speed(config: &AnimationConfig) -> Option<f64> {
    match config.direction {
        Direction::Left | Direction::Right => Some(f64::from(config.width) / f64::from(config.num_frames)),
        Direction::Down | Direction::Zigzag => None,
    }
}
