//! One-stop animation builder.
//!
//! ```no_run
//! use shapefall::prelude::*;
//!
//! let config = AnimationConfig::new()
//!     .with_canvas(512, 512)
//!     .with_height_range(256)
//!     .with_direction(Direction::Zigzag)
//!     .with_seed(7);
//!
//! let animation = Animation::new(config)?;
//! animation.save_gif("snow.gif")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::path::Path;

use image::RgbaImage;
use log::debug;
use rand::Rng;

use crate::config::AnimationConfig;
use crate::error::{ConfigError, ExportError};
use crate::export;
use crate::particle::Particle;
use crate::render::FrameRenderer;
use crate::spawn::{spawn_particles, SpawnContext};

/// A validated config together with its spawned particle batch.
#[derive(Debug, Clone)]
pub struct Animation {
    config: AnimationConfig,
    particles: Vec<Particle>,
    renderer: FrameRenderer,
}

impl Animation {
    /// Validate `config` and spawn its particles, seeded from `config.seed`
    /// or from system entropy when unset.
    pub fn new(config: AnimationConfig) -> Result<Self, ConfigError> {
        match config.seed {
            Some(seed) => {
                debug!("Seeding particle generator with {}", seed);
                Self::with_context(config, &mut SpawnContext::seeded(seed))
            }
            None => Self::with_context(config, &mut SpawnContext::from_entropy()),
        }
    }

    /// Validate `config` and spawn its particles from an explicit random source.
    pub fn with_context<R: Rng>(config: AnimationConfig, ctx: &mut SpawnContext<R>) -> Result<Self, ConfigError> {
        config.validate()?;
        let particles = spawn_particles(&config, ctx);
        let renderer = FrameRenderer::from_config(&config);
        Ok(Self {
            config,
            particles,
            renderer,
        })
    }

    /// The configuration this animation was built from.
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// The spawned particle batch.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Render a single frame.
    pub fn frame(&self, index: u32) -> RgbaImage {
        self.renderer.render_frame(index, &self.particles)
    }

    /// Render every frame in playback order.
    pub fn render(&self) -> Vec<RgbaImage> {
        self.renderer.render(&self.particles)
    }

    /// Render and write a looping GIF.
    pub fn save_gif(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        export::save_gif(&self.render(), self.config.frame_duration_ms, path)
    }
}
