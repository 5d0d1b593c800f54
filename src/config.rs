//! Animation configuration.
//!
//! [`AnimationConfig`] carries every knob of a run. It can be built in code
//! with the `with_*` methods, assembled from command-line tokens, or loaded
//! from JSON:
//!
//! ```json
//! {
//!   "width": 512,
//!   "height": 512,
//!   "direction": "zigzag",
//!   "shapes": [
//!     { "shape": "star", "ratio": 1, "color": "FFD700" },
//!     { "shape": "dot", "ratio": 6, "color": "FFFFFF" }
//!   ]
//! }
//! ```
//!
//! Omitted fields take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::motion::Direction;
use crate::visuals::ShapeMix;

/// Parameters for generating one animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Height of the band particles are placed in. The band is tiled
    /// vertically to fill the whole canvas.
    pub height_range: u32,
    /// Number of particles.
    pub num_dots: u32,
    /// Smallest particle size (fully transparent).
    pub min_size: u32,
    /// Largest particle size (fully opaque).
    pub max_size: u32,
    /// Frames in one loop of the animation.
    pub num_frames: u32,
    /// Travel direction.
    pub direction: Direction,
    /// Shape weights and colours.
    pub shapes: ShapeMix,
    /// Display time of each frame in milliseconds.
    pub frame_duration_ms: u32,
    /// RNG seed. `None` draws from system entropy.
    pub seed: Option<u64>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            height_range: 512,
            num_dots: 150,
            min_size: 2,
            max_size: 10,
            num_frames: 200,
            direction: Direction::Down,
            shapes: ShapeMix::default(),
            frame_duration_ms: 150,
            seed: None,
        }
    }
}

impl AnimationConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canvas size.
    pub fn with_canvas(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the height of the placement band.
    pub fn with_height_range(mut self, height_range: u32) -> Self {
        self.height_range = height_range;
        self
    }

    /// Set the number of particles.
    pub fn with_particle_count(mut self, num_dots: u32) -> Self {
        self.num_dots = num_dots;
        self
    }

    /// Set the particle size bounds.
    pub fn with_sizes(mut self, min_size: u32, max_size: u32) -> Self {
        self.min_size = min_size;
        self.max_size = max_size;
        self
    }

    /// Set the number of frames per loop.
    pub fn with_frames(mut self, num_frames: u32) -> Self {
        self.num_frames = num_frames;
        self
    }

    /// Set the travel direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the shape mix.
    pub fn with_shapes(mut self, shapes: ShapeMix) -> Self {
        self.shapes = shapes;
        self
    }

    /// Set the per-frame display time.
    pub fn with_frame_duration(mut self, frame_duration_ms: u32) -> Self {
        self.frame_duration_ms = frame_duration_ms;
        self
    }

    /// Fix the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the config can be rendered.
    ///
    /// Placement quirks (shapes larger than the canvas) are allowed; only
    /// values that would leave nothing to draw on are rejected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dimensions = [
            ("width", self.width),
            ("height", self.height),
            ("height_range", self.height_range),
            ("num_frames", self.num_frames),
        ];
        if let Some((name, _)) = dimensions.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::ZeroDimension(*name));
        }
        if self.min_size > self.max_size {
            return Err(ConfigError::SizeRange {
                min: self.min_size,
                max: self.max_size,
            });
        }
        if self.shapes.styles().is_empty() {
            return Err(ConfigError::EmptyShapeMix);
        }
        Ok(())
    }

    /// Parse a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serialise as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
