//! Error types for shapefall.
//!
//! Particle generation and frame rendering cannot fail once a configuration
//! has been validated, so the only fallible surfaces are configuration
//! parsing/validation and exporting the finished frames.

use thiserror::Error;

/// Errors raised while building or validating an [`AnimationConfig`](crate::AnimationConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A shape name outside the recognised set.
    #[error("Invalid shape: {0}. Allowed shapes: dot, line, cross, star, circle")]
    InvalidShape(String),

    /// Shape tokens given with a shared colour were not `shape ratio` pairs.
    #[error("Invalid shapes input. Each shape must be followed by its ratio.")]
    MissingRatio,

    /// Shape tokens given without a shared colour were not `shape ratio color` triples.
    #[error("Invalid shapes input. Each shape must be followed by its ratio and color.")]
    MissingRatioAndColor,

    /// A ratio token that is not a non-negative integer.
    #[error("Invalid ratio '{0}': expected a non-negative integer")]
    InvalidRatio(String),

    /// A colour token that is not six hex digits.
    #[error("Invalid color '{0}': expected 6 hex digits such as FF0000")]
    InvalidColor(String),

    /// A direction name outside `down|left|right|zigzag`.
    #[error("Invalid direction: {0}. Allowed directions: down, left, right, zigzag")]
    InvalidDirection(String),

    /// No shapes were configured.
    #[error("At least one shape must be configured")]
    EmptyShapeMix,

    /// A canvas or timing dimension was zero.
    #[error("{0} must be greater than zero")]
    ZeroDimension(&'static str),

    /// `min_size` is larger than `max_size`.
    #[error("min_size ({min}) must not exceed max_size ({max})")]
    SizeRange {
        /// Configured minimum size.
        min: u32,
        /// Configured maximum size.
        max: u32,
    },

    /// Malformed JSON configuration.
    #[error("Failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read a configuration file.
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while writing rendered frames.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing to encode.
    #[error("Cannot export an animation with no frames")]
    NoFrames,

    /// Image encoding failed.
    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    /// Filesystem error while writing output.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
