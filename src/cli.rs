//! Command-line interface for shapefall

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use shapefall::{AnimationConfig, ConfigError, Direction, Rgb, ShapeMix};

#[derive(Parser, Debug)]
#[command(name = "shapefall")]
#[command(about = "Generate a looping GIF of falling shapes", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Shape, ratio and color groups (e.g. "cross 2 FF0000 line 9 00FF00").
    /// With --color, give shape/ratio pairs instead. A single shape needs no ratio.
    #[arg(long, num_args = 1.., value_name = "TOKENS")]
    pub shapes: Option<Vec<String>>,

    /// Color shared by every shape, 6-digit hex (e.g. FF0000)
    #[arg(long)]
    pub color: Option<String>,

    /// Direction of the falling shapes [default: down]
    #[arg(long, value_enum)]
    pub direction: Option<DirectionArg>,

    /// Canvas width [default: 1024]
    #[arg(long)]
    pub width: Option<u32>,

    /// Canvas height [default: 1024]
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of shapes [default: 150]
    #[arg(long, alias = "num_dots")]
    pub num_dots: Option<u32>,

    /// Minimum shape size [default: 2]
    #[arg(long, alias = "min_size")]
    pub min_size: Option<u32>,

    /// Maximum shape size [default: 10]
    #[arg(long, alias = "max_size")]
    pub max_size: Option<u32>,

    /// Duration of each frame in milliseconds [default: 150]
    #[arg(long)]
    pub duration: Option<u32>,

    /// Height of the band shapes are placed in; tiled down the canvas [default: 512]
    #[arg(long, alias = "height_range")]
    pub height_range: Option<u32>,

    /// Number of frames [default: 200]
    #[arg(long, alias = "num_frames")]
    pub num_frames: Option<u32>,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output GIF path [default: falling_shapes_<direction>.gif]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write every frame as a PNG into this directory
    #[arg(long)]
    pub frames_dir: Option<PathBuf>,

    /// Load settings from a JSON file; other flags override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the resolved configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    Down,
    Left,
    Right,
    Zigzag,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Down => Direction::Down,
            DirectionArg::Left => Direction::Left,
            DirectionArg::Right => Direction::Right,
            DirectionArg::Zigzag => Direction::Zigzag,
        }
    }
}

impl Cli {
    /// Log filter implied by `-v`/`-q`.
    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Error;
        }
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    /// Merge flags over `base`.
    pub fn apply(&self, mut config: AnimationConfig) -> Result<AnimationConfig, ConfigError> {
        match (&self.shapes, &self.color) {
            (Some(tokens), color) => {
                config.shapes = ShapeMix::from_tokens(tokens.as_slice(), color.as_deref())?;
            }
            (None, Some(color)) => {
                let color = color.parse::<Rgb>()?;
                let recolored = config.shapes.styles().iter().map(|s| {
                    let mut style = *s;
                    style.color = color;
                    style
                });
                config.shapes = ShapeMix::from_styles(recolored.collect::<Vec<_>>())?;
            }
            (None, None) => {}
        }

        if let Some(direction) = self.direction {
            config.direction = direction.into();
        }
        let overrides = [
            (&mut config.width, self.width),
            (&mut config.height, self.height),
            (&mut config.num_dots, self.num_dots),
            (&mut config.min_size, self.min_size),
            (&mut config.max_size, self.max_size),
            (&mut config.frame_duration_ms, self.duration),
            (&mut config.height_range, self.height_range),
            (&mut config.num_frames, self.num_frames),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        Ok(config)
    }

    /// Resolve the full configuration: JSON file (if any), then flags.
    pub fn to_config(&self) -> Result<AnimationConfig, ConfigError> {
        let base = match &self.config {
            Some(path) => AnimationConfig::from_json_file(path)?,
            None => AnimationConfig::default(),
        };
        self.apply(base)
    }

    /// Output path, defaulting to `falling_shapes_<direction>.gif`.
    pub fn output_path(&self, direction: Direction) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("falling_shapes_{}.gif", direction)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use shapefall::Shape;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("shapefall").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_without_flags() {
        let config = parse(&[]).to_config().unwrap();
        assert_eq!(config, AnimationConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = parse(&[
            "--shapes", "cross", "2", "FF0000", "line", "9", "00FF00", "--direction", "zigzag",
            "--width", "320", "--num_dots", "40", "--seed", "3",
        ]);
        let config = cli.to_config().unwrap();
        assert_eq!(config.width, 320);
        assert_eq!(config.height, 1024);
        assert_eq!(config.num_dots, 40);
        assert_eq!(config.direction, Direction::Zigzag);
        assert_eq!(config.seed, Some(3));
        let line = config.shapes.styles().iter().find(|s| s.shape == Shape::Line).unwrap();
        assert_eq!(line.ratio, 9);
    }

    #[test]
    fn test_color_without_shapes_recolors_default() {
        let config = parse(&["--color", "00FF00"]).to_config().unwrap();
        assert_eq!(config.shapes.styles()[0].color, Rgb::new(0, 255, 0));
    }

    #[test]
    fn test_invalid_shape_is_reported() {
        let err = parse(&["--shapes", "blob"]).to_config().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidShape(_)));
    }

    #[test]
    fn test_output_path_defaults_to_direction() {
        let cli = parse(&[]);
        assert_eq!(cli.output_path(Direction::Left), PathBuf::from("falling_shapes_left.gif"));
        let cli = parse(&["-o", "out.gif"]);
        assert_eq!(cli.output_path(Direction::Left), PathBuf::from("out.gif"));
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(parse(&[]).log_level(), log::LevelFilter::Warn);
        assert_eq!(parse(&["-vv"]).log_level(), log::LevelFilter::Debug);
        assert_eq!(parse(&["-q"]).log_level(), log::LevelFilter::Error);
    }
}
