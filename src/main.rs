//! Main entry point for the shapefall CLI

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use shapefall::{export, Animation};

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level().as_str()))
        .init();

    let config = cli.to_config().context("Invalid arguments")?;

    if cli.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let output = cli.output_path(config.direction);
    let duration = config.frame_duration_ms;

    let animation = Animation::new(config).context("Invalid configuration")?;
    info!(
        "Generated {} particles moving {}",
        animation.particles().len(),
        animation.config().direction
    );

    let frames = animation.render();

    if let Some(dir) = &cli.frames_dir {
        export::save_png_frames(&frames, dir)
            .with_context(|| format!("Failed to write frames to {}", dir.display()))?;
    }

    export::save_gif(&frames, duration, &output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(())
}
