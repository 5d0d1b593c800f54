//! Writing rendered frames to disk.
//!
//! The main output is an infinitely looping GIF. Fully transparent pixels
//! stay transparent in the palette; every frame replaces the previous one.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, ImageFormat, RgbaImage};
use log::{debug, info};

use crate::error::ExportError;

/// Encode `frames` as a looping GIF into `writer`.
pub fn encode_gif<W: Write>(frames: &[RgbaImage], frame_duration_ms: u32, writer: W) -> Result<(), ExportError> {
    if frames.is_empty() {
        return Err(ExportError::NoFrames);
    }

    let delay = Delay::from_numer_denom_ms(frame_duration_ms, 1);
    let mut encoder = GifEncoder::new(writer);
    encoder.set_repeat(Repeat::Infinite)?;
    encoder.encode_frames(
        frames
            .iter()
            .map(|frame| Frame::from_parts(frame.clone(), 0, 0, delay)),
    )?;

    debug!("Encoded {} GIF frames at {} ms", frames.len(), frame_duration_ms);
    Ok(())
}

/// Write `frames` as a looping GIF file.
pub fn save_gif(frames: &[RgbaImage], frame_duration_ms: u32, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    encode_gif(frames, frame_duration_ms, &mut writer)?;
    writer.flush()?;

    info!("Wrote {} frames to {}", frames.len(), path.display());
    Ok(())
}

/// Write each frame as `frame_NNNN.png` inside `dir`, creating it if needed.
pub fn save_png_frames(frames: &[RgbaImage], dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, ExportError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let paths = frames
        .iter()
        .enumerate()
        .map(|(i, frame)| {
            let path = dir.join(format!("frame_{:04}.png", i));
            frame.save_with_format(&path, ImageFormat::Png)?;
            Ok::<_, ExportError>(path)
        })
        .collect::<Result<Vec<_>, _>>()?;

    info!("Wrote {} PNG frames to {}", paths.len(), dir.display());
    Ok(paths)
}
