//! Animated GIF export of a run's history.

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame};
use life_core::{Cell, Error, RenderConfig, Result};
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use crate::raster::rasterize;

/// Encode one frame per generation into an animated GIF at `path`.
///
/// Frames are played back at `config.fps` and the animation repeats
/// indefinitely.
pub fn save_gif<P: AsRef<Path>>(
    history: &[HashSet<Cell>],
    rows: i32,
    cols: i32,
    config: &RenderConfig,
    path: P,
) -> Result<()> {
    if history.is_empty() {
        return Err(Error::InvalidState(
            "call run() before saving the animation".to_string(),
        ));
    }

    let file = File::create(path)?;
    let mut encoder = GifEncoder::new(file);
    encoder
        .set_repeat(Repeat::Infinite)
        .map_err(|e| Error::Render(e.to_string()))?;

    for alive in history {
        let raster = rasterize(alive, rows, cols, config.cell_size);
        let delay = Delay::from_numer_denom_ms(1000, config.fps.max(1));
        let frame = Frame::from_parts(raster, 0, 0, delay);
        encoder
            .encode_frame(frame)
            .map_err(|e| Error::Render(e.to_string()))?;
    }

    Ok(())
}
