//! Background subtraction.

use crate::image::{GrayImage, GrayImageView};
use crate::surface::Surface;

#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CorrectError {
    #[error("background is {bg_width}x{bg_height} but the source image is {width}x{height}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        bg_width: usize,
        bg_height: usize,
    },
}

/// Express `surface` as excess brightness above the darkest sampled phase.
///
/// Values below `darkest` go negative and are left unclamped.
pub fn build_background(surface: &Surface, darkest: f32) -> Surface {
    surface.offset(-darkest)
}

/// Per pixel `max(0, source - background)`, rounded into 8 bits.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(source, background), fields(width = source.width, height = source.height))
)]
pub fn correct(source: &GrayImageView<'_>, background: &Surface) -> Result<GrayImage, CorrectError> {
    if source.width != background.width() || source.height != background.height() {
        return Err(CorrectError::DimensionMismatch {
            width: source.width,
            height: source.height,
            bg_width: background.width(),
            bg_height: background.height(),
        });
    }

    let data = source
        .data
        .iter()
        .zip(background.data())
        .map(|(&src, &bg)| (src as f32 - bg).max(0.0).round().min(255.0) as u8)
        .collect();
    log::debug!("corrected {}x{} image", source.width, source.height);

    Ok(GrayImage {
        width: source.width,
        height: source.height,
        data,
    })
}
