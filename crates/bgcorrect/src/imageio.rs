//! Bridges between `image::GrayImage` and the core buffer types, plus the
//! file-driven replay used by the CLI.

use std::path::{Path, PathBuf};

use ::image::ImageReader;

use crate::core::{self, GrayImage, GrayImageView, Surface};
use crate::replay::{replay_clicks, ReplayOutput};
use crate::session::{ConfigError, ReplayConfig, SessionIoError};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the image-backed helpers.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Image(#[from] ::image::ImageError),
    #[error(transparent)]
    Buffer(#[from] core::ImageError),
    #[error("image dimensions {width}x{height} do not fit the output format")]
    Dimensions { width: usize, height: usize },
    #[error(transparent)]
    SessionIo(#[from] SessionIoError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Borrow an `image::GrayImage` as a core view.
pub fn gray_view(img: &::image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Convert a core image into an `image::GrayImage`.
pub fn to_image(img: &GrayImage) -> Result<::image::GrayImage, AppError> {
    let dims = AppError::Dimensions {
        width: img.width,
        height: img.height,
    };
    let (Ok(w), Ok(h)) = (u32::try_from(img.width), u32::try_from(img.height)) else {
        return Err(dims);
    };
    ::image::GrayImage::from_raw(w, h, img.data.clone()).ok_or(dims)
}

/// Decode any supported image file and convert it to 8-bit luma.
pub fn load_gray(path: &Path) -> Result<::image::GrayImage, AppError> {
    let reader = ImageReader::open(path).map_err(|source| AppError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(reader.decode()?.to_luma8())
}

pub fn save_gray(img: &GrayImage, path: &Path) -> Result<(), AppError> {
    to_image(img)?.save(path)?;
    log::info!("wrote {}", path.display());
    Ok(())
}

/// Save a surface quantized to 8 bits.
pub fn save_surface(surface: &Surface, path: &Path) -> Result<(), AppError> {
    save_gray(&surface.to_gray(), path)
}

/// Load `config_path`, replay its clicks on its image, and write every output it names.
#[cfg_attr(feature = "tracing", instrument(level = "info"))]
pub fn run_replay_file(config_path: &Path) -> Result<ReplayOutput, AppError> {
    let cfg = ReplayConfig::load_json(config_path)?;
    let img = load_gray(Path::new(&cfg.image_path))?;
    let mut out = replay_clicks(&cfg, config_path, &gray_view(&img))?;

    if let (Some(path), Some(preview)) = (&cfg.preview_path, &out.last_preview) {
        save_surface(preview, Path::new(path))?;
    }
    match &out.correction {
        Some(c) => {
            if let Some(path) = &cfg.background_path {
                save_surface(&c.background, Path::new(path))?;
            }
            if let Some(path) = &cfg.corrected_path {
                save_gray(&c.corrected, Path::new(path))?;
            }
        }
        None => {
            let missing = out.report.missing.len();
            log::warn!("sample grid incomplete ({missing} sectors missing), no correction written");
            out.report
                .set_error(format!("sample grid incomplete ({missing} sectors missing)"));
        }
    }

    out.report.write_json(cfg.report_path())?;
    Ok(out)
}
