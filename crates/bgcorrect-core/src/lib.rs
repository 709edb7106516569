//! Core algorithms for manual background correction of grayscale images.
//!
//! A user picks the same physical phase in every sector of a coarse grid.
//! Those brightness samples are interpolated into a smooth background
//! surface, which is then subtracted from the source image.
//!
//! This crate is purely numeric. It does not depend on any concrete image
//! library; hosts hand in row-major 8-bit buffers via [`GrayImageView`].
//!
//! ```
//! use bgcorrect_core::{build_background, correct, reconstruct, GrayImage, GridSize, SampleGrid, UnsetAnchors};
//!
//! let mut grid = SampleGrid::new(GridSize::new(2, 2));
//! for (sx, sy, v) in [(0, 0, 40.0), (1, 0, 60.0), (0, 1, 40.0), (1, 1, 60.0)] {
//!     grid.set(sx, sy, v).unwrap();
//! }
//! let image = GrayImage::filled(32, 24, 90).unwrap();
//! let surface = reconstruct(&grid, 32, 24, UnsetAnchors::Reject).unwrap();
//! let background = build_background(&surface, grid.darkest_value().unwrap());
//! let flat = correct(&image.view(), &background).unwrap();
//! assert_eq!(flat.get(0, 0), 90);
//! ```

mod correct;
mod geometry;
mod grid;
mod image;
mod logger;
mod sampler;
mod surface;

pub use correct::{build_background, correct, CorrectError};
pub use geometry::{
    sector_index, GeometryError, GridSize, SectorBounds, SectorCoords, SectorGeometry,
};
pub use grid::{GridError, Sample, SampleGrid};
pub use image::{GrayImage, GrayImageView, ImageError};
pub use sampler::{sample_mean, DEFAULT_BORDER};
pub use surface::{interpolate_at, reconstruct, AnchorLayout, Surface, SurfaceError, UnsetAnchors};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
