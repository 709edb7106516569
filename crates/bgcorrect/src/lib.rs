//! Manual background correction for single-channel images.
//!
//! This facade crate provides:
//! - re-exports of the numeric core (`bgcorrect-core`) and the interactive
//!   session (`bgcorrect-session`),
//! - a headless replay of recorded clicks ([`replay::replay_clicks`]),
//! - (feature `image`) conversions to and from `image::GrayImage` and a
//!   file-driven replay that writes preview, background and corrected PNGs.
//!
//! ## Quickstart
//!
//! ```no_run
//! use bgcorrect::imageio::{gray_view, load_gray, save_gray};
//! use bgcorrect::session::{CollectionSession, SessionParams};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = load_gray(Path::new("sem.png"))?;
//! let mut session = CollectionSession::new(SessionParams::new(2, 2, 2))?;
//! for (x, y) in [(20, 20), (600, 20), (20, 440), (600, 440)] {
//!     let outcome = session.on_click("sem.png", &gray_view(&img), x, y)?;
//!     if let Some(c) = outcome.correction() {
//!         save_gray(&c.corrected, Path::new("sem_corrected.png"))?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `bgcorrect::core`: sector geometry, sample grid, sampler, surface
//!   reconstruction, background subtraction.
//! - `bgcorrect::session`: collection state machine, parameters, JSON I/O.
//! - `bgcorrect::replay`: click-list replay without any image library.
//! - `bgcorrect::imageio` (feature `image`): `image` crate integration.

pub use bgcorrect_core as core;
pub use bgcorrect_session as session;

pub use bgcorrect_core::{GrayImage, GrayImageView, GridSize, SampleGrid, Surface};
pub use bgcorrect_session::{CollectionSession, SessionParams, SessionState};

pub mod replay;

#[cfg(feature = "image")]
pub mod imageio;
