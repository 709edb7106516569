use bgcorrect_core::{
    build_background, correct, reconstruct, sample_mean, GrayImageView, Sample, SampleGrid,
    SectorGeometry, Surface, UnsetAnchors,
};
use serde::{Deserialize, Serialize};

use super::{ClickOutcome, Correction, SessionError, SessionSetup, SessionUpdate};
use crate::params::{ConfigError, SessionParams};

#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No image annotated yet.
    AwaitingFirstSample,
    /// Some sectors still lack a sample.
    Collecting,
    /// Every sector holds a sample; the corrected image is available.
    Ready,
}

/// Sample collection state for one annotated image at a time.
#[derive(Clone, Debug)]
pub struct CollectionSession {
    params: SessionParams,
    grid: SampleGrid,
    identity: Option<String>,
    state: SessionState,
}

impl CollectionSession {
    /// Start a session; fails fast on an invalid configuration.
    pub fn new(params: SessionParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            params,
            grid: SampleGrid::new(params.grid),
            identity: None,
            state: SessionState::AwaitingFirstSample,
        })
    }

    /// Replace the parameters and start over. On error the session is left as it was.
    pub fn configure(&mut self, params: SessionParams) -> Result<(), ConfigError> {
        params.validate()?;
        self.params = params;
        self.on_reset();
        Ok(())
    }

    #[inline]
    pub fn params(&self) -> &SessionParams {
        &self.params
    }

    #[inline]
    pub fn grid(&self) -> &SampleGrid {
        &self.grid
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Identity of the image currently being annotated.
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// Clear the grid and forget the current image.
    pub fn on_reset(&mut self) {
        log::info!("sample selection reset");
        self.identity = None;
        self.grid.reset(self.params.grid);
        self.state = SessionState::AwaitingFirstSample;
    }

    /// Register a click at image pixel `(x, y)` of the image known as `identity`.
    ///
    /// A click outside the image is rejected before anything changes, including
    /// the identity switch it would otherwise trigger.
    #[cfg_attr(feature = "tracing", instrument(level = "info", skip(self, image)))]
    pub fn on_click(
        &mut self,
        identity: &str,
        image: &GrayImageView<'_>,
        x: usize,
        y: usize,
    ) -> Result<ClickOutcome, SessionError> {
        let (geometry, sector) = SectorGeometry::new(image.width, image.height, self.params.grid)
            .and_then(|g| g.sector_index(x, y).map(|s| (g, s)))
            .inspect_err(|e| log::warn!("ignoring click: {e}"))?;

        let setup = if self.identity.as_deref() != Some(identity) {
            Some(self.start_image(identity, &geometry, image))
        } else {
            None
        };

        let sample = Sample {
            sector,
            value: sample_mean(image, x, y, self.params.border),
        };
        let previous = self.grid.apply(sample)?;
        log::info!(
            "selected brightness {:.2} at image position {} x {} in sector {} x {}",
            sample.value,
            x,
            y,
            sector.sx + 1,
            sector.sy + 1
        );

        let update = if self.grid.is_complete() {
            log::info!("calculating correction background");
            let correction = self.correction_for(image)?;
            log::info!("done; samples can still be refined to improve the result");
            self.state = SessionState::Ready;
            SessionUpdate::Complete(correction)
        } else {
            if let Some(first) = self.grid.missing_cells().first() {
                log::info!(
                    "still missing samples, e.g. sector {} x {}",
                    first.sx + 1,
                    first.sy + 1
                );
            }
            self.state = SessionState::Collecting;
            SessionUpdate::Preview(self.preview(image.width, image.height)?)
        };

        Ok(ClickOutcome {
            sample,
            previous,
            setup,
            update,
        })
    }

    /// Coarse preview of the current grid for an image of `width × height`.
    pub fn preview(&self, width: usize, height: usize) -> Result<Surface, SessionError> {
        let (pw, ph) = self.params.preview_size(width, height);
        let surface = reconstruct(&self.grid, pw, ph, UnsetAnchors::ZeroFill)?;
        log::debug!("updated {pw}x{ph} background preview");
        Ok(surface)
    }

    /// Re-derive background and corrected image from the current grid.
    pub fn recompute(&self, image: &GrayImageView<'_>) -> Result<Correction, SessionError> {
        if !self.grid.is_complete() {
            return Err(SessionError::Incomplete {
                missing: self.grid.missing_cells().len(),
            });
        }
        self.correction_for(image)
    }

    fn correction_for(&self, image: &GrayImageView<'_>) -> Result<Correction, SessionError> {
        let surface = reconstruct(&self.grid, image.width, image.height, UnsetAnchors::Reject)?;
        let darkest = self.grid.darkest_value()?;
        let background = build_background(&surface, darkest);
        log::debug!("background relative to darkest sample {darkest:.2}");
        let corrected = correct(image, &background)?;
        Ok(Correction {
            darkest,
            background,
            corrected,
        })
    }

    fn start_image(
        &mut self,
        identity: &str,
        geometry: &SectorGeometry,
        image: &GrayImageView<'_>,
    ) -> SessionSetup {
        let restarted = self.identity.is_some();
        if restarted {
            log::info!("analysed image has changed, resetting sample selection");
        } else {
            log::info!("started manual background correction");
        }

        self.identity = Some(identity.to_owned());
        self.grid.reset(self.params.grid);
        self.state = SessionState::Collecting;

        let grid = self.params.grid;
        let (sector_width, sector_height) = geometry.sector_size();
        let (preview_width, preview_height) = self.params.preview_size(image.width, image.height);
        log::info!("analysing '{identity}'");
        log::info!("image dimensions: {} x {} px", image.width, image.height);
        log::info!("using {} x {} sectors", grid.columns, grid.rows);
        log::info!("sector dimensions: {sector_width} x {sector_height} px");
        log::info!("select a position of the same phase and grey value in every sector");

        SessionSetup {
            identity: identity.to_owned(),
            image_width: image.width,
            image_height: image.height,
            grid,
            border: self.params.border,
            sector_width,
            sector_height,
            preview_width,
            preview_height,
            restarted,
        }
    }
}
