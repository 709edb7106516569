//! Interactive collection of per-sector brightness samples.
//!
//! The host (an image viewer, a plugin shell, or the replay CLI in the
//! `bgcorrect` crate) forwards bounds-checked clicks in image pixel
//! coordinates; the session answers with a preview surface while sectors are
//! missing and with the background plus corrected image once the grid is
//! complete. Status text goes through the `log` facade.

mod io;
mod params;
mod session;

pub use io::{RejectedClick, ReplayConfig, ReportedSample, SessionIoError, SessionReport};
pub use params::{ConfigError, SessionParams, MAX_BORDER};
pub use session::{
    ClickOutcome, CollectionSession, Correction, SessionError, SessionSetup, SessionState,
    SessionUpdate,
};
