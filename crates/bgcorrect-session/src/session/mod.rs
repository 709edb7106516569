//! Interactive sample collection.
//!
//! A [`CollectionSession`] owns the sample grid for one annotated image. Each
//! accepted click refines one sector; while sectors are missing the session
//! hands back a coarse preview surface, and once every sector holds a sample
//! it hands back the full-resolution background and the corrected image.

mod error;
mod machine;
mod outcome;

pub use error::SessionError;
pub use machine::{CollectionSession, SessionState};
pub use outcome::{ClickOutcome, Correction, SessionSetup, SessionUpdate};
