use bgcorrect_core::{CorrectError, GeometryError, GridError, SurfaceError};

use crate::params::ConfigError;

/// Errors returned by [`super::CollectionSession`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("click rejected: {0}")]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    Correct(#[from] CorrectError),
    #[error("sample grid is incomplete ({missing} sectors missing)")]
    Incomplete { missing: usize },
}
