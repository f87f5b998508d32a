//! Errors raised while resolving geometry.

use thiserror::Error;

/// A geometry function the resolver could not lower.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {detail}")]
pub struct SpatialError {
    pub kind: SpatialErrorKind,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpatialErrorKind {
    #[error("unknown coordinate system")]
    UnknownCoordSystem,
    #[error("arity mismatch")]
    ArityMismatch,
    #[error("unsupported function")]
    UnsupportedFunction,
    #[error("invalid geometry")]
    InvalidGeometry,
}

impl SpatialError {
    pub fn new(kind: SpatialErrorKind, detail: impl Into<String>) -> SpatialError {
        SpatialError {
            kind,
            detail: detail.into(),
        }
    }

    pub fn arity(detail: impl Into<String>) -> SpatialError {
        SpatialError::new(SpatialErrorKind::ArityMismatch, detail)
    }

    pub fn unsupported(detail: impl Into<String>) -> SpatialError {
        SpatialError::new(SpatialErrorKind::UnsupportedFunction, detail)
    }

    pub fn invalid(detail: impl Into<String>) -> SpatialError {
        SpatialError::new(SpatialErrorKind::InvalidGeometry, detail)
    }
}
