use thiserror::Error;

use crate::session::SessionHandle;
use crate::surface::SurfaceId;

/// Errors returned by [`OverlayController`](crate::OverlayController) operations.
///
/// None of these are fatal to the controller: a failed call leaves every
/// session, timer and surface lock exactly as it found them.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum OverlayError {
    #[error("surface {0} already has an active overlay")]
    AlreadyActive(SurfaceId),
    #[error("overlay session {0} not found")]
    NotFound(SessionHandle),
    #[error("invalid overlay config: {0}")]
    InvalidConfig(String),
    #[error("overlay session {0} has no counter to tick")]
    NoCounter(SessionHandle),
    #[error("no overlay is active on surface {0}")]
    Idle(SurfaceId),
}

pub type Result<T> = std::result::Result<T, OverlayError>;

#[inline]
pub(crate) fn invalid(msg: impl Into<String>) -> OverlayError {
    OverlayError::InvalidConfig(msg.into())
}
