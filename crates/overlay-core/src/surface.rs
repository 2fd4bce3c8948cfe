use std::fmt;

/// Where an overlay is drawn: the whole viewport or one element.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceId {
    Viewport,
    Element(String),
}

impl SurfaceId {
    pub fn element(id: impl Into<String>) -> Self {
        SurfaceId::Element(id.into())
    }

    pub fn is_viewport(&self) -> bool {
        matches!(self, SurfaceId::Viewport)
    }

    /// Element id for element surfaces.
    pub fn element_id(&self) -> Option<&str> {
        match self {
            SurfaceId::Viewport => None,
            SurfaceId::Element(id) => Some(id),
        }
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceId::Viewport => f.write_str("viewport"),
            SurfaceId::Element(id) => write!(f, "#{}", id),
        }
    }
}

/// Lifecycle state of a single surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceState {
    Idle,
    Active,
}
