//! Component surface designs.

use serde::{Deserialize, Serialize};

use crate::core::{ComponentSurfaceDesignId, Dimension};

/// The artwork shown on one side of a component.
///
/// Rendering is out of scope; the only property the engine cares about is
/// the size, which determines the component's bounds.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentSurfaceDesign {
    /// Registry key.
    pub id: ComponentSurfaceDesignId,

    /// Size of the component while this design is showing.
    pub size: Dimension,
}

impl ComponentSurfaceDesign {
    /// Create a new surface design.
    pub fn new(id: impl Into<ComponentSurfaceDesignId>, size: Dimension) -> Self {
        Self { id: id.into(), size }
    }
}
