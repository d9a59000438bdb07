//! Memento types and their binary encoding.

use serde::{Deserialize, Serialize};

use crate::core::{
    ComponentOrientation, ComponentStrategyId, ComponentSurfaceDesignId, ContainerLayoutId, MementoError, Point,
};

/// Format version written into every memento.
pub const MEMENTO_VERSION: u32 = 1;

/// The design registered for one orientation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceDesignEntry {
    pub orientation: ComponentOrientation,
    pub design_id: ComponentSurfaceDesignId,
}

/// State of a leaf component, or the component part of a container.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentMemento {
    pub version: u32,
    pub strategy_id: ComponentStrategyId,
    pub origin: Point,
    pub orientation: ComponentOrientation,
    /// Sorted by orientation.
    pub surface_designs: Vec<SurfaceDesignEntry>,
}

/// State of a container and, recursively, its children.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerMemento {
    pub component: ComponentMemento,
    pub layout_id: ContainerLayoutId,
    /// Bottom to top.
    pub children: Vec<Memento>,
}

/// Snapshot of a component subtree.
///
/// Mementos only refer to strategies, layouts and designs by id, so they
/// restore into any environment whose registry knows those ids.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Memento {
    Component(ComponentMemento),
    Container(ContainerMemento),
}

/// Snapshot of a whole table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMemento {
    pub version: u32,
    pub tabletop: ContainerMemento,
}

impl Memento {
    /// The component part, for either variant.
    #[must_use]
    pub fn component(&self) -> &ComponentMemento {
        match self {
            Self::Component(component) => component,
            Self::Container(container) => &container.component,
        }
    }

    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Container(_))
    }

    /// Number of components in the snapshot, this one included.
    #[must_use]
    pub fn component_count(&self) -> usize {
        match self {
            Self::Component(_) => 1,
            Self::Container(container) => 1 + container.children.iter().map(Memento::component_count).sum::<usize>(),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, MementoError> {
        encode(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MementoError> {
        decode(bytes)
    }
}

impl TableMemento {
    pub fn to_bytes(&self) -> Result<Vec<u8>, MementoError> {
        encode(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MementoError> {
        decode(bytes)
    }
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, MementoError> {
    bincode::serialize(value).map_err(|err| MementoError::Encoding(err.to_string()))
}

fn decode<T: for<'de> Deserialize<'de>>(bytes: &[u8]) -> Result<T, MementoError> {
    bincode::deserialize(bytes).map_err(|err| MementoError::Encoding(err.to_string()))
}
