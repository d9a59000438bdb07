//! # rust-tabletop
//!
//! A scene graph for virtual tabletop games: tables, cards, card piles and
//! other components, arranged in containers, moved by drag-and-drop and
//! saved as mementos.
//!
//! ## Design Principles
//!
//! 1. **Registry-Driven**: No hardcoded component kinds. Every component is
//!    built from a `ComponentStrategy` registered in a `ComponentRegistry`;
//!    cards and piles are just the defaults.
//!
//! 2. **One Lock per Environment**: All state of a `TableEnvironment` sits
//!    behind a single reentrant lock. Individual calls are atomic; hold
//!    `TableEnvironment::lock` to group several.
//!
//! 3. **Handles, Not Pointers**: `Component`, `Container` and `Table` are
//!    cheap handles into an arena. Parent links are ids, so the tree has no
//!    reference cycles.
//!
//! ## Modules
//!
//! - `core`: Geometry, ids, orientations, paths, RNG, configuration, errors
//! - `strategies`: Component strategies, container layouts, surface designs
//! - `environment`: The environment, its lock and the component arena
//! - `components`: Component and container handles, listeners and events
//! - `table`: Tables, hit-testing and drag-and-drop
//! - `memento`: Serializable snapshots

pub mod components;
pub mod core;
pub mod environment;
pub mod memento;
pub mod strategies;
pub mod table;

// Re-export commonly used types
pub use crate::components::{
    BoundsChangedEvent, Component, ComponentListener, ComponentsReorderedEvent, Container,
    ContainerContentChangedEvent, ContainerListener, LayoutChangedEvent, OrientationChangedEvent,
    SurfaceDesignChangedEvent,
};
pub use crate::core::{
    ComponentId, ComponentOrientation, ComponentPath, ComponentStrategyId, ComponentSurfaceDesignId,
    ContainerLayoutId, Dimension, MementoError, Point, Rectangle, TableEnvironmentConfig, TableError, TableId,
    TableResult,
};
pub use crate::environment::{TableEnvironment, TableEnvironmentLock};
pub use crate::memento::{ComponentMemento, ContainerMemento, Memento, TableMemento};
pub use crate::strategies::{
    defaults, AccordianDirection, ComponentRegistry, ComponentStrategy, ComponentSurfaceDesign, ContainerLayout,
    DragPolicy, LayoutKind,
};
pub use crate::table::{DragContext, DragState, Table};
