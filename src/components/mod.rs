//! Components, containers and their listeners.
//!
//! ## Key Types
//!
//! - `Component`: handle to one piece in an environment
//! - `Container`: a component with ordered children and a layout
//! - `ComponentListener` / `ContainerListener`: change observers

pub mod component;
pub mod container;
pub mod listener;

pub use component::Component;
pub use container::Container;
pub use listener::{
    BoundsChangedEvent, ComponentListener, ComponentsReorderedEvent, ContainerContentChangedEvent,
    ContainerListener, LayoutChangedEvent, OrientationChangedEvent, SurfaceDesignChangedEvent,
};
