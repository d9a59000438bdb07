//! Component strategies, container layouts and surface designs.
//!
//! ## Key Types
//!
//! - `ComponentStrategy`: defaults and drag policies for one component kind
//! - `ContainerLayout`: child placement and hit-testing
//! - `ComponentSurfaceDesign`: the sized artwork of one orientation
//! - `ComponentRegistry`: id lookup for all of the above

pub mod design;
pub mod layout;
pub mod registry;
pub mod strategy;

pub use design::ComponentSurfaceDesign;
pub use layout::{AccordianDirection, ContainerLayout, LayoutKind};
pub use registry::{defaults, ComponentRegistry};
pub use strategy::{ChildDragPolicy, ComponentKind, ComponentStrategy, DragPolicy};
