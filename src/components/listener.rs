//! Component and container listeners.
//!
//! Listeners are registered per component (or per container) and are called
//! synchronously, on the mutating thread, while the environment lock is
//! still held but after the change is fully applied. A listener may call
//! back into the environment, including mutating it.
//!
//! Every method has an empty default, so a listener only implements the
//! events it cares about:
//!
//! ```
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use rust_tabletop::components::{BoundsChangedEvent, ComponentListener};
//!
//! #[derive(Default)]
//! struct MoveCounter(AtomicUsize);
//!
//! impl ComponentListener for MoveCounter {
//!     fn bounds_changed(&self, _event: &BoundsChangedEvent) {
//!         self.0.fetch_add(1, Ordering::Relaxed);
//!     }
//! }
//! ```
//!
//! A listener that panics is logged and skipped; the remaining listeners
//! still run.

use crate::core::{ComponentOrientation, Rectangle};
use crate::strategies::{ComponentSurfaceDesign, ContainerLayout};

use super::component::Component;
use super::container::Container;

/// A component's bounds changed.
#[derive(Clone, Debug)]
pub struct BoundsChangedEvent {
    pub component: Component,
    pub old_bounds: Rectangle,
    pub new_bounds: Rectangle,
}

/// A component was turned over.
#[derive(Clone, Debug)]
pub struct OrientationChangedEvent {
    pub component: Component,
    pub old_orientation: ComponentOrientation,
    pub new_orientation: ComponentOrientation,
}

/// The design of one orientation was replaced.
#[derive(Clone, Debug)]
pub struct SurfaceDesignChangedEvent {
    pub component: Component,
    pub orientation: ComponentOrientation,
    /// `None` if the orientation had no design before.
    pub old_design: Option<ComponentSurfaceDesign>,
    pub new_design: ComponentSurfaceDesign,
}

/// A child was added to or removed from a container.
///
/// `index` is the child's index at the time of the change: its new index
/// for an addition and its former index for a removal.
#[derive(Clone, Debug)]
pub struct ContainerContentChangedEvent {
    pub container: Container,
    pub component: Component,
    pub index: usize,
}

/// A container switched layouts.
#[derive(Clone, Debug)]
pub struct LayoutChangedEvent {
    pub container: Container,
    pub old_layout: ContainerLayout,
    pub new_layout: ContainerLayout,
}

/// A container's children changed order.
#[derive(Clone, Debug)]
pub struct ComponentsReorderedEvent {
    pub container: Container,
}

/// Observer of one component.
pub trait ComponentListener: Send + Sync {
    fn bounds_changed(&self, _event: &BoundsChangedEvent) {}

    fn orientation_changed(&self, _event: &OrientationChangedEvent) {}

    fn surface_design_changed(&self, _event: &SurfaceDesignChangedEvent) {}
}

/// Observer of one container's contents.
pub trait ContainerListener: Send + Sync {
    fn component_added(&self, _event: &ContainerContentChangedEvent) {}

    fn component_removed(&self, _event: &ContainerContentChangedEvent) {}

    fn layout_changed(&self, _event: &LayoutChangedEvent) {}

    fn components_reordered(&self, _event: &ComponentsReorderedEvent) {}
}
