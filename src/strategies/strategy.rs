//! Component strategies.
//!
//! A `ComponentStrategy` describes one kind of component: whether it is a
//! container, which orientations it supports, its default geometry and
//! designs, and how it takes part in drag-and-drop. Strategies are plain
//! data built with a builder and registered in a `ComponentRegistry`.
//!
//! ```
//! use rust_tabletop::core::{ComponentOrientation, Point};
//! use rust_tabletop::strategies::ComponentStrategy;
//!
//! let token = ComponentStrategy::component("token", "Token")
//!     .with_surface_design(ComponentOrientation::Default, "token.default")
//!     .with_location(Point::new(5, 5));
//!
//! assert!(!token.is_container());
//! assert!(token.supports(ComponentOrientation::Default));
//! assert!(!token.supports(ComponentOrientation::Face));
//! ```

use smallvec::{smallvec, SmallVec};

use crate::core::{
    ComponentOrientation, ComponentStrategyId, ComponentSurfaceDesignId, ContainerLayoutId, Point,
};

/// Whether components of a strategy hold children.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComponentKind {
    Component,
    Container,
}

/// Whether a component may be picked up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragPolicy {
    /// The component never moves by drag-and-drop.
    Fixed,
    /// The component can be dragged.
    #[default]
    Movable,
}

/// What a container hands over when one of its children is dragged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChildDragPolicy {
    /// Only the dragged child.
    #[default]
    Single,
    /// The dragged child and every child above it in z-order.
    ComponentsAbove,
}

/// Defaults and policies for one kind of component.
#[derive(Clone, Debug)]
pub struct ComponentStrategy {
    /// Registry key.
    pub id: ComponentStrategyId,

    /// Human-readable name (for debugging/display).
    pub name: String,

    /// Component or container.
    pub kind: ComponentKind,

    /// Location of a freshly created component (origin, for containers).
    pub default_location: Point,

    /// Orientation of a freshly created component.
    pub default_orientation: ComponentOrientation,

    /// Orientations components of this kind may take.
    pub supported_orientations: SmallVec<[ComponentOrientation; 2]>,

    /// Initial surface design per orientation.
    pub default_surface_designs: SmallVec<[(ComponentOrientation, ComponentSurfaceDesignId); 2]>,

    /// Initial layout. Containers only.
    pub default_layout: Option<ContainerLayoutId>,

    /// Whether the component itself can be dragged.
    pub drag_policy: DragPolicy,

    /// What is dragged when a child is picked up. Containers only.
    pub child_drag_policy: ChildDragPolicy,

    /// Whether dragged components may be dropped into it. Containers only.
    pub accepts_drops: bool,
}

impl ComponentStrategy {
    fn new(id: impl Into<ComponentStrategyId>, name: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            default_location: Point::origin(),
            default_orientation: ComponentOrientation::Default,
            supported_orientations: smallvec![ComponentOrientation::Default],
            default_surface_designs: SmallVec::new(),
            default_layout: None,
            drag_policy: DragPolicy::Movable,
            child_drag_policy: ChildDragPolicy::Single,
            accepts_drops: false,
        }
    }

    /// Create a strategy for leaf components.
    pub fn component(id: impl Into<ComponentStrategyId>, name: impl Into<String>) -> Self {
        Self::new(id, name, ComponentKind::Component)
    }

    /// Create a strategy for containers with the given default layout.
    pub fn container(
        id: impl Into<ComponentStrategyId>,
        name: impl Into<String>,
        default_layout: impl Into<ContainerLayoutId>,
    ) -> Self {
        let mut strategy = Self::new(id, name, ComponentKind::Container);
        strategy.default_layout = Some(default_layout.into());
        strategy
    }

    /// Set the supported orientations and the default among them.
    ///
    /// Panics if `default` is not in `supported`.
    #[must_use]
    pub fn with_orientations(mut self, supported: &[ComponentOrientation], default: ComponentOrientation) -> Self {
        assert!(
            supported.contains(&default),
            "Default orientation {} is not supported by {}",
            default,
            self.id
        );
        self.supported_orientations = supported.iter().copied().collect();
        self.default_orientation = default;
        self
    }

    /// Set the default surface design for an orientation.
    #[must_use]
    pub fn with_surface_design(
        mut self,
        orientation: ComponentOrientation,
        design: impl Into<ComponentSurfaceDesignId>,
    ) -> Self {
        let design = design.into();
        match self.default_surface_designs.iter_mut().find(|(o, _)| *o == orientation) {
            Some(entry) => entry.1 = design,
            None => self.default_surface_designs.push((orientation, design)),
        }
        self
    }

    /// Set the default location.
    #[must_use]
    pub fn with_location(mut self, location: Point) -> Self {
        self.default_location = location;
        self
    }

    /// Make components of this kind immovable.
    #[must_use]
    pub fn fixed(mut self) -> Self {
        self.drag_policy = DragPolicy::Fixed;
        self
    }

    /// Drag every child above the picked one along with it.
    #[must_use]
    pub fn drag_components_above(mut self) -> Self {
        self.child_drag_policy = ChildDragPolicy::ComponentsAbove;
        self
    }

    /// Allow dragged components to be dropped into this container.
    #[must_use]
    pub fn accepting_drops(mut self) -> Self {
        self.accepts_drops = true;
        self
    }

    /// Check if components of this kind are containers.
    #[must_use]
    pub fn is_container(&self) -> bool {
        self.kind == ComponentKind::Container
    }

    /// Check if `orientation` is supported.
    #[must_use]
    pub fn supports(&self, orientation: ComponentOrientation) -> bool {
        self.supported_orientations.contains(&orientation)
    }

    /// Default design for `orientation`, if one is configured.
    #[must_use]
    pub fn default_surface_design(&self, orientation: ComponentOrientation) -> Option<&ComponentSurfaceDesignId> {
        self.default_surface_designs
            .iter()
            .find(|(o, _)| *o == orientation)
            .map(|(_, id)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_defaults() {
        let strategy = ComponentStrategy::component("chip", "Chip");
        assert_eq!(strategy.kind, ComponentKind::Component);
        assert_eq!(strategy.default_orientation, ComponentOrientation::Default);
        assert_eq!(strategy.drag_policy, DragPolicy::Movable);
        assert!(strategy.default_layout.is_none());
        assert!(!strategy.accepts_drops);
    }

    #[test]
    fn test_container_builder() {
        let strategy = ComponentStrategy::container("tray", "Tray", "stacked")
            .drag_components_above()
            .accepting_drops()
            .fixed();

        assert!(strategy.is_container());
        assert_eq!(strategy.default_layout, Some(ContainerLayoutId::new("stacked")));
        assert_eq!(strategy.child_drag_policy, ChildDragPolicy::ComponentsAbove);
        assert_eq!(strategy.drag_policy, DragPolicy::Fixed);
        assert!(strategy.accepts_drops);
    }

    #[test]
    fn test_surface_design_override() {
        let strategy = ComponentStrategy::component("chip", "Chip")
            .with_surface_design(ComponentOrientation::Default, "a")
            .with_surface_design(ComponentOrientation::Default, "b");

        assert_eq!(strategy.default_surface_designs.len(), 1);
        assert_eq!(
            strategy.default_surface_design(ComponentOrientation::Default),
            Some(&ComponentSurfaceDesignId::new("b"))
        );
    }

    #[test]
    #[should_panic(expected = "not supported")]
    fn test_unsupported_default_orientation_panics() {
        let _ = ComponentStrategy::component("chip", "Chip")
            .with_orientations(&[ComponentOrientation::Face], ComponentOrientation::Back);
    }
}
