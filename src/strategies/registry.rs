//! Registry of strategies, layouts and surface designs.
//!
//! The `ComponentRegistry` is what a `TableEnvironment` builds components
//! from. It provides lookup by id; unknown ids produce the matching
//! `TableError::NoSuch*` carrying the id.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::core::{
    ComponentOrientation, ComponentStrategyId, ComponentSurfaceDesignId, ContainerLayoutId, Dimension,
    Point, TableError, TableResult,
};

use super::design::ComponentSurfaceDesign;
use super::layout::{self, AccordianDirection, ContainerLayout};
use super::strategy::ComponentStrategy;

/// Ids of the strategies and designs registered by `with_defaults`.
pub mod defaults {
    /// Playing card: face and back, dragged singly.
    pub const CARD: &str = "card";
    /// Card pile: stacked container accepting drops.
    pub const CARD_PILE: &str = "card_pile";
    /// The root container of every table.
    pub const TABLETOP: &str = "tabletop";
    /// Featureless leaf component.
    pub const NULL_COMPONENT: &str = "null_component";
    /// Featureless absolute-layout container.
    pub const NULL_CONTAINER: &str = "null_container";
    /// Holder for components in flight during a drag.
    pub const MOBILE: &str = "mobile";

    pub const CARD_BACK_DESIGN: &str = "card.back";
    pub const CARD_FACE_DESIGN: &str = "card.face";
    pub const CARD_PILE_BASE_DESIGN: &str = "card_pile.base";
    pub const TABLETOP_DESIGN: &str = "tabletop.default";
    pub const NULL_COMPONENT_DESIGN: &str = "null_component.default";
    pub const NULL_CONTAINER_DESIGN: &str = "null_container.default";
    pub const MOBILE_DESIGN: &str = "mobile.default";
}

/// Size of a standard playing card.
pub const CARD_SIZE: Dimension = Dimension::new(71, 96);
/// Size of a card pile base.
pub const CARD_PILE_BASE_SIZE: Dimension = Dimension::new(79, 103);
/// Size of the featureless test component.
pub const NULL_COMPONENT_SIZE: Dimension = Dimension::new(32, 32);
/// The tabletop covers (almost) the whole coordinate space.
pub const TABLETOP_SIZE: Dimension = Dimension::new(i32::MAX, i32::MAX);
/// Top-left corner of the tabletop.
pub const TABLETOP_LOCATION: Point = Point::new(i32::MIN / 2, i32::MIN / 2);

/// Registry of everything components are built from.
///
/// ## Example
///
/// ```
/// use rust_tabletop::core::{ComponentOrientation, ComponentStrategyId, Dimension};
/// use rust_tabletop::strategies::{ComponentRegistry, ComponentStrategy, ComponentSurfaceDesign};
///
/// let mut registry = ComponentRegistry::new();
/// registry.register_surface_design(ComponentSurfaceDesign::new("chip", Dimension::new(20, 20)));
/// registry.register_strategy(
///     ComponentStrategy::component("chip", "Poker chip")
///         .with_surface_design(ComponentOrientation::Default, "chip"),
/// );
///
/// let found = registry.strategy(&ComponentStrategyId::new("chip")).unwrap();
/// assert_eq!(found.name, "Poker chip");
/// assert!(registry.strategy(&ComponentStrategyId::new("dice")).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ComponentRegistry {
    strategies: FxHashMap<ComponentStrategyId, Arc<ComponentStrategy>>,
    layouts: FxHashMap<ContainerLayoutId, ContainerLayout>,
    surface_designs: FxHashMap<ComponentSurfaceDesignId, ComponentSurfaceDesign>,
}

impl ComponentRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in strategies, layouts and designs.
    #[must_use]
    pub fn with_defaults() -> Self {
        use defaults::*;
        let (back, face, default) = (
            ComponentOrientation::Back,
            ComponentOrientation::Face,
            ComponentOrientation::Default,
        );

        let mut registry = Self::new();

        registry.register_layout(ContainerLayout::absolute());
        registry.register_layout(ContainerLayout::stacked());
        for direction in [
            AccordianDirection::Up,
            AccordianDirection::Down,
            AccordianDirection::Left,
            AccordianDirection::Right,
        ] {
            registry.register_layout(ContainerLayout::accordian(direction));
        }

        registry.register_surface_design(ComponentSurfaceDesign::new(CARD_BACK_DESIGN, CARD_SIZE));
        registry.register_surface_design(ComponentSurfaceDesign::new(CARD_FACE_DESIGN, CARD_SIZE));
        registry.register_surface_design(ComponentSurfaceDesign::new(CARD_PILE_BASE_DESIGN, CARD_PILE_BASE_SIZE));
        registry.register_surface_design(ComponentSurfaceDesign::new(TABLETOP_DESIGN, TABLETOP_SIZE));
        registry.register_surface_design(ComponentSurfaceDesign::new(NULL_COMPONENT_DESIGN, NULL_COMPONENT_SIZE));
        registry.register_surface_design(ComponentSurfaceDesign::new(NULL_CONTAINER_DESIGN, Dimension::zero()));
        registry.register_surface_design(ComponentSurfaceDesign::new(MOBILE_DESIGN, Dimension::zero()));

        registry.register_strategy(
            ComponentStrategy::component(CARD, "Card")
                .with_orientations(&[back, face], back)
                .with_surface_design(back, CARD_BACK_DESIGN)
                .with_surface_design(face, CARD_FACE_DESIGN),
        );
        registry.register_strategy(
            ComponentStrategy::container(CARD_PILE, "Card pile", layout::STACKED)
                .with_surface_design(default, CARD_PILE_BASE_DESIGN)
                .drag_components_above()
                .accepting_drops(),
        );
        registry.register_strategy(
            ComponentStrategy::container(TABLETOP, "Tabletop", layout::ABSOLUTE)
                .with_surface_design(default, TABLETOP_DESIGN)
                .with_location(TABLETOP_LOCATION)
                .fixed()
                .accepting_drops(),
        );
        registry.register_strategy(
            ComponentStrategy::component(NULL_COMPONENT, "Null component")
                .with_surface_design(default, NULL_COMPONENT_DESIGN),
        );
        registry.register_strategy(
            ComponentStrategy::container(NULL_CONTAINER, "Null container", layout::ABSOLUTE)
                .with_surface_design(default, NULL_CONTAINER_DESIGN)
                .accepting_drops(),
        );
        registry.register_strategy(
            ComponentStrategy::container(MOBILE, "Mobile", layout::ABSOLUTE)
                .with_surface_design(default, MOBILE_DESIGN)
                .fixed(),
        );

        registry
    }

    /// Register a strategy.
    ///
    /// Panics if a strategy with the same ID already exists.
    pub fn register_strategy(&mut self, strategy: ComponentStrategy) {
        if self.strategies.contains_key(&strategy.id) {
            panic!("Component strategy {} already registered", strategy.id);
        }
        self.strategies.insert(strategy.id.clone(), Arc::new(strategy));
    }

    /// Register a layout.
    ///
    /// Panics if a layout with the same ID already exists.
    pub fn register_layout(&mut self, layout: ContainerLayout) {
        if self.layouts.contains_key(layout.id()) {
            panic!("Container layout {} already registered", layout.id());
        }
        self.layouts.insert(layout.id().clone(), layout);
    }

    /// Register a surface design.
    ///
    /// Panics if a design with the same ID already exists.
    pub fn register_surface_design(&mut self, design: ComponentSurfaceDesign) {
        if self.surface_designs.contains_key(&design.id) {
            panic!("Surface design {} already registered", design.id);
        }
        self.surface_designs.insert(design.id.clone(), design);
    }

    /// Look up a strategy.
    pub fn strategy(&self, id: &ComponentStrategyId) -> TableResult<Arc<ComponentStrategy>> {
        self.strategies
            .get(id)
            .cloned()
            .ok_or_else(|| TableError::NoSuchComponentStrategy(id.clone()))
    }

    /// Look up a layout.
    pub fn layout(&self, id: &ContainerLayoutId) -> TableResult<ContainerLayout> {
        self.layouts
            .get(id)
            .cloned()
            .ok_or_else(|| TableError::NoSuchContainerLayout(id.clone()))
    }

    /// Look up a surface design.
    pub fn surface_design(&self, id: &ComponentSurfaceDesignId) -> TableResult<ComponentSurfaceDesign> {
        self.surface_designs
            .get(id)
            .cloned()
            .ok_or_else(|| TableError::NoSuchSurfaceDesign(id.clone()))
    }

    /// Check that `design` is registered under its id, unchanged.
    ///
    /// Components only hold registered values, so mementos can store ids.
    pub fn check_surface_design(&self, design: &ComponentSurfaceDesign) -> TableResult<()> {
        match self.surface_designs.get(&design.id) {
            Some(registered) if registered == design => Ok(()),
            _ => Err(TableError::NoSuchSurfaceDesign(design.id.clone())),
        }
    }

    /// Check that `layout` is registered under its id, unchanged.
    pub fn check_layout(&self, layout: &ContainerLayout) -> TableResult<()> {
        match self.layouts.get(layout.id()) {
            Some(registered) if registered == layout => Ok(()),
            _ => Err(TableError::NoSuchContainerLayout(layout.id().clone())),
        }
    }

    /// Iterate over all strategies.
    pub fn strategies(&self) -> impl Iterator<Item = &Arc<ComponentStrategy>> {
        self.strategies.values()
    }

    /// Iterate over all layouts.
    pub fn layouts(&self) -> impl Iterator<Item = &ContainerLayout> {
        self.layouts.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_consistent() {
        let registry = ComponentRegistry::with_defaults();

        // Every default design and layout referenced by a strategy resolves.
        for strategy in registry.strategies() {
            for (orientation, design) in &strategy.default_surface_designs {
                assert!(strategy.supports(*orientation));
                assert!(registry.surface_design(design).is_ok(), "{} missing {}", strategy.id, design);
            }
            assert!(strategy.default_surface_design(strategy.default_orientation).is_some());
            if let Some(layout) = &strategy.default_layout {
                assert!(registry.layout(layout).is_ok());
            }
        }
        assert_eq!(registry.layouts().count(), 6);
    }

    #[test]
    fn test_lookup_errors_carry_id() {
        let registry = ComponentRegistry::new();

        assert_eq!(
            registry.strategy(&ComponentStrategyId::new("dice")).unwrap_err(),
            TableError::NoSuchComponentStrategy(ComponentStrategyId::new("dice"))
        );
        assert_eq!(
            registry.layout(&ContainerLayoutId::new("spiral")).unwrap_err(),
            TableError::NoSuchContainerLayout(ContainerLayoutId::new("spiral"))
        );
        assert_eq!(
            registry.surface_design(&ComponentSurfaceDesignId::new("x")).unwrap_err(),
            TableError::NoSuchSurfaceDesign(ComponentSurfaceDesignId::new("x"))
        );
    }

    #[test]
    fn test_check_rejects_unregistered_values() {
        let registry = ComponentRegistry::with_defaults();

        let card_back = ComponentSurfaceDesign::new(defaults::CARD_BACK_DESIGN, CARD_SIZE);
        assert!(registry.check_surface_design(&card_back).is_ok());
        let resized = ComponentSurfaceDesign::new(defaults::CARD_BACK_DESIGN, Dimension::new(142, 192));
        assert_eq!(
            registry.check_surface_design(&resized).unwrap_err(),
            TableError::NoSuchSurfaceDesign(ComponentSurfaceDesignId::new(defaults::CARD_BACK_DESIGN))
        );

        assert!(registry.check_layout(&ContainerLayout::stacked()).is_ok());
        let wide = ContainerLayout::new(
            layout::STACKED,
            layout::LayoutKind::Stacked {
                step: Dimension::new(20, 20),
                max_steps: 10,
            },
        );
        assert_eq!(
            registry.check_layout(&wide).unwrap_err(),
            TableError::NoSuchContainerLayout(ContainerLayoutId::new(layout::STACKED))
        );
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_strategy_panics() {
        let mut registry = ComponentRegistry::new();
        registry.register_strategy(ComponentStrategy::component("a", "A"));
        registry.register_strategy(ComponentStrategy::component("a", "A again"));
    }

    #[test]
    fn test_card_strategy() {
        let registry = ComponentRegistry::with_defaults();
        let card = registry.strategy(&ComponentStrategyId::new(defaults::CARD)).unwrap();

        assert!(!card.is_container());
        assert_eq!(card.default_orientation, ComponentOrientation::Back);
        assert!(card.supports(ComponentOrientation::Face));
        assert!(!card.supports(ComponentOrientation::Default));
    }
}
