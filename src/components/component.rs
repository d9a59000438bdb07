//! `Component`: a handle to one piece on (or off) a table.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::{ComponentId, ComponentOrientation, ComponentPath, Dimension, Point, Rectangle, TableResult};
use crate::environment::scene::Release;
use crate::environment::TableEnvironment;
use crate::memento::{self, Memento};
use crate::strategies::{ComponentStrategy, ComponentSurfaceDesign};
use crate::table::Table;

use super::container::Container;
use super::listener::ComponentListener;

/// Shared by every clone of one `Component`. There is at most one live
/// `ComponentHandle` per component.
pub(crate) struct ComponentHandle {
    env: TableEnvironment,
    id: ComponentId,
}

impl ComponentHandle {
    pub(crate) fn new(env: TableEnvironment, id: ComponentId) -> Self {
        Self { env, id }
    }
}

impl Drop for ComponentHandle {
    fn drop(&mut self) {
        self.env.release(Release::Component(self.id));
    }
}

/// A component in a table environment.
///
/// `Component` is a handle: clones refer to the same component, and
/// equality is identity. The component stays alive while it has a container,
/// is a tabletop, or some handle refers to it.
///
/// Every method takes the environment lock for its own duration.
#[derive(Clone)]
pub struct Component {
    handle: Arc<ComponentHandle>,
}

impl Component {
    pub(crate) fn from_handle(handle: Arc<ComponentHandle>) -> Self {
        Self { handle }
    }

    /// Arena id. Unique within the environment.
    #[must_use]
    pub fn id(&self) -> ComponentId {
        self.handle.id
    }

    /// The environment that created this component.
    #[must_use]
    pub fn table_environment(&self) -> &TableEnvironment {
        &self.handle.env
    }

    fn env(&self) -> &TableEnvironment {
        &self.handle.env
    }

    #[must_use]
    pub fn strategy(&self) -> Arc<ComponentStrategy> {
        let id = self.id();
        self.env().read(|scene| Arc::clone(&scene.node(id).strategy))
    }

    #[must_use]
    pub fn is_container(&self) -> bool {
        self.strategy().is_container()
    }

    /// This component as a container, if it is one.
    #[must_use]
    pub fn as_container(&self) -> Option<Container> {
        self.is_container().then(|| Container::from_component(self.clone()))
    }

    // === Geometry ===

    /// Bounds in table coordinates. For containers this covers every child.
    #[must_use]
    pub fn bounds(&self) -> Rectangle {
        let id = self.id();
        self.env().read(|scene| scene.bounds(id))
    }

    /// Top-left corner of the bounds.
    #[must_use]
    pub fn location(&self) -> Point {
        self.bounds().location()
    }

    #[must_use]
    pub fn size(&self) -> Dimension {
        self.bounds().size()
    }

    /// Anchor point. Equal to the location for leaf components; for
    /// containers, the point children are laid out from.
    #[must_use]
    pub fn origin(&self) -> Point {
        let id = self.id();
        self.env().read(|scene| scene.node(id).origin)
    }

    /// Move so the bounds start at `location`. Children move along.
    pub fn set_location(&self, location: Point) {
        let id = self.id();
        self.env().mutate(|scene, notes| scene.set_location(id, location, notes));
    }

    /// Move so the origin sits at `origin`. Children move along.
    pub fn set_origin(&self, origin: Point) {
        let id = self.id();
        self.env().mutate(|scene, notes| scene.set_origin(id, origin, notes));
    }

    // === Orientation and designs ===

    #[must_use]
    pub fn orientation(&self) -> ComponentOrientation {
        let id = self.id();
        self.env().read(|scene| scene.node(id).orientation)
    }

    #[must_use]
    pub fn supported_orientations(&self) -> SmallVec<[ComponentOrientation; 2]> {
        self.strategy().supported_orientations.clone()
    }

    /// Turn the component. Fails if the strategy does not support `orientation`.
    pub fn set_orientation(&self, orientation: ComponentOrientation) -> TableResult<()> {
        let id = self.id();
        self.env().mutate(|scene, notes| scene.set_orientation(id, orientation, notes))
    }

    #[must_use]
    pub fn surface_design(&self, orientation: ComponentOrientation) -> Option<ComponentSurfaceDesign> {
        let id = self.id();
        self.env().read(|scene| scene.node(id).surface_designs.get(&orientation).cloned())
    }

    #[must_use]
    pub fn surface_designs(&self) -> FxHashMap<ComponentOrientation, ComponentSurfaceDesign> {
        let id = self.id();
        self.env().read(|scene| scene.node(id).surface_designs.clone())
    }

    /// Set the design for `orientation`.
    ///
    /// Fails if the orientation is unsupported, or if `design` is not
    /// registered in the environment's registry under its id.
    pub fn set_surface_design(
        &self,
        orientation: ComponentOrientation,
        design: ComponentSurfaceDesign,
    ) -> TableResult<()> {
        self.env().registry().check_surface_design(&design)?;
        let id = self.id();
        self.env()
            .mutate(|scene, notes| scene.set_surface_design(id, orientation, design, notes))
    }

    /// Replace several designs at once. Nothing changes if any orientation
    /// is unsupported or any design is unregistered.
    pub fn set_surface_designs(
        &self,
        designs: &FxHashMap<ComponentOrientation, ComponentSurfaceDesign>,
    ) -> TableResult<()> {
        for design in designs.values() {
            self.env().registry().check_surface_design(design)?;
        }
        let id = self.id();
        self.env().mutate(|scene, notes| {
            for &orientation in designs.keys() {
                scene.check_surface_design(id, orientation)?;
            }
            let mut entries: Vec<_> = designs.iter().collect();
            entries.sort_by_key(|(orientation, _)| **orientation);
            for (&orientation, design) in entries {
                scene.set_surface_design(id, orientation, design.clone(), notes)?;
            }
            Ok(())
        })
    }

    // === Placement ===

    /// The container holding this component.
    #[must_use]
    pub fn container(&self) -> Option<Container> {
        let id = self.id();
        let env = self.env();
        env.write(|scene| scene.node(id).parent.map(|parent| scene.handle(env, parent)))
            .map(|handle| Container::from_component(Component::from_handle(handle)))
    }

    /// The table this component is on, if any.
    #[must_use]
    pub fn table(&self) -> Option<Table> {
        let id = self.id();
        self.env()
            .read(|scene| scene.table_of(id).and_then(|table| scene.table_handle(table)))
            .map(Table::from_inner)
    }

    /// Location in the table's tree, or `None` if not on a table.
    #[must_use]
    pub fn path(&self) -> Option<ComponentPath> {
        let id = self.id();
        self.env().read(|scene| scene.path(id))
    }

    // === Listeners ===

    /// Register a listener. Fails if this listener is already registered.
    pub fn add_component_listener(&self, listener: Arc<dyn ComponentListener>) -> TableResult<()> {
        let id = self.id();
        self.env().write(|scene| scene.add_component_listener(id, listener))
    }

    /// Unregister a listener. Fails if it is not registered.
    pub fn remove_component_listener(&self, listener: &Arc<dyn ComponentListener>) -> TableResult<()> {
        let id = self.id();
        self.env().write(|scene| scene.remove_component_listener(id, listener))
    }

    // === State ===

    /// Snapshot of this component and, for containers, its subtree.
    #[must_use]
    pub fn create_memento(&self) -> Memento {
        let id = self.id();
        self.env().read(|scene| memento::snapshot(scene, id))
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.env().same(other.env()) && self.id() == other.id()
    }
}

impl Eq for Component {}

impl Hash for Component {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Component").field(&self.id()).finish()
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TableError;
    use crate::core::TableEnvironmentConfig;
    use crate::strategies::registry::CARD_SIZE;
    use crate::strategies::ComponentRegistry;

    #[test]
    fn test_card_defaults() {
        let env = TableEnvironment::new();
        let card = env.create_card().unwrap();

        assert!(!card.is_container());
        assert!(card.as_container().is_none());
        assert_eq!(card.orientation(), ComponentOrientation::Back);
        assert_eq!(card.location(), Point::origin());
        assert_eq!(card.size(), CARD_SIZE);
        assert!(card.container().is_none());
        assert!(card.table().is_none());
        assert!(card.path().is_none());
    }

    #[test]
    fn test_set_location_moves_bounds() {
        let env = TableEnvironment::new();
        let card = env.create_card().unwrap();

        card.set_location(Point::new(10, -4));
        assert_eq!(card.bounds(), Rectangle::new(10, -4, 71, 96));
        assert_eq!(card.origin(), Point::new(10, -4));
    }

    #[test]
    fn test_unsupported_orientation_is_rejected() {
        let env = TableEnvironment::new();
        let card = env.create_card().unwrap();

        let err = card.set_orientation(ComponentOrientation::Default).unwrap_err();
        assert!(matches!(err, TableError::IllegalArgument(_)));
        assert_eq!(card.orientation(), ComponentOrientation::Back);
    }

    #[test]
    fn test_handles_compare_by_identity() {
        let env = TableEnvironment::new();
        let a = env.create_card().unwrap();
        let b = env.create_card().unwrap();

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_surface_design_change_resizes() {
        let big = ComponentSurfaceDesign::new("card.back.big", Dimension::new(142, 192));
        let mut registry = ComponentRegistry::with_defaults();
        registry.register_surface_design(big.clone());
        let env = TableEnvironment::with_config(TableEnvironmentConfig::new().with_registry(registry));
        let card = env.create_card().unwrap();

        card.set_surface_design(ComponentOrientation::Back, big.clone()).unwrap();
        assert_eq!(card.size(), Dimension::new(142, 192));
        assert_eq!(card.surface_design(ComponentOrientation::Back), Some(big));
        // The face is untouched.
        assert_eq!(
            card.surface_design(ComponentOrientation::Face).map(|d| d.size),
            Some(CARD_SIZE)
        );
    }
}
