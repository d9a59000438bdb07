//! `Container`: a component holding an ordered stack of children.
//!
//! Child index 0 is the bottom of the z-order; the last child is on top.
//! Adding appends on top unless an index is given. Whenever the children
//! change, the container's layout repositions them.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::core::{ComponentId, ComponentPath, Point, TableError, TableResult};
use crate::environment::scene::Scene;
use crate::strategies::ContainerLayout;

use super::component::Component;
use super::listener::ContainerListener;

/// A component that holds other components.
///
/// Dereferences to `Component` for everything containers share with leaf
/// components.
///
/// ```
/// use rust_tabletop::environment::TableEnvironment;
///
/// let env = TableEnvironment::new();
/// let pile = env.create_card_pile().unwrap();
/// let (a, b) = (env.create_card().unwrap(), env.create_card().unwrap());
///
/// pile.add_components(&[a.clone(), b.clone()]).unwrap();
/// assert_eq!(pile.component_count(), 2);
/// assert_eq!(pile.component(1), b);
///
/// assert_eq!(pile.remove_all_components(), vec![a, b]);
/// assert_eq!(pile.component_count(), 0);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Container {
    component: Component,
}

impl Container {
    /// Callers guarantee `component` is a container.
    pub(crate) fn from_component(component: Component) -> Self {
        Self { component }
    }

    #[must_use]
    pub fn as_component(&self) -> &Component {
        &self.component
    }

    #[must_use]
    pub fn into_component(self) -> Component {
        self.component
    }

    // === Adding ===

    /// Add `component` on top.
    pub fn add_component(&self, component: &Component) -> TableResult<()> {
        self.attach(None, std::slice::from_ref(component))
    }

    /// Add `components` on top, the first one lowest.
    pub fn add_components(&self, components: &[Component]) -> TableResult<()> {
        self.attach(None, components)
    }

    /// Insert `component` at `index`. Panics if `index > component_count()`.
    pub fn insert_component(&self, index: usize, component: &Component) -> TableResult<()> {
        self.attach(Some(index), std::slice::from_ref(component))
    }

    /// Insert `components` starting at `index`, the first one lowest.
    pub fn insert_components(&self, index: usize, components: &[Component]) -> TableResult<()> {
        self.attach(Some(index), components)
    }

    fn attach(&self, index: Option<usize>, components: &[Component]) -> TableResult<()> {
        let env = self.table_environment();
        if let Some(foreign) = components.iter().find(|c| !env.same(c.table_environment())) {
            return Err(TableError::illegal_argument(format!(
                "{} was created by a different table environment",
                foreign
            )));
        }

        let container = self.id();
        let ids: SmallVec<[ComponentId; 8]> = components.iter().map(Component::id).collect();
        env.mutate(|scene, notes| {
            let count = scene.content(container).children.len();
            let index = index.unwrap_or(count);
            assert!(
                index <= count,
                "Index {} out of range for {} with {} components",
                index,
                container,
                count
            );
            scene.check_new_children(container, &ids)?;
            scene.insert_children(container, index, &ids, notes);
            Ok(())
        })
    }

    // === Removing ===

    /// Remove `component`. Panics if it is not a child of this container.
    pub fn remove_component(&self, component: &Component) {
        let container = self.id();
        let child = component.id();
        let same_env = self.table_environment().same(component.table_environment());
        self.table_environment().mutate(|scene, notes| {
            let index = same_env
                .then(|| scene.child_index(container, child))
                .flatten()
                .unwrap_or_else(|| panic!("{} is not a child of {}", child, container));
            scene.remove_children(container, index, index + 1, notes);
        });
    }

    /// Remove every child. Returns them bottom to top.
    pub fn remove_all_components(&self) -> Vec<Component> {
        self.remove_from(|_, _| 0)
    }

    /// Remove the child at `index` and every child above it.
    ///
    /// Returns them bottom to top. Panics if `index > component_count()`.
    pub fn remove_components_from(&self, index: usize) -> Vec<Component> {
        self.remove_from(|_, _| index)
    }

    /// Remove the topmost child under `location` and every child above it.
    ///
    /// Returns them bottom to top; empty if nothing is under `location`.
    pub fn remove_components_at(&self, location: Point) -> Vec<Component> {
        let container = self.id();
        self.remove_from(|scene, count| scene.component_index_at(container, location).unwrap_or(count))
    }

    /// Remove the children from the index chosen by `start` up to the top.
    fn remove_from(&self, start: impl FnOnce(&Scene, usize) -> usize) -> Vec<Component> {
        let env = self.table_environment();
        let container = self.id();
        env.mutate(|scene, notes| {
            let count = scene.content(container).children.len();
            let start = start(scene, count);
            let removed = scene.remove_children(container, start, count, notes);
            removed
                .into_iter()
                .map(|id| Component::from_handle(scene.handle(env, id)))
                .collect()
        })
    }

    // === Queries ===

    /// The child at `index`. Panics if out of range.
    #[must_use]
    pub fn component(&self, index: usize) -> Component {
        let env = self.table_environment();
        let container = self.id();
        let handle = env.write(|scene| {
            let children = &scene.content(container).children;
            assert!(
                index < children.len(),
                "Index {} out of range for {} with {} components",
                index,
                container,
                children.len()
            );
            let child = children[index];
            scene.handle(env, child)
        });
        Component::from_handle(handle)
    }

    #[must_use]
    pub fn component_count(&self) -> usize {
        let container = self.id();
        self.table_environment()
            .read(|scene| scene.content(container).children.len())
    }

    /// Every child, bottom to top.
    #[must_use]
    pub fn components(&self) -> Vec<Component> {
        let env = self.table_environment();
        let container = self.id();
        env.write(|scene| {
            let children = scene.content(container).children.clone();
            children
                .into_iter()
                .map(|id| Component::from_handle(scene.handle(env, id)))
                .collect()
        })
    }

    /// Index of `component`, or `None` if it is not a child.
    #[must_use]
    pub fn component_index(&self, component: &Component) -> Option<usize> {
        if !self.table_environment().same(component.table_environment()) {
            return None;
        }
        let (container, child) = (self.id(), component.id());
        self.table_environment()
            .read(|scene| scene.child_index(container, child))
    }

    /// Index of the topmost child under `location`, as the layout sees it.
    #[must_use]
    pub fn component_index_at(&self, location: Point) -> Option<usize> {
        let container = self.id();
        self.table_environment()
            .read(|scene| scene.component_index_at(container, location))
    }

    /// Path of `component` within this container.
    ///
    /// `None` if this container is not on a table. Panics if it is on a
    /// table and `component` is not one of its children.
    #[must_use]
    pub fn child_path(&self, component: &Component) -> Option<ComponentPath> {
        let container = self.id();
        if !self.table_environment().same(component.table_environment()) {
            let path = self.path()?;
            panic!("{} is not a child of {} at {}", component, container, path);
        }
        let child = component.id();
        self.table_environment()
            .read(|scene| scene.child_path(container, child))
    }

    // === Layout ===

    #[must_use]
    pub fn layout(&self) -> ContainerLayout {
        let container = self.id();
        self.table_environment()
            .read(|scene| scene.content(container).layout.clone())
    }

    /// Switch layouts and reposition the children.
    ///
    /// Fails if `layout` is not registered under its id in the
    /// environment's registry.
    pub fn set_layout(&self, layout: ContainerLayout) -> TableResult<()> {
        self.table_environment().registry().check_layout(&layout)?;
        let container = self.id();
        self.table_environment()
            .mutate(|scene, notes| scene.set_layout(container, layout, notes));
        Ok(())
    }

    /// Put the children in random order using the environment's RNG.
    pub fn shuffle(&self) {
        let container = self.id();
        self.table_environment()
            .mutate(|scene, notes| scene.shuffle(container, notes));
    }

    // === Listeners ===

    /// Register a listener. Fails if this listener is already registered.
    pub fn add_container_listener(&self, listener: Arc<dyn ContainerListener>) -> TableResult<()> {
        let container = self.id();
        self.table_environment()
            .write(|scene| scene.add_container_listener(container, listener))
    }

    /// Unregister a listener. Fails if it is not registered.
    pub fn remove_container_listener(&self, listener: &Arc<dyn ContainerListener>) -> TableResult<()> {
        let container = self.id();
        self.table_environment()
            .write(|scene| scene.remove_container_listener(container, listener))
    }
}

impl Deref for Container {
    type Target = Component;

    fn deref(&self) -> &Component {
        &self.component
    }
}

impl From<Container> for Component {
    fn from(container: Container) -> Self {
        container.component
    }
}

impl PartialEq<Component> for Container {
    fn eq(&self, other: &Component) -> bool {
        self.component == *other
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Container").field(&self.id()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::TableEnvironment;
    use crate::strategies::layout::DEFAULT_STACK_STEP;

    #[test]
    fn test_add_appends_on_top() {
        let env = TableEnvironment::new();
        let pile = env.create_card_pile().unwrap();
        let cards: Vec<_> = (0..3).map(|_| env.create_card().unwrap()).collect();

        for card in &cards {
            pile.add_component(card).unwrap();
        }
        assert_eq!(pile.components(), cards);
        assert_eq!(cards[2].container().as_ref(), Some(&pile));
    }

    #[test]
    fn test_stacked_layout_positions_children() {
        let env = TableEnvironment::new();
        let pile = env.create_card_pile().unwrap();
        pile.set_origin(Point::new(100, 100));
        let cards: Vec<_> = (0..2).map(|_| env.create_card().unwrap()).collect();

        pile.add_components(&cards).unwrap();
        assert_eq!(cards[0].location(), Point::new(100, 100));
        assert_eq!(cards[1].location(), Point::new(100, 100).translate(DEFAULT_STACK_STEP));
    }

    #[test]
    fn test_remove_components_from_index() {
        let env = TableEnvironment::new();
        let pile = env.create_card_pile().unwrap();
        let cards: Vec<_> = (0..4).map(|_| env.create_card().unwrap()).collect();
        pile.add_components(&cards).unwrap();

        let removed = pile.remove_components_from(2);
        assert_eq!(removed, cards[2..].to_vec());
        assert_eq!(pile.components(), cards[..2].to_vec());
        assert!(removed[0].container().is_none());
    }

    #[test]
    #[should_panic(expected = "is not a child of")]
    fn test_remove_non_member_panics() {
        let env = TableEnvironment::new();
        let pile = env.create_card_pile().unwrap();
        let card = env.create_card().unwrap();
        pile.remove_component(&card);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_component_index_out_of_range_panics() {
        let env = TableEnvironment::new();
        let pile = env.create_card_pile().unwrap();
        let _ = pile.component(0);
    }

    #[test]
    fn test_child_path_of_detached_container_is_none() {
        let env = TableEnvironment::new();
        let pile = env.create_card_pile().unwrap();
        let card = env.create_card().unwrap();

        // Not on a table: no path, even for a non-member.
        assert_eq!(pile.child_path(&card), None);
        pile.add_component(&card).unwrap();
        assert_eq!(pile.child_path(&card), None);
    }
}
