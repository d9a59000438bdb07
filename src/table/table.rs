//! `Table`: the root of a component tree.

use std::fmt;
use std::sync::Arc;

use crate::components::{Component, Container};
use crate::core::{ComponentPath, MementoError, Point, TableId, TableResult};
use crate::environment::scene::Release;
use crate::environment::TableEnvironment;
use crate::memento::{self, TableMemento};

use super::drag::DragContext;

pub(crate) struct TableInner {
    env: TableEnvironment,
    id: TableId,
    tabletop: Container,
}

impl Drop for TableInner {
    fn drop(&mut self) {
        self.env.release(Release::Table {
            id: self.id,
            tabletop: self.tabletop.id(),
        });
    }
}

/// A table: a tabletop container plus drag-and-drop and snapshots.
///
/// `Table` is a handle; clones refer to the same table. Components reach
/// their table through `Component::table` for as long as any handle to it
/// is alive.
#[derive(Clone)]
pub struct Table {
    inner: Arc<TableInner>,
}

impl Table {
    pub(crate) fn create(env: &TableEnvironment) -> TableResult<Self> {
        let tabletop = env.create_container(&env.config().tabletop_strategy)?;
        let tabletop_id = tabletop.id();
        let inner = Arc::new_cyclic(|weak| {
            let id = env.write(|scene| scene.insert_table(tabletop_id, weak.clone()));
            TableInner {
                env: env.clone(),
                id,
                tabletop,
            }
        });
        tracing::debug!(table = %inner.id, tabletop = %tabletop_id, "table created");
        Ok(Self { inner })
    }

    pub(crate) fn from_inner(inner: Arc<TableInner>) -> Self {
        Self { inner }
    }

    #[must_use]
    pub fn id(&self) -> TableId {
        self.inner.id
    }

    #[must_use]
    pub fn table_environment(&self) -> &TableEnvironment {
        &self.inner.env
    }

    /// The root container. Its path is `ComponentPath::root()`.
    #[must_use]
    pub fn tabletop(&self) -> Container {
        self.inner.tabletop.clone()
    }

    /// The component at `path`.
    ///
    /// Panics if `path` does not address a component of this table.
    #[must_use]
    pub fn component(&self, path: &ComponentPath) -> Component {
        let env = self.table_environment();
        let table = self.id();
        let tabletop = self.inner.tabletop.id();
        let handle = env.write(|scene| {
            let indices = path.indices();
            assert!(indices[0] == 0, "Path {} does not address a component of {}", path, table);
            let mut current = tabletop;
            for &index in &indices[1..] {
                current = scene
                    .node(current)
                    .content
                    .as_ref()
                    .and_then(|content| content.children.get(index).copied())
                    .unwrap_or_else(|| panic!("Path {} does not address a component of {}", path, table));
            }
            scene.handle(env, current)
        });
        Component::from_handle(handle)
    }

    /// The topmost component under `location`.
    #[must_use]
    pub fn component_at(&self, location: Point) -> Option<Component> {
        let tabletop = self.inner.tabletop.id();
        let top = self
            .table_environment()
            .read(|scene| scene.components_at(tabletop, location).last().copied())?;
        Some(self.table_environment().component(top))
    }

    /// Every component under `location`, bottom to top, tabletop first.
    ///
    /// Each container decides which of its children count as hit, so a
    /// stacked pile reports only its top card.
    #[must_use]
    pub fn components_at(&self, location: Point) -> Vec<Component> {
        let env = self.table_environment();
        let tabletop = self.inner.tabletop.id();
        env.write(|scene| {
            scene
                .components_at(tabletop, location)
                .into_iter()
                .map(|id| Component::from_handle(scene.handle(env, id)))
                .collect()
        })
    }

    // === Drag-and-drop ===

    /// Start dragging `component`, grabbed at `location`.
    ///
    /// Returns `Ok(None)` if the component is fixed in place. Fails if
    /// another drag is in progress or the component has no container (the
    /// tabletop). Panics if `component` is not on this table.
    pub fn begin_drag(&self, location: Point, component: &Component) -> TableResult<Option<DragContext>> {
        DragContext::begin(self, location, component)
    }

    /// Check if a drag started on this table is still in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        let id = self.id();
        self.table_environment().read(|scene| scene.table_state(id).drag_active)
    }

    pub(crate) fn set_dragging(&self, active: bool) {
        let id = self.id();
        self.table_environment()
            .write(|scene| scene.table_state_mut(id).drag_active = active);
    }

    /// The container a drop at `location` lands in.
    pub(crate) fn drop_target(&self, location: Point, exclude: &Container) -> Container {
        let env = self.table_environment();
        let (tabletop, exclude) = (self.inner.tabletop.id(), exclude.id());
        let handle = env.write(|scene| {
            let target = scene.drop_target(tabletop, location, exclude);
            scene.handle(env, target)
        });
        Container::from_component(Component::from_handle(handle))
    }

    // === Snapshots ===

    /// Snapshot of the whole table.
    #[must_use]
    pub fn create_memento(&self) -> TableMemento {
        let tabletop = self.inner.tabletop.id();
        self.table_environment()
            .read(|scene| memento::snapshot_table(scene, tabletop))
    }

    /// Replace the table's contents with `memento`.
    ///
    /// The memento is fully validated first; on error the table is unchanged.
    /// Fails with `MementoError::IllegalState` while a drag is in progress.
    pub fn set_memento(&self, memento: &TableMemento) -> Result<(), MementoError> {
        memento::restore_table(self, memento)
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Table {}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("id", &self.inner.id)
            .field("tabletop", &self.inner.tabletop.id())
            .finish()
    }
}
