//! The component arena.
//!
//! Every component of an environment lives here as a `Node` keyed by its
//! `ComponentId`. Containers own an ordered list of child ids; children
//! point back at their container through `parent`, which is a plain id and
//! never an ownership edge.
//!
//! ## Rules
//!
//! - The scene is only reachable through `TableEnvironment`, which holds the
//!   environment lock and a `RefCell` borrow for the duration of a call.
//! - Mutators never call listeners. They append `Notification`s, which the
//!   environment dispatches after the borrow is released.
//! - A node is freed when it has no container, is not a tabletop, and no
//!   `Component` handle refers to it (see `collect`).

use std::sync::{Arc, Weak};

use im::Vector;
use rustc_hash::FxHashMap;
use smallvec::{smallvec, SmallVec};

use crate::components::component::ComponentHandle;
use crate::components::listener::{ComponentListener, ContainerListener};
use crate::core::{
    ComponentId, ComponentOrientation, ComponentPath, Dimension, Point, Rectangle, TableError, TableId,
    TableResult, TableRng,
};
use crate::strategies::{ComponentRegistry, ComponentStrategy, ComponentSurfaceDesign, ContainerLayout};
use crate::table::table::TableInner;

use super::TableEnvironment;

/// Ids along a parent chain. Trees are rarely deeper than a handful of levels.
pub(crate) type Lineage = SmallVec<[ComponentId; 8]>;

/// Children of a container node.
pub(crate) struct ContainerContent {
    /// Z-order: index 0 is the bottom.
    pub(crate) children: Vec<ComponentId>,
    pub(crate) layout: ContainerLayout,
    pub(crate) listeners: Vector<Arc<dyn ContainerListener>>,
}

/// One component in the arena.
pub(crate) struct Node {
    pub(crate) strategy: Arc<ComponentStrategy>,
    pub(crate) origin: Point,
    pub(crate) orientation: ComponentOrientation,
    pub(crate) surface_designs: FxHashMap<ComponentOrientation, ComponentSurfaceDesign>,
    pub(crate) parent: Option<ComponentId>,
    pub(crate) content: Option<ContainerContent>,
    /// Set while this node is the tabletop of a live table.
    pub(crate) table: Option<TableId>,
    pub(crate) listeners: Vector<Arc<dyn ComponentListener>>,
    pub(crate) handle: Weak<ComponentHandle>,
}

impl Node {
    /// Build a node with the strategy's defaults.
    pub(crate) fn new(strategy: Arc<ComponentStrategy>, registry: &ComponentRegistry) -> TableResult<Self> {
        let mut designs = FxHashMap::default();
        for (orientation, id) in &strategy.default_surface_designs {
            designs.insert(*orientation, registry.surface_design(id)?);
        }
        let layout = match &strategy.default_layout {
            Some(id) if strategy.is_container() => Some(registry.layout(id)?),
            _ => None,
        };
        let origin = strategy.default_location;
        let orientation = strategy.default_orientation;
        Ok(Self::restore(strategy, origin, orientation, designs, layout))
    }

    /// Build a node from explicit state.
    ///
    /// `layout` is ignored for non-container strategies and defaults to
    /// absolute for containers.
    pub(crate) fn restore(
        strategy: Arc<ComponentStrategy>,
        origin: Point,
        orientation: ComponentOrientation,
        surface_designs: FxHashMap<ComponentOrientation, ComponentSurfaceDesign>,
        layout: Option<ContainerLayout>,
    ) -> Self {
        let content = strategy.is_container().then(|| ContainerContent {
            children: Vec::new(),
            layout: layout.unwrap_or_else(ContainerLayout::absolute),
            listeners: Vector::new(),
        });
        Self {
            strategy,
            origin,
            orientation,
            surface_designs,
            parent: None,
            content,
            table: None,
            listeners: Vector::new(),
            handle: Weak::new(),
        }
    }

    /// Size of the design showing in the current orientation.
    pub(crate) fn base_size(&self) -> Dimension {
        self.surface_designs
            .get(&self.orientation)
            .map_or(Dimension::zero(), |design| design.size)
    }
}

/// Bookkeeping for a live table.
pub(crate) struct TableState {
    pub(crate) tabletop: ComponentId,
    pub(crate) drag_active: bool,
    pub(crate) handle: Weak<TableInner>,
}

/// A component-level change waiting to be dispatched.
pub(crate) enum ComponentChange {
    Bounds {
        old: Rectangle,
        new: Rectangle,
    },
    Orientation {
        old: ComponentOrientation,
        new: ComponentOrientation,
    },
    SurfaceDesign {
        orientation: ComponentOrientation,
        old: Option<ComponentSurfaceDesign>,
        new: ComponentSurfaceDesign,
    },
}

/// A container-level change waiting to be dispatched.
pub(crate) enum ContainerChange {
    Added { child: ComponentId, index: usize },
    Removed { child: ComponentId, index: usize },
    Layout { old: ContainerLayout, new: ContainerLayout },
    Reordered,
}

/// A change plus the listeners registered when it happened.
pub(crate) enum Notification {
    Component {
        listeners: Vector<Arc<dyn ComponentListener>>,
        source: ComponentId,
        change: ComponentChange,
    },
    Container {
        listeners: Vector<Arc<dyn ContainerListener>>,
        container: ComponentId,
        change: ContainerChange,
    },
}

pub(crate) type Notifications = Vec<Notification>;

/// Deferred handle release, for handles dropped while the scene is borrowed.
pub(crate) enum Release {
    Component(ComponentId),
    Table { id: TableId, tabletop: ComponentId },
}

/// The arena of one environment.
pub(crate) struct Scene {
    nodes: FxHashMap<ComponentId, Node>,
    tables: FxHashMap<TableId, TableState>,
    next_component_id: u64,
    next_table_id: u64,
    rng: TableRng,
}

impl Scene {
    pub(crate) fn new(seed: u64) -> Self {
        Self {
            nodes: FxHashMap::default(),
            tables: FxHashMap::default(),
            next_component_id: 0,
            next_table_id: 0,
            rng: TableRng::new(seed),
        }
    }

    // === Nodes ===

    pub(crate) fn insert_node(&mut self, node: Node) -> ComponentId {
        let id = ComponentId(self.next_component_id);
        self.next_component_id += 1;
        self.nodes.insert(id, node);
        id
    }

    pub(crate) fn contains(&self, id: ComponentId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub(crate) fn node(&self, id: ComponentId) -> &Node {
        self.nodes
            .get(&id)
            .unwrap_or_else(|| panic!("{} does not exist in this environment", id))
    }

    pub(crate) fn node_mut(&mut self, id: ComponentId) -> &mut Node {
        self.nodes
            .get_mut(&id)
            .unwrap_or_else(|| panic!("{} does not exist in this environment", id))
    }

    pub(crate) fn content(&self, id: ComponentId) -> &ContainerContent {
        self.node(id)
            .content
            .as_ref()
            .unwrap_or_else(|| panic!("{} is not a container", id))
    }

    fn content_mut(&mut self, id: ComponentId) -> &mut ContainerContent {
        self.node_mut(id)
            .content
            .as_mut()
            .unwrap_or_else(|| panic!("{} is not a container", id))
    }

    /// Handle for `id`, reusing the live one if there is one.
    pub(crate) fn handle(&mut self, env: &TableEnvironment, id: ComponentId) -> Arc<ComponentHandle> {
        let node = self.node_mut(id);
        if let Some(handle) = node.handle.upgrade() {
            return handle;
        }
        let handle = Arc::new(ComponentHandle::new(env.clone(), id));
        node.handle = Arc::downgrade(&handle);
        handle
    }

    pub(crate) fn release(&mut self, release: Release) {
        match release {
            Release::Component(id) => self.collect(id),
            Release::Table { id, tabletop } => self.remove_table(id, tabletop),
        }
    }

    /// Free `id` (and its unreferenced descendants) if nothing keeps it alive.
    pub(crate) fn collect(&mut self, id: ComponentId) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        if node.handle.strong_count() > 0 || node.parent.is_some() || node.table.is_some() {
            return;
        }
        let Some(node) = self.nodes.remove(&id) else {
            return;
        };
        tracing::trace!(component = %id, strategy = %node.strategy.id, "component released");

        if let Some(content) = node.content {
            for child in content.children {
                if let Some(child_node) = self.nodes.get_mut(&child) {
                    child_node.parent = None;
                }
                self.collect(child);
            }
        }
    }

    // === Geometry ===

    pub(crate) fn bounds(&self, id: ComponentId) -> Rectangle {
        let node = self.node(id);
        let base = Rectangle::from_parts(node.origin, node.base_size());
        match &node.content {
            Some(content) => content
                .children
                .iter()
                .fold(base, |bounds, &child| bounds.union(&self.bounds(child))),
            None => base,
        }
    }

    pub(crate) fn children_bounds(&self, container: ComponentId) -> SmallVec<[Rectangle; 8]> {
        self.content(container)
            .children
            .iter()
            .map(|&child| self.bounds(child))
            .collect()
    }

    /// Move `id` and its whole subtree by `offset`.
    fn translate(&mut self, id: ComponentId, offset: Dimension, notes: &mut Notifications) {
        if offset.is_zero() {
            return;
        }
        let old = self.bounds(id);
        let node = self.node_mut(id);
        node.origin = node.origin.translate(offset);
        let children = node.content.as_ref().map(|c| c.children.clone()).unwrap_or_default();
        for child in children {
            self.translate(child, offset, notes);
        }
        let new = self.bounds(id);
        if new != old {
            self.push_component_change(notes, id, ComponentChange::Bounds { old, new });
        }
    }

    /// Run `op`, then report bounds changes of the given nodes.
    fn track_bounds<R>(
        &mut self,
        ids: &[ComponentId],
        notes: &mut Notifications,
        op: impl FnOnce(&mut Self, &mut Notifications) -> R,
    ) -> R {
        let before: SmallVec<[(ComponentId, Rectangle); 8]> =
            ids.iter().map(|&id| (id, self.bounds(id))).collect();
        let result = op(self, notes);
        for (id, old) in before {
            if !self.contains(id) {
                continue;
            }
            let new = self.bounds(id);
            if new != old {
                self.push_component_change(notes, id, ComponentChange::Bounds { old, new });
            }
        }
        result
    }

    pub(crate) fn set_location(&mut self, id: ComponentId, location: Point, notes: &mut Notifications) {
        let offset = self.bounds(id).location().offset_to(location);
        let ancestors = self.ancestors(id);
        self.track_bounds(&ancestors, notes, |scene, notes| scene.translate(id, offset, notes));
    }

    pub(crate) fn set_origin(&mut self, id: ComponentId, origin: Point, notes: &mut Notifications) {
        let offset = self.node(id).origin.offset_to(origin);
        let ancestors = self.ancestors(id);
        self.track_bounds(&ancestors, notes, |scene, notes| scene.translate(id, offset, notes));
    }

    pub(crate) fn set_orientation(
        &mut self,
        id: ComponentId,
        orientation: ComponentOrientation,
        notes: &mut Notifications,
    ) -> TableResult<()> {
        let node = self.node(id);
        if !node.strategy.supports(orientation) {
            return Err(TableError::illegal_argument(format!(
                "orientation {} is not supported by {}",
                orientation, node.strategy.id
            )));
        }
        if node.orientation == orientation {
            return Ok(());
        }

        let lineage = self.lineage(id);
        self.track_bounds(&lineage, notes, |scene, notes| {
            let old = std::mem::replace(&mut scene.node_mut(id).orientation, orientation);
            scene.push_component_change(notes, id, ComponentChange::Orientation { old, new: orientation });
        });
        Ok(())
    }

    pub(crate) fn check_surface_design(&self, id: ComponentId, orientation: ComponentOrientation) -> TableResult<()> {
        let strategy = &self.node(id).strategy;
        if strategy.supports(orientation) {
            Ok(())
        } else {
            Err(TableError::illegal_argument(format!(
                "orientation {} is not supported by {}",
                orientation, strategy.id
            )))
        }
    }

    pub(crate) fn set_surface_design(
        &mut self,
        id: ComponentId,
        orientation: ComponentOrientation,
        design: ComponentSurfaceDesign,
        notes: &mut Notifications,
    ) -> TableResult<()> {
        self.check_surface_design(id, orientation)?;
        if self.node(id).surface_designs.get(&orientation) == Some(&design) {
            return Ok(());
        }

        let lineage = self.lineage(id);
        self.track_bounds(&lineage, notes, |scene, notes| {
            let old = scene.node_mut(id).surface_designs.insert(orientation, design.clone());
            scene.push_component_change(
                notes,
                id,
                ComponentChange::SurfaceDesign { orientation, old, new: design },
            );
        });
        Ok(())
    }

    // === Topology ===

    pub(crate) fn child_index(&self, container: ComponentId, child: ComponentId) -> Option<usize> {
        self.content(container).children.iter().position(|&c| c == child)
    }

    /// Parent chain of `id`, nearest first, excluding `id`.
    pub(crate) fn ancestors(&self, id: ComponentId) -> Lineage {
        let mut ancestors = Lineage::new();
        let mut current = self.node(id).parent;
        while let Some(parent) = current {
            ancestors.push(parent);
            current = self.node(parent).parent;
        }
        ancestors
    }

    /// `id` followed by its ancestors.
    pub(crate) fn lineage(&self, id: ComponentId) -> Lineage {
        let mut lineage: Lineage = smallvec![id];
        lineage.extend(self.ancestors(id));
        lineage
    }

    pub(crate) fn path(&self, id: ComponentId) -> Option<ComponentPath> {
        let node = self.node(id);
        match node.parent {
            None => node.table.map(|_| ComponentPath::root()),
            Some(parent) => self.child_path(parent, id),
        }
    }

    /// Path of `child` within `container`.
    ///
    /// Returns `None` if the container is not attached to a table. Panics if
    /// it is attached and `child` is not one of its children.
    pub(crate) fn child_path(&self, container: ComponentId, child: ComponentId) -> Option<ComponentPath> {
        let path = self.path(container)?;
        let index = self
            .child_index(container, child)
            .unwrap_or_else(|| panic!("{} is not a child of {}", child, container));
        Some(path.child(index))
    }

    /// Check that `children` may be attached to `container`.
    pub(crate) fn check_new_children(&self, container: ComponentId, children: &[ComponentId]) -> TableResult<()> {
        let lineage = self.lineage(container);
        for (i, &child) in children.iter().enumerate() {
            let node = self.node(child);
            if node.parent.is_some() {
                return Err(TableError::illegal_argument(format!("{} already has a container", child)));
            }
            if node.table.is_some() {
                return Err(TableError::illegal_argument(format!("{} is the tabletop of a table", child)));
            }
            if lineage.contains(&child) {
                return Err(TableError::illegal_argument(format!(
                    "{} cannot be added to itself or to one of its descendants",
                    child
                )));
            }
            if children[..i].contains(&child) {
                return Err(TableError::illegal_argument(format!("{} is listed more than once", child)));
            }
        }
        Ok(())
    }

    /// Attach validated `children` at `index`, bottom to top.
    pub(crate) fn insert_children(
        &mut self,
        container: ComponentId,
        index: usize,
        children: &[ComponentId],
        notes: &mut Notifications,
    ) {
        let lineage = self.lineage(container);
        self.track_bounds(&lineage, notes, |scene, notes| {
            for (offset, &child) in children.iter().enumerate() {
                let at = index + offset;
                scene.content_mut(container).children.insert(at, child);
                scene.node_mut(child).parent = Some(container);
                tracing::debug!(container = %container, component = %child, index = at, "component added");
                scene.push_container_change(notes, container, ContainerChange::Added { child, index: at });
            }
            scene.apply_layout(container, notes);
        });
    }

    /// Detach the children in `start..end`, top first.
    ///
    /// Returns the removed ids bottom to top.
    pub(crate) fn remove_children(
        &mut self,
        container: ComponentId,
        start: usize,
        end: usize,
        notes: &mut Notifications,
    ) -> Vec<ComponentId> {
        let count = self.content(container).children.len();
        assert!(
            start <= end && end <= count,
            "Range {}..{} out of bounds for {} with {} components",
            start,
            end,
            container,
            count
        );

        let lineage = self.lineage(container);
        self.track_bounds(&lineage, notes, |scene, notes| {
            let mut removed = Vec::with_capacity(end - start);
            for index in (start..end).rev() {
                let child = scene.content_mut(container).children.remove(index);
                scene.node_mut(child).parent = None;
                tracing::debug!(container = %container, component = %child, index, "component removed");
                scene.push_container_change(notes, container, ContainerChange::Removed { child, index });
                removed.push(child);
            }
            removed.reverse();
            if !removed.is_empty() {
                scene.apply_layout(container, notes);
            }
            removed
        })
    }

    /// Move every child to where the container's layout puts it.
    fn apply_layout(&mut self, container: ComponentId, notes: &mut Notifications) {
        let origin = self.node(container).origin;
        let content = self.content(container);
        let layout = content.layout.clone();
        let children = content.children.clone();

        for (index, child) in children.into_iter().enumerate() {
            if let Some(target) = layout.location_for(origin, index) {
                let offset = self.bounds(child).location().offset_to(target);
                self.translate(child, offset, notes);
            }
        }
        tracing::trace!(container = %container, layout = %layout, "layout applied");
    }

    pub(crate) fn set_layout(&mut self, container: ComponentId, layout: ContainerLayout, notes: &mut Notifications) {
        if self.content(container).layout == layout {
            return;
        }
        let lineage = self.lineage(container);
        self.track_bounds(&lineage, notes, |scene, notes| {
            let old = std::mem::replace(&mut scene.content_mut(container).layout, layout.clone());
            tracing::debug!(container = %container, old = %old, new = %layout, "layout changed");
            scene.push_container_change(notes, container, ContainerChange::Layout { old, new: layout });
            scene.apply_layout(container, notes);
        });
    }

    pub(crate) fn shuffle(&mut self, container: ComponentId, notes: &mut Notifications) {
        let lineage = self.lineage(container);
        self.track_bounds(&lineage, notes, |scene, notes| {
            let Scene { nodes, rng, .. } = scene;
            if let Some(content) = nodes.get_mut(&container).and_then(|node| node.content.as_mut()) {
                rng.shuffle(&mut content.children);
            }
            tracing::debug!(container = %container, "components shuffled");
            scene.push_container_change(notes, container, ContainerChange::Reordered);
            scene.apply_layout(container, notes);
        });
    }

    // === Hit-testing ===

    pub(crate) fn component_index_at(&self, container: ComponentId, location: Point) -> Option<usize> {
        let bounds = self.children_bounds(container);
        self.content(container).layout.component_index_at(&bounds, location)
    }

    /// Every component under `location` in the subtree of `root`, bottom to top.
    pub(crate) fn components_at(&self, root: ComponentId, location: Point) -> Vec<ComponentId> {
        let mut hits = Vec::new();
        if self.bounds(root).contains(location) {
            hits.push(root);
            self.collect_hits(root, location, &mut hits);
        }
        hits
    }

    fn collect_hits(&self, id: ComponentId, location: Point, hits: &mut Vec<ComponentId>) {
        let Some(content) = &self.node(id).content else {
            return;
        };
        let bounds = self.children_bounds(id);
        for index in content.layout.component_indices_at(&bounds, location) {
            let child = content.children[index];
            hits.push(child);
            self.collect_hits(child, location, hits);
        }
    }

    /// Deepest container under `location` that accepts drops, ignoring `exclude`.
    pub(crate) fn drop_target(&self, tabletop: ComponentId, location: Point, exclude: ComponentId) -> ComponentId {
        let mut target = tabletop;
        loop {
            let content = self.content(target);
            let bounds = self.children_bounds(target);
            let hits = content.layout.component_indices_at(&bounds, location);

            let next = hits
                .iter()
                .rev()
                .map(|&index| content.children[index])
                .find(|&child| child != exclude)
                .filter(|&child| {
                    let strategy = &self.node(child).strategy;
                    strategy.is_container() && strategy.accepts_drops
                });

            match next {
                Some(child) => target = child,
                None => return target,
            }
        }
    }

    // === Tables ===

    pub(crate) fn insert_table(&mut self, tabletop: ComponentId, handle: Weak<TableInner>) -> TableId {
        let id = TableId(self.next_table_id);
        self.next_table_id += 1;
        self.node_mut(tabletop).table = Some(id);
        self.tables.insert(
            id,
            TableState {
                tabletop,
                drag_active: false,
                handle,
            },
        );
        id
    }

    fn remove_table(&mut self, id: TableId, tabletop: ComponentId) {
        self.tables.remove(&id);
        if let Some(node) = self.nodes.get_mut(&tabletop) {
            node.table = None;
        }
        self.collect(tabletop);
    }

    pub(crate) fn table_state(&self, id: TableId) -> &TableState {
        self.tables
            .get(&id)
            .unwrap_or_else(|| panic!("{} does not exist in this environment", id))
    }

    pub(crate) fn table_state_mut(&mut self, id: TableId) -> &mut TableState {
        self.tables
            .get_mut(&id)
            .unwrap_or_else(|| panic!("{} does not exist in this environment", id))
    }

    /// Table whose tabletop is the root of `id`'s chain.
    pub(crate) fn table_of(&self, id: ComponentId) -> Option<TableId> {
        let root = self.ancestors(id).last().copied().unwrap_or(id);
        self.node(root).table
    }

    pub(crate) fn table_handle(&self, id: TableId) -> Option<Arc<TableInner>> {
        self.tables.get(&id).and_then(|state| state.handle.upgrade())
    }

    // === Listeners ===

    pub(crate) fn add_component_listener(
        &mut self,
        id: ComponentId,
        listener: Arc<dyn ComponentListener>,
    ) -> TableResult<()> {
        let listeners = &mut self.node_mut(id).listeners;
        if listeners.iter().any(|l| same_listener(l, &listener)) {
            return Err(TableError::illegal_argument(format!("listener already registered on {}", id)));
        }
        listeners.push_back(listener);
        Ok(())
    }

    pub(crate) fn remove_component_listener(
        &mut self,
        id: ComponentId,
        listener: &Arc<dyn ComponentListener>,
    ) -> TableResult<()> {
        let listeners = &mut self.node_mut(id).listeners;
        let index = listeners
            .iter()
            .position(|l| same_listener(l, listener))
            .ok_or_else(|| TableError::illegal_argument(format!("listener is not registered on {}", id)))?;
        listeners.remove(index);
        Ok(())
    }

    pub(crate) fn add_container_listener(
        &mut self,
        id: ComponentId,
        listener: Arc<dyn ContainerListener>,
    ) -> TableResult<()> {
        let listeners = &mut self.content_mut(id).listeners;
        if listeners.iter().any(|l| same_listener(l, &listener)) {
            return Err(TableError::illegal_argument(format!("listener already registered on {}", id)));
        }
        listeners.push_back(listener);
        Ok(())
    }

    pub(crate) fn remove_container_listener(
        &mut self,
        id: ComponentId,
        listener: &Arc<dyn ContainerListener>,
    ) -> TableResult<()> {
        let listeners = &mut self.content_mut(id).listeners;
        let index = listeners
            .iter()
            .position(|l| same_listener(l, listener))
            .ok_or_else(|| TableError::illegal_argument(format!("listener is not registered on {}", id)))?;
        listeners.remove(index);
        Ok(())
    }

    fn push_component_change(&self, notes: &mut Notifications, id: ComponentId, change: ComponentChange) {
        let listeners = &self.node(id).listeners;
        if !listeners.is_empty() {
            notes.push(Notification::Component {
                listeners: listeners.clone(),
                source: id,
                change,
            });
        }
    }

    fn push_container_change(&self, notes: &mut Notifications, id: ComponentId, change: ContainerChange) {
        let listeners = &self.content(id).listeners;
        if !listeners.is_empty() {
            notes.push(Notification::Container {
                listeners: listeners.clone(),
                container: id,
                change,
            });
        }
    }
}

/// Listener identity: the same allocation, regardless of vtable.
fn same_listener<T: ?Sized>(a: &Arc<T>, b: &Arc<T>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}
