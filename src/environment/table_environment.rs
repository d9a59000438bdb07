//! `TableEnvironment` and its lock guard.

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, ReentrantMutex, ReentrantMutexGuard};

use crate::components::{Component, Container};
use crate::core::{ComponentId, ComponentStrategyId, MementoError, TableEnvironmentConfig, TableError, TableResult};
use crate::memento::{self, Memento, TableMemento};
use crate::strategies::{defaults, ComponentRegistry};
use crate::table::Table;

use super::dispatch;
use super::scene::{Node, Notifications, Release, Scene};

struct EnvironmentInner {
    scene: ReentrantMutex<RefCell<Scene>>,
    /// Handles dropped while the scene was borrowed.
    released: Mutex<Vec<Release>>,
    config: TableEnvironmentConfig,
}

/// Factory and owner of tables and components.
///
/// A `TableEnvironment` is a cheap, cloneable handle; clones refer to the
/// same environment. Components and tables from one environment can never
/// be combined with those of another.
///
/// ## Example
///
/// ```
/// use rust_tabletop::core::Point;
/// use rust_tabletop::environment::TableEnvironment;
///
/// let env = TableEnvironment::new();
/// let table = env.create_table().unwrap();
/// let pile = env.create_card_pile().unwrap();
/// let card = env.create_card().unwrap();
///
/// pile.set_origin(Point::new(100, 100));
/// pile.add_component(&card).unwrap();
/// table.tabletop().add_component(&pile).unwrap();
///
/// assert_eq!(card.location(), Point::new(100, 100));
/// assert_eq!(table.component_at(Point::new(110, 110)), Some(card));
/// ```
#[derive(Clone)]
pub struct TableEnvironment {
    inner: Arc<EnvironmentInner>,
}

/// Holds the environment lock until dropped.
///
/// The lock is reentrant: every operation called while the guard is alive,
/// on the same thread, proceeds without blocking.
#[must_use = "the environment is unlocked as soon as the guard is dropped"]
pub struct TableEnvironmentLock<'a> {
    _guard: ReentrantMutexGuard<'a, RefCell<Scene>>,
}

impl TableEnvironment {
    /// Create an environment with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TableEnvironmentConfig::default())
    }

    /// Create an environment from `config`.
    #[must_use]
    pub fn with_config(config: TableEnvironmentConfig) -> Self {
        tracing::debug!(seed = config.rng_seed, tabletop = %config.tabletop_strategy, "table environment created");
        Self {
            inner: Arc::new(EnvironmentInner {
                scene: ReentrantMutex::new(RefCell::new(Scene::new(config.rng_seed))),
                released: Mutex::new(Vec::new()),
                config,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &TableEnvironmentConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn registry(&self) -> &ComponentRegistry {
        &self.inner.config.registry
    }

    /// Acquire the environment lock, blocking until it is available.
    pub fn lock(&self) -> TableEnvironmentLock<'_> {
        TableEnvironmentLock {
            _guard: self.inner.scene.lock(),
        }
    }

    /// Check if the calling thread holds the environment lock.
    #[must_use]
    pub fn is_held_by_current_thread(&self) -> bool {
        self.inner.scene.is_owned_by_current_thread()
    }

    /// Create a table with an empty tabletop.
    pub fn create_table(&self) -> TableResult<Table> {
        Table::create(self)
    }

    /// Create a component of any registered strategy.
    pub fn create_component(&self, strategy: &ComponentStrategyId) -> TableResult<Component> {
        let strategy = self.registry().strategy(strategy)?;
        let node = Node::new(strategy, self.registry())?;
        Ok(self.insert(node))
    }

    /// Create a container of a registered container strategy.
    pub fn create_container(&self, strategy: &ComponentStrategyId) -> TableResult<Container> {
        if !self.registry().strategy(strategy)?.is_container() {
            return Err(TableError::illegal_argument(format!("{} is not a container strategy", strategy)));
        }
        self.create_component(strategy).map(Container::from_component)
    }

    /// Create a face-down card.
    pub fn create_card(&self) -> TableResult<Component> {
        self.create_component(&ComponentStrategyId::new(defaults::CARD))
    }

    /// Create an empty card pile.
    pub fn create_card_pile(&self) -> TableResult<Container> {
        self.create_container(&ComponentStrategyId::new(defaults::CARD_PILE))
    }

    /// Rebuild a detached component (and its children) from a memento.
    pub fn create_component_from_memento(&self, memento: &Memento) -> Result<Component, MementoError> {
        memento::restore_component(self, memento)
    }

    /// Create a table and restore `memento` into it.
    pub fn create_table_from_memento(&self, memento: &TableMemento) -> Result<Table, MementoError> {
        let table = self.create_table()?;
        table.set_memento(memento)?;
        Ok(table)
    }

    // === Crate-internal access ===

    pub(crate) fn same(&self, other: &TableEnvironment) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn insert(&self, node: Node) -> Component {
        let handle = self.write(|scene| {
            let id = scene.insert_node(node);
            scene.handle(self, id)
        });
        Component::from_handle(handle)
    }

    /// Run `f` with shared access to the scene.
    pub(crate) fn read<R>(&self, f: impl FnOnce(&Scene) -> R) -> R {
        let guard = self.inner.scene.lock();
        let scene = guard.borrow();
        f(&scene)
    }

    /// Run `f` with exclusive access to the scene.
    pub(crate) fn write<R>(&self, f: impl FnOnce(&mut Scene) -> R) -> R {
        let guard = self.inner.scene.lock();
        let mut scene = guard.borrow_mut();
        let released = std::mem::take(&mut *self.inner.released.lock());
        for release in released {
            scene.release(release);
        }
        f(&mut scene)
    }

    /// Run a mutation, then notify listeners while still holding the lock.
    pub(crate) fn mutate<R>(&self, f: impl FnOnce(&mut Scene, &mut Notifications) -> R) -> R {
        let _guard = self.lock();
        let mut notifications = Notifications::new();
        let result = self.write(|scene| f(scene, &mut notifications));
        dispatch::dispatch(self, notifications);
        result
    }

    pub(crate) fn component(&self, id: ComponentId) -> Component {
        Component::from_handle(self.write(|scene| scene.handle(self, id)))
    }

    pub(crate) fn try_component(&self, id: ComponentId) -> Option<Component> {
        self.write(|scene| scene.contains(id).then(|| scene.handle(self, id)))
            .map(Component::from_handle)
    }

    /// Called when the last handle of a component or table goes away.
    pub(crate) fn release(&self, release: Release) {
        let guard = self.inner.scene.lock();
        match guard.try_borrow_mut() {
            Ok(mut scene) => scene.release(release),
            Err(_) => self.inner.released.lock().push(release),
        };
    }
}

impl Default for TableEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for TableEnvironment {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Eq for TableEnvironment {}

impl fmt::Debug for TableEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableEnvironment")
            .field("rng_seed", &self.inner.config.rng_seed)
            .finish_non_exhaustive()
    }
}
