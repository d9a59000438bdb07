//! Serializable snapshots of components and tables.
//!
//! A memento records a component's strategy, origin, orientation and
//! designs and, for containers, the layout and every child. Ids are stored
//! instead of values, so restoring resolves them against the target
//! environment's registry.
//!
//! ```
//! use rust_tabletop::core::Point;
//! use rust_tabletop::environment::TableEnvironment;
//! use rust_tabletop::memento::Memento;
//!
//! let env = TableEnvironment::new();
//! let pile = env.create_card_pile().unwrap();
//! pile.set_origin(Point::new(40, 40));
//! pile.add_component(&env.create_card().unwrap()).unwrap();
//!
//! let bytes = pile.create_memento().to_bytes().unwrap();
//! let copy = env.create_component_from_memento(&Memento::from_bytes(&bytes).unwrap()).unwrap();
//!
//! assert_eq!(copy.bounds(), pile.bounds());
//! assert_eq!(copy.as_container().unwrap().component_count(), 1);
//! ```

mod restore;
pub mod types;

pub(crate) use restore::{restore_component, restore_table, snapshot, snapshot_table};
pub use types::{ComponentMemento, ContainerMemento, Memento, SurfaceDesignEntry, TableMemento, MEMENTO_VERSION};
