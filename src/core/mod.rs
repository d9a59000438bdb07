//! Core value types: geometry, identifiers, orientations, paths, RNG,
//! configuration and errors.
//!
//! Nothing in this module touches the environment lock; these are plain
//! values shared by every other module.

pub mod config;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod orientation;
pub mod path;
pub mod rng;

pub use config::{TableEnvironmentConfig, DEFAULT_RNG_SEED};
pub use error::{MementoError, TableError, TableResult};
pub use geometry::{Dimension, Point, Rectangle};
pub use ids::{ComponentId, ComponentStrategyId, ComponentSurfaceDesignId, ContainerLayoutId, TableId};
pub use orientation::ComponentOrientation;
pub use path::ComponentPath;
pub use rng::TableRng;
