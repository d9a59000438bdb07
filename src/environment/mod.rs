//! The table environment: component factory, lock and arena.
//!
//! ## Key Types
//!
//! - `TableEnvironment`: creates tables and components, owns their state
//! - `TableEnvironmentLock`: RAII guard for grouping calls atomically
//!
//! ## Concurrency
//!
//! All component state of an environment sits behind one reentrant lock.
//! Every public operation takes it for its own duration; callers that need
//! several operations to appear atomic hold `TableEnvironment::lock` across
//! them. Listeners run on the mutating thread while the lock is held.

pub(crate) mod dispatch;
pub(crate) mod scene;
pub mod table_environment;

pub use table_environment::{TableEnvironment, TableEnvironmentLock};
