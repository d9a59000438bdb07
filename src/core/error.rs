//! Error types.
//!
//! Three classes of failure are reported as values:
//!
//! - `TableError::IllegalArgument` / `IllegalState`: the caller passed bad
//!   input or called at the wrong time. Nothing was changed.
//! - `TableError::NoSuch*`: a registry lookup failed; carries the id.
//! - `MementoError`: a snapshot could not be turned back into components,
//!   or could not be applied to a table in its current state.
//!
//! Contract violations (stale paths, out-of-range indices, operating on a
//! component that is not where the caller claims) are programming errors
//! and panic instead.

use thiserror::Error;

use super::ids::{ComponentStrategyId, ComponentSurfaceDesignId, ContainerLayoutId};

/// Result alias for table operations.
pub type TableResult<T> = std::result::Result<T, TableError>;

/// Errors surfaced by table, component and registry operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("illegal argument: {0}")]
    IllegalArgument(String),
    #[error("illegal state: {0}")]
    IllegalState(String),
    #[error("no such component strategy: {}", .0.as_str())]
    NoSuchComponentStrategy(ComponentStrategyId),
    #[error("no such container layout: {}", .0.as_str())]
    NoSuchContainerLayout(ContainerLayoutId),
    #[error("no such surface design: {}", .0.as_str())]
    NoSuchSurfaceDesign(ComponentSurfaceDesignId),
}

impl TableError {
    pub(crate) fn illegal_argument(message: impl Into<String>) -> Self {
        Self::IllegalArgument(message.into())
    }

    pub(crate) fn illegal_state(message: impl Into<String>) -> Self {
        Self::IllegalState(message.into())
    }
}

/// Errors raised while restoring state from a memento.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MementoError {
    #[error("malformed memento: {0}")]
    Malformed(String),
    #[error("malformed memento: {0}")]
    UnknownId(#[from] TableError),
    #[error("memento encoding failed: {0}")]
    Encoding(String),
    #[error("memento cannot be applied: {0}")]
    IllegalState(String),
}

impl MementoError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    pub(crate) fn illegal_state(message: impl Into<String>) -> Self {
        Self::IllegalState(message.into())
    }
}
