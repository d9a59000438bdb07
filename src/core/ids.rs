//! Identifier types.
//!
//! Two families of identifiers exist:
//!
//! - **Arena ids** (`ComponentId`, `TableId`): allocated by a
//!   `TableEnvironment`, only meaningful inside the environment that
//!   allocated them.
//! - **Registry ids** (`ComponentStrategyId`, `ContainerLayoutId`,
//!   `ComponentSurfaceDesignId`): stable string keys that survive in
//!   mementos and are resolved through a `ComponentRegistry`.
//!
//! ```
//! use rust_tabletop::core::{ComponentStrategyId, ContainerLayoutId};
//!
//! let card = ComponentStrategyId::new("card");
//! assert_eq!(card.as_str(), "card");
//! assert_eq!(format!("{}", ContainerLayoutId::new("stacked")), "ContainerLayout(stacked)");
//! ```

use serde::{Deserialize, Serialize};

/// Arena identifier of a component node.
///
/// Ids are never reused within an environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentId(pub u64);

impl ComponentId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Component({})", self.0)
    }
}

/// Arena identifier of a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableId(pub u64);

impl TableId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Table({})", self.0)
    }
}

macro_rules! registry_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the identifier text.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($label, "({})"), self.0)
            }
        }
    };
}

registry_id!(
    /// Identifies a `ComponentStrategy` in a registry.
    ComponentStrategyId,
    "ComponentStrategy"
);

registry_id!(
    /// Identifies a `ContainerLayout` in a registry.
    ContainerLayoutId,
    "ContainerLayout"
);

registry_id!(
    /// Identifies a `ComponentSurfaceDesign` in a registry.
    ComponentSurfaceDesignId,
    "SurfaceDesign"
);
