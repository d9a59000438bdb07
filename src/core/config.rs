//! Table environment configuration.
//!
//! Applications configure an environment at creation time by providing:
//! - `ComponentRegistry`: the strategies, layouts and surface designs
//!   components can be built from
//! - `rng_seed`: the seed for the environment's deterministic RNG
//! - `tabletop_strategy` / `mobile_strategy`: the container strategies
//!   used for table roots and for components in flight during a drag
//!
//! The environment never hardcodes component kinds - everything it can
//! create comes from the registry.

use crate::core::ComponentStrategyId;
use crate::strategies::{defaults, ComponentRegistry};

/// Default RNG seed used when none is configured.
pub const DEFAULT_RNG_SEED: u64 = 0x5EED_7AB1E;

/// Complete environment configuration.
///
/// ```
/// use rust_tabletop::core::TableEnvironmentConfig;
/// use rust_tabletop::strategies::ComponentRegistry;
///
/// let config = TableEnvironmentConfig::new()
///     .with_registry(ComponentRegistry::with_defaults())
///     .with_seed(99);
/// assert_eq!(config.rng_seed, 99);
/// ```
#[derive(Clone, Debug)]
pub struct TableEnvironmentConfig {
    /// Everything components can be built from.
    pub registry: ComponentRegistry,

    /// Seed for shuffling.
    pub rng_seed: u64,

    /// Strategy of every table's root container.
    pub tabletop_strategy: ComponentStrategyId,

    /// Strategy of the temporary container that carries dragged components.
    pub mobile_strategy: ComponentStrategyId,
}

impl TableEnvironmentConfig {
    /// Create a configuration with the default registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: ComponentRegistry::with_defaults(),
            rng_seed: DEFAULT_RNG_SEED,
            tabletop_strategy: ComponentStrategyId::new(defaults::TABLETOP),
            mobile_strategy: ComponentStrategyId::new(defaults::MOBILE),
        }
    }

    /// Replace the registry.
    #[must_use]
    pub fn with_registry(mut self, registry: ComponentRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Use another container strategy for tabletops.
    #[must_use]
    pub fn with_tabletop_strategy(mut self, id: impl Into<ComponentStrategyId>) -> Self {
        self.tabletop_strategy = id.into();
        self
    }

    /// Use another container strategy for drag carriers.
    #[must_use]
    pub fn with_mobile_strategy(mut self, id: impl Into<ComponentStrategyId>) -> Self {
        self.mobile_strategy = id.into();
        self
    }
}

impl Default for TableEnvironmentConfig {
    fn default() -> Self {
        Self::new()
    }
}
