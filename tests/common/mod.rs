//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;

use rust_tabletop::components::{
    BoundsChangedEvent, ComponentListener, ComponentsReorderedEvent, ContainerContentChangedEvent,
    ContainerListener, LayoutChangedEvent, OrientationChangedEvent, SurfaceDesignChangedEvent,
};
use rust_tabletop::core::{
    ComponentId, ComponentOrientation, ComponentStrategyId, ContainerLayoutId, Rectangle,
};
use rust_tabletop::strategies::defaults;
use rust_tabletop::{Component, Container, Table, TableEnvironment};

/// One observed event, reduced to comparable values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Recorded {
    Bounds {
        component: ComponentId,
        old: Rectangle,
        new: Rectangle,
    },
    Orientation {
        component: ComponentId,
        old: ComponentOrientation,
        new: ComponentOrientation,
    },
    SurfaceDesign {
        component: ComponentId,
        orientation: ComponentOrientation,
    },
    Added {
        container: ComponentId,
        component: ComponentId,
        index: usize,
    },
    Removed {
        container: ComponentId,
        component: ComponentId,
        index: usize,
    },
    Layout {
        old: ContainerLayoutId,
        new: ContainerLayoutId,
    },
    Reordered {
        container: ComponentId,
    },
}

/// Listener that records everything it sees.
#[derive(Default)]
pub struct Recorder {
    events: Mutex<Vec<Recorded>>,
}

impl Recorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<Recorded> {
        self.events.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    fn push(&self, event: Recorded) {
        self.events.lock().push(event);
    }
}

impl ComponentListener for Recorder {
    fn bounds_changed(&self, event: &BoundsChangedEvent) {
        self.push(Recorded::Bounds {
            component: event.component.id(),
            old: event.old_bounds,
            new: event.new_bounds,
        });
    }

    fn orientation_changed(&self, event: &OrientationChangedEvent) {
        self.push(Recorded::Orientation {
            component: event.component.id(),
            old: event.old_orientation,
            new: event.new_orientation,
        });
    }

    fn surface_design_changed(&self, event: &SurfaceDesignChangedEvent) {
        self.push(Recorded::SurfaceDesign {
            component: event.component.id(),
            orientation: event.orientation,
        });
    }
}

impl ContainerListener for Recorder {
    fn component_added(&self, event: &ContainerContentChangedEvent) {
        self.push(Recorded::Added {
            container: event.container.id(),
            component: event.component.id(),
            index: event.index,
        });
    }

    fn component_removed(&self, event: &ContainerContentChangedEvent) {
        self.push(Recorded::Removed {
            container: event.container.id(),
            component: event.component.id(),
            index: event.index,
        });
    }

    fn layout_changed(&self, event: &LayoutChangedEvent) {
        self.push(Recorded::Layout {
            old: event.old_layout.id().clone(),
            new: event.new_layout.id().clone(),
        });
    }

    fn components_reordered(&self, event: &ComponentsReorderedEvent) {
        self.push(Recorded::Reordered {
            container: event.container.id(),
        });
    }
}

/// Route `tracing` output through the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub fn env_with_table() -> (TableEnvironment, Table) {
    let env = TableEnvironment::new();
    let table = env.create_table().unwrap();
    (env, table)
}

pub fn null_component(env: &TableEnvironment) -> Component {
    env.create_component(&ComponentStrategyId::new(defaults::NULL_COMPONENT))
        .unwrap()
}

pub fn null_container(env: &TableEnvironment) -> Container {
    env.create_container(&ComponentStrategyId::new(defaults::NULL_CONTAINER))
        .unwrap()
}

pub fn cards(env: &TableEnvironment, count: usize) -> Vec<Component> {
    (0..count).map(|_| env.create_card().unwrap()).collect()
}
