//! Listener dispatch.
//!
//! Runs after a mutation released its scene borrow but before it released
//! the environment lock. Handles for the components named in a
//! notification are created here; a notification whose component has
//! since been freed is dropped.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use im::Vector;

use crate::components::listener::{
    BoundsChangedEvent, ComponentsReorderedEvent, ContainerContentChangedEvent, LayoutChangedEvent,
    OrientationChangedEvent, SurfaceDesignChangedEvent,
};
use crate::components::Container;

use super::scene::{ComponentChange, ContainerChange, Notification, Notifications};
use super::TableEnvironment;

pub(crate) fn dispatch(env: &TableEnvironment, notifications: Notifications) {
    for notification in notifications {
        match notification {
            Notification::Component {
                listeners,
                source,
                change,
            } => {
                let Some(component) = env.try_component(source) else {
                    continue;
                };
                match change {
                    ComponentChange::Bounds { old, new } => {
                        let event = BoundsChangedEvent {
                            component,
                            old_bounds: old,
                            new_bounds: new,
                        };
                        notify(&listeners, "bounds_changed", |l| l.bounds_changed(&event));
                    }
                    ComponentChange::Orientation { old, new } => {
                        let event = OrientationChangedEvent {
                            component,
                            old_orientation: old,
                            new_orientation: new,
                        };
                        notify(&listeners, "orientation_changed", |l| l.orientation_changed(&event));
                    }
                    ComponentChange::SurfaceDesign { orientation, old, new } => {
                        let event = SurfaceDesignChangedEvent {
                            component,
                            orientation,
                            old_design: old,
                            new_design: new,
                        };
                        notify(&listeners, "surface_design_changed", |l| l.surface_design_changed(&event));
                    }
                }
            }
            Notification::Container {
                listeners,
                container,
                change,
            } => {
                let Some(container) = env.try_component(container).map(Container::from_component) else {
                    continue;
                };
                match change {
                    ContainerChange::Added { child, index } => {
                        let Some(component) = env.try_component(child) else {
                            continue;
                        };
                        let event = ContainerContentChangedEvent {
                            container,
                            component,
                            index,
                        };
                        notify(&listeners, "component_added", |l| l.component_added(&event));
                    }
                    ContainerChange::Removed { child, index } => {
                        let Some(component) = env.try_component(child) else {
                            continue;
                        };
                        let event = ContainerContentChangedEvent {
                            container,
                            component,
                            index,
                        };
                        notify(&listeners, "component_removed", |l| l.component_removed(&event));
                    }
                    ContainerChange::Layout { old, new } => {
                        let event = LayoutChangedEvent {
                            container,
                            old_layout: old,
                            new_layout: new,
                        };
                        notify(&listeners, "layout_changed", |l| l.layout_changed(&event));
                    }
                    ContainerChange::Reordered => {
                        let event = ComponentsReorderedEvent { container };
                        notify(&listeners, "components_reordered", |l| l.components_reordered(&event));
                    }
                }
            }
        }
    }
}

/// Call every listener, isolating panics.
fn notify<L: ?Sized>(listeners: &Vector<Arc<L>>, event: &str, mut call: impl FnMut(&L)) {
    for listener in listeners.iter() {
        let result = panic::catch_unwind(AssertUnwindSafe(|| call(listener.as_ref())));
        if let Err(payload) = result {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            tracing::error!(event = event, %message, "listener panicked");
        }
    }
}

