//! Drag-and-drop.
//!
//! A drag moves components from their container into a temporary "mobile"
//! container on top of the tabletop, follows the pointer, and finally
//! either drops them into the container under the pointer or puts them
//! back where they came from.
//!
//! ```text
//! begin_drag ──► Active ──drop()───► Dropped
//!                  │  ▲
//!                  │  └─drag()
//!                  └────cancel()──► Cancelled
//! ```
//!
//! A context that goes out of scope while still active is cancelled.

use crate::components::{Component, Container};
use crate::core::{Point, TableError, TableResult};
use crate::strategies::{ChildDragPolicy, DragPolicy};

use super::table::Table;

/// Lifecycle of a drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragState {
    Active,
    Dropped,
    Cancelled,
}

/// An in-progress drag on one table.
///
/// Only one drag per table can be active at a time.
///
/// ```
/// use rust_tabletop::core::Point;
/// use rust_tabletop::environment::TableEnvironment;
///
/// let env = TableEnvironment::new();
/// let table = env.create_table().unwrap();
/// let card = env.create_card().unwrap();
/// table.tabletop().add_component(&card).unwrap();
///
/// let mut drag = table.begin_drag(Point::new(10, 10), &card).unwrap().unwrap();
/// drag.drag(Point::new(60, 30)).unwrap();
/// drag.drop(Point::new(60, 30)).unwrap();
///
/// assert_eq!(card.location(), Point::new(50, 20));
/// assert_eq!(card.container(), Some(table.tabletop()));
/// ```
#[derive(Debug)]
pub struct DragContext {
    gesture: Gesture,
}

/// Everything needed to finish or undo a drag.
#[derive(Debug)]
struct Gesture {
    table: Table,
    state: DragState,
    begin_location: Point,
    mobile: Container,
    mobile_origin: Point,
    source: Container,
    source_index: usize,
    components: Vec<Component>,
    original_locations: Vec<Point>,
}

impl DragContext {
    pub(crate) fn begin(table: &Table, location: Point, component: &Component) -> TableResult<Option<Self>> {
        let env = table.table_environment();
        let _lock = env.lock();

        assert!(
            component.table().as_ref() == Some(table),
            "{} is not on {:?}",
            component,
            table
        );
        let Some(source) = component.container() else {
            return Err(TableError::illegal_argument(format!("{} has no container and cannot be dragged", component)));
        };
        if table.is_dragging() {
            return Err(TableError::illegal_state("a drag is already in progress on this table"));
        }
        if component.strategy().drag_policy == DragPolicy::Fixed {
            tracing::debug!(component = %component, "component is fixed; drag not started");
            return Ok(None);
        }

        let Some(source_index) = source.component_index(component) else {
            panic!("{} is not a child of its own container {}", component, source.id());
        };
        let dragged = match source.strategy().child_drag_policy {
            ChildDragPolicy::Single => vec![component.clone()],
            ChildDragPolicy::ComponentsAbove => source.components()[source_index..].to_vec(),
        };
        let original_locations: Vec<Point> = dragged.iter().map(Component::location).collect();

        let mobile = env.create_container(&env.config().mobile_strategy)?;
        match source.strategy().child_drag_policy {
            ChildDragPolicy::Single => source.remove_component(component),
            ChildDragPolicy::ComponentsAbove => {
                source.remove_components_from(source_index);
            }
        }
        table.tabletop().add_component(&mobile)?;
        mobile.add_components(&dragged)?;
        table.set_dragging(true);

        tracing::debug!(
            table = %table.id(),
            source = %source.id(),
            index = source_index,
            count = dragged.len(),
            "drag started"
        );
        Ok(Some(Self {
            gesture: Gesture {
                table: table.clone(),
                state: DragState::Active,
                begin_location: location,
                mobile_origin: mobile.origin(),
                mobile,
                source,
                source_index,
                components: dragged,
                original_locations,
            },
        }))
    }

    #[must_use]
    pub fn state(&self) -> DragState {
        self.gesture.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.gesture.state == DragState::Active
    }

    /// The components being dragged, bottom to top.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.gesture.components
    }

    /// The container the components were taken from.
    #[must_use]
    pub fn source(&self) -> &Container {
        &self.gesture.source
    }

    /// Move the dragged components to follow the pointer at `location`.
    pub fn drag(&mut self, location: Point) -> TableResult<()> {
        self.gesture.ensure_active()?;
        self.gesture.follow(location);
        Ok(())
    }

    /// Drop the components into the container under `location`.
    pub fn drop(&mut self, location: Point) -> TableResult<()> {
        self.gesture.ensure_active()?;
        let gesture = &mut self.gesture;
        let env = gesture.table.table_environment().clone();
        let _lock = env.lock();

        gesture.follow(location);
        let target = gesture.table.drop_target(location, &gesture.mobile);
        gesture.release_mobile();
        if let Err(err) = target.add_components(&gesture.components) {
            tracing::warn!(container = %target.id(), %err, "drop rejected; restoring components");
            gesture.restore();
            gesture.finish(DragState::Cancelled);
            return Err(err);
        }

        tracing::debug!(container = %target.id(), count = gesture.components.len(), "components dropped");
        gesture.finish(DragState::Dropped);
        Ok(())
    }

    /// Put the components back where they were.
    pub fn cancel(&mut self) -> TableResult<()> {
        self.gesture.ensure_active()?;
        let env = self.gesture.table.table_environment().clone();
        let _lock = env.lock();

        self.gesture.release_mobile();
        self.gesture.restore();
        self.gesture.finish(DragState::Cancelled);
        tracing::debug!(source = %self.gesture.source.id(), "drag cancelled");
        Ok(())
    }
}

impl Gesture {
    fn ensure_active(&self) -> TableResult<()> {
        match self.state {
            DragState::Active => Ok(()),
            state => Err(TableError::illegal_state(format!("drag already ended ({:?})", state))),
        }
    }

    fn follow(&self, location: Point) {
        let offset = self.begin_location.offset_to(location);
        self.mobile.set_origin(self.mobile_origin.translate(offset));
    }

    /// Empty the mobile container and take it off the table.
    fn release_mobile(&self) {
        self.mobile.remove_all_components();
        if self.mobile.container().is_some() {
            self.table.tabletop().remove_component(&self.mobile);
        }
    }

    fn restore(&self) {
        let index = self.source_index.min(self.source.component_count());
        if let Err(err) = self.source.insert_components(index, &self.components) {
            tracing::error!(source = %self.source.id(), %err, "dragged components could not be restored");
            return;
        }
        for (component, location) in self.components.iter().zip(&self.original_locations) {
            component.set_location(*location);
        }
    }

    fn finish(&mut self, state: DragState) {
        self.state = state;
        self.table.set_dragging(false);
    }
}

impl Drop for Gesture {
    fn drop(&mut self) {
        if self.state != DragState::Active || std::thread::panicking() {
            return;
        }
        tracing::warn!(table = %self.table.id(), "drag context dropped while active; cancelling");
        let env = self.table.table_environment().clone();
        let _lock = env.lock();
        self.release_mobile();
        self.restore();
        self.finish(DragState::Cancelled);
    }
}
