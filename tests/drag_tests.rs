//! Drag-and-drop integration tests.
//!
//! The drag state machine, drop targeting and restoration on cancel.

mod common;

use common::{cards, env_with_table, null_container};
use rust_tabletop::core::{ComponentOrientation, ComponentStrategyId, Point, TableEnvironmentConfig, TableError};
use rust_tabletop::strategies::{defaults, ComponentRegistry, ComponentStrategy};
use rust_tabletop::{DragState, TableEnvironment};

// =============================================================================
// Drop Tests
// =============================================================================

/// Dragging a card onto a pile drops it into the pile.
#[test]
fn test_drop_into_pile() {
    common::init_tracing();
    let (env, table) = env_with_table();
    let tabletop = table.tabletop();
    let card = env.create_card().unwrap();
    card.set_location(Point::new(500, 500));
    let pile = env.create_card_pile().unwrap();
    pile.set_origin(Point::new(100, 100));
    tabletop.add_components(&[card.clone(), pile.as_component().clone()]).unwrap();

    let mut drag = table.begin_drag(Point::new(510, 510), &card).unwrap().unwrap();
    assert!(table.is_dragging());
    assert!(drag.is_active());
    assert_eq!(drag.components(), &[card.clone()]);
    assert_eq!(drag.source(), &tabletop);

    drag.drag(Point::new(310, 310)).unwrap();
    assert_eq!(card.location(), Point::new(300, 300));
    // In flight: on top of everything.
    assert_eq!(table.component_at(Point::new(305, 305)), Some(card.clone()));

    drag.drop(Point::new(110, 110)).unwrap();

    assert_eq!(drag.state(), DragState::Dropped);
    assert!(!table.is_dragging());
    assert_eq!(card.container(), Some(pile.clone()));
    assert_eq!(card.location(), Point::new(100, 100));
    assert_eq!(tabletop.components(), vec![pile.into_component()]);
}

/// Dropping over something that does not accept drops lands on the tabletop.
#[test]
fn test_drop_on_card_lands_on_tabletop() {
    let (env, table) = env_with_table();
    let tabletop = table.tabletop();
    let hand = cards(&env, 2);
    hand[1].set_location(Point::new(200, 0));
    tabletop.add_components(&hand).unwrap();

    let mut drag = table.begin_drag(Point::new(210, 10), &hand[1]).unwrap().unwrap();
    drag.drop(Point::new(20, 10)).unwrap();

    assert_eq!(hand[1].container(), Some(tabletop.clone()));
    assert_eq!(hand[1].location(), Point::new(10, 0));
    assert_eq!(tabletop.component_index(&hand[1]), Some(1));
}

/// The deepest accepting container under the pointer wins.
#[test]
fn test_drop_into_nested_container() {
    let (env, table) = env_with_table();
    let tray = null_container(&env);
    let pile = env.create_card_pile().unwrap();
    pile.set_origin(Point::new(300, 300));
    tray.add_component(&pile).unwrap();
    let card = env.create_card().unwrap();
    table.tabletop().add_components(&[tray.as_component().clone(), card.clone()]).unwrap();

    let mut drag = table.begin_drag(Point::new(1, 1), &card).unwrap().unwrap();
    drag.drop(Point::new(310, 310)).unwrap();

    assert_eq!(card.container(), Some(pile.clone()));
    assert_eq!(pile.component_count(), 1);
    assert_eq!(tray.component_count(), 1);
}

// =============================================================================
// Cancel Tests
// =============================================================================

/// Piles hand over the picked card and everything above; cancel puts it all back.
#[test]
fn test_drag_components_above_and_cancel() {
    let (env, table) = env_with_table();
    let pile = env.create_card_pile().unwrap();
    let hand = cards(&env, 4);
    pile.add_components(&hand).unwrap();
    table.tabletop().add_component(&pile).unwrap();
    let before: Vec<_> = hand.iter().map(|c| c.location()).collect();

    let mut drag = table.begin_drag(Point::new(7, 4), &hand[1]).unwrap().unwrap();
    assert_eq!(drag.components(), &hand[1..]);
    assert_eq!(pile.components(), vec![hand[0].clone()]);

    drag.drag(Point::new(57, 54)).unwrap();
    assert_eq!(hand[1].location(), Point::new(52, 51));

    drag.cancel().unwrap();

    assert_eq!(drag.state(), DragState::Cancelled);
    assert!(!table.is_dragging());
    assert_eq!(pile.components(), hand);
    let after: Vec<_> = hand.iter().map(|c| c.location()).collect();
    assert_eq!(after, before);
    assert_eq!(table.tabletop().component_count(), 1);
}

/// A context dropped while active cancels itself.
#[test]
fn test_dropping_active_context_cancels() {
    let (env, table) = env_with_table();
    let pile = env.create_card_pile().unwrap();
    let hand = cards(&env, 2);
    pile.add_components(&hand).unwrap();
    table.tabletop().add_component(&pile).unwrap();

    {
        let mut drag = table.begin_drag(Point::new(1, 1), &hand[0]).unwrap().unwrap();
        drag.drag(Point::new(400, 400)).unwrap();
        assert_eq!(pile.component_count(), 0);
    }

    assert!(!table.is_dragging());
    assert_eq!(pile.components(), hand);
    assert_eq!(hand[0].location(), Point::origin());
}

// =============================================================================
// State Machine Tests
// =============================================================================

/// Once dropped, every further call fails and changes nothing.
#[test]
fn test_calls_after_drop_fail() {
    let (env, table) = env_with_table();
    let card = env.create_card().unwrap();
    table.tabletop().add_component(&card).unwrap();

    let mut drag = table.begin_drag(Point::origin(), &card).unwrap().unwrap();
    drag.drop(Point::new(30, 30)).unwrap();
    let location = card.location();

    assert!(matches!(drag.drag(Point::new(90, 90)), Err(TableError::IllegalState(_))));
    assert!(matches!(drag.drop(Point::new(90, 90)), Err(TableError::IllegalState(_))));
    assert!(matches!(drag.cancel(), Err(TableError::IllegalState(_))));

    assert_eq!(drag.state(), DragState::Dropped);
    assert_eq!(card.location(), location);
    assert_eq!(card.container(), Some(table.tabletop()));
}

/// Only one drag per table at a time.
#[test]
fn test_second_drag_is_illegal_state() {
    let (env, table) = env_with_table();
    let hand = cards(&env, 2);
    hand[1].set_location(Point::new(200, 0));
    table.tabletop().add_components(&hand).unwrap();

    let mut first = table.begin_drag(Point::origin(), &hand[0]).unwrap().unwrap();
    let err = table.begin_drag(Point::new(200, 0), &hand[1]).unwrap_err();
    assert!(matches!(err, TableError::IllegalState(_)));

    first.cancel().unwrap();
    assert!(table.begin_drag(Point::new(200, 0), &hand[1]).unwrap().is_some());
}

/// The tabletop cannot be picked up.
#[test]
fn test_drag_tabletop_is_illegal_argument() {
    let (_env, table) = env_with_table();

    let err = table.begin_drag(Point::origin(), &table.tabletop()).unwrap_err();
    assert!(matches!(err, TableError::IllegalArgument(_)));
    assert!(!table.is_dragging());
}

/// Fixed components veto the drag without an error.
#[test]
fn test_fixed_component_returns_none() {
    let mut registry = ComponentRegistry::with_defaults();
    registry.register_strategy(
        ComponentStrategy::component("marker", "Marker")
            .with_surface_design(ComponentOrientation::Default, defaults::NULL_COMPONENT_DESIGN)
            .fixed(),
    );
    let env = TableEnvironment::with_config(TableEnvironmentConfig::new().with_registry(registry));
    let table = env.create_table().unwrap();
    let marker = env.create_component(&ComponentStrategyId::new("marker")).unwrap();
    table.tabletop().add_component(&marker).unwrap();

    assert!(table.begin_drag(Point::origin(), &marker).unwrap().is_none());
    assert!(!table.is_dragging());
    assert_eq!(marker.container(), Some(table.tabletop()));
}

/// Dragging a component that is not on the table is a contract violation.
#[test]
#[should_panic(expected = "is not on")]
fn test_drag_foreign_component_panics() {
    let (env, table) = env_with_table();
    let other = env.create_table().unwrap();
    let card = env.create_card().unwrap();
    other.tabletop().add_component(&card).unwrap();

    let _ = table.begin_drag(Point::origin(), &card);
}
