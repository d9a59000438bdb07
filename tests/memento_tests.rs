//! Memento integration tests.
//!
//! Snapshots of components and tables, their encodings, and the ways a
//! memento can fail to restore.

mod common;

use common::{cards, env_with_table, null_component, null_container};
use rust_tabletop::core::{
    ComponentOrientation, ComponentStrategyId, ComponentSurfaceDesignId, Dimension, MementoError, Point,
    TableEnvironmentConfig,
};
use rust_tabletop::memento::{Memento, SurfaceDesignEntry, TableMemento, MEMENTO_VERSION};
use rust_tabletop::strategies::{AccordianDirection, ComponentRegistry, ComponentSurfaceDesign, ContainerLayout};
use rust_tabletop::{Component, TableEnvironment};

/// A pile of four cards, the second one face up, at (40, 60).
fn sample_pile(env: &TableEnvironment) -> (Component, Vec<Component>) {
    let pile = env.create_card_pile().unwrap();
    pile.set_origin(Point::new(40, 60));
    let hand = cards(env, 4);
    hand[1].set_orientation(ComponentOrientation::Face).unwrap();
    pile.add_components(&hand).unwrap();
    (pile.into_component(), hand)
}

fn card_memento(env: &TableEnvironment) -> Memento {
    env.create_card().unwrap().create_memento()
}

// =============================================================================
// Round Trip Tests
// =============================================================================

/// A restored tree has the same shape, bounds, orientations and designs.
#[test]
fn test_component_tree_round_trip() {
    let env = TableEnvironment::new();
    let (pile, hand) = sample_pile(&env);
    let memento = pile.create_memento();
    assert_eq!(memento.component_count(), 5);

    let restored = env.create_component_from_memento(&memento).unwrap();
    let restored = restored.as_container().unwrap();

    assert_ne!(restored.as_component(), &pile);
    assert_eq!(restored.bounds(), pile.bounds());
    assert_eq!(restored.layout(), ContainerLayout::stacked());
    assert_eq!(restored.component_count(), hand.len());
    for (copy, original) in restored.components().iter().zip(&hand) {
        assert_eq!(copy.bounds(), original.bounds());
        assert_eq!(copy.orientation(), original.orientation());
        assert_eq!(copy.surface_designs(), original.surface_designs());
        assert_eq!(copy.strategy().id, original.strategy().id);
    }
    assert_eq!(restored.create_memento(), memento);
}

/// Taking a snapshot leaves the tree alone.
#[test]
fn test_snapshot_has_no_side_effects() {
    let (env, table) = env_with_table();
    let (pile, hand) = sample_pile(&env);
    table.tabletop().add_component(&pile).unwrap();
    let before: Vec<_> = hand.iter().map(Component::bounds).collect();

    let _ = table.create_memento();
    let _ = pile.create_memento();

    let after: Vec<_> = hand.iter().map(Component::bounds).collect();
    assert_eq!(before, after);
    assert_eq!(pile.container(), Some(table.tabletop()));
}

/// Mementos restore into a different environment with the same registry.
#[test]
fn test_restore_into_other_environment() {
    let source = TableEnvironment::new();
    let (pile, _) = sample_pile(&source);
    let memento = pile.create_memento();

    let target = TableEnvironment::with_config(TableEnvironmentConfig::new().with_seed(99));
    let restored = target.create_component_from_memento(&memento).unwrap();

    assert_eq!(restored.table_environment(), &target);
    assert_eq!(restored.bounds(), pile.bounds());
}

/// Surface designs outside the defaults survive when the registry knows them.
#[test]
fn test_custom_surface_design_round_trip() {
    let red = ComponentSurfaceDesign::new("card.back.red", Dimension::new(71, 96));
    let mut registry = ComponentRegistry::with_defaults();
    registry.register_surface_design(red.clone());
    let env = TableEnvironment::with_config(TableEnvironmentConfig::new().with_registry(registry));

    let card = env.create_card().unwrap();
    card.set_surface_design(ComponentOrientation::Back, red.clone()).unwrap();
    let restored = env.create_component_from_memento(&card.create_memento()).unwrap();

    assert_eq!(restored.surface_design(ComponentOrientation::Back), Some(red));
}

// =============================================================================
// Encoding Tests
// =============================================================================

/// Mementos survive JSON.
#[test]
fn test_json_encoding() {
    let env = TableEnvironment::new();
    let (pile, _) = sample_pile(&env);
    let memento = pile.create_memento();

    let json = serde_json::to_string(&memento).unwrap();
    let decoded: Memento = serde_json::from_str(&json).unwrap();

    assert_eq!(decoded, memento);
    assert!(json.contains("card_pile"));
}

/// Table mementos survive the binary encoding.
#[test]
fn test_table_binary_encoding() {
    let (env, table) = env_with_table();
    let (pile, _) = sample_pile(&env);
    table.tabletop().add_component(&pile).unwrap();
    let memento = table.create_memento();

    let bytes = memento.to_bytes().unwrap();
    assert_eq!(TableMemento::from_bytes(&bytes).unwrap(), memento);
    assert!(matches!(TableMemento::from_bytes(&bytes[..3]), Err(MementoError::Encoding(_))));
}

// =============================================================================
// Malformed Memento Tests
// =============================================================================

/// A memento from a different format version is rejected.
#[test]
fn test_reject_unknown_version() {
    let env = TableEnvironment::new();
    let mut memento = card_memento(&env);
    if let Memento::Component(component) = &mut memento {
        component.version = MEMENTO_VERSION + 1;
    }

    assert!(matches!(env.create_component_from_memento(&memento), Err(MementoError::Malformed(_))));
}

/// A container strategy in a leaf memento (or the reverse) is rejected.
#[test]
fn test_reject_kind_mismatch() {
    let env = TableEnvironment::new();
    let mut memento = null_component(&env).create_memento();
    if let Memento::Component(component) = &mut memento {
        component.strategy_id = ComponentStrategyId::new("null_container");
    }

    assert!(matches!(env.create_component_from_memento(&memento), Err(MementoError::Malformed(_))));
}

/// Orientations the strategy does not support are rejected.
#[test]
fn test_reject_unsupported_orientation() {
    let env = TableEnvironment::new();
    let mut memento = card_memento(&env);
    if let Memento::Component(component) = &mut memento {
        component.orientation = ComponentOrientation::Default;
    }

    assert!(matches!(env.create_component_from_memento(&memento), Err(MementoError::Malformed(_))));
}

/// One design per orientation.
#[test]
fn test_reject_duplicate_orientation() {
    let env = TableEnvironment::new();
    let mut memento = card_memento(&env);
    if let Memento::Component(component) = &mut memento {
        component.surface_designs.push(SurfaceDesignEntry {
            orientation: ComponentOrientation::Back,
            design_id: ComponentSurfaceDesignId::new("card.face"),
        });
    }

    assert!(matches!(env.create_component_from_memento(&memento), Err(MementoError::Malformed(_))));
}

/// Ids the registry does not know are reported with the lookup error.
#[test]
fn test_reject_unknown_ids() {
    let env = TableEnvironment::new();

    let mut memento = card_memento(&env);
    if let Memento::Component(component) = &mut memento {
        component.strategy_id = ComponentStrategyId::new("dice");
    }
    let err = env.create_component_from_memento(&memento).unwrap_err();
    assert!(matches!(err, MementoError::UnknownId(_)));
    assert!(err.to_string().contains("dice"));

    let mut memento = card_memento(&env);
    if let Memento::Component(component) = &mut memento {
        component.surface_designs[0].design_id = ComponentSurfaceDesignId::new("card.back.plaid");
    }
    assert!(matches!(env.create_component_from_memento(&memento), Err(MementoError::UnknownId(_))));
}

/// A bad child fails the whole restore.
#[test]
fn test_reject_bad_child() {
    let env = TableEnvironment::new();
    let (pile, _) = sample_pile(&env);
    let mut memento = pile.create_memento();
    if let Memento::Container(container) = &mut memento {
        if let Memento::Component(child) = &mut container.children[2] {
            child.version = 0;
        }
    }

    assert!(env.create_component_from_memento(&memento).is_err());
}

// =============================================================================
// Table Memento Tests
// =============================================================================

/// Setting a table's memento replaces its contents.
#[test]
fn test_set_table_memento() {
    let (env, table) = env_with_table();
    let fan = null_container(&env);
    fan.set_layout(ContainerLayout::accordian(AccordianDirection::Right)).unwrap();
    fan.add_components(&cards(&env, 3)).unwrap();
    table.tabletop().add_component(&fan).unwrap();
    let memento = table.create_memento();

    let stray = null_component(&env);
    table.tabletop().remove_all_components();
    table.tabletop().add_component(&stray).unwrap();

    table.set_memento(&memento).unwrap();

    assert_eq!(stray.container(), None);
    assert_eq!(table.tabletop().component_count(), 1);
    let restored = table.tabletop().component(0);
    let restored = restored.as_container().unwrap();
    assert_eq!(restored.layout(), ContainerLayout::accordian(AccordianDirection::Right));
    assert_eq!(restored.bounds(), fan.bounds());
    assert_eq!(table.create_memento(), memento);
}

/// A whole table can be recreated in a fresh environment.
#[test]
fn test_create_table_from_memento() {
    let (env, table) = env_with_table();
    let (pile, _) = sample_pile(&env);
    table.tabletop().add_component(&pile).unwrap();
    let memento = table.create_memento();

    let other = TableEnvironment::new();
    let copy = other.create_table_from_memento(&memento).unwrap();

    assert_eq!(copy.table_environment(), &other);
    assert_eq!(copy.create_memento(), memento);
    assert_eq!(copy.component_at(Point::new(41, 61)).map(|c| c.orientation()), Some(ComponentOrientation::Back));
}

/// A table memento that fails validation leaves the table untouched.
#[test]
fn test_rejected_table_memento_changes_nothing() {
    let (env, table) = env_with_table();
    let card = env.create_card().unwrap();
    table.tabletop().add_component(&card).unwrap();

    let mut memento = table.create_memento();
    memento.version = 0;

    assert!(matches!(table.set_memento(&memento), Err(MementoError::Malformed(_))));
    assert_eq!(table.tabletop().components(), vec![card]);
}

/// A table memento is refused mid-drag; cancelling puts the card back once.
#[test]
fn test_set_table_memento_refused_during_drag() {
    let (env, table) = env_with_table();
    let card = env.create_card().unwrap();
    card.set_location(Point::new(200, 200));
    table.tabletop().add_component(&card).unwrap();
    let saved = table.create_memento();

    let mut drag = table.begin_drag(Point::new(210, 210), &card).unwrap().unwrap();
    drag.drag(Point::new(400, 400)).unwrap();

    assert!(matches!(table.set_memento(&saved), Err(MementoError::IllegalState(_))));
    assert!(table.is_dragging());
    assert_eq!(drag.components(), &[card.clone()]);

    drag.cancel().unwrap();
    assert_eq!(table.tabletop().components(), vec![card.clone()]);
    assert_eq!(card.location(), Point::new(200, 200));

    // Once the drag is over the same memento applies.
    table.set_memento(&saved).unwrap();
    assert_eq!(table.tabletop().component_count(), 1);
    assert_eq!(table.create_memento(), saved);
}
