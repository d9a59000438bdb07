//! Taking snapshots and building components back from them.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::components::{Component, Container};
use crate::core::{ComponentId, ComponentOrientation, MementoError};
use crate::environment::scene::{ContainerContent, Node, Scene};
use crate::environment::TableEnvironment;
use crate::strategies::{ComponentRegistry, ComponentStrategy, ComponentSurfaceDesign};
use crate::table::Table;

use super::types::{ComponentMemento, ContainerMemento, Memento, SurfaceDesignEntry, TableMemento, MEMENTO_VERSION};

// === Snapshots ===

pub(crate) fn snapshot(scene: &Scene, id: ComponentId) -> Memento {
    let node = scene.node(id);
    match &node.content {
        None => Memento::Component(component_snapshot(node)),
        Some(content) => Memento::Container(container_snapshot(scene, node, content)),
    }
}

pub(crate) fn snapshot_table(scene: &Scene, tabletop: ComponentId) -> TableMemento {
    let node = scene.node(tabletop);
    let content = scene.content(tabletop);
    TableMemento {
        version: MEMENTO_VERSION,
        tabletop: container_snapshot(scene, node, content),
    }
}

fn component_snapshot(node: &Node) -> ComponentMemento {
    let mut surface_designs: Vec<SurfaceDesignEntry> = node
        .surface_designs
        .iter()
        .map(|(orientation, design)| SurfaceDesignEntry {
            orientation: *orientation,
            design_id: design.id.clone(),
        })
        .collect();
    surface_designs.sort_by_key(|entry| entry.orientation);

    ComponentMemento {
        version: MEMENTO_VERSION,
        strategy_id: node.strategy.id.clone(),
        origin: node.origin,
        orientation: node.orientation,
        surface_designs,
    }
}

fn container_snapshot(scene: &Scene, node: &Node, content: &ContainerContent) -> ContainerMemento {
    ContainerMemento {
        component: component_snapshot(node),
        layout_id: content.layout.id().clone(),
        children: content.children.iter().map(|&child| snapshot(scene, child)).collect(),
    }
}

// === Restoring ===

type Designs = FxHashMap<ComponentOrientation, ComponentSurfaceDesign>;

/// Check one component memento against the registry.
fn resolve(
    registry: &ComponentRegistry,
    memento: &ComponentMemento,
    container: bool,
) -> Result<(Arc<ComponentStrategy>, Designs), MementoError> {
    if memento.version != MEMENTO_VERSION {
        return Err(MementoError::malformed(format!("unsupported version {}", memento.version)));
    }
    let strategy = registry.strategy(&memento.strategy_id)?;
    if strategy.is_container() != container {
        let expected = if container { "a container" } else { "a component" };
        return Err(MementoError::malformed(format!(
            "strategy {} does not describe {}",
            strategy.id, expected
        )));
    }
    if !strategy.supports(memento.orientation) {
        return Err(MementoError::malformed(format!(
            "orientation {} is not supported by {}",
            memento.orientation, strategy.id
        )));
    }

    let mut designs = Designs::default();
    for entry in &memento.surface_designs {
        if !strategy.supports(entry.orientation) {
            return Err(MementoError::malformed(format!(
                "design for unsupported orientation {} of {}",
                entry.orientation, strategy.id
            )));
        }
        let design = registry.surface_design(&entry.design_id)?;
        if designs.insert(entry.orientation, design).is_some() {
            return Err(MementoError::malformed(format!(
                "orientation {} listed more than once",
                entry.orientation
            )));
        }
    }
    Ok((strategy, designs))
}

pub(crate) fn restore_component(env: &TableEnvironment, memento: &Memento) -> Result<Component, MementoError> {
    let registry = env.registry();
    match memento {
        Memento::Component(component) => {
            let (strategy, designs) = resolve(registry, component, false)?;
            Ok(env.insert(Node::restore(strategy, component.origin, component.orientation, designs, None)))
        }
        Memento::Container(container) => {
            let (strategy, designs) = resolve(registry, &container.component, true)?;
            let layout = registry.layout(&container.layout_id)?;
            let children = restore_children(env, container)?;

            let node = Node::restore(
                strategy,
                container.component.origin,
                container.component.orientation,
                designs,
                Some(layout),
            );
            let restored = Container::from_component(env.insert(node));
            restored
                .add_components(&children)
                .map_err(|err| MementoError::malformed(err.to_string()))?;
            Ok(restored.into_component())
        }
    }
}

fn restore_children(env: &TableEnvironment, container: &ContainerMemento) -> Result<Vec<Component>, MementoError> {
    container
        .children
        .iter()
        .map(|child| restore_component(env, child))
        .collect()
}

pub(crate) fn restore_table(table: &Table, memento: &TableMemento) -> Result<(), MementoError> {
    ensure_not_dragging(table)?;
    if memento.version != MEMENTO_VERSION {
        return Err(MementoError::malformed(format!("unsupported version {}", memento.version)));
    }
    let env = table.table_environment();
    let tabletop = table.tabletop();
    let saved = &memento.tabletop;
    if saved.component.strategy_id != tabletop.strategy().id {
        return Err(MementoError::malformed(format!(
            "tabletop strategy {} does not match {}",
            saved.component.strategy_id,
            tabletop.strategy().id
        )));
    }

    let (_, designs) = resolve(env.registry(), &saved.component, true)?;
    let layout = env.registry().layout(&saved.layout_id)?;
    let children = restore_children(env, saved)?;

    let _lock = env.lock();
    // Again under the lock: another thread may have started a drag.
    ensure_not_dragging(table)?;
    tabletop.remove_all_components();
    tabletop.set_surface_designs(&designs)?;
    tabletop.set_orientation(saved.component.orientation)?;
    tabletop.set_layout(layout)?;
    tabletop.set_origin(saved.component.origin);
    tabletop
        .add_components(&children)
        .map_err(|err| MementoError::malformed(err.to_string()))?;

    tracing::debug!(table = %table.id(), components = memento.tabletop.children.len(), "table restored");
    Ok(())
}

fn ensure_not_dragging(table: &Table) -> Result<(), MementoError> {
    if table.is_dragging() {
        tracing::debug!(table = %table.id(), "memento refused during drag");
        return Err(MementoError::illegal_state("a drag is in progress on this table"));
    }
    Ok(())
}
