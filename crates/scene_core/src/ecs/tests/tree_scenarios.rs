use std::sync::Arc;

use super::Health;
use crate::args;
use crate::ecs::{
    Behaviour, Component, ComponentActivator, Node, NodeActivator, PlainNode, Transform, TreeError,
};
use crate::foundation::math::Vec3;

fn chain(depth: usize) -> Vec<Arc<Node>> {
    let nodes: Vec<Arc<Node>> = (0..depth).map(|level| Node::new(format!("level-{level}"))).collect();
    for pair in nodes.windows(2) {
        pair[0].attach_child(Arc::clone(&pair[1])).unwrap();
    }
    nodes
}

#[test]
fn test_every_node_in_chain_reports_same_root() {
    let nodes = chain(5);
    let root = &nodes[0];

    for node in &nodes {
        assert_eq!(node.root().id(), root.id());
    }
    assert!(root.is_root());
    assert_eq!(
        root.find_child_recursive(nodes[4].id()).unwrap().id(),
        nodes[4].id()
    );
}

#[test]
fn test_create_attach_then_detach_plain_node() {
    let activator = NodeActivator::new();
    let root = Node::new("root");

    let child = root.create_and_attach_child::<PlainNode>(&activator).unwrap();

    assert_eq!(child.parent().unwrap().id(), root.id());
    assert_eq!(root.find_child_recursive(child.id()).unwrap().id(), child.id());

    root.detach_child(child.id()).unwrap();
    assert!(root.find_child_recursive(child.id()).is_none());
}

#[test]
fn test_create_and_attach_child_with_arguments() {
    let activator = NodeActivator::new();
    let root = Node::new("root");

    let child = root
        .create_and_attach_child_with::<PlainNode>(&activator, args![String::from("spawned")])
        .unwrap();
    assert_eq!(child.name(), "spawned");

    let err = root
        .create_and_attach_child_with::<PlainNode>(&activator, args![17_u8])
        .unwrap_err();
    assert!(matches!(err, TreeError::Activation(_)));
    assert_eq!(root.child_count(), 1);
}

#[test]
fn test_create_and_attach_components() {
    let activator = ComponentActivator::new();
    let node = Node::new("ship");

    let transform = node
        .create_and_attach_component_with::<Transform>(&activator, args![Vec3::new(0.0, 1.0, 0.0)])
        .unwrap();
    let behaviour = node.create_and_attach_component::<Behaviour>(&activator).unwrap();

    assert_eq!(transform.owner().unwrap().id(), node.id());
    assert_eq!(behaviour.owner().unwrap().id(), node.id());
    assert_eq!(node.component_count(), 2);
    assert_eq!(
        node.get_component::<Transform>().unwrap().position(),
        Vec3::new(0.0, 1.0, 0.0)
    );
}

#[test]
fn test_component_moves_after_detach() {
    let root = Node::new("root");
    let left = Node::new("left");
    let right = Node::new("right");
    root.attach_children([Arc::clone(&left), Arc::clone(&right)]).unwrap();

    let health = Health::shared(10);
    left.attach_component(health.clone()).unwrap();
    assert!(right.attach_component(health.clone()).is_err());

    let detached = left.detach_component(health.id()).unwrap();
    right.attach_component(detached).unwrap();

    assert_eq!(health.owner().unwrap().id(), right.id());
    assert!(left.get_component::<Health>().is_none());
}

#[test]
fn test_detached_subtree_can_be_reattached_elsewhere() {
    let nodes = chain(3);
    let other = Node::new("other");

    let middle = nodes[0].detach_child(nodes[1].id()).unwrap();
    other.attach_child(middle).unwrap();

    assert_eq!(nodes[2].root().id(), other.id());
    assert!(nodes[0].find_child_recursive(nodes[2].id()).is_none());
}

#[test]
fn test_dropping_root_releases_subtree() {
    let nodes = chain(3);
    let leaf = Arc::downgrade(&nodes[2]);
    let health = Health::shared(1);
    nodes[2].attach_component(health.clone()).unwrap();

    drop(nodes);

    assert!(leaf.upgrade().is_none());
    assert!(health.owner().is_none());
}

#[test]
fn test_node_parented_in_another_tree_is_duplicate() {
    let first_root = Node::new("first");
    let holder = Node::new("holder");
    let moving = Node::new("moving");
    first_root.attach_child(Arc::clone(&holder)).unwrap();
    holder.attach_child(Arc::clone(&moving)).unwrap();

    let second_root = Node::new("second");
    let err = second_root.attach_child(Arc::clone(&moving)).unwrap_err();

    assert!(matches!(err, TreeError::Duplicate { id, holder: held_by } if id == moving.id() && held_by == holder.id()));
    assert_eq!(moving.parent().unwrap().id(), holder.id());
    assert_eq!(moving.root().id(), first_root.id());
    assert_eq!(second_root.child_count(), 0);
}
