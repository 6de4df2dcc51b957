use std::sync::Arc;

use super::{Armor, Health};
use crate::ecs::{Component, ComponentRef, Node};

/// root(Health 1) -> middle(Health 2, Armor) -> leaf(Health 3)
struct Fixture {
    root: Arc<Node>,
    middle: Arc<Node>,
    leaf: Arc<Node>,
    healths: [Arc<Health>; 3],
}

fn fixture() -> Fixture {
    let root = Node::new("root");
    let middle = Node::new("middle");
    let leaf = Node::new("leaf");
    root.attach_child(Arc::clone(&middle)).unwrap();
    middle.attach_child(Arc::clone(&leaf)).unwrap();

    let healths = [Health::shared(1), Health::shared(2), Health::shared(3)];
    root.attach_component(healths[0].clone()).unwrap();
    middle.attach_component(healths[1].clone()).unwrap();
    middle.attach_component(Armor::shared()).unwrap();
    leaf.attach_component(healths[2].clone()).unwrap();

    Fixture {
        root,
        middle,
        leaf,
        healths,
    }
}

fn points(found: &[Arc<Health>]) -> Vec<u32> {
    let mut points: Vec<u32> = found.iter().map(|health| health.points).collect();
    points.sort_unstable();
    points
}

#[test]
fn test_local_search_is_type_filtered() {
    let fx = fixture();
    assert_eq!(points(&fx.middle.get_components::<Health>()), vec![2]);
    assert_eq!(fx.middle.get_component::<Health>().unwrap().points, 2);
    assert_eq!(fx.middle.component_count(), 2);
}

#[test]
fn test_local_search_honours_exclusions() {
    let fx = fixture();
    let excluded = [fx.healths[1].id()];
    assert!(fx.middle.get_component_excluding::<Health>(&excluded).is_none());
    assert!(fx.middle.get_components_excluding::<Health>(&excluded).is_empty());
}

#[test]
fn test_parent_search_climbs_until_found() {
    let fx = fixture();
    let excluded = [fx.healths[2].id(), fx.healths[1].id()];

    let found = fx.leaf.get_component_from_parents_excluding::<Health>(&excluded).unwrap();
    assert_eq!(found.points, 1);
}

#[test]
fn test_parent_search_stops_at_inactive_ancestor() {
    let fx = fixture();
    fx.middle.set_active(false);
    let excluded = [fx.healths[2].id()];

    assert!(fx.leaf.get_component_from_parents_excluding::<Health>(&excluded).is_none());
}

#[test]
fn test_parents_union_covers_two_levels_only() {
    let fx = fixture();
    assert_eq!(points(&fx.leaf.get_components_from_parents::<Health>()), vec![2, 3]);

    fx.middle.set_active(false);
    assert_eq!(points(&fx.leaf.get_components_from_parents::<Health>()), vec![3]);
}

#[test]
fn test_children_search_descends_through_active_nodes() {
    let fx = fixture();
    let excluded = [fx.healths[0].id(), fx.healths[1].id()];

    let found = fx.root.get_component_from_children_excluding::<Health>(&excluded).unwrap();
    assert_eq!(found.points, 3);

    fx.middle.set_active(false);
    assert!(fx.root.get_component_from_children_excluding::<Health>(&excluded).is_none());
}

#[test]
fn test_children_union_skips_inactive_subtree() {
    let fx = fixture();
    assert_eq!(points(&fx.root.get_components_from_children::<Health>()), vec![1, 2, 3]);

    fx.middle.set_active(false);
    fx.leaf.set_active(true);
    assert_eq!(points(&fx.root.get_components_from_children::<Health>()), vec![1]);
}

#[test]
fn test_searches_on_empty_tree_are_empty() {
    let lonely = Node::new("lonely");
    assert!(lonely.get_component::<Health>().is_none());
    assert!(lonely.get_component_from_parents::<Health>().is_none());
    assert!(lonely.get_component_from_children::<Health>().is_none());
    assert!(lonely.get_components_from_children::<Health>().is_empty());
}

#[test]
fn test_found_component_is_the_attached_instance() {
    let fx = fixture();
    let found = fx.root.get_component::<Health>().unwrap();
    assert!(Arc::ptr_eq(&found, &fx.healths[0]));

    let as_ref: ComponentRef = found;
    assert_eq!(fx.root.find_component(as_ref.id()).unwrap().id(), as_ref.id());
}

#[test]
fn test_exclusion_picks_another_instance() {
    let node = Node::new("twins");
    let first = Health::shared(10);
    let second = Health::shared(20);
    node.attach_components([first.clone() as ComponentRef, second.clone() as ComponentRef]).unwrap();

    for (excluded, expected) in [(&first, 20), (&second, 10)] {
        let found = node.get_component_excluding::<Health>(&[excluded.id()]).unwrap();
        assert_eq!(found.points, expected);
    }
    assert!(node
        .get_component_excluding::<Health>(&[first.id(), second.id()])
        .is_none());
}

#[test]
fn test_concurrent_searches_on_stable_tree_agree() {
    let fx = fixture();
    let leaf_id = fx.leaf.id();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    let found = points(&fx.root.get_components_from_children::<Health>());
                    let leaf = fx.root.find_child_recursive(leaf_id).map(|node| node.id());
                    let nearest = fx.leaf.get_component_from_parents::<Health>().map(|h| h.points);
                    (found, leaf, nearest)
                })
            })
            .collect();

        for handle in handles {
            let (found, leaf, nearest) = handle.join().unwrap();
            assert_eq!(found, vec![1, 2, 3]);
            assert_eq!(leaf, Some(leaf_id));
            assert_eq!(nearest, Some(3));
        }
    });
}
