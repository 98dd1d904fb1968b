//! End-to-end editing sessions against one package.

use modelsync::actions::{
    ActionError, add_node_to_visual_model, add_relation_to_visual_model, create_entity,
    delete_from_semantic_model, delete_from_visual_model,
};
use modelsync::visual::{NewVisualNode, VisualEntity};

use crate::helpers::fixtures::{
    SOURCE, VIEW, at, attribute, class, class_profile, generalization, id, package, relationship,
};
use crate::helpers::visual_assertions::{
    assert_consistent, nodes_of, profile_edges, relationship_edges,
};

#[test]
fn test_deleted_class_disappears_from_view() {
    let mut aggregator = package(Vec::new());
    let c1 = create_entity(&mut aggregator.view(), &id(SOURCE), class("C1")).unwrap();
    let node = add_node_to_visual_model(&mut aggregator.view(), &c1, at(0.0, 0.0)).unwrap();

    let model = aggregator.active_visual_model().unwrap();
    assert_eq!(model.entity_count(), 1);
    assert_eq!(
        model.get_visual_entity(&node).map(VisualEntity::represented),
        Some(&c1)
    );

    delete_from_semantic_model(&mut aggregator.view(), &c1).unwrap();

    let model = aggregator.active_visual_model().unwrap();
    assert!(model.get_visual_entity(&node).is_none());
    assert_eq!(model.entity_count(), 0);
}

#[test]
fn test_relation_with_missing_end_is_refused() {
    let mut aggregator = package(vec![
        class("C1"),
        class("C2"),
        relationship("R", "C1", "C2"),
    ]);
    add_node_to_visual_model(&mut aggregator.view(), &id("C1"), at(0.0, 0.0)).unwrap();

    let err = add_relation_to_visual_model(&mut aggregator.view(), &id("R")).unwrap_err();

    assert_eq!(
        err,
        ActionError::EndsNotInVisualModel {
            relation: id("R"),
            missing: vec![id("C2")],
        }
    );
    let model = aggregator.active_visual_model().unwrap();
    assert!(relationship_edges(model).is_empty());
    assert_eq!(model.entity_count(), 1);
}

#[test]
fn test_relation_between_visible_ends_is_drawn() {
    let mut aggregator = package(vec![
        class("C1"),
        class("C2"),
        relationship("R", "C1", "C2"),
    ]);
    let n1 = add_node_to_visual_model(&mut aggregator.view(), &id("C1"), at(0.0, 0.0)).unwrap();
    let n2 = add_node_to_visual_model(&mut aggregator.view(), &id("C2"), at(100.0, 0.0)).unwrap();

    // Adding the second end already drew the edge.
    let model = aggregator.active_visual_model().unwrap();
    assert_eq!(relationship_edges(model).len(), 1);
    let auto = model
        .entities()
        .find(|entity| matches!(entity, VisualEntity::Relationship(_)))
        .map(|entity| entity.id().clone())
        .unwrap();
    delete_from_visual_model(&mut aggregator.view(), &[auto]).unwrap();

    add_relation_to_visual_model(&mut aggregator.view(), &id("R")).unwrap();

    let model = aggregator.active_visual_model().unwrap();
    assert_eq!(relationship_edges(model), vec![(id("R"), n1, n2)]);
    assert_consistent(&aggregator, model);
}

#[test]
fn test_profile_edge_is_synthesized_between_visible_nodes() {
    let mut aggregator = package(vec![class("C"), class_profile("P", &["C"])]);
    let model = aggregator.visual_model_mut(&id(VIEW)).unwrap();
    let mut draw = |represented: &str| {
        model
            .add_visual_node(NewVisualNode {
                represented_entity: id(represented),
                model: id(SOURCE),
                position: at(0.0, 0.0),
                content: Vec::new(),
                visual_models: Vec::new(),
            })
            .unwrap()
    };
    let np = draw("P");
    let nc = draw("C");

    aggregator.validate_all();

    let model = aggregator.active_visual_model().unwrap();
    assert_eq!(profile_edges(model), vec![(np, nc)]);

    let again = aggregator.validate_all();
    assert!(again.iter().all(|report| report.is_empty()));
}

#[test]
fn test_generalization_follows_child_to_parent() {
    let mut aggregator = package(vec![
        class("Animal"),
        class("Dog"),
        generalization("G", "Dog", "Animal"),
    ]);
    let animal =
        add_node_to_visual_model(&mut aggregator.view(), &id("Animal"), at(0.0, 0.0)).unwrap();
    let dog = add_node_to_visual_model(&mut aggregator.view(), &id("Dog"), at(0.0, 100.0)).unwrap();

    let model = aggregator.active_visual_model().unwrap();
    assert_eq!(relationship_edges(model), vec![(id("G"), dog, animal)]);
}

#[test]
fn test_attributes_follow_semantic_edits() {
    let mut aggregator = package(vec![class("Person"), attribute("age", "Person")]);
    let node =
        add_node_to_visual_model(&mut aggregator.view(), &id("Person"), at(0.0, 0.0)).unwrap();

    let content = |aggregator: &modelsync::Aggregator| {
        aggregator
            .active_visual_model()
            .unwrap()
            .get_visual_entity(&node)
            .and_then(VisualEntity::as_node)
            .map(|node| node.content.clone())
            .unwrap()
    };
    assert_eq!(content(&aggregator), vec![id("age")]);

    delete_from_semantic_model(&mut aggregator.view(), &id("age")).unwrap();

    assert!(content(&aggregator).is_empty());
    assert!(relationship_edges(aggregator.active_visual_model().unwrap()).is_empty());
}

#[test]
fn test_deleting_class_removes_its_edges() {
    let mut aggregator = package(vec![
        class("C1"),
        class("C2"),
        relationship("R", "C1", "C2"),
        class_profile("P", &["C1"]),
    ]);
    for class in ["C1", "C2", "P"] {
        add_node_to_visual_model(&mut aggregator.view(), &id(class), at(0.0, 0.0)).unwrap();
    }
    let model = aggregator.active_visual_model().unwrap();
    assert_eq!(relationship_edges(model).len(), 1);
    assert_eq!(profile_edges(model).len(), 1);

    delete_from_semantic_model(&mut aggregator.view(), &id("C1")).unwrap();

    let model = aggregator.active_visual_model().unwrap();
    assert!(nodes_of(model, "C1").is_empty());
    assert!(relationship_edges(model).is_empty());
    assert!(profile_edges(model).is_empty());
    assert_eq!(model.entity_count(), 2);
    assert_consistent(&aggregator, model);
}
