use indexmap::IndexMap;

use crate::aggregator::Aggregator;
use crate::base::{EntityId, LanguageString};
use crate::config::EngineConfig;
use crate::migration::migrate_visual_model;
use crate::semantic::{
    ClassProfile, InMemorySemanticModel, RelationshipEnd, SemanticClass, SemanticRelationship,
};
use crate::visual::{
    LegacyVisualEntity, LegacyVisualNode, LegacyVisualRelationship, ModelData, Position,
    SchemaVersion, VisualEntity, VisualModel,
};

fn id(value: &str) -> EntityId {
    EntityId::new(value)
}

fn class(value: &str) -> SemanticClass {
    SemanticClass {
        id: id(value),
        ..Default::default()
    }
}

fn relationship(value: &str, domain: &str, range: &str) -> SemanticRelationship {
    SemanticRelationship {
        id: id(value),
        ends: vec![
            RelationshipEnd {
                concept: Some(id(domain)),
                ..Default::default()
            },
            RelationshipEnd {
                concept: Some(id(range)),
                iri: Some(format!("https://example.org/{value}")),
                ..Default::default()
            },
        ],
        ..Default::default()
    }
}

fn aggregator() -> Aggregator {
    let source = InMemorySemanticModel::new("semantic")
        .with_entity(class("c1"))
        .with_entity(class("c2"))
        .with_entity(ClassProfile {
            id: id("p"),
            profiling: vec![id("c1")],
            ..Default::default()
        })
        .with_entity(relationship("r", "c1", "c2"));
    let mut aggregator = Aggregator::new(EngineConfig {
        run_migrations: false,
        ..Default::default()
    });
    aggregator.add_model(source).unwrap();
    aggregator
}

fn legacy_node(visual: &str, represented: &str) -> LegacyVisualEntity {
    LegacyVisualEntity::Node(LegacyVisualNode {
        id: id(visual),
        represented_entity: id(represented),
        position: Position::new(1.0, 2.0),
    })
}

fn legacy_edge(visual: &str, represented: &str) -> LegacyVisualEntity {
    LegacyVisualEntity::Relationship(LegacyVisualRelationship {
        id: id(visual),
        represented_relationship: id(represented),
    })
}

fn legacy_model(entities: Vec<LegacyVisualEntity>) -> VisualModel {
    let mut models_data = IndexMap::new();
    models_data.insert(id("semantic"), ModelData { color: Some("#ff0000".into()) });
    models_data.insert(id("gone"), ModelData { color: Some("#00ff00".into()) });
    let mut model = VisualModel::from_parts(
        id("view"),
        LanguageString::new(),
        true,
        SchemaVersion::V0,
        models_data,
    );
    for entity in entities {
        model.stage_legacy(entity);
    }
    model
}

#[test]
fn test_nodes_get_owning_model() {
    let aggregator = aggregator();
    let mut model = legacy_model(vec![legacy_node("n1", "c1")]);

    let report = migrate_visual_model(&mut model, &aggregator);

    assert_eq!(report.nodes, vec![id("n1")]);
    let node = model.get_visual_entity(&id("n1")).and_then(VisualEntity::as_node).unwrap();
    assert_eq!(node.model, id("semantic"));
    assert_eq!(node.position, Position::new(1.0, 2.0));
    assert!(model.legacy_entities().is_empty());
    assert_eq!(model.initial_schema_version(), SchemaVersion::V1);
}

#[test]
fn test_dangling_node_is_dropped() {
    let aggregator = aggregator();
    let mut model = legacy_model(vec![legacy_node("n1", "missing")]);

    let report = migrate_visual_model(&mut model, &aggregator);

    assert_eq!(report.dropped, vec![id("n1")]);
    assert_eq!(model.entity_count(), 0);
}

#[test]
fn test_relationship_gets_visual_endpoints() {
    let aggregator = aggregator();
    let mut model = legacy_model(vec![
        legacy_edge("e", "r"),
        legacy_node("n1", "c1"),
        legacy_node("n2", "c2"),
    ]);

    migrate_visual_model(&mut model, &aggregator);

    let Some(VisualEntity::Relationship(edge)) = model.get_visual_entity(&id("e")) else {
        panic!("edge was not migrated");
    };
    assert_eq!(edge.visual_source, id("n1"));
    assert_eq!(edge.visual_target, id("n2"));
    assert_eq!(edge.model, id("semantic"));
}

#[test]
fn test_relationship_with_missing_end_is_dropped() {
    let aggregator = aggregator();
    let mut model = legacy_model(vec![legacy_node("n1", "c1"), legacy_edge("e", "r")]);

    let report = migrate_visual_model(&mut model, &aggregator);

    assert_eq!(report.dropped, vec![id("e")]);
    assert!(model.get_visual_entity(&id("e")).is_none());
}

#[test]
fn test_relationship_with_ambiguous_ends_is_dropped() {
    let ambiguous = SemanticRelationship {
        id: id("amb"),
        ends: vec![
            RelationshipEnd {
                concept: Some(id("c1")),
                iri: Some("https://example.org/a".to_string()),
                ..Default::default()
            },
            RelationshipEnd {
                concept: Some(id("c2")),
                iri: Some("https://example.org/b".to_string()),
                ..Default::default()
            },
        ],
        ..Default::default()
    };
    let mut aggregator = aggregator();
    aggregator
        .add_model(InMemorySemanticModel::new("extra").with_entity(ambiguous))
        .unwrap();
    let mut model = legacy_model(vec![
        legacy_node("n1", "c1"),
        legacy_node("n2", "c2"),
        legacy_edge("e", "amb"),
    ]);

    let report = migrate_visual_model(&mut model, &aggregator);

    assert_eq!(report.dropped, vec![id("e")]);
    assert_eq!(report.nodes, vec![id("n1"), id("n2")]);
}

#[test]
fn test_relationship_representing_a_class_is_dropped() {
    let aggregator = aggregator();
    let mut model = legacy_model(vec![legacy_node("n1", "c1"), legacy_edge("e", "c1")]);

    let report = migrate_visual_model(&mut model, &aggregator);

    assert!(report.dropped.contains(&id("e")));
}

#[test]
fn test_profile_edge_is_synthesized() {
    let aggregator = aggregator();
    let mut model = legacy_model(vec![legacy_node("np", "p"), legacy_node("n1", "c1")]);

    let report = migrate_visual_model(&mut model, &aggregator);

    assert_eq!(report.profile_edges.len(), 1);
    let edges: Vec<_> = model
        .entities()
        .filter_map(|entity| match entity {
            VisualEntity::ProfileRelationship(edge) => Some(edge),
            _ => None,
        })
        .collect();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].visual_source, id("np"));
    assert_eq!(edges[0].visual_target, id("n1"));
    assert_eq!(edges[0].entity, id("p"));
}

#[test]
fn test_stale_models_data_is_pruned() {
    let aggregator = aggregator();
    let mut model = legacy_model(Vec::new());

    let report = migrate_visual_model(&mut model, &aggregator);

    assert_eq!(report.pruned_models, vec![id("gone")]);
    assert_eq!(model.get_model_color(&id("semantic")), Some("#ff0000"));
    assert_eq!(model.get_model_color(&id("gone")), None);
}

#[test]
fn test_second_run_is_a_no_op() {
    let aggregator = aggregator();
    let mut model = legacy_model(vec![
        legacy_node("n1", "c1"),
        legacy_node("n2", "c2"),
        legacy_edge("e", "r"),
    ]);
    migrate_visual_model(&mut model, &aggregator);
    let once: Vec<VisualEntity> = model.entities().cloned().collect();

    let report = migrate_visual_model(&mut model, &aggregator);

    assert!(report.skipped);
    let twice: Vec<VisualEntity> = model.entities().cloned().collect();
    assert_eq!(once, twice);
}

#[test]
fn test_current_model_is_not_touched() {
    let aggregator = aggregator();
    let mut model = VisualModel::new("view");
    let report = migrate_visual_model(&mut model, &aggregator);
    assert!(report.skipped);
}
