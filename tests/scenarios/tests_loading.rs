//! Opening packages stored in the old and current visual schema.

use modelsync::aggregator::Aggregator;
use modelsync::persistence::{read_visual_model, write_visual_model};
use modelsync::semantic::InMemorySemanticModel;
use modelsync::visual::SchemaVersion;

use crate::helpers::fixtures::{SOURCE, VIEW, class, class_profile, id, relationship};
use crate::helpers::visual_assertions::{
    assert_consistent, nodes_of, profile_edges, relationship_edges,
};

const LEGACY_VIEW: &str = r##"{
    "identifier": "view",
    "initialSchemaVersion": 0,
    "modelsData": {
        "semantic": { "color": "#aabbcc" },
        "deleted-source": { "color": "#000000" }
    },
    "visualEntities": [
        { "type": "visual-node", "identifier": "np", "representedEntity": "P",
          "position": { "x": 0.0, "y": 0.0 } },
        { "type": "visual-node", "identifier": "nc", "representedEntity": "C",
          "position": { "x": 200.0, "y": 0.0 } },
        { "type": "visual-node", "identifier": "nd", "representedEntity": "D",
          "position": { "x": 200.0, "y": 200.0 } },
        { "type": "visual-node", "identifier": "ghost", "representedEntity": "gone",
          "position": { "x": 0.0, "y": 0.0 } },
        { "type": "visual-relationship", "identifier": "er", "representedRelationship": "R" }
    ]
}"##;

fn open_legacy() -> Aggregator {
    let mut aggregator = Aggregator::default();
    aggregator
        .add_model(InMemorySemanticModel::from_entities(
            SOURCE,
            None,
            vec![
                class("C"),
                class("D"),
                class_profile("P", &["C"]),
                relationship("R", "C", "D"),
            ],
        ))
        .unwrap();
    let model = read_visual_model(LEGACY_VIEW.as_bytes()).unwrap();
    aggregator.add_visual_model(model).unwrap();
    aggregator.finish_loading();
    aggregator
}

#[test]
fn test_legacy_view_gets_one_profile_edge() {
    let aggregator = open_legacy();
    let model = aggregator.visual_model(&id(VIEW)).unwrap();

    assert_eq!(model.initial_schema_version(), SchemaVersion::V1);
    assert_eq!(profile_edges(model), vec![(id("np"), id("nc"))]);
}

#[test]
fn test_legacy_view_is_fully_migrated() {
    let aggregator = open_legacy();
    let model = aggregator.visual_model(&id(VIEW)).unwrap();

    assert!(model.legacy_entities().is_empty());
    assert!(nodes_of(model, "gone").is_empty());
    assert_eq!(relationship_edges(model), vec![(id("R"), id("nc"), id("nd"))]);
    assert_eq!(model.get_model_color(&id(SOURCE)), Some("#aabbcc"));
    assert_eq!(model.get_model_color(&id("deleted-source")), None);
    for node in ["np", "nc", "nd"] {
        let node = model.get_visual_entity(&id(node)).and_then(|e| e.as_node()).unwrap();
        assert_eq!(node.model, id(SOURCE));
    }
    assert_consistent(&aggregator, model);
}

#[test]
fn test_migrated_view_is_already_valid() {
    let mut aggregator = open_legacy();

    let reports = aggregator.validate_all();

    assert!(reports.iter().all(|report| report.is_empty()), "{reports:?}");
}

#[test]
fn test_migrated_view_is_written_in_current_schema() {
    let aggregator = open_legacy();
    let written = write_visual_model(aggregator.visual_model(&id(VIEW)).unwrap()).unwrap();

    let reread = read_visual_model(&written).unwrap();

    assert_eq!(reread.initial_schema_version(), SchemaVersion::V1);
    assert_eq!(reread.entity_count(), 5);
}

#[test]
fn test_migrations_can_be_disabled() {
    let config = modelsync::EngineConfig {
        run_migrations: false,
        ..Default::default()
    };
    let mut aggregator = Aggregator::new(config);
    let model = read_visual_model(LEGACY_VIEW.as_bytes()).unwrap();

    let report = aggregator.add_visual_model(model).unwrap();
    let loaded = aggregator.finish_loading();

    assert!(report.is_none());
    assert!(loaded.migrations.is_empty());
    let model = aggregator.visual_model(&id(VIEW)).unwrap();
    assert_eq!(model.initial_schema_version(), SchemaVersion::V0);
    assert_eq!(model.legacy_entities().len(), 5);
}

#[test]
fn test_view_loaded_before_its_source_keeps_content() {
    let mut aggregator = Aggregator::default();
    let model = read_visual_model(LEGACY_VIEW.as_bytes()).unwrap();
    let report = aggregator.add_visual_model(model).unwrap();
    aggregator
        .add_model(InMemorySemanticModel::from_entities(
            SOURCE,
            None,
            vec![
                class("C"),
                class("D"),
                class_profile("P", &["C"]),
                relationship("R", "C", "D"),
            ],
        ))
        .unwrap();

    assert!(report.is_none());
    assert_eq!(
        aggregator.visual_model(&id(VIEW)).unwrap().legacy_entities().len(),
        5
    );

    let loaded = aggregator.finish_loading();

    assert_eq!(loaded.migrations.len(), 1);
    assert_eq!(loaded.migrations[0].dropped, vec![id("ghost")]);
    let model = aggregator.visual_model(&id(VIEW)).unwrap();
    assert_eq!(model.initial_schema_version(), SchemaVersion::V1);
    assert_eq!(model.entity_count(), 5);
    assert_eq!(relationship_edges(model), vec![(id("R"), id("nc"), id("nd"))]);
    assert_eq!(profile_edges(model), vec![(id("np"), id("nc"))]);
    assert_consistent(&aggregator, model);
}

#[test]
fn test_unmigrated_view_is_written_back_unchanged_while_loading() {
    let mut aggregator = Aggregator::default();
    aggregator
        .add_visual_model(read_visual_model(LEGACY_VIEW.as_bytes()).unwrap())
        .unwrap();

    let written = write_visual_model(aggregator.visual_model(&id(VIEW)).unwrap()).unwrap();
    let reread = read_visual_model(&written).unwrap();

    assert_eq!(reread.initial_schema_version(), SchemaVersion::V0);
    assert_eq!(reread.legacy_entities().len(), 5);
}
