//! Packages saved to and opened from disk.

use tempfile::TempDir;

use modelsync::actions::add_node_to_visual_model;
use modelsync::aggregator::Aggregator;
use modelsync::persistence::{
    PersistenceError, load_semantic_model, load_visual_model, save_semantic_model,
    save_visual_model,
};

use crate::helpers::fixtures::{SOURCE, VIEW, at, class, class_profile, id, package};
use crate::helpers::visual_assertions::{nodes_of, profile_edges};

#[test]
fn test_saved_package_reopens_identically() {
    let dir = TempDir::new().unwrap();
    let semantic_path = dir.path().join("semantic.json");
    let view_path = dir.path().join("view.json");

    let mut aggregator = package(vec![class("C"), class_profile("P", &["C"])]);
    add_node_to_visual_model(&mut aggregator.view(), &id("C"), at(10.0, 20.0)).unwrap();
    add_node_to_visual_model(&mut aggregator.view(), &id("P"), at(30.0, 40.0)).unwrap();
    save_semantic_model(aggregator.source(&id(SOURCE)).unwrap(), &semantic_path).unwrap();
    save_visual_model(aggregator.visual_model(&id(VIEW)).unwrap(), &view_path).unwrap();

    let mut reopened = Aggregator::default();
    reopened.add_model(load_semantic_model(&semantic_path).unwrap()).unwrap();
    let report = reopened
        .add_visual_model(load_visual_model(&view_path).unwrap())
        .unwrap();

    assert!(report.is_none());
    assert_eq!(reopened.get_entities().len(), 2);
    let before = aggregator.visual_model(&id(VIEW)).unwrap();
    let after = reopened.visual_model(&id(VIEW)).unwrap();
    assert_eq!(
        after.entities().collect::<Vec<_>>(),
        before.entities().collect::<Vec<_>>()
    );
    assert_eq!(profile_edges(after).len(), 1);
    assert!(reopened.validate_all().iter().all(|report| report.is_empty()));
}

#[test]
fn test_legacy_file_is_migrated_on_open() {
    let dir = TempDir::new().unwrap();
    let view_path = dir.path().join("legacy.json");
    std::fs::write(
        &view_path,
        r#"{
            "identifier": "view",
            "initialSchemaVersion": 0,
            "visualEntities": [
                { "type": "visual-node", "identifier": "nc", "representedEntity": "C",
                  "position": { "x": 0.0, "y": 0.0 } },
                { "type": "visual-node", "identifier": "np", "representedEntity": "P",
                  "position": { "x": 0.0, "y": 0.0 } }
            ]
        }"#,
    )
    .unwrap();

    let mut aggregator = package(Vec::new());
    aggregator.delete_visual_model(&id(VIEW)).unwrap();
    aggregator
        .write_source(&id(SOURCE), |source| {
            source.create_entity(class("C"))?;
            source.create_entity(class_profile("P", &["C"]))
        })
        .unwrap();
    aggregator.finish_loading();
    let report = aggregator
        .add_visual_model(load_visual_model(&view_path).unwrap())
        .unwrap()
        .unwrap();

    assert_eq!(report.nodes, vec![id("nc"), id("np")]);
    assert_eq!(report.profile_edges.len(), 1);
    let model = aggregator.active_visual_model().unwrap();
    assert_eq!(nodes_of(model, "P"), vec![id("np")]);
    assert_eq!(profile_edges(model), vec![(id("np"), id("nc"))]);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();

    let err = load_visual_model(dir.path().join("absent.json")).unwrap_err();

    assert!(matches!(err, PersistenceError::Io(_)));
}
