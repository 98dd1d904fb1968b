//! Invariants that must hold after any semantic edit.

use rstest::{fixture, rstest};

use modelsync::actions::{add_node_to_visual_model, delete_from_semantic_model};
use modelsync::aggregator::Aggregator;
use modelsync::diagram::project;
use modelsync::migration::migrate_visual_model;
use modelsync::visual::VisualModel;

use crate::helpers::fixtures::{
    VIEW, at, attribute, class, class_profile, generalization, id, package, relationship,
};
use crate::helpers::visual_assertions::assert_consistent;

/// Every concept drawn, with every kind of edge between them, on two views.
#[fixture]
fn drawn() -> Aggregator {
    let mut aggregator = package(vec![
        class("Animal"),
        class("Dog"),
        class("Owner"),
        generalization("isA", "Dog", "Animal"),
        relationship("owns", "Owner", "Dog"),
        relationship("likes", "Dog", "Dog"),
        attribute("name", "Dog"),
        class_profile("Pet", &["Dog"]),
        class_profile("Puppy", &["Pet"]),
    ]);
    aggregator.add_visual_model(VisualModel::new("second")).unwrap();
    for view in [VIEW, "second"] {
        aggregator.view().change_active_visual_model(&id(view)).unwrap();
        for (index, concept) in ["Animal", "Dog", "Owner", "Pet", "Puppy"].iter().enumerate() {
            add_node_to_visual_model(&mut aggregator.view(), &id(concept), at(index as f64, 0.0))
                .unwrap();
        }
    }
    aggregator
}

fn assert_all_consistent(aggregator: &Aggregator) {
    for model in aggregator.visual_models().values() {
        assert_consistent(aggregator, model);
    }
}

#[rstest]
fn test_drawn_package_is_consistent(mut drawn: Aggregator) {
    assert_all_consistent(&drawn);
    assert!(drawn.validate_all().iter().all(|report| report.is_empty()));
}

#[rstest]
#[case::class("Animal")]
#[case::profiled_class("Dog")]
#[case::domain_class("Owner")]
#[case::profile("Pet")]
#[case::profile_of_profile("Puppy")]
#[case::generalization("isA")]
#[case::relationship("owns")]
#[case::self_loop("likes")]
#[case::attribute("name")]
fn test_deletion_leaves_no_dangling_entities(mut drawn: Aggregator, #[case] deleted: &str) {
    delete_from_semantic_model(&mut drawn.view(), &id(deleted)).unwrap();

    assert_all_consistent(&drawn);
    for model in drawn.visual_models().values() {
        assert!(model.get_visual_entities_for_represented(&id(deleted)).is_empty());
    }
}

#[rstest]
#[case("Animal")]
#[case("Dog")]
#[case("Pet")]
#[case("owns")]
fn test_validation_reaches_fixed_point(mut drawn: Aggregator, #[case] deleted: &str) {
    delete_from_semantic_model(&mut drawn.view(), &id(deleted)).unwrap();

    let again = drawn.validate_all();

    assert!(again.iter().all(|report| report.is_empty()), "{again:?}");
}

#[rstest]
fn test_projection_only_references_visible_nodes(drawn: Aggregator) {
    let content = project(&drawn);

    assert_eq!(content.nodes.len(), 5);
    for edge in content.edges.values() {
        assert!(content.nodes.contains_key(&edge.source));
        assert!(content.nodes.contains_key(&edge.target));
    }
}

#[rstest]
fn test_migration_of_current_model_is_a_no_op(drawn: Aggregator) {
    let mut model = drawn.visual_model(&id(VIEW)).unwrap().clone();
    let before: Vec<_> = model.entities().cloned().collect();

    let report = migrate_visual_model(&mut model, &drawn);

    assert!(report.skipped);
    assert_eq!(model.entities().cloned().collect::<Vec<_>>(), before);
}
