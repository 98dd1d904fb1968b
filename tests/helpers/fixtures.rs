//! Semantic packages shared by the integration tests.

use modelsync::aggregator::Aggregator;
use modelsync::base::{EntityId, LanguageString};
use modelsync::semantic::{
    ClassProfile, Generalization, InMemorySemanticModel, RelationshipEnd, SemanticClass,
    SemanticEntity, SemanticRelationship,
};
use modelsync::visual::{Position, VisualModel};

pub const SOURCE: &str = "semantic";
pub const VIEW: &str = "view";

pub fn id(value: &str) -> EntityId {
    EntityId::new(value)
}

pub fn at(x: f64, y: f64) -> Position {
    Position::new(x, y)
}

pub fn text(value: &str) -> LanguageString {
    LanguageString::from([("en".into(), value.to_string())])
}

pub fn class(value: &str) -> SemanticEntity {
    SemanticClass {
        id: id(value),
        name: text(value),
        ..Default::default()
    }
    .into()
}

pub fn relationship(value: &str, domain: &str, range: &str) -> SemanticEntity {
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
    .into()
}

/// A relationship whose range is not a class: drawn as node content.
pub fn attribute(value: &str, domain: &str) -> SemanticEntity {
    SemanticRelationship {
        id: id(value),
        ends: vec![
            RelationshipEnd {
                concept: Some(id(domain)),
                ..Default::default()
            },
            RelationshipEnd {
                concept: None,
                iri: Some(format!("https://example.org/{value}")),
                ..Default::default()
            },
        ],
        ..Default::default()
    }
    .into()
}

pub fn generalization(value: &str, child: &str, parent: &str) -> SemanticEntity {
    Generalization {
        id: id(value),
        iri: None,
        child: id(child),
        parent: id(parent),
    }
    .into()
}

pub fn class_profile(value: &str, profiling: &[&str]) -> SemanticEntity {
    ClassProfile {
        id: id(value),
        profiling: profiling.iter().copied().map(id).collect(),
        ..Default::default()
    }
    .into()
}

/// One writable source and one empty, active view.
pub fn package(entities: Vec<SemanticEntity>) -> Aggregator {
    let mut aggregator = Aggregator::default();
    aggregator
        .add_model(InMemorySemanticModel::from_entities(SOURCE, None, entities))
        .unwrap();
    aggregator.add_visual_model(VisualModel::new(VIEW)).unwrap();
    aggregator
}
