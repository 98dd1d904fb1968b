//! Semantic entity snapshots.
//!
//! Entities are immutable values: an edit produces a new snapshot that
//! replaces the old one in its owning source.
//!
//! ```text
//! SemanticEntity
//! ├── Class
//! ├── Relationship          (two ends: domain + range)
//! ├── Generalization        (child → parent)
//! ├── ClassProfile          (profiling: [class | class profile])
//! └── RelationshipProfile   (ends each carry profiling: [...])
//! ```

use serde::{Deserialize, Serialize};

use super::ends::domain_and_range;
use crate::base::{EntityId, LanguageString};

// ============================================================================
// KINDS
// ============================================================================

/// The kind of a semantic entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Class,
    Relationship,
    Generalization,
    ClassProfile,
    RelationshipProfile,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Relationship => "relationship",
            Self::Generalization => "generalization",
            Self::ClassProfile => "class-profile",
            Self::RelationshipProfile => "relationship-profile",
        }
    }

    /// Returns true for kinds drawn as nodes.
    pub fn is_class_like(&self) -> bool {
        matches!(self, Self::Class | Self::ClassProfile)
    }

    /// Returns true for kinds drawn as edges between nodes.
    pub fn is_relation_like(&self) -> bool {
        matches!(
            self,
            Self::Relationship | Self::Generalization | Self::RelationshipProfile
        )
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ENTITIES
// ============================================================================

/// Multiplicity of a relationship end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cardinality {
    pub min: u32,
    /// `None` means unbounded.
    pub max: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticClass {
    pub id: EntityId,
    #[serde(default)]
    pub iri: Option<String>,
    #[serde(default)]
    pub name: LanguageString,
    #[serde(default)]
    pub description: LanguageString,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipEnd {
    /// Class (or datatype) at this end.
    #[serde(default)]
    pub concept: Option<EntityId>,
    /// An end with an IRI is the identifying (range) end.
    #[serde(default)]
    pub iri: Option<String>,
    #[serde(default)]
    pub name: LanguageString,
    #[serde(default)]
    pub description: LanguageString,
    #[serde(default)]
    pub cardinality: Option<Cardinality>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticRelationship {
    pub id: EntityId,
    #[serde(default)]
    pub iri: Option<String>,
    #[serde(default)]
    pub name: LanguageString,
    #[serde(default)]
    pub description: LanguageString,
    pub ends: Vec<RelationshipEnd>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Generalization {
    pub id: EntityId,
    #[serde(default)]
    pub iri: Option<String>,
    pub child: EntityId,
    pub parent: EntityId,
}

/// A class profile; `None` fields are inherited from the profiled entities.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassProfile {
    pub id: EntityId,
    #[serde(default)]
    pub iri: Option<String>,
    pub profiling: Vec<EntityId>,
    #[serde(default)]
    pub name: Option<LanguageString>,
    #[serde(default)]
    pub description: Option<LanguageString>,
}

/// One end of a relationship profile; `None` fields are inherited from the
/// same end of the profiled relationships.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipEndProfile {
    #[serde(default)]
    pub concept: Option<EntityId>,
    #[serde(default)]
    pub iri: Option<String>,
    #[serde(default)]
    pub profiling: Vec<EntityId>,
    #[serde(default)]
    pub name: Option<LanguageString>,
    #[serde(default)]
    pub description: Option<LanguageString>,
    #[serde(default)]
    pub cardinality: Option<Cardinality>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipProfile {
    pub id: EntityId,
    pub ends: Vec<RelationshipEndProfile>,
}

/// Any semantic entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SemanticEntity {
    Class(SemanticClass),
    Relationship(SemanticRelationship),
    Generalization(Generalization),
    ClassProfile(ClassProfile),
    RelationshipProfile(RelationshipProfile),
}

impl SemanticEntity {
    pub fn id(&self) -> &EntityId {
        match self {
            Self::Class(c) => &c.id,
            Self::Relationship(r) => &r.id,
            Self::Generalization(g) => &g.id,
            Self::ClassProfile(p) => &p.id,
            Self::RelationshipProfile(p) => &p.id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Class(_) => EntityKind::Class,
            Self::Relationship(_) => EntityKind::Relationship,
            Self::Generalization(_) => EntityKind::Generalization,
            Self::ClassProfile(_) => EntityKind::ClassProfile,
            Self::RelationshipProfile(_) => EntityKind::RelationshipProfile,
        }
    }

    /// Identifiers this entity profiles (empty for non-profiles).
    ///
    /// For relationship profiles this is the union over all ends, in end
    /// order, without duplicates.
    pub fn profiled(&self) -> Vec<&EntityId> {
        match self {
            Self::ClassProfile(p) => p.profiling.iter().collect(),
            Self::RelationshipProfile(p) => {
                let mut out: Vec<&EntityId> = Vec::new();
                for id in p.ends.iter().flat_map(|end| end.profiling.iter()) {
                    if !out.contains(&id) {
                        out.push(id);
                    }
                }
                out
            }
            Self::Class(_) | Self::Relationship(_) | Self::Generalization(_) => Vec::new(),
        }
    }

    /// The display name, if the entity kind carries one.
    ///
    /// On an unresolved profile this is only the local override.
    pub fn name(&self) -> Option<&LanguageString> {
        match self {
            Self::Class(c) => Some(&c.name),
            Self::Relationship(r) => {
                let range_name = domain_and_range(&r.ends)
                    .map(|ends| &ends.range.name)
                    .filter(|name| !name.is_empty());
                Some(range_name.unwrap_or(&r.name))
            }
            Self::Generalization(_) => None,
            Self::ClassProfile(p) => p.name.as_ref(),
            Self::RelationshipProfile(p) => {
                domain_and_range(&p.ends).and_then(|ends| ends.range.name.as_ref())
            }
        }
    }

    pub fn as_class_profile(&self) -> Option<&ClassProfile> {
        match self {
            Self::ClassProfile(p) => Some(p),
            _ => None,
        }
    }
}

impl From<SemanticClass> for SemanticEntity {
    fn from(value: SemanticClass) -> Self {
        Self::Class(value)
    }
}

impl From<SemanticRelationship> for SemanticEntity {
    fn from(value: SemanticRelationship) -> Self {
        Self::Relationship(value)
    }
}

impl From<Generalization> for SemanticEntity {
    fn from(value: Generalization) -> Self {
        Self::Generalization(value)
    }
}

impl From<ClassProfile> for SemanticEntity {
    fn from(value: ClassProfile) -> Self {
        Self::ClassProfile(value)
    }
}

impl From<RelationshipProfile> for SemanticEntity {
    fn from(value: RelationshipProfile) -> Self {
        Self::RelationshipProfile(value)
    }
}
