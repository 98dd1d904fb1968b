//! Profile resolution.
//!
//! A profile only stores what it overrides. Resolution produces a plain
//! snapshot in which every inherited field has been copied from the
//! profiled entities, walking profile chains until a non-profile entity or
//! an explicit override is found.
//!
//! Results are memoized per resolver, so one resolver should be used for a
//! whole recompute batch and then dropped.

use rustc_hash::FxHashMap;
use std::marker::PhantomData;
use thiserror::Error;

use super::entity::{ClassProfile, RelationshipEndProfile, RelationshipProfile, SemanticEntity};
use crate::base::{EntityId, LanguageString};

/// Why an entity could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The profile chain loops back onto itself.
    #[error("Profiling cycle: {}", format_path(.path))]
    ProfilingCycle { path: Vec<EntityId> },
}

fn format_path(path: &[EntityId]) -> String {
    path.iter()
        .map(EntityId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Memoizing resolver over a raw entity lookup.
pub struct ProfileResolver<'a, F> {
    lookup: F,
    cache: FxHashMap<EntityId, Result<SemanticEntity, ResolveError>>,
    stack: Vec<EntityId>,
    missing: Vec<(EntityId, EntityId)>,
    _raw: PhantomData<&'a SemanticEntity>,
}

impl<'a, F> ProfileResolver<'a, F>
where
    F: Fn(&EntityId) -> Option<&'a SemanticEntity>,
{
    pub fn new(lookup: F) -> Self {
        Self {
            lookup,
            cache: FxHashMap::default(),
            stack: Vec::new(),
            missing: Vec::new(),
            _raw: PhantomData,
        }
    }

    /// Resolve one entity. Returns `None` when the lookup does not know `id`.
    pub fn resolve(&mut self, id: &EntityId) -> Option<Result<SemanticEntity, ResolveError>> {
        if let Some(cached) = self.cache.get(id) {
            return Some(cached.clone());
        }
        let raw = (self.lookup)(id)?;

        if let Some(start) = self.stack.iter().position(|open| open == id) {
            let mut path = self.stack[start..].to_vec();
            path.push(id.clone());
            return Some(Err(ResolveError::ProfilingCycle { path }));
        }

        self.stack.push(id.clone());
        let result = match raw {
            SemanticEntity::ClassProfile(profile) => self.resolve_class_profile(profile),
            SemanticEntity::RelationshipProfile(profile) => {
                self.resolve_relationship_profile(profile)
            }
            SemanticEntity::Class(_)
            | SemanticEntity::Relationship(_)
            | SemanticEntity::Generalization(_) => Ok(raw.clone()),
        };
        self.stack.pop();

        self.cache.insert(id.clone(), result.clone());
        Some(result)
    }

    /// `(profile, profiled)` pairs where the profiled id could not be used,
    /// either because it is unknown or because its kind does not fit.
    pub fn take_missing(&mut self) -> Vec<(EntityId, EntityId)> {
        std::mem::take(&mut self.missing)
    }

    fn resolve_class_profile(
        &mut self,
        profile: &ClassProfile,
    ) -> Result<SemanticEntity, ResolveError> {
        let mut name: Option<LanguageString> = None;
        let mut description: Option<LanguageString> = None;

        for target in &profile.profiling {
            let inherited = match self.resolve(target) {
                None => None,
                Some(Err(err)) => return Err(err),
                Some(Ok(SemanticEntity::Class(class))) => {
                    Some((Some(class.name), Some(class.description)))
                }
                Some(Ok(SemanticEntity::ClassProfile(parent))) => {
                    Some((parent.name, parent.description))
                }
                Some(Ok(_)) => None,
            };
            let Some((parent_name, parent_description)) = inherited else {
                self.missing.push((profile.id.clone(), target.clone()));
                continue;
            };
            if name.is_none() {
                name = parent_name.filter(|text| !text.is_empty());
            }
            if description.is_none() {
                description = parent_description.filter(|text| !text.is_empty());
            }
        }

        let mut resolved = profile.clone();
        resolved.name = Some(profile.name.clone().or(name).unwrap_or_default());
        resolved.description = Some(
            profile
                .description
                .clone()
                .or(description)
                .unwrap_or_default(),
        );
        Ok(SemanticEntity::ClassProfile(resolved))
    }

    fn resolve_relationship_profile(
        &mut self,
        profile: &RelationshipProfile,
    ) -> Result<SemanticEntity, ResolveError> {
        let mut resolved = profile.clone();
        for (index, end) in resolved.ends.iter_mut().enumerate() {
            for target in end.profiling.clone() {
                let parent_end = match self.resolve(&target) {
                    None => None,
                    Some(Err(err)) => return Err(err),
                    Some(Ok(SemanticEntity::Relationship(parent))) => {
                        parent.ends.get(index).map(|parent_end| RelationshipEndProfile {
                            concept: parent_end.concept.clone(),
                            iri: parent_end.iri.clone(),
                            profiling: Vec::new(),
                            name: Some(parent_end.name.clone()),
                            description: Some(parent_end.description.clone()),
                            cardinality: parent_end.cardinality,
                        })
                    }
                    Some(Ok(SemanticEntity::RelationshipProfile(parent))) => {
                        parent.ends.get(index).cloned()
                    }
                    Some(Ok(_)) => None,
                };
                match parent_end {
                    Some(parent_end) => inherit_end(end, parent_end),
                    None => self.missing.push((profile.id.clone(), target)),
                }
            }
            end.name.get_or_insert_with(LanguageString::new);
            end.description.get_or_insert_with(LanguageString::new);
        }
        Ok(SemanticEntity::RelationshipProfile(resolved))
    }
}

fn inherit_end(end: &mut RelationshipEndProfile, parent: RelationshipEndProfile) {
    if end.concept.is_none() {
        end.concept = parent.concept;
    }
    if end.iri.is_none() {
        end.iri = parent.iri;
    }
    if end.cardinality.is_none() {
        end.cardinality = parent.cardinality;
    }
    if end.name.as_ref().is_none_or(LanguageString::is_empty) {
        end.name = parent.name.filter(|text| !text.is_empty()).or(end.name.take());
    }
    if end.description.as_ref().is_none_or(LanguageString::is_empty) {
        end.description = parent
            .description
            .filter(|text| !text.is_empty())
            .or(end.description.take());
    }
}
