use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace, warn};

use super::delta::{AggregatedEntities, AggregatedEntityWrapper, AggregatorDelta, touched_ids};
use super::error::AggregatorError;
use super::view::AggregatorView;
use super::warnings::{Warning, WarningKind};
use crate::base::{EntityId, EventEmitter, ModelId, SubscriptionId};
use crate::config::EngineConfig;
use crate::migration::{MigrationReport, migrate_visual_model};
use crate::semantic::{
    EntitySource, ProfileResolver, RelationEnds, SemanticEntity, SourceError,
    WritableEntitySource, relation_ends,
};
use crate::validation::{ValidationReport, validate_visual_model};
use crate::visual::{SchemaVersion, VisualModel};

type Sources = IndexMap<ModelId, Box<dyn EntitySource>>;
type Snapshots = FxHashMap<ModelId, IndexMap<EntityId, SemanticEntity>>;

/// What [`Aggregator::finish_loading`] changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadingReport {
    pub migrations: Vec<MigrationReport>,
    pub validations: Vec<ValidationReport>,
}

/// Merges entity sources and owns the visual models drawn over them.
///
/// All writes to sources must go through [`write_source`](Self::write_source),
/// [`modify_source`](Self::modify_source) or be followed by
/// [`refresh_source`](Self::refresh_source); otherwise the aggregated view
/// and the visual models stay stale.
pub struct Aggregator {
    config: EngineConfig,
    sources: Sources,
    /// Source content as of the last propagation.
    snapshots: Snapshots,
    entities: AggregatedEntities,
    /// Reverse profile index: profiled id -> profiles referring to it.
    profiled_by: FxHashMap<EntityId, FxHashSet<EntityId>>,
    /// Forward profile index, used to keep `profiled_by` in sync.
    profiles_of: FxHashMap<EntityId, Vec<EntityId>>,
    warnings: Vec<Warning>,
    visual_models: IndexMap<ModelId, VisualModel>,
    active_visual_model: Option<ModelId>,
    /// Set until [`finish_loading`](Self::finish_loading); older-schema
    /// visual models wait for every source while it is set.
    loading: bool,
    events: EventEmitter<AggregatorDelta, Aggregator>,
}

impl Aggregator {
    /// Create an empty aggregator, ready to load a package.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            sources: IndexMap::new(),
            snapshots: FxHashMap::default(),
            entities: IndexMap::new(),
            profiled_by: FxHashMap::default(),
            profiles_of: FxHashMap::default(),
            warnings: Vec::new(),
            visual_models: IndexMap::new(),
            active_visual_model: None,
            loading: true,
            events: EventEmitter::new(),
        }
    }

    /// Configuration the aggregator was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// A view bound to this aggregator.
    pub fn view(&mut self) -> AggregatorView<'_> {
        AggregatorView::new(self)
    }

    // ── Entity sources ──────────────────────────────────────────────

    /// Register an entity source; its entities are aggregated immediately.
    pub fn add_model<S>(&mut self, source: S) -> Result<AggregatorDelta, AggregatorError>
    where
        S: EntitySource + 'static,
    {
        self.add_boxed_model(Box::new(source))
    }

    /// Register an already boxed entity source.
    ///
    /// Fails with [`AggregatorError::DuplicateModel`] if a source or visual
    /// model with the same id is registered.
    pub fn add_boxed_model(
        &mut self,
        source: Box<dyn EntitySource>,
    ) -> Result<AggregatorDelta, AggregatorError> {
        let id = source.id().clone();
        if self.sources.contains_key(&id) || self.visual_models.contains_key(&id) {
            return Err(AggregatorError::DuplicateModel(id));
        }
        let snapshot = source.entities().clone();
        let touched: Vec<EntityId> = snapshot.keys().cloned().collect();
        debug!(model = %id, entities = touched.len(), "registering source model");

        self.sources.insert(id.clone(), source);
        self.snapshots.insert(id, snapshot);
        Ok(self.propagate(touched))
    }

    /// Unregister a source. Identifiers only it defined become removed.
    pub fn delete_model(&mut self, id: &ModelId) -> Result<Box<dyn EntitySource>, AggregatorError> {
        let source = self
            .sources
            .shift_remove(id)
            .ok_or_else(|| AggregatorError::UnknownModel(id.clone()))?;
        let touched: Vec<EntityId> = self
            .snapshots
            .remove(id)
            .map(|snapshot| snapshot.into_keys().collect())
            .unwrap_or_default();
        debug!(model = %id, entities = touched.len(), "unregistering source model");
        self.propagate(touched);
        Ok(source)
    }

    /// A registered source, read-only.
    pub fn source(&self, id: &ModelId) -> Option<&dyn EntitySource> {
        self.sources.get(id).map(|source| source.as_ref())
    }

    /// Source ids in registration order, which is also lookup priority.
    pub fn source_ids(&self) -> impl Iterator<Item = &ModelId> {
        self.sources.keys()
    }

    /// Check whether a source with this id is registered.
    pub fn has_source(&self, id: &ModelId) -> bool {
        self.sources.contains_key(id)
    }

    /// Run `edit` against a source, then propagate whatever it changed.
    pub fn modify_source<R>(
        &mut self,
        id: &ModelId,
        edit: impl FnOnce(&mut dyn EntitySource) -> R,
    ) -> Result<R, AggregatorError> {
        let source = self
            .sources
            .get_mut(id)
            .ok_or_else(|| AggregatorError::UnknownModel(id.clone()))?;
        let result = edit(source.as_mut());
        self.refresh_source(id)?;
        Ok(result)
    }

    /// Run `edit` against the write capability of a source.
    ///
    /// Fails with [`AggregatorError::ReadOnlySource`] before anything is
    /// touched if the source is not writable. Whatever the edit managed to
    /// change is propagated even when it returns an error.
    pub fn write_source<R>(
        &mut self,
        id: &ModelId,
        edit: impl FnOnce(&mut dyn WritableEntitySource) -> Result<R, SourceError>,
    ) -> Result<R, AggregatorError> {
        let source = self
            .sources
            .get_mut(id)
            .ok_or_else(|| AggregatorError::UnknownModel(id.clone()))?;
        let writable = source
            .as_writable()
            .ok_or_else(|| AggregatorError::ReadOnlySource(id.clone()))?;
        let result = edit(writable);
        self.refresh_source(id)?;
        Ok(result?)
    }

    /// Diff a source against its last snapshot and propagate the difference.
    pub fn refresh_source(&mut self, id: &ModelId) -> Result<AggregatorDelta, AggregatorError> {
        let source = self
            .sources
            .get(id)
            .ok_or_else(|| AggregatorError::UnknownModel(id.clone()))?;
        let current = source.entities();
        let previous = self.snapshots.entry(id.clone()).or_default();
        let touched = touched_ids(previous, current);
        if touched.is_empty() {
            return Ok(AggregatorDelta::default());
        }
        *previous = current.clone();
        trace!(model = %id, touched = touched.len(), "source changed");
        Ok(self.propagate(touched))
    }

    /// Direct access for capabilities that suspend (external sources).
    /// Callers must `refresh_source` afterwards.
    pub(crate) fn source_mut(&mut self, id: &ModelId) -> Option<&mut (dyn EntitySource + 'static)> {
        self.sources.get_mut(id).map(|source| source.as_mut())
    }

    // ── Aggregated entities ─────────────────────────────────────────

    /// Every aggregated entity, keyed by id.
    pub fn get_entities(&self) -> &AggregatedEntities {
        &self.entities
    }

    /// Look up one aggregated entity.
    pub fn entity(&self, id: &EntityId) -> Option<&AggregatedEntityWrapper> {
        self.entities.get(id)
    }

    /// The source an aggregated identifier was taken from.
    pub fn owning_source(&self, id: &EntityId) -> Option<&ModelId> {
        self.entities.get(id).map(|wrapper| &wrapper.source)
    }

    /// Problems found while aggregating, one per entity and kind.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    // ── Subscriptions ───────────────────────────────────────────────

    /// Register a listener for aggregator deltas.
    ///
    /// Listeners run after propagation finished and get the aggregator
    /// read-only, so they cannot start a nested propagation.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&AggregatorDelta, &Aggregator) + 'static,
    {
        self.events.subscribe(listener)
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // ── Visual models ───────────────────────────────────────────────

    /// Register a visual model.
    ///
    /// A model loaded from an older schema needs every source to migrate.
    /// While the package is still loading it is kept with its legacy
    /// entities staged and migrated by [`finish_loading`](Self::finish_loading);
    /// afterwards it is migrated here and the report returned.
    /// The first registered model becomes the active one.
    pub fn add_visual_model(
        &mut self,
        mut model: VisualModel,
    ) -> Result<Option<MigrationReport>, AggregatorError> {
        let id = model.id().clone();
        if self.visual_models.contains_key(&id) || self.sources.contains_key(&id) {
            return Err(AggregatorError::DuplicateModel(id));
        }
        let report = (!self.loading && self.needs_migration(&model))
            .then(|| migrate_visual_model(&mut model, self));

        debug!(model = %id, entities = model.entity_count(), "registering visual model");
        self.visual_models.insert(id.clone(), model);
        if self.active_visual_model.is_none() {
            self.active_visual_model = Some(id);
        }
        Ok(report)
    }

    /// Unregister a visual model.
    ///
    /// Diagram nodes of other views that showed it become dangling; with
    /// `validate_on_change` they are removed before this returns.
    pub fn delete_visual_model(&mut self, id: &ModelId) -> Result<VisualModel, AggregatorError> {
        let model = self
            .visual_models
            .shift_remove(id)
            .ok_or_else(|| AggregatorError::UnknownVisualModel(id.clone()))?;
        if self.active_visual_model.as_ref() == Some(id) {
            self.active_visual_model = self.visual_models.keys().next().cloned();
        }
        debug!(model = %id, "unregistered visual model");
        if self.config.validate_on_change {
            self.validate_all();
        }
        Ok(model)
    }

    /// Every registered visual model, in registration order.
    pub fn visual_models(&self) -> &IndexMap<ModelId, VisualModel> {
        &self.visual_models
    }

    /// Look up a visual model.
    pub fn visual_model(&self, id: &ModelId) -> Option<&VisualModel> {
        self.visual_models.get(id)
    }

    /// Look up a visual model for writing. Callers must run
    /// [`validate_all`](Self::validate_all) if the write can break consistency.
    pub fn visual_model_mut(&mut self, id: &ModelId) -> Option<&mut VisualModel> {
        self.visual_models.get_mut(id)
    }

    /// Id of the visual model the editor shows.
    pub fn active_visual_model_id(&self) -> Option<&ModelId> {
        self.active_visual_model.as_ref()
    }

    /// The visual model the editor shows.
    pub fn active_visual_model(&self) -> Option<&VisualModel> {
        self.active_visual_model
            .as_ref()
            .and_then(|id| self.visual_models.get(id))
    }

    /// The active visual model for writing; see [`visual_model_mut`](Self::visual_model_mut).
    pub fn active_visual_model_mut(&mut self) -> Option<&mut VisualModel> {
        let id = self.active_visual_model.as_ref()?;
        self.visual_models.get_mut(id)
    }

    pub(super) fn set_active_visual_model(&mut self, id: &ModelId) -> Result<(), AggregatorError> {
        if !self.visual_models.contains_key(id) {
            return Err(AggregatorError::UnknownVisualModel(id.clone()));
        }
        debug!(model = %id, "active visual model changed");
        self.active_visual_model = Some(id.clone());
        Ok(())
    }

    /// Mark the package as loaded.
    ///
    /// Migrates every visual model still waiting in an older schema, now
    /// that all sources are known, then repairs every writable visual model.
    pub fn finish_loading(&mut self) -> LoadingReport {
        self.loading = false;
        let mut models = std::mem::take(&mut self.visual_models);
        let this = &*self;
        let migrations: Vec<MigrationReport> = models
            .values_mut()
            .filter(|model| this.needs_migration(model))
            .map(|model| migrate_visual_model(model, this))
            .collect();
        self.visual_models = models;
        debug!(migrated = migrations.len(), "package finished loading");
        LoadingReport {
            migrations,
            validations: self.validate_all(),
        }
    }

    /// Check whether the package is still loading.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    fn needs_migration(&self, model: &VisualModel) -> bool {
        self.config.run_migrations && model.initial_schema_version() < SchemaVersion::CURRENT
    }

    /// Repair every writable visual model against the current aggregation.
    ///
    /// [`finish_loading`](Self::finish_loading) runs it once; afterwards it
    /// runs on its own after each delta when `validate_on_change` is set.
    /// Models still in an older schema are skipped.
    pub fn validate_all(&mut self) -> Vec<ValidationReport> {
        let ids: Vec<ModelId> = self
            .visual_models
            .values()
            .filter(|model| model.is_writable_visual_model())
            .filter(|model| model.initial_schema_version() == SchemaVersion::CURRENT)
            .map(|model| model.id().clone())
            .collect();
        let mut reports = Vec::with_capacity(ids.len());
        for id in ids {
            match validate_visual_model(&id, &self.entities, &mut self.visual_models) {
                Ok(report) => reports.push(report),
                Err(err) => warn!(model = %id, error = %err, "visual model validation failed"),
            }
        }
        reports
    }

    /// Detach every source and visual model (package closed or replaced).
    ///
    /// Subscribers receive one final delta removing everything. The
    /// aggregator is ready to load the next package.
    pub fn close(&mut self) {
        let removed: Vec<EntityId> = self.entities.keys().cloned().collect();
        self.sources.clear();
        self.snapshots.clear();
        self.entities.clear();
        self.profiled_by.clear();
        self.profiles_of.clear();
        self.warnings.clear();
        self.visual_models.clear();
        self.active_visual_model = None;
        self.loading = true;
        if !removed.is_empty() {
            self.publish(&AggregatorDelta {
                updated: Vec::new(),
                removed,
            });
        }
    }

    // ── Propagation ─────────────────────────────────────────────────

    fn propagate(&mut self, touched: Vec<EntityId>) -> AggregatorDelta {
        let delta = self.recompute(touched);
        if delta.is_empty() {
            return delta;
        }
        debug!(
            updated = delta.updated.len(),
            removed = delta.removed.len(),
            "aggregator delta"
        );
        if self.config.validate_on_change {
            self.validate_all();
        }
        self.publish(&delta);
        delta
    }

    fn publish(&mut self, delta: &AggregatorDelta) {
        let mut events = std::mem::take(&mut self.events);
        events.emit(delta, self);
        self.events = events;
    }

    fn recompute(&mut self, touched: Vec<EntityId>) -> AggregatorDelta {
        self.reindex_profiles(&touched);
        let affected = self.widen_through_profiles(touched);

        let mut warnings = Vec::new();
        let results: Vec<(EntityId, Option<AggregatedEntityWrapper>)> = {
            let sources = &self.sources;
            let snapshots = &self.snapshots;
            let mut resolver = ProfileResolver::new(move |id: &EntityId| {
                raw_lookup(sources, snapshots, id).map(|(_, entity)| entity)
            });

            let results: Vec<_> = affected
                .iter()
                .map(|id| {
                    let Some((source, raw)) = raw_lookup(sources, snapshots, id) else {
                        return (id.clone(), None);
                    };
                    let aggregated = match resolver.resolve(id) {
                        Some(Ok(entity)) => Some(entity),
                        Some(Err(err)) => {
                            warnings.push(Warning::new(
                                id.clone(),
                                WarningKind::ProfilingCycle,
                                err.to_string(),
                            ));
                            None
                        }
                        None => None,
                    };
                    if let Some(entity) = &aggregated {
                        if relation_ends(entity) == RelationEnds::Ambiguous {
                            warnings.push(Warning::new(
                                id.clone(),
                                WarningKind::AmbiguousRelationEnds,
                                format!("both ends of {id} carry an IRI, domain and range are unknown"),
                            ));
                        }
                    }
                    let wrapper = AggregatedEntityWrapper {
                        id: id.clone(),
                        source: source.clone(),
                        raw_entity: raw.clone(),
                        aggregated_entity: aggregated,
                    };
                    (id.clone(), Some(wrapper))
                })
                .collect();

            for (profile, missing) in resolver.take_missing() {
                warnings.push(Warning::new(
                    profile.clone(),
                    WarningKind::MissingProfiled,
                    format!("{profile} profiles {missing}, which no source defines"),
                ));
            }
            results
        };

        let affected_set: FxHashSet<&EntityId> = affected.iter().collect();
        self.warnings
            .retain(|warning| !affected_set.contains(&warning.entity));
        for warning in warnings {
            if !affected_set.contains(&warning.entity) || self.warnings.contains(&warning) {
                continue;
            }
            warn!(entity = %warning.entity, kind = ?warning.kind, "{}", warning.message);
            self.warnings.push(warning);
        }

        let mut delta = AggregatorDelta::default();
        for (id, wrapper) in results {
            match wrapper {
                None => {
                    if self.entities.shift_remove(&id).is_some() {
                        delta.removed.push(id);
                    }
                }
                Some(wrapper) => {
                    if self.entities.get(&id) != Some(&wrapper) {
                        self.entities.insert(id, wrapper.clone());
                        delta.updated.push(wrapper);
                    }
                }
            }
        }
        delta
    }

    fn reindex_profiles(&mut self, touched: &[EntityId]) {
        for id in touched {
            if let Some(previous) = self.profiles_of.remove(id) {
                for target in previous {
                    if let Some(profiles) = self.profiled_by.get_mut(&target) {
                        profiles.remove(id);
                        if profiles.is_empty() {
                            self.profiled_by.remove(&target);
                        }
                    }
                }
            }
            let targets: Vec<EntityId> = raw_lookup(&self.sources, &self.snapshots, id)
                .map(|(_, entity)| entity.profiled().into_iter().cloned().collect())
                .unwrap_or_default();
            for target in &targets {
                self.profiled_by
                    .entry(target.clone())
                    .or_default()
                    .insert(id.clone());
            }
            if !targets.is_empty() {
                self.profiles_of.insert(id.clone(), targets);
            }
        }
    }

    /// Touched ids plus every profile that (transitively) profiles one.
    fn widen_through_profiles(&self, touched: Vec<EntityId>) -> Vec<EntityId> {
        let mut seen: FxHashSet<EntityId> = FxHashSet::default();
        let mut ordered: Vec<EntityId> = Vec::with_capacity(touched.len());
        for id in touched {
            if seen.insert(id.clone()) {
                ordered.push(id);
            }
        }
        let mut index = 0;
        while index < ordered.len() {
            if let Some(profiles) = self.profiled_by.get(&ordered[index]) {
                let mut next: Vec<EntityId> = profiles
                    .iter()
                    .filter(|profile| !seen.contains(*profile))
                    .cloned()
                    .collect();
                next.sort();
                for profile in next {
                    seen.insert(profile.clone());
                    ordered.push(profile);
                }
            }
            index += 1;
        }
        ordered
    }
}

/// First registered source defining `id` wins.
fn raw_lookup<'a>(
    sources: &'a Sources,
    snapshots: &'a Snapshots,
    id: &EntityId,
) -> Option<(&'a ModelId, &'a SemanticEntity)> {
    sources.keys().find_map(|model| {
        snapshots
            .get(model)
            .and_then(|snapshot| snapshot.get(id))
            .map(|entity| (model, entity))
    })
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl std::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator")
            .field("sources", &self.sources.keys().collect::<Vec<_>>())
            .field("entities", &self.entities.len())
            .field("visual_models", &self.visual_models.keys().collect::<Vec<_>>())
            .field("active_visual_model", &self.active_visual_model)
            .field("warnings", &self.warnings.len())
            .field("loading", &self.loading)
            .field("subscribers", &self.events.listener_count())
            .finish()
    }
}
