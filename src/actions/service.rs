//! ActionService: the editor's entry point for user intents.
//!
//! The service owns the [`Aggregator`] for one open package and runs
//! actions against it. A refused action never panics and never leaves
//! partial state: it is recorded as a [`Notification`] for the UI to show.
//!
//! ```ignore
//! let mut service = ActionService::new(Aggregator::default());
//! service.aggregator_mut().add_model(source)?;
//!
//! if service.add_node(&class_id, Position::new(0.0, 0.0)).is_none() {
//!     for notification in service.take_notifications() {
//!         show(notification.message);
//!     }
//! }
//! ```

use smol_str::SmolStr;
use tracing::info;

use super::edit;
use super::error::ActionError;
use super::workspace;
use crate::aggregator::{Aggregator, AggregatorDelta, AggregatorView};
use crate::base::{EntityId, LanguageString, ModelId};
use crate::semantic::SemanticEntity;
use crate::visual::Position;

/// A user-facing report of a refused action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub error: ActionError,
}

impl From<ActionError> for Notification {
    fn from(error: ActionError) -> Self {
        Self {
            message: error.to_string(),
            error,
        }
    }
}

/// Owns the aggregator and collects notifications of refused actions.
#[derive(Debug, Default)]
pub struct ActionService {
    aggregator: Aggregator,
    notifications: Vec<Notification>,
}

impl ActionService {
    /// Wrap an aggregator, usually one that finished loading a package.
    pub fn new(aggregator: Aggregator) -> Self {
        Self {
            aggregator,
            notifications: Vec::new(),
        }
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Direct access for loading and persistence. Edits made through it
    /// are not reported as notifications.
    pub fn aggregator_mut(&mut self) -> &mut Aggregator {
        &mut self.aggregator
    }

    pub fn view(&mut self) -> AggregatorView<'_> {
        self.aggregator.view()
    }

    /// Refused actions not yet taken, oldest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Tear down the package: every source and visual model is detached.
    pub fn close(&mut self) {
        self.aggregator.close();
        self.notifications.clear();
    }

    fn report<T>(&mut self, result: Result<T, ActionError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                info!(error = %error, "action refused");
                self.notifications.push(error.into());
                None
            }
        }
    }

    /// Draw a class or class profile on the active visual model.
    pub fn add_node(&mut self, entity: &EntityId, position: Position) -> Option<EntityId> {
        let result = edit::add_node_to_visual_model(&mut self.aggregator.view(), entity, position);
        self.report(result)
    }

    /// Draw a relationship, generalization or relationship profile between
    /// nodes already on the active visual model.
    pub fn add_relation(&mut self, relation: &EntityId) -> Option<EntityId> {
        let result = edit::add_relation_to_visual_model(&mut self.aggregator.view(), relation);
        self.report(result)
    }

    /// Delete an entity from its source. With `validate_on_change` every
    /// view drawing it is repaired before this returns.
    pub fn delete_from_semantic_model(&mut self, entity: &EntityId) -> Option<()> {
        let result = edit::delete_from_semantic_model(&mut self.aggregator.view(), entity);
        self.report(result)
    }

    /// Remove visual entities from the active visual model only.
    pub fn delete_from_visual_model(&mut self, visual: &[EntityId]) -> Option<Vec<EntityId>> {
        let result = edit::delete_from_visual_model(&mut self.aggregator.view(), visual);
        self.report(result)
    }

    pub fn create_visual_model(&mut self, label: LanguageString) -> Option<ModelId> {
        let result = workspace::create_visual_model(&mut self.aggregator.view(), label);
        self.report(result)
    }

    pub fn change_active_visual_model(&mut self, model: &ModelId) -> Option<()> {
        let result = workspace::change_active_visual_model(&mut self.aggregator.view(), model);
        self.report(result)
    }

    pub fn add_visual_diagram_node(
        &mut self,
        nested: &ModelId,
        position: Position,
    ) -> Option<EntityId> {
        let result =
            workspace::add_visual_diagram_node(&mut self.aggregator.view(), nested, position);
        self.report(result)
    }

    pub fn move_visual_node(&mut self, visual: &EntityId, position: Position) -> Option<()> {
        let result = workspace::move_visual_node(&mut self.aggregator.view(), visual, position);
        self.report(result)
    }

    pub fn set_model_color(&mut self, source: &ModelId, color: impl Into<SmolStr>) -> Option<()> {
        let result = workspace::set_model_color(&mut self.aggregator.view(), source, color);
        self.report(result)
    }

    pub fn create_entity(
        &mut self,
        source: &ModelId,
        entity: impl Into<SemanticEntity>,
    ) -> Option<EntityId> {
        let result = workspace::create_entity(&mut self.aggregator.view(), source, entity);
        self.report(result)
    }

    /// Ask an external catalogue to load the neighbourhood of `class`.
    pub async fn allow_class_surroundings(
        &mut self,
        source: &ModelId,
        class: &EntityId,
    ) -> Option<AggregatorDelta> {
        let result =
            workspace::allow_class_surroundings(&mut self.aggregator.view(), source, class).await;
        self.report(result)
    }

    pub async fn release_class_surroundings(
        &mut self,
        source: &ModelId,
        class: &EntityId,
    ) -> Option<AggregatorDelta> {
        let result =
            workspace::release_class_surroundings(&mut self.aggregator.view(), source, class)
                .await;
        self.report(result)
    }
}
