//! A cursor over one aggregator.

use indexmap::IndexMap;

use super::delta::{AggregatedEntities, AggregatorDelta};
use super::engine::Aggregator;
use super::error::AggregatorError;
use crate::base::{ModelId, SubscriptionId};
use crate::visual::VisualModel;

/// The aggregator as seen by the rest of the editor: entity lookup,
/// subscriptions, and exactly one active visual model at a time.
pub struct AggregatorView<'a> {
    aggregator: &'a mut Aggregator,
}

impl<'a> AggregatorView<'a> {
    pub(super) fn new(aggregator: &'a mut Aggregator) -> Self {
        Self { aggregator }
    }

    pub fn get_entities(&self) -> &AggregatedEntities {
        self.aggregator.get_entities()
    }

    pub fn get_active_visual_model(&self) -> Option<&VisualModel> {
        self.aggregator.active_visual_model()
    }

    pub fn get_active_visual_model_mut(&mut self) -> Option<&mut VisualModel> {
        self.aggregator.active_visual_model_mut()
    }

    /// Switch the active visual model.
    ///
    /// No semantic change is published; consumers comparing the active id
    /// must treat a switch as "replace all visible content".
    pub fn change_active_visual_model(&mut self, id: &ModelId) -> Result<(), AggregatorError> {
        self.aggregator.set_active_visual_model(id)
    }

    pub fn get_available_visual_models(&self) -> &IndexMap<ModelId, VisualModel> {
        self.aggregator.visual_models()
    }

    pub fn subscribe_to_changes<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&AggregatorDelta, &Aggregator) + 'static,
    {
        self.aggregator.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.aggregator.unsubscribe(id)
    }

    pub fn aggregator(&self) -> &Aggregator {
        self.aggregator
    }

    pub fn aggregator_mut(&mut self) -> &mut Aggregator {
        self.aggregator
    }
}
