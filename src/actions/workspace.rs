//! Actions on visual models as a whole and on sources.

use smol_str::SmolStr;
use tracing::debug;

use super::edit::{active_mut, writable_active};
use super::error::ActionError;
use crate::aggregator::{AggregatorDelta, AggregatorError, AggregatorView};
use crate::base::{EntityId, LanguageString, ModelId};
use crate::semantic::SemanticEntity;
use crate::visual::{NewVisualDiagramNode, Position, VisualEntityPatch, VisualModel};

/// Register a new, empty, writable visual model and return its id.
pub fn create_visual_model(
    view: &mut AggregatorView<'_>,
    label: LanguageString,
) -> Result<ModelId, ActionError> {
    let id = ModelId::generate();
    view.aggregator_mut()
        .add_visual_model(VisualModel::new(id.clone()).with_label(label))?;
    debug!(model = %id, "created visual model");
    Ok(id)
}

pub fn change_active_visual_model(
    view: &mut AggregatorView<'_>,
    model: &ModelId,
) -> Result<(), ActionError> {
    Ok(view.change_active_visual_model(model)?)
}

/// Draw the visual model `nested` as a node of the active visual model.
pub fn add_visual_diagram_node(
    view: &mut AggregatorView<'_>,
    nested: &ModelId,
    position: Position,
) -> Result<EntityId, ActionError> {
    let model = writable_active(view.aggregator())?;
    if model.id() == nested {
        return Err(ActionError::SelfNesting(nested.clone()));
    }
    let nested_model = view
        .get_available_visual_models()
        .get(nested)
        .ok_or_else(|| AggregatorError::UnknownVisualModel(nested.clone()))?;
    let spec = NewVisualDiagramNode {
        represented_visual_model: nested.clone(),
        position,
        label: nested_model.label().clone(),
        description: LanguageString::new(),
    };
    Ok(active_mut(view)?.add_visual_diagram_node(spec)?)
}

/// Position update coming back from the renderer after a drag.
pub fn move_visual_node(
    view: &mut AggregatorView<'_>,
    visual: &EntityId,
    position: Position,
) -> Result<(), ActionError> {
    writable_active(view.aggregator())?;
    Ok(active_mut(view)?.update_visual_entity(visual, VisualEntityPatch::position(position))?)
}

/// Color of a source model on the active visual model.
pub fn set_model_color(
    view: &mut AggregatorView<'_>,
    source: &ModelId,
    color: impl Into<SmolStr>,
) -> Result<(), ActionError> {
    writable_active(view.aggregator())?;
    Ok(active_mut(view)?.set_model_color(source, color)?)
}

/// Create `entity` in the writable source `source`.
pub fn create_entity(
    view: &mut AggregatorView<'_>,
    source: &ModelId,
    entity: impl Into<SemanticEntity>,
) -> Result<EntityId, ActionError> {
    let entity = entity.into();
    let id = view
        .aggregator_mut()
        .write_source(source, |writable| writable.create_entity(entity))?;
    debug!(entity = %id, source = %source, "created entity");
    Ok(id)
}

/// Materialize a class of an external catalogue together with its
/// surroundings, then propagate what appeared.
///
/// Nothing may be assumed about the aggregator while the catalogue is
/// fetching; the view is borrowed for the whole call.
pub async fn allow_class_surroundings(
    view: &mut AggregatorView<'_>,
    source: &ModelId,
    class: &EntityId,
) -> Result<AggregatorDelta, ActionError> {
    let aggregator = view.aggregator_mut();
    let external = aggregator
        .source_mut(source)
        .ok_or_else(|| AggregatorError::UnknownModel(source.clone()))?
        .as_external()
        .ok_or_else(|| ActionError::NotExternal(source.clone()))?;
    external.allow_class_surroundings(class).await?;
    Ok(aggregator.refresh_source(source)?)
}

/// Inverse of [`allow_class_surroundings`].
pub async fn release_class_surroundings(
    view: &mut AggregatorView<'_>,
    source: &ModelId,
    class: &EntityId,
) -> Result<AggregatorDelta, ActionError> {
    let aggregator = view.aggregator_mut();
    let external = aggregator
        .source_mut(source)
        .ok_or_else(|| AggregatorError::UnknownModel(source.clone()))?
        .as_external()
        .ok_or_else(|| ActionError::NotExternal(source.clone()))?;
    external.release_class_surroundings(class).await?;
    Ok(aggregator.refresh_source(source)?)
}
