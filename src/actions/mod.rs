//! # Actions
//!
//! Every cross-cutting edit the user can trigger, each one a fixed sequence
//! of source and visual model writes. Preconditions are checked before the
//! first write, so a failing action leaves no partial state behind.
//!
//! Actions take an [`AggregatorView`](crate::aggregator::AggregatorView) and
//! work on its active visual model. [`ActionService`] wraps them for the
//! editor and turns failures into [`Notification`]s.

mod edit;
mod error;
mod service;
mod workspace;

pub use edit::{
    add_node_to_visual_model, add_relation_to_visual_model, delete_from_semantic_model,
    delete_from_visual_model,
};
pub use error::ActionError;
pub use service::{ActionService, Notification};
pub use workspace::{
    add_visual_diagram_node, allow_class_surroundings, change_active_visual_model,
    create_entity, create_visual_model, move_visual_node, release_class_surroundings,
    set_model_color,
};
