//! Document shapes as stored on disk.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::base::{LanguageString, ModelId};
use crate::visual::ModelData;

/// A persisted visual model.
///
/// Entities are kept as raw JSON values: how they are read depends on
/// `initial_schema_version`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualModelDocument {
    pub identifier: ModelId,
    #[serde(default)]
    pub label: LanguageString,
    pub initial_schema_version: u32,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub models_data: IndexMap<ModelId, ModelData>,
    #[serde(default)]
    pub visual_entities: Vec<serde_json::Value>,
}

/// A persisted semantic source.
///
/// Entities are kept raw so that a malformed entity can be reported with
/// its position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticModelDocument {
    pub identifier: ModelId,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub entities: Vec<serde_json::Value>,
}
