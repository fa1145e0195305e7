use serde::{Deserialize, Serialize};

use crate::{
    IdeaflowError, Result,
    model::{ConnectionModel, ModuleModel},
};

/// Version of the blueprint document layout.
pub const BLUEPRINT_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlueprintMetadata {
    /// ISO-8601 creation time.
    pub created_at: String,
    pub generator: String,
}

/// Workflow definition in the import format of the automation platform.
///
/// `modules` holds the main chain in execution order and `connections`
/// links consecutive entries. The error handler lives apart in `error`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlueprintModel {
    pub version: u32,
    pub name: String,
    pub metadata: BlueprintMetadata,
    pub modules: Vec<ModuleModel>,
    pub connections: Vec<ConnectionModel>,
    pub error: ModuleModel,
}

impl BlueprintModel {
    pub fn from_json(s: &str) -> Result<Self> {
        let blueprint = serde_json::from_str::<BlueprintModel>(s);
        match blueprint {
            Ok(v) => Ok(v),
            Err(e) => Err(IdeaflowError::Convert(format!("invalid blueprint: {}", e))),
        }
    }

    /// Pretty-printed JSON, as offered for copy and export.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
