use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Position a module occupies in a scenario.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ModuleRole {
    Trigger,
    Transform,
    #[default]
    Action,
    Error,
}

/// One step of a generated scenario, as written into the blueprint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleModel {
    pub id: String,
    pub position: ModuleRole,
    pub name: String,
    pub app: String,
    #[serde(rename = "type")]
    pub operation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub fields: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<String>>,
}

impl ModuleModel {
    pub fn new(
        id: String,
        position: ModuleRole,
        app: &str,
        operation: &str,
        label: &str,
    ) -> Self {
        Self {
            id,
            position,
            name: format!("{} – {}", app, label),
            app: app.to_string(),
            operation: operation.to_string(),
            model: None,
            fields: Map::new(),
            outputs: None,
        }
    }

    pub fn with_name(
        mut self,
        name: impl Into<String>,
    ) -> Self {
        self.name = name.into();
        self
    }

    /// Sets a configuration field.
    pub fn with_field(
        mut self,
        key: &str,
        value: impl Into<Value>,
    ) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn with_model(
        mut self,
        model: &str,
    ) -> Self {
        self.model = Some(model.to_string());
        self
    }

    pub fn with_outputs(
        mut self,
        outputs: &[&str],
    ) -> Self {
        self.outputs = Some(outputs.iter().map(|o| o.to_string()).collect());
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_module_serializes_operation_as_type() {
        let module = ModuleModel::new("sheets_abc123".to_string(), ModuleRole::Action, "Google Sheets", "add-row", "Add Row");
        let value = serde_json::to_value(&module).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "sheets_abc123",
                "position": "action",
                "name": "Google Sheets – Add Row",
                "app": "Google Sheets",
                "type": "add-row",
                "fields": {}
            })
        );
    }

    #[test]
    fn test_module_optional_parts() {
        let module = ModuleModel::new("ai_1".to_string(), ModuleRole::Transform, "OpenAI", "chat-completion", "Chat Completion")
            .with_model("gpt-4o-mini")
            .with_field("temperature", 0.2)
            .with_outputs(&["insights", "resume"]);
        let value = serde_json::to_value(&module).unwrap();

        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["fields"]["temperature"], 0.2);
        assert_eq!(value["outputs"], json!(["insights", "resume"]));
    }

    #[test]
    fn test_role_as_ref() {
        assert_eq!(ModuleRole::Error.as_ref(), "error");
        assert_eq!("trigger".parse::<ModuleRole>().unwrap(), ModuleRole::Trigger);
    }
}
