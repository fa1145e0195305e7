use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::{ServiceSet, ServiceTag, TriggerKind};

/// Inputs of one generation, as read by a presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdeaRequest {
    /// free-text description of the automation
    pub idea: String,
    /// trigger chosen by the user, used when the text has no cue
    #[serde(default)]
    pub trigger: Option<TriggerKind>,
    /// AI model identifier, the configured model when unset
    #[serde(default)]
    pub model: Option<String>,
    /// services ticked by the user; unknown names are skipped
    #[serde(default, deserialize_with = "deserialize_services")]
    pub services: ServiceSet,
}

impl IdeaRequest {
    pub fn new(idea: impl Into<String>) -> Self {
        Self {
            idea: idea.into(),
            ..Default::default()
        }
    }

    pub fn trigger(
        mut self,
        trigger: TriggerKind,
    ) -> Self {
        self.trigger = Some(trigger);
        self
    }

    pub fn model(
        mut self,
        model: impl Into<String>,
    ) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn service(
        mut self,
        tag: ServiceTag,
    ) -> Self {
        self.services.insert(tag);
        self
    }

    /// Adds services by name. Names outside the supported set are skipped.
    pub fn service_names<I, S>(
        mut self,
        names: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        insert_known(&mut self.services, names);
        self
    }
}

fn insert_known<I, S>(
    services: &mut ServiceSet,
    names: I,
) where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for name in names {
        match ServiceTag::from_str(name.as_ref().trim()) {
            Ok(tag) => {
                services.insert(tag);
            }
            Err(_) => warn!(service = name.as_ref(), "ignoring unknown service"),
        }
    }
}

fn deserialize_services<'de, D>(deserializer: D) -> Result<ServiceSet, D::Error>
where
    D: Deserializer<'de>,
{
    let names = Vec::<String>::deserialize(deserializer)?;
    let mut services = ServiceSet::new();
    insert_known(&mut services, names);
    Ok(services)
}
