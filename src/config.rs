use std::{fs, path::Path};

use serde::Deserialize;
use tracing::warn;

use crate::{IdeaflowError, Result, ServiceTag, TriggerKind};

/// Generator configuration.
///
/// Every section has a default, so a TOML file only needs the parts it
/// overrides. The keyword and cue tables are authored for French input with
/// English equivalents; swap them to support another vocabulary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// model used when a request does not name one
    pub model: String,
    /// service keyword table
    pub detector: DetectorConfig,
    /// trigger cue tables
    pub trigger: TriggerConfig,
    /// scheduler cadence
    pub schedule: ScheduleConfig,
    /// AI step settings
    pub ai: AiConfig,
    /// error handler policy
    pub error_handler: ErrorHandlerConfig,
    /// blueprint metadata
    pub blueprint: BlueprintConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub services: Vec<ServiceKeywords>,
}

/// Keyword phrases implicating one service.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ServiceKeywords {
    pub tag: ServiceTag,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    /// phrases selecting a scheduled trigger
    pub schedule_cues: Vec<String>,
    /// phrases selecting an inbound event trigger
    pub event_cues: Vec<String>,
    /// trigger used when neither the text nor the caller decides
    pub default: TriggerKind,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// cron expression, defaults to every day at 08:00
    pub cron: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub temperature: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ErrorHandlerConfig {
    pub retries: u32,
    pub backoff: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BlueprintConfig {
    /// prepended to the truncated idea to form the scenario name
    pub name_prefix: String,
    /// number of idea characters kept in the scenario name
    pub name_max_chars: usize,
    /// generator tag written into the metadata
    pub generator: String,
}

fn phrases(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for DetectorConfig {
    fn default() -> Self {
        let entry = |tag, keywords: &[&str]| ServiceKeywords {
            tag,
            keywords: phrases(keywords),
        };
        Self {
            services: vec![
                entry(ServiceTag::Typeform, &["typeform"]),
                entry(ServiceTag::Webhook, &["webhook", "http"]),
                entry(ServiceTag::Sheets, &["google sheet", "g-sheet", "sheet", "sheets", "google sheets"]),
                entry(ServiceTag::Slack, &["slack"]),
                entry(ServiceTag::Gmail, &["gmail", "email", "mail"]),
                entry(ServiceTag::Notion, &["notion"]),
                entry(ServiceTag::Calendar, &["calendar", "calendrier"]),
            ],
        }
    }
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            schedule_cues: phrases(&["tous les jours", "chaque jour", "every day", "each day", "cron"]),
            // matched as substrings, so no short stems that hide inside French words
            event_cues: phrases(&["lorsque", "quand", "formulaire", "when", "webhook"]),
            default: TriggerKind::Webhook,
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            cron: "0 8 * * *".to_string(),
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self { temperature: 0.2 }
    }
}

impl Default for ErrorHandlerConfig {
    fn default() -> Self {
        Self {
            retries: 2,
            backoff: "exponential".to_string(),
        }
    }
}

impl Default for BlueprintConfig {
    fn default() -> Self {
        Self {
            name_prefix: "Scénario IA – ".to_string(),
            name_max_chars: 60,
            generator: "Architecte Make IA (statique)".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            detector: DetectorConfig::default(),
            trigger: TriggerConfig::default(),
            schedule: ScheduleConfig::default(),
            ai: AiConfig::default(),
            error_handler: ErrorHandlerConfig::default(),
            blueprint: BlueprintConfig::default(),
        }
    }
}

impl Config {
    pub fn from_file<T: AsRef<Path>>(path: T) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref()).map_err(|e| IdeaflowError::Config(format!("failed to load config file {:?}: {}", path.as_ref(), e)))?;

        Self::load_from_str(data.as_str())
    }

    pub fn load_from_str(toml_str: &str) -> Result<Self> {
        let mut config = toml::from_str::<Config>(toml_str)?;
        config.prepare()?;
        Ok(config)
    }

    /// Normalizes the phrase tables and validates the settings.
    pub(crate) fn prepare(&mut self) -> Result<()> {
        self.normalize();
        self.validate()
    }

    /// Lower-cases every phrase and drops empty ones, which would otherwise
    /// match any text.
    fn normalize(&mut self) {
        for entry in &mut self.detector.services {
            normalize_phrases(&mut entry.keywords, entry.tag.as_ref());
        }
        normalize_phrases(&mut self.trigger.schedule_cues, "schedule cues");
        normalize_phrases(&mut self.trigger.event_cues, "event cues");
    }

    fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(IdeaflowError::Config("model must not be empty".to_string()));
        }
        if self.schedule.cron.split_whitespace().count() != 5 {
            return Err(IdeaflowError::Config(format!("cron '{}' must have five fields", self.schedule.cron)));
        }
        if !(0.0..=2.0).contains(&self.ai.temperature) {
            return Err(IdeaflowError::Config(format!("temperature {} out of range [0, 2]", self.ai.temperature)));
        }
        Ok(())
    }
}

fn normalize_phrases(
    list: &mut Vec<String>,
    owner: &str,
) {
    let before = list.len();
    list.retain(|p| !p.trim().is_empty());
    if list.len() != before {
        warn!(owner, dropped = before - list.len(), "ignoring empty phrases");
    }
    for phrase in list.iter_mut() {
        *phrase = phrase.to_lowercase();
    }
}
