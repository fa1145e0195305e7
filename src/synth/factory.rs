//! Module descriptors for services and for the fixed scenario steps.

use std::{str::FromStr, sync::Arc};

use serde_json::json;

use crate::{
    Config, ModuleModel, ModuleRole, ServiceTag,
    synth::{
        ids::IdAllocator,
        service::{AppSpec, FALLBACK_APP},
    },
};

/// Instruction given to the AI step.
const AI_SYSTEM_PROMPT: &[&str] = &[
    "Tu es un expert Make.com et prompt engineer.",
    "But: transformer des données brutes en résultat actionnable conforme au besoin métier.",
    "Contraintes: JSON valide, champs clairs, langue = français, structure stable.",
    "Renvoie un objet avec: {\"insights\": string[], \"resume\": string, \"champSortie\": object}.",
    "Respecte les limites de tokens, sois concis et précis.",
];

/// Outputs declared by the AI step.
pub const AI_OUTPUTS: [&str; 3] = ["insights", "resume", "champSortie"];

/// Builds module descriptors, minting a fresh id for each one.
#[derive(Clone)]
pub struct ModuleFactory {
    ids: Arc<dyn IdAllocator>,
    config: Arc<Config>,
}

impl ModuleFactory {
    pub fn new(
        ids: Arc<dyn IdAllocator>,
        config: Arc<Config>,
    ) -> Self {
        Self { ids, config }
    }

    /// Module for a known service. Triggers use the watch operation and
    /// actions the action operation, each falling back to the other.
    pub fn module_for(
        &self,
        tag: ServiceTag,
        role: ModuleRole,
    ) -> ModuleModel {
        self.build_module(tag.as_ref(), tag.app_spec(), role)
    }

    /// Module for a service given by name; unknown names yield a generic
    /// no-op step instead of an error.
    ///
    /// Generation itself only sees [`ServiceTag`]s. This entry point is for
    /// callers holding raw names, such as a UI building a module preview.
    pub fn module_for_name(
        &self,
        name: &str,
        role: ModuleRole,
    ) -> ModuleModel {
        match ServiceTag::from_str(name) {
            Ok(tag) => self.module_for(tag, role),
            Err(_) => self.build_module("tool", FALLBACK_APP, role),
        }
    }

    fn build_module(
        &self,
        prefix: &str,
        spec: AppSpec,
        role: ModuleRole,
    ) -> ModuleModel {
        let operation = match role {
            ModuleRole::Trigger => spec.watch.or(spec.action),
            _ => spec.action.or(spec.watch),
        };
        let (kind, label) = operation.map(|o| (o.kind, o.label)).unwrap_or(("noop", "Step"));
        ModuleModel::new(self.ids.allocate(prefix), role, spec.app, kind, label)
    }

    /// Fixed-cadence scheduler trigger.
    pub fn scheduler(&self) -> ModuleModel {
        ModuleModel::new(self.ids.allocate("schedule"), ModuleRole::Trigger, "Tools", "cron", "Cron")
            .with_name("Scheduler – Cron")
            .with_field("cron", self.config.schedule.cron.as_str())
    }

    /// Maps the raw trigger payload onto the canonical `data` field.
    pub fn normalizer(&self) -> ModuleModel {
        ModuleModel::new(self.ids.allocate("map"), ModuleRole::Transform, "Tools", "json-map", "JSON > Normalize").with_field("mapping", json!({ "data": "{{input}}" }))
    }

    /// Chat completion step analysing the normalized data.
    pub fn ai_step(
        &self,
        model: &str,
        idea: &str,
    ) -> ModuleModel {
        ModuleModel::new(self.ids.allocate("ai"), ModuleRole::Transform, "OpenAI", "chat-completion", "Chat Completion")
            .with_model(model)
            .with_field("system", AI_SYSTEM_PROMPT.join("\n"))
            .with_field("user", format!("Contexte du scénario: {}\n\nDonnées: {{{{data}}}}", idea))
            .with_field("temperature", self.config.ai.temperature)
            .with_outputs(&AI_OUTPUTS)
    }

    /// Cross-cutting error handler, kept out of the main chain.
    pub fn error_handler(&self) -> ModuleModel {
        let policy = &self.config.error_handler;
        ModuleModel::new(self.ids.allocate("error"), ModuleRole::Error, "Tools", "error-handler", "Log & Retry")
            .with_name("Error Handler – Log & Retry")
            .with_field("retries", policy.retries)
            .with_field("backoff", policy.backoff.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::ids::SequentialIds;

    fn factory() -> ModuleFactory {
        ModuleFactory::new(Arc::new(SequentialIds::new()), Arc::new(Config::default()))
    }

    #[test]
    fn test_action_module() {
        let module = factory().module_for(ServiceTag::Sheets, ModuleRole::Action);
        assert_eq!(module.id, "sheets_1");
        assert_eq!(module.position, ModuleRole::Action);
        assert_eq!(module.name, "Google Sheets – Add Row");
        assert_eq!(module.app, "Google Sheets");
        assert_eq!(module.operation, "add-row");
        assert!(module.fields.is_empty());
    }

    #[test]
    fn test_trigger_module_uses_watch_operation() {
        let factory = factory();
        let typeform = factory.module_for(ServiceTag::Typeform, ModuleRole::Trigger);
        assert_eq!(typeform.operation, "watch-responses");
        assert_eq!(typeform.position, ModuleRole::Trigger);

        let webhook = factory.module_for(ServiceTag::Webhook, ModuleRole::Trigger);
        assert_eq!(webhook.name, "Webhooks – Webhook");
        assert_eq!(webhook.operation, "custom-webhook");

        // no watch operation: the action one is used
        let calendar = factory.module_for(ServiceTag::Calendar, ModuleRole::Trigger);
        assert_eq!(calendar.operation, "create-event");
    }

    #[test]
    fn test_unknown_service_falls_back_to_generic_step() {
        let factory = factory();
        let module = factory.module_for_name("dropbox", ModuleRole::Action);
        assert_eq!(module.app, "Tool");
        assert_eq!(module.operation, "noop");
        assert_eq!(module.name, "Tool – Step");

        let known = factory.module_for_name("Slack", ModuleRole::Action);
        assert_eq!(known.operation, "post-message");
    }

    #[test]
    fn test_fixed_steps() {
        let factory = factory();

        let scheduler = factory.scheduler();
        assert_eq!(scheduler.position, ModuleRole::Trigger);
        assert_eq!(scheduler.name, "Scheduler – Cron");
        assert_eq!(scheduler.fields["cron"], "0 8 * * *");

        let normalizer = factory.normalizer();
        assert_eq!(normalizer.fields["mapping"], json!({ "data": "{{input}}" }));

        let error = factory.error_handler();
        assert_eq!(error.position, ModuleRole::Error);
        assert_eq!(error.name, "Error Handler – Log & Retry");
        assert_eq!(error.fields["retries"], 2);
        assert_eq!(error.fields["backoff"], "exponential");
    }

    #[test]
    fn test_ai_step() {
        let ai = factory().ai_step("gpt-4o-mini", "Trier les tickets");
        assert_eq!(ai.app, "OpenAI");
        assert_eq!(ai.operation, "chat-completion");
        assert_eq!(ai.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(ai.fields["user"], "Contexte du scénario: Trier les tickets\n\nDonnées: {{data}}");
        assert_eq!(ai.fields["temperature"], 0.2);
        assert!(ai.fields["system"].as_str().unwrap().contains("\"champSortie\": object"));
        assert_eq!(ai.outputs, Some(vec!["insights".to_string(), "resume".to_string(), "champSortie".to_string()]));
    }

    #[test]
    fn test_ids_are_unique() {
        let factory = factory();
        let a = factory.normalizer();
        let b = factory.normalizer();
        assert_ne!(a.id, b.id);
    }
}
