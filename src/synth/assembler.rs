//! Scenario assembly: from an idea to a blueprint and its plan.

use std::sync::Arc;

use tracing::debug;

use crate::{
    BLUEPRINT_VERSION, BlueprintMetadata, BlueprintModel, Config, ConnectionModel, ModuleModel, ModuleRole, ServiceTag,
    synth::{
        detector::{ServiceDetector, ServiceSet},
        factory::ModuleFactory,
        plan::render_plan,
        service::{DOWNSTREAM_ORDER, WATCH_PREFERENCE},
        trigger::{TriggerClassifier, TriggerKind},
    },
};

/// Everything generated for one idea.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// detected plus preselected services
    pub services: ServiceSet,
    /// resolved trigger kind
    pub trigger: TriggerKind,
    /// execution plan
    pub plan: String,
    /// importable workflow definition
    pub blueprint: BlueprintModel,
}

impl Scenario {
    /// Main chain modules, in execution order.
    pub fn modules(&self) -> &[ModuleModel] {
        &self.blueprint.modules
    }

    /// Action modules placed after the AI step.
    pub fn downstream(&self) -> impl Iterator<Item = &ModuleModel> {
        self.blueprint.modules.iter().filter(|m| m.position == ModuleRole::Action)
    }

    pub fn error_handler(&self) -> &ModuleModel {
        &self.blueprint.error
    }
}

/// Builds scenarios from the detector, the classifier and the module factory.
#[derive(Clone)]
pub struct ScenarioAssembler {
    detector: ServiceDetector,
    classifier: TriggerClassifier,
    factory: ModuleFactory,
    config: Arc<Config>,
}

impl ScenarioAssembler {
    pub fn new(
        config: Arc<Config>,
        factory: ModuleFactory,
    ) -> Self {
        Self {
            detector: ServiceDetector::new(&config.detector),
            classifier: TriggerClassifier::new(&config.trigger),
            factory,
            config,
        }
    }

    /// Assembles the scenario for an already validated idea.
    ///
    /// `created_at` is written as-is into the blueprint metadata.
    pub fn assemble(
        &self,
        idea: &str,
        explicit_trigger: Option<TriggerKind>,
        model: &str,
        preselected: &ServiceSet,
        created_at: String,
    ) -> Scenario {
        let services = self.detector.detect(idea, preselected);
        let trigger = self.classifier.classify(idea, explicit_trigger);
        debug!(services = ?services, trigger = trigger.as_ref(), "resolved services and trigger");

        let trigger_module = self.trigger_module(trigger, &services);
        let normalizer = self.factory.normalizer();
        let ai = self.factory.ai_step(model, idea);

        let downstream: Vec<ModuleModel> = DOWNSTREAM_ORDER
            .iter()
            .filter(|tag| services.contains(*tag))
            .map(|tag| self.factory.module_for(*tag, ModuleRole::Action))
            .collect();

        let error = self.factory.error_handler();

        let plan = render_plan(idea, &trigger_module, &ai, &downstream, &error);

        let mut modules = Vec::with_capacity(3 + downstream.len());
        modules.push(trigger_module);
        modules.push(normalizer);
        modules.push(ai);
        modules.extend(downstream);

        let connections = link(&modules);
        debug!(modules = modules.len(), connections = connections.len(), "assembled scenario chain");

        let blueprint = BlueprintModel {
            version: BLUEPRINT_VERSION,
            name: self.scenario_name(idea),
            metadata: BlueprintMetadata {
                created_at,
                generator: self.config.blueprint.generator.clone(),
            },
            modules,
            connections,
            error,
        };

        Scenario {
            services,
            trigger,
            plan,
            blueprint,
        }
    }

    fn trigger_module(
        &self,
        trigger: TriggerKind,
        services: &ServiceSet,
    ) -> ModuleModel {
        match trigger {
            TriggerKind::Schedule => self.factory.scheduler(),
            TriggerKind::Webhook => self.factory.module_for(ServiceTag::Webhook, ModuleRole::Trigger),
            TriggerKind::Watch => {
                let watched = WATCH_PREFERENCE.iter().find(|tag| services.contains(*tag) && tag.supports_watch()).copied().unwrap_or(ServiceTag::Webhook);
                self.factory.module_for(watched, ModuleRole::Trigger)
            }
        }
    }

    /// Prefix plus the first characters of the idea.
    fn scenario_name(
        &self,
        idea: &str,
    ) -> String {
        let settings = &self.config.blueprint;
        let head: String = idea.chars().take(settings.name_max_chars).collect();
        format!("{}{}", settings.name_prefix, head)
    }
}

/// Links consecutive modules; list order is chain order.
fn link(modules: &[ModuleModel]) -> Vec<ConnectionModel> {
    modules.windows(2).map(|pair| ConnectionModel::new(pair[0].id.as_str(), pair[1].id.as_str())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::{chain::Chain, ids::SequentialIds};

    const CREATED_AT: &str = "2024-05-01T08:00:00.000Z";

    fn assembler() -> ScenarioAssembler {
        let config = Arc::new(Config::default());
        let factory = ModuleFactory::new(Arc::new(SequentialIds::new()), config.clone());
        ScenarioAssembler::new(config, factory)
    }

    fn apps(scenario: &Scenario) -> Vec<&str> {
        scenario.modules().iter().map(|m| m.app.as_str()).collect()
    }

    #[test]
    fn test_typeform_sheets_slack_scenario() {
        let scenario = assembler().assemble(
            "Quand un formulaire Typeform est soumis, analyser avec l'IA, ajouter une ligne dans Google Sheets et notifier sur Slack.",
            None,
            "gpt-4o-mini",
            &ServiceSet::new(),
            CREATED_AT.to_string(),
        );

        assert_eq!(scenario.trigger, TriggerKind::Webhook);
        assert_eq!(scenario.services, ServiceSet::from([ServiceTag::Typeform, ServiceTag::Sheets, ServiceTag::Slack]));
        assert_eq!(apps(&scenario), vec!["Webhooks", "Tools", "OpenAI", "Google Sheets", "Slack"]);
        assert_eq!(scenario.blueprint.connections.len(), 4);

        let error_id = &scenario.error_handler().id;
        assert!(scenario.blueprint.connections.iter().all(|c| &c.from != error_id && &c.to != error_id));
        Chain::try_from(&scenario.blueprint).unwrap().verify().unwrap();
    }

    #[test]
    fn test_connections_follow_module_order() {
        let scenario = assembler().assemble("Notion et calendar puis slack", None, "m", &ServiceSet::new(), CREATED_AT.to_string());
        let ids: Vec<&str> = scenario.modules().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["webhook_1", "map_2", "ai_3", "notion_4", "calendar_5", "slack_6"]);
        assert_eq!(scenario.blueprint.connections[0], ConnectionModel::new("webhook_1", "map_2"));
        assert_eq!(scenario.blueprint.connections[4], ConnectionModel::new("calendar_5", "slack_6"));
        assert_eq!(scenario.error_handler().id, "error_7");
    }

    #[test]
    fn test_downstream_order_persist_before_notify() {
        let preselected = ServiceSet::from([ServiceTag::Gmail, ServiceTag::Slack, ServiceTag::Calendar, ServiceTag::Notion, ServiceTag::Sheets]);
        let scenario = assembler().assemble("Idée", None, "m", &preselected, CREATED_AT.to_string());
        let downstream: Vec<&str> = scenario.downstream().map(|m| m.app.as_str()).collect();
        assert_eq!(downstream, vec!["Google Sheets", "Notion", "Google Calendar", "Slack", "Gmail"]);
    }

    #[test]
    fn test_schedule_trigger() {
        let scenario = assembler().assemble("Tous les jours, envoyer un résumé par email.", None, "m", &ServiceSet::new(), CREATED_AT.to_string());
        assert_eq!(scenario.trigger, TriggerKind::Schedule);
        assert_eq!(scenario.modules()[0].operation, "cron");
        assert_eq!(scenario.modules()[0].fields["cron"], "0 8 * * *");
        assert_eq!(scenario.downstream().filter(|m| m.app == "Gmail").count(), 1);
    }

    #[test]
    fn test_watch_trigger_prefers_typeform_then_gmail() {
        let assembler = assembler();
        let preselected = ServiceSet::from([ServiceTag::Slack, ServiceTag::Gmail, ServiceTag::Sheets]);
        let scenario = assembler.assemble("Ajouter une ligne", Some(TriggerKind::Watch), "m", &preselected, CREATED_AT.to_string());
        assert_eq!(scenario.trigger, TriggerKind::Watch);
        assert_eq!(scenario.modules()[0].app, "Gmail");
        assert_eq!(scenario.modules()[0].operation, "watch-emails");
        assert_eq!(scenario.modules()[0].position, ModuleRole::Trigger);
        // the watched service still gets its downstream action
        assert_eq!(scenario.downstream().filter(|m| m.app == "Gmail").count(), 1);

        let preselected = ServiceSet::from([ServiceTag::Gmail, ServiceTag::Typeform]);
        let scenario = assembler.assemble("Ajouter une ligne", Some(TriggerKind::Watch), "m", &preselected, CREATED_AT.to_string());
        assert_eq!(scenario.modules()[0].app, "Typeform");
    }

    #[test]
    fn test_watch_trigger_without_watchable_service() {
        let preselected = ServiceSet::from([ServiceTag::Calendar]);
        let scenario = assembler().assemble("Ajouter une ligne", Some(TriggerKind::Watch), "m", &preselected, CREATED_AT.to_string());
        assert_eq!(scenario.modules()[0].app, "Webhooks");
        assert_eq!(scenario.modules()[0].operation, "custom-webhook");
    }

    #[test]
    fn test_blueprint_metadata_and_name() {
        let idea = "é".repeat(80);
        let scenario = assembler().assemble(&idea, None, "gpt-4o", &ServiceSet::new(), CREATED_AT.to_string());
        let blueprint = &scenario.blueprint;
        assert_eq!(blueprint.version, 1);
        assert_eq!(blueprint.name, format!("Scénario IA – {}", "é".repeat(60)));
        assert_eq!(blueprint.metadata.created_at, CREATED_AT);
        assert_eq!(blueprint.metadata.generator, "Architecte Make IA (statique)");
        assert_eq!(blueprint.modules[2].model.as_deref(), Some("gpt-4o"));
    }
}
