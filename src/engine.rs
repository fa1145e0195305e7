//! Scenario generation engine - the main entry point for Ideaflow.
//!
//! The engine validates a request, runs the synthesis pipeline and checks
//! the produced chain:
//! - Service detection and trigger classification
//! - Module assembly and connection wiring
//! - Plan rendering
//! - Chain verification

use std::sync::Arc;

use tracing::debug;

use crate::{
    Config, IdeaRequest, IdeaflowError, Result,
    synth::{Scenario, ScenarioAssembler, chain::Chain},
    utils::time::{self, Clock},
};

/// The scenario generator.
///
/// An engine holds only immutable configuration, an id allocator and a
/// clock, so it can be shared across threads and called concurrently.
///
/// # Example
///
/// ```rust,ignore
/// let engine = EngineBuilder::new().build()?;
///
/// let request = IdeaRequest::new("Quand un formulaire Typeform est soumis, notifier sur Slack.");
/// let scenario = engine.generate(&request)?;
///
/// println!("{}", scenario.plan);
/// println!("{}", scenario.blueprint.to_json_pretty()?);
/// ```
pub struct Engine {
    /// Generator configuration.
    config: Arc<Config>,
    /// Synthesis pipeline.
    assembler: ScenarioAssembler,
    /// Timestamp source for blueprint metadata.
    clock: Clock,
}

impl Engine {
    pub(crate) fn new(
        config: Arc<Config>,
        assembler: ScenarioAssembler,
        clock: Clock,
    ) -> Self {
        Self { config, assembler, clock }
    }

    /// Generates the plan and blueprint for a request.
    ///
    /// Fails only when the idea is empty after trimming; no partial output
    /// is produced in that case.
    pub fn generate(
        &self,
        request: &IdeaRequest,
    ) -> Result<Scenario> {
        let idea = request.idea.trim();
        if idea.is_empty() {
            return Err(IdeaflowError::Input("Décrivez votre idée.".to_string()));
        }

        let model = request.model.as_deref().map(str::trim).filter(|m| !m.is_empty()).unwrap_or(self.config.model.as_str());
        let created_at = time::iso8601((self.clock)());

        let scenario = self.assembler.assemble(idea, request.trigger, model, &request.services, created_at);
        Chain::try_from(&scenario.blueprint)?.verify()?;

        debug!(
            name = scenario.blueprint.name.as_str(),
            trigger = scenario.trigger.as_ref(),
            modules = scenario.modules().len(),
            "generated scenario"
        );
        Ok(scenario)
    }

    /// Returns the configuration the engine was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }
}
