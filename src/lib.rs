//! # Ideaflow
//!
//! Ideaflow turns a free-text automation idea into a workflow blueprint for
//! an automation platform, plus a plan explaining it.
//!
//! ## Core Features
//!
//! - **Service Detection**: keyword tables map the idea onto supported services
//! - **Trigger Classification**: temporal and causal cues pick schedule, webhook or watch
//! - **Scenario Assembly**: trigger, normalizer, AI step and actions wired as a linear chain
//! - **Plan Rendering**: a sectioned plan built from the same modules as the blueprint
//!
//! Generation is pure and synchronous; ids and timestamps are injected.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ideaflow::{EngineBuilder, IdeaRequest, export};
//!
//! let engine = EngineBuilder::new().build()?;
//!
//! let request = IdeaRequest::new("Tous les jours, envoyer un résumé par email.");
//! let scenario = engine.generate(&request)?;
//!
//! println!("{}", scenario.plan);
//! export::write_blueprint(&scenario.blueprint, ".")?;
//! ```

mod builder;
mod config;
mod engine;
mod error;
pub mod export;
mod model;
mod synth;
mod utils;

pub use builder::EngineBuilder;
pub use config::{AiConfig, BlueprintConfig, Config, DetectorConfig, ErrorHandlerConfig, ScheduleConfig, ServiceKeywords, TriggerConfig};
pub use engine::Engine;
pub use error::IdeaflowError;
pub use model::*;
pub use synth::{
    Scenario,
    chain::Chain,
    detector::{ServiceDetector, ServiceSet},
    factory::ModuleFactory,
    ids::{IdAllocator, NanoIds, SequentialIds},
    plan::render_plan,
    service::ServiceTag,
    trigger::{TriggerClassifier, TriggerKind},
};
pub use utils::time::Clock;

/// Result type alias for Ideaflow operations.
pub type Result<T> = std::result::Result<T, IdeaflowError>;
