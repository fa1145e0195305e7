mod assembler;
pub mod chain;
pub mod detector;
pub mod factory;
pub mod ids;
pub mod plan;
pub mod service;
pub mod trigger;

pub use assembler::{Scenario, ScenarioAssembler};
