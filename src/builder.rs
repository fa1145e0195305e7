use std::sync::Arc;

use crate::{
    Config, Engine, Result,
    synth::{
        ScenarioAssembler,
        factory::ModuleFactory,
        ids::{IdAllocator, NanoIds},
    },
    utils::time::{self, Clock},
};

pub struct EngineBuilder {
    config: Config,
    ids: Option<Arc<dyn IdAllocator>>,
    clock: Option<Clock>,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            config: Config::default(),
            ids: None,
            clock: None,
        }
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(
        mut self,
        config: Config,
    ) -> Self {
        self.config = config;
        self
    }

    /// Replaces the random id allocator, e.g. with
    /// [`SequentialIds`](crate::SequentialIds) for reproducible output.
    pub fn ids(
        mut self,
        ids: Arc<dyn IdAllocator>,
    ) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn clock(
        mut self,
        clock: Clock,
    ) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> Result<Engine> {
        let mut config = self.config;
        config.prepare()?;
        let config = Arc::new(config);
        let ids = self.ids.unwrap_or_else(|| Arc::new(NanoIds));
        let clock = self.clock.unwrap_or_else(time::system_clock);

        let factory = ModuleFactory::new(ids, config.clone());
        let assembler = ScenarioAssembler::new(config.clone(), factory);

        Ok(Engine::new(config, assembler, clock))
    }
}
