//! Fluent builder for constructing a [`Navigator`].

use vn_core::{AgentId, NavConfig, PlannerConfig, Quantum, SchedulerConfig, WalkConfig};

use crate::{Navigator, NavResult};

/// Fluent builder for [`Navigator`].
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                       |
/// |-------------------|-------------------------------|
/// | `.config(c)`      | `NavConfig::default()`        |
/// | `.scheduler(s)`   | section of the config         |
/// | `.planner(p)`     | section of the config         |
/// | `.walk(w)`        | section of the config         |
/// | `.agents(ids)`    | no agents registered up front |
/// | `.start_at(q)`    | `Quantum::ZERO`               |
///
/// # Example
///
/// ```rust,ignore
/// let mut nav = NavigatorBuilder::new()
///     .scheduler(SchedulerConfig { interval_quanta: 1, ..Default::default() })
///     .agents([AgentId(0), AgentId(1)])
///     .build()?;
/// nav.run_until_idle(&grid, &mut host, &mut NoopObserver, 1_000)?;
/// ```
#[derive(Default)]
pub struct NavigatorBuilder {
    config: NavConfig,
    agents: Vec<AgentId>,
    start:  Quantum,
}

impl NavigatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: NavConfig) -> Self {
        self.config = config;
        self
    }

    pub fn scheduler(mut self, scheduler: SchedulerConfig) -> Self {
        self.config.scheduler = scheduler;
        self
    }

    pub fn planner(mut self, planner: PlannerConfig) -> Self {
        self.config.planner = planner;
        self
    }

    pub fn walk(mut self, walk: WalkConfig) -> Self {
        self.config.walk = walk;
        self
    }

    /// Give these agents a walker up front.  Agents are also registered
    /// lazily by `walk_to` and `walk_path`.
    pub fn agents<I: IntoIterator<Item = AgentId>>(mut self, agents: I) -> Self {
        self.agents.extend(agents);
        self
    }

    /// First quantum the navigator will process.
    pub fn start_at(mut self, start: Quantum) -> Self {
        self.start = start;
        self
    }

    /// Validate the configuration and return an idle [`Navigator`].
    pub fn build(self) -> NavResult<Navigator> {
        self.config.validate()?;
        let mut nav = Navigator::from_parts(self.config, self.start);
        for agent in self.agents {
            nav.register(agent);
        }
        Ok(nav)
    }
}
