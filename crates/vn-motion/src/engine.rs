//! `MotionEngine`: the walker registry: one [`Walker`] per registered agent.

use rustc_hash::FxHashMap;

use vn_core::{AgentId, WalkConfig};
use vn_path::Path;

use crate::{AgentHost, MotionError, MotionResult, WalkStep, Walker};

/// Owns every agent's walker and ticks them together.
///
/// Agents are serviced in ascending `AgentId` order each quantum.
pub struct MotionEngine {
    config:  WalkConfig,
    walkers: FxHashMap<AgentId, Walker>,
}

impl MotionEngine {
    pub fn new(config: WalkConfig) -> Self {
        Self { config, walkers: FxHashMap::default() }
    }

    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    /// Give `agent` a walker.  Returns `false` if it already had one.
    pub fn register(&mut self, agent: AgentId) -> bool {
        if self.walkers.contains_key(&agent) {
            return false;
        }
        self.walkers.insert(agent, Walker::new(&self.config));
        true
    }

    /// Drop `agent`'s walker, abandoning any walk in flight.
    pub fn remove(&mut self, agent: AgentId) -> Option<Walker> {
        self.walkers.remove(&agent)
    }

    pub fn walker(&self, agent: AgentId) -> Option<&Walker> {
        self.walkers.get(&agent)
    }

    pub fn len(&self) -> usize {
        self.walkers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walkers.is_empty()
    }

    /// Start `agent` walking `path` at the configured speed and stop
    /// distance.
    pub fn begin_walk(&mut self, agent: AgentId, path: &Path) -> MotionResult<()> {
        let (speed, stop) = (self.config.speed, self.config.stop_distance);
        self.begin_walk_with(agent, path, speed, stop)
    }

    pub fn begin_walk_with(&mut self, agent: AgentId, path: &Path, speed: f32, stop_distance: f32) -> MotionResult<()> {
        self.walkers
            .get_mut(&agent)
            .ok_or(MotionError::UnknownAgent(agent))?
            .move_to(path, speed, stop_distance)
    }

    /// Abort `agent`'s walk.  `Ok(true)` if one was in flight.
    pub fn stop(&mut self, agent: AgentId) -> MotionResult<bool> {
        self.walkers
            .get_mut(&agent)
            .map(Walker::stop)
            .ok_or(MotionError::UnknownAgent(agent))
    }

    pub fn is_walking(&self, agent: AgentId) -> bool {
        self.walkers.get(&agent).is_some_and(Walker::is_walking)
    }

    /// Number of walks in flight.
    pub fn walking_len(&self) -> usize {
        self.walkers.values().filter(|w| w.is_walking()).count()
    }

    /// Advance every walking agent by one quantum.
    ///
    /// Returns the agents whose walk ended this quantum, each with
    /// [`WalkStep::Arrived`] or [`WalkStep::Failed`].
    pub fn tick<H: AgentHost + ?Sized>(&mut self, host: &mut H) -> Vec<(AgentId, WalkStep)> {
        let mut agents: Vec<AgentId> = self
            .walkers
            .iter()
            .filter(|(_, w)| w.is_walking())
            .map(|(&id, _)| id)
            .collect();
        agents.sort_unstable();

        let mut ended = Vec::new();
        for agent in agents {
            let Some(walker) = self.walkers.get_mut(&agent) else { continue };
            match walker.tick(agent, host) {
                WalkStep::Walking | WalkStep::Idle => {}
                step => ended.push((agent, step)),
            }
        }
        ended
    }
}

impl Default for MotionEngine {
    fn default() -> Self {
        Self::new(WalkConfig::default())
    }
}
