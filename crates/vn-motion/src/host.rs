//! The agent boundary: how walkers read and move the host's agents.

use rustc_hash::FxHashMap;

use vn_core::{AgentId, Vec3};

/// Host-side agent access.
///
/// Like the grid, agents belong to the host.  A walker only ever reads an
/// agent's position and asks the host to move it.
pub trait AgentHost {
    /// Current position of `agent`, or `None` once it is no longer valid.
    fn position(&self, agent: AgentId) -> Option<Vec3>;

    /// Move `agent` to `to`, turning it to look at `facing`.
    ///
    /// Returns `false` when the agent is gone.
    fn teleport(&mut self, agent: AgentId, to: Vec3, facing: Vec3) -> bool;
}

/// Agent position and the last facing hint it received.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentPose {
    pub position: Vec3,
    pub facing:   Option<Vec3>,
}

/// Hash-map host for tests and demos.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    agents: FxHashMap<AgentId, AgentPose>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, agent: AgentId, at: Vec3) {
        self.agents.insert(agent, AgentPose { position: at, facing: None });
    }

    /// Remove `agent`; later lookups report it invalid.
    pub fn despawn(&mut self, agent: AgentId) -> Option<AgentPose> {
        self.agents.remove(&agent)
    }

    pub fn pose(&self, agent: AgentId) -> Option<AgentPose> {
        self.agents.get(&agent).copied()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl AgentHost for MemoryHost {
    fn position(&self, agent: AgentId) -> Option<Vec3> {
        self.agents.get(&agent).map(|a| a.position)
    }

    fn teleport(&mut self, agent: AgentId, to: Vec3, facing: Vec3) -> bool {
        match self.agents.get_mut(&agent) {
            Some(pose) => {
                pose.position = to;
                pose.facing = Some(facing);
                true
            }
            None => false,
        }
    }
}
