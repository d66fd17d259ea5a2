//! `Walker`: moves one agent along a planned path, one fixed-size step per
//! quantum.
//!
//! # Per-quantum step
//!
//! ```text
//! pos     = host.position(agent)          (None ⇒ AgentInvalidated)
//! while |target − pos| < radius: advance  (radius = ε, or stop_distance on the last waypoint)
//! pos'    = pos + dir(target − pos) × min(speed, |target − pos|)
//! host.teleport(agent, pos', facing = target)
//! ```
//!
//! A walker never searches: it follows the path it was handed, and a path
//! that has gone stale is the caller's problem.  Nothing is retried; a
//! failure ends the walk and is reported once.

use log::{debug, warn};

use vn_core::{AgentId, WalkConfig};
use vn_path::Path;

use crate::{AgentHost, MotionError, MotionResult, WalkState};

/// Result of one [`Walker::tick`].
#[derive(Debug, Clone, PartialEq)]
pub enum WalkStep {
    /// No walk in flight.
    Idle,
    Walking,
    /// The final waypoint is within `stop_distance`; the walker is idle again.
    Arrived,
    /// The walk ended without arriving; the walker is idle again.
    Failed(MotionError),
}

/// Single-agent movement executor.
#[derive(Debug, Clone)]
pub struct Walker {
    epsilon:        f32,
    max_iterations: u32,
    state:          Option<WalkState>,
}

impl Walker {
    pub fn new(config: &WalkConfig) -> Self {
        Self {
            epsilon:        config.waypoint_epsilon,
            max_iterations: config.max_iterations,
            state:          None,
        }
    }

    pub fn is_walking(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&WalkState> {
        self.state.as_ref()
    }

    /// Start following `path`.
    ///
    /// Fails with [`MotionError::AlreadyWalking`] if a walk is in flight; the
    /// running walk is left untouched.
    pub fn move_to(&mut self, path: &Path, speed: f32, stop_distance: f32) -> MotionResult<()> {
        if self.state.is_some() {
            return Err(MotionError::AlreadyWalking);
        }
        self.state = Some(WalkState::new(path, speed, stop_distance));
        Ok(())
    }

    /// Abort the walk.  Returns `true` if one was in flight (it did not
    /// reach its destination).
    pub fn stop(&mut self) -> bool {
        self.state.take().is_some()
    }

    /// Advance the walk by one quantum.
    pub fn tick<H: AgentHost + ?Sized>(&mut self, agent: AgentId, host: &mut H) -> WalkStep {
        let step = match self.state.as_mut() {
            None => return WalkStep::Idle,
            Some(state) => advance(state, agent, host, self.epsilon, self.max_iterations),
        };
        if !matches!(step, WalkStep::Walking) {
            self.state = None;
        }
        step
    }
}

fn advance<H: AgentHost + ?Sized>(
    state:          &mut WalkState,
    agent:          AgentId,
    host:           &mut H,
    epsilon:        f32,
    max_iterations: u32,
) -> WalkStep {
    let Some(pos) = host.position(agent) else {
        warn!("{agent} invalidated with {} waypoints left", state.remaining());
        return WalkStep::Failed(MotionError::AgentInvalidated);
    };

    let target = loop {
        let Some(target) = state.target() else {
            debug!("{agent} arrived after {} quanta", state.iterations);
            return WalkStep::Arrived;
        };
        let radius = if state.is_final() { state.stop_distance } else { epsilon };
        if pos.distance(target) < radius {
            state.advance();
        } else {
            break target;
        }
    };

    if state.iterations >= max_iterations {
        warn!("{agent} walk stalled at {pos} after {max_iterations} quanta");
        return WalkStep::Failed(MotionError::IterationLimit { limit: max_iterations });
    }
    state.iterations += 1;

    let delta = target - pos;
    let next = pos + delta.normalized() * state.speed.min(delta.length());
    if !host.teleport(agent, next, target) {
        warn!("{agent} rejected teleport to {next}");
        return WalkStep::Failed(MotionError::AgentInvalidated);
    }
    WalkStep::Walking
}

impl Default for Walker {
    fn default() -> Self {
        Self::new(&WalkConfig::default())
    }
}
