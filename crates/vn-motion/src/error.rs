use thiserror::Error;

use vn_core::AgentId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MotionError {
    /// `move_to` was called while a walk is already in flight.
    #[error("agent is already walking; stop it before starting another move")]
    AlreadyWalking,

    /// The host no longer knows the agent (despawned or unloaded).
    #[error("agent was invalidated mid-walk")]
    AgentInvalidated,

    /// The walk made no arrival within the iteration budget.
    #[error("walk aborted after {limit} iterations")]
    IterationLimit { limit: u32 },

    #[error("agent {0} is not registered")]
    UnknownAgent(AgentId),
}

pub type MotionResult<T> = Result<T, MotionError>;
