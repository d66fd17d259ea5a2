//! Planner error types.

use thiserror::Error;

use vn_core::Coord;

/// Why a planning run produced no path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// Start or goal is not currently loaded; raised before any search work.
    #[error("path endpoint {at} cannot be resolved")]
    UnresolvableEndpoint { at: Coord },

    /// The open set emptied without reaching the goal.
    #[error("no path from {from} to {to}")]
    NoPath { from: Coord, to: Coord },

    /// The closed set reached the configured node limit.
    #[error("node limit of {limit} exceeded")]
    NodeLimitExceeded { limit: usize },
}

pub type PlanResult<T> = Result<T, PlanError>;
