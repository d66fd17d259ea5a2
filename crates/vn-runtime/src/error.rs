use thiserror::Error;

use vn_core::{CoreError, PlanId};
use vn_motion::MotionError;
use vn_path::PlanError;
use vn_search::SearchError;

#[derive(Debug, Error)]
pub enum NavError {
    #[error("navigator configuration error: {0}")]
    Config(#[from] CoreError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Motion(#[from] MotionError),

    #[error("plan {0} is not known to this navigator")]
    UnknownPlan(PlanId),

    /// `run_until_idle` gave up with work still in flight.
    #[error("navigator still busy after {quanta} quanta")]
    Stalled { quanta: u64 },
}

pub type NavResult<T> = Result<T, NavError>;
