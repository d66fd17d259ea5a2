//! Top-level navigation configuration.
//!
//! Typically loaded from a TOML/JSON file by the host application (enable the
//! `serde` feature) and handed to the search scheduler, planners and walkers.
//! Every field has a default matching the values the system was tuned with.

use crate::{CoreError, CoreResult};

/// Search scheduler knobs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SchedulerConfig {
    /// Maximum number of searches advanced concurrently.  Default: 2.
    pub max_concurrent: usize,

    /// Run the scheduler every N host quanta.  Default: 5.
    pub interval_quanta: u64,

    /// Cells pulled per active search per scheduler quantum when the request
    /// does not specify its own batch size.  Default: 8.
    pub default_batch_size: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { max_concurrent: 2, interval_quanta: 5, default_batch_size: 8 }
    }
}

/// A* planner knobs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// Closed-set size past which a run fails with `NodeLimitExceeded`.
    pub max_nodes: usize,

    /// Allow the four diagonal horizontal moves.  Default: `true`.
    pub diagonal: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self { max_nodes: 100, diagonal: true }
    }
}

/// Movement executor knobs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WalkConfig {
    /// Displacement per quantum in blocks.  Default: 1/8.
    pub speed: f32,

    /// Arrival radius for intermediate waypoints.  Default: 0.15.
    pub waypoint_epsilon: f32,

    /// Arrival radius for the final waypoint.  Default: 2.0.
    pub stop_distance: f32,

    /// Quanta after which a walk is abandoned as stalled.  Default: 2500.
    pub max_iterations: u32,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            speed:            0.125,
            waypoint_epsilon: 0.15,
            stop_distance:    2.0,
            max_iterations:   2_500,
        }
    }
}

/// Everything the navigation core can be tuned with.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavConfig {
    pub scheduler: SchedulerConfig,
    pub planner:   PlannerConfig,
    pub walk:      WalkConfig,
}

impl NavConfig {
    /// Reject values that would make a subsystem spin without progress.
    pub fn validate(&self) -> CoreResult<()> {
        if self.scheduler.max_concurrent == 0 {
            return Err(CoreError::Config("scheduler.max_concurrent must be at least 1".into()));
        }
        if self.scheduler.default_batch_size == 0 {
            return Err(CoreError::Config("scheduler.default_batch_size must be at least 1".into()));
        }
        if self.planner.max_nodes == 0 {
            return Err(CoreError::Config("planner.max_nodes must be at least 1".into()));
        }
        if !(self.walk.speed > 0.0) {
            return Err(CoreError::Config(format!("walk.speed must be positive, got {}", self.walk.speed)));
        }
        if !(self.walk.waypoint_epsilon > 0.0) || !(self.walk.stop_distance > 0.0) {
            return Err(CoreError::Config("walk arrival radii must be positive".into()));
        }
        if self.walk.max_iterations == 0 {
            return Err(CoreError::Config("walk.max_iterations must be at least 1".into()));
        }
        Ok(())
    }
}
