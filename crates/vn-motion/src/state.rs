//! Per-agent walk state.

use vn_core::Vec3;
use vn_path::Path;

/// The in-flight part of one `move_to`.
///
/// Targets are the footing points (cell centre lowered to the floor) of the
/// path's waypoints, consumed front to back.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkState {
    targets: Vec<Vec3>,
    next:    usize,

    /// Displacement per quantum.
    pub speed: f32,

    /// Arrival radius for the final target.
    pub stop_distance: f32,

    /// Quanta spent moving so far.
    pub iterations: u32,
}

impl WalkState {
    pub fn new(path: &Path, speed: f32, stop_distance: f32) -> Self {
        Self {
            targets: path.waypoints().iter().map(|c| c.coord.footing()).collect(),
            next: 0,
            speed,
            stop_distance,
            iterations: 0,
        }
    }

    /// The footing point the agent is heading for.
    #[inline]
    pub fn target(&self) -> Option<Vec3> {
        self.targets.get(self.next).copied()
    }

    /// `true` while heading for the last waypoint.
    #[inline]
    pub fn is_final(&self) -> bool {
        self.next + 1 >= self.targets.len()
    }

    pub fn advance(&mut self) {
        self.next += 1;
    }

    /// Waypoints not yet reached, including the current one.
    pub fn remaining(&self) -> usize {
        self.targets.len().saturating_sub(self.next)
    }

    pub fn is_done(&self) -> bool {
        self.next >= self.targets.len()
    }
}
