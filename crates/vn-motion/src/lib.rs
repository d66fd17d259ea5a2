//! `vn-motion`: moving agents along planned paths.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                       |
//! |------------|----------------------------------------------------------------|
//! | [`host`]   | `AgentHost` trait, `MemoryHost` fixture host                   |
//! | [`state`]  | `WalkState`: remaining targets, speed, iteration count        |
//! | [`walker`] | `Walker` (single-agent executor), `WalkStep`                   |
//! | [`engine`] | `MotionEngine`: registry of one walker per agent              |
//! | [`error`]  | `MotionError`, `MotionResult<T>`                               |
//!
//! # Movement model (fixed-step teleport)
//!
//! 1. `Walker::move_to` stores the path's waypoints as footing points; a
//!    second call while walking fails with `AlreadyWalking`.
//! 2. Each quantum the agent is teleported `speed` blocks toward its current
//!    target (never past it), facing the target.
//! 3. Intermediate targets count as reached within `waypoint_epsilon`, the
//!    final one within `stop_distance`.
//! 4. The walk fails if the host loses the agent or after `max_iterations`
//!    quanta.

pub mod engine;
pub mod error;
pub mod host;
pub mod state;
pub mod walker;

#[cfg(test)]
mod tests;

pub use engine::MotionEngine;
pub use error::{MotionError, MotionResult};
pub use host::{AgentHost, AgentPose, MemoryHost};
pub use state::WalkState;
pub use walker::{WalkStep, Walker};
