//! `vn-core`: foundational types for the `rust_vn` voxel navigation core.
//!
//! This crate is a dependency of every other `vn-*` crate.  It intentionally
//! has no `vn-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`ids`]    | `AgentId`, `RequestId`, `PlanId`                           |
//! | [`geo`]    | `Coord` (voxel key), `Vec3` (continuous position)          |
//! | [`shell`]  | `OctahedronShell`, `CuboidShell` lazy enumerators          |
//! | [`time`]   | `Quantum`, `Pacer`                                         |
//! | [`config`] | `NavConfig` and its per-subsystem sections                 |
//! | [`error`]  | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod shell;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{NavConfig, PlannerConfig, SchedulerConfig, WalkConfig};
pub use error::{CoreError, CoreResult};
pub use geo::{Coord, Vec3};
pub use ids::{AgentId, PlanId, RequestId};
pub use shell::{CuboidShell, OctahedronShell};
pub use time::{Pacer, Quantum};
