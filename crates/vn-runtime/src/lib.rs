//! `vn-runtime`: quantum loop orchestrator for the rust_vn framework.
//!
//! # Three-phase quantum loop
//!
//! ```text
//! each host quantum:
//!   ① Search  : SearchScheduler::tick: every interval_quanta, admit queued
//!               requests (FIFO, capped) and pull one batch from each.
//!   ② Plan    : one A* expansion per in-flight plan (ascending PlanId);
//!               a found walk_to path starts that agent's walker.
//!   ③ Walk    : one fixed-size step per walking agent (ascending AgentId).
//!   Completions of all three go to the NavObserver.
//! ```
//!
//! Nothing in the loop is fatal: each failure resolves only its own search,
//! plan or walk.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use vn_core::{AgentId, Coord};
//! use vn_motion::MemoryHost;
//! use vn_runtime::{NavigatorBuilder, NoopObserver};
//!
//! let mut nav = NavigatorBuilder::new().build()?;
//! nav.walk_to(&grid, &host, AgentId(0), Coord::new(10, 64, 0))?;
//! nav.run_until_idle(&grid, &mut host, &mut NoopObserver, 10_000)?;
//! ```

pub mod builder;
pub mod error;
pub mod navigator;
pub mod observer;

#[cfg(test)]
mod tests;

pub use builder::NavigatorBuilder;
pub use error::{NavError, NavResult};
pub use navigator::Navigator;
pub use observer::{LogObserver, NavObserver, NoopObserver};
