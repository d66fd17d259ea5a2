//! Cell snapshots and the grid accessor boundary.
//!
//! # Snapshot rule
//!
//! A [`Cell`] is a copy of what the grid held at the moment of the lookup.
//! The grid is owned and mutated by the host between quanta, so nothing in
//! this workspace keeps a `Cell` across quanta to make decisions with; every
//! quantum re-reads what it needs through [`Grid::cell`].

use vn_core::Coord;

use crate::LookupError;

// ── Cell ──────────────────────────────────────────────────────────────────────

/// Read-only snapshot of one addressable voxel.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Cell {
    pub coord: Coord,

    /// Namespaced type identifier, e.g. `"air"` or `"oak_log"`.
    pub type_id: String,

    /// Unordered tag set attached to the cell type.
    pub tags: Vec<String>,

    /// `false` once the host has invalidated the underlying cell (destroyed
    /// or being replaced).  Stale cells are never reported as matches.
    pub valid: bool,
}

impl Cell {
    pub fn new(coord: Coord, type_id: impl Into<String>) -> Self {
        Self { coord, type_id: type_id.into(), tags: Vec::new(), valid: true }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[inline]
    pub fn is_type(&self, type_id: &str) -> bool {
        self.type_id == type_id
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

// ── Grid trait ────────────────────────────────────────────────────────────────

/// The external voxel grid, as seen by the navigation core.
///
/// Implementations wrap the host's world.  Lookups must present failures as
/// data: anything the host raises for unloaded chunks or out-of-world
/// positions is translated into a [`LookupError`] before it reaches the
/// core.  The core treats every `LookupError` as "cell absent" and recovers
/// locally.
pub trait Grid {
    /// Snapshot the cell at `at`.
    fn cell(&self, at: Coord) -> Result<Cell, LookupError>;
}

impl<G: Grid + ?Sized> Grid for &G {
    #[inline]
    fn cell(&self, at: Coord) -> Result<Cell, LookupError> {
        (**self).cell(at)
    }
}
