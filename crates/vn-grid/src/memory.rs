//! In-memory voxel grid used by tests, demos and hosts without a world of
//! their own.
//!
//! # Layout
//!
//! Only cells that differ from the fill type are stored, in an
//! `FxHashMap<Coord, StoredCell>`; every other coordinate reads back as the
//! fill type (usually `"air"`).  Loading is tracked per chunk column
//! ([`CHUNK_SIZE`]² in x/z, unbounded in y) so tests can unload terrain under
//! a running search and watch lookups fail as [`LookupError::Unloaded`].

use rustc_hash::{FxHashMap, FxHashSet};

use vn_core::Coord;

use crate::{Cell, Grid, LookupError};

/// Edge length of a chunk column in cells.
pub const CHUNK_SIZE: i32 = 16;

/// Position of a chunk column.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub fn of(at: Coord) -> Self {
        Self { x: at.x.div_euclid(CHUNK_SIZE), z: at.z.div_euclid(CHUNK_SIZE) }
    }
}

#[derive(Debug, Clone)]
struct StoredCell {
    type_id: String,
    tags:    Vec<String>,
}

/// Sparse hash-map grid.
#[derive(Debug, Clone)]
pub struct MemoryGrid {
    cells:     FxHashMap<Coord, StoredCell>,
    fill_type: String,
    unloaded:  FxHashSet<ChunkPos>,
    invalid:   FxHashSet<Coord>,
    min_y:     i32,
    max_y:     i32,
}

impl MemoryGrid {
    /// An all-loaded grid where every unset cell is `fill_type`.
    pub fn new(fill_type: impl Into<String>) -> Self {
        Self {
            cells:     FxHashMap::default(),
            fill_type: fill_type.into(),
            unloaded:  FxHashSet::default(),
            invalid:   FxHashSet::default(),
            min_y:     i32::MIN,
            max_y:     i32::MAX,
        }
    }

    /// Restrict the world to `min_y..=max_y`; lookups outside fail with
    /// [`LookupError::OutOfWorld`].
    pub fn with_height(mut self, min_y: i32, max_y: i32) -> Self {
        self.min_y = min_y;
        self.max_y = max_y;
        self
    }

    pub fn fill_type(&self) -> &str {
        &self.fill_type
    }

    /// Number of explicitly stored (non-fill) cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    // ── Mutation (host side) ──────────────────────────────────────────────

    pub fn set(&mut self, at: Coord, type_id: impl Into<String>) {
        self.set_tagged(at, type_id, std::iter::empty::<String>());
    }

    pub fn set_tagged<I, S>(&mut self, at: Coord, type_id: impl Into<String>, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let type_id = type_id.into();
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        self.invalid.remove(&at);
        if type_id == self.fill_type && tags.is_empty() {
            self.cells.remove(&at);
        } else {
            self.cells.insert(at, StoredCell { type_id, tags });
        }
    }

    /// Set every cell in the inclusive box spanned by `a` and `b`.
    pub fn fill(&mut self, a: Coord, b: Coord, type_id: &str) {
        for x in a.x.min(b.x)..=a.x.max(b.x) {
            for y in a.y.min(b.y)..=a.y.max(b.y) {
                for z in a.z.min(b.z)..=a.z.max(b.z) {
                    self.set(Coord::new(x, y, z), type_id);
                }
            }
        }
    }

    /// Reset `at` to the fill type.
    pub fn remove(&mut self, at: Coord) {
        self.cells.remove(&at);
        self.invalid.remove(&at);
    }

    /// Make subsequent snapshots of `at` report `valid == false`.
    pub fn mark_invalid(&mut self, at: Coord) {
        self.invalid.insert(at);
    }

    pub fn unload_chunk(&mut self, chunk: ChunkPos) {
        self.unloaded.insert(chunk);
    }

    pub fn load_chunk(&mut self, chunk: ChunkPos) {
        self.unloaded.remove(&chunk);
    }

    pub fn is_loaded(&self, at: Coord) -> bool {
        !self.unloaded.contains(&ChunkPos::of(at))
    }

    /// Type id at `at`, ignoring load state.
    pub fn type_at(&self, at: Coord) -> &str {
        self.cells.get(&at).map_or(self.fill_type.as_str(), |c| c.type_id.as_str())
    }
}

impl Default for MemoryGrid {
    fn default() -> Self {
        Self::new("air")
    }
}

impl Grid for MemoryGrid {
    fn cell(&self, at: Coord) -> Result<Cell, LookupError> {
        if at.y < self.min_y || at.y > self.max_y {
            return Err(LookupError::OutOfWorld(at));
        }
        if !self.is_loaded(at) {
            return Err(LookupError::Unloaded(at));
        }
        let mut cell = match self.cells.get(&at) {
            Some(stored) => Cell::new(at, stored.type_id.clone()).with_tags(stored.tags.iter().cloned()),
            None => Cell::new(at, self.fill_type.clone()),
        };
        cell.valid = !self.invalid.contains(&at);
        Ok(cell)
    }
}
