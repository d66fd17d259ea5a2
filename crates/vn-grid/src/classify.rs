//! Passability classification.
//!
//! # Precedence
//!
//! ```text
//! ignored-by-coordinate > ignored-by-type/tag > always-include-by-type/tag
//!     > passable-by-type/tag > Blocking
//! ```
//!
//! [`Classifier::classify`] applies the full precedence and is what searches
//! use to decide whether a discovered cell is skipped, reported, or walked
//! through.  The movement rules only need the narrower questions "can an
//! agent occupy this?" ([`Classifier::is_passable`]) and "may an agent hop
//! over this?" ([`Classifier::is_unjumpable`]), so those are exposed
//! separately.

use rustc_hash::FxHashSet;

use vn_core::Coord;

use crate::Cell;

/// Type ids every default classifier treats as passable.
pub const DEFAULT_PASSABLE_TYPES: &[&str] = &["air"];

/// Tags marking one-block-high obstacles whose collision box is taller than
/// a block, so they cannot be hopped over.
pub const DEFAULT_UNJUMPABLE_TAGS: &[&str] = &["fence", "fence_gate", "wall"];

/// How a cell affects traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Passability {
    /// Never evaluated, never reported, never expanded.
    Ignored,
    /// Reported regardless of passability (a search target).
    AlwaysInclude,
    /// An agent can occupy this cell.
    Passable,
    /// Solid for movement purposes.
    Blocking,
}

/// Set of type ids and tags, matched against a cell.
#[derive(Debug, Clone, Default)]
struct Matcher {
    types: FxHashSet<String>,
    tags:  FxHashSet<String>,
}

impl Matcher {
    #[inline]
    fn matches(&self, cell: &Cell) -> bool {
        self.types.contains(cell.type_id.as_str())
            || (!self.tags.is_empty() && cell.tags.iter().any(|t| self.tags.contains(t.as_str())))
    }

    fn is_empty(&self) -> bool {
        self.types.is_empty() && self.tags.is_empty()
    }
}

/// Pure, deterministic cell classifier.
///
/// Build with [`Classifier::builder`].  `Classifier::default()` treats
/// [`DEFAULT_PASSABLE_TYPES`] as passable, [`DEFAULT_UNJUMPABLE_TAGS`] as
/// unjumpable, and everything else as blocking.
#[derive(Debug, Clone)]
pub struct Classifier {
    ignored_coords: FxHashSet<Coord>,
    ignored:        Matcher,
    include:        Matcher,
    passable:       Matcher,
    unjumpable:     Matcher,
}

impl Classifier {
    pub fn builder() -> ClassifierBuilder {
        ClassifierBuilder::new()
    }

    /// Full-precedence classification of `cell`.
    pub fn classify(&self, cell: &Cell) -> Passability {
        if self.ignored_coords.contains(&cell.coord) || self.ignored.matches(cell) {
            Passability::Ignored
        } else if self.include.matches(cell) {
            Passability::AlwaysInclude
        } else if self.passable.matches(cell) {
            Passability::Passable
        } else {
            Passability::Blocking
        }
    }

    /// `true` if an agent can occupy `cell`.  Ignored types are never
    /// passable; an always-include cell is passable only if it also matches
    /// the passable set.
    pub fn is_passable(&self, cell: &Cell) -> bool {
        !self.ignored.matches(cell) && self.passable.matches(cell)
    }

    /// `true` if `cell` matches the always-include set (ignores excluded).
    pub fn is_included(&self, cell: &Cell) -> bool {
        self.classify(cell) == Passability::AlwaysInclude
    }

    /// `true` if `cell` is a low obstacle that must not be stepped onto.
    pub fn is_unjumpable(&self, cell: &Cell) -> bool {
        self.unjumpable.matches(cell)
    }

    #[inline]
    pub fn is_ignored_coord(&self, at: Coord) -> bool {
        self.ignored_coords.contains(&at)
    }

    pub fn ignored_coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.ignored_coords.iter().copied()
    }

    /// `true` if the classifier has any always-include criteria at all.
    pub fn has_targets(&self) -> bool {
        !self.include.is_empty()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        ClassifierBuilder::new().build()
    }
}

// ── ClassifierBuilder ─────────────────────────────────────────────────────────

/// Fluent construction of a [`Classifier`].
///
/// The passable set starts as [`DEFAULT_PASSABLE_TYPES`] and the unjumpable
/// set as [`DEFAULT_UNJUMPABLE_TAGS`]; call
/// [`clear_passable`](Self::clear_passable) /
/// [`clear_unjumpable`](Self::clear_unjumpable) to start from nothing.
///
/// # Example
///
/// ```
/// use vn_core::Coord;
/// use vn_grid::{Cell, Classifier, Passability};
///
/// let classifier = Classifier::builder()
///     .passable_tag("plant")
///     .include_type("chest")
///     .ignore_coord(Coord::new(0, 64, 0))
///     .build();
///
/// let chest = Cell::new(Coord::new(1, 64, 0), "chest");
/// assert_eq!(classifier.classify(&chest), Passability::AlwaysInclude);
/// ```
#[derive(Debug, Clone)]
pub struct ClassifierBuilder {
    inner: Classifier,
}

impl ClassifierBuilder {
    pub fn new() -> Self {
        let mut inner = Classifier {
            ignored_coords: FxHashSet::default(),
            ignored:        Matcher::default(),
            include:        Matcher::default(),
            passable:       Matcher::default(),
            unjumpable:     Matcher::default(),
        };
        inner.passable.types.extend(DEFAULT_PASSABLE_TYPES.iter().map(|s| s.to_string()));
        inner.unjumpable.tags.extend(DEFAULT_UNJUMPABLE_TAGS.iter().map(|s| s.to_string()));
        Self { inner }
    }

    pub fn ignore_coord(mut self, at: Coord) -> Self {
        self.inner.ignored_coords.insert(at);
        self
    }

    pub fn ignore_coords<I: IntoIterator<Item = Coord>>(mut self, coords: I) -> Self {
        self.inner.ignored_coords.extend(coords);
        self
    }

    pub fn ignore_type(mut self, type_id: impl Into<String>) -> Self {
        self.inner.ignored.types.insert(type_id.into());
        self
    }

    pub fn ignore_tag(mut self, tag: impl Into<String>) -> Self {
        self.inner.ignored.tags.insert(tag.into());
        self
    }

    pub fn include_type(mut self, type_id: impl Into<String>) -> Self {
        self.inner.include.types.insert(type_id.into());
        self
    }

    pub fn include_tag(mut self, tag: impl Into<String>) -> Self {
        self.inner.include.tags.insert(tag.into());
        self
    }

    pub fn passable_type(mut self, type_id: impl Into<String>) -> Self {
        self.inner.passable.types.insert(type_id.into());
        self
    }

    pub fn passable_tag(mut self, tag: impl Into<String>) -> Self {
        self.inner.passable.tags.insert(tag.into());
        self
    }

    pub fn clear_passable(mut self) -> Self {
        self.inner.passable = Matcher::default();
        self
    }

    pub fn unjumpable_type(mut self, type_id: impl Into<String>) -> Self {
        self.inner.unjumpable.types.insert(type_id.into());
        self
    }

    pub fn unjumpable_tag(mut self, tag: impl Into<String>) -> Self {
        self.inner.unjumpable.tags.insert(tag.into());
        self
    }

    pub fn clear_unjumpable(mut self) -> Self {
        self.inner.unjumpable = Matcher::default();
        self
    }

    pub fn build(self) -> Classifier {
        self.inner
    }
}

impl Default for ClassifierBuilder {
    fn default() -> Self {
        Self::new()
    }
}
