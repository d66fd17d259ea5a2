//! Search options: what to look for, where, and how far.

use vn_core::Coord;
use vn_grid::{Classifier, ClassifierBuilder, MovementRules, Neighborhood};

/// Straight-line radius used when the caller sets none.
pub const DEFAULT_MAX_DISTANCE: f32 = 32.0;

/// Immutable description of one flood-fill search.
///
/// Build with the fluent setters, then hand to
/// [`FloodFillSearch::new`](crate::FloodFillSearch::new) or
/// [`SearchScheduler::submit`](crate::SearchScheduler::submit).  The search
/// copies what it needs, so later changes to an options value never affect a
/// running search.
///
/// # Example
///
/// ```
/// use vn_core::Coord;
/// use vn_search::SearchOptions;
///
/// let options = SearchOptions::new(Coord::new(0, 64, 0))
///     .max_distance(24.0)
///     .target_type("chest")
///     .passable_tag("plant")
///     .max_results(4);
/// assert_eq!(options.max_results, Some(4));
/// ```
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub start: Coord,

    /// Straight-line bound from `start` (inclusive).
    pub max_distance: f32,

    /// Graph-hop bound from `start`; `None` means only `max_distance` applies.
    pub max_hops: Option<u32>,

    /// Resolve the request once this many matches are collected.
    pub max_results: Option<usize>,

    /// Cells pulled per batch; `None` defers to the scheduler's default.
    pub batch_size: Option<usize>,

    pub rules: MovementRules,

    classifier: ClassifierBuilder,
}

impl SearchOptions {
    pub fn new(start: Coord) -> Self {
        Self {
            start,
            max_distance: DEFAULT_MAX_DISTANCE,
            max_hops:     None,
            max_results:  None,
            batch_size:   None,
            rules:        MovementRules::default(),
            classifier:   ClassifierBuilder::new(),
        }
    }

    pub fn max_distance(mut self, d: f32) -> Self {
        self.max_distance = d;
        self
    }

    pub fn max_hops(mut self, hops: u32) -> Self {
        self.max_hops = Some(hops);
        self
    }

    pub fn max_results(mut self, n: usize) -> Self {
        self.max_results = Some(n);
        self
    }

    pub fn batch_size(mut self, n: usize) -> Self {
        self.batch_size = Some(n);
        self
    }

    pub fn neighborhood(mut self, n: Neighborhood) -> Self {
        self.rules.neighborhood = n;
        self
    }

    /// Let the flood climb and descend freely through passable cells.
    pub fn vertical_flood(mut self, enabled: bool) -> Self {
        self.rules.vertical_flood = enabled;
        self
    }

    pub fn require_headroom(mut self, require: bool) -> Self {
        self.rules.require_headroom = require;
        self
    }

    // ── Classification ────────────────────────────────────────────────────

    pub fn ignore_coord(mut self, at: Coord) -> Self {
        self.classifier = self.classifier.ignore_coord(at);
        self
    }

    pub fn ignore_coords<I: IntoIterator<Item = Coord>>(mut self, coords: I) -> Self {
        self.classifier = self.classifier.ignore_coords(coords);
        self
    }

    pub fn ignore_type(mut self, type_id: impl Into<String>) -> Self {
        self.classifier = self.classifier.ignore_type(type_id);
        self
    }

    pub fn ignore_tag(mut self, tag: impl Into<String>) -> Self {
        self.classifier = self.classifier.ignore_tag(tag);
        self
    }

    pub fn passable_type(mut self, type_id: impl Into<String>) -> Self {
        self.classifier = self.classifier.passable_type(type_id);
        self
    }

    pub fn passable_tag(mut self, tag: impl Into<String>) -> Self {
        self.classifier = self.classifier.passable_tag(tag);
        self
    }

    /// Cells of this type are search results (always-include).
    pub fn target_type(mut self, type_id: impl Into<String>) -> Self {
        self.classifier = self.classifier.include_type(type_id);
        self
    }

    /// Cells carrying this tag are search results (always-include).
    pub fn target_tag(mut self, tag: impl Into<String>) -> Self {
        self.classifier = self.classifier.include_tag(tag);
        self
    }

    /// The classifier these options describe.
    pub fn classifier(&self) -> Classifier {
        self.classifier.clone().build()
    }
}
