//! `FloodFillSearch`: incremental breadth-first walk over reachable cells.
//!
//! # Algorithm
//!
//! The frontier is a FIFO of coordinates tagged with their hop count.  Each
//! call to [`next_batch`](FloodFillSearch::next_batch) pops up to `max`
//! entries, re-reads each cell from the grid, emits it, and expands it by
//! probing its horizontal neighbours through [`MovementRules`].  A
//! coordinate is closed the moment it is enqueued, so nothing is visited
//! twice; ignored coordinates are closed before the walk starts.
//!
//! Always-include cells (search targets) are emitted even when the movement
//! rule rejects them, but only cells the rule actually lands on are expanded
//! further: a target is found only if the walk can get next to it.
//!
//! The start cell itself is never emitted.

use std::collections::VecDeque;

use log::trace;
use rustc_hash::FxHashSet;

use vn_core::Coord;
use vn_grid::probe::try_cell;
use vn_grid::{Cell, Classifier, Grid, MovementRules, Passability};

use crate::{SearchError, SearchOptions, SearchResult};

#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    at:     Coord,
    hops:   u32,
    /// `false` for targets reported without being walkable.
    expand: bool,
}

/// Incremental flood-fill over one grid.
///
/// The grid is not stored; pass it to every [`next_batch`] call so each
/// quantum reads the current state.
///
/// [`next_batch`]: FloodFillSearch::next_batch
#[derive(Debug)]
pub struct FloodFillSearch {
    start:        Coord,
    classifier:   Classifier,
    rules:        MovementRules,
    max_distance: f32,
    max_hops:     Option<u32>,
    closed:       FxHashSet<Coord>,
    frontier:     VecDeque<FrontierEntry>,
    emitted:      usize,
}

impl FloodFillSearch {
    /// Start a search described by `options`.
    ///
    /// Fails with [`SearchError::UnresolvableStart`] when the start cell
    /// cannot be looked up right now.  The start's neighbours are probed
    /// immediately, so the first batch is ready without another lookup
    /// round.
    pub fn new<G: Grid + ?Sized>(grid: &G, options: &SearchOptions) -> SearchResult<Self> {
        let start = options.start;
        if let Err(e) = grid.cell(start) {
            trace!("flood start rejected: {e}");
            return Err(SearchError::UnresolvableStart(start));
        }

        let classifier = options.classifier();
        let mut closed: FxHashSet<Coord> = classifier.ignored_coords().collect();
        closed.insert(start);

        let mut search = Self {
            start,
            classifier,
            rules:        options.rules,
            max_distance: options.max_distance,
            max_hops:     options.max_hops,
            closed,
            frontier:     VecDeque::new(),
            emitted:      0,
        };
        search.expand(grid, start, 0);
        Ok(search)
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// `true` once the frontier is empty; every later batch is empty.
    pub fn is_exhausted(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Number of coordinates closed so far, including ignored ones.
    pub fn closed_len(&self) -> usize {
        self.closed.len()
    }

    /// Total cells emitted across all batches.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Pull up to `max` newly reached cells (at least one when any remain).
    ///
    /// Entries whose cell can no longer be looked up are dropped silently.
    /// After exhaustion this returns an empty `Vec` on every call.
    pub fn next_batch<G: Grid + ?Sized>(&mut self, grid: &G, max: usize) -> Vec<Cell> {
        let max = max.max(1);
        let mut batch = Vec::with_capacity(max.min(self.frontier.len()));

        while batch.len() < max {
            let Some(entry) = self.frontier.pop_front() else { break };
            let Some(cell) = try_cell(grid, entry.at) else { continue };
            if entry.expand {
                self.expand(grid, entry.at, entry.hops);
            }
            batch.push(cell);
        }

        self.emitted += batch.len();
        batch
    }

    #[inline]
    fn in_bounds(&self, at: Coord) -> bool {
        self.start.distance(at) <= self.max_distance
    }

    fn expand<G: Grid + ?Sized>(&mut self, grid: &G, from: Coord, hops: u32) {
        if self.max_hops.is_some_and(|limit| hops >= limit) {
            return;
        }
        let next_hops = hops + 1;
        let rules = self.rules;

        for candidate in rules.candidates(from) {
            if !self.in_bounds(candidate) || self.classifier.is_ignored_coord(candidate) {
                continue;
            }
            let Some(cell) = try_cell(grid, candidate) else { continue };
            let class = self.classifier.classify(&cell);
            if class == Passability::Ignored {
                continue;
            }

            let step = rules.resolve(grid, &self.classifier, &cell, |c| {
                self.in_bounds(c) && !self.classifier.is_ignored_coord(c)
            });
            let step = step.filter(|s| {
                !self.closed.contains(&s.target.coord)
                    && self.classifier.classify(&s.target) != Passability::Ignored
            });

            let reports_target = class == Passability::AlwaysInclude
                && !self.closed.contains(&candidate)
                && step.as_ref().is_none_or(|s| s.target.coord != candidate);
            if reports_target {
                self.closed.insert(candidate);
                self.frontier.push_back(FrontierEntry { at: candidate, hops: next_hops, expand: false });
            }

            if let Some(step) = step {
                let at = step.target.coord;
                self.closed.insert(at);
                self.frontier.push_back(FrontierEntry { at, hops: next_hops, expand: true });
            }
        }
    }
}
