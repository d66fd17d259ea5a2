//! Incremental A* over voxel movement rules.
//!
//! # Stepping
//!
//! An [`AStarSearch`] does one pop-and-expand per [`step`](AStarSearch::step)
//! call, so a host can spread a plan across quanta.  [`run`](AStarSearch::run)
//! steps to completion in one go.
//!
//! # Costs
//!
//! Every accepted move costs 1, whatever its direction (walk, drop, step-up,
//! diagonal).  One move changes each axis by at most one block, so the
//! default [`Heuristic::Chebyshev`] never overestimates and the planner
//! returns a shortest path.  [`Heuristic::Euclidean`] can overestimate
//! diagonal remainders and trades optimality for fewer expansions.
//!
//! Among entries with equal `f`, the deeper node (larger `g`) pops first,
//! then the earlier insertion; this is an implementation detail, not a
//! guarantee.
//!
//! # Goal admission
//!
//! The goal coordinate is admitted as a neighbour even when the movement
//! rules would reject it (a goal inside a chest is still reachable: the path
//! ends next to, then into, the chest).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{debug, warn};
use rustc_hash::{FxHashMap, FxHashSet};

use vn_core::{Coord, PlannerConfig};
use vn_grid::probe::try_cell;
use vn_grid::{Cell, Classifier, Grid, MovementRules, Neighborhood, Passability};

use crate::{Path, PlanError, PlanResult};

// ── Constraints ───────────────────────────────────────────────────────────────

/// Goal-distance estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    /// Largest per-axis distance; admissible under uniform step costs.
    #[default]
    Chebyshev,
    /// Straight-line distance; not admissible for diagonal moves.
    Euclidean,
}

impl Heuristic {
    #[inline]
    fn estimate(self, from: Coord, to: Coord) -> f32 {
        match self {
            Heuristic::Euclidean => from.distance(to),
            Heuristic::Chebyshev => from.chebyshev(to) as f32,
        }
    }
}

/// Everything a planning run needs besides the grid and its endpoints.
#[derive(Debug, Clone)]
pub struct PlanConstraints {
    /// Closed-set size at which the run gives up.
    pub max_nodes:  usize,
    pub rules:      MovementRules,
    pub heuristic:  Heuristic,
    pub classifier: Classifier,
}

impl PlanConstraints {
    /// Constraints from `config`, with two-tall agents (`require_headroom`)
    /// and the default classifier (fences and walls cannot be stepped onto).
    pub fn new(config: &PlannerConfig) -> Self {
        let neighborhood = if config.diagonal { Neighborhood::Eight } else { Neighborhood::Four };
        Self {
            max_nodes:  config.max_nodes,
            rules:      MovementRules::new(neighborhood).with_headroom(true),
            heuristic:  Heuristic::default(),
            classifier: Classifier::default(),
        }
    }

    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_rules(mut self, rules: MovementRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }
}

impl Default for PlanConstraints {
    fn default() -> Self {
        Self::new(&PlannerConfig::default())
    }
}

// ── Node arena & open set ─────────────────────────────────────────────────────

#[derive(Debug)]
struct PathNode {
    cell:   Cell,
    parent: Option<u32>,
    g:      f32,
}

/// Open-set entry; `BinaryHeap` is a max-heap, so ordering is reversed to pop
/// the lowest `f` (then highest `g`, then lowest `seq`) first.
#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    f:    f32,
    g:    f32,
    seq:  u64,
    node: u32,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| self.g.total_cmp(&other.g))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

// ── AStarSearch ───────────────────────────────────────────────────────────────

/// Outcome of one [`AStarSearch::step`].
#[derive(Debug, Clone, PartialEq)]
pub enum PlanStep {
    Pending,
    Found(Path),
    Failed(PlanError),
}

/// One in-flight planning run.
#[derive(Debug)]
pub struct AStarSearch {
    start:       Coord,
    goal:        Coord,
    constraints: PlanConstraints,
    nodes:       Vec<PathNode>,
    /// Arena index of the cheapest node seen per coordinate.
    best:        FxHashMap<Coord, u32>,
    closed:      FxHashSet<Coord>,
    open:        BinaryHeap<OpenEntry>,
    seq:         u64,
    outcome:     Option<PlanResult<Path>>,
}

impl AStarSearch {
    /// Validate both endpoints and seed the open set with the start.
    pub fn new<G: Grid + ?Sized>(
        grid:        &G,
        start:       Coord,
        goal:        Coord,
        constraints: PlanConstraints,
    ) -> PlanResult<Self> {
        let start_cell = grid.cell(start).map_err(|_| PlanError::UnresolvableEndpoint { at: start })?;
        grid.cell(goal).map_err(|_| PlanError::UnresolvableEndpoint { at: goal })?;

        let mut search = Self {
            start,
            goal,
            constraints,
            nodes:   Vec::new(),
            best:    FxHashMap::default(),
            closed:  FxHashSet::default(),
            open:    BinaryHeap::new(),
            seq:     0,
            outcome: None,
        };
        search.push(start_cell, None, 0.0);
        Ok(search)
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn goal(&self) -> Coord {
        self.goal
    }

    /// Number of expanded (closed) nodes so far.
    pub fn closed_len(&self) -> usize {
        self.closed.len()
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Pop and expand one node.
    ///
    /// Once the run has finished, every further call returns the same
    /// outcome.
    pub fn step<G: Grid + ?Sized>(&mut self, grid: &G) -> PlanStep {
        if self.outcome.is_none() {
            if let Some(outcome) = self.advance(grid) {
                self.outcome = Some(outcome);
            }
        }
        match &self.outcome {
            None => PlanStep::Pending,
            Some(Ok(path)) => PlanStep::Found(path.clone()),
            Some(Err(e)) => PlanStep::Failed(e.clone()),
        }
    }

    /// Step until the run finishes.
    pub fn run<G: Grid + ?Sized>(&mut self, grid: &G) -> PlanResult<Path> {
        loop {
            match self.step(grid) {
                PlanStep::Pending => continue,
                PlanStep::Found(path) => return Ok(path),
                PlanStep::Failed(e) => return Err(e),
            }
        }
    }

    fn advance<G: Grid + ?Sized>(&mut self, grid: &G) -> Option<PlanResult<Path>> {
        let limit = self.constraints.max_nodes;
        if self.closed.len() >= limit {
            warn!("plan {} -> {} gave up after {limit} nodes", self.start, self.goal);
            return Some(Err(PlanError::NodeLimitExceeded { limit }));
        }

        let entry = loop {
            let Some(entry) = self.open.pop() else {
                debug!("plan {} -> {}: open set exhausted", self.start, self.goal);
                return Some(Err(PlanError::NoPath { from: self.start, to: self.goal }));
            };
            let at = self.nodes[entry.node as usize].cell.coord;
            // Stale: superseded by a cheaper entry, or already expanded.
            if self.best.get(&at) == Some(&entry.node) && !self.closed.contains(&at) {
                break entry;
            }
        };

        let current = entry.node;
        let at = self.nodes[current as usize].cell.coord;
        if at == self.goal {
            let path = self.reconstruct(current);
            debug!("plan {} -> {}: {} cells, {} nodes", self.start, self.goal, path.len(), self.closed.len());
            return Some(Ok(path));
        }

        self.closed.insert(at);
        let g = self.nodes[current as usize].g + 1.0;
        for target in self.neighbours(grid, at) {
            let coord = target.coord;
            if self.closed.contains(&coord) {
                continue;
            }
            let improves = self.best.get(&coord).is_none_or(|&i| g < self.nodes[i as usize].g);
            if improves {
                self.push(target, Some(current), g);
            }
        }
        None
    }

    /// Cells reachable in one move from `from`.
    pub(crate) fn neighbours<G: Grid + ?Sized>(&self, grid: &G, from: Coord) -> Vec<Cell> {
        let PlanConstraints { rules, classifier, .. } = &self.constraints;
        let mut out = Vec::new();

        for candidate in rules.candidates(from) {
            if classifier.is_ignored_coord(candidate) {
                continue;
            }
            let Some(cell) = try_cell(grid, candidate) else { continue };
            if candidate == self.goal {
                out.push(cell);
                continue;
            }
            if classifier.classify(&cell) == Passability::Ignored {
                continue;
            }
            let step = rules.resolve(grid, classifier, &cell, |c| !classifier.is_ignored_coord(c));
            if let Some(step) = step {
                let admissible = step.target.coord == self.goal
                    || classifier.classify(&step.target) != Passability::Ignored;
                if admissible {
                    out.push(step.target);
                }
            }
        }
        out
    }

    fn push(&mut self, cell: Cell, parent: Option<u32>, g: f32) {
        let h = self.constraints.heuristic.estimate(cell.coord, self.goal);
        let index = self.nodes.len() as u32;
        self.best.insert(cell.coord, index);
        self.nodes.push(PathNode { cell, parent, g });
        self.open.push(OpenEntry { f: g + h, g, seq: self.seq, node: index });
        self.seq += 1;
    }

    fn reconstruct(&self, goal: u32) -> Path {
        let mut cells = Vec::new();
        let mut costs = Vec::new();
        let mut cur = Some(goal);
        while let Some(i) = cur {
            let node = &self.nodes[i as usize];
            cells.push(node.cell.clone());
            costs.push(node.g);
            cur = node.parent;
        }
        cells.reverse();
        costs.reverse();
        Path::with_costs(cells, costs)
    }
}
