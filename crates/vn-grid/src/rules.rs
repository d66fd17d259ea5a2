//! Movement rules: which cell an agent ends up in when it moves toward a
//! neighbouring column.
//!
//! Shared by the flood-fill search and the A* planner so both see the same
//! graph.  For a horizontal neighbour `C`:
//!
//! | `C`      | below `C` | two below | above `C`, two above | Result              |
//! |----------|-----------|-----------|----------------------|---------------------|
//! | passable | blocking  | -         | -                    | `C` (walk)          |
//! | passable | passable  | blocking  | -                    | below `C` (drop)    |
//! | passable | passable  | passable  | -                    | nothing (too deep)  |
//! | blocking | -         | -         | both passable        | above `C` (step up) |
//!
//! A step-up is refused over unjumpable cells (fences, walls).  With
//! `require_headroom`, a walk target additionally needs a passable cell
//! above it.  If any lookup a rule needs fails, the rule yields nothing.

use vn_core::Coord;

use crate::probe::try_cell;
use crate::{Cell, Classifier, Grid};

/// Horizontal neighbour pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Neighborhood {
    /// ±x, ±z.
    #[default]
    Four,
    /// ±x, ±z and the four diagonals.
    Eight,
}

const FOUR: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const EIGHT: [(i32, i32); 8] = [
    (1, 0), (-1, 0), (0, 1), (0, -1),
    (1, 1), (1, -1), (-1, 1), (-1, -1),
];

/// `dy` offsets added by `vertical_flood`.
const VERTICAL: [i32; 2] = [1, -1];

impl Neighborhood {
    /// `(dx, dz)` offsets in a fixed order.
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Neighborhood::Four  => &FOUR,
            Neighborhood::Eight => &EIGHT,
        }
    }
}

/// How the agent got into the target cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Walk,
    Drop,
    StepUp,
    /// Free vertical flood move (only with `vertical_flood`).
    Vertical,
}

/// A resolved move into `target`.
#[derive(Debug, Clone)]
pub struct Step {
    pub target: Cell,
    pub kind:   StepKind,
}

/// Adjacency configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementRules {
    pub neighborhood: Neighborhood,

    /// Walk targets need a passable cell above them (two-tall agents).
    pub require_headroom: bool,

    /// Ignore footing entirely: move to any passable neighbour, including
    /// straight up and down.
    pub vertical_flood: bool,
}

impl MovementRules {
    pub fn new(neighborhood: Neighborhood) -> Self {
        Self { neighborhood, ..Self::default() }
    }

    pub fn with_headroom(mut self, require: bool) -> Self {
        self.require_headroom = require;
        self
    }

    pub fn with_vertical_flood(mut self, enabled: bool) -> Self {
        self.vertical_flood = enabled;
        self
    }

    /// Coordinates to probe when expanding `from`.
    pub fn candidates(&self, from: Coord) -> impl Iterator<Item = Coord> + '_ {
        let vertical: &'static [i32] = if self.vertical_flood { &VERTICAL } else { &[] };
        self.neighborhood
            .offsets()
            .iter()
            .map(move |&(dx, dz)| from.offset(dx, 0, dz))
            .chain(vertical.iter().map(move |&dy| from.offset(0, dy, 0)))
    }

    /// Resolve where an agent moving toward `candidate` ends up.
    ///
    /// `within` bounds the auxiliary cells a rule may land on (the drop or
    /// step-up target); the caller has already bounded `candidate` itself.
    pub fn resolve<G, F>(
        &self,
        grid:       &G,
        classifier: &Classifier,
        candidate:  &Cell,
        within:     F,
    ) -> Option<Step>
    where
        G: Grid + ?Sized,
        F: Fn(Coord) -> bool,
    {
        if self.vertical_flood {
            return classifier.is_passable(candidate).then(|| Step {
                target: candidate.clone(),
                kind:   StepKind::Vertical,
            });
        }

        let at = candidate.coord;
        if classifier.is_passable(candidate) {
            let below = try_cell(grid, at.below(1))?;
            if !classifier.is_passable(&below) {
                if self.require_headroom {
                    let head = try_cell(grid, at.above(1))?;
                    if !classifier.is_passable(&head) {
                        return None;
                    }
                }
                return Some(Step { target: candidate.clone(), kind: StepKind::Walk });
            }
            if !within(below.coord) {
                return None;
            }
            let further = try_cell(grid, at.below(2))?;
            if classifier.is_passable(&further) {
                return None;
            }
            Some(Step { target: below, kind: StepKind::Drop })
        } else {
            if classifier.is_unjumpable(candidate) || !within(at.above(1)) {
                return None;
            }
            let above = try_cell(grid, at.above(1))?;
            if !classifier.is_passable(&above) {
                return None;
            }
            let head = try_cell(grid, at.above(2))?;
            if !classifier.is_passable(&head) {
                return None;
            }
            Some(Step { target: above, kind: StepKind::StepUp })
        }
    }
}
