//! Planned paths.

use vn_core::Coord;
use vn_grid::Cell;

/// The result of a successful planning run: the cells of the node chain
/// from start to goal, both included.
///
/// A walk of ten cells along one axis is therefore an 11-cell path.  Use
/// [`waypoints`](Self::waypoints) for the cells an agent still has to visit.
///
/// Each cell carries the accumulated cost `g` from the start; costs never
/// decrease along the path.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Path {
    cells: Vec<Cell>,
    costs: Vec<f32>,
}

impl Path {
    /// A path with uniform unit step costs.
    pub fn new(cells: Vec<Cell>) -> Self {
        let costs = (0..cells.len()).map(|i| i as f32).collect();
        Self { cells, costs }
    }

    /// Cells paired with the planner's accumulated costs.
    pub(crate) fn with_costs(cells: Vec<Cell>, costs: Vec<f32>) -> Self {
        debug_assert_eq!(cells.len(), costs.len());
        Self { cells, costs }
    }

    /// All cells, start first.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells after the start, goal last.
    pub fn waypoints(&self) -> &[Cell] {
        self.cells.get(1..).unwrap_or(&[])
    }

    /// Accumulated cost at each cell, start first; `costs()[0]` is zero.
    pub fn costs(&self) -> &[f32] {
        &self.costs
    }

    /// Total cost of the path, zero for an empty one.
    pub fn cost(&self) -> f32 {
        self.costs.last().copied().unwrap_or(0.0)
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.iter().map(|c| c.coord)
    }

    pub fn start(&self) -> Option<&Cell> {
        self.cells.first()
    }

    pub fn goal(&self) -> Option<&Cell> {
        self.cells.last()
    }

    /// Number of cells, start included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves from start to goal.
    pub fn hops(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }
}
