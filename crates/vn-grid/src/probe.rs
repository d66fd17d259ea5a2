//! Small lookup helpers shared by every search.

use log::trace;

use vn_core::{Coord, Vec3};

use crate::{Cell, Classifier, Grid};

/// Look up `at`, flattening a transient failure into `None`.
///
/// This is the single place where `LookupError`s are absorbed.
#[inline]
pub fn try_cell<G: Grid + ?Sized>(grid: &G, at: Coord) -> Option<Cell> {
    match grid.cell(at) {
        Ok(cell) => Some(cell),
        Err(e) => {
            trace!("lookup miss: {e}");
            None
        }
    }
}

/// The cell an agent at `pos` is standing on.
///
/// Considers the 3×3 cells one level below the agent's feet and returns the
/// non-passable one whose centre is closest to `pos`, or `None` when the
/// agent is airborne or the cells below are unavailable.
pub fn standing_cell<G: Grid + ?Sized>(grid: &G, pos: Vec3, classifier: &Classifier) -> Option<Cell> {
    let feet = Coord::containing(pos).below(1);
    let mut best: Option<(f32, Cell)> = None;
    for dx in -1..=1 {
        for dz in -1..=1 {
            let Some(cell) = try_cell(grid, feet.offset(dx, 0, dz)) else {
                continue;
            };
            if !cell.is_valid() || classifier.is_passable(&cell) {
                continue;
            }
            let d = pos.distance(cell.coord.center());
            if best.as_ref().is_none_or(|(bd, _)| d < *bd) {
                best = Some((d, cell));
            }
        }
    }
    best.map(|(_, cell)| cell)
}
