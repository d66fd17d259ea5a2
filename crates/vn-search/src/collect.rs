//! Small bounded collectors that read the grid directly, without movement
//! rules: connected regions and nearest-in-radius lookups.

use rustc_hash::FxHashSet;

use vn_core::{Coord, CuboidShell, OctahedronShell};
use vn_grid::probe::try_cell;
use vn_grid::{Cell, Grid};

/// Collect cells of one of `type_ids` connected to `from` through any of the
/// 26 surrounding cells, up to `max` cells.
///
/// `from` is included when it matches.  Each coordinate is looked up at most
/// once, so the result never contains duplicates.  Useful for whole-object
/// harvesting (every log of one tree, one ore vein).
pub fn connected_cells<G: Grid + ?Sized>(grid: &G, from: Coord, type_ids: &[&str], max: usize) -> Vec<Cell> {
    let matches = |cell: &Cell| cell.is_valid() && type_ids.iter().any(|t| cell.is_type(t));

    let mut found = Vec::new();
    let mut seen: FxHashSet<Coord> = FxHashSet::default();
    let mut stack = vec![from];
    seen.insert(from);

    if let Some(cell) = try_cell(grid, from).filter(|c| matches(c)) {
        found.push(cell);
    }

    while let Some(at) = stack.pop() {
        if found.len() >= max {
            break;
        }
        for next in CuboidShell::new(at, 1) {
            if !seen.insert(next) {
                continue;
            }
            let Some(cell) = try_cell(grid, next) else { continue };
            if matches(&cell) {
                found.push(cell);
                stack.push(next);
                if found.len() >= max {
                    break;
                }
            }
        }
    }

    found.truncate(max);
    found
}

/// First cell of `type_id` within straight-line `radius` of `center`.
///
/// Cells are probed shell by shell outward (Manhattan shells, centre first),
/// so closer matches are generally found first.
pub fn find_in_radius<G: Grid + ?Sized>(grid: &G, center: Coord, radius: f32, type_id: &str) -> Option<Cell> {
    if radius < 0.0 {
        return None;
    }
    let hit = |at: Coord| try_cell(grid, at).filter(|c| c.is_valid() && c.is_type(type_id));

    if let Some(cell) = hit(center) {
        return Some(cell);
    }
    // A sphere of radius r fits inside the Manhattan ball of radius r·√3.
    let max_shell = (radius * 3f32.sqrt()).ceil() as u32;
    OctahedronShell::new(center, max_shell)
        .filter(|at| center.distance(*at) <= radius)
        .find_map(hit)
}
