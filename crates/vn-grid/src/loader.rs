//! CSV fixture loader for [`MemoryGrid`].
//!
//! # CSV format
//!
//! One row per non-fill cell.  `tags` is a `;`-separated list and may be
//! empty.
//!
//! ```csv
//! x,y,z,type_id,tags
//! 0,63,0,stone,
//! 1,64,0,chest,container
//! 2,64,0,oak_fence,fence;wooden
//! ```
//!
//! Rows are applied in file order, so a later row for the same coordinate
//! overwrites an earlier one.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use vn_core::Coord;

use crate::{GridError, MemoryGrid};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CellRecord {
    x:       i32,
    y:       i32,
    z:       i32,
    type_id: String,
    #[serde(default)]
    tags:    String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`MemoryGrid`] from a CSV file; unset cells read as `fill_type`.
pub fn load_cells_csv(path: &Path, fill_type: &str) -> Result<MemoryGrid, GridError> {
    let file = std::fs::File::open(path).map_err(GridError::Io)?;
    load_cells_reader(file, fill_type)
}

/// Like [`load_cells_csv`] but accepts any `Read` source.
pub fn load_cells_reader<R: Read>(reader: R, fill_type: &str) -> Result<MemoryGrid, GridError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut grid = MemoryGrid::new(fill_type);

    for result in csv_reader.deserialize::<CellRecord>() {
        let row = result.map_err(|e| GridError::Parse(e.to_string()))?;
        let type_id = row.type_id.trim();
        if type_id.is_empty() {
            return Err(GridError::Parse(format!(
                "empty type_id at ({}, {}, {})",
                row.x, row.y, row.z
            )));
        }
        let tags = row
            .tags
            .split(';')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_owned);
        grid.set_tagged(Coord::new(row.x, row.y, row.z), type_id, tags);
    }

    Ok(grid)
}
