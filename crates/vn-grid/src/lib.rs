//! `vn-grid`: the voxel grid boundary and everything that reads it cell by
//! cell.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`cell`]     | `Cell` snapshot, `Grid` accessor trait                      |
//! | [`classify`] | `Classifier`, `ClassifierBuilder`, `Passability`            |
//! | [`rules`]    | `MovementRules`, `Neighborhood`, `Step` (walk/drop/step-up) |
//! | [`probe`]    | `try_cell`, `standing_cell`                                 |
//! | [`memory`]   | `MemoryGrid` fixture grid with chunk load/unload            |
//! | [`loader`]   | `load_cells_csv`, `load_cells_reader`                       |
//! | [`error`]    | `LookupError`, `GridError`, `GridResult<T>`                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public value types.     |

pub mod cell;
pub mod classify;
pub mod error;
pub mod loader;
pub mod memory;
pub mod probe;
pub mod rules;


pub use cell::{Cell, Grid};
pub use classify::{Classifier, ClassifierBuilder, Passability};
pub use error::{GridError, GridResult, LookupError};
pub use loader::{load_cells_csv, load_cells_reader};
pub use memory::{ChunkPos, MemoryGrid, CHUNK_SIZE};
pub use probe::{standing_cell, try_cell};
pub use rules::{MovementRules, Neighborhood, Step, StepKind};
