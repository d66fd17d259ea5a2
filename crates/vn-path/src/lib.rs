//! `vn-path`: incremental A* path planning over the voxel movement rules.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                     |
//! |-----------|--------------------------------------------------------------|
//! | [`astar`] | `AStarSearch`, `PlanStep`, `PlanConstraints`, `Heuristic`    |
//! | [`path`]  | `Path` (start-inclusive cell chain)                          |
//! | [`error`] | `PlanError`, `PlanResult<T>`                                 |
//!
//! # Example
//!
//! ```
//! use vn_core::Coord;
//! use vn_grid::MemoryGrid;
//! use vn_path::{AStarSearch, PlanConstraints};
//!
//! let mut grid = MemoryGrid::default();
//! grid.fill(Coord::new(-1, 63, -1), Coord::new(6, 63, 1), "stone");
//!
//! let mut plan = AStarSearch::new(
//!     &grid,
//!     Coord::new(0, 64, 0),
//!     Coord::new(5, 64, 0),
//!     PlanConstraints::default(),
//! ).unwrap();
//! let path = plan.run(&grid).unwrap();
//! assert_eq!(path.hops(), 5);
//! ```

pub mod astar;
pub mod error;
pub mod path;


pub use astar::{AStarSearch, Heuristic, PlanConstraints, PlanStep};
pub use error::{PlanError, PlanResult};
pub use path::Path;
