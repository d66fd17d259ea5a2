//! `vn-search`: incremental flood-fill search and the scheduler that runs
//! many of them under a concurrency cap.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`options`]   | `SearchOptions` (fluent builder)                          |
//! | [`flood`]     | `FloodFillSearch` with `next_batch` pull API              |
//! | [`scheduler`] | `SearchScheduler`, `RequestStatus`                        |
//! | [`collect`]   | `connected_cells`, `find_in_radius`                       |
//! | [`error`]     | `SearchError`, `SearchResult<T>`                          |
//!
//! # Search model (summary)
//!
//! ```text
//! submit(options) ──► queue ──(FIFO, ≤ max_concurrent)──► active
//!                                                          │ one batch per quantum
//!                                                          ▼
//!                                   filter targets ──► found ──► finished ──► take(id)
//! ```
//!
//! Every grid read goes through `&G` handed in by the caller at that
//! quantum; nothing holds on to the grid between quanta.

pub mod collect;
pub mod error;
pub mod flood;
pub mod options;
pub mod scheduler;


pub use collect::{connected_cells, find_in_radius};
pub use error::{SearchError, SearchResult};
pub use flood::FloodFillSearch;
pub use options::{SearchOptions, DEFAULT_MAX_DISTANCE};
pub use scheduler::{RequestStatus, SearchScheduler};
