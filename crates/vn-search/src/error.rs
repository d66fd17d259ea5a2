use thiserror::Error;

use vn_core::{Coord, RequestId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The start cell could not be looked up when the search was created.
    #[error("search start {0} cannot be resolved")]
    UnresolvableStart(Coord),

    #[error("unknown search request {0}")]
    UnknownRequest(RequestId),

    #[error("search request {0} was cancelled")]
    Cancelled(RequestId),
}

pub type SearchResult<T> = Result<T, SearchError>;
