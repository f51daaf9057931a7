//! Polls core
//!
//! Leaves first:
//! - `validation`: raw search text → normalized text or a validation error
//! - `query`: normalized text → tokens → OR filter over question text
//! - `pagination`, `presenter`: page resolution and full/fragment selection
//! - `listing`, `search`, `voting`: per-request flows the handlers call

pub mod listing;
pub mod pagination;
pub mod presenter;
pub mod query;
pub mod search;
pub mod validation;
pub mod voting;

pub use pagination::{Page, PageToken, PaginationPolicy, Paginator};
pub use presenter::{RenderMode, View};
pub use query::SearchQuery;
pub use search::{SearchInput, SearchOutcome, SearchService};
pub use validation::SearchValidator;
pub use voting::VoteOutcome;
