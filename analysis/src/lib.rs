//! Filtering, ranking and view projection over a loaded result set.
//!
//! Nothing in here touches a renderer: [`query`] narrows and ranks records, [`projector`]
//! shapes them into table rows and chart payloads and [`view`] ties both together behind
//! an immutable [`ViewState`].

pub mod projector;
pub mod query;
pub mod view;

pub use projector::{
    table::{sort_rows, Column, SortDirection},
    Metric, Operation, ProjectionError,
};
pub use query::{
    criteria::{Criteria, Field, Selection},
    rank::{ConsistencyCategory, Leaderboard, RankedEntry, DEFAULT_TOP},
};
pub use view::{project, View, ViewState};
