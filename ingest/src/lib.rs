//! Results loading for the cpbench dashboard: the benchmark record model, its validation
//! and a once-per-session loader.

pub mod loader;
pub mod record;

pub use loader::{
    parse_document,
    session::{RecordSet, SessionError, SessionStore, DATA_KEY},
    source::Source,
    FetchError, LoadError, Loader, ParseError,
};
pub use record::{
    metrics::{self, MetricValues},
    normalize_project, BenchmarkRecord, MetricGroups, RecordError,
};
