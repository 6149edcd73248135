
use crate::{
    projector::{
        chart::{charts, ChartData},
        table::{sort_rows, table_rows, Column, SortDirection, TableRow},
        Metric, ProjectionError,
    },
    query::{
        criteria::{Criteria, Field, Selection},
        filter, filter_options, workloads,
    },
};
use cpbench_ingest::BenchmarkRecord;
use tracing::debug;

/// Everything a user selected on the results view
///
/// The state is a plain value, every change produces a new state which is then projected
/// again from the unchanged record set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    criteria: Criteria,
    metric: Metric,
    sort: Option<(Column, SortDirection)>,
}

impl ViewState {
    pub fn new(workload: impl Into<String>) -> Self {
        Self {
            criteria: Criteria::workload(workload),
            metric: Metric::Overall,
            sort: None,
        }
    }

    /// Initial state when arriving with `workload` and `consistency` pre-selected
    ///
    /// A missing workload falls back to the first one in the data, a consistency that
    /// does not occur in the data falls back to `All`. Returns `None` without any data.
    pub fn preselect(
        records: &[BenchmarkRecord],
        workload: Option<&str>,
        consistency: Option<&str>,
    ) -> Option<Self> {
        let workload = match workload {
            Some(workload) => workload,
            None => workloads(records).into_iter().next()?,
        };

        let consistency = match consistency.map(Selection::from) {
            Some(selection)
                if filter_options(records, Field::Consistency).contains(&selection) =>
            {
                selection
            }
            Some(selection) => {
                debug!(consistency = %selection, "Unknown consistency, showing all");
                Selection::All
            }
            None => Selection::All,
        };

        Some(Self::new(workload).with_consistency(consistency))
    }

    pub fn with_workload(self, workload: impl Into<String>) -> Self {
        Self {
            criteria: Criteria {
                workload: workload.into(),
                ..self.criteria
            },
            ..self
        }
    }

    pub fn with_protocol(self, protocol: impl Into<Selection>) -> Self {
        Self {
            criteria: self.criteria.with_protocol(protocol),
            ..self
        }
    }

    pub fn with_consistency(self, consistency: impl Into<Selection>) -> Self {
        Self {
            criteria: self.criteria.with_consistency(consistency),
            ..self
        }
    }

    pub fn with_persistency(self, persistency: impl Into<Selection>) -> Self {
        Self {
            criteria: self.criteria.with_persistency(persistency),
            ..self
        }
    }

    pub fn with_metric(self, metric: Metric) -> Self {
        Self { metric, ..self }
    }

    /// `None` keeps the rows in data order
    pub fn with_sort(self, sort: Option<(Column, SortDirection)>) -> Self {
        Self { sort, ..self }
    }

    /// Sort by `column`, ascending unless the table is already ascending by it
    pub fn toggle_sort(self, column: Column) -> Self {
        let direction = match self.sort {
            Some((current, direction)) if current == column => direction.reversed(),
            _ => SortDirection::Ascending,
        };

        self.with_sort(Some((column, direction)))
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn workload(&self) -> &str {
        &self.criteria.workload
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn sort(&self) -> Option<(Column, SortDirection)> {
        self.sort
    }
}

/// A fully projected results view
#[derive(Debug, Clone, PartialEq)]
pub struct View<'a> {
    pub records: Vec<&'a BenchmarkRecord>,
    pub rows: Vec<TableRow>,
    pub charts: Vec<ChartData>,
}

/// Filter `records` by `state` and shape the result for a table and two charts
pub fn project<'a>(
    records: &'a [BenchmarkRecord],
    state: &ViewState,
    placeholder: &str,
) -> Result<View<'a>, ProjectionError> {
    let filtered = filter(records, state.criteria());
    let charts = charts(&filtered, state.metric())?;
    let mut rows = table_rows(filtered.iter().copied(), placeholder);
    if let Some((column, direction)) = state.sort() {
        sort_rows(&mut rows, column, direction);
    }

    debug!(
        workload = state.workload(),
        metric = %state.metric(),
        rows = rows.len(),
        "Projected view"
    );

    Ok(View {
        records: filtered,
        rows,
        charts,
    })
}
