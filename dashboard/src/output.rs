//! Terminal rendering of the overview, the results view and the selectable options

pub mod chart;
pub mod table;

#[cfg(test)]
mod output_test;

pub use chart::ChartSection;
pub use table::TableBuilder;

use cpbench_analysis::{
    projector::table::{overview_rows, TableRow},
    Field, Leaderboard, Selection, View, ViewState,
};
use reqwest::Url;
use std::io::{self, Write};

/// Bar of `width` percent of `columns` characters
pub fn bar(width: u32, columns: usize) -> String {
    let filled = (f64::from(width.min(100)) / 100.0 * columns as f64).round() as usize;
    "█".repeat(filled)
}

pub fn render_overview<W: Write>(
    writer: &mut W,
    workload: &str,
    boards: &[(Leaderboard, Url)],
    bar_columns: usize,
    use_color: bool,
) -> io::Result<()> {
    writeln!(writer, "Overview of {workload}")?;

    for (board, link) in boards {
        writeln!(writer)?;
        writeln!(writer, "{}  {link}", board.category)?;

        if board.entries.is_empty() {
            writeln!(writer, "  no results")?;
            continue;
        }

        let mut table = TableBuilder::new([
            "#",
            "Protocol - Project",
            "RunTime (ms)",
            "Throughput (ops/sec)",
            "",
        ])
        .with_color(use_color);

        for row in overview_rows(&board.entries) {
            table.add_row([
                row.rank.to_string(),
                row.name,
                row.runtime,
                row.throughput,
                bar(row.bar_width, bar_columns),
            ]);
        }

        table.render(writer)?;
    }

    Ok(())
}

/// Selection summary followed by the results table
pub fn render_results<W: Write>(
    writer: &mut W,
    state: &ViewState,
    view: &View,
    use_color: bool,
) -> io::Result<()> {
    let criteria = state.criteria();
    write!(
        writer,
        "Workload {} | Protocol {} | Consistency {} | Persistency {} | Metric {}",
        criteria.workload,
        criteria.protocol,
        criteria.consistency,
        criteria.persistency,
        state.metric()
    )?;
    match state.sort() {
        Some((column, direction)) => writeln!(writer, " | Sort {column} {direction}")?,
        None => writeln!(writer)?,
    }

    if view.rows.is_empty() {
        return writeln!(writer, "No results match the selection");
    }

    let mut table = TableBuilder::new(TableRow::HEADERS).with_color(use_color);
    for row in &view.rows {
        table.add_row(row.cells());
    }

    table.render(writer)
}

/// Machine readable results view, the charts are ready for an external charting library
pub fn render_json<W: Write>(writer: &mut W, state: &ViewState, view: &View) -> io::Result<()> {
    let criteria = state.criteria();
    let document = serde_json::json!({
        "workload": criteria.workload,
        "protocol": criteria.protocol,
        "consistency": criteria.consistency,
        "persistency": criteria.persistency,
        "metric": state.metric().to_string(),
        "sort": state.sort().map(|(column, direction)| format!("{column} {direction}")),
        "rows": view.rows,
        "charts": view.charts,
    });

    serde_json::to_writer_pretty(&mut *writer, &document)?;
    writeln!(writer)
}

pub fn render_options<W: Write>(
    writer: &mut W,
    workloads: &[&str],
    fields: &[(Field, Vec<Selection>)],
    metrics: &[&str],
) -> io::Result<()> {
    writeln!(writer, "workload: {}", workloads.join(", "))?;

    for (field, options) in fields {
        let options = options.iter().map(Selection::as_str).collect::<Vec<_>>();
        writeln!(writer, "{}: {}", field.name(), options.join(", "))?;
    }

    writeln!(writer, "metric: {}", metrics.join(", "))
}
