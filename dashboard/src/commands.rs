#[cfg(test)]
mod commands_test;

use crate::{
    config::DashboardConfig,
    interactive::Session,
    link::{parse_base, result_link, Preselection},
    output::{render_json, render_options, render_overview, render_results, ChartSection},
    CliError,
};
use clap::{Args, ValueEnum};
use cpbench_analysis::{
    project,
    query::{filter_options, metric_groups, rank::overview as rank_overview, workloads},
    Column, Field, Metric, SortDirection, ViewState,
};
use cpbench_ingest::{BenchmarkRecord, Loader, RecordSet, SessionStore};
use itertools::Itertools;
use std::{
    io::{BufRead, Write},
    path::Path,
};
use tracing::{debug, info, warn};

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Table,
    /// rows and chart payloads for an external charting library
    Json,
}

#[derive(Args, Debug, Default)]
pub struct ResultsArgs {
    /// the first workload in the data by default
    #[arg(short, long)]
    pub workload: Option<String>,

    #[arg(short, long)]
    pub protocol: Option<String>,

    /// falls back to `All` when no record carries it
    #[arg(long)]
    pub consistency: Option<String>,

    #[arg(long)]
    pub persistency: Option<String>,

    /// OVERALL, READ, UPDATE, INSERT or DELETE
    #[arg(short, long, default_value_t)]
    pub metric: Metric,

    /// Table column to sort by, compared as lowercase text or by value for numbers
    #[arg(short, long)]
    pub sort: Option<Column>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Result link to take workload and consistency from, flags take precedence
    #[arg(short, long)]
    pub link: Option<String>,

    #[arg(short, long, value_enum, default_value_t)]
    pub format: Format,
}

/// Everything a command needs besides its own arguments
pub struct Context<'a> {
    pub config: DashboardConfig,
    pub store: &'a SessionStore,
    pub use_color: bool,
}

impl Context<'_> {
    fn loader(&self) -> Loader<'_> {
        Loader::new(self.config.source.clone(), self.store)
    }

    fn records(&self) -> Result<RecordSet, CliError> {
        let records = self.loader().load()?;

        if records.is_empty() {
            return Err(CliError::NoData);
        }

        Ok(records)
    }
}

fn initial_state(
    records: &[BenchmarkRecord],
    selection: &Preselection,
) -> Result<ViewState, CliError> {
    ViewState::preselect(
        records,
        selection.workload.as_deref(),
        selection.consistency.as_deref(),
    )
    .ok_or(CliError::NoData)
}

pub fn overview<W: Write>(
    context: &Context,
    workload: Option<&str>,
    top: Option<usize>,
    writer: &mut W,
) -> Result<(), CliError> {
    let records = context.records()?;
    let display = &context.config.display;

    let top = match top {
        Some(0) => {
            warn!(
                "--top 0 would leave every category empty. Falling back to {}",
                context.config.display.top
            );
            display.top
        }
        Some(top) => top,
        None => display.top,
    };

    let workload = match workload {
        Some(workload) => workload,
        None => workloads(&records)
            .into_iter()
            .next()
            .ok_or(CliError::NoData)?,
    };

    let base = parse_base(&display.link_base)?;
    let boards = rank_overview(&records, workload, top)
        .into_iter()
        .map(|board| {
            let link = result_link(&base, workload, board.consistency())?;
            Ok::<_, CliError>((board, link))
        })
        .collect::<Result<Vec<_>, _>>()?;

    render_overview(
        writer,
        workload,
        &boards,
        display.bar_columns,
        context.use_color,
    )?;
    Ok(())
}

pub fn results<W: Write>(
    context: &Context,
    args: ResultsArgs,
    writer: &mut W,
) -> Result<(), CliError> {
    let records = context.records()?;
    let display = &context.config.display;

    let from_link = match &args.link {
        Some(link) => Preselection::from_link(&parse_base(&display.link_base)?, link)?,
        None => Preselection::default(),
    };
    let selection = Preselection {
        workload: args.workload,
        consistency: args.consistency,
    }
    .or(from_link);

    let state = initial_state(&records, &selection)?
        .with_protocol(args.protocol.as_deref())
        .with_persistency(args.persistency.as_deref())
        .with_metric(args.metric)
        .with_sort(args.sort.map(|column| {
            let direction = if args.desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            (column, direction)
        }));

    let view = project(&records, &state, &display.placeholder)?;

    match args.format {
        Format::Json => render_json(writer, &state, &view)?,
        Format::Table => {
            render_results(writer, &state, &view, context.use_color)?;

            let mut charts = ChartSection::new(context.use_color);
            charts.replace(view.charts);
            charts.render(writer, display.bar_columns)?;
        }
    }

    Ok(())
}

pub fn options<W: Write>(
    context: &Context,
    workload: Option<&str>,
    writer: &mut W,
) -> Result<(), CliError> {
    let records = context.records()?;
    let all = workloads(&records);

    let workload = match workload {
        Some(workload) => workload,
        None => all.first().copied().ok_or(CliError::NoData)?,
    };

    let fields = Field::ALL
        .iter()
        .map(|field| (*field, filter_options(&records, *field)))
        .collect_vec();

    render_options(writer, &all, &fields, &metric_groups(&records, workload))?;
    Ok(())
}

pub fn import<W: Write>(context: &Context, file: &Path, writer: &mut W) -> Result<(), CliError> {
    let records = context.loader().import(file)?;

    writeln!(
        writer,
        "Imported {} results covering {}",
        records.len(),
        workloads(&records).join(", ")
    )?;
    Ok(())
}

pub fn interactive<R: BufRead, W: Write>(
    context: &Context,
    workload: Option<&str>,
    input: R,
    writer: &mut W,
) -> Result<(), CliError> {
    let records = context.records()?;
    let selection = Preselection {
        workload: workload.map(str::to_owned),
        consistency: None,
    };

    let mut session = Session::new(
        &records,
        initial_state(&records, &selection)?,
        &context.config.display,
        context.use_color,
    );

    session.run(input, writer)?;
    debug!(state = ?session.state(), "Session ended");

    Ok(())
}

pub fn clear_session<W: Write>(context: &Context, writer: &mut W) -> Result<(), CliError> {
    context.store.clear()?;

    match context.store.directory() {
        Some(directory) => {
            info!(directory = ?directory, "Cleared session");
            writeln!(writer, "Session in {} cleared", directory.display())?;
        }
        None => {
            warn!("No session directory configured, only this process' session was cleared");
            writeln!(writer, "Session cleared")?;
        }
    }

    Ok(())
}
