//! Line driven results session, every change of the selection re-renders the view


use crate::{
    config::DisplayConfig,
    output::{render_results, ChartSection},
    CliError,
};
use cpbench_analysis::{project, Column, Metric, ProjectionError, SortDirection, ViewState};
use cpbench_ingest::BenchmarkRecord;
use std::{
    io::{BufRead, Write},
    str::FromStr,
};
use thiserror::Error;
use tracing::{debug, warn};

const HELP: &str = "\
commands:
  workload <name>      switch the workload
  protocol <value>     filter by protocol, `All` disables the filter
  consistency <value>  filter by consistency
  persistency <value>  filter by persistency
  metric <group>       OVERALL, READ, UPDATE, INSERT or DELETE
  sort <column> [dir]  sort the table, again on the same column flips the direction
  show                 render the current view again
  help                 this message
  quit                 leave the session";

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("Unknown command '{0}', try `help`")]
    Unknown(String),
    #[error("`{0}` needs a value")]
    MissingValue(&'static str),
    #[error("Unknown sort direction '{0}', use asc or desc")]
    Direction(String),
    #[error(transparent)]
    Value(#[from] ProjectionError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Workload(String),
    Protocol(String),
    Consistency(String),
    Persistency(String),
    Metric(Metric),
    /// without a direction the sort toggles
    Sort(Column, Option<SortDirection>),
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, value) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(name, value)| (name, value.trim()));

        let argument = |name: &'static str| {
            if value.is_empty() {
                Err(CommandError::MissingValue(name))
            } else {
                Ok(value.to_owned())
            }
        };

        match name {
            "workload" => Ok(Self::Workload(argument("workload")?)),
            "protocol" => Ok(Self::Protocol(argument("protocol")?)),
            "consistency" => Ok(Self::Consistency(argument("consistency")?)),
            "persistency" => Ok(Self::Persistency(argument("persistency")?)),
            "metric" => Ok(Self::Metric(argument("metric")?.parse()?)),
            "sort" => {
                let value = argument("sort")?;
                let (column, direction) = value
                    .split_once(char::is_whitespace)
                    .map_or((value.as_str(), ""), |(column, direction)| {
                        (column, direction.trim())
                    });

                let direction = match direction {
                    "" => None,
                    "asc" => Some(SortDirection::Ascending),
                    "desc" => Some(SortDirection::Descending),
                    other => return Err(CommandError::Direction(other.to_owned())),
                };

                Ok(Self::Sort(column.parse()?, direction))
            }
            "show" | "" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_owned())),
        }
    }
}

pub struct Session<'a> {
    records: &'a [BenchmarkRecord],
    state: ViewState,
    charts: ChartSection,
    display: &'a DisplayConfig,
    use_color: bool,
}

impl<'a> Session<'a> {
    pub fn new(
        records: &'a [BenchmarkRecord],
        state: ViewState,
        display: &'a DisplayConfig,
        use_color: bool,
    ) -> Self {
        Self {
            records,
            state,
            charts: ChartSection::new(use_color),
            display,
            use_color,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The state `command` leads to, `None` for commands that leave the selection alone
    fn next_state(&self, command: Command) -> Option<ViewState> {
        let state = self.state.clone();

        match command {
            Command::Workload(workload) => Some(state.with_workload(workload)),
            Command::Protocol(protocol) => Some(state.with_protocol(protocol)),
            Command::Consistency(consistency) => Some(state.with_consistency(consistency)),
            Command::Persistency(persistency) => Some(state.with_persistency(persistency)),
            Command::Metric(metric) => Some(state.with_metric(metric)),
            Command::Sort(column, None) => Some(state.toggle_sort(column)),
            Command::Sort(column, Some(direction)) => {
                Some(state.with_sort(Some((column, direction))))
            }
            Command::Show | Command::Help | Command::Quit => None,
        }
    }

    /// Project `state` and show it, the current state only changes if that succeeds
    pub fn render<W: Write>(&mut self, state: ViewState, writer: &mut W) -> Result<(), CliError> {
        let view = project(self.records, &state, &self.display.placeholder)?;

        render_results(writer, &state, &view, self.use_color)?;
        self.charts.replace(view.charts);
        self.charts.render(writer, self.display.bar_columns)?;
        debug!(charts = self.charts.charts().len(), "Rendered view");

        self.state = state;
        Ok(())
    }

    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        writer: &mut W,
    ) -> Result<(), CliError> {
        self.render(self.state.clone(), writer)?;

        let mut lines = input.lines();
        loop {
            write!(writer, "> ")?;
            writer.flush()?;

            let Some(line) = lines.next().transpose()? else {
                debug!("Input closed, ending session");
                break;
            };

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    writeln!(writer, "{e}")?;
                    continue;
                }
            };

            match command {
                Command::Quit => break,
                Command::Help => writeln!(writer, "{HELP}")?,
                Command::Show => self.render(self.state.clone(), writer)?,
                command => {
                    let Some(next) = self.next_state(command) else {
                        continue;
                    };

                    match self.render(next, writer) {
                        Err(CliError::Projection(e)) => {
                            warn!(error = ?e, "Keeping previous selection");
                            writeln!(writer, "{e}")?;
                        }
                        result => result?,
                    }
                }
            }
        }

        Ok(())
    }
}
