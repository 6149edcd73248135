use super::{bar, table::TableBuilder};
use cpbench_analysis::projector::chart::{ChartData, ChartKind};
use itertools::Itertools;
use std::io::{self, Write};
use tracing::debug;

/// The charts currently shown
///
/// Re-rendering never stacks charts on top of old ones: [`ChartSection::replace`] disposes
/// whatever is mounted before the next set takes its place.
#[derive(Debug, Default)]
pub struct ChartSection {
    mounted: Vec<ChartData>,
    use_color: bool,
}

impl ChartSection {
    pub fn new(use_color: bool) -> Self {
        Self {
            mounted: Vec::new(),
            use_color,
        }
    }

    /// Dispose the mounted charts and mount `next`, returns what was disposed
    pub fn replace(&mut self, next: Vec<ChartData>) -> Vec<ChartData> {
        let disposed = std::mem::replace(&mut self.mounted, next);

        if !disposed.is_empty() {
            debug!(
                disposed = %disposed.iter().map(|chart| chart.id).join(","),
                mounted = %self.mounted.iter().map(|chart| chart.id).join(","),
                "Replaced charts"
            );
        }

        disposed
    }

    pub fn charts(&self) -> &[ChartData] {
        &self.mounted
    }

    pub fn render<W: Write>(&self, writer: &mut W, bar_columns: usize) -> io::Result<()> {
        for chart in &self.mounted {
            writeln!(writer, "{}", chart.title)?;

            match chart.kind {
                ChartKind::Bar => self.render_bars(writer, chart, bar_columns)?,
                ChartKind::Line => self.render_lines(writer, chart)?,
            }
        }

        Ok(())
    }

    fn render_bars<W: Write>(
        &self,
        writer: &mut W,
        chart: &ChartData,
        bar_columns: usize,
    ) -> io::Result<()> {
        let Some(dataset) = chart.datasets.first() else {
            return Ok(());
        };
        let max = dataset.data.iter().copied().fold(0.0, f64::max);

        let mut table =
            TableBuilder::new(["Implementation", "Value", ""]).with_color(self.use_color);
        for (label, value) in chart.labels.iter().zip(&dataset.data) {
            let width = cpbench_analysis::query::rank::bar_width(*value, max);
            table.add_row([label.clone(), value.to_string(), bar(width, bar_columns)]);
        }

        table.render(writer)
    }

    fn render_lines<W: Write>(&self, writer: &mut W, chart: &ChartData) -> io::Result<()> {
        let headers = std::iter::once("Implementation".to_owned()).chain(chart.labels.clone());

        let mut table = TableBuilder::new(headers).with_color(self.use_color);
        for dataset in &chart.datasets {
            table.add_row(
                std::iter::once(dataset.label.clone())
                    .chain(dataset.data.iter().map(ToString::to_string)),
            );
        }

        table.render(writer)
    }
}
