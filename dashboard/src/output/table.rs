//! Box drawn tables for terminal output

use std::io::{self, Write};

pub struct TableBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    column_widths: Vec<usize>,
    use_color: bool,
}

// display width, cells may carry multi-byte characters such as bars or μ
fn width(cell: &str) -> usize {
    cell.chars().count()
}

impl TableBuilder {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let column_widths = headers.iter().map(|header| width(header)).collect();

        Self {
            headers,
            rows: Vec::new(),
            column_widths,
            use_color: std::env::var_os("NO_COLOR").is_none(),
        }
    }

    #[must_use]
    pub fn with_color(self, use_color: bool) -> Self {
        Self { use_color, ..self }
    }

    /// Cells beyond the header count are dropped, missing cells are left blank
    pub fn add_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = row
            .into_iter()
            .map(Into::into)
            .take(self.headers.len())
            .collect();
        row.resize(self.headers.len(), String::new());

        for (cell, column) in row.iter().zip(self.column_widths.iter_mut()) {
            *column = (*column).max(width(cell));
        }
        self.rows.push(row);
    }

    pub fn render<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.write_border(writer, '┌', '┬', '┐')?;
        self.write_row(writer, &self.headers, true)?;
        self.write_border(writer, '├', '┼', '┤')?;

        for row in &self.rows {
            self.write_row(writer, row, false)?;
        }

        self.write_border(writer, '└', '┴', '┘')
    }

    fn write_border<W: Write>(
        &self,
        writer: &mut W,
        left: char,
        mid: char,
        right: char,
    ) -> io::Result<()> {
        write!(writer, "{left}")?;
        for (i, column) in self.column_widths.iter().enumerate() {
            write!(writer, "{}", "─".repeat(column + 2))?;
            if i + 1 < self.column_widths.len() {
                write!(writer, "{mid}")?;
            }
        }
        writeln!(writer, "{right}")
    }

    fn write_row<W: Write>(
        &self,
        writer: &mut W,
        cells: &[String],
        is_header: bool,
    ) -> io::Result<()> {
        write!(writer, "│")?;
        for (cell, column) in cells.iter().zip(&self.column_widths) {
            let padding = " ".repeat(column - width(cell));
            if is_header && self.use_color {
                write!(writer, " \x1b[1;36m{cell}\x1b[0m{padding} │")?;
            } else {
                write!(writer, " {cell}{padding} │")?;
            }
        }
        writeln!(writer)
    }
}
