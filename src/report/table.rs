//! Minimal bordered text table with a rule between every row.

use std::io::{self, Write};

#[derive(Debug, Clone, Default)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(header: impl IntoIterator<Item = S>) -> Self {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) -> &mut Self {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    fn widths(&self) -> Vec<usize> {
        let columns = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0);

        (0..columns)
            .map(|col| {
                std::iter::once(&self.header)
                    .chain(self.rows.iter())
                    .filter_map(|r| r.get(col))
                    .map(|c| c.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let widths = self.widths();
        let rule: String = widths
            .iter()
            .map(|w| format!("+{}", "-".repeat(w + 2)))
            .collect::<String>()
            + "+";

        let line = |out: &mut W, cells: &[String], upper: bool| -> io::Result<()> {
            for (col, width) in widths.iter().enumerate() {
                let cell = cells.get(col).map(String::as_str).unwrap_or("");
                let cell = if upper {
                    cell.to_uppercase()
                } else {
                    cell.to_string()
                };
                write!(out, "| {:<width$} ", cell, width = width)?;
            }
            writeln!(out, "|")
        };

        writeln!(out, "{}", rule)?;
        line(out, &self.header, true)?;
        writeln!(out, "{}", rule)?;
        for row in &self.rows {
            line(out, row, false)?;
            writeln!(out, "{}", rule)?;
        }
        Ok(())
    }
}
