// Dweve benchlog - Benchmark log extraction and reporting
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Column-aligned Markdown table rendering.
//!
//! Column widths are the maximum character length per column across the
//! header and every row. Cells are left-justified and padded to that width:
//!
//! ```text
//! | A   | B  |
//! |-----|----|
//! | 1   | 22 |
//! | 333 | 4  |
//! ```
//!
//! Every row must have exactly as many cells as the header. A ragged row is
//! rejected with [`BenchlogError::ShapeMismatch`] before anything is
//! rendered; columns are never silently dropped.

use crate::error::{BenchlogError, Result};
use crate::record::BenchmarkRecord;
use std::borrow::Cow;
use std::fmt;

/// A header plus rows of identical arity.
///
/// # Examples
///
/// ```
/// use benchlog_core::MarkdownTable;
///
/// let mut table = MarkdownTable::new(["A", "B"]).unwrap();
/// table.push_row(["1", "22"]).unwrap();
/// table.push_row(["333", "4"]).unwrap();
///
/// assert_eq!(
///     table.render(),
///     "| A   | B  |\n|-----|----|\n| 1   | 22 |\n| 333 | 4  |"
/// );
///
/// // Ragged rows are rejected.
/// assert!(table.push_row(["only one"]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl MarkdownTable {
    /// Create an empty table with the given header.
    ///
    /// # Errors
    ///
    /// Returns [`BenchlogError::EmptyHeader`] if the header has no columns.
    pub fn new<I, S>(header: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let header: Vec<String> = header.into_iter().map(|h| h.to_string()).collect();
        if header.is_empty() {
            return Err(BenchlogError::EmptyHeader);
        }
        Ok(Self {
            header,
            rows: Vec::new(),
        })
    }

    /// Build a table from extracted records.
    pub fn from_records<I, S>(header: I, records: &[BenchmarkRecord]) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let mut table = Self::new(header)?;
        for record in records {
            table.push_row(record.to_row())?;
        }
        Ok(table)
    }

    /// Append a row.
    ///
    /// # Errors
    ///
    /// Returns [`BenchlogError::ShapeMismatch`] if the row arity differs from
    /// the header's; the table is left unchanged.
    pub fn push_row<I, S>(&mut self, row: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let row: Vec<String> = row.into_iter().map(|c| c.to_string()).collect();
        if row.len() != self.header.len() {
            return Err(BenchlogError::ShapeMismatch {
                row: self.rows.len(),
                expected: self.header.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Header cells.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of each column in characters, as rendered.
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.header.iter().map(|h| cell_width(h)).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell_width(cell));
            }
        }
        widths
    }

    /// Render header, separator and data lines joined by `\n`.
    ///
    /// The output has no trailing newline and always `2 + len()` lines.
    pub fn render(&self) -> String {
        let widths = self.column_widths();

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(render_line(&self.header, &widths));
        lines.push(render_separator(&widths));
        lines.extend(self.rows.iter().map(|row| render_line(row, &widths)));

        lines.join("\n")
    }
}

impl fmt::Display for MarkdownTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Render a header and rows as a Markdown table in one call.
///
/// # Errors
///
/// - [`BenchlogError::EmptyHeader`] if `header` is empty
/// - [`BenchlogError::ShapeMismatch`] if any row's arity differs from the header
///
/// # Examples
///
/// ```
/// use benchlog_core::format_markdown_table;
///
/// let table = format_markdown_table(&["A", "B"], &[vec!["1", "22"], vec!["333", "4"]]).unwrap();
/// assert_eq!(table.lines().count(), 4);
///
/// assert!(format_markdown_table(&["A", "B"], &[vec!["1"]]).is_err());
/// ```
pub fn format_markdown_table<H, R, C>(header: &[H], rows: &[R]) -> Result<String>
where
    H: AsRef<str>,
    R: AsRef<[C]>,
    C: AsRef<str>,
{
    let mut table = MarkdownTable::new(header.iter().map(|h| h.as_ref()))?;
    for row in rows {
        table.push_row(row.as_ref().iter().map(|c| c.as_ref()))?;
    }
    Ok(table.render())
}

/// Escape characters that would break the table structure.
fn escape_cell(cell: &str) -> Cow<'_, str> {
    if cell.contains(['|', '\n', '\r']) {
        Cow::Owned(
            cell.replace('|', "\\|")
                .replace(['\n', '\r'], " "),
        )
    } else {
        Cow::Borrowed(cell)
    }
}

fn cell_width(cell: &str) -> usize {
    escape_cell(cell).chars().count()
}

fn render_line(cells: &[String], widths: &[usize]) -> String {
    let cells: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", escape_cell(cell), width = width))
        .collect();
    format!("| {} |", cells.join(" | "))
}

fn render_separator(widths: &[usize]) -> String {
    let dashes: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    format!("|-{}-|", dashes.join("-|-"))
}
