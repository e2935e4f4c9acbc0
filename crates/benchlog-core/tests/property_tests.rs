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

//! Property-based tests for Markdown table rendering using proptest.
//!
//! Properties checked for arbitrary well-formed tables:
//! - Line count: output has `2 + rows` lines
//! - Cell count: every line has as many cells as the header line
//! - Width: each column is exactly as wide as its longest cell
//! - Parse-back: splitting the output on `|` recovers header and rows

use benchlog_core::{format_markdown_table, BenchlogError, MarkdownTable};
use proptest::prelude::*;

// ===== Test Helpers =====

/// Split a rendered line into trimmed cell contents.
fn parse_line(line: &str) -> Vec<String> {
    let inner = line
        .strip_prefix('|')
        .and_then(|l| l.strip_suffix('|'))
        .expect("line must be pipe-delimited");
    inner.split('|').map(|c| c.trim().to_string()).collect()
}

/// Split a rendered line into raw cells, padding included.
fn raw_cells(line: &str) -> Vec<&str> {
    let inner = &line[1..line.len() - 1];
    inner.split('|').collect()
}

/// Parse a rendered table back into header and rows.
fn parse_table(text: &str) -> (Vec<String>, Vec<Vec<String>>) {
    let mut lines = text.split('\n');
    let header = parse_line(lines.next().expect("header line"));
    let _separator = lines.next().expect("separator line");
    let rows = lines.map(parse_line).collect();
    (header, rows)
}

// ===== Generators =====

/// Cell text without pipes, newlines or surrounding whitespace.
fn cell() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z0-9._/()-]([A-Za-z0-9 ._/()-]{0,14}[A-Za-z0-9._/()-])?")
        .expect("Failed to create cell regex")
}

/// A header of 1..6 columns and up to 8 rows of the same arity.
fn table() -> impl Strategy<Value = (Vec<String>, Vec<Vec<String>>)> {
    (1usize..6).prop_flat_map(|cols| {
        (
            prop::collection::vec(cell(), cols),
            prop::collection::vec(prop::collection::vec(cell(), cols), 0..8),
        )
    })
}

// ===== Properties =====

proptest! {
    #[test]
    fn prop_line_count((header, rows) in table()) {
        let out = format_markdown_table(&header, &rows).unwrap();
        prop_assert_eq!(out.split('\n').count(), 2 + rows.len());
    }

    #[test]
    fn prop_cell_count_matches_header((header, rows) in table()) {
        let out = format_markdown_table(&header, &rows).unwrap();
        let expected = raw_cells(out.lines().next().unwrap()).len();
        prop_assert_eq!(expected, header.len());
        for line in out.lines() {
            prop_assert_eq!(raw_cells(line).len(), expected);
        }
    }

    #[test]
    fn prop_column_width_is_longest_cell((header, rows) in table()) {
        let out = format_markdown_table(&header, &rows).unwrap();
        let header_line = out.lines().next().unwrap();

        for (i, raw) in raw_cells(header_line).iter().enumerate() {
            let longest = std::iter::once(&header[i])
                .chain(rows.iter().map(|r| &r[i]))
                .map(|c| c.chars().count())
                .max()
                .unwrap();
            // One space of padding on each side.
            prop_assert_eq!(raw.chars().count(), longest + 2);
        }
    }

    #[test]
    fn prop_all_lines_same_width((header, rows) in table()) {
        let out = format_markdown_table(&header, &rows).unwrap();
        let widths: Vec<usize> = out.lines().map(|l| l.chars().count()).collect();
        prop_assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn prop_parse_back_recovers_values((header, rows) in table()) {
        let out = format_markdown_table(&header, &rows).unwrap();
        let (parsed_header, parsed_rows) = parse_table(&out);
        prop_assert_eq!(&parsed_header, &header);
        prop_assert_eq!(&parsed_rows, &rows);

        // Rendering the parsed table again is a fixed point.
        let again = format_markdown_table(&parsed_header, &parsed_rows).unwrap();
        prop_assert_eq!(again, out);
    }

    #[test]
    fn prop_ragged_row_rejected((header, rows) in table(), extra in cell()) {
        let mut rows = rows;
        let mut ragged = header.clone();
        ragged.push(extra);
        rows.push(ragged);
        let err = format_markdown_table(&header, &rows).unwrap_err();
        let is_shape_mismatch = matches!(err, BenchlogError::ShapeMismatch { .. });
        prop_assert!(is_shape_mismatch);
    }
}

// ===== Example-based checks =====

#[test]
fn test_varying_lengths_set_width() {
    let mut table = MarkdownTable::new(["Count"]).unwrap();
    table.push_row(["1"]).unwrap();
    table.push_row(["123456"]).unwrap();
    assert_eq!(table.column_widths(), vec![6]);
    assert_eq!(
        table.render(),
        "| Count  |\n|--------|\n| 1      |\n| 123456 |"
    );
}

#[test]
fn test_separator_shape() {
    let out = format_markdown_table(&["A", "BB", "CCC"], &[vec!["1", "2", "3"]]).unwrap();
    let separator = out.lines().nth(1).unwrap();
    assert_eq!(separator, "|---|----|-----|");
}
