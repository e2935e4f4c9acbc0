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

//! Per-field numeric series derived from records.
//!
//! Records stay the single source of truth; a series is a projection of one
//! field across them, taken at the point of use.

use crate::error::{BenchlogError, Result};
use crate::fields::FieldIndexMap;
use crate::record::BenchmarkRecord;
use crate::table::MarkdownTable;

/// One value of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    /// Source the value came from.
    pub source_id: String,
    /// Parsed value.
    pub value: f64,
}

/// Change between two consecutive points.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    /// Earlier source.
    pub from: String,
    /// Later source.
    pub to: String,
    /// Value at the later source.
    pub value: f64,
    /// `(later - earlier) / earlier`; `None` when the earlier value is zero.
    pub ratio: Option<f64>,
}

/// Numeric values of one field across records, in record order.
///
/// # Examples
///
/// ```
/// use benchlog_core::{BenchmarkRecord, FieldIndexMap, Series};
///
/// let fields = FieldIndexMap::from_pairs([("Time", 2)]).unwrap();
/// let records = vec![
///     BenchmarkRecord::new("a.txt", vec!["100".into()]),
///     BenchmarkRecord::new("b.txt", vec!["150".into()]),
///     BenchmarkRecord::new("c.txt", vec!["120".into()]),
/// ];
///
/// let series = Series::project(&records, &fields, "Time").unwrap();
/// let ratios: Vec<_> = series.relative_changes().iter().map(|c| c.ratio.unwrap()).collect();
/// assert_eq!(ratios, vec![0.5, -0.2]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    field: String,
    points: Vec<SeriesPoint>,
}

impl Series {
    /// Project `field` out of every record and parse it as a number.
    ///
    /// # Errors
    ///
    /// - [`BenchlogError::InvalidConfig`] if `field` is not in the map
    /// - [`BenchlogError::InvalidNumber`] if a value is not a finite number
    pub fn project(
        records: &[BenchmarkRecord],
        fields: &FieldIndexMap,
        field: &str,
    ) -> Result<Self> {
        let position = fields.position(field).ok_or_else(|| {
            let known: Vec<_> = fields.names().collect();
            BenchlogError::invalid_config(format!(
                "unknown field '{}' (available: {})",
                field,
                known.join(", ")
            ))
        })?;

        let points = records
            .iter()
            .map(|record| {
                let raw = record.value(position).unwrap_or_default();
                parse_number(raw)
                    .map(|value| SeriesPoint {
                        source_id: record.source_id().to_string(),
                        value,
                    })
                    .ok_or_else(|| BenchlogError::InvalidNumber {
                        source_id: record.source_id().to_string(),
                        field: field.to_string(),
                        value: raw.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            field: field.to_string(),
            points,
        })
    }

    /// Name of the projected field.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Points in record order.
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Relative change between each pair of consecutive points.
    ///
    /// A series of `n` points yields `n - 1` changes (none for `n < 2`).
    pub fn relative_changes(&self) -> Vec<Change> {
        self.points
            .windows(2)
            .map(|pair| {
                let (prev, next) = (&pair[0], &pair[1]);
                let ratio = if prev.value == 0.0 {
                    None
                } else {
                    Some((next.value - prev.value) / prev.value)
                };
                Change {
                    from: prev.source_id.clone(),
                    to: next.source_id.clone(),
                    value: next.value,
                    ratio,
                }
            })
            .collect()
    }

    /// Render the changes as a Markdown table `From | To | <label> | Change`.
    ///
    /// Ratios are shown as signed percentages with two decimals.
    pub fn changes_table(&self, label: &str) -> Result<MarkdownTable> {
        let mut table = MarkdownTable::new(["From", "To", label, "Change"])?;
        for change in self.relative_changes() {
            table.push_row([
                change.from,
                change.to,
                format_value(change.value),
                format_ratio(change.ratio),
            ])?;
        }
        Ok(table)
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Format a value without a trailing `.0` for integral numbers.
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn format_ratio(ratio: Option<f64>) -> String {
    match ratio {
        Some(r) => format!("{:+.2}%", r * 100.0),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> FieldIndexMap {
        FieldIndexMap::from_pairs([("Count", 1), ("Time", 2)]).unwrap()
    }

    fn record(id: &str, count: &str, time: &str) -> BenchmarkRecord {
        BenchmarkRecord::new(id, vec![count.to_string(), time.to_string()])
    }

    #[test]
    fn test_projection_follows_record_order() {
        let records = vec![record("b", "2", "20.5"), record("a", "1", "10")];
        let series = Series::project(&records, &fields(), "Time").unwrap();
        let values: Vec<_> = series.points().iter().map(|p| p.value).collect();
        assert_eq!(values, vec![20.5, 10.0]);
        assert_eq!(series.field(), "Time");
    }

    #[test]
    fn test_unknown_field() {
        let err = Series::project(&[], &fields(), "Memory").unwrap_err();
        assert!(err.to_string().contains("available: Count, Time"));
    }

    #[test]
    fn test_non_numeric_value() {
        let records = vec![record("a", "1", "fast")];
        let err = Series::project(&records, &fields(), "Time").unwrap_err();
        assert_eq!(
            err,
            BenchlogError::InvalidNumber {
                source_id: "a".to_string(),
                field: "Time".to_string(),
                value: "fast".to_string(),
            }
        );

        let records = vec![record("a", "1", "NaN")];
        assert!(Series::project(&records, &fields(), "Time").is_err());
    }

    #[test]
    fn test_relative_changes() {
        let records = vec![
            record("a", "100", "0"),
            record("b", "150", "1"),
            record("c", "120", "2"),
            record("d", "180", "3"),
        ];
        let series = Series::project(&records, &fields(), "Count").unwrap();
        let changes = series.relative_changes();
        assert_eq!(changes.len(), 3);
        assert_eq!(changes[0].ratio, Some(0.5));
        assert_eq!(changes[1].ratio, Some(-0.2));
        assert_eq!(changes[2].ratio, Some(0.5));
        assert_eq!(changes[2].from, "c");
        assert_eq!(changes[2].to, "d");

        let time = Series::project(&records, &fields(), "Time").unwrap();
        assert_eq!(time.relative_changes()[0].ratio, None);
    }

    #[test]
    fn test_short_series_has_no_changes() {
        let records = vec![record("a", "1", "1")];
        let series = Series::project(&records, &fields(), "Count").unwrap();
        assert!(series.relative_changes().is_empty());
        assert!(Series::project(&[], &fields(), "Count").unwrap().is_empty());
    }

    #[test]
    fn test_changes_table() {
        let records = vec![
            record("a.txt", "1", "100"),
            record("b.txt", "1", "150"),
            record("c.txt", "1", "71.09"),
        ];
        let series = Series::project(&records, &fields(), "Time").unwrap();
        let table = series.changes_table("Time (ns/op)").unwrap();
        assert_eq!(
            table.render(),
            "\
| From  | To    | Time (ns/op) | Change  |
|-------|-------|--------------|---------|
| a.txt | b.txt | 150          | +50.00% |
| b.txt | c.txt | 71.09        | -52.61% |"
        );
    }

    #[test]
    fn test_format_ratio_zero_base() {
        assert_eq!(format_ratio(None), "n/a");
        assert_eq!(format_ratio(Some(0.0)), "+0.00%");
    }
}
