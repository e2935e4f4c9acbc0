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

//! Report sinks: Markdown, CSV and JSON renderings of extracted records.

use crate::error::CliError;
use benchlog_core::{BenchmarkRecord, FieldIndexMap, MarkdownTable};
use clap::ValueEnum;
use serde_json::{json, Map, Value};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Output format for extracted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Column-aligned Markdown table
    #[default]
    Markdown,
    /// Comma-separated values with a header row
    Csv,
    /// Array of `{ "source": ..., "fields": { ... } }` objects
    Json,
}

/// Render records in `format`.
///
/// `header` is the full header including the source column; `fields` names
/// the values of each record for JSON output. Every rendering ends with a
/// newline.
///
/// # Examples
///
/// ```
/// use benchlog_cli::output::{render_records, OutputFormat};
/// use benchlog_core::{BenchmarkRecord, ExtractProfile};
///
/// let profile = ExtractProfile::default();
/// let records = vec![BenchmarkRecord::new(
///     "run.txt",
///     vec!["100".into(), "71.09".into(), "8".into(), "1".into()],
/// )];
///
/// let csv = render_records(OutputFormat::Csv, &profile.header(), &profile.fields, &records).unwrap();
/// assert_eq!(csv.lines().nth(1), Some("run.txt,100,71.09,8,1"));
/// ```
pub fn render_records(
    format: OutputFormat,
    header: &[String],
    fields: &FieldIndexMap,
    records: &[BenchmarkRecord],
) -> Result<String, CliError> {
    match format {
        OutputFormat::Markdown => {
            let table = MarkdownTable::from_records(header, records)?;
            Ok(format!("{}\n", table))
        }
        OutputFormat::Csv => render_csv(header, records),
        OutputFormat::Json => render_json(fields, records),
    }
}

fn render_csv(header: &[String], records: &[BenchmarkRecord]) -> Result<String, CliError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header)?;
    for record in records {
        writer.write_record(record.to_row())?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| CliError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CliError::Csv(e.to_string()))
}

fn render_json(fields: &FieldIndexMap, records: &[BenchmarkRecord]) -> Result<String, CliError> {
    let rows: Vec<Value> = records
        .iter()
        .map(|record| {
            let values: Map<String, Value> = record
                .named(fields)
                .map(|(name, value)| (name.to_string(), Value::String(value.to_string())))
                .collect();
            json!({
                "source": record.source_id(),
                "fields": values,
            })
        })
        .collect();

    let mut text = serde_json::to_string_pretty(&rows)?;
    text.push('\n');
    Ok(text)
}

/// Write `content` to `output`, or to stdout when no path is given.
pub fn write_output(content: &str, output: Option<&Path>) -> Result<(), CliError> {
    match output {
        Some(path) => fs::write(path, content).map_err(|e| CliError::io_error(path, e)),
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(content.as_bytes())
                .and_then(|()| handle.flush())
                .map_err(|e| CliError::io_error("<stdout>", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchlog_core::ExtractProfile;

    fn records() -> Vec<BenchmarkRecord> {
        vec![
            BenchmarkRecord::new(
                "2024-08-05_22-23-57_NULL.txt",
                vec!["100".into(), "71.09".into(), "8".into(), "1".into()],
            ),
            BenchmarkRecord::new(
                "b, quoted.txt",
                vec!["5".into(), "9.5".into(), "0".into(), "0".into()],
            ),
        ]
    }

    #[test]
    fn test_markdown_ends_with_newline() {
        let profile = ExtractProfile::default();
        let out = render_records(
            OutputFormat::Markdown,
            &profile.header(),
            &profile.fields,
            &records()[..1],
        )
        .unwrap();

        let expected = "\
| FileName                     | Count | Time (ns/op) | Memory (B/op) | Allocations (allocs/op) |
|------------------------------|-------|--------------|---------------|-------------------------|
| 2024-08-05_22-23-57_NULL.txt | 100   | 71.09        | 8             | 1                       |
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_markdown_without_records() {
        let profile = ExtractProfile::default();
        let out = render_records(OutputFormat::Markdown, &profile.header(), &profile.fields, &[])
            .unwrap();
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn test_csv_quotes_fields() {
        let profile = ExtractProfile::default();
        let out = render_records(OutputFormat::Csv, &profile.header(), &profile.fields, &records())
            .unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(
            lines[0],
            "FileName,Count,Time (ns/op),Memory (B/op),Allocations (allocs/op)"
        );
        assert_eq!(lines[2], "\"b, quoted.txt\",5,9.5,0,0");
    }

    #[test]
    fn test_json_uses_field_names_in_order() {
        let profile = ExtractProfile::default();
        let out = render_records(OutputFormat::Json, &profile.header(), &profile.fields, &records())
            .unwrap();

        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["source"], "2024-08-05_22-23-57_NULL.txt");
        assert_eq!(value[0]["fields"]["Time"], "71.09");

        let keys: Vec<_> = value[0]["fields"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["Count", "Time", "Memory", "Allocations"]);
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.md");
        write_output("| A |\n", Some(&path)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "| A |\n");
    }

    #[test]
    fn test_write_output_missing_dir() {
        let err = write_output("x", Some(Path::new("/no/such/dir/report.md"))).unwrap_err();
        assert!(matches!(err, CliError::Core(_)));
    }
}
