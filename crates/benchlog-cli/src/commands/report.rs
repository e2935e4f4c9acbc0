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

//! Report command implementations: record tables and change tables.

use super::{check_failures, extract_records, report_failures, RunOptions};
use crate::discovery::SourceSelection;
use crate::error::CliError;
use crate::output::{render_records, write_output, OutputFormat};
use benchlog_core::{ExtractProfile, FieldSpec, Series};
use std::path::Path;

/// Extract one record per source and render them as a table.
///
/// The report is written before failures are reported, so a single broken
/// log never hides the others.
///
/// # Errors
///
/// Returns `Err` if sources cannot be resolved, output cannot be written,
/// or, after writing, if any source failed extraction.
///
/// # Examples
///
/// ```no_run
/// use benchlog_cli::commands::{table, RunOptions};
/// use benchlog_cli::discovery::SourceSelection;
/// use benchlog_cli::output::OutputFormat;
/// use benchlog_core::ExtractProfile;
/// use std::path::PathBuf;
///
/// # fn main() -> Result<(), benchlog_cli::error::CliError> {
/// let selection = SourceSelection {
///     dir: PathBuf::from("performance"),
///     ..Default::default()
/// };
/// table(
///     &selection,
///     &ExtractProfile::default(),
///     &RunOptions::default(),
///     OutputFormat::Markdown,
///     None,
/// )?;
/// # Ok(())
/// # }
/// ```
pub fn table(
    selection: &SourceSelection,
    profile: &ExtractProfile,
    options: &RunOptions,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let results = extract_records(selection, profile, options)?;
    let records = results.records();

    let report = render_records(format, &profile.header(), &profile.fields, &records)?;
    write_output(&report, output)?;

    check_failures(&results)
}

/// Render the relative change of `metric` between consecutive records.
///
/// Records are compared in source order. Sources without a matching line
/// are skipped, so each row compares neighbouring runs that produced a
/// record.
///
/// # Errors
///
/// In addition to the errors of [`table`], fails with `InvalidConfig` if
/// `metric` is not a configured field and `InvalidNumber` if a value of
/// `metric` is not numeric.
pub fn changes(
    selection: &SourceSelection,
    profile: &ExtractProfile,
    options: &RunOptions,
    metric: &str,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let results = extract_records(selection, profile, options)?;
    let records = results.records();

    let series = match Series::project(&records, &profile.fields, metric) {
        Ok(series) => series,
        Err(e) => {
            report_failures(&results);
            return Err(e.into());
        }
    };
    let label = profile
        .fields
        .get(metric)
        .map(FieldSpec::header)
        .unwrap_or(metric);
    let report = format!("{}\n", series.changes_table(label)?);
    write_output(&report, output)?;

    check_failures(&results)
}
