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

//! CLI command implementations

mod completion;
mod profiles;
mod report;

pub use completion::{generate_completion_for_command, print_installation_instructions};
pub use profiles::profiles;
pub use report::{changes, table};

use crate::batch::{BatchConfig, BatchProcessor, BatchResults, ExtractOperation};
use crate::discovery::SourceSelection;
use crate::error::CliError;
use benchlog_core::{BenchmarkRecord, ExtractProfile, LogRecordExtractor};
use colored::Colorize;
use tracing::warn;

/// Execution options shared by the report commands.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Batch tuning
    pub batch: BatchConfig,
    /// Report progress on stderr
    pub show_progress: bool,
}

impl RunOptions {
    /// Create run options.
    pub fn new(batch: BatchConfig, show_progress: bool) -> Self {
        Self {
            batch,
            show_progress,
        }
    }
}

/// Resolve sources and extract at most one record from each.
///
/// Per-source failures stay in the results; any other failure (a source
/// that vanished after discovery) is returned as the error.
fn extract_records(
    selection: &SourceSelection,
    profile: &ExtractProfile,
    options: &RunOptions,
) -> Result<BatchResults<Option<BenchmarkRecord>>, CliError> {
    let paths = selection.resolve()?;
    if paths.is_empty() {
        warn!(
            dir = %selection.dir.display(),
            pattern = %selection.pattern,
            "no sources selected"
        );
    }

    let extractor = LogRecordExtractor::new(profile.clone())?;
    let results = BatchProcessor::new(options.batch.clone()).process(
        &paths,
        ExtractOperation::new(extractor),
        options.show_progress,
    )?;

    match fatal_failure(&results) {
        Some(e) => Err(e),
        None => Ok(results),
    }
}

/// First failure that does not concern a single source only.
fn fatal_failure<T>(results: &BatchResults<T>) -> Option<CliError> {
    results
        .failures()
        .filter_map(|failure| failure.result.as_ref().err())
        .find(|e| !e.is_per_source())
        .cloned()
}

/// List failed sources on stderr.
fn report_failures<T>(results: &BatchResults<T>) {
    if !results.has_failures() {
        return;
    }

    eprintln!();
    eprintln!("{}", "Extraction failures:".red().bold());
    for failure in results.failures() {
        eprintln!("  {} {}", "✗".red(), failure.path.display());
        if let Err(e) = &failure.result {
            eprintln!("    {}", e.to_string().dimmed());
        }
    }
}

/// List failed sources on stderr and turn them into an error.
fn check_failures<T>(results: &BatchResults<T>) -> Result<(), CliError> {
    if !results.has_failures() {
        return Ok(());
    }

    report_failures(results);
    Err(CliError::ExtractionFailed {
        failed: results.failure_count(),
        total: results.total_files(),
    })
}
