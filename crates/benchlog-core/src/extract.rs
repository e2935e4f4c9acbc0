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

//! Log record extraction.
//!
//! The extractor scans a source line by line, stops at the first line that
//! starts with the profile marker, and projects the configured token
//! positions into a [`BenchmarkRecord`]. Lines after the match are never
//! read.
//!
//! # Examples
//!
//! ```
//! use benchlog_core::{ExtractProfile, LogRecordExtractor};
//!
//! let extractor = LogRecordExtractor::new(ExtractProfile::default()).unwrap();
//! let log = "goos: linux\nBenchmarkExample-4  16716253  71.09 ns/op  8 B/op  1 allocs/op\nPASS\n";
//!
//! let record = extractor.extract_str("run.txt", log).unwrap().unwrap();
//! assert_eq!(record.to_row(), vec!["run.txt", "16716253", "71.09", "8", "1"]);
//! ```

use crate::error::{BenchlogError, Result};
use crate::fields::FieldIndexMap;
use crate::profile::ExtractProfile;
use crate::record::BenchmarkRecord;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Outcome of extracting from one source.
///
/// `Ok(None)` means no line matched the marker, which is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOutcome {
    /// Identifier of the source.
    pub source_id: String,
    /// Extracted record, no match, or a per-source failure.
    pub result: Result<Option<BenchmarkRecord>>,
}

impl SourceOutcome {
    /// Whether extraction failed for this source.
    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }
}

/// Extracts at most one record per source.
#[derive(Debug, Clone)]
pub struct LogRecordExtractor {
    profile: ExtractProfile,
}

impl LogRecordExtractor {
    /// Create an extractor for a validated profile.
    pub fn new(profile: ExtractProfile) -> Result<Self> {
        profile.validate()?;
        Ok(Self { profile })
    }

    /// The profile in use.
    pub fn profile(&self) -> &ExtractProfile {
        &self.profile
    }

    /// The marker lines must start with.
    pub fn marker(&self) -> &str {
        &self.profile.marker
    }

    /// The configured fields.
    pub fn fields(&self) -> &FieldIndexMap {
        &self.profile.fields
    }

    /// Whether `line` is the line to extract from.
    pub fn matches(&self, line: &str) -> bool {
        line.starts_with(self.profile.marker.as_str())
    }

    /// Project the configured fields out of a matching line.
    ///
    /// # Errors
    ///
    /// Returns [`BenchlogError::OutOfRange`] when the line has fewer tokens
    /// than the largest configured index requires.
    pub fn project(&self, source_id: &str, line: &str) -> Result<BenchmarkRecord> {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        let values = self
            .profile
            .fields
            .iter()
            .map(|field| {
                tokens
                    .get(field.index)
                    .map(|token| (*token).to_string())
                    .ok_or_else(|| BenchlogError::OutOfRange {
                        source_id: source_id.to_string(),
                        field: field.name.clone(),
                        index: field.index,
                        tokens: tokens.len(),
                        line: line.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(BenchmarkRecord::new(source_id, values))
    }

    /// Extract from an in-memory sequence of lines.
    pub fn extract_lines<I, S>(&self, source_id: &str, lines: I) -> Result<Option<BenchmarkRecord>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            let line = line.as_ref();
            if self.matches(line) {
                return self.project(source_id, line).map(Some);
            }
        }
        Ok(None)
    }

    /// Extract from text.
    pub fn extract_str(&self, source_id: &str, text: &str) -> Result<Option<BenchmarkRecord>> {
        self.extract_lines(source_id, text.lines())
    }

    /// Extract from a buffered reader, reading only up to the first match.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected, so a
    /// stray binary line elsewhere in a log does not hide the result line.
    pub fn extract_reader<R: BufRead>(
        &self,
        source_id: &str,
        mut reader: R,
    ) -> Result<Option<BenchmarkRecord>> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| BenchlogError::from_io(source_id, e))?;
            if read == 0 {
                return Ok(None);
            }

            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\n', '\r']);
            if self.matches(line) {
                return self.project(source_id, line).map(Some);
            }
        }
    }

    /// Extract from a file. The source identifier is the file name.
    ///
    /// The file is opened and closed within this call.
    ///
    /// # Errors
    ///
    /// - [`BenchlogError::NotFound`] if the file does not exist
    /// - [`BenchlogError::Io`] on any other read failure
    /// - [`BenchlogError::OutOfRange`] if the matching line is too short
    pub fn extract_path(&self, path: &Path) -> Result<Option<BenchmarkRecord>> {
        let file = File::open(path).map_err(|e| BenchlogError::from_io(path, e))?;
        let source_id = source_id_for(path);
        self.extract_reader(&source_id, BufReader::new(file))
            .map_err(|e| match e {
                // Read errors are reported against the full path.
                BenchlogError::Io { message, .. } => BenchlogError::Io {
                    path: path.to_path_buf(),
                    message,
                },
                other => other,
            })
    }

    /// Extract from several files, one outcome per file in input order.
    ///
    /// A failure for one file never stops the others.
    pub fn extract_all<'a, I>(&self, paths: I) -> Vec<SourceOutcome>
    where
        I: IntoIterator<Item = &'a Path>,
    {
        paths
            .into_iter()
            .map(|path| SourceOutcome {
                source_id: source_id_for(path),
                result: self.extract_path(path),
            })
            .collect()
    }
}

/// Source identifier for a path: its file name, or the whole path when it
/// has none.
pub fn source_id_for(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Split outcomes into records (in order) and failures.
pub fn partition_outcomes(
    outcomes: Vec<SourceOutcome>,
) -> (Vec<BenchmarkRecord>, Vec<(String, BenchlogError)>) {
    let mut records = Vec::new();
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome.result {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(e) => failures.push((outcome.source_id, e)),
        }
    }
    (records, failures)
}
