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

//! Error types for benchmark log extraction and table rendering.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Benchmark log processing error types.
///
/// Extraction errors ([`NotFound`](BenchlogError::NotFound),
/// [`OutOfRange`](BenchlogError::OutOfRange), [`Io`](BenchlogError::Io))
/// describe a single source; callers processing several sources keep going
/// after one of them fails. Rendering errors
/// ([`ShapeMismatch`](BenchlogError::ShapeMismatch),
/// [`EmptyHeader`](BenchlogError::EmptyHeader)) abort the whole table.
///
/// # Examples
///
/// ```
/// use benchlog_core::BenchlogError;
///
/// let err = BenchlogError::ShapeMismatch {
///     row: 2,
///     expected: 5,
///     actual: 3,
/// };
///
/// assert_eq!(
///     err.to_string(),
///     "Row 2 has 3 columns, expected 5 to match the header"
/// );
/// ```
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BenchlogError {
    /// A configured file or directory does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use benchlog_core::BenchlogError;
    ///
    /// let err = BenchlogError::not_found("logs/missing.txt");
    /// assert!(err.to_string().contains("logs/missing.txt"));
    /// ```
    #[error("No such file or directory: '{}'", .path.display())]
    NotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// A matching line has fewer tokens than the field map requires.
    ///
    /// Carries the source and the offending line so an upstream change of
    /// the benchmark output format can be diagnosed.
    ///
    /// # Examples
    ///
    /// ```
    /// use benchlog_core::BenchlogError;
    ///
    /// let err = BenchlogError::OutOfRange {
    ///     source_id: "run.txt".to_string(),
    ///     field: "Allocations".to_string(),
    ///     index: 6,
    ///     tokens: 3,
    ///     line: "BenchmarkExample-4 100 71.09".to_string(),
    /// };
    /// assert!(err.to_string().contains("token 6"));
    /// assert!(err.to_string().contains("run.txt"));
    /// ```
    #[error(
        "Field '{field}' needs token {index} but the matching line in '{source_id}' has only {tokens} tokens: {line:?}"
    )]
    OutOfRange {
        /// Identifier of the source (usually the file name).
        source_id: String,
        /// First field whose index is out of range.
        field: String,
        /// Token position required by that field (0-based).
        index: usize,
        /// Number of tokens found on the line.
        tokens: usize,
        /// The matching line, verbatim.
        line: String,
    },

    /// A table row does not have the same number of columns as the header.
    #[error("Row {row} has {actual} columns, expected {expected} to match the header")]
    ShapeMismatch {
        /// Row index (0-based, data rows only).
        row: usize,
        /// Header arity.
        expected: usize,
        /// Arity of the offending row.
        actual: usize,
    },

    /// A table was requested with no header columns.
    #[error("Table header must have at least one column")]
    EmptyHeader,

    /// A value projected for a numeric series is not a number.
    ///
    /// # Examples
    ///
    /// ```
    /// use benchlog_core::BenchlogError;
    ///
    /// let err = BenchlogError::InvalidNumber {
    ///     source_id: "a.txt".to_string(),
    ///     field: "Time".to_string(),
    ///     value: "fast".to_string(),
    /// };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Field 'Time' in 'a.txt' is not a number: 'fast'"
    /// );
    /// ```
    #[error("Field '{field}' in '{source_id}' is not a number: '{value}'")]
    InvalidNumber {
        /// Source the value came from.
        source_id: String,
        /// Field being projected.
        field: String,
        /// Raw value.
        value: String,
    },

    /// Extraction profile or field map is malformed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O failure other than a missing file.
    #[error("I/O error for '{}': {message}", .path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying error message.
        message: String,
    },
}

/// Convenience type alias for `Result` with `BenchlogError`.
pub type Result<T> = std::result::Result<T, BenchlogError>;

impl BenchlogError {
    /// Create a not-found error for a path.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Map an I/O error on `path`, keeping `NotFound` distinct.
    ///
    /// # Examples
    ///
    /// ```
    /// use benchlog_core::BenchlogError;
    /// use std::io;
    ///
    /// let err = BenchlogError::from_io("a.txt", io::Error::new(io::ErrorKind::NotFound, "gone"));
    /// assert!(matches!(err, BenchlogError::NotFound { .. }));
    ///
    /// let err = BenchlogError::from_io("a.txt", io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
    /// assert!(matches!(err, BenchlogError::Io { .. }));
    /// ```
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io {
                path,
                message: source.to_string(),
            },
        }
    }

    /// Whether this error only affects a single source.
    ///
    /// Per-source errors are collected and reported while the remaining
    /// sources are still processed.
    pub fn is_per_source(&self) -> bool {
        matches!(
            self,
            Self::OutOfRange { .. } | Self::Io { .. } | Self::InvalidNumber { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = BenchlogError::not_found("perf/2024-08-06.txt");
        assert_eq!(
            err.to_string(),
            "No such file or directory: 'perf/2024-08-06.txt'"
        );
    }

    #[test]
    fn test_out_of_range_display_includes_line() {
        let err = BenchlogError::OutOfRange {
            source_id: "bad.txt".to_string(),
            field: "Allocations".to_string(),
            index: 6,
            tokens: 3,
            line: "BenchmarkExample-4 100 71.09".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'Allocations'"));
        assert!(msg.contains("bad.txt"));
        assert!(msg.contains("only 3 tokens"));
        assert!(msg.contains("\"BenchmarkExample-4 100 71.09\""));
    }

    #[test]
    fn test_empty_header_display() {
        assert_eq!(
            BenchlogError::EmptyHeader.to_string(),
            "Table header must have at least one column"
        );
    }

    #[test]
    fn test_from_io_other_kind() {
        let err = BenchlogError::from_io(
            "x.txt",
            io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
        );
        assert_eq!(
            err,
            BenchlogError::Io {
                path: PathBuf::from("x.txt"),
                message: "stream did not contain valid UTF-8".to_string(),
            }
        );
    }

    #[test]
    fn test_is_per_source() {
        assert!(BenchlogError::OutOfRange {
            source_id: String::new(),
            field: String::new(),
            index: 0,
            tokens: 0,
            line: String::new(),
        }
        .is_per_source());
        assert!(!BenchlogError::EmptyHeader.is_per_source());
        assert!(!BenchlogError::not_found("d").is_per_source());
        assert!(!BenchlogError::invalid_config("x").is_per_source());
    }
}
