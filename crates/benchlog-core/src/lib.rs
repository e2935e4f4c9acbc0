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

//! Benchmark log extraction and Markdown table rendering.
//!
//! This crate turns benchmark log files (for example the output of
//! `go test -bench . -benchmem`) into structured records and renders them as
//! column-aligned Markdown tables.
//!
//! # Components
//!
//! - [`LogRecordExtractor`]: finds the first line starting with a marker and
//!   projects configured token positions into a [`BenchmarkRecord`]
//! - [`MarkdownTable`] / [`format_markdown_table`]: renders a header and
//!   equal-arity rows as Markdown
//! - [`Series`]: projects one numeric field across records and computes
//!   relative change between consecutive sources
//!
//! Field positions are configuration ([`FieldIndexMap`], bundled with a
//! marker in an [`ExtractProfile`]) so a different log layout only needs a
//! different profile.
//!
//! # Examples
//!
//! ```
//! use benchlog_core::{ExtractProfile, LogRecordExtractor, MarkdownTable};
//!
//! let profile = ExtractProfile::default();
//! let extractor = LogRecordExtractor::new(profile.clone()).unwrap();
//!
//! let logs = [
//!     ("2024-08-05.txt", "BenchmarkExample-4  16716253  71.09 ns/op  8 B/op  1 allocs/op\n"),
//!     ("2024-08-06.txt", "PASS\n"),
//! ];
//!
//! let mut records = Vec::new();
//! for (name, text) in logs {
//!     if let Some(record) = extractor.extract_str(name, text).unwrap() {
//!         records.push(record);
//!     }
//! }
//!
//! let table = MarkdownTable::from_records(profile.header(), &records).unwrap();
//! assert_eq!(table.len(), 1);
//! println!("{}", table);
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result`] with [`BenchlogError`].
//! Extraction errors are scoped to one source; rendering errors reject the
//! whole table.

mod error;
mod extract;
mod fields;
mod profile;
mod record;
mod series;
mod table;

pub use error::{BenchlogError, Result};
pub use extract::{partition_outcomes, source_id_for, LogRecordExtractor, SourceOutcome};
pub use fields::{FieldIndexMap, FieldSpec};
pub use profile::{ExtractProfile, DEFAULT_PROFILE, SOURCE_COLUMN};
pub use record::BenchmarkRecord;
pub use series::{Change, Series, SeriesPoint};
pub use table::{format_markdown_table, MarkdownTable};
