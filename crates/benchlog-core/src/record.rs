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

//! Extracted benchmark records.

use crate::fields::FieldIndexMap;
use serde::Serialize;

/// One extracted row: a source identifier and one value per configured
/// field, in field-map order.
///
/// Records are created by the extractor and never mutated afterwards.
///
/// # Examples
///
/// ```
/// use benchlog_core::BenchmarkRecord;
///
/// let record = BenchmarkRecord::new("run.txt", vec!["100".into(), "71.09".into()]);
/// assert_eq!(record.arity(), 3);
/// assert_eq!(record.to_row(), vec!["run.txt", "100", "71.09"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BenchmarkRecord {
    source_id: String,
    values: Vec<String>,
}

impl BenchmarkRecord {
    /// Create a record.
    pub fn new(source_id: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            source_id: source_id.into(),
            values,
        }
    }

    /// Identifier of the source this record came from.
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// Field values in field-map order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Value at a field position.
    pub fn value(&self, position: usize) -> Option<&str> {
        self.values.get(position).map(String::as_str)
    }

    /// Number of columns: the source plus every field.
    pub fn arity(&self) -> usize {
        1 + self.values.len()
    }

    /// Table row: source identifier followed by the values.
    pub fn to_row(&self) -> Vec<String> {
        std::iter::once(&self.source_id)
            .chain(&self.values)
            .cloned()
            .collect()
    }

    /// Pair each value with its field name.
    pub fn named<'a>(
        &'a self,
        fields: &'a FieldIndexMap,
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        fields
            .names()
            .zip(self.values.iter().map(String::as_str))
    }
}
