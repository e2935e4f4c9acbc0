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

//! Extraction profiles: a marker plus a field map, under a name.

use crate::error::{BenchlogError, Result};
use crate::fields::{FieldIndexMap, FieldSpec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the profile used when none is requested.
pub const DEFAULT_PROFILE: &str = "go-bench";

/// Header of the source identifier column.
pub const SOURCE_COLUMN: &str = "FileName";

/// Everything needed to pull one record out of a log.
///
/// Profiles are plain data and can be loaded from JSON:
///
/// ```
/// use benchlog_core::ExtractProfile;
///
/// let profile = ExtractProfile::from_json(r#"{
///     "name": "pkg",
///     "marker": "pkg:",
///     "fields": [{ "name": "Package", "index": 1 }]
/// }"#).unwrap();
///
/// assert_eq!(profile.marker, "pkg:");
/// assert_eq!(profile.header(), vec!["FileName", "Package"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractProfile {
    /// Profile name.
    pub name: String,
    /// Literal prefix of the line to extract from.
    pub marker: String,
    /// Fields to project from the matching line.
    pub fields: FieldIndexMap,
}

impl ExtractProfile {
    /// Create a validated profile.
    pub fn new(
        name: impl Into<String>,
        marker: impl Into<String>,
        fields: FieldIndexMap,
    ) -> Result<Self> {
        let profile = Self {
            name: name.into(),
            marker: marker.into(),
            fields,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Check invariants not enforced by the field map itself.
    pub fn validate(&self) -> Result<()> {
        if self.marker.is_empty() {
            return Err(BenchlogError::invalid_config(format!(
                "profile '{}' has an empty marker",
                self.name
            )));
        }
        Ok(())
    }

    /// Parse and validate a profile from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let profile: Self = serde_json::from_str(json)
            .map_err(|e| BenchlogError::invalid_config(format!("invalid profile JSON: {}", e)))?;
        profile.validate()?;
        Ok(profile)
    }

    /// Load a profile from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| BenchlogError::from_io(path, e))?;
        Self::from_json(&json)
    }

    /// Replace the marker, keeping the fields.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Result<Self> {
        self.marker = marker.into();
        self.validate()?;
        Ok(self)
    }

    /// Replace the field map, keeping the marker.
    pub fn with_fields(mut self, fields: FieldIndexMap) -> Self {
        self.fields = fields;
        self
    }

    /// Table header: the source column followed by one column per field.
    pub fn header(&self) -> Vec<String> {
        std::iter::once(SOURCE_COLUMN)
            .chain(self.fields.headers())
            .map(str::to_string)
            .collect()
    }

    /// Look up a built-in profile by name.
    ///
    /// # Examples
    ///
    /// ```
    /// use benchlog_core::ExtractProfile;
    ///
    /// let profile = ExtractProfile::builtin("go-bench").unwrap();
    /// assert_eq!(profile.marker, "BenchmarkExample-4");
    /// assert_eq!(profile.fields.max_index(), 6);
    ///
    /// assert!(ExtractProfile::builtin("nope").is_none());
    /// ```
    pub fn builtin(name: &str) -> Option<Self> {
        Self::builtins().into_iter().find(|p| p.name == name)
    }

    /// All built-in profiles.
    pub fn builtins() -> Vec<Self> {
        vec![
            Self::default(),
            Self {
                name: "go-bench-first".to_string(),
                marker: "Benchmark".to_string(),
                fields: go_bench_fields(),
            },
        ]
    }
}

impl Default for ExtractProfile {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROFILE.to_string(),
            marker: "BenchmarkExample-4".to_string(),
            fields: go_bench_fields(),
        }
    }
}

/// Field layout of `go test -bench -benchmem` result lines.
fn go_bench_fields() -> FieldIndexMap {
    FieldIndexMap::new(vec![
        FieldSpec::new("Count", 1),
        FieldSpec::new("Time", 2).with_label("Time (ns/op)"),
        FieldSpec::new("Memory", 4).with_label("Memory (B/op)"),
        FieldSpec::new("Allocations", 6).with_label("Allocations (allocs/op)"),
    ])
    .expect("built-in field map is valid")
}
