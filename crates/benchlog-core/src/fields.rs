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

//! Field index maps: logical field name → whitespace token position.
//!
//! Benchmark output is addressed purely by position. A Go benchmark line
//!
//! ```text
//! BenchmarkExample-4   16716253   71.09 ns/op   8 B/op   1 allocs/op
//! ```
//!
//! tokenizes to `["BenchmarkExample-4", "16716253", "71.09", "ns/op", "8",
//! "B/op", "1", "allocs/op"]`, so the iteration count lives at index 1, the
//! time per operation at index 2, and so on. The map is plain data so that a
//! different log layout only needs a different map.

use crate::error::{BenchlogError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// One configured field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Logical field name, e.g. `Time`.
    pub name: String,
    /// 0-based position in the whitespace-tokenized line.
    pub index: usize,
    /// Column header used when rendering; defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl FieldSpec {
    /// Create a field without a display label.
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
            label: None,
        }
    }

    /// Attach a display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Column header for this field.
    pub fn header(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.index)?;
        if let Some(label) = &self.label {
            write!(f, ":{}", label)?;
        }
        Ok(())
    }
}

/// Parses `NAME=INDEX` or `NAME=INDEX:LABEL`.
///
/// # Examples
///
/// ```
/// use benchlog_core::FieldSpec;
///
/// let field: FieldSpec = "Time=2:Time (ns/op)".parse().unwrap();
/// assert_eq!(field.name, "Time");
/// assert_eq!(field.index, 2);
/// assert_eq!(field.header(), "Time (ns/op)");
///
/// assert!("Time".parse::<FieldSpec>().is_err());
/// assert!("Time=two".parse::<FieldSpec>().is_err());
/// ```
impl FromStr for FieldSpec {
    type Err = BenchlogError;

    fn from_str(s: &str) -> Result<Self> {
        let (name, rest) = s.split_once('=').ok_or_else(|| {
            BenchlogError::invalid_config(format!(
                "field '{}' must be written as NAME=INDEX[:LABEL]",
                s
            ))
        })?;

        let (index, label) = match rest.split_once(':') {
            Some((index, label)) => (index, Some(label.trim())),
            None => (rest, None),
        };

        let index = index.trim().parse::<usize>().map_err(|e| {
            BenchlogError::invalid_config(format!("field '{}' has invalid index: {}", s, e))
        })?;

        let mut field = FieldSpec::new(name.trim(), index);
        if let Some(label) = label.filter(|l| !l.is_empty()) {
            field = field.with_label(label);
        }
        Ok(field)
    }
}

/// Ordered mapping from field name to token position.
///
/// Declaration order is preserved and determines the column order of
/// extracted records. The map is never empty and field names are unique.
///
/// # Examples
///
/// ```
/// use benchlog_core::{FieldIndexMap, FieldSpec};
///
/// let fields = FieldIndexMap::new(vec![
///     FieldSpec::new("Count", 1),
///     FieldSpec::new("Time", 2),
///     FieldSpec::new("Memory", 4),
///     FieldSpec::new("Allocations", 6),
/// ])
/// .unwrap();
///
/// assert_eq!(fields.len(), 4);
/// assert_eq!(fields.max_index(), 6);
/// assert_eq!(fields.position("Memory"), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FieldSpec>", into = "Vec<FieldSpec>")]
pub struct FieldIndexMap {
    fields: Vec<FieldSpec>,
}

impl FieldIndexMap {
    /// Build a map, rejecting empty maps, empty names and duplicates.
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self> {
        if fields.is_empty() {
            return Err(BenchlogError::invalid_config(
                "field map must contain at least one field",
            ));
        }

        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if field.name.is_empty() {
                return Err(BenchlogError::invalid_config("field name must not be empty"));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(BenchlogError::invalid_config(format!(
                    "duplicate field name '{}'",
                    field.name
                )));
            }
        }

        Ok(Self { fields })
    }

    /// Build a map from `(name, index)` pairs.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, usize)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(name, index)| FieldSpec::new(name, index))
                .collect(),
        )
    }

    /// Number of configured fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Largest configured token index.
    pub fn max_index(&self) -> usize {
        self.fields.iter().map(|f| f.index).max().unwrap_or(0)
    }

    /// Iterate fields in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldSpec> {
        self.fields.iter()
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Position of a field within a record's values.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Column headers (labels where set) in declaration order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FieldSpec::header)
    }
}

impl TryFrom<Vec<FieldSpec>> for FieldIndexMap {
    type Error = BenchlogError;

    fn try_from(fields: Vec<FieldSpec>) -> Result<Self> {
        Self::new(fields)
    }
}

impl From<FieldIndexMap> for Vec<FieldSpec> {
    fn from(map: FieldIndexMap) -> Self {
        map.fields
    }
}

impl<'a> IntoIterator for &'a FieldIndexMap {
    type Item = &'a FieldSpec;
    type IntoIter = std::slice::Iter<'a, FieldSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_map() {
        let err = FieldIndexMap::new(vec![]).unwrap_err();
        assert!(matches!(err, BenchlogError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let err = FieldIndexMap::from_pairs([("Time", 2), ("Time", 3)]).unwrap_err();
        assert!(err.to_string().contains("duplicate field name 'Time'"));
    }

    #[test]
    fn test_rejects_empty_name() {
        assert!(FieldIndexMap::from_pairs([("", 1)]).is_err());
    }

    #[test]
    fn test_preserves_declaration_order() {
        let map = FieldIndexMap::from_pairs([("Memory", 4), ("Count", 1), ("Time", 2)]).unwrap();
        let names: Vec<_> = map.names().collect();
        assert_eq!(names, vec!["Memory", "Count", "Time"]);
        assert_eq!(map.max_index(), 4);
    }

    #[test]
    fn test_headers_use_labels() {
        let map = FieldIndexMap::new(vec![
            FieldSpec::new("Count", 1),
            FieldSpec::new("Time", 2).with_label("Time (ns/op)"),
        ])
        .unwrap();
        let headers: Vec<_> = map.headers().collect();
        assert_eq!(headers, vec!["Count", "Time (ns/op)"]);
    }

    #[test]
    fn test_field_spec_parse_and_display() {
        let field: FieldSpec = " Memory = 4 ".parse().unwrap();
        assert_eq!(field, FieldSpec::new("Memory", 4));
        assert_eq!(field.to_string(), "Memory=4");

        let labelled: FieldSpec = "Memory=4:Memory (B/op)".parse().unwrap();
        assert_eq!(labelled.to_string(), "Memory=4:Memory (B/op)");

        let empty_label: FieldSpec = "Memory=4:".parse().unwrap();
        assert_eq!(empty_label.label, None);
    }

    #[test]
    fn test_field_spec_parse_errors() {
        assert!("Memory".parse::<FieldSpec>().is_err());
        assert!("Memory=-1".parse::<FieldSpec>().is_err());
        assert!("Memory=".parse::<FieldSpec>().is_err());
    }

    #[test]
    fn test_serde_validates_on_deserialize() {
        let map: FieldIndexMap =
            serde_json::from_str(r#"[{"name":"Count","index":1},{"name":"Time","index":2,"label":"Time (ns/op)"}]"#)
                .unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("Time").unwrap().header(), "Time (ns/op)");

        let dup = serde_json::from_str::<FieldIndexMap>(
            r#"[{"name":"Count","index":1},{"name":"Count","index":2}]"#,
        );
        assert!(dup.is_err());

        let json = serde_json::to_string(&map).unwrap();
        assert!(json.starts_with('['));
        assert!(!json.contains("\"label\":null"));
    }
}
