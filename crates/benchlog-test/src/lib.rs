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

//! Shared test fixtures for benchlog.
//!
//! Provides realistic `go test -bench` output and a temporary log directory
//! helper so the core and CLI test suites build their inputs the same way.
//!
//! # Quick Start
//!
//! ```rust
//! use benchlog_test::{go_bench_log, BenchLine, LogDir};
//!
//! let dir = LogDir::new();
//! let path = dir.write(
//!     "2024-08-06_14-22-05.txt",
//!     &go_bench_log(&[BenchLine::example(16716253, "71.09", 8, 1)]),
//! );
//! assert!(path.exists());
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Marker used by the default profile.
pub const EXAMPLE_MARKER: &str = "BenchmarkExample-4";

/// One benchmark result line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchLine {
    /// Benchmark name including the GOMAXPROCS suffix.
    pub name: String,
    /// Iteration count.
    pub count: u64,
    /// Time per operation, as printed.
    pub ns_per_op: String,
    /// Bytes allocated per operation.
    pub bytes_per_op: u64,
    /// Allocations per operation.
    pub allocs_per_op: u64,
}

impl BenchLine {
    /// A `BenchmarkExample-4` line.
    pub fn example(count: u64, ns_per_op: &str, bytes_per_op: u64, allocs_per_op: u64) -> Self {
        Self::named(EXAMPLE_MARKER, count, ns_per_op, bytes_per_op, allocs_per_op)
    }

    /// A line for an arbitrary benchmark name.
    pub fn named(
        name: &str,
        count: u64,
        ns_per_op: &str,
        bytes_per_op: u64,
        allocs_per_op: u64,
    ) -> Self {
        Self {
            name: name.to_string(),
            count,
            ns_per_op: ns_per_op.to_string(),
            bytes_per_op,
            allocs_per_op,
        }
    }

    /// Render the line the way `go test -benchmem` aligns it.
    pub fn render(&self) -> String {
        format!(
            "{:<24}\t{:>10}\t{:>12} ns/op\t{:>8} B/op\t{:>6} allocs/op",
            self.name, self.count, self.ns_per_op, self.bytes_per_op, self.allocs_per_op
        )
    }
}

/// Full `go test -bench . -benchmem` output around the given result lines.
pub fn go_bench_log(lines: &[BenchLine]) -> String {
    let mut out = String::from(
        "goos: linux\ngoarch: amd64\npkg: github.com/jf550-kent/jsgo/benchmark\ncpu: Intel(R) Core(TM) i5-7200U CPU @ 2.50GHz\n",
    );
    for line in lines {
        out.push_str(&line.render());
        out.push('\n');
    }
    out.push_str("PASS\nok  \tgithub.com/jf550-kent/jsgo/benchmark\t12.345s\n");
    out
}

/// Output in which the example benchmark never ran.
pub fn no_match_log() -> String {
    go_bench_log(&[BenchLine::named("BenchmarkList-4", 10, "1052", 96, 3)])
}

/// Output whose example line was truncated after the time column.
pub fn truncated_log() -> String {
    let mut out = go_bench_log(&[]);
    out.insert_str(0, "BenchmarkExample-4 100 71.09\n");
    out
}

/// A temporary directory of log files, removed on drop.
#[derive(Debug)]
pub struct LogDir {
    dir: TempDir,
}

impl LogDir {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Directory path.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file and return its path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("Failed to write log file");
        path
    }

    /// Write one example log per `(file name, ns/op)` pair.
    pub fn with_example_runs(runs: &[(&str, &str)]) -> Self {
        let dir = Self::new();
        for (i, (name, ns)) in runs.iter().enumerate() {
            let count = 1_000_000 + i as u64;
            dir.write(name, &go_bench_log(&[BenchLine::example(count, ns, 8, 1)]));
        }
        dir
    }
}

impl Default for LogDir {
    fn default() -> Self {
        Self::new()
    }
}
