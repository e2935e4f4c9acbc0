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

//! Tests for extraction across many logs, serial and parallel.

use assert_cmd::Command;
use benchlog_cli::batch::{BatchConfig, BatchProcessor, ExtractOperation};
use benchlog_core::{ExtractProfile, LogRecordExtractor};
use benchlog_test::{go_bench_log, truncated_log, BenchLine, LogDir};
use predicates::prelude::*;

fn benchlog_cmd() -> Command {
    Command::cargo_bin("benchlog").expect("Failed to find benchlog binary")
}

/// A directory of `count` logs named `run-000.txt`, `run-001.txt`, ...
fn many_runs(count: usize) -> LogDir {
    let dir = LogDir::new();
    for i in 0..count {
        let ns = format!("{}.5", 100 + i);
        dir.write(
            &format!("run-{:03}.txt", i),
            &go_bench_log(&[BenchLine::example(1000 + i as u64, &ns, 8, 1)]),
        );
    }
    dir
}

fn extractor() -> LogRecordExtractor {
    LogRecordExtractor::new(ExtractProfile::default()).unwrap()
}

#[test]
fn test_parallel_matches_serial() {
    let dir = many_runs(40);
    let mut files: Vec<_> = (0..40)
        .map(|i| dir.path().join(format!("run-{:03}.txt", i)))
        .collect();
    files.reverse();

    let serial = BatchProcessor::new(BatchConfig {
        parallel_threshold: usize::MAX,
        ..Default::default()
    })
    .process(&files, ExtractOperation::new(extractor()), false)
    .unwrap();

    let parallel = BatchProcessor::new(BatchConfig {
        parallel_threshold: 1,
        max_threads: Some(4),
        ..Default::default()
    })
    .process(&files, ExtractOperation::new(extractor()), false)
    .unwrap();

    assert!(serial.all_succeeded());
    assert!(parallel.all_succeeded());
    assert_eq!(serial.records(), parallel.records());
    assert_eq!(parallel.records()[0].source_id(), "run-039.txt");
}

#[test]
fn test_failures_do_not_stop_the_batch() {
    let dir = many_runs(12);
    let broken = dir.write("run-005.txt", &truncated_log());
    let files: Vec<_> = (0..12)
        .map(|i| dir.path().join(format!("run-{:03}.txt", i)))
        .collect();

    let results = BatchProcessor::default_config()
        .process(&files, ExtractOperation::new(extractor()), false)
        .unwrap();

    assert_eq!(results.total_files(), 12);
    assert_eq!(results.failure_count(), 1);
    assert_eq!(results.failures().next().unwrap().path, broken);
    assert_eq!(results.records().len(), 11);
}

#[test]
fn test_cli_parallel_output_is_sorted() {
    let dir = many_runs(25);

    let output = benchlog_cmd()
        .arg("table")
        .arg("--dir")
        .arg(dir.path())
        .args(["--parallel", "-j", "3"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let names: Vec<_> = stdout
        .lines()
        .skip(2)
        .map(|line| line.split('|').nth(1).unwrap().trim().to_string())
        .collect();

    let expected: Vec<_> = (0..25).map(|i| format!("run-{:03}.txt", i)).collect();
    assert_eq!(names, expected);
}

#[test]
fn test_cli_progress_goes_to_stderr() {
    let dir = many_runs(3);

    benchlog_cmd()
        .arg("table")
        .arg("--dir")
        .arg(dir.path())
        .arg("--progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress").not())
        .stderr(predicate::str::contains("Progress: [3/3]"))
        .stderr(predicate::str::contains("Batch Operation"))
        .stderr(predicate::str::contains("Throughput:"));
}

#[test]
fn test_cli_verbose_lists_each_file() {
    let dir = many_runs(2);

    benchlog_cmd()
        .arg("-v")
        .arg("table")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("run-000.txt"))
        .stderr(predicate::str::contains("run-001.txt"));
}
