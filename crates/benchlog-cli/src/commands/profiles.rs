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

//! Built-in profile listing

use crate::error::CliError;
use crate::output::write_output;
use benchlog_core::ExtractProfile;

/// Print the built-in profiles as a pretty JSON array.
pub fn profiles() -> Result<(), CliError> {
    let mut text = serde_json::to_string_pretty(&ExtractProfile::builtins())?;
    text.push('\n');
    write_output(&text, None)
}
