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

//! Shell completion generation

use crate::error::CliError;
use clap::Command;
use clap_complete::{generate, Generator};
use std::io;

/// Write the completion script for `cmd` to stdout.
///
/// # Examples
///
/// ```no_run
/// use clap::Command;
/// use clap_complete::shells::Bash;
/// use benchlog_cli::commands::generate_completion_for_command;
///
/// let mut cmd = Command::new("benchlog");
/// generate_completion_for_command(Bash, &mut cmd).unwrap();
/// ```
pub fn generate_completion_for_command<G: Generator>(
    generator: G,
    cmd: &mut Command,
) -> Result<(), CliError> {
    let name = cmd.get_name().to_string();
    generate(generator, cmd, name, &mut io::stdout());
    Ok(())
}

/// Shell-specific instructions for enabling completions.
///
/// Shell names are case-insensitive; unknown shells yield
/// `"Unsupported shell"`.
///
/// ```
/// use benchlog_cli::commands::print_installation_instructions;
///
/// assert!(print_installation_instructions("Zsh").contains("~/.zshrc"));
/// assert_eq!(print_installation_instructions("tcsh"), "Unsupported shell");
/// ```
pub fn print_installation_instructions(shell: &str) -> String {
    let (title, session, persistent) = match shell.to_lowercase().as_str() {
        "bash" => (
            "Bash",
            r#"eval "$(benchlog completion bash)""#,
            "benchlog completion bash > ~/.local/share/bash-completion/completions/benchlog\n\
             # or add the eval line to ~/.bashrc",
        ),
        "zsh" => (
            "Zsh",
            r#"eval "$(benchlog completion zsh)""#,
            "benchlog completion zsh > ~/.zsh/completions/_benchlog  # directory must be in $fpath\n\
             # or add the eval line to ~/.zshrc",
        ),
        "fish" => (
            "Fish",
            "benchlog completion fish | source",
            "benchlog completion fish > ~/.config/fish/completions/benchlog.fish",
        ),
        "powershell" | "pwsh" => (
            "PowerShell",
            "benchlog completion powershell | Out-String | Invoke-Expression",
            "# add the line above to the file named by $PROFILE",
        ),
        "elvish" => (
            "Elvish",
            "eval (benchlog completion elvish | slurp)",
            "# add the line above to ~/.elvish/rc.elv",
        ),
        _ => return "Unsupported shell".to_string(),
    };

    format!(
        "# {} completion installation:\n\n# For current session only:\n{}\n\n# For persistent installation:\n{}\n",
        title, session, persistent
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_installation_instructions_name_the_shell() {
        for shell in ["bash", "zsh", "fish", "powershell", "pwsh", "elvish"] {
            let instructions = print_installation_instructions(shell);
            assert!(
                instructions.contains(&format!("benchlog completion {}", shell))
                    || shell == "pwsh",
                "{}",
                instructions
            );
        }
    }

    #[test]
    fn test_installation_instructions_case_insensitive() {
        let lower = print_installation_instructions("bash");
        assert_eq!(lower, print_installation_instructions("BASH"));
        assert_eq!(lower, print_installation_instructions("Bash"));
    }

    #[test]
    fn test_installation_instructions_unsupported() {
        assert_eq!(print_installation_instructions("invalid"), "Unsupported shell");
    }
}
