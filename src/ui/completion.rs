//! Shell completion system for kafka-dashboard

use clap::{Command, CommandFactory};
use clap_complete::{Generator, Shell, generate};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ui::cli::Cli;

const BIN_NAME: &str = "kafka-dashboard";

/// Generate shell completions for the given shell
pub fn print_completions<G: Generator>(generator: G, app: &mut Command) {
    generate(generator, app, BIN_NAME, &mut std::io::stdout());
}

/// Install shell completion to standard user location
pub fn install_completion(shell: Shell) -> Result<String, String> {
    let home =
        std::env::var("HOME").map_err(|_| "HOME environment variable not set".to_string())?;
    let completion_dir = completion_directory(shell, Path::new(&home))?;
    fs::create_dir_all(&completion_dir).map_err(|e| {
        format!(
            "Failed to create completion directory {}: {e}",
            completion_dir.display()
        )
    })?;

    let completion_path = completion_dir.join(completion_filename(shell));
    let completion_script = generate_completion_script(shell)?;

    fs::write(&completion_path, completion_script).map_err(|e| {
        format!(
            "Failed to write completion file to {}: {e}",
            completion_path.display()
        )
    })?;

    let instructions = shell_setup_instructions(shell, &completion_path);
    Ok(format!(
        "✅ Shell completion installed successfully!\n\n{instructions}"
    ))
}

fn completion_directory(shell: Shell, home: &Path) -> Result<PathBuf, String> {
    match shell {
        Shell::Bash => Ok(home.join(".local/share/bash-completion/completions")),
        Shell::Zsh => Ok(home.join(".local/share/zsh/site-functions")),
        Shell::Fish => Ok(home.join(".config/fish/completions")),
        Shell::PowerShell | Shell::Elvish => Err(format!(
            "{shell} completion installation not supported. Use '{BIN_NAME} completion-generate {shell}' and add it to your profile manually."
        )),
        _ => Err(format!("Unsupported shell: {shell:?}")),
    }
}

fn completion_filename(shell: Shell) -> String {
    match shell {
        Shell::Zsh => format!("_{BIN_NAME}"),
        Shell::Fish => format!("{BIN_NAME}.fish"),
        _ => BIN_NAME.to_string(),
    }
}

/// Render the completion script for `shell` into a string
pub fn generate_completion_script(shell: Shell) -> Result<String, String> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    generate(shell, &mut cmd, BIN_NAME, &mut buf);

    String::from_utf8(buf).map_err(|e| format!("Failed to generate completion script: {e}"))
}

fn shell_setup_instructions(shell: Shell, completion_path: &Path) -> String {
    match shell {
        Shell::Bash => format!(
            "Completion installed to: {}\n\n\
            Make sure bash-completion is enabled, then restart your shell or run: source ~/.bashrc",
            completion_path.display()
        ),
        Shell::Zsh => format!(
            "Completion installed to: {}\n\n\
            To enable zsh completions, add this to your ~/.zshrc:\n\
            fpath=(~/.local/share/zsh/site-functions $fpath)\n\
            autoload -U compinit && compinit",
            completion_path.display()
        ),
        Shell::Fish => format!(
            "Completion installed to: {}\n\n\
            Fish completions are automatically loaded from ~/.config/fish/completions/",
            completion_path.display()
        ),
        _ => format!("Completion installed to: {}", completion_path.display()),
    }
}
