//! External programs: markdown converters and the print command.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use helpdocs_render::{ConvertError, MarkdownConverter};

use crate::BuildError;

/// Converts markdown by piping it through an external program.
///
/// The program reads markdown on stdin and writes HTML to stdout, e.g.
/// `multimarkdown` or `pandoc -f markdown -t html`.
#[derive(Clone, Debug)]
pub struct CommandConverter {
    program: String,
    args: Vec<String>,
}

impl CommandConverter {
    /// Create from a command line given as program followed by arguments.
    ///
    /// Returns `None` for an empty command.
    #[must_use]
    pub fn from_command(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl MarkdownConverter for CommandConverter {
    fn convert(&self, markdown: &str) -> Result<String, ConvertError> {
        let spawn_error = |source| ConvertError::Spawn {
            program: self.program.clone(),
            source,
        };

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        // stdin is written on its own thread: the child may fill stdout
        // before it has read all input.
        let output = std::thread::scope(|scope| {
            if let Some(mut stdin) = child.stdin.take() {
                scope.spawn(move || {
                    if let Err(err) = stdin.write_all(markdown.as_bytes()) {
                        tracing::debug!(error = %err, "Converter closed stdin early");
                    }
                });
            }
            child.wait_with_output()
        })
        .map_err(spawn_error)?;

        if !output.status.success() {
            return Err(ConvertError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| ConvertError::InvalidOutput {
            program: self.program.clone(),
        })
    }
}

/// Run `command` in `dir`, inheriting stdout and stderr.
pub(crate) fn run_in(command: &[String], dir: &Path) -> Result<(), BuildError> {
    let Some((program, args)) = command.split_first() else {
        return Ok(());
    };

    tracing::info!(program = %program, dir = %dir.display(), "Running command");
    let status = Command::new(program)
        .args(args)
        .current_dir(dir)
        .status()
        .map_err(|source| BuildError::CommandSpawn {
            program: program.clone(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(BuildError::CommandFailed {
            program: program.clone(),
            status: status.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_empty_command_has_no_converter() {
        assert!(CommandConverter::from_command(&[]).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_pipes_markdown_through_program() {
        let converter = CommandConverter::from_command(&command(&["cat"])).unwrap();
        assert_eq!(converter.convert("# Title\n").unwrap(), "# Title\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_is_reported() {
        let converter = CommandConverter::from_command(&command(&["false"])).unwrap();
        let err = converter.convert("text").unwrap_err();
        assert!(matches!(err, ConvertError::Failed { ref program, .. } if program == "false"));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let converter =
            CommandConverter::from_command(&command(&["helpdocs-no-such-converter"])).unwrap();
        assert!(matches!(
            converter.convert("text"),
            Err(ConvertError::Spawn { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_in_uses_directory() {
        let dir = tempfile::tempdir().unwrap();
        run_in(&command(&["touch", "ran"]), dir.path()).unwrap();
        assert!(dir.path().join("ran").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_run_in_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_in(&command(&["false"]), dir.path()).unwrap_err();
        assert!(matches!(err, BuildError::CommandFailed { .. }));
    }
}
