//! Subprocess capability used by the generator.
//!
//! Every invocation blocks until the child exits, with stdio inherited so the
//! child's output passes straight through to the user. A non-zero exit is an
//! error; the generator never retries.

use anyhow::{Context, Result, bail};
use std::path::Path;
use std::process::Command;

/// Blocking subprocess runner.
pub trait ProcessRunner {
    /// Run `program` with `args`, with `cwd` as working directory.
    fn run(&mut self, program: &str, args: &[&str], cwd: &Path) -> Result<()>;
}

/// [`ProcessRunner`] backed by [`std::process::Command`].
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&mut self, program: &str, args: &[&str], cwd: &Path) -> Result<()> {
        tracing::debug!(program, ?args, cwd = %cwd.display(), "spawning subprocess");
        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .status()
            .with_context(|| format!("Failed to run '{}'", program))?;
        if !status.success() {
            bail!("'{}' exited with {}", program, status);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_zero_exit_is_ok() {
        let dir = TempDir::new().unwrap();
        SystemRunner.run("sh", &["-c", "exit 0"], dir.path()).unwrap();
    }

    #[test]
    fn test_nonzero_exit_is_error() {
        let dir = TempDir::new().unwrap();
        let result = SystemRunner.run("sh", &["-c", "exit 3"], dir.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("'sh' exited"));
    }

    #[test]
    fn test_missing_program_is_error() {
        let dir = TempDir::new().unwrap();
        let result = SystemRunner.run("definitely-not-a-real-program", &[], dir.path());
        assert!(result.is_err());
    }
}
