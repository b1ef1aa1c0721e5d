//! Positional-argument process runner.

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;

use tracing::{debug, info};

use crate::error::ExternalError;

/// Run `executable` with positional `args` and wait for it to finish.
///
/// No shell is involved. Each stdout line is logged at `info`; the stdout
/// text is also returned.
///
/// # Errors
///
/// Returns [`ExternalError::Spawn`] if the process cannot be started and
/// [`ExternalError::Stderr`] if it wrote anything other than whitespace to
/// stderr.
pub fn run_positional<I, A>(executable: &Path, args: I) -> Result<String, ExternalError>
where
    I: IntoIterator<Item = A>,
    A: AsRef<OsStr>,
{
    let start = Instant::now();
    let mut command = Command::new(executable);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    debug!(?command, "spawning");

    let output = command.output().map_err(|source| ExternalError::Spawn {
        executable: executable.to_path_buf(),
        source,
    })?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        return Err(ExternalError::Stderr {
            executable: executable.to_path_buf(),
            stderr: stderr.trim().to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    for line in stdout.lines() {
        info!(target: "floodprep_external::output", "{line}");
    }
    info!(
        executable = %executable.display(),
        status = ?output.status.code(),
        elapsed = ?start.elapsed(),
        "external tool finished"
    );
    Ok(stdout)
}
