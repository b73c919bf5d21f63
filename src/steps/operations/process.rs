// External tool invocation

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use tracing::{debug, trace};

use crate::error::{ExtractError, Result};

/// Locate an external tool on `PATH`.
pub fn find_tool(name: &str) -> Option<PathBuf> {
    match which::which(name) {
        Ok(path) => Some(path),
        Err(_) => {
            debug!("{} not found on PATH", name);
            None
        }
    }
}

/// Run `cmd` to completion with stdin closed, capturing its output.
pub fn run_captured(cmd: &mut Command) -> Result<Output> {
    trace!("Running {:?}", cmd);
    let program = PathBuf::from(cmd.get_program());
    cmd.stdin(Stdio::null())
        .output()
        .map_err(|e| ExtractError::io(program, e))
}

/// Run `cmd` to completion, answering every interactive prompt with
/// `answer` by feeding it on stdin until the process exits.
pub fn run_answering(cmd: &mut Command, answer: &str) -> Result<Output> {
    trace!("Running {:?} (answering '{}')", cmd, answer);
    let program = PathBuf::from(cmd.get_program());
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ExtractError::io(&program, e))?;

    let feeder = child.stdin.take().map(|mut stdin| {
        let line = format!("{answer}\n");
        // ends once the child closes its end of the pipe
        std::thread::spawn(move || while stdin.write_all(line.as_bytes()).is_ok() {})
    });

    let output = child
        .wait_with_output()
        .map_err(|e| ExtractError::io(&program, e))?;
    if let Some(feeder) = feeder {
        let _ = feeder.join();
    }
    Ok(output)
}
