//! Invocation of the external go doc generator.

use std::fmt;
use std::process::Command;
use tracing::debug;

/// The generator failed: either go could not be run at all, or go doc
/// exited non-zero. Carries the process's own diagnostic output so the
/// user sees exactly what go doc said.
#[derive(Debug)]
pub struct GeneratorError {
    pub problem: String,
    pub output: String,
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n{}", self.problem, self.output)
    }
}

/// Run go doc with the given pass-through arguments and return its
/// documentation text. The process runs to completion and is fully
/// buffered before any repair or rendering begins.
pub fn invoke(arguments: &[String]) -> Result<String, GeneratorError> {
    let mut command = Command::new("go");
    command
        .arg("doc")
        .args(arguments);
    run(command)
}

fn run(mut command: Command) -> Result<String, GeneratorError> {
    debug!(?command);

    let output = command
        .output()
        .map_err(|error| GeneratorError {
            problem: format!("failed to run {:?}: {}", command.get_program(), error),
            output: String::new(),
        })?;

    if !output.status.success() {
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        return Err(GeneratorError {
            problem: output
                .status
                .to_string(),
            output: combined,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
