use std::process::Output;

/// Summary of a step that did something worth reporting.
///
/// Modeled on a captured process result so subprocess-backed steps and
/// helpers can accumulate their tool output into it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Files or entries the step produced, removed or processed.
    pub items: Vec<String>,
    /// Highest exit code of any tool the step ran (0 if none).
    pub return_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl StepReport {
    pub fn succeeded(&self) -> bool {
        self.return_code == 0
    }

    /// Fold a finished process into the report.
    pub fn absorb(&mut self, output: &Output) {
        self.stdout.push_str(&String::from_utf8_lossy(&output.stdout));
        self.stderr.push_str(&String::from_utf8_lossy(&output.stderr));
        let code = output.status.code().unwrap_or(-1);
        if code != 0 && (self.return_code == 0 || code > self.return_code) {
            self.return_code = code;
        }
    }
}
