//! External injury-type classifier adapter.
//!
//! The probabilistic classifier is a pre-trained model living in a separate
//! process. The adapter launches it once per request, passes the serialized
//! normalized report as a single argument, and reads one line of output naming
//! an injury-type label. The whole invocation races a hard deadline; three
//! terminal events are possible and exactly one of them resolves the outcome:
//!
//! 1. clean exit with output  -> `Succeeded`
//! 2. launch error, non-zero exit or empty output -> `Failed`
//! 3. deadline elapsed -> `TimedOut`, process forcibly terminated
//!
//! The adapter never retries and never surfaces an error to the caller; the
//! override engine downstream turns any non-success into the zone-derived
//! fallback path.

use crate::{ClassifierConfig, ClassifierOutcome, FailureReason, InjuryType, SymptomReport};
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Adapter around the out-of-process classifier
#[derive(Clone, Debug)]
pub struct ClassifierAdapter {
    command: String,
    script: PathBuf,
    deadline: Duration,
}

impl ClassifierAdapter {
    /// Create an adapter with an explicit command, script and deadline
    pub fn new(
        command: impl Into<String>,
        script: impl Into<PathBuf>,
        deadline: Duration,
    ) -> Self {
        Self {
            command: command.into(),
            script: script.into(),
            deadline,
        }
    }

    /// Create an adapter from the classifier configuration section
    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(&config.command, &config.script, config.deadline())
    }

    /// The configured deadline for a single invocation
    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Invoke the classifier once for the given report.
    ///
    /// Returns within the deadline plus scheduling epsilon on every path.
    /// On timeout the child is force-killed so no process leaks across
    /// requests: `kill_on_drop` ties termination to dropping the wait future.
    pub async fn classify(&self, report: &SymptomReport) -> ClassifierOutcome {
        let payload = match serde_json::to_string(report) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("Failed to encode classifier payload: {}", e);
                return ClassifierOutcome::Failed(FailureReason::Launch(e.to_string()));
            }
        };

        let mut command = Command::new(&self.command);
        command
            .arg(&self.script)
            .arg(payload)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!(
                    "Failed to launch classifier {:?} {:?}: {}",
                    self.command,
                    self.script,
                    e
                );
                return ClassifierOutcome::Failed(FailureReason::Launch(e.to_string()));
            }
        };

        match tokio::time::timeout(self.deadline, child.wait_with_output()).await {
            // Deadline elapsed: the wait future (owning the child) is dropped
            // here, which kills the process.
            Err(_) => {
                tracing::warn!(
                    "Classifier exceeded {:?} deadline, process terminated",
                    self.deadline
                );
                ClassifierOutcome::TimedOut
            }

            Ok(Err(e)) => {
                tracing::warn!("Classifier wait failed: {}", e);
                ClassifierOutcome::Failed(FailureReason::Launch(e.to_string()))
            }

            Ok(Ok(output)) => {
                if !output.status.success() {
                    let code = output.status.code().unwrap_or(-1);
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    tracing::warn!(
                        "Classifier exited with status {}: {}",
                        code,
                        stderr.trim()
                    );
                    return ClassifierOutcome::Failed(FailureReason::NonZeroExit(code));
                }

                let stdout = String::from_utf8_lossy(&output.stdout);
                let label = stdout.lines().next().map(str::trim).unwrap_or("");
                if label.is_empty() {
                    tracing::warn!("Classifier exited cleanly but produced no label");
                    return ClassifierOutcome::Failed(FailureReason::EmptyOutput);
                }

                let injury = parse_label(label);
                tracing::info!("Classifier suggested {:?} (raw label {:?})", injury, label);
                ClassifierOutcome::Succeeded(injury)
            }
        }
    }
}

/// Parse a textual label from the classifier's output line.
///
/// Accepts English labels and the labels the original model emits in Spanish.
/// Anything unrecognized degrades to `Other`.
fn parse_label(label: &str) -> InjuryType {
    let label = label.trim().to_lowercase();
    if label.contains("esguince") || label.contains("sprain") {
        InjuryType::Sprain
    } else if label.contains("desgarr") || label.contains("strain") || label.contains("tear") {
        InjuryType::Strain
    } else if label.contains("fractur") {
        InjuryType::Fracture
    } else if label.contains("luxaci") || label.contains("dislocation") {
        InjuryType::Dislocation
    } else {
        InjuryType::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn stub_script(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("classifier.sh");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        path
    }

    fn test_report() -> SymptomReport {
        let payload = serde_json::json!({
            "pain_level": 5,
            "pain_zone": "ankle",
            "pain_duration_days": 2
        });
        crate::normalize::normalize(&payload).unwrap()
    }

    fn adapter(script: &Path, deadline_ms: u64) -> ClassifierAdapter {
        ClassifierAdapter::new("/bin/sh", script, Duration::from_millis(deadline_ms))
    }

    #[tokio::test]
    async fn test_successful_label() {
        let dir = tempfile::tempdir().unwrap();
        let script = stub_script(dir.path(), "echo Sprain");

        let outcome = adapter(&script, 2_000).classify(&test_report()).await;
        assert_eq!(outcome, ClassifierOutcome::Succeeded(InjuryType::Sprain));
    }

    #[tokio::test]
    async fn test_spanish_label() {
        let dir = tempfile::tempdir().unwrap();
        let script = stub_script(dir.path(), "echo 'Luxación'");

        let outcome = adapter(&script, 2_000).classify(&test_report()).await;
        assert_eq!(
            outcome,
            ClassifierOutcome::Succeeded(InjuryType::Dislocation)
        );
    }

    #[tokio::test]
    async fn test_only_first_line_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let script = stub_script(dir.path(), "echo Fracture; echo debug noise");

        let outcome = adapter(&script, 2_000).classify(&test_report()).await;
        assert_eq!(outcome, ClassifierOutcome::Succeeded(InjuryType::Fracture));
    }

    #[tokio::test]
    async fn test_deadline_elapsed_is_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let script = stub_script(dir.path(), "sleep 5; echo Sprain");

        let start = std::time::Instant::now();
        let outcome = adapter(&script, 200).classify(&test_report()).await;
        let elapsed = start.elapsed();

        assert_eq!(outcome, ClassifierOutcome::TimedOut);
        // Must resolve within deadline + small epsilon, never hang on the child
        assert!(
            elapsed < Duration::from_secs(2),
            "took {:?}, expected prompt timeout",
            elapsed
        );
    }

    #[tokio::test]
    async fn test_missing_binary_is_launch_failure() {
        let dir = tempfile::tempdir().unwrap();
        let script = stub_script(dir.path(), "echo Sprain");

        let adapter = ClassifierAdapter::new(
            "/nonexistent/interpreter",
            &script,
            Duration::from_millis(500),
        );

        match adapter.classify(&test_report()).await {
            ClassifierOutcome::Failed(FailureReason::Launch(_)) => {}
            other => panic!("Expected launch failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_failure() {
        let dir = tempfile::tempdir().unwrap();
        let script = stub_script(dir.path(), "echo 'model blew up' >&2; exit 3");

        let outcome = adapter(&script, 2_000).classify(&test_report()).await;
        assert_eq!(
            outcome,
            ClassifierOutcome::Failed(FailureReason::NonZeroExit(3))
        );
    }

    #[tokio::test]
    async fn test_empty_output_is_failure() {
        let dir = tempfile::tempdir().unwrap();
        let script = stub_script(dir.path(), "exit 0");

        let outcome = adapter(&script, 2_000).classify(&test_report()).await;
        assert_eq!(
            outcome,
            ClassifierOutcome::Failed(FailureReason::EmptyOutput)
        );
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!(parse_label("Esguince"), InjuryType::Sprain);
        assert_eq!(parse_label("Desgarre"), InjuryType::Strain);
        assert_eq!(parse_label("muscle strain"), InjuryType::Strain);
        assert_eq!(parse_label("Fractura"), InjuryType::Fracture);
        assert_eq!(parse_label("fracture"), InjuryType::Fracture);
        assert_eq!(parse_label("luxacion"), InjuryType::Dislocation);
        assert_eq!(parse_label("Otra lesión"), InjuryType::Other);
        assert_eq!(parse_label("gibberish"), InjuryType::Other);
    }
}
