//! Fallible ambient operations for the harness: scenario loading and
//! execution. `fmrt-core::step` itself never fails; this error type exists
//! entirely around it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("failed to parse scenario file {path}: {source}")]
    ScenarioParse { path: String, #[source] source: serde_json::Error },
    #[error("failed to read scenario file {path}: {source}")]
    ScenarioIo { path: String, #[source] source: std::io::Error },
    #[error("scenario {name} failed assertion at step {step}: {detail}")]
    AssertionFailed { name: String, step: usize, detail: String },
}
