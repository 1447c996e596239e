//! Remote code execution: wire types, errors and the Piston client.

use serde::{Deserialize, Serialize};

use crate::languages::LanguageOption;

pub mod piston;

pub use piston::ExecutionClient;

/// Body of `POST /execute`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecuteRequest {
    pub language: String,
    pub version: String,
    pub files: Vec<SourceFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    pub content: String,
}

impl ExecuteRequest {
    pub fn new(option: &LanguageOption, content: impl Into<String>) -> Self {
        Self {
            language: option.language.to_string(),
            version: option.version.to_string(),
            files: vec![SourceFile { content: content.into() }],
        }
    }
}

/// Response of `POST /execute`.
///
/// A failed compile skips the run stage, so `run` is absent in that case.
/// [`ExecuteResponse::validate`] rejects bodies that carry neither.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteResponse {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub run: Option<Stage>,
    #[serde(default)]
    pub compile: Option<Stage>,
}

/// Captured result of one stage (compile or run).
#[derive(Debug, Clone, Deserialize)]
pub struct Stage {
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    pub output: String,
    #[serde(default)]
    pub code: Option<i32>,
    #[serde(default)]
    pub signal: Option<String>,
}

impl Stage {
    /// Non-zero exit or killed by a signal.
    pub fn failed(&self) -> bool {
        self.signal.is_some() || self.code.unwrap_or(0) != 0
    }
}

impl ExecuteResponse {
    /// Accept a run result, or a compile failure that stopped before running.
    pub fn validate(self) -> Result<Self, ExecutionError> {
        if self.run.is_some() || self.compile_failed() {
            return Ok(self);
        }
        let reason = if self.compile.is_some() {
            "compile succeeded but no run stage was returned"
        } else {
            "response has neither a run nor a compile stage"
        };
        Err(ExecutionError::MalformedResponse(reason.into()))
    }

    /// True when compilation failed and nothing was run.
    pub fn compile_failed(&self) -> bool {
        self.run.is_none() && self.compile.as_ref().is_some_and(Stage::failed)
    }

    /// Stage whose output is shown: the run, else the failed compile.
    pub fn shown_stage(&self) -> Option<&Stage> {
        self.run.as_ref().or(self.compile.as_ref())
    }

    /// Shown stage's combined output split on `\n`, one entry per line.
    pub fn output_lines(&self) -> Vec<String> {
        self.shown_stage()
            .map(|stage| stage.output.split('\n').map(str::to_string).collect())
            .unwrap_or_default()
    }
}

/// Entry of `GET /runtimes`.
#[derive(Debug, Clone, Deserialize)]
pub struct Runtime {
    pub language: String,
    pub version: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub runtime: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("execution request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("execution service returned {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("unexpected response from execution service: {0}")]
    MalformedResponse(String),
}
