//! One-shot handler: execute source once and print the captured output.

use anyhow::{Context, Result};

use crate::{
    config::Config,
    execution::{ExecuteRequest, ExecuteResponse, ExecutionClient},
    languages::LanguageOption,
    printer::TextPrinter,
};

pub async fn run(cfg: &Config, language: LanguageOption, source: String) -> Result<()> {
    let client = ExecutionClient::from_config(cfg).context("failed to build execution client")?;
    let request = ExecuteRequest::new(&language, source);
    tracing::info!(language = language.language, version = language.version, "one-shot run");

    let response = client
        .execute(&request)
        .await
        .with_context(|| format!("running {} {} failed", language.language, language.version))?;

    print_response(&response);
    Ok(())
}

fn print_response(response: &ExecuteResponse) {
    if let Some(compile) = &response.compile {
        if compile.failed() {
            let warn = TextPrinter::new("yellow");
            for line in trimmed_lines(&compile.output) {
                warn.eprint(line);
            }
        }
    }

    if let Some(run) = &response.run {
        let plain = TextPrinter::default();
        for line in trimmed_lines(&run.output) {
            plain.print(line);
        }
    }

    if let Some(status) = exit_summary(response) {
        TextPrinter::new("red").eprint(&status);
    }
}

/// Output lines without the empty entry a trailing newline produces.
fn trimmed_lines(output: &str) -> Vec<&str> {
    if output.is_empty() {
        return Vec::new();
    }
    output.strip_suffix('\n').unwrap_or(output).split('\n').collect()
}

/// Describe a failed compile or an abnormal exit, if any.
fn exit_summary(response: &ExecuteResponse) -> Option<String> {
    let stage = response.shown_stage()?;
    let verb = if response.compile_failed() { "compilation" } else { "program" };
    match (&stage.signal, stage.code) {
        (Some(signal), _) => Some(format!("{verb} terminated by {signal}")),
        (None, Some(code)) if code != 0 => Some(format!("{verb} exited with code {code}")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(run: serde_json::Value) -> ExecuteResponse {
        serde_json::from_value(serde_json::json!({ "run": run })).unwrap()
    }

    #[test]
    fn trailing_newline_is_not_an_extra_line() {
        assert_eq!(trimmed_lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(trimmed_lines("a\n\nb"), vec!["a", "", "b"]);
        assert!(trimmed_lines("").is_empty());
    }

    #[test]
    fn exit_summary_reports_failures_only() {
        assert_eq!(exit_summary(&response(serde_json::json!({"output": "", "code": 0}))), None);
        assert_eq!(
            exit_summary(&response(serde_json::json!({"output": "", "code": 1}))).as_deref(),
            Some("program exited with code 1")
        );
        assert_eq!(
            exit_summary(&response(serde_json::json!({"output": "", "code": null, "signal": "SIGKILL"}))).as_deref(),
            Some("program terminated by SIGKILL")
        );
    }

    #[test]
    fn compile_failure_is_summarised_without_a_run() {
        let response: ExecuteResponse = serde_json::from_value(serde_json::json!({
            "language": "java",
            "version": "15.0.2",
            "compile": {"stdout": "", "stderr": "Main.java:1: error", "code": 1, "signal": null, "output": "Main.java:1: error\n"}
        }))
        .unwrap();
        let response = response.validate().unwrap();
        assert_eq!(exit_summary(&response).as_deref(), Some("compilation exited with code 1"));
        print_response(&response);
    }
}
