//! Reqwest client for the Piston execution API.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{ExecuteRequest, ExecuteResponse, ExecutionError, Runtime};
use crate::config::Config;

#[derive(Debug, Clone)]
pub struct ExecutionClient {
    http: Client,
    base: String,
}

impl ExecutionClient {
    pub fn from_config(cfg: &Config) -> Result<Self, ExecutionError> {
        Self::new(cfg.api_url(), cfg.request_timeout())
    }

    pub fn new(base: impl Into<String>, timeout: Duration) -> Result<Self, ExecutionError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ExecutionError::Client)?;
        let base = base.into().trim_end_matches('/').to_string();
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Submit source for execution. Failures are logged here and returned to the caller.
    pub async fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteResponse, ExecutionError> {
        let url = format!("{}/execute", self.base);
        let result = self
            .post_json::<ExecuteResponse>(&url, request)
            .await
            .and_then(ExecuteResponse::validate);
        match &result {
            Ok(resp) => tracing::debug!(
                language = %resp.language,
                version = %resp.version,
                compile_failed = resp.compile_failed(),
                code = ?resp.shown_stage().and_then(|s| s.code),
                stdout_bytes = resp.shown_stage().map_or(0, |s| s.stdout.len()),
                stderr_bytes = resp.shown_stage().map_or(0, |s| s.stderr.len()),
                "execution finished"
            ),
            Err(err) => tracing::error!(
                error = %err,
                language = %request.language,
                version = %request.version,
                "execution request failed"
            ),
        }
        result
    }

    /// Runtimes currently installed on the service.
    pub async fn runtimes(&self) -> Result<Vec<Runtime>, ExecutionError> {
        let url = format!("{}/runtimes", self.base);
        let result: Result<Vec<Runtime>, ExecutionError> = self.get_json(&url).await;
        if let Err(err) = &result {
            tracing::error!(error = %err, "runtime listing failed");
        }
        result
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ExecutionError> {
        let resp = self.http.get(url).send().await?;
        read_body(resp).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        body: &ExecuteRequest,
    ) -> Result<T, ExecutionError> {
        let resp = self.http.post(url).json(body).send().await?;
        read_body(resp).await
    }
}

async fn read_body<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ExecutionError> {
    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        return Err(ExecutionError::Status { status, message: error_message(&text) });
    }
    serde_json::from_str(&text).map_err(|e| ExecutionError::MalformedResponse(e.to_string()))
}

/// Piston reports failures as `{"message": "..."}`; fall back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::languages;
    use mockito::Matcher;

    fn client_for(server: &mockito::ServerGuard) -> ExecutionClient {
        ExecutionClient::new(server.url(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn execute_posts_request_and_parses_output() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/execute")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(serde_json::json!({
                "language": "python",
                "version": "3.10.0",
                "files": [{ "content": "print('a')" }]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"language":"python","version":"3.10.0","run":{"stdout":"a\n","stderr":"","code":0,"signal":null,"output":"a\n"}}"#,
            )
            .create_async()
            .await;

        let opt = languages::find("python").unwrap();
        let resp = client_for(&server)
            .execute(&ExecuteRequest::new(&opt, "print('a')"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(resp.language, "python");
        assert_eq!(resp.run.as_ref().and_then(|r| r.code), Some(0));
        assert_eq!(resp.output_lines(), vec!["a", ""]);
    }

    #[tokio::test]
    async fn non_success_status_carries_service_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/execute")
            .with_status(400)
            .with_body(r#"{"message":"runtime is unknown"}"#)
            .create_async()
            .await;

        let opt = languages::default_option();
        let err = client_for(&server)
            .execute(&ExecuteRequest::new(&opt, ""))
            .await
            .unwrap_err();

        match err {
            ExecutionError::Status { status, message } => {
                assert_eq!(status.as_u16(), 400);
                assert_eq!(message, "runtime is unknown");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unexpected_shape_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/execute")
            .with_status(200)
            .with_body(r#"{"language":"javascript","version":"18.15.0"}"#)
            .create_async()
            .await;

        let opt = languages::default_option();
        let err = client_for(&server)
            .execute(&ExecuteRequest::new(&opt, "1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExecutionError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn compile_failure_is_returned_with_compiler_output() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/execute")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"language":"java","version":"15.0.2","compile":{"stdout":"","stderr":"Main.java:1: error: class, interface, or enum expected","code":1,"signal":null,"output":"Main.java:1: error: class, interface, or enum expected\n1 error\n"}}"#)
            .create_async()
            .await;

        let opt = languages::find("java").unwrap();
        let resp = client_for(&server)
            .execute(&ExecuteRequest::new(&opt, "oops"))
            .await
            .unwrap();

        assert!(resp.compile_failed());
        assert!(resp.run.is_none());
        assert_eq!(
            resp.output_lines(),
            vec!["Main.java:1: error: class, interface, or enum expected", "1 error", ""]
        );
    }

    #[tokio::test]
    async fn unreachable_service_is_transport_error() {
        let client = ExecutionClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let opt = languages::default_option();
        let err = client.execute(&ExecuteRequest::new(&opt, "1")).await.unwrap_err();
        assert!(matches!(err, ExecutionError::Transport(_)));
    }

    #[tokio::test]
    async fn runtimes_are_listed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/runtimes")
            .with_status(200)
            .with_body(r#"[{"language":"python","version":"3.10.0","aliases":["py","py3"]},{"language":"javascript","version":"18.15.0","aliases":["node-js"],"runtime":"node"}]"#)
            .create_async()
            .await;

        let runtimes = client_for(&server).runtimes().await.unwrap();
        assert_eq!(runtimes.len(), 2);
        assert_eq!(runtimes[0].aliases, vec!["py", "py3"]);
        assert_eq!(runtimes[1].runtime.as_deref(), Some("node"));
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let client = ExecutionClient::new("http://localhost:2000/api/v2/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:2000/api/v2");
    }

    #[test]
    fn error_message_prefers_message_field() {
        assert_eq!(error_message(r#"{"message":"nope"}"#), "nope");
        assert_eq!(error_message(" plain text \n"), "plain text");
    }
}
