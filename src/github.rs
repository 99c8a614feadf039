//! GitHub check-run reporting.
//!
//! A snapshot build is announced by creating a check run on the built
//! commit. The request goes through [`CheckRunTransport`] so the command can
//! be driven without a network in tests.

use std::io::Write;

use serde::Serialize;

use crate::error::{
    Result,
    SnapshotError,
};

/// Default GitHub REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default check-run name.
pub const DEFAULT_CHECK_NAME: &str = "Snapshot Build Output";

const ACCEPT_GITHUB_JSON: &str = "application/vnd.github.v3+json";

/// Body of `POST /repos/{owner}/{repo}/check-runs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckRunPayload {
    pub name: String,
    pub head_sha: String,
    pub conclusion: String,
    pub output: CheckRunOutput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckRunOutput {
    pub title: String,
    pub summary: String,
}

impl CheckRunPayload {
    /// Build the successful snapshot check run for `head_sha`.
    ///
    /// The summary names the snapshot version and appends `document`
    /// verbatim below a rule; an empty document leaves that section empty.
    pub fn snapshot(name: &str, head_sha: &str, version: &str, document: &str) -> Self {
        Self {
            name: name.to_string(),
            head_sha: head_sha.to_string(),
            conclusion: "success".to_string(),
            output: CheckRunOutput {
                title: format!("Snapshot build ({})", version),
                summary: format!(
                    "snapshot version: `{}`\n\n------\n\n\n{}",
                    version, document
                ),
            },
        }
    }
}

/// Endpoint creating check runs in `owner/repo`.
pub fn check_runs_endpoint(api_url: &str, owner: &str, repo: &str) -> String {
    format!(
        "{}/repos/{}/{}/check-runs",
        api_url.trim_end_matches('/'),
        owner,
        repo
    )
}

/// A fully prepared check-run request.
#[derive(Debug, Clone)]
pub struct CheckRunRequest {
    pub endpoint: String,
    pub token: String,
    pub payload: CheckRunPayload,
}

/// What came back from the API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckRunResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl CheckRunResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends check-run requests.
pub trait CheckRunTransport {
    /// Send `request` once. Connection-level failures are errors; any HTTP
    /// status, successful or not, is returned as a response.
    fn post_check_run(&self, request: &CheckRunRequest) -> Result<CheckRunResponse>;
}

/// reqwest-backed transport.
///
/// Owns the tokio runtime driving the client. Dropping the transport shuts
/// both down, whichever way the caller leaves.
pub struct HttpTransport {
    runtime: tokio::runtime::Runtime,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> anyhow::Result<Self> {
        use anyhow::Context;

        let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("cargo-snapshot-release/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { runtime, client })
    }
}

impl CheckRunTransport for HttpTransport {
    fn post_check_run(&self, request: &CheckRunRequest) -> Result<CheckRunResponse> {
        let body = serde_json::to_string(&request.payload)?;
        let network = |source: reqwest::Error| SnapshotError::Network {
            endpoint: request.endpoint.clone(),
            source,
        };

        self.runtime.block_on(async move {
            let response = self
                .client
                .post(&request.endpoint)
                .header(
                    reqwest::header::AUTHORIZATION,
                    format!("Bearer {}", request.token),
                )
                .header(reqwest::header::ACCEPT, ACCEPT_GITHUB_JSON)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await
                .map_err(network)?;

            let status = response.status().as_u16();
            let body = response.bytes().await.map_err(network)?;

            Ok::<_, SnapshotError>(CheckRunResponse {
                status,
                body: body.to_vec(),
            })
        })
    }
}

/// Echo a response body to `out`.
///
/// The body is written verbatim. An empty body is replaced by two blank
/// lines so the CI log still shows where the response would have been.
pub fn echo_response(out: &mut dyn Write, body: &[u8]) -> std::io::Result<()> {
    if body.is_empty() {
        writeln!(out)?;
        writeln!(out)?;
    } else {
        out.write_all(body)?;
    }
    out.flush()
}
