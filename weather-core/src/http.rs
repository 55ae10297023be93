//! Helpers shared by the upstream API clients.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Response};
use serde_json::Value;

/// Builds one long-lived HTTP session for an upstream.
pub fn client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build().context("Failed to build HTTP client")
}

/// Reads the body as JSON whatever the status code is.
///
/// Both upstreams answer errors with a JSON payload, and that payload is
/// inspected by the caller. A body that is not JSON at all is an error.
pub(crate) async fn read_json(res: Response, upstream: &str) -> Result<Value> {
    let status = res.status();
    let body = res
        .text()
        .await
        .with_context(|| format!("Failed to read {upstream} response body"))?;

    serde_json::from_str(&body).with_context(|| {
        format!(
            "{upstream} returned a non-JSON body with status {}: {}",
            status,
            truncate_body(&body),
        )
    })
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
