use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::{Config, http::read_json};

use super::{Translation, TranslationRequest, Translator};

/// Client for a LibreTranslate `/translate` endpoint.
#[derive(Debug, Clone)]
pub struct LibreTranslateClient {
    url: String,
    api_key: Option<String>,
    http: Client,
}

#[derive(Debug, Serialize)]
struct LtRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

impl LibreTranslateClient {
    pub fn new(url: impl Into<String>, http: Client) -> Self {
        Self { url: url.into(), api_key: None, http }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn from_config(config: &Config, http: Client) -> Self {
        Self::new(config.translate_url.clone(), http).with_api_key(config.translate_api_key.clone())
    }
}

#[async_trait]
impl Translator for LibreTranslateClient {
    async fn translate(&self, request: &TranslationRequest) -> Result<Translation> {
        let payload = LtRequest {
            q: &request.text,
            source: &request.source,
            target: &request.target,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let res = self
            .http
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .context("Failed to send request to LibreTranslate")?;

        let body = read_json(res, "LibreTranslate").await?;
        let translation = translation_from(&request.text, &body);

        if let Translation::Passthrough { original, reason } = &translation {
            error!(
                text = %original,
                error = reason.as_deref().unwrap_or("none"),
                "Unable to translate \"{original}\""
            );
        }

        Ok(translation)
    }
}

fn translation_from(text: &str, body: &Value) -> Translation {
    match body.get("translatedText").and_then(Value::as_str) {
        Some(translated) => Translation::Translated(translated.to_string()),
        None => Translation::Passthrough {
            original: text.to_string(),
            reason: body.get("error").map(|e| match e {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            }),
        },
    }
}
