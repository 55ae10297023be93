use async_trait::async_trait;
use std::fmt::Debug;

pub mod libretranslate;

pub use libretranslate::LibreTranslateClient;

/// Text to translate plus the language pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub source: String,
    pub target: String,
}

impl TranslationRequest {
    /// Auto-detected source language, English target.
    pub fn to_english(text: impl Into<String>) -> Self {
        Self { text: text.into(), source: "auto".to_string(), target: "en".to_string() }
    }
}

/// Outcome of a translation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    Translated(String),
    /// The service gave no translation; the input is used as is.
    Passthrough { original: String, reason: Option<String> },
}

impl Translation {
    pub fn into_text(self) -> String {
        match self {
            Translation::Translated(text) => text,
            Translation::Passthrough { original, .. } => original,
        }
    }

    pub fn is_passthrough(&self) -> bool {
        matches!(self, Translation::Passthrough { .. })
    }
}

/// Best-effort machine translation.
///
/// A response without a translation is `Ok(Translation::Passthrough)`;
/// `Err` is reserved for transport failures.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    async fn translate(&self, request: &TranslationRequest) -> anyhow::Result<Translation>;
}
