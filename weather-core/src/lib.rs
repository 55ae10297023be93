//! Core library for the translated weather lookup service.
//!
//! This crate defines:
//! - Configuration handling
//! - Clients for the translation and weather upstreams
//! - The append-only request log
//! - The lookup orchestration used by `weather-server`
//!
//! Upstream clients are traits so the service can be wired with substitutes in tests.

pub mod config;
pub mod http;
pub mod model;
pub mod provider;
pub mod service;
pub mod store;
pub mod translate;

pub use config::{Config, LogFormat};
pub use model::{Conditions, NO_DATA, RequestRecord, WeatherReport};
pub use provider::{OpenWeatherProvider, WeatherProvider};
pub use service::WeatherService;
pub use store::RequestLog;
pub use translate::{LibreTranslateClient, Translation, TranslationRequest, Translator};
