use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::{Config, Conditions, http::read_json};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, url: impl Into<String>, http: Client) -> Self {
        Self { api_key, url: url.into(), http }
    }

    pub fn from_config(config: &Config, http: Client) -> Result<Self> {
        let api_key = config.weather_api_key()?;
        Ok(Self::new(api_key.to_owned(), config.weather_url.clone(), http))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn get_weather(&self, city: &str) -> Result<Conditions> {
        let res = self
            .http
            .get(&self.url)
            .query(&[("q", city), ("APPID", self.api_key.as_str())])
            .send()
            .await
            .context("Failed to send request to OpenWeather (current weather)")?;

        let body = read_json(res, "OpenWeather").await?;
        let conditions = conditions_from(&body);

        if conditions == Conditions::Unavailable {
            debug!(city, message = ?body.get("message"), "OpenWeather response has no conditions");
        }

        Ok(conditions)
    }
}

/// Picks `weather[0].main` out of a current-weather payload.
fn conditions_from(body: &Value) -> Conditions {
    body.pointer("/weather/0/main")
        .and_then(Value::as_str)
        .map(|main| Conditions::Reported(main.to_string()))
        .unwrap_or(Conditions::Unavailable)
}
