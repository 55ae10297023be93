use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, instrument};

use crate::{
    RequestLog, WeatherReport,
    provider::WeatherProvider,
    translate::{TranslationRequest, Translator},
};

/// Translate, look up, record. One call per inbound request.
#[derive(Debug, Clone)]
pub struct WeatherService {
    translator: Arc<dyn Translator>,
    provider: Arc<dyn WeatherProvider>,
    log: RequestLog,
}

impl WeatherService {
    pub fn new(
        translator: Arc<dyn Translator>,
        provider: Arc<dyn WeatherProvider>,
        log: RequestLog,
    ) -> Self {
        Self { translator, provider, log }
    }

    pub fn request_log(&self) -> &RequestLog {
        &self.log
    }

    /// Runs the three steps in order. The log gets the English city name,
    /// the report echoes `city` as given.
    #[instrument(skip(self))]
    pub async fn lookup(&self, city: &str) -> Result<WeatherReport> {
        let translation = self.translator.translate(&TranslationRequest::to_english(city)).await?;
        let passthrough = translation.is_passthrough();
        let city_en = translation.into_text();
        debug!(city_en = %city_en, passthrough, "translated");

        let weather = self.provider.get_weather(&city_en).await?.into_string();

        self.log.record(&city_en, &weather).await?;

        Ok(WeatherReport { city: city.to_string(), weather })
    }
}
