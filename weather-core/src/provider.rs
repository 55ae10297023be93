use crate::Conditions;
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Source of current weather conditions for a city.
///
/// A response that lacks the condition field is `Ok(Conditions::Unavailable)`;
/// `Err` is reserved for transport failures.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(&self, city: &str) -> anyhow::Result<Conditions>;
}
