use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use weather_core::{
    Config, LibreTranslateClient, OpenWeatherProvider, RequestLog, WeatherService, http,
};

use crate::routes;

/// Wires the service from config: one HTTP session per upstream, one request log.
pub fn build_service(config: &Config) -> Result<WeatherService> {
    let weather_http = http::client(config.upstream_timeout())?;
    let translate_http = http::client(config.upstream_timeout())?;

    let provider = OpenWeatherProvider::from_config(config, weather_http)?;
    let translator = LibreTranslateClient::from_config(config, translate_http);

    Ok(WeatherService::new(
        Arc::new(translator),
        Arc::new(provider),
        RequestLog::new(&config.db_path),
    ))
}

/// Prepares the request log, binds the listener and serves until the process is killed.
pub async fn serve(config: Config) -> Result<()> {
    let service = build_service(&config)?;
    service.request_log().ensure_schema().await?;

    let addr = config.listen_addr();
    let listener = TcpListener::bind(addr.as_str())
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(
        addr = %addr,
        db_path = %service.request_log().path().display(),
        "weather server listening"
    );

    axum::serve(listener, routes::router(service)).await.context("HTTP server error")?;

    Ok(())
}
