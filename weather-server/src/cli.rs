use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use weather_core::{Config, RequestLog};

use crate::{app, logging};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Translated weather lookup service")]
pub struct Cli {
    /// Config file; defaults to the platform config directory.
    #[arg(long, global = true, env = "WEATHER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: Overrides,

    /// Defaults to `serve`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Values that take precedence over the config file.
#[derive(Debug, Args)]
pub struct Overrides {
    #[arg(long, global = true, env = "WEATHER_LISTEN_HOST")]
    pub listen_host: Option<String>,

    #[arg(long, global = true, env = "WEATHER_LISTEN_PORT")]
    pub listen_port: Option<u16>,

    #[arg(long, global = true, env = "WEATHER_DB_PATH")]
    pub db_path: Option<PathBuf>,

    #[arg(long, global = true, env = "WEATHER_API_KEY", hide_env_values = true)]
    pub weather_api_key: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP service.
    Serve,

    /// Store the weather API key in the config file.
    Configure {
        /// Prompted for when omitted.
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Print the most recent logged requests.
    History {
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
}

impl Overrides {
    fn apply(self, config: &mut Config) {
        if let Some(host) = self.listen_host {
            config.listen_host = host;
        }
        if let Some(port) = self.listen_port {
            config.listen_port = port;
        }
        if let Some(db_path) = self.db_path {
            config.db_path = db_path;
        }
        if let Some(key) = self.weather_api_key {
            config.weather_api_key = Some(key);
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let path = match self.config {
            Some(path) => path,
            None => Config::config_file_path()?,
        };
        let mut config = Config::load_from(&path)?;

        match self.command.unwrap_or(Command::Serve) {
            Command::Serve => {
                self.overrides.apply(&mut config);
                logging::init_tracing(&config)?;
                app::serve(config).await?;
            }
            Command::Configure { api_key } => {
                let api_key = match api_key {
                    Some(key) => key,
                    None => inquire::Password::new("OpenWeather API key:")
                        .without_confirmation()
                        .prompt()
                        .context("Failed to read API key")?,
                };

                config.weather_api_key = Some(api_key.trim().to_string());
                config.save_to(&path)?;
                println!("Saved configuration to {}", path.display());
            }
            Command::History { limit } => {
                self.overrides.apply(&mut config);
                let log = RequestLog::new(&config.db_path);
                for record in log.records(limit).await? {
                    println!("{}\t{}\t{}", record.date, record.city, record.weather);
                }
            }
        }

        Ok(())
    }
}
