use serde::{Deserialize, Serialize};

/// Returned in place of a condition when the provider response has none.
pub const NO_DATA: &str = "No data available";

/// Outcome of a weather lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conditions {
    /// `weather[0].main` as reported by the provider, e.g. "Clouds".
    Reported(String),
    /// The response carried no condition at the expected path.
    Unavailable,
}

impl Conditions {
    pub fn as_str(&self) -> &str {
        match self {
            Conditions::Reported(main) => main,
            Conditions::Unavailable => NO_DATA,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Conditions::Reported(main) => main,
            Conditions::Unavailable => NO_DATA.to_string(),
        }
    }
}

impl std::fmt::Display for Conditions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a successful `/weather` response.
///
/// `city` echoes the caller's input, not the translated form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub weather: String,
}

/// One row of the `requests` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct RequestRecord {
    pub date: String,
    pub city: String,
    pub weather: String,
}
