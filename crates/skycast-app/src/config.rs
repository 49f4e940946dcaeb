//! Application configuration.
//!
//! Read from the environment only; nothing is persisted across runs.

/// Environment variables checked for the OpenWeather API key, in order.
const API_KEY_VARS: [&str; 2] = ["SKYCAST_API_KEY", "OPENWEATHER_API_KEY"];

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// OpenWeather API key. May be empty, in which case every fetch will
    /// be rejected by the provider and surfaced as an error dialog.
    pub api_key: String,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            window_width: 800.0,
            window_height: 600.0,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api_key = API_KEY_VARS
            .iter()
            .find_map(|var| std::env::var(var).ok())
            .unwrap_or_default();

        if api_key.is_empty() {
            tracing::warn!(
                "no OpenWeather API key set ({}); fetches will fail",
                API_KEY_VARS.join(" or ")
            );
        }

        Self {
            api_key,
            ..Self::default()
        }
    }
}
