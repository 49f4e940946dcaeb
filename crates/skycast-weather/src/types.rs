use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder shown in the city selector before the user picks anything.
/// A fetch request carrying this value (or a blank string) is refused
/// without touching the network.
pub const CITY_PROMPT: &str = "Enter or select a city";

/// Upper bound on distinct forecast days kept from one provider response.
pub const MAX_FORECAST_DAYS: usize = 5;

/// One day's reduced weather summary.
///
/// Immutable once constructed; a new fetch replaces the whole sample list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub date: NaiveDate,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity, percent.
    pub humidity: u8,
    /// Short text condition, e.g. "light rain".
    pub description: String,
}

/// A reduced forecast for one city: at most [`MAX_FORECAST_DAYS`] samples,
/// one per distinct calendar day, in the order the provider returned them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub city: String,
    pub samples: Vec<ForecastSample>,
}

impl Forecast {
    /// One display line per sample, in fetch order.
    pub fn display_lines(&self) -> Vec<String> {
        self.samples
            .iter()
            .map(|s| {
                format!(
                    "Date: {}, Temp: {:.1}°C, Humidity: {}%, Condition: {}",
                    s.date.format("%Y-%m-%d"),
                    s.temperature,
                    s.humidity,
                    s.description
                )
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Forecast fetching errors.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Blank city or the untouched selector placeholder.
    #[error("no city selected")]
    InvalidCity,

    /// The provider reported an unknown-location status for this city.
    #[error("city not found: {0}")]
    NotFound(String),

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Parse(String),
}

impl WeatherError {
    /// Message suitable for a user-facing dialog.
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::InvalidCity => {
                "Please enter or select a valid city name.".to_string()
            }
            WeatherError::NotFound(city) => format!("City not found: {city}"),
            WeatherError::Transport(e) => format!("Network error: {e}"),
            WeatherError::Parse(_) => "An unexpected error occurred. Please try again.".to_string(),
        }
    }

    /// Input errors get a warning dialog; everything else an error dialog.
    pub fn is_input_error(&self) -> bool {
        matches!(self, WeatherError::InvalidCity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(day: u32) -> ForecastSample {
        ForecastSample {
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            temperature: 21.5,
            humidity: 60,
            description: "clear sky".to_string(),
        }
    }

    #[test]
    fn display_lines_match_sample_order() {
        let forecast = Forecast {
            city: "Pune".to_string(),
            samples: vec![sample(3), sample(1)],
        };
        let lines = forecast.display_lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Date: 2024-06-03"));
        assert!(lines[1].starts_with("Date: 2024-06-01"));
    }

    #[test]
    fn display_line_format() {
        let forecast = Forecast {
            city: "Pune".to_string(),
            samples: vec![sample(1)],
        };
        assert_eq!(
            forecast.display_lines()[0],
            "Date: 2024-06-01, Temp: 21.5°C, Humidity: 60%, Condition: clear sky"
        );
    }

    #[test]
    fn invalid_city_is_input_error() {
        assert!(WeatherError::InvalidCity.is_input_error());
        assert!(!WeatherError::NotFound("Atlantis".into()).is_input_error());
    }

    #[test]
    fn user_messages_are_non_empty() {
        let errors = [
            WeatherError::InvalidCity,
            WeatherError::NotFound("Atlantis".into()),
            WeatherError::Parse("missing field".into()),
        ];
        for e in errors {
            assert!(!e.user_message().is_empty());
        }
    }
}
