//! Forecast fetching for Skycast
//!
//! Talks to the OpenWeather 5-day forecast API and reduces the response
//! to one sample per calendar day, plus the spoken-narrative rendering
//! of those samples.

pub mod narrative;
pub mod provider;
pub mod types;

pub use narrative::{narrative, sentences};
pub use provider::ForecastClient;
pub use types::{Forecast, ForecastSample, WeatherError, CITY_PROMPT, MAX_FORECAST_DAYS};
