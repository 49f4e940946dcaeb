//! OpenWeather 5-day forecast client.
//!
//! One request per fetch, no retry, no caching. The response list is
//! reduced to the first entry seen for each new calendar day, stopping
//! once [`MAX_FORECAST_DAYS`] distinct days are collected. The provider
//! ordering is taken as-is and never sorted; see `DESIGN.md`.

use chrono::{DateTime, NaiveDate};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::types::{Forecast, ForecastSample, WeatherError, CITY_PROMPT, MAX_FORECAST_DAYS};

const OPENWEATHER_URL: &str = "https://api.openweathermap.org";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct ForecastClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl ForecastClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: OPENWEATHER_URL.to_string(),
        })
    }

    /// Point the client at a different host (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch the forecast for `city`, reduced to one sample per day.
    ///
    /// A blank city or the untouched selector placeholder is refused with
    /// [`WeatherError::InvalidCity`] before any request is made.
    pub async fn fetch(&self, city: &str) -> Result<Forecast, WeatherError> {
        let city = city.trim();
        if city.is_empty() || city == CITY_PROMPT {
            return Err(WeatherError::InvalidCity);
        }

        let url = format!("{}/data/2.5/forecast", self.base_url);
        tracing::debug!(%city, "fetching forecast");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        if res.status() == StatusCode::NOT_FOUND {
            return Err(WeatherError::NotFound(city.to_string()));
        }
        let res = res.error_for_status()?;

        let body = res.text().await?;
        let parsed: OwForecastResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        // The provider reports its own status code in the body.
        if !parsed.cod_is_ok() {
            return Err(WeatherError::NotFound(city.to_string()));
        }

        let samples = reduce_to_daily(&parsed.list)?;
        tracing::info!(%city, days = samples.len(), "forecast fetched");

        Ok(Forecast {
            city: city.to_string(),
            samples,
        })
    }
}

/// Keep the first entry for each new distinct day, in encounter order,
/// stopping at [`MAX_FORECAST_DAYS`] days.
fn reduce_to_daily(entries: &[OwForecastEntry]) -> Result<Vec<ForecastSample>, WeatherError> {
    let mut samples: Vec<ForecastSample> = Vec::new();
    let mut seen_days: Vec<NaiveDate> = Vec::new();

    for entry in entries {
        let date = DateTime::from_timestamp(entry.dt, 0)
            .ok_or_else(|| WeatherError::Parse(format!("bad timestamp: {}", entry.dt)))?
            .date_naive();

        if seen_days.contains(&date) {
            continue;
        }

        let description = entry
            .weather
            .first()
            .map(|w| w.description.clone())
            .unwrap_or_else(|| "Unknown".to_string());

        samples.push(ForecastSample {
            date,
            temperature: entry.main.temp,
            humidity: entry.main.humidity,
            description,
        });
        seen_days.push(date);

        if seen_days.len() == MAX_FORECAST_DAYS {
            break;
        }
    }

    Ok(samples)
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    /// String "200" on success; error bodies carry other values, and some
    /// deployments report a bare number instead.
    cod: serde_json::Value,
    #[serde(default)]
    list: Vec<OwForecastEntry>,
}

impl OwForecastResponse {
    fn cod_is_ok(&self) -> bool {
        self.cod.as_str() == Some("200") || self.cod.as_u64() == Some(200)
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}
