//! The dashboard shell: widgets, handlers, and all mutable state.
//!
//! Everything the handlers touch lives on [`DashboardApp`]; there are no
//! globals. The fetch runs synchronously on the UI thread (one request,
//! no retry); only speech playback runs on a worker, owned by the
//! `SpeechController`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use skycast_speech::{SpeechController, SubprocessEngine};
use skycast_weather::{narrative, Forecast, ForecastClient, CITY_PROMPT};

use crate::chart::ChartView;
use crate::config::AppConfig;
use crate::dialog::Dialog;

/// Cities offered in the selector; free text is accepted as well.
pub const CITIES: [&str; 10] = [
    "Delhi",
    "Mumbai",
    "Chennai",
    "Kolkata",
    "Bengaluru",
    "Hyderabad",
    "Pune",
    "Ahmedabad",
    "Jaipur",
    "Chandigarh",
];

pub struct DashboardApp {
    runtime: tokio::runtime::Runtime,
    client: ForecastClient,
    speech: SpeechController,
    /// Current city selector text.
    city: String,
    /// Contents of the forecast text area.
    display_text: String,
    /// Last successful fetch; replaced wholesale, cleared on demand.
    forecast: Option<Forecast>,
    /// Narrative for the speech controller; empty means nothing to speak.
    narrative: String,
    dialog: Option<Dialog>,
    chart: Option<ChartView>,
}

impl DashboardApp {
    pub fn new(config: AppConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let client = ForecastClient::new(config.api_key.clone())?;

        #[cfg(not(feature = "native-tts"))]
        let engine = Arc::new(SubprocessEngine::platform_default());
        #[cfg(feature = "native-tts")]
        let engine: Arc<dyn skycast_speech::SpeechEngine> = match skycast_speech::TtsEngine::new() {
            Ok(tts) => Arc::new(tts),
            Err(e) => {
                tracing::warn!("native tts unavailable, falling back to subprocess: {e}");
                Arc::new(SubprocessEngine::platform_default())
            }
        };

        Ok(Self::with_parts(runtime, client, SpeechController::new(engine)))
    }

    fn with_parts(
        runtime: tokio::runtime::Runtime,
        client: ForecastClient,
        speech: SpeechController,
    ) -> Self {
        Self {
            runtime,
            client,
            speech,
            city: CITY_PROMPT.to_string(),
            display_text: String::new(),
            forecast: None,
            narrative: String::new(),
            dialog: None,
            chart: None,
        }
    }

    /// Fetch the forecast for the selected city and rewrite the display,
    /// narrative, and chart. On failure nothing is modified; the error
    /// becomes a dialog.
    pub fn fetch_weather(&mut self) {
        match self.runtime.block_on(self.client.fetch(&self.city)) {
            Ok(forecast) => {
                self.display_text = forecast.display_lines().join("\n");
                self.narrative = narrative(&forecast);
                self.chart = Some(ChartView::new(&forecast));
                self.forecast = Some(forecast);
            }
            Err(e) if e.is_input_error() => {
                self.dialog = Some(Dialog::warning(e.user_message()));
            }
            Err(e) => {
                tracing::warn!("fetch failed: {e}");
                self.dialog = Some(Dialog::error(e.user_message()));
            }
        }
    }

    pub fn start_speaking(&mut self) {
        if let Err(e) = self.speech.start(&self.narrative) {
            self.dialog = Some(Dialog::warning(e.user_message()));
        }
    }

    pub fn stop_speaking(&mut self) {
        self.speech.stop();
    }

    /// Reset display, selector, narrative and forecast. Idempotent; does
    /// not touch a running speech task.
    pub fn clear_all(&mut self) {
        self.display_text.clear();
        self.city = CITY_PROMPT.to_string();
        self.narrative.clear();
        self.forecast = None;
        self.chart = None;
    }

    fn main_panel(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.label("Select or Enter City Name:");
        });

        ui.horizontal(|ui| {
            egui::ComboBox::from_id_salt("city-picker")
                .selected_text(self.city.clone())
                .show_ui(ui, |ui| {
                    for city in CITIES {
                        ui.selectable_value(&mut self.city, city.to_string(), city);
                    }
                });
            ui.text_edit_singleline(&mut self.city);
        });

        if ui.button("Fetch Weather Data").clicked() {
            self.fetch_weather();
        }

        egui::ScrollArea::vertical()
            .auto_shrink(false)
            .max_height((ui.available_height() - 110.0).max(100.0))
            .show(ui, |ui| {
                ui.monospace(&self.display_text);
            });

        let speaking = self.speech.is_active();
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!speaking, egui::Button::new("Speak Weather"))
                .clicked()
            {
                self.start_speaking();
            }
            if ui.button("Stop Speaking").clicked() {
                self.stop_speaking();
            }
            if ui.button("Clear All Data").clicked() {
                self.clear_all();
            }
        });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let modal_open =
            self.dialog.is_some() || self.chart.as_ref().is_some_and(|c| c.open);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!modal_open, |ui| self.main_panel(ui));
        });

        if let Some(chart) = &mut self.chart {
            if chart.open {
                chart.show(ctx);
            }
        }

        if let Some(dialog) = &self.dialog {
            if dialog.show(ctx) {
                self.dialog = None;
            }
        }

        // Keep polling while a speech task is live so the speak button
        // re-enables when the worker finishes on its own.
        if self.speech.is_active() {
            ctx.request_repaint_after(Duration::from_millis(200));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::DialogKind;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_app(base_url: &str) -> DashboardApp {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap();
        let client = ForecastClient::new("test-key")
            .unwrap()
            .with_base_url(base_url);
        let engine = Arc::new(SubprocessEngine::platform_default());
        DashboardApp::with_parts(runtime, client, SpeechController::new(engine))
    }

    // Unroutable; a fetch reaching the network here is a test failure.
    const NO_NETWORK: &str = "http://127.0.0.1:9";

    #[test]
    fn fetch_with_placeholder_city_warns_and_changes_nothing() {
        let mut app = test_app(NO_NETWORK);
        app.display_text = "old contents".to_string();

        app.fetch_weather();

        let dialog = app.dialog.clone().expect("expected a dialog");
        assert_eq!(dialog.kind, DialogKind::Warning);
        assert_eq!(app.display_text, "old contents");
        assert!(app.forecast.is_none());
    }

    #[test]
    fn fetch_not_found_leaves_display_untouched() {
        let mut app = test_app(NO_NETWORK);
        let server = app.runtime.block_on(MockServer::start());
        app.client = ForecastClient::new("test-key")
            .unwrap()
            .with_base_url(server.uri());

        app.runtime.block_on(
            Mock::given(method("GET"))
                .and(path("/data/2.5/forecast"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "cod": "404",
                    "message": "city not found",
                })))
                .mount(&server),
        );

        app.city = "Nowhereville".to_string();
        app.display_text = "old contents".to_string();
        app.fetch_weather();

        let dialog = app.dialog.clone().expect("expected a dialog");
        assert_eq!(dialog.kind, DialogKind::Error);
        assert_eq!(app.display_text, "old contents");
    }

    #[test]
    fn successful_fetch_rewrites_display_narrative_and_chart() {
        let mut app = test_app(NO_NETWORK);
        let server = app.runtime.block_on(MockServer::start());
        app.client = ForecastClient::new("test-key")
            .unwrap()
            .with_base_url(server.uri());

        app.runtime.block_on(
            Mock::given(method("GET"))
                .and(path("/data/2.5/forecast"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "cod": "200",
                    "list": [{
                        "dt": 1_717_200_000i64,
                        "main": { "temp": 28.4, "humidity": 55 },
                        "weather": [{ "description": "haze" }]
                    }],
                })))
                .mount(&server),
        );

        app.city = "Hyderabad".to_string();
        app.fetch_weather();

        assert!(app.dialog.is_none());
        assert!(app.display_text.contains("Temp: 28.4°C"));
        assert!(app.narrative.contains("28.4 degrees Celsius with haze"));
        assert!(app.chart.as_ref().is_some_and(|c| c.open));
        assert!(app.forecast.is_some());
    }

    #[test]
    fn speak_without_data_warns_and_stays_idle() {
        let mut app = test_app(NO_NETWORK);

        app.start_speaking();

        let dialog = app.dialog.clone().expect("expected a dialog");
        assert_eq!(dialog.kind, DialogKind::Warning);
        assert_eq!(dialog.message, "No weather data to speak.");
        assert!(!app.speech.is_active());
    }

    #[test]
    fn stop_without_speech_is_a_noop() {
        let mut app = test_app(NO_NETWORK);
        app.stop_speaking();
        assert!(!app.speech.is_active());
    }

    #[test]
    fn clear_is_idempotent() {
        let mut app = test_app(NO_NETWORK);
        app.city = "Pune".to_string();
        app.display_text = "some forecast".to_string();
        app.narrative = "On some day. ".to_string();

        app.clear_all();
        let after_once = (
            app.city.clone(),
            app.display_text.clone(),
            app.narrative.clone(),
            app.forecast.clone(),
        );

        app.clear_all();
        let after_twice = (
            app.city.clone(),
            app.display_text.clone(),
            app.narrative.clone(),
            app.forecast.clone(),
        );

        assert_eq!(after_once, after_twice);
        assert_eq!(app.city, CITY_PROMPT);
        assert!(app.display_text.is_empty());
        assert!(app.narrative.is_empty());
    }

    #[test]
    fn clear_makes_subsequent_speak_requests_fail() {
        let mut app = test_app(NO_NETWORK);
        app.narrative = "On 2024-06-01, the temperature is 20.0 degrees Celsius with haze. "
            .to_string();

        app.clear_all();
        app.start_speaking();

        let dialog = app.dialog.clone().expect("expected a dialog");
        assert_eq!(dialog.kind, DialogKind::Warning);
    }
}
