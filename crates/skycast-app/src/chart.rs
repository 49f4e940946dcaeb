//! The forecast chart window.
//!
//! Temperature and humidity over the forecast dates. egui_plot has no
//! twin-y-axis plot, so the two series get their own plots with linked
//! x-axes instead of sharing one canvas. The window is modal in effect:
//! the shell disables everything else while it is open.

use chrono::DateTime;
use egui_plot::{Corner, Legend, Line, MarkerShape, Plot, PlotPoints, Points};
use skycast_weather::Forecast;

const TEMPERATURE_COLOR: egui::Color32 = egui::Color32::from_rgb(214, 39, 40);
const HUMIDITY_COLOR: egui::Color32 = egui::Color32::from_rgb(31, 119, 180);

pub struct ChartView {
    pub open: bool,
    title: String,
    /// (unix day timestamp, °C) per sample.
    temperature: Vec<[f64; 2]>,
    /// (unix day timestamp, %) per sample.
    humidity: Vec<[f64; 2]>,
}

impl ChartView {
    pub fn new(forecast: &Forecast) -> Self {
        let day_ts = |s: &skycast_weather::ForecastSample| {
            s.date
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc().timestamp() as f64)
                .unwrap_or_default()
        };

        Self {
            open: true,
            title: format!("Weather Data for {} (Next 5 Days)", forecast.city),
            temperature: forecast
                .samples
                .iter()
                .map(|s| [day_ts(s), s.temperature])
                .collect(),
            humidity: forecast
                .samples
                .iter()
                .map(|s| [day_ts(s), f64::from(s.humidity)])
                .collect(),
        }
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        let mut open = self.open;
        egui::Window::new(&self.title)
            .open(&mut open)
            .collapsible(false)
            .default_size([560.0, 440.0])
            .show(ctx, |ui| {
                let link_group = ui.id().with("forecast-date-axis");

                Plot::new("temperature")
                    .height(190.0)
                    .legend(Legend::default().position(Corner::LeftTop))
                    .link_axis(link_group, true, false)
                    .x_axis_formatter(|mark, _range| format_day_month(mark.value))
                    .show(ui, |plot_ui| {
                        plot_ui.line(
                            Line::new(PlotPoints::from(self.temperature.clone()))
                                .color(TEMPERATURE_COLOR)
                                .width(2.0)
                                .name("Temperature (°C)"),
                        );
                        plot_ui.points(
                            Points::new(PlotPoints::from(self.temperature.clone()))
                                .color(TEMPERATURE_COLOR)
                                .shape(MarkerShape::Circle)
                                .radius(4.0)
                                .name("Temperature (°C)"),
                        );
                    });

                Plot::new("humidity")
                    .height(190.0)
                    .legend(Legend::default().position(Corner::RightTop))
                    .link_axis(link_group, true, false)
                    .x_axis_formatter(|mark, _range| format_day_month(mark.value))
                    .show(ui, |plot_ui| {
                        plot_ui.line(
                            Line::new(PlotPoints::from(self.humidity.clone()))
                                .color(HUMIDITY_COLOR)
                                .width(2.0)
                                .name("Humidity (%)"),
                        );
                        plot_ui.points(
                            Points::new(PlotPoints::from(self.humidity.clone()))
                                .color(HUMIDITY_COLOR)
                                .shape(MarkerShape::Circle)
                                .radius(4.0)
                                .name("Humidity (%)"),
                        );
                    });
            });
        self.open = open;
    }
}

/// Date ticks formatted day-month, e.g. "03-06".
fn format_day_month(ts: f64) -> String {
    DateTime::from_timestamp(ts as i64, 0)
        .map(|dt| dt.format("%d-%m").to_string())
        .unwrap_or_default()
}
