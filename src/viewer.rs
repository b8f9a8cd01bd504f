//! Interactive window showing the figures stacked on top of each other,
//! with zoom, drag and a legend per plot.

use crate::error::PlotError;
use crate::figure::{Figure, Rgb};
use egui::{Color32, RichText};
use egui_plot::{Legend, Line, Plot, PlotPoints};

const WINDOW_TITLE: &str = "imu_plot";
const TITLE_SPACE: f32 = 30.0;

impl From<Rgb> for Color32 {
    fn from(c: Rgb) -> Color32 {
        Color32::from_rgb(c.0, c.1, c.2)
    }
}

pub struct ComparisonApp {
    figures: Vec<Figure>,
}

impl ComparisonApp {
    pub fn new(figures: Vec<Figure>) -> Self {
        Self { figures }
    }

    fn show_figure(ui: &mut egui::Ui, figure: &Figure, height: f32) {
        ui.label(RichText::new(figure.title()).size(18.0).strong());
        Plot::new(figure.title())
            .height(height)
            .legend(Legend::default())
            .x_axis_label("timestamp")
            .show(ui, |plot_ui| {
                for series in figure.series.iter() {
                    plot_ui.line(
                        Line::new(PlotPoints::new(series.points.clone()))
                            .color(series.color)
                            .name(&series.label),
                    );
                }
            });
    }
}

impl eframe::App for ComparisonApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let n = self.figures.len().max(1) as f32;
            let height = (ui.available_height() / n - TITLE_SPACE).max(100.0);
            for figure in self.figures.iter() {
                Self::show_figure(ui, figure, height);
            }
        });
    }
}

/// Opens the window and blocks until the user closes it.
pub fn show(figures: Vec<Figure>) -> Result<(), PlotError> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([600.0, 400.0])
            .with_title(WINDOW_TITLE),
        ..Default::default()
    };
    tracing::debug!(figures = figures.len(), "opening plot window");
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(ComparisonApp::new(figures)))),
    )
    .map_err(|e| PlotError::Display(e.to_string()))
}
