use eframe::egui;
use egui_plot::{Corner, Legend, Line, LineStyle, Plot, PlotPoints};

use crate::Trace;

/// The egui [`eframe::App`] that renders a logarithmic diagram.
pub(crate) struct DiagramApp {
    pub(crate) traces: Vec<Trace>,
    pub(crate) legend: Option<Corner>,
    pub(crate) ph_range: [f64; 2],
    pub(crate) log_range: [f64; 2],
}

impl eframe::App for DiagramApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut plot = Plot::new("logph_diagram")
                .x_axis_label("pH")
                .y_axis_label("log₁₀ C")
                .include_x(self.ph_range[0])
                .include_x(self.ph_range[1])
                .include_y(self.log_range[0])
                .include_y(self.log_range[1]);
            if let Some(corner) = self.legend {
                plot = plot.legend(Legend::default().position(corner));
            }

            plot.show(ui, |plot_ui| {
                for trace in &self.traces {
                    for segment in &trace.segments {
                        let points: PlotPoints = segment.iter().copied().collect();
                        let mut line = Line::new(points).name(&trace.label).color(trace.color);
                        if trace.dashed {
                            line = line.style(LineStyle::dashed_loose());
                        }
                        plot_ui.line(line);
                    }
                }
            });
        });
    }
}
