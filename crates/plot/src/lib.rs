//! Native window for logarithmic acid-base diagrams.
//!
//! Sample a [`System`](logph_acidbase::System) into a [`Diagram`] and hand it
//! to a [`DiagramView`]:
//!
//! ```ignore
//! let diagram = system.sample(&PhGrid::default())?;
//! DiagramView::new(diagram).show(ShowConfig::new().title("Acetic acid").legend())?;
//! ```

mod app;
mod config;
mod trace;

pub use config::ShowConfig;
pub use trace::{PALETTE, Trace, build_traces, color32};

use eframe::egui;
use log::debug;
use logph_acidbase::Diagram;
use thiserror::Error;

use crate::app::DiagramApp;

/// Errors raised while preparing or opening a diagram window.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("concentration range [{min}, {max}] must be positive and increasing")]
    ConcentrationRange { min: f64, max: f64 },

    #[error("pH range [{min}, {max}] must be finite and increasing")]
    PhRange { min: f64, max: f64 },

    #[error("the diagram has no samples")]
    Empty,

    #[error("failed to open the plot window: {0}")]
    Window(#[from] eframe::Error),
}

/// A sampled diagram waiting to be shown.
#[derive(Debug, Clone)]
pub struct DiagramView {
    diagram: Diagram,
}

impl DiagramView {
    #[must_use]
    pub fn new(diagram: Diagram) -> Self {
        Self { diagram }
    }

    #[must_use]
    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    /// Builds the traces that [`show`](Self::show) would draw.
    ///
    /// # Errors
    ///
    /// Returns an error if a range in `config` is invalid.
    pub fn traces(&self, config: &ShowConfig) -> Result<Vec<Trace>, PlotError> {
        config.validate()?;
        Ok(build_traces(&self.diagram, config))
    }

    /// Opens a blocking egui window displaying the diagram.
    ///
    /// Blocks until the window is closed by the user.
    ///
    /// # Errors
    ///
    /// Returns an error if a range in `config` is invalid, if the diagram is
    /// empty, or if the native window cannot be created.
    pub fn show(self, config: ShowConfig) -> Result<(), PlotError> {
        let traces = self.traces(&config)?;
        let ph_range = config
            .ph_range
            .or_else(|| self.diagram.ph_range())
            .ok_or(PlotError::Empty)?;
        let title = config.title.clone().unwrap_or_else(|| "logph".to_owned());

        debug!(
            "opening `{title}` with {} trace(s) over pH {ph_range:?}",
            traces.len()
        );

        let app = DiagramApp {
            traces,
            legend: config.legend,
            ph_range,
            log_range: config.log_range(),
        };
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default().with_inner_size(config.size),
            ..Default::default()
        };

        eframe::run_native(&title, options, Box::new(move |_cc| Ok(Box::new(app))))?;
        Ok(())
    }
}
