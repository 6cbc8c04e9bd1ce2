use egui_plot::Corner;

use crate::PlotError;

/// Configuration for rendering a [`DiagramView`](crate::DiagramView).
///
/// Construct with [`ShowConfig::new`] and chain builder methods as needed.
///
/// # Example
///
/// ```ignore
/// view.show(ShowConfig::new().title("Acetate buffer").legend())?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ShowConfig {
    pub(crate) title: Option<String>,
    pub(crate) legend: Option<Corner>,
    pub(crate) concentration_range: [f64; 2],
    pub(crate) ph_range: Option<[f64; 2]>,
    pub(crate) size: [f32; 2],
}

impl ShowConfig {
    /// Creates a config with defaults: no title, no legend, concentrations
    /// from `1e-14` to `1` mol/L, and the pH range of the sampled diagram.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: None,
            legend: None,
            concentration_range: [1e-14, 1.0],
            ph_range: None,
            size: [800.0, 720.0],
        }
    }

    /// Sets the window title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Shows a legend in the lower right corner.
    #[must_use]
    pub fn legend(self) -> Self {
        self.legend_at(Corner::RightBottom)
    }

    /// Shows a legend in the given corner.
    #[must_use]
    pub fn legend_at(mut self, corner: Corner) -> Self {
        self.legend = Some(corner);
        self
    }

    /// Sets the visible concentration range, in mol/L.
    ///
    /// Values outside the range are not drawn.
    #[must_use]
    pub fn concentration_range(mut self, min: f64, max: f64) -> Self {
        self.concentration_range = [min, max];
        self
    }

    /// Sets the visible pH range.
    #[must_use]
    pub fn ph_range(mut self, min: f64, max: f64) -> Self {
        self.ph_range = Some([min, max]);
        self
    }

    /// Sets the initial window size, in points.
    #[must_use]
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.size = [width, height];
        self
    }

    /// Returns the concentration range as base-10 logarithms.
    pub(crate) fn log_range(&self) -> [f64; 2] {
        self.concentration_range.map(f64::log10)
    }

    pub(crate) fn validate(&self) -> Result<(), PlotError> {
        let [min, max] = self.concentration_range;
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min < max) {
            return Err(PlotError::ConcentrationRange { min, max });
        }
        if let Some([min, max]) = self.ph_range {
            if !(min.is_finite() && max.is_finite() && min < max) {
                return Err(PlotError::PhRange { min, max });
            }
        }
        Ok(())
    }
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self::new()
    }
}
