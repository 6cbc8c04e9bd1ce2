use eframe::egui::Color32;
use logph_acidbase::{Color, CurveKind, Diagram};

use crate::ShowConfig;

/// Colors handed out, in order, to curves without an explicit color.
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(31, 119, 180),
    Color32::from_rgb(255, 127, 14),
    Color32::from_rgb(44, 160, 44),
    Color32::from_rgb(214, 39, 40),
    Color32::from_rgb(148, 103, 189),
    Color32::from_rgb(140, 86, 75),
    Color32::from_rgb(227, 119, 194),
    Color32::from_rgb(127, 127, 127),
    Color32::from_rgb(188, 189, 34),
    Color32::from_rgb(23, 190, 207),
];

/// A curve ready to draw, in `(pH, log₁₀ C)` coordinates.
///
/// Points outside the visible ranges, and non-positive concentrations,
/// split the curve into separate segments that share one label and color.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub label: String,
    pub color: Color32,
    pub dashed: bool,
    pub segments: Vec<Vec<[f64; 2]>>,
}

impl Trace {
    /// Returns `true` if no part of the curve is visible.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.segments.is_empty()
    }
}

#[must_use]
pub fn color32(color: Color) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

/// Converts every curve of a diagram into a trace.
///
/// Auxiliary curves are dashed and keep their own color when they have one.
/// Every other curve takes the next palette color.
#[must_use]
pub fn build_traces(diagram: &Diagram, config: &ShowConfig) -> Vec<Trace> {
    let log_range = config.log_range();
    let mut palette = PALETTE.iter().copied().cycle();

    diagram
        .curves
        .iter()
        .map(|curve| {
            let color = match curve.color {
                Some(color) => color32(color),
                None => palette.next().unwrap_or(Color32::GRAY),
            };
            Trace {
                label: curve.label.clone(),
                color,
                dashed: curve.kind == CurveKind::Auxiliary,
                segments: segments(&diagram.ph, &curve.values, log_range, config.ph_range),
            }
        })
        .collect()
}

/// Splits a curve into runs of visible `(pH, log₁₀ value)` points.
fn segments(
    ph: &[f64],
    values: &[f64],
    [low, high]: [f64; 2],
    ph_range: Option<[f64; 2]>,
) -> Vec<Vec<[f64; 2]>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();

    for (&x, &value) in ph.iter().zip(values) {
        let y = value.log10();
        let visible = y.is_finite()
            && (low..=high).contains(&y)
            && ph_range.is_none_or(|[min, max]| (min..=max).contains(&x));

        if visible {
            current.push([x, y]);
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }
    segments
}
