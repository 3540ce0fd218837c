//! Color constants and auto-scaling helpers for the TUI.

use ratatui::style::Color;

use crate::model::Phase;

/// Row color for a room over the warning threshold.
pub const WARN_COLOR: Color = Color::Red;
/// Row color for a room within the threshold.
pub const OK_COLOR: Color = Color::Green;
/// Highlighted room row background.
pub const SELECTED_BG: Color = Color::DarkGray;
/// Threshold line color on the chart.
pub const THRESHOLD_COLOR: Color = Color::Magenta;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Status line color for confirmations.
pub const INFO_FG: Color = Color::Cyan;
/// Status line color for errors.
pub const ERROR_FG: Color = Color::Red;

/// Line color for a phase series.
pub fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::L1 => Color::Yellow,
        Phase::L2 => Color::Cyan,
        Phase::L3 => Color::LightBlue,
    }
}

/// Computes Y-axis bounds from the series and the threshold with 10% padding.
///
/// The lower bound never drops below zero since readings are non-negative.
pub fn auto_bounds_y(series: &[(f64, f64)], threshold: f64) -> [f64; 2] {
    let max = series
        .iter()
        .map(|&(_, y)| y)
        .fold(threshold, f64::max);
    if !max.is_finite() {
        return [0.0, 1.0];
    }
    let top = max.max(1.0);
    [0.0, top + top * 0.1]
}
