//! Plain-text tables for derived views.

use console::{Style, measure_text_width, pad_str};
use crime_insights_analytics_models::HeatColor;

/// Lays out `rows` under `headers`, padding every column to its widest
/// cell. Rows shorter than the header are padded with empty cells.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| measure_text_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(measure_text_width(cell));
        }
    }

    let header_style = Style::new().bold();
    let mut out = String::new();

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| pad_str(h, *w, console::Alignment::Left, None).into_owned())
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(&header_style.apply_to(header_line.trim_end()).to_string());
    out.push('\n');

    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    out.push('\n');

    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let cell = row.get(i).map_or("", String::as_str);
                pad_str(cell, *w, console::Alignment::Left, None).into_owned()
            })
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

/// Coarse terminal band for a heat colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatBand {
    /// Green.
    Low,
    /// Yellow.
    Medium,
    /// Red.
    High,
}

impl HeatBand {
    /// Band for a hue on the 120 (green) to 0 (red) ramp.
    #[must_use]
    pub fn for_color(color: HeatColor) -> Self {
        if color.hue >= 80.0 {
            Self::Low
        } else if color.hue >= 40.0 {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// Terminal style for this band.
    #[must_use]
    pub fn style(self) -> Style {
        match self {
            Self::Low => Style::new().green(),
            Self::Medium => Style::new().yellow(),
            Self::High => Style::new().red(),
        }
    }
}

/// A crime rate formatted and coloured for a heatmap cell.
#[must_use]
pub fn heat_cell(rate: f64) -> String {
    HeatBand::for_color(HeatColor::for_rate(rate))
        .style()
        .apply_to(format!("{rate:.1}"))
        .to_string()
}
