//! Descriptors returned by the plot functions.
//!
//! Nothing is rendered; an [`Axes`] holds everything a backend needs to draw
//! one panel and a [`Figure`] arranges several of them.

use ndarray::{Array1, Array2};
use std::fmt;

use crate::{AcousticError, AcousticResult};

/// Accepted plot style names.
pub const STYLES: &[&str] = &["light", "dark"];

/// Axis scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scale {
    /// Linear axis.
    #[default]
    Linear,
    /// Logarithmic axis.
    Log,
}

impl Scale {
    /// Parse `linear` or `log`.
    pub fn parse(name: &str) -> AcousticResult<Self> {
        match name {
            "linear" => Ok(Self::Linear),
            "log" => Ok(Self::Log),
            other => Err(AcousticError::invalid_value("scale", other, &["linear", "log"])),
        }
    }
}

/// Visual style of a plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotStyle {
    /// Dark lines on a white background.
    #[default]
    Light,
    /// Light lines on a dark background.
    Dark,
}

impl PlotStyle {
    /// Parse a style name.
    pub fn parse(name: &str) -> AcousticResult<Self> {
        match name {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(AcousticError::invalid_value("style", other, STYLES)),
        }
    }

    /// Colors and line settings of the style.
    pub const fn theme(self) -> Theme {
        match self {
            Self::Light => Theme {
                background_color: "#ffffff",
                grid_color: "#f0f0f0",
                text_color: "#000000",
                line_width: 1.5,
            },
            Self::Dark => Theme {
                background_color: "#191919",
                grid_color: "#3c3c3c",
                text_color: "#f0f0f0",
                line_width: 1.5,
            },
        }
    }
}

/// Concrete colors of a [`PlotStyle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Figure and axes background.
    pub background_color: &'static str,
    /// Grid line color.
    pub grid_color: &'static str,
    /// Label and tick color.
    pub text_color: &'static str,
    /// Default line width in points.
    pub line_width: f64,
}

/// Keyboard and mouse behaviour a host UI attaches to the axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    /// Line plot over a linear x-axis.
    LineXLin,
    /// Line plot over a logarithmic x-axis.
    LineXLog,
    /// Spectrogram image.
    Spectrogram,
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LineXLin => "LineXLin",
            Self::LineXLog => "LineXLog",
            Self::Spectrogram => "spectrogram",
        })
    }
}

/// Visible data range of an axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLimits {
    /// Left edge.
    pub x_min: f64,
    /// Right edge.
    pub x_max: f64,
    /// Bottom edge.
    pub y_min: f64,
    /// Top edge.
    pub y_max: f64,
}

impl AxisLimits {
    /// Limits from explicit edges.
    pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Smallest limits containing every finite point of the series.
    pub fn from_series(series: &[Series]) -> Option<Self> {
        let mut limits: Option<Self> = None;
        for line in series {
            for (&x, &y) in line.x.iter().zip(line.y.iter()) {
                if !(x.is_finite() && y.is_finite()) {
                    continue;
                }
                let point = Self::new(x, x, y, y);
                match limits.as_mut() {
                    Some(limits) => limits.expand_to_include(&point),
                    None => limits = Some(point),
                }
            }
        }
        limits
    }

    /// Grow to include `other`.
    pub fn expand_to_include(&mut self, other: &AxisLimits) {
        self.x_min = self.x_min.min(other.x_min);
        self.x_max = self.x_max.max(other.x_max);
        self.y_min = self.y_min.min(other.y_min);
        self.y_max = self.y_max.max(other.y_max);
    }

    /// Pad the y-range by a fraction of its span.
    pub fn with_y_margin(&self, fraction: f64) -> Self {
        let margin = (self.y_max - self.y_min) * fraction;
        Self {
            y_min: self.y_min - margin,
            y_max: self.y_max + margin,
            ..*self
        }
    }
}

/// One line of a line plot.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Legend entry.
    pub label: String,
    /// Abscissa values.
    pub x: Array1<f64>,
    /// Ordinate values.
    pub y: Array1<f64>,
}

/// A color-mapped image such as a spectrogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// Pixel centers along the x-axis.
    pub x: Array1<f64>,
    /// Pixel centers along the y-axis.
    pub y: Array1<f64>,
    /// Values as `[y, x]`.
    pub values: Array2<f64>,
    /// Name of the colormap.
    pub colormap: String,
    /// Label of the color bar.
    pub colorbar_label: String,
    /// Range mapped onto the colormap.
    pub color_limits: (f64, f64),
}

/// What an axes shows.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotContent {
    /// One line per channel.
    Lines(Vec<Series>),
    /// A single image.
    Image(Image),
}

/// Description of a single plot panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    /// Label of the x-axis.
    pub x_label: String,
    /// Label of the y-axis.
    pub y_label: String,
    /// Scaling of the x-axis.
    pub x_scale: Scale,
    /// Scaling of the y-axis.
    pub y_scale: Scale,
    /// Visible range.
    pub limits: AxisLimits,
    /// Plotted data.
    pub content: PlotContent,
    /// Style the panel was created with.
    pub style: PlotStyle,
    /// Interaction profile, when the panel has one.
    pub interaction: Option<InteractionKind>,
}

impl Axes {
    /// Line series of the panel; empty for images.
    pub fn series(&self) -> &[Series] {
        match &self.content {
            PlotContent::Lines(series) => series,
            PlotContent::Image(_) => &[],
        }
    }

    /// Image of the panel, if it shows one.
    pub const fn image(&self) -> Option<&Image> {
        match &self.content {
            PlotContent::Image(image) => Some(image),
            PlotContent::Lines(_) => None,
        }
    }
}

/// Several panels on a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Panels in row-major order.
    pub axes: Vec<Axes>,
    /// Grid size as `(rows, columns)`.
    pub layout: (usize, usize),
    /// Style of the figure.
    pub style: PlotStyle,
}

impl Figure {
    /// Panel at `row`, `column`.
    pub fn get(&self, row: usize, column: usize) -> Option<&Axes> {
        let (rows, columns) = self.layout;
        if row >= rows || column >= columns {
            return None;
        }
        self.axes.get(row * columns + column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_limits_skip_non_finite_points() {
        let series = vec![
            Series {
                label: "a".to_string(),
                x: array![0.0, 1.0, 2.0],
                y: array![-1.0, f64::NEG_INFINITY, 3.0],
            },
            Series {
                label: "b".to_string(),
                x: array![5.0],
                y: array![0.0],
            },
        ];
        let limits = AxisLimits::from_series(&series).unwrap();
        assert_eq!(limits, AxisLimits::new(0.0, 5.0, -1.0, 3.0));
        assert_eq!(limits.with_y_margin(0.25), AxisLimits::new(0.0, 5.0, -2.0, 4.0));
        assert!(AxisLimits::from_series(&[]).is_none());
    }

    #[test]
    fn test_style_parsing() {
        assert_eq!(PlotStyle::parse("dark").unwrap(), PlotStyle::Dark);
        assert_eq!(PlotStyle::parse("dark").unwrap().theme().background_color, "#191919");
        assert!(matches!(
            PlotStyle::parse("ggplot"),
            Err(AcousticError::InvalidValue {
                parameter: "style",
                ..
            })
        ));
    }
}
