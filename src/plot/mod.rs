//! Plot data for signals.
//!
//! Every function validates its options, computes the plotted values and
//! returns an [`Axes`] or [`Figure`] descriptor. Drawing is left to the
//! caller's backend.
//!
//! The `xscale` and `yscale` arguments are scheduled for removal; passing
//! `None` never triggers the deprecation gate.

mod axes;
mod line;
mod stft;

pub use axes::{
    AxisLimits, Axes, Figure, Image, InteractionKind, PlotContent, PlotStyle, Scale, Series,
    Theme, STYLES,
};
pub use stft::{Window, WINDOWS};

use crate::deprecation::registry::{self, TIME_UNITS};
use crate::deprecation::{Deprecation, DeprecationGate};
use crate::{AcousticError, AcousticResult, Signal};

use line::SpectrogramSettings;

/// Unit of time and group delay axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeUnit {
    /// Seconds.
    #[default]
    Seconds,
    /// Milliseconds.
    Milliseconds,
    /// Microseconds.
    Microseconds,
    /// Sample index.
    Samples,
}

impl TimeUnit {
    /// Multiplier from seconds; samples use the sampling rate instead.
    pub const fn factor(self) -> f64 {
        match self {
            Self::Seconds | Self::Samples => 1.0,
            Self::Milliseconds => 1e3,
            Self::Microseconds => 1e6,
        }
    }

    /// Short name of the unit.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Seconds => "s",
            Self::Milliseconds => "ms",
            Self::Microseconds => "mus",
            Self::Samples => "samples",
        }
    }

    fn axis_label(self, quantity: &str) -> String {
        match self {
            Self::Seconds => format!("{quantity} in s"),
            Self::Milliseconds => format!("{quantity} in ms"),
            Self::Microseconds => format!("{quantity} in \u{03bc}s"),
            Self::Samples => format!("{quantity} in samples"),
        }
    }
}

/// Resolve the unit of a time axis.
///
/// `"auto"` picks microseconds below 1 ms, milliseconds below 1 s and
/// seconds otherwise, judged from `max_time` in seconds. `None` is the
/// deprecated spelling of `"s"`.
pub fn check_time_unit(
    gate: &DeprecationGate,
    unit: Option<&str>,
    max_time: f64,
) -> AcousticResult<TimeUnit> {
    let unit = match unit {
        Some(unit) => unit,
        None => {
            gate.guard(&registry::TIME_UNIT_NONE)?;
            "s"
        }
    };
    match unit {
        "s" => Ok(TimeUnit::Seconds),
        "ms" => Ok(TimeUnit::Milliseconds),
        "mus" => Ok(TimeUnit::Microseconds),
        "samples" => Ok(TimeUnit::Samples),
        "auto" => {
            let max_time = max_time.abs();
            Ok(if max_time < 1e-3 {
                TimeUnit::Microseconds
            } else if max_time < 1.0 {
                TimeUnit::Milliseconds
            } else {
                TimeUnit::Seconds
            })
        }
        other => Err(AcousticError::invalid_value("unit", other, TIME_UNITS)),
    }
}

/// How the phase is unwrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhaseUnwrap {
    /// Wrapped to `(-pi, pi]`.
    #[default]
    None,
    /// Continuous phase.
    Unwrap,
    /// Continuous phase wrapped to `[0, 2 pi)`.
    Unwrap360,
}

/// Options shared by the line plots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineOptions<'a> {
    /// Factor in front of the logarithm, 20 for amplitudes.
    pub log_prefix: f64,
    /// Reference value of the logarithm.
    pub log_reference: f64,
    /// Show the phase in degrees.
    pub deg: bool,
    /// Phase unwrapping.
    pub unwrap: PhaseUnwrap,
    /// Time unit, see [`check_time_unit`].
    pub unit: Option<&'a str>,
    /// Style name from [`STYLES`].
    pub style: &'a str,
}

impl Default for LineOptions<'_> {
    fn default() -> Self {
        Self {
            log_prefix: 20.0,
            log_reference: 1.0,
            deg: false,
            unwrap: PhaseUnwrap::None,
            unit: Some("s"),
            style: "light",
        }
    }
}

/// Options of [`spectrogram`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrogramOptions<'a> {
    /// Show magnitudes in dB.
    pub db: bool,
    /// Factor in front of the logarithm.
    pub log_prefix: f64,
    /// Reference value of the logarithm.
    pub log_reference: f64,
    /// Window name from [`WINDOWS`].
    pub window: &'a str,
    /// Window length in samples.
    pub window_length: usize,
    /// Fraction of the window shared by neighbouring frames.
    pub window_overlap_fct: f64,
    /// Colormap name handed to the backend.
    pub colormap: &'a str,
    /// Time unit, see [`check_time_unit`].
    pub unit: Option<&'a str>,
    /// Style name from [`STYLES`].
    pub style: &'a str,
}

impl Default for SpectrogramOptions<'_> {
    fn default() -> Self {
        Self {
            db: true,
            log_prefix: 20.0,
            log_reference: 1.0,
            window: "hann",
            window_length: 1024,
            window_overlap_fct: 0.5,
            colormap: "magma",
            unit: Some("s"),
            style: "light",
        }
    }
}

/// Panel kinds available in [`custom_subplots`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotKind {
    /// See [`time`].
    Time,
    /// See [`time_db`].
    TimeDb,
    /// See [`freq`].
    Freq,
    /// See [`phase`].
    Phase,
    /// See [`group_delay`].
    GroupDelay,
    /// See [`spectrogram`], with default spectrogram options.
    Spectrogram,
}

/// Resolve a deprecated scale argument, falling back to `default`.
fn scale_argument(
    gate: &DeprecationGate,
    record: &Deprecation,
    scale: Option<Scale>,
    default: Scale,
) -> AcousticResult<Scale> {
    match scale {
        Some(scale) => {
            gate.guard(record)?;
            Ok(scale)
        }
        None => Ok(default),
    }
}

fn tagged(mut axes: Axes, interaction: InteractionKind) -> Axes {
    axes.interaction = Some(interaction);
    axes
}

fn time_axes(
    gate: &DeprecationGate,
    signal: &Signal,
    options: &LineOptions<'_>,
) -> AcousticResult<Axes> {
    let style = PlotStyle::parse(options.style)?;
    let unit = check_time_unit(gate, options.unit, signal.duration())?;
    Ok(line::time(signal, unit, style))
}

fn time_db_axes(
    gate: &DeprecationGate,
    signal: &Signal,
    options: &LineOptions<'_>,
) -> AcousticResult<Axes> {
    let style = PlotStyle::parse(options.style)?;
    let unit = check_time_unit(gate, options.unit, signal.duration())?;
    Ok(line::time_db(
        signal,
        options.log_prefix,
        options.log_reference,
        unit,
        style,
    ))
}

fn freq_axes(signal: &Signal, options: &LineOptions<'_>, x_scale: Scale) -> AcousticResult<Axes> {
    let style = PlotStyle::parse(options.style)?;
    Ok(line::freq(
        signal,
        options.log_prefix,
        options.log_reference,
        x_scale,
        style,
    ))
}

fn phase_axes(signal: &Signal, options: &LineOptions<'_>, x_scale: Scale) -> AcousticResult<Axes> {
    let style = PlotStyle::parse(options.style)?;
    Ok(line::phase(signal, options.deg, options.unwrap, x_scale, style))
}

fn group_delay_axes(
    gate: &DeprecationGate,
    signal: &Signal,
    options: &LineOptions<'_>,
    x_scale: Scale,
) -> AcousticResult<Axes> {
    let style = PlotStyle::parse(options.style)?;
    let delays = line::group_delay_samples(signal)?;
    let max_delay = delays
        .iter()
        .flat_map(|delay| delay.iter().copied())
        .fold(0.0_f64, |max, delay| max.max(delay.abs()))
        / signal.sampling_rate();
    let unit = check_time_unit(gate, options.unit, max_delay)?;
    Ok(line::group_delay(signal, delays, unit, x_scale, style))
}

fn spectrogram_axes(
    gate: &DeprecationGate,
    signal: &Signal,
    options: &SpectrogramOptions<'_>,
    y_scale: Scale,
) -> AcousticResult<Axes> {
    let settings = SpectrogramSettings {
        db: options.db,
        log_prefix: options.log_prefix,
        log_reference: options.log_reference,
        y_scale,
        window: Window::parse(options.window)?,
        window_length: options.window_length,
        window_overlap_fct: options.window_overlap_fct,
        colormap: options.colormap.to_string(),
        unit: check_time_unit(gate, options.unit, signal.duration())?,
        style: PlotStyle::parse(options.style)?,
    };
    line::spectrogram(signal, settings)
}

fn stacked(top: Axes, bottom: Axes, style: &str) -> AcousticResult<Figure> {
    Ok(Figure {
        axes: vec![top, bottom],
        layout: (2, 1),
        style: PlotStyle::parse(style)?,
    })
}

/// Time signal of every channel.
pub fn time(
    gate: &DeprecationGate,
    signal: &Signal,
    options: &LineOptions<'_>,
) -> AcousticResult<Axes> {
    let axes = time_axes(gate, signal, options)?;
    Ok(tagged(axes, InteractionKind::LineXLin))
}

/// Time signal in dB, showing 90 dB below the maximum.
pub fn time_db(
    gate: &DeprecationGate,
    signal: &Signal,
    options: &LineOptions<'_>,
) -> AcousticResult<Axes> {
    let axes = time_db_axes(gate, signal, options)?;
    Ok(tagged(axes, InteractionKind::LineXLin))
}

/// Magnitude spectrum in dB over a logarithmic frequency axis.
pub fn freq(
    gate: &DeprecationGate,
    signal: &Signal,
    options: &LineOptions<'_>,
    xscale: Option<Scale>,
) -> AcousticResult<Axes> {
    let x_scale = scale_argument(gate, &registry::XSCALE_FREQ, xscale, Scale::Log)?;
    let axes = freq_axes(signal, options, x_scale)?;
    Ok(tagged(axes, InteractionKind::LineXLog))
}

/// Phase spectrum.
pub fn phase(
    gate: &DeprecationGate,
    signal: &Signal,
    options: &LineOptions<'_>,
    xscale: Option<Scale>,
) -> AcousticResult<Axes> {
    let x_scale = scale_argument(gate, &registry::XSCALE_PHASE, xscale, Scale::Log)?;
    let axes = phase_axes(signal, options, x_scale)?;
    Ok(tagged(axes, InteractionKind::LineXLog))
}

/// Group delay in the requested time unit.
pub fn group_delay(
    gate: &DeprecationGate,
    signal: &Signal,
    options: &LineOptions<'_>,
    xscale: Option<Scale>,
) -> AcousticResult<Axes> {
    let x_scale = scale_argument(gate, &registry::XSCALE_GROUP_DELAY, xscale, Scale::Log)?;
    let axes = group_delay_axes(gate, signal, options, x_scale)?;
    Ok(tagged(axes, InteractionKind::LineXLog))
}

/// Spectrogram of a single channel signal.
pub fn spectrogram(
    gate: &DeprecationGate,
    signal: &Signal,
    options: &SpectrogramOptions<'_>,
    yscale: Option<Scale>,
) -> AcousticResult<Axes> {
    let y_scale = scale_argument(gate, &registry::YSCALE_SPECTROGRAM, yscale, Scale::Linear)?;
    let axes = spectrogram_axes(gate, signal, options, y_scale)?;
    Ok(tagged(axes, InteractionKind::Spectrogram))
}

/// Time signal above its magnitude spectrum.
pub fn time_freq(
    gate: &DeprecationGate,
    signal: &Signal,
    options: &LineOptions<'_>,
    xscale: Option<Scale>,
) -> AcousticResult<Figure> {
    let x_scale = scale_argument(gate, &registry::XSCALE_TIME_FREQ, xscale, Scale::Log)?;
    let top = tagged(time_axes(gate, signal, options)?, InteractionKind::LineXLin);
    let bottom = freq_axes(signal, options, x_scale)?;
    stacked(top, bottom, options.style)
}

/// Magnitude spectrum above the phase spectrum.
pub fn freq_phase(
    gate: &DeprecationGate,
    signal: &Signal,
    options: &LineOptions<'_>,
    xscale: Option<Scale>,
) -> AcousticResult<Figure> {
    let x_scale = scale_argument(gate, &registry::XSCALE_FREQ_PHASE, xscale, Scale::Log)?;
    let top = tagged(freq_axes(signal, options, x_scale)?, InteractionKind::LineXLog);
    let bottom = phase_axes(signal, options, x_scale)?;
    stacked(top, bottom, options.style)
}

/// Magnitude spectrum above the group delay.
pub fn freq_group_delay(
    gate: &DeprecationGate,
    signal: &Signal,
    options: &LineOptions<'_>,
    xscale: Option<Scale>,
) -> AcousticResult<Figure> {
    let x_scale = scale_argument(gate, &registry::XSCALE_FREQ_GROUP_DELAY, xscale, Scale::Log)?;
    let top = tagged(freq_axes(signal, options, x_scale)?, InteractionKind::LineXLog);
    let bottom = group_delay_axes(gate, signal, options, x_scale)?;
    stacked(top, bottom, options.style)
}

/// Arrange arbitrary panels on a grid given row by row.
pub fn custom_subplots(
    gate: &DeprecationGate,
    signal: &Signal,
    layout: &[Vec<PlotKind>],
    options: &LineOptions<'_>,
) -> AcousticResult<Figure> {
    let columns = layout.first().map_or(0, Vec::len);
    if columns == 0 {
        return Err(AcousticError::InvalidParameter(
            "Subplot layout needs at least one panel".to_string(),
        ));
    }
    if let Some(row) = layout.iter().position(|row| row.len() != columns) {
        return Err(AcousticError::DimensionMismatch(format!(
            "Row {row} of the subplot layout has {} panels, expected {columns}",
            layout[row].len()
        )));
    }

    // a deprecated unit warns once per figure, not once per panel
    let uses_unit = layout.iter().flatten().any(|kind| {
        matches!(
            kind,
            PlotKind::Time | PlotKind::TimeDb | PlotKind::GroupDelay | PlotKind::Spectrogram
        )
    });
    let resolved;
    let options = if options.unit.is_none() && uses_unit {
        gate.guard(&registry::TIME_UNIT_NONE)?;
        resolved = LineOptions {
            unit: Some("s"),
            ..*options
        };
        &resolved
    } else {
        options
    };

    let spectrogram_options = SpectrogramOptions {
        log_prefix: options.log_prefix,
        log_reference: options.log_reference,
        unit: options.unit,
        style: options.style,
        ..SpectrogramOptions::default()
    };
    let mut axes = Vec::with_capacity(layout.len() * columns);
    for kind in layout.iter().flatten() {
        axes.push(match kind {
            PlotKind::Time => time_axes(gate, signal, options)?,
            PlotKind::TimeDb => time_db_axes(gate, signal, options)?,
            PlotKind::Freq => freq_axes(signal, options, Scale::Log)?,
            PlotKind::Phase => phase_axes(signal, options, Scale::Log)?,
            PlotKind::GroupDelay => group_delay_axes(gate, signal, options, Scale::Log)?,
            PlotKind::Spectrogram => {
                spectrogram_axes(gate, signal, &spectrogram_options, Scale::Linear)?
            }
        });
    }
    tracing::debug!(rows = layout.len(), columns, "arranged custom subplots");

    Ok(Figure {
        axes,
        layout: (layout.len(), columns),
        style: PlotStyle::parse(options.style)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;
    use std::f64::consts::PI;

    fn impulse(n_samples: usize, delay: usize, sampling_rate: f64) -> Signal {
        let mut samples = vec![0.0; n_samples];
        samples[delay] = 1.0;
        Signal::from_samples(samples, sampling_rate).unwrap()
    }

    fn gate() -> DeprecationGate {
        DeprecationGate::at_version("0.7.0").unwrap()
    }

    #[test]
    fn test_check_time_unit() {
        let gate = gate();
        assert_eq!(check_time_unit(&gate, Some("ms"), 1.0).unwrap(), TimeUnit::Milliseconds);
        assert_eq!(check_time_unit(&gate, Some("auto"), 2e-4).unwrap(), TimeUnit::Microseconds);
        assert_eq!(check_time_unit(&gate, Some("auto"), 0.5).unwrap(), TimeUnit::Milliseconds);
        assert_eq!(check_time_unit(&gate, Some("auto"), 3.0).unwrap(), TimeUnit::Seconds);
        assert!(matches!(
            check_time_unit(&gate, Some("min"), 1.0),
            Err(AcousticError::InvalidValue { parameter: "unit", .. })
        ));
    }

    #[test]
    fn test_time_unit_none() {
        let (old, notices) = DeprecationGate::recording("0.5.1").unwrap();
        assert_eq!(check_time_unit(&old, None, 1.0).unwrap(), TimeUnit::Seconds);
        assert_eq!(notices.count_matching("unit=None will be deprecated"), 1);

        match check_time_unit(&gate(), None, 1.0) {
            Err(AcousticError::InvalidValue { parameter, allowed, .. }) => {
                assert_eq!(parameter, "unit");
                assert_eq!(allowed, TIME_UNITS.to_vec());
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_time_axes() {
        let signal = Signal::new(
            ndarray::array![[0.0, 1.0, 0.0, -1.0], [0.5, 0.5, 0.5, 0.5]],
            4.0,
        )
        .unwrap();
        let options = LineOptions {
            unit: Some("ms"),
            ..LineOptions::default()
        };
        let axes = time(&gate(), &signal, &options).unwrap();
        assert_eq!(axes.interaction, Some(InteractionKind::LineXLin));
        assert_eq!(axes.x_label, "Time in ms");
        assert_eq!(axes.series().len(), 2);
        assert_approx_eq!(axes.series()[0].x[3], 750.0, 1e-12);
        assert_eq!(axes.series()[1].y[2], 0.5);
    }

    #[test]
    fn test_time_db_limits() {
        let signal = Signal::from_samples(vec![0.1, 0.0, 0.01], 1000.0).unwrap();
        let axes = time_db(&gate(), &signal, &LineOptions::default()).unwrap();
        assert_approx_eq!(axes.series()[0].y[0], -20.0, 1e-9);
        assert_approx_eq!(axes.limits.y_max, -10.0, 1e-9);
        assert_approx_eq!(axes.limits.y_min, -110.0, 1e-9);
    }

    #[test]
    fn test_freq_of_impulse() {
        let signal = impulse(64, 0, 1000.0);
        let axes = freq(&gate(), &signal, &LineOptions::default(), None).unwrap();
        assert_eq!(axes.x_scale, Scale::Log);
        assert_eq!(axes.interaction, Some(InteractionKind::LineXLog));
        assert_eq!(axes.y_label, "Magnitude in dB");
        for &value in axes.series()[0].y.iter() {
            assert!(value.abs() < 1e-9);
        }
        assert_approx_eq!(axes.limits.x_max, 500.0, 1e-12);
    }

    #[test]
    fn test_phase_of_delayed_impulse() {
        let fs = 64.0;
        let signal = impulse(64, 1, fs);
        let options = LineOptions {
            unwrap: PhaseUnwrap::Unwrap,
            ..LineOptions::default()
        };
        let axes = phase(&gate(), &signal, &options, None).unwrap();
        let line = &axes.series()[0];
        for (&f, &value) in line.x.iter().zip(line.y.iter()).take(32) {
            assert!((value + 2.0 * PI * f / fs).abs() < 1e-9);
        }

        let degrees = LineOptions {
            deg: true,
            ..LineOptions::default()
        };
        let axes = phase(&gate(), &signal, &degrees, None).unwrap();
        assert_eq!(axes.y_label, "Phase in degree");
        assert_approx_eq!(axes.series()[0].y[16], -90.0, 1e-9);
    }

    #[test]
    fn test_group_delay_units() {
        let signal = impulse(32, 4, 1000.0);
        let samples = LineOptions {
            unit: Some("samples"),
            ..LineOptions::default()
        };
        let axes = group_delay(&gate(), &signal, &samples, None).unwrap();
        assert_approx_eq!(axes.series()[0].y[5], 4.0, 1e-9);

        let auto = LineOptions {
            unit: Some("auto"),
            ..LineOptions::default()
        };
        let axes = group_delay(&gate(), &signal, &auto, None).unwrap();
        assert_eq!(axes.y_label, "Group delay in ms");
        assert_approx_eq!(axes.series()[0].y[5], 4.0, 1e-9);
    }

    #[test]
    fn test_spectrogram() {
        let fs = 8000.0;
        let samples = (0..8000)
            .map(|n| (2.0 * PI * 1000.0 * n as f64 / fs).sin())
            .collect();
        let signal = Signal::from_samples(samples, fs).unwrap();
        let options = SpectrogramOptions {
            window_length: 256,
            ..SpectrogramOptions::default()
        };
        let axes = spectrogram(&gate(), &signal, &options, None).unwrap();
        assert_eq!(axes.interaction, Some(InteractionKind::Spectrogram));
        let image = axes.image().unwrap();
        assert_eq!(image.colormap, "magma");
        assert_eq!(image.colorbar_label, "Magnitude in dB");
        assert_eq!(image.values.nrows(), 129);
        assert_approx_eq!(image.color_limits.1 - image.color_limits.0, 100.0, 1e-9);

        let stereo = Signal::new(ndarray::Array2::zeros((2, 2048)), fs).unwrap();
        assert!(spectrogram(&gate(), &stereo, &options, None).is_err());
    }

    #[test]
    fn test_composite_figures() {
        let signal = impulse(128, 3, 1000.0);
        let figure = time_freq(&gate(), &signal, &LineOptions::default(), None).unwrap();
        assert_eq!(figure.layout, (2, 1));
        assert_eq!(figure.get(0, 0).unwrap().interaction, Some(InteractionKind::LineXLin));
        assert_eq!(figure.get(1, 0).unwrap().interaction, None);
        assert!(figure.get(0, 1).is_none());

        let figure = freq_group_delay(&gate(), &signal, &LineOptions::default(), None).unwrap();
        assert_eq!(figure.get(1, 0).unwrap().x_label, "Frequency in Hz");
    }

    #[test]
    fn test_custom_subplots_layout() {
        let signal = impulse(2048, 0, 1000.0);
        let figure = custom_subplots(
            &gate(),
            &signal,
            &[
                vec![PlotKind::Time, PlotKind::Freq],
                vec![PlotKind::Phase, PlotKind::Spectrogram],
            ],
            &LineOptions::default(),
        )
        .unwrap();
        assert_eq!(figure.layout, (2, 2));
        assert!(figure.get(1, 1).unwrap().image().is_some());

        let ragged = custom_subplots(
            &gate(),
            &signal,
            &[vec![PlotKind::Time, PlotKind::Freq], vec![PlotKind::Phase]],
            &LineOptions::default(),
        );
        assert!(matches!(ragged, Err(AcousticError::DimensionMismatch(_))));
        assert!(custom_subplots(&gate(), &signal, &[], &LineOptions::default()).is_err());
    }

    #[test]
    fn test_custom_subplots_warn_once_for_unit_none() {
        let signal = impulse(2048, 0, 1000.0);
        let options = LineOptions {
            unit: None,
            ..LineOptions::default()
        };
        let layout = [
            vec![PlotKind::Time, PlotKind::TimeDb],
            vec![PlotKind::GroupDelay, PlotKind::Spectrogram],
        ];

        let (old, notices) = DeprecationGate::recording("0.5.0").unwrap();
        let figure = custom_subplots(&old, &signal, &layout, &options).unwrap();
        assert_eq!(figure.get(0, 0).unwrap().x_label, "Time in s");
        assert_eq!(notices.count_matching("unit=None will be deprecated"), 1);

        let (old, notices) = DeprecationGate::recording("0.5.0").unwrap();
        custom_subplots(&old, &signal, &[vec![PlotKind::Freq]], &options).unwrap();
        assert!(notices.is_empty());

        assert!(matches!(
            custom_subplots(&gate(), &signal, &layout, &options),
            Err(AcousticError::InvalidValue { parameter: "unit", .. })
        ));
    }

    #[test]
    fn test_xscale_is_removed() {
        let signal = impulse(64, 0, 1000.0);
        let options = LineOptions::default();

        let (old, notices) = DeprecationGate::recording("0.5.0").unwrap();
        let axes = freq(&old, &signal, &options, Some(Scale::Linear)).unwrap();
        assert_eq!(axes.x_scale, Scale::Linear);
        assert_eq!(notices.count_matching("The xscale parameter will be removed"), 1);

        let result = freq(&gate(), &signal, &options, Some(Scale::Linear));
        assert!(result.unwrap_err().is_removal());
    }

    #[test]
    fn test_unknown_style() {
        let signal = impulse(16, 0, 1000.0);
        let options = LineOptions {
            style: "ggplot",
            ..LineOptions::default()
        };
        assert!(time(&gate(), &signal, &options).is_err());
    }
}
