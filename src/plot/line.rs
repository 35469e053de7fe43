//! Series computation behind the plot functions.

use ndarray::{Array1, Axis};
use num_complex::Complex;
use std::f64::consts::{PI, TAU};

use super::axes::{Axes, AxisLimits, Image, PlotContent, PlotStyle, Scale, Series};
use super::stft::{Window, stft};
use super::{PhaseUnwrap, TimeUnit};
use crate::{AcousticError, AcousticResult, Signal};

/// Dynamic range shown below the maximum of logarithmic plots.
const DB_RANGE: f64 = 90.0;
/// Head room above the maximum of logarithmic plots.
const DB_HEADROOM: f64 = 10.0;
/// Frequency axes do not start below this unless the first bin is higher.
const LOWER_FREQUENCY_LIMIT: f64 = 20.0;

fn channel_label(channel: usize) -> String {
    format!("channel {channel}")
}

fn to_db(value: f64, log_prefix: f64, log_reference: f64) -> f64 {
    log_prefix * (value / log_reference + f64::EPSILON).log10()
}

fn lines(series: Vec<Series>, limits: AxisLimits, style: PlotStyle) -> PlotContentAndLimits {
    PlotContentAndLimits {
        content: PlotContent::Lines(series),
        limits,
        style,
    }
}

/// Intermediate result shared by all line panels.
pub(super) struct PlotContentAndLimits {
    content: PlotContent,
    limits: AxisLimits,
    style: PlotStyle,
}

impl PlotContentAndLimits {
    fn into_axes(self, x_label: String, y_label: String, x_scale: Scale, y_scale: Scale) -> Axes {
        Axes {
            x_label,
            y_label,
            x_scale,
            y_scale,
            limits: self.limits,
            content: self.content,
            style: self.style,
            interaction: None,
        }
    }
}

fn limits_or_unit(series: &[Series]) -> AxisLimits {
    AxisLimits::from_series(series).unwrap_or(AxisLimits::new(0.0, 1.0, 0.0, 1.0))
}

fn db_limits(series: &[Series], x_min: f64, x_max: f64) -> AxisLimits {
    let y_max = series
        .iter()
        .flat_map(|line| line.y.iter().copied())
        .filter(|y| y.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    let y_max = if y_max.is_finite() { y_max } else { 0.0 };
    AxisLimits::new(x_min, x_max, y_max - DB_RANGE, y_max + DB_HEADROOM)
}

/// Time axis values in `unit`.
fn time_axis(signal: &Signal, unit: TimeUnit) -> Array1<f64> {
    match unit {
        TimeUnit::Samples => Array1::from_iter((0..signal.n_samples()).map(|n| n as f64)),
        unit => signal.times() * unit.factor(),
    }
}

pub(super) fn time(signal: &Signal, unit: TimeUnit, style: PlotStyle) -> Axes {
    let x = time_axis(signal, unit);
    let series: Vec<Series> = signal
        .time()
        .axis_iter(Axis(0))
        .enumerate()
        .map(|(channel, data)| Series {
            label: channel_label(channel),
            x: x.clone(),
            y: data.to_owned(),
        })
        .collect();
    let limits = limits_or_unit(&series).with_y_margin(0.1);
    lines(series, limits, style).into_axes(
        unit.axis_label("Time"),
        "Amplitude".to_string(),
        Scale::Linear,
        Scale::Linear,
    )
}

pub(super) fn time_db(
    signal: &Signal,
    log_prefix: f64,
    log_reference: f64,
    unit: TimeUnit,
    style: PlotStyle,
) -> Axes {
    let x = time_axis(signal, unit);
    let series: Vec<Series> = signal
        .time()
        .axis_iter(Axis(0))
        .enumerate()
        .map(|(channel, data)| Series {
            label: channel_label(channel),
            x: x.clone(),
            y: data.mapv(|v| to_db(v.abs(), log_prefix, log_reference)),
        })
        .collect();
    let limits = limits_or_unit(&series);
    let limits = db_limits(&series, limits.x_min, limits.x_max);
    lines(series, limits, style).into_axes(
        unit.axis_label("Time"),
        "Amplitude in dB".to_string(),
        Scale::Linear,
        Scale::Linear,
    )
}

fn frequency_range(signal: &Signal) -> (f64, f64) {
    let frequencies = signal.frequencies();
    let first_bin = frequencies.get(1).copied().unwrap_or(LOWER_FREQUENCY_LIMIT);
    (
        LOWER_FREQUENCY_LIMIT.max(first_bin),
        signal.sampling_rate() / 2.0,
    )
}

fn spectrum_series(signal: &Signal, f: impl Fn(Complex<f64>) -> f64) -> Vec<Series> {
    let frequencies = signal.frequencies();
    signal
        .spectrum()
        .axis_iter(Axis(0))
        .enumerate()
        .map(|(channel, bins)| Series {
            label: channel_label(channel),
            x: frequencies.clone(),
            y: bins.mapv(&f),
        })
        .collect()
}

pub(super) fn freq(
    signal: &Signal,
    log_prefix: f64,
    log_reference: f64,
    x_scale: Scale,
    style: PlotStyle,
) -> Axes {
    let series = spectrum_series(signal, |bin| to_db(bin.norm(), log_prefix, log_reference));
    let (f_min, f_max) = frequency_range(signal);
    let limits = db_limits(&series, f_min, f_max);
    lines(series, limits, style).into_axes(
        "Frequency in Hz".to_string(),
        "Magnitude in dB".to_string(),
        x_scale,
        Scale::Linear,
    )
}

fn unwrap_phase(values: &mut Array1<f64>) {
    let mut offset = 0.0;
    let mut previous = match values.first() {
        Some(&first) => first,
        None => return,
    };
    for value in values.iter_mut().skip(1) {
        let raw = *value;
        let jump = raw - previous;
        if jump > PI {
            offset -= TAU * ((jump + PI) / TAU).floor();
        } else if jump < -PI {
            offset += TAU * ((-jump + PI) / TAU).floor();
        }
        previous = raw;
        *value = raw + offset;
    }
}

pub(super) fn phase(
    signal: &Signal,
    deg: bool,
    unwrap: PhaseUnwrap,
    x_scale: Scale,
    style: PlotStyle,
) -> Axes {
    let mut series = spectrum_series(signal, |bin| bin.arg());
    for line in series.iter_mut() {
        match unwrap {
            PhaseUnwrap::None => {}
            PhaseUnwrap::Unwrap => unwrap_phase(&mut line.y),
            PhaseUnwrap::Unwrap360 => {
                unwrap_phase(&mut line.y);
                line.y.mapv_inplace(|v| v.rem_euclid(TAU));
            }
        }
        if deg {
            line.y.mapv_inplace(f64::to_degrees);
        }
    }

    let (f_min, f_max) = frequency_range(signal);
    let data = limits_or_unit(&series);
    let limits = AxisLimits::new(f_min, f_max, data.y_min, data.y_max).with_y_margin(0.05);
    let y_label = if deg {
        "Phase in degree"
    } else {
        "Phase in radians"
    };
    lines(series, limits, style).into_axes(
        "Frequency in Hz".to_string(),
        y_label.to_string(),
        x_scale,
        Scale::Linear,
    )
}

/// Group delay in samples as `Re(FFT(n x) / FFT(x))`.
pub(super) fn group_delay_samples(signal: &Signal) -> AcousticResult<Vec<Array1<f64>>> {
    let ramp = Array1::from_iter((0..signal.n_samples()).map(|n| n as f64));
    let weighted = signal.with_time(signal.time() * &ramp)?;
    let spectrum = signal.spectrum();
    let weighted_spectrum = weighted.spectrum();

    Ok(spectrum
        .axis_iter(Axis(0))
        .zip(weighted_spectrum.axis_iter(Axis(0)))
        .map(|(bins, weighted_bins)| {
            Array1::from_iter(bins.iter().zip(weighted_bins.iter()).map(|(x, nx)| {
                if x.norm() <= f64::EPSILON {
                    0.0
                } else {
                    (nx / x).re
                }
            }))
        })
        .collect())
}

pub(super) fn group_delay(
    signal: &Signal,
    delays: Vec<Array1<f64>>,
    unit: TimeUnit,
    x_scale: Scale,
    style: PlotStyle,
) -> Axes {
    let frequencies = signal.frequencies();
    let scale = match unit {
        TimeUnit::Samples => 1.0,
        unit => unit.factor() / signal.sampling_rate(),
    };
    let series: Vec<Series> = delays
        .into_iter()
        .enumerate()
        .map(|(channel, delay)| Series {
            label: channel_label(channel),
            x: frequencies.clone(),
            y: delay * scale,
        })
        .collect();

    let (f_min, f_max) = frequency_range(signal);
    let data = limits_or_unit(&series);
    let limits = AxisLimits::new(f_min, f_max, data.y_min.min(0.0), data.y_max).with_y_margin(0.05);
    lines(series, limits, style).into_axes(
        "Frequency in Hz".to_string(),
        unit.axis_label("Group delay"),
        x_scale,
        Scale::Linear,
    )
}

/// Settings of a spectrogram panel after validation.
pub(super) struct SpectrogramSettings {
    pub db: bool,
    pub log_prefix: f64,
    pub log_reference: f64,
    pub y_scale: Scale,
    pub window: Window,
    pub window_length: usize,
    pub window_overlap_fct: f64,
    pub colormap: String,
    pub unit: TimeUnit,
    pub style: PlotStyle,
}

pub(super) fn spectrogram(signal: &Signal, settings: SpectrogramSettings) -> AcousticResult<Axes> {
    if signal.n_channels() != 1 {
        return Err(AcousticError::DimensionMismatch(format!(
            "Spectrograms take single channel signals, got {} channels",
            signal.n_channels()
        )));
    }
    let result = stft(
        signal.channel(0)?,
        signal.sampling_rate(),
        settings.window,
        settings.window_length,
        settings.window_overlap_fct,
    )?;

    let (values, colorbar_label) = if settings.db {
        let values = result
            .magnitude
            .mapv(|v| to_db(v, settings.log_prefix, settings.log_reference));
        (values, "Magnitude in dB")
    } else {
        (result.magnitude, "Magnitude")
    };

    let finite = values.iter().copied().filter(|v| v.is_finite());
    let v_max = finite.clone().fold(f64::NEG_INFINITY, f64::max);
    let v_min = finite.fold(f64::INFINITY, f64::min);
    let color_limits = if settings.db {
        (v_max - DB_RANGE, v_max + DB_HEADROOM)
    } else {
        (v_min, v_max)
    };

    let x = match settings.unit {
        TimeUnit::Samples => &result.times * signal.sampling_rate(),
        unit => &result.times * unit.factor(),
    };
    let y = result.frequencies;
    let (y_min, y_max) = match settings.y_scale {
        Scale::Linear => (0.0, signal.sampling_rate() / 2.0),
        Scale::Log => (
            LOWER_FREQUENCY_LIMIT.max(y.get(1).copied().unwrap_or(LOWER_FREQUENCY_LIMIT)),
            signal.sampling_rate() / 2.0,
        ),
    };
    let limits = AxisLimits::new(
        x.first().copied().unwrap_or(0.0),
        x.last().copied().unwrap_or(0.0),
        y_min,
        y_max,
    );

    Ok(Axes {
        x_label: settings.unit.axis_label("Time"),
        y_label: "Frequency in Hz".to_string(),
        x_scale: Scale::Linear,
        y_scale: settings.y_scale,
        limits,
        content: PlotContent::Image(Image {
            x,
            y,
            values,
            colormap: settings.colormap,
            colorbar_label: colorbar_label.to_string(),
            color_limits,
        }),
        style: settings.style,
        interaction: None,
    })
}
