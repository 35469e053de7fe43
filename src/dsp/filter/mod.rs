//! IIR filter design and application.
//!
//! Every design function either returns the designed [`FilterSos`] or, when a
//! signal is passed, the filtered signal. The short names `butter`, `cheby1`,
//! `cheby2`, `ellip` and `peq` are deprecated aliases that were removed in
//! 0.5.0.

mod design;
mod sos;

pub use sos::FilterSos;

use ndarray::array;
use std::f64::consts::PI;
use std::fmt;

use crate::deprecation::{DeprecationGate, registry};
use crate::{AcousticError, AcousticResult, Signal};
use design::{AnalogBand, Zpk};

/// Accepted values of the `btype` argument.
pub const FILTER_TYPES: &[&str] = &["lowpass", "highpass", "bandpass", "bandstop"];

/// Pass band shape of a designed filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterResponse {
    /// Passes frequencies below the cut-off.
    LowPass,
    /// Passes frequencies above the cut-off.
    HighPass,
    /// Passes frequencies between the two edges.
    BandPass,
    /// Rejects frequencies between the two edges.
    BandStop,
}

impl FilterResponse {
    /// Parse a `btype` name.
    pub fn parse(btype: &str) -> AcousticResult<Self> {
        match btype {
            "lowpass" => Ok(Self::LowPass),
            "highpass" => Ok(Self::HighPass),
            "bandpass" => Ok(Self::BandPass),
            "bandstop" => Ok(Self::BandStop),
            other => Err(AcousticError::invalid_value("btype", other, FILTER_TYPES)),
        }
    }

    /// Name as accepted by [`FilterResponse::parse`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LowPass => "lowpass",
            Self::HighPass => "highpass",
            Self::BandPass => "bandpass",
            Self::BandStop => "bandstop",
        }
    }
}

impl fmt::Display for FilterResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cut-off frequency or band edges in Hz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frequency {
    /// Single cut-off for low- and high-pass filters.
    Cutoff(f64),
    /// Lower and upper edge for band-pass and band-stop filters.
    Band(f64, f64),
}

impl From<f64> for Frequency {
    fn from(value: f64) -> Self {
        Self::Cutoff(value)
    }
}

impl From<[f64; 2]> for Frequency {
    fn from([low, high]: [f64; 2]) -> Self {
        Self::Band(low, high)
    }
}

impl From<(f64, f64)> for Frequency {
    fn from((low, high): (f64, f64)) -> Self {
        Self::Band(low, high)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cutoff(freq) => write!(f, "{freq} Hz"),
            Self::Band(low, high) => write!(f, "{low} Hz to {high} Hz"),
        }
    }
}

/// Result of a design function.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutput {
    /// No signal was given, the designed filter is returned.
    Filter(FilterSos),
    /// The given signal after filtering.
    Signal(Signal),
}

impl FilterOutput {
    /// The designed filter, if no signal was passed.
    pub fn into_filter(self) -> AcousticResult<FilterSos> {
        match self {
            Self::Filter(filter) => Ok(filter),
            Self::Signal(_) => Err(AcousticError::InvalidParameter(
                "Expected a filter but the design returned a filtered signal".to_string(),
            )),
        }
    }

    /// The filtered signal, if a signal was passed.
    pub fn into_signal(self) -> AcousticResult<Signal> {
        match self {
            Self::Signal(signal) => Ok(signal),
            Self::Filter(_) => Err(AcousticError::InvalidParameter(
                "Expected a filtered signal but the design returned a filter".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Family {
    Butterworth,
    Chebyshev1 { ripple: f64 },
    Chebyshev2 { attenuation: f64 },
    Elliptic { ripple: f64, attenuation: f64 },
}

impl Family {
    fn prototype(self, order: usize) -> AcousticResult<Zpk> {
        match self {
            Self::Butterworth => Ok(design::butterworth_prototype(order)),
            Self::Chebyshev1 { ripple } => {
                require_positive("ripple", ripple)?;
                Ok(design::chebyshev1_prototype(order, ripple))
            }
            Self::Chebyshev2 { attenuation } => {
                require_positive("attenuation", attenuation)?;
                Ok(design::chebyshev2_prototype(order, attenuation))
            }
            Self::Elliptic {
                ripple,
                attenuation,
            } => {
                require_positive("ripple", ripple)?;
                require_positive("attenuation", attenuation)?;
                design::elliptic_prototype(order, ripple, attenuation)
            }
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Butterworth => "Butterworth",
            Self::Chebyshev1 { .. } => "Chebychev Type I",
            Self::Chebyshev2 { .. } => "Chebychev Type II",
            Self::Elliptic { .. } => "Elliptic",
        }
    }
}

fn require_positive(name: &str, value: f64) -> AcousticResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AcousticError::InvalidParameter(format!(
            "{name} must be positive, got {value}"
        )))
    }
}

/// The sampling rate comes from the signal or the argument; both must agree.
fn resolve_sampling_rate(
    signal: Option<&Signal>,
    sampling_rate: Option<f64>,
) -> AcousticResult<f64> {
    match (signal, sampling_rate) {
        (Some(signal), None) => Ok(signal.sampling_rate()),
        (None, Some(rate)) => {
            require_positive("sampling_rate", rate)?;
            Ok(rate)
        }
        (Some(signal), Some(rate)) if (signal.sampling_rate() - rate).abs() <= f64::EPSILON => {
            Ok(rate)
        }
        (Some(signal), Some(rate)) => Err(AcousticError::InvalidParameter(format!(
            "Sampling rate {rate} Hz does not match the signal's {} Hz",
            signal.sampling_rate()
        ))),
        (None, None) => Err(AcousticError::InvalidParameter(
            "Either a signal or a sampling rate must be given".to_string(),
        )),
    }
}

fn check_frequency(frequency: f64, sampling_rate: f64) -> AcousticResult<()> {
    let nyquist = sampling_rate / 2.0;
    if frequency > 0.0 && frequency < nyquist {
        Ok(())
    } else {
        Err(AcousticError::InvalidParameter(format!(
            "Frequency {frequency} Hz must lie between 0 Hz and the Nyquist frequency {nyquist} Hz"
        )))
    }
}

fn analog_band(frequency: Frequency, sampling_rate: f64) -> AcousticResult<AnalogBand> {
    match frequency {
        Frequency::Cutoff(freq) => {
            check_frequency(freq, sampling_rate)?;
            Ok(AnalogBand::Single(design::prewarp(freq, sampling_rate)))
        }
        Frequency::Band(low, high) => {
            check_frequency(low, sampling_rate)?;
            check_frequency(high, sampling_rate)?;
            if low >= high {
                return Err(AcousticError::InvalidParameter(format!(
                    "Lower band edge {low} Hz must be below the upper edge {high} Hz"
                )));
            }
            Ok(AnalogBand::Band(
                design::prewarp(low, sampling_rate),
                design::prewarp(high, sampling_rate),
            ))
        }
    }
}

fn apply(signal: Option<&Signal>, filter: FilterSos) -> AcousticResult<FilterOutput> {
    match signal {
        Some(signal) => filter.process(signal).map(FilterOutput::Signal),
        None => Ok(FilterOutput::Filter(filter)),
    }
}

fn iir_filter(
    signal: Option<&Signal>,
    family: Family,
    order: usize,
    frequency: Frequency,
    btype: &str,
    sampling_rate: Option<f64>,
) -> AcousticResult<FilterOutput> {
    let response = FilterResponse::parse(btype)?;
    let sampling_rate = resolve_sampling_rate(signal, sampling_rate)?;
    if order == 0 {
        return Err(AcousticError::InvalidParameter(
            "Filter order must be at least 1".to_string(),
        ));
    }

    let band = analog_band(frequency, sampling_rate)?;
    let analog = design::transform(family.prototype(order)?, response, band)?;
    let digital = design::bilinear(analog, sampling_rate);

    tracing::debug!(
        family = family.name(),
        order,
        btype = response.as_str(),
        sampling_rate,
        "designed IIR filter"
    );

    let comment = format!(
        "{} {response} of order {order}. Cut-off frequency {frequency}.",
        family.name()
    );
    let filter = FilterSos::new(design::to_sos(&digital), sampling_rate, comment)?;
    apply(signal, filter)
}

/// Butterworth filter of the given order.
///
/// `frequency` is the -3 dB cut-off, or the two band edges for `bandpass` and
/// `bandstop`. Band filters have twice the order.
///
/// # Examples
///
/// ```
/// use acoustic_signals::dsp::filter::{FilterOutput, butterworth};
///
/// let output = butterworth(None, 4, 1000.0, "lowpass", Some(44100.0)).unwrap();
/// let FilterOutput::Filter(filter) = output else { unreachable!() };
/// assert_eq!(filter.n_sections(), 2);
/// ```
pub fn butterworth(
    signal: Option<&Signal>,
    order: usize,
    frequency: impl Into<Frequency>,
    btype: &str,
    sampling_rate: Option<f64>,
) -> AcousticResult<FilterOutput> {
    iir_filter(
        signal,
        Family::Butterworth,
        order,
        frequency.into(),
        btype,
        sampling_rate,
    )
}

/// Chebyshev type I filter with `ripple` dB of pass band ripple.
pub fn chebyshev1(
    signal: Option<&Signal>,
    order: usize,
    ripple: f64,
    frequency: impl Into<Frequency>,
    btype: &str,
    sampling_rate: Option<f64>,
) -> AcousticResult<FilterOutput> {
    iir_filter(
        signal,
        Family::Chebyshev1 { ripple },
        order,
        frequency.into(),
        btype,
        sampling_rate,
    )
}

/// Chebyshev type II filter with `attenuation` dB in the stop band.
///
/// The frequency marks where the stop band attenuation is first reached.
pub fn chebyshev2(
    signal: Option<&Signal>,
    order: usize,
    attenuation: f64,
    frequency: impl Into<Frequency>,
    btype: &str,
    sampling_rate: Option<f64>,
) -> AcousticResult<FilterOutput> {
    iir_filter(
        signal,
        Family::Chebyshev2 { attenuation },
        order,
        frequency.into(),
        btype,
        sampling_rate,
    )
}

/// Elliptic (Cauer) filter.
pub fn elliptic(
    signal: Option<&Signal>,
    order: usize,
    ripple: f64,
    attenuation: f64,
    frequency: impl Into<Frequency>,
    btype: &str,
    sampling_rate: Option<f64>,
) -> AcousticResult<FilterOutput> {
    iir_filter(
        signal,
        Family::Elliptic {
            ripple,
            attenuation,
        },
        order,
        frequency.into(),
        btype,
        sampling_rate,
    )
}

/// Second-order peaking (bell) filter.
///
/// Boosts or cuts by `gain` dB around `center_frequency` with bandwidth set by
/// `quality`.
pub fn bell(
    signal: Option<&Signal>,
    center_frequency: f64,
    gain: f64,
    quality: f64,
    sampling_rate: Option<f64>,
) -> AcousticResult<FilterOutput> {
    let sampling_rate = resolve_sampling_rate(signal, sampling_rate)?;
    check_frequency(center_frequency, sampling_rate)?;
    require_positive("quality", quality)?;

    let a = 10.0_f64.powf(gain / 40.0);
    let omega = 2.0 * PI * center_frequency / sampling_rate;
    let cos_omega = omega.cos();
    let alpha = omega.sin() / (2.0 * quality);

    let sos = array![[
        1.0 + alpha * a,
        -2.0 * cos_omega,
        1.0 - alpha * a,
        1.0 + alpha / a,
        -2.0 * cos_omega,
        1.0 - alpha / a,
    ]];
    let comment = format!(
        "Bell filter at {center_frequency} Hz with {gain} dB gain and quality {quality}."
    );
    let filter = FilterSos::new(sos, sampling_rate, comment)?;
    apply(signal, filter)
}

/// Deprecated alias of [`butterworth`].
pub fn butter(
    gate: &DeprecationGate,
    signal: Option<&Signal>,
    order: usize,
    frequency: impl Into<Frequency>,
    btype: &str,
    sampling_rate: Option<f64>,
) -> AcousticResult<FilterOutput> {
    gate.guard(&registry::BUTTER)?;
    butterworth(signal, order, frequency, btype, sampling_rate)
}

/// Deprecated alias of [`chebyshev1`].
pub fn cheby1(
    gate: &DeprecationGate,
    signal: Option<&Signal>,
    order: usize,
    ripple: f64,
    frequency: impl Into<Frequency>,
    btype: &str,
    sampling_rate: Option<f64>,
) -> AcousticResult<FilterOutput> {
    gate.guard(&registry::CHEBY1)?;
    chebyshev1(signal, order, ripple, frequency, btype, sampling_rate)
}

/// Deprecated alias of [`chebyshev2`].
pub fn cheby2(
    gate: &DeprecationGate,
    signal: Option<&Signal>,
    order: usize,
    attenuation: f64,
    frequency: impl Into<Frequency>,
    btype: &str,
    sampling_rate: Option<f64>,
) -> AcousticResult<FilterOutput> {
    gate.guard(&registry::CHEBY2)?;
    chebyshev2(signal, order, attenuation, frequency, btype, sampling_rate)
}

/// Deprecated alias of [`elliptic`].
pub fn ellip(
    gate: &DeprecationGate,
    signal: Option<&Signal>,
    order: usize,
    ripple: f64,
    attenuation: f64,
    frequency: impl Into<Frequency>,
    btype: &str,
    sampling_rate: Option<f64>,
) -> AcousticResult<FilterOutput> {
    gate.guard(&registry::ELLIP)?;
    elliptic(
        signal,
        order,
        ripple,
        attenuation,
        frequency,
        btype,
        sampling_rate,
    )
}

/// Deprecated alias of [`bell`].
pub fn peq(
    gate: &DeprecationGate,
    signal: Option<&Signal>,
    center_frequency: f64,
    gain: f64,
    quality: f64,
    sampling_rate: Option<f64>,
) -> AcousticResult<FilterOutput> {
    gate.guard(&registry::PEQ)?;
    bell(signal, center_frequency, gain, quality, sampling_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;

    const FS: f64 = 44100.0;

    fn magnitude(output: FilterOutput, frequency: f64) -> f64 {
        let filter = output.into_filter().unwrap();
        filter.frequency_response(&[frequency])[0].norm()
    }

    fn half_power() -> f64 {
        0.5f64.sqrt()
    }

    #[test]
    fn test_butterworth_lowpass() {
        let design = || butterworth(None, 4, 1000.0, "lowpass", Some(FS)).unwrap();
        assert_approx_eq!(magnitude(design(), 0.0), 1.0, 1e-9);
        assert_approx_eq!(magnitude(design(), 1000.0), half_power(), 1e-9);
        assert!(magnitude(design(), 10000.0) < 1e-3);

        let filter = design().into_filter().unwrap();
        assert_eq!(filter.n_sections(), 2);
        assert!(filter.comment().starts_with("Butterworth lowpass of order 4"));
    }

    #[test]
    fn test_butterworth_highpass() {
        let design = || butterworth(None, 3, 1000.0, "highpass", Some(FS)).unwrap();
        assert!(magnitude(design(), 0.0) < 1e-9);
        assert_approx_eq!(magnitude(design(), 1000.0), half_power(), 1e-9);
        assert_approx_eq!(magnitude(design(), FS / 2.0), 1.0, 1e-9);
    }

    #[test]
    fn test_butterworth_bandpass_edges() {
        let design = || butterworth(None, 2, [500.0, 2000.0], "bandpass", Some(FS)).unwrap();
        assert_approx_eq!(magnitude(design(), 500.0), half_power(), 1e-9);
        assert_approx_eq!(magnitude(design(), 2000.0), half_power(), 1e-9);
        assert!(magnitude(design(), 1000.0) > 0.99);
        assert!(magnitude(design(), 0.0) < 1e-9);
    }

    #[test]
    fn test_butterworth_bandstop_edges() {
        let design = || butterworth(None, 2, (500.0, 2000.0), "bandstop", Some(FS)).unwrap();
        assert_approx_eq!(magnitude(design(), 0.0), 1.0, 1e-9);
        assert_approx_eq!(magnitude(design(), FS / 2.0), 1.0, 1e-9);
        assert_approx_eq!(magnitude(design(), 500.0), half_power(), 1e-9);
        assert_approx_eq!(magnitude(design(), 2000.0), half_power(), 1e-9);
    }

    #[test]
    fn test_chebyshev_designs() {
        let ripple_gain = 10f64.powf(-1.0 / 20.0);
        let cheby1 = || chebyshev1(None, 4, 1.0, 1000.0, "lowpass", Some(FS)).unwrap();
        assert_approx_eq!(magnitude(cheby1(), 0.0), ripple_gain, 1e-9);
        assert_approx_eq!(magnitude(cheby1(), 1000.0), ripple_gain, 1e-9);

        let cheby2 = || chebyshev2(None, 4, 40.0, 1000.0, "lowpass", Some(FS)).unwrap();
        assert_approx_eq!(magnitude(cheby2(), 0.0), 1.0, 1e-9);
        assert_approx_eq!(magnitude(cheby2(), 1000.0), 0.01, 1e-6);
    }

    #[test]
    fn test_elliptic_design_is_stable() {
        let output = elliptic(None, 5, 1.0, 60.0, 1000.0, "lowpass", Some(FS)).unwrap();
        let filter = output.into_filter().unwrap();
        assert_eq!(filter.n_sections(), 3);
        let dc = filter.frequency_response(&[0.0])[0].norm();
        assert_approx_eq!(dc, 1.0, 1e-9);

        // a decaying impulse response means every pole is inside the unit circle
        let mut samples = vec![0.0; 8192];
        samples[0] = 1.0;
        let impulse = Signal::from_samples(samples, FS).unwrap();
        let response = filter.process(&impulse).unwrap();
        let tail = response.time().row(0).iter().skip(8000).fold(0.0f64, |m, v| m.max(v.abs()));
        assert!(tail < 1e-6);
    }

    #[test]
    fn test_bell_gain_at_center() {
        let output = bell(None, 1000.0, 6.0, 2.0, Some(FS)).unwrap();
        assert_approx_eq!(magnitude(output, 1000.0), 10f64.powf(6.0 / 20.0), 1e-9);

        let flat = bell(None, 1000.0, 0.0, 2.0, Some(FS)).unwrap();
        assert_approx_eq!(magnitude(flat, 5000.0), 1.0, 1e-12);
    }

    #[test]
    fn test_filtering_a_signal_returns_a_signal() {
        let signal = Signal::from_samples(vec![1.0; 64], FS).unwrap();
        let output = butterworth(Some(&signal), 2, 1000.0, "lowpass", None).unwrap();
        let filtered = output.into_signal().unwrap();
        assert_eq!(filtered.n_samples(), 64);
        assert_eq!(filtered.sampling_rate(), FS);
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(
            butterworth(None, 2, 1000.0, "allpass", Some(FS)),
            Err(AcousticError::InvalidValue {
                parameter: "btype",
                ..
            })
        ));
        assert!(butterworth(None, 0, 1000.0, "lowpass", Some(FS)).is_err());
        assert!(butterworth(None, 2, 30000.0, "lowpass", Some(FS)).is_err());
        assert!(butterworth(None, 2, 1000.0, "bandpass", Some(FS)).is_err());
        assert!(butterworth(None, 2, [2000.0, 500.0], "bandpass", Some(FS)).is_err());
        assert!(butterworth(None, 2, 1000.0, "lowpass", None).is_err());
        assert!(elliptic(None, 2, 3.0, 1.0, 1000.0, "lowpass", Some(FS)).is_err());

        let signal = Signal::from_samples(vec![1.0; 8], 48000.0).unwrap();
        assert!(butterworth(Some(&signal), 2, 1000.0, "lowpass", Some(FS)).is_err());
    }

    #[test]
    fn test_aliases_match_replacements_before_removal() {
        let (gate, notices) = DeprecationGate::recording("0.4.2").unwrap();

        let old = butter(&gate, None, 4, 1000.0, "lowpass", Some(FS)).unwrap();
        let new = butterworth(None, 4, 1000.0, "lowpass", Some(FS)).unwrap();
        assert_eq!(old, new);

        let old = peq(&gate, None, 1000.0, 3.0, 1.0, Some(FS)).unwrap();
        let new = bell(None, 1000.0, 3.0, 1.0, Some(FS)).unwrap();
        assert_eq!(old, new);

        cheby1(&gate, None, 2, 1.0, 1000.0, "lowpass", Some(FS)).unwrap();
        cheby2(&gate, None, 2, 40.0, 1000.0, "lowpass", Some(FS)).unwrap();
        ellip(&gate, None, 2, 1.0, 40.0, 1000.0, "lowpass", Some(FS)).unwrap();

        assert_eq!(notices.len(), 5);
        assert_eq!(notices.count_matching("butter will be deprecated"), 1);
    }

    #[test]
    fn test_aliases_removed_in_current_release() {
        let gate = DeprecationGate::at_version("0.7.0").unwrap();
        assert!(matches!(
            butter(&gate, None, 4, 1000.0, "lowpass", Some(FS)),
            Err(AcousticError::MemberRemoved {
                symbol: "filter::butter",
                ..
            })
        ));
        assert!(peq(&gate, None, 1000.0, 3.0, 1.0, Some(FS)).is_err());
    }
}
