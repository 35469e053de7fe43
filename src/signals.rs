//! Test signal generation.

use std::f64::consts::PI;

use crate::deprecation::{DeprecationGate, registry};
use crate::{AcousticError, AcousticResult, Signal};

/// Shared options of the time-domain sweeps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepOptions {
    /// Length of the squared cosine fade-out at the end of the sweep.
    pub n_fade_out: usize,
    /// Peak amplitude.
    pub amplitude: f64,
    /// Sampling rate in Hz.
    pub sampling_rate: f64,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            n_fade_out: 90,
            amplitude: 1.0,
            sampling_rate: 44100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SweepKind {
    Linear,
    Exponential,
}

/// Sweep with linearly increasing frequency.
///
/// The instantaneous frequency moves from `frequency_range[0]` to
/// `frequency_range[1]` over `n_samples` samples.
pub fn linear_sweep_time(
    n_samples: usize,
    frequency_range: [f64; 2],
    options: SweepOptions,
) -> AcousticResult<Signal> {
    time_domain_sweep(n_samples, frequency_range, options, SweepKind::Linear)
}

/// Sweep with exponentially increasing frequency.
///
/// The start frequency must be above 0 Hz.
///
/// # Examples
///
/// ```
/// use acoustic_signals::signals::{SweepOptions, exponential_sweep_time};
///
/// let sweep = exponential_sweep_time(2usize.pow(12), [20.0, 20000.0], SweepOptions::default())
///     .unwrap();
/// assert_eq!(sweep.n_samples(), 4096);
/// ```
pub fn exponential_sweep_time(
    n_samples: usize,
    frequency_range: [f64; 2],
    options: SweepOptions,
) -> AcousticResult<Signal> {
    time_domain_sweep(n_samples, frequency_range, options, SweepKind::Exponential)
}

/// Deprecated alias of [`linear_sweep_time`].
pub fn linear_sweep(
    gate: &DeprecationGate,
    n_samples: usize,
    frequency_range: [f64; 2],
    options: SweepOptions,
) -> AcousticResult<Signal> {
    gate.guard(&registry::LINEAR_SWEEP)?;
    linear_sweep_time(n_samples, frequency_range, options)
}

/// Deprecated alias of [`exponential_sweep_time`].
pub fn exponential_sweep(
    gate: &DeprecationGate,
    n_samples: usize,
    frequency_range: [f64; 2],
    options: SweepOptions,
) -> AcousticResult<Signal> {
    gate.guard(&registry::EXPONENTIAL_SWEEP)?;
    exponential_sweep_time(n_samples, frequency_range, options)
}

fn time_domain_sweep(
    n_samples: usize,
    [start, stop]: [f64; 2],
    options: SweepOptions,
    kind: SweepKind,
) -> AcousticResult<Signal> {
    let SweepOptions {
        n_fade_out,
        amplitude,
        sampling_rate,
    } = options;

    if n_samples < 2 {
        return Err(AcousticError::InvalidParameter(format!(
            "A sweep needs at least 2 samples, got {n_samples}"
        )));
    }
    if !(sampling_rate.is_finite() && sampling_rate > 0.0) {
        return Err(AcousticError::InvalidParameter(format!(
            "Sampling rate must be positive, got {sampling_rate}"
        )));
    }
    if stop > sampling_rate / 2.0 {
        return Err(AcousticError::InvalidParameter(format!(
            "Upper frequency limit {stop} Hz is larger than half the sampling rate"
        )));
    }
    if kind == SweepKind::Exponential && start <= 0.0 {
        return Err(AcousticError::InvalidParameter(
            "The exponential sweep can not start at 0 Hz".to_string(),
        ));
    }
    if kind == SweepKind::Exponential && start >= stop {
        return Err(AcousticError::InvalidParameter(format!(
            "The exponential sweep must rise, got {start} Hz to {stop} Hz"
        )));
    }
    if n_fade_out > n_samples {
        return Err(AcousticError::InvalidParameter(format!(
            "Fade-out of {n_fade_out} samples is longer than the sweep"
        )));
    }

    let duration = (n_samples - 1) as f64 / sampling_rate;
    let phase = |t: f64| match kind {
        SweepKind::Linear => 2.0 * PI * (start * t + (stop - start) / duration * t * t / 2.0),
        SweepKind::Exponential => {
            let rate = duration / (stop / start).ln();
            2.0 * PI * start * rate * ((t / rate).exp() - 1.0)
        }
    };

    let mut samples: Vec<f64> = (0..n_samples)
        .map(|n| amplitude * phase(n as f64 / sampling_rate).sin())
        .collect();

    // falling half of a Hann window, ending at zero
    let tail = n_samples - n_fade_out;
    for (i, sample) in samples[tail..].iter_mut().enumerate() {
        let x = (i + 1) as f64 / n_fade_out as f64;
        *sample *= (PI / 2.0 * x).cos().powi(2);
    }

    tracing::debug!(
        ?kind,
        n_samples,
        start,
        stop,
        sampling_rate,
        "generated sweep"
    );
    Signal::from_samples(samples, sampling_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;

    #[test]
    fn test_linear_sweep_defaults() {
        let sweep = linear_sweep_time(1000, [0.0, 22050.0], SweepOptions::default()).unwrap();
        assert_eq!(sweep.n_samples(), 1000);
        assert_eq!(sweep.sampling_rate(), 44100.0);
        // starts at zero phase, ends on the faded sample
        assert!(sweep.time()[[0, 0]].abs() < 1e-12);
        assert!(sweep.time()[[0, 999]].abs() < 1e-12);
        assert!(sweep.time().iter().all(|v| v.abs() <= 1.0 + 1e-12));
    }

    #[test]
    fn test_exponential_sweep_amplitude() {
        let options = SweepOptions {
            n_fade_out: 0,
            amplitude: 0.5,
            sampling_rate: 48000.0,
        };
        let sweep = exponential_sweep_time(4800, [100.0, 10000.0], options).unwrap();
        let peak = sweep.time().iter().fold(0.0f64, |m, v| m.max(v.abs()));
        assert!(peak <= 0.5 + 1e-12);
        assert!(peak > 0.49);
    }

    #[test]
    fn test_fade_out_only_touches_the_tail() {
        let options = SweepOptions {
            n_fade_out: 10,
            amplitude: 1.0,
            sampling_rate: 100.0,
        };
        let faded = linear_sweep_time(100, [13.0, 13.0], options).unwrap();
        let unfaded = linear_sweep_time(
            100,
            [13.0, 13.0],
            SweepOptions {
                n_fade_out: 0,
                ..options
            },
        )
        .unwrap();
        let (faded, unfaded) = (faded.time().row(0), unfaded.time().row(0));
        for n in 0..90 {
            assert_eq!(faded[n], unfaded[n]);
        }
        for n in 90..100 {
            assert!(faded[n].abs() <= unfaded[n].abs());
        }
        assert_approx_eq!(faded[90] / unfaded[90], (PI / 20.0).cos().powi(2), 1e-9);
    }

    #[test]
    fn test_sweep_validation() {
        let options = SweepOptions::default();
        assert!(exponential_sweep_time(1000, [0.0, 1000.0], options).is_err());
        assert!(linear_sweep_time(1000, [20.0, 30000.0], options).is_err());
        assert!(linear_sweep_time(50, [20.0, 2000.0], options).is_err());
        assert!(linear_sweep_time(1, [20.0, 2000.0], options).is_err());
    }

    #[test]
    fn test_exponential_sweep_needs_rising_range() {
        let options = SweepOptions::default();
        for range in [[1000.0, 1000.0], [2000.0, 1000.0]] {
            assert!(matches!(
                exponential_sweep_time(256, range, options),
                Err(AcousticError::InvalidParameter(_))
            ));
        }
        let sweep = exponential_sweep_time(256, [1000.0, 2000.0], options).unwrap();
        assert!(sweep.time().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_deprecated_sweeps() {
        let (gate, notices) = DeprecationGate::recording("0.4.0").unwrap();
        let old = linear_sweep(&gate, 256, [20.0, 2000.0], SweepOptions::default()).unwrap();
        let new = linear_sweep_time(256, [20.0, 2000.0], SweepOptions::default()).unwrap();
        assert_eq!(old, new);
        exponential_sweep(&gate, 256, [20.0, 2000.0], SweepOptions::default()).unwrap();
        assert_eq!(notices.count_matching("sweep will be deprecated in version 0.5.0"), 2);

        let gate = DeprecationGate::at_version("0.5.0").unwrap();
        assert!(
            linear_sweep(&gate, 256, [20.0, 2000.0], SweepOptions::default())
                .unwrap_err()
                .is_removal()
        );
    }
}
