//! The audio signal container.

use ndarray::{Array1, Array2, ArrayView1, Axis};
use num_complex::Complex;
use rustfft::FftPlanner;

use crate::deprecation::{DeprecationGate, registry};
use crate::{AcousticError, AcousticResult};

/// Multi-channel time data sampled at a fixed rate.
///
/// Samples are stored as `[channel, sample]` in double precision.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    time: Array2<f64>,
    sampling_rate: f64,
}

impl Signal {
    /// Create a signal from `[channel, sample]` data.
    pub fn new(time: Array2<f64>, sampling_rate: f64) -> AcousticResult<Self> {
        if !(sampling_rate.is_finite() && sampling_rate > 0.0) {
            return Err(AcousticError::InvalidParameter(format!(
                "Sampling rate must be positive and finite, got {sampling_rate}"
            )));
        }
        if time.nrows() == 0 || time.ncols() == 0 {
            return Err(AcousticError::DimensionMismatch(
                "Signal needs at least one channel and one sample".to_string(),
            ));
        }
        Ok(Self {
            time,
            sampling_rate,
        })
    }

    /// Create a single channel signal.
    pub fn from_samples(samples: Vec<f64>, sampling_rate: f64) -> AcousticResult<Self> {
        let n_samples = samples.len();
        let time = Array2::from_shape_vec((1, n_samples), samples)
            .map_err(|e| AcousticError::DimensionMismatch(e.to_string()))?;
        Self::new(time, sampling_rate)
    }

    /// Number of samples per channel.
    pub fn n_samples(&self) -> usize {
        self.time.ncols()
    }

    /// Number of channels.
    pub fn n_channels(&self) -> usize {
        self.time.nrows()
    }

    /// Sampling rate in Hz.
    pub const fn sampling_rate(&self) -> f64 {
        self.sampling_rate
    }

    /// Time data as `[channel, sample]`.
    pub const fn time(&self) -> &Array2<f64> {
        &self.time
    }

    /// Consume the signal, returning its time data.
    pub fn into_time(self) -> Array2<f64> {
        self.time
    }

    /// Sample times in seconds.
    pub fn times(&self) -> Array1<f64> {
        Array1::from_iter((0..self.n_samples()).map(|n| n as f64 / self.sampling_rate))
    }

    /// Duration of the signal in seconds.
    pub fn duration(&self) -> f64 {
        self.n_samples() as f64 / self.sampling_rate
    }

    /// One channel of the time data.
    pub fn channel(&self, index: usize) -> AcousticResult<ArrayView1<'_, f64>> {
        if index >= self.n_channels() {
            return Err(AcousticError::InvalidParameter(format!(
                "Channel {index} out of range for a signal with {} channels",
                self.n_channels()
            )));
        }
        Ok(self.time.index_axis(Axis(0), index))
    }

    /// Frequencies of the one-sided spectrum bins in Hz.
    pub fn frequencies(&self) -> Array1<f64> {
        let n = self.n_samples();
        let n_bins = n / 2 + 1;
        Array1::from_iter((0..n_bins).map(|k| k as f64 * self.sampling_rate / n as f64))
    }

    /// One-sided, unnormalized DFT of every channel as `[channel, bin]`.
    pub fn spectrum(&self) -> Array2<Complex<f64>> {
        let n = self.n_samples();
        let n_bins = n / 2 + 1;
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(n);

        let mut spectrum = Array2::zeros((self.n_channels(), n_bins));
        for (channel, mut row) in self
            .time
            .axis_iter(Axis(0))
            .zip(spectrum.axis_iter_mut(Axis(0)))
        {
            let mut buffer: Vec<Complex<f64>> =
                channel.iter().map(|&x| Complex::new(x, 0.0)).collect();
            fft.process(&mut buffer);
            for (bin, value) in row.iter_mut().zip(buffer.into_iter()) {
                *bin = value;
            }
        }
        spectrum
    }

    /// Number of samples, like [`Signal::n_samples`].
    ///
    /// Deprecated: emits a notice until 0.8.0 and fails from then on.
    pub fn len(&self, gate: &DeprecationGate) -> AcousticResult<usize> {
        gate.guard(&registry::SIGNAL_LEN)?;
        Ok(self.n_samples())
    }

    /// Build a signal that shares this one's sampling rate.
    pub(crate) fn with_time(&self, time: Array2<f64>) -> AcousticResult<Self> {
        Self::new(time, self.sampling_rate)
    }
}
