//! Short-time Fourier transform for spectrograms.

use ndarray::{Array1, Array2, ArrayView1};
use num_complex::Complex;
use rustfft::FftPlanner;
use std::f64::consts::PI;

use crate::{AcousticError, AcousticResult};

/// Accepted window names.
pub const WINDOWS: &[&str] = &["hann", "hamming", "blackman", "boxcar"];

/// Analysis window of a spectrogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Window {
    /// Raised cosine.
    #[default]
    Hann,
    /// Raised cosine on a pedestal.
    Hamming,
    /// Three term Blackman window.
    Blackman,
    /// Rectangular window.
    Boxcar,
}

impl Window {
    /// Parse a window name.
    pub fn parse(name: &str) -> AcousticResult<Self> {
        match name {
            "hann" => Ok(Self::Hann),
            "hamming" => Ok(Self::Hamming),
            "blackman" => Ok(Self::Blackman),
            "boxcar" => Ok(Self::Boxcar),
            other => Err(AcousticError::invalid_value("window", other, WINDOWS)),
        }
    }

    /// Periodic window coefficients of length `size`.
    pub fn coefficients(self, size: usize) -> Array1<f64> {
        let n = size as f64;
        Array1::from_iter((0..size).map(|i| {
            let phase = 2.0 * PI * i as f64 / n;
            match self {
                Self::Hann => 0.5 - 0.5 * phase.cos(),
                Self::Hamming => 0.54 - 0.46 * phase.cos(),
                Self::Blackman => 0.42 - 0.5 * phase.cos() + 0.08 * (2.0 * phase).cos(),
                Self::Boxcar => 1.0,
            }
        }))
    }
}

/// Magnitude spectrogram of one channel.
pub(crate) struct Stft {
    /// Bin frequencies in Hz.
    pub frequencies: Array1<f64>,
    /// Frame centers in seconds.
    pub times: Array1<f64>,
    /// Magnitudes as `[bin, frame]`.
    pub magnitude: Array2<f64>,
}

/// Windowed one-sided STFT magnitude.
///
/// Frames advance by `window_length - overlap` samples; the spectrum of each
/// frame is normalized by the window sum so a full-scale sine reads about 0.5.
pub(crate) fn stft(
    samples: ArrayView1<'_, f64>,
    sampling_rate: f64,
    window: Window,
    window_length: usize,
    overlap_factor: f64,
) -> AcousticResult<Stft> {
    if window_length < 2 {
        return Err(AcousticError::InvalidParameter(format!(
            "Window length must be at least 2 samples, got {window_length}"
        )));
    }
    if !(0.0..1.0).contains(&overlap_factor) {
        return Err(AcousticError::InvalidParameter(format!(
            "Window overlap factor must be in [0, 1), got {overlap_factor}"
        )));
    }
    if samples.len() < window_length {
        return Err(AcousticError::DimensionMismatch(format!(
            "Signal of {} samples is shorter than the window length {window_length}",
            samples.len()
        )));
    }

    let overlap = (window_length as f64 * overlap_factor) as usize;
    let hop = window_length - overlap;
    let n_frames = (samples.len() - window_length) / hop + 1;
    let n_bins = window_length / 2 + 1;

    let coefficients = window.coefficients(window_length);
    let norm = coefficients.sum();
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(window_length);

    let mut magnitude = Array2::zeros((n_bins, n_frames));
    let mut buffer = vec![Complex::new(0.0, 0.0); window_length];
    for frame in 0..n_frames {
        let start = frame * hop;
        for (slot, (&sample, &w)) in buffer
            .iter_mut()
            .zip(samples.iter().skip(start).zip(coefficients.iter()))
        {
            *slot = Complex::new(sample * w, 0.0);
        }
        fft.process(&mut buffer);
        for (bin, value) in buffer.iter().take(n_bins).enumerate() {
            magnitude[[bin, frame]] = value.norm() / norm;
        }
    }

    let frequencies = Array1::from_iter(
        (0..n_bins).map(|k| k as f64 * sampling_rate / window_length as f64),
    );
    let center = window_length as f64 / 2.0;
    let times = Array1::from_iter(
        (0..n_frames).map(|frame| ((frame * hop) as f64 + center) / sampling_rate),
    );
    Ok(Stft {
        frequencies,
        times,
        magnitude,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;

    #[test]
    fn test_frame_layout() {
        let samples = Array1::zeros(4096);
        let result = stft(samples.view(), 1024.0, Window::Hann, 1024, 0.5).unwrap();
        assert_eq!(result.magnitude.dim(), (513, 7));
        assert_eq!(result.frequencies[1], 1.0);
        assert_approx_eq!(result.times[0], 0.5, 1e-12);
        assert_approx_eq!(result.times[1], 1.0, 1e-12);
    }

    #[test]
    fn test_sine_peaks_at_its_bin() {
        let fs = 1024.0;
        let samples = Array1::from_iter((0..2048).map(|n| (2.0 * PI * 64.0 * n as f64 / fs).sin()));
        let result = stft(samples.view(), fs, Window::Hann, 256, 0.0).unwrap();
        let column = result.magnitude.column(0);
        let peak = column
            .iter()
            .enumerate()
            .fold((0, 0.0), |best, (i, &v)| if v > best.1 { (i, v) } else { best });
        assert_eq!(peak.0, 16);
        assert_approx_eq!(peak.1, 0.5, 1e-9);
    }

    #[test]
    fn test_validation() {
        let samples = Array1::zeros(100);
        assert!(stft(samples.view(), 100.0, Window::Hann, 256, 0.5).is_err());
        assert!(stft(samples.view(), 100.0, Window::Hann, 64, 1.0).is_err());
        assert!(Window::parse("kaiser").is_err());
    }
}
