//! Second-order section filters.

use ndarray::{Array1, Array2, ArrayView1, Axis};
use num_complex::Complex;
use std::f64::consts::PI;

use crate::{AcousticError, AcousticResult, Signal};

/// One biquad section with its direct form II transposed state.
#[derive(Debug, Clone)]
struct Biquad {
    b: [f64; 3],
    a: [f64; 3],
    z1: f64,
    z2: f64,
}

impl Biquad {
    fn new(row: ArrayView1<'_, f64>) -> Self {
        // sections are stored normalized, a0 == 1
        Self {
            b: [row[0], row[1], row[2]],
            a: [row[3], row[4], row[5]],
            z1: 0.0,
            z2: 0.0,
        }
    }

    fn process_sample(&mut self, input: f64) -> f64 {
        let output = self.b[0] * input + self.z1;
        self.z1 = self.b[1] * input - self.a[1] * output + self.z2;
        self.z2 = self.b[2] * input - self.a[2] * output;
        output
    }

    fn reset(&mut self) {
        self.z1 = 0.0;
        self.z2 = 0.0;
    }

    fn response(&self, z_inv: Complex<f64>) -> Complex<f64> {
        let z_inv2 = z_inv * z_inv;
        let numerator = self.b[0] + self.b[1] * z_inv + self.b[2] * z_inv2;
        let denominator = self.a[0] + self.a[1] * z_inv + self.a[2] * z_inv2;
        numerator / denominator
    }
}

/// A cascade of second-order sections.
///
/// Each row of `sos` holds `[b0, b1, b2, a0, a1, a2]` with `a0 == 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSos {
    sos: Array2<f64>,
    sampling_rate: f64,
    comment: String,
}

impl FilterSos {
    /// Create a filter from its section matrix.
    pub fn new(
        sos: Array2<f64>,
        sampling_rate: f64,
        comment: impl Into<String>,
    ) -> AcousticResult<Self> {
        if sos.ncols() != 6 || sos.nrows() == 0 {
            return Err(AcousticError::DimensionMismatch(format!(
                "Second-order sections need shape (n, 6), got {:?}",
                sos.dim()
            )));
        }
        if sos.column(3).iter().any(|&a0| a0 == 0.0) {
            return Err(AcousticError::InvalidParameter(
                "Leading denominator coefficient of a section cannot be zero".to_string(),
            ));
        }
        // normalize so a0 == 1 for every section
        let mut sos = sos;
        for mut row in sos.axis_iter_mut(Axis(0)) {
            let a0 = row[3];
            row.mapv_inplace(|c| c / a0);
        }
        Ok(Self {
            sos,
            sampling_rate,
            comment: comment.into(),
        })
    }

    /// Section coefficients.
    pub const fn coefficients(&self) -> &Array2<f64> {
        &self.sos
    }

    /// Number of second-order sections.
    pub fn n_sections(&self) -> usize {
        self.sos.nrows()
    }

    /// Sampling rate the filter was designed for.
    pub const fn sampling_rate(&self) -> f64 {
        self.sampling_rate
    }

    /// Free text describing the design.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    fn sections(&self) -> Vec<Biquad> {
        self.sos
            .axis_iter(Axis(0))
            .map(Biquad::new)
            .collect()
    }

    /// Filter each channel independently, starting from rest.
    pub fn process(&self, signal: &Signal) -> AcousticResult<Signal> {
        if (signal.sampling_rate() - self.sampling_rate).abs() > f64::EPSILON {
            return Err(AcousticError::InvalidParameter(format!(
                "Filter sampling rate {} Hz does not match signal sampling rate {} Hz",
                self.sampling_rate,
                signal.sampling_rate()
            )));
        }

        let mut sections = self.sections();
        let mut output = signal.time().clone();
        for mut channel in output.axis_iter_mut(Axis(0)) {
            for section in sections.iter_mut() {
                section.reset();
                for sample in channel.iter_mut() {
                    *sample = section.process_sample(*sample);
                }
            }
        }
        signal.with_time(output)
    }

    /// Complex response at each frequency in Hz.
    pub fn frequency_response(&self, frequencies: &[f64]) -> Array1<Complex<f64>> {
        let sections = self.sections();
        Array1::from_iter(frequencies.iter().map(|&freq| {
            let omega = 2.0 * PI * freq / self.sampling_rate;
            let z_inv = Complex::new(0.0, -omega).exp();
            sections
                .iter()
                .fold(Complex::new(1.0, 0.0), |acc, section| {
                    acc * section.response(z_inv)
                })
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;
    use ndarray::array;

    #[test]
    fn test_sections_are_normalized() {
        let filter = FilterSos::new(array![[2.0, 0.0, 0.0, 2.0, 1.0, 0.0]], 48000.0, "").unwrap();
        assert_eq!(filter.coefficients(), &array![[1.0, 0.0, 0.0, 1.0, 0.5, 0.0]]);
        assert_eq!(filter.n_sections(), 1);
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(FilterSos::new(array![[1.0, 0.0, 0.0, 1.0, 0.0]], 48000.0, "").is_err());
        assert!(FilterSos::new(array![[1.0, 0.0, 0.0, 0.0, 0.0, 0.0]], 48000.0, "").is_err());
    }

    #[test]
    fn test_process_one_pole_impulse_response() {
        // y[n] = x[n] - 0.5 y[n-1]
        let filter = FilterSos::new(array![[1.0, 0.0, 0.0, 1.0, 0.5, 0.0]], 1000.0, "").unwrap();
        let impulse = Signal::from_samples(vec![1.0, 0.0, 0.0, 0.0], 1000.0).unwrap();
        let out = filter.process(&impulse).unwrap();
        assert_eq!(out.time(), &array![[1.0, -0.5, 0.25, -0.125]]);
    }

    #[test]
    fn test_process_channels_start_from_rest() {
        let filter = FilterSos::new(array![[1.0, 1.0, 0.0, 1.0, 0.0, 0.0]], 1000.0, "").unwrap();
        let signal = Signal::new(array![[1.0, 0.0, 0.0], [1.0, 0.0, 0.0]], 1000.0).unwrap();
        let out = filter.process(&signal).unwrap();
        assert_eq!(out.time(), &array![[1.0, 1.0, 0.0], [1.0, 1.0, 0.0]]);
    }

    #[test]
    fn test_process_rejects_rate_mismatch() {
        let filter = FilterSos::new(array![[1.0, 0.0, 0.0, 1.0, 0.0, 0.0]], 1000.0, "").unwrap();
        let signal = Signal::from_samples(vec![1.0], 2000.0).unwrap();
        assert!(filter.process(&signal).is_err());
    }

    #[test]
    fn test_frequency_response_of_moving_average() {
        let filter = FilterSos::new(array![[0.5, 0.5, 0.0, 1.0, 0.0, 0.0]], 1000.0, "").unwrap();
        let response = filter.frequency_response(&[0.0, 500.0]);
        assert_approx_eq!(response[0].norm(), 1.0, 1e-12);
        assert!(response[1].norm() < 1e-12);
    }
}
