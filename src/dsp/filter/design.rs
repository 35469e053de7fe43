//! IIR filter design in zero-pole-gain form.
//!
//! Designs start from a normalized analog low-pass prototype, are moved to the
//! requested band with the classic frequency transformations and mapped to the
//! z-plane with the bilinear transform. The result is factored into
//! second-order sections.

use ndarray::Array2;
use num_complex::Complex;
use std::f64::consts::{FRAC_PI_2, PI};

use super::FilterResponse;
use crate::{AcousticError, AcousticResult};

type C64 = Complex<f64>;

/// Imaginary parts below this are treated as real roots.
const REAL_TOLERANCE: f64 = 1e-10;
/// Landen iterations stop once the modulus drops below this.
const LANDEN_TOLERANCE: f64 = 1e-15;
const MAX_LANDEN_STEPS: usize = 64;

/// Zeros, poles and gain of a transfer function.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Zpk {
    pub zeros: Vec<C64>,
    pub poles: Vec<C64>,
    pub gain: f64,
}

impl Zpk {
    fn degree(&self) -> usize {
        self.poles.len().saturating_sub(self.zeros.len())
    }
}

/// Edge frequencies of the analog target in rad/s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum AnalogBand {
    Single(f64),
    Band(f64, f64),
}

fn product(roots: &[C64], f: impl Fn(C64) -> C64) -> C64 {
    roots.iter().fold(C64::new(1.0, 0.0), |acc, &r| acc * f(r))
}

/// Alternating pole angles `-N+1, -N+3, ..., N-1` used by the classic prototypes.
fn symmetric_indices(order: usize) -> impl Iterator<Item = f64> {
    let n = order as i64;
    (0..n).map(move |i| (-n + 1 + 2 * i) as f64)
}

/// Butterworth prototype with its -3 dB point at 1 rad/s.
pub(crate) fn butterworth_prototype(order: usize) -> Zpk {
    let n = order as f64;
    let poles = symmetric_indices(order)
        .map(|m| -C64::new(0.0, PI * m / (2.0 * n)).exp())
        .collect();
    Zpk {
        zeros: Vec::new(),
        poles,
        gain: 1.0,
    }
}

/// Chebyshev type I prototype with `ripple` dB of passband ripple up to 1 rad/s.
pub(crate) fn chebyshev1_prototype(order: usize, ripple: f64) -> Zpk {
    let n = order as f64;
    let eps = (10f64.powf(0.1 * ripple) - 1.0).sqrt();
    let mu = (1.0 / eps).asinh() / n;

    let poles: Vec<C64> = symmetric_indices(order)
        .map(|m| -C64::new(mu, PI * m / (2.0 * n)).sinh())
        .collect();

    let mut gain = product(&poles, |p| -p).re;
    if order % 2 == 0 {
        gain /= (1.0 + eps * eps).sqrt();
    }
    Zpk {
        zeros: Vec::new(),
        poles,
        gain,
    }
}

/// Chebyshev type II prototype reaching `attenuation` dB at 1 rad/s.
pub(crate) fn chebyshev2_prototype(order: usize, attenuation: f64) -> Zpk {
    let n = order as f64;
    let de = 1.0 / (10f64.powf(0.1 * attenuation) - 1.0).sqrt();
    let mu = (1.0 / de).asinh() / n;

    // the odd-order zero at infinity has no finite counterpart
    let zeros: Vec<C64> = symmetric_indices(order)
        .filter(|&m| m != 0.0)
        .map(|m| C64::new(0.0, 1.0 / (m * PI / (2.0 * n)).sin()))
        .collect();

    let poles: Vec<C64> = symmetric_indices(order)
        .map(|m| {
            let p = -C64::new(0.0, PI * m / (2.0 * n)).exp();
            1.0 / C64::new(mu.sinh() * p.re, mu.cosh() * p.im)
        })
        .collect();

    let gain = (product(&poles, |p| -p) / product(&zeros, |z| -z)).re;
    Zpk { zeros, poles, gain }
}

/// Descending Landen sequence of moduli starting from `k`.
fn landen(k: f64) -> Vec<f64> {
    let mut moduli = Vec::new();
    let mut k = k;
    for _ in 0..MAX_LANDEN_STEPS {
        if k <= LANDEN_TOLERANCE {
            break;
        }
        k = (k / (1.0 + (1.0 - k * k).sqrt())).powi(2);
        moduli.push(k);
    }
    moduli
}

/// Jacobi `cd(uK, k)` for complex `u` by ascending Landen transformation.
fn cde(u: C64, k: f64) -> C64 {
    ascend((u * FRAC_PI_2).cos(), k)
}

/// Jacobi `sn(uK, k)` for complex `u` by ascending Landen transformation.
fn sne(u: C64, k: f64) -> C64 {
    ascend((u * FRAC_PI_2).sin(), k)
}

fn ascend(w: C64, k: f64) -> C64 {
    landen(k)
        .iter()
        .rev()
        .fold(w, |w, &v| (1.0 + v) * w / (1.0 + v * w * w))
}

/// Inverse of [`cde`], returning `u` in units of the quarter period.
fn acde(w: C64, k: f64) -> C64 {
    let mut previous = k;
    let mut w = w;
    for v in landen(k) {
        w = w / (1.0 + (1.0 - w * w * previous * previous).sqrt()) * 2.0 / (1.0 + v);
        previous = v;
    }
    w.acos() * 2.0 / PI
}

/// Inverse of [`sne`].
fn asne(w: C64, k: f64) -> C64 {
    1.0 - acde(w, k)
}

/// Solve the degree equation for the selectivity modulus.
fn elliptic_degree(order: usize, k1: f64) -> f64 {
    let n = order as f64;
    let k1p = (1.0 - k1 * k1).sqrt();
    let product: f64 = (1..=order / 2)
        .map(|i| sne(C64::new((2 * i - 1) as f64 / n, 0.0), k1p).re)
        .product();
    let kp = k1p.powi(order as i32) * product.powi(4);
    (1.0 - kp * kp).sqrt()
}

/// Elliptic (Cauer) prototype with its passband edge at 1 rad/s.
pub(crate) fn elliptic_prototype(
    order: usize,
    ripple: f64,
    attenuation: f64,
) -> AcousticResult<Zpk> {
    if attenuation <= ripple {
        return Err(AcousticError::InvalidParameter(
            "Stopband attenuation must exceed the passband ripple".to_string(),
        ));
    }
    let n = order as f64;
    let ep = (10f64.powf(0.1 * ripple) - 1.0).sqrt();
    let es = (10f64.powf(0.1 * attenuation) - 1.0).sqrt();
    let k1 = ep / es;
    let k = elliptic_degree(order, k1);

    let v0 = (-C64::i() * asne(C64::new(0.0, 1.0 / ep), k1)).re / n;

    let mut zeros = Vec::with_capacity(order);
    let mut poles = Vec::with_capacity(order);
    for i in 1..=order / 2 {
        let u = (2 * i - 1) as f64 / n;
        let zeta = cde(C64::new(u, 0.0), k).re;
        let zero = C64::new(0.0, 1.0 / (k * zeta));
        zeros.push(zero);
        zeros.push(zero.conj());

        let pole = C64::i() * cde(C64::new(u, -v0), k);
        poles.push(pole);
        poles.push(pole.conj());
    }
    if order % 2 == 1 {
        let pole = C64::i() * sne(C64::new(0.0, v0), k);
        poles.push(C64::new(pole.re, 0.0));
    }

    let dc_gain = if order % 2 == 1 {
        1.0
    } else {
        1.0 / (1.0 + ep * ep).sqrt()
    };
    let gain = dc_gain * (product(&poles, |p| -p) / product(&zeros, |z| -z)).re;
    Ok(Zpk { zeros, poles, gain })
}

/// Move a normalized low-pass prototype to the requested analog band.
pub(crate) fn transform(
    prototype: Zpk,
    response: FilterResponse,
    band: AnalogBand,
) -> AcousticResult<Zpk> {
    let degree = prototype.degree();
    match (response, band) {
        (FilterResponse::LowPass, AnalogBand::Single(wo)) => Ok(Zpk {
            zeros: prototype.zeros.iter().map(|&z| z * wo).collect(),
            poles: prototype.poles.iter().map(|&p| p * wo).collect(),
            gain: prototype.gain * wo.powi(degree as i32),
        }),
        (FilterResponse::HighPass, AnalogBand::Single(wo)) => {
            let gain = prototype.gain
                * (product(&prototype.zeros, |z| -z) / product(&prototype.poles, |p| -p)).re;
            let mut zeros: Vec<C64> = prototype.zeros.iter().map(|&z| wo / z).collect();
            zeros.extend(std::iter::repeat_n(C64::new(0.0, 0.0), degree));
            Ok(Zpk {
                zeros,
                poles: prototype.poles.iter().map(|&p| wo / p).collect(),
                gain,
            })
        }
        (FilterResponse::BandPass, AnalogBand::Band(low, high)) => {
            let wo = (low * high).sqrt();
            let bw = high - low;
            let split = |roots: &[C64]| -> Vec<C64> {
                let scaled: Vec<C64> = roots.iter().map(|&r| r * bw / 2.0).collect();
                let plus = scaled.iter().map(|&r| r + (r * r - wo * wo).sqrt());
                let minus = scaled.iter().map(|&r| r - (r * r - wo * wo).sqrt());
                plus.chain(minus).collect()
            };
            let mut zeros = split(&prototype.zeros);
            zeros.extend(std::iter::repeat_n(C64::new(0.0, 0.0), degree));
            Ok(Zpk {
                zeros,
                poles: split(&prototype.poles),
                gain: prototype.gain * bw.powi(degree as i32),
            })
        }
        (FilterResponse::BandStop, AnalogBand::Band(low, high)) => {
            let wo = (low * high).sqrt();
            let bw = high - low;
            let split = |roots: &[C64]| -> Vec<C64> {
                let inverted: Vec<C64> = roots.iter().map(|&r| (bw / 2.0) / r).collect();
                let plus = inverted.iter().map(|&r| r + (r * r - wo * wo).sqrt());
                let minus = inverted.iter().map(|&r| r - (r * r - wo * wo).sqrt());
                plus.chain(minus).collect()
            };
            let gain = prototype.gain
                * (product(&prototype.zeros, |z| -z) / product(&prototype.poles, |p| -p)).re;
            let mut zeros = split(&prototype.zeros);
            zeros.extend(std::iter::repeat_n(C64::new(0.0, wo), degree));
            zeros.extend(std::iter::repeat_n(C64::new(0.0, -wo), degree));
            Ok(Zpk {
                zeros,
                poles: split(&prototype.poles),
                gain,
            })
        }
        (response, band) => Err(AcousticError::InvalidParameter(format!(
            "{response:?} filters need {}, got {band:?}",
            if matches!(response, FilterResponse::LowPass | FilterResponse::HighPass) {
                "a single cut-off frequency"
            } else {
                "a lower and an upper frequency"
            }
        ))),
    }
}

/// Map an analog design to the z-plane.
pub(crate) fn bilinear(analog: Zpk, sampling_rate: f64) -> Zpk {
    let fs2 = 2.0 * sampling_rate;
    let degree = analog.degree();
    let map = |r: C64| (fs2 + r) / (fs2 - r);

    let gain = analog.gain
        * (product(&analog.zeros, |z| fs2 - z) / product(&analog.poles, |p| fs2 - p)).re;
    let mut zeros: Vec<C64> = analog.zeros.iter().map(|&z| map(z)).collect();
    zeros.extend(std::iter::repeat_n(C64::new(-1.0, 0.0), degree));

    Zpk {
        zeros,
        poles: analog.poles.iter().map(|&p| map(p)).collect(),
        gain,
    }
}

/// Pre-warped analog frequency in rad/s for a digital frequency in Hz.
pub(crate) fn prewarp(frequency: f64, sampling_rate: f64) -> f64 {
    2.0 * sampling_rate * (PI * frequency / sampling_rate).tan()
}

/// A real polynomial `1 + c1 z^-1 + c2 z^-2` and the root used to pair it.
#[derive(Debug, Clone, Copy)]
struct Quadratic {
    coefficients: [f64; 3],
    root: C64,
}

fn quadratics(roots: &[C64]) -> Vec<Quadratic> {
    let mut factors = Vec::new();
    let mut reals: Vec<f64> = Vec::new();
    for &root in roots {
        if root.im.abs() <= REAL_TOLERANCE * root.norm().max(1.0) {
            reals.push(root.re);
        } else if root.im > 0.0 {
            // the conjugate is implied
            factors.push(Quadratic {
                coefficients: [1.0, -2.0 * root.re, root.norm_sqr()],
                root,
            });
        }
    }
    reals.sort_by(|a, b| a.total_cmp(b));
    let pairs = reals.chunks_exact(2);
    let unpaired = pairs.remainder().first().copied();
    for pair in pairs {
        let (a, b) = (pair[0], pair[1]);
        factors.push(Quadratic {
            coefficients: [1.0, -(a + b), a * b],
            root: C64::new(if a.abs() >= b.abs() { a } else { b }, 0.0),
        });
    }
    if let Some(a) = unpaired {
        factors.push(Quadratic {
            coefficients: [1.0, -a, 0.0],
            root: C64::new(a, 0.0),
        });
    }
    factors
}

/// Factor a digital design into second-order sections.
///
/// Sections are ordered with the poles closest to the unit circle last; each
/// pole pair is matched with the nearest remaining zero pair.
pub(crate) fn to_sos(digital: &Zpk) -> Array2<f64> {
    let mut pole_factors = quadratics(&digital.poles);
    pole_factors.sort_by(|a, b| a.root.norm().total_cmp(&b.root.norm()));
    let mut zero_factors = quadratics(&digital.zeros);

    let n_sections = pole_factors.len().max(zero_factors.len()).max(1);
    let unity = Quadratic {
        coefficients: [1.0, 0.0, 0.0],
        root: C64::new(0.0, 0.0),
    };
    pole_factors.resize(n_sections, unity);

    let mut numerators = vec![unity.coefficients; n_sections];
    for section in (0..n_sections).rev() {
        let target = pole_factors[section].root;
        let nearest = zero_factors
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (a.root - target).norm().total_cmp(&(b.root - target).norm()))
            .map(|(index, _)| index);
        if let Some(index) = nearest {
            numerators[section] = zero_factors.swap_remove(index).coefficients;
        }
    }

    let mut sos = Array2::zeros((n_sections, 6));
    for (section, (numerator, denominator)) in numerators.iter().zip(&pole_factors).enumerate() {
        let scale = if section == 0 { digital.gain } else { 1.0 };
        for i in 0..3 {
            sos[[section, i]] = numerator[i] * scale;
            sos[[section, 3 + i]] = denominator.coefficients[i];
        }
    }
    sos
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;

    fn analog_magnitude(zpk: &Zpk, omega: f64) -> f64 {
        let s = C64::new(0.0, omega);
        (zpk.gain * product(&zpk.zeros, |z| s - z) / product(&zpk.poles, |p| s - p)).norm()
    }

    #[test]
    fn test_butterworth_prototype_half_power_at_unity() {
        for order in 1..=6 {
            let zpk = butterworth_prototype(order);
            assert_eq!(zpk.poles.len(), order);
            assert!(zpk.poles.iter().all(|p| p.re < 0.0));
            assert_approx_eq!(analog_magnitude(&zpk, 1.0), 0.5f64.sqrt(), 1e-9);
        }
    }

    #[test]
    fn test_chebyshev1_prototype_ripple_at_edge() {
        let zpk = chebyshev1_prototype(5, 1.0);
        let ripple_gain = 10f64.powf(-1.0 / 20.0);
        assert_approx_eq!(analog_magnitude(&zpk, 0.0), 1.0, 1e-9);
        assert_approx_eq!(analog_magnitude(&zpk, 1.0), ripple_gain, 1e-9);
    }

    #[test]
    fn test_chebyshev2_prototype_attenuation_at_edge() {
        let zpk = chebyshev2_prototype(4, 40.0);
        assert_eq!(zpk.zeros.len(), 4);
        assert_approx_eq!(analog_magnitude(&zpk, 0.0), 1.0, 1e-9);
        assert_approx_eq!(analog_magnitude(&zpk, 1.0), 0.01, 1e-6);

        let odd = chebyshev2_prototype(3, 40.0);
        assert_eq!(odd.zeros.len(), 2);
    }

    #[test]
    fn test_elliptic_prototype_edges() {
        let ripple_gain = 10f64.powf(-1.0 / 20.0);

        let odd = elliptic_prototype(3, 1.0, 60.0).unwrap();
        assert_eq!(odd.poles.len(), 3);
        assert_eq!(odd.zeros.len(), 2);
        assert!(odd.poles.iter().all(|p| p.re < 0.0));
        assert_approx_eq!(analog_magnitude(&odd, 0.0), 1.0, 1e-9);
        assert_approx_eq!(analog_magnitude(&odd, 1.0), ripple_gain, 1e-4);

        let even = elliptic_prototype(4, 1.0, 60.0).unwrap();
        assert!(even.poles.iter().all(|p| p.re < 0.0));
        assert_approx_eq!(analog_magnitude(&even, 0.0), ripple_gain, 1e-9);
        assert_approx_eq!(analog_magnitude(&even, 1.0), ripple_gain, 1e-4);
    }

    #[test]
    fn test_elliptic_prototype_rejects_inverted_bands() {
        assert!(elliptic_prototype(4, 3.0, 3.0).is_err());
    }

    #[test]
    fn test_landen_terminates_for_extreme_moduli() {
        assert!(landen(0.0).is_empty());
        assert!(landen(0.999_999_999).len() < MAX_LANDEN_STEPS);
    }

    #[test]
    fn test_transform_rejects_band_mismatch() {
        let zpk = butterworth_prototype(2);
        assert!(transform(zpk.clone(), FilterResponse::BandPass, AnalogBand::Single(1.0)).is_err());
        assert!(transform(zpk, FilterResponse::LowPass, AnalogBand::Band(1.0, 2.0)).is_err());
    }

    #[test]
    fn test_bilinear_keeps_poles_inside_unit_circle() {
        let analog = transform(
            butterworth_prototype(6),
            FilterResponse::LowPass,
            AnalogBand::Single(prewarp(1000.0, 48000.0)),
        )
        .unwrap();
        let digital = bilinear(analog, 48000.0);
        assert_eq!(digital.zeros.len(), 6);
        assert!(digital.poles.iter().all(|p| p.norm() < 1.0));
    }

    #[test]
    fn test_sos_sections_for_odd_order() {
        let analog = transform(
            butterworth_prototype(5),
            FilterResponse::LowPass,
            AnalogBand::Single(prewarp(1000.0, 48000.0)),
        )
        .unwrap();
        let sos = to_sos(&bilinear(analog, 48000.0));
        assert_eq!(sos.dim(), (3, 6));
        for row in sos.rows() {
            assert_eq!(row[3], 1.0);
        }
    }
}
