//! Deprecation lifecycle checks across the public API.
//!
//! Each test runs the same call against gates at several versions: before the
//! cutover the call must work and emit exactly one notice, from the cutover on
//! it must fail without side effects.


use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::deprecation::{DeprecationGate, NoticeRecorder};
use crate::{Coordinates, Signal};

pub(crate) fn recording(version: &str) -> (DeprecationGate, Arc<NoticeRecorder>) {
    DeprecationGate::recording(version).unwrap()
}

/// Seeded white noise in `[-1, 1)`.
pub(crate) fn noise(n_samples: usize, sampling_rate: f64) -> Signal {
    let mut rng = StdRng::seed_from_u64(0x2545_f491);
    let samples = (0..n_samples).map(|_| rng.random_range(-1.0..1.0)).collect();
    Signal::from_samples(samples, sampling_rate).unwrap()
}

pub(crate) fn grid() -> Coordinates {
    Coordinates::from_cartesian(
        &[1.0, 0.0, -1.0, 0.0, 0.0, 0.0],
        &[0.0, 1.0, 0.0, -1.0, 0.0, 0.0],
        &[0.0, 0.0, 0.0, 0.0, 1.0, -1.0],
    )
    .unwrap()
}
