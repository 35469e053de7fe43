//! Time-domain editing and filtering.

pub mod filter;

use ndarray::{Array2, s};

use crate::deprecation::{DeprecationGate, registry};
use crate::{AcousticError, AcousticResult, Signal};

/// Where [`pad_zeros`] inserts the zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadMode {
    /// Zeros precede the signal.
    Beginning,
    /// Zeros follow the signal.
    End,
    /// Zeros are inserted in the middle of the signal.
    Center,
}

impl PadMode {
    /// Resolve a mode name, honouring the deprecated `before` / `after` aliases.
    pub fn resolve(gate: &DeprecationGate, mode: &str) -> AcousticResult<Self> {
        match mode {
            "beginning" => Ok(Self::Beginning),
            "end" => Ok(Self::End),
            "center" => Ok(Self::Center),
            "before" => {
                gate.guard(&registry::PAD_ZEROS_BEFORE)?;
                Ok(Self::Beginning)
            }
            "after" => {
                gate.guard(&registry::PAD_ZEROS_AFTER)?;
                Ok(Self::End)
            }
            other => Err(AcousticError::invalid_value(
                "mode",
                other,
                registry::PAD_MODES,
            )),
        }
    }
}

/// Pad every channel of `signal` with `pad_width` zeros.
///
/// `mode` is one of `beginning`, `end` or `center`. The names `before` and
/// `after` are accepted with a notice until 0.8.0.
pub fn pad_zeros(
    gate: &DeprecationGate,
    signal: &Signal,
    pad_width: usize,
    mode: &str,
) -> AcousticResult<Signal> {
    let mode = PadMode::resolve(gate, mode)?;
    let time = signal.time();
    let n_samples = time.ncols();
    let mut padded = Array2::zeros((time.nrows(), n_samples + pad_width));

    match mode {
        PadMode::Beginning => {
            padded.slice_mut(s![.., pad_width..]).assign(time);
        }
        PadMode::End => {
            padded.slice_mut(s![.., ..n_samples]).assign(time);
        }
        PadMode::Center => {
            // the first half keeps the extra sample for odd lengths
            let split = n_samples.div_ceil(2);
            padded
                .slice_mut(s![.., ..split])
                .assign(&time.slice(s![.., ..split]));
            padded
                .slice_mut(s![.., split + pad_width..])
                .assign(&time.slice(s![.., split..]));
        }
    }

    signal.with_time(padded)
}
