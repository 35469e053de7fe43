//! Every scheduled removal in the public API.
//!
//! Messages are part of the public contract: callers and tests match on them,
//! so reword them only together with a release note.

use super::gate::{DeprecationGate, DeprecationStatus};
use super::Deprecation;
use crate::version::Release;

const V0_4_0: Release = Release::new(0, 4, 0);
const V0_5_0: Release = Release::new(0, 5, 0);
const V0_6_0: Release = Release::new(0, 6, 0);
const V0_8_0: Release = Release::new(0, 8, 0);

/// Modes accepted by [`pad_zeros`](crate::dsp::pad_zeros) after the rename.
pub const PAD_MODES: &[&str] = &["beginning", "end", "center"];

/// Units accepted for time and group delay axes.
pub const TIME_UNITS: &[&str] = &["s", "ms", "mus", "samples", "auto"];

// removed in 0.5.0 ------------------------------------------------------------

/// `Coordinates::get_nearest_k`.
pub static GET_NEAREST_K: Deprecation = Deprecation::member(
    "Coordinates::get_nearest_k",
    "This function will be deprecated in version 0.5.0 in favor of find_nearest_k",
    V0_4_0,
    V0_5_0,
    Some("Coordinates::find_nearest_k"),
);

/// `Coordinates::get_nearest_cart`.
pub static GET_NEAREST_CART: Deprecation = Deprecation::member(
    "Coordinates::get_nearest_cart",
    "This function will be deprecated in version 0.5.0 in favor of find_within",
    V0_4_0,
    V0_5_0,
    Some("Coordinates::find_within"),
);

/// `Coordinates::get_nearest_sph`.
pub static GET_NEAREST_SPH: Deprecation = Deprecation::member(
    "Coordinates::get_nearest_sph",
    "This function will be deprecated in version 0.5.0 in favor of find_within",
    V0_4_0,
    V0_5_0,
    Some("Coordinates::find_within"),
);

/// `Coordinates::get_slice`.
pub static GET_SLICE: Deprecation = Deprecation::member(
    "Coordinates::get_slice",
    "This function will be deprecated in version 0.5.0 in favor of find_slice",
    V0_4_0,
    V0_5_0,
    Some("Coordinates::find_slice"),
);

/// `filter::butter`.
pub static BUTTER: Deprecation = Deprecation::member(
    "filter::butter",
    "butter will be deprecated in version 0.5.0. Use butterworth instead",
    V0_4_0,
    V0_5_0,
    Some("filter::butterworth"),
);

/// `filter::cheby1`.
pub static CHEBY1: Deprecation = Deprecation::member(
    "filter::cheby1",
    "cheby1 will be deprecated in version 0.5.0. Use chebyshev1 instead",
    V0_4_0,
    V0_5_0,
    Some("filter::chebyshev1"),
);

/// `filter::cheby2`.
pub static CHEBY2: Deprecation = Deprecation::member(
    "filter::cheby2",
    "cheby2 will be deprecated in version 0.5.0. Use chebyshev2 instead",
    V0_4_0,
    V0_5_0,
    Some("filter::chebyshev2"),
);

/// `filter::ellip`.
pub static ELLIP: Deprecation = Deprecation::member(
    "filter::ellip",
    "ellip will be deprecated in version 0.5.0. Use elliptic instead",
    V0_4_0,
    V0_5_0,
    Some("filter::elliptic"),
);

/// `filter::peq`.
pub static PEQ: Deprecation = Deprecation::member(
    "filter::peq",
    "peq will be deprecated in version 0.5.0. Use bell instead",
    V0_4_0,
    V0_5_0,
    Some("filter::bell"),
);

/// `io::read_wav`.
pub static READ_WAV: Deprecation = Deprecation::member(
    "io::read_wav",
    "read_wav will be deprecated in version 0.5.0. Use read_audio instead",
    V0_4_0,
    V0_5_0,
    Some("io::read_audio"),
);

/// `io::write_wav`.
pub static WRITE_WAV: Deprecation = Deprecation::member(
    "io::write_wav",
    "write_wav will be deprecated in version 0.5.0. Use write_audio instead",
    V0_4_0,
    V0_5_0,
    Some("io::write_audio"),
);

/// `signals::linear_sweep`.
pub static LINEAR_SWEEP: Deprecation = Deprecation::member(
    "signals::linear_sweep",
    "linear_sweep will be deprecated in version 0.5.0. Use linear_sweep_time instead",
    V0_4_0,
    V0_5_0,
    Some("signals::linear_sweep_time"),
);

/// `signals::exponential_sweep`.
pub static EXPONENTIAL_SWEEP: Deprecation = Deprecation::member(
    "signals::exponential_sweep",
    "exponential_sweep will be deprecated in version 0.5.0. Use exponential_sweep_time instead",
    V0_4_0,
    V0_5_0,
    Some("signals::exponential_sweep_time"),
);

// removed in 0.6.0 ------------------------------------------------------------

const XSCALE_MESSAGE: &str = "The xscale parameter will be removed in version 0.6.0. \
     Frequency axes are always logarithmic; change the scale on the returned axes instead";

/// `xscale` parameter of [`plot::freq`](crate::plot::freq).
pub static XSCALE_FREQ: Deprecation =
    Deprecation::member("plot::freq(xscale)", XSCALE_MESSAGE, V0_5_0, V0_6_0, None);

/// `xscale` parameter of [`plot::phase`](crate::plot::phase).
pub static XSCALE_PHASE: Deprecation =
    Deprecation::member("plot::phase(xscale)", XSCALE_MESSAGE, V0_5_0, V0_6_0, None);

/// `xscale` parameter of [`plot::group_delay`](crate::plot::group_delay).
pub static XSCALE_GROUP_DELAY: Deprecation = Deprecation::member(
    "plot::group_delay(xscale)",
    XSCALE_MESSAGE,
    V0_5_0,
    V0_6_0,
    None,
);

/// `xscale` parameter of [`plot::time_freq`](crate::plot::time_freq).
pub static XSCALE_TIME_FREQ: Deprecation = Deprecation::member(
    "plot::time_freq(xscale)",
    XSCALE_MESSAGE,
    V0_5_0,
    V0_6_0,
    None,
);

/// `xscale` parameter of [`plot::freq_phase`](crate::plot::freq_phase).
pub static XSCALE_FREQ_PHASE: Deprecation = Deprecation::member(
    "plot::freq_phase(xscale)",
    XSCALE_MESSAGE,
    V0_5_0,
    V0_6_0,
    None,
);

/// `xscale` parameter of [`plot::freq_group_delay`](crate::plot::freq_group_delay).
pub static XSCALE_FREQ_GROUP_DELAY: Deprecation = Deprecation::member(
    "plot::freq_group_delay(xscale)",
    XSCALE_MESSAGE,
    V0_5_0,
    V0_6_0,
    None,
);

/// `yscale` parameter of [`plot::spectrogram`](crate::plot::spectrogram).
pub static YSCALE_SPECTROGRAM: Deprecation = Deprecation::member(
    "plot::spectrogram(yscale)",
    "The yscale parameter will be removed in version 0.6.0. \
     Change the scale on the returned axes instead",
    V0_5_0,
    V0_6_0,
    None,
);

/// `unit=None` for time and group delay axes.
pub static TIME_UNIT_NONE: Deprecation = Deprecation::value(
    "plot::check_time_unit(unit=None)",
    "unit",
    "None",
    TIME_UNITS,
    "unit=None will be deprecated in version 0.6.0. \
     Pass unit=\"s\" to keep the current axis or unit=\"auto\" to choose it from the data",
    V0_5_0,
    V0_6_0,
);

// removed in 0.8.0 ------------------------------------------------------------

const PAD_MODE_MESSAGE: &str = "Mode \"before\" and \"after\" will be renamed into \
     \"beginning\" and \"end\" and can no longer be used in version 0.8.0";

/// `mode="before"` of [`pad_zeros`](crate::dsp::pad_zeros).
pub static PAD_ZEROS_BEFORE: Deprecation = Deprecation::value(
    "dsp::pad_zeros(mode=\"before\")",
    "mode",
    "before",
    PAD_MODES,
    PAD_MODE_MESSAGE,
    V0_6_0,
    V0_8_0,
);

/// `mode="after"` of [`pad_zeros`](crate::dsp::pad_zeros).
pub static PAD_ZEROS_AFTER: Deprecation = Deprecation::value(
    "dsp::pad_zeros(mode=\"after\")",
    "mode",
    "after",
    PAD_MODES,
    PAD_MODE_MESSAGE,
    V0_6_0,
    V0_8_0,
);

/// `Coordinates::get_cart`.
pub static GET_CART: Deprecation = Deprecation::member(
    "Coordinates::get_cart",
    "This function will be deprecated in version 0.8.0 in favor of Coordinates::cartesian",
    V0_6_0,
    V0_8_0,
    Some("Coordinates::cartesian"),
);

/// `Coordinates::set_cart`.
pub static SET_CART: Deprecation = Deprecation::member(
    "Coordinates::set_cart",
    "This function will be deprecated in version 0.8.0 in favor of Coordinates::set_cartesian",
    V0_6_0,
    V0_8_0,
    Some("Coordinates::set_cartesian"),
);

/// `Coordinates::get_cyl`.
pub static GET_CYL: Deprecation = Deprecation::member(
    "Coordinates::get_cyl",
    "This function will be deprecated in version 0.8.0 in favor of Coordinates::cylindrical",
    V0_6_0,
    V0_8_0,
    Some("Coordinates::cylindrical"),
);

/// `Coordinates::set_cyl`.
pub static SET_CYL: Deprecation = Deprecation::member(
    "Coordinates::set_cyl",
    "This function will be deprecated in version 0.8.0 in favor of Coordinates::set_cylindrical",
    V0_6_0,
    V0_8_0,
    Some("Coordinates::set_cylindrical"),
);

/// `Coordinates::get_sph`.
pub static GET_SPH: Deprecation = Deprecation::member(
    "Coordinates::get_sph",
    "This function will be deprecated in version 0.8.0 in favor of Coordinates::spherical",
    V0_6_0,
    V0_8_0,
    Some("Coordinates::spherical"),
);

/// `Coordinates::set_sph`.
pub static SET_SPH: Deprecation = Deprecation::member(
    "Coordinates::set_sph",
    "This function will be deprecated in version 0.8.0 in favor of Coordinates::set_spherical",
    V0_6_0,
    V0_8_0,
    Some("Coordinates::set_spherical"),
);

/// `Coordinates::systems`.
pub static SYSTEMS: Deprecation = Deprecation::member(
    "Coordinates::systems",
    "This function will be deprecated in version 0.8.0 without replacement. \
     The supported systems are listed in the Coordinates documentation",
    V0_6_0,
    V0_8_0,
    None,
);

const SH_ORDER_MESSAGE: &str = "This function will be deprecated in version 0.8.0. \
     The spherical harmonic order belongs to the sampling that produced the points";

/// Reading `Coordinates::sh_order`.
pub static SH_ORDER: Deprecation = Deprecation::member(
    "Coordinates::sh_order",
    SH_ORDER_MESSAGE,
    V0_6_0,
    V0_8_0,
    None,
);

/// Writing `Coordinates::sh_order`.
pub static SET_SH_ORDER: Deprecation = Deprecation::member(
    "Coordinates::set_sh_order",
    SH_ORDER_MESSAGE,
    V0_6_0,
    V0_8_0,
    None,
);

/// The `sh_order` argument of the legacy constructor.
pub static NEW_SH_ORDER: Deprecation = Deprecation::member(
    "Coordinates::new(sh_order)",
    SH_ORDER_MESSAGE,
    V0_6_0,
    V0_8_0,
    None,
);

/// Non-default `domain`, `convention` or `unit` arguments of the legacy constructor.
pub static NEW_DOMAIN: Deprecation = Deprecation::member(
    "Coordinates::new(domain, convention, unit)",
    "This function will be deprecated in version 0.8.0 in favor of the \
     Coordinates::from_* constructors",
    V0_6_0,
    V0_8_0,
    Some("Coordinates::from_spherical_colatitude"),
);

/// `Coordinates::find_nearest_k`.
pub static FIND_NEAREST_K: Deprecation = Deprecation::member(
    "Coordinates::find_nearest_k",
    "This function will be deprecated in version 0.8.0 in favor of find_nearest",
    V0_6_0,
    V0_8_0,
    Some("Coordinates::find_nearest"),
);

/// `Coordinates::find_slice`.
pub static FIND_SLICE: Deprecation = Deprecation::member(
    "Coordinates::find_slice",
    "This function will be deprecated in version 0.8.0. Use find_within instead",
    V0_6_0,
    V0_8_0,
    Some("Coordinates::find_within"),
);

/// `Signal::len`.
pub static SIGNAL_LEN: Deprecation = Deprecation::member(
    "Signal::len",
    "len(Signal) will be deprecated in version 0.8.0. Use Signal::n_samples instead",
    V0_6_0,
    V0_8_0,
    Some("Signal::n_samples"),
);

/// The complete catalogue, ordered by cutover.
pub static ALL: &[&Deprecation] = &[
    &GET_NEAREST_K,
    &GET_NEAREST_CART,
    &GET_NEAREST_SPH,
    &GET_SLICE,
    &BUTTER,
    &CHEBY1,
    &CHEBY2,
    &ELLIP,
    &PEQ,
    &READ_WAV,
    &WRITE_WAV,
    &LINEAR_SWEEP,
    &EXPONENTIAL_SWEEP,
    &XSCALE_FREQ,
    &XSCALE_PHASE,
    &XSCALE_GROUP_DELAY,
    &XSCALE_TIME_FREQ,
    &XSCALE_FREQ_PHASE,
    &XSCALE_FREQ_GROUP_DELAY,
    &YSCALE_SPECTROGRAM,
    &TIME_UNIT_NONE,
    &PAD_ZEROS_BEFORE,
    &PAD_ZEROS_AFTER,
    &GET_CART,
    &SET_CART,
    &GET_CYL,
    &SET_CYL,
    &GET_SPH,
    &SET_SPH,
    &SYSTEMS,
    &SH_ORDER,
    &SET_SH_ORDER,
    &NEW_SH_ORDER,
    &NEW_DOMAIN,
    &FIND_NEAREST_K,
    &FIND_SLICE,
    &SIGNAL_LEN,
];

/// Find the record for a guarded symbol.
pub fn lookup(symbol: &str) -> Option<&'static Deprecation> {
    ALL.iter().copied().find(|record| record.symbol == symbol)
}

/// Records that reach their cutover exactly at `release`.
pub fn removed_in(release: Release) -> impl Iterator<Item = &'static Deprecation> {
    ALL.iter()
        .copied()
        .filter(move |record| record.removed_in == release)
}

/// Lifecycle state of every record at the gate's version.
pub fn audit(gate: &DeprecationGate) -> Vec<DeprecationStatus> {
    ALL.iter().map(|record| gate.status(record)).collect()
}
