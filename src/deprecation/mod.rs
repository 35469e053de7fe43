//! Deprecation lifecycle for the public API.
//!
//! Every obsolete function, method, property or accepted argument value is
//! described by a [`Deprecation`] record with a fixed cutover version. Call
//! sites hand their record to a [`DeprecationGate`], which either lets the call
//! proceed after emitting a [`Notice`] or refuses it with a removal error once
//! the running version has reached the cutover.
//!
//! ```rust
//! use acoustic_signals::deprecation::{DeprecationGate, registry};
//!
//! let (gate, notices) = DeprecationGate::recording("0.7.0").unwrap();
//! gate.guard(&registry::SIGNAL_LEN).unwrap();
//! assert_eq!(notices.len(), 1);
//!
//! let (gate, _) = DeprecationGate::recording("0.8.0").unwrap();
//! assert!(gate.guard(&registry::SIGNAL_LEN).is_err());
//! ```

mod gate;
mod notice;
pub mod registry;

pub use gate::{DeprecationGate, DeprecationState, DeprecationStatus};
pub use notice::{FanoutSink, Notice, NoticeRecorder, NoticeSink, NullSink, TracingSink};

use crate::version::Release;

/// What a deprecation record takes away at its cutover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guarded {
    /// A whole symbol: function, method, property or parameter.
    ///
    /// After the cutover any use fails with
    /// [`AcousticError::MemberRemoved`](crate::AcousticError::MemberRemoved).
    Member,
    /// One accepted value of a parameter that itself survives.
    ///
    /// After the cutover passing the value fails with
    /// [`AcousticError::InvalidValue`](crate::AcousticError::InvalidValue).
    Value {
        /// Parameter that accepts the value.
        parameter: &'static str,
        /// The deprecated value as callers spell it.
        value: &'static str,
        /// Values the parameter keeps accepting.
        allowed: &'static [&'static str],
    },
}

/// A scheduled removal of one piece of public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deprecation {
    /// Fully qualified name of the guarded symbol.
    pub symbol: &'static str,
    /// Whether a member or an argument value is being removed.
    pub guarded: Guarded,
    /// Notice text emitted before the cutover. Callers match on it verbatim.
    pub message: &'static str,
    /// Release that introduced the notice.
    pub deprecated_in: Release,
    /// First release in which the symbol is unreachable.
    pub removed_in: Release,
    /// Surface callers should migrate to.
    pub replacement: Option<&'static str>,
}

impl Deprecation {
    /// Record for a symbol that disappears entirely.
    pub const fn member(
        symbol: &'static str,
        message: &'static str,
        deprecated_in: Release,
        removed_in: Release,
        replacement: Option<&'static str>,
    ) -> Self {
        Self {
            symbol,
            guarded: Guarded::Member,
            message,
            deprecated_in,
            removed_in,
            replacement,
        }
    }

    /// Record for a single accepted value of a parameter.
    pub const fn value(
        symbol: &'static str,
        parameter: &'static str,
        value: &'static str,
        allowed: &'static [&'static str],
        message: &'static str,
        deprecated_in: Release,
        removed_in: Release,
    ) -> Self {
        Self {
            symbol,
            guarded: Guarded::Value {
                parameter,
                value,
                allowed,
            },
            message,
            deprecated_in,
            removed_in,
            replacement: None,
        }
    }

    /// True if the record removes an argument value rather than a member.
    pub const fn is_value(&self) -> bool {
        matches!(self.guarded, Guarded::Value { .. })
    }
}
