//! The version gate every guarded call site goes through.

use std::sync::Arc;

use semver::Version;
use serde::Serialize;

use super::notice::{Notice, NoticeRecorder, NoticeSink, NullSink, TracingSink};
use super::{Deprecation, Guarded};
use crate::config::CompatConfig;
use crate::version::{self, Release};
use crate::{AcousticError, AcousticResult};

/// Decides, per call, whether a guarded symbol runs with a notice or fails.
///
/// The gate carries the version the library pretends to be, so behaviour of
/// any release can be reproduced without touching process-wide state.
#[derive(Clone)]
pub struct DeprecationGate {
    version: Version,
    sink: Arc<dyn NoticeSink>,
}

impl DeprecationGate {
    /// Gate for an explicit version and notice channel.
    pub fn new(version: Version, sink: Arc<dyn NoticeSink>) -> Self {
        Self { version, sink }
    }

    /// Gate for this build's version, logging notices through `tracing`.
    pub fn current() -> AcousticResult<Self> {
        Ok(Self::new(version::current()?, Arc::new(TracingSink)))
    }

    /// Gate simulating `version`, logging notices through `tracing`.
    pub fn at_version(version: &str) -> AcousticResult<Self> {
        Ok(Self::new(version::parse(version)?, Arc::new(TracingSink)))
    }

    /// Gate simulating `version` that records notices for inspection.
    pub fn recording(version: &str) -> AcousticResult<(Self, Arc<NoticeRecorder>)> {
        let recorder = Arc::new(NoticeRecorder::new());
        let gate = Self::new(version::parse(version)?, recorder.clone());
        Ok((gate, recorder))
    }

    /// Gate described by a configuration.
    pub fn from_config(config: &CompatConfig) -> AcousticResult<Self> {
        let version = match &config.version {
            Some(version) => version::parse(version)?,
            None => version::current()?,
        };
        let sink: Arc<dyn NoticeSink> = if config.log_notices {
            Arc::new(TracingSink)
        } else {
            Arc::new(NullSink)
        };
        Ok(Self::new(version, sink))
    }

    /// Replace the notice channel.
    pub fn with_sink(mut self, sink: Arc<dyn NoticeSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Version the gate compares cutovers against.
    pub const fn version(&self) -> &Version {
        &self.version
    }

    /// True once the running version has reached the record's cutover.
    pub fn is_removed(&self, record: &Deprecation) -> bool {
        version::reached(&self.version, record.removed_in)
    }

    /// Lifecycle state of a record at the gate's version.
    pub fn status(&self, record: &Deprecation) -> DeprecationStatus {
        let state = if self.is_removed(record) {
            DeprecationState::Removed
        } else if version::reached(&self.version, record.deprecated_in) {
            DeprecationState::Active
        } else {
            DeprecationState::Scheduled
        };
        DeprecationStatus {
            symbol: record.symbol,
            state,
            deprecated_in: record.deprecated_in,
            removed_in: record.removed_in,
            replacement: record.replacement,
        }
    }

    /// Let a guarded call proceed with a notice, or refuse it after cutover.
    ///
    /// Refusals never reach the sink and the caller must not perform any side
    /// effect once this returns an error.
    pub fn guard(&self, record: &Deprecation) -> AcousticResult<()> {
        if self.is_removed(record) {
            tracing::debug!(
                symbol = record.symbol,
                removed_in = %record.removed_in,
                running = %self.version,
                "refusing removed symbol"
            );
            return Err(removal_error(record));
        }
        self.sink.emit(&Notice::from(record));
        Ok(())
    }
}

impl std::fmt::Debug for DeprecationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeprecationGate")
            .field("version", &self.version.to_string())
            .finish_non_exhaustive()
    }
}

fn removal_error(record: &Deprecation) -> AcousticError {
    match record.guarded {
        Guarded::Member => AcousticError::MemberRemoved {
            symbol: record.symbol,
            removed_in: record.removed_in.to_version(),
            replacement: record.replacement,
        },
        Guarded::Value {
            parameter,
            value,
            allowed,
        } => AcousticError::invalid_value(parameter, value, allowed),
    }
}

/// Where a record sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeprecationState {
    /// The running version predates the notice.
    Scheduled,
    /// The symbol works and emits a notice.
    Active,
    /// The symbol is unreachable.
    Removed,
}

impl std::fmt::Display for DeprecationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scheduled => write!(f, "SCHEDULED"),
            Self::Active => write!(f, "ACTIVE"),
            Self::Removed => write!(f, "REMOVED"),
        }
    }
}

/// One line of a deprecation audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeprecationStatus {
    /// Guarded symbol.
    pub symbol: &'static str,
    /// State at the audited version.
    pub state: DeprecationState,
    /// Release that introduced the notice.
    pub deprecated_in: Release,
    /// Cutover release.
    pub removed_in: Release,
    /// Surface to migrate to.
    pub replacement: Option<&'static str>,
}

impl DeprecationStatus {
    /// Format for display.
    pub fn format(&self) -> String {
        let mut msg = format!(
            "[{}] {} (deprecated {}, removed {})",
            self.state, self.symbol, self.deprecated_in, self.removed_in
        );
        if let Some(replacement) = self.replacement {
            msg.push_str(&format!("\n  Use: {replacement}"));
        }
        msg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deprecation::registry;

    #[test]
    fn test_guard_before_cutover_emits_notice() {
        let (gate, notices) = DeprecationGate::recording("0.4.2").unwrap();
        gate.guard(&registry::BUTTER).unwrap();

        let recorded = notices.notices();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].symbol, "filter::butter");
        assert!(recorded[0].matches("butterworth"));
    }

    #[test]
    fn test_guard_after_cutover_is_member_removed() {
        let (gate, notices) = DeprecationGate::recording("0.5.0").unwrap();
        let err = gate.guard(&registry::BUTTER).unwrap_err();
        assert!(matches!(
            err,
            AcousticError::MemberRemoved {
                symbol: "filter::butter",
                ..
            }
        ));
        assert!(notices.is_empty());
    }

    #[test]
    fn test_guard_value_after_cutover_is_invalid_value() {
        let (gate, _) = DeprecationGate::recording("0.8.0").unwrap();
        match gate.guard(&registry::PAD_ZEROS_AFTER) {
            Err(AcousticError::InvalidValue {
                parameter,
                value,
                allowed,
            }) => {
                assert_eq!(parameter, "mode");
                assert_eq!(value, "after");
                assert_eq!(allowed, vec!["beginning", "end", "center"]);
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_guard_is_not_suppressed_after_first_call() {
        let (gate, notices) = DeprecationGate::recording("0.7.0").unwrap();
        for _ in 0..3 {
            gate.guard(&registry::SIGNAL_LEN).unwrap();
        }
        assert_eq!(notices.len(), 3);
    }

    #[test]
    fn test_prerelease_still_warns() {
        let (gate, notices) = DeprecationGate::recording("0.8.0-rc.1").unwrap();
        gate.guard(&registry::SIGNAL_LEN).unwrap();
        assert_eq!(notices.len(), 1);
    }

    #[test]
    fn test_status_lifecycle() {
        let record = &registry::XSCALE_FREQ;
        let scheduled = DeprecationGate::at_version("0.4.0").unwrap();
        let active = DeprecationGate::at_version("0.5.3").unwrap();
        let removed = DeprecationGate::at_version("0.6.0").unwrap();

        assert_eq!(scheduled.status(record).state, DeprecationState::Scheduled);
        assert_eq!(active.status(record).state, DeprecationState::Active);
        assert_eq!(removed.status(record).state, DeprecationState::Removed);
        assert!(removed.status(record).format().starts_with("[REMOVED]"));
    }

    #[test]
    fn test_from_config_uses_override() {
        let config = CompatConfig {
            version: Some("0.5.1".to_string()),
            log_notices: false,
        };
        let gate = DeprecationGate::from_config(&config).unwrap();
        assert_eq!(gate.version(), &Version::new(0, 5, 1));
        assert!(gate.guard(&registry::BUTTER).is_err());
        assert!(gate.guard(&registry::XSCALE_FREQ).is_ok());
    }

    #[test]
    fn test_from_config_rejects_bad_version() {
        let config = CompatConfig {
            version: Some("next".to_string()),
            log_notices: true,
        };
        assert!(matches!(
            DeprecationGate::from_config(&config),
            Err(AcousticError::Version(_))
        ));
    }

    #[test]
    fn test_with_sink_redirects_notices() {
        let recorder = Arc::new(NoticeRecorder::new());
        let gate = DeprecationGate::at_version("0.7.0")
            .unwrap()
            .with_sink(recorder.clone());
        gate.guard(&registry::FIND_NEAREST_K).unwrap();
        assert_eq!(recorder.count_matching("in favor of find_nearest"), 1);
    }
}
