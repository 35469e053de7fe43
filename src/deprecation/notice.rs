//! Notices and the channels they are delivered on.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use super::{Deprecation, Guarded};
use crate::version::Release;

/// Target used for every deprecation notice logged through `tracing`.
pub const NOTICE_TARGET: &str = "acoustic_signals::deprecation";

/// A non-fatal warning that a guarded symbol is scheduled for removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Symbol the caller touched.
    pub symbol: &'static str,
    /// Human readable text, stable across releases.
    pub message: &'static str,
    /// Release in which the symbol stops working.
    pub removed_in: Release,
    /// Surface to migrate to, if any.
    pub replacement: Option<&'static str>,
    /// The argument value that triggered the notice, for value deprecations.
    pub value: Option<&'static str>,
}

impl Notice {
    /// True if the notice text contains `pattern`.
    pub fn matches(&self, pattern: &str) -> bool {
        self.message.contains(pattern)
    }
}

impl From<&Deprecation> for Notice {
    fn from(record: &Deprecation) -> Self {
        let value = match record.guarded {
            Guarded::Member => None,
            Guarded::Value { value, .. } => Some(value),
        };
        Self {
            symbol: record.symbol,
            message: record.message,
            removed_in: record.removed_in,
            replacement: record.replacement,
            value,
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[DEPRECATED] {}: {}", self.symbol, self.message)
    }
}

/// Where notices go once the gate has decided a call may proceed.
pub trait NoticeSink: Send + Sync {
    /// Deliver one notice. Must not fail and must not block for long.
    fn emit(&self, notice: &Notice);
}

/// Logs every notice as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NoticeSink for TracingSink {
    fn emit(&self, notice: &Notice) {
        tracing::warn!(
            target: NOTICE_TARGET,
            symbol = notice.symbol,
            removed_in = %notice.removed_in,
            replacement = notice.replacement.unwrap_or(""),
            "{}",
            notice.message
        );
    }
}

/// Drops notices.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NoticeSink for NullSink {
    fn emit(&self, _notice: &Notice) {}
}

/// Keeps every notice in emission order.
#[derive(Debug, Default)]
pub struct NoticeRecorder {
    notices: Mutex<Vec<Notice>>,
}

impl NoticeRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the notices recorded so far.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    /// Remove and return the notices recorded so far.
    pub fn take(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.lock())
    }

    /// Number of notices recorded.
    pub fn len(&self) -> usize {
        self.notices.lock().len()
    }

    /// True if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.notices.lock().is_empty()
    }

    /// Number of recorded notices whose text contains `pattern`.
    pub fn count_matching(&self, pattern: &str) -> usize {
        self.notices
            .lock()
            .iter()
            .filter(|notice| notice.matches(pattern))
            .count()
    }
}

impl NoticeSink for NoticeRecorder {
    fn emit(&self, notice: &Notice) {
        self.notices.lock().push(notice.clone());
    }
}

/// Forwards each notice to several sinks in order.
#[derive(Clone, Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn NoticeSink>>,
}

impl FanoutSink {
    /// Create a fan-out with no targets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a target.
    pub fn with(mut self, sink: Arc<dyn NoticeSink>) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl std::fmt::Debug for FanoutSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanoutSink")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl NoticeSink for FanoutSink {
    fn emit(&self, notice: &Notice) {
        for sink in &self.sinks {
            sink.emit(notice);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deprecation::registry;
    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    #[derive(Debug, Default)]
    struct CapturedEvent {
        level: Option<Level>,
        target: String,
        symbol: String,
        message: String,
    }

    impl Visit for CapturedEvent {
        fn record_str(&mut self, field: &Field, value: &str) {
            if field.name() == "symbol" {
                self.symbol = value.to_string();
            }
        }

        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.message = format!("{value:?}");
            }
        }
    }

    #[derive(Clone, Default)]
    struct CaptureLayer(Arc<Mutex<Vec<CapturedEvent>>>);

    impl<S: Subscriber> Layer<S> for CaptureLayer {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut captured = CapturedEvent {
                level: Some(*event.metadata().level()),
                target: event.metadata().target().to_string(),
                ..CapturedEvent::default()
            };
            event.record(&mut captured);
            self.0.lock().push(captured);
        }
    }

    #[test]
    fn test_notice_from_member_record() {
        let notice = Notice::from(&registry::BUTTER);
        assert_eq!(notice.symbol, "filter::butter");
        assert_eq!(notice.replacement, Some("filter::butterworth"));
        assert_eq!(notice.value, None);
        assert!(notice.matches("butterworth"));
    }

    #[test]
    fn test_notice_from_value_record() {
        let notice = Notice::from(&registry::PAD_ZEROS_BEFORE);
        assert_eq!(notice.value, Some("before"));
        assert!(notice.to_string().starts_with("[DEPRECATED] dsp::pad_zeros"));
    }

    #[test]
    fn test_recorder_take_drains() {
        let recorder = NoticeRecorder::new();
        recorder.emit(&Notice::from(&registry::SIGNAL_LEN));
        recorder.emit(&Notice::from(&registry::SIGNAL_LEN));
        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.count_matching("len(Signal)"), 2);

        let drained = recorder.take();
        assert_eq!(drained.len(), 2);
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_fanout_reaches_every_sink() {
        let first = Arc::new(NoticeRecorder::new());
        let second = Arc::new(NoticeRecorder::new());
        let fanout = FanoutSink::new()
            .with(first.clone())
            .with(second.clone())
            .with(Arc::new(NullSink));

        fanout.emit(&Notice::from(&registry::FIND_SLICE));
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_tracing_sink_warns_on_notice_target() {
        let layer = CaptureLayer::default();
        let subscriber = tracing_subscriber::registry().with(layer.clone());
        tracing::subscriber::with_default(subscriber, || {
            TracingSink.emit(&Notice::from(&registry::SIGNAL_LEN));
        });

        let events = layer.0.lock();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, Some(Level::WARN));
        assert_eq!(events[0].target, NOTICE_TARGET);
        assert_eq!(events[0].symbol, "Signal::len");
        assert!(events[0].message.contains("len(Signal) will be deprecated"));
    }
}
