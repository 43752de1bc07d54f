//! Test helpers shared by unit test modules.
//!
//! Provides a `tracing` layer that records emitted events so tests can
//! assert on diagnostics.
#![cfg(test)]

use std::fmt;
use std::sync::{
    Arc,
    Mutex,
    PoisonError,
};

use tracing::field::{
    Field,
    Visit,
};
use tracing::{
    Event,
    Level,
    Subscriber,
};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{
    Context,
    SubscriberExt,
};

/// A recorded `tracing` event.
#[derive(Debug, Clone)]
pub(crate) struct CapturedEvent {
    /// Event level
    pub(crate) level: Level,
    /// Formatted message
    pub(crate) message: String,
    /// Other fields as `(name, value)`
    pub(crate) fields: Vec<(String, String)>,
}

/// Events recorded while a closure ran under [`capture_logs`].
#[derive(Debug, Clone, Default)]
pub(crate) struct CapturedLogs {
    /// Shared with the capturing layer
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CapturedLogs {
    /// Every recorded event, in emission order.
    pub(crate) fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Messages of events at `INFO` or more severe.
    ///
    /// Debug-level setup chatter is left out so tests only see diagnostics.
    pub(crate) fn messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|event| event.level <= Level::INFO)
            .map(|event| event.message)
            .collect()
    }

    /// Values recorded for field `name`, at `INFO` or more severe.
    pub(crate) fn field_values(&self, name: &str) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|event| event.level <= Level::INFO)
            .flat_map(|event| event.fields)
            .filter(|(field, _)| field == name)
            .map(|(_, value)| value)
            .collect()
    }
}

/// Layer pushing every event into a [`CapturedLogs`].
struct CaptureLayer {
    /// Destination
    logs: CapturedLogs,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let captured = CapturedEvent {
            level: *event.metadata().level(),
            message: visitor.message,
            fields: visitor.fields,
        };
        self.logs.events.lock().unwrap_or_else(PoisonError::into_inner).push(captured);
    }
}

/// Collects the message and fields of one event.
#[derive(Default)]
struct EventVisitor {
    /// Formatted `message` field
    message: String,
    /// Every other field as `(name, value)`
    fields: Vec<(String, String)>,
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push((field.name().to_string(), value.to_string()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.push((field.name().to_string(), format!("{value:?}")));
        }
    }
}

/// Run `f` with a thread-local subscriber that records every event.
pub(crate) fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, CapturedLogs) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::registry().with(CaptureLayer { logs: logs.clone() });
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, logs)
}
