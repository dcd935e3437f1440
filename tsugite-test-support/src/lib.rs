//! Test helpers shared across the tsugite crates.

pub mod ci;

pub mod tracing {
    //! In-memory capture of spans and events for instrumentation assertions.
    //!
    //! Install a [`RecordingLayer`] on a registry with
    //! `tracing::subscriber::with_default`, run the code under test, then
    //! inspect the snapshots.
    //!
    //! ```
    //! use tracing_subscriber::layer::SubscriberExt;
    //! use tsugite_test_support::tracing::RecordingLayer;
    //!
    //! let layer = RecordingLayer::default();
    //! let subscriber = tracing_subscriber::registry().with(layer.clone());
    //! tracing::subscriber::with_default(subscriber, || {
    //!     let span = tracing::info_span!("outer", answer = 42);
    //!     let _entered = span.enter();
    //!     tracing::debug!(step = 1, "inside");
    //! });
    //!
    //! let outer = layer.span_named("outer").expect("span recorded");
    //! assert_eq!(outer.field("answer"), Some("42"));
    //! let events = layer.events_with_message("inside");
    //! assert_eq!(events.len(), 1);
    //! assert_eq!(events[0].parent.as_deref(), Some("outer"));
    //! ```

    use std::collections::HashMap;
    use std::fmt::{self, Write as _};
    use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

    use tracing::field::{Field, Visit};
    use tracing::span::{Attributes, Id, Record};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::Context;
    use tracing_subscriber::registry::LookupSpan;

    /// Layer that keeps every closed span and every event in memory.
    ///
    /// Clones share storage, so keep one clone for assertions and hand the
    /// other to the subscriber.
    #[derive(Clone, Debug, Default)]
    pub struct RecordingLayer {
        spans: Arc<Mutex<Vec<SpanRecord>>>,
        events: Arc<Mutex<Vec<EventRecord>>>,
    }

    fn locked<T>(store: &Mutex<T>) -> MutexGuard<'_, T> {
        store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    impl RecordingLayer {
        /// Closed spans in completion order.
        #[must_use]
        pub fn spans(&self) -> Vec<SpanRecord> {
            locked(&self.spans).clone()
        }

        /// Events in emission order.
        #[must_use]
        pub fn events(&self) -> Vec<EventRecord> {
            locked(&self.events).clone()
        }

        /// First closed span called `name`.
        #[must_use]
        pub fn span_named(&self, name: &str) -> Option<SpanRecord> {
            locked(&self.spans)
                .iter()
                .find(|span| span.name == name)
                .cloned()
        }

        /// Events whose `message` field equals `message`.
        #[must_use]
        pub fn events_with_message(&self, message: &str) -> Vec<EventRecord> {
            locked(&self.events)
                .iter()
                .filter(|event| event.message() == Some(message))
                .cloned()
                .collect()
        }
    }

    /// A span captured when it closed.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SpanRecord {
        /// Span name from its metadata.
        pub name: String,
        /// Fields recorded at creation or later via `Span::record`.
        pub fields: HashMap<String, String>,
    }

    impl SpanRecord {
        /// Returns the rendered value of `name`, if recorded.
        #[must_use]
        pub fn field(&self, name: &str) -> Option<&str> {
            self.fields.get(name).map(String::as_str)
        }
    }

    /// An event captured at emission.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct EventRecord {
        /// Event level.
        pub level: Level,
        /// Event target, usually the emitting module path.
        pub target: String,
        /// Name of the innermost span the event was emitted in.
        pub parent: Option<String>,
        /// Event fields, including `message`.
        pub fields: HashMap<String, String>,
    }

    impl EventRecord {
        /// Returns the rendered value of `name`, if present.
        #[must_use]
        pub fn field(&self, name: &str) -> Option<&str> {
            self.fields.get(name).map(String::as_str)
        }

        /// Returns the event's message.
        #[must_use]
        pub fn message(&self) -> Option<&str> {
            self.field("message")
        }
    }

    /// Per-span state stored in the registry extensions until close.
    struct OpenSpan(SpanRecord);

    impl<S> Layer<S> for RecordingLayer
    where
        S: Subscriber + for<'lookup> LookupSpan<'lookup>,
    {
        fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            let mut record = SpanRecord {
                name: attrs.metadata().name().to_owned(),
                fields: HashMap::new(),
            };
            attrs.record(&mut FieldCollector(&mut record.fields));
            span.extensions_mut().insert(OpenSpan(record));
        }

        fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            if let Some(OpenSpan(record)) = span.extensions_mut().get_mut::<OpenSpan>() {
                values.record(&mut FieldCollector(&mut record.fields));
            }
        }

        fn on_close(&self, id: Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(&id) else {
                return;
            };
            if let Some(OpenSpan(record)) = span.extensions_mut().remove::<OpenSpan>() {
                locked(&self.spans).push(record);
            }
        }

        fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
            let mut fields = HashMap::new();
            event.record(&mut FieldCollector(&mut fields));
            let parent = ctx.event_span(event).map(|span| span.name().to_owned());
            locked(&self.events).push(EventRecord {
                level: *event.metadata().level(),
                target: event.metadata().target().to_owned(),
                parent,
                fields,
            });
        }
    }

    /// Renders every field to a string keyed by field name.
    struct FieldCollector<'a>(&'a mut HashMap<String, String>);

    impl FieldCollector<'_> {
        fn put(&mut self, field: &Field, value: String) {
            self.0.insert(field.name().to_owned(), value);
        }
    }

    impl Visit for FieldCollector<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.put(field, format!("{value:?}"));
        }

        fn record_str(&mut self, field: &Field, value: &str) {
            self.put(field, value.to_owned());
        }

        fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
            self.put(field, value.to_string());
        }

        fn record_bool(&mut self, field: &Field, value: bool) {
            self.put(field, value.to_string());
        }

        fn record_i64(&mut self, field: &Field, value: i64) {
            self.put(field, value.to_string());
        }

        fn record_u64(&mut self, field: &Field, value: u64) {
            self.put(field, value.to_string());
        }

        fn record_f64(&mut self, field: &Field, value: f64) {
            self.put(field, value.to_string());
        }

        fn record_bytes(&mut self, field: &Field, value: &[u8]) {
            let mut hex = String::with_capacity(value.len() * 2);
            for byte in value {
                let _ = write!(hex, "{byte:02x}");
            }
            self.put(field, hex);
        }
    }
}
