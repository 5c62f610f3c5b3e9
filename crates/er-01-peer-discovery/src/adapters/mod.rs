//! Adapters for the outbound ports.

pub mod event_sink;

pub use event_sink::{NoOpEventSink, RecordingEventSink, TracingEventSink};
