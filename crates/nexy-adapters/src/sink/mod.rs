//! Progress sinks.

mod recording;

pub use recording::RecordingSink;
