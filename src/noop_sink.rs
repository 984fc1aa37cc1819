use crate::error::SinkError;
use crate::record::LogEvent;
use crate::sink::{Delivery, LogSink};
use async_trait::async_trait;

/// A sink that simply drops all events.
///
/// Useful for measuring generation throughput without any external I/O.
#[derive(Clone, Default)]
pub struct NoopSink;

#[async_trait]
impl LogSink for NoopSink {
    async fn send(&self, _event: &LogEvent) -> Result<Delivery, SinkError> {
        Ok(Delivery::default())
    }
}
