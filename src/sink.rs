use crate::error::SinkError;
use crate::record::LogEvent;
use async_trait::async_trait;

/// Where a sent event ended up, when the backend reports it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delivery {
    pub partition: Option<i32>,
    pub offset: Option<i64>,
}

impl Delivery {
    pub fn at(partition: i32, offset: i64) -> Self {
        Delivery {
            partition: Some(partition),
            offset: Some(offset),
        }
    }
}

/// Asynchronous destination for synthesized [`LogEvent`]s.
///
/// Implementations transport events to a concrete backend (Kafka, stdout,
/// nowhere). The producer loop awaits each `send` before generating the
/// next event.
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Send a single event.
    ///
    /// **Returns**
    /// - `Ok(Delivery)` once the backend accepted the event.
    /// - `Err(..)` if serialization or the backend failed. The producer
    ///   loop logs the failure and moves on to the next event.
    async fn send(&self, event: &LogEvent) -> Result<Delivery, SinkError>;

    /// Flush any buffered events. Default implementation is a no-op.
    async fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }
}
