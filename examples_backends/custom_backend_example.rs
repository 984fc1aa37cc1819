use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;

use kafka_log_synth::error::SinkError;
use kafka_log_synth::producer::{produce_batch, BatchOptions};
use kafka_log_synth::record::LogEvent;
use kafka_log_synth::sink::{Delivery, LogSink};

/// Example of pushing generated events somewhere other than Kafka by
/// implementing the `LogSink` trait directly. Imagine this talks to some
/// proprietary ingestion endpoint.
struct MyIngestSink;

#[async_trait]
impl LogSink for MyIngestSink {
    async fn send(&self, event: &LogEvent) -> Result<Delivery, SinkError> {
        // Here you would call your own client library.
        // For the sake of example we just print the record.
        println!("[my-ingest] {} {}", event.key(), serde_json::to_string(event)?);
        Ok(Delivery::default())
    }
}

#[tokio::main]
async fn main() {
    let mut rng = StdRng::seed_from_u64(1);
    let stats = produce_batch(&MyIngestSink, &mut rng, &BatchOptions::default()).await;
    println!("custom backend example: {} sent, {} failed", stats.sent, stats.failed);
}
