use crate::config::KafkaSettings;
use crate::error::SinkError;
use crate::record::{format_timestamp, LogEvent};
use crate::sink::{Delivery, LogSink};
use async_trait::async_trait;
use chrono::Utc;
use rdkafka::metadata::Metadata;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use std::time::Duration;
use tracing::{debug, info, warn};

/// How long metadata requests and the final flush may take.
const ADMIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Kafka sink that publishes each event as a JSON message keyed by its
/// service name.
#[derive(Clone)]
pub struct KafkaSink {
    producer: FutureProducer,
    topic: String,
    send_timeout: Duration,
}

impl KafkaSink {
    /// Create a new Kafka sink from validated settings.
    ///
    /// librdkafka connects lazily, so this only fails on an invalid client
    /// configuration; unreachable brokers show up on the first send.
    pub fn new(settings: &KafkaSettings) -> Result<Self, SinkError> {
        let producer: FutureProducer = settings.to_client_config().create()?;
        debug!(
            brokers = %settings.brokers,
            security_protocol = %settings.security_protocol,
            "created kafka producer"
        );

        Ok(KafkaSink {
            producer,
            topic: settings.topic.clone(),
            send_timeout: settings.message_timeout,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    async fn send_raw(&self, key: &str, payload: &[u8]) -> Result<Delivery, SinkError> {
        let record = FutureRecord::to(&self.topic).key(key).payload(payload);
        // Wait for the delivery report with a bounded timeout.
        let (partition, offset) = self
            .producer
            .send(record, self.send_timeout)
            .await
            .map_err(|(err, _)| err)?;
        Ok(Delivery::at(partition, offset))
    }

    /// Brokers and `(topic, partition ids)` pairs from cluster metadata.
    async fn fetch_metadata(&self) -> Result<(Vec<BrokerInfo>, Vec<(String, Vec<i32>)>), SinkError> {
        let producer = self.producer.clone();
        let summary = tokio::task::spawn_blocking(move || {
            producer
                .client()
                .fetch_metadata(None, ADMIN_TIMEOUT)
                .map(|metadata| summarize(&metadata))
        })
        .await??;
        Ok(summary)
    }

    /// Probe the cluster: fetch broker and topic metadata, then write one
    /// test message to the topic.
    ///
    /// Metadata problems are reported but not fatal, since the topic may be
    /// auto-created on first write. A failed test write is recorded in the
    /// report rather than returned, so the broker findings survive it.
    pub async fn check_connection(&self) -> Result<ConnectionReport, SinkError> {
        info!(topic = %self.topic, "fetching cluster metadata");
        let (brokers, topic) = match self.fetch_metadata().await {
            Ok((brokers, topics)) => {
                info!("connected to {} broker(s)", brokers.len());
                (Ok(brokers), topic_status(&self.topic, &topics))
            }
            Err(err) => {
                warn!("could not fetch metadata: {err}");
                (
                    Err(err.to_string()),
                    TopicStatus::Unknown(err.to_string()),
                )
            }
        };

        info!(topic = %self.topic, "sending test message");
        let payload = serde_json::to_vec(&serde_json::json!({
            "test": true,
            "message": "Connection test from generate-logs",
            "timestamp": format_timestamp(&Utc::now()),
        }))?;
        let delivery = self.send_raw("test", &payload).await.map_err(|err| {
            warn!("test message failed: {err}");
            err.to_string()
        });

        Ok(ConnectionReport {
            brokers,
            topic,
            delivery,
        })
    }
}

#[async_trait]
impl LogSink for KafkaSink {
    async fn send(&self, event: &LogEvent) -> Result<Delivery, SinkError> {
        let payload = event.to_json_bytes()?;
        self.send_raw(event.key(), &payload).await
    }

    async fn flush(&self) -> Result<(), SinkError> {
        let producer = self.producer.clone();
        tokio::task::spawn_blocking(move || producer.flush(ADMIN_TIMEOUT)).await??;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerInfo {
    pub id: i32,
    pub host: String,
    pub port: i32,
}

/// What the cluster metadata says about the target topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicStatus {
    Found { partitions: Vec<i32> },
    /// Not in the cluster; `available` holds up to five other topic names.
    Missing { available: Vec<String>, total: usize },
    /// Metadata could not be fetched.
    Unknown(String),
}

/// Outcome of [`KafkaSink::check_connection`].
#[derive(Debug, Clone)]
pub struct ConnectionReport {
    pub brokers: Result<Vec<BrokerInfo>, String>,
    pub topic: TopicStatus,
    pub delivery: Result<Delivery, String>,
}

impl ConnectionReport {
    /// The test passes when the test message was written.
    pub fn is_success(&self) -> bool {
        self.delivery.is_ok()
    }

    /// Human-readable summary for `--test-connection`.
    pub fn render(&self, topic: &str) -> String {
        let rule = "=".repeat(60);
        let mut lines = vec![rule.clone(), "KAFKA CONNECTION TEST".to_string(), rule.clone()];

        match &self.brokers {
            Ok(brokers) => {
                lines.push(format!("Connected to {} broker(s):", brokers.len()));
                for b in brokers {
                    lines.push(format!("  - {}:{} (node {})", b.host, b.port, b.id));
                }
            }
            Err(e) => lines.push(format!("Could not fetch metadata: {e}")),
        }

        match &self.topic {
            TopicStatus::Found { partitions } => lines.push(format!(
                "Topic '{topic}' exists with {} partition(s): {partitions:?}",
                partitions.len()
            )),
            TopicStatus::Missing { available, total } => {
                lines.push(format!("Topic '{topic}' not found in cluster"));
                lines.push("Note: topic may be auto-created on first write (if enabled)".to_string());
                let more = if *total > available.len() { "..." } else { "" };
                lines.push(format!("Available topics: {available:?}{more}"));
            }
            TopicStatus::Unknown(e) => lines.push(format!("Could not check topic: {e}")),
        }

        match &self.delivery {
            Ok(Delivery {
                partition: Some(partition),
                offset: Some(offset),
            }) => lines.push(format!(
                "Test message written to partition {partition} at offset {offset}"
            )),
            Ok(_) => lines.push("Test message written".to_string()),
            Err(e) => lines.push(format!("Failed to write test message: {e}")),
        }

        let result = if self.is_success() { "SUCCESS" } else { "FAILED" };
        lines.push(rule.clone());
        lines.push(format!("CONNECTION TEST RESULT: {result}"));
        lines.push(rule);
        lines.join("\n")
    }
}

fn summarize(metadata: &Metadata) -> (Vec<BrokerInfo>, Vec<(String, Vec<i32>)>) {
    let brokers = metadata
        .brokers()
        .iter()
        .map(|b| BrokerInfo {
            id: b.id(),
            host: b.host().to_string(),
            port: b.port(),
        })
        .collect();
    let topics = metadata
        .topics()
        .iter()
        .filter(|t| t.error().is_none())
        .map(|t| {
            let partitions = t.partitions().iter().map(|p| p.id()).collect();
            (t.name().to_string(), partitions)
        })
        .collect();
    (brokers, topics)
}

/// Classify `topic` against `(name, partition ids)` pairs from metadata.
pub fn topic_status(topic: &str, topics: &[(String, Vec<i32>)]) -> TopicStatus {
    match topics.iter().find(|(name, _)| name == topic) {
        Some((_, partitions)) => {
            let mut partitions = partitions.clone();
            partitions.sort_unstable();
            TopicStatus::Found { partitions }
        }
        None => TopicStatus::Missing {
            available: topics.iter().take(5).map(|(name, _)| name.clone()).collect(),
            total: topics.len(),
        },
    }
}
