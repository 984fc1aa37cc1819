use async_trait::async_trait;
use kafka_log_synth::catalog;
use kafka_log_synth::error::SinkError;
use kafka_log_synth::producer::{produce_batch, run, BatchOptions, RunMode, RunOptions};
use kafka_log_synth::record::{Level, LogEvent};
use kafka_log_synth::sink::{Delivery, LogSink};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Keeps every event it receives, keyed the way a broker would see it.
#[derive(Default)]
struct RecordingSink {
    sent: Mutex<Vec<(String, Vec<u8>)>>,
    flushes: AtomicU64,
}

impl RecordingSink {
    fn events(&self) -> Vec<LogEvent> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, payload)| serde_json::from_slice(payload).unwrap())
            .collect()
    }
}

#[async_trait]
impl LogSink for RecordingSink {
    async fn send(&self, event: &LogEvent) -> Result<Delivery, SinkError> {
        let payload = event.to_json_bytes()?;
        let mut sent = self.sent.lock().unwrap();
        sent.push((event.key().to_string(), payload));
        Ok(Delivery::at(0, sent.len() as i64 - 1))
    }

    async fn flush(&self) -> Result<(), SinkError> {
        self.flushes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// Rejects every second event.
#[derive(Default)]
struct FlakySink {
    calls: AtomicU64,
}

#[async_trait]
impl LogSink for FlakySink {
    async fn send(&self, _event: &LogEvent) -> Result<Delivery, SinkError> {
        let n = self.calls.fetch_add(1, Ordering::Relaxed);
        if n % 2 == 1 {
            Err(SinkError::Io(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "delivery timed out",
            )))
        } else {
            Ok(Delivery::default())
        }
    }
}

#[tokio::test]
async fn batch_sends_count_events_keyed_by_service() {
    let sink = RecordingSink::default();
    let mut rng = StdRng::seed_from_u64(42);
    let options = BatchOptions {
        count: 50,
        delay: Duration::ZERO,
    };

    let stats = produce_batch(&sink, &mut rng, &options).await;

    assert_eq!(stats.sent, 50);
    assert_eq!(stats.failed, 0);
    assert_eq!(stats.batches, 1);
    assert_eq!(sink.flushes.load(Ordering::Relaxed), 1);

    let sent = sink.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 50);
    for (key, payload) in &sent {
        let event: LogEvent = serde_json::from_slice(payload).unwrap();
        assert_eq!(key, &event.service);
        assert!(catalog::hosts_for(key).contains(&event.host.as_str()));
    }
}

#[tokio::test]
async fn payloads_honor_field_conditions() {
    let sink = RecordingSink::default();
    let mut rng = StdRng::seed_from_u64(7);
    let options = BatchOptions {
        count: 1_000,
        delay: Duration::ZERO,
    };
    produce_batch(&sink, &mut rng, &options).await;

    for event in sink.events() {
        match event.level {
            Level::Error => {
                assert!(event.error.is_some());
                assert!(event.user_id.is_none());
                assert!(event.ip_address.is_none());
                assert!(event.amount.is_none());
            }
            Level::Info | Level::Warn => assert!(event.error.is_none()),
        }
        if event.ip_address.is_some() {
            assert_eq!(event.level, Level::Info);
            assert_eq!(event.service, "web-api");
        }
        if event.amount.is_some() {
            assert_eq!(event.level, Level::Info);
            assert_eq!(event.service, "payment-service");
        }
    }
}

#[tokio::test]
async fn failed_sends_are_counted_and_skipped() {
    let sink = FlakySink::default();
    let mut rng = StdRng::seed_from_u64(1);
    let options = BatchOptions {
        count: 9,
        delay: Duration::ZERO,
    };

    let stats = produce_batch(&sink, &mut rng, &options).await;

    assert_eq!(stats.sent, 5);
    assert_eq!(stats.failed, 4);
    assert_eq!(sink.calls.load(Ordering::Relaxed), 9);
}

#[tokio::test]
async fn continuous_mode_stops_after_max_iterations() {
    let sink = RecordingSink::default();
    let mut rng = StdRng::seed_from_u64(3);
    let options = RunOptions {
        batch: BatchOptions {
            count: 4,
            delay: Duration::ZERO,
        },
        mode: RunMode::Continuous {
            pause: Duration::ZERO,
            max_iterations: Some(3),
        },
    };

    let stats = run(&sink, &mut rng, &options).await;

    assert_eq!(stats.sent, 12);
    assert_eq!(stats.batches, 3);
    assert_eq!(sink.flushes.load(Ordering::Relaxed), 3);
}

#[tokio::test]
async fn same_seed_produces_same_stream() {
    let first = RecordingSink::default();
    let second = RecordingSink::default();
    let options = RunOptions {
        batch: BatchOptions {
            count: 20,
            delay: Duration::ZERO,
        },
        mode: RunMode::Once,
    };

    run(&first, &mut StdRng::seed_from_u64(99), &options).await;
    run(&second, &mut StdRng::seed_from_u64(99), &options).await;

    let strip = |events: Vec<LogEvent>| -> Vec<LogEvent> {
        events
            .into_iter()
            .map(|mut e| {
                e.timestamp = chrono::DateTime::<chrono::Utc>::UNIX_EPOCH;
                e
            })
            .collect()
    };
    assert_eq!(strip(first.events()), strip(second.events()));
}

#[tokio::test]
async fn zero_count_sends_nothing() {
    let sink = RecordingSink::default();
    let mut rng = StdRng::seed_from_u64(0);
    let stats = produce_batch(
        &sink,
        &mut rng,
        &BatchOptions {
            count: 0,
            delay: Duration::from_secs(60),
        },
    )
    .await;
    assert_eq!(stats.sent, 0);
    assert!(sink.sent.lock().unwrap().is_empty());
}
