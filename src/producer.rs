use crate::generator::generate_event;
use crate::sink::LogSink;
use rand::Rng;
use std::ops::AddAssign;
use tokio::time::{sleep, Duration, Instant};
use tracing::{error, info, warn};

/// Progress is logged every this many events, and on the last one.
pub const PROGRESS_EVERY: u64 = 10;

/// Default pause between batches in continuous mode.
pub const DEFAULT_PAUSE: Duration = Duration::from_secs(5);

/// One batch of generated events.
#[derive(Clone, Debug)]
pub struct BatchOptions {
    pub count: u64,
    /// Pause between two sends; never applied after the last event.
    pub delay: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            count: 10,
            delay: Duration::ZERO,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunMode {
    Once,
    /// Repeat batches until stopped, sleeping `pause` in between.
    /// `max_iterations` bounds the number of batches when set.
    Continuous {
        pause: Duration,
        max_iterations: Option<u64>,
    },
}

#[derive(Clone, Debug)]
pub struct RunOptions {
    pub batch: BatchOptions,
    pub mode: RunMode,
}

/// Counters from one or more batches.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProduceStats {
    pub sent: u64,
    pub failed: u64,
    pub batches: u64,
    pub elapsed: Duration,
}

impl ProduceStats {
    pub fn events_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.sent as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

impl AddAssign for ProduceStats {
    fn add_assign(&mut self, other: Self) {
        self.sent += other.sent;
        self.failed += other.failed;
        self.batches += other.batches;
        self.elapsed += other.elapsed;
    }
}

/// Generate `count` events and push each through `sink`.
///
/// A failed send is logged and counted; the batch carries on with the
/// next event. The sink is flushed once the batch is done.
pub async fn produce_batch<R>(sink: &dyn LogSink, rng: &mut R, options: &BatchOptions) -> ProduceStats
where
    R: Rng + Send + ?Sized,
{
    let start = Instant::now();
    let mut stats = ProduceStats {
        batches: 1,
        ..Default::default()
    };

    info!("producing {} log events", options.count);

    for i in 0..options.count {
        let event = generate_event(rng);
        let n = i + 1;

        match sink.send(&event).await {
            Ok(delivery) => {
                stats.sent += 1;
                if n % PROGRESS_EVERY == 0 || n == options.count {
                    info!(
                        partition = ?delivery.partition,
                        offset = ?delivery.offset,
                        "sent {n}/{} events",
                        options.count
                    );
                }
            }
            Err(e) => {
                stats.failed += 1;
                error!(service = %event.service, "error sending event {n}: {e}");
            }
        }

        if !options.delay.is_zero() && n < options.count {
            sleep(options.delay).await;
        }
    }

    if let Err(e) = sink.flush().await {
        warn!("flush after batch failed: {e}");
    }

    stats.elapsed = start.elapsed();
    info!(
        sent = stats.sent,
        failed = stats.failed,
        "produced {} log events in {:?}",
        stats.sent,
        stats.elapsed
    );
    stats
}

/// Run one batch, or keep producing batches in continuous mode.
///
/// Continuous mode without `max_iterations` never returns on its own; the
/// caller is expected to race it against a shutdown signal.
pub async fn run<R>(sink: &dyn LogSink, rng: &mut R, options: &RunOptions) -> ProduceStats
where
    R: Rng + Send + ?Sized,
{
    match &options.mode {
        RunMode::Once => produce_batch(sink, rng, &options.batch).await,
        RunMode::Continuous {
            pause,
            max_iterations,
        } => {
            let mut total = ProduceStats::default();
            let mut iteration: u64 = 1;
            loop {
                info!("--- iteration {iteration} ---");
                total += produce_batch(sink, rng, &options.batch).await;

                if let Some(max) = max_iterations {
                    if iteration >= *max {
                        return total;
                    }
                }

                info!("sleeping {:?} before next batch", pause);
                sleep(*pause).await;
                iteration += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_per_second() {
        let stats = ProduceStats {
            sent: 50,
            failed: 0,
            batches: 1,
            elapsed: Duration::from_secs(2),
        };
        assert_eq!(stats.events_per_second(), 25.0);
        assert_eq!(ProduceStats::default().events_per_second(), 0.0);
    }

    #[test]
    fn test_stats_accumulate() {
        let mut total = ProduceStats::default();
        total += ProduceStats {
            sent: 3,
            failed: 1,
            batches: 1,
            elapsed: Duration::from_millis(10),
        };
        total += ProduceStats {
            sent: 4,
            failed: 0,
            batches: 1,
            elapsed: Duration::from_millis(5),
        };
        assert_eq!(total.sent, 7);
        assert_eq!(total.failed, 1);
        assert_eq!(total.batches, 2);
        assert_eq!(total.elapsed, Duration::from_millis(15));
    }
}
