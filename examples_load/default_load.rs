use std::time::Instant;

use kafka_log_synth::init::init_tracing;
use kafka_log_synth::noop_sink::NoopSink;
use kafka_log_synth::producer::{produce_batch, BatchOptions};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[tokio::main]
async fn main() {
    if let Err(e) = init_tracing() {
        eprintln!("failed to initialize logging: {e}");
    }

    let sink = NoopSink;
    let mut rng = StdRng::from_entropy();
    let options = BatchOptions {
        count: 100_000,
        ..BatchOptions::default()
    };

    let start = Instant::now();
    let stats = produce_batch(&sink, &mut rng, &options).await;
    let elapsed = start.elapsed();

    println!(
        "default config: generated {} events in {:?} (~{:.0} ev/s)",
        stats.sent,
        elapsed,
        stats.sent as f64 / elapsed.as_secs_f64()
    );
}
