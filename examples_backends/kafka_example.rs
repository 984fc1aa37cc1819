use rand::rngs::StdRng;
use rand::SeedableRng;

use kafka_log_synth::config::KafkaSettings;
use kafka_log_synth::env::{KAFKA_BROKERS_ENV, KAFKA_TOPIC_ENV};
use kafka_log_synth::generator::generate_event;
use kafka_log_synth::init::init_tracing;
use kafka_log_synth::kafka::KafkaSink;
use kafka_log_synth::sink::LogSink;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing().map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    let brokers = std::env::var(KAFKA_BROKERS_ENV).unwrap_or_else(|_| "localhost:9092".to_string());
    let topic = std::env::var(KAFKA_TOPIC_ENV).unwrap_or_else(|_| "application-logs".to_string());

    let settings = KafkaSettings::new(brokers, topic)?;
    let sink = KafkaSink::new(&settings)?;

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..5 {
        let event = generate_event(&mut rng);
        let delivery = sink.send(&event).await?;
        println!(
            "{} {} -> partition {:?} offset {:?}",
            event.level, event.service, delivery.partition, delivery.offset
        );
    }
    sink.flush().await?;
    Ok(())
}
