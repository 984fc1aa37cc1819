use anyhow::{Context, Result};
use clap::Parser;
use kafka_log_synth::cli::Cli;
use kafka_log_synth::init::{init_tracing_with_config, LoggingConfig};
use kafka_log_synth::kafka::KafkaSink;
use kafka_log_synth::producer::{self, ProduceStats};
use kafka_log_synth::sink::LogSink;
use kafka_log_synth::stdout_sink::StdoutSink;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let logging = if cli.verbose {
        LoggingConfig::verbose()
    } else {
        LoggingConfig::default()
    };
    if let Err(e) = init_tracing_with_config(&logging) {
        eprintln!("Error: failed to initialize logging: {e}");
    }

    match run_main(cli).await {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}

async fn run_main(cli: Cli) -> Result<()> {
    if cli.dry_run {
        let sink = StdoutSink {
            with_key: cli.dry_run_keys,
        };
        return produce(&cli, &sink).await;
    }

    let settings = cli.kafka_settings()?;
    info!(
        brokers = %settings.brokers,
        security_protocol = %settings.security_protocol,
        "connecting to kafka"
    );
    let sink = KafkaSink::new(&settings).context("Failed to create Kafka producer")?;

    if cli.test_connection {
        let report = sink
            .check_connection()
            .await
            .context("Connection test failed")?;
        println!("{}", report.render(&settings.topic));
        if let Err(e) = &report.delivery {
            anyhow::bail!("Connection test failed: {e}");
        }
        return Ok(());
    }

    produce(&cli, &sink).await
}

async fn produce(cli: &Cli, sink: &dyn LogSink) -> Result<()> {
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let options = cli.run_options();

    let stats: Option<ProduceStats> = tokio::select! {
        stats = producer::run(sink, &mut rng, &options) => Some(stats),
        res = tokio::signal::ctrl_c() => {
            interrupted(res)?;
            None
        }
    };

    sink.flush().await.context("Failed to flush producer")?;
    info!("producer closed");

    if let Some(stats) = stats {
        info!(
            "done: {} sent, {} failed, {} batch(es), ~{:.0} ev/s",
            stats.sent,
            stats.failed,
            stats.batches,
            stats.events_per_second()
        );
        if stats.sent == 0 && stats.failed > 0 {
            error!("no events were delivered");
            anyhow::bail!("all {} sends failed", stats.failed);
        }
    }
    Ok(())
}

/// Outcome of the Ctrl+C listener: a delivered signal stops the run, a
/// failure to install the handler is an error.
fn interrupted(res: std::io::Result<()>) -> Result<()> {
    res.context("Failed to listen for Ctrl+C")?;
    info!("stopped by user (Ctrl+C)");
    Ok(())
}
