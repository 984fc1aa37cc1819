//! Command-line interface of the `generate-logs` binary.

use crate::config::{KafkaSettings, SaslMechanism, SecurityProtocol, DEFAULT_MESSAGE_TIMEOUT};
use crate::env;
use crate::error::ConfigError;
use crate::producer::{BatchOptions, RunMode, RunOptions, DEFAULT_PAUSE};
use clap::Parser;
use std::time::Duration;

/// Generate sample application logs and produce them to Kafka.
#[derive(Parser, Clone, Debug)]
#[command(
    name = "generate-logs",
    version,
    after_help = "\
Examples:
  # Test connection to Kafka (recommended first step)
  generate-logs --brokers localhost:9092 --topic application-logs --test-connection

  # Produce 100 logs with 0.5 second delay between each
  generate-logs --brokers localhost:9092 --topic app-logs --count 100 --delay 0.5

  # Continuous production (run until Ctrl+C)
  generate-logs --brokers localhost:9092 --topic logs --count 10 --continuous

  # Print events instead of sending them
  generate-logs --count 5 --seed 42 --dry-run"
)]
pub struct Cli {
    /// Kafka broker(s), comma-separated, e.g. localhost:9092 or broker1:9092,broker2:9092
    #[arg(long, env = env::KAFKA_BROKERS_ENV)]
    pub brokers: Option<String>,

    /// Kafka topic name to produce to
    #[arg(long, env = env::KAFKA_TOPIC_ENV)]
    pub topic: Option<String>,

    /// Number of log events to produce (per batch in continuous mode)
    #[arg(long, default_value = "10")]
    pub count: u64,

    /// Delay in seconds between messages
    #[arg(long, default_value = "0", value_parser = parse_seconds)]
    pub delay: Duration,

    /// Run continuously: produce COUNT events, pause, repeat
    #[arg(long)]
    pub continuous: bool,

    /// Seconds to pause between batches in continuous mode [default: 5]
    #[arg(long, value_parser = parse_seconds)]
    pub pause: Option<Duration>,

    /// Stop continuous mode after this many batches
    #[arg(long, requires = "continuous")]
    pub iterations: Option<u64>,

    /// Security protocol: PLAINTEXT, SSL, SASL_PLAINTEXT or SASL_SSL
    #[arg(long, env = env::KAFKA_SECURITY_PROTOCOL_ENV, default_value = "PLAINTEXT")]
    pub security_protocol: SecurityProtocol,

    /// SASL mechanism: PLAIN, SCRAM-SHA-256, SCRAM-SHA-512, GSSAPI or OAUTHBEARER
    #[arg(long, env = env::KAFKA_SASL_MECHANISM_ENV)]
    pub sasl_mechanism: Option<SaslMechanism>,

    /// SASL username (required for PLAIN and SCRAM-*)
    #[arg(long, env = env::KAFKA_SASL_USERNAME_ENV)]
    pub sasl_username: Option<String>,

    /// SASL password (required for PLAIN and SCRAM-*)
    #[arg(long, env = env::KAFKA_SASL_PASSWORD_ENV, hide_env_values = true)]
    pub sasl_password: Option<String>,

    /// Seconds to wait for each delivery report [default: 10]
    #[arg(long, value_parser = parse_seconds)]
    pub send_timeout: Option<Duration>,

    /// Test Kafka connection and exit (no logs produced)
    #[arg(long, conflicts_with = "dry_run")]
    pub test_connection: bool,

    /// Random seed; the same seed reproduces the same events (timestamps aside)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print events to stdout instead of sending them to Kafka
    #[arg(long)]
    pub dry_run: bool,

    /// With --dry-run, prefix each line with its record key and a tab
    #[arg(long, requires = "dry_run")]
    pub dry_run_keys: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// Validated Kafka settings from flags and environment.
    pub fn kafka_settings(&self) -> Result<KafkaSettings, ConfigError> {
        let brokers = self.brokers.clone().ok_or(ConfigError::MissingBrokers)?;
        let topic = self.topic.clone().ok_or(ConfigError::MissingTopic)?;

        Ok(KafkaSettings::new(brokers, topic)?
            .with_security(
                self.security_protocol,
                self.sasl_mechanism,
                self.sasl_username.clone(),
                self.sasl_password.clone(),
            )?
            .with_message_timeout(self.send_timeout.unwrap_or(DEFAULT_MESSAGE_TIMEOUT)))
    }

    pub fn run_options(&self) -> RunOptions {
        let mode = if self.continuous {
            RunMode::Continuous {
                pause: self.pause.unwrap_or(DEFAULT_PAUSE),
                max_iterations: self.iterations,
            }
        } else {
            RunMode::Once
        };

        RunOptions {
            batch: BatchOptions {
                count: self.count,
                delay: self.delay,
            },
            mode,
        }
    }
}

fn parse_seconds(raw: &str) -> Result<Duration, String> {
    let secs: f64 = raw
        .parse()
        .map_err(|_| format!("`{raw}` is not a number of seconds"))?;
    Duration::try_from_secs_f64(secs).map_err(|_| format!("`{raw}` must be a non-negative number of seconds"))
}
