//! Environment variable names read by the `generate-logs` binary.
//!
//! Each backs the matching CLI flag, so a flag on the command line always
//! wins over the environment.

/// Comma-separated broker list, e.g. `localhost:9092`.
pub const KAFKA_BROKERS_ENV: &str = "KAFKA_BROKERS";

/// Target topic name.
pub const KAFKA_TOPIC_ENV: &str = "KAFKA_TOPIC";

/// `PLAINTEXT`, `SSL`, `SASL_PLAINTEXT` or `SASL_SSL`.
pub const KAFKA_SECURITY_PROTOCOL_ENV: &str = "KAFKA_SECURITY_PROTOCOL";

/// SASL mechanism, required for the `SASL_*` protocols.
pub const KAFKA_SASL_MECHANISM_ENV: &str = "KAFKA_SASL_MECHANISM";

/// SASL username (e.g. a Confluent Cloud API key).
pub const KAFKA_SASL_USERNAME_ENV: &str = "KAFKA_SASL_USERNAME";

/// SASL password (e.g. a Confluent Cloud API secret).
pub const KAFKA_SASL_PASSWORD_ENV: &str = "KAFKA_SASL_PASSWORD";
