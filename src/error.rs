/// Errors raised while building [`KafkaSettings`](crate::config::KafkaSettings)
/// from flags and environment.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--brokers is required (or set KAFKA_BROKERS environment variable)")]
    MissingBrokers,

    #[error("--topic is required (or set KAFKA_TOPIC environment variable)")]
    MissingTopic,

    #[error("unknown security protocol: {0}")]
    UnknownSecurityProtocol(String),

    #[error("unknown SASL mechanism: {0}")]
    UnknownSaslMechanism(String),

    #[error("SASL mechanism is required when using {0} (set KAFKA_SASL_MECHANISM or use --sasl-mechanism)")]
    MissingSaslMechanism(String),

    #[error("username and password required for {0} (set KAFKA_SASL_USERNAME and KAFKA_SASL_PASSWORD)")]
    MissingSaslCredentials(String),
}

/// Errors returned by a [`LogSink`](crate::sink::LogSink).
#[derive(thiserror::Error, Debug)]
pub enum SinkError {
    #[error("kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    #[error("failed to serialize event: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
