use crate::error::ConfigError;
use rdkafka::config::ClientConfig;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// How the producer talks to the brokers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SecurityProtocol {
    #[default]
    Plaintext,
    Ssl,
    SaslPlaintext,
    SaslSsl,
}

impl SecurityProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityProtocol::Plaintext => "PLAINTEXT",
            SecurityProtocol::Ssl => "SSL",
            SecurityProtocol::SaslPlaintext => "SASL_PLAINTEXT",
            SecurityProtocol::SaslSsl => "SASL_SSL",
        }
    }

    pub fn uses_sasl(&self) -> bool {
        matches!(
            self,
            SecurityProtocol::SaslPlaintext | SecurityProtocol::SaslSsl
        )
    }
}

impl fmt::Display for SecurityProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecurityProtocol {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PLAINTEXT" => Ok(SecurityProtocol::Plaintext),
            "SSL" => Ok(SecurityProtocol::Ssl),
            "SASL_PLAINTEXT" => Ok(SecurityProtocol::SaslPlaintext),
            "SASL_SSL" => Ok(SecurityProtocol::SaslSsl),
            _ => Err(ConfigError::UnknownSecurityProtocol(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaslMechanism {
    Plain,
    ScramSha256,
    ScramSha512,
    Gssapi,
    OAuthBearer,
}

impl SaslMechanism {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaslMechanism::Plain => "PLAIN",
            SaslMechanism::ScramSha256 => "SCRAM-SHA-256",
            SaslMechanism::ScramSha512 => "SCRAM-SHA-512",
            SaslMechanism::Gssapi => "GSSAPI",
            SaslMechanism::OAuthBearer => "OAUTHBEARER",
        }
    }

    /// Mechanisms that authenticate with a username and password.
    pub fn needs_credentials(&self) -> bool {
        matches!(
            self,
            SaslMechanism::Plain | SaslMechanism::ScramSha256 | SaslMechanism::ScramSha512
        )
    }
}

impl fmt::Display for SaslMechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SaslMechanism {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PLAIN" => Ok(SaslMechanism::Plain),
            "SCRAM-SHA-256" => Ok(SaslMechanism::ScramSha256),
            "SCRAM-SHA-512" => Ok(SaslMechanism::ScramSha512),
            "GSSAPI" => Ok(SaslMechanism::Gssapi),
            "OAUTHBEARER" => Ok(SaslMechanism::OAuthBearer),
            _ => Err(ConfigError::UnknownSaslMechanism(s.to_string())),
        }
    }
}

/// Validated SASL settings.
#[derive(Clone, PartialEq, Eq)]
pub struct SaslConfig {
    pub mechanism: SaslMechanism,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for SaslConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaslConfig")
            .field("mechanism", &self.mechanism)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Everything needed to create the Kafka producer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KafkaSettings {
    /// Comma-separated broker list.
    pub brokers: String,
    pub topic: String,
    pub security_protocol: SecurityProtocol,
    pub sasl: Option<SaslConfig>,
    /// How long a send may wait for its delivery report.
    pub message_timeout: Duration,
}

pub const DEFAULT_MESSAGE_TIMEOUT: Duration = Duration::from_secs(10);

impl KafkaSettings {
    /// Plaintext settings for `brokers` / `topic`.
    ///
    /// Blank values are rejected the same way a missing flag is.
    pub fn new(brokers: impl Into<String>, topic: impl Into<String>) -> Result<Self, ConfigError> {
        let brokers = brokers.into();
        let topic = topic.into();
        if brokers.trim().is_empty() {
            return Err(ConfigError::MissingBrokers);
        }
        if topic.trim().is_empty() {
            return Err(ConfigError::MissingTopic);
        }

        Ok(KafkaSettings {
            brokers,
            topic,
            security_protocol: SecurityProtocol::Plaintext,
            sasl: None,
            message_timeout: DEFAULT_MESSAGE_TIMEOUT,
        })
    }

    /// Attach the security protocol and, for the `SASL_*` protocols, the
    /// SASL mechanism and credentials.
    ///
    /// SASL settings are ignored for non-SASL protocols.
    pub fn with_security(
        mut self,
        protocol: SecurityProtocol,
        mechanism: Option<SaslMechanism>,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Self, ConfigError> {
        self.security_protocol = protocol;
        self.sasl = None;

        if !protocol.uses_sasl() {
            return Ok(self);
        }

        let mechanism =
            mechanism.ok_or_else(|| ConfigError::MissingSaslMechanism(protocol.to_string()))?;

        let username = username.filter(|u| !u.is_empty());
        let password = password.filter(|p| !p.is_empty());
        if mechanism.needs_credentials() && (username.is_none() || password.is_none()) {
            return Err(ConfigError::MissingSaslCredentials(mechanism.to_string()));
        }

        self.sasl = Some(SaslConfig {
            mechanism,
            username,
            password,
        });
        Ok(self)
    }

    pub fn with_message_timeout(mut self, timeout: Duration) -> Self {
        self.message_timeout = timeout;
        self
    }

    /// Render the librdkafka client configuration.
    pub fn to_client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new();
        config
            .set("bootstrap.servers", &self.brokers)
            .set("security.protocol", self.security_protocol.as_str())
            .set(
                "message.timeout.ms",
                self.message_timeout.as_millis().to_string(),
            );

        if let Some(sasl) = &self.sasl {
            config.set("sasl.mechanisms", sasl.mechanism.as_str());
            if let Some(username) = &sasl.username {
                config.set("sasl.username", username);
            }
            if let Some(password) = &sasl.password {
                config.set("sasl.password", password);
            }
        }

        config
    }
}
