//! Validated runtime configuration.
use std::time::Duration;

use consumption_common::Network;
use consumption_ethereum::{ContractEndpoint, OracleClient};

/// Error returned when the configuration cannot be used to reach the oracle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not set", var = Config::API_KEY_VAR)]
    MissingApiKey,
    #[error(
        "{var} may only contain ASCII letters, digits, '-' and '_'",
        var = Config::API_KEY_VAR
    )]
    InvalidApiKey,
    #[error("building the endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// The provider API key. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(raw: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = raw.into();
        let key = raw.trim();

        if key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        // The key becomes a URL path segment.
        if !key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(ConfigError::InvalidApiKey);
        }

        Ok(Self(key.to_owned()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: ApiKey,
    pub network: Network,
    pub timeout: Duration,
}

impl Config {
    pub const API_KEY_VAR: &'static str = "ALCHEMY_API_KEY";

    /// Creates a configuration for the Mumbai oracle, failing fast on a bad key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: ApiKey::new(api_key)?,
            network: Network::Mumbai,
            timeout: OracleClient::DEFAULT_TIMEOUT,
        })
    }

    /// Same as [Config::new] with the key taken from [`ALCHEMY_API_KEY`](Config::API_KEY_VAR).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_var(std::env::var(Self::API_KEY_VAR))
    }

    fn from_env_var(var: Result<String, std::env::VarError>) -> Result<Self, ConfigError> {
        use std::env::VarError;

        match var {
            Ok(key) => Self::new(key),
            Err(VarError::NotPresent) => Err(ConfigError::MissingApiKey),
            Err(VarError::NotUnicode(_)) => Err(ConfigError::InvalidApiKey),
        }
    }

    pub fn with_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> Result<ContractEndpoint, ConfigError> {
        Ok(ContractEndpoint::for_network(
            &self.network,
            self.api_key.expose(),
        )?)
    }

    pub fn client(&self) -> Result<OracleClient, ConfigError> {
        Ok(OracleClient::new(self.endpoint()?).with_timeout(self.timeout))
    }
}
