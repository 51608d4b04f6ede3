use std::future::IntoFuture;
use std::time::Duration;

use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::transports::TransportError;
use consumption_common::{ConsumptionRecord, LookupKey};
use tracing::{debug, info};

use crate::contract::{ContractEndpoint, EnergyOracle};
use crate::ConsumptionSource;

/// Error returned while connecting to and validating an endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("endpoint serves chain ID {actual}, expected {expected}")]
    WrongChain { expected: u64, actual: u64 },
    /// Nothing is deployed at the address, so every lookup would decode as garbage or zero.
    #[error("no contract code at {0}")]
    NoContractCode(Address),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Error returned by [`OracleClient::energy_consumption`].
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    /// Covers transport failures, reverts and undecodable return data.
    #[error(transparent)]
    Contract(#[from] alloy::contract::Error),
}

/// A read-only client of the energy oracle behind a single HTTP JSON-RPC endpoint.
///
/// Every request is bounded by a timeout and never retried.
#[derive(Clone)]
pub struct OracleClient {
    provider: DynProvider,
    endpoint: ContractEndpoint,
    timeout: Duration,
}

impl OracleClient {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(endpoint: ContractEndpoint) -> Self {
        // Fillers only matter for transactions, which this client never sends.
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_http(endpoint.url.clone())
            .erased();

        Self {
            provider,
            endpoint,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &ContractEndpoint {
        &self.endpoint
    }

    /// Checks that the endpoint serves the expected chain and that the oracle
    /// is actually deployed there.
    pub async fn validate(&self) -> Result<(), ClientError> {
        let actual = self.timed(self.provider.get_chain_id()).await??;
        if actual != self.endpoint.chain_id {
            return Err(ClientError::WrongChain {
                expected: self.endpoint.chain_id,
                actual,
            });
        }

        let code = self
            .timed(self.provider.get_code_at(self.endpoint.address))
            .await??;
        if code.is_empty() {
            return Err(ClientError::NoContractCode(self.endpoint.address));
        }

        info!(
            chain_id = actual,
            address = %self.endpoint.address,
            function = %self.endpoint.function.signature(),
            version = self.endpoint.function.version,
            "Energy oracle endpoint validated"
        );

        Ok(())
    }

    async fn timed<F: IntoFuture>(&self, fut: F) -> Result<F::Output, ClientError> {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| ClientError::Timeout(self.timeout))
    }
}

#[async_trait::async_trait]
impl ConsumptionSource for OracleClient {
    async fn energy_consumption(&self, key: &LookupKey) -> Result<ConsumptionRecord, CallError> {
        debug!(
            user = %key.user,
            supplier_id = %key.supplier_id,
            record_id = %key.record_id,
            selector = %self.endpoint.function.selector_hex(),
            "Calling energy oracle"
        );

        let oracle = EnergyOracle::new(self.endpoint.address, &self.provider);
        let call = oracle.energyConsumptions(key.user, key.supplier_id.get(), key.record_id.get());

        let EnergyOracle::energyConsumptionsReturn {
            timestamp,
            consumption,
        } = tokio::time::timeout(self.timeout, call.call())
            .await
            .map_err(|_| CallError::Timeout(self.timeout))??;

        let record = ConsumptionRecord::new(timestamp, consumption);
        if record.is_absent() {
            debug!("No consumption recorded under this key, the oracle reports zero");
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use alloy::primitives::{address, U256};
    use assert_matches::assert_matches;
    use consumption_common::{LookupKey, Network, RecordId, SupplierId};
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    const CHAIN_ID: u64 = 80001;
    const ORACLE: Address = address!("B99B7a11B0e6BF8F0220f7C4E9Bd5BA37d195da5");

    fn endpoint(url: &str) -> ContractEndpoint {
        let network = Network::Custom {
            url: url.parse().unwrap(),
            chain_id: CHAIN_ID,
        };
        ContractEndpoint::for_network(&network, "unused").unwrap()
    }

    fn client(server: &MockServer) -> OracleClient {
        OracleClient::new(endpoint(&server.base_url()))
    }

    fn rpc_result(result: impl Into<serde_json::Value>) -> serde_json::Value {
        json!({ "jsonrpc": "2.0", "id": 0, "result": result.into() })
    }

    fn encoded_record(timestamp: u64, consumption: u64) -> String {
        format!("0x{timestamp:064x}{consumption:064x}")
    }

    fn key(record_id: u64) -> LookupKey {
        LookupKey::new(
            address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa1"),
            SupplierId::from(1),
            RecordId::from(record_id),
        )
    }

    mod energy_consumption {
        use pretty_assertions::assert_eq;

        use super::*;

        #[test_log::test(tokio::test)]
        async fn recorded() {
            let server = MockServer::start_async().await;
            let mock = server.mock(|when, then| {
                when.method(POST).body_contains("eth_call");
                then.status(200)
                    .json_body(rpc_result(encoded_record(1_680_000_000, 42)));
            });

            let record = client(&server).energy_consumption(&key(0)).await.unwrap();

            mock.assert();
            assert_eq!(
                record,
                ConsumptionRecord::new(U256::from(1_680_000_000u64), U256::from(42u8))
            );
        }

        #[test_log::test(tokio::test)]
        async fn sends_selector() {
            let server = MockServer::start_async().await;
            let selector = crate::ENERGY_CONSUMPTIONS.selector_hex();
            let mock = server.mock(|when, then| {
                when.method(POST)
                    .body_contains("eth_call")
                    .body_contains(&selector);
                then.status(200)
                    .json_body(rpc_result(encoded_record(1_680_000_000, 42)));
            });

            client(&server).energy_consumption(&key(0)).await.unwrap();

            mock.assert();
        }

        #[test_log::test(tokio::test)]
        async fn unknown_key_is_zero() {
            let server = MockServer::start_async().await;
            server.mock(|when, then| {
                when.method(POST).body_contains("eth_call");
                then.status(200).json_body(rpc_result(encoded_record(0, 0)));
            });

            let record = client(&server)
                .energy_consumption(&key(999))
                .await
                .unwrap();

            assert!(record.is_absent());
            assert_eq!(record.consumption, U256::ZERO);
        }

        #[tokio::test]
        async fn revert_is_an_error() {
            let server = MockServer::start_async().await;
            server.mock(|when, then| {
                when.method(POST).body_contains("eth_call");
                then.status(200).json_body(json!({
                    "jsonrpc": "2.0",
                    "id": 0,
                    "error": { "code": 3, "message": "execution reverted" }
                }));
            });

            let result = client(&server).energy_consumption(&key(0)).await;

            assert_matches!(result, Err(CallError::Contract(_)));
        }

        #[tokio::test]
        async fn short_return_data_is_an_error() {
            let server = MockServer::start_async().await;
            server.mock(|when, then| {
                when.method(POST).body_contains("eth_call");
                then.status(200).json_body(rpc_result("0x"));
            });

            let result = client(&server).energy_consumption(&key(0)).await;

            assert_matches!(result, Err(CallError::Contract(_)));
        }

        #[tokio::test]
        async fn times_out() {
            let server = MockServer::start_async().await;
            server.mock(|when, then| {
                when.method(POST).body_contains("eth_call");
                then.status(200)
                    .delay(Duration::from_secs(2))
                    .json_body(rpc_result(encoded_record(1, 1)));
            });

            let timeout = Duration::from_millis(100);
            let result = client(&server)
                .with_timeout(timeout)
                .energy_consumption(&key(0))
                .await;

            assert_matches!(result, Err(CallError::Timeout(t)) if t == timeout);
        }

        #[tokio::test]
        async fn unreachable_endpoint() {
            // Nothing listens on port 1.
            let result = OracleClient::new(endpoint("http://127.0.0.1:1"))
                .energy_consumption(&key(0))
                .await;

            assert_matches!(result, Err(CallError::Contract(_)));
        }
    }

    mod validate {
        use super::*;

        fn mock_chain_id<'a>(server: &'a MockServer, chain_id: &str) -> httpmock::Mock<'a> {
            server.mock(|when, then| {
                when.method(POST).body_contains("eth_chainId");
                then.status(200).json_body(rpc_result(chain_id));
            })
        }

        fn mock_code<'a>(server: &'a MockServer, code: &str) -> httpmock::Mock<'a> {
            server.mock(|when, then| {
                when.method(POST).body_contains("eth_getCode");
                then.status(200).json_body(rpc_result(code));
            })
        }

        #[test_log::test(tokio::test)]
        async fn ok() {
            let server = MockServer::start_async().await;
            let chain = mock_chain_id(&server, "0x13881");
            let code = mock_code(&server, "0x608060405234801561001057600080fd5b50");

            client(&server).validate().await.unwrap();

            chain.assert();
            code.assert();
        }

        #[tokio::test]
        async fn wrong_chain() {
            let server = MockServer::start_async().await;
            let _chain = mock_chain_id(&server, "0x1");
            let code = mock_code(&server, "0x6080");

            let result = client(&server).validate().await;

            assert_matches!(
                result,
                Err(ClientError::WrongChain {
                    expected: 80001,
                    actual: 1
                })
            );
            code.assert_hits(0);
        }

        #[tokio::test]
        async fn no_code() {
            let server = MockServer::start_async().await;
            let _chain = mock_chain_id(&server, "0x13881");
            let _code = mock_code(&server, "0x");

            let result = client(&server).validate().await;

            assert_matches!(result, Err(ClientError::NoContractCode(address)) if address == ORACLE);
        }

        #[tokio::test]
        async fn transport_failure() {
            let server = MockServer::start_async().await;
            server.mock(|when, then| {
                when.method(POST);
                then.status(500).body("whatever");
            });

            let result = client(&server).validate().await;

            assert_matches!(result, Err(ClientError::Transport(_)));
        }
    }
}
