//! Read access to the energy oracle contract over Ethereum JSON-RPC.
use consumption_common::{ConsumptionRecord, LookupKey};

pub mod contract;
pub mod provider;

pub use contract::{ContractEndpoint, ViewFunction, ENERGY_CONSUMPTIONS, MUMBAI_ORACLE};
pub use provider::{CallError, ClientError, OracleClient};

/// The one query the reader needs from the oracle.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait::async_trait]
pub trait ConsumptionSource: Send + Sync {
    /// Reads the record stored under `key`.
    ///
    /// Keys that were never recorded yield [ConsumptionRecord::default()].
    async fn energy_consumption(&self, key: &LookupKey) -> Result<ConsumptionRecord, CallError>;
}
