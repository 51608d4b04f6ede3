use alloy::primitives::{address, Address};
use consumption_common::Network;
use url::Url;

alloy::sol! {
    #[sol(rpc)]
    interface EnergyOracle {
        function energyConsumptions(address user, uint256 supplierId, uint256 id)
            external
            view
            returns (uint256 timestamp, uint256 consumption);
    }
}

/// Address of the energy oracle deployed on Polygon Mumbai.
pub const MUMBAI_ORACLE: Address = address!("B99B7a11B0e6BF8F0220f7C4E9Bd5BA37d195da5");

/// A named ABI parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub kind: &'static str,
}

/// Schema of a read-only contract function.
///
/// The encoding itself is done by the [EnergyOracle] binding. This describes
/// the same function as data so it can be logged and checked against the
/// deployed ABI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewFunction {
    /// Bumped whenever the deployed interface changes.
    pub version: u32,
    pub name: &'static str,
    pub inputs: &'static [Param],
    pub outputs: &'static [Param],
}

impl ViewFunction {
    /// The canonical signature, e.g. `energyConsumptions(address,uint256,uint256)`.
    pub fn signature(&self) -> String {
        let kinds = self
            .inputs
            .iter()
            .map(|p| p.kind)
            .collect::<Vec<_>>()
            .join(",");
        format!("{}({kinds})", self.name)
    }

    /// The first four bytes of the Keccak256 digest of the [signature](Self::signature).
    pub fn selector(&self) -> [u8; 4] {
        use sha3::Digest;
        let digest = sha3::Keccak256::digest(self.signature().as_bytes());
        [digest[0], digest[1], digest[2], digest[3]]
    }

    pub fn selector_hex(&self) -> String {
        format!("0x{}", hex::encode(self.selector()))
    }
}

/// `energyConsumptions(user, supplierId, id) returns (timestamp, consumption)`
pub const ENERGY_CONSUMPTIONS: ViewFunction = ViewFunction {
    version: 1,
    name: "energyConsumptions",
    inputs: &[
        Param {
            name: "user",
            kind: "address",
        },
        Param {
            name: "supplierId",
            kind: "uint256",
        },
        Param {
            name: "id",
            kind: "uint256",
        },
    ],
    outputs: &[
        Param {
            name: "timestamp",
            kind: "uint256",
        },
        Param {
            name: "consumption",
            kind: "uint256",
        },
    ],
};

/// Where and how the oracle is reached. Fixed for the lifetime of a client.
#[derive(Clone, PartialEq, Eq)]
pub struct ContractEndpoint {
    pub url: Url,
    pub chain_id: u64,
    pub address: Address,
    pub function: &'static ViewFunction,
}

impl ContractEndpoint {
    /// The oracle on the given network.
    ///
    /// Only Mumbai has a known deployment, custom networks are expected to
    /// host a contract at [MUMBAI_ORACLE] too, which is what a local fork provides.
    pub fn for_network(network: &Network, api_key: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            url: network.rpc_url(api_key)?,
            chain_id: network.chain_id(),
            address: MUMBAI_ORACLE,
            function: &ENERGY_CONSUMPTIONS,
        })
    }
}

// Hosted endpoint URLs carry the API key, so only the origin is printed.
impl std::fmt::Debug for ContractEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractEndpoint")
            .field("url", &self.url.origin().ascii_serialization())
            .field("chain_id", &self.chain_id)
            .field("address", &self.address)
            .field("function", &self.function.signature())
            .finish()
    }
}
