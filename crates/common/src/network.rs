use url::Url;

/// The chain hosting the energy oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Network {
    /// Polygon's Mumbai testnet, reached through Alchemy.
    Mumbai,
    /// Any other JSON-RPC endpoint, e.g. a local development node.
    Custom { url: Url, chain_id: u64 },
}

impl Network {
    const MUMBAI_ALCHEMY_URL: &'static str = "https://polygon-mumbai.g.alchemy.com/v2/";
    const MUMBAI_CHAIN_ID: u64 = 80001;

    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Mumbai => Self::MUMBAI_CHAIN_ID,
            Network::Custom { chain_id, .. } => *chain_id,
        }
    }

    /// The JSON-RPC endpoint of this network.
    ///
    /// Hosted endpoints embed the API key as the last path segment. Custom
    /// endpoints are used as given and ignore the key.
    pub fn rpc_url(&self, api_key: &str) -> Result<Url, url::ParseError> {
        match self {
            Network::Mumbai => Url::parse(Self::MUMBAI_ALCHEMY_URL)?.join(api_key),
            Network::Custom { url, .. } => Ok(url.clone()),
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Network::Mumbai => f.write_str("mumbai"),
            Network::Custom { chain_id, .. } => write!(f, "custom (chain ID {chain_id})"),
        }
    }
}
