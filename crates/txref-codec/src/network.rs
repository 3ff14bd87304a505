use serde::{Deserialize, Serialize};

/// Networks a TxRef can point into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    /// Human-readable part used by TxRef strings on this network.
    pub fn hrp(self) -> &'static str {
        match self {
            Network::Mainnet => "tx",
            Network::Testnet => "txtest",
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}
