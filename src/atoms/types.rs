// ── Paw Atoms: Shared Types ────────────────────────────────────────────────
// Plain data passed between the wallet layer, the engine and the tool layer.

use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

// ── Network ────────────────────────────────────────────────────────────────

/// Network as reported by the wallet provider.
/// Every field is optional: partial objects must be representable so that
/// support checks can answer `false` instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub protocol_family: Option<String>,
    pub network_id: Option<String>,
    pub chain_id: Option<u64>,
}

impl Network {
    pub fn evm(network_id: &str) -> Self {
        Self {
            protocol_family: Some(crate::atoms::constants::EVM_PROTOCOL_FAMILY.into()),
            network_id: Some(network_id.into()),
            chain_id: None,
        }
    }
}

// ── Token ──────────────────────────────────────────────────────────────────

/// ERC-20 token with on-chain resolved precision.
/// Identity is (chain_id, address); decimals do not take part in equality.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Token {
    pub chain_id: u64,
    pub address: Address,
    pub decimals: u8,
}

impl Token {
    pub fn new(chain_id: u64, address: Address, decimals: u8) -> Self {
        Self { chain_id, address, decimals }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.chain_id == other.chain_id && self.address == other.address
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chain_id.hash(state);
        self.address.hash(state);
    }
}

// ── Transactions ───────────────────────────────────────────────────────────

/// Unsigned transaction handed to the wallet for signing + broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub to: Address,
    pub data: Bytes,
    pub value: U256,
}

/// Minimal receipt view: did the transaction execute successfully?
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub tx_hash: String,
    pub success: bool,
    pub block_number: Option<u64>,
}

// ── Tool definitions ───────────────────────────────────────────────────────

/// Tool registration entry exposed to the agent's tool-calling layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: FunctionDefinition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn token_equality_ignores_decimals() {
        let weth = address!("4200000000000000000000000000000000000006");
        assert_eq!(Token::new(8453, weth, 18), Token::new(8453, weth, 6));
        assert_ne!(Token::new(8453, weth, 18), Token::new(84532, weth, 18));
    }

    #[test]
    fn network_deserializes_partial_objects() {
        let n: Network = serde_json::from_str("{}").unwrap();
        assert_eq!(n, Network::default());
        let n: Network =
            serde_json::from_str(r#"{"protocolFamily":"evm","networkId":"base-mainnet"}"#)
                .unwrap();
        assert_eq!(n, Network::evm("base-mainnet"));
    }
}
