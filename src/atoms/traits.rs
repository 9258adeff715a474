// Paw Atoms — Wallet Provider Golden Trait
// Every wallet backend the swap action can drive implements EvmWalletProvider.
// The engine never sees key material: it builds calldata and hands the
// unsigned request to the wallet, which signs and broadcasts.

use crate::atoms::types::{Network, TransactionRequest, TxReceipt};
use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;

// ── Error type ─────────────────────────────────────────────────────────────

/// Canonical error type for wallet operations.
#[derive(Debug)]
pub enum WalletError {
    /// HTTP / node transport failure.
    Transport(String),
    /// `eth_call` reverted or returned no data.
    Reverted(String),
    /// The wallet refused to sign or the node rejected the transaction.
    Rejected(String),
    /// Receipt did not appear within the wallet's wait window.
    Timeout(String),
}

impl std::fmt::Display for WalletError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalletError::Transport(s) => write!(f, "transport error: {}", s),
            WalletError::Reverted(s) => write!(f, "execution reverted: {}", s),
            WalletError::Rejected(s) => write!(f, "rejected: {}", s),
            WalletError::Timeout(s) => write!(f, "timed out: {}", s),
        }
    }
}

impl std::error::Error for WalletError {}

// ── The Golden Trait ───────────────────────────────────────────────────────

/// The Golden Trait — every wallet provider implements this.
///
/// `send_transaction` returns once the transaction is accepted into the
/// node's pool; `wait_for_transaction_receipt` is only used where the
/// engine must observe execution (approvals) before continuing.
#[async_trait]
pub trait EvmWalletProvider: Send + Sync {
    /// Address that owns the tokens and receives swap output.
    fn get_address(&self) -> Address;

    /// Network the wallet is currently connected to.
    fn get_network(&self) -> Network;

    /// Read-only contract call; returns raw ABI-encoded return data.
    async fn read_contract(&self, to: Address, data: Bytes) -> Result<Bytes, WalletError>;

    /// Sign and broadcast; returns the 0x-prefixed transaction hash.
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<String, WalletError>;

    /// Wait until the transaction is mined and report its status.
    async fn wait_for_transaction_receipt(&self, tx_hash: &str) -> Result<TxReceipt, WalletError>;
}
