// Paw Agent Engine — Node-managed wallet
//
// EvmWalletProvider over plain JSON-RPC where the node holds the key and
// signs `eth_sendTransaction` itself (dev nodes, custodial signers,
// unlocked accounts). No key material ever passes through this process.

use crate::atoms::error::{EngineResult, SwapError};
use crate::atoms::traits::{EvmWalletProvider, WalletError};
use crate::atoms::types::{Network, TransactionRequest, TxReceipt};
use crate::engine::config::SwapConfig;
use crate::engine::dex::rpc::{RpcClient, RpcError};
use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use log::{info, warn};
use std::time::Duration;

const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);
const RECEIPT_MAX_POLLS: u32 = 30;

pub struct RpcWalletProvider {
    rpc: RpcClient,
    address: Address,
    network: Network,
    poll_interval: Duration,
    max_polls: u32,
}

impl RpcWalletProvider {
    /// Connect to the configured node for `network_id` and confirm it
    /// serves the chain the configuration expects.
    pub async fn connect(
        config: &SwapConfig,
        network_id: &str,
        address: Address,
    ) -> EngineResult<Self> {
        let net = config
            .network(network_id)
            .ok_or_else(|| SwapError::UnsupportedNetwork(network_id.to_string()))?;
        let rpc = RpcClient::new(&net.rpc_url, config.routing.timeout());

        let node_chain = rpc.eth_chain_id().await?;
        if node_chain != net.chain_id {
            return Err(SwapError::Config(format!(
                "RPC {} serves chain {} but {} expects {}",
                net.rpc_url, node_chain, network_id, net.chain_id
            )));
        }
        info!("[uniswap] Wallet {} connected to {} (chain {})", address, network_id, node_chain);

        Ok(Self {
            rpc,
            address,
            network: Network {
                protocol_family: Some(crate::atoms::constants::EVM_PROTOCOL_FAMILY.into()),
                network_id: Some(network_id.to_string()),
                chain_id: Some(node_chain),
            },
            poll_interval: RECEIPT_POLL_INTERVAL,
            max_polls: RECEIPT_MAX_POLLS,
        })
    }

    pub fn with_receipt_polling(mut self, interval: Duration, max_polls: u32) -> Self {
        self.poll_interval = interval;
        self.max_polls = max_polls.max(1);
        self
    }
}

fn classify_call_error(e: RpcError) -> WalletError {
    if e.is_node_error() {
        WalletError::Reverted(e.to_string())
    } else {
        WalletError::Transport(e.to_string())
    }
}

#[async_trait]
impl EvmWalletProvider for RpcWalletProvider {
    fn get_address(&self) -> Address {
        self.address
    }

    fn get_network(&self) -> Network {
        self.network.clone()
    }

    async fn read_contract(&self, to: Address, data: Bytes) -> Result<Bytes, WalletError> {
        self.rpc.eth_call(to, &data).await.map_err(classify_call_error)
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<String, WalletError> {
        self.rpc
            .eth_send_transaction(self.address, &tx)
            .await
            .map_err(|e| {
                if e.is_node_error() {
                    WalletError::Rejected(e.to_string())
                } else {
                    WalletError::Transport(e.to_string())
                }
            })
    }

    async fn wait_for_transaction_receipt(&self, tx_hash: &str) -> Result<TxReceipt, WalletError> {
        for attempt in 0..self.max_polls {
            tokio::time::sleep(self.poll_interval).await;
            match self.rpc.eth_get_transaction_receipt(tx_hash).await {
                Ok(Some(receipt)) => return Ok(receipt),
                Ok(None) => {}
                Err(e) => warn!("[uniswap] Receipt poll {} for {} failed: {}", attempt + 1, tx_hash, e),
            }
        }
        Err(WalletError::Timeout(format!(
            "no receipt for {} after {:?}",
            tx_hash,
            self.poll_interval * self.max_polls
        )))
    }
}
