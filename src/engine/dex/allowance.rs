// Paw Agent Engine — Allowance manager
//
// Step one of the approve-then-swap saga. The two transactions are never
// atomic: if the process stops after the approval lands, the next call
// reads a sufficient allowance and skips straight to the swap.

use crate::atoms::error::{EngineResult, SwapError};
use crate::atoms::traits::EvmWalletProvider;
use crate::atoms::types::TransactionRequest;
use crate::engine::config::ApprovalPolicy;
use crate::engine::dex::abi;
use alloy_primitives::{Address, U256};
use log::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowanceOutcome {
    /// Nothing sent.
    AlreadySufficient { current: U256 },
    /// One approval sent and mined successfully.
    Approved { tx_hash: String, approved: U256 },
}

impl AllowanceOutcome {
    pub fn approval_tx_hash(&self) -> Option<&str> {
        match self {
            AllowanceOutcome::AlreadySufficient { .. } => None,
            AllowanceOutcome::Approved { tx_hash, .. } => Some(tx_hash),
        }
    }
}

/// Current allowance granted by `owner` to `spender` on `token`.
pub async fn current_allowance(
    wallet: &dyn EvmWalletProvider,
    token: Address,
    owner: Address,
    spender: Address,
) -> EngineResult<U256> {
    let data = wallet
        .read_contract(token, abi::encode_allowance(owner, spender))
        .await
        .map_err(|e| SwapError::ApprovalFailed(format!("allowance read failed: {}", e)))?;
    abi::decode_allowance(&data)
        .map_err(|e| SwapError::ApprovalFailed(format!("allowance decode failed: {}", e)))
}

/// Make sure `spender` may move at least `amount` of `token` from the wallet.
/// Sends at most one approval and waits for it to be mined before returning.
pub async fn ensure_allowance(
    wallet: &dyn EvmWalletProvider,
    token: Address,
    spender: Address,
    amount: U256,
    policy: ApprovalPolicy,
) -> EngineResult<AllowanceOutcome> {
    let owner = wallet.get_address();
    let current = current_allowance(wallet, token, owner, spender).await?;
    if current >= amount {
        info!("[uniswap:approve] Allowance {} already covers {}", current, amount);
        return Ok(AllowanceOutcome::AlreadySufficient { current });
    }

    let approved = match policy {
        ApprovalPolicy::Exact => amount,
        ApprovalPolicy::Unlimited => U256::MAX,
    };
    info!(
        "[uniswap:approve] Approving {} of token {} for router {} (current {})",
        approved, token, spender, current
    );

    let tx_hash = wallet
        .send_transaction(TransactionRequest {
            to: token,
            data: abi::encode_approve(spender, approved),
            value: U256::ZERO,
        })
        .await
        .map_err(|e| SwapError::ApprovalFailed(format!("approval broadcast failed: {}", e)))?;
    info!("[uniswap:approve] Approval tx: {}", tx_hash);

    let receipt = wallet
        .wait_for_transaction_receipt(&tx_hash)
        .await
        .map_err(|e| SwapError::ApprovalFailed(format!("approval {} not confirmed: {}", tx_hash, e)))?;
    if !receipt.success {
        return Err(SwapError::ApprovalFailed(format!(
            "approval transaction reverted. Tx: {}",
            tx_hash
        )));
    }

    info!("[uniswap:approve] Token approval confirmed");
    Ok(AllowanceOutcome::Approved { tx_hash, approved })
}
