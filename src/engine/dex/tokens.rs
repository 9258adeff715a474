// Paw Agent Engine — Token metadata
// Decimals are always read from the token contract; unknown tokens are
// never assumed to have 18 decimals.

use crate::atoms::error::{EngineResult, SwapError};
use crate::atoms::traits::EvmWalletProvider;
use crate::atoms::types::Token;
use crate::engine::dex::abi;
use alloy_primitives::Address;
use log::debug;

/// Resolve a token's `decimals()` through the wallet's read capability.
pub async fn resolve_token(
    wallet: &dyn EvmWalletProvider,
    chain_id: u64,
    address: Address,
) -> EngineResult<Token> {
    let unavailable = |reason: String| SwapError::MetadataUnavailable {
        token: address.to_string(),
        reason,
    };

    let data = wallet
        .read_contract(address, abi::encode_decimals())
        .await
        .map_err(|e| unavailable(e.to_string()))?;

    if data.is_empty() {
        return Err(unavailable("empty return data (not a contract?)".into()));
    }

    let decimals = abi::decode_decimals(&data).map_err(unavailable)?;
    debug!("[uniswap] {} decimals = {}", address, decimals);
    Ok(Token::new(chain_id, address, decimals))
}

/// Resolve both sides of a pair; the reads are independent and run together.
pub async fn resolve_pair(
    wallet: &dyn EvmWalletProvider,
    chain_id: u64,
    token_in: Address,
    token_out: Address,
) -> EngineResult<(Token, Token)> {
    futures::try_join!(
        resolve_token(wallet, chain_id, token_in),
        resolve_token(wallet, chain_id, token_out),
    )
}
