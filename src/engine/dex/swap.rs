// Paw Agent Engine — Swap executor
// network check → decimals → raw amount → route → allowance → router call
//
// Every external call is attempted once. Any failure aborts the rest of the
// pipeline with the error of the step that failed; nothing partial is ever
// reported as success.

use crate::atoms::constants::EVM_PROTOCOL_FAMILY;
use crate::atoms::error::{EngineResult, SwapError};
use crate::atoms::traits::EvmWalletProvider;
use crate::atoms::types::{Network, TransactionRequest};
use crate::engine::config::{NetworkConfig, SwapConfig};
use crate::engine::dex::abi;
use crate::engine::dex::allowance::ensure_allowance;
use crate::engine::dex::primitives::{amount_to_raw, raw_to_amount};
use crate::engine::dex::request::SwapRequest;
use crate::engine::dex::routing::{
    build_route_finder, ExecutionParams, Route, RouteFinder, RouteQuery,
};
use crate::engine::dex::tokens::resolve_pair;
use alloy_primitives::{Address, Bytes, U256};
use log::{debug, info};
use std::sync::Arc;

/// Accepted into the pool; not necessarily mined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapResult {
    pub tx_hash: String,
    pub summary: String,
    pub approval_tx_hash: Option<String>,
}

/// Final router transaction payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapCall {
    pub to: Address,
    pub data: Bytes,
    pub value: U256,
}

/// True iff the network is EVM and its id is in the configured allow-list.
/// Partial or malformed network objects answer false.
pub fn supports_network(config: &SwapConfig, network: &Network) -> bool {
    let family_ok = network.protocol_family.as_deref() == Some(EVM_PROTOCOL_FAMILY);
    let id_ok = network
        .network_id
        .as_deref()
        .map(|id| config.networks.contains_key(id))
        .unwrap_or(false);
    family_ok && id_ok
}

/// SwapRouter02 `multicall(deadline, [...])` with one exact-input call per
/// leg. Input is always an ERC-20, so no native value is attached.
pub fn build_swap_call(router: Address, route: &Route, params: &ExecutionParams) -> SwapCall {
    let calls: Vec<Bytes> = route
        .legs
        .iter()
        .map(|leg| {
            let min_out = leg.minimum_out(params.slippage_bps);
            if leg.is_single_hop() {
                let hop = leg.hops[0];
                abi::encode_exact_input_single(
                    hop.token_in,
                    hop.token_out,
                    hop.fee,
                    params.recipient,
                    leg.amount_in,
                    min_out,
                )
            } else {
                abi::encode_exact_input(leg.encoded_path(), params.recipient, leg.amount_in, min_out)
            }
        })
        .collect();

    SwapCall {
        to: router,
        data: abi::encode_multicall(params.deadline, calls),
        value: U256::ZERO,
    }
}

pub struct UniswapSwapper {
    config: Arc<SwapConfig>,
    route_finder: Arc<dyn RouteFinder>,
}

impl UniswapSwapper {
    pub fn new(config: Arc<SwapConfig>, route_finder: Arc<dyn RouteFinder>) -> Self {
        Self { config, route_finder }
    }

    /// Swapper using the route finder selected in `config.routing`.
    pub fn from_config(config: Arc<SwapConfig>) -> Self {
        let route_finder = build_route_finder(&config);
        Self::new(config, route_finder)
    }

    pub fn supports_network(&self, network: &Network) -> bool {
        supports_network(&self.config, network)
    }

    /// Pre-flight: the wallet's network must be supported and configured.
    fn resolve_network(&self, network: &Network) -> EngineResult<(String, NetworkConfig)> {
        let id = network.network_id.clone().unwrap_or_else(|| "unknown".into());
        if !self.supports_network(network) {
            return Err(SwapError::UnsupportedNetwork(id));
        }
        let cfg = self
            .config
            .network(&id)
            .cloned()
            .ok_or_else(|| SwapError::UnsupportedNetwork(id.clone()))?;
        Ok((id, cfg))
    }

    pub async fn swap(
        &self,
        wallet: &dyn EvmWalletProvider,
        request: &SwapRequest,
    ) -> EngineResult<SwapResult> {
        let (network_id, network) = self.resolve_network(&wallet.get_network())?;
        let recipient = wallet.get_address();

        info!(
            "[uniswap] Swap: {} {} → {} on {} (wallet: {})",
            request.amount_in(),
            request.token_in(),
            request.token_out(),
            network_id,
            recipient
        );

        // Step 1: token metadata (both reads in flight together)
        let (token_in, token_out) =
            resolve_pair(wallet, network.chain_id, request.token_in(), request.token_out()).await?;

        let amount_in = amount_to_raw(request.amount_in(), token_in.decimals)?;
        if amount_in.is_zero() {
            return Err(SwapError::InvalidAmount("amountIn must be greater than zero".into()));
        }
        debug!("[uniswap] Raw amount in: {} ({} decimals)", amount_in, token_in.decimals);

        // Step 2: route, priced with the same params the router call will use
        let now = chrono::Utc::now().timestamp().max(0) as u64;
        let params = ExecutionParams::new(&self.config, recipient, now);
        let query = RouteQuery {
            network_id: network_id.clone(),
            network: network.clone(),
            token_in,
            token_out,
            amount_in,
            params,
        };
        let route = self
            .route_finder
            .find_route(&query)
            .await?
            .ok_or_else(|| SwapError::NoRouteFound {
                token_in: token_in.address.to_string(),
                token_out: token_out.address.to_string(),
            })?;
        info!(
            "[uniswap:route] {} via {}: expect {} out, min {} ({}bps)",
            route.describe(),
            route.source,
            raw_to_amount(route.quote_out(), token_out.decimals),
            raw_to_amount(route.minimum_out(params.slippage_bps), token_out.decimals),
            params.slippage_bps
        );

        // Step 3: allowance for the router
        let allowance = ensure_allowance(
            wallet,
            token_in.address,
            network.router,
            route.amount_in,
            self.config.approval,
        )
        .await?;

        // Step 4: build + broadcast the router call
        let call = build_swap_call(network.router, &route, &params);
        debug!("[uniswap] Router calldata: {} bytes, deadline {}", call.data.len(), params.deadline);

        let tx_hash = wallet
            .send_transaction(TransactionRequest {
                to: call.to,
                data: call.data,
                value: call.value,
            })
            .await
            .map_err(|e| SwapError::SwapSubmissionFailed(e.to_string()))?;
        info!("[uniswap] Swap tx broadcast: {}", tx_hash);

        let summary = format!(
            "Swap executed: {} {} to {} on network {}. Tx: {}",
            request.amount_in(),
            request.token_in_text(),
            request.token_out_text(),
            network_id,
            tx_hash
        );

        Ok(SwapResult {
            tx_hash,
            summary,
            approval_tx_hash: allowance.approval_tx_hash().map(String::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::types::Token;
    use crate::engine::dex::abi::ISwapRouter02;
    use crate::engine::dex::routing::{Hop, RouteLeg};
    use alloy_primitives::address;
    use alloy_sol_types::SolCall;

    const USDC: Address = address!("833589fCD6eDb6E08f4c7C32D4f71b54bdA02913");
    const WETH: Address = address!("4200000000000000000000000000000000000006");
    const DAI: Address = address!("50c5725949A6F0c72E6C4a641F24049A917DB0Cb");
    const ROUTER: Address = address!("2626664c2603336E57B271c5C0b26F421741e481");

    fn network(family: Option<&str>, id: Option<&str>) -> Network {
        Network {
            protocol_family: family.map(String::from),
            network_id: id.map(String::from),
            chain_id: None,
        }
    }

    #[test]
    fn supported_network_matrix() {
        let cfg = SwapConfig::default();
        assert!(supports_network(&cfg, &network(Some("evm"), Some("base-mainnet"))));
        assert!(supports_network(&cfg, &network(Some("evm"), Some("base-sepolia"))));
        assert!(!supports_network(&cfg, &network(Some("evm"), Some("ethereum"))));
        assert!(!supports_network(&cfg, &network(Some("bitcoin"), Some("base-mainnet"))));
        assert!(!supports_network(&cfg, &network(Some("evm"), None)));
        assert!(!supports_network(&cfg, &network(None, Some("base-mainnet"))));
        assert!(!supports_network(&cfg, &network(Some(""), Some(""))));
        assert!(!supports_network(&cfg, &Network::default()));
    }

    #[test]
    fn swap_call_wraps_legs_in_deadline_multicall() {
        let route = Route {
            token_in: Token::new(8453, USDC, 6),
            token_out: Token::new(8453, DAI, 18),
            amount_in: U256::from(1_000u64),
            legs: vec![
                RouteLeg {
                    hops: vec![Hop { token_in: USDC, token_out: DAI, fee: 100 }],
                    amount_in: U256::from(600u64),
                    quote_out: U256::from(600u64),
                },
                RouteLeg {
                    hops: vec![
                        Hop { token_in: USDC, token_out: WETH, fee: 500 },
                        Hop { token_in: WETH, token_out: DAI, fee: 3000 },
                    ],
                    amount_in: U256::from(400u64),
                    quote_out: U256::from(400u64),
                },
            ],
            gas_estimate: None,
            source: "test",
        };
        let params = ExecutionParams { slippage_bps: 100, deadline: 1_700_000_000, recipient: WETH };
        let call = build_swap_call(ROUTER, &route, &params);
        assert_eq!(call.to, ROUTER);
        assert_eq!(call.value, U256::ZERO);

        let multicall = ISwapRouter02::multicallCall::abi_decode(&call.data, true).unwrap();
        assert_eq!(multicall.deadline, U256::from(1_700_000_000u64));
        assert_eq!(multicall.data.len(), 2);

        let single = ISwapRouter02::exactInputSingleCall::abi_decode(&multicall.data[0], true).unwrap();
        assert_eq!(single.params.amountIn, U256::from(600u64));
        assert_eq!(single.params.amountOutMinimum, U256::from(594u64));
        assert_eq!(single.params.recipient, WETH);

        let multi = ISwapRouter02::exactInputCall::abi_decode(&multicall.data[1], true).unwrap();
        assert_eq!(multi.params.amountIn, U256::from(400u64));
        assert_eq!(multi.params.amountOutMinimum, U256::from(396u64));
        assert_eq!(multi.params.path, route.legs[1].encoded_path());
    }
}
