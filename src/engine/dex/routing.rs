// Paw Agent Engine — Route model + finder seam
//
// A Route is a priced exact-input trade from one token to another. It may be
// split across several legs (independent paths that each take part of the
// input); each leg is a chain of V3 pool hops. "No route" is `None`, never a
// zero-output Route.
//
// Implementations:
//   routing_api — Uniswap routing service (multi-hop, split routes)
//   quoter      — QuoterV2 over JSON-RPC (direct + via wrapped native)

use crate::atoms::error::EngineResult;
use crate::atoms::types::Token;
use crate::engine::config::{NetworkConfig, RouteSource, SwapConfig};
use crate::engine::dex::abi::encode_v3_path;
use crate::engine::dex::primitives::apply_slippage;
use crate::engine::dex::quoter::QuoterRouteFinder;
use crate::engine::dex::routing_api::RoutingApiRouteFinder;
use alloy_primitives::{Address, Bytes, U256};
use async_trait::async_trait;
use std::sync::Arc;

// ── Execution parameters ───────────────────────────────────────────────────

/// Fixed once per request; the same values price the route and build the
/// router call so quote and execution cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionParams {
    pub slippage_bps: u32,
    /// Absolute unix timestamp after which the router call reverts.
    pub deadline: u64,
    pub recipient: Address,
}

impl ExecutionParams {
    pub fn new(config: &SwapConfig, recipient: Address, now_unix: u64) -> Self {
        Self {
            slippage_bps: config.slippage_bps,
            deadline: now_unix + config.deadline_secs,
            recipient,
        }
    }
}

// ── Route ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hop {
    pub token_in: Address,
    pub token_out: Address,
    /// Pool fee in hundredths of a bip (500 = 0.05%).
    pub fee: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLeg {
    pub hops: Vec<Hop>,
    pub amount_in: U256,
    pub quote_out: U256,
}

impl RouteLeg {
    pub fn is_single_hop(&self) -> bool {
        self.hops.len() == 1
    }

    /// Packed V3 path for `exactInput` / `quoteExactInput`.
    pub fn encoded_path(&self) -> Bytes {
        let mut tokens = Vec::with_capacity(self.hops.len() + 1);
        let mut fees = Vec::with_capacity(self.hops.len());
        for (i, hop) in self.hops.iter().enumerate() {
            if i == 0 {
                tokens.push(hop.token_in);
            }
            tokens.push(hop.token_out);
            fees.push(hop.fee);
        }
        encode_v3_path(&tokens, &fees)
    }

    pub fn minimum_out(&self, slippage_bps: u32) -> U256 {
        apply_slippage(self.quote_out, slippage_bps)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub token_in: Token,
    pub token_out: Token,
    pub amount_in: U256,
    pub legs: Vec<RouteLeg>,
    pub gas_estimate: Option<U256>,
    /// Which finder produced the route, for logs and summaries.
    pub source: &'static str,
}

impl Route {
    pub fn quote_out(&self) -> U256 {
        self.legs.iter().fold(U256::ZERO, |acc, l| acc + l.quote_out)
    }

    pub fn minimum_out(&self, slippage_bps: u32) -> U256 {
        self.legs
            .iter()
            .fold(U256::ZERO, |acc, l| acc + l.minimum_out(slippage_bps))
    }

    /// "USDC -(500)-> WETH" style description of every leg.
    pub fn describe(&self) -> String {
        self.legs
            .iter()
            .map(|leg| {
                let mut s = String::new();
                for (i, hop) in leg.hops.iter().enumerate() {
                    if i == 0 {
                        s.push_str(&short(hop.token_in));
                    }
                    s.push_str(&format!(" -({})-> {}", hop.fee, short(hop.token_out)));
                }
                s
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

fn short(addr: Address) -> String {
    let s = addr.to_string();
    format!("{}…{}", &s[..6], &s[s.len() - 4..])
}

// ── Finder seam ────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RouteQuery {
    pub network_id: String,
    pub network: NetworkConfig,
    pub token_in: Token,
    pub token_out: Token,
    /// Raw exact-input amount.
    pub amount_in: U256,
    pub params: ExecutionParams,
}

#[async_trait]
pub trait RouteFinder: Send + Sync {
    fn name(&self) -> &'static str;

    /// Best exact-input route, or `None` when no viable path exists.
    async fn find_route(&self, query: &RouteQuery) -> EngineResult<Option<Route>>;
}

/// Build the finder selected by configuration.
pub fn build_route_finder(config: &SwapConfig) -> Arc<dyn RouteFinder> {
    match config.routing.source {
        RouteSource::RoutingApi => Arc::new(RoutingApiRouteFinder::new(&config.routing)),
        RouteSource::Quoter => Arc::new(QuoterRouteFinder::new(config.routing.timeout())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const USDC: Address = address!("833589fCD6eDb6E08f4c7C32D4f71b54bdA02913");
    const WETH: Address = address!("4200000000000000000000000000000000000006");
    const DAI: Address = address!("50c5725949A6F0c72E6C4a641F24049A917DB0Cb");

    fn leg(hops: Vec<Hop>, amount_in: u64, quote_out: u64) -> RouteLeg {
        RouteLeg {
            hops,
            amount_in: U256::from(amount_in),
            quote_out: U256::from(quote_out),
        }
    }

    #[test]
    fn multi_hop_path_chains_tokens() {
        let l = leg(
            vec![
                Hop { token_in: USDC, token_out: WETH, fee: 500 },
                Hop { token_in: WETH, token_out: DAI, fee: 3000 },
            ],
            100,
            99,
        );
        let path = l.encoded_path();
        assert_eq!(path.len(), 20 * 3 + 3 * 2);
        assert_eq!(&path[..20], USDC.as_slice());
        assert_eq!(&path[20..23], &[0x00, 0x01, 0xf4]);
        assert_eq!(&path[23..43], WETH.as_slice());
        assert_eq!(&path[43..46], &[0x00, 0x0b, 0xb8]);
        assert_eq!(&path[46..], DAI.as_slice());
        assert!(!l.is_single_hop());
    }

    #[test]
    fn route_sums_legs() {
        let route = Route {
            token_in: Token::new(8453, USDC, 6),
            token_out: Token::new(8453, WETH, 18),
            amount_in: U256::from(300u64),
            legs: vec![
                leg(vec![Hop { token_in: USDC, token_out: WETH, fee: 500 }], 200, 1_000),
                leg(vec![Hop { token_in: USDC, token_out: WETH, fee: 3000 }], 100, 500),
            ],
            gas_estimate: None,
            source: "test",
        };
        assert_eq!(route.quote_out(), U256::from(1_500u64));
        assert_eq!(route.minimum_out(100), U256::from(990u64 + 495u64));
        assert_eq!(route.describe().matches(" | ").count(), 1);
    }

    #[test]
    fn execution_params_deadline_is_absolute() {
        let cfg = SwapConfig::default();
        let p = ExecutionParams::new(&cfg, WETH, 1_000);
        assert_eq!(p.deadline, 2_800);
        assert_eq!(p.slippage_bps, 100);
    }
}
