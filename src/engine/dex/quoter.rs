// Paw Agent Engine — On-chain route finder (Uniswap V3 QuoterV2)
//
// Quotes every direct pool across the standard fee tiers plus two-hop paths
// through the wrapped native token, all concurrently, and keeps the best
// output. A candidate whose quote reverts (pool missing, no liquidity) is
// skipped; only when every candidate reverts is there no route. A node that
// cannot be reached is an RPC error, never "no route".

use crate::atoms::constants::FEE_TIERS;
use crate::atoms::error::{EngineResult, SwapError};
use crate::engine::dex::abi;
use crate::engine::dex::routing::{Hop, Route, RouteFinder, RouteLeg, RouteQuery};
use crate::engine::dex::rpc::{RpcClient, RpcError};
use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, info};
use std::time::Duration;

/// Fee tiers tried on each side of a two-hop path.
const TWO_HOP_FEES: &[u32] = &[500, 3000];

pub struct QuoterRouteFinder {
    timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Quote {
    hops: Vec<Hop>,
    amount_out: U256,
    gas_estimate: U256,
}

impl QuoterRouteFinder {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

/// Every path worth quoting for a pair.
fn candidate_paths(token_in: Address, token_out: Address, wrapped: Address) -> Vec<Vec<Hop>> {
    let mut paths: Vec<Vec<Hop>> = FEE_TIERS
        .iter()
        .map(|&fee| vec![Hop { token_in, token_out, fee }])
        .collect();

    if token_in != wrapped && token_out != wrapped && wrapped != Address::ZERO {
        for &fee_a in TWO_HOP_FEES {
            for &fee_b in TWO_HOP_FEES {
                paths.push(vec![
                    Hop { token_in, token_out: wrapped, fee: fee_a },
                    Hop { token_in: wrapped, token_out, fee: fee_b },
                ]);
            }
        }
    }
    paths
}

/// Highest output wins; ties go to the cheaper path.
fn best_quote(quotes: Vec<Quote>) -> Option<Quote> {
    quotes
        .into_iter()
        .filter(|q| !q.amount_out.is_zero())
        .max_by(|a, b| {
            a.amount_out
                .cmp(&b.amount_out)
                .then_with(|| b.gas_estimate.cmp(&a.gas_estimate))
        })
}

/// What happened to one candidate path.
enum Priced {
    Quote(Quote),
    /// The quoter reverted or answered garbage: no usable pool on this path.
    Skipped,
    /// The node could not be asked; says nothing about liquidity.
    Unreachable(RpcError),
}

async fn quote_path(rpc: &RpcClient, quoter: Address, hops: Vec<Hop>, amount_in: U256) -> Priced {
    let single = hops.len() == 1;
    let data = if single {
        let h = hops[0];
        abi::encode_quote_exact_input_single(h.token_in, h.token_out, amount_in, h.fee)
    } else {
        let leg = RouteLeg { hops: hops.clone(), amount_in, quote_out: U256::ZERO };
        abi::encode_quote_exact_input(leg.encoded_path(), amount_in)
    };

    match rpc.eth_call(quoter, &data).await {
        Ok(ret) => match abi::decode_quote(&ret, single) {
            Ok((amount_out, gas_estimate)) => Priced::Quote(Quote { hops, amount_out, gas_estimate }),
            Err(e) => {
                debug!("[uniswap:route] Undecodable quote for {:?}: {}", fees(&hops), e);
                Priced::Skipped
            }
        },
        Err(e) if e.is_node_error() => {
            debug!("[uniswap:route] Quote skipped for fees {:?}: {}", fees(&hops), e);
            Priced::Skipped
        }
        Err(e) => Priced::Unreachable(e),
    }
}

/// Best quote, or `None` if every reachable candidate was skipped. When
/// nothing priced and some candidate could not be asked at all, the node
/// failure is the answer.
fn settle(outcomes: Vec<Priced>) -> EngineResult<Option<Quote>> {
    let mut quotes = Vec::new();
    let mut unreachable = None;
    for outcome in outcomes {
        match outcome {
            Priced::Quote(q) => quotes.push(q),
            Priced::Skipped => {}
            Priced::Unreachable(e) => {
                unreachable.get_or_insert(e);
            }
        }
    }
    match (best_quote(quotes), unreachable) {
        (Some(best), _) => Ok(Some(best)),
        (None, Some(e)) => Err(SwapError::Rpc(format!("quoter unavailable: {}", e))),
        (None, None) => Ok(None),
    }
}

fn fees(hops: &[Hop]) -> Vec<u32> {
    hops.iter().map(|h| h.fee).collect()
}

#[async_trait]
impl RouteFinder for QuoterRouteFinder {
    fn name(&self) -> &'static str {
        "quoter"
    }

    async fn find_route(&self, query: &RouteQuery) -> EngineResult<Option<Route>> {
        let rpc = RpcClient::new(&query.network.rpc_url, self.timeout);
        let paths = candidate_paths(
            query.token_in.address,
            query.token_out.address,
            query.network.wrapped_native,
        );
        let total = paths.len();

        let outcomes: Vec<Priced> = join_all(
            paths
                .into_iter()
                .map(|hops| quote_path(&rpc, query.network.quoter, hops, query.amount_in)),
        )
        .await;

        let priced = outcomes.iter().filter(|o| matches!(o, Priced::Quote(_))).count();
        info!(
            "[uniswap:route] QuoterV2 on {}: {}/{} candidate paths priced",
            query.network_id, priced, total
        );

        Ok(settle(outcomes)?.map(|q| Route {
            token_in: query.token_in,
            token_out: query.token_out,
            amount_in: query.amount_in,
            legs: vec![RouteLeg {
                hops: q.hops,
                amount_in: query.amount_in,
                quote_out: q.amount_out,
            }],
            gas_estimate: Some(q.gas_estimate),
            source: self.name(),
        }))
    }
}
