// Paw Agent Engine — Uniswap routing service client
//
// GET {api_url}/quote?tokenInAddress=…&type=exactIn&protocols=v3…
// The service searches direct, multi-hop and split paths and returns the
// best gas-adjusted quote. Only the priced pool path is used from the
// response; router calldata is always built locally from the same
// ExecutionParams.

use crate::atoms::error::{EngineResult, SwapError};
use crate::engine::config::RoutingConfig;
use crate::engine::dex::primitives::parse_address;
use crate::engine::dex::routing::{Hop, Route, RouteFinder, RouteLeg, RouteQuery};
use alloy_primitives::U256;
use async_trait::async_trait;
use log::{debug, info};
use serde_json::Value;

pub struct RoutingApiRouteFinder {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl RoutingApiRouteFinder {
    pub fn new(config: &RoutingConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn quote_url(&self, query: &RouteQuery, now_unix: u64) -> String {
        let chain_id = query.network.chain_id;
        format!(
            "{}/quote?tokenInAddress={}&tokenInChainId={}&tokenOutAddress={}&tokenOutChainId={}\
             &amount={}&type=exactIn&protocols=v3&recipient={}&slippageTolerance={}&deadline={}",
            self.base_url,
            query.token_in.address,
            chain_id,
            query.token_out.address,
            chain_id,
            query.amount_in,
            query.params.recipient,
            slippage_percent(query.params.slippage_bps),
            query.params.deadline.saturating_sub(now_unix),
        )
    }
}

#[async_trait]
impl RouteFinder for RoutingApiRouteFinder {
    fn name(&self) -> &'static str {
        "routing-api"
    }

    async fn find_route(&self, query: &RouteQuery) -> EngineResult<Option<Route>> {
        let now = chrono::Utc::now().timestamp().max(0) as u64;
        let url = self.quote_url(query, now);
        debug!("[uniswap:route] GET {}", url);

        let mut req = self.http.get(&url);
        if let Some(key) = &self.api_key {
            req = req.header("x-api-key", key);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| SwapError::RoutingService(format!("HTTP error: {}", e)))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| SwapError::RoutingService(format!("Body read failed: {}", e)))?;
        let body: Option<Value> = serde_json::from_str(&text).ok();

        if body.as_ref().is_some_and(is_no_route) {
            info!(
                "[uniswap:route] Routing service reports no route ({} → {})",
                query.token_in.address, query.token_out.address
            );
            return Ok(None);
        }
        if !status.is_success() {
            return Err(SwapError::RoutingService(format!(
                "Routing API {}: {}",
                status,
                snippet(&text)
            )));
        }
        let body = body.ok_or_else(|| {
            SwapError::RoutingService(format!("Routing API returned non-JSON body: {}", snippet(&text)))
        })?;

        parse_quote_response(query, &body, self.name())
    }
}

/// "1.00" for 100 bps; the service takes a percentage.
fn slippage_percent(bps: u32) -> String {
    format!("{}.{:02}", bps / 100, bps % 100)
}

fn snippet(text: &str) -> String {
    text.chars().take(500).collect()
}

fn is_no_route(body: &Value) -> bool {
    body.get("errorCode").and_then(|v| v.as_str()) == Some("NO_ROUTE")
}

fn str_or_number(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_u256(v: Option<&Value>, field: &str) -> EngineResult<U256> {
    let s = str_or_number(v)
        .ok_or_else(|| SwapError::RoutingService(format!("Missing '{}' in quote response", field)))?;
    U256::from_str_radix(&s, 10)
        .map_err(|e| SwapError::RoutingService(format!("Bad '{}' value '{}': {}", field, s, e)))
}

fn pool_address(pool: &Value, side: &str) -> EngineResult<alloy_primitives::Address> {
    let addr = pool
        .get(side)
        .and_then(|t| t.get("address"))
        .and_then(|a| a.as_str())
        .ok_or_else(|| SwapError::RoutingService(format!("Pool missing {}.address", side)))?;
    parse_address(addr).map_err(|e| SwapError::RoutingService(e.to_string()))
}

/// Turn a routing-service quote body into a Route for `query`.
pub(crate) fn parse_quote_response(
    query: &RouteQuery,
    body: &Value,
    source: &'static str,
) -> EngineResult<Option<Route>> {
    let paths = body
        .get("route")
        .and_then(|r| r.as_array())
        .ok_or_else(|| SwapError::RoutingService("Quote response has no 'route' array".into()))?;
    if paths.is_empty() {
        return Ok(None);
    }

    let mut legs = Vec::with_capacity(paths.len());
    for path in paths {
        let pools = path
            .as_array()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| SwapError::RoutingService("Empty path in route".into()))?;

        let mut hops = Vec::with_capacity(pools.len());
        for pool in pools {
            let kind = pool.get("type").and_then(|t| t.as_str()).unwrap_or("");
            if kind != "v3-pool" {
                return Err(SwapError::RoutingService(format!(
                    "Unsupported pool type '{}' in route",
                    kind
                )));
            }
            let fee_str = str_or_number(pool.get("fee"))
                .ok_or_else(|| SwapError::RoutingService("Pool missing fee".into()))?;
            let fee: u32 = fee_str
                .parse()
                .ok()
                .filter(|f| *f < 1_000_000)
                .ok_or_else(|| SwapError::RoutingService(format!("Bad pool fee '{}'", fee_str)))?;
            hops.push(Hop {
                token_in: pool_address(pool, "tokenIn")?,
                token_out: pool_address(pool, "tokenOut")?,
                fee,
            });
        }

        let contiguous = hops.windows(2).all(|w| w[0].token_out == w[1].token_in);
        let first = hops[0].token_in;
        let last = hops[hops.len() - 1].token_out;
        if !contiguous || first != query.token_in.address || last != query.token_out.address {
            return Err(SwapError::RoutingService(
                "Route path does not connect the requested tokens".into(),
            ));
        }

        let amount_in = parse_u256(pools[0].get("amountIn"), "amountIn")?;
        let quote_out = parse_u256(pools[pools.len() - 1].get("amountOut"), "amountOut")?;
        legs.push(RouteLeg { hops, amount_in, quote_out });
    }

    let total_in = legs.iter().fold(U256::ZERO, |acc, l| acc + l.amount_in);
    if total_in != query.amount_in {
        return Err(SwapError::RoutingService(format!(
            "Route legs spend {} but {} was requested",
            total_in, query.amount_in
        )));
    }

    let route = Route {
        token_in: query.token_in,
        token_out: query.token_out,
        amount_in: query.amount_in,
        legs,
        gas_estimate: parse_u256(body.get("gasUseEstimate"), "gasUseEstimate").ok(),
        source,
    };
    if route.quote_out().is_zero() {
        return Ok(None);
    }
    Ok(Some(route))
}
