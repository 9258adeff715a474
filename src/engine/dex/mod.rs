// Paw Agent Engine — Uniswap swap module (Uniswap V3 / Base)
//
// Submodules:
//   primitives  — address parsing, amount conversion, slippage, hex
//   abi         — sol! bindings for ERC-20, QuoterV2 and SwapRouter02
//   rpc         — JSON-RPC helpers (eth_call, eth_sendTransaction, receipts)
//   request     — validated swap request
//   tokens      — decimals resolution through the wallet
//   routing     — route model, execution params and the RouteFinder seam
//   routing_api — Uniswap routing service finder
//   quoter      — on-chain QuoterV2 finder
//   allowance   — approve-if-needed
//   swap        — the end-to-end executor
//   wallet      — node-managed reference wallet

pub mod abi;
pub mod allowance;
pub mod primitives;
pub mod quoter;
pub mod request;
pub(crate) mod rpc;
pub mod routing;
pub mod routing_api;
pub mod swap;
pub mod tokens;
pub mod wallet;

#[cfg(test)]
mod test_http;

pub use allowance::{ensure_allowance, AllowanceOutcome};
pub use primitives::{amount_to_raw, is_valid_amount, parse_address, raw_to_amount};
pub use request::{SwapArgs, SwapRequest};
pub use routing::{build_route_finder, ExecutionParams, Hop, Route, RouteFinder, RouteLeg, RouteQuery};
pub use swap::{build_swap_call, supports_network, SwapCall, SwapResult, UniswapSwapper};
pub use wallet::RpcWalletProvider;
