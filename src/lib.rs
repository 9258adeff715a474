// Paw — Uniswap swap action for autonomous agents
//
//   atoms  — errors, constants, shared types and the wallet trait
//   engine — configuration, swap pipeline and the agent tool surface

pub mod atoms;
pub mod engine;

pub use atoms::error::{EngineResult, ErrorCategory, SwapError};
pub use atoms::traits::{EvmWalletProvider, WalletError};
pub use atoms::types::{Network, Token, TransactionRequest, TxReceipt};
pub use engine::config::{load_config, SwapConfig};
pub use engine::dex::{RpcWalletProvider, SwapRequest, SwapResult, UniswapSwapper};
pub use engine::tools::UniswapActionProvider;
