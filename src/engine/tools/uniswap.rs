// Paw Agent Engine — Uniswap tools
//
// Tools: swap
//
// The agent supplies human-unit amounts and token addresses; everything
// else (decimals, route, allowance, deadline) is resolved here.

use crate::atoms::constants::{PROVIDER_NAME, SWAP_TOOL_NAME};
use crate::atoms::error::EngineResult;
use crate::atoms::traits::EvmWalletProvider;
use crate::atoms::types::*;
use crate::engine::config::SwapConfig;
use crate::engine::dex::request::SwapRequest;
use crate::engine::dex::swap::UniswapSwapper;
use log::warn;
use serde_json::{json, Value};
use std::sync::Arc;

const SWAP_DESCRIPTION: &str = "\
This tool allows you to swap ERC20 tokens on Uniswap through the SwapRouter02 contract.

It takes:
- tokenIn: The token address to swap from
- amountIn: The amount of tokenIn to swap in whole units
  Examples for WETH:
  - 1 WETH
  - 0.1 WETH
  - 0.01 WETH
- tokenOut: The token address to swap to

Important notes:
- Make sure to use the exact amount provided. Do not convert units for assets for this action.
- Please use a token address (example 0x4200000000000000000000000000000000000006) for the tokenIn and tokenOut fields.";

pub fn definitions() -> Vec<ToolDefinition> {
    vec![ToolDefinition {
        tool_type: "function".into(),
        function: FunctionDefinition {
            name: SWAP_TOOL_NAME.into(),
            description: SWAP_DESCRIPTION.into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "tokenIn": {
                        "type": "string",
                        "minLength": 1,
                        "maxLength": 100,
                        "description": "The token to swap from"
                    },
                    "amountIn": {
                        "type": "string",
                        "pattern": "^[0-9]*\\.?[0-9]+$",
                        "description": "The amount of tokenIn to swap"
                    },
                    "tokenOut": {
                        "type": "string",
                        "minLength": 1,
                        "maxLength": 100,
                        "description": "The token to swap to"
                    }
                },
                "required": ["tokenIn", "amountIn", "tokenOut"]
            }),
        },
    }]
}

/// Action provider registered with the agent under the name `uniswap`.
pub struct UniswapActionProvider {
    swapper: UniswapSwapper,
}

impl UniswapActionProvider {
    pub fn new(swapper: UniswapSwapper) -> Self {
        Self { swapper }
    }

    pub fn from_config(config: Arc<SwapConfig>) -> Self {
        Self::new(UniswapSwapper::from_config(config))
    }

    pub fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    pub fn supports_network(&self, network: &Network) -> bool {
        self.swapper.supports_network(network)
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        definitions()
    }

    /// `None` when `name` is not one of this provider's tools.
    pub async fn execute(
        &self,
        name: &str,
        args: &Value,
        wallet: &dyn EvmWalletProvider,
    ) -> Option<Result<String, String>> {
        match name {
            SWAP_TOOL_NAME => Some(self.exec_swap(args, wallet).await.map_err(|e| {
                warn!("[uniswap] swap failed ({:?}): {}", e.category(), e);
                e.to_string()
            })),
            _ => None,
        }
    }

    // ── swap ───────────────────────────────────────────────────────────────

    async fn exec_swap(&self, args: &Value, wallet: &dyn EvmWalletProvider) -> EngineResult<String> {
        let request = SwapRequest::from_json(args)?;
        let result = self.swapper.swap(wallet, &request).await?;
        Ok(result.summary)
    }
}
