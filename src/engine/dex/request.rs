// Paw Agent Engine — Swap request validation
// A SwapRequest only exists once its arguments have passed validation, so
// nothing past this point re-checks the shape of the input.

use crate::atoms::error::{EngineResult, SwapError};
use crate::engine::dex::primitives::{is_valid_amount, parse_address};
use alloy_primitives::Address;
use serde::Deserialize;

/// Raw tool arguments as sent by the agent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapArgs {
    pub token_in: String,
    pub amount_in: String,
    pub token_out: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequest {
    token_in: Address,
    amount_in: String,
    token_out: Address,
    /// Addresses exactly as the caller wrote them, echoed in the summary.
    token_in_text: String,
    token_out_text: String,
}

impl SwapRequest {
    pub fn new(token_in: &str, amount_in: &str, token_out: &str) -> EngineResult<Self> {
        if !is_valid_amount(amount_in) {
            return Err(SwapError::InvalidRequest(format!(
                "amountIn '{}' must be a valid decimal number",
                amount_in
            )));
        }
        Ok(Self {
            token_in: parse_address(token_in)?,
            amount_in: amount_in.to_string(),
            token_out: parse_address(token_out)?,
            token_in_text: token_in.to_string(),
            token_out_text: token_out.to_string(),
        })
    }

    /// Validate tool arguments from JSON.
    pub fn from_json(args: &serde_json::Value) -> EngineResult<Self> {
        let parsed: SwapArgs = serde_json::from_value(args.clone())
            .map_err(|e| SwapError::InvalidRequest(format!("swap: {}", e)))?;
        Self::try_from(parsed)
    }

    pub fn token_in(&self) -> Address {
        self.token_in
    }

    /// Human-unit amount exactly as the caller wrote it.
    pub fn amount_in(&self) -> &str {
        &self.amount_in
    }

    pub fn token_out(&self) -> Address {
        self.token_out
    }

    pub fn token_in_text(&self) -> &str {
        &self.token_in_text
    }

    pub fn token_out_text(&self) -> &str {
        &self.token_out_text
    }
}

impl TryFrom<SwapArgs> for SwapRequest {
    type Error = SwapError;

    fn try_from(args: SwapArgs) -> EngineResult<Self> {
        Self::new(&args.token_in, &args.amount_in, &args.token_out)
    }
}
