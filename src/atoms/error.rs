// ── Paw Atoms: Error Types ─────────────────────────────────────────────────
// Single canonical error enum for the swap engine, built with `thiserror`.
//
// Design rules:
//   • One variant per pipeline stage, raised where the stage fails.
//   • `category()` separates economic failures (pick another pair) from
//     transactional ones (retry later) for the agent consuming the tool.
//   • `SwapError` → `String` conversion is provided via `Display` so the
//     tool boundary (`Result<String, String>`) can use `.map_err(Into::into)`.
//   • No variant carries secret material (keys, signed payloads).

use thiserror::Error;

// ── Primary error enum ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SwapError {
    /// The wallet's current network is not in the supported allow-list.
    #[error("Unsupported network: {0}")]
    UnsupportedNetwork(String),

    /// Request arguments failed validation before any chain access.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Amount cannot be represented in the token's smallest unit.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// `decimals()` could not be read from the token contract.
    #[error("Token metadata unavailable for {token}: {reason}")]
    MetadataUnavailable { token: String, reason: String },

    /// The routing service found no viable path for the pair and amount.
    #[error("No route found for {token_in} -> {token_out}")]
    NoRouteFound { token_in: String, token_out: String },

    /// The approval transaction could not be broadcast or reverted.
    #[error("Token approval failed: {0}")]
    ApprovalFailed(String),

    /// The router transaction could not be broadcast.
    #[error("Swap submission failed: {0}")]
    SwapSubmissionFailed(String),

    /// Routing service transport / response failure (not "no route").
    #[error("Routing service error: {0}")]
    RoutingService(String),

    /// JSON-RPC transport or node-level failure.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Swap configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization / deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse grouping of failures, from the caller's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rejected before touching the chain (bad input, wrong network, config).
    Preflight,
    /// Market conditions: no liquidity path within constraints.
    Economic,
    /// A transaction could not be sent or reverted.
    Transactional,
    /// Reads, RPC and routing-service plumbing.
    Infrastructure,
}

impl SwapError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SwapError::UnsupportedNetwork(_)
            | SwapError::InvalidRequest(_)
            | SwapError::InvalidAmount(_)
            | SwapError::Config(_) => ErrorCategory::Preflight,
            SwapError::NoRouteFound { .. } => ErrorCategory::Economic,
            SwapError::ApprovalFailed(_) | SwapError::SwapSubmissionFailed(_) => {
                ErrorCategory::Transactional
            }
            SwapError::MetadataUnavailable { .. }
            | SwapError::RoutingService(_)
            | SwapError::Rpc(_)
            | SwapError::Serialization(_) => ErrorCategory::Infrastructure,
        }
    }
}

// ── Convenience alias ──────────────────────────────────────────────────────

/// All engine operations return this type.
pub type EngineResult<T> = Result<T, SwapError>;

// ── Conversion: SwapError → String ─────────────────────────────────────────

impl From<SwapError> for String {
    fn from(e: SwapError) -> Self {
        e.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_route_is_economic_and_approval_is_transactional() {
        let no_route = SwapError::NoRouteFound {
            token_in: "0xa".into(),
            token_out: "0xb".into(),
        };
        assert_eq!(no_route.category(), ErrorCategory::Economic);
        assert_eq!(
            SwapError::ApprovalFailed("reverted".into()).category(),
            ErrorCategory::Transactional
        );
        assert_eq!(
            SwapError::SwapSubmissionFailed("nonce too low".into()).category(),
            ErrorCategory::Transactional
        );
        assert_eq!(
            SwapError::UnsupportedNetwork("ethereum".into()).category(),
            ErrorCategory::Preflight
        );
    }

    #[test]
    fn converts_into_display_string() {
        let s: String = SwapError::UnsupportedNetwork("ethereum".into()).into();
        assert_eq!(s, "Unsupported network: ethereum");
    }
}
