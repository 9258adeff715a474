// Paw Engine — Swap configuration
//
// Immutable settings loaded once at startup and shared as `Arc<SwapConfig>`.
// Default location: `~/.paw/uniswap.toml`. A missing file means defaults;
// a present but invalid file is an error (never silently ignored).
//
// Example:
//
//   slippage_bps = 50
//   deadline_secs = 900
//   approval = "exact"
//
//   [routing]
//   source = "routing-api"
//   api_url = "https://api.uniswap.org/v1"
//
//   [networks.base-mainnet]
//   chain_id = 8453
//   rpc_url = "https://base.llamarpc.com"
//   router = "0x2626664c2603336E57B271c5C0b26F421741e481"
//   quoter = "0x3d4e44Eb1374240CE5F1B871ab261CD16335B76a"
//   wrapped_native = "0x4200000000000000000000000000000000000006"

use crate::atoms::constants::*;
use crate::atoms::error::{EngineResult, SwapError};
use alloy_primitives::Address;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// How much allowance to grant when the current one is insufficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApprovalPolicy {
    /// Approve exactly the swap's raw input amount.
    #[default]
    Exact,
    /// Approve `type(uint256).max` once.
    Unlimited,
}

/// Which route finder backs the swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteSource {
    /// Uniswap routing service (multi-hop, split routes).
    RoutingApi,
    /// QuoterV2 over JSON-RPC (direct and one-intermediate paths).
    #[default]
    Quoter,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub source: RouteSource,
    pub api_url: String,
    /// Sent as `x-api-key` when set.
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            source: RouteSource::default(),
            api_url: DEFAULT_ROUTING_API_URL.into(),
            api_key: None,
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl RoutingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Per-network deployment and RPC settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub chain_id: u64,
    pub rpc_url: String,
    /// SwapRouter02: approval spender and swap destination.
    pub router: Address,
    /// QuoterV2, used by the on-chain route finder.
    pub quoter: Address,
    /// Intermediate token for two-hop quoter paths.
    pub wrapped_native: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SwapConfig {
    pub slippage_bps: u32,
    pub deadline_secs: u64,
    pub approval: ApprovalPolicy,
    pub routing: RoutingConfig,
    /// Keyed by network id; the key set is the supported-network allow-list.
    pub networks: BTreeMap<String, NetworkConfig>,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            slippage_bps: DEFAULT_SLIPPAGE_BPS,
            deadline_secs: DEFAULT_DEADLINE_SECS,
            approval: ApprovalPolicy::default(),
            routing: RoutingConfig::default(),
            networks: default_networks(),
        }
    }
}

/// Built-in Base deployments.
pub fn default_networks() -> BTreeMap<String, NetworkConfig> {
    let lookup = |table: &[(&str, &str)], id: &str| -> Address {
        table
            .iter()
            .find(|(n, _)| *n == id)
            .and_then(|(_, a)| Address::from_str(a).ok())
            .unwrap_or(Address::ZERO)
    };
    let wrapped = Address::from_str(WRAPPED_NATIVE).unwrap_or(Address::ZERO);

    NETWORK_CHAIN_IDS
        .iter()
        .map(|(id, chain_id, rpc)| {
            (
                id.to_string(),
                NetworkConfig {
                    chain_id: *chain_id,
                    rpc_url: rpc.to_string(),
                    router: lookup(ROUTER_ADDRESS, id),
                    quoter: lookup(QUOTER_ADDRESS, id),
                    wrapped_native: wrapped,
                },
            )
        })
        .collect()
}

impl SwapConfig {
    /// Parse TOML, fill in built-in networks the file does not mention,
    /// then validate.
    pub fn from_toml_str(content: &str) -> EngineResult<Self> {
        let mut cfg: SwapConfig = toml::from_str(content)
            .map_err(|e| SwapError::Config(format!("Invalid swap config: {}", e)))?;
        for (id, net) in default_networks() {
            cfg.networks.entry(id).or_insert(net);
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.slippage_bps > MAX_SLIPPAGE_BPS {
            return Err(SwapError::Config(format!(
                "slippage_bps {} exceeds maximum allowed {} ({}%)",
                self.slippage_bps,
                MAX_SLIPPAGE_BPS,
                MAX_SLIPPAGE_BPS as f64 / 100.0
            )));
        }
        if self.deadline_secs == 0 {
            return Err(SwapError::Config("deadline_secs must be greater than zero".into()));
        }
        if self.routing.source == RouteSource::RoutingApi && self.routing.api_url.trim().is_empty() {
            return Err(SwapError::Config("routing.api_url is empty".into()));
        }
        for (id, net) in &self.networks {
            if net.chain_id == 0 {
                return Err(SwapError::Config(format!("networks.{}: chain_id is zero", id)));
            }
            if net.rpc_url.trim().is_empty() {
                return Err(SwapError::Config(format!("networks.{}: rpc_url is empty", id)));
            }
            if net.router == Address::ZERO {
                return Err(SwapError::Config(format!("networks.{}: router is unset", id)));
            }
        }
        Ok(())
    }

    pub fn network(&self, network_id: &str) -> Option<&NetworkConfig> {
        self.networks.get(network_id)
    }

    /// Router address registered for a network.
    pub fn router_address(&self, network_id: &str) -> Option<Address> {
        self.networks.get(network_id).map(|n| n.router)
    }

    pub fn network_ids(&self) -> Vec<&str> {
        self.networks.keys().map(String::as_str).collect()
    }
}

/// `~/.paw/uniswap.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load the swap config from `path` (or the default location).
/// Called once at startup; the result is shared read-only.
pub fn load_config(path: Option<&Path>) -> EngineResult<SwapConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) => p,
            None => {
                warn!("[config] Cannot determine home directory, using built-in defaults");
                return Ok(SwapConfig::default());
            }
        },
    };

    if !path.exists() {
        info!("[config] {} not found, using built-in defaults", path.display());
        return Ok(SwapConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .map_err(|e| SwapError::Config(format!("Cannot read {}: {}", path.display(), e)))?;
    let cfg = SwapConfig::from_toml_str(&content)?;
    info!(
        "[config] Loaded {} ({} networks, slippage {}bps, {:?} routing)",
        path.display(),
        cfg.networks.len(),
        cfg.slippage_bps,
        cfg.routing.source
    );
    Ok(cfg)
}
