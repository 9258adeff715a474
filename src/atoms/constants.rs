// ── Paw Atoms: Constants ───────────────────────────────────────────────────
// All named constants for the crate live here.
// These seed `SwapConfig::default()`; at runtime the loaded config is the
// source of truth and these tables are never consulted directly.

// ── Action identity ────────────────────────────────────────────────────────
pub const PROVIDER_NAME: &str = "uniswap";
pub const SWAP_TOOL_NAME: &str = "swap";
pub const EVM_PROTOCOL_FAMILY: &str = "evm";

// ── Supported networks ─────────────────────────────────────────────────────
pub const BASE_MAINNET: &str = "base-mainnet";
pub const BASE_SEPOLIA: &str = "base-sepolia";
pub const SUPPORTED_NETWORKS: &[&str] = &[BASE_MAINNET, BASE_SEPOLIA];

/// (network id, chain id, default public RPC)
pub(crate) const NETWORK_CHAIN_IDS: &[(&str, u64, &str)] = &[
    (BASE_MAINNET, 8453, "https://mainnet.base.org"),
    (BASE_SEPOLIA, 84532, "https://sepolia.base.org"),
];

// ── Uniswap V3 deployments ─────────────────────────────────────────────────
/// SwapRouter02 per network: approval spender and swap destination.
pub(crate) const ROUTER_ADDRESS: &[(&str, &str)] = &[
    (BASE_MAINNET, "0x2626664c2603336E57B271c5C0b26F421741e481"),
    (BASE_SEPOLIA, "0x94cC0AaC535CCDB3C01d6787D6413C739ae12bc4"),
];

/// QuoterV2 per network (on-chain route fallback).
pub(crate) const QUOTER_ADDRESS: &[(&str, &str)] = &[
    (BASE_MAINNET, "0x3d4e44Eb1374240CE5F1B871ab261CD16335B76a"),
    (BASE_SEPOLIA, "0xC5290058841028F1614F3A6F0F5816cAd0df5E27"),
];

/// WETH predeploy on OP-stack chains.
pub(crate) const WRAPPED_NATIVE: &str = "0x4200000000000000000000000000000000000006";

/// V3 fee tiers tried by the on-chain quoter, in hundredths of a bip.
pub const FEE_TIERS: &[u32] = &[100, 500, 3000, 10_000];

// ── Execution defaults ─────────────────────────────────────────────────────
/// Default slippage tolerance (1%).
pub const DEFAULT_SLIPPAGE_BPS: u32 = 100;
/// Maximum accepted slippage tolerance (5%).
pub const MAX_SLIPPAGE_BPS: u32 = 500;
pub const BPS_DENOMINATOR: u32 = 10_000;
/// Swap deadline offset from request time (30 minutes).
pub const DEFAULT_DEADLINE_SECS: u64 = 1_800;

// ── Routing service ────────────────────────────────────────────────────────
pub(crate) const DEFAULT_ROUTING_API_URL: &str = "https://api.uniswap.org/v1";
pub(crate) const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

// ── Config file ────────────────────────────────────────────────────────────
pub(crate) const CONFIG_DIR: &str = ".paw";
pub(crate) const CONFIG_FILE: &str = "uniswap.toml";
