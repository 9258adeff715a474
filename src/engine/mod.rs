// Paw Agent Engine — Uniswap swap action
//
//   config — TOML settings (slippage, deadline, routing, networks)
//   dex    — token metadata, routing, allowance and swap execution
//   tools  — agent-facing tool definitions and dispatch

pub mod config;
pub mod dex;
pub mod tools;
