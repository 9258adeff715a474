// Integration test: agent-facing tool surface
//
// Argument validation happens at the tool boundary, before any wallet call.

use super::*;
use pawz_uniswap::engine::tools::uniswap::{definitions, UniswapActionProvider};
use serde_json::json;

fn provider(script: RouteScript) -> UniswapActionProvider {
    UniswapActionProvider::new(swapper(MockRouteFinder::new(script)))
}

#[test]
fn registers_a_single_swap_tool() {
    let p = provider(RouteScript::NoRoute);
    assert_eq!(p.name(), "uniswap");
    let names: Vec<String> = p.definitions().into_iter().map(|d| d.function.name).collect();
    assert_eq!(names, vec!["swap".to_string()]);
    assert!(definitions()[0].function.description.contains("amountIn"));
}

#[tokio::test]
async fn unknown_tool_is_not_claimed() {
    let p = provider(RouteScript::NoRoute);
    let wallet = MockWallet::base();
    assert!(p.execute("transfer", &json!({}), &wallet).await.is_none());
    assert!(wallet.calls().is_empty());
}

#[tokio::test]
async fn malformed_amounts_are_rejected_without_wallet_calls() {
    let p = provider(RouteScript::Direct { fee: 500, rate: 1 });
    for amount in ["", "abc", "1e18", "-1", "1.", "1,000", "1.2.3", "0x10", "١٢", "１"] {
        let wallet = MockWallet::base();
        let args = json!({
            "tokenIn": WETH.to_string(),
            "amountIn": amount,
            "tokenOut": USDC.to_string(),
        });
        let out = p.execute("swap", &args, &wallet).await.unwrap();
        let err = out.unwrap_err();
        assert!(err.starts_with("Invalid request"), "{:?}: {}", amount, err);
        assert!(wallet.calls().is_empty(), "{:?} reached the wallet", amount);
    }
}

#[tokio::test]
async fn malformed_addresses_and_missing_fields_are_rejected() {
    let p = provider(RouteScript::Direct { fee: 500, rate: 1 });
    let wallet = MockWallet::base();
    for args in [
        json!({ "tokenIn": "WETH", "amountIn": "1", "tokenOut": USDC.to_string() }),
        json!({ "tokenIn": WETH.to_string(), "amountIn": "1", "tokenOut": "0x1234" }),
        json!({ "tokenIn": WETH.to_string(), "amountIn": "1" }),
        json!({ "tokenIn": WETH.to_string(), "amountIn": 1, "tokenOut": USDC.to_string() }),
    ] {
        let out = p.execute("swap", &args, &wallet).await.unwrap();
        assert!(out.is_err(), "{} should be rejected", args);
    }
    assert!(wallet.calls().is_empty());
}

#[tokio::test]
async fn swap_returns_plain_text_summary() {
    let p = provider(RouteScript::Direct { fee: 500, rate: 1 });
    let wallet = MockWallet::base();
    let args = json!({
        "tokenIn": WETH.to_string(),
        "amountIn": "1",
        "tokenOut": USDC.to_string(),
    });

    let summary = p.execute("swap", &args, &wallet).await.unwrap().unwrap();

    assert!(summary.starts_with("Swap executed: 1 "));
    assert!(summary.contains("on network base-mainnet"));
}

#[tokio::test]
async fn no_route_surfaces_as_error_text() {
    let p = provider(RouteScript::NoRoute);
    let wallet = MockWallet::base();
    let args = json!({
        "tokenIn": WETH.to_string(),
        "amountIn": "1",
        "tokenOut": USDC.to_string(),
    });

    let err = p.execute("swap", &args, &wallet).await.unwrap().unwrap_err();

    assert!(err.starts_with("No route found"));
    assert!(wallet.sends().is_empty());
}
