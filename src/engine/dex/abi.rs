// Paw Agent Engine — ABI bindings
// ERC-20 metadata/allowance, Uniswap V3 QuoterV2 and SwapRouter02 calls,
// plus the packed V3 path encoding shared by quoting and execution.

use alloy_primitives::aliases::{U160, U24};
use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol, SolCall};

sol! {
    interface IERC20 {
        function decimals() external view returns (uint8);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }

    interface IQuoterV2 {
        struct QuoteExactInputSingleParams {
            address tokenIn;
            address tokenOut;
            uint256 amountIn;
            uint24 fee;
            uint160 sqrtPriceLimitX96;
        }

        function quoteExactInputSingle(QuoteExactInputSingleParams memory params)
            external
            returns (uint256 amountOut, uint160 sqrtPriceX96After, uint32 initializedTicksCrossed, uint256 gasEstimate);

        function quoteExactInput(bytes memory path, uint256 amountIn)
            external
            returns (uint256 amountOut, uint160[] memory sqrtPriceX96AfterList, uint32[] memory initializedTicksCrossedList, uint256 gasEstimate);
    }

    interface ISwapRouter02 {
        struct ExactInputSingleParams {
            address tokenIn;
            address tokenOut;
            uint24 fee;
            address recipient;
            uint256 amountIn;
            uint256 amountOutMinimum;
            uint160 sqrtPriceLimitX96;
        }

        struct ExactInputParams {
            bytes path;
            address recipient;
            uint256 amountIn;
            uint256 amountOutMinimum;
        }

        function exactInputSingle(ExactInputSingleParams calldata params) external payable returns (uint256 amountOut);
        function exactInput(ExactInputParams calldata params) external payable returns (uint256 amountOut);
        function multicall(uint256 deadline, bytes[] calldata data) external payable returns (bytes[] memory results);
    }
}

// ── ERC-20 ─────────────────────────────────────────────────────────────────

pub fn encode_decimals() -> Bytes {
    IERC20::decimalsCall {}.abi_encode().into()
}

pub fn decode_decimals(data: &[u8]) -> Result<u8, String> {
    IERC20::decimalsCall::abi_decode_returns(data, true)
        .map(|r| r._0)
        .map_err(|e| e.to_string())
}

pub fn encode_allowance(owner: Address, spender: Address) -> Bytes {
    IERC20::allowanceCall { owner, spender }.abi_encode().into()
}

pub fn decode_allowance(data: &[u8]) -> Result<U256, String> {
    IERC20::allowanceCall::abi_decode_returns(data, true)
        .map(|r| r._0)
        .map_err(|e| e.to_string())
}

pub fn encode_approve(spender: Address, amount: U256) -> Bytes {
    IERC20::approveCall { spender, amount }.abi_encode().into()
}

// ── QuoterV2 ───────────────────────────────────────────────────────────────

pub fn encode_quote_exact_input_single(
    token_in: Address,
    token_out: Address,
    amount_in: U256,
    fee: u32,
) -> Bytes {
    IQuoterV2::quoteExactInputSingleCall {
        params: IQuoterV2::QuoteExactInputSingleParams {
            tokenIn: token_in,
            tokenOut: token_out,
            amountIn: amount_in,
            fee: U24::saturating_from(fee),
            sqrtPriceLimitX96: U160::ZERO,
        },
    }
    .abi_encode()
    .into()
}

pub fn encode_quote_exact_input(path: Bytes, amount_in: U256) -> Bytes {
    IQuoterV2::quoteExactInputCall { path, amountIn: amount_in }
        .abi_encode()
        .into()
}

/// (amountOut, gasEstimate) from either quoter entry point.
pub fn decode_quote(data: &[u8], single_hop: bool) -> Result<(U256, U256), String> {
    if single_hop {
        IQuoterV2::quoteExactInputSingleCall::abi_decode_returns(data, true)
            .map(|r| (r.amountOut, r.gasEstimate))
            .map_err(|e| e.to_string())
    } else {
        IQuoterV2::quoteExactInputCall::abi_decode_returns(data, true)
            .map(|r| (r.amountOut, r.gasEstimate))
            .map_err(|e| e.to_string())
    }
}

// ── SwapRouter02 ───────────────────────────────────────────────────────────

pub fn encode_exact_input_single(
    token_in: Address,
    token_out: Address,
    fee: u32,
    recipient: Address,
    amount_in: U256,
    amount_out_minimum: U256,
) -> Bytes {
    ISwapRouter02::exactInputSingleCall {
        params: ISwapRouter02::ExactInputSingleParams {
            tokenIn: token_in,
            tokenOut: token_out,
            fee: U24::saturating_from(fee),
            recipient,
            amountIn: amount_in,
            amountOutMinimum: amount_out_minimum,
            sqrtPriceLimitX96: U160::ZERO,
        },
    }
    .abi_encode()
    .into()
}

pub fn encode_exact_input(
    path: Bytes,
    recipient: Address,
    amount_in: U256,
    amount_out_minimum: U256,
) -> Bytes {
    ISwapRouter02::exactInputCall {
        params: ISwapRouter02::ExactInputParams {
            path,
            recipient,
            amountIn: amount_in,
            amountOutMinimum: amount_out_minimum,
        },
    }
    .abi_encode()
    .into()
}

/// Wrap router calls so the whole batch reverts after `deadline`.
pub fn encode_multicall(deadline: u64, calls: Vec<Bytes>) -> Bytes {
    ISwapRouter02::multicallCall {
        deadline: U256::from(deadline),
        data: calls,
    }
    .abi_encode()
    .into()
}

// ── V3 path ────────────────────────────────────────────────────────────────

/// Packed path: token (20) | fee (3) | token (20) | fee (3) | ... | token (20).
pub fn encode_v3_path(tokens: &[Address], fees: &[u32]) -> Bytes {
    let mut out = Vec::with_capacity(tokens.len() * 20 + fees.len() * 3);
    for (i, token) in tokens.iter().enumerate() {
        out.extend_from_slice(token.as_slice());
        if let Some(fee) = fees.get(i) {
            out.extend_from_slice(&fee.to_be_bytes()[1..]);
        }
    }
    out.into()
}
