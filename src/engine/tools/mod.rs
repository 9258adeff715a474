// Paw Agent Engine — Tool registry
//
//   uniswap — token swaps on Uniswap V3 (Base)

pub mod uniswap;

pub use uniswap::UniswapActionProvider;
