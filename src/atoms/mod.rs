// Paw Atoms — leaf types shared by every layer: errors, constants, plain
// data and the wallet trait. Nothing in here touches the network.

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;
