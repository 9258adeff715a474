// Paw Agent Engine — JSON-RPC helpers
// Thin reqwest client for eth_call, eth_chainId, eth_sendTransaction and
// receipt lookups. One attempt per call; callers decide what a failure means.

use crate::atoms::error::SwapError;
use crate::atoms::types::{TransactionRequest, TxReceipt};
use crate::engine::dex::primitives::{hex_decode, hex_encode, parse_quantity};
use alloy_primitives::{Address, Bytes};
use log::debug;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;

/// Failure of a single JSON-RPC call.
///
/// `Node` means the node answered with a JSON-RPC `error` object (revert,
/// rejected transaction). Anything else means the node could not be asked
/// or its answer could not be understood.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("{method} request failed: {reason}")]
    Transport { method: String, reason: String },

    #[error("{method}: {message}")]
    Node { method: String, code: Option<i64>, message: String },

    #[error("{method} bad response: {reason}")]
    Malformed { method: String, reason: String },
}

impl RpcError {
    pub fn is_node_error(&self) -> bool {
        matches!(self, RpcError::Node { .. })
    }

    fn malformed(method: &str, reason: impl std::fmt::Display) -> Self {
        RpcError::Malformed {
            method: method.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<RpcError> for SwapError {
    fn from(e: RpcError) -> Self {
        SwapError::Rpc(e.to_string())
    }
}

pub type RpcResult<T> = Result<T, RpcError>;

pub struct RpcClient {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(url: &str, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            url: url.to_string(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Raw JSON-RPC request; returns the `result` field.
    pub async fn call(&self, method: &str, params: Value) -> RpcResult<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": id
        });
        debug!("[rpc] {} → {} (id {})", method, self.url, id);

        let transport = |reason: String| RpcError::Transport {
            method: method.to_string(),
            reason,
        };

        let resp = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| transport(format!("body read failed: {}", e)))?;

        // Some nodes send JSON-RPC errors with a non-2xx status; the envelope
        // wins when there is one.
        let envelope: Value = match serde_json::from_str(&text) {
            Ok(v) => v,
            Err(e) if status.is_success() => return Err(RpcError::malformed(method, e)),
            Err(_) => {
                return Err(transport(format!(
                    "HTTP {}: {}",
                    status,
                    text.chars().take(300).collect::<String>()
                )))
            }
        };
        if !status.is_success() && envelope.get("error").is_none() {
            return Err(transport(format!("HTTP {}", status)));
        }

        extract_result(method, envelope)
    }

    /// Read-only contract call at the latest block.
    pub async fn eth_call(&self, to: Address, data: &Bytes) -> RpcResult<Bytes> {
        let result = self
            .call(
                "eth_call",
                json!([{ "to": to.to_string(), "data": hex_encode(data) }, "latest"]),
            )
            .await?;
        let hex = result
            .as_str()
            .ok_or_else(|| RpcError::malformed("eth_call", "result is not a hex string"))?;
        hex_decode(hex)
            .map(Bytes::from)
            .map_err(|e| RpcError::malformed("eth_call", e))
    }

    pub async fn eth_chain_id(&self) -> RpcResult<u64> {
        let result = self.call("eth_chainId", json!([])).await?;
        let hex = result
            .as_str()
            .ok_or_else(|| RpcError::malformed("eth_chainId", "result is not a quantity"))?;
        parse_quantity(hex).map_err(|e| RpcError::malformed("eth_chainId", e))
    }

    /// Submit through a node-managed account (the node signs).
    pub async fn eth_send_transaction(
        &self,
        from: Address,
        tx: &TransactionRequest,
    ) -> RpcResult<String> {
        let result = self
            .call(
                "eth_sendTransaction",
                json!([{
                    "from": from.to_string(),
                    "to": tx.to.to_string(),
                    "data": hex_encode(&tx.data),
                    "value": format!("0x{:x}", tx.value),
                }]),
            )
            .await?;
        result
            .as_str()
            .map(String::from)
            .ok_or_else(|| RpcError::malformed("eth_sendTransaction", "result is not a tx hash"))
    }

    /// `None` while the transaction is still pending.
    pub async fn eth_get_transaction_receipt(&self, tx_hash: &str) -> RpcResult<Option<TxReceipt>> {
        let result = self
            .call("eth_getTransactionReceipt", json!([tx_hash]))
            .await?;
        if result.is_null() {
            return Ok(None);
        }
        Ok(Some(parse_receipt(tx_hash, &result)?))
    }
}

/// Pull `result` out of a JSON-RPC envelope; `error` wins if present.
pub(crate) fn extract_result(method: &str, envelope: Value) -> RpcResult<Value> {
    if let Some(error) = envelope.get("error") {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .map(String::from)
            .unwrap_or_else(|| error.to_string());
        return Err(RpcError::Node {
            method: method.to_string(),
            code: error.get("code").and_then(|c| c.as_i64()),
            message,
        });
    }
    envelope
        .get("result")
        .cloned()
        .ok_or_else(|| RpcError::malformed(method, "missing 'result' field"))
}

pub(crate) fn parse_receipt(tx_hash: &str, receipt: &Value) -> RpcResult<TxReceipt> {
    let status = receipt
        .get("status")
        .and_then(|v| v.as_str())
        .unwrap_or("0x0");
    let block_number = match receipt.get("blockNumber").and_then(|v| v.as_str()) {
        Some(b) => Some(
            parse_quantity(b).map_err(|e| RpcError::malformed("eth_getTransactionReceipt", e))?,
        ),
        None => None,
    };
    Ok(TxReceipt {
        tx_hash: tx_hash.to_string(),
        success: status == "0x1",
        block_number,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_field_takes_precedence() {
        let env = json!({"jsonrpc":"2.0","id":1,"error":{"code":3,"message":"execution reverted"}});
        let err = extract_result("eth_call", env).unwrap_err();
        assert!(err.is_node_error());
        assert!(matches!(err, RpcError::Node { code: Some(3), .. }));
        assert_eq!(SwapError::from(err).to_string(), "RPC error: eth_call: execution reverted");
    }

    #[test]
    fn missing_result_is_malformed() {
        let err = extract_result("eth_chainId", json!({"jsonrpc":"2.0","id":1})).unwrap_err();
        assert!(matches!(err, RpcError::Malformed { .. }));
        let ok = extract_result("eth_chainId", json!({"result":"0x2105"})).unwrap();
        assert_eq!(ok, json!("0x2105"));
    }

    #[test]
    fn receipt_status() {
        let r = parse_receipt("0xabc", &json!({"status":"0x1","blockNumber":"0x10"})).unwrap();
        assert!(r.success);
        assert_eq!(r.block_number, Some(16));
        let r = parse_receipt("0xabc", &json!({"status":"0x0"})).unwrap();
        assert!(!r.success);
        assert_eq!(r.block_number, None);
    }

    #[tokio::test]
    async fn unreachable_node_is_a_transport_error() {
        let rpc = RpcClient::new("http://127.0.0.1:1", Duration::from_secs(2));
        let err = rpc.eth_chain_id().await.unwrap_err();
        assert!(matches!(err, RpcError::Transport { .. }));
        assert!(!err.is_node_error());
    }
}
