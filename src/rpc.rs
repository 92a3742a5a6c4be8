//! Chain info augmentation over a JSON-RPC backend.
//!
//! The backend's baseline `getblockchaininfo` is merged with two extra
//! calls: `getinfo` for the money and zerocoin supplies, and
//! `getmasternodecount` for the enabled-node count. The next budget
//! superblock height is derived from the header count. Each query builds a
//! fresh [`ChainInfo`]; nothing is cached and the calls run sequentially.

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RpcError;

/// Number of blocks per budget cycle.
pub const BLOCKS_PER_BUDGET_CYCLE: u64 = 43_200;

/// Next superblock height strictly after `height`. Never returns `height`
/// itself, even when it already sits on a cycle boundary.
pub fn next_super_block(height: u64) -> u64 {
    height - height % BLOCKS_PER_BUDGET_CYCLE + BLOCKS_PER_BUDGET_CYCLE
}

/// A JSON-RPC method call. Implementations return the full response
/// envelope; only transport-level failures map to [`RpcError::Transport`].
/// Timeouts, retries and cancellation are the transport's business.
pub trait RpcTransport {
    fn call(&self, method: &str, params: &[Value]) -> Result<Value, RpcError>;
}

/// Error object a backend embeds in an otherwise successful response.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

// no serde defaults here: they would bolt a `T: Default` bound onto the
// derived impl, and absent `Option` fields already read as `None`
#[derive(Debug, Deserialize)]
struct RpcReply<T> {
    error: Option<RpcErrorObject>,
    result: Option<T>,
}

/// Zerocoin supply broken down by denomination, as reported by `getinfo`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZerocoinSupply {
    #[serde(default, rename = "1")]
    pub denom_1: f64,
    #[serde(default, rename = "5")]
    pub denom_5: f64,
    #[serde(default, rename = "10")]
    pub denom_10: f64,
    #[serde(default, rename = "50")]
    pub denom_50: f64,
    #[serde(default, rename = "100")]
    pub denom_100: f64,
    #[serde(default, rename = "500")]
    pub denom_500: f64,
    #[serde(default, rename = "1000")]
    pub denom_1000: f64,
    #[serde(default, rename = "5000")]
    pub denom_5000: f64,
    #[serde(default)]
    pub total: f64,
}

/// Baseline node info plus the chain-specific supply and masternode fields.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChainInfo {
    pub chain: String,
    pub blocks: u64,
    pub headers: u64,
    pub best_block_hash: String,
    pub difficulty: f64,
    /// Total coin supply as the backend's decimal string.
    pub money_supply: String,
    pub zerocoin_supply: ZerocoinSupply,
    /// Enabled masternodes.
    pub masternode_count: i64,
    pub next_super_block: u64,
}

#[derive(Debug, Deserialize)]
struct BlockchainInfoResult {
    chain: String,
    blocks: u64,
    headers: u64,
    #[serde(rename = "bestblockhash")]
    best_block_hash: String,
    #[serde(default)]
    difficulty: f64,
}

#[derive(Debug, Deserialize)]
struct GetInfoResult {
    #[serde(rename = "moneysupply")]
    money_supply: serde_json::Number,
    // the zerocoin pool is keyed by the coin's ticker
    #[serde(default, rename = "zDOGECsupply")]
    zerocoin_supply: ZerocoinSupply,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct MasternodeCountResult {
    #[serde(default)]
    total: i64,
    #[serde(default)]
    stable: i64,
    enabled: i64,
    #[serde(default, rename = "inqueue")]
    in_queue: i64,
}

#[derive(Debug, Deserialize)]
struct FindSerialResult {
    success: bool,
    #[serde(default)]
    txid: String,
}

/// RPC client for the chain-specific queries, generic over the transport.
pub struct DogecRpc<T> {
    transport: T,
}

impl<T: RpcTransport> DogecRpc<T> {
    pub fn new(transport: T) -> Self {
        DogecRpc { transport }
    }

    fn call_typed<R: DeserializeOwned>(
        &self,
        method: &'static str,
        params: &[Value],
    ) -> Result<R, RpcError> {
        let envelope = self.transport.call(method, params)?;
        let reply: RpcReply<R> =
            serde_json::from_value(envelope).map_err(|source| RpcError::Shape { method, source })?;
        if let Some(err) = reply.error {
            return Err(RpcError::Server {
                code: err.code,
                message: err.message,
            });
        }
        reply.result.ok_or(RpcError::MissingResult(method))
    }

    /// Fetches baseline chain info and augments it with the supply and
    /// masternode fields plus the next superblock height.
    pub fn get_chain_info(&self) -> Result<ChainInfo, RpcError> {
        debug!("rpc: getblockchaininfo");
        let base: BlockchainInfoResult = self.call_typed("getblockchaininfo", &[])?;

        debug!("rpc: getinfo");
        let info: GetInfoResult = self.call_typed("getinfo", &[])?;

        debug!("rpc: getmasternodecount");
        let masternodes: MasternodeCountResult = self.call_typed("getmasternodecount", &[])?;

        Ok(ChainInfo {
            next_super_block: next_super_block(base.headers),
            chain: base.chain,
            blocks: base.blocks,
            headers: base.headers,
            best_block_hash: base.best_block_hash,
            difficulty: base.difficulty,
            money_supply: info.money_supply.to_string(),
            zerocoin_supply: info.zerocoin_supply,
            masternode_count: masternodes.enabled,
        })
    }

    /// Looks up the transaction that consumed a zerocoin serial. A
    /// well-formed "not found" reply is a literal outcome, not an error.
    pub fn find_zc_serial(&self, serial_hex: &str) -> Result<String, RpcError> {
        debug!("rpc: findserial");
        let res: FindSerialResult =
            self.call_typed("findserial", &[Value::String(serial_hex.to_string())])?;
        if !res.success {
            return Ok("Serial not found in blockchain".to_string());
        }
        Ok(res.txid)
    }
}
