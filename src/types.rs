//! Decoded block and transaction shapes.
//!
//! Field names mirror the JSON a backend node emits, so the same structs
//! serve both the binary decode path and the JSON path. Fields the wire
//! format cannot carry (block hash, confirmations, times) stay `None` on the
//! binary path and are supplied by the backend on the JSON path.

use serde::{Deserialize, Deserializer, Serialize};

/// One coin in satoshis.
pub const COIN: u128 = 100_000_000;

/// Backends emit `null` for missing lists; treat it like an absent field.
fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptSig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub hex: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptPubKey {
    #[serde(default, deserialize_with = "null_as_default")]
    pub hex: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub addresses: Vec<String>,
}

/// A transaction input: either a coinbase marker (raw bytes plus sequence)
/// or a reference to a previous output.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vin {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub coinbase: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub txid: String,
    #[serde(default)]
    pub vout: u32,
    #[serde(default, rename = "scriptSig")]
    pub script_sig: ScriptSig,
    #[serde(default)]
    pub sequence: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vout {
    /// Output value in satoshis; populated from `value` on the JSON path.
    #[serde(default, rename = "valueSat")]
    pub value_sat: u128,
    /// Decimal value as received from the backend; cleared once `value_sat`
    /// has been normalized.
    #[serde(
        default,
        rename = "value",
        skip_serializing_if = "Option::is_none"
    )]
    pub json_value: Option<serde_json::Number>,
    #[serde(default)]
    pub n: u32,
    #[serde(default, rename = "scriptPubKey")]
    pub script_pub_key: ScriptPubKey,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Tx {
    #[serde(default)]
    pub txid: String,
    #[serde(default)]
    pub version: i32,
    #[serde(default, rename = "locktime")]
    pub lock_time: u32,
    #[serde(default)]
    pub vin: Vec<Vin>,
    #[serde(default)]
    pub vout: Vec<Vout>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hex: String,
    #[serde(
        default,
        rename = "blockhash",
        skip_serializing_if = "Option::is_none"
    )]
    pub block_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
    #[serde(default, rename = "blocktime", skip_serializing_if = "Option::is_none")]
    pub block_time: Option<i64>,
}

/// A decoded block: header metadata plus its transactions in wire order.
/// Immutable once built.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Total size of the raw block in bytes.
    pub size: usize,
    /// Header timestamp, unix seconds.
    pub time: i64,
    pub txs: Vec<Tx>,
}

/// Coinbase test for JSON-path transactions: exactly one input carrying
/// coinbase bytes with the final sequence number.
pub fn is_coinbase_tx(tx: &Tx) -> bool {
    tx.vin.len() == 1 && !tx.vin[0].coinbase.is_empty() && tx.vin[0].sequence == u32::MAX
}
