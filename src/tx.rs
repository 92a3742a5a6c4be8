//! Wire and JSON transaction decoding.
//!
//! The quirk this module exists for: a zerocoin spend input carries a null
//! previous outpoint, which makes the baseline coinbase predicate match. A
//! transaction whose sole input is a spend script must keep its input
//! rendered as a script reference, never as a coinbase marker.

use anyhow::{Context, Result};
use bitcoin::consensus::deserialize_partial;
use bitcoin::Transaction;
use log::warn;

use crate::error::ParseError;
use crate::network::ChainParams;
use crate::script::{self, ScriptClassifier, COINBASE_SENTINEL, COINSTAKE_SENTINEL};
use crate::spend;
use crate::types::{is_coinbase_tx, ScriptPubKey, ScriptSig, Tx, Vin, Vout};
use crate::utils::parse_amount;

/// Builds structured transactions from wire bytes or backend JSON.
pub struct TxParser {
    params: &'static ChainParams,
    classifier: ScriptClassifier,
}

impl TxParser {
    pub fn new(params: &'static ChainParams) -> Self {
        TxParser {
            params,
            classifier: ScriptClassifier::new(params),
        }
    }

    pub fn params(&self) -> &'static ChainParams {
        self.params
    }

    /// Decodes a single raw transaction, resolving output addresses.
    pub fn parse_tx(&self, raw: &[u8]) -> Result<Tx, ParseError> {
        let (wire, _): (Transaction, usize) = deserialize_partial(raw)?;
        let mut tx = self.tx_from_wire(&wire, true);
        tx.hex = hex::encode(raw);
        Ok(tx)
    }

    /// Builds a [`Tx`] from a baseline-decoded wire transaction. Never
    /// fails: inner decode problems degrade to empty address lists or zero
    /// values rather than propagating.
    pub fn tx_from_wire(&self, t: &Transaction, resolve_addresses: bool) -> Tx {
        // a tx whose single input is a zerocoin spend matches the baseline
        // coinbase predicate (null outpoint) but is not a coinbase
        let is_coinbase = t.is_coinbase()
            && !t
                .input
                .first()
                .is_some_and(|i| script::is_zerocoin_spend_script(i.script_sig.as_bytes()));

        let vin = t
            .input
            .iter()
            .map(|input| {
                if is_coinbase {
                    Vin {
                        coinbase: hex::encode(input.script_sig.as_bytes()),
                        sequence: input.sequence.to_consensus_u32(),
                        ..Default::default()
                    }
                } else {
                    Vin {
                        txid: input.previous_output.txid.to_string(),
                        vout: input.previous_output.vout,
                        script_sig: ScriptSig {
                            hex: hex::encode(input.script_sig.as_bytes()),
                        },
                        sequence: input.sequence.to_consensus_u32(),
                        ..Default::default()
                    }
                }
            })
            .collect();

        let vout = t
            .output
            .iter()
            .enumerate()
            .map(|(n, out)| {
                let script = out.script_pubkey.as_bytes();
                let addresses = if resolve_addresses {
                    self.classifier.classify_and_resolve(script).0
                } else {
                    Vec::new()
                };
                let mut hex_script = hex::encode(script);
                if hex_script.is_empty() {
                    // scriptless reward outputs get a sentinel regardless of
                    // whether addresses were resolved
                    hex_script = sentinel_script_hex(is_coinbase);
                }
                Vout {
                    value_sat: u128::from(out.value.to_sat()),
                    n: n as u32,
                    script_pub_key: ScriptPubKey {
                        hex: hex_script,
                        addresses,
                    },
                    ..Default::default()
                }
            })
            .collect();

        Tx {
            txid: t.compute_txid().to_string(),
            version: t.version.0,
            lock_time: t.lock_time.to_consensus_u32(),
            vin,
            vout,
            ..Default::default()
        }
    }

    /// Parses the backend's JSON form of a transaction, normalizing each
    /// output's decimal value to satoshis and substituting sentinel scripts
    /// for empty ones.
    pub fn tx_from_json(&self, raw: &[u8]) -> Result<Tx> {
        let mut tx: Tx = serde_json::from_slice(raw).context("transaction JSON")?;
        let is_coinbase = is_coinbase_tx(&tx);
        for vout in &mut tx.vout {
            if let Some(value) = vout.json_value.take() {
                vout.value_sat = parse_amount(&value.to_string())
                    .with_context(|| format!("tx {}: output {}", tx.txid, vout.n))?;
            }
            if vout.script_pub_key.hex.is_empty() {
                vout.script_pub_key.hex = sentinel_script_hex(is_coinbase);
            }
        }
        Ok(tx)
    }

    /// Address descriptor for an input whose previous output is not in the
    /// visible UTXO set: the unlocking script bytes themselves, or a fixed
    /// placeholder when there is no script.
    pub fn addr_desc_for_unknown_input(&self, tx: &Tx, input: usize) -> Vec<u8> {
        if let Some(vin) = tx.vin.get(input) {
            if !vin.script_sig.hex.is_empty() {
                if let Ok(script) = hex::decode(&vin.script_sig.hex) {
                    return script;
                }
            }
        }
        vec![0u8; 10]
    }

    /// Value carried by an input whose previous output is not indexable.
    /// Zerocoin spends declare their denomination in the unlocking script;
    /// anything else carries zero. A malformed proof degrades to zero with a
    /// warning instead of failing the caller.
    pub fn value_for_unknown_input(&self, tx: &Tx, input: usize) -> u128 {
        let Some(vin) = tx.vin.get(input) else {
            return 0;
        };
        if vin.script_sig.hex.is_empty() {
            return 0;
        }
        let Ok(script) = hex::decode(&vin.script_sig.hex) else {
            return 0;
        };
        if !script::is_zerocoin_spend_script(&script) {
            return 0;
        }
        match spend::value_of_spend(&script) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "tx {}: input {}: unable to decode spend denomination: {}",
                    tx.txid, input, err
                );
                0
            }
        }
    }
}

fn sentinel_script_hex(is_coinbase: bool) -> String {
    let sentinel = if is_coinbase {
        COINBASE_SENTINEL
    } else {
        COINSTAKE_SENTINEL
    };
    format!("{sentinel:02x}")
}
