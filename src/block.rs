//! Raw block decoding.
//!
//! Block versions 4 through 6 carry a 32-byte accumulator checkpoint
//! directly after the standard header fields; it is skipped, never
//! interpreted. Version 3 and earlier and version 7 and later are plain
//! Bitcoin-style headers.

use std::io::{BufRead, Cursor};

use bitcoin::block::Header;
use bitcoin::consensus::encode::VarInt;
use bitcoin::Transaction;

use crate::error::ParseError;
use crate::network::ChainParams;
use crate::tx::TxParser;
use crate::types::Block;
use crate::utils::consensus_decode;

/// Size of the accumulator checkpoint field added in block version 4 and
/// removed in version 7.
const ACCUMULATOR_CHECKPOINT_BYTES: usize = 32;

/// Decodes raw blocks, delegating per-transaction structure to [`TxParser`].
pub struct BlockParser {
    tx: TxParser,
}

impl BlockParser {
    pub fn new(params: &'static ChainParams) -> Self {
        BlockParser {
            tx: TxParser::new(params),
        }
    }

    pub fn tx_parser(&self) -> &TxParser {
        &self.tx
    }

    /// Decodes a raw block into header metadata plus its transactions.
    /// Address resolution is skipped here; callers resolve on demand through
    /// [`TxParser::parse_tx`].
    pub fn parse_block(&self, raw: &[u8]) -> Result<Block, ParseError> {
        let mut cursor = Cursor::new(raw.to_vec());
        let header: Header = consensus_decode(&mut cursor)?;

        let version = header.version.to_consensus();
        if version > 3 && version < 7 {
            let have = raw.len().saturating_sub(cursor.position() as usize);
            if have < ACCUMULATOR_CHECKPOINT_BYTES {
                return Err(ParseError::Truncated {
                    wanted: ACCUMULATOR_CHECKPOINT_BYTES,
                    have,
                });
            }
            cursor.consume(ACCUMULATOR_CHECKPOINT_BYTES);
        }

        // witness-aware transaction framing, same as upstream wire encoding
        let count = consensus_decode::<VarInt>(&mut cursor)?.0;
        let mut txs = Vec::new();
        for _ in 0..count {
            let wire: Transaction = consensus_decode(&mut cursor)?;
            txs.push(self.tx.tx_from_wire(&wire, false));
        }

        Ok(Block {
            size: raw.len(),
            time: i64::from(header.time),
            txs,
        })
    }
}
