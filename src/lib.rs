//! Block, transaction and chain-info decoding for the DogeCash network.
//!
//! DogeCash diverges from plain Bitcoin-style wire encoding in three ways:
//! block headers of versions 4 through 6 carry an extra 32-byte accumulator
//! checkpoint that must be skipped; zerocoin spend inputs stand in for
//! normal signatures (and must not be mistaken for a coinbase input even
//! when they are a transaction's sole input); and coinbase, mint and stake
//! outputs use short sentinel byte sequences instead of real locking
//! scripts. This crate classifies those inputs and outputs, decodes their
//! declared monetary values, and augments baseline node info with the
//! chain's supply and masternode fields. It does not validate consensus
//! rules: spend proofs are read for their declared denomination, never
//! verified.
//!
//! All decode paths are pure and reentrant; the only shared state is the
//! one-time, idempotent chain-parameter registry.

pub mod address;
pub mod block;
pub mod error;
pub mod network;
pub mod rpc;
pub mod script;
pub mod spend;
pub mod tx;
pub mod types;
pub mod utils;

pub use block::BlockParser;
pub use error::{ParseError, RpcError};
pub use network::{ChainParams, ChainParamsRegistry};
pub use rpc::{next_super_block, ChainInfo, DogecRpc, RpcTransport};
pub use script::ScriptClassifier;
pub use tx::TxParser;
pub use types::{Block, Tx, Vin, Vout};
