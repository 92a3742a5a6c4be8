//! Output and input script classification.
//!
//! DogeCash carries three kinds of non-standard scripts: zerocoin mint and
//! spend scripts identified by a leading opcode, and single-byte sentinel
//! scripts standing in for coinbase and stake reward outputs that have no
//! real locking script. Everything else goes through the generic
//! base58check resolver.

use crate::address;
use crate::network::ChainParams;

/// Opcode of a zerocoin mint output.
pub const OP_ZEROCOINMINT: u8 = 0xc1;
/// Opcode of a zerocoin spend input.
pub const OP_ZEROCOINSPEND: u8 = 0xc2;

/// Placeholder script byte substituted for empty coinbase output scripts.
pub const COINBASE_SENTINEL: u8 = 0xf7;
/// Placeholder script byte substituted for empty stake output scripts.
pub const COINSTAKE_SENTINEL: u8 = 0xf8;

pub const ZCSPEND_LABEL: &str = "Zerocoin Spend";
pub const ZCMINT_LABEL: &str = "Zerocoin Mint";
pub const CBASE_LABEL: &str = "CoinBase TX";
pub const CSTAKE_LABEL: &str = "CoinStake TX";

/// Zerocoin spend scripts are at minimum 100 bytes; anything shorter with
/// the same opcode is not a spend.
pub fn is_zerocoin_spend_script(script: &[u8]) -> bool {
    script.len() >= 100 && script[0] == OP_ZEROCOINSPEND
}

pub fn is_zerocoin_mint_script(script: &[u8]) -> bool {
    script.len() > 1 && script[0] == OP_ZEROCOINMINT
}

pub fn is_coinbase_sentinel(script: &[u8]) -> bool {
    script == [COINBASE_SENTINEL]
}

pub fn is_coinstake_sentinel(script: &[u8]) -> bool {
    script == [COINSTAKE_SENTINEL]
}

/// Generic resolver the classifier falls through to; the default is
/// [`address::addresses_from_script`].
pub type ScriptResolver = fn(&[u8], &ChainParams) -> (Vec<String>, bool);

struct Rule {
    matches: fn(&[u8]) -> bool,
    label: &'static str,
}

// Evaluated in order. The spend and mint checks must run before the
// single-byte sentinels, and the generic resolver is the catch-all.
const RULES: [Rule; 4] = [
    Rule {
        matches: is_zerocoin_spend_script,
        label: ZCSPEND_LABEL,
    },
    Rule {
        matches: is_zerocoin_mint_script,
        label: ZCMINT_LABEL,
    },
    Rule {
        matches: is_coinbase_sentinel,
        label: CBASE_LABEL,
    },
    Rule {
        matches: is_coinstake_sentinel,
        label: CSTAKE_LABEL,
    },
];

/// Maps script bytes to labels for the chain-specific script kinds, falling
/// back to the generic resolver for everything else. The fallback is held
/// explicitly so the priority chain stays visible and testable in isolation.
pub struct ScriptClassifier {
    params: &'static ChainParams,
    fallback: ScriptResolver,
}

impl ScriptClassifier {
    pub fn new(params: &'static ChainParams) -> Self {
        ScriptClassifier {
            params,
            fallback: address::addresses_from_script,
        }
    }

    /// Builds a classifier with a custom generic resolver.
    pub fn with_fallback(params: &'static ChainParams, fallback: ScriptResolver) -> Self {
        ScriptClassifier { params, fallback }
    }

    /// Returns the label or address list for a script plus whether the
    /// result is a searchable address. Chain-specific labels are never
    /// searchable. Never fails: a script no rule recognizes yields whatever
    /// the generic resolver returns.
    pub fn classify_and_resolve(&self, script: &[u8]) -> (Vec<String>, bool) {
        for rule in &RULES {
            if (rule.matches)(script) {
                return (vec![rule.label.to_string()], false);
            }
        }
        (self.fallback)(script, self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::ChainParamsRegistry;

    fn classifier() -> ScriptClassifier {
        ScriptClassifier::new(ChainParamsRegistry::global().params("main"))
    }

    fn spend_script(len: usize) -> Vec<u8> {
        let mut s = vec![0u8; len];
        s[0] = OP_ZEROCOINSPEND;
        s
    }

    #[test]
    fn spend_script_needs_100_bytes() {
        let c = classifier();
        assert_eq!(
            c.classify_and_resolve(&spend_script(100)),
            (vec![ZCSPEND_LABEL.to_string()], false)
        );
        // one byte short of a spend, and not anything else either
        assert_eq!(c.classify_and_resolve(&spend_script(99)), (vec![], false));
    }

    #[test]
    fn mint_script_needs_two_bytes() {
        let c = classifier();
        assert_eq!(
            c.classify_and_resolve(&[OP_ZEROCOINMINT, 0x00]),
            (vec![ZCMINT_LABEL.to_string()], false)
        );
        // a single 0xc1 byte is not a mint and not a sentinel
        assert_eq!(c.classify_and_resolve(&[OP_ZEROCOINMINT]), (vec![], false));
    }

    #[test]
    fn sentinels_are_exactly_one_byte() {
        let c = classifier();
        assert_eq!(
            c.classify_and_resolve(&[COINBASE_SENTINEL]),
            (vec![CBASE_LABEL.to_string()], false)
        );
        assert_eq!(
            c.classify_and_resolve(&[COINSTAKE_SENTINEL]),
            (vec![CSTAKE_LABEL.to_string()], false)
        );
        assert_eq!(
            c.classify_and_resolve(&[COINBASE_SENTINEL, 0x00]),
            (vec![], false)
        );
    }

    #[test]
    fn spend_and_mint_take_priority_over_fallback() {
        fn poisoned(_: &[u8], _: &ChainParams) -> (Vec<String>, bool) {
            (vec!["fallback".to_string()], true)
        }
        let c = ScriptClassifier::with_fallback(
            ChainParamsRegistry::global().params("main"),
            poisoned,
        );
        // recognized scripts never reach the fallback
        assert_eq!(
            c.classify_and_resolve(&spend_script(100)),
            (vec![ZCSPEND_LABEL.to_string()], false)
        );
        assert_eq!(
            c.classify_and_resolve(&[COINSTAKE_SENTINEL]),
            (vec![CSTAKE_LABEL.to_string()], false)
        );
        // everything else does
        assert_eq!(
            c.classify_and_resolve(&[0x51]),
            (vec!["fallback".to_string()], true)
        );
    }

    #[test]
    fn standard_scripts_reach_the_resolver() {
        let c = classifier();
        let mut p2pkh = vec![0x76, 0xa9, 0x14];
        p2pkh.extend_from_slice(&[3u8; 20]);
        p2pkh.extend_from_slice(&[0x88, 0xac]);
        let (addrs, searchable) = c.classify_and_resolve(&p2pkh);
        assert!(searchable);
        assert!(addrs[0].starts_with('D'));
    }
}
