//! Baseline script-to-address resolution.
//!
//! Generic Bitcoin-style derivation for the standard output templates,
//! parameterized by the network's version bytes. The script classifier falls
//! back to this after its chain-specific rules.

use bitcoin::base58;
use bitcoin::hashes::{hash160, Hash};
use bitcoin::Script;

use crate::network::ChainParams;

/// Derives base58check addresses from a locking script. Returns the address
/// list and whether the result is a searchable address. Non-standard scripts
/// legitimately resolve to no addresses; this never fails.
pub fn addresses_from_script(script: &[u8], params: &ChainParams) -> (Vec<String>, bool) {
    let s = Script::from_bytes(script);
    if s.is_p2pkh() {
        (
            vec![encode_base58(params.p2pkh_prefix, &script[3..23])],
            true,
        )
    } else if s.is_p2sh() {
        (vec![encode_base58(params.p2sh_prefix, &script[2..22])], true)
    } else if let Some(key) = s.p2pk_public_key() {
        let h = hash160::Hash::hash(&key.to_bytes());
        (
            vec![encode_base58(params.p2pkh_prefix, h.as_byte_array())],
            true,
        )
    } else {
        (Vec::new(), false)
    }
}

fn encode_base58(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + 1);
    data.push(version);
    data.extend_from_slice(payload);
    base58::encode_check(&data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::ChainParamsRegistry;

    fn p2pkh_script(hash: [u8; 20]) -> Vec<u8> {
        let mut script = vec![0x76, 0xa9, 0x14];
        script.extend_from_slice(&hash);
        script.extend_from_slice(&[0x88, 0xac]);
        script
    }

    fn p2sh_script(hash: [u8; 20]) -> Vec<u8> {
        let mut script = vec![0xa9, 0x14];
        script.extend_from_slice(&hash);
        script.push(0x87);
        script
    }

    #[test]
    fn p2pkh_mainnet() {
        let params = ChainParamsRegistry::global().params("main");
        let (addrs, searchable) = addresses_from_script(&p2pkh_script([7u8; 20]), params);
        assert!(searchable);
        assert_eq!(addrs.len(), 1);
        assert!(addrs[0].starts_with('D'));
        let decoded = base58::decode_check(&addrs[0]).unwrap();
        assert_eq!(decoded[0], params.p2pkh_prefix);
        assert_eq!(&decoded[1..], &[7u8; 20]);
    }

    #[test]
    fn p2pkh_testnet_prefix() {
        let params = ChainParamsRegistry::global().params("test");
        let (addrs, _) = addresses_from_script(&p2pkh_script([7u8; 20]), params);
        let decoded = base58::decode_check(&addrs[0]).unwrap();
        assert_eq!(decoded[0], params.p2pkh_prefix);
    }

    #[test]
    fn p2sh_mainnet() {
        let params = ChainParamsRegistry::global().params("main");
        let (addrs, searchable) = addresses_from_script(&p2sh_script([9u8; 20]), params);
        assert!(searchable);
        let decoded = base58::decode_check(&addrs[0]).unwrap();
        assert_eq!(decoded[0], params.p2sh_prefix);
        assert_eq!(&decoded[1..], &[9u8; 20]);
    }

    #[test]
    fn non_standard_scripts_resolve_to_nothing() {
        let params = ChainParamsRegistry::global().params("main");
        assert_eq!(addresses_from_script(&[], params), (Vec::new(), false));
        // OP_RETURN
        assert_eq!(
            addresses_from_script(&[0x6a, 0x01, 0xff], params),
            (Vec::new(), false)
        );
        // random garbage
        assert_eq!(
            addresses_from_script(&[0x01, 0x02, 0x03], params),
            (Vec::new(), false)
        );
    }
}
