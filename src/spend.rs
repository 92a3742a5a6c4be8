//! Zerocoin spend value extraction.
//!
//! A spend input's unlocking script is the spend opcode, a one-byte length,
//! the opaque serialized proof, and finally the denomination as a
//! little-endian u32. Only the denomination is read; the proof itself is
//! skipped, never parsed or verified.

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::ParseError;
use crate::types::COIN;

/// Reads the denomination declared by a zerocoin spend script and converts
/// it to satoshis. Fails with [`ParseError::Truncated`] when the buffer ends
/// before a field it must read; never returns a partial value.
pub fn value_of_spend(script: &[u8]) -> Result<u128, ParseError> {
    let mut r = Cursor::new(script);
    // the opcode byte was already checked by the classifier
    r.set_position(1);

    let have = remaining(script, &r);
    let proof_len = r
        .read_u8()
        .map_err(|_| ParseError::Truncated { wanted: 1, have })?;

    // skip the opaque serialized proof
    r.set_position(r.position() + u64::from(proof_len));

    let have = remaining(script, &r);
    let denom = r
        .read_u32::<LittleEndian>()
        .map_err(|_| ParseError::Truncated { wanted: 4, have })?;

    Ok(u128::from(denom) * COIN)
}

fn remaining(script: &[u8], r: &Cursor<&[u8]>) -> usize {
    script.len().saturating_sub(r.position() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_declared_denomination() {
        // opcode, proof length 2, proof bytes, denom 5 little-endian
        let script = [0xc2, 0x02, 0xaa, 0xbb, 0x05, 0x00, 0x00, 0x00];
        assert_eq!(value_of_spend(&script).unwrap(), 5 * COIN);
    }

    #[test]
    fn denomination_is_little_endian() {
        let script = [0xc2, 0x00, 0x00, 0x01, 0x00, 0x00];
        assert_eq!(value_of_spend(&script).unwrap(), 256 * COIN);
    }

    #[test]
    fn truncated_before_denomination() {
        // proof length says 2 but only the proof bytes follow
        let script = [0xc2, 0x02, 0xaa, 0xbb];
        assert!(matches!(
            value_of_spend(&script),
            Err(ParseError::Truncated { wanted: 4, have: 0 })
        ));
    }

    #[test]
    fn truncated_inside_denomination() {
        let script = [0xc2, 0x00, 0x05, 0x00];
        assert!(matches!(
            value_of_spend(&script),
            Err(ParseError::Truncated { wanted: 4, have: 2 })
        ));
    }

    #[test]
    fn truncated_before_proof_length() {
        let script = [0xc2];
        assert!(matches!(
            value_of_spend(&script),
            Err(ParseError::Truncated { wanted: 1, have: 0 })
        ));
    }
}
