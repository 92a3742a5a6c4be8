//! Shared decoding helpers.

use std::io::BufRead;

use anyhow::{anyhow, Result};
use bitcoin::consensus::{
    deserialize_partial,
    encode::{self, Decodable, Encodable},
};

use crate::types::COIN;

/// Decodes one consensus value from the cursor, consuming exactly the bytes
/// it used.
pub fn consensus_decode<T: Decodable>(
    cursor: &mut std::io::Cursor<Vec<u8>>,
) -> Result<T, encode::Error> {
    let slice = &cursor.get_ref()[cursor.position() as usize..];
    let (value, used): (T, usize) = deserialize_partial(slice)?;
    cursor.consume(used);
    Ok(value)
}

pub fn consensus_encode<T: Encodable>(v: &T) -> Result<Vec<u8>> {
    let mut result = Vec::<u8>::new();
    <T as Encodable>::consensus_encode::<Vec<u8>>(v, &mut result)?;
    Ok(result)
}

/// Converts a backend's decimal amount representation to satoshis. Accepts
/// at most 8 fractional digits; exponent notation is rejected.
pub fn parse_amount(s: &str) -> Result<u128> {
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(anyhow!("empty amount"));
    }
    if frac_part.len() > 8 {
        return Err(anyhow!("amount {s} has more than 8 decimal places"));
    }

    let int: u128 = if int_part.is_empty() {
        0
    } else {
        int_part
            .parse()
            .map_err(|_| anyhow!("invalid amount {s}"))?
    };
    let frac: u128 = if frac_part.is_empty() {
        0
    } else {
        let digits: u128 = frac_part
            .parse()
            .map_err(|_| anyhow!("invalid amount {s}"))?;
        digits * 10u128.pow(8 - frac_part.len() as u32)
    };

    int.checked_mul(COIN)
        .and_then(|v| v.checked_add(frac))
        .ok_or_else(|| anyhow!("amount {s} overflows"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional_amounts() {
        assert_eq!(parse_amount("0").unwrap(), 0);
        assert_eq!(parse_amount("1").unwrap(), COIN);
        assert_eq!(parse_amount("5.5").unwrap(), 550_000_000);
        assert_eq!(parse_amount("0.00000001").unwrap(), 1);
        assert_eq!(parse_amount(".25").unwrap(), 25_000_000);
        assert_eq!(parse_amount("21000000.12345678").unwrap(), 2_100_000_012_345_678);
    }

    #[test]
    fn leading_fractional_zeroes_scale_correctly() {
        assert_eq!(parse_amount("0.05").unwrap(), 5_000_000);
        assert_eq!(parse_amount("0.00500000").unwrap(), 500_000);
    }

    #[test]
    fn rejects_malformed_amounts() {
        assert!(parse_amount("").is_err());
        assert!(parse_amount(".").is_err());
        assert!(parse_amount("-1").is_err());
        assert!(parse_amount("1.123456789").is_err());
        assert!(parse_amount("1e8").is_err());
        assert!(parse_amount("1.2.3").is_err());
    }

    #[test]
    fn consensus_round_trip() {
        use bitcoin::consensus::encode::VarInt;
        let bytes = consensus_encode(&VarInt(300)).unwrap();
        let mut cursor = std::io::Cursor::new(bytes);
        let decoded: VarInt = consensus_decode(&mut cursor).unwrap();
        assert_eq!(decoded.0, 300);
    }
}
