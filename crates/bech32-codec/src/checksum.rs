use serde::{Deserialize, Serialize};

/// Generator coefficients of the BCH code behind the Bech32 checksum
/// (BIP-173).
pub const GENERATOR: [u32; 5] = [0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3];

/// Checksum variant selecting the polymod target constant.
///
/// The two variants share the generator polynomial and the alphabet but
/// produce incompatible strings: a string created under one variant fails
/// verification under the other. Every encode/decode call takes the
/// variant explicitly so the two paths cannot silently diverge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Classic BIP-173 checksum, target constant 1.
    Bech32,
    /// Alternate checksum, target constant 0x3FFFFFFF.
    Bech32bis,
}

impl Variant {
    /// The constant the polymod of a valid string must equal, and which
    /// is XORed in when creating a checksum.
    pub fn checksum_target(self) -> u32 {
        match self {
            Variant::Bech32 => 1,
            Variant::Bech32bis => 0x3fff_ffff,
        }
    }
}

/// Expand a human-readable part into the values covered by the checksum:
/// the high 3 bits of each byte, a zero separator, then the low 5 bits of
/// each byte. Feeding the HRP in twice makes HRP corruption detectable.
pub fn hrp_expand(hrp: &str) -> Vec<u8> {
    let bytes = hrp.as_bytes();
    let mut values = Vec::with_capacity(bytes.len() * 2 + 1);
    for &b in bytes {
        values.push(b >> 5);
    }
    values.push(0);
    for &b in bytes {
        values.push(b & 31);
    }
    values
}

/// BCH polynomial remainder over a sequence of 5-bit values.
///
/// A 25-bit window is shifted left 5 bits per input value; the bits
/// shifted out select which generator coefficients are XORed back in.
pub fn polymod(values: &[u8]) -> u32 {
    let mut chk: u32 = 1;
    for &value in values {
        let top = chk >> 25;
        chk = ((chk & 0x01ff_ffff) << 5) ^ u32::from(value);
        for (i, generator) in GENERATOR.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                chk ^= generator;
            }
        }
    }
    chk
}

/// Compute the six checksum symbols for an HRP and 5-bit payload.
pub fn create_checksum(hrp: &str, data: &[u8], variant: Variant) -> [u8; 6] {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data);
    values.extend_from_slice(&[0u8; 6]);
    let residue = polymod(&values) ^ variant.checksum_target();
    let mut checksum = [0u8; 6];
    for (i, symbol) in checksum.iter_mut().enumerate() {
        *symbol = ((residue >> (5 * (5 - i))) & 31) as u8;
    }
    checksum
}

/// Verify the checksum of a payload that still carries its six checksum
/// symbols at the end.
pub fn verify_checksum(hrp: &str, data_with_checksum: &[u8], variant: Variant) -> bool {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data_with_checksum);
    polymod(&values) == variant.checksum_target()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hrp_expand_bc() {
        // 'b' = 0x62, 'c' = 0x63.
        assert_eq!(hrp_expand("bc"), vec![3, 3, 0, 2, 3]);
    }

    #[test]
    fn hrp_expand_doubles_length_plus_separator() {
        assert_eq!(hrp_expand("txtest").len(), 13);
    }

    #[test]
    fn polymod_of_empty_input_is_one() {
        assert_eq!(polymod(&[]), 1);
    }

    #[test]
    fn variant_targets_differ() {
        assert_eq!(Variant::Bech32.checksum_target(), 1);
        assert_eq!(Variant::Bech32bis.checksum_target(), 0x3fff_ffff);
    }

    #[test]
    fn created_checksum_verifies_under_same_variant() {
        let data = [0u8, 14, 20, 15, 7, 13, 26];
        for variant in [Variant::Bech32, Variant::Bech32bis] {
            let checksum = create_checksum("tx", &data, variant);
            let mut full = data.to_vec();
            full.extend_from_slice(&checksum);
            assert!(verify_checksum("tx", &full, variant));
        }
    }

    #[test]
    fn checksum_does_not_verify_under_other_variant() {
        let data = [3u8, 0, 0, 0, 0, 0, 0, 0, 0];
        let checksum = create_checksum("tx", &data, Variant::Bech32);
        let mut full = data.to_vec();
        full.extend_from_slice(&checksum);
        assert!(!verify_checksum("tx", &full, Variant::Bech32bis));
    }

    #[test]
    fn checksum_symbols_are_five_bit() {
        let checksum = create_checksum("bc", &[0, 1, 2, 3], Variant::Bech32);
        assert!(checksum.iter().all(|&s| s < 32));
    }

    #[test]
    fn checksum_is_deterministic() {
        let data = [1u8, 2, 3, 4, 5];
        assert_eq!(
            create_checksum("tb", &data, Variant::Bech32),
            create_checksum("tb", &data, Variant::Bech32)
        );
    }
}
