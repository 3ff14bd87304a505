use crate::checksum::{self, Variant};
use crate::error::Bech32Error;

/// The 32-symbol Bech32 alphabet. Excludes '1', 'b', 'i' and 'o'.
pub const CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Separator between the human-readable part and the data part.
pub const SEPARATOR: char = '1';

/// Maximum total length of a Bech32 string.
pub const MAX_LENGTH: usize = 90;

/// Number of checksum symbols at the end of the data part.
pub const CHECKSUM_LENGTH: usize = 6;

fn charset_index(c: char) -> Option<u8> {
    CHARSET.bytes().position(|b| b == c as u8).map(|i| i as u8)
}

/// Encode an HRP and 5-bit payload as a checksummed Bech32 string.
///
/// The HRP is expected in lowercase and every payload value below 32;
/// both hold for all callers in this workspace, so encoding never fails.
/// Output is always lowercase.
pub fn encode(hrp: &str, data: &[u8], variant: Variant) -> String {
    let checksum = checksum::create_checksum(hrp, data, variant);
    let mut encoded = String::with_capacity(hrp.len() + 1 + data.len() + CHECKSUM_LENGTH);
    encoded.push_str(hrp);
    encoded.push(SEPARATOR);
    for &value in data.iter().chain(checksum.iter()) {
        debug_assert!(value < 32, "payload value {value} is not a 5-bit group");
        encoded.push(CHARSET.as_bytes()[usize::from(value & 31)] as char);
    }
    encoded
}

/// Decode a Bech32 string into its HRP and 5-bit payload (checksum
/// symbols removed).
///
/// Validation order, most structural first:
/// 1. total length at most 90
/// 2. printable ASCII only
/// 3. uniformly lower- or upper-case (then normalized to lowercase)
/// 4. a '1' separator with a non-empty HRP before it
/// 5. data characters drawn from the alphabet
/// 6. checksum verifies under `variant`
pub fn decode(encoded: &str, variant: Variant) -> Result<(String, Vec<u8>), Bech32Error> {
    if encoded.len() > MAX_LENGTH {
        return Err(Bech32Error::OversizedInput(encoded.len()));
    }

    let mut has_lower = false;
    let mut has_upper = false;
    for c in encoded.chars() {
        if !('\x21'..='\x7e').contains(&c) {
            return Err(Bech32Error::NonPrintableCharacter(c));
        }
        has_lower |= c.is_ascii_lowercase();
        has_upper |= c.is_ascii_uppercase();
    }
    if has_lower && has_upper {
        return Err(Bech32Error::MixedCase);
    }
    let lowered = encoded.to_ascii_lowercase();

    let separator = lowered.rfind(SEPARATOR).ok_or(Bech32Error::NoSeparator)?;
    if separator == 0 {
        return Err(Bech32Error::UndersizedHrp);
    }
    let hrp = &lowered[..separator];

    let mut data = Vec::with_capacity(lowered.len() - separator - 1);
    for c in lowered[separator + 1..].chars() {
        data.push(charset_index(c).ok_or(Bech32Error::InvalidCharacter(c))?);
    }

    if data.len() < CHECKSUM_LENGTH || !checksum::verify_checksum(hrp, &data, variant) {
        return Err(Bech32Error::ChecksumMismatch);
    }
    data.truncate(data.len() - CHECKSUM_LENGTH);

    Ok((hrp.to_string(), data))
}
