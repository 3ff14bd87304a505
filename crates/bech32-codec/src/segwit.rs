use serde::Serialize;

use crate::checksum::Variant;
use crate::codec;
use crate::error::SegwitError;

/// Lowest allowed witness program length in bytes.
pub const MIN_PROGRAM_LENGTH: usize = 2;

/// Highest allowed witness program length in bytes.
pub const MAX_PROGRAM_LENGTH: usize = 40;

/// Highest defined witness version.
pub const MAX_WITNESS_VERSION: u8 = 16;

/// A validated segregated-witness address: witness version plus program.
///
/// Instances only exist through [`SegwitAddress::new`] or
/// [`decode`], so version and program length invariants always hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegwitAddress {
    version: u8,
    program: Vec<u8>,
}

impl SegwitAddress {
    /// Build an address, enforcing the BIP-173 rules: version 0-16,
    /// program 2-40 bytes, and exactly 20 or 32 bytes for version 0.
    pub fn new(version: u8, program: Vec<u8>) -> Result<Self, SegwitError> {
        if version > MAX_WITNESS_VERSION {
            return Err(SegwitError::SegwitVersionNotSupported(version));
        }
        if !(MIN_PROGRAM_LENGTH..=MAX_PROGRAM_LENGTH).contains(&program.len()) {
            return Err(SegwitError::DataSizeMismatch(program.len()));
        }
        if version == 0 && program.len() != 20 && program.len() != 32 {
            return Err(SegwitError::SegwitV0ProgramSizeMismatch(program.len()));
        }
        Ok(SegwitAddress { version, program })
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn program(&self) -> &[u8] {
        &self.program
    }
}

/// Regroup a big-endian bit stream from `from`-bit units into `to`-bit
/// units.
///
/// With `pad` set (encoding) a final partial group is zero-padded and
/// kept. Without it (decoding) the conversion must land exactly: leftover
/// input of a full unit or more, or non-zero padding bits, mean the string
/// was not produced by a canonical encoder and are rejected.
///
/// This is deliberately a separate routine from the LSB-first field packer
/// used by TxRef payloads; the two bit orderings are incompatible.
pub fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Result<Vec<u8>, SegwitError> {
    debug_assert!(from <= 8 && to <= 8, "group widths above 8 bits are unused here");
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let maxv: u32 = (1 << to) - 1;
    let mut out = Vec::with_capacity((data.len() * from as usize) / to as usize + 1);

    for &value in data {
        let v = u32::from(value);
        if v >> from != 0 {
            return Err(SegwitError::BitsConversionFailed);
        }
        acc = (acc << from) | v;
        bits += from;
        while bits >= to {
            bits -= to;
            out.push(((acc >> bits) & maxv) as u8);
        }
    }

    if pad {
        if bits > 0 {
            out.push(((acc << (to - bits)) & maxv) as u8);
        }
    } else if bits >= from || ((acc << (to - bits)) & maxv) != 0 {
        return Err(SegwitError::BitsConversionFailed);
    }

    Ok(out)
}

/// Decode a segwit address against an expected HRP.
pub fn decode(hrp: &str, address: &str) -> Result<SegwitAddress, SegwitError> {
    let expected = hrp.to_ascii_lowercase();
    let (found, data) = codec::decode(address, Variant::Bech32)?;
    if found != expected {
        return Err(SegwitError::HrpMismatch { expected, found });
    }

    let Some((&version, payload)) = data.split_first() else {
        return Err(SegwitError::ChecksumSizeTooLow);
    };
    if version > MAX_WITNESS_VERSION {
        return Err(SegwitError::SegwitVersionNotSupported(version));
    }

    let program = convert_bits(payload, 5, 8, false)?;
    if !(MIN_PROGRAM_LENGTH..=MAX_PROGRAM_LENGTH).contains(&program.len()) {
        return Err(SegwitError::DataSizeMismatch(program.len()));
    }
    if version == 0 && program.len() != 20 && program.len() != 32 {
        return Err(SegwitError::SegwitV0ProgramSizeMismatch(program.len()));
    }

    Ok(SegwitAddress { version, program })
}

/// Encode a segwit address under the given HRP.
///
/// The result is decoded again and compared with the input before being
/// returned. For an address built through [`SegwitAddress::new`] that
/// check cannot fail; a [`SegwitError::RoundTripMismatch`] here indicates
/// a codec bug, not bad user input.
pub fn encode(hrp: &str, address: &SegwitAddress) -> Result<String, SegwitError> {
    let hrp = hrp.to_ascii_lowercase();
    let mut data = Vec::with_capacity(1 + (address.program.len() * 8).div_ceil(5));
    data.push(address.version);
    data.extend(convert_bits(&address.program, 8, 5, true)?);

    let encoded = codec::encode(&hrp, &data, Variant::Bech32);

    let verified = decode(&hrp, &encoded)?;
    if verified != *address {
        return Err(SegwitError::RoundTripMismatch);
    }
    Ok(encoded)
}
