use bech32_codec::Bech32Error;
use thiserror::Error;

/// TxRef construction and codec errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TxRefError {
    #[error("bech32 decoding failed: {0}")]
    Bech32(#[from] Bech32Error),

    #[error("block height {0} exceeds the 24-bit maximum")]
    BlockHeightOutOfRange(u32),

    #[error("transaction index {0} exceeds the 15-bit maximum")]
    TxIndexOutOfRange(u16),

    #[error("output index {0} exceeds the 15-bit maximum")]
    OutIndexOutOfRange(u16),

    #[error("string does not start with a known human-readable part")]
    UnknownHumanReadablePart,

    #[error("payload is {0} five-bit groups, expected 9 or 12")]
    InvalidLength(usize),

    #[error("magic code {0} is not recognized")]
    UnknownMagicCode(u8),

    #[error("magic code names a different network than the human-readable part")]
    ChainMismatch,

    #[error("version field is {0}, expected 0")]
    UnknownVersion(u8),

    #[error("outpoint-present form carries a zero output index")]
    ZeroOutIndex,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_block_height_out_of_range() {
        let err = TxRefError::BlockHeightOutOfRange(0x0100_0000);
        assert_eq!(
            err.to_string(),
            "block height 16777216 exceeds the 24-bit maximum"
        );
    }

    #[test]
    fn display_invalid_length() {
        assert_eq!(
            TxRefError::InvalidLength(10).to_string(),
            "payload is 10 five-bit groups, expected 9 or 12"
        );
    }

    #[test]
    fn display_zero_out_index() {
        assert_eq!(
            TxRefError::ZeroOutIndex.to_string(),
            "outpoint-present form carries a zero output index"
        );
    }

    #[test]
    fn bech32_error_converts_into_txref_error() {
        let err: TxRefError = Bech32Error::ChecksumMismatch.into();
        assert_eq!(err, TxRefError::Bech32(Bech32Error::ChecksumMismatch));
    }
}
