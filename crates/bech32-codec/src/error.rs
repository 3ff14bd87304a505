use thiserror::Error;

/// Bech32 string decoding errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Bech32Error {
    #[error("checksum verification failed")]
    ChecksumMismatch,

    #[error("character '{0}' is not in the bech32 alphabet")]
    InvalidCharacter(char),

    #[error("string mixes uppercase and lowercase characters")]
    MixedCase,

    #[error("string has no '1' separator")]
    NoSeparator,

    #[error("character {0:?} is outside the printable ascii range")]
    NonPrintableCharacter(char),

    #[error("string is {0} characters long, limit is 90")]
    OversizedInput(usize),

    #[error("human-readable part is empty")]
    UndersizedHrp,
}

/// Segwit address codec errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SegwitError {
    #[error("bech32 decoding failed: {0}")]
    Bech32(#[from] Bech32Error),

    #[error("expected human-readable part '{expected}', found '{found}'")]
    HrpMismatch { expected: String, found: String },

    #[error("payload too short to carry a witness version")]
    ChecksumSizeTooLow,

    #[error("witness version {0} is not supported")]
    SegwitVersionNotSupported(u8),

    #[error("bit-group conversion overflowed or left non-zero padding")]
    BitsConversionFailed,

    #[error("witness program is {0} bytes, expected 2 to 40")]
    DataSizeMismatch(usize),

    #[error("version 0 witness program is {0} bytes, expected 20 or 32")]
    SegwitV0ProgramSizeMismatch(usize),

    #[error("re-decoding the encoded address did not reproduce the input")]
    RoundTripMismatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_checksum_mismatch() {
        assert_eq!(
            Bech32Error::ChecksumMismatch.to_string(),
            "checksum verification failed"
        );
    }

    #[test]
    fn display_invalid_character() {
        let err = Bech32Error::InvalidCharacter('b');
        assert_eq!(err.to_string(), "character 'b' is not in the bech32 alphabet");
    }

    #[test]
    fn display_oversized_input() {
        let err = Bech32Error::OversizedInput(91);
        assert_eq!(err.to_string(), "string is 91 characters long, limit is 90");
    }

    #[test]
    fn display_hrp_mismatch() {
        let err = SegwitError::HrpMismatch {
            expected: "bc".into(),
            found: "tb".into(),
        };
        assert_eq!(
            err.to_string(),
            "expected human-readable part 'bc', found 'tb'"
        );
    }

    #[test]
    fn display_v0_program_size() {
        let err = SegwitError::SegwitV0ProgramSizeMismatch(25);
        assert_eq!(
            err.to_string(),
            "version 0 witness program is 25 bytes, expected 20 or 32"
        );
    }

    #[test]
    fn bech32_error_converts_into_segwit_error() {
        let err: SegwitError = Bech32Error::MixedCase.into();
        assert_eq!(err, SegwitError::Bech32(Bech32Error::MixedCase));
    }
}
