//! # bech32-codec
//!
//! Pure-Rust Bech32 (BIP-173) checksum codec and segregated-witness
//! address encoding. No native calls, no I/O: every operation is a
//! deterministic function of its input.

pub mod checksum;
pub mod codec;
pub mod error;
pub mod segwit;

pub use checksum::Variant;
pub use codec::{decode, encode, CHARSET};
pub use error::{Bech32Error, SegwitError};
pub use segwit::SegwitAddress;
