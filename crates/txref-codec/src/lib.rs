//! # txref-codec
//!
//! BIP-136 transaction references: a checksum-protected, human-typable
//! encoding of (network, block height, transaction index, output index).
//! Checksum and alphabet work is delegated to `bech32-codec`; this crate
//! adds the LSB-first field packing and the human formatting layer.

pub mod bits;
pub mod error;
pub mod network;
pub mod txref;

pub use bech32_codec::Variant;
pub use error::TxRefError;
pub use network::Network;
pub use txref::TxRef;
