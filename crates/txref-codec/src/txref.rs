use serde::Serialize;

use bech32_codec::{Variant, CHARSET};

use crate::bits::{BitReader, BitWriter};
use crate::error::TxRefError;
use crate::network::Network;

/// Magic code: mainnet, no outpoint.
const MAGIC_MAINNET: u8 = 0x3;
/// Magic code: mainnet, with outpoint.
const MAGIC_MAINNET_OUTPOINT: u8 = 0x4;
/// Magic code: testnet, no outpoint.
const MAGIC_TESTNET: u8 = 0x6;
/// Magic code: testnet, with outpoint.
const MAGIC_TESTNET_OUTPOINT: u8 = 0x7;

/// Highest encodable block height (24 bits).
pub const MAX_BLOCK_HEIGHT: u32 = 0xff_ffff;
/// Highest encodable transaction index (15 bits).
pub const MAX_TX_INDEX: u16 = 0x7fff;
/// Highest encodable output index (15 bits).
pub const MAX_OUT_INDEX: u16 = 0x7fff;

/// Payload length in 5-bit groups without an outpoint (45 bits).
const PAYLOAD_GROUPS: usize = 9;
/// Payload length in 5-bit groups with an outpoint (60 bits).
const PAYLOAD_GROUPS_OUTPOINT: usize = 12;

const MAGIC_BITS: u32 = 5;
const VERSION_BITS: u32 = 1;
const BLOCK_HEIGHT_BITS: u32 = 24;
const TX_INDEX_BITS: u32 = 15;
const OUT_INDEX_BITS: u32 = 15;

/// Characters per dash-separated group in the human format.
const HUMAN_GROUP: usize = 4;

/// A validated transaction reference (BIP-136).
///
/// `out_index` of zero means "no outpoint": the reference names a whole
/// transaction rather than one of its outputs, and encodes to the short
/// 9-group payload. The outpoint form with a zero index is reserved,
/// since it would be indistinguishable in intent from the short form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TxRef {
    network: Network,
    block_height: u32,
    tx_index: u16,
    out_index: u16,
}

impl TxRef {
    /// Build a TxRef, rejecting fields that do not fit their bit widths.
    /// Out-of-range values are an input error here, never silently masked
    /// by the packer.
    pub fn new(
        network: Network,
        block_height: u32,
        tx_index: u16,
        out_index: u16,
    ) -> Result<Self, TxRefError> {
        if block_height > MAX_BLOCK_HEIGHT {
            return Err(TxRefError::BlockHeightOutOfRange(block_height));
        }
        if tx_index > MAX_TX_INDEX {
            return Err(TxRefError::TxIndexOutOfRange(tx_index));
        }
        if out_index > MAX_OUT_INDEX {
            return Err(TxRefError::OutIndexOutOfRange(out_index));
        }
        Ok(TxRef {
            network,
            block_height,
            tx_index,
            out_index,
        })
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn block_height(&self) -> u32 {
        self.block_height
    }

    pub fn tx_index(&self) -> u16 {
        self.tx_index
    }

    /// Output index; zero means the reference carries no outpoint.
    pub fn out_index(&self) -> u16 {
        self.out_index
    }

    pub fn has_outpoint(&self) -> bool {
        self.out_index > 0
    }

    fn magic(&self) -> u8 {
        match (self.network, self.has_outpoint()) {
            (Network::Mainnet, false) => MAGIC_MAINNET,
            (Network::Mainnet, true) => MAGIC_MAINNET_OUTPOINT,
            (Network::Testnet, false) => MAGIC_TESTNET,
            (Network::Testnet, true) => MAGIC_TESTNET_OUTPOINT,
        }
    }

    /// Encode to the human format, e.g. `tx1:rjk0-uqay-zsrw-hqe`.
    ///
    /// Steps:
    /// 1. pack magic, version 0, block height, tx index and (if present)
    ///    out index, each LSB-first, into 5-bit groups
    /// 2. Bech32-encode under the network HRP and the given variant
    /// 3. insert a colon after the `hrp1` prefix and a dash every four
    ///    payload characters
    pub fn encode(&self, variant: Variant) -> String {
        let mut writer = BitWriter::new();
        writer.push_field(MAGIC_BITS, u32::from(self.magic()));
        writer.push_field(VERSION_BITS, 0);
        writer.push_field(BLOCK_HEIGHT_BITS, self.block_height);
        writer.push_field(TX_INDEX_BITS, u32::from(self.tx_index));
        if self.has_outpoint() {
            writer.push_field(OUT_INDEX_BITS, u32::from(self.out_index));
        }

        let hrp = self.network.hrp();
        let encoded = bech32_codec::encode(hrp, &writer.finish(), variant);
        format_human(hrp, &encoded)
    }

    /// Decode from the human format, tolerating case and any inserted
    /// punctuation or whitespace after the HRP prefix.
    pub fn decode(encoded: &str, variant: Variant) -> Result<Self, TxRefError> {
        let lowered = encoded.to_ascii_lowercase();
        // "txtest" first: "tx" is its prefix.
        let (network, rest) = if let Some(rest) = lowered.strip_prefix("txtest1") {
            (Network::Testnet, rest)
        } else if let Some(rest) = lowered.strip_prefix("tx1") {
            (Network::Mainnet, rest)
        } else {
            return Err(TxRefError::UnknownHumanReadablePart);
        };

        let mut cleaned = String::with_capacity(lowered.len());
        cleaned.push_str(network.hrp());
        cleaned.push('1');
        cleaned.extend(rest.chars().filter(|&c| CHARSET.contains(c)));

        let (_, payload) = bech32_codec::decode(&cleaned, variant)?;

        if payload.len() != PAYLOAD_GROUPS && payload.len() != PAYLOAD_GROUPS_OUTPOINT {
            return Err(TxRefError::InvalidLength(payload.len()));
        }

        let mut reader = BitReader::new(&payload);
        let underflow = TxRefError::InvalidLength(payload.len());

        let magic = reader.read_field(MAGIC_BITS).ok_or_else(|| underflow.clone())? as u8;
        let (implied_network, has_outpoint) = match magic {
            MAGIC_MAINNET => (Network::Mainnet, false),
            MAGIC_MAINNET_OUTPOINT => (Network::Mainnet, true),
            MAGIC_TESTNET => (Network::Testnet, false),
            MAGIC_TESTNET_OUTPOINT => (Network::Testnet, true),
            unknown => return Err(TxRefError::UnknownMagicCode(unknown)),
        };
        if implied_network != network {
            return Err(TxRefError::ChainMismatch);
        }

        let expected_groups = if has_outpoint {
            PAYLOAD_GROUPS_OUTPOINT
        } else {
            PAYLOAD_GROUPS
        };
        if payload.len() != expected_groups {
            return Err(TxRefError::InvalidLength(payload.len()));
        }

        let version = reader.read_field(VERSION_BITS).ok_or_else(|| underflow.clone())?;
        if version != 0 {
            return Err(TxRefError::UnknownVersion(version as u8));
        }

        let block_height = reader
            .read_field(BLOCK_HEIGHT_BITS)
            .ok_or_else(|| underflow.clone())?;
        let tx_index = reader.read_field(TX_INDEX_BITS).ok_or_else(|| underflow.clone())? as u16;
        let out_index = if has_outpoint {
            let out = reader.read_field(OUT_INDEX_BITS).ok_or(underflow)? as u16;
            if out == 0 {
                return Err(TxRefError::ZeroOutIndex);
            }
            out
        } else {
            0
        };

        // Field widths guarantee the ranges, so this cannot fail.
        TxRef::new(network, block_height, tx_index, out_index)
    }
}

/// Dash-group the payload characters of a bech32 string and insert a
/// colon after the `hrp1` prefix.
fn format_human(hrp: &str, encoded: &str) -> String {
    let body = &encoded[hrp.len() + 1..];
    let mut out = String::with_capacity(encoded.len() + 1 + body.len() / HUMAN_GROUP);
    out.push_str(hrp);
    out.push('1');
    out.push(':');
    for (i, c) in body.chars().enumerate() {
        if i > 0 && i % HUMAN_GROUP == 0 {
            out.push('-');
        }
        out.push(c);
    }
    out
}
