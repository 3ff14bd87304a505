//! Bit-level access to a buffer of 5-bit groups.
//!
//! TxRef payloads pack each field least-significant bit first, with bit
//! position `n` landing in bit `n % 5` of group `n / 5`. This ordering is
//! specific to TxRef; the big-endian 8-to-5 regrouping used for witness
//! programs lives in `bech32_codec::segwit::convert_bits` and must not be
//! confused with it.

const GROUP_BITS: usize = 5;

/// Write-only bit aggregator producing 5-bit groups.
#[derive(Debug, Default)]
pub struct BitWriter {
    groups: Vec<u8>,
    cursor: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        BitWriter::default()
    }

    /// Append a single bit, growing the buffer by a zero group whenever
    /// the current one is full.
    pub fn push_bit(&mut self, bit: bool) {
        if self.cursor % GROUP_BITS == 0 {
            self.groups.push(0);
        }
        if bit {
            self.groups[self.cursor / GROUP_BITS] |= 1 << (self.cursor % GROUP_BITS);
        }
        self.cursor += 1;
    }

    /// Append the low `width` bits of `value`, least-significant first.
    pub fn push_field(&mut self, width: u32, value: u32) {
        debug_assert!(width <= 32);
        for i in 0..width {
            self.push_bit((value >> i) & 1 == 1);
        }
    }

    /// Number of bits written so far.
    pub fn bit_len(&self) -> usize {
        self.cursor
    }

    /// Consume the writer and return the groups. Unused bits of the last
    /// group are zero.
    pub fn finish(self) -> Vec<u8> {
        self.groups
    }
}

/// Read-only bit enumerator over 5-bit groups, mirroring [`BitWriter`].
#[derive(Debug)]
pub struct BitReader<'a> {
    groups: &'a [u8],
    cursor: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(groups: &'a [u8]) -> Self {
        BitReader { groups, cursor: 0 }
    }

    /// Read one bit; `None` once the buffer is exhausted.
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.cursor >= self.groups.len() * GROUP_BITS {
            return None;
        }
        let bit = (self.groups[self.cursor / GROUP_BITS] >> (self.cursor % GROUP_BITS)) & 1 == 1;
        self.cursor += 1;
        Some(bit)
    }

    /// Read a `width`-bit field, least-significant bit first. `None` if
    /// the buffer runs out before `width` bits are consumed.
    pub fn read_field(&mut self, width: u32) -> Option<u32> {
        debug_assert!(width <= 32);
        let mut value = 0u32;
        for i in 0..width {
            if self.read_bit()? {
                value |= 1 << i;
            }
        }
        Some(value)
    }

    /// Bits left to read.
    pub fn remaining(&self) -> usize {
        self.groups.len() * GROUP_BITS - self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_field_fills_one_group() {
        let mut writer = BitWriter::new();
        writer.push_field(5, 3);
        assert_eq!(writer.finish(), vec![3]);
    }

    #[test]
    fn fields_pack_lsb_first_across_group_boundaries() {
        // magic 3, version 0, then four set height bits: matches the
        // leading groups of a real payload for block height 0xFFFFFF.
        let mut writer = BitWriter::new();
        writer.push_field(5, 3);
        writer.push_field(1, 0);
        writer.push_field(4, 0b1111);
        assert_eq!(writer.finish(), vec![3, 0b11110]);
    }

    #[test]
    fn bit_len_tracks_writes() {
        let mut writer = BitWriter::new();
        assert_eq!(writer.bit_len(), 0);
        writer.push_field(24, 0);
        assert_eq!(writer.bit_len(), 24);
    }

    #[test]
    fn reader_mirrors_writer() {
        let mut writer = BitWriter::new();
        writer.push_field(5, 3);
        writer.push_field(1, 0);
        writer.push_field(24, 466_793);
        writer.push_field(15, 2205);
        let groups = writer.finish();
        assert_eq!(groups.len(), 9);

        let mut reader = BitReader::new(&groups);
        assert_eq!(reader.read_field(5), Some(3));
        assert_eq!(reader.read_field(1), Some(0));
        assert_eq!(reader.read_field(24), Some(466_793));
        assert_eq!(reader.read_field(15), Some(2205));
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn reader_underflow_is_none() {
        let groups = [0u8; 2];
        let mut reader = BitReader::new(&groups);
        assert_eq!(reader.read_field(10), Some(0));
        assert_eq!(reader.read_bit(), None);
        assert_eq!(reader.read_field(1), None);
    }

    #[test]
    fn partial_field_consumes_nothing_usable_on_underflow() {
        let groups = [0b11111u8];
        let mut reader = BitReader::new(&groups);
        assert_eq!(reader.read_field(6), None);
    }

    #[test]
    fn max_values_round_trip() {
        let mut writer = BitWriter::new();
        writer.push_field(24, 0xff_ffff);
        writer.push_field(15, 0x7fff);
        writer.push_field(15, 0x7fff);
        let groups = writer.finish();
        let mut reader = BitReader::new(&groups);
        assert_eq!(reader.read_field(24), Some(0xff_ffff));
        assert_eq!(reader.read_field(15), Some(0x7fff));
        assert_eq!(reader.read_field(15), Some(0x7fff));
    }
}
