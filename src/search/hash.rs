use crate::board::BitBoard;

/// Number of independent sub-tables in the transposition table.
pub const DEFAULT_BUCKETS: usize = 1_000;

/// Two-level table address: sub-table index plus key within it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TtKey {
    pub bucket: usize,
    pub key: u64,
}

// Both hashes are plain integer mixes of the bit-sets and flags. They are not
// collision free and lookups do not verify the stored position.

pub fn bucket_hash(bits: &BitBoard, buckets: usize) -> usize {
    let mut out = bits
        .red
        .wrapping_add(bits.king << 1)
        .wrapping_add(bits.exists.wrapping_mul(419).wrapping_add(1));
    if bits.forced.is_some() { out = out.wrapping_add(117); }
    if bits.red_to_move {
        out = out.wrapping_add(419);
        out /= 3;
    }
    (out % buckets.max(1) as u64) as usize
}

pub fn entry_hash(bits: &BitBoard) -> u64 {
    let mut out = bits
        .king
        .wrapping_add(bits.red << 1)
        .wrapping_add(bits.exists.wrapping_mul(143).wrapping_add(1));
    if bits.forced.is_some() { out = out.wrapping_add(147); }
    if bits.red_to_move {
        out = out.wrapping_add(143);
        out /= 5;
    }
    out
}

pub fn compute(bits: &BitBoard, buckets: usize) -> TtKey {
    TtKey { bucket: bucket_hash(bits, buckets), key: entry_hash(bits) }
}
