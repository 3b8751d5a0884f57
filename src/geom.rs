use crate::state::{Addr, Tag};

/// Smallest `b` such that `2^b >= n`; 0 and 1 both give 0.
pub const fn log2_ceil(n: u32) -> u32 {
    if n <= 1 {
        0
    } else {
        32 - (n - 1).leading_zeros()
    }
}

/// Address slicing for one cache level.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub struct Geometry {
    pub num_sets: u32,
    pub index_bits: u32,
    pub offset_bits: u32,
}

impl Geometry {
    pub const fn new(num_sets: u32, blocksize: u32) -> Self {
        Geometry {
            num_sets,
            index_bits: log2_ceil(num_sets),
            offset_bits: log2_ceil(blocksize),
        }
    }

    pub fn tag(&self, addr: Addr) -> Tag {
        addr.checked_shr(self.index_bits + self.offset_bits).unwrap_or(0)
    }

    pub fn index(&self, addr: Addr) -> usize {
        (addr.checked_shr(self.offset_bits).unwrap_or(0) & self.num_sets.wrapping_sub(1)) as usize
    }

    pub fn split(&self, addr: Addr) -> (Tag, usize) {
        (self.tag(addr), self.index(addr))
    }

    /// Block address of the line holding `tag` in set `index`; offset bits are zero.
    pub fn block_addr(&self, tag: Tag, index: usize) -> Addr {
        let hi = tag.checked_shl(self.index_bits + self.offset_bits).unwrap_or(0);
        let lo = (index as Addr).checked_shl(self.offset_bits).unwrap_or(0);
        hi | lo
    }

    pub fn same_block(&self, a: Addr, b: Addr) -> bool {
        a.checked_shr(self.offset_bits).unwrap_or(0) == b.checked_shr(self.offset_bits).unwrap_or(0)
    }
}
