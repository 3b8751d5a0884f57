use crate::state::*;

#[derive(PartialEq, Eq, Hash, Copy, Clone, Default, Debug)]
pub struct Origin {
    pub isnfetch: bool
}

impl Origin {
    pub const DATA: Origin = Origin{isnfetch: false};
    pub const ISNFETCH: Origin = Origin{isnfetch: true};
}

pub trait CacheRP: Clone + std::fmt::Debug {
    fn evictim(&self, set: &CacheSet) -> usize;
    fn touch(&self, set: &mut CacheSet, way: usize);
    fn place(&self, set: &mut CacheSet, way: usize, tag: Tag);
    fn invalidate(&self, set: &mut CacheSet, way: usize);

    /// Install `tag` over the victim; returns the way and the tag it displaced, if valid.
    fn fill(&self, set: &mut CacheSet, tag: Tag) -> (usize, Option<Tag>) {
        let way = self.evictim(set);
        let old = if set.is_valid(way) { Some(set.lines()[way].tag) } else { None };
        self.place(set, way, tag);
        (way, old)
    }
    fn lookup(&self, set: &mut CacheSet, tag: Tag) -> Option<usize> {
        let way = set.find_line(tag)?;
        self.touch(set, way);
        Some(way)
    }
}


/// Strict recency stack: rank 0 is the MRU way, the sentinel sorts as stalest.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Default, Debug)]
pub struct Lru;

impl Lru {
    fn promote(set: &mut CacheSet, way: usize) {
        let old = set.lines()[way].rank;
        for l in set.lines_mut().iter_mut() {
            if l.rank < old {
                l.rank += 1;
            }
        }
        set.lines_mut()[way].rank = 0;
    }
}

impl CacheRP for Lru {
    fn evictim(&self, set: &CacheSet) -> usize {
        set.select_victim()
    }
    fn touch(&self, set: &mut CacheSet, way: usize) {
        Self::promote(set, way);
    }
    fn place(&self, set: &mut CacheSet, way: usize, tag: Tag) {
        Self::promote(set, way);
        set.lines_mut()[way].tag = tag;
    }
    fn invalidate(&self, set: &mut CacheSet, way: usize) {
        let sentinel = set.sentinel();
        let old = set.lines()[way].rank;
        if old >= sentinel {
            return;
        }
        for l in set.lines_mut().iter_mut() {
            if l.rank > old && l.rank < sentinel {
                l.rank -= 1;
            }
        }
        set.lines_mut()[way].rank = sentinel;
    }
}
