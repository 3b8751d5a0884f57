pub type Addr = u32;
pub type Tag = u32;
pub type Rank = u8;


#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub struct CacheLine {
    pub tag: Tag,
    pub rank: Rank
}

pub trait CacheState {
    type Key: Copy;
    type EntryRank;
    type EntryIter: Iterator<Item = Self::Key>;

    fn rank(&self, key: Self::Key) -> Option<Self::EntryRank>;
    fn contains(&self, key: Self::Key) -> bool {
        self.rank(key).is_some()
    }
    fn entries(&self) -> Self::EntryIter;
}


/// One set of an `assoc`-way cache. A line whose rank equals `assoc` is invalid.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct CacheSet {
    assoc: Rank,
    lines: Vec<CacheLine>
}

impl CacheSet {
    pub fn new(assoc: Rank) -> Self {
        Self{assoc, lines: vec![CacheLine{tag: 0, rank: assoc}; assoc as usize]}
    }

    pub fn assoc(&self) -> Rank {
        self.assoc
    }
    pub fn sentinel(&self) -> Rank {
        self.assoc
    }
    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }
    pub fn lines_mut(&mut self) -> &mut [CacheLine] {
        &mut self.lines
    }
    pub fn is_valid(&self, way: usize) -> bool {
        self.lines[way].rank < self.assoc
    }
    pub fn valid_count(&self) -> usize {
        self.lines.iter().filter(|l| l.rank < self.assoc).count()
    }

    pub fn find_line(&self, tag: Tag) -> Option<usize> {
        self.lines.iter().position(|l| l.rank < self.assoc && l.tag == tag)
    }

    /// Way with the highest rank; the first one wins on ties.
    pub fn select_victim(&self) -> usize {
        let mut pos = 0;
        for (i, l) in self.lines.iter().enumerate() {
            if l.rank > self.lines[pos].rank {
                pos = i;
            }
        }
        pos
    }

    /// Tags of valid lines, most recently used first.
    pub fn by_recency(&self) -> Vec<Tag> {
        let mut v: Vec<&CacheLine> = self.lines.iter().filter(|l| l.rank < self.assoc).collect();
        v.sort_by_key(|l| l.rank);
        v.into_iter().map(|l| l.tag).collect()
    }

    /// Valid ranks form `0..valid_count` with no duplicates.
    pub fn ranks_consistent(&self) -> bool {
        let mut seen = vec![false; self.assoc as usize];
        for l in self.lines.iter() {
            if l.rank > self.assoc {
                return false;
            }
            if l.rank < self.assoc {
                if seen[l.rank as usize] {
                    return false;
                }
                seen[l.rank as usize] = true;
            }
        }
        let n = self.valid_count();
        seen.iter().take(n).all(|&x| x)
    }
}

impl<'a> CacheState for &'a CacheSet {
    type Key = Tag;
    type EntryRank = (Rank, usize);
    type EntryIter = std::vec::IntoIter<Tag>;

    fn rank(&self, tag: Tag) -> Option<Self::EntryRank> {
        self.find_line(tag).map(|i| (self.lines[i].rank, i))
    }
    fn entries(&self) -> Self::EntryIter {
        self.by_recency().into_iter()
    }
}
impl CacheState for CacheSet {
    type Key = Tag;
    type EntryRank = (Rank, usize);
    type EntryIter = std::vec::IntoIter<Tag>;

    fn rank(&self, tag: Tag) -> Option<Self::EntryRank> {
        (&self).rank(tag)
    }
    fn entries(&self) -> Self::EntryIter {
        (&self).entries()
    }
}
