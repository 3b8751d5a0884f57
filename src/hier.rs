use log::{debug, trace};

use crate::config::{HierConfig, LevelConfig};
use crate::geom::Geometry;
use crate::policy::*;
use crate::state::*;

#[derive(PartialEq, Eq, Hash, Copy, Clone, Default, Debug)]
pub struct LevelStats {
    pub refs: u64,
    pub misses: u64,
    pub penalties: u64
}

impl LevelStats {
    pub fn hits(&self) -> u64 {
        self.refs - self.misses
    }
}

/// One cache level. No sets means the level is bypassed.
#[derive(Clone, Debug)]
pub struct CacheLevel {
    name: &'static str,
    geom: Geometry,
    assoc: Rank,
    hit_time: u32,
    sets: Vec<CacheSet>,
    stats: LevelStats
}

impl CacheLevel {
    pub fn new(name: &'static str, cfg: &LevelConfig, blocksize: u32) -> Self {
        let assoc = cfg.assoc as Rank;
        let sets = if cfg.sets > 0 {
            (0..cfg.sets).map(|_| CacheSet::new(assoc)).collect()
        } else {
            Vec::new()
        };
        Self{
            name,
            geom: Geometry::new(cfg.sets, blocksize),
            assoc,
            hit_time: cfg.hit_time,
            sets,
            stats: Default::default()
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
    pub fn is_enabled(&self) -> bool {
        !self.sets.is_empty()
    }
    pub fn geometry(&self) -> &Geometry {
        &self.geom
    }
    pub fn assoc(&self) -> Rank {
        self.assoc
    }
    pub fn hit_time(&self) -> u32 {
        self.hit_time
    }
    pub fn sets(&self) -> &[CacheSet] {
        &self.sets
    }
    pub fn stats(&self) -> Option<&LevelStats> {
        if self.is_enabled() { Some(&self.stats) } else { None }
    }

    pub fn set_of(&self, addr: Addr) -> Option<&CacheSet> {
        self.sets.get(self.geom.index(addr))
    }

    /// Reference and LRU-promote `addr`; `true` on a hit.
    fn lookup<RP: CacheRP>(&mut self, rp: &RP, addr: Addr) -> bool {
        let (tag, idx) = self.geom.split(addr);
        self.stats.refs += 1;
        match rp.lookup(&mut self.sets[idx], tag) {
            Some(way) => {
                trace!("{} hit {:#010x} set {} way {}", self.name, addr, idx, way);
                true
            }
            None => {
                trace!("{} miss {:#010x} set {}", self.name, addr, idx);
                false
            }
        }
    }

    /// Install `addr` after a miss costing `penalty`; returns the displaced block address.
    fn fill<RP: CacheRP>(&mut self, rp: &RP, addr: Addr, penalty: u32) -> Option<Addr> {
        let (tag, idx) = self.geom.split(addr);
        let (way, old) = rp.fill(&mut self.sets[idx], tag);
        self.stats.misses += 1;
        self.stats.penalties += penalty as u64;
        let evicted = old.map(|t| self.geom.block_addr(t, idx));
        if let Some(ev) = evicted {
            trace!("{} set {} way {} evicts {:#010x}", self.name, idx, way, ev);
        }
        evicted
    }

    fn invalidate<RP: CacheRP>(&mut self, rp: &RP, addr: Addr) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let (tag, idx) = self.geom.split(addr);
        let set = &mut self.sets[idx];
        match set.find_line(tag) {
            Some(way) => {
                rp.invalidate(set, way);
                trace!("{} invalidated {:#010x} set {} way {}", self.name, addr, idx, way);
                true
            }
            None => false
        }
    }

    fn reset(&mut self) {
        for set in self.sets.iter_mut() {
            *set = CacheSet::new(self.assoc);
        }
        self.stats = Default::default();
    }
}

impl<'a> CacheState for &'a CacheLevel {
    type Key = Addr;
    type EntryRank = (usize, Rank, usize);
    type EntryIter = std::vec::IntoIter<Addr>;

    fn rank(&self, addr: Addr) -> Option<Self::EntryRank> {
        let (tag, idx) = self.geom.split(addr);
        let set = self.sets.get(idx)?;
        set.rank(tag).map(|(rank, way)| (idx, rank, way))
    }
    fn entries(&self) -> Self::EntryIter {
        let geom = self.geom;
        self.sets.iter().enumerate()
            .flat_map(|(idx, set)| set.entries().map(move |t| geom.block_addr(t, idx)))
            .collect::<Vec<_>>()
            .into_iter()
    }
}
impl CacheState for CacheLevel {
    type Key = Addr;
    type EntryRank = (usize, Rank, usize);
    type EntryIter = std::vec::IntoIter<Addr>;

    fn rank(&self, addr: Addr) -> Option<Self::EntryRank> {
        (&self).rank(addr)
    }
    fn entries(&self) -> Self::EntryIter {
        (&self).entries()
    }
}


/// Split I$/D$ over a unified L2 over main memory.
#[derive(Clone, Debug)]
pub struct Hierarchy<RP: CacheRP = Lru> {
    rp: RP,
    icache: CacheLevel,
    dcache: CacheLevel,
    l2: CacheLevel,
    blocksize: u32,
    memspeed: u32,
    inclusive: bool
}

impl Hierarchy<Lru> {
    pub fn new(cfg: &HierConfig) -> Self {
        Self::with_policy(cfg, Lru)
    }
}

impl<RP: CacheRP> Hierarchy<RP> {
    pub fn with_policy(cfg: &HierConfig, rp: RP) -> Self {
        let h = Hierarchy {
            rp,
            icache: CacheLevel::new("I$", &cfg.icache, cfg.blocksize),
            dcache: CacheLevel::new("D$", &cfg.dcache, cfg.blocksize),
            l2: CacheLevel::new("L2$", &cfg.l2, cfg.blocksize),
            blocksize: cfg.blocksize,
            memspeed: cfg.memspeed,
            inclusive: cfg.inclusive
        };
        debug!("New hierarchy: {:?} policy {:?}", cfg, h.rp);
        h
    }

    pub fn rp(&self) -> &RP {
        &self.rp
    }
    pub fn icache(&self) -> &CacheLevel {
        &self.icache
    }
    pub fn dcache(&self) -> &CacheLevel {
        &self.dcache
    }
    pub fn l2(&self) -> &CacheLevel {
        &self.l2
    }
    pub fn l1(&self, orig: Origin) -> &CacheLevel {
        if orig.isnfetch { &self.icache } else { &self.dcache }
    }
    pub fn blocksize(&self) -> u32 {
        self.blocksize
    }
    pub fn memspeed(&self) -> u32 {
        self.memspeed
    }
    pub fn inclusive(&self) -> bool {
        self.inclusive
    }
    pub fn levels(&self) -> [&CacheLevel; 3] {
        [&self.icache, &self.dcache, &self.l2]
    }
    pub fn tables(&self) -> [&[CacheSet]; 3] {
        [self.icache.sets(), self.dcache.sets(), self.l2.sets()]
    }

    pub fn instruction_access(&mut self, addr: Addr) -> u32 {
        self.access(addr, Origin::ISNFETCH)
    }
    pub fn data_access(&mut self, addr: Addr) -> u32 {
        self.access(addr, Origin::DATA)
    }

    pub fn access(&mut self, addr: Addr, orig: Origin) -> u32 {
        if !self.l1(orig).is_enabled() {
            return self.l2_access(addr);
        }
        let l1 = if orig.isnfetch { &mut self.icache } else { &mut self.dcache };
        if l1.lookup(&self.rp, addr) {
            return l1.hit_time;
        }
        let penalty = self.l2_access(addr);
        let l1 = if orig.isnfetch { &mut self.icache } else { &mut self.dcache };
        l1.fill(&self.rp, addr, penalty);
        l1.hit_time + penalty
    }

    pub fn l2_access(&mut self, addr: Addr) -> u32 {
        if !self.l2.is_enabled() {
            return self.memspeed;
        }
        if self.l2.lookup(&self.rp, addr) {
            return self.l2.hit_time;
        }
        let penalty = self.memspeed;
        if let Some(ev) = self.l2.fill(&self.rp, addr, penalty) {
            if self.inclusive {
                self.icache.invalidate(&self.rp, ev);
                self.dcache.invalidate(&self.rp, ev);
            }
        }
        self.l2.hit_time + penalty
    }

    /// Whether `addr`'s block is resident in the L1 serving `orig` or in L2.
    pub fn holds(&self, addr: Addr, orig: Origin) -> bool {
        self.l1(orig).contains(addr) || self.l2.contains(addr)
    }

    /// Every block resident in I$ or D$ is also resident in L2.
    pub fn l1_covered_by_l2(&self) -> bool {
        if !self.l2.is_enabled() {
            return true;
        }
        self.icache.entries().chain(self.dcache.entries()).all(|a| self.l2.contains(a))
    }

    /// Apply accesses in order; returns the total cycles spent.
    pub fn replay<I>(&mut self, seq: I) -> u64
    where I: IntoIterator<Item = (Addr, Origin)>
    {
        seq.into_iter().map(|(addr, orig)| self.access(addr, orig) as u64).sum()
    }

    pub fn reset(&mut self) {
        self.icache.reset();
        self.dcache.reset();
        self.l2.reset();
        debug!("Hierarchy reset");
    }
}
