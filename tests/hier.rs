use cache_hier::preset::*;
use cache_hier::state::CacheState;
use cache_hier::*;

const D: Origin = Origin::DATA;
const I: Origin = Origin::ISNFETCH;

fn cfg(icache: LevelConfig, dcache: LevelConfig, l2: LevelConfig, inclusive: bool) -> HierConfig {
    HierConfig{icache, dcache, l2, blocksize: 16, memspeed: 100, inclusive}
}

/// Deterministic address stream over `blocks` 16-byte blocks.
fn lcg_stream(seed: u32, blocks: u32, n: usize) -> Vec<(u32, Origin)> {
    let mut x = seed;
    (0..n).map(|_| {
        x = x.wrapping_mul(1103515245).wrapping_add(12345);
        let blk = (x >> 16) % blocks;
        let orig = if (x >> 8) & 1 == 1 { I } else { D };
        (blk * 16 + ((x >> 4) & 15), orig)
    }).collect()
}

#[test]
fn inclusion_scenario() {
    let mut h = scenario::INCLUSION.newstate();
    assert_eq!(h.data_access(0x00), 111);
    assert_eq!(h.data_access(0x10), 111);
    assert!(!h.dcache().contains(0x00));
    assert!(h.dcache().contains(0x10));
    assert_eq!(h.data_access(0x00), 111);

    let d = h.dcache().stats().unwrap();
    assert_eq!((d.refs, d.misses, d.penalties), (3, 3, 330));
    let l2 = h.l2().stats().unwrap();
    assert_eq!((l2.refs, l2.misses, l2.penalties), (3, 3, 300));
    assert!(h.icache().stats().is_none());
}

#[test]
fn non_inclusive_keeps_l1_copy() {
    let sc = scenario::INCLUSION;
    let mut h = Hierarchy::new(&sc.configx());
    assert_eq!(h.data_access(0x00), 111);
    assert_eq!(h.data_access(0x10), 111);
    assert!(h.dcache().contains(0x00));
    assert!(!h.l2().contains(0x00));
    assert!(!h.l1_covered_by_l2());
    assert_eq!(h.data_access(0x00), 1);
}

#[test]
fn hit_and_penalty_accounting() {
    let mut h = Split::MEDIUM.newstate();
    assert_eq!(h.data_access(0x1234), 2 + 10 + 100);
    assert_eq!(h.data_access(0x1238), 2);
    let d = h.dcache().stats().unwrap();
    assert_eq!((d.refs, d.misses, d.penalties, d.hits()), (2, 1, 110, 1));
    let l2 = h.l2().stats().unwrap();
    assert_eq!((l2.refs, l2.misses, l2.penalties), (1, 1, 100));
    assert_eq!(h.icache().stats().unwrap().refs, 0);
}

#[test]
fn l2_hit_after_l1_eviction() {
    let mut h = Hierarchy::new(&cfg(LevelConfig::DISABLED, LevelConfig::new(1, 1, 1), LevelConfig::new(1, 4, 10), true));
    assert_eq!(h.data_access(0x00), 111);
    assert_eq!(h.data_access(0x10), 111);
    assert_eq!(h.data_access(0x00), 11);
    assert_eq!(h.l2().stats().unwrap().misses, 2);
}

#[test]
fn split_l1s_share_l2() {
    let mut h = Split::SMALL.newstate();
    assert_eq!(h.instruction_access(0x40), 1 + 10 + 100);
    assert_eq!(h.data_access(0x40), 1 + 10);
    assert_eq!(h.instruction_access(0x44), 1);
    assert!(h.icache().contains(0x40) && h.dcache().contains(0x40));
}

#[test]
fn l2_eviction_invalidates_icache() {
    let mut h = Hierarchy::new(&cfg(LevelConfig::new(1, 2, 1), LevelConfig::new(1, 2, 1), LevelConfig::new(1, 1, 10), true));
    h.instruction_access(0x00);
    assert!(h.icache().contains(0x00));
    h.data_access(0x10);
    assert!(!h.icache().contains(0x00));
    assert_eq!(h.instruction_access(0x00), 111);
    assert!(!h.dcache().contains(0x10));
}

#[test]
fn invalidation_uses_l2_geometry() {
    // Two L2 sets over a one-set I$: the evicted block must map back to the right I$ tag.
    let mut h = Hierarchy::new(&cfg(LevelConfig::new(1, 2, 1), LevelConfig::DISABLED, LevelConfig::new(2, 1, 10), true));
    h.instruction_access(0x10);
    h.instruction_access(0x00);
    h.instruction_access(0x30);
    assert!(!h.icache().contains(0x10));
    assert!(h.icache().contains(0x00));
    assert!(h.icache().contains(0x30));
    assert!(h.icache().sets()[0].ranks_consistent());
    assert!(h.l1_covered_by_l2());
}

#[test]
fn disabled_l1_matches_direct_l2() {
    let l2 = LevelConfig::new(4, 2, 10);
    let mut bypass = Hierarchy::new(&cfg(LevelConfig::DISABLED, LevelConfig::DISABLED, l2, true));
    let mut direct = Hierarchy::new(&cfg(LevelConfig::new(8, 2, 1), LevelConfig::new(8, 2, 1), l2, true));
    for (addr, orig) in lcg_stream(7, 40, 500) {
        assert_eq!(bypass.access(addr, orig), direct.l2_access(addr));
    }
    assert_eq!(bypass.l2().stats(), direct.l2().stats());
    assert_eq!(bypass.l2().sets(), direct.l2().sets());
    assert!(bypass.icache().stats().is_none());
    assert!(bypass.dcache().stats().is_none());
}

#[test]
fn no_l2_costs_memspeed() {
    let mut h = Hierarchy::new(&cfg(LevelConfig::new(2, 2, 3), LevelConfig::DISABLED, LevelConfig::DISABLED, true));
    assert_eq!(h.instruction_access(0x100), 103);
    assert_eq!(h.instruction_access(0x100), 3);
    assert_eq!(h.data_access(0x100), 100);
    assert!(h.l2().stats().is_none());
    assert!(h.l1_covered_by_l2());
}

#[test]
fn lru_law_single_set() {
    const ASSOC: usize = 4;
    let mut h = Hierarchy::new(&cfg(LevelConfig::DISABLED, LevelConfig::new(1, ASSOC as u32, 1), LevelConfig::DISABLED, false));
    let mut model: Vec<u32> = Vec::new();
    for (addr, _) in lcg_stream(42, 7, 1000) {
        let tag = addr >> 4;
        let lat = h.data_access(addr);
        match model.iter().position(|&t| t == tag) {
            Some(i) => {
                assert_eq!(lat, 1);
                model.remove(i);
            }
            None => {
                assert_eq!(lat, 101);
                model.truncate(ASSOC - 1);
            }
        }
        model.insert(0, tag);
        let set = &h.dcache().sets()[0];
        assert_eq!(set.by_recency(), model);
        assert!(set.ranks_consistent());
    }
}

#[test]
fn repeated_access_hits() {
    let mut h = Split::MEDIUM.newstate();
    assert_eq!(h.data_access(0x8000), 112);
    for _ in 1..4 {
        assert_eq!(h.data_access(0x8000), 2);
    }
    let before = h.dcache().set_of(0x8000).unwrap().by_recency();
    h.data_access(0x8000);
    assert_eq!(h.dcache().set_of(0x8000).unwrap().by_recency(), before);
}

#[test]
fn inclusive_invariant_holds() {
    let small = LevelConfig::new(2, 2, 1);
    let mut h = Hierarchy::new(&cfg(small, small, LevelConfig::new(2, 2, 10), true));
    for (addr, orig) in lcg_stream(1, 24, 2000) {
        h.access(addr, orig);
        assert!(h.l1_covered_by_l2());
        for lvl in h.levels().iter() {
            assert!(lvl.sets().iter().all(|s| s.ranks_consistent()));
        }
    }
}

#[test]
fn non_inclusive_may_diverge() {
    let small = LevelConfig::new(2, 2, 1);
    let mut h = Hierarchy::new(&cfg(small, small, LevelConfig::new(2, 2, 10), false));
    let mut diverged = false;
    for (addr, orig) in lcg_stream(1, 24, 2000) {
        h.access(addr, orig);
        diverged |= !h.l1_covered_by_l2();
    }
    assert!(diverged);
}

#[test]
fn reset_clears_everything() {
    let mut h = Split::SMALL.newstate();
    let seq = lcg_stream(3, 64, 300);
    let first = h.replay(seq.iter().copied());
    h.reset();
    assert_eq!(h.l2().stats().unwrap().refs, 0);
    assert!(h.dcache().entries().next().is_none());
    assert_eq!(h.replay(seq.iter().copied()), first);
}

#[test]
fn build_validates() {
    assert!(Split::LARGE.config().build().is_ok());
    let bad = HierConfig{l2: LevelConfig::new(3, 2, 10), ..Split::LARGE.config()};
    assert!(bad.build().is_err());
}

#[test]
fn policy_is_read_only() {
    let mut h = Split::SMALL.newstate();
    assert_eq!(*h.rp(), Lru);
    h.data_access(0x40);
    h.reset();
    assert_eq!(*h.rp(), Split::SMALL.rp());
}
