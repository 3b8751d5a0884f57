use std::hash::{Hash, Hasher};

use itertools::Itertools;
use log::debug;

use crate::geom::Geometry;
use crate::hier::Hierarchy;
use crate::policy::*;
use crate::state::Addr;

/// Search node: hierarchy contents only, counters do not take part in equality.
#[derive(Clone, Debug)]
struct Probe<RP: CacheRP>(Hierarchy<RP>);

impl<RP: CacheRP> PartialEq for Probe<RP> {
    fn eq(&self, other: &Self) -> bool {
        self.0.tables() == other.0.tables()
    }
}
impl<RP: CacheRP> Eq for Probe<RP> {}
impl<RP: CacheRP> Hash for Probe<RP> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.tables().hash(state);
    }
}

fn step<RP: CacheRP>(p: &Probe<RP>, addr: Addr, orig: Origin) -> (Probe<RP>, u32) {
    let mut h = p.0.clone();
    let lat = h.access(addr, orig);
    (Probe(h), lat)
}

fn find_outedge<RP: CacheRP>(st: &Probe<RP>, nx: &Probe<RP>, cands: &[Addr], orig: Origin) -> Option<(Addr, u32)> {
    cands.iter()
        .filter_map(|&a| {
            let (s, lat) = step(st, a, orig);
            if s == *nx { Some((a, lat)) } else { None }
        })
        .min_by_key(|&(_, lat)| lat)
}

/// Cheapest sequence of `orig` accesses drawn from `pool` after which `target`'s block
/// is resident neither in the L1 serving `orig` nor in L2.
/// Returns each access with its latency, and the total cycle count.
pub fn kickout<RP: CacheRP>(hier: &Hierarchy<RP>, target: Addr, orig: Origin, pool: &[Addr])
    -> Option<(Vec<(Addr, u32)>, u64)>
{
    let geom = Geometry::new(1, hier.blocksize());
    let cands: Vec<Addr> = pool.iter().copied()
        .filter(|&a| !geom.same_block(a, target))
        .unique_by(|&a| geom.block_addr(geom.tag(a), 0))
        .collect();
    debug!("Kickout of {:#010x} from {} candidates", target, cands.len());

    let start = Probe(hier.clone());
    let (path, total) = pathfinding::prelude::dijkstra(
        &start,
        |p| cands.iter().map(|&a| {
            let (s, lat) = step(p, a, orig);
            (s, lat as u64)
        }).collect::<Vec<_>>(),
        |p| !p.0.holds(target, orig)
    )?;

    let mut pst = &path[0];
    let mut accs = Vec::new();
    for st in path.iter().skip(1) {
        accs.push(find_outedge(pst, st, &cands, orig)?);
        pst = st;
    }
    debug!("Found eviction in {} accesses, {} cycles", accs.len(), total);
    Some((accs, total))
}
