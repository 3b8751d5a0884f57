use anyhow::{anyhow, Result};
use env_logger::Env;
use log::info;

use cache_hier::preset::*;
use cache_hier::search::kickout;
use cache_hier::*;


fn workload(iters: u32) -> Vec<(u32, Origin)> {
    const CODE: u32 = 0x0040_0000;
    const HEAP: u32 = 0x1000_0000;
    let mut seq = Vec::new();
    for i in 0..iters {
        for pc in (0..64).map(|k| CODE + 4 * k) {
            seq.push((pc, Origin::ISNFETCH));
        }
        for k in 0..16 {
            seq.push((HEAP + ((i * 16 + k) % 4096) * 64, Origin::DATA));
        }
    }
    seq
}


fn report<RP: CacheRP>(h: &Hierarchy<RP>) {
    for lvl in h.levels().iter() {
        match lvl.stats() {
            Some(st) => println!("  {:4} refs {:8} misses {:8} penalties {:10}", lvl.name(), st.refs, st.misses, st.penalties),
            None => println!("  {:4} disabled", lvl.name())
        }
    }
}


fn applyseq<RP: CacheRP>(h: &mut Hierarchy<RP>, accs: &[(u32, Origin)]) -> u64 {
    let mut total = 0;
    for &(addr, orig) in accs.iter() {
        let lat = h.access(addr, orig);
        println!("  {:#010x} {}: {} cycles", addr, if orig.isnfetch { "I" } else { "D" }, lat);
        total += lat as u64;
    }
    total
}


fn main() -> Result<()> {
    let env = Env::default()
        .filter_or("CACHE_HIER_LOG", "info")
        .write_style_or("CACHE_HIER_LOG_STYLE", "auto");
    env_logger::init_from_env(env);

    println!("Cache hierarchy timing simulator");

    let pres = match std::env::args().nth(1) {
        Some(name) => Split::from_name(&name).ok_or_else(|| anyhow!("unknown preset {:?}", name))?,
        None => Split::MEDIUM
    };
    info!("Preset {:?}", pres);

    let seq = workload(256);
    for (label, cfg) in [("inclusive", pres.config()), ("non-inclusive", pres.configx())].iter() {
        let mut h = cfg.build()?;
        let total = h.replay(seq.iter().copied());
        println!("\n{} ({} accesses, {} cycles):", label, seq.len(), total);
        report(&h);
        println!("  L1 contents covered by L2: {}", h.l1_covered_by_l2());
    }

    println!("\nInclusion scenario:");
    let sc = scenario::INCLUSION;
    sc.config().validate()?;
    let mut h = sc.newstate();
    let total = applyseq(&mut h, &[(0x00, Origin::DATA), (0x10, Origin::DATA), (0x00, Origin::DATA)]);
    println!("  total {} cycles", total);
    report(&h);

    println!("\nKickout of 0x00 from the inclusion scenario:");
    let mut h = sc.newstate();
    h.data_access(0x00);
    match kickout(&h, 0x00, Origin::DATA, &[0x10, 0x20, 0x30]) {
        Some((path, total)) => {
            println!("  {} accesses, {} cycles", path.len(), total);
            for (i, (addr, lat)) in path.iter().enumerate() {
                println!("  {}: {:#010x} ({} cycles)", i + 1, addr, lat);
            }
        }
        None => println!("  no eviction sequence found")
    }
    Ok(())
}
