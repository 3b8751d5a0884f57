use anyhow::{bail, Result};
use log::warn;

use crate::hier::Hierarchy;
use crate::state::Rank;

/// Geometry of one level; `sets == 0` bypasses the level.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Default, Debug)]
pub struct LevelConfig {
    pub sets: u32,
    pub assoc: u32,
    pub hit_time: u32
}

impl LevelConfig {
    pub const DISABLED: LevelConfig = LevelConfig{sets: 0, assoc: 0, hit_time: 0};

    pub const fn new(sets: u32, assoc: u32, hit_time: u32) -> Self {
        LevelConfig{sets, assoc, hit_time}
    }

    pub fn enabled(&self) -> bool {
        self.sets > 0
    }

    pub fn validate(&self, name: &str) -> Result<()> {
        if !self.enabled() {
            return Ok(());
        }
        if !self.sets.is_power_of_two() {
            bail!("{}: set count ({}) must be a power of 2", name, self.sets);
        }
        if self.assoc == 0 || self.assoc > Rank::MAX as u32 {
            bail!("{}: associativity ({}) must be within 1..={}", name, self.assoc, Rank::MAX);
        }
        Ok(())
    }
}

#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub struct HierConfig {
    pub icache: LevelConfig,
    pub dcache: LevelConfig,
    pub l2: LevelConfig,
    pub blocksize: u32,
    pub memspeed: u32,
    pub inclusive: bool
}

impl HierConfig {
    pub fn validate(&self) -> Result<()> {
        self.icache.validate("I$")?;
        self.dcache.validate("D$")?;
        self.l2.validate("L2$")?;
        if self.blocksize == 0 {
            bail!("block size must be non-zero");
        }
        if self.worst_latency().is_none() {
            bail!("worst-case access latency overflows {} cycles", u32::MAX);
        }
        if self.inclusive && !self.l2.enabled() {
            warn!("inclusive L2 requested but L2 is disabled; ignoring");
        }
        Ok(())
    }

    /// Latency of an access missing every enabled level, `None` if it does not fit `u32`.
    pub fn worst_latency(&self) -> Option<u32> {
        let l1 = [self.icache, self.dcache].iter()
            .filter(|c| c.enabled())
            .map(|c| c.hit_time)
            .max()
            .unwrap_or(0);
        let l2 = if self.l2.enabled() { self.l2.hit_time } else { 0 };
        l1.checked_add(l2)?.checked_add(self.memspeed)
    }

    pub fn build(&self) -> Result<Hierarchy> {
        self.validate()?;
        Ok(Hierarchy::new(self))
    }
}
