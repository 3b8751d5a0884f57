use crate::config::*;
use crate::hier::Hierarchy;
use crate::policy::*;

pub trait Preset {
    type RP: CacheRP;

    fn config(&self) -> HierConfig;
    fn rp(&self) -> Self::RP;
    fn configx(&self) -> HierConfig {
        HierConfig{inclusive: !self.config().inclusive, ..self.config()}
    }
    fn newstate(&self) -> Hierarchy<Self::RP> {
        Hierarchy::with_policy(&self.config(), self.rp())
    }
}

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Split { SMALL, MEDIUM, LARGE }
impl Split {
    const CFG_SMALL: HierConfig = HierConfig {
        icache: LevelConfig::new(64, 2, 1),
        dcache: LevelConfig::new(64, 2, 1),
        l2: LevelConfig::new(256, 4, 10),
        blocksize: 32, memspeed: 100, inclusive: true
    };
    const CFG_MEDIUM: HierConfig = HierConfig {
        icache: LevelConfig::new(256, 2, 2),
        dcache: LevelConfig::new(256, 4, 2),
        l2: LevelConfig::new(1024, 8, 10),
        blocksize: 64, memspeed: 100, inclusive: true
    };
    const CFG_LARGE: HierConfig = HierConfig {
        icache: LevelConfig::new(512, 4, 2),
        dcache: LevelConfig::new(512, 8, 3),
        l2: LevelConfig::new(4096, 16, 12),
        blocksize: 64, memspeed: 150, inclusive: true
    };

    pub fn from_name(name: &str) -> Option<Self> {
        use Split::*;
        match name.to_ascii_lowercase().as_str() {
            "small" => Some(SMALL),
            "medium" => Some(MEDIUM),
            "large" => Some(LARGE),
            _ => None
        }
    }
}
impl Preset for Split {
    type RP = Lru;

    fn config(&self) -> HierConfig {
        use Split::*;
        match self {
            SMALL => Self::CFG_SMALL,
            MEDIUM => Self::CFG_MEDIUM,
            LARGE => Self::CFG_LARGE
        }
    }
    fn rp(&self) -> Lru {
        Lru
    }
}

pub mod scenario {
    use crate::config::*;
    use crate::policy::*;
    use crate::preset::Preset;

    /// 2-way D$ over a direct-mapped single-set L2; every new block evicts the last from both.
    pub struct INCLUSION;
    impl Preset for INCLUSION {
        type RP = Lru;

        fn config(&self) -> HierConfig {
            HierConfig {
                icache: LevelConfig::DISABLED,
                dcache: LevelConfig::new(1, 2, 1),
                l2: LevelConfig::new(1, 1, 10),
                blocksize: 16, memspeed: 100, inclusive: true
            }
        }
        fn rp(&self) -> Lru {
            Lru
        }
    }

    pub struct NOL1;
    impl Preset for NOL1 {
        type RP = Lru;

        fn config(&self) -> HierConfig {
            HierConfig {
                icache: LevelConfig::DISABLED,
                dcache: LevelConfig::DISABLED,
                l2: LevelConfig::new(16, 4, 8),
                blocksize: 64, memspeed: 80, inclusive: false
            }
        }
        fn rp(&self) -> Lru {
            Lru
        }
    }
}
