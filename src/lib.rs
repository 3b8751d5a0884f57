//! Timing model of a split I$/D$ hierarchy over a unified, optionally inclusive L2.

pub mod state;
pub mod geom;
pub mod policy;
pub mod config;
pub mod hier;
pub mod preset;
pub mod search;

pub use crate::config::{HierConfig, LevelConfig};
pub use crate::hier::{CacheLevel, Hierarchy, LevelStats};
pub use crate::policy::{CacheRP, Lru, Origin};
