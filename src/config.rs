use std::time::Duration;

use crate::present::Palette;
use crate::surface::AddressMode;
use crate::surface::Extent;

/// Lattice side length of the reference instance
pub const LATTICE_SIZE: u32 = 1024;

pub const FRAMERATE: u32 = 60;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "TEXLIFE_LOG";

/// How fragments are scheduled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Threading {
    Serial,

    /// Spread rows over a pool. `None` lets rayon pick the thread count.
    Parallel(Option<usize>),
}

/// Everything fixed for the life of an engine.
#[derive(Clone, Debug)]
pub struct Config {
    pub lattice: Extent,
    pub address_mode: AddressMode,
    pub palette: Palette,
    pub threading: Threading,
    pub framerate: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lattice: Extent::new(LATTICE_SIZE, LATTICE_SIZE),
            address_mode: AddressMode::ClampToEdge,
            palette: Palette::default(),
            threading: Threading::Parallel(None),
            framerate: FRAMERATE,
        }
    }
}

impl Config {
    /// A config for a `width x height` lattice, otherwise default
    pub fn with_lattice(width: u32, height: u32) -> Self {
        Self {
            lattice: Extent::new(width, height),
            ..Self::default()
        }
    }

    /// Time budget of one tick and present
    pub fn frametime(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.framerate.max(1) as f64)
    }
}
