use std::path::Path;

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::buffers::BufferPair;
use crate::buffers::Slot;
use crate::config::Config;
use crate::config::Threading;
use crate::error::EngineError;
use crate::error::ExecutionError;
use crate::error::SeedResult;
use crate::error::Stage;
use crate::present::Frame;
use crate::present::Presenter;
use crate::raster::Backend;
use crate::raster::Rasterizer;
use crate::rule::LifeStep;
use crate::seed;
use crate::seed::SeedPattern;
use crate::surface::Extent;
use crate::surface::Surface;

/// Where the simulation is in its life.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No valid generation yet. Ticks do nothing.
    AwaitingSeed,

    /// `active` holds the latest generation, the other surface is the next write target.
    Seeded { active: Slot },
}

/// Owns both cell buffers and drives them one generation per tick.
pub struct SimulationEngine {
    buffers: BufferPair,
    phase: Phase,
    raster: Rasterizer,
    presenter: Presenter,

    /// Generations computed since the last seeding
    generation: u64,
}

impl SimulationEngine {
    /// Allocate both surfaces and the execution resources
    pub fn new(config: &Config) -> Result<Self, EngineError> {
        let backend = match config.threading {
            Threading::Serial => Backend::Serial,
            Threading::Parallel(threads) => {
                Backend::parallel(threads).map_err(|e| EngineError::new(Stage::Executor, e))?
            }
        };

        let buffers = BufferPair::new(config.lattice)?;

        info!(lattice = %config.lattice, mode = ?config.address_mode, "engine ready");

        Ok(Self {
            buffers,
            phase: Phase::AwaitingSeed,
            raster: Rasterizer::new(backend, config.address_mode),
            presenter: Presenter::new(config.palette),
            generation: 0,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn extent(&self) -> Extent {
        self.buffers.extent()
    }

    /// The latest complete generation, if there is one
    pub fn latest(&self) -> Option<&Surface> {
        match self.phase {
            Phase::AwaitingSeed => None,
            Phase::Seeded { active } => Some(self.buffers.get(active)),
        }
    }

    /// Start over from `pattern`, centered on a dead lattice.
    ///
    /// On failure the engine is left waiting for a seed.
    pub fn seed(&mut self, pattern: &SeedPattern) -> SeedResult<()> {
        self.buffers.reset();
        self.generation = 0;
        self.phase = Phase::AwaitingSeed;

        seed::load(pattern, self.buffers.get_mut(Slot::A))?;
        self.seeded();

        Ok(())
    }

    /// Decode the image at `path` and [`seed`](Self::seed) from it
    pub fn seed_from_path(&mut self, path: impl AsRef<Path>) -> SeedResult<()> {
        let pattern = SeedPattern::open(path).inspect_err(|_| {
            self.phase = Phase::AwaitingSeed;
        })?;

        self.seed(&pattern)
    }

    /// Start over from a complete generation.
    ///
    /// # Panics
    ///
    /// If `surface` does not match the lattice.
    pub fn seed_surface(&mut self, surface: Surface) {
        self.buffers.reset();
        self.generation = 0;
        self.buffers.bind(Slot::A, surface);
        self.seeded();
    }

    fn seeded(&mut self) {
        self.phase = Phase::Seeded {
            active: self.buffers.active(),
        };

        let population = self.buffers.read_source().population();
        info!(population, "seeded");
    }

    /// Advance one generation. Returns whether a generation was computed.
    ///
    /// The new generation only becomes active once the whole pass has completed, so an error
    /// leaves the previous generation in place.
    pub fn tick(&mut self) -> Result<bool, ExecutionError> {
        let Phase::Seeded { active } = self.phase else {
            return Ok(false);
        };

        debug_assert_eq!(active, self.buffers.active());

        let (source, target) = self.buffers.split();
        self.raster.run_into(&LifeStep, source, target)?;

        self.buffers.swap();
        self.generation += 1;
        self.phase = Phase::Seeded {
            active: self.buffers.active(),
        };

        debug!(generation = self.generation, active = ?self.buffers.active(), "stepped");

        Ok(true)
    }

    /// Advance `n` generations
    pub fn advance(&mut self, n: usize) -> Result<(), ExecutionError> {
        for _ in 0..n {
            if !self.tick()? {
                warn!("advance requested before seeding");
                break;
            }
        }

        Ok(())
    }

    /// Color the latest generation, or a blank frame if there is none
    pub fn present(&self) -> Result<Frame, ExecutionError> {
        match self.latest() {
            Some(surface) => self.presenter.present(&self.raster, surface),
            None => Ok(self.presenter.blank(self.extent())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(width: u32, height: u32) -> SimulationEngine {
        let config = Config {
            threading: Threading::Serial,
            ..Config::with_lattice(width, height)
        };

        SimulationEngine::new(&config).unwrap()
    }

    #[test]
    fn ticks_are_noops_before_seeding() {
        let mut engine = engine(4, 4);

        assert!(!engine.tick().unwrap());
        assert_eq!(engine.phase(), Phase::AwaitingSeed);
        assert_eq!(engine.generation(), 0);
        assert!(engine.latest().is_none());
    }

    #[test]
    fn seeding_activates_a() {
        let mut engine = engine(4, 4);
        let pattern = SeedPattern::from_ascii(&["##", "##"]).unwrap();

        engine.seed(&pattern).unwrap();

        assert_eq!(engine.phase(), Phase::Seeded { active: Slot::A });
        assert_eq!(engine.latest().unwrap().population(), 4);
    }

    #[test]
    fn failed_seed_returns_to_awaiting() {
        let mut engine = engine(4, 4);
        engine
            .seed(&SeedPattern::from_ascii(&["#"]).unwrap())
            .unwrap();
        engine.tick().unwrap();

        let oversized = SeedPattern::from_ascii(&["#####"]).unwrap();
        assert!(engine.seed(&oversized).is_err());

        assert_eq!(engine.phase(), Phase::AwaitingSeed);
        assert_eq!(engine.generation(), 0);
        assert!(!engine.tick().unwrap());
    }

    #[test]
    fn missing_seed_file_leaves_the_engine_paused() {
        let mut engine = engine(4, 4);

        assert!(engine.seed_from_path("/nonexistent/seed.bmp").is_err());
        assert_eq!(engine.phase(), Phase::AwaitingSeed);
    }

    #[test]
    fn reseeding_clears_the_old_generation() {
        let mut engine = engine(6, 6);
        engine.seed_surface(Surface::from_ascii(&[
            "#....#", "......", "......", "......", "......", "#....#",
        ]));

        engine
            .seed(&SeedPattern::from_ascii(&["#"]).unwrap())
            .unwrap();

        assert_eq!(engine.latest().unwrap().population(), 1);
        assert!(engine.latest().unwrap().is_alive(2, 2));
    }
}
