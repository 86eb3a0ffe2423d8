use crate::raster::FragmentProgram;
use crate::surface::Sampler;
use crate::surface::ALIVE;
use crate::surface::DEAD;
use crate::Sample;

/// Births for B3S23: bit `n` is set if a dead cell with `n` live neighbors is born.
const BIRTHS: u16 = 0b0000_1000;

/// Survivals for B3S23: bit `n` is set if a live cell with `n` live neighbors survives.
const SURVIVALS: u16 = 0b0000_1100;

/// Neighbor offsets, row by row, skipping the center.
///
///   0 1 2
///   3 . 4
///   5 6 7
///
pub const NEIGHBORS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// The Game of Life transition for a single cell.
///
/// `neighbors` is ordered as [`NEIGHBORS`], though the order does not affect the result.
pub fn next_state(center: bool, neighbors: [bool; 8]) -> bool {
    let n = neighbors.iter().filter(|&&alive| alive).count();
    let n = 1u16 << n;

    if center {
        n & SURVIVALS == n
    } else {
        n & BIRTHS == n
    }
}

/// A 3x3 window read from a surface around one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighborhood {
    pub center: bool,
    pub neighbors: [bool; 8],
}

impl Neighborhood {
    /// Sample the window around `(x, y)`. Each cell is alive if its sample is `> 0`.
    pub fn sample(sampler: &Sampler<'_>, x: u32, y: u32) -> Self {
        let center = sampler.fetch(x, y, 0, 0) > 0;
        let neighbors = NEIGHBORS.map(|(dx, dy)| sampler.fetch(x, y, dx, dy) > 0);

        Self { center, neighbors }
    }

    pub fn alive_neighbors(&self) -> usize {
        self.neighbors.iter().filter(|&&alive| alive).count()
    }

    pub fn next(&self) -> bool {
        next_state(self.center, self.neighbors)
    }
}

/// The step pass: one new generation from the bound surface.
#[derive(Clone, Copy, Debug, Default)]
pub struct LifeStep;

impl FragmentProgram for LifeStep {
    type Output = Sample;

    const NAME: &'static str = "step";

    fn shade(&self, input: &Sampler<'_>, x: u32, y: u32) -> Sample {
        if Neighborhood::sample(input, x, y).next() {
            ALIVE
        } else {
            DEAD
        }
    }
}
