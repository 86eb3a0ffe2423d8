use std::fmt;

use crate::error::AllocationError;
use crate::Sample;

/// Sample value written for a live cell. Anything `> 0` reads back as alive.
pub const ALIVE: Sample = Sample::MAX;

/// Sample value written for a dead cell.
pub const DEAD: Sample = 0;

/// Width and height of a surface, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels covered by this extent
    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether `other` fits inside `self` in both dimensions
    pub const fn contains(&self, other: Extent) -> bool {
        other.width <= self.width && other.height <= self.height
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// How out-of-range coordinates resolve when sampling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AddressMode {
    /// Use the nearest in-range pixel, so the border duplicates the edge.
    #[default]
    ClampToEdge,

    /// Wrap around to the opposite edge.
    Repeat,
}

impl AddressMode {
    fn resolve(self, coord: i64, len: u32) -> u32 {
        let len = len as i64;

        match self {
            AddressMode::ClampToEdge => coord.clamp(0, len - 1) as u32,
            AddressMode::Repeat => coord.rem_euclid(len) as u32,
        }
    }
}

/// A single channel R8 image. One sample per cell, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    extent: Extent,
    texels: Vec<Sample>,
}

impl Surface {
    /// Allocate a zeroed (all dead) surface.
    pub fn new(extent: Extent) -> Result<Self, AllocationError> {
        if extent.area() == 0 {
            return Err(AllocationError::ZeroExtent(extent));
        }

        let mut texels = Vec::new();
        texels
            .try_reserve_exact(extent.area())
            .map_err(|source| AllocationError::OutOfMemory { extent, source })?;
        texels.resize(extent.area(), DEAD);

        Ok(Self { extent, texels })
    }

    /// Build a surface from existing samples. Returns `None` if the length does not match.
    pub fn from_samples(extent: Extent, texels: Vec<Sample>) -> Option<Self> {
        (extent.area() != 0 && texels.len() == extent.area()).then_some(Self { extent, texels })
    }

    /// Build a surface from a picture of `#` (alive) and `.` (dead) rows.
    ///
    /// Panics on ragged rows. Meant for tests and demos.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;

        let mut texels = Vec::with_capacity(width as usize * height as usize);
        for row in rows {
            assert_eq!(row.len() as u32, width, "ragged row {row:?}");

            texels.extend(row.bytes().map(|b| if b == b'#' { ALIVE } else { DEAD }));
        }

        Self::from_samples(Extent::new(width, height), texels).expect("empty picture")
    }

    /// Inverse of [`Surface::from_ascii`]
    pub fn to_ascii(&self) -> Vec<String> {
        self.texels
            .chunks(self.extent.width as usize)
            .map(|row| row.iter().map(|&s| if s > 0 { '#' } else { '.' }).collect())
            .collect()
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn width(&self) -> u32 {
        self.extent.width
    }

    pub fn height(&self) -> u32 {
        self.extent.height
    }

    pub fn samples(&self) -> &[Sample] {
        &self.texels
    }

    pub fn samples_mut(&mut self) -> &mut [Sample] {
        &mut self.texels
    }

    pub fn get(&self, x: u32, y: u32) -> Sample {
        self.texels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, value: Sample) {
        let i = self.index(x, y);
        self.texels[i] = value;
    }

    pub fn is_alive(&self, x: u32, y: u32) -> bool {
        self.get(x, y) > 0
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.texels.iter().filter(|&&s| s > 0).count()
    }

    /// Set every cell to dead
    pub fn clear(&mut self) {
        self.texels.fill(DEAD);
    }

    /// Bind this surface for reading with the given address mode
    pub fn sampler(&self, mode: AddressMode) -> Sampler<'_> {
        Sampler {
            surface: self,
            mode,
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(x < self.extent.width, "x is out of bounds");
        assert!(y < self.extent.height, "y is out of bounds");

        y as usize * self.extent.width as usize + x as usize
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("extent", &self.extent)
            .field("population", &self.population())
            .finish()
    }
}

/// Nearest-filter read access to a surface.
///
/// Filtering never interpolates, so a sample is always a value some cell actually holds.
#[derive(Clone, Copy)]
pub struct Sampler<'a> {
    surface: &'a Surface,
    mode: AddressMode,
}

impl Sampler<'_> {
    pub fn extent(&self) -> Extent {
        self.surface.extent
    }

    /// Fetch the sample at `(x + dx, y + dy)`, resolving out-of-range coordinates by the address
    /// mode
    pub fn fetch(&self, x: u32, y: u32, dx: i32, dy: i32) -> Sample {
        let Extent { width, height } = self.surface.extent;

        let sx = self.mode.resolve(x as i64 + dx as i64, width);
        let sy = self.mode.resolve(y as i64 + dy as i64, height);

        self.surface.texels[sy as usize * width as usize + sx as usize]
    }
}
