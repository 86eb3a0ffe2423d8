use crate::error::EngineError;
use crate::error::Stage;
use crate::surface::Extent;
use crate::surface::Surface;

/// Names one of the two surfaces of a [`BufferPair`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    A,
    B,
}

impl Slot {
    /// The other slot
    pub fn flip(self) -> Self {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }
}

/// Ping-pong storage for the current and next generation.
///
/// One surface is active (holds the latest generation), the other is the write target for the
/// next step. Both have the same extent for their whole life.
pub struct BufferPair {
    a: Surface,
    b: Surface,
    active: Slot,
}

impl BufferPair {
    /// Allocate both surfaces, zeroed, with `A` active.
    pub fn new(extent: Extent) -> Result<Self, EngineError> {
        let a = Surface::new(extent).map_err(|e| EngineError::new(Stage::SurfaceA, e))?;
        let b = Surface::new(extent).map_err(|e| EngineError::new(Stage::SurfaceB, e))?;

        Ok(Self {
            a,
            b,
            active: Slot::A,
        })
    }

    pub fn extent(&self) -> Extent {
        self.a.extent()
    }

    /// Which surface holds the latest generation
    pub fn active(&self) -> Slot {
        self.active
    }

    pub fn get(&self, slot: Slot) -> &Surface {
        match slot {
            Slot::A => &self.a,
            Slot::B => &self.b,
        }
    }

    pub fn get_mut(&mut self, slot: Slot) -> &mut Surface {
        match slot {
            Slot::A => &mut self.a,
            Slot::B => &mut self.b,
        }
    }

    /// The active surface
    pub fn read_source(&self) -> &Surface {
        self.get(self.active)
    }

    /// The inactive surface
    pub fn write_target(&mut self) -> &mut Surface {
        self.get_mut(self.active.flip())
    }

    /// Borrow the read source and the write target at once
    pub fn split(&mut self) -> (&Surface, &mut Surface) {
        match self.active {
            Slot::A => (&self.a, &mut self.b),
            Slot::B => (&self.b, &mut self.a),
        }
    }

    /// Toggle which surface is active
    pub fn swap(&mut self) {
        self.active = self.active.flip();
    }

    /// Kill every cell in both surfaces and make `A` active
    pub fn reset(&mut self) {
        self.a.clear();
        self.b.clear();
        self.active = Slot::A;
    }

    /// Replace the surface in `slot`, returning the old one.
    ///
    /// # Panics
    ///
    /// If `surface` does not have the pair's extent. The pair is never resized.
    pub fn bind(&mut self, slot: Slot, surface: Surface) -> Surface {
        assert_eq!(
            surface.extent(),
            self.extent(),
            "cannot bind a {} surface to a {} buffer pair",
            surface.extent(),
            self.extent()
        );

        std::mem::replace(self.get_mut(slot), surface)
    }
}
