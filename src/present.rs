use image::Rgba;
use image::RgbaImage;

use crate::error::ExecutionError;
use crate::raster::FragmentProgram;
use crate::raster::Rasterizer;
use crate::surface::Extent;
use crate::surface::Sampler;
use crate::surface::Surface;

/// The two display colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub alive: Rgba<u8>,
    pub dead: Rgba<u8>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            alive: Rgba([255, 255, 255, 255]),
            dead: Rgba([0, 0, 0, 255]),
        }
    }
}

/// The draw pass
struct Draw(Palette);

impl FragmentProgram for Draw {
    type Output = [u8; 4];

    const NAME: &'static str = "draw";

    fn shade(&self, input: &Sampler<'_>, x: u32, y: u32) -> [u8; 4] {
        if input.fetch(x, y, 0, 0) > 0 {
            self.0.alive.0
        } else {
            self.0.dead.0
        }
    }
}

/// One presented image, ready for a display target.
#[derive(Clone, Debug)]
pub struct Frame {
    image: RgbaImage,
    palette: Palette,
}

impl Frame {
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn extent(&self) -> Extent {
        let (width, height) = self.image.dimensions();
        Extent::new(width, height)
    }

    /// Whether the pixel at `(x, y)` shows a live cell
    pub fn is_lit(&self, x: u32, y: u32) -> bool {
        *self.image.get_pixel(x, y) == self.palette.alive
    }
}

/// Turns a generation into a two-color image.
pub struct Presenter {
    palette: Palette,
}

impl Presenter {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Color every cell of `surface`
    pub fn present(&self, raster: &Rasterizer, surface: &Surface) -> Result<Frame, ExecutionError> {
        let extent = surface.extent();
        let mut pixels = vec![[0u8; 4]; extent.area()];

        raster.run(&Draw(self.palette), surface, extent, &mut pixels)?;

        let image = RgbaImage::from_raw(extent.width, extent.height, pixels.concat())
            .ok_or(ExecutionError::TargetMismatch {
                extent,
                expected: extent.area(),
                got: pixels.len(),
            })?;

        Ok(Frame {
            image,
            palette: self.palette,
        })
    }

    /// A frame with nothing alive, shown before the first generation exists
    pub fn blank(&self, extent: Extent) -> Frame {
        Frame {
            image: RgbaImage::from_pixel(extent.width, extent.height, self.palette.dead),
            palette: self.palette,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Backend;
    use crate::surface::AddressMode;

    #[test]
    fn cells_map_to_the_palette() {
        let palette = Palette {
            alive: Rgba([10, 20, 30, 255]),
            dead: Rgba([1, 2, 3, 255]),
        };
        let presenter = Presenter::new(palette);
        let raster = Rasterizer::new(Backend::Serial, AddressMode::ClampToEdge);

        let mut surface = Surface::from_ascii(&["#.", ".."]);
        surface.set(1, 1, 1);

        let frame = presenter.present(&raster, &surface).unwrap();

        assert_eq!(frame.image().get_pixel(0, 0), &palette.alive);
        assert_eq!(frame.image().get_pixel(1, 0), &palette.dead);
        assert_eq!(frame.image().get_pixel(1, 1), &palette.alive);
        assert!(frame.is_lit(1, 1));
        assert!(!frame.is_lit(0, 1));
    }

    #[test]
    fn blank_frame_is_all_dead() {
        let presenter = Presenter::new(Palette::default());
        let frame = presenter.blank(Extent::new(3, 2));

        assert_eq!(frame.extent(), Extent::new(3, 2));
        assert!(frame.image().pixels().all(|px| *px == Palette::default().dead));
    }
}
