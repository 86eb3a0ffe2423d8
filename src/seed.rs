use std::io::BufRead;
use std::io::Cursor;
use std::io::Seek;
use std::path::Path;
use std::path::PathBuf;

use anyhow::bail;
use anyhow::Context;
use image::DynamicImage;
use image::ImageFormat;
use image::ImageReader;
use image::RgbImage;
use tracing::debug;

use crate::error::SeedError;
use crate::error::SeedResult;
use crate::surface::Extent;
use crate::surface::Surface;

/// Samples per source pixel
const CHANNELS: usize = 3;

/// A decoded image to start a simulation from. RGB, 8 bits per sample, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedPattern {
    extent: Extent,
    rgb: Vec<u8>,
}

impl SeedPattern {
    pub fn from_rgb(width: u32, height: u32, rgb: Vec<u8>) -> SeedResult<Self> {
        let extent = Extent::new(width, height);

        if extent.area() == 0 {
            return Err(SeedError::Empty);
        }

        let expected = extent.area() * CHANNELS;
        if rgb.len() != expected {
            return Err(SeedError::Malformed {
                extent,
                expected,
                got: rgb.len(),
            });
        }

        Ok(Self { extent, rgb })
    }

    /// A black and white pattern from `#` (white) and `.` (black) rows
    pub fn from_ascii(rows: &[&str]) -> SeedResult<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;

        let rgb = rows
            .iter()
            .flat_map(|row| row.bytes())
            .flat_map(|b| if b == b'#' { [u8::MAX; 3] } else { [0; 3] })
            .collect();

        Self::from_rgb(width, height, rgb)
    }

    /// Decode a bitmap file. Only RGB bitmaps are accepted, whatever the file extension says.
    pub fn open(path: impl AsRef<Path>) -> SeedResult<Self> {
        let path = path.as_ref();

        let img = ImageReader::open(path)
            .map_err(anyhow::Error::from)
            .and_then(read_bitmap)
            .with_context(|| format!("Failed to open {}", path.display()))
            .map_err(SeedError::Decode)?;

        let (width, height) = img.dimensions();
        debug!(path = %path.display(), width, height, "decoded seed image");

        Self::from_rgb(width, height, img.into_raw())
    }

    /// Decode an in-memory bitmap file
    pub fn decode(bytes: &[u8]) -> SeedResult<Self> {
        let img = read_bitmap(ImageReader::new(Cursor::new(bytes)))
            .context("Failed to decode seed image from memory")
            .map_err(SeedError::Decode)?;

        let (width, height) = img.dimensions();

        Self::from_rgb(width, height, img.into_raw())
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Grayscale value of a pixel, the truncated mean of its three channels
    pub fn luminance(&self, x: u32, y: u32) -> u8 {
        let i = (y as usize * self.extent.width as usize + x as usize) * CHANNELS;
        let [r, g, b] = [self.rgb[i], self.rgb[i + 1], self.rgb[i + 2]].map(u16::from);

        ((r + g + b) / 3) as u8
    }
}

/// Sniff the format from the content and decode, refusing anything but a plain RGB bitmap
fn read_bitmap<R: BufRead + Seek>(reader: ImageReader<R>) -> anyhow::Result<RgbImage> {
    let reader = reader.with_guessed_format()?;

    match reader.format() {
        Some(ImageFormat::Bmp) => {}
        Some(format) => bail!("Seed image must be a bitmap, got {format:?}"),
        None => bail!("Seed image format not recognized"),
    }

    match reader.decode()? {
        DynamicImage::ImageRgb8(img) => Ok(img),
        img => bail!("Seed bitmap must be RGB, got {:?}", img.color()),
    }
}

/// Copy `pattern` into the middle of `target`.
///
/// The pattern lands at `((W - w) / 2, (H - h) / 2)`. Cells outside it are left as they were, so
/// the caller decides whether `target` starts out dead.
pub fn load(pattern: &SeedPattern, target: &mut Surface) -> SeedResult<()> {
    let lattice = target.extent();
    let extent = pattern.extent();

    if !lattice.contains(extent) {
        return Err(SeedError::Oversized {
            pattern: extent,
            lattice,
        });
    }

    let xo = (lattice.width - extent.width) / 2;
    let yo = (lattice.height - extent.height) / 2;

    for y in 0..extent.height {
        for x in 0..extent.width {
            target.set(x + xo, y + yo, pattern.luminance(x, y));
        }
    }

    debug!(%extent, xo, yo, "loaded seed pattern");

    Ok(())
}

/// Hands out the path of the image to seed from.
pub trait SeedSource {
    /// `None` means the user backed out
    fn pick(&mut self) -> Option<PathBuf>;
}

/// A seed source that always answers with the same path, such as one given on the command line.
#[derive(Clone, Debug, Default)]
pub struct FixedSource(pub Option<PathBuf>);

impl SeedSource for FixedSource {
    fn pick(&mut self) -> Option<PathBuf> {
        self.0.clone()
    }
}
