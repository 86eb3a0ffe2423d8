use rayon::prelude::*;
use tracing::instrument;

use crate::error::AllocationError;
use crate::error::ExecutionError;
use crate::surface::AddressMode;
use crate::surface::Extent;
use crate::surface::Sampler;
use crate::surface::Surface;

/// A per-pixel function, run once for every pixel of the output.
///
/// A program only sees its bound input through a [`Sampler`] and returns the value of one output
/// pixel, so every pixel of a pass is independent of every other.
pub trait FragmentProgram: Sync {
    type Output: Copy + Send;

    /// Shows up in logs
    const NAME: &'static str;

    fn shade(&self, input: &Sampler<'_>, x: u32, y: u32) -> Self::Output;
}

/// Where the fragments of a pass are evaluated.
pub enum Backend {
    /// One row after another on the calling thread
    Serial,

    /// Rows spread over a thread pool
    Parallel(rayon::ThreadPool),
}

impl Backend {
    /// Build a parallel backend. `threads = None` lets rayon pick.
    pub fn parallel(threads: Option<usize>) -> Result<Self, AllocationError> {
        let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("raster-{i}"));

        if let Some(n) = threads {
            builder = builder.num_threads(n);
        }

        Ok(Self::Parallel(builder.build()?))
    }
}

/// Runs fragment programs over full surfaces.
pub struct Rasterizer {
    backend: Backend,
    address_mode: AddressMode,
}

impl Rasterizer {
    pub fn new(backend: Backend, address_mode: AddressMode) -> Self {
        Self {
            backend,
            address_mode,
        }
    }

    pub fn address_mode(&self) -> AddressMode {
        self.address_mode
    }

    /// Evaluate `program` for every pixel of `output`, reading from `input`.
    ///
    /// `output` is row-major with `extent.width` pixels per row. The input must have the same
    /// extent, since each output pixel reads the input texel at its own coordinates.
    #[instrument(level = "trace", skip_all, fields(program = P::NAME, extent = %extent))]
    pub fn run<P: FragmentProgram>(
        &self,
        program: &P,
        input: &Surface,
        extent: Extent,
        output: &mut [P::Output],
    ) -> Result<(), ExecutionError> {
        if input.extent() != extent {
            return Err(ExecutionError::InputMismatch {
                input: input.extent(),
                output: extent,
            });
        }

        if output.len() != extent.area() {
            return Err(ExecutionError::TargetMismatch {
                extent,
                expected: extent.area(),
                got: output.len(),
            });
        }

        let sampler = input.sampler(self.address_mode);
        let width = extent.width as usize;

        let shade_row = |(y, row): (usize, &mut [P::Output])| {
            for (x, px) in row.iter_mut().enumerate() {
                *px = program.shade(&sampler, x as u32, y as u32);
            }
        };

        match &self.backend {
            Backend::Serial => output.chunks_mut(width).enumerate().for_each(shade_row),
            Backend::Parallel(pool) => pool.install(|| {
                output
                    .par_chunks_mut(width)
                    .enumerate()
                    .for_each(shade_row)
            }),
        }

        Ok(())
    }

    /// Run a program whose output is a cell sample, writing straight into `target`.
    pub fn run_into<P>(
        &self,
        program: &P,
        input: &Surface,
        target: &mut Surface,
    ) -> Result<(), ExecutionError>
    where
        P: FragmentProgram<Output = crate::Sample>,
    {
        let extent = target.extent();
        self.run(program, input, extent, target.samples_mut())
    }
}
