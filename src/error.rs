use std::collections::TryReserveError;

use thiserror::Error;

use crate::surface::Extent;

pub type SeedResult<T> = Result<T, SeedError>;

/// Failure to turn an image into an initial generation. The engine stays paused.
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Failed to decode seed image")]
    Decode(#[source] anyhow::Error),

    #[error("Seed pattern is {pattern} but the lattice is only {lattice}")]
    Oversized { pattern: Extent, lattice: Extent },

    #[error("Seed pattern of {extent} expects {expected} samples, got {got}")]
    Malformed {
        extent: Extent,
        expected: usize,
        got: usize,
    },

    #[error("Seed pattern is empty")]
    Empty,
}

/// Failure to create a surface or an execution resource. Fatal.
#[derive(Error, Debug)]
pub enum AllocationError {
    #[error("Cannot allocate a surface of {0}")]
    ZeroExtent(Extent),

    #[error("Out of memory allocating a surface of {extent}")]
    OutOfMemory {
        extent: Extent,
        #[source]
        source: TryReserveError,
    },

    #[error("Failed to build the raster thread pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Failure to run a pass against its bound surfaces. Fatal.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Output target holds {got} pixels, expected {expected} for {extent}")]
    TargetMismatch {
        extent: Extent,
        expected: usize,
        got: usize,
    },

    #[error("Input surface is {input}, but the pass renders {output}")]
    InputMismatch { input: Extent, output: Extent },
}

/// Where in the program's life a fatal failure happened.
///
/// Every stage exits with its own status so failures can be told apart from the shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Terminal,
    Executor,
    SurfaceA,
    SurfaceB,
    Step,
}

impl Stage {
    pub fn exit_code(self) -> u8 {
        match self {
            Stage::Terminal => 2,
            Stage::Executor => 4,
            Stage::SurfaceA => 5,
            Stage::SurfaceB => 6,
            Stage::Step => 7,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Terminal => "terminal setup",
            Stage::Executor => "raster executor",
            Stage::SurfaceA => "surface A",
            Stage::SurfaceB => "surface B",
            Stage::Step => "generation step",
        };

        f.write_str(name)
    }
}

#[derive(Error, Debug)]
#[error("Failed to set up {stage}")]
pub struct EngineError {
    pub stage: Stage,

    #[source]
    pub source: AllocationError,
}

impl EngineError {
    pub fn new(stage: Stage, source: AllocationError) -> Self {
        Self { stage, source }
    }
}
