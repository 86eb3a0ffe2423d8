pub mod buffers;
pub mod camera;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod io;
pub mod present;
pub mod raster;
pub mod rule;
pub mod seed;
pub mod surface;

/// Terminal dimension, in characters
pub type ScreenSize = u16;

/// One cell of a surface. `0` is dead, anything else is alive.
pub type Sample = u8;
