//! Infinite hexagonal map generation library
//!
//! Re-exports modules for use by binaries and tools.

pub mod ascii;
pub mod boundary;
pub mod explorer;
pub mod grid;
pub mod hex;
pub mod layers;
pub mod params;
pub mod relax;
pub mod rivers;
pub mod seeds;
pub mod tile;
pub mod viewport;
