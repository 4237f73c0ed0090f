//! Screen rasterization
//!
//! This module consolidates:
//! - View tree snapshot (raster.rs)
//! - Texture surface compositing (raster.rs)

pub mod raster;

pub use raster::{Raster, rasterize, snapshot};
