#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Band-parallel Mandelbrot renderer
//!
//! The Mandelbrot set is the collection of points `c` on the complex
//! plane for which the orbit of `z <- z^2 + c`, starting from zero,
//! never runs off to infinity.  We sample a rectangle of the plane on
//! a fixed grid, count how many iterations each sample survives before
//! its orbit leaves a circle of radius two, and map that count onto a
//! single grayscale byte.
//!
//! Every sample is independent of every other sample, so the work
//! splits trivially.  The rectangle is cut into equal-height
//! horizontal bands; each band owns its own raster and is rendered on
//! its own thread.  When every band has finished, the rasters are
//! stacked top to bottom and written out as a single PGM graymap.
//! A serial mode renders the same rectangle as one band on the calling
//! thread, with the grayscale inverted, so that the two outputs can be
//! compared pixel for pixel.

pub mod complex;
pub mod config;
pub mod error;
pub mod escape;
pub mod pgm;
pub mod planes;
pub mod raster;
pub mod renderer;

pub use crate::complex::Point;
pub use crate::config::Config;
pub use crate::error::RenderError;
pub use crate::planes::Region;
pub use crate::raster::Raster;
pub use crate::renderer::{run, Band, Mode, Renderer};
