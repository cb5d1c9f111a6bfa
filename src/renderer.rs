// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The band kernel and the driver that partitions, dispatches and
//! collects bands.
//!
//! A band is a rectangle and the raster that samples it.  The raster
//! belongs to exactly one band, and the band belongs to exactly one
//! thread while it is being computed: it is moved into the worker and
//! moved back out through the join handle.  No band ever sees another
//! band's memory, so nothing is locked.

use crossbeam::thread::ScopedJoinHandle;
use log::{debug, info};
use std::path::Path;
use std::time::Instant;

use crate::complex::point;
use crate::config::Config;
use crate::error::RenderError;
use crate::escape::EscapeTime;
use crate::pgm;
use crate::planes::{Dimensions, Region};
use crate::raster::Raster;

/// Walk the raster's rectangle on its sample grid, top row first, and
/// shade every cell.  Both the rectangle and the raster's own
/// dimensions bound the walk; whichever runs out first stops it, so
/// accumulated rounding in the coordinates can never write past the
/// edge of the raster.
pub fn compute_band(raster: &mut Raster, escape: &EscapeTime) {
    let region = *raster.region();
    let step = raster.step();
    let invert = raster.invert();
    let (width, height) = (raster.width(), raster.height());

    let mut y = region.top_left.im;
    let mut row = 0;
    while y >= region.bottom_right.im && row < height {
        let mut x = region.top_left.re;
        let mut column = 0;
        while x <= region.bottom_right.re && column < width {
            if let Some(cell) = raster.get_mut(column, row) {
                *cell = escape.shade(point(x, y), invert);
            }
            x += step;
            column += 1;
        }
        y -= step;
        row += 1;
    }

    info!(
        "  done [{:+.6}|{:+.6}] ~ [{:+.6}|{:+.6}]",
        region.top_left.re, region.top_left.im, region.bottom_right.re, region.bottom_right.im
    );
}

/// One horizontal slice of the full rectangle, with its raster.
#[derive(Debug)]
pub struct Band {
    /// Position in the stack, counting from zero at the top.
    pub index: usize,
    /// The samples for this slice.
    pub raster: Raster,
}

impl Band {
    /// Allocate a zeroed raster for `region`.
    pub fn new(index: usize, region: Region, step: f64, invert: bool) -> Band {
        Band {
            index,
            raster: Raster::new(region, step, invert),
        }
    }

    /// Run the kernel over this band.
    pub fn compute(&mut self, escape: &EscapeTime) {
        compute_band(&mut self.raster, escape);
    }
}

/// The two ways to render.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// One band, on the calling thread, light background.
    Serial,
    /// `Config::bands` bands, one thread each, dark background.
    Parallel,
}

impl Mode {
    /// Serial renders are inverted, parallel ones are not.
    pub fn invert(self) -> bool {
        self == Mode::Serial
    }

    /// What the mode is called on the command line and in the logs.
    pub fn name(self) -> &'static str {
        match self {
            Mode::Serial => "serial",
            Mode::Parallel => "parallel",
        }
    }

    /// Where a full run writes this mode's image.
    pub fn default_output(self) -> &'static str {
        match self {
            Mode::Serial => "./mandelbrot-s.pgm",
            Mode::Parallel => "./mandelbrot-p.pgm",
        }
    }
}

/// Holds a validated configuration and renders it.  Once built, it
/// is not mutable.
#[derive(Debug)]
pub struct Renderer {
    config: Config,
    escape: EscapeTime,
}

impl Renderer {
    /// Validates the configuration before accepting it.
    pub fn new(config: Config) -> Result<Self, RenderError> {
        config.validate()?;
        let escape = config.escape_time()?;
        Ok(Renderer { config, escape })
    }

    /// The settings this renderer was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The size of the image for the whole rectangle.
    pub fn dimensions(&self) -> Dimensions {
        self.config.region.dimensions(self.config.step)
    }

    /// The whole rectangle as one inverted band, on this thread.
    pub fn render_serial(&self) -> Vec<Band> {
        let mut band = Band::new(0, self.config.region, self.config.step, Mode::Serial.invert());
        band.compute(&self.escape);
        vec![band]
    }

    /// Cut the rectangle into `Config::bands` equal slices and render
    /// each on its own thread.  Waits for every thread, whether or not
    /// any of them fails, then hands the bands back top first.
    pub fn render_parallel(&self) -> Result<Vec<Band>, RenderError> {
        let escape = &self.escape;
        let bands: Vec<Band> = self
            .config
            .region
            .bands(self.config.bands)
            .into_iter()
            .enumerate()
            .map(|(index, region)| {
                Band::new(index, region, self.config.step, Mode::Parallel.invert())
            })
            .collect();

        let joined = crossbeam::scope(|spawner| {
            let handles: Vec<ScopedJoinHandle<Band>> = bands
                .into_iter()
                .map(|mut band| {
                    debug!(
                        "Dispatching band {} ({}x{})",
                        band.index,
                        band.raster.width(),
                        band.raster.height()
                    );
                    spawner.spawn(move |_| {
                        band.compute(escape);
                        band
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join())
                .collect::<Vec<_>>()
        })
        .map_err(|_| RenderError::Panicked("render scope".to_string()))?;

        joined
            .into_iter()
            .enumerate()
            .map(|(index, band)| band.map_err(|_| RenderError::Panicked(format!("band {}", index))))
            .collect()
    }

    /// Render in the given mode.
    pub fn render(&self, mode: Mode) -> Result<Vec<Band>, RenderError> {
        match mode {
            Mode::Serial => Ok(self.render_serial()),
            Mode::Parallel => self.render_parallel(),
        }
    }

    /// Render in the given mode and save the stacked bands to `path`,
    /// declaring the dimensions of the whole rectangle.  Returns the
    /// dimensions actually written.
    pub fn save<P: AsRef<Path>>(
        &self,
        mode: Mode,
        path: P,
        binary: bool,
    ) -> Result<Dimensions, RenderError> {
        let rasters: Vec<Raster> = self
            .render(mode)?
            .into_iter()
            .map(|band| band.raster)
            .collect();
        let Dimensions(width, height) = self.dimensions();
        if binary {
            pgm::save_binary(&rasters, width, height, path)
        } else {
            pgm::save(&rasters, width, height, path)
        }
    }
}

/// Render and save one image, logging when it began and how long it
/// took under `label`.
pub fn run<P: AsRef<Path>>(
    label: &str,
    renderer: &Renderer,
    mode: Mode,
    path: P,
    binary: bool,
) -> Result<Dimensions, RenderError> {
    info!("{} Mandelbrot begin", label);
    let began = Instant::now();
    let written = renderer.save(mode, path, binary)?;
    info!(
        "{} Mandelbrot end ({} s)",
        label,
        began.elapsed().as_secs()
    );
    Ok(written)
}
