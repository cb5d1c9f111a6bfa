//! Render parameters.  Built once at startup, then only ever read.

use crate::complex::point;
use crate::error::RenderError;
use crate::escape::EscapeTime;
use crate::planes::Region;

/// Default spacing between samples on the complex plane.
pub const DEFAULT_STEP: f64 = 0.01;
/// Default iteration cap.
pub const DEFAULT_MAX_ITERATIONS: u32 = 1000;
/// Default escape radius.
pub const DEFAULT_ESCAPE_RADIUS: f64 = 2.0;
/// Default number of bands, and so threads, in a parallel render.
pub const DEFAULT_BANDS: usize = 4;

/// Everything a render needs to know.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Config {
    /// The full rectangle to sample.
    pub region: Region,
    /// Spacing between samples.
    pub step: f64,
    /// Iteration cap for the escape-time test.
    pub max_iterations: u32,
    /// Escape radius for the escape-time test.
    pub escape_radius: f64,
    /// How many horizontal bands a parallel render is cut into.
    pub bands: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            region: Region {
                top_left: point(-3.0, 2.0),
                bottom_right: point(1.0, -2.0),
            },
            step: DEFAULT_STEP,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            escape_radius: DEFAULT_ESCAPE_RADIUS,
            bands: DEFAULT_BANDS,
        }
    }
}

impl Config {
    /// Check every field, including the shape of the region.
    pub fn validate(&self) -> Result<(), RenderError> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(RenderError::InvalidConfig(format!(
                "Step must be a positive number, not {}",
                self.step
            )));
        }
        self.escape_time()?;
        if self.bands == 0 {
            return Err(RenderError::InvalidConfig(
                "Band count must be at least 1".to_string(),
            ));
        }
        Region::new(self.region.top_left, self.region.bottom_right)?;
        if self.region.checked_dimensions(self.step).is_none() {
            return Err(RenderError::InvalidConfig(format!(
                "A step of {} over {:?} makes an image too large to address",
                self.step, self.region
            )));
        }
        Ok(())
    }

    /// The escape-time test these settings describe.
    pub fn escape_time(&self) -> Result<EscapeTime, RenderError> {
        EscapeTime::new(self.max_iterations, self.escape_radius)
    }
}
