//! Escape-time evaluation: how long does a point's orbit stay inside
//! the escape circle, and what shade of gray is that?

use crate::complex::{add, modulus, point, square, Point};
use crate::error::RenderError;

/// The greatest intensity a graymap sample can hold.
pub const MAX_GRAY: u8 = 255;

/// The two knobs of the escape-time test.  Serial and parallel renders
/// must share one of these for their outputs to agree.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EscapeTime {
    max_iterations: u32,
    radius: f64,
}

impl EscapeTime {
    /// `max_iterations` is the cap past which a point is taken to be a
    /// member of the set; it must be at least 1.  An orbit has escaped
    /// once its modulus reaches `radius`, which must be positive.
    pub fn new(max_iterations: u32, radius: f64) -> Result<EscapeTime, RenderError> {
        if max_iterations == 0 {
            return Err(RenderError::InvalidConfig(
                "Iteration cap must be at least 1".to_string(),
            ));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(RenderError::InvalidConfig(format!(
                "Escape radius must be a positive number, not {}",
                radius
            )));
        }
        Ok(EscapeTime {
            max_iterations,
            radius,
        })
    }

    /// The iteration cap.
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// The escape radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Iterate `z <- z^2 + c` from zero and return the number of
    /// iterations completed before the orbit escaped, or
    /// `max_iterations` if it never did.  A non-finite orbit fails the
    /// `< radius` comparison and so counts as escaped.
    pub fn iterate(&self, c: Point) -> u32 {
        let mut z = point(0.0, 0.0);
        let mut i = 0;
        while i < self.max_iterations && modulus(z) < self.radius {
            z = add(square(z), c);
            i += 1;
        }
        i
    }

    /// Map an iteration count from `[0, max_iterations]` linearly onto
    /// `[0, 255]`, truncating.  `invert` flips it to a light background.
    pub fn gray(&self, i: u32, invert: bool) -> u8 {
        let g = (u64::from(i) * u64::from(MAX_GRAY) / u64::from(self.max_iterations)) as u8;
        if invert {
            MAX_GRAY - g
        } else {
            g
        }
    }

    /// `gray(iterate(c))`, the value stored for one sample.
    #[inline]
    pub fn shade(&self, c: Point, invert: bool) -> u8 {
        self.gray(self.iterate(c), invert)
    }
}
