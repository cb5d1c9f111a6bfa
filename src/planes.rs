//! Contains the Region struct, which describes a rectangle on the
//! complex plane by its top-left and bottom-right corners, and the
//! arithmetic that relates that rectangle to an integral grid of
//! samples taken at a fixed step.
use crate::complex::{point, sub, Point};
use crate::error::RenderError;

/// The width and height of an integral grid that is assumed to start
/// at 0,0 in its top-left corner.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dimensions(pub usize, pub usize);

impl Dimensions {
    /// The total number of cells in the grid.
    pub fn len(&self) -> usize {
        self.0 * self.1
    }

    /// The total number of cells, or None when that doesn't fit in a
    /// `usize`.
    pub fn checked_len(&self) -> Option<usize> {
        self.0.checked_mul(self.1)
    }

    /// True when the grid has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.0 == 0 || self.1 == 0
    }
}

/// Describes the column and row of a cell in the grid.  Yes, it's the
/// same shape as Dimensions.  Names are important.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pixel(pub usize, pub usize);

/// A sampling window on the complex plane.  Scanning runs left to
/// right along the real axis and top to bottom down the imaginary
/// axis, so the top-left corner carries the larger imaginary part.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Region {
    /// Where scanning starts.
    pub top_left: Point,
    /// Where scanning stops.
    pub bottom_right: Point,
}

impl Region {
    /// Constructor.  Refuses rectangles whose corners are the wrong
    /// way around or not finite.
    pub fn new(top_left: Point, bottom_right: Point) -> Result<Region, RenderError> {
        let corners = [top_left.re, top_left.im, bottom_right.re, bottom_right.im];
        if corners.iter().any(|c| !c.is_finite()) {
            return Err(RenderError::InvalidRegion(
                "Region corners must be finite numbers".to_string(),
            ));
        }

        if bottom_right.re < top_left.re {
            return Err(RenderError::InvalidRegion(
                "The top left corner is not to the left of the bottom right corner".to_string(),
            ));
        }

        if bottom_right.im > top_left.im {
            return Err(RenderError::InvalidRegion(
                "The top left corner is not above the bottom right corner".to_string(),
            ));
        }

        Ok(Region {
            top_left,
            bottom_right,
        })
    }

    /// The width and height of the rectangle as a complex number,
    /// both components non-negative.
    pub fn span(&self) -> Point {
        let d = sub(self.top_left, self.bottom_right);
        point(d.re.abs(), d.im.abs())
    }

    /// How many whole samples fit across and down the rectangle when
    /// sampled every `step`.  Partial steps are dropped.
    pub fn dimensions(&self, step: f64) -> Dimensions {
        let span = self.span();
        Dimensions((span.re / step) as usize, (span.im / step) as usize)
    }

    /// As `dimensions`, but None when either side, or the cell count,
    /// can't be represented.  A finite rectangle can still have an
    /// infinite span, and `as usize` saturates.
    pub fn checked_dimensions(&self, step: f64) -> Option<Dimensions> {
        let span = self.span();
        let (across, down) = (span.re / step, span.im / step);
        let limit = usize::max_value() as f64;
        if !across.is_finite() || !down.is_finite() || across >= limit || down >= limit {
            return None;
        }
        let dimensions = Dimensions(across as usize, down as usize);
        dimensions.checked_len().map(|_| dimensions)
    }

    /// Cut the rectangle into `count` horizontal slices of equal
    /// height, top slice first.  Every slice shares the full real
    /// extent.  Each slice's top is measured from the top of the whole
    /// rectangle, not from the bottom of the previous slice.
    pub fn bands(&self, count: usize) -> Vec<Region> {
        let height = self.span().im / (count as f64);
        (0..count)
            .map(|t| {
                let top = self.top_left.im - (t as f64) * height;
                Region {
                    top_left: point(self.top_left.re, top),
                    bottom_right: point(self.bottom_right.re, top - height),
                }
            })
            .collect()
    }

    /// Given a point inside the rectangle, find the grid cell that
    /// samples it at the given step.  Points outside the rectangle
    /// have no cell.
    pub fn point_to_pixel(&self, p: &Point, step: f64) -> Option<Pixel> {
        let left = (p.re - self.top_left.re) / step;
        let top = (self.top_left.im - p.im) / step;
        let Dimensions(width, height) = self.dimensions(step);
        if left < 0.0 || top < 0.0 || left >= width as f64 || top >= height as f64 {
            return None;
        }
        Some(Pixel(left as usize, top as usize))
    }
}
