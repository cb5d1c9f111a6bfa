//! The region buffer: one grayscale sample for every grid point of a
//! rectangle on the complex plane.  A raster is sized once, when it is
//! allocated, and never resized.  Its memory goes away when it is
//! dropped.

use crate::planes::{Dimensions, Region};

/// A row-major grid of grayscale samples, together with the rectangle
/// it was sampled from and whether its shading is inverted.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    region: Region,
    step: f64,
    dimensions: Dimensions,
    invert: bool,
    pixels: Vec<u8>,
}

impl Raster {
    /// Size a zeroed raster for `region` sampled every `step`.  The
    /// width and height are the floor of the rectangle's spans over the
    /// step.
    pub fn new(region: Region, step: f64, invert: bool) -> Raster {
        let dimensions = region.dimensions(step);
        Raster {
            region,
            step,
            dimensions,
            invert,
            pixels: vec![0 as u8; dimensions.len()],
        }
    }

    /// The rectangle this raster samples.
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// The spacing between samples on the complex plane.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Samples across.
    pub fn width(&self) -> usize {
        self.dimensions.0
    }

    /// Samples down.
    pub fn height(&self) -> usize {
        self.dimensions.1
    }

    /// Both of the above.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Whether this raster is shaded light-background.
    pub fn invert(&self) -> bool {
        self.invert
    }

    fn offset(&self, column: usize, row: usize) -> Option<usize> {
        if column < self.width() && row < self.height() {
            Some(row * self.width() + column)
        } else {
            None
        }
    }

    /// The sample at `column`, `row`, if that cell exists.
    pub fn get(&self, column: usize, row: usize) -> Option<u8> {
        self.offset(column, row).map(|o| self.pixels[o])
    }

    /// Mutable access to the sample at `column`, `row`, if that cell
    /// exists.
    pub fn get_mut(&mut self, column: usize, row: usize) -> Option<&mut u8> {
        match self.offset(column, row) {
            Some(o) => Some(&mut self.pixels[o]),
            None => None,
        }
    }

    /// The samples one row at a time, top row first.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels.chunks(self.width().max(1))
    }

    /// The raw row-major samples.
    pub fn as_slice(&self) -> &[u8] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex::point;

    fn raster() -> Raster {
        let region = Region::new(point(0.0, 1.0), point(1.0, 0.0)).unwrap();
        Raster::new(region, 0.3, true)
    }

    #[test]
    fn new_raster_is_zeroed_and_floored() {
        let r = raster();
        assert_eq!(r.dimensions(), Dimensions(3, 3));
        assert_eq!(r.as_slice(), &[0u8; 9][..]);
        assert!(r.invert());
        assert_eq!(r.step(), 0.3);
    }

    #[test]
    fn accessors_are_bounds_checked() {
        let mut r = raster();
        assert!(r.get_mut(3, 0).is_none());
        assert!(r.get_mut(0, 3).is_none());
        assert_eq!(r.get(3, 3), None);
        *r.get_mut(2, 1).unwrap() = 42;
        assert_eq!(r.get(2, 1), Some(42));
        assert_eq!(r.as_slice()[5], 42);
    }

    #[test]
    fn rows_are_width_long() {
        let r = raster();
        let rows: Vec<&[u8]> = r.rows().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.len() == 3));
    }

    #[test]
    fn empty_raster_has_no_rows() {
        let region = Region::new(point(0.0, 1.0), point(1.0, 0.0)).unwrap();
        let r = Raster::new(region, 2.0, false);
        assert_eq!(r.rows().count(), 0);
    }
}
