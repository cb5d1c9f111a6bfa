//! The handful of complex operations the escape-time loop needs.
//! `num::Complex` already does the algebra; these wrappers pin down
//! exactly which formula is used, so that the modulus is the plain
//! `sqrt(re² + im²)` and not the rescaled `hypot` that `Complex::norm`
//! uses.

use num::Complex;

/// A point on the complex plane.  The real part is the x-axis, the
/// imaginary part the y-axis.
pub type Point = Complex<f64>;

/// Shorthand constructor.
#[inline]
pub fn point(re: f64, im: f64) -> Point {
    Complex::new(re, im)
}

/// `a + b`
#[inline]
pub fn add(a: Point, b: Point) -> Point {
    a + b
}

/// `a - b`
#[inline]
pub fn sub(a: Point, b: Point) -> Point {
    a - b
}

/// `a * a`
#[inline]
pub fn square(a: Point) -> Point {
    a * a
}

/// The distance of `a` from the origin.
#[inline]
pub fn modulus(a: Point) -> f64 {
    a.norm_sqr().sqrt()
}
