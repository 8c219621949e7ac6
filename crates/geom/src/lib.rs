#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::many_single_char_names)]

//! Simple 2D geometric primitives on top of euclid.
//!
//! This crate is reexported in [monocurve](https://docs.rs/monocurve/).
//!
//! # Overview.
//!
//! This crate implements the maths needed to consume the curves produced by
//! the monotone interpolator:
//!
//! - line segments,
//! - cubic bézier curves (sampling, derivatives, splitting, extrema, bounds,
//!   flattening).
//!
//! Everything works on `f64`, which is what the interpolator computes with.
//!
//! # Flattening
//!
//! Flattening is the action of approximating a curve with a succession of line segments.
//! The tolerance threshold taken as input by the flattening algorithm corresponds
//! to the maximum distance between the curve and its linear approximation.
//! The smaller the tolerance is, the more precise the approximation and the more segments
//! are generated.

// Reexport dependencies.
pub use arrayvec;
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod cubic_bezier;
mod line;

#[doc(inline)]
pub use crate::cubic_bezier::CubicBezierSegment;
#[doc(inline)]
pub use crate::line::LineSegment;

pub mod math {
    //! f64 version of the euclid types used everywhere. The other monocurve
    //! crates reexport them.

    use euclid;

    /// Alias for ```euclid::default::Point2D<f64>```.
    pub type Point = euclid::default::Point2D<f64>;

    /// Alias for ```euclid::default::Vector2D<f64>```.
    pub type Vector = euclid::default::Vector2D<f64>;

    /// Alias for ```euclid::default::Box2D<f64>```.
    pub type Box2D = euclid::default::Box2D<f64>;

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }
}

pub use crate::math::{point, vector, Box2D, Point, Vector};

pub mod utils {
    #[inline]
    pub fn min_max(a: f64, b: f64) -> (f64, f64) {
        if a < b {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Mirror `ctrl` around `center`.
    ///
    /// This is the implicit leading control point of an SVG smooth cubic command
    /// (`S`), computed as `2 * center - ctrl` on each axis.
    #[inline]
    pub fn reflect(ctrl: super::Point, center: super::Point) -> super::Point {
        super::point(center.x * 2.0 - ctrl.x, center.y * 2.0 - ctrl.y)
    }
}

#[test]
fn reflect_around_center() {
    use crate::utils::reflect;

    assert_eq!(reflect(point(1.0, 2.0), point(3.0, 3.0)), point(5.0, 4.0));
    assert_eq!(reflect(point(3.0, 3.0), point(3.0, 3.0)), point(3.0, 3.0));
    assert_eq!(reflect(point(-1.0, 0.5), point(0.0, 0.0)), point(1.0, -0.5));
}
