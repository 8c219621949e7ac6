#![deny(bare_trait_objects)]

//! Monotone cubic interpolation of 2D samples into SVG path commands.
//!
//! # Crates
//!
//! This meta-crate (`monocurve`) reexports the following sub-crates for convenience:
//!
//! * **monocurve_path** - The interpolator, the path command sequence and the slicer.
//! * **monocurve_geom** - Cubic bézier and line segment math on `f64`.
//! * **monocurve_svg** - SVG path serialization and parsing (`svg` feature).
//!
//! Each `monocurve_<name>` crate is reexported as a `<name>` module in `monocurve`.
//!
//! # Feature flags
//!
//! serialization using serde can be enabled with the `serialization` feature flag
//! (disabled by default). The `svg` feature adds `monocurve_svg`.
//!
//! # Example
//!
//! ```
//! use monocurve::math::point;
//!
//! let samples = [point(0.0, 0.0), point(5.0, 10.0), point(10.0, 0.0)];
//! let commands = monocurve::points(&samples);
//!
//! # #[cfg(feature = "svg")]
//! assert_eq!(
//!     monocurve::svg_path(&commands),
//!     "M0 0C0.16666666666666666, 0.3333333333333333, 3.333333333333333, 10, 5, 10\
//!      S9.833333333333334, 0.3333333333333333, 10, 0",
//! );
//!
//! // The part of the curve between the second and the third sample.
//! let tail = monocurve::slice(&commands, 1, 3);
//! assert_eq!(tail.len(), 2);
//!
//! // The same cubic segment, whether it comes from the full path or the slice.
//! assert_eq!(tail.segments().next(), commands.segments().nth(1));
//! ```

pub extern crate monocurve_path;
#[cfg(feature = "svg")]
pub extern crate monocurve_svg;

pub use monocurve_path as path;
#[cfg(feature = "svg")]
pub use monocurve_svg as svg;
pub use path::geom;

pub use path::math;

#[doc(inline)]
pub use path::{points, slice, try_points, PathCommand, PathCommands, ValidationError};
#[cfg(feature = "svg")]
#[doc(inline)]
pub use svg::{parse_path, svg_path, ParseError};
