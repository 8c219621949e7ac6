#![deny(bare_trait_objects)]

//! # monocurve SVG
//!
//! Utilities to write path commands in the SVG path syntax and to read them back.
//!
//! The syntax written by [`svg_path`] is the small subset of the SVG path language
//! the interpolator needs: `M`, `C` and `S`. Parsing is built on top of the
//! [svgtypes](https://crates.io/crates/svgtypes) path tokenizer and accepts the
//! same subset, in absolute or relative form.
//!
//! ```
//! use monocurve_path::points;
//! use monocurve_path::math::point;
//! use monocurve_svg::{parse_path, svg_path};
//!
//! let commands = points(&[point(0.0, 0.0), point(10.0, 10.0)]);
//! let d = svg_path(&commands);
//! assert!(d.starts_with("M0 0C"));
//!
//! assert_eq!(parse_path(&d).unwrap(), commands);
//! ```

extern crate monocurve_path as path;

pub use svgtypes;

pub mod parser;
pub mod serializer;

#[doc(inline)]
pub use crate::parser::{parse_path, ParseError};
#[doc(inline)]
pub use crate::serializer::{svg_path, Number, PathSerializer};
