#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]

//! Monotone cubic interpolation of 2D samples into path commands.
//!
//! Given samples ordered by strictly increasing `x`, [`points`] computes a chain of
//! cubic bézier segments that passes through every sample without overshooting
//! between samples that share a trend. The result is a [`PathCommands`] sequence
//! using the three commands of the SVG path syntax the curve needs: a move-to,
//! one full cubic and then smooth cubics whose leading control point is implied.
//!
//! This crate is reexported in [monocurve](https://docs.rs/monocurve/).
//!
//! # Examples
//!
//! ```
//! use monocurve_path::{points, PathCommand};
//! use monocurve_path::math::point;
//!
//! let samples = [point(0.0, 0.0), point(5.0, 10.0), point(10.0, 0.0)];
//! let commands = points(&samples);
//!
//! assert_eq!(commands.len(), 3);
//! assert_eq!(commands[0], PathCommand::Begin { at: point(0.0, 0.0) });
//!
//! // Draw only the part of the curve starting at the second sample.
//! let tail = commands.slice(1, commands.len());
//! assert_eq!(tail.first_point(), Some(point(5.0, 10.0)));
//!
//! for segment in commands.segments() {
//!     println!("{:?}", segment);
//! }
//! ```

pub use monocurve_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod commands;
mod error;
pub mod monotone;

#[doc(inline)]
pub use crate::commands::{slice, PathCommand, PathCommands, PathCommandsBuilder, Segments};
pub use crate::error::ValidationError;
#[doc(inline)]
pub use crate::monotone::{points, points_with_options, try_points, MonotoneOptions};

pub use crate::geom::math;
