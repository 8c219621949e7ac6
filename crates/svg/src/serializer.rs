use crate::path::math::Point;
use crate::path::{PathCommand, PathCommands};

use std::fmt;

/// Writes path commands as an SVG path string.
///
/// - `Begin` is written as `M{x} {y}`,
/// - `Cubic` as `C{x1}, {y1}, {x2}, {y2}, {x}, {y}`,
/// - `SmoothCubic` as `S{x2}, {y2}, {x}, {y}`.
///
/// Commands are not separated and numbers are formatted with [`Number`].
pub fn svg_path(commands: &PathCommands) -> String {
    let mut serializer = PathSerializer::with_capacity(commands.len() * 48);
    for cmd in commands {
        serializer.push(cmd);
    }

    serializer.build()
}

/// Builds the SVG path string one command at a time.
///
/// Produces exactly the output of [`svg_path`].
#[derive(Clone, Debug, Default)]
pub struct PathSerializer {
    path: String,
}

impl PathSerializer {
    pub fn new() -> Self {
        PathSerializer {
            path: String::new(),
        }
    }

    pub fn with_capacity(cap: usize) -> Self {
        PathSerializer {
            path: String::with_capacity(cap),
        }
    }

    pub fn begin(&mut self, at: Point) {
        self.path += &format!("M{} {}", Number(at.x), Number(at.y));
    }

    pub fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.path += &format!(
            "C{}, {}, {}, {}, {}, {}",
            Number(ctrl1.x),
            Number(ctrl1.y),
            Number(ctrl2.x),
            Number(ctrl2.y),
            Number(to.x),
            Number(to.y),
        );
    }

    pub fn smooth_cubic_bezier_to(&mut self, ctrl2: Point, to: Point) {
        self.path += &format!(
            "S{}, {}, {}, {}",
            Number(ctrl2.x),
            Number(ctrl2.y),
            Number(to.x),
            Number(to.y),
        );
    }

    pub fn push(&mut self, cmd: &PathCommand) {
        match *cmd {
            PathCommand::Begin { at } => self.begin(at),
            PathCommand::Cubic { ctrl1, ctrl2, to } => self.cubic_bezier_to(ctrl1, ctrl2, to),
            PathCommand::SmoothCubic { ctrl2, to } => self.smooth_cubic_bezier_to(ctrl2, to),
        }
    }

    pub fn build(self) -> String {
        self.path
    }
}

/// Formats a number the way JavaScript converts numbers to strings.
///
/// Renderers consuming the path were written against that output, so the
/// differences with Rust's formatting matter:
///
/// - shortest round-trip digits, no trailing `.0` for integral values,
/// - `-0` is written as `0`,
/// - `NaN`, `Infinity` and `-Infinity`,
/// - exponent notation with an explicit sign (`1e+21`, `1.5e-7`) when the
///   magnitude is at least `1e21` or below `1e-6`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Number(pub f64);

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let v = self.0;
        if v.is_nan() {
            return f.write_str("NaN");
        }
        if v.is_infinite() {
            return f.write_str(if v > 0.0 { "Infinity" } else { "-Infinity" });
        }
        if v == 0.0 {
            return f.write_str("0");
        }

        let magnitude = v.abs();
        if magnitude >= 1e21 || magnitude < 1e-6 {
            let text = format!("{:e}", v);
            return match text.split_once('e') {
                Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                    write!(f, "{}e+{}", mantissa, exponent)
                }
                _ => f.write_str(&text),
            };
        }

        write!(f, "{}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::math::point;
    use crate::path::points;

    #[test]
    fn peak() {
        let cmds = points(&[point(0.0, 0.0), point(5.0, 10.0), point(10.0, 0.0)]);

        assert_eq!(
            svg_path(&cmds),
            "M0 0C0.16666666666666666, 0.3333333333333333, 3.333333333333333, 10, 5, 10\
             S9.833333333333334, 0.3333333333333333, 10, 0"
        );
    }

    #[test]
    fn two_samples() {
        let cmds = points(&[point(0.0, 0.0), point(10.0, 10.0)]);

        assert_eq!(
            svg_path(&cmds),
            "M0 0C0.8333333333333334, 0.8333333333333334, 9.166666666666666, 9.166666666666666, 10, 10"
        );
    }

    #[test]
    fn flat() {
        let cmds = points(&[point(0.0, 5.0), point(10.0, 5.0), point(20.0, 5.0)]);

        assert_eq!(
            svg_path(&cmds),
            "M0 5C1.6666666666666667, 5, 6.666666666666666, 5, 10, 5S18.333333333333332, 5, 20, 5"
        );
    }

    #[test]
    fn sliced() {
        let cmds = points(&[point(0.0, 0.0), point(5.0, 10.0), point(10.0, 0.0)]);
        let tail = cmds.slice(1, cmds.len());

        assert_eq!(
            svg_path(&tail),
            "M5 10C6.666666666666667, 10, 9.833333333333334, 0.3333333333333333, 10, 0"
        );
    }

    #[test]
    fn empty_and_single() {
        assert_eq!(svg_path(&PathCommands::new()), "");
        assert_eq!(svg_path(&points(&[point(-1.5, 2.0)])), "M-1.5 2");
    }

    #[test]
    fn serializer_matches_svg_path() {
        let mut serializer = PathSerializer::new();
        serializer.begin(point(0.0, 0.0));
        serializer.cubic_bezier_to(point(1.0, 2.0), point(3.0, 4.0), point(5.0, 6.0));
        serializer.smooth_cubic_bezier_to(point(7.0, 8.0), point(9.0, 10.0));

        let mut builder = PathCommands::builder();
        builder.begin(point(0.0, 0.0));
        builder.cubic_bezier_to(point(1.0, 2.0), point(3.0, 4.0), point(5.0, 6.0));
        builder.smooth_cubic_bezier_to(point(7.0, 8.0), point(9.0, 10.0));

        let expected = "M0 0C1, 2, 3, 4, 5, 6S7, 8, 9, 10";
        assert_eq!(serializer.build(), expected);
        assert_eq!(svg_path(&builder.build()), expected);
    }

    #[test]
    fn numbers() {
        let fmt = |v: f64| Number(v).to_string();

        assert_eq!(fmt(0.0), "0");
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(10.0), "10");
        assert_eq!(fmt(-2.5), "-2.5");
        assert_eq!(fmt(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(fmt(f64::NAN), "NaN");
        assert_eq!(fmt(f64::INFINITY), "Infinity");
        assert_eq!(fmt(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(fmt(1e20), "100000000000000000000");
        assert_eq!(fmt(1e21), "1e+21");
        assert_eq!(fmt(-1.5e300), "-1.5e+300");
        assert_eq!(fmt(0.000001), "0.000001");
        assert_eq!(fmt(1.5e-7), "1.5e-7");
        assert_eq!(fmt(-2e-10), "-2e-10");
    }

    #[test]
    fn non_finite_samples_are_written_out() {
        let cmds = points(&[point(0.0, f64::NAN), point(1.0, 1.0)]);

        assert!(svg_path(&cmds).starts_with("M0 NaNC0, NaN, "));
    }
}
