//! The path command sequence produced by the monotone interpolator.
//!
//! A sequence always has the same shape: a `Begin` command holding the first
//! sample, then optionally one `Cubic` command for the first segment, then one
//! `SmoothCubic` command per remaining sample.
//!
//! ```ascii
//!  ________________________________________________________________
//! |       |                    |               |               |
//! | Begin | Cubic              | SmoothCubic   | SmoothCubic   | ...
//! | at    | ctrl1, ctrl2, to   | ctrl2, to     | ctrl2, to     |
//! |_______|____________________|_______________|_______________|___
//! ```
//!
//! A `SmoothCubic` command does not store its leading control point. As in the SVG
//! `S` command, it is the reflection of the previous command's trailing control
//! point around the previous end point. [`PathCommands::segments`] resolves it and
//! [`PathCommands::slice`] makes it explicit when a slice would lose it.

use crate::geom::utils::reflect;
use crate::geom::CubicBezierSegment;
use crate::math::{point, Box2D, Point};

use core::fmt;
use core::ops::{Index, Range};
use core::slice;

/// One command of a path command sequence.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PathCommand {
    /// Start of the curve (SVG `M`).
    Begin { at: Point },
    /// A cubic bézier segment with both control points (SVG `C`).
    Cubic { ctrl1: Point, ctrl2: Point, to: Point },
    /// A cubic bézier segment whose leading control point is implied (SVG `S`).
    SmoothCubic { ctrl2: Point, to: Point },
}

impl PathCommand {
    /// The position at which the command leaves the pen.
    #[inline]
    pub fn to(&self) -> Point {
        match *self {
            PathCommand::Begin { at } => at,
            PathCommand::Cubic { to, .. } | PathCommand::SmoothCubic { to, .. } => to,
        }
    }

    /// The trailing control point of a curve command.
    #[inline]
    pub fn ctrl2(&self) -> Option<Point> {
        match *self {
            PathCommand::Begin { .. } => None,
            PathCommand::Cubic { ctrl2, .. } | PathCommand::SmoothCubic { ctrl2, .. } => {
                Some(ctrl2)
            }
        }
    }

    #[inline]
    pub fn is_curve(&self) -> bool {
        !matches!(self, PathCommand::Begin { .. })
    }

    /// The leading control point implied for a smooth cubic command that
    /// follows this one.
    ///
    /// After a curve this is the trailing control point mirrored around the end
    /// point. After a `Begin` there is no control point to mirror and, as in SVG,
    /// the current position is used.
    #[inline]
    pub fn smooth_ctrl(&self) -> Point {
        match self.ctrl2() {
            Some(ctrl2) => reflect(ctrl2, self.to()),
            None => self.to(),
        }
    }
}

/// An ordered sequence of path commands.
///
/// Built by [`points`](crate::points), by a [`PathCommandsBuilder`] or from a
/// `Vec<PathCommand>`. It is never modified after creation: slicing produces a
/// new sequence.
#[derive(Clone, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(transparent))]
pub struct PathCommands {
    cmds: Vec<PathCommand>,
}

impl PathCommands {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        PathCommands { cmds: Vec::new() }
    }

    /// Creates a builder for path commands.
    pub fn builder() -> PathCommandsBuilder {
        PathCommandsBuilder::new()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Returns an iterator over the commands.
    pub fn iter(&self) -> slice::Iter<PathCommand> {
        self.cmds.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[PathCommand] {
        &self.cmds
    }

    pub fn into_vec(self) -> Vec<PathCommand> {
        self.cmds
    }

    /// The position of the first command, usually the start of the curve.
    pub fn first_point(&self) -> Option<Point> {
        self.cmds.first().map(PathCommand::to)
    }

    /// The end point of the last command.
    pub fn last_point(&self) -> Option<Point> {
        self.cmds.last().map(PathCommand::to)
    }

    /// Returns the sub-sequence for the commands in `start..end`, rewritten so that
    /// it draws the same sub-curve on its own.
    ///
    /// Out of range bounds are clamped and an inverted range produces an empty
    /// sequence. When `start` is not zero:
    ///
    /// - the command at `start` is reduced to a `Begin` at its end point,
    /// - if the next command is a `SmoothCubic`, it becomes a `Cubic` whose
    ///   leading control point is the reflection it previously relied on.
    ///
    /// Slicing `0..len` returns an identical sequence.
    pub fn slice(&self, start: usize, end: usize) -> PathCommands {
        let end = end.min(self.cmds.len());
        let start = start.min(end);
        let mut cmds = self.cmds[start..end].to_vec();

        if start > 0 && !cmds.is_empty() {
            let prev = cmds[0];

            if let Some(&PathCommand::SmoothCubic { ctrl2, to }) = cmds.get(1) {
                cmds[1] = PathCommand::Cubic {
                    ctrl1: prev.smooth_ctrl(),
                    ctrl2,
                    to,
                };
            }

            cmds[0] = PathCommand::Begin { at: prev.to() };
        }

        PathCommands { cmds }
    }

    /// Same as `slice` with a range.
    pub fn slice_range(&self, range: Range<usize>) -> PathCommands {
        self.slice(range.start, range.end)
    }

    /// Returns an iterator over the cubic bézier segments described by the commands,
    /// with the implied control points of smooth commands resolved.
    pub fn segments(&self) -> Segments {
        Segments::new(&self.cmds)
    }

    /// Returns the smallest rectangle containing the curve, or `None` for an
    /// empty sequence.
    pub fn bounding_box(&self) -> Option<Box2D> {
        let start = self.first_point()?;
        let (mut min, mut max) = (start, start);
        for segment in self.segments() {
            // Not Box2D::union, which drops zero-area boxes.
            let bb = segment.bounding_box();
            min = min.min(bb.min);
            max = max.max(bb.max);
        }

        Some(Box2D { min, max })
    }
}

impl fmt::Debug for PathCommands {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.debug_list().entries(self.cmds.iter()).finish()
    }
}

impl Index<usize> for PathCommands {
    type Output = PathCommand;
    fn index(&self, index: usize) -> &PathCommand {
        &self.cmds[index]
    }
}

impl<'l> IntoIterator for &'l PathCommands {
    type Item = &'l PathCommand;
    type IntoIter = slice::Iter<'l, PathCommand>;

    fn into_iter(self) -> slice::Iter<'l, PathCommand> {
        self.iter()
    }
}

impl IntoIterator for PathCommands {
    type Item = PathCommand;
    type IntoIter = std::vec::IntoIter<PathCommand>;

    fn into_iter(self) -> std::vec::IntoIter<PathCommand> {
        self.cmds.into_iter()
    }
}

impl From<Vec<PathCommand>> for PathCommands {
    fn from(cmds: Vec<PathCommand>) -> Self {
        PathCommands { cmds }
    }
}

impl core::iter::FromIterator<PathCommand> for PathCommands {
    fn from_iter<T: IntoIterator<Item = PathCommand>>(iter: T) -> Self {
        PathCommands {
            cmds: iter.into_iter().collect(),
        }
    }
}

/// Returns the sub-sequence of `commands` in `start..end`.
///
/// See [`PathCommands::slice`].
pub fn slice(commands: &PathCommands, start: usize, end: usize) -> PathCommands {
    commands.slice(start, end)
}

/// Builds path commands.
#[derive(Clone, Debug, Default)]
pub struct PathCommandsBuilder {
    cmds: Vec<PathCommand>,
}

impl PathCommandsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        PathCommandsBuilder {
            cmds: Vec::with_capacity(cap),
        }
    }

    pub fn begin(&mut self, at: Point) {
        self.cmds.push(PathCommand::Begin { at });
    }

    pub fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.cmds.push(PathCommand::Cubic { ctrl1, ctrl2, to });
    }

    pub fn smooth_cubic_bezier_to(&mut self, ctrl2: Point, to: Point) {
        self.cmds.push(PathCommand::SmoothCubic { ctrl2, to });
    }

    pub fn build(self) -> PathCommands {
        PathCommands { cmds: self.cmds }
    }
}

/// An iterator of the cubic bézier segments of a path command sequence.
///
/// A sequence that does not start with `Begin` starts at the origin.
pub struct Segments<'l> {
    iter: slice::Iter<'l, PathCommand>,
    current: Point,
    prev_ctrl: Option<Point>,
}

impl<'l> Segments<'l> {
    fn new(cmds: &'l [PathCommand]) -> Self {
        Segments {
            iter: cmds.iter(),
            current: point(0.0, 0.0),
            prev_ctrl: None,
        }
    }
}

impl<'l> Iterator for Segments<'l> {
    type Item = CubicBezierSegment;

    fn next(&mut self) -> Option<CubicBezierSegment> {
        loop {
            let (ctrl1, ctrl2, to) = match *self.iter.next()? {
                PathCommand::Begin { at } => {
                    self.current = at;
                    self.prev_ctrl = None;
                    continue;
                }
                PathCommand::Cubic { ctrl1, ctrl2, to } => (ctrl1, ctrl2, to),
                PathCommand::SmoothCubic { ctrl2, to } => {
                    let ctrl1 = match self.prev_ctrl {
                        Some(prev) => reflect(prev, self.current),
                        None => self.current,
                    };
                    (ctrl1, ctrl2, to)
                }
            };

            let segment = CubicBezierSegment {
                from: self.current,
                ctrl1,
                ctrl2,
                to,
            };
            self.current = to;
            self.prev_ctrl = Some(ctrl2);

            return Some(segment);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.iter.len()))
    }
}

#[cfg(test)]
fn sample_commands() -> PathCommands {
    let mut builder = PathCommands::builder();
    builder.begin(point(0.0, 0.0));
    builder.cubic_bezier_to(point(1.0, 1.0), point(2.0, 3.0), point(3.0, 3.0));
    builder.smooth_cubic_bezier_to(point(5.0, 4.0), point(6.0, 2.0));
    builder.smooth_cubic_bezier_to(point(8.0, 0.0), point(9.0, 1.0));
    builder.build()
}

#[test]
fn slice_whole_is_identity() {
    let cmds = sample_commands();

    assert_eq!(cmds.slice(0, cmds.len()), cmds);
    assert_eq!(cmds.slice(0, 100), cmds);
    assert_eq!(slice(&cmds, 0, cmds.len()), cmds);
}

#[test]
fn slice_prefix_keeps_commands() {
    let cmds = sample_commands();
    let head = cmds.slice(0, 2);

    assert_eq!(head.as_slice(), &cmds.as_slice()[0..2]);
}

#[test]
fn slice_rewrites_leading_commands() {
    let cmds = sample_commands();
    let tail = cmds.slice(2, 4);

    assert_eq!(tail.len(), 2);
    assert_eq!(tail[0], PathCommand::Begin { at: point(6.0, 2.0) });
    // Reflection of (5, 4) around (6, 2).
    assert_eq!(
        tail[1],
        PathCommand::Cubic {
            ctrl1: point(7.0, 0.0),
            ctrl2: point(8.0, 0.0),
            to: point(9.0, 1.0),
        }
    );
}

#[test]
fn slice_from_first_curve() {
    let cmds = sample_commands();
    let tail = cmds.slice(1, 4);

    assert_eq!(tail[0], PathCommand::Begin { at: point(3.0, 3.0) });
    // Reflection of (2, 3) around (3, 3).
    assert_eq!(
        tail[1],
        PathCommand::Cubic {
            ctrl1: point(4.0, 3.0),
            ctrl2: point(5.0, 4.0),
            to: point(6.0, 2.0),
        }
    );
    assert_eq!(tail[2], cmds[3]);
}

#[test]
fn sliced_segments_match_full_segments() {
    let cmds = sample_commands();
    let full: Vec<CubicBezierSegment> = cmds.segments().collect();

    for k in 0..cmds.len() {
        // Command k ends segment k - 1, so the slice starts drawing at segment k.
        let sliced: Vec<CubicBezierSegment> = cmds.slice(k, cmds.len()).segments().collect();
        assert_eq!(sliced.as_slice(), &full[k..]);
    }
}

#[test]
fn sliced_interpolated_segments_match_full_segments() {
    let samples: Vec<Point> = (0..50)
        .map(|i| {
            let x = i as f64 * 0.7;
            point(x, (x * 0.9).sin() * 10.0 + x)
        })
        .collect();
    let cmds = crate::points(&samples);
    let full: Vec<CubicBezierSegment> = cmds.segments().collect();
    assert_eq!(full.len(), samples.len() - 1);

    for k in 0..cmds.len() {
        let sliced: Vec<CubicBezierSegment> = cmds.slice(k, cmds.len()).segments().collect();
        assert_eq!(sliced.as_slice(), &full[k..]);

        for end in k..=cmds.len() {
            let sliced: Vec<CubicBezierSegment> = cmds.slice(k, end).segments().collect();
            assert_eq!(sliced.as_slice(), &full[k..end.max(k + 1) - 1]);
        }
    }
}

#[test]
fn slice_degenerate_ranges() {
    let cmds = sample_commands();

    assert!(cmds.slice(3, 2).is_empty());
    assert!(cmds.slice(10, 20).is_empty());
    assert!(cmds.slice(4, 4).is_empty());

    let single = cmds.slice(3, 4);
    assert_eq!(single.as_slice(), &[PathCommand::Begin { at: point(9.0, 1.0) }]);

    assert!(PathCommands::new().slice(0, 3).is_empty());
    assert!(PathCommands::new().slice(1, 3).is_empty());
}

#[test]
fn slice_after_begin_uses_current_position() {
    let cmds: PathCommands = vec![
        PathCommand::Begin { at: point(0.0, 0.0) },
        PathCommand::Begin { at: point(1.0, 1.0) },
        PathCommand::SmoothCubic {
            ctrl2: point(2.0, 2.0),
            to: point(3.0, 3.0),
        },
    ]
    .into();

    let tail = cmds.slice(1, 3);
    assert_eq!(
        tail[1],
        PathCommand::Cubic {
            ctrl1: point(1.0, 1.0),
            ctrl2: point(2.0, 2.0),
            to: point(3.0, 3.0),
        }
    );
}

#[test]
fn segments_resolve_smooth_commands() {
    let cmds = sample_commands();
    let segments: Vec<CubicBezierSegment> = cmds.segments().collect();

    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0].from, point(0.0, 0.0));
    assert_eq!(segments[1].from, point(3.0, 3.0));
    assert_eq!(segments[1].ctrl1, point(4.0, 3.0));
    assert_eq!(segments[2].ctrl1, point(7.0, 0.0));
    assert_eq!(segments[2].to, point(9.0, 1.0));

    for pair in segments.windows(2) {
        assert_eq!(pair[0].to, pair[1].from);
        // Smooth joins are C1: the control points are symmetric around the join.
        assert_eq!(pair[0].to - pair[0].ctrl2, pair[1].ctrl1 - pair[1].from);
    }
}

#[test]
fn segments_without_begin_start_at_origin() {
    let cmds: PathCommands = vec![PathCommand::SmoothCubic {
        ctrl2: point(1.0, 1.0),
        to: point(2.0, 0.0),
    }]
    .into();

    let segment = cmds.segments().next().unwrap();
    assert_eq!(segment.from, point(0.0, 0.0));
    assert_eq!(segment.ctrl1, point(0.0, 0.0));
}

#[test]
fn accessors() {
    let cmds = sample_commands();

    assert_eq!(cmds.first_point(), Some(point(0.0, 0.0)));
    assert_eq!(cmds.last_point(), Some(point(9.0, 1.0)));
    assert_eq!(cmds.iter().filter(|cmd| cmd.is_curve()).count(), 3);
    assert_eq!(cmds[1].ctrl2(), Some(point(2.0, 3.0)));
    assert_eq!(cmds[0].ctrl2(), None);
    assert_eq!((&cmds).into_iter().count(), 4);
    assert_eq!(cmds.clone().into_vec().len(), 4);

    let empty = PathCommands::new();
    assert_eq!(empty.first_point(), None);
    assert_eq!(empty.bounding_box(), None);
    assert_eq!(empty.segments().count(), 0);
}

#[test]
fn bounding_box_contains_curve() {
    let cmds = sample_commands();
    let bb = cmds.bounding_box().unwrap();

    assert_eq!(bb.min.x, 0.0);
    assert_eq!(bb.max.x, 9.0);
    for segment in cmds.segments() {
        for i in 0..=20 {
            let p = segment.sample(i as f64 / 20.0);
            assert!(p.y >= bb.min.y - 1e-9 && p.y <= bb.max.y + 1e-9);
        }
    }

    let flat: PathCommands = vec![
        PathCommand::Begin { at: point(0.0, 5.0) },
        PathCommand::Cubic {
            ctrl1: point(1.0, 5.0),
            ctrl2: point(2.0, 5.0),
            to: point(3.0, 5.0),
        },
    ]
    .into();
    let bb = flat.bounding_box().unwrap();
    assert_eq!(bb.min, point(0.0, 5.0));
    assert_eq!(bb.max, point(3.0, 5.0));

    let single: PathCommands = vec![PathCommand::Begin { at: point(2.0, 3.0) }].into();
    let bb = single.bounding_box().unwrap();
    assert_eq!(bb.min, point(2.0, 3.0));
    assert_eq!(bb.max, point(2.0, 3.0));
}
