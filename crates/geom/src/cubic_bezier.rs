use crate::utils::min_max;
use crate::{point, Box2D, LineSegment, Point, Vector};
use arrayvec::ArrayVec;

use core::ops::Range;

/// A 2d curve segment defined by four points: the beginning of the segment, two control
/// points and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * from + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CubicBezierSegment {
    pub from: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

impl CubicBezierSegment {
    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: f64) -> Point {
        point(self.x(t), self.y(t))
    }

    /// Sample the x coordinate of the curve at t (expecting t between 0 and 1).
    pub fn x(&self, t: f64) -> f64 {
        Self::sample_axis(self.from.x, self.ctrl1.x, self.ctrl2.x, self.to.x, t)
    }

    /// Sample the y coordinate of the curve at t (expecting t between 0 and 1).
    pub fn y(&self, t: f64) -> f64 {
        Self::sample_axis(self.from.y, self.ctrl1.y, self.ctrl2.y, self.to.y, t)
    }

    #[inline]
    fn sample_axis(from: f64, ctrl1: f64, ctrl2: f64, to: f64, t: f64) -> f64 {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        from * one_t3 + ctrl1 * 3.0 * one_t2 * t + ctrl2 * 3.0 * one_t * t2 + to * t3
    }

    #[inline]
    fn derivative_coefficients(&self, t: f64) -> (f64, f64, f64, f64) {
        let t2 = t * t;
        (
            -3.0 * t2 + 6.0 * t - 3.0,
            9.0 * t2 - 12.0 * t + 3.0,
            -9.0 * t2 + 6.0 * t,
            3.0 * t2,
        )
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: f64) -> Vector {
        let (c0, c1, c2, c3) = self.derivative_coefficients(t);
        self.from.to_vector() * c0
            + self.ctrl1.to_vector() * c1
            + self.ctrl2.to_vector() * c2
            + self.to.to_vector() * c3
    }

    /// Sample the x coordinate of the curve's derivative at t (expecting t between 0 and 1).
    pub fn dx(&self, t: f64) -> f64 {
        let (c0, c1, c2, c3) = self.derivative_coefficients(t);
        self.from.x * c0 + self.ctrl1.x * c1 + self.ctrl2.x * c2 + self.to.x * c3
    }

    /// Sample the y coordinate of the curve's derivative at t (expecting t between 0 and 1).
    pub fn dy(&self, t: f64) -> f64 {
        let (c0, c1, c2, c3) = self.derivative_coefficients(t);
        self.from.y * c0 + self.ctrl1.y * c1 + self.ctrl2.y * c2 + self.to.y * c3
    }

    /// Return the sub-curve inside a given range of t.
    ///
    /// This is equivalent to splitting at the range's end points.
    pub fn split_range(&self, t_range: Range<f64>) -> Self {
        let (t0, t1) = (t_range.start, t_range.end);
        if t0 == 0.0 {
            return self.before_split(t1);
        }
        // Split at t1 first, then remap t0 into the remaining sub-curve.
        let head = self.before_split(t1);
        if t1 == 0.0 {
            return head;
        }

        head.after_split(t0 / t1)
    }

    /// Split this curve into two sub-curves.
    pub fn split(&self, t: f64) -> (CubicBezierSegment, CubicBezierSegment) {
        let ctrl1a = self.from + (self.ctrl1 - self.from) * t;
        let ctrl2a = self.ctrl1 + (self.ctrl2 - self.ctrl1) * t;
        let ctrl1aa = ctrl1a + (ctrl2a - ctrl1a) * t;
        let ctrl3a = self.ctrl2 + (self.to - self.ctrl2) * t;
        let ctrl2aa = ctrl2a + (ctrl3a - ctrl2a) * t;
        let ctrl1aaa = ctrl1aa + (ctrl2aa - ctrl1aa) * t;

        (
            CubicBezierSegment {
                from: self.from,
                ctrl1: ctrl1a,
                ctrl2: ctrl1aa,
                to: ctrl1aaa,
            },
            CubicBezierSegment {
                from: ctrl1aaa,
                ctrl1: ctrl2aa,
                ctrl2: ctrl3a,
                to: self.to,
            },
        )
    }

    /// Return the curve before the split point.
    pub fn before_split(&self, t: f64) -> CubicBezierSegment {
        self.split(t).0
    }

    /// Return the curve after the split point.
    pub fn after_split(&self, t: f64) -> CubicBezierSegment {
        self.split(t).1
    }

    #[inline]
    pub fn baseline(&self) -> LineSegment {
        LineSegment {
            from: self.from,
            to: self.to,
        }
    }

    /// Returns true if the curve can be approximated with a single line segment, given
    /// a tolerance threshold.
    pub fn is_linear(&self, tolerance: f64) -> bool {
        let baseline = self.to - self.from;
        let v1 = self.ctrl1 - self.from;
        let v2 = self.ctrl2 - self.from;
        let c1 = baseline.cross(v1);
        let c2 = baseline.cross(v2);
        let baseline_len2 = baseline.square_length();
        if baseline_len2 == 0.0 {
            let threshold = tolerance * tolerance;
            return v1.square_length() <= threshold && v2.square_length() <= threshold;
        }
        let d1 = (c1 * c1) / baseline_len2;
        let d2 = (c2 * c2) / baseline_len2;

        let factor = if (c1 * c2) > 0.0 {
            3.0 / 4.0
        } else {
            4.0 / 9.0
        };

        let f2 = factor * factor;
        let threshold = tolerance * tolerance;

        d1 * f2 <= threshold && d2 * f2 <= threshold
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        CubicBezierSegment {
            from: self.to,
            ctrl1: self.ctrl2,
            ctrl2: self.ctrl1,
            to: self.from,
        }
    }

    /// Approximate the curve with a sequence of line segments, calling `callback`
    /// for each of them in order.
    ///
    /// The curve is subdivided at its midpoint until each piece is within `tolerance`
    /// of its baseline. Non-finite curves are emitted as their baseline.
    pub fn for_each_flattened<F: FnMut(&LineSegment)>(&self, tolerance: f64, callback: &mut F) {
        self.flatten_recursive(tolerance, 0, callback);
    }

    fn flatten_recursive<F: FnMut(&LineSegment)>(&self, tolerance: f64, depth: u32, callback: &mut F) {
        const MAX_DEPTH: u32 = 16;

        let finite = self.from.x.is_finite()
            && self.from.y.is_finite()
            && self.to.x.is_finite()
            && self.to.y.is_finite();

        if !finite || depth >= MAX_DEPTH || self.is_linear(tolerance) {
            callback(&self.baseline());
            return;
        }

        let (a, b) = self.split(0.5);
        a.flatten_recursive(tolerance, depth + 1, callback);
        b.flatten_recursive(tolerance, depth + 1, callback);
    }

    /// Return local x extrema in ascending order, or nothing if this curve is
    /// monotonic on the x axis.
    ///
    /// This returns the advancements along the curve, not the actual x position.
    pub fn local_x_extrema_t(&self) -> ArrayVec<f64, 2> {
        Self::local_extrema(self.from.x, self.ctrl1.x, self.ctrl2.x, self.to.x)
    }

    /// Return local y extrema in ascending order, or nothing if this curve is
    /// monotonic on the y axis.
    ///
    /// This returns the advancements along the curve, not the actual y position.
    pub fn local_y_extrema_t(&self) -> ArrayVec<f64, 2> {
        Self::local_extrema(self.from.y, self.ctrl1.y, self.ctrl2.y, self.to.y)
    }

    fn local_extrema(p0: f64, p1: f64, p2: f64, p3: f64) -> ArrayVec<f64, 2> {
        // The derivative of a cubic bezier curve is a second degree polynomial
        // f(t) = a * t² + b * t + c such as:
        let a = 3.0 * (p3 + 3.0 * (p1 - p2) - p0);
        let b = 6.0 * (p2 - 2.0 * p1 + p0);
        let c = 3.0 * (p1 - p0);

        fn in_range(t: f64) -> bool {
            t > 0.0 && t < 1.0
        }

        let mut result = ArrayVec::new();

        // The derivative is a linear function.
        if a == 0.0 {
            if b != 0.0 {
                let t = -c / b;
                if in_range(t) {
                    result.push(t);
                }
            }
            return result;
        }

        let discriminant = b * b - 4.0 * a * c;

        // No real solution. A double root is a stationary point, not an extremum.
        if discriminant <= 0.0 {
            return result;
        }

        let discriminant_sqrt = discriminant.sqrt();
        let (first, second) = min_max(
            (-b - discriminant_sqrt) / (2.0 * a),
            (-b + discriminant_sqrt) / (2.0 * a),
        );

        if in_range(first) {
            result.push(first);
        }
        if in_range(second) {
            result.push(second);
        }

        result
    }

    /// Returns whether this segment is monotonic on the x axis.
    pub fn is_x_monotonic(&self) -> bool {
        self.local_x_extrema_t().is_empty()
    }

    /// Returns whether this segment is monotonic on the y axis.
    pub fn is_y_monotonic(&self) -> bool {
        self.local_y_extrema_t().is_empty()
    }

    /// Returns whether this segment is fully monotonic.
    pub fn is_monotonic(&self) -> bool {
        self.is_x_monotonic() && self.is_y_monotonic()
    }

    /// Returns a conservative range of x that contains this curve.
    #[inline]
    pub fn fast_bounding_range_x(&self) -> (f64, f64) {
        let min_x = self.from.x.min(self.ctrl1.x).min(self.ctrl2.x).min(self.to.x);
        let max_x = self.from.x.max(self.ctrl1.x).max(self.ctrl2.x).max(self.to.x);

        (min_x, max_x)
    }

    /// Returns a conservative range of y that contains this curve.
    #[inline]
    pub fn fast_bounding_range_y(&self) -> (f64, f64) {
        let min_y = self.from.y.min(self.ctrl1.y).min(self.ctrl2.y).min(self.to.y);
        let max_y = self.from.y.max(self.ctrl1.y).max(self.ctrl2.y).max(self.to.y);

        (min_y, max_y)
    }

    /// Returns the smallest range of x that contains this curve.
    pub fn bounding_range_x(&self) -> (f64, f64) {
        let (mut min_x, mut max_x) = min_max(self.from.x, self.to.x);
        for t in self.local_x_extrema_t() {
            let x = self.x(t);
            min_x = min_x.min(x);
            max_x = max_x.max(x);
        }

        (min_x, max_x)
    }

    /// Returns the smallest range of y that contains this curve.
    pub fn bounding_range_y(&self) -> (f64, f64) {
        let (mut min_y, mut max_y) = min_max(self.from.y, self.to.y);
        for t in self.local_y_extrema_t() {
            let y = self.y(t);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }

        (min_y, max_y)
    }

    /// Returns the smallest rectangle that contains the curve.
    pub fn bounding_box(&self) -> Box2D {
        let (min_x, max_x) = self.bounding_range_x();
        let (min_y, max_y) = self.bounding_range_y();

        Box2D {
            min: point(min_x, min_y),
            max: point(max_x, max_y),
        }
    }

    /// Returns a conservative rectangle the curve is contained in.
    ///
    /// This method is faster than `bounding_box` but more conservative.
    pub fn fast_bounding_box(&self) -> Box2D {
        let (min_x, max_x) = self.fast_bounding_range_x();
        let (min_y, max_y) = self.fast_bounding_range_y();

        Box2D {
            min: point(min_x, min_y),
            max: point(max_x, max_y),
        }
    }
}

#[cfg(test)]
fn s_curve() -> CubicBezierSegment {
    CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(1.0, 2.0),
        ctrl2: point(2.0, -2.0),
        to: point(3.0, 0.0),
    }
}

#[test]
fn sample_end_points() {
    let c = s_curve();

    assert_eq!(c.sample(0.0), c.from);
    assert_eq!(c.sample(1.0), c.to);
    assert_eq!(c.x(0.5), 1.5);
    assert_eq!(c.y(0.5), 0.0);
}

#[test]
fn derivative_at_end_points() {
    let c = s_curve();

    // The tangents at the end points are 3 * (ctrl1 - from) and 3 * (to - ctrl2).
    assert_eq!(c.derivative(0.0), (c.ctrl1 - c.from) * 3.0);
    assert_eq!(c.derivative(1.0), (c.to - c.ctrl2) * 3.0);
    assert_eq!(c.dx(0.0), 3.0);
    assert_eq!(c.dy(1.0), 6.0);
}

#[test]
fn split_matches_sampling() {
    let c = s_curve();
    let (a, b) = c.split(0.3);

    assert_eq!(a.from, c.from);
    assert_eq!(b.to, c.to);
    assert_eq!(a.to, b.from);

    for i in 0..=10 {
        let t = i as f64 / 10.0;
        let expected = c.sample(0.3 * t);
        let actual = a.sample(t);
        assert!((expected - actual).length() < 1e-12);

        let expected = c.sample(0.3 + 0.7 * t);
        let actual = b.sample(t);
        assert!((expected - actual).length() < 1e-12);
    }
}

#[test]
fn split_range_matches_sampling() {
    let c = s_curve();
    let sub = c.split_range(0.25..0.75);

    assert!((sub.from - c.sample(0.25)).length() < 1e-12);
    assert!((sub.to - c.sample(0.75)).length() < 1e-12);
    assert!((sub.sample(0.5) - c.sample(0.5)).length() < 1e-12);

    assert_eq!(c.split_range(0.0..1.0), c);
}

#[test]
fn y_extrema_of_s_curve() {
    let c = s_curve();
    let extrema = c.local_y_extrema_t();

    assert_eq!(extrema.len(), 2);
    assert!(extrema[0] < extrema[1]);
    assert!(!c.is_y_monotonic());
    assert!(c.is_x_monotonic());
    assert!(!c.is_monotonic());

    for t in extrema {
        assert!(c.dy(t).abs() < 1e-9);
    }
}

#[test]
fn monotonic_curve_has_no_extrema() {
    let c = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(1.0, 0.5),
        ctrl2: point(2.0, 2.5),
        to: point(3.0, 3.0),
    };

    assert!(c.local_y_extrema_t().is_empty());
    assert!(c.is_monotonic());
}

#[test]
fn bounding_ranges() {
    let c = s_curve();
    let (min_y, max_y) = c.bounding_range_y();
    let (fast_min_y, fast_max_y) = c.fast_bounding_range_y();

    assert!(min_y < 0.0 && max_y > 0.0);
    assert!(fast_min_y <= min_y && fast_max_y >= max_y);
    assert_eq!(c.bounding_range_x(), (0.0, 3.0));

    let bb = c.bounding_box();
    assert_eq!(bb.min.x, 0.0);
    assert_eq!(bb.max.x, 3.0);
    assert_eq!(bb.max.y, max_y);
}

#[test]
fn flip_reverses() {
    let c = s_curve();
    let f = c.flip();

    assert_eq!(f.sample(0.25), c.sample(0.75));
    assert_eq!(f.flip(), c);
}

#[test]
fn flattening_stays_close() {
    let c = s_curve();
    let tolerance = 0.01;
    let mut segments = Vec::new();
    c.for_each_flattened(tolerance, &mut |s| segments.push(*s));

    assert!(segments.len() > 2);
    assert_eq!(segments[0].from, c.from);
    assert_eq!(segments[segments.len() - 1].to, c.to);
    for pair in segments.windows(2) {
        assert_eq!(pair[0].to, pair[1].from);
    }
}

#[test]
fn flattening_a_line() {
    let c = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(1.0, 1.0),
        ctrl2: point(2.0, 2.0),
        to: point(3.0, 3.0),
    };
    let mut count = 0;
    c.for_each_flattened(0.1, &mut |_| count += 1);

    assert_eq!(count, 1);
}
