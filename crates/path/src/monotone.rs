//! Monotone cubic interpolation.
//!
//! The interpolator works in three passes over the samples:
//!
//! 1. [`finite_differences`]: a derivative estimate `m[i]` per sample, the average
//!    of the secant slopes on each side (one-sided at the end points).
//! 2. [`tangents`]: the estimates go through the Fritsch–Carlson limiter so that the
//!    curve cannot overshoot between two samples, then become one tangent vector per
//!    sample.
//! 3. [`points`]: the tangents become bézier control points, emitted as a `Begin`,
//!    a `Cubic` and a `SmoothCubic` per remaining sample.
//!
//! None of the passes validate their input. Samples that are not strictly increasing
//! in `x` or that contain non-finite coordinates produce `NaN` or infinite control
//! points instead of an error. Use [`try_points`] to reject such input up front.

use crate::commands::{PathCommands, PathCommandsBuilder};
use crate::error::ValidationError;
use crate::math::{vector, Point, Vector};

/// Parameters for the monotone interpolator.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MonotoneOptions {
    /// Secant slopes with an absolute value below this threshold are treated as flat:
    /// both end points of the segment get a horizontal tangent.
    ///
    /// Default value: `MonotoneOptions::DEFAULT_FLAT_TOLERANCE`.
    pub flat_tolerance: f64,
}

impl MonotoneOptions {
    pub const DEFAULT_FLAT_TOLERANCE: f64 = 1e-6;

    pub const DEFAULT: Self = MonotoneOptions {
        flat_tolerance: Self::DEFAULT_FLAT_TOLERANCE,
    };

    #[inline]
    pub fn flat_tolerance(tolerance: f64) -> Self {
        Self::DEFAULT.with_flat_tolerance(tolerance)
    }

    #[inline]
    pub fn with_flat_tolerance(mut self, tolerance: f64) -> Self {
        self.flat_tolerance = tolerance;
        self
    }
}

impl Default for MonotoneOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Slope of the secant between two samples.
#[inline]
pub fn slope(p0: Point, p1: Point) -> f64 {
    (p1.y - p0.y) / (p1.x - p0.x)
}

/// Per-sample derivative estimates.
///
/// The first and last estimates are the slopes of the first and last segments.
/// Interior estimates average the slopes of the segments on each side. With two
/// samples both estimates are the slope of the only segment.
pub fn finite_differences(samples: &[Point]) -> Vec<f64> {
    let n = samples.len();
    if n < 2 {
        return vec![0.0; n];
    }

    let mut m = Vec::with_capacity(n);
    let mut d = slope(samples[0], samples[1]);
    m.push(d);
    for i in 1..n - 1 {
        let next = slope(samples[i], samples[i + 1]);
        m.push((d + next) * 0.5);
        d = next;
    }
    m.push(d);

    m
}

/// One tangent per sample, with the default options.
pub fn tangents(samples: &[Point]) -> Vec<Vector> {
    tangents_with_options(samples, &MonotoneOptions::DEFAULT)
}

/// One tangent per sample.
///
/// The tangent of sample `i` is the offset from the sample to the control point that
/// follows it (and the opposite of the offset to the control point that precedes it).
pub fn tangents_with_options(samples: &[Point], options: &MonotoneOptions) -> Vec<Vector> {
    let n = samples.len();
    if n < 2 {
        return vec![vector(0.0, 0.0); n];
    }

    let mut m = finite_differences(samples);

    // Segments are visited in order and each one can rewrite the estimate it shares
    // with the next, so a segment sees the already limited value of its left sample.
    for i in 0..n - 1 {
        let d = slope(samples[i], samples[i + 1]);
        if d.abs() < options.flat_tolerance {
            m[i] = 0.0;
            m[i + 1] = 0.0;
        } else {
            let a = m[i] / d;
            let b = m[i + 1] / d;
            let s = a * a + b * b;
            if s > 9.0 {
                let factor = d * 3.0 / s.sqrt();
                log::trace!("segment {}: rescaling tangents by {}", i, factor);
                m[i] = factor * a;
                m[i + 1] = factor * b;
            }
        }
    }

    let last = n - 1;
    (0..n)
        .map(|i| {
            let span = samples[(i + 1).min(last)].x - samples[i.saturating_sub(1)].x;
            let s = span / (6.0 * (1.0 + m[i] * m[i]));
            vector(or_zero(s), or_zero(m[i] * s))
        })
        .collect()
}

// Zero (of either sign) and NaN both collapse to positive zero.
#[inline]
fn or_zero(v: f64) -> f64 {
    if v.is_nan() || v == 0.0 {
        0.0
    } else {
        v
    }
}

/// Interpolates the samples with the default options.
///
/// See [`points_with_options`].
pub fn points(samples: &[Point]) -> PathCommands {
    points_with_options(samples, &MonotoneOptions::DEFAULT)
}

/// Interpolates the samples with a monotone cubic curve.
///
/// The result starts with a `Begin` at the first sample, then a `Cubic` to the
/// second sample, then a `SmoothCubic` to each following sample. The curve passes
/// through every sample.
///
/// Zero samples produce an empty sequence and a single sample produces a lone
/// `Begin`.
pub fn points_with_options(samples: &[Point], options: &MonotoneOptions) -> PathCommands {
    let mut builder = PathCommandsBuilder::with_capacity(samples.len());

    match samples.len() {
        0 => {
            log::debug!("No samples to interpolate.");
            return builder.build();
        }
        1 => {
            log::debug!("Single sample, the path has no segment.");
            builder.begin(samples[0]);
            return builder.build();
        }
        _ => {}
    }

    let tangents = tangents_with_options(samples, options);

    let (p0, p1) = (samples[0], samples[1]);
    let (t0, t1) = (tangents[0], tangents[1]);
    builder.begin(p0);
    builder.cubic_bezier_to(p0 + t0, p1 - t1, p1);

    for (&p, &t) in samples[2..].iter().zip(&tangents[2..]) {
        builder.smooth_cubic_bezier_to(p - t, p);
    }

    builder.build()
}

/// Checks that the samples can be interpolated meaningfully: at least two of them,
/// finite coordinates and strictly increasing `x`.
pub fn validate(samples: &[Point]) -> Result<(), ValidationError> {
    if samples.len() < 2 {
        return Err(ValidationError::InsufficientData {
            required: 2,
            actual: samples.len(),
        });
    }

    for (index, p) in samples.iter().enumerate() {
        if !p.x.is_finite() || !p.y.is_finite() {
            return Err(ValidationError::NonFinite { index });
        }
        if index > 0 && p.x <= samples[index - 1].x {
            return Err(ValidationError::NotIncreasing { index });
        }
    }

    Ok(())
}

/// Same as [`points`] but rejects samples that [`validate`] does not accept.
pub fn try_points(samples: &[Point]) -> Result<PathCommands, ValidationError> {
    validate(samples)?;

    Ok(points(samples))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::PathCommand;
    use crate::math::point;

    fn samples(values: &[(f64, f64)]) -> Vec<Point> {
        values.iter().map(|&(x, y)| point(x, y)).collect()
    }

    fn assert_approx(a: f64, b: f64) {
        assert!((a - b).abs() <= 1e-12 * b.abs().max(1.0), "{} != {}", a, b);
    }

    #[test]
    fn differences_average_neighbouring_slopes() {
        let s = samples(&[(0.0, 0.0), (5.0, 10.0), (10.0, 0.0)]);
        assert_eq!(finite_differences(&s), vec![2.0, 0.0, -2.0]);

        let s = samples(&[(0.0, 0.0), (1.0, 1.0), (2.0, 10.0), (3.0, 10.5), (4.0, 30.0)]);
        assert_eq!(finite_differences(&s), vec![1.0, 5.0, 4.75, 10.0, 19.5]);
    }

    #[test]
    fn differences_with_two_samples() {
        let s = samples(&[(0.0, 0.0), (10.0, 10.0)]);
        assert_eq!(finite_differences(&s), vec![1.0, 1.0]);
    }

    #[test]
    fn tangents_of_a_peak() {
        let s = samples(&[(0.0, 0.0), (5.0, 10.0), (10.0, 0.0)]);
        let t = tangents(&s);

        assert_eq!(t.len(), 3);
        assert_eq!(t[0], vector(0.16666666666666666, 0.3333333333333333));
        assert_eq!(t[1], vector(1.6666666666666667, 0.0));
        assert_eq!(t[2], vector(0.16666666666666666, -0.3333333333333333));
    }

    #[test]
    fn limiter_rescales_steep_estimates() {
        let s = samples(&[(0.0, 0.0), (100.0, 1.0), (200.0, 100.0)]);
        let t = tangents(&s);

        assert_approx(t[0].x, 16.666660669067866);
        assert_approx(t[0].y, 0.009997997001960286);
        assert_approx(t[1].x, 33.30337228269916);
        assert_approx(t[1].y, 0.9989014081733737);
        assert_approx(t[2].x, 8.417083312290625);
        assert_approx(t[2].y, 8.33291247916772);

        // Without the limiter the middle estimate would be the average slope, 0.5.
        assert!(t[1].y / t[1].x < 0.05);
    }

    #[test]
    fn peak_commands() {
        let s = samples(&[(0.0, 0.0), (5.0, 10.0), (10.0, 0.0)]);
        let cmds = points(&s);

        assert_eq!(
            cmds.as_slice(),
            &[
                PathCommand::Begin {
                    at: point(0.0, 0.0)
                },
                PathCommand::Cubic {
                    ctrl1: point(0.16666666666666666, 0.3333333333333333),
                    ctrl2: point(3.333333333333333, 10.0),
                    to: point(5.0, 10.0),
                },
                PathCommand::SmoothCubic {
                    ctrl2: point(9.833333333333334, 0.3333333333333333),
                    to: point(10.0, 0.0),
                },
            ]
        );
    }

    #[test]
    fn two_samples() {
        let s = samples(&[(0.0, 0.0), (10.0, 10.0)]);
        let cmds = points(&s);

        assert_eq!(cmds.len(), 2);
        assert_eq!(
            cmds[1],
            PathCommand::Cubic {
                ctrl1: point(0.8333333333333334, 0.8333333333333334),
                ctrl2: point(9.166666666666666, 9.166666666666666),
                to: point(10.0, 10.0),
            }
        );

        // Both derivative estimates are the slope, 1.
        for t in tangents(&s) {
            assert_eq!(t.x, t.y);
        }

        // A straight line stays straight.
        let segment = cmds.segments().next().unwrap();
        for i in 0..=10 {
            let p = segment.sample(i as f64 / 10.0);
            assert!((p.x - p.y).abs() < 1e-12);
        }
    }

    #[test]
    fn flat_samples() {
        let s = samples(&[(0.0, 5.0), (10.0, 5.0), (20.0, 5.0)]);
        let cmds = points(&s);

        assert_eq!(
            cmds[1],
            PathCommand::Cubic {
                ctrl1: point(1.6666666666666667, 5.0),
                ctrl2: point(6.666666666666666, 5.0),
                to: point(10.0, 5.0),
            }
        );
        assert_eq!(
            cmds[2],
            PathCommand::SmoothCubic {
                ctrl2: point(18.333333333333332, 5.0),
                to: point(20.0, 5.0),
            }
        );

        for t in tangents(&s) {
            assert_eq!(t.y, 0.0);
            assert!(t.y.is_sign_positive());
        }
        for segment in cmds.segments() {
            assert_eq!(segment.ctrl1.y, 5.0);
            assert_eq!(segment.ctrl2.y, 5.0);
        }
    }

    #[test]
    fn flat_tolerance_option() {
        let s = samples(&[(0.0, 0.0), (1.0, 0.5), (2.0, 1.0)]);

        let t = tangents_with_options(&s, &MonotoneOptions::flat_tolerance(1.0));
        assert!(t.iter().all(|t| t.y == 0.0));

        let t = tangents_with_options(&s, &MonotoneOptions::default());
        assert!(t.iter().all(|t| t.y > 0.0));

        let cmds = points_with_options(&s, &MonotoneOptions::DEFAULT.with_flat_tolerance(1.0));
        assert_eq!(cmds.len(), 3);
        assert_eq!(cmds[1].ctrl2().map(|p| p.y), Some(0.5));
    }

    #[test]
    fn curve_passes_through_samples() {
        let s = samples(&[(0.0, 10.0), (2.0, 8.0), (3.0, 3.0), (7.0, 2.5), (8.0, 0.0)]);
        let cmds = points(&s);

        assert_eq!(cmds.first_point(), Some(s[0]));
        let segments: Vec<_> = cmds.segments().collect();
        assert_eq!(segments.len(), s.len() - 1);
        for (i, segment) in segments.iter().enumerate() {
            assert_eq!(segment.from, s[i]);
            assert_eq!(segment.to, s[i + 1]);
            assert_eq!(segment.sample(0.0), s[i]);
            assert_eq!(segment.sample(1.0), s[i + 1]);
        }
    }

    #[test]
    fn no_overshoot() {
        let datasets = [
            samples(&[(0.0, 0.0), (1.0, 0.2), (2.0, 0.5), (3.0, 0.8), (4.0, 1.0)]),
            samples(&[(0.0, 0.0), (1.0, 0.0), (2.0, 1.0), (3.0, 1.0)]),
            samples(&[(0.0, 0.0), (1.0, 1.0), (2.0, 10.0), (3.0, 10.5), (4.0, 30.0)]),
            samples(&[(0.0, 0.0), (100.0, 1.0), (200.0, 100.0)]),
            samples(&[(0.0, 10.0), (2.0, 8.0), (3.0, 3.0), (7.0, 2.5), (8.0, 0.0)]),
        ];

        for s in &datasets {
            for segment in points(s).segments() {
                let increasing = segment.to.y >= segment.from.y;
                let mut prev = segment.from.y;
                for i in 1..=50 {
                    let y = segment.y(i as f64 / 50.0);
                    if increasing {
                        assert!(y >= prev - 1e-12, "overshoot in {:?}", segment);
                    } else {
                        assert!(y <= prev + 1e-12, "overshoot in {:?}", segment);
                    }
                    prev = y;
                }
            }
        }
    }

    #[test]
    fn degenerate_sample_counts() {
        assert!(points(&[]).is_empty());
        assert!(tangents(&[]).is_empty());
        assert!(finite_differences(&[]).is_empty());

        let single = points(&[point(1.0, 2.0)]);
        assert_eq!(
            single.as_slice(),
            &[PathCommand::Begin {
                at: point(1.0, 2.0)
            }]
        );
        assert_eq!(tangents(&[point(1.0, 2.0)]), vec![vector(0.0, 0.0)]);
    }

    #[test]
    fn invalid_samples_propagate() {
        let cmds = points(&samples(&[(0.0, f64::NAN), (1.0, 1.0)]));
        assert_eq!(cmds.len(), 2);
        match cmds[1] {
            PathCommand::Cubic { ctrl1, .. } => {
                assert!(ctrl1.y.is_nan());
                assert_eq!(ctrl1.x, 0.0);
            }
            _ => panic!("expected a cubic command"),
        }

        // Repeated and decreasing x do not panic.
        let cmds = points(&samples(&[(0.0, 0.0), (1.0, 1.0), (1.0, 2.0), (0.5, 3.0)]));
        assert_eq!(cmds.len(), 4);
        assert_eq!(cmds.last_point(), Some(point(0.5, 3.0)));
    }

    #[test]
    fn validation() {
        assert_eq!(
            try_points(&[point(0.0, 0.0)]),
            Err(ValidationError::InsufficientData {
                required: 2,
                actual: 1
            })
        );
        assert_eq!(
            try_points(&samples(&[(0.0, 0.0), (1.0, f64::INFINITY)])),
            Err(ValidationError::NonFinite { index: 1 })
        );
        assert_eq!(
            try_points(&samples(&[(0.0, 0.0), (1.0, 1.0), (1.0, 2.0)])),
            Err(ValidationError::NotIncreasing { index: 2 })
        );

        let s = samples(&[(0.0, 0.0), (5.0, 10.0), (10.0, 0.0)]);
        assert_eq!(try_points(&s), Ok(points(&s)));
    }

    #[test]
    fn validation_messages() {
        let err = ValidationError::NotIncreasing { index: 3 };
        assert_eq!(
            err.to_string(),
            "Sample 3 does not have a strictly increasing x coordinate."
        );
    }
}
