use crate::utils::min_max;
use crate::{point, Box2D, Point, Vector};

/// A linear segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineSegment {
    pub from: Point,
    pub to: Point,
}

impl LineSegment {
    /// Sample the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: f64) -> Point {
        self.from.lerp(self.to, t)
    }

    /// Sample the x coordinate of the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn x(&self, t: f64) -> f64 {
        self.from.x * (1.0 - t) + self.to.x * t
    }

    /// Sample the y coordinate of the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn y(&self, t: f64) -> f64 {
        self.from.y * (1.0 - t) + self.to.y * t
    }

    pub fn solve_t_for_x(&self, x: f64) -> f64 {
        let dx = self.to.x - self.from.x;
        if dx == 0.0 {
            return 0.0;
        }

        (x - self.from.x) / dx
    }

    pub fn solve_y_for_x(&self, x: f64) -> f64 {
        self.y(self.solve_t_for_x(x))
    }

    /// Returns an inverted version of this segment where the beginning and the end
    /// points are swapped.
    #[inline]
    pub fn flip(&self) -> Self {
        LineSegment {
            from: self.to,
            to: self.from,
        }
    }

    #[inline]
    pub fn to_vector(&self) -> Vector {
        self.to - self.from
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.to_vector().length()
    }

    pub fn bounding_box(&self) -> Box2D {
        let (min_x, max_x) = min_max(self.from.x, self.to.x);
        let (min_y, max_y) = min_max(self.from.y, self.to.y);

        Box2D {
            min: point(min_x, min_y),
            max: point(max_x, max_y),
        }
    }

    /// Square of the distance between a point and the infinite line supporting
    /// this segment.
    ///
    /// Falls back to the distance to `from` when the segment is a point.
    pub fn square_distance_to_line(&self, p: Point) -> f64 {
        let v = self.to_vector();
        let len2 = v.square_length();
        if len2 == 0.0 {
            return (p - self.from).square_length();
        }
        let c = v.cross(p - self.from);

        c * c / len2
    }
}

#[test]
fn segment_sample() {
    let segment = LineSegment {
        from: point(0.0, 0.0),
        to: point(10.0, 4.0),
    };

    assert_eq!(segment.sample(0.5), point(5.0, 2.0));
    assert_eq!(segment.x(0.25), 2.5);
    assert_eq!(segment.y(1.0), 4.0);
    assert_eq!(segment.solve_y_for_x(5.0), 2.0);
    assert_eq!(segment.flip().from, point(10.0, 4.0));
}

#[test]
fn distance_to_line() {
    let segment = LineSegment {
        from: point(0.0, 0.0),
        to: point(10.0, 0.0),
    };

    assert_eq!(segment.square_distance_to_line(point(3.0, 2.0)), 4.0);
    assert_eq!(segment.square_distance_to_line(point(30.0, -1.0)), 1.0);

    let degenerate = LineSegment {
        from: point(1.0, 1.0),
        to: point(1.0, 1.0),
    };
    assert_eq!(degenerate.square_distance_to_line(point(4.0, 5.0)), 25.0);
}
