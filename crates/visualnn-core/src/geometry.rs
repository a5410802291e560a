//! Geometric primitives for network diagram layout.
//!
//! This module provides the fundamental geometric types and helpers used by
//! every layout component in VisualNN.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Bounds`] - An axis-aligned rectangle defined by minimum and maximum coordinates
//! - [`linspace`] - Evenly spaced samples over an interval
//! - [`line_through`] - Y values of the line through two points
//!
//! # Coordinate System
//!
//! Diagram space follows the plotting convention rather than the screen one:
//!
//! ```text
//!    +Y
//!     ▲
//!     │
//!     │
//!     │
//!   (0,0) ────────► +X
//! ```
//!
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases upward
//!
//! Renderers targeting screen coordinates (such as SVG) flip the Y axis when
//! mapping diagram space into pixels.

/// A 2D point in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use visualnn_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// An axis-aligned rectangle in diagram space.
///
/// "Upper" corners have the larger y-coordinate, matching the Y-up
/// convention described in the [module documentation](self).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds from two opposite corners, in any order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use visualnn_core::geometry::{Bounds, Point};
    /// let bounds = Bounds::from_corners(Point::new(4.0, 1.0), Point::new(0.0, 3.0));
    /// assert_eq!(bounds.min_x(), 0.0);
    /// assert_eq!(bounds.max_y(), 3.0);
    /// assert_eq!(bounds.width(), 4.0);
    /// ```
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// Creates bounds centered on `center` with the given width and height.
    pub fn new_from_center(center: Point, width: f32, height: f32) -> Self {
        let half_width = width / 2.0;
        let half_height = height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        self.lower_left().midpoint(self.upper_right())
    }

    pub fn lower_left(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    pub fn lower_right(self) -> Point {
        Point::new(self.max_x, self.min_y)
    }

    pub fn upper_left(self) -> Point {
        Point::new(self.min_x, self.max_y)
    }

    pub fn upper_right(self) -> Point {
        Point::new(self.max_x, self.max_y)
    }

    /// Moves the bounds by the specified offset.
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }

    /// Merges two bounds into the smallest bounds containing both.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// Returns `count` evenly spaced values over `[start, end]`.
///
/// Both endpoints are included when `count >= 2`. A single sample yields
/// `[start]` and zero samples yield an empty vector.
///
/// # Examples
///
/// ```
/// # use visualnn_core::geometry::linspace;
/// assert_eq!(linspace(1.0, 2.0, 3), vec![1.0, 1.5, 2.0]);
/// assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
/// assert!(linspace(1.0, 2.0, 0).is_empty());
/// ```
pub fn linspace(start: f32, end: f32, count: usize) -> Vec<f32> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f32;
            (0..count)
                .map(|i| {
                    // Pin the last sample so accumulated rounding never overshoots.
                    if i == count - 1 {
                        end
                    } else {
                        start + step * i as f32
                    }
                })
                .collect()
        }
    }
}

/// Returns the y-coordinates of the line through `p1` and `p2` at each of `xs`.
///
/// When both points share an x-coordinate the line is vertical and has no
/// slope. In that case the result is `xs.len()` values interpolated linearly
/// from `p1.y()` to `p2.y()`, so callers always receive a drawable segment.
///
/// # Examples
///
/// ```
/// # use visualnn_core::geometry::{Point, line_through};
/// let ys = line_through(&[0.0, 1.0, 2.0], Point::new(0.0, 1.0), Point::new(2.0, 5.0));
/// assert_eq!(ys, vec![1.0, 3.0, 5.0]);
///
/// // Vertical line
/// let ys = line_through(&[3.0, 3.0, 3.0], Point::new(3.0, 0.0), Point::new(3.0, 4.0));
/// assert_eq!(ys, vec![0.0, 2.0, 4.0]);
/// ```
pub fn line_through(xs: &[f32], p1: Point, p2: Point) -> Vec<f32> {
    if p1.x == p2.x {
        return linspace(p1.y, p2.y, xs.len());
    }

    let slope = (p2.y - p1.y) / (p2.x - p1.x);
    let intercept = p1.y - slope * p1.x;

    xs.iter().map(|x| slope * x + intercept).collect()
}

/// Returns `count` points evenly spaced along the segment from `start` to `end`.
///
/// X samples come from [`linspace`] and the matching y values from
/// [`line_through`], so vertical segments are handled the same way.
pub fn sample_segment(start: Point, end: Point, count: usize) -> Vec<Point> {
    let xs = linspace(start.x, end.x, count);
    let ys = line_through(&xs, start, end);
    xs.into_iter()
        .zip(ys)
        .map(|(x, y)| Point::new(x, y))
        .collect()
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-100.0f32..100.0, -100.0f32..100.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn count_strategy() -> impl Strategy<Value = usize> {
        0usize..200
    }

    // ===================
    // Property Test Functions
    // ===================

    /// A vertical line yields one y per x sample, starting at p1.y and ending at p2.y.
    fn check_vertical_line_spans_endpoints(
        x: f32,
        y1: f32,
        y2: f32,
        count: usize,
    ) -> Result<(), TestCaseError> {
        let xs = vec![x; count];
        let ys = line_through(&xs, Point::new(x, y1), Point::new(x, y2));

        prop_assert_eq!(ys.len(), count);
        if count > 0 {
            prop_assert_eq!(ys[0], y1);
        }
        if count > 1 {
            prop_assert_eq!(ys[count - 1], y2);
        }
        Ok(())
    }

    /// The line through two points passes through both of them.
    fn check_line_passes_through_points(p1: Point, p2: Point) -> Result<(), TestCaseError> {
        prop_assume!((p1.x() - p2.x()).abs() > 1.0);

        let ys = line_through(&[p1.x(), p2.x()], p1, p2);
        let tolerance = 1e-3 * (1.0 + p1.y().abs().max(p2.y().abs()));

        prop_assert!(approx_eq!(f32, ys[0], p1.y(), epsilon = tolerance));
        prop_assert!(approx_eq!(f32, ys[1], p2.y(), epsilon = tolerance));
        Ok(())
    }

    /// Linspace samples are monotonic between the endpoints.
    fn check_linspace_is_monotonic(
        start: f32,
        end: f32,
        count: usize,
    ) -> Result<(), TestCaseError> {
        let values = linspace(start, end, count);
        prop_assert_eq!(values.len(), count);

        let ascending = end >= start;
        for pair in values.windows(2) {
            if ascending {
                prop_assert!(pair[0] <= pair[1] + 1e-3);
            } else {
                prop_assert!(pair[0] + 1e-3 >= pair[1]);
            }
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn vertical_line_spans_endpoints(
            x in -100.0f32..100.0,
            y1 in -100.0f32..100.0,
            y2 in -100.0f32..100.0,
            count in count_strategy(),
        ) {
            check_vertical_line_spans_endpoints(x, y1, y2, count)?;
        }

        #[test]
        fn line_passes_through_points(p1 in point_strategy(), p2 in point_strategy()) {
            check_line_passes_through_points(p1, p2)?;
        }

        #[test]
        fn linspace_is_monotonic(
            start in -100.0f32..100.0,
            end in -100.0f32..100.0,
            count in count_strategy(),
        ) {
            check_linspace_is_monotonic(start, end, count)?;
        }
    }
}
