//! Geometric primitives for room layout.
//!
//! This module provides the small set of geometric types the layout engine
//! works with.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate (or vector) in viewport space
//! - [`Size`] - Width and height of a viewport
//! - [`Bounds`] - An axis-aligned rectangle bodies are kept inside
//! - [`Insets`] - Space reserved on each side of a viewport
//!
//! # Coordinate System
//!
//! Huddle uses screen coordinates, the same convention as SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner of the viewport
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward

/// A 2D point in viewport coordinate space.
///
/// Points double as 2D vectors: forces and velocities are expressed with
/// the same type.
///
/// # Examples
///
/// ```
/// # use huddle_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// let delta = Point::new(4.0, 6.0).sub_point(Point::new(1.0, 2.0));
/// assert_eq!(delta.hypot(), 5.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
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

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Returns `true` if neither coordinate is NaN or infinite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the hypotenuse (Euclidean length of the vector)
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance between two points
    pub fn distance(self, other: Point) -> f32 {
        self.sub_point(other).hypot()
    }

    /// Multiplies both coordinates by the given factor.
    ///
    /// # Examples
    ///
    /// ```
    /// # use huddle_core::geometry::Point;
    /// let force = Point::new(10.0, -20.0);
    ///
    /// let damped = force.scale(0.5);
    /// assert_eq!(damped.x(), 5.0);
    /// assert_eq!(damped.y(), -10.0);
    /// ```
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Clamps each coordinate independently into `[-limit, limit]`.
    ///
    /// `limit` must be non-negative.
    ///
    /// # Examples
    ///
    /// ```
    /// # use huddle_core::geometry::Point;
    /// let velocity = Point::new(42.0, -3.0).clamp_axes(10.0);
    /// assert_eq!(velocity, Point::new(10.0, -3.0));
    /// ```
    pub fn clamp_axes(self, limit: f32) -> Self {
        Self {
            x: self.x.clamp(-limit, limit),
            y: self.y.clamp(-limit, limit),
        }
    }
}

/// Represents the dimensions of a viewport with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns true if the size encloses no area.
    ///
    /// A size is empty when either dimension is zero, negative or NaN. An
    /// empty viewport has not been measured yet, so nothing can be placed in
    /// it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use huddle_core::geometry::Size;
    /// assert!(Size::new(0.0, 400.0).is_empty());
    /// assert!(Size::new(400.0, f32::NAN).is_empty());
    /// assert!(!Size::new(400.0, 300.0).is_empty());
    /// ```
    pub fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Returns the geometric center of a viewport of this size
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Represents a rectangular region with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates the region left inside a viewport once `insets` are reserved
    /// on each side.
    ///
    /// When the insets on an axis add up to more than the viewport extent,
    /// that axis collapses to the midpoint between the two limits, so the
    /// resulting bounds are never inverted.
    ///
    /// # Examples
    ///
    /// ```
    /// # use huddle_core::geometry::{Bounds, Insets, Size};
    /// let inner = Bounds::inset_viewport(Size::new(400.0, 400.0), Insets::new(140.0, 80.0, 80.0, 80.0));
    /// assert_eq!(inner.min_x(), 80.0);
    /// assert_eq!(inner.max_x(), 320.0);
    /// assert_eq!(inner.min_y(), 140.0);
    /// assert_eq!(inner.max_y(), 320.0);
    ///
    /// // Too narrow: the x range collapses to a single column.
    /// let narrow = Bounds::inset_viewport(Size::new(100.0, 400.0), Insets::uniform(80.0));
    /// assert_eq!(narrow.min_x(), narrow.max_x());
    /// assert_eq!(narrow.min_x(), 50.0);
    /// ```
    pub fn inset_viewport(viewport: Size, insets: Insets) -> Self {
        let (min_x, max_x) = ordered_range(insets.left, viewport.width - insets.right);
        let (min_y, max_y) = ordered_range(insets.top, viewport.height - insets.bottom);
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
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

    /// Returns true if `point` lies inside the bounds, edges included
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Moves `point` to the nearest location inside the bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # use huddle_core::geometry::{Bounds, Insets, Point, Size};
    /// let bounds = Bounds::inset_viewport(Size::new(120.0, 70.0), Insets::uniform(10.0));
    ///
    /// assert_eq!(bounds.clamp_point(Point::new(0.0, 100.0)), Point::new(10.0, 60.0));
    /// assert_eq!(bounds.clamp_point(Point::new(50.0, 30.0)), Point::new(50.0, 30.0));
    /// ```
    pub fn clamp_point(self, point: Point) -> Point {
        Point {
            x: point.x.clamp(self.min_x, self.max_x),
            y: point.y.clamp(self.min_y, self.max_y),
        }
    }

    /// Returns how far `point` lies outside the bounds on each axis.
    ///
    /// Each component points back toward the interior: positive when the
    /// point is past the minimum edge, negative when past the maximum edge,
    /// zero when within range.
    pub fn penetration(self, point: Point) -> Point {
        let axis = |value: f32, min: f32, max: f32| {
            if value < min {
                min - value
            } else if value > max {
                max - value
            } else {
                0.0
            }
        };
        Point {
            x: axis(point.x, self.min_x, self.max_x),
            y: axis(point.y, self.min_y, self.max_y),
        }
    }
}

fn ordered_range(min: f32, max: f32) -> (f32, f32) {
    if min <= max {
        (min, max)
    } else {
        let mid = (min + max) / 2.0;
        (mid, mid)
    }
}

/// Represents space reserved around a region, with potentially different
/// values for each side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Adds two insets side by side
    pub fn add(self, other: Insets) -> Self {
        Self {
            top: self.top + other.top,
            right: self.right + other.right,
            bottom: self.bottom + other.bottom,
            left: self.left + other.left,
        }
    }
}
