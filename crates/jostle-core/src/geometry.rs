#![forbid(unsafe_code)]

//! Geometric primitives.

use std::ops::RangeInclusive;

/// An on-screen rectangle in CSS pixels, as reported by `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
}

impl Rect {
    /// Create a rectangle from its four edges.
    #[inline]
    pub const fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// The region letter origins may be placed in.
///
/// Derived once from the container after the intro resize: the container
/// rectangle shrunk by `padding` on every side, and additionally by the
/// letter footprint on the right and bottom so a letter placed at the max
/// edge still renders inside the container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    #[inline]
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Bounds for a container rectangle, padding, and assumed letter footprint.
    pub fn from_container(rect: &Rect, padding: f64, letter_size: f64) -> Self {
        Self {
            min_x: rect.left + padding,
            min_y: rect.top + padding,
            max_x: rect.right - padding - letter_size,
            max_y: rect.bottom - padding - letter_size,
        }
    }

    /// Check if a position is inside the bounds (edges inclusive).
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Integer coordinates available on each axis, or `None` if either axis
    /// admits no integer.
    pub fn integer_ranges(&self) -> Option<(RangeInclusive<i64>, RangeInclusive<i64>)> {
        let xs = integer_span(self.min_x, self.max_x)?;
        let ys = integer_span(self.min_y, self.max_y)?;
        Some((xs, ys))
    }
}

fn integer_span(min: f64, max: f64) -> Option<RangeInclusive<i64>> {
    if !min.is_finite() || !max.is_finite() {
        return None;
    }
    let lo = min.ceil();
    let hi = max.floor();
    if lo > hi {
        return None;
    }
    Some(lo as i64..=hi as i64)
}

/// Euclidean distance between two positions.
#[inline]
pub fn distance(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    (ax - bx).hypot(ay - by)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_from_container_subtracts_padding_and_footprint() {
        let rect = Rect::from_edges(16.0, 16.0, 632.0, 448.0);
        let b = Bounds::from_container(&rect, 32.0, 100.0);
        assert_eq!(b, Bounds::new(48.0, 48.0, 500.0, 316.0));
    }

    #[test]
    fn contains_is_inclusive() {
        let b = Bounds::new(0.0, 0.0, 10.0, 10.0);
        assert!(b.contains(0.0, 0.0));
        assert!(b.contains(10.0, 10.0));
        assert!(!b.contains(10.5, 5.0));
        assert!(!b.contains(5.0, -0.1));
    }

    #[test]
    fn integer_ranges_round_inward() {
        let b = Bounds::new(48.4, 10.0, 500.9, 12.0);
        let (xs, ys) = b.integer_ranges().unwrap();
        assert_eq!(xs, 49..=500);
        assert_eq!(ys, 10..=12);
    }

    #[test]
    fn integer_ranges_single_point() {
        let b = Bounds::new(5.0, 5.0, 5.0, 5.0);
        let (xs, ys) = b.integer_ranges().unwrap();
        assert_eq!(xs, 5..=5);
        assert_eq!(ys, 5..=5);
    }

    #[test]
    fn integer_ranges_empty_when_inverted() {
        assert!(Bounds::new(10.0, 0.0, 9.0, 10.0).integer_ranges().is_none());
        assert!(Bounds::new(0.2, 0.0, 0.8, 10.0).integer_ranges().is_none());
        assert!(
            Bounds::new(f64::NAN, 0.0, 1.0, 1.0)
                .integer_ranges()
                .is_none()
        );
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(distance(0.0, 0.0, 3.0, 4.0), 5.0);
        assert_eq!(distance(1.0, 1.0, 1.0, 1.0), 0.0);
    }
}
