use serde::{Deserialize, Serialize};

use crate::{
    f64::{max_f64, min_f64},
    point::Point,
};

/// Axis-aligned horizontal extent of a point collection.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Extent of an empty collection. The minimums are `+inf` and the
    /// maximums `-inf`, so no real point set can produce it.
    pub const EMPTY: Bounds = Bounds {
        min_x: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        min_y: f64::INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    /// Computes the extent in a single pass. Returns [`Bounds::EMPTY`] for an
    /// empty slice.
    pub fn new(points: &[Point]) -> Self {
        points.iter().fold(Bounds::EMPTY, |b, p| b.including(p))
    }

    /// Returns these bounds grown to include `p`.
    pub fn including(self, p: &Point) -> Self {
        Bounds {
            min_x: min_f64(p.x, self.min_x),
            max_x: max_f64(p.x, self.max_x),
            min_y: min_f64(p.y, self.min_y),
            max_y: max_f64(p.y, self.max_y),
        }
    }

    /// Smallest bounds covering both `self` and `other`.
    pub fn union(self, other: Bounds) -> Self {
        Bounds {
            min_x: min_f64(self.min_x, other.min_x),
            max_x: max_f64(self.max_x, other.max_x),
            min_y: min_f64(self.min_y, other.min_y),
            max_y: max_f64(self.max_y, other.max_y),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Width along the X axis; `0.0` when empty.
    pub fn width_x(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_x - self.min_x
        }
    }

    /// Width along the Y axis; `0.0` when empty.
    pub fn width_y(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_y - self.min_y
        }
    }

    /// Closed-interval containment test on both axes.
    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_all_points() {
        let points = vec![
            Point::new(3.0, -1.0, 0.0),
            Point::new(-2.0, 4.0, 0.0),
            Point::new(1.0, 1.0, 0.0),
        ];
        let b = Bounds::new(&points);
        assert_eq!(b.min_x, -2.0);
        assert_eq!(b.max_x, 3.0);
        assert_eq!(b.min_y, -1.0);
        assert_eq!(b.max_y, 4.0);
        assert_eq!(b.width_x(), 5.0);
        assert_eq!(b.width_y(), 5.0);
        assert!(points.iter().all(|p| b.contains(p)));
        assert!(!b.is_empty());
    }

    #[test]
    fn empty_collection_yields_marker() {
        let b = Bounds::new(&[]);
        assert_eq!(b, Bounds::EMPTY);
        assert!(b.is_empty());
        assert_eq!(b.width_x(), 0.0);
        assert_eq!(b.width_y(), 0.0);
        assert!(!b.contains(&Point::new(0.0, 0.0, 0.0)));
    }

    #[test]
    fn union_matches_combined_collection() {
        let a = [Point::new(0.0, 5.0, 0.0), Point::new(2.0, 6.0, 0.0)];
        let b = [Point::new(-1.0, 7.0, 0.0)];
        let all = [a[0], a[1], b[0]];
        assert_eq!(Bounds::new(&a).union(Bounds::new(&b)), Bounds::new(&all));
        assert_eq!(Bounds::EMPTY.union(Bounds::new(&b)), Bounds::new(&b));
    }

    #[test]
    fn single_point_is_not_empty() {
        let b = Bounds::new(&[Point::new(0.0, 0.0, 7.0)]);
        assert!(!b.is_empty());
        assert_ne!(b, Bounds::EMPTY);
        assert_eq!(b.width_x(), 0.0);
        assert!(b.contains(&Point::new(0.0, 0.0, -1.0)));
    }
}
