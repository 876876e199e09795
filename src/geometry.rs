// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Axis-aligned rectangles and the cost functions the tree is built on

use num::{Bounded, One};
use ordered_float::OrderedFloat;
use std::ops::{Deref, DerefMut};
use FP;

/// An n-dimensional axis-aligned rectangle.
///
/// Each entry of `edges` is the `(low, high)` extent of one axis. A rectangle whose corners are at
/// (x1, y1), (x2, y2) will have the corresponding edges: (x1, x2), (y1, y2)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect<P, const DIM: usize> {
    pub edges: [(P, P); DIM],
}

impl<P: FP, const DIM: usize> Rect<P, DIM> {
    /// New Rect from its per-axis `(low, high)` edges.
    ///
    /// Panics if any coordinate is not finite or any low is greater than its high
    pub fn new(edges: [(P, P); DIM]) -> Rect<P, DIM> {
        let rect = Rect { edges };
        rect.assert_well_formed();
        rect
    }

    /// Panics unless every edge is finite with low <= high
    pub fn assert_well_formed(&self) {
        for &(low, high) in self.edges.iter() {
            assert!(low.is_finite(), "{:?} should be finite", low);
            assert!(high.is_finite(), "{:?} should be finite", high);
            assert!(low <= high, "low({:?}) must not be greater than high({:?})", low, high);
        }
    }

    /// New Rect from any two opposite corners
    pub fn from_corners(x: [P; DIM], y: [P; DIM]) -> Rect<P, DIM> {
        let mut edges = Rect::max_inverted();
        for (&mut (ref mut low, ref mut high), &a, &b) in izip!(edges.iter_mut(), x.iter(), y.iter()) {
            assert!(a.is_finite(), "{:?} should be finite", a);
            assert!(b.is_finite(), "{:?} should be finite", b);
            *low = a.min(b);
            *high = a.max(b);
        }
        edges
    }

    /// A degenerate Rect covering a single point
    pub fn point(coords: [P; DIM]) -> Rect<P, DIM> {
        Rect::from_corners(coords, coords)
    }

    /// An inverted Rect where every dimension's (low, high) coordinates are (MAX, MIN).
    /// Expanding it to fit anything yields exactly that thing's bounds.
    pub fn max_inverted() -> Rect<P, DIM> {
        Rect { edges: [(Bounded::max_value(), Bounded::min_value()); DIM] }
    }

    /// The largest possible rect
    pub fn max() -> Rect<P, DIM> {
        Rect { edges: [(Bounded::min_value(), Bounded::max_value()); DIM] }
    }

    /// the minimum extent for a given axis
    pub fn min_for_axis(&self, axis: usize) -> P {
        self.edges[axis].0
    }

    /// the maximum extent for a given axis
    pub fn max_for_axis(&self, axis: usize) -> P {
        self.edges[axis].1
    }

    /// True iff the two rects share at least one point. Touching edges count as overlap.
    pub fn overlaps(&self, other: &Rect<P, DIM>) -> bool {
        izip!(self.iter(), other.iter()).all(|(&(x1, y1), &(x2, y2))| x1 <= y2 && x2 <= y1)
    }

    /// True iff `other` lies completely inside this rect
    pub fn contains(&self, other: &Rect<P, DIM>) -> bool {
        izip!(self.iter(), other.iter()).all(|(&(x1, y1), &(x2, y2))| x1 <= x2 && y2 <= y1)
    }

    /// Expand the rect to minimally fit `other`
    pub fn expand_to_fit(&mut self, other: &Rect<P, DIM>) {
        for (&mut (ref mut x1, ref mut y1), &(x2, y2)) in izip!(self.iter_mut(), other.iter()) {
            *x1 = (*x1).min(x2);
            *y1 = (*y1).max(y2);
        }
    }

    /// The minimum bounding rect of `self` and `other`
    pub fn cover(&self, other: &Rect<P, DIM>) -> Rect<P, DIM> {
        let mut cover = *self;
        cover.expand_to_fit(other);
        cover
    }

    /// Product of the per-axis extents
    pub fn area(&self) -> P {
        self.iter().fold(One::one(), |area, &(x, y)| area * (y - x))
    }

    /// The marginal area needed for this rect to absorb `candidate`
    pub fn enlargement(&self, candidate: &Rect<P, DIM>) -> P {
        self.cover(candidate).area() - self.area()
    }
}

/// Total ordering key for costs. Overflowing areas still compare instead of panicking.
pub fn cost_key<P: FP>(cost: P) -> OrderedFloat<f64> {
    OrderedFloat(cost.to_f64().unwrap_or(::std::f64::INFINITY))
}

impl<P, const DIM: usize> Deref for Rect<P, DIM> {
    type Target = [(P, P)];

    fn deref(&self) -> &[(P, P)] {
        &self.edges
    }
}

impl<P, const DIM: usize> DerefMut for Rect<P, DIM> {
    fn deref_mut(&mut self) -> &mut [(P, P)] {
        &mut self.edges
    }
}

impl<P, const DIM: usize> AsRef<[(P, P)]> for Rect<P, DIM> {
    fn as_ref(&self) -> &[(P, P)] {
        self.deref()
    }
}

impl<P, const DIM: usize> AsMut<[(P, P)]> for Rect<P, DIM> {
    fn as_mut(&mut self) -> &mut [(P, P)] {
        self.deref_mut()
    }
}
