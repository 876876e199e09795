// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! An N-dimensional R-tree.
//!
//! Entries are axis-aligned rectangles paired with a caller supplied item. Inserts descend along
//! the least enlarging branch and overfull nodes are split quadratically. Removal dissolves nodes
//! that fall below the minimum fill and reinserts what they held.
//!
//! ```
//! use spatial::{Rect, RTree};
//!
//! let mut tree = RTree::new_quadratic_with_max(4);
//! tree.insert(Rect::new([(0.0, 1.0), (0.0, 1.0)]), 1);
//! tree.insert(Rect::new([(5.0, 6.0), (5.0, 6.0)]), 2);
//!
//! let mut found = Vec::new();
//! let hits = tree.search(&Rect::new([(0.0, 2.0), (0.0, 2.0)]), |item| {
//!     found.push(*item);
//!     true
//! });
//! assert_eq!(1, hits);
//! assert_eq!(vec![1], found);
//! assert!(tree.remove(&Rect::new([(0.0, 1.0), (0.0, 1.0)]), &1));
//! ```

#[macro_use]
extern crate itertools;
#[macro_use]
extern crate log;

extern crate num;
extern crate ordered_float;

#[cfg(test)]
#[macro_use]
extern crate approx;
#[cfg(test)]
extern crate rand;

pub mod geometry;
pub mod tree;

pub use geometry::Rect;
pub use tree::mbr::{MbrMap, MbrQuery, MbrRectQuery};
use tree::mbr::index::quadratic::RQuadraticInsert;
use tree::mbr::index::r::RRemove;
use tree::mbr::index::IndexInsert;
use num::{Bounded, Float, FromPrimitive, Signed, ToPrimitive};
use std::fmt::Debug;
use std::marker::PhantomData;
use std::ops::{AddAssign, MulAssign};

/// The coordinate type of every tree
pub trait FP: Float + Signed + Bounded + MulAssign + AddAssign + ToPrimitive + FromPrimitive + Copy + Debug + Default {}

impl<P> FP for P
    where P: Float + Signed + Bounded + MulAssign + AddAssign + ToPrimitive + FromPrimitive + Copy + Debug + Default
{}

/// Convenience struct for creating a new R Tree
pub struct RTree<P, const DIM: usize, T> {
    _p: PhantomData<P>,
    _t: PhantomData<T>,
}

/// An R Tree with quadratic splitting
pub type RQuadraticTree<P, const DIM: usize, T> = MbrMap<P, DIM, RQuadraticInsert<P, DIM, T>, RRemove<P, DIM, T>, T>;

impl<P, const DIM: usize, T> RTree<P, DIM, T>
    where P: FP,
          T: PartialEq
{
    /// Create a new quadratic R tree with min and max children lengths set to 16 and 32, respectively
    pub fn new_quadratic() -> RQuadraticTree<P, DIM, T> {
        RTree::map_from_insert(RQuadraticInsert::new())
    }

    /// Create a new quadratic R tree with max children lengths as provided. min length will be set to max / 2
    pub fn new_quadratic_with_max(max: usize) -> RQuadraticTree<P, DIM, T> {
        RTree::map_from_insert(RQuadraticInsert::new_with_max(max))
    }

    /// Create a new quadratic R tree with options as provided. Both maximums must be at least twice min
    pub fn new_quadratic_with_options(max_leaf: usize, max_interior: usize, min: usize) -> RQuadraticTree<P, DIM, T> {
        RTree::map_from_insert(RQuadraticInsert::new_with_options(max_leaf, max_interior, min))
    }

    fn map_from_insert(quadratic_insert: RQuadraticInsert<P, DIM, T>) -> RQuadraticTree<P, DIM, T> {
        let min = quadratic_insert.preferred_min();
        MbrMap::new(quadratic_insert, RRemove::with_min(min))
    }
}
