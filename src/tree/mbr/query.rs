// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use geometry::Rect;
use tree::mbr::{MbrNode, Payload};
use FP;

/// Query trait for navigating the tree
pub trait MbrQuery<P, const DIM: usize> {
    /// Returns true if the leaf matches the query
    fn accept_leaf(&self, mbr: &Rect<P, DIM>) -> bool;
    /// Returns true if the level may contain matching leaves
    fn accept_level(&self, mbr: &Rect<P, DIM>) -> bool;
}

/// Rect based query
#[derive(Debug, Clone)]
pub enum MbrRectQuery<P, const DIM: usize> {
    /// Matching leaves are ones that are completely contained by this rect
    ContainedBy(Rect<P, DIM>),
    /// Matching leaves are ones that overlap this rect
    Overlaps(Rect<P, DIM>),
}

impl<P: FP, const DIM: usize> MbrQuery<P, DIM> for MbrRectQuery<P, DIM> {
    fn accept_leaf(&self, mbr: &Rect<P, DIM>) -> bool {
        match *self {
            MbrRectQuery::ContainedBy(ref query) => query.contains(mbr),
            MbrRectQuery::Overlaps(ref query) => query.overlaps(mbr),
        }
    }

    fn accept_level(&self, mbr: &Rect<P, DIM>) -> bool {
        match *self {
            MbrRectQuery::ContainedBy(ref query) => query.overlaps(mbr),
            MbrRectQuery::Overlaps(ref query) => query.overlaps(mbr),
        }
    }
}

/// Feeds every leaf item under `node` accepted by `query` to `f`, pruning levels the query rejects.
/// Returns false once `f` has asked to stop. `hits` counts every accepted leaf, including the one
/// that stopped the search.
pub fn search_level<P, const DIM: usize, T, Q, F>(node: &MbrNode<P, DIM, T>, query: &Q, f: &mut F, hits: &mut usize) -> bool
    where P: FP,
          Q: MbrQuery<P, DIM>,
          F: FnMut(&T) -> bool
{
    for branch in node.branches() {
        match branch.payload {
            Payload::Interior(ref child) => {
                if query.accept_level(&branch.mbr) && !search_level(&**child, query, f, hits) {
                    return false;
                }
            }
            Payload::Leaf(ref item) => {
                if query.accept_leaf(&branch.mbr) {
                    *hits += 1;
                    if !f(item) {
                        return false;
                    }
                }
            }
        }
    }
    true
}
