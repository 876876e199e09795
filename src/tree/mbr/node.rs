// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use geometry::Rect;
use tree::mbr::{Branch, Payload};
use FP;

/// Level node of a tree. Either contains other levels or leaves
#[derive(Debug, Clone)]
pub struct MbrNode<P, const DIM: usize, T> {
    level: usize,
    branches: Vec<Branch<P, DIM, T>>,
}

impl<P, const DIM: usize, T> MbrNode<P, DIM, T> {
    /// Create an empty leaf level
    pub fn new_leaves() -> MbrNode<P, DIM, T> {
        MbrNode::with_capacity(0, 0)
    }

    /// Create an empty node at `level` with room for `capacity` branches
    pub fn with_capacity(level: usize, capacity: usize) -> MbrNode<P, DIM, T> {
        MbrNode { level, branches: Vec::with_capacity(capacity) }
    }

    /// Create a node at `level` owning `branches`
    pub fn from_branches(level: usize, branches: Vec<Branch<P, DIM, T>>) -> MbrNode<P, DIM, T> {
        MbrNode { level, branches }
    }

    /// 0 for leaves, otherwise one more than the children's level
    pub fn level(&self) -> usize {
        self.level
    }

    /// Does the level point to leaves?
    pub fn has_leaves(&self) -> bool {
        self.level == 0
    }

    /// Does the level point to other levels?
    pub fn has_levels(&self) -> bool {
        !self.has_leaves()
    }

    /// Number of level's branches
    pub fn len(&self) -> usize {
        self.branches.len()
    }

    /// Does the level have branches?
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    pub fn branches(&self) -> &[Branch<P, DIM, T>] {
        &self.branches
    }

    pub fn branches_mut(&mut self) -> &mut Vec<Branch<P, DIM, T>> {
        &mut self.branches
    }

    /// The sole child of an interior node holding exactly one branch
    pub fn into_only_child(mut self) -> Result<MbrNode<P, DIM, T>, MbrNode<P, DIM, T>> {
        if self.level == 0 || self.branches.len() != 1 {
            return Err(self);
        }
        match self.branches.pop() {
            Some(Branch { payload: Payload::Interior(child), .. }) => Ok(*child),
            _ => unreachable!("interior node holding a leaf branch"),
        }
    }
}

impl<P: FP, const DIM: usize, T> MbrNode<P, DIM, T> {
    /// The minimum bounding rect of every branch.
    ///
    /// Panics on an empty node
    pub fn cover(&self) -> Rect<P, DIM> {
        assert!(!self.branches.is_empty(), "cover of an empty node is undefined");
        let mut mbr = Rect::max_inverted();
        for branch in &self.branches {
            mbr.expand_to_fit(&branch.mbr);
        }
        mbr
    }
}
