// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use geometry::Rect;
use tree::mbr::{Branch, MbrNode};
pub mod quadratic;
pub mod r;

pub const D_MAX: usize = 32;
const AT_ROOT: bool = true;
const NOT_AT_ROOT: bool = false;

/// Insert branches into the root
pub trait IndexInsert<P, const DIM: usize, T> {
    /// Insert `branch` into a node at `level` below (or at) `root`, returning the possibly new root.
    /// Level 0 inserts an item; higher levels reattach whole subtrees.
    fn insert_into_root(&self,
                        root: MbrNode<P, DIM, T>,
                        branch: Branch<P, DIM, T>,
                        level: usize)
                        -> MbrNode<P, DIM, T>;

    fn preferred_min(&self) -> usize;

    fn new_leaves(&self) -> MbrNode<P, DIM, T>;

    fn new_no_alloc_leaves(&self) -> MbrNode<P, DIM, T>;
}

/// The root after a removal and whether anything was removed
pub type RemoveReturn<P, const DIM: usize, T> = (MbrNode<P, DIM, T>, bool);

/// Remove the entry matching both rect and item from the tree
pub trait IndexRemove<P, const DIM: usize, T, I>
    where I: IndexInsert<P, DIM, T>
{
    /// Fewest branches a non-root level may keep before it is dissolved
    fn preferred_min(&self) -> usize;

    fn remove_from_root(&self,
                        root: MbrNode<P, DIM, T>,
                        insert_index: &I,
                        mbr: &Rect<P, DIM>,
                        item: &T)
                        -> RemoveReturn<P, DIM, T>;
}

/// A branch cut loose from a dissolved node, along with the level it has to be reinserted at
#[derive(Debug)]
pub struct Orphan<P, const DIM: usize, T> {
    pub level: usize,
    pub branch: Branch<P, DIM, T>,
}

#[derive(Debug)]
#[must_use]
enum InsertResult<P, const DIM: usize, T> {
    Ok,
    Split(MbrNode<P, DIM, T>),
}

#[derive(Debug)]
#[must_use]
enum RemoveResult<P, const DIM: usize, T> {
    NotFound,
    /// The entry is gone and the level still holds enough branches
    Removed(Vec<Orphan<P, DIM, T>>),
    /// The entry is gone and the level fell below the minimum. Its remaining branches are among
    /// the orphans and the parent must drop its branch to it.
    Collapsed(Vec<Orphan<P, DIM, T>>),
}
