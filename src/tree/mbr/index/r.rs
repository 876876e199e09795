// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use geometry::Rect;
use std::marker::PhantomData;
use tree::mbr::index::{IndexInsert, IndexRemove, Orphan, RemoveResult, RemoveReturn, AT_ROOT, NOT_AT_ROOT};
use tree::mbr::{MbrNode, Payload};
use FP;

/// R-tree removal. Underfull levels are dissolved and their branches reinserted
#[derive(Debug)]
pub struct RRemove<P, const DIM: usize, T> {
    min: usize,
    _p: PhantomData<P>,
    _t: PhantomData<T>,
}

impl<P, const DIM: usize, T> RRemove<P, DIM, T>
    where P: FP,
          T: PartialEq
{
    pub fn with_min(min: usize) -> RRemove<P, DIM, T> {
        assert!(min >= 2, "min({:?}) must be at least 2.", min);
        RRemove {
            min,
            _p: PhantomData,
            _t: PhantomData,
        }
    }

    /// Remove the matching entry somewhere below `level`. Returns the orphans of every level
    /// dissolved on the way, or None if nothing matched
    fn remove_from_branches(&self,
                            level: &mut MbrNode<P, DIM, T>,
                            mbr: &Rect<P, DIM>,
                            item: &T)
                            -> Option<Vec<Orphan<P, DIM, T>>> {
        if level.has_leaves() {
            let position = level.branches()
                .iter()
                .position(|leaf| leaf.item() == Some(item) && leaf.mbr.overlaps(mbr))?;
            level.branches_mut().remove(position);
            return Some(Vec::new());
        }
        for index in 0..level.len() {
            if !level.branches()[index].mbr.overlaps(mbr) {
                continue;
            }
            let remove_result = match level.branches_mut()[index].payload {
                Payload::Interior(ref mut child) => self.remove_from_level(&mut **child, mbr, item, NOT_AT_ROOT),
                Payload::Leaf(_) => unreachable!("leaf branch above the leaf level"),
            };
            match remove_result {
                RemoveResult::NotFound => continue,
                RemoveResult::Removed(orphans) => {
                    let child = &mut level.branches_mut()[index];
                    if let Payload::Interior(ref node) = child.payload {
                        child.mbr = node.cover();
                    }
                    return Some(orphans);
                }
                RemoveResult::Collapsed(orphans) => {
                    level.branches_mut().remove(index);
                    return Some(orphans);
                }
            }
        }
        None
    }

    /// Remove the matching entry from `level` and decide whether the level survives
    fn remove_from_level(&self,
                         level: &mut MbrNode<P, DIM, T>,
                         mbr: &Rect<P, DIM>,
                         item: &T,
                         at_root: bool)
                         -> RemoveResult<P, DIM, T> {
        let mut orphans = match self.remove_from_branches(level, mbr, item) {
            Some(orphans) => orphans,
            None => return RemoveResult::NotFound,
        };
        if level.len() < self.min && !at_root {
            let orphan_level = level.level();
            orphans.extend(level.branches_mut()
                .drain(..)
                .map(|branch| Orphan { level: orphan_level, branch }));
            return RemoveResult::Collapsed(orphans);
        }
        RemoveResult::Removed(orphans)
    }
}

impl<P, const DIM: usize, T, I> IndexRemove<P, DIM, T, I> for RRemove<P, DIM, T>
    where P: FP,
          T: PartialEq,
          I: IndexInsert<P, DIM, T>
{
    fn preferred_min(&self) -> usize {
        self.min
    }

    fn remove_from_root(&self,
                        mut root: MbrNode<P, DIM, T>,
                        insert_index: &I,
                        mbr: &Rect<P, DIM>,
                        item: &T)
                        -> RemoveReturn<P, DIM, T> {
        let orphans = match self.remove_from_level(&mut root, mbr, item, AT_ROOT) {
            RemoveResult::NotFound => return (root, false),
            RemoveResult::Removed(orphans) => orphans,
            RemoveResult::Collapsed(_) => unreachable!("the root is never dissolved"),
        };
        if !orphans.is_empty() {
            trace!("reinserting {:?} orphaned branches", orphans.len());
        }
        // Orphans come from below the root, so their levels always fit
        for Orphan { level, branch } in orphans {
            root = insert_index.insert_into_root(root, branch, level);
        }
        loop {
            root = match root.into_only_child() {
                Ok(child) => {
                    debug!("root has a single child, height shrinks to {:?}", child.level());
                    child
                }
                Err(root) => return (root, true),
            };
        }
    }
}
