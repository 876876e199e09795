// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Guttman's R-tree insertion with the quadratic split

use geometry::{cost_key, Rect};
use itertools::Itertools;
use std::marker::PhantomData;
use std::mem;
use tree::mbr::index::{IndexInsert, InsertResult, D_MAX};
use tree::mbr::{Branch, MbrNode, Payload};
use FP;

/// One side of a split under construction
struct Group<P, const DIM: usize, T> {
    mbr: Rect<P, DIM>,
    branches: Vec<Branch<P, DIM, T>>,
}

impl<P: FP, const DIM: usize, T> Group<P, DIM, T> {
    fn seeded(seed: Branch<P, DIM, T>, capacity: usize) -> Group<P, DIM, T> {
        let mut branches = Vec::with_capacity(capacity);
        let mbr = seed.mbr;
        branches.push(seed);
        Group { mbr, branches }
    }

    fn push(&mut self, branch: Branch<P, DIM, T>) {
        self.mbr.expand_to_fit(&branch.mbr);
        self.branches.push(branch);
    }
}

/// PS1 & PS2: the pair wasting the most area when covered together
fn pick_seeds<P: FP, const DIM: usize, T>(branches: &[Branch<P, DIM, T>]) -> (usize, usize) {
    (0..branches.len())
        .tuple_combinations()
        .fold(None, |best, (i, j)| {
            let (a, b) = (&branches[i].mbr, &branches[j].mbr);
            let waste = cost_key(a.cover(b).area() - a.area() - b.area());
            match best {
                Some((_, max_waste)) if max_waste >= waste => best,
                _ => Some(((i, j), waste)),
            }
        })
        .map(|(seeds, _)| seeds)
        .unwrap_or((0, 1))
}

/// PN1 & PN2: the remaining branch with the strongest preference and whether it prefers `a`
fn pick_next<P: FP, const DIM: usize, T>(remaining: &[Branch<P, DIM, T>],
                                         a: &Group<P, DIM, T>,
                                         b: &Group<P, DIM, T>)
                                         -> (usize, bool) {
    let mut next = (0, true);
    let mut max_diff = None;
    for (index, branch) in remaining.iter().enumerate() {
        let d_a = a.mbr.enlargement(&branch.mbr);
        let d_b = b.mbr.enlargement(&branch.mbr);
        let diff = cost_key(if d_a > d_b { d_a - d_b } else { d_b - d_a });
        if max_diff.map_or(true, |max| diff > max) {
            max_diff = Some(diff);
            let prefers_a = (cost_key(d_a), cost_key(a.mbr.area()), a.branches.len()) <=
                            (cost_key(d_b), cost_key(b.mbr.area()), b.branches.len());
            next = (index, prefers_a);
        }
    }
    next
}

/// Divide `branches` into two groups of at least `min` branches each.
///
/// Seeds are the two branches that waste the most area together. The rest are handed out one at a
/// time, strongest preference first, unless one group needs every remaining branch to reach `min`.
pub fn quadratic_split<P: FP, const DIM: usize, T>(mut branches: Vec<Branch<P, DIM, T>>,
                                                   min: usize)
                                                   -> (Vec<Branch<P, DIM, T>>, Vec<Branch<P, DIM, T>>) {
    assert!(branches.len() >= 2 * min,
            "cannot split {:?} branches into groups of at least {:?}",
            branches.len(),
            min);
    let capacity = branches.len();
    let (i, j) = pick_seeds(&branches);
    // j > i, so removing j first leaves i in place
    let mut b = Group::seeded(branches.remove(j), capacity);
    let mut a = Group::seeded(branches.remove(i), capacity);

    while !branches.is_empty() {
        // QS2
        if a.branches.len() + branches.len() <= min {
            for branch in branches.drain(..) {
                a.push(branch);
            }
            break;
        }
        if b.branches.len() + branches.len() <= min {
            for branch in branches.drain(..) {
                b.push(branch);
            }
            break;
        }
        // QS3
        let (index, prefers_a) = pick_next(&branches, &a, &b);
        let branch = branches.remove(index);
        if prefers_a {
            a.push(branch);
        } else {
            b.push(branch);
        }
    }
    (a.branches, b.branches)
}

/// Quadratic split R-tree insertion
#[derive(Debug)]
pub struct RQuadraticInsert<P, const DIM: usize, T> {
    max_leaf: usize,
    max_interior: usize,
    min: usize,
    _p: PhantomData<P>,
    _t: PhantomData<T>,
}

impl<P: FP, const DIM: usize, T> RQuadraticInsert<P, DIM, T> {
    /// Max children of D_MAX for every level, min of half that
    pub fn new() -> RQuadraticInsert<P, DIM, T> {
        RQuadraticInsert::new_with_max(D_MAX)
    }

    /// Max children of `max` for every level, min of half that
    pub fn new_with_max(max: usize) -> RQuadraticInsert<P, DIM, T> {
        RQuadraticInsert::new_with_options(max, max, max / 2)
    }

    pub fn new_with_options(max_leaf: usize, max_interior: usize, min: usize) -> RQuadraticInsert<P, DIM, T> {
        assert!(min >= 2, "min({:?}) must be at least 2.", min);
        assert!(max_leaf >= 2 * min,
                "max_leaf({:?}) must be at least twice min({:?})",
                max_leaf,
                min);
        assert!(max_interior >= 2 * min,
                "max_interior({:?}) must be at least twice min({:?})",
                max_interior,
                min);
        RQuadraticInsert {
            max_leaf,
            max_interior,
            min,
            _p: PhantomData,
            _t: PhantomData,
        }
    }

    fn max_for_level(&self, level: usize) -> usize {
        if level == 0 { self.max_leaf } else { self.max_interior }
    }

    /// CL3: least enlargement, then smallest resulting area, then first seen
    fn pick_branch(&self, mbr: &Rect<P, DIM>, level: &MbrNode<P, DIM, T>) -> usize {
        level.branches()
            .iter()
            .enumerate()
            .min_by_key(|&(_, branch)| {
                let covered = branch.mbr.cover(mbr).area();
                (cost_key(covered - branch.mbr.area()), cost_key(covered))
            })
            .map(|(index, _)| index)
            .expect("cannot descend into an empty level")
    }

    fn insert_into_level(&self,
                         level: &mut MbrNode<P, DIM, T>,
                         branch: Branch<P, DIM, T>,
                         target_level: usize)
                         -> InsertResult<P, DIM, T> {
        // I2
        if level.level() == target_level {
            return self.add_branch(level, branch);
        }
        // CL1 - CL4
        let index = self.pick_branch(&branch.mbr, level);
        let mbr = branch.mbr;
        let insert_result = match level.branches_mut()[index].payload {
            Payload::Interior(ref mut child) => self.insert_into_level(&mut **child, branch, target_level),
            Payload::Leaf(_) => unreachable!("leaf branch above level {:?}", target_level),
        };
        // AT3 & AT4
        match insert_result {
            InsertResult::Ok => {
                level.branches_mut()[index].mbr.expand_to_fit(&mbr);
                InsertResult::Ok
            }
            InsertResult::Split(split) => {
                {
                    let chosen = &mut level.branches_mut()[index];
                    if let Payload::Interior(ref child) = chosen.payload {
                        chosen.mbr = child.cover();
                    }
                }
                let split_mbr = split.cover();
                self.add_branch(level, Branch::interior(split_mbr, split))
            }
        }
    }

    /// Append, splitting the level if it overflows
    fn add_branch(&self, level: &mut MbrNode<P, DIM, T>, branch: Branch<P, DIM, T>) -> InsertResult<P, DIM, T> {
        level.branches_mut().push(branch);
        if level.len() > self.max_for_level(level.level()) {
            return InsertResult::Split(self.split(level));
        }
        InsertResult::Ok
    }

    /// Split an overfull level in place, returning its new sibling
    fn split(&self, level: &mut MbrNode<P, DIM, T>) -> MbrNode<P, DIM, T> {
        let branches = mem::replace(level.branches_mut(), Vec::new());
        let (kept, split) = quadratic_split(branches, self.min);
        trace!("split level {:?} into {:?} and {:?} branches",
               level.level(),
               kept.len(),
               split.len());
        *level.branches_mut() = kept;
        MbrNode::from_branches(level.level(), split)
    }

    fn handle_split_root(&self, root: MbrNode<P, DIM, T>, split: MbrNode<P, DIM, T>) -> MbrNode<P, DIM, T> {
        let level = root.level() + 1;
        debug!("root split, height grows to {:?}", level);
        let root_mbr = root.cover();
        let split_mbr = split.cover();
        let mut split_children = Vec::with_capacity(self.max_interior + 1);
        split_children.push(Branch::interior(root_mbr, root));
        split_children.push(Branch::interior(split_mbr, split));
        MbrNode::from_branches(level, split_children)
    }
}

impl<P: FP, const DIM: usize, T> IndexInsert<P, DIM, T> for RQuadraticInsert<P, DIM, T> {
    fn insert_into_root(&self,
                        mut root: MbrNode<P, DIM, T>,
                        branch: Branch<P, DIM, T>,
                        level: usize)
                        -> MbrNode<P, DIM, T> {
        assert!(level <= root.level(),
                "level({:?}) must not be above the root level({:?})",
                level,
                root.level());
        match self.insert_into_level(&mut root, branch, level) {
            InsertResult::Split(split) => self.handle_split_root(root, split),
            InsertResult::Ok => root,
        }
    }

    fn preferred_min(&self) -> usize {
        self.min
    }

    fn new_leaves(&self) -> MbrNode<P, DIM, T> {
        MbrNode::with_capacity(0, self.max_leaf + 1)
    }

    fn new_no_alloc_leaves(&self) -> MbrNode<P, DIM, T> {
        MbrNode::new_leaves()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_at(x: f64, y: f64, item: usize) -> Branch<f64, 2, usize> {
        Branch::leaf(Rect::new([(x, x + 1.0), (y, y + 1.0)]), item)
    }

    fn items(branches: &[Branch<f64, 2, usize>]) -> Vec<usize> {
        let mut items: Vec<usize> = branches.iter().filter_map(|b| b.item().cloned()).collect();
        items.sort();
        items
    }

    #[test]
    fn seeds_are_most_wasteful_pair() {
        let branches = vec![unit_at(0.0, 0.0, 0), unit_at(1.0, 1.0, 1), unit_at(9.0, 9.0, 2), unit_at(2.0, 0.0, 3)];
        assert_eq!((0, 2), pick_seeds(&branches));
    }

    #[test]
    fn split_separates_clusters() {
        let branches = vec![unit_at(0.0, 0.0, 0),
                            unit_at(20.0, 20.0, 1),
                            unit_at(0.5, 0.5, 2),
                            unit_at(21.0, 20.0, 3),
                            unit_at(1.0, 0.0, 4)];
        let (a, b) = quadratic_split(branches, 2);
        assert_eq!(vec![0, 2, 4], items(&a));
        assert_eq!(vec![1, 3], items(&b));
    }

    #[test]
    fn split_honors_min() {
        // one outlier would otherwise end up alone
        let mut branches: Vec<_> = (0..8).map(|i| unit_at(i as f64 * 0.1, 0.0, i)).collect();
        branches.push(unit_at(100.0, 100.0, 8));
        let (a, b) = quadratic_split(branches, 4);
        assert!(a.len() >= 4 && b.len() >= 4);
        let mut all = items(&a);
        all.extend(items(&b));
        all.sort();
        assert_eq!((0..9).collect::<Vec<_>>(), all);
    }

    #[test]
    fn pick_branch_prefers_least_enlargement_then_area() {
        let insert: RQuadraticInsert<f64, 2, usize> = RQuadraticInsert::new_with_max(4);
        let level = MbrNode::from_branches(0, vec![
            Branch::leaf(Rect::new([(0.0, 4.0), (0.0, 4.0)]), 0),
            Branch::leaf(Rect::new([(0.0, 2.0), (0.0, 2.0)]), 1),
            Branch::leaf(Rect::new([(10.0, 11.0), (10.0, 11.0)]), 2),
        ]);
        // inside both of the first two, the smaller wins the tie on enlargement
        assert_eq!(1, insert.pick_branch(&Rect::point([1.0, 1.0]), &level));
        // only the first absorbs it for free
        assert_eq!(0, insert.pick_branch(&Rect::point([3.0, 3.0]), &level));
        assert_eq!(2, insert.pick_branch(&Rect::point([11.0, 12.0]), &level));
    }

    #[test]
    fn root_split_grows_height() {
        let insert: RQuadraticInsert<f64, 2, usize> = RQuadraticInsert::new_with_max(4);
        let mut root = insert.new_leaves();
        for i in 0..5 {
            root = insert.insert_into_root(root, unit_at(i as f64 * 3.0, 0.0, i), 0);
        }
        assert_eq!(1, root.level());
        assert_eq!(2, root.len());
        for branch in root.branches() {
            let child = branch.child().expect("interior branch");
            assert_eq!(child.cover(), branch.mbr);
            assert!(child.len() >= 2 && child.len() <= 4);
        }
    }

    #[test]
    #[should_panic]
    fn level_above_root() {
        let insert: RQuadraticInsert<f64, 2, usize> = RQuadraticInsert::new_with_max(4);
        insert.insert_into_root(insert.new_leaves(), unit_at(0.0, 0.0, 0), 1);
    }

    #[test]
    #[should_panic]
    fn min_must_fit_twice() {
        let _: RQuadraticInsert<f64, 2, usize> = RQuadraticInsert::new_with_options(8, 5, 3);
    }
}
