// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use geometry::Rect;
use std::mem;
use std::slice::Iter as SliceIter;
use tree::mbr::index::{IndexInsert, IndexRemove};
use tree::mbr::query::search_level;
use tree::mbr::{Branch, MbrNode, MbrQuery, MbrRectQuery, Payload};
use FP;

/// The generic container interface for spatial maps. Insertion and removal strategies are
/// pluggable, the tree itself only owns the root.
#[derive(Debug)]
pub struct MbrMap<P, const DIM: usize, I, R, T> {
    insert_index: I,
    remove_index: R,
    root: MbrNode<P, DIM, T>,
    len: usize,
}

impl<P, const DIM: usize, I, R, T> MbrMap<P, DIM, I, R, T>
    where P: FP,
          I: IndexInsert<P, DIM, T>,
          R: IndexRemove<P, DIM, T, I>
{
    /// Create a new MbrMap with the given insert and remove indexes
    pub fn new(insert_index: I, remove_index: R) -> MbrMap<P, DIM, I, R, T> {
        assert!(insert_index.preferred_min() == remove_index.preferred_min(),
                "insert min({:?}) and remove min({:?}) must match",
                insert_index.preferred_min(),
                remove_index.preferred_min());
        let new_root = insert_index.new_leaves();
        MbrMap {
            insert_index,
            remove_index,
            root: new_root,
            len: 0,
        }
    }

    /// Insert an item. Panics if `mbr` is not finite with low <= high on every axis
    pub fn insert(&mut self, mbr: Rect<P, DIM>, item: T) {
        mbr.assert_well_formed();
        let root = mem::replace(&mut self.root, self.insert_index.new_no_alloc_leaves());
        self.root = self.insert_index.insert_into_root(root, Branch::leaf(mbr, item), 0);
        self.len += 1;
    }

    /// Remove the entry whose item equals `item` and whose rect overlaps `mbr`.
    /// Returns false, leaving the map untouched, if there is no such entry
    pub fn remove(&mut self, mbr: &Rect<P, DIM>, item: &T) -> bool {
        let root = mem::replace(&mut self.root, self.insert_index.new_no_alloc_leaves());
        let (new_root, found) = self.remove_index.remove_from_root(root, &self.insert_index, mbr, item);
        self.root = new_root;
        if found {
            self.len -= 1;
        }
        found
    }

    /// Call `f` with every item whose rect overlaps `query` until `f` returns false.
    /// Returns the number of items handed to `f`
    pub fn search<F: FnMut(&T) -> bool>(&self, query: &Rect<P, DIM>, f: F) -> usize {
        self.search_query(MbrRectQuery::Overlaps(*query), f)
    }

    /// Call `f` with every item accepted by `query` until `f` returns false.
    /// Returns the number of items handed to `f`
    pub fn search_query<Q: MbrQuery<P, DIM>, F: FnMut(&T) -> bool>(&self, query: Q, mut f: F) -> usize {
        let mut hits = 0;
        search_level(&self.root, &query, &mut f, &mut hits);
        hits
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Length of the map
    pub fn len(&self) -> usize {
        self.len
    }

    /// The root's level. 0 while every entry fits in a single leaf
    pub fn height(&self) -> usize {
        self.root.level()
    }

    /// Clear the map
    pub fn clear(&mut self) {
        self.root = self.insert_index.new_leaves();
        self.len = 0;
    }

    /// Iter for the map
    pub fn iter(&self) -> Iter<P, DIM, T, MbrRectQuery<P, DIM>> {
        Iter::new(MbrRectQuery::Overlaps(Rect::max()), &self.root)
    }

    /// Iter for the map with a given query
    pub fn iter_query<Q: MbrQuery<P, DIM>>(&self, query: Q) -> Iter<P, DIM, T, Q> {
        Iter::new(query, &self.root)
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> &MbrNode<P, DIM, T> {
        &self.root
    }
}

/// Iter all `(rect, item)` entries matching a query
pub struct Iter<'tree, P: 'tree, const DIM: usize, T: 'tree, Q> {
    query: Q,
    level_stack: Vec<SliceIter<'tree, Branch<P, DIM, T>>>,
}

impl<'tree, P, const DIM: usize, T, Q> Iter<'tree, P, DIM, T, Q>
    where P: FP,
          Q: MbrQuery<P, DIM>
{
    fn new(query: Q, root: &'tree MbrNode<P, DIM, T>) -> Iter<'tree, P, DIM, T, Q> {
        let mut level_stack = Vec::with_capacity(root.level() + 1);
        level_stack.push(root.branches().iter());
        Iter { query, level_stack }
    }
}

impl<'tree, P, const DIM: usize, T, Q> Iterator for Iter<'tree, P, DIM, T, Q>
    where P: FP,
          Q: MbrQuery<P, DIM>
{
    type Item = (&'tree Rect<P, DIM>, &'tree T);

    fn next(&mut self) -> Option<(&'tree Rect<P, DIM>, &'tree T)> {
        loop {
            let next = match self.level_stack.last_mut() {
                Some(iter) => iter.next(),
                None => return None,
            };
            match next {
                None => {
                    self.level_stack.pop();
                }
                Some(branch) => {
                    match branch.payload {
                        Payload::Leaf(ref item) => {
                            if self.query.accept_leaf(&branch.mbr) {
                                return Some((&branch.mbr, item));
                            }
                        }
                        Payload::Interior(ref child) => {
                            if self.query.accept_level(&branch.mbr) {
                                self.level_stack.push(child.branches().iter());
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use tree::mbr::index::quadratic::RQuadraticInsert;
    use tree::mbr::index::r::RRemove;

    type TestMap = MbrMap<f64, 2, RQuadraticInsert<f64, 2, usize>, RRemove<f64, 2, usize>, usize>;

    fn new_map(max_leaf: usize, max_interior: usize, min: usize) -> TestMap {
        MbrMap::new(RQuadraticInsert::new_with_options(max_leaf, max_interior, min),
                    RRemove::with_min(min))
    }

    fn random_rect(rng: &mut StdRng) -> Rect<f64, 2> {
        let x: f64 = rng.gen_range(0.0..100.0);
        let y: f64 = rng.gen_range(0.0..100.0);
        let w: f64 = rng.gen_range(0.0..5.0);
        let h: f64 = rng.gen_range(0.0..5.0);
        Rect::new([(x, x + w), (y, y + h)])
    }

    /// Checks cover consistency, level consistency and fill bounds below `node`.
    /// Returns the number of leaf entries.
    fn check_level(node: &MbrNode<f64, 2, usize>, at_root: bool, max_leaf: usize, max_interior: usize, min: usize) -> usize {
        let max = if node.has_leaves() { max_leaf } else { max_interior };
        assert!(node.len() <= max, "{:?} branches on level {:?}", node.len(), node.level());
        if !at_root {
            assert!(node.len() >= min, "{:?} branches on level {:?}", node.len(), node.level());
        }
        let mut entries = 0;
        for branch in node.branches() {
            match branch.payload {
                Payload::Leaf(_) => {
                    assert!(node.has_leaves());
                    entries += 1;
                }
                Payload::Interior(ref child) => {
                    assert_eq!(node.level(), child.level() + 1);
                    assert_eq!(child.cover(), branch.mbr);
                    entries += check_level(child, false, max_leaf, max_interior, min);
                }
            }
        }
        entries
    }

    fn check_invariants(map: &TestMap, max_leaf: usize, max_interior: usize, min: usize) {
        let root = map.root();
        if root.has_levels() {
            assert!(root.len() >= 2, "interior root with {:?} branches", root.len());
        }
        assert_eq!(map.len(), check_level(root, true, max_leaf, max_interior, min));
    }

    #[test]
    fn invariants_hold_through_inserts_and_removes() {
        let (max_leaf, max_interior, min) = (6, 4, 2);
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut map = new_map(max_leaf, max_interior, min);
        let mut entries = Vec::new();
        for i in 0..500 {
            let rect = random_rect(&mut rng);
            map.insert(rect, i);
            entries.push((rect, i));
            check_invariants(&map, max_leaf, max_interior, min);
        }
        assert!(map.height() >= 3);

        while !entries.is_empty() {
            let index = rng.gen_range(0..entries.len());
            let (rect, item) = entries.swap_remove(index);
            assert!(map.remove(&rect, &item));
            assert!(!map.remove(&rect, &item));
            check_invariants(&map, max_leaf, max_interior, min);
            let mut seen = false;
            map.search(&rect, |found| {
                seen |= *found == item;
                true
            });
            assert!(!seen);
        }
        assert_eq!(0, map.height());
        assert!(map.root().is_empty());
    }

    #[test]
    fn search_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut map = new_map(8, 8, 3);
        let mut entries = Vec::new();
        for i in 0..300 {
            let rect = random_rect(&mut rng);
            map.insert(rect, i);
            entries.push((rect, i));
        }
        for _ in 0..50 {
            let query = random_rect(&mut rng);
            let mut expected: Vec<usize> = entries.iter()
                .filter(|&&(ref rect, _)| rect.overlaps(&query))
                .map(|&(_, item)| item)
                .collect();
            let mut found = Vec::new();
            let hits = map.search(&query, |item| {
                found.push(*item);
                true
            });
            let mut iterated: Vec<usize> = map.iter_query(MbrRectQuery::Overlaps(query)).map(|(_, item)| *item).collect();
            expected.sort();
            found.sort();
            iterated.sort();
            assert_eq!(expected.len(), hits);
            assert_eq!(expected, found);
            assert_eq!(expected, iterated);
        }
    }

    #[test]
    fn stop_search_early() {
        let mut map = new_map(4, 4, 2);
        for i in 0..40 {
            map.insert(Rect::point([i as f64, i as f64]), i);
        }
        let mut calls = 0;
        let hits = map.search(&Rect::max(), |_| {
            calls += 1;
            calls < 7
        });
        assert_eq!(7, hits);
        assert_eq!(7, calls);
    }

    #[test]
    fn clear() {
        let mut map = new_map(4, 4, 2);
        for i in 0..20 {
            map.insert(Rect::point([i as f64, 0.0]), i);
        }
        assert_eq!(20, map.iter().count());
        map.clear();
        assert!(map.is_empty());
        assert_eq!(0, map.height());
        assert_eq!(0, map.iter().count());
        assert_eq!(0, map.search(&Rect::max(), |_| true));
    }

    #[test]
    #[should_panic]
    fn insert_rejects_inverted_rect() {
        let mut map = new_map(4, 4, 2);
        map.insert(Rect::max_inverted(), 7);
    }

    #[test]
    #[should_panic]
    fn insert_rejects_hand_built_inverted_edges() {
        let mut map = new_map(4, 4, 2);
        map.insert(Rect { edges: [(5.0, 1.0), (0.0, 1.0)] }, 8);
    }

    #[test]
    #[should_panic]
    fn insert_and_remove_min_must_agree() {
        let _map: TestMap = MbrMap::new(RQuadraticInsert::new_with_max(4), RRemove::with_min(3));
    }
}
