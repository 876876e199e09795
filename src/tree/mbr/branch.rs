// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use geometry::Rect;
use tree::mbr::MbrNode;

/// What a branch points at. Which variant is present is decided by the owning node's level:
/// leaves (level 0) only hold `Leaf`, every other level only holds `Interior`.
#[derive(Debug, Clone)]
pub enum Payload<P, const DIM: usize, T> {
    /// A caller supplied item
    Leaf(T),
    /// An exclusively owned child node one level down
    Interior(Box<MbrNode<P, DIM, T>>),
}

/// A minimum bounding rectangle paired with its payload
#[derive(Debug, Clone)]
pub struct Branch<P, const DIM: usize, T> {
    pub mbr: Rect<P, DIM>,
    pub payload: Payload<P, DIM, T>,
}

impl<P, const DIM: usize, T> Branch<P, DIM, T> {
    /// New leaf branch from an inserted rect and its item
    pub fn leaf(mbr: Rect<P, DIM>, item: T) -> Branch<P, DIM, T> {
        Branch { mbr, payload: Payload::Leaf(item) }
    }

    /// New interior branch. `mbr` must cover every branch of `child`
    pub fn interior(mbr: Rect<P, DIM>, child: MbrNode<P, DIM, T>) -> Branch<P, DIM, T> {
        Branch { mbr, payload: Payload::Interior(Box::new(child)) }
    }

    /// The leaf item, if this is a leaf branch
    pub fn item(&self) -> Option<&T> {
        match self.payload {
            Payload::Leaf(ref item) => Some(item),
            Payload::Interior(_) => None,
        }
    }

    /// The child node, if this is an interior branch
    pub fn child(&self) -> Option<&MbrNode<P, DIM, T>> {
        match self.payload {
            Payload::Leaf(_) => None,
            Payload::Interior(ref child) => Some(&**child),
        }
    }
}
