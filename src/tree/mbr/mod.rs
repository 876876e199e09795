// Copyright 2016 spatial-rs Developers
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Minimum bounding rectangle spatial trees

pub mod index;
mod branch;
mod map;
mod node;
mod query;

pub use tree::mbr::branch::{Branch, Payload};
pub use tree::mbr::map::{Iter, MbrMap};
pub use tree::mbr::node::MbrNode;
pub use tree::mbr::query::{MbrQuery, MbrRectQuery};
