#![cfg(test)]

use std::cell::Cell;

use quickcheck::{Arbitrary, Gen};

pub struct DropCounter {
    count: Cell<usize>,
}

impl DropCounter {
    pub fn new() -> Self {
        DropCounter {
            count: Cell::new(0),
        }
    }

    pub fn drop_count(&self) -> usize {
        self.count.get()
    }

    pub fn new_value(&self) -> DroppableValue<'_> {
        DroppableValue(self)
    }
}

pub struct DroppableValue<'a>(&'a DropCounter);

impl<'a> Drop for DroppableValue<'a> {
    fn drop(&mut self) {
        self.0.count.set(self.0.count.get() + 1);
    }
}

/// A scripted mutation for property tests over keyed containers.  Small key
/// ranges keep collisions, overwrites and removals of present keys frequent.
#[derive(Clone, Debug)]
pub enum MapOp {
    Put(u8, u32),
    Remove(u8),
}

impl Arbitrary for MapOp {
    fn arbitrary(g: &mut Gen) -> Self {
        let key = u8::arbitrary(g) % 32;
        if bool::arbitrary(g) || bool::arbitrary(g) {
            MapOp::Put(key, u32::arbitrary(g))
        } else {
            MapOp::Remove(key)
        }
    }
}
