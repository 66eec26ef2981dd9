// Capacity-checked append-only list.
//
// The occlusion index and the renderer's draw lists both accumulate large
// numbers of segments per frame or per world. They must never drop an
// entry silently: a push past the configured capacity is an error, and so
// is a failed allocation while growing.

use crate::error::{Result, UrbanError};

/// A `Vec` with a hard upper bound on its length.
#[derive(Clone, Debug)]
pub struct BoundedVec<T> {
    name: &'static str,
    capacity: usize,
    items: Vec<T>,
}

impl<T> BoundedVec<T> {
    /// `name` appears in the error when the list fills up.
    pub fn new(name: &'static str, capacity: usize) -> Self {
        Self {
            name,
            capacity,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, item: T) -> Result<()> {
        if self.items.len() >= self.capacity {
            return Err(UrbanError::CapacityExceeded {
                list: self.name,
                capacity: self.capacity,
            });
        }
        self.items.try_reserve(1)?;
        self.items.push(item);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}
