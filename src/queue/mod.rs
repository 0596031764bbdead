use std::fmt::{self, Debug, Formatter};

use crate::element::Element;
use crate::error::Result;
use crate::ring::iterator::{Iter, Values};
use crate::ring::Ring;

pub use crate::queue::merge::{QueueChain, QueueContext};
pub use crate::queue::sort::Order;

mod algorithms;
mod merge;
mod sort;

/// A queue of strings kept in a [`Ring`].
///
/// The queue owns every element reachable from its ghost link. Elements are
/// created on insertion and handed back, detached, on removal. Every
/// structural operation (dedup, swap, reverse, sort, filter, merge) relinks
/// existing nodes in place; none copies a payload.
///
/// Dropping the queue frees every element it still owns.
///
/// # Examples
///
/// ```
/// use ring_queue::Queue;
///
/// let mut queue = Queue::new();
/// queue.insert_tail("b").unwrap();
/// queue.insert_head("a").unwrap();
/// queue.insert_tail("c").unwrap();
/// assert_eq!(queue.size(), 3);
///
/// let mut buf = [0u8; 8];
/// let removed = queue.remove_head(Some(&mut buf)).unwrap();
/// assert_eq!(removed.value(), "a");
/// assert_eq!(&buf[..2], b"a\0");
/// assert_eq!(queue.values().collect::<Vec<_>>(), ["b", "c"]);
/// ```
#[derive(Default, PartialEq, Eq)]
pub struct Queue {
    ring: Ring,
}

impl Queue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self { ring: Ring::new() }
    }

    /// Create a queue holding copies of `values`, in order.
    pub fn from_values<I, S>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut queue = Queue::new();
        for value in values {
            queue.insert_tail(value.as_ref())?;
        }
        Ok(queue)
    }

    /// The underlying ring.
    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    /// The underlying ring, for editing through its cursors.
    pub fn ring_mut(&mut self) -> &mut Ring {
        &mut self.ring
    }

    /// Returns `true` if the queue holds no element.
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// The number of elements in the queue.
    ///
    /// This is *O*(1) with the `length` feature and a full traversal without it.
    pub fn size(&self) -> usize {
        self.ring.len()
    }

    /// Drop every element, leaving the queue empty.
    pub fn clear(&mut self) {
        self.ring.clear();
    }

    /// Insert a copy of `value` at the head of the queue.
    ///
    /// Fails only if the element cannot be allocated, in which case the
    /// queue is left as it was.
    pub fn insert_head(&mut self, value: &str) -> Result<()> {
        let element = Element::new(value)?;
        self.ring.push_front(element);
        log::trace!("inserted {:?} at head", value);
        Ok(())
    }

    /// Insert a copy of `value` at the tail of the queue.
    ///
    /// Fails only if the element cannot be allocated, in which case the
    /// queue is left as it was.
    pub fn insert_tail(&mut self, value: &str) -> Result<()> {
        let element = Element::new(value)?;
        self.ring.push_back(element);
        log::trace!("inserted {:?} at tail", value);
        Ok(())
    }

    /// Detach the head element and hand it to the caller, or return `None` if
    /// the queue is empty.
    ///
    /// If `buf` is given, the removed payload is also copied into it,
    /// truncated and zero-terminated (see [`Element::copy_to`]).
    pub fn remove_head(&mut self, buf: Option<&mut [u8]>) -> Option<Box<Element>> {
        let element = self.ring.pop_front()?;
        Self::extract(element, buf)
    }

    /// Detach the tail element and hand it to the caller, or return `None` if
    /// the queue is empty.
    ///
    /// If `buf` is given, the removed payload is also copied into it,
    /// truncated and zero-terminated (see [`Element::copy_to`]).
    pub fn remove_tail(&mut self, buf: Option<&mut [u8]>) -> Option<Box<Element>> {
        let element = self.ring.pop_back()?;
        Self::extract(element, buf)
    }

    /// The head element, if any.
    pub fn front(&self) -> Option<&Element> {
        self.ring.front()
    }

    /// The tail element, if any.
    pub fn back(&self) -> Option<&Element> {
        self.ring.back()
    }

    /// Provides a forward iterator over the elements.
    pub fn iter(&self) -> Iter<'_> {
        self.ring.iter()
    }

    /// Provides a forward iterator over the payloads.
    pub fn values(&self) -> Values<'_> {
        self.ring.values()
    }

    fn extract(element: Box<Element>, buf: Option<&mut [u8]>) -> Option<Box<Element>> {
        if let Some(buf) = buf {
            element.copy_to(buf);
        }
        log::trace!("removed {:?}", element.value());
        Some(element)
    }
}

impl Debug for Queue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Queue").field(&self.ring).finish()
    }
}

impl From<Ring> for Queue {
    fn from(ring: Ring) -> Self {
        Self { ring }
    }
}

impl<'a> IntoIterator for &'a Queue {
    type Item = &'a Element;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
