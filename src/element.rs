//! Value-bearing nodes of a ring.
//!
//! An [`Element`] is the unit of ownership in this crate: a heap node holding
//! one link record and one owned text payload. While it is threaded into a
//! [`Ring`](crate::ring::Ring) the ring owns it; once detached it is handed out
//! as a `Box<Element>` and the holder decides whether to keep or drop it.

use crate::error::{QueueError, Result};
use crate::ring::Link;
use std::alloc::{self, Layout};
use std::fmt;
use std::ptr::NonNull;

/// A node of the ring carrying a text payload.
///
/// `link` must stay the first field: a `NonNull<Link>` of a non-ghost node is
/// reinterpreted as a `NonNull<Element>`.
#[repr(C)]
pub struct Element {
    pub(crate) link: Link,
    value: String,
}

impl Element {
    /// Allocate a detached element holding a copy of `value`.
    ///
    /// Both the payload and the node are allocated fallibly. If either
    /// allocation fails, [`QueueError::OutOfMemory`] is returned and whatever
    /// was already allocated is released.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Element;
    ///
    /// let element = Element::new("gerbil").unwrap();
    /// assert_eq!(element.value(), "gerbil");
    /// ```
    pub fn new(value: &str) -> Result<Box<Element>> {
        let mut payload = String::new();
        if payload.try_reserve_exact(value.len()).is_err() {
            log::warn!("cannot allocate {} bytes of element payload", value.len());
            return Err(QueueError::OutOfMemory {
                requested: value.len(),
            });
        }
        payload.push_str(value);

        let layout = Layout::new::<Element>();
        // SAFETY: `Element` is not zero-sized.
        let node = match NonNull::new(unsafe { alloc::alloc(layout) }.cast::<Element>()) {
            Some(node) => node,
            None => {
                log::warn!("cannot allocate {} bytes of element node", layout.size());
                return Err(QueueError::OutOfMemory {
                    requested: layout.size(),
                });
            }
        };
        // SAFETY: `node` is freshly allocated by the global allocator with the
        // layout of `Element`, so it may be initialized and owned by a `Box`.
        unsafe {
            node.as_ptr().write(Element {
                link: Link::dangling(),
                value: payload,
            });
            Ok(Box::from_raw(node.as_ptr()))
        }
    }

    /// Release an element, if there is one.
    ///
    /// Dropping the box does the same; this spells out that an absent element
    /// is accepted.
    pub fn destroy(element: Option<Box<Element>>) {
        drop(element);
    }

    /// The text payload.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Consume a detached element and keep only its payload.
    pub fn into_value(self: Box<Self>) -> String {
        self.value
    }

    /// Copy the payload into `buf` as a zero-terminated byte string.
    ///
    /// At most `buf.len() - 1` bytes of the payload are copied, the rest of the
    /// buffer is zero-filled, and the last byte is always `0`. An empty buffer
    /// is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Element;
    ///
    /// let element = Element::new("dolphin").unwrap();
    /// let mut buf = [0xffu8; 5];
    /// element.copy_to(&mut buf);
    /// assert_eq!(&buf, b"dolp\0");
    /// ```
    pub fn copy_to(&self, buf: &mut [u8]) {
        let cap = match buf.len().checked_sub(1) {
            Some(cap) => cap,
            None => return,
        };
        let bytes = self.value.as_bytes();
        let copied = bytes.len().min(cap);
        buf[..copied].copy_from_slice(&bytes[..copied]);
        buf[copied..].iter_mut().for_each(|b| *b = 0);
    }

    pub(crate) fn into_link(self: Box<Self>) -> NonNull<Link> {
        NonNull::from(Box::leak(self)).cast()
    }

    /// Take back ownership of the element threaded by `link`.
    ///
    /// It is unsafe because `link` must be a non-ghost link produced by
    /// [`Element::into_link`] that nothing else owns any more.
    pub(crate) unsafe fn from_link(link: NonNull<Link>) -> Box<Self> {
        Box::from_raw(link.cast::<Element>().as_ptr())
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Element").field(&self.value).finish()
    }
}
