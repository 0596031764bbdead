use std::fmt::{self, Debug, Formatter};
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::element::Element;
use crate::ring::cursor::{Cursor, CursorMut};
use crate::ring::iterator::{Iter, Values};

pub mod cursor;
pub mod iterator;

/// The `Ring` is a cyclic doubly-linked list of [`Element`]s closed by a ghost
/// link. Every linking operation (insert, unlink, cut, splice, move) takes
/// constant time and never allocates; allocation only happens when an
/// [`Element`] is created.
///
/// The `Ring` contains:
/// - a pointer `ghost` to the ghost link, which has no payload;
/// - a length field `len` counting the elements. It can be disabled by
///   disabling the `length` feature in your `Cargo.toml`:
/// ```text
/// [dependencies]
/// ring_queue = { default-features = false }
/// ```
///
/// # Naming Conventions
///
/// - `front..=back`: a closed range of links, both inclusive;
/// - `at`: a link already in the ring, used as an anchor for insertion.
pub struct Ring {
    ghost: NonNull<Link>,
    #[cfg(feature = "length")]
    /// the number of elements in the ring
    pub(crate) len: usize,
    _marker: PhantomData<Box<Element>>,
}

/// The link record embedded in every node of a ring.
pub(crate) struct Link {
    pub(crate) next: NonNull<Link>,
    pub(crate) prev: NonNull<Link>,
}

impl Link {
    /// A link that points nowhere, for nodes not yet threaded into a ring.
    /// Reading through either pointer is invalid.
    pub(crate) fn dangling() -> Self {
        Link {
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
        }
    }
}

pub(crate) unsafe fn connect(mut prev: NonNull<Link>, mut next: NonNull<Link>) {
    prev.as_mut().next = next;
    next.as_mut().prev = prev;
}

// private methods
impl Ring {
    pub(crate) fn ghost_node(&self) -> NonNull<Link> {
        self.ghost
    }
    pub(crate) fn front_node(&self) -> NonNull<Link> {
        // SAFETY: `ghost.next` is always valid (either `ghost` itself, or the first element
        // in the ring).
        unsafe { self.ghost.as_ref().next }
    }
    pub(crate) fn back_node(&self) -> NonNull<Link> {
        // SAFETY: `ghost.prev` is always valid (either `ghost` itself, or the last element
        // in the ring).
        unsafe { self.ghost.as_ref().prev }
    }

    /// Returns `true` if the ring holds zero or one element.
    pub(crate) fn is_trivial(&self) -> bool {
        self.front_node() == self.back_node()
    }

    /// Thread `element` into the ring right before `at`, and return its link.
    ///
    /// It is unsafe because it does not check whether `at` belongs to the ring.
    pub(crate) unsafe fn insert_before(
        &mut self,
        at: NonNull<Link>,
        element: Box<Element>,
    ) -> NonNull<Link> {
        let node = element.into_link();
        self.attach(at.as_ref().prev, at, node);
        node
    }

    /// Thread `element` into the ring right after `at`, and return its link.
    ///
    /// It is unsafe because it does not check whether `at` belongs to the ring.
    pub(crate) unsafe fn insert_after(
        &mut self,
        at: NonNull<Link>,
        element: Box<Element>,
    ) -> NonNull<Link> {
        let node = element.into_link();
        self.attach(at, at.as_ref().next, node);
        node
    }

    /// Unlink a single element `node` from the ring and hand it back.
    ///
    /// It is unsafe because it does not check whether `node` belongs to the ring,
    /// or whether it is the ghost link. Either mistake leaves the ring ill-formed.
    pub(crate) unsafe fn unlink(&mut self, node: NonNull<Link>) -> Box<Element> {
        debug_assert!(node != self.ghost, "Cannot unlink the ghost link");
        #[cfg(feature = "length")]
        {
            self.len -= 1;
        }
        connect(node.as_ref().prev, node.as_ref().next);
        Element::from_link(node)
    }

    /// Move an element `node` of the ring to the front.
    ///
    /// It is unsafe because it does not check whether `node` belongs to the ring.
    pub(crate) unsafe fn move_to_front(&mut self, node: NonNull<Link>) {
        if node == self.front_node() {
            return;
        }
        connect(node.as_ref().prev, node.as_ref().next);
        let front = self.front_node();
        connect(self.ghost, node);
        connect(node, front);
    }

    /// Cut the range of elements `front..=back` out of the ring, and return it
    /// as a standalone ring.
    ///
    /// It is unsafe because it does not check whether `front..=back` is a valid
    /// range of the ring (`front` must **NOT** be at the right of `back`, and
    /// neither is the ghost link), or whether `len` is the length of the range.
    pub(crate) unsafe fn cut_segment(
        &mut self,
        front: NonNull<Link>,
        back: NonNull<Link>,
        #[cfg(feature = "length")] len: usize,
    ) -> Ring {
        #[cfg(feature = "length")]
        {
            debug_assert!(len > 0, "Cannot cut a segment of length 0");
            self.len -= len;
        }
        connect(front.as_ref().prev, back.as_ref().next);
        let mut dest = Ring::new();
        connect(dest.ghost, front);
        connect(back, dest.ghost);
        #[cfg(feature = "length")]
        {
            dest.len = len;
        }
        dest
    }

    /// Relink every element of `src` right after `at`, leaving `src` empty.
    ///
    /// It is unsafe because it does not check whether `at` belongs to the ring.
    pub(crate) unsafe fn splice_after(&mut self, at: NonNull<Link>, src: &mut Ring) {
        if src.is_empty() {
            return;
        }
        let (front, back) = (src.front_node(), src.back_node());
        connect(src.ghost, src.ghost);
        let next = at.as_ref().next;
        #[cfg(debug_assertions)]
        assert_adjacent(at, next);
        connect(at, front);
        connect(back, next);
        #[cfg(feature = "length")]
        {
            self.len += std::mem::replace(&mut src.len, 0);
        }
    }

    /// Attach a single detached node `node` between `prev` and `next`.
    ///
    /// It is unsafe because it does not check whether `prev` and `next` belong
    /// to the ring, or whether they are adjacent (only in `#[cfg(debug_assertions)]`).
    unsafe fn attach(&mut self, prev: NonNull<Link>, next: NonNull<Link>, node: NonNull<Link>) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, node);
        connect(node, next);
        #[cfg(feature = "length")]
        {
            self.len += 1;
        }
    }
}

impl Ring {
    /// Create an empty `Ring`, whose ghost link points to itself.
    ///
    /// # Examples
    /// ```
    /// use ring_queue::ring::Ring;
    /// let ring = Ring::new();
    /// assert!(ring.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        let ghost = NonNull::from(Box::leak(Box::new(Link::dangling())));
        // SAFETY: `ghost` is freshly allocated and owned by the new ring.
        unsafe { connect(ghost, ghost) };
        Self {
            ghost,
            #[cfg(feature = "length")]
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Returns `true` if the `Ring` holds no element.
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front_node() == self.ghost_node()
    }

    /// Returns the number of elements.
    ///
    /// This operation should compute in *O*(1) time with the `length`
    /// feature, and in *O*(*n*) time without it.
    #[cfg(feature = "length")]
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(not(feature = "length"))]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Drops every element of the `Ring`.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// The first element, or `None` if the ring is empty.
    pub fn front(&self) -> Option<&Element> {
        self.cursor_start().current()
    }

    /// The last element, or `None` if the ring is empty.
    pub fn back(&self) -> Option<&Element> {
        self.cursor_end().previous()
    }

    /// Threads `element` in front of the first element.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::{ring::Ring, Element};
    ///
    /// let mut ring = Ring::new();
    /// ring.push_front(Element::new("b").unwrap());
    /// ring.push_front(Element::new("a").unwrap());
    /// assert_eq!(ring.values().collect::<Vec<_>>(), ["a", "b"]);
    /// ```
    pub fn push_front(&mut self, element: Box<Element>) {
        // SAFETY: the ghost link always belongs to the ring.
        unsafe { self.insert_after(self.ghost, element) };
    }

    /// Threads `element` after the last element.
    pub fn push_back(&mut self, element: Box<Element>) {
        // SAFETY: the ghost link always belongs to the ring.
        unsafe { self.insert_before(self.ghost, element) };
    }

    /// Unlinks the first element and hands it back, or `None` if the ring
    /// is empty.
    pub fn pop_front(&mut self) -> Option<Box<Element>> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the ring is not empty, so its front link is an element.
        Some(unsafe { self.unlink(self.front_node()) })
    }

    /// Unlinks the last element and hands it back, or `None` if the ring
    /// is empty.
    pub fn pop_back(&mut self) -> Option<Box<Element>> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the ring is not empty, so its back link is an element.
        Some(unsafe { self.unlink(self.back_node()) })
    }

    /// Moves all elements of `other` to the end of the ring, leaving `other`
    /// empty.
    ///
    /// This operation should compute in *O*(1) time and *O*(1) memory.
    pub fn append(&mut self, other: &mut Ring) {
        // SAFETY: the back link (maybe the ghost) belongs to the ring.
        unsafe { self.splice_after(self.back_node(), other) }
    }

    /// Moves all elements of `other` to the begin of the ring, leaving `other`
    /// empty.
    ///
    /// This operation should compute in *O*(1) time and *O*(1) memory.
    pub fn prepend(&mut self, other: &mut Ring) {
        // SAFETY: the ghost link always belongs to the ring.
        unsafe { self.splice_after(self.ghost, other) }
    }

    /// Reverses the order of the elements in place.
    ///
    /// Each element, visited in forward order, is moved to the front.
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::{ring::Ring, Element};
    ///
    /// let mut ring = Ring::new();
    /// for value in ["a", "b", "c"] {
    ///     ring.push_back(Element::new(value).unwrap());
    /// }
    /// ring.reverse();
    /// assert_eq!(ring.values().collect::<Vec<_>>(), ["c", "b", "a"]);
    /// ```
    pub fn reverse(&mut self) {
        let mut node = self.front_node();
        while node != self.ghost {
            // SAFETY: `node` is an element of the ring; its successor is read
            // before it is moved.
            unsafe {
                let next = node.as_ref().next;
                self.move_to_front(node);
                node = next;
            }
        }
    }

    /// Provides a cursor at the first element (at the ghost link if the ring
    /// is empty).
    pub fn cursor_start(&self) -> Cursor<'_> {
        Cursor::new(
            self,
            self.front_node(),
            #[cfg(feature = "length")]
            0,
        )
    }

    /// Provides a cursor at the ghost link.
    pub fn cursor_end(&self) -> Cursor<'_> {
        Cursor::new(
            self,
            self.ghost_node(),
            #[cfg(feature = "length")]
            self.len,
        )
    }

    /// Provides a cursor with editing operations at the first element.
    pub fn cursor_start_mut(&mut self) -> CursorMut<'_> {
        let front = self.front_node();
        CursorMut::new(
            self,
            front,
            #[cfg(feature = "length")]
            0,
        )
    }

    /// Provides a cursor with editing operations at the ghost link.
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_> {
        let ghost = self.ghost_node();
        #[cfg(feature = "length")]
        let len = self.len;
        CursorMut::new(
            self,
            ghost,
            #[cfg(feature = "length")]
            len,
        )
    }

    /// Provides a forward iterator over the elements.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Provides a forward iterator over the payloads.
    #[inline]
    pub fn values(&self) -> Values<'_> {
        Values::new(self.iter())
    }
}

impl Debug for Ring {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.values()).finish()
    }
}

impl Default for Ring {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Ring {
    fn eq(&self, other: &Self) -> bool {
        self.values().eq(other.values())
    }
}

impl Eq for Ring {}

impl FromIterator<Box<Element>> for Ring {
    fn from_iter<I: IntoIterator<Item = Box<Element>>>(iter: I) -> Self {
        let mut ring = Ring::new();
        ring.extend(iter);
        ring
    }
}

impl Extend<Box<Element>> for Ring {
    fn extend<I: IntoIterator<Item = Box<Element>>>(&mut self, iter: I) {
        iter.into_iter().for_each(|element| self.push_back(element));
    }
}

#[cfg(debug_assertions)]
fn assert_adjacent(prev: NonNull<Link>, next: NonNull<Link>) {
    unsafe {
        assert_eq!(prev.as_ref().next, next);
        assert_eq!(next.as_ref().prev, prev);
    }
}

impl Drop for Ring {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: the ghost link was leaked from a box in `Ring::new`, and no
        // element refers to it any more.
        unsafe { drop(Box::from_raw(self.ghost.as_ptr())) };
    }
}

// SAFETY: a `Ring` exclusively owns its links and payloads; shared access only
// reads them.
unsafe impl Send for Ring {}

unsafe impl Sync for Ring {}
