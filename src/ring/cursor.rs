use crate::element::Element;
use crate::ring::{Link, Ring};
use std::fmt;
use std::fmt::Formatter;
use std::ptr::NonNull;

/// A cursor over a `Ring`.
///
/// A `Cursor` is like an iterator, except that it can freely seek back-and-forth.
///
/// In a ring with length *n*, there are *n* + 1 valid locations for the cursor,
/// indexed by 0, 1, ..., *n*, where *n* is the ghost link of the ring.
///
/// # Examples
///
/// ```
/// use ring_queue::Queue;
///
/// let queue = Queue::from_values(["A", "B", "C"]).unwrap();
///
/// // [|A B C #]
/// let mut cursor = queue.ring().cursor_start();
/// assert_eq!(cursor.current().map(|e| e.value()), Some("A"));
///
/// // [ A|B C #]
/// assert!(cursor.move_next().is_ok());
/// assert_eq!(cursor.current().map(|e| e.value()), Some("B"));
///
/// // [ A B C|#]
/// let mut cursor = queue.ring().cursor_end();
/// assert!(cursor.current().is_none());
/// assert!(cursor.move_next().is_err());
///
/// // [|A B C #]
/// cursor.move_next_cyclic();
/// assert_eq!(cursor.current().map(|e| e.value()), Some("A"));
/// ```
#[derive(Clone)]
pub struct Cursor<'a> {
    #[cfg(feature = "length")]
    index: usize,
    pub(crate) current: NonNull<Link>,
    pub(crate) ring: &'a Ring,
}

/// A cursor over a `Ring` with editing operations.
///
/// Every editing operation relinks nodes in *O*(1) time (or *O*(*n*) for
/// [`cut`](CursorMut::cut), which walks the run it cuts). No element is
/// allocated or copied.
pub struct CursorMut<'a> {
    #[cfg(feature = "length")]
    index: usize,
    pub(crate) current: NonNull<Link>,
    pub(crate) ring: &'a mut Ring,
}

macro_rules! impl_cursor {
    ($CURSOR:ident) => {
        // Private methods
        impl<'a> $CURSOR<'a> {
            pub(crate) fn is_ghost_node(&self) -> bool {
                self.current == self.ring.ghost_node()
            }
            pub(crate) fn is_front_node(&self) -> bool {
                self.prev_node() == self.ring.ghost_node()
            }
            pub(crate) fn next_node(&self) -> NonNull<Link> {
                // SAFETY: `current.next` is always valid since it is a cyclic list.
                unsafe { self.current.as_ref().next }
            }
            pub(crate) fn prev_node(&self) -> NonNull<Link> {
                // SAFETY: `current.prev` is always valid since it is a cyclic list.
                unsafe { self.current.as_ref().prev }
            }
        }

        impl<'a> $CURSOR<'a> {
            #[cfg(feature = "length")]
            /// Return the index of the cursor
            pub fn index(&self) -> usize {
                self.index
            }

            /// Returns `true` if the `Ring` is empty. See [`Ring::is_empty`].
            pub fn is_empty(&self) -> bool {
                self.ring.is_empty()
            }

            /// Move the cursor to the next position, where passing
            /// through the ghost link is allowed.
            pub fn move_next_cyclic(&mut self) {
                if self.is_empty() {
                    return;
                }
                #[cfg(feature = "length")]
                if self.is_ghost_node() {
                    self.index = 0;
                } else {
                    self.index += 1;
                }
                self.current = self.next_node();
            }

            /// Move the cursor to the previous position, where passing
            /// through the ghost link is allowed.
            pub fn move_prev_cyclic(&mut self) {
                if self.is_empty() {
                    return;
                }
                #[cfg(feature = "length")]
                if self.is_front_node() {
                    self.index = self.ring.len();
                } else {
                    self.index -= 1;
                }
                self.current = self.prev_node();
            }

            /// Move the cursor to the next position, or fail if the cursor is
            /// at the ghost link.
            pub fn move_next(&mut self) -> Result<(), &'static str> {
                if !self.is_empty() && !self.is_ghost_node() {
                    self.move_next_cyclic();
                    return Ok(());
                }
                Err("`move_next` across ghost boundary")
            }

            /// Move the cursor to the previous position, or fail if the cursor
            /// is at the first element.
            pub fn move_prev(&mut self) -> Result<(), &'static str> {
                if !self.is_empty() && !self.is_front_node() {
                    self.move_prev_cyclic();
                    return Ok(());
                }
                Err("`move_prev` across ghost boundary")
            }

            /// Move the cursor forward by `steps`, stopping at the ghost link.
            /// On failure, the number of steps actually taken is returned.
            pub fn seek_forward(&mut self, steps: usize) -> Result<(), usize> {
                (0..steps).try_for_each(|i| self.move_next().map_err(|_| i))
            }

            /// Move the cursor to the middle element of the ring, found by
            /// a fast/slow traversal from the first element.
            ///
            /// Both probes start at the first element. The fast one moves two
            /// steps for every step of the cursor, until it reaches the ghost
            /// link or the link right before it. The cursor then rests at
            /// index ⌊*n* / 2⌋ (the ghost link if the ring is empty).
            ///
            /// # Examples
            ///
            /// ```
            /// use ring_queue::Queue;
            ///
            /// let queue = Queue::from_values(["a", "b", "c", "d"]).unwrap();
            /// let mut cursor = queue.ring().cursor_end();
            /// cursor.seek_middle();
            /// assert_eq!(cursor.current().map(|e| e.value()), Some("c"));
            /// ```
            pub fn seek_middle(&mut self) {
                self.move_to_start();
                let ghost = self.ring.ghost_node();
                let mut fast = self.current;
                // SAFETY: `fast` only walks over links of the ring, and it
                // never moves past the ghost link.
                unsafe {
                    while fast != ghost && fast.as_ref().next != ghost {
                        fast = fast.as_ref().next.as_ref().next;
                        self.move_next_cyclic();
                    }
                }
            }

            #[inline]
            pub fn move_to_start(&mut self) {
                #[cfg(feature = "length")]
                {
                    self.index = 0;
                }
                self.current = self.ring.front_node();
            }

            #[inline]
            pub fn move_to_end(&mut self) {
                #[cfg(feature = "length")]
                {
                    self.index = self.ring.len();
                }
                self.current = self.ring.ghost_node();
            }
        }

        impl<'a> fmt::Debug for $CURSOR<'a> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                let mut f = f.debug_struct(stringify!($CURSOR));
                f.field("ring", &self.ring)
                    .field("current", &self.current().map(Element::value));
                #[cfg(feature = "length")]
                f.field("index", &self.index);
                f.finish()
            }
        }
    };
}

impl_cursor!(CursorMut);
impl_cursor!(Cursor);

impl<'a> Cursor<'a> {
    pub(crate) fn new(
        ring: &'a Ring,
        current: NonNull<Link>,
        #[cfg(feature = "length")] index: usize,
    ) -> Self {
        Self {
            #[cfg(feature = "length")]
            index,
            current,
            ring,
        }
    }

    /// The element at the cursor, or `None` at the ghost link.
    pub fn current(&self) -> Option<&'a Element> {
        if self.is_ghost_node() {
            return None;
        }
        // SAFETY: non-ghost links are embedded in elements owned by the ring,
        // which is borrowed for `'a`.
        unsafe { Some(self.current.cast::<Element>().as_ref()) }
    }

    /// The element before the cursor, or `None` at the first element.
    pub fn previous(&self) -> Option<&'a Element> {
        if self.is_front_node() {
            return None;
        }
        // SAFETY: the link before a non-front link is never the ghost link.
        unsafe { Some(self.prev_node().cast::<Element>().as_ref()) }
    }
}

impl<'a> CursorMut<'a> {
    pub(crate) fn new(
        ring: &'a mut Ring,
        current: NonNull<Link>,
        #[cfg(feature = "length")] index: usize,
    ) -> Self {
        Self {
            #[cfg(feature = "length")]
            index,
            current,
            ring,
        }
    }
}

// Methods that does not change the linking structure of the ring.
impl<'a> CursorMut<'a> {
    /// The element at the cursor, or `None` at the ghost link.
    pub fn current(&self) -> Option<&Element> {
        if self.is_ghost_node() {
            return None;
        }
        // SAFETY: non-ghost links are embedded in elements owned by the ring.
        unsafe { Some(self.current.cast::<Element>().as_ref()) }
    }

    /// The element before the cursor, or `None` at the first element.
    pub fn previous(&self) -> Option<&Element> {
        if self.is_front_node() {
            return None;
        }
        // SAFETY: the link before a non-front link is never the ghost link.
        unsafe { Some(self.prev_node().cast::<Element>().as_ref()) }
    }

    /// The element after the cursor, or `None` if the cursor is at the last
    /// element or at the ghost link.
    pub fn peek_next(&self) -> Option<&Element> {
        let next = self.next_node();
        if self.is_ghost_node() || next == self.ring.ghost_node() {
            return None;
        }
        // SAFETY: `next` is a non-ghost link of the ring.
        unsafe { Some(next.cast::<Element>().as_ref()) }
    }

    /// Re-borrow the mutable cursor as a short-lived immutable one.
    pub fn as_cursor(&self) -> Cursor<'_> {
        Cursor::new(
            self.ring,
            self.current,
            #[cfg(feature = "length")]
            self.index,
        )
    }

    /// Temporarily view the ring via an immutable reference.
    pub fn view(&self) -> &Ring {
        self.ring
    }
}

// Methods that might change the linking structure of the ring.
impl<'a> CursorMut<'a> {
    /// Thread `element` before the cursor position.
    ///
    /// After insertion, the cursor stays put but its `index` becomes
    /// `index + 1`.
    ///
    /// This operation should compute in *O*(1) time.
    pub fn insert(&mut self, element: Box<Element>) {
        // SAFETY: `self.current` is a valid link in the ring.
        unsafe { self.ring.insert_before(self.current, element) };
        #[cfg(feature = "length")]
        {
            self.index += 1;
        }
    }

    /// Thread `element` after the cursor position. At the ghost link, the
    /// element becomes the first one. The cursor does not move.
    ///
    /// This operation should compute in *O*(1) time.
    pub fn insert_after(&mut self, element: Box<Element>) {
        // SAFETY: `self.current` is a valid link in the ring.
        unsafe { self.ring.insert_after(self.current, element) };
        #[cfg(feature = "length")]
        if self.is_ghost_node() {
            self.index += 1;
        }
    }

    /// Unlink the element at the cursor and return it, or return `None`
    /// if the cursor is at the ghost link. After removal, the cursor
    /// is moved to the next link.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Queue;
    ///
    /// let mut queue = Queue::from_values(["a", "b", "c"]).unwrap();
    /// let mut cursor = queue.ring_mut().cursor_start_mut();
    /// cursor.move_next().unwrap();
    ///
    /// assert_eq!(cursor.remove().unwrap().value(), "b");
    /// assert_eq!(cursor.current().map(|e| e.value()), Some("c"));
    /// assert_eq!(queue.values().collect::<Vec<_>>(), ["a", "c"]);
    /// ```
    pub fn remove(&mut self) -> Option<Box<Element>> {
        if self.is_ghost_node() {
            return None;
        }
        let next = self.next_node();
        // SAFETY: `self.current` is a valid non-ghost link in the ring.
        let element = unsafe { self.ring.unlink(self.current) };
        self.current = next;
        Some(element)
    }

    /// Cut `n` elements, starting from the cursor (inclusive), into a new
    /// ring. The cursor moves to the link right after the cut run.
    ///
    /// If `n` is zero, or fewer than `n` elements remain before the ghost
    /// link, nothing is cut and `None` is returned.
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Queue;
    ///
    /// let mut queue = Queue::from_values(["a", "b", "c", "d"]).unwrap();
    /// let mut cursor = queue.ring_mut().cursor_start_mut();
    /// cursor.move_next().unwrap();
    ///
    /// let run = cursor.cut(2).unwrap();
    /// assert_eq!(run.values().collect::<Vec<_>>(), ["b", "c"]);
    /// assert_eq!(cursor.current().map(|e| e.value()), Some("d"));
    /// assert!(cursor.cut(2).is_none());
    /// ```
    pub fn cut(&mut self, n: usize) -> Option<Ring> {
        if n == 0 || self.is_ghost_node() {
            return None;
        }
        let ghost = self.ring.ghost_node();
        let front = self.current;
        let mut back = front;
        for _ in 1..n {
            // SAFETY: `back` is a non-ghost link of the ring.
            back = unsafe { back.as_ref().next };
            if back == ghost {
                return None;
            }
        }
        // SAFETY: `front..=back` is a run of `n` elements of the ring.
        unsafe {
            self.current = back.as_ref().next;
            Some(self.ring.cut_segment(
                front,
                back,
                #[cfg(feature = "length")]
                n,
            ))
        }
    }

    /// Split the ring into two before the cursor (exclusive). This will
    /// return a new ring consisting of everything before the cursor,
    /// with the original ring retaining everything after (inclusive).
    ///
    /// If the cursor is at the first element, `None` will be returned.
    ///
    /// This operation should compute in *O*(1) time.
    pub fn split_before(&mut self) -> Option<Ring> {
        if self.is_front_node() {
            return None;
        }
        // After splitting, the current link becomes the front, so its
        // index becomes 0.
        #[cfg(feature = "length")]
        let len = std::mem::replace(&mut self.index, 0);
        // SAFETY: since current is not the front, the range from the front link
        // to the link before the cursor is a valid range of elements.
        unsafe {
            Some(self.ring.cut_segment(
                self.ring.front_node(),
                self.prev_node(),
                #[cfg(feature = "length")]
                len,
            ))
        }
    }

    /// Splice another ring between the cursor and the link before it,
    /// leaving the cursor on the same link.
    ///
    /// This operation should compute in *O*(1) time.
    pub fn splice(&mut self, mut other: Ring) {
        #[cfg(feature = "length")]
        {
            self.index += other.len();
        }
        // SAFETY: `self.current.prev` is a valid link in the ring.
        unsafe { self.ring.splice_after(self.prev_node(), &mut other) };
    }
}

#[cfg(test)]
mod tests {
    use crate::element::Element;
    use crate::ring::tests::ring_of;

    fn current(cursor: &crate::ring::cursor::CursorMut<'_>) -> Option<String> {
        cursor.current().map(|e| e.value().to_owned())
    }

    #[test]
    fn cursor_moves() {
        let ring = ring_of(&["a", "b", "c"]);
        let mut cursor = ring.cursor_start();
        assert!(cursor.move_prev().is_err());
        assert_eq!(cursor.seek_forward(5), Err(3));
        assert!(cursor.current().is_none());
        #[cfg(feature = "length")]
        assert_eq!(cursor.index(), 3);
        assert_eq!(cursor.previous().map(Element::value), Some("c"));
        cursor.move_prev_cyclic();
        assert_eq!(cursor.current().map(Element::value), Some("c"));
        cursor.move_to_end();
        cursor.move_next_cyclic();
        assert_eq!(cursor.current().map(Element::value), Some("a"));
        #[cfg(feature = "length")]
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn cursor_seek_middle() {
        fn middle(values: &[&str]) -> Option<String> {
            let ring = ring_of(values);
            let mut cursor = ring.cursor_end();
            cursor.seek_middle();
            cursor.current().map(|e| e.value().to_owned())
        }
        assert_eq!(middle(&[]), None);
        assert_eq!(middle(&["0"]).as_deref(), Some("0"));
        assert_eq!(middle(&["0", "1"]).as_deref(), Some("1"));
        assert_eq!(middle(&["0", "1", "2"]).as_deref(), Some("1"));
        assert_eq!(middle(&["0", "1", "2", "3"]).as_deref(), Some("2"));
        assert_eq!(middle(&["0", "1", "2", "3", "4"]).as_deref(), Some("2"));
    }

    #[test]
    fn cursor_insert_and_remove() {
        let mut ring = ring_of(&["a", "c"]);
        let mut cursor = ring.cursor_start_mut();
        cursor.move_next().unwrap();
        cursor.insert(Element::new("b").unwrap());
        assert_eq!(current(&cursor).as_deref(), Some("c"));
        #[cfg(feature = "length")]
        assert_eq!(cursor.index(), 2);

        cursor.insert_after(Element::new("d").unwrap());
        assert_eq!(cursor.peek_next().map(Element::value), Some("d"));
        assert_eq!(cursor.previous().map(Element::value), Some("b"));

        assert_eq!(cursor.remove().unwrap().value(), "c");
        assert_eq!(current(&cursor).as_deref(), Some("d"));
        assert!(cursor.peek_next().is_none());
        cursor.move_to_end();
        assert!(cursor.remove().is_none());
        cursor.insert_after(Element::new("0").unwrap());
        assert_eq!(ring.values().collect::<Vec<_>>(), ["0", "a", "b", "d"]);
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn cursor_cut_and_splice() {
        let mut ring = ring_of(&["a", "b", "c", "d", "e"]);
        let mut cursor = ring.cursor_start_mut();
        assert!(cursor.cut(0).is_none());
        assert!(cursor.cut(6).is_none());
        assert_eq!(current(&cursor).as_deref(), Some("a"));

        let mut run = cursor.cut(3).unwrap();
        assert_eq!(current(&cursor).as_deref(), Some("d"));
        #[cfg(feature = "length")]
        assert_eq!(cursor.index(), 0);
        assert_eq!(run.len(), 3);
        assert_eq!(cursor.view().len(), 2);

        run.reverse();
        cursor.splice(run);
        assert_eq!(current(&cursor).as_deref(), Some("d"));
        #[cfg(feature = "length")]
        assert_eq!(cursor.index(), 3);
        assert!(cursor.cut(3).is_none());
        assert!(cursor.cut(2).is_some());
        assert!(cursor.current().is_none());
        assert_eq!(ring.values().collect::<Vec<_>>(), ["c", "b", "a"]);
    }

    #[test]
    fn cursor_split_before() {
        let mut ring = ring_of(&["a", "b", "c"]);
        let mut cursor = ring.cursor_start_mut();
        assert!(cursor.split_before().is_none());
        cursor.seek_middle();
        let front = cursor.split_before().unwrap();
        assert_eq!(front.values().collect::<Vec<_>>(), ["a"]);
        assert_eq!(front.len(), 1);
        assert_eq!(ring.values().collect::<Vec<_>>(), ["b", "c"]);
        assert_eq!(ring.len(), 2);
    }
}
