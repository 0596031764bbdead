use crate::element::Element;
use crate::ring::{Link, Ring};
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// An iterator over the elements of a `Ring`.
///
/// It uses a pair of links `start..end` to represent a half-open subrange
/// of the ring, where `start` is inclusive and `end` is not.
///
/// Though the `Iter` does not hold a reference to the ring, it *borrows*
/// (immutably) from it, so a phantom marker of `&'a Ring` protects the ring
/// from being written.
///
/// ```compile_fail
/// use ring_queue::Queue;
///
/// let mut queue = Queue::from_values(["a", "b"]).unwrap();
/// let mut iter = queue.iter();
///
/// // Won't compile, because the queue is already borrowed immutably.
/// queue.insert_tail("c").unwrap();
/// println!("{:?}", iter.next());
/// ```
#[derive(Clone)]
pub struct Iter<'a> {
    start: NonNull<Link>,
    end: NonNull<Link>,
    #[cfg(feature = "length")]
    len: usize,
    _marker: PhantomData<&'a Ring>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(ring: &'a Ring) -> Self {
        Self {
            start: ring.front_node(),
            end: ring.ghost_node(),
            #[cfg(feature = "length")]
            len: ring.len(),
            _marker: PhantomData,
        }
    }
}

impl<'a> fmt::Debug for Iter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.clone().collect::<Vec<_>>()).finish()
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Element;

    /// Return `*start` and reset the iterating range to `(start.next)..end`,
    /// or return `None` if `start..end` is already empty.
    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start..end` is always a valid range of a ring, and it is
        // not empty here, so `start` is an element.
        let current = unsafe { self.start.cast::<Element>().as_ref() };
        self.start = current.link.next;
        #[cfg(feature = "length")]
        {
            self.len -= 1;
        }
        Some(current)
    }

    #[cfg(feature = "length")]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    /// Reset the iterating range to `start..(end.prev)` and return `*end`,
    /// or return `None` if `start..end` is already empty.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start..end` is always a valid range of a ring, and it is
        // not empty here, so `end.prev` is an element.
        self.end = unsafe { self.end.as_ref().prev };
        let current = unsafe { self.end.cast::<Element>().as_ref() };
        #[cfg(feature = "length")]
        {
            self.len -= 1;
        }
        Some(current)
    }
}

#[cfg(feature = "length")]
impl<'a> ExactSizeIterator for Iter<'a> {}

impl<'a> FusedIterator for Iter<'a> {}

/// An iterator over the payloads of a `Ring`.
#[derive(Clone, Debug)]
pub struct Values<'a> {
    iter: Iter<'a>,
}

impl<'a> Values<'a> {
    pub(crate) fn new(iter: Iter<'a>) -> Self {
        Self { iter }
    }
}

impl<'a> Iterator for Values<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(Element::value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a> DoubleEndedIterator for Values<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(Element::value)
    }
}

#[cfg(feature = "length")]
impl<'a> ExactSizeIterator for Values<'a> {}

impl<'a> FusedIterator for Values<'a> {}

/// An owning iterator that unlinks the elements of a `Ring` one by one.
pub struct IntoIter {
    ring: Ring,
}

impl fmt::Debug for IntoIter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("ring", &self.ring).finish()
    }
}

impl Iterator for IntoIter {
    type Item = Box<Element>;

    fn next(&mut self) -> Option<Self::Item> {
        self.ring.pop_front()
    }

    #[cfg(feature = "length")]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.ring.len;
        (len, Some(len))
    }
}

impl DoubleEndedIterator for IntoIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ring.pop_back()
    }
}

#[cfg(feature = "length")]
impl ExactSizeIterator for IntoIter {}

impl FusedIterator for IntoIter {}

impl IntoIterator for Ring {
    type Item = Box<Element>;
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { ring: self }
    }
}

impl<'a> IntoIterator for &'a Ring {
    type Item = &'a Element;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

unsafe impl Send for Iter<'_> {}

unsafe impl Sync for Iter<'_> {}

#[cfg(test)]
mod tests {
    use crate::element::Element;
    use crate::ring::tests::ring_of;

    #[test]
    fn test_iter() {
        fn test_case(input: &[&str], mid: usize) {
            let ring = ring_of(input);
            let len = input.len();

            let mut iter = ring.iter();
            for (i, expected) in input.iter().enumerate() {
                assert_eq!(iter.next().map(Element::value), Some(*expected));
                #[cfg(feature = "length")]
                assert_eq!(iter.len(), len - i - 1);
            }
            assert!(iter.next().is_none());
            assert!(iter.next_back().is_none());

            let mut values = ring.values();
            for expected in input.iter().take(mid) {
                assert_eq!(values.next(), Some(*expected));
            }
            for expected in input.iter().skip(mid).rev() {
                assert_eq!(values.next_back(), Some(*expected));
            }
            assert_eq!(values.next(), None);
            assert_eq!(values.next_back(), None);
            let _ = len;
        }
        let input = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
        test_case(&input, 10);
        test_case(&input, 8);
        test_case(&input, 5);
        test_case(&input, 0);
        test_case(&input[..2], 1);
        test_case(&input[..1], 1);
        test_case(&input[..1], 0);
        test_case(&[], 0);
    }

    #[test]
    fn test_into_iter() {
        let ring = ring_of(&["a", "b", "c"]);
        let mut iter = ring.into_iter();
        #[cfg(feature = "length")]
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next_back().map(Element::into_value).as_deref(), Some("c"));
        assert_eq!(iter.next().map(Element::into_value).as_deref(), Some("a"));
        assert_eq!(iter.next().map(Element::into_value).as_deref(), Some("b"));
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_ref_into_iter() {
        let ring = ring_of(&["x", "y"]);
        let mut seen = Vec::new();
        for element in &ring {
            seen.push(element.value());
        }
        assert_eq!(seen, ["x", "y"]);
    }
}
