use crate::element::Element;
use crate::error::{QueueError, Result};
use crate::queue::{Order, Queue};

impl Queue {
    /// Delete the middle element, at index ⌊*n* / 2⌋ (0-based).
    ///
    /// The middle is found by a fast/slow traversal, see
    /// [`seek_middle`](crate::ring::cursor::CursorMut::seek_middle).
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Queue;
    ///
    /// let mut queue = Queue::from_values(["a", "b", "c", "d"]).unwrap();
    /// queue.delete_mid().unwrap();
    /// assert_eq!(queue.values().collect::<Vec<_>>(), ["a", "b", "d"]);
    /// ```
    pub fn delete_mid(&mut self) -> Result<()> {
        let mut cursor = self.ring.cursor_start_mut();
        cursor.seek_middle();
        let middle = cursor.remove().ok_or(QueueError::Empty)?;
        log::trace!("deleted middle {:?}", middle.value());
        Ok(())
    }

    /// Delete every element belonging to a run of two or more consecutive
    /// equal payloads, keeping the elements that are unique among their
    /// neighbours.
    ///
    /// Runs must be contiguous for duplicates to be caught, so this is
    /// usually called on a sorted queue.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Queue;
    ///
    /// let mut queue = Queue::from_values(["a", "a", "b", "c", "c", "c", "d"]).unwrap();
    /// queue.delete_dup().unwrap();
    /// assert_eq!(queue.values().collect::<Vec<_>>(), ["b", "d"]);
    /// ```
    pub fn delete_dup(&mut self) -> Result<()> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }
        let mut cursor = self.ring.cursor_start_mut();
        // The last deleted element is kept alive for one step, so that the
        // rest of its run can be compared against it.
        let mut deleted: Option<Box<Element>> = None;
        while let Some(current) = cursor.current() {
            let value = current.value();
            let in_run = deleted.as_ref().map_or(false, |d| d.value() == value)
                || cursor.peek_next().map_or(false, |next| next.value() == value);
            if in_run {
                deleted = cursor.remove();
            } else {
                deleted = None;
                cursor.move_next_cyclic();
            }
        }
        log::trace!("deleted duplicates, {} left", self.ring.len());
        Ok(())
    }

    /// Swap every two adjacent elements. An odd trailing element stays put.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Queue;
    ///
    /// let mut queue = Queue::from_values(["1", "2", "3", "4", "5"]).unwrap();
    /// queue.swap();
    /// assert_eq!(queue.values().collect::<Vec<_>>(), ["2", "1", "4", "3", "5"]);
    /// ```
    pub fn swap(&mut self) {
        self.reverse_k(2);
    }

    /// Reverse the order of the elements.
    pub fn reverse(&mut self) {
        self.ring.reverse();
    }

    /// Reverse the elements in consecutive groups of `k`, from the head.
    ///
    /// A trailing group shorter than `k` keeps its order. A `k` of 0 or 1
    /// changes nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Queue;
    ///
    /// let mut queue = Queue::from_values(["1", "2", "3", "4", "5", "6", "7", "8"]).unwrap();
    /// queue.reverse_k(3);
    /// assert_eq!(
    ///     queue.values().collect::<Vec<_>>(),
    ///     ["3", "2", "1", "6", "5", "4", "7", "8"]
    /// );
    /// ```
    pub fn reverse_k(&mut self, k: usize) {
        if k <= 1 {
            return;
        }
        let mut cursor = self.ring.cursor_start_mut();
        while let Some(mut group) = cursor.cut(k) {
            group.reverse();
            cursor.splice(group);
        }
    }

    /// Remove every element that has a strictly smaller element anywhere to
    /// its right, and return the number of elements left.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Queue;
    ///
    /// let mut queue = Queue::from_values(["1", "5", "2", "4", "3"]).unwrap();
    /// assert_eq!(queue.ascend(), 3);
    /// assert_eq!(queue.values().collect::<Vec<_>>(), ["1", "2", "3"]);
    /// ```
    pub fn ascend(&mut self) -> usize {
        self.keep_monotonic(Order::Ascending)
    }

    /// Remove every element that has a strictly greater element anywhere to
    /// its right, and return the number of elements left.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Queue;
    ///
    /// let mut queue = Queue::from_values(["5", "2", "9", "3", "8"]).unwrap();
    /// assert_eq!(queue.descend(), 2);
    /// assert_eq!(queue.values().collect::<Vec<_>>(), ["9", "8"]);
    /// ```
    pub fn descend(&mut self) -> usize {
        self.keep_monotonic(Order::Descending)
    }

    /// Walk the queue from the tail, keeping an element only if it precedes
    /// (in `order`) the last element kept. The last kept element is always
    /// the running extreme: the minimum seen so far when ascending, the
    /// maximum when descending.
    fn keep_monotonic(&mut self, order: Order) -> usize {
        if self.is_empty() {
            return 0;
        }
        self.ring.reverse();
        {
            let mut cursor = self.ring.cursor_start_mut();
            // The original tail is always kept.
            cursor.move_next_cyclic();
            while let Some(current) = cursor.current() {
                let keep = cursor
                    .previous()
                    .map_or(true, |extreme| order.precedes(current.value(), extreme.value()));
                if keep {
                    cursor.move_next_cyclic();
                } else {
                    cursor.remove();
                }
            }
        }
        self.ring.reverse();
        let len = self.ring.len();
        log::trace!("kept {} elements {:?}", len, order);
        len
    }
}

#[cfg(test)]
mod tests {
    use crate::error::QueueError;
    use crate::queue::tests::{queue_of, values_of};
    use crate::queue::Queue;

    #[test]
    fn delete_mid() {
        fn deleted(input: &[&str]) -> Vec<String> {
            let mut queue = queue_of(input);
            queue.delete_mid().unwrap();
            assert_eq!(queue.size(), input.len() - 1);
            values_of(&queue)
        }
        assert_eq!(deleted(&["0"]), Vec::<String>::new());
        assert_eq!(deleted(&["0", "1"]), ["0"]);
        assert_eq!(deleted(&["0", "1", "2"]), ["0", "2"]);
        assert_eq!(deleted(&["0", "1", "2", "3"]), ["0", "1", "3"]);
        assert_eq!(deleted(&["0", "1", "2", "3", "4", "5", "6"]), ["0", "1", "2", "4", "5", "6"]);

        assert_eq!(Queue::new().delete_mid(), Err(QueueError::Empty));
    }

    #[test]
    fn delete_dup() {
        fn deduped(input: &[&str]) -> Vec<String> {
            let mut queue = queue_of(input);
            queue.delete_dup().unwrap();
            values_of(&queue)
        }
        assert_eq!(deduped(&["a"]), ["a"]);
        assert_eq!(deduped(&["a", "a"]), Vec::<String>::new());
        assert_eq!(deduped(&["a", "b", "c"]), ["a", "b", "c"]);
        assert_eq!(deduped(&["a", "a", "b"]), ["b"]);
        assert_eq!(deduped(&["a", "b", "b"]), ["a"]);
        assert_eq!(deduped(&["a", "a", "a", "b", "c", "c", "d"]), ["b", "d"]);
        // Only adjacent runs are collapsed.
        assert_eq!(deduped(&["a", "b", "a"]), ["a", "b", "a"]);
        // Adjacent runs with different payloads are both removed.
        assert_eq!(deduped(&["a", "a", "b", "b"]), Vec::<String>::new());

        assert_eq!(Queue::new().delete_dup(), Err(QueueError::Empty));
    }

    #[test]
    fn delete_dup_is_idempotent() {
        let mut queue = queue_of(&["a", "b", "b", "c", "d", "d", "d", "e"]);
        queue.delete_dup().unwrap();
        let once = values_of(&queue);
        queue.delete_dup().unwrap();
        assert_eq!(values_of(&queue), once);
        assert_eq!(once, ["a", "c", "e"]);
    }

    #[test]
    fn swap() {
        fn swapped(input: &[&str]) -> Vec<String> {
            let mut queue = queue_of(input);
            queue.swap();
            values_of(&queue)
        }
        assert_eq!(swapped(&[]), Vec::<String>::new());
        assert_eq!(swapped(&["1"]), ["1"]);
        assert_eq!(swapped(&["1", "2"]), ["2", "1"]);
        assert_eq!(swapped(&["1", "2", "3"]), ["2", "1", "3"]);
        assert_eq!(swapped(&["1", "2", "3", "4"]), ["2", "1", "4", "3"]);
    }

    #[test]
    fn reverse() {
        let mut queue = queue_of(&["a", "b", "c", "d"]);
        queue.reverse();
        assert_eq!(values_of(&queue), ["d", "c", "b", "a"]);
        queue.reverse();
        assert_eq!(values_of(&queue), ["a", "b", "c", "d"]);

        let mut empty = Queue::new();
        empty.reverse();
        assert!(empty.is_empty());
    }

    #[test]
    fn reverse_k() {
        fn reversed(input: &[&str], k: usize) -> Vec<String> {
            let mut queue = queue_of(input);
            queue.reverse_k(k);
            assert_eq!(queue.size(), input.len());
            values_of(&queue)
        }
        let input = ["1", "2", "3", "4", "5"];
        assert_eq!(reversed(&input, 0), input);
        assert_eq!(reversed(&input, 1), input);
        assert_eq!(reversed(&input, 2), ["2", "1", "4", "3", "5"]);
        assert_eq!(reversed(&input, 3), ["3", "2", "1", "4", "5"]);
        assert_eq!(reversed(&input, 5), ["5", "4", "3", "2", "1"]);
        assert_eq!(reversed(&input, 6), input);
        assert_eq!(reversed(&[], 3), Vec::<String>::new());
    }

    #[test]
    fn ascend() {
        fn ascended(input: &[&str]) -> (usize, Vec<String>) {
            let mut queue = queue_of(input);
            let kept = queue.ascend();
            (kept, values_of(&queue))
        }
        assert_eq!(ascended(&[]), (0, vec![]));
        assert_eq!(ascended(&["7"]), (1, vec!["7".to_owned()]));
        assert_eq!(
            ascended(&["1", "5", "2", "4", "3"]),
            (3, vec!["1".to_owned(), "2".to_owned(), "3".to_owned()])
        );
        assert_eq!(
            ascended(&["b", "b", "a", "a"]),
            (2, vec!["a".to_owned(), "a".to_owned()])
        );
        assert_eq!(
            ascended(&["a", "b", "c"]),
            (3, vec!["a".to_owned(), "b".to_owned(), "c".to_owned()])
        );
    }

    #[test]
    fn descend() {
        fn descended(input: &[&str]) -> (usize, Vec<String>) {
            let mut queue = queue_of(input);
            let kept = queue.descend();
            (kept, values_of(&queue))
        }
        assert_eq!(descended(&[]), (0, vec![]));
        assert_eq!(
            descended(&["5", "3", "8", "2", "9"]),
            (1, vec!["9".to_owned()])
        );
        assert_eq!(
            descended(&["5", "2", "3", "3", "1"]),
            (4, vec!["5".to_owned(), "3".to_owned(), "3".to_owned(), "1".to_owned()])
        );
        assert_eq!(
            descended(&["c", "b", "a"]),
            (3, vec!["c".to_owned(), "b".to_owned(), "a".to_owned()])
        );
    }
}
