use crate::queue::Queue;
use crate::ring::Ring;

/// The direction in which a queue is sorted or merged.
///
/// Payloads are compared byte-wise (the order of `str`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

impl Order {
    /// `Order::Descending` if `descend` is set, `Order::Ascending` otherwise.
    pub fn from_descend(descend: bool) -> Self {
        if descend {
            Order::Descending
        } else {
            Order::Ascending
        }
    }

    /// Returns `true` if `a` may stay in front of `b`: `a <= b` when
    /// ascending, `a >= b` when descending.
    pub fn precedes(self, a: &str, b: &str) -> bool {
        match self {
            Order::Ascending => a <= b,
            Order::Descending => a >= b,
        }
    }
}

impl Queue {
    /// Sort the queue in ascending order, or descending if `descend` is set.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* * log(*n*)) time, and only
    /// *O*(log(*n*)) memory for the recursion.
    ///
    /// # Current Implementation
    ///
    /// A top-down merge sort on the ring itself. The first half is cut off at
    /// the fast/slow midpoint, both halves are sorted, then the nodes of the
    /// first half are relinked one by one into the second half.
    ///
    /// # Examples
    ///
    /// ```
    /// use ring_queue::Queue;
    ///
    /// let mut queue = Queue::from_values(["dog", "ant", "cat", "bee"]).unwrap();
    ///
    /// queue.sort(false);
    /// assert_eq!(queue.values().collect::<Vec<_>>(), ["ant", "bee", "cat", "dog"]);
    ///
    /// queue.sort(true);
    /// assert_eq!(queue.values().collect::<Vec<_>>(), ["dog", "cat", "bee", "ant"]);
    /// ```
    pub fn sort(&mut self, descend: bool) {
        let order = Order::from_descend(descend);
        merge_sort(&mut self.ring, order);
        log::debug!("sorted {} elements {:?}", self.ring.len(), order);
    }
}

fn merge_sort(ring: &mut Ring, order: Order) {
    if ring.is_trivial() {
        return;
    }
    let mut front = {
        let mut cursor = ring.cursor_start_mut();
        cursor.seek_middle();
        match cursor.split_before() {
            Some(front) => front,
            None => return,
        }
    };
    merge_sort(&mut front, order);
    merge_sort(ring, order);
    merge_into(front, ring, order);
}

/// Merge the sorted `front` into the sorted `back`, where every element of
/// `front` was originally in front of every element of `back`.
///
/// Elements of `front` are taken in their own order. For each one, a cursor
/// keeps scanning forward through `back` from where the previous one was
/// placed, until it finds an element the taken one precedes. When the cursor
/// reaches the end, the rest of `front` is spliced there in one piece.
fn merge_into(mut front: Ring, back: &mut Ring, order: Order) {
    let mut cursor = back.cursor_start_mut();
    while let Some(element) = front.pop_front() {
        while cursor
            .current()
            .map_or(false, |current| !order.precedes(element.value(), current.value()))
        {
            cursor.move_next_cyclic();
        }
        let at_end = cursor.current().is_none();
        cursor.insert(element);
        if at_end {
            cursor.splice(front);
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Order;
    use crate::queue::tests::{queue_of, values_of};
    use crate::queue::Queue;

    fn sorted(input: &[&str], descend: bool) -> Vec<String> {
        let mut queue = queue_of(input);
        queue.sort(descend);
        assert_eq!(queue.size(), input.len());
        values_of(&queue)
    }

    #[test]
    fn order_precedes() {
        assert!(Order::Ascending.precedes("a", "b"));
        assert!(Order::Ascending.precedes("a", "a"));
        assert!(!Order::Ascending.precedes("b", "a"));
        assert!(Order::Descending.precedes("b", "a"));
        assert!(Order::Descending.precedes("a", "a"));
        assert!(!Order::Descending.precedes("a", "b"));
        // byte-wise, not numeric or case-folded
        assert!(Order::Ascending.precedes("10", "9"));
        assert!(Order::Ascending.precedes("Z", "a"));
        assert_eq!(Order::from_descend(true), Order::Descending);
        assert_eq!(Order::from_descend(false), Order::Ascending);
    }

    #[test]
    fn sort_small() {
        assert_eq!(sorted(&[], false), Vec::<String>::new());
        assert_eq!(sorted(&["a"], true), ["a"]);
        assert_eq!(sorted(&["b", "a"], false), ["a", "b"]);
        assert_eq!(sorted(&["a", "b"], true), ["b", "a"]);
        assert_eq!(sorted(&["c", "a", "b"], false), ["a", "b", "c"]);
    }

    #[test]
    fn sort_larger() {
        let input = [
            "kiwi", "apple", "fig", "banana", "cherry", "apple", "date", "grape", "elder", "lime",
            "honeydew", "fig", "jackfruit",
        ];
        let mut expected: Vec<String> = input.iter().map(|s| s.to_string()).collect();
        expected.sort();
        assert_eq!(sorted(&input, false), expected);
        expected.reverse();
        assert_eq!(sorted(&input, true), expected);
    }

    #[test]
    fn sort_is_stable() {
        // Equal payloads are told apart by the address of their element.
        let mut queue = queue_of(&["b", "a", "b", "a", "b"]);
        let before: Vec<*const u8> = queue.values().map(|v| v.as_ptr()).collect();
        queue.sort(false);
        let after: Vec<*const u8> = queue.values().map(|v| v.as_ptr()).collect();
        assert_eq!(values_of(&queue), ["a", "a", "b", "b", "b"]);
        assert_eq!(after, [before[1], before[3], before[0], before[2], before[4]]);

        queue.sort(true);
        let again: Vec<*const u8> = queue.values().map(|v| v.as_ptr()).collect();
        assert_eq!(again, [before[0], before[2], before[4], before[1], before[3]]);
    }

    #[test]
    fn sort_keeps_elements() {
        let mut queue = Queue::new();
        for i in (0..100).rev() {
            queue.insert_tail(&format!("{:03}", i)).unwrap();
        }
        queue.sort(false);
        let expected: Vec<String> = (0..100).map(|i| format!("{:03}", i)).collect();
        assert_eq!(values_of(&queue), expected);
        assert_eq!(queue.size(), 100);
    }
}
