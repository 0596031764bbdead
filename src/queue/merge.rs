use crate::queue::{Order, Queue};
use std::mem;

/// A queue in a [`QueueChain`], together with its cached element count.
#[derive(Debug)]
pub struct QueueContext {
    id: usize,
    queue: Queue,
    size: usize,
}

impl QueueContext {
    fn new(id: usize, queue: Queue) -> Self {
        let size = queue.size();
        Self { id, queue, size }
    }

    /// The identifier given by the chain, unique within it.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// The queue, for editing. The cached size goes stale until
    /// [`refresh_size`](QueueContext::refresh_size) is called.
    pub fn queue_mut(&mut self) -> &mut Queue {
        &mut self.queue
    }

    /// The element count cached at the last refresh.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Recount the queue and return the new size.
    pub fn refresh_size(&mut self) -> usize {
        self.size = self.queue.size();
        self.size
    }

    pub fn into_queue(self) -> Queue {
        self.queue
    }
}

/// An ordered chain of queues, the input of a k-way merge.
///
/// # Examples
///
/// ```
/// use ring_queue::{Queue, QueueChain};
///
/// let mut chain = QueueChain::new();
/// chain.push(Queue::from_values(["1", "3"]).unwrap());
/// chain.push(Queue::from_values(["2", "4"]).unwrap());
///
/// assert_eq!(chain.merge(false), 4);
/// let first = chain.first().unwrap();
/// assert_eq!(first.queue().values().collect::<Vec<_>>(), ["1", "2", "3", "4"]);
/// assert!(chain.iter().skip(1).all(|context| context.queue().is_empty()));
/// ```
#[derive(Debug, Default)]
pub struct QueueChain {
    contexts: Vec<QueueContext>,
    next_id: usize,
}

impl QueueChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty queue to the chain and return its context.
    pub fn new_queue(&mut self) -> &mut QueueContext {
        let id = self.push(Queue::new());
        let index = self.contexts.len() - 1;
        debug_assert_eq!(self.contexts[index].id, id);
        &mut self.contexts[index]
    }

    /// Append `queue` to the chain and return its id.
    pub fn push(&mut self, queue: Queue) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.contexts.push(QueueContext::new(id, queue));
        log::trace!("queue #{} joined the chain", id);
        id
    }

    /// Take the queue with the given id out of the chain.
    pub fn remove(&mut self, id: usize) -> Option<Queue> {
        let index = self.contexts.iter().position(|context| context.id == id)?;
        log::trace!("queue #{} left the chain", id);
        Some(self.contexts.remove(index).into_queue())
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    pub fn first(&self) -> Option<&QueueContext> {
        self.contexts.first()
    }

    pub fn first_mut(&mut self) -> Option<&mut QueueContext> {
        self.contexts.first_mut()
    }

    pub fn get(&self, id: usize) -> Option<&QueueContext> {
        self.contexts.iter().find(|context| context.id == id)
    }

    pub fn get_mut(&mut self, id: usize) -> Option<&mut QueueContext> {
        self.contexts.iter_mut().find(|context| context.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QueueContext> {
        self.contexts.iter()
    }

    /// Recount every queue of the chain.
    pub fn refresh_sizes(&mut self) {
        self.contexts.iter_mut().for_each(|context| {
            context.refresh_size();
        });
    }

    /// The sum of the cached sizes.
    pub fn total_size(&self) -> usize {
        self.contexts.iter().map(QueueContext::size).sum()
    }

    /// Merge every queue of the chain, each already sorted in the given
    /// direction, into the first one, and return the number of elements it
    /// ends up with. Returns 0 for an empty chain.
    ///
    /// The other queues are left empty in the chain; their elements are
    /// relinked, not copied. The merge is stable: equal elements keep the
    /// order of their queues in the chain.
    ///
    /// # Complexity
    ///
    /// Each source queue is merged with one forward scan over the
    /// accumulated queue, so this computes in *O*(*k* * *n*) time for *k*
    /// queues and *n* elements in total.
    pub fn merge(&mut self, descend: bool) -> usize {
        let order = Order::from_descend(descend);
        let count = self.contexts.len();
        let (first, rest) = match self.contexts.split_first_mut() {
            Some(split) => split,
            None => return 0,
        };
        for source in rest.iter_mut() {
            merge_into(&mut first.queue, &mut source.queue, order);
            source.size = 0;
        }
        let total = first.refresh_size();
        log::debug!(
            "merged {} queues into queue #{}, {} elements {:?}",
            count,
            first.id,
            total,
            order
        );
        total
    }
}

impl<'a> IntoIterator for &'a QueueChain {
    type Item = &'a QueueContext;
    type IntoIter = std::slice::Iter<'a, QueueContext>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Move every element of the sorted `source` into the sorted `target`.
///
/// A fresh cursor walks `target` once for the whole source: each element
/// taken from `source` is placed after every element of `target` that
/// precedes it, scanning on from where the previous one was placed. Once the
/// cursor reaches the end, the rest of `source` is spliced there in one piece.
fn merge_into(target: &mut Queue, source: &mut Queue, order: Order) {
    let mut cursor = target.ring.cursor_start_mut();
    while let Some(element) = source.ring.pop_front() {
        while cursor
            .current()
            .map_or(false, |current| order.precedes(current.value(), element.value()))
        {
            cursor.move_next_cyclic();
        }
        cursor.insert(element);
        if cursor.current().is_none() {
            cursor.splice(mem::take(&mut source.ring));
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::QueueChain;
    use crate::queue::tests::{queue_of, values_of};
    use crate::queue::Queue;

    fn chain_of(queues: &[&[&str]]) -> QueueChain {
        let mut chain = QueueChain::new();
        for values in queues {
            chain.push(queue_of(values));
        }
        chain
    }

    fn first_values(chain: &QueueChain) -> Vec<String> {
        values_of(chain.first().unwrap().queue())
    }

    #[test]
    fn merge_two_ascending() {
        let mut chain = chain_of(&[&["1", "3"], &["2", "4"]]);
        assert_eq!(chain.merge(false), 4);
        assert_eq!(first_values(&chain), ["1", "2", "3", "4"]);
        assert!(chain.iter().skip(1).all(|c| c.queue().is_empty() && c.size() == 0));
        assert_eq!(chain.first().unwrap().size(), 4);
        assert_eq!(chain.total_size(), 4);
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn merge_many_descending() {
        let mut chain = chain_of(&[&["e", "c", "a"], &["f", "b"], &[], &["g", "d", "d"]]);
        assert_eq!(chain.merge(true), 8);
        assert_eq!(first_values(&chain), ["g", "f", "e", "d", "d", "c", "b", "a"]);
    }

    #[test]
    fn merge_into_empty_first() {
        let mut chain = chain_of(&[&[], &["a", "c"], &["b"]]);
        assert_eq!(chain.merge(false), 3);
        assert_eq!(first_values(&chain), ["a", "b", "c"]);
    }

    #[test]
    fn merge_is_stable() {
        let mut chain = chain_of(&[&["a", "b"], &["a", "b"]]);
        let first: Vec<*const u8> = chain.first().unwrap().queue().values().map(str::as_ptr).collect();
        let second: Vec<*const u8> = chain.iter().nth(1).unwrap().queue().values().map(str::as_ptr).collect();
        chain.merge(false);
        let merged: Vec<*const u8> = chain.first().unwrap().queue().values().map(str::as_ptr).collect();
        assert_eq!(merged, [first[0], second[0], first[1], second[1]]);
    }

    #[test]
    fn merge_empty_chain() {
        let mut chain = QueueChain::new();
        assert_eq!(chain.merge(false), 0);
        assert!(chain.is_empty());

        chain.push(Queue::new());
        assert_eq!(chain.merge(true), 0);

        let mut single = chain_of(&[&["x", "y"]]);
        assert_eq!(single.merge(false), 2);
    }

    #[test]
    fn chain_management() {
        let mut chain = QueueChain::new();
        let id = {
            let context = chain.new_queue();
            context.queue_mut().insert_tail("a").unwrap();
            assert_eq!(context.size(), 0);
            assert_eq!(context.refresh_size(), 1);
            context.id()
        };
        let other = chain.push(queue_of(&["b", "c"]));
        assert_ne!(id, other);
        assert_eq!(chain.get(other).unwrap().size(), 2);
        assert_eq!(chain.total_size(), 3);

        chain.get_mut(other).unwrap().queue_mut().insert_tail("d").unwrap();
        chain.refresh_sizes();
        assert_eq!(chain.total_size(), 4);

        let removed = chain.remove(id).unwrap();
        assert_eq!(values_of(&removed), ["a"]);
        assert!(chain.remove(id).is_none());
        assert!(chain.get(id).is_none());
        assert_eq!(chain.first().unwrap().id(), other);
        assert_eq!((&chain).into_iter().count(), 1);

        // ids are never reused
        let third = chain.push(Queue::new());
        assert!(third > other);
    }
}
