//! This crate provides a queue of strings on top of a cyclic doubly-linked
//! list with owned nodes.
//!
//! The [`Queue`] inserts and removes at either end in constant time. Its
//! structural operations (delete the middle, drop duplicate runs, swap pairs,
//! reverse in groups, keep a monotonic subsequence, sort, merge) all relink the
//! existing nodes in place: no payload is ever copied once it is inserted.
//!
//! Here is a quick example showing how the queue works.
//!
//! ```
//! use ring_queue::Queue;
//!
//! let mut queue = Queue::from_values(["cat", "ant", "cat", "bee"]).unwrap();
//!
//! queue.sort(false);
//! assert_eq!(queue.values().collect::<Vec<_>>(), ["ant", "bee", "cat", "cat"]);
//!
//! queue.delete_dup().unwrap();
//! assert_eq!(queue.values().collect::<Vec<_>>(), ["ant", "bee"]);
//!
//! let mut buf = [0u8; 3];
//! let head = queue.remove_head(Some(&mut buf)).unwrap();
//! assert_eq!(head.value(), "ant");
//! assert_eq!(&buf, b"an\0");
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of a queue is like the following graph:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────────────┐
//!          ↓                                                      (Ghost) Link   │
//!    ╔═══════════╗           ╔═══════════╗                        ┌───────────┐  │
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ │   next    │ ─┘
//!    ╟───────────╢           ╟───────────╢   Element 2, 3, ...    ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── │   prev    │
//! │  ╟───────────╢           ╟───────────╢                        └───────────┘
//! │  ║  String   ║           ║  String   ║                            ↑   ↑
//! │  ╚═══════════╝           ╚═══════════╝                            │   │
//! │    Element 0               Element 1                              │   │
//! └───────────────────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                                           │
//! ║   ghost   ║ ──────────────────────────────────────────────────────────┘
//! ╟───────────╢
//! ║   (len)   ║
//! ╚═══════════╝
//!     Ring
//! ```
//! The [`Ring`] contains:
//! - a pointer `ghost` that points to the ghost link;
//! - a length field `len` counting the elements. It can be disabled by
//!   disabling the `length` feature in your `Cargo.toml`, in which case
//!   [`Queue::size`] walks the ring:
//! ```text
//! [dependencies]
//! ring_queue = { default-features = false }
//! ```
//!
//! Each [`Element`] is allocated on heap, and contains:
//! - the `next` pointer to the next element (or the ghost link if it is the last);
//! - the `prev` pointer to the previous element (or the ghost link if it is the
//!   first);
//! - the payload, an owned `String`.
//!
//! The ghost link has *NO* payload. In an empty ring, its `next` and `prev`
//! pointers point to itself.
//!
//! In a ring with length *n*, the elements are indexed by 0, 1, ..., *n* - 1,
//! and the ghost link is always indexed by *n*.
//!
//! # Cursors
//!
//! All algorithms are written against the [`Cursor`] and [`CursorMut`] views of
//! a ring. A cursor rests on an element or on the ghost link, and moves forward
//! or backward, cyclically or not. [`CursorMut`] edits the ring around it:
//! - [`insert`]: thread an element before the cursor;
//! - [`remove`]: unlink the element at the cursor;
//! - [`cut`]: cut a run of elements starting at the cursor into a new ring;
//! - [`split_before`]: split everything before the cursor into a new ring;
//! - [`splice`]: splice another ring before the cursor.
//!
//! ## Examples
//!
//! ```
//! use ring_queue::Queue;
//!
//! let mut queue = Queue::from_values(["1", "2", "3", "4", "5"]).unwrap();
//! let mut cursor = queue.ring_mut().cursor_start_mut();
//!
//! let mut run = cursor.cut(3).unwrap(); // [1, 2, 3] | [4, 5], points to 4
//! run.reverse();
//! cursor.splice(run); // [3, 2, 1, 4, 5], still points to 4
//! assert_eq!(cursor.current().map(|e| e.value()), Some("4"));
//!
//! assert_eq!(queue.values().collect::<Vec<_>>(), ["3", "2", "1", "4", "5"]);
//! ```
//!
//! # Merging Queues
//!
//! A [`QueueChain`] holds several queues in order. Once each of them is sorted,
//! [`QueueChain::merge`] relinks every element into the first queue.
//!
//! [`Ring`]: crate::ring::Ring
//! [`Cursor`]: crate::ring::cursor::Cursor
//! [`CursorMut`]: crate::ring::cursor::CursorMut
//! [`insert`]: crate::ring::cursor::CursorMut::insert
//! [`remove`]: crate::ring::cursor::CursorMut::remove
//! [`cut`]: crate::ring::cursor::CursorMut::cut
//! [`split_before`]: crate::ring::cursor::CursorMut::split_before
//! [`splice`]: crate::ring::cursor::CursorMut::splice

#[doc(inline)]
pub use element::Element;
#[doc(inline)]
pub use error::{QueueError, Result};
#[doc(inline)]
pub use queue::{Order, Queue, QueueChain, QueueContext};

pub mod ring;

mod element;
mod error;
mod queue;
