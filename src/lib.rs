//! This crate provides a double-ended string queue, backed by a
//! doubly-linked list with owned nodes that is implemented as a cyclic
//! list.
//!
//! The [`Queue`] stores owned, NUL-terminated C strings and supports
//! insertion and removal at both ends in constant time, together with a
//! family of in-place transforms: reversal (whole, pairwise, or in fixed
//! chunks), middle removal, duplicate-run removal, suffix-maxima
//! filtering, a stable merge sort, and a k-way merge of sorted queues.
//!
//! The generic [`List`] underneath allows inserting and removing elements
//! at any given position in constant time. In compromise, accessing or
//! mutating elements at any position take *O*(*n*) time.
//!
//! Here is a quick example showing how the queue works.
//!
//! ```
//! use cyclic_queue::Queue;
//!
//! let mut queue = Queue::new();
//! queue.push_back("gerbil");
//! queue.push_back("bear");
//! queue.push_front("meerkat");
//!
//! queue.sort();
//!
//! let mut buf = [0_u8; 16];
//! let value = queue.pop_front_into(&mut buf).unwrap();
//! assert_eq!(value.as_bytes(), b"bear");
//! assert_eq!(&buf[..5], b"bear\0");
//!
//! assert_eq!(queue.len(), 2);
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the list is like the following graph:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────────────┐
//!          ↓                                                     (Ghost) Node N  │
//!    ╔═══════════╗           ╔═══════════╗                        ┌───────────┐  │
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ │   next    │ ─┘
//!    ╟───────────╢           ╟───────────╢     Node 2, 3, ...     ├───────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── │   prev    │
//! │  ╟───────────╢           ╟───────────╢                        ├───────────┤
//! │  ║ payload T ║           ║ payload T ║                        ┊No payload ┊
//! │  ╚═══════════╝           ╚═══════════╝                        └╌╌╌╌╌╌╌╌╌╌╌┘
//! │      Node 0                  Node 1                               ↑
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each node of the list `List<T>` is allocated on heap, which contains:
//! - the `next` pointer that points to the next element (or the ghost node if it
//!   is the last element in the list);
//! - the `prev` pointer that points to the previous element (or the ghost node if
//!   it is the first element in the list);
//! - the actual payload `T` that depends on the element type of the list, except
//!   the ghost node.
//!
//! Note that the ghost node has *NO* payload to save memory, and the list
//! keeps *NO* length field. [`List::len`] (and [`Queue::len`]) count the
//! nodes by walking the list in *O*(*n*) time, which in turn allows nodes
//! to migrate between lists in *O*(1) without any bookkeeping. All the
//! transforms below rely on that.
//!
//! Initially, there is a ghost node in an empty list, of which the `next` and `prev`
//! pointer point to itself.
//!
//! As elements are inserted into the list, `ghost.next` points to the first element,
//! and `ghost.prev` points to the last element of the list.
//!
//! # Iteration
//!
//! Iterating over a list is by the [`Iter`] and [`IterMut`] iterators. These are
//! double-ended iterators and iterate the list like an array (fused and non-cyclic).
//! [`IterMut`] provides mutability of the elements (but not the linked structure of
//! the list).
//!
//! ## Examples
//!
//! ```
//! use cyclic_queue::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3]);
//! let mut iter = list.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), Some(&3));
//! assert_eq!(iter.next(), None);
//! assert_eq!(iter.next(), None); // Fused and non-cyclic
//!
//! list.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(Vec::from_iter(list), vec![2, 4, 6]);
//! ```
//!
//! # Cursor Views
//!
//! Beside iteration, the cursors [`Cursor`] and [`CursorMut`] provide more
//! flexible ways of viewing a list.
//!
//! As the names suggest, they are like cursors and can move forward or backward
//! over the list. In a list with length *n*, there are *n* + 1 valid locations
//! for the cursor: the *n* payload nodes plus the ghost node.
//!
//! [`CursorMut`] provides many useful ways to mutate the list in any position.
//! - [`insert`]: insert a new item at the cursor;
//! - [`remove`]: remove the item at the cursor;
//! - [`backspace`]: remove the item before the cursor;
//! - [`split`]: split the list into a new one, from the cursor position to the end;
//! - [`splice`]: splice another list before the cursor position;
//!
//! ## Examples
//!
//! ```
//! use cyclic_queue::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3, 4]);
//!
//! let mut cursor = list.cursor_start_mut();
//!
//! cursor.insert(5); // becomes [5, 1, 2, 3, 4], points to 1
//! assert_eq!(cursor.current(), Some(&1));
//!
//! assert!(cursor.seek_forward(2).is_ok());
//! assert_eq!(cursor.remove(), Some(3)); // becomes [5, 1, 2, 4], points to 4
//! assert_eq!(cursor.current(), Some(&4));
//!
//! assert_eq!(cursor.backspace(), Some(2)); // becomes [5, 1, 4], points to 4
//! assert_eq!(cursor.current(), Some(&4));
//!
//! assert_eq!(Vec::from_iter(list), vec![5, 1, 4]);
//! ```
//!
//! # Transforms
//!
//! Every transform relinks nodes in place; elements are never copied or
//! reallocated, and removed elements are handed back to the caller (or
//! dropped) exactly once.
//!
//! - [`List::reverse`], [`List::reverse_chunks`] and [`List::swap_pairs`]
//!   reorder the list;
//! - [`List::pop_middle`] removes the slow/fast midpoint;
//! - [`List::remove_duplicate_runs`] drops every run of adjacent equal
//!   elements entirely;
//! - [`List::retain_suffix_maxima`] keeps the elements with no greater
//!   element to their right;
//! - [`List::sort`] and [`List::sort_by`] are a stable, in-place merge
//!   sort, and [`List::merge_with`] the underlying two-way merge;
//! - [`merge_sorted_queues`] merges a whole chain of sorted queues,
//!   tournament style.
//!
//! [`List`]: crate::List
//! [`Iter`]: crate::Iter
//! [`IterMut`]: crate::IterMut
//! [`Cursor`]: crate::list::cursor::Cursor
//! [`CursorMut`]: crate::list::cursor::CursorMut
//! [`insert`]: crate::list::cursor::CursorMut::insert
//! [`remove`]: crate::list::cursor::CursorMut::remove
//! [`backspace`]: crate::list::cursor::CursorMut::backspace
//! [`split`]: crate::list::cursor::CursorMut::split
//! [`splice`]: crate::list::cursor::CursorMut::splice

#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::List;
#[doc(inline)]
pub use queue::{merge_sorted_queues, Queue};

pub mod list;
pub mod queue;

mod experiments;
