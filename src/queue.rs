//! A double-ended queue of C-style strings.
//!
//! [`Queue`] stores each string as an owned, NUL-terminated [`CString`]
//! in a node of a cyclic [`List`]. Both ends support *O*(1) insertion
//! and removal; the in-place transforms of the underlying list (reverse,
//! sort, merge and friends) are re-exposed on the queue.

use crate::List;
use std::ffi::{CStr, CString};
use std::fmt;
use std::fmt::Formatter;
use std::iter::FromIterator;

/// A double-ended string queue backed by a cyclic doubly-linked list.
///
/// Strings are compared byte-wise, as `strcmp` would, since the elements
/// are [`CString`]s.
///
/// # Examples
///
/// ```
/// use cyclic_queue::Queue;
///
/// let mut queue = Queue::new();
/// assert!(queue.push_back("hello"));
/// assert!(queue.push_back("world"));
/// assert!(queue.push_front("oh"));
///
/// assert_eq!(queue.len(), 3);
/// assert_eq!(queue.pop_front().unwrap().as_bytes(), b"oh");
/// assert_eq!(queue.pop_back().unwrap().as_bytes(), b"world");
/// ```
#[derive(Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Queue {
    elements: List<CString>,
}

impl Queue {
    /// Create an empty `Queue`.
    ///
    /// This operation should compute in *O*(1) time.
    pub fn new() -> Self {
        Self {
            elements: List::new(),
        }
    }

    /// Returns `true` if the queue holds no strings.
    ///
    /// This operation should compute in *O*(1) time.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns `true` if the queue holds exactly one string.
    ///
    /// This operation should compute in *O*(1) time.
    pub fn is_singular(&self) -> bool {
        self.elements.is_singular()
    }

    /// Return the number of strings in the queue.
    ///
    /// The length is not cached; this operation should compute in
    /// *O*(*n*) time.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Remove all strings from the queue.
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Copy `value` into a new node at the front of the queue.
    ///
    /// Returns `false`, leaving the queue unchanged, if `value` contains
    /// an interior NUL byte and therefore cannot be stored as a C string.
    ///
    /// This operation should compute in *O*(1) time (plus the copy of
    /// `value`).
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// assert!(queue.push_front("beta"));
    /// assert!(queue.push_front("alpha"));
    /// assert!(!queue.push_front("not a c string\0"));
    ///
    /// assert_eq!(queue.len(), 2);
    /// assert_eq!(queue.pop_front().unwrap().as_bytes(), b"alpha");
    /// ```
    pub fn push_front(&mut self, value: &str) -> bool {
        match CString::new(value) {
            Ok(value) => {
                self.elements.push_front(value);
                true
            }
            Err(_) => false,
        }
    }

    /// Copy `value` into a new node at the back of the queue.
    ///
    /// Returns `false`, leaving the queue unchanged, if `value` contains
    /// an interior NUL byte and therefore cannot be stored as a C string.
    ///
    /// This operation should compute in *O*(1) time (plus the copy of
    /// `value`).
    pub fn push_back(&mut self, value: &str) -> bool {
        match CString::new(value) {
            Ok(value) => {
                self.elements.push_back(value);
                true
            }
            Err(_) => false,
        }
    }

    /// Remove the front string and return it, or return `None` if the
    /// queue is empty.
    ///
    /// This operation should compute in *O*(1) time.
    pub fn pop_front(&mut self) -> Option<CString> {
        self.elements.pop_front()
    }

    /// Remove the back string and return it, or return `None` if the
    /// queue is empty.
    ///
    /// This operation should compute in *O*(1) time.
    pub fn pop_back(&mut self) -> Option<CString> {
        self.elements.pop_back()
    }

    /// Remove the front string, copying it NUL-terminated into `buf`
    /// before returning it.
    ///
    /// At most `buf.len() - 1` bytes of the string are copied and
    /// `buf[copied]` is set to NUL, so a too-small buffer receives a
    /// truncated but still terminated copy. An empty `buf` is left
    /// untouched. Returns `None`, leaving `buf` untouched, if the queue
    /// is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.push_back("hello");
    ///
    /// let mut buf = [0xff_u8; 4];
    /// let value = queue.pop_front_into(&mut buf).unwrap();
    /// assert_eq!(value.as_bytes(), b"hello");
    /// assert_eq!(&buf, b"hel\0");
    /// ```
    pub fn pop_front_into(&mut self, buf: &mut [u8]) -> Option<CString> {
        let value = self.elements.pop_front()?;
        copy_truncated(&value, buf);
        Some(value)
    }

    /// Remove the back string, copying it NUL-terminated into `buf`
    /// before returning it.
    ///
    /// Truncation works as in [`Queue::pop_front_into`]. Returns `None`,
    /// leaving `buf` untouched, if the queue is empty.
    pub fn pop_back_into(&mut self, buf: &mut [u8]) -> Option<CString> {
        let value = self.elements.pop_back()?;
        copy_truncated(&value, buf);
        Some(value)
    }

    /// Remove the middle string and return it, or return `None` if the
    /// queue is empty. See [`List::pop_middle`].
    pub fn pop_middle(&mut self) -> Option<CString> {
        self.elements.pop_middle()
    }

    /// Remove every string that belongs to a run of adjacent equal
    /// strings. See [`List::remove_duplicate_runs`].
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["a", "a", "b", "c", "c"]);
    /// queue.remove_duplicate_runs();
    /// assert_eq!(queue, Queue::from_iter(["b"]));
    /// ```
    pub fn remove_duplicate_runs(&mut self) {
        self.elements.remove_duplicate_runs();
    }

    /// Exchange the strings at positions (0, 1), (2, 3), and so on.
    /// See [`List::swap_pairs`].
    pub fn swap_pairs(&mut self) {
        self.elements.swap_pairs();
    }

    /// Reverse the order of the strings. See [`List::reverse`].
    pub fn reverse(&mut self) {
        self.elements.reverse();
    }

    /// Reverse each run of exactly `chunk` strings. See
    /// [`List::reverse_chunks`].
    pub fn reverse_chunks(&mut self, chunk: usize) {
        self.elements.reverse_chunks(chunk);
    }

    /// Keep only the strings with no byte-wise greater string to their
    /// right, and return the resulting length. See
    /// [`List::retain_suffix_maxima`].
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["banana", "apple", "cherry"]);
    /// assert_eq!(queue.retain_suffix_maxima(), 1);
    /// assert_eq!(queue, Queue::from_iter(["cherry"]));
    /// ```
    pub fn retain_suffix_maxima(&mut self) -> usize {
        self.elements.retain_suffix_maxima()
    }

    /// Sort the strings in ascending byte-wise order. See [`List::sort`].
    pub fn sort(&mut self) {
        self.elements.sort();
    }

    /// Merge the sorted `other` into the sorted `self`, leaving `other`
    /// empty. See [`List::merge_with`].
    pub fn merge_with(&mut self, other: &mut Self) {
        self.elements.merge_with(&mut other.elements);
    }

    /// Return an iterator over the strings, front to back.
    pub fn iter(&self) -> crate::Iter<'_, CString> {
        self.elements.iter()
    }
}

/// Merge every sorted queue on the chain into the first one and return
/// its resulting length.
///
/// Queues are merged pairwise, tournament style: each round halves the
/// number of queues on the chain by merging every second queue into its
/// left neighbour and unlinking the emptied node; an odd queue at the end
/// of a round simply survives into the next. After the final round the
/// chain holds a single queue with all strings in ascending order.
///
/// An empty chain yields 0.
///
/// # Complexity
///
/// For *k* queues of *n* total strings, this operation should compute in
/// *O*(*n* * log(*k*)) time.
///
/// # Examples
///
/// ```
/// use cyclic_queue::{merge_sorted_queues, List, Queue};
/// use std::iter::FromIterator;
///
/// let mut queues = List::from_iter([
///     Queue::from_iter(["1", "3", "5"]),
///     Queue::from_iter(["2", "4"]),
/// ]);
///
/// assert_eq!(merge_sorted_queues(&mut queues), 5);
/// assert_eq!(
///     queues.pop_front().unwrap(),
///     Queue::from_iter(["1", "2", "3", "4", "5"]),
/// );
/// assert!(queues.is_empty());
/// ```
pub fn merge_sorted_queues(queues: &mut List<Queue>) -> usize {
    let mut remaining = queues.len();
    while remaining > 1 {
        let mut cursor = queues.cursor_start_mut();
        for _ in 0..remaining / 2 {
            // `remaining` counts the queues still on the chain, so both
            // the move and the removal land on payload nodes.
            if cursor.move_next().is_err() {
                break;
            }
            let mut loser = match cursor.remove() {
                Some(queue) => queue,
                None => break,
            };
            if let Some(winner) = cursor.previous_mut() {
                winner.merge_with(&mut loser);
            }
        }
        remaining = (remaining + 1) / 2;
    }
    queues.front().map_or(0, Queue::len)
}

/// Copy `value` into `buf`, truncated to fit and always NUL-terminated.
/// An empty `buf` is left untouched.
fn copy_truncated(value: &CStr, buf: &mut [u8]) {
    if buf.is_empty() {
        return;
    }
    let bytes = value.to_bytes();
    let len = bytes.len().min(buf.len() - 1);
    buf[..len].copy_from_slice(&bytes[..len]);
    buf[len] = 0;
}

/// Collect `&str` values into a queue. Values with interior NUL bytes
/// are skipped, matching [`Queue::push_back`] refusing them.
impl<'a> FromIterator<&'a str> for Queue {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut queue = Queue::new();
        for value in iter {
            queue.push_back(value);
        }
        queue
    }
}

impl Clone for Queue {
    fn clone(&self) -> Self {
        Self {
            elements: self.elements.clone(),
        }
    }
}

impl fmt::Debug for Queue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.elements.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{merge_sorted_queues, Queue};
    use crate::List;
    use std::iter::FromIterator;

    fn contents(queue: &Queue) -> Vec<&str> {
        queue
            .iter()
            .map(|s| s.to_str().expect("queue strings are utf-8 here"))
            .collect()
    }

    #[test]
    fn queue_push_and_pop_both_ends() {
        let mut queue = Queue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.pop_front(), None);
        assert_eq!(queue.pop_back(), None);

        assert!(queue.push_back("b"));
        assert!(queue.push_back("c"));
        assert!(queue.push_front("a"));
        assert_eq!(queue.len(), 3);
        assert!(!queue.is_singular());

        assert_eq!(queue.pop_front().unwrap().as_bytes(), b"a");
        assert_eq!(queue.pop_back().unwrap().as_bytes(), b"c");
        assert!(queue.is_singular());
        assert_eq!(queue.pop_front().unwrap().as_bytes(), b"b");
        assert!(queue.is_empty());
    }

    #[test]
    fn queue_rejects_interior_nul() {
        let mut queue = Queue::new();
        assert!(!queue.push_back("bad\0value"));
        assert!(!queue.push_front("\0"));
        assert!(queue.is_empty());

        // The empty string is a valid C string.
        assert!(queue.push_back(""));
        assert_eq!(queue.pop_front().unwrap().as_bytes(), b"");
    }

    #[test]
    fn pop_into_copies_and_truncates() {
        let mut queue = Queue::from_iter(["hello", "world"]);

        let mut buf = [0xff_u8; 16];
        let value = queue.pop_front_into(&mut buf).unwrap();
        assert_eq!(value.as_bytes(), b"hello");
        assert_eq!(&buf[..6], b"hello\0");

        // A short buffer receives a truncated, terminated copy, while
        // the returned string is intact.
        let mut small = [0xff_u8; 4];
        let value = queue.pop_back_into(&mut small).unwrap();
        assert_eq!(value.as_bytes(), b"world");
        assert_eq!(&small, b"wor\0");

        // Empty queue leaves the buffer untouched.
        let mut buf = [0xff_u8; 4];
        assert!(queue.pop_front_into(&mut buf).is_none());
        assert_eq!(buf, [0xff_u8; 4]);

        // An empty buffer cannot hold even the terminator.
        queue.push_back("x");
        let mut empty: [u8; 0] = [];
        assert!(queue.pop_front_into(&mut empty).is_some());
    }

    #[test]
    fn queue_transforms_delegate_to_the_list() {
        let mut queue = Queue::from_iter(["a", "b", "c", "d", "e"]);
        assert_eq!(queue.pop_middle().unwrap().as_bytes(), b"c");
        assert_eq!(contents(&queue), ["a", "b", "d", "e"]);

        queue.swap_pairs();
        assert_eq!(contents(&queue), ["b", "a", "e", "d"]);

        queue.reverse();
        assert_eq!(contents(&queue), ["d", "e", "a", "b"]);

        queue.sort();
        assert_eq!(contents(&queue), ["a", "b", "d", "e"]);

        queue.reverse_chunks(2);
        assert_eq!(contents(&queue), ["b", "a", "e", "d"]);

        assert_eq!(queue.retain_suffix_maxima(), 2);
        assert_eq!(contents(&queue), ["e", "d"]);

        queue.clear();
        assert!(queue.is_empty());
    }

    #[test]
    fn duplicate_runs_compare_whole_strings() {
        let mut queue = Queue::from_iter(["aa", "aa", "ab", "b", "b", "c"]);
        queue.remove_duplicate_runs();
        assert_eq!(contents(&queue), ["ab", "c"]);
    }

    #[test]
    fn strings_order_byte_wise() {
        // "10" sorts before "9" byte-wise.
        let mut queue = Queue::from_iter(["9", "10", "1"]);
        queue.sort();
        assert_eq!(contents(&queue), ["1", "10", "9"]);

        let mut queue = Queue::from_iter(["9", "10", "8"]);
        assert_eq!(queue.retain_suffix_maxima(), 2);
        assert_eq!(contents(&queue), ["9", "8"]);
    }

    #[test]
    fn merge_two_sorted_queues() {
        let mut queues = List::from_iter([
            Queue::from_iter(["1", "3", "5"]),
            Queue::from_iter(["2", "4"]),
        ]);
        assert_eq!(merge_sorted_queues(&mut queues), 5);
        assert_eq!(queues.len(), 1);
        assert_eq!(
            contents(queues.front().unwrap()),
            ["1", "2", "3", "4", "5"]
        );
    }

    #[test]
    fn merge_many_sorted_queues() {
        // Five queues force an odd leftover in each tournament round.
        let mut queues = List::from_iter([
            Queue::from_iter(["a", "e", "i"]),
            Queue::from_iter(["b", "f"]),
            Queue::from_iter(["c", "g", "j", "k"]),
            Queue::new(),
            Queue::from_iter(["d", "h"]),
        ]);
        assert_eq!(merge_sorted_queues(&mut queues), 11);
        assert_eq!(queues.len(), 1);
        assert_eq!(
            contents(queues.front().unwrap()),
            ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k"]
        );
    }

    #[test]
    fn merge_degenerate_chains() {
        let mut empty = List::<Queue>::new();
        assert_eq!(merge_sorted_queues(&mut empty), 0);

        let mut single = List::from_iter([Queue::from_iter(["x", "y"])]);
        assert_eq!(merge_sorted_queues(&mut single), 2);
        assert_eq!(contents(single.front().unwrap()), ["x", "y"]);
    }
}
