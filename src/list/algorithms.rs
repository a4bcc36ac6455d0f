use crate::list::{connect, List, Node};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ptr::NonNull;

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: PartialOrd> PartialOrd for List<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for List<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for elt in self {
            elt.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

impl<T> List<T> {
    /// Reverse the traversal order of the list in place.
    ///
    /// Every node is relinked; no element is moved or copied. A no-op on
    /// an empty list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// list.reverse();
    /// assert_eq!(list, List::from_iter([3, 2, 1]));
    /// ```
    pub fn reverse(&mut self) {
        let ghost = self.ghost_node();
        // Walk the nodes in their original order and move each one to
        // the front; the earliest node ends up at the back.
        unsafe {
            let mut node = self.front_node();
            while node != ghost {
                let next = node.as_ref().next;
                move_node_after(node, ghost);
                node = next;
            }
        }
    }

    /// Reverse each contiguous run of exactly `chunk` nodes, in list
    /// order. A trailing run shorter than `chunk` is left untouched, and
    /// `chunk <= 1` is a no-op.
    ///
    /// Each full run is cut out of the list, reversed, and spliced back
    /// at the same position.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3, 4, 5]);
    /// list.reverse_chunks(2);
    /// assert_eq!(list, List::from_iter([2, 1, 4, 3, 5]));
    /// ```
    pub fn reverse_chunks(&mut self, chunk: usize) {
        if chunk <= 1 {
            return;
        }
        let ghost = self.ghost_node();
        unsafe {
            // `anchor` is the node right before the run being reversed.
            let mut anchor = ghost;
            loop {
                let front = anchor.as_ref().next;
                let mut back = anchor;
                for _ in 0..chunk {
                    back = back.as_ref().next;
                    if back == ghost {
                        // The remaining run is shorter than `chunk`.
                        return;
                    }
                }
                let next = back.as_ref().next;
                // `front..=back` is a valid range of `chunk` nodes, and
                // after detaching, `anchor` and `next` are adjacent.
                let mut run = List::from_detached(self.detach_nodes(front, back));
                run.reverse();
                if let Some(detached) = run.into_detached() {
                    self.attach_nodes(anchor, next, detached);
                }
                // The original run front is now the run back.
                anchor = front;
            }
        }
    }

    /// Exchange the nodes at positions (0, 1), (2, 3), and so on. An odd
    /// trailing node stays in place.
    ///
    /// The exchange relinks the nodes themselves; elements are never
    /// copied or moved out of their nodes.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3, 4, 5]);
    /// list.swap_pairs();
    /// assert_eq!(list, List::from_iter([2, 1, 4, 3, 5]));
    /// ```
    pub fn swap_pairs(&mut self) {
        let ghost = self.ghost_node();
        unsafe {
            let mut node = self.front_node();
            while node != ghost && node.as_ref().next != ghost {
                // Relink the pair's first node after its second.
                move_node_after(node, node.as_ref().next);
                node = node.as_ref().next;
            }
        }
    }

    /// Remove the middle node and return its element, or return `None` if
    /// the list is empty.
    ///
    /// The middle is found with a slow/fast two-pointer walk: both start
    /// at the first node, the slow pointer advances one step and the fast
    /// pointer two steps per iteration, until the fast pointer reaches the
    /// ghost node or the node before it. For a list of length *n* this
    /// selects the node at index *n* / 2 (rounding down).
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(["a", "b", "c", "d", "e"]);
    /// assert_eq!(list.pop_middle(), Some("c"));
    /// assert_eq!(list, List::from_iter(["a", "b", "d", "e"]));
    ///
    /// assert_eq!(List::<i32>::new().pop_middle(), None);
    /// ```
    pub fn pop_middle(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let ghost = self.ghost_node();
        unsafe {
            let (mut slow, mut fast) = (self.front_node(), self.front_node());
            while fast != ghost && fast.as_ref().next != ghost {
                slow = slow.as_ref().next;
                fast = fast.as_ref().next.as_ref().next;
            }
            Some(Node::into_element(self.detach_node(slow)))
        }
    }

    /// Remove every element that belongs to a run of two or more adjacent
    /// equal elements, keeping none of the run.
    ///
    /// The comparison is between adjacent nodes only. The caller must
    /// ensure that equal-valued elements are contiguous (e.g. the list is
    /// sorted, or was built grouped); on a non-grouped list only adjacent
    /// duplicates are detected.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 1, 2, 3, 3]);
    /// list.remove_duplicate_runs();
    /// assert_eq!(list, List::from_iter([2]));
    /// ```
    pub fn remove_duplicate_runs(&mut self)
    where
        T: PartialEq,
    {
        let ghost = self.ghost_node();
        unsafe {
            let mut node = self.front_node();
            let mut in_run = false;
            while node != ghost {
                let next = node.as_ref().next;
                if next != ghost && node.as_ref().element == next.as_ref().element {
                    in_run = true;
                    drop(self.detach_node(node));
                } else if in_run {
                    // The last node of a duplicate run.
                    in_run = false;
                    drop(self.detach_node(node));
                }
                node = next;
            }
        }
    }

    /// Keep only the elements that have no strictly greater element
    /// anywhere to their right, and return the resulting length.
    ///
    /// Scanning from the back, a running maximum over the retained nodes
    /// is kept; every node strictly less than it is removed. The retained
    /// sequence reads non-increasing from left to right.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([5, 2, 13, 3, 8]);
    /// assert_eq!(list.retain_suffix_maxima(), 2);
    /// assert_eq!(list, List::from_iter([13, 8]));
    /// ```
    pub fn retain_suffix_maxima(&mut self) -> usize
    where
        T: Ord,
    {
        if self.is_empty() {
            return 0;
        }
        let ghost = self.ghost_node();
        unsafe {
            // The back node is always retained.
            let mut best = self.back_node();
            let mut node = best.as_ref().prev;
            while node != ghost {
                let prev = node.as_ref().prev;
                if node.as_ref().element < best.as_ref().element {
                    drop(self.detach_node(node));
                } else {
                    best = node;
                }
                node = prev;
            }
        }
        self.len()
    }

    /// Merge the ascending-sorted `other` into the ascending-sorted
    /// `self`, leaving `other` empty.
    ///
    /// The merge is stable: for equal elements, the node already in
    /// `self` comes first. Nodes are relinked between the lists; no
    /// element is copied or reallocated.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* + *m*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 3, 5]);
    /// let mut other = List::from_iter([2, 4]);
    /// list.merge_with(&mut other);
    ///
    /// assert_eq!(list, List::from_iter(1..=5));
    /// assert!(other.is_empty());
    /// ```
    pub fn merge_with(&mut self, other: &mut Self)
    where
        T: Ord,
    {
        merge_by(self, other, &mut |a, b| a.lt(b));
    }

    /// Sort the list in ascending order.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* * log(*n*)) time, with
    /// *O*(log(*n*)) recursion and no per-element allocation.
    ///
    /// # Current Implementation
    ///
    /// Top-down merge sort: the list is split at the slow/fast midpoint
    /// into two lists, both halves are sorted recursively, and the halves
    /// are merged with a stable two-way merge.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([5, 2, 4, 3, 1]);
    /// list.sort();
    /// assert_eq!(list, List::from_iter(1..=5));
    /// ```
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        merge_sort(self, &mut |a, b| a.lt(b));
    }

    /// Sort the list with a comparator function.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// The comparator function must define a total ordering for the
    /// elements in the list. If the ordering is not total, the order of
    /// the elements is unspecified.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* * log(*n*)) time, with
    /// *O*(log(*n*)) recursion and no per-element allocation.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([5, 4, 1, 3, 2]);
    /// list.sort_by(|a, b| b.cmp(a));
    /// assert_eq!(list, List::from_iter([5, 4, 3, 2, 1]));
    /// ```
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        merge_sort(self, &mut |a, b| compare(a, b) == Ordering::Less);
    }
}

fn merge_sort<T, F>(list: &mut List<T>, less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    if list.is_empty() || list.is_singular() {
        return;
    }
    let mut right = split_at_middle(list);
    merge_sort(list, less);
    merge_sort(&mut right, less);
    merge_by(list, &mut right, less);
}

/// Split off everything after the slow/fast midpoint into a new list.
///
/// The cut point is the same as in [`List::pop_middle`]: the returned
/// list starts at index `len / 2` (rounding up the left half). The list
/// must hold at least two elements.
fn split_at_middle<T>(list: &mut List<T>) -> List<T> {
    let ghost = list.ghost_node();
    unsafe {
        let (mut slow, mut fast) = (ghost, ghost);
        loop {
            fast = fast.as_ref().next.as_ref().next;
            slow = slow.as_ref().next;
            if fast == ghost || fast.as_ref().next == ghost {
                break;
            }
        }
        // `slow.next` is a payload node because the list holds at least
        // two elements.
        let front = slow.as_ref().next;
        let back = list.back_node();
        List::from_detached(list.detach_nodes(front, back))
    }
}

/// Stable two-way merge: drain `other` into `list`, both ascending by
/// `less`, ties keeping the node of `list` first.
fn merge_by<T, F>(list: &mut List<T>, other: &mut List<T>, less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let ghost = list.ghost_node();
    unsafe {
        let mut node = list.front_node();
        while node != ghost && !other.is_empty() {
            let candidate = other.front_node();
            if less(&candidate.as_ref().element, &node.as_ref().element) {
                // Unlink the candidate from `other` and relink it right
                // before `node`.
                connect(candidate.as_ref().prev, candidate.as_ref().next);
                connect(node.as_ref().prev, candidate);
                connect(candidate, node);
            } else {
                node = node.as_ref().next;
            }
        }
    }
    // Whatever remains in `other` is not less than the back of `list`.
    list.append(other);
}

/// Unlink `node` from its neighbours and relink it right after `anchor`.
///
/// It is unsafe because both pointers must be valid nodes of the same
/// cyclic list and `anchor` must be a different node than `node`.
unsafe fn move_node_after<T>(node: NonNull<Node<T>>, anchor: NonNull<Node<T>>) {
    connect(node.as_ref().prev, node.as_ref().next);
    // `anchor.next` is re-read after unlinking, so moving a node right
    // after its own predecessor stays well-formed.
    let next = anchor.as_ref().next;
    connect(anchor, node);
    connect(node, next);
}

#[cfg(test)]
mod tests {
    use crate::List;
    use std::cell::Cell;
    use std::iter::FromIterator;

    #[test]
    fn reverse_round_trip() {
        let mut list = List::from_iter(0..7);
        list.reverse();
        assert_eq!(list, List::from_iter((0..7).rev()));
        list.reverse();
        assert_eq!(list, List::from_iter(0..7));

        let mut empty = List::<i32>::new();
        empty.reverse();
        assert!(empty.is_empty());

        let mut single = List::from_iter([1]);
        single.reverse();
        assert_eq!(single, List::from_iter([1]));
    }

    #[test]
    fn reverse_chunks_of_two() {
        let mut list = List::from_iter([1, 2, 3, 4, 5]);
        list.reverse_chunks(2);
        assert_eq!(list, List::from_iter([2, 1, 4, 3, 5]));
    }

    #[test]
    fn reverse_chunks_of_three() {
        let mut list = List::from_iter([1, 2, 3, 4, 5, 6, 7]);
        list.reverse_chunks(3);
        assert_eq!(list, List::from_iter([3, 2, 1, 6, 5, 4, 7]));
    }

    #[test]
    fn reverse_chunks_boundaries() {
        // chunk == 1 leaves the list unchanged.
        let mut list = List::from_iter(0..5);
        list.reverse_chunks(1);
        assert_eq!(list, List::from_iter(0..5));

        // chunk == len reverses the whole list.
        list.reverse_chunks(5);
        assert_eq!(list, List::from_iter((0..5).rev()));

        // chunk > len is a no-op.
        list.reverse_chunks(6);
        assert_eq!(list, List::from_iter((0..5).rev()));

        let mut empty = List::<i32>::new();
        empty.reverse_chunks(3);
        assert!(empty.is_empty());
    }

    #[test]
    fn swap_pairs_odd_and_even() {
        let mut list = List::from_iter([1, 2, 3, 4, 5]);
        list.swap_pairs();
        assert_eq!(list, List::from_iter([2, 1, 4, 3, 5]));

        let mut list = List::from_iter([1, 2, 3, 4]);
        list.swap_pairs();
        assert_eq!(list, List::from_iter([2, 1, 4, 3]));

        let mut single = List::from_iter([1]);
        single.swap_pairs();
        assert_eq!(single, List::from_iter([1]));

        let mut empty = List::<i32>::new();
        empty.swap_pairs();
        assert!(empty.is_empty());
    }

    #[test]
    fn pop_middle_selects_floor_of_half() {
        let mut list = List::from_iter(["a", "b", "c", "d", "e"]);
        assert_eq!(list.pop_middle(), Some("c"));
        assert_eq!(list, List::from_iter(["a", "b", "d", "e"]));

        // Even length: index len / 2.
        assert_eq!(list.pop_middle(), Some("d"));
        assert_eq!(list, List::from_iter(["a", "b", "e"]));

        assert_eq!(list.pop_middle(), Some("b"));
        assert_eq!(list.pop_middle(), Some("e"));
        assert_eq!(list.pop_middle(), Some("a"));
        assert_eq!(list.pop_middle(), None);
    }

    #[test]
    fn remove_duplicate_runs_keeps_unique_only() {
        let mut list = List::from_iter([1, 1, 2, 3, 3]);
        list.remove_duplicate_runs();
        assert_eq!(list, List::from_iter([2]));

        let mut list = List::from_iter([1, 1, 1, 1]);
        list.remove_duplicate_runs();
        assert!(list.is_empty());

        let mut list = List::from_iter([1, 2, 3]);
        list.remove_duplicate_runs();
        assert_eq!(list, List::from_iter([1, 2, 3]));

        let mut empty = List::<i32>::new();
        empty.remove_duplicate_runs();
        assert!(empty.is_empty());
    }

    #[test]
    fn retain_suffix_maxima_filters_lesser_nodes() {
        let mut list = List::from_iter([5, 2, 13, 3, 8]);
        assert_eq!(list.retain_suffix_maxima(), 2);
        assert_eq!(list, List::from_iter([13, 8]));

        // Already non-increasing: nothing to remove, equals retained.
        let mut list = List::from_iter([5, 5, 3, 1]);
        assert_eq!(list.retain_suffix_maxima(), 4);
        assert_eq!(list, List::from_iter([5, 5, 3, 1]));

        // Strictly ascending: only the back survives.
        let mut list = List::from_iter(1..=5);
        assert_eq!(list.retain_suffix_maxima(), 1);
        assert_eq!(list, List::from_iter([5]));

        assert_eq!(List::<i32>::new().retain_suffix_maxima(), 0);
    }

    #[test]
    fn merge_with_interleaves_sorted_lists() {
        let mut list = List::from_iter([1, 3, 5]);
        let mut other = List::from_iter([2, 4]);
        list.merge_with(&mut other);
        assert_eq!(list, List::from_iter(1..=5));
        assert!(other.is_empty());

        // Either side may be empty.
        let mut empty = List::new();
        list.merge_with(&mut empty);
        assert_eq!(list, List::from_iter(1..=5));
        empty.merge_with(&mut list);
        assert_eq!(empty, List::from_iter(1..=5));
        assert!(list.is_empty());
    }

    #[test]
    fn merge_with_is_stable() {
        // Equal keys: the node already in `self` must come first. The
        // comparator only sees the key, not the provenance tag.
        let mut left = List::from_iter([(1, "left"), (2, "left")]);
        let mut right = List::from_iter([(1, "right"), (3, "right")]);
        super::merge_by(&mut left, &mut right, &mut |a, b| a.0 < b.0);
        assert_eq!(
            Vec::from_iter(left),
            vec![(1, "left"), (1, "right"), (2, "left"), (3, "right")]
        );
    }

    #[test]
    fn sort_orders_and_is_idempotent() {
        let mut list = List::from_iter([5, 2, 4, 3, 1, 9, 7, 8, 6, 0]);
        list.sort();
        assert_eq!(list, List::from_iter(0..10));
        list.sort();
        assert_eq!(list, List::from_iter(0..10));

        let mut empty = List::<i32>::new();
        empty.sort();
        assert!(empty.is_empty());

        let mut single = List::from_iter([1]);
        single.sort();
        assert_eq!(single, List::from_iter([1]));
    }

    #[test]
    fn sort_preserves_the_multiset() {
        let values = [3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5];
        let mut list = List::from_iter(values.iter().copied());
        list.sort();

        let mut expected = values.to_vec();
        expected.sort();
        assert_eq!(Vec::from_iter(list), expected);
    }

    #[test]
    fn sort_is_stable() {
        let mut list = List::from_iter([(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd'), (2, 'e')]);
        list.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            Vec::from_iter(list),
            vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c'), (2, 'e')]
        );
    }

    #[test]
    fn sort_descending_comparator() {
        let mut list = List::from_iter([5, 4, 1, 3, 2]);
        list.sort_by(|a, b| b.cmp(a));
        assert_eq!(list, List::from_iter([5, 4, 3, 2, 1]));
    }

    #[test]
    fn removed_elements_are_released_exactly_once() {
        #[derive(PartialEq, Eq, PartialOrd, Ord)]
        struct Tracked<'a> {
            value: i32,
            drops: &'a Cell<usize>,
        }
        impl<'a> Drop for Tracked<'a> {
            fn drop(&mut self) {
                self.drops.set(self.drops.get() + 1);
            }
        }

        let drops = Cell::new(0);
        let tracked = |value| Tracked {
            value,
            drops: &drops,
        };

        let mut list = List::from_iter([1, 1, 2, 3, 3].iter().map(|&v| tracked(v)));
        list.remove_duplicate_runs();
        assert_eq!(drops.get(), 4);

        list.push_back(tracked(5));
        list.push_back(tracked(4));
        // [2, 5, 4]: "2" and "4" are below the suffix maximum "5".
        assert_eq!(list.retain_suffix_maxima(), 2);
        assert_eq!(drops.get(), 5);

        assert!(list.pop_middle().is_some());
        assert_eq!(drops.get(), 6);

        drop(list);
        assert_eq!(drops.get(), 7);
    }
}
