//! A deque with compiler-checked aliasing, built from [`GhostCell`] and
//! [`StaticRc`].
//!
//! The main list of this crate manages its links with raw pointers and
//! `unsafe`. This module explores the opposite trade-off: each node is
//! owned by two [`StaticRc`] halves (one per link direction) and every
//! access goes through a [`GhostToken`], so the linking never needs
//! `unsafe` at all. Kept as an internal testbed.

use ghost_cell::{GhostCell, GhostToken};
use static_rc::StaticRc;
use std::ops::Deref;

type Half<T> = StaticRc<T, 1, 2>;
type Full<T> = StaticRc<T, 2, 2>;

type NodePtr<'id, T> = Half<GhostCell<'id, Node<'id, T>>>;

struct Node<'id, T> {
    prev: Option<NodePtr<'id, T>>,
    next: Option<NodePtr<'id, T>>,
    element: T,
}

impl<'id, T> Node<'id, T> {
    fn new(element: T) -> Self {
        Self {
            prev: None,
            next: None,
            element,
        }
    }
}

/// A double-ended queue where both halves of every node's ownership are
/// accounted for statically.
///
/// For adjacent nodes `a` and `b`, one half of `b` lives in `a.next` and
/// one half of `a` lives in `b.prev`; the outermost halves live in the
/// `front` and `back` slots of the deque. Popping a node therefore always
/// recovers both halves, which `Full::into_box` turns back into the
/// element.
pub struct Deque<'id, T> {
    front: Option<NodePtr<'id, T>>,
    back: Option<NodePtr<'id, T>>,
}

impl<'id, T> Default for Deque<'id, T> {
    fn default() -> Self {
        Self {
            front: None,
            back: None,
        }
    }
}

impl<'id, T> Deque<'id, T> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn is_empty(&self) -> bool {
        self.front.is_none()
    }

    pub fn len(&self, token: &GhostToken<'id>) -> usize {
        let mut len = 0;
        let mut cursor = self.front.as_ref();
        while let Some(node) = cursor {
            len += 1;
            cursor = node.deref().borrow(token).next.as_ref();
        }
        len
    }

    pub fn push_front(&mut self, element: T, token: &mut GhostToken<'id>) {
        let (one, two) = Full::split(Full::new(GhostCell::new(Node::new(element))));
        match self.front.take() {
            Some(old) => {
                old.deref().borrow_mut(token).prev = Some(one);
                two.deref().borrow_mut(token).next = Some(old);
                self.front = Some(two);
            }
            None => {
                self.front = Some(one);
                self.back = Some(two);
            }
        }
    }

    pub fn push_back(&mut self, element: T, token: &mut GhostToken<'id>) {
        let (one, two) = Full::split(Full::new(GhostCell::new(Node::new(element))));
        match self.back.take() {
            Some(old) => {
                old.deref().borrow_mut(token).next = Some(one);
                two.deref().borrow_mut(token).prev = Some(old);
                self.back = Some(two);
            }
            None => {
                self.back = Some(one);
                self.front = Some(two);
            }
        }
    }

    pub fn pop_front(&mut self, token: &mut GhostToken<'id>) -> Option<T> {
        let first = self.front.take()?;
        let other = match first.deref().borrow_mut(token).next.take() {
            Some(second) => {
                let other = second.deref().borrow_mut(token).prev.take().unwrap();
                self.front = Some(second);
                other
            }
            // The deque is now empty; the second half sits in `back`.
            None => self.back.take().unwrap(),
        };
        Some(Full::into_box(Full::join(first, other)).into_inner().element)
    }

    pub fn pop_back(&mut self, token: &mut GhostToken<'id>) -> Option<T> {
        let last = self.back.take()?;
        let other = match last.deref().borrow_mut(token).prev.take() {
            Some(second) => {
                let other = second.deref().borrow_mut(token).next.take().unwrap();
                self.back = Some(second);
                other
            }
            None => self.front.take().unwrap(),
        };
        Some(Full::into_box(Full::join(last, other)).into_inner().element)
    }
}

#[cfg(test)]
mod tests {
    use crate::experiments::Deque;
    use ghost_cell::GhostToken;

    #[test]
    fn deque_push_pop() {
        GhostToken::new(|mut token| {
            let mut deque = Deque::new();
            assert!(deque.is_empty());
            assert_eq!(deque.len(&token), 0);

            deque.push_back("b", &mut token);
            deque.push_back("c", &mut token);
            deque.push_front("a", &mut token);
            assert!(!deque.is_empty());
            assert_eq!(deque.len(&token), 3);

            assert_eq!(deque.pop_front(&mut token), Some("a"));
            assert_eq!(deque.pop_back(&mut token), Some("c"));
            assert_eq!(deque.pop_back(&mut token), Some("b"));
            assert_eq!(deque.pop_back(&mut token), None);
            assert!(deque.is_empty());
        })
    }

    #[test]
    fn deque_drops_leftover_nodes() {
        GhostToken::new(|mut token| {
            let mut deque = Deque::new();
            for i in 0..4 {
                deque.push_back(i, &mut token);
            }
            assert_eq!(deque.pop_front(&mut token), Some(0));
            // The remaining nodes are reclaimed pair by pair.
            while deque.pop_back(&mut token).is_some() {}
            assert!(deque.is_empty());
        })
    }
}
