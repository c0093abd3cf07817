//! Persistent stack - the structure behind every runtime scope.
//!
//! Pushing allocates a single node that points at the previous head, so a
//! derived stack shares its whole tail with the stack it was derived from.
//! Nodes are never written after allocation, which makes stacks safe to share
//! between render branches running on different threads.

use std::sync::Arc;

struct Node<T> {
    value: T,
    next: Option<Arc<Node<T>>>,
}

/// An immutable, structurally shared stack. Index 0 is the top.
pub struct Stack<T> {
    head: Option<Arc<Node<T>>>,
    len: usize,
}

impl<T> Stack<T> {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Return a new stack with `value` on top. `self` is left untouched.
    pub fn push(&self, value: T) -> Self {
        Self {
            head: Some(Arc::new(Node {
                value,
                next: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// The most recently pushed element.
    pub fn top(&self) -> Option<&T> {
        self.head.as_deref().map(|node| &node.value)
    }

    /// Iterate from top to bottom.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the stack has no entries.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Whether both stacks have the very same head node.
    pub fn ptr_eq(&self, other: &Stack<T>) -> bool {
        match (&self.head, &other.head) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Stack<T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
            len: self.len,
        }
    }
}

impl<T> FromIterator<T> for Stack<T> {
    /// Builds a stack by pushing items in order: the last item ends on top.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().fold(Stack::new(), |stack, value| stack.push(value))
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// Unlinks uniquely owned nodes one at a time so dropping a deep stack does
// not recurse.
impl<T> Drop for Stack<T> {
    fn drop(&mut self) {
        let mut head = self.head.take();
        while let Some(node) = head {
            match Arc::try_unwrap(node) {
                Ok(mut node) => head = node.next.take(),
                Err(_) => break,
            }
        }
    }
}

/// Top-to-bottom iterator over a `Stack`.
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.value
        })
    }
}

impl<'a, T> IntoIterator for &'a Stack<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
