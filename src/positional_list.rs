use std::{fmt::Debug, iter::successors, marker::PhantomData};

use derivative::Derivative;

use crate::{
    error::{GraphError, HandleKind, Result},
    instance_id::InstanceId,
    slot_vec::{SlotKey, SlotVec},
};

/// A stable handle to an element of a [`PositionalList`].
///
/// A position stays valid while its element is in the list, regardless of
/// insertions and removals elsewhere.  After its element is removed, every
/// operation given the position fails with
/// [`GraphError::InvalidHandle`].
#[derive(Derivative)]
#[derivative(
    Clone(bound = ""),
    Copy(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = ""),
    Hash(bound = ""),
    Debug(bound = "")
)]
pub struct Position<T> {
    owner: InstanceId,
    key: SlotKey,
    #[derivative(Debug = "ignore")]
    marker: PhantomData<fn() -> T>,
}

struct Node<T> {
    element: T,
    prev: Option<SlotKey>,
    next: Option<SlotKey>,
}

/// A doubly linked sequence whose nodes live in an arena.  Each element is
/// addressed by a [`Position`], which gives O(1) access, insertion next to it
/// and removal.
pub struct PositionalList<T> {
    nodes: SlotVec<Node<T>>,
    head: Option<SlotKey>,
    tail: Option<SlotKey>,
    id: InstanceId,
}

impl<T> PositionalList<T> {
    /// Creates a new, empty list.
    pub fn new() -> Self {
        Self {
            nodes: SlotVec::new(),
            head: None,
            tail: None,
            id: InstanceId::new(),
        }
    }

    fn position(&self, key: SlotKey) -> Position<T> {
        Position {
            owner: self.id,
            key,
            marker: PhantomData,
        }
    }

    fn validate(&self, p: Position<T>) -> Result<SlotKey> {
        if p.owner == self.id && self.nodes.contains(p.key) {
            Ok(p.key)
        } else {
            Err(GraphError::InvalidHandle(HandleKind::Position))
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if `p` refers to an element currently in this list.
    pub fn contains(&self, p: Position<T>) -> bool {
        self.validate(p).is_ok()
    }

    /// Gets the position of the first element, if any.
    pub fn first(&self) -> Option<Position<T>> {
        self.head.map(|key| self.position(key))
    }

    /// Gets the position of the last element, if any.
    pub fn last(&self) -> Option<Position<T>> {
        self.tail.map(|key| self.position(key))
    }

    /// Gets the position immediately before `p`, or `None` if `p` is first.
    pub fn before(&self, p: Position<T>) -> Result<Option<Position<T>>> {
        let key = self.validate(p)?;
        Ok(self
            .nodes
            .get(key)
            .and_then(|node| node.prev)
            .map(|prev| self.position(prev)))
    }

    /// Gets the position immediately after `p`, or `None` if `p` is last.
    pub fn after(&self, p: Position<T>) -> Result<Option<Position<T>>> {
        let key = self.validate(p)?;
        Ok(self
            .nodes
            .get(key)
            .and_then(|node| node.next)
            .map(|next| self.position(next)))
    }

    pub fn get(&self, p: Position<T>) -> Result<&T> {
        let key = self.validate(p)?;
        self.nodes
            .get(key)
            .map(|node| &node.element)
            .ok_or(GraphError::InvalidHandle(HandleKind::Position))
    }

    pub fn get_mut(&mut self, p: Position<T>) -> Result<&mut T> {
        let key = self.validate(p)?;
        self.nodes
            .get_mut(key)
            .map(|node| &mut node.element)
            .ok_or(GraphError::InvalidHandle(HandleKind::Position))
    }

    // Links a new node between two neighbours; `None` stands for the list end.
    fn add_between(
        &mut self,
        element: T,
        prev: Option<SlotKey>,
        next: Option<SlotKey>,
    ) -> Position<T> {
        let key = self.nodes.insert(Node {
            element,
            prev,
            next,
        });
        match prev.and_then(|prev| self.nodes.get_mut(prev)) {
            Some(node) => node.next = Some(key),
            None => self.head = Some(key),
        }
        match next.and_then(|next| self.nodes.get_mut(next)) {
            Some(node) => node.prev = Some(key),
            None => self.tail = Some(key),
        }
        self.position(key)
    }

    /// Inserts an element at the front of the list.
    pub fn add_first(&mut self, element: T) -> Position<T> {
        self.add_between(element, None, self.head)
    }

    /// Inserts an element at the back of the list.
    pub fn add_last(&mut self, element: T) -> Position<T> {
        self.add_between(element, self.tail, None)
    }

    /// Inserts an element immediately before `p`.
    pub fn add_before(&mut self, p: Position<T>, element: T) -> Result<Position<T>> {
        let key = self.validate(p)?;
        let prev = self.nodes.get(key).and_then(|node| node.prev);
        Ok(self.add_between(element, prev, Some(key)))
    }

    /// Inserts an element immediately after `p`.
    pub fn add_after(&mut self, p: Position<T>, element: T) -> Result<Position<T>> {
        let key = self.validate(p)?;
        let next = self.nodes.get(key).and_then(|node| node.next);
        Ok(self.add_between(element, Some(key), next))
    }

    /// Replaces the element at `p`, returning the old one.
    pub fn set(&mut self, p: Position<T>, element: T) -> Result<T> {
        Ok(std::mem::replace(self.get_mut(p)?, element))
    }

    /// Unlinks the element at `p` and returns it.  `p` is invalid afterwards.
    pub fn remove(&mut self, p: Position<T>) -> Result<T> {
        let key = self.validate(p)?;
        let node = self
            .nodes
            .remove(key)
            .ok_or(GraphError::InvalidHandle(HandleKind::Position))?;
        match node.prev.and_then(|prev| self.nodes.get_mut(prev)) {
            Some(prev) => prev.next = node.next,
            None => self.head = node.next,
        }
        match node.next.and_then(|next| self.nodes.get_mut(next)) {
            Some(next) => next.prev = node.prev,
            None => self.tail = node.prev,
        }
        Ok(node.element)
    }

    /// Removes every element.  All outstanding positions become invalid.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    fn keys(&self) -> impl Iterator<Item = SlotKey> + '_ {
        successors(self.head, move |key| {
            self.nodes.get(*key).and_then(|node| node.next)
        })
    }

    /// Gets an iterator over the positions of the list, first to last.
    pub fn positions(&self) -> impl Iterator<Item = Position<T>> + '_ {
        self.keys().map(|key| self.position(key))
    }

    /// Gets an iterator over the elements of the list, first to last.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.keys()
            .filter_map(|key| self.nodes.get(key).map(|node| &node.element))
    }
}

impl<T> Default for PositionalList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug> Debug for PositionalList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for PositionalList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = PositionalList::new();
        for element in iter {
            list.add_last(element);
        }
        list
    }
}
