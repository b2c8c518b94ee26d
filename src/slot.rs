use std::{iter, mem};

use indexmap::map::Entry;

use crate::{Key, NestedMap, Node};

/// The result of looking a key up with [`NestedMap::at`].
///
/// `Found` borrows an existing node. `Pending` describes a path that does
/// not exist yet; it only touches the tree when a value is written with
/// [`set`](Slot::set) (or [`or_insert`](Slot::or_insert)). Dropping a
/// pending slot leaves the tree unchanged.
pub enum Slot<'a> {
    Found(&'a mut Node),
    Pending(PendingPath<'a>),
}

/// A chain of keys below the last node that exists.
///
/// Holds the `&mut` borrow of the map (or leaf) it will grow from.
pub struct PendingPath<'a> {
    anchor: Anchor<'a>,
    parents: Vec<Key>,
    last: Key,
}

enum Anchor<'a> {
    Map(&'a mut NestedMap),
    // a leaf standing where a branch is needed; replaced on write
    Leaf(&'a mut Node),
}

impl<'a> Slot<'a> {
    /// Descends one level.
    ///
    /// From an existing branch this looks `key` up in it; from a leaf or a
    /// pending path it extends the pending path.
    pub fn at(self, key: impl Into<Key>) -> Slot<'a> {
        let key = key.into();
        match self {
            Slot::Found(Node::Branch(map)) => map.at(key),
            Slot::Found(leaf) => Slot::Pending(PendingPath {
                anchor: Anchor::Leaf(leaf),
                parents: Vec::new(),
                last: key,
            }),
            Slot::Pending(pending) => Slot::Pending(pending.push(key)),
        }
    }

    /// Writes `value` at the slot, creating missing branches on the way.
    pub fn set(self, value: impl Into<Node>) -> &'a mut Node {
        match self {
            Slot::Found(node) => {
                *node = value.into();
                node
            }
            Slot::Pending(pending) => pending.set(value),
        }
    }

    /// Returns the existing node, or writes `default` and returns that.
    pub fn or_insert(self, default: impl Into<Node>) -> &'a mut Node {
        match self {
            Slot::Found(node) => node,
            Slot::Pending(pending) => pending.set(default),
        }
    }

    /// Returns the existing node, or materializes the path as empty branches.
    pub fn or_default(self) -> &'a mut Node {
        self.or_insert(Node::default())
    }

    /// Returns the branch at the slot, creating the whole path as branches.
    ///
    /// An existing leaf at the slot is replaced by an empty branch.
    pub fn or_insert_branch(self) -> &'a mut NestedMap {
        self.or_default().make_branch()
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, Slot::Pending(_))
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Slot::Found(_))
    }

    #[inline]
    pub fn get(&self) -> Option<&Node> {
        match self {
            Slot::Found(node) => Some(&**node),
            Slot::Pending(_) => None,
        }
    }

    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut Node> {
        match self {
            Slot::Found(node) => Some(&mut **node),
            Slot::Pending(_) => None,
        }
    }

    #[inline]
    pub fn into_found(self) -> Option<&'a mut Node> {
        match self {
            Slot::Found(node) => Some(node),
            Slot::Pending(_) => None,
        }
    }

    #[inline]
    pub fn pending_path(&self) -> Option<&PendingPath<'a>> {
        match self {
            Slot::Found(_) => None,
            Slot::Pending(pending) => Some(pending),
        }
    }
}

impl<'a> PendingPath<'a> {
    #[inline]
    pub(crate) fn new(map: &'a mut NestedMap, key: Key) -> Self {
        PendingPath {
            anchor: Anchor::Map(map),
            parents: Vec::new(),
            last: key,
        }
    }

    fn push(mut self, key: Key) -> Self {
        let parent = mem::replace(&mut self.last, key);
        self.parents.push(parent);
        self
    }

    /// The keys that will be created, outermost first.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.parents.iter().chain(iter::once(&self.last))
    }

    /// Creates every missing branch on the path and stores `value` at the
    /// final key.
    pub fn set(self, value: impl Into<Node>) -> &'a mut Node {
        let PendingPath {
            anchor,
            parents,
            last,
        } = self;
        let mut map = match anchor {
            Anchor::Map(map) => map,
            Anchor::Leaf(leaf) => leaf.make_branch(),
        };
        for key in parents {
            map = map.get_or_create(key).make_branch();
        }
        let value = value.into();
        match map.children.entry(last) {
            Entry::Occupied(entry) => {
                let node = entry.into_mut();
                *node = value;
                node
            }
            Entry::Vacant(entry) => entry.insert(value),
        }
    }
}
