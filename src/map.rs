use std::fmt;

use indexmap::{IndexMap, map};

use crate::{AsKey, Key, Node, PendingPath, Plain, Scalar, Slot};

/// An ordered, auto-growing nested mapping.
///
/// Children keep their insertion order, which is also the axis order of
/// every projection. Looking up a missing key with [`at`](NestedMap::at)
/// never fails: it hands out a [`Slot`] that creates the path only when a
/// value is finally written through it.
///
/// # Example
///
/// ```
/// use nested_dict::{NestedMap, Scalar};
///
/// let mut map = NestedMap::new();
/// map.at("a").at("b").at("c").set("nonsense");
/// map.at("a").at("g").set("more of the same");
///
/// let leaf = map.get_path(["a", "b", "c"]).and_then(|node| node.as_leaf());
/// assert_eq!(leaf, Some(&Scalar::from("nonsense")));
/// assert_eq!(map.keys().count(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NestedMap {
    pub(crate) children: IndexMap<Key, Node>,
}

impl NestedMap {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            children: IndexMap::with_capacity(capacity),
        }
    }

    /// Builds a hierarchy from a plain nested mapping, converting every
    /// nested [`Plain::Map`] into a subtree.
    pub fn from_plain(entries: IndexMap<Key, Plain>) -> Self {
        Self {
            children: entries
                .into_iter()
                .map(|(key, value)| (key, Node::from(value)))
                .collect(),
        }
    }

    /// Converts the hierarchy into a plain nested mapping.
    pub fn to_plain(&self) -> Plain {
        Plain::Map(
            self.children
                .iter()
                .map(|(key, node)| (key.clone(), node.to_plain()))
                .collect(),
        )
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    #[inline]
    pub fn contains(&self, key: impl AsKey) -> bool {
        self.children.contains_key(&key.as_key())
    }

    #[inline]
    pub fn get(&self, key: impl AsKey) -> Option<&Node> {
        self.children.get(&key.as_key())
    }

    #[inline]
    pub fn get_mut(&mut self, key: impl AsKey) -> Option<&mut Node> {
        self.children.get_mut(&key.as_key())
    }

    /// Returns the child at `key`, or `default` when there is none.
    #[inline]
    pub fn get_or<'a>(&'a self, key: impl AsKey, default: &'a Node) -> &'a Node {
        self.get(key).unwrap_or(default)
    }

    /// Follows `path` through nested branches without creating anything.
    ///
    /// Returns `None` for an empty path, for a missing key, and when the
    /// path runs through a leaf.
    pub fn get_path<I>(&self, path: I) -> Option<&Node>
    where
        I: IntoIterator,
        I::Item: AsKey,
    {
        let mut path = path.into_iter();
        let mut node = self.get(path.next()?)?;
        for key in path {
            node = node.get(key)?;
        }
        Some(node)
    }

    /// Returns the child at `key`, inserting an empty branch if it is missing.
    #[inline]
    pub fn get_or_create(&mut self, key: impl Into<Key>) -> &mut Node {
        self.children.entry(key.into()).or_default()
    }

    /// Stores `value` at `key` and returns whatever was there before.
    ///
    /// An existing key keeps its position.
    #[inline]
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Node>) -> Option<Node> {
        self.children.insert(key.into(), value.into())
    }

    /// Removes `key`, keeping the order of the remaining children.
    #[inline]
    pub fn remove(&mut self, key: impl AsKey) -> Option<Node> {
        self.children.shift_remove(&key.as_key())
    }

    /// Sets every `(key, value)` pair in turn.
    pub fn update<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Node>,
    {
        for (key, value) in entries {
            self.set(key, value);
        }
    }

    /// Looks up `key` for reading or writing.
    ///
    /// Nothing is inserted by this call: a missing key yields
    /// [`Slot::Pending`], which materializes the path on [`Slot::set`].
    pub fn at(&mut self, key: impl Into<Key>) -> Slot<'_> {
        let key = key.into();
        match self.children.get_index_of(&key) {
            Some(index) => Slot::Found(&mut self.children[index]),
            None => Slot::Pending(PendingPath::new(self, key)),
        }
    }

    /// Chains [`at`](NestedMap::at) over every key of `path`.
    ///
    /// Returns `None` for an empty path.
    pub fn path<I>(&mut self, path: I) -> Option<Slot<'_>>
    where
        I: IntoIterator,
        I::Item: Into<Key>,
    {
        let mut path = path.into_iter();
        let slot = self.at(path.next()?);
        Some(path.fold(slot, |slot, key| slot.at(key)))
    }

    #[inline]
    pub fn keys(&self) -> map::Keys<'_, Key, Node> {
        self.children.keys()
    }

    #[inline]
    pub fn values(&self) -> map::Values<'_, Key, Node> {
        self.children.values()
    }

    #[inline]
    pub fn values_mut(&mut self) -> map::ValuesMut<'_, Key, Node> {
        self.children.values_mut()
    }

    #[inline]
    pub fn iter(&self) -> map::Iter<'_, Key, Node> {
        self.children.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> map::IterMut<'_, Key, Node> {
        self.children.iter_mut()
    }

    /// Number of nesting levels: `0` for an empty map, one more than the
    /// deepest child branch otherwise.
    pub fn depth(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        1 + self
            .values()
            .filter_map(Node::as_branch)
            .map(NestedMap::depth)
            .max()
            .unwrap_or(0)
    }

    /// Every leaf with the keys leading to it, depth-first in insertion order.
    pub fn leaves(&self) -> Vec<(Vec<&Key>, &Scalar)> {
        let mut out = Vec::new();
        self.visit_leaves(&mut Vec::new(), &mut |path, value| {
            out.push((path.to_vec(), value))
        });
        out
    }

    pub(crate) fn visit_leaves<'a>(
        &'a self,
        path: &mut Vec<&'a Key>,
        f: &mut impl FnMut(&[&'a Key], &'a Scalar),
    ) {
        for (key, node) in &self.children {
            path.push(key);
            match node {
                Node::Leaf(value) => f(path, value),
                Node::Branch(map) => map.visit_leaves(path, f),
            }
            path.pop();
        }
    }

    /// Writes one line per node, indented two spaces per level.
    ///
    /// Branches print as `key:`; leaves print as `key: value`, or just `key`
    /// when `with_values` is `false`.
    pub fn write_structure(&self, out: &mut impl fmt::Write, with_values: bool) -> fmt::Result {
        self.write_structure_at(out, with_values, 0)
    }

    /// [`write_structure`](NestedMap::write_structure) into a new `String`.
    pub fn structure(&self, with_values: bool) -> String {
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = self.write_structure(&mut out, with_values);
        out
    }

    fn write_structure_at(
        &self,
        out: &mut impl fmt::Write,
        with_values: bool,
        indent: usize,
    ) -> fmt::Result {
        for (key, node) in &self.children {
            write!(out, "{:width$}{key}", "", width = indent * 2)?;
            match node {
                Node::Branch(map) => {
                    writeln!(out, ":")?;
                    map.write_structure_at(out, with_values, indent + 1)?;
                }
                Node::Leaf(value) if with_values => writeln!(out, ": {value}")?,
                Node::Leaf(_) => writeln!(out)?,
            }
        }
        Ok(())
    }
}

impl From<IndexMap<Key, Plain>> for NestedMap {
    #[inline]
    fn from(value: IndexMap<Key, Plain>) -> Self {
        Self::from_plain(value)
    }
}

impl<K: Into<Key>, V: Into<Node>> FromIterator<(K, V)> for NestedMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = NestedMap::new();
        map.update(iter);
        map
    }
}

impl<K: Into<Key>, V: Into<Node>> Extend<(K, V)> for NestedMap {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.update(iter);
    }
}

impl IntoIterator for NestedMap {
    type Item = (Key, Node);
    type IntoIter = map::IntoIter<Key, Node>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.children.into_iter()
    }
}

impl<'a> IntoIterator for &'a NestedMap {
    type Item = (&'a Key, &'a Node);
    type IntoIter = map::Iter<'a, Key, Node>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

impl<'a> IntoIterator for &'a mut NestedMap {
    type Item = (&'a Key, &'a mut Node);
    type IntoIter = map::IterMut<'a, Key, Node>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.children.iter_mut()
    }
}
