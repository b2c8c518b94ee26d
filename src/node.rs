use crate::{AsKey, Key, NestedMap, Plain, Scalar};

/// A point in the hierarchy: either a leaf value or a subtree.
///
/// The kind of a node is decided by its last assignment. Assigning a scalar
/// over a subtree discards the subtree, and assigning a map over a leaf
/// replaces the leaf.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Leaf(Scalar),
    Branch(NestedMap),
}

/// An empty branch, the node materialized for a missing key.
impl Default for Node {
    fn default() -> Self {
        Node::Branch(NestedMap::new())
    }
}

impl Node {
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    #[inline]
    pub fn is_branch(&self) -> bool {
        matches!(self, Node::Branch(_))
    }

    #[inline]
    pub fn as_leaf(&self) -> Option<&Scalar> {
        match self {
            Node::Leaf(value) => Some(value),
            Node::Branch(_) => None,
        }
    }

    #[inline]
    pub fn as_leaf_mut(&mut self) -> Option<&mut Scalar> {
        match self {
            Node::Leaf(value) => Some(value),
            Node::Branch(_) => None,
        }
    }

    #[inline]
    pub fn as_branch(&self) -> Option<&NestedMap> {
        match self {
            Node::Leaf(_) => None,
            Node::Branch(map) => Some(map),
        }
    }

    #[inline]
    pub fn as_branch_mut(&mut self) -> Option<&mut NestedMap> {
        match self {
            Node::Leaf(_) => None,
            Node::Branch(map) => Some(map),
        }
    }

    #[inline]
    pub fn into_leaf(self) -> Option<Scalar> {
        match self {
            Node::Leaf(value) => Some(value),
            Node::Branch(_) => None,
        }
    }

    #[inline]
    pub fn into_branch(self) -> Option<NestedMap> {
        match self {
            Node::Leaf(_) => None,
            Node::Branch(map) => Some(map),
        }
    }

    /// Looks up a child when this node is a branch. Leaves have no children.
    #[inline]
    pub fn get(&self, key: impl AsKey) -> Option<&Node> {
        self.as_branch()?.get(key)
    }

    /// Converts the node into a [`Plain`] value.
    pub fn to_plain(&self) -> Plain {
        match self {
            Node::Leaf(value) => Plain::Leaf(value.clone()),
            Node::Branch(map) => map.to_plain(),
        }
    }

    /// Turns a leaf into an empty branch and returns the branch.
    pub(crate) fn make_branch(&mut self) -> &mut NestedMap {
        if self.is_leaf() {
            *self = Node::default();
        }
        match self {
            Node::Branch(map) => map,
            Node::Leaf(_) => unreachable!("leaf was replaced by a branch"),
        }
    }
}

impl From<Scalar> for Node {
    #[inline]
    fn from(value: Scalar) -> Self {
        Node::Leaf(value)
    }
}

impl From<NestedMap> for Node {
    #[inline]
    fn from(value: NestedMap) -> Self {
        Node::Branch(value)
    }
}

impl From<Plain> for Node {
    fn from(value: Plain) -> Self {
        match value {
            Plain::Leaf(value) => Node::Leaf(value),
            Plain::Map(entries) => Node::Branch(NestedMap::from_plain(entries)),
        }
    }
}

impl From<Key> for Node {
    #[inline]
    fn from(value: Key) -> Self {
        Node::Leaf(value.into())
    }
}

macro_rules! node_from_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Node {
                #[inline]
                fn from(value: $t) -> Self {
                    Node::Leaf(Scalar::from(value))
                }
            }
        )*
    };
}

node_from_scalar!(
    bool, i8, i16, i32, i64, u8, u16, u32, f32, f64, &str, String, &String, char, ()
);

impl<T: Into<Scalar>> From<Option<T>> for Node {
    #[inline]
    fn from(value: Option<T>) -> Self {
        Node::Leaf(Scalar::from(value))
    }
}
