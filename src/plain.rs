use indexmap::IndexMap;

use crate::{AsKey, Key, Scalar};

/// An ordinary nested mapping with no path accessor.
///
/// This is the interchange form of a [`NestedMap`](crate::NestedMap): the
/// shape it is built from and the shape it converts back into for equality
/// checks and serialization.
#[derive(Clone, Debug, PartialEq)]
pub enum Plain {
    Leaf(Scalar),
    Map(IndexMap<Key, Plain>),
}

impl Plain {
    #[inline]
    pub fn as_leaf(&self) -> Option<&Scalar> {
        match self {
            Plain::Leaf(value) => Some(value),
            Plain::Map(_) => None,
        }
    }

    #[inline]
    pub fn as_map(&self) -> Option<&IndexMap<Key, Plain>> {
        match self {
            Plain::Leaf(_) => None,
            Plain::Map(entries) => Some(entries),
        }
    }

    #[inline]
    pub fn into_map(self) -> Option<IndexMap<Key, Plain>> {
        match self {
            Plain::Leaf(_) => None,
            Plain::Map(entries) => Some(entries),
        }
    }

    /// A plain value is already plain; this is a copy.
    #[inline]
    pub fn to_plain(&self) -> Plain {
        self.clone()
    }

    #[inline]
    pub fn get(&self, key: impl AsKey) -> Option<&Plain> {
        self.as_map()?.get(&key.as_key())
    }
}

impl<K: Into<Key>, V: Into<Plain>> FromIterator<(K, V)> for Plain {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Plain::Map(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl From<Scalar> for Plain {
    #[inline]
    fn from(value: Scalar) -> Self {
        Plain::Leaf(value)
    }
}

impl From<IndexMap<Key, Plain>> for Plain {
    #[inline]
    fn from(value: IndexMap<Key, Plain>) -> Self {
        Plain::Map(value)
    }
}

macro_rules! plain_from_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Plain {
                #[inline]
                fn from(value: $t) -> Self {
                    Plain::Leaf(Scalar::from(value))
                }
            }
        )*
    };
}

plain_from_scalar!(
    bool, i8, i16, i32, i64, u8, u16, u32, f32, f64, &str, String, &String, char, ()
);
