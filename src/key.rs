use std::{
    fmt::{self, Display},
    hash::{Hash, Hasher},
};

use indexmap::Equivalent;

use crate::{Error, Scalar, cold_path};

/// A key of a [`NestedMap`](crate::NestedMap).
///
/// Keys are either strings or integers. Ordering puts every string before
/// every integer; within a kind the natural order applies.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Key {
    Str(String),
    Int(i64),
}

/// A borrowed [`Key`], used for lookups that should not allocate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyRef<'a> {
    Str(&'a str),
    Int(i64),
}

impl Key {
    #[inline]
    pub fn as_key_ref(&self) -> KeyRef<'_> {
        match self {
            Key::Str(s) => KeyRef::Str(s),
            Key::Int(i) => KeyRef::Int(*i),
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(s),
            Key::Int(_) => None,
        }
    }

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Str(_) => None,
            Key::Int(i) => Some(*i),
        }
    }
}

impl KeyRef<'_> {
    #[inline]
    pub fn to_key(self) -> Key {
        match self {
            KeyRef::Str(s) => Key::Str(s.to_owned()),
            KeyRef::Int(i) => Key::Int(i),
        }
    }
}

// Must agree with `KeyRef`'s derived hash so that `KeyRef` can look up `Key`s.
impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_key_ref().hash(state)
    }
}

impl Equivalent<Key> for KeyRef<'_> {
    #[inline]
    fn equivalent(&self, key: &Key) -> bool {
        *self == key.as_key_ref()
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.as_key_ref(), f)
    }
}

impl Display for KeyRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyRef::Str(s) => f.write_str(s),
            KeyRef::Int(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for Key {
    #[inline]
    fn from(value: &str) -> Self {
        Key::Str(value.to_owned())
    }
}

impl From<String> for Key {
    #[inline]
    fn from(value: String) -> Self {
        Key::Str(value)
    }
}

impl From<&String> for Key {
    #[inline]
    fn from(value: &String) -> Self {
        Key::Str(value.clone())
    }
}

impl From<&Key> for Key {
    #[inline]
    fn from(value: &Key) -> Self {
        value.clone()
    }
}

impl From<KeyRef<'_>> for Key {
    #[inline]
    fn from(value: KeyRef<'_>) -> Self {
        value.to_key()
    }
}

macro_rules! key_from_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Key {
                #[inline]
                fn from(value: $t) -> Self {
                    Key::Int(value as i64)
                }
            }
        )*
    };
}

key_from_int!(i64, i32, u32, usize);

impl TryFrom<Scalar> for Key {
    type Error = Error;

    fn try_from(value: Scalar) -> Result<Self, Self::Error> {
        match value {
            Scalar::Str(s) => Ok(Key::Str(s)),
            Scalar::Int(i) => Ok(Key::Int(i)),
            other => {
                cold_path();
                Err(Error::InvalidKey(other))
            }
        }
    }
}

impl TryFrom<&Scalar> for Key {
    type Error = Error;

    fn try_from(value: &Scalar) -> Result<Self, Self::Error> {
        match value {
            Scalar::Str(s) => Ok(Key::Str(s.clone())),
            Scalar::Int(i) => Ok(Key::Int(*i)),
            other => {
                cold_path();
                Err(Error::InvalidKey(other.clone()))
            }
        }
    }
}
