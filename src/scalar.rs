use std::fmt::{self, Display};

use crate::Key;

/// A leaf value of a [`NestedMap`](crate::NestedMap).
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Scalar {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Scalar {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the value as a float. Integers are widened.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(value) => Some(*value as f64),
            Scalar::Float(value) => Some(*value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(value) => Some(value),
            _ => None,
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Bool(value) => write!(f, "{value}"),
            Scalar::Int(value) => write!(f, "{value}"),
            Scalar::Float(value) => write!(f, "{value}"),
            Scalar::Str(value) => f.write_str(value),
        }
    }
}

macro_rules! scalar_from {
    ($variant:ident: $($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Scalar {
                #[inline]
                fn from(value: $t) -> Self {
                    Scalar::$variant(value.into())
                }
            }
        )*
    };
}

scalar_from!(Bool: bool);
scalar_from!(Int: i8, i16, i32, i64, u8, u16, u32);
scalar_from!(Float: f32, f64);
scalar_from!(Str: &str, String, &String, char);

impl From<()> for Scalar {
    #[inline]
    fn from(_: ()) -> Self {
        Scalar::Null
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Scalar::Null, Into::into)
    }
}

impl From<Key> for Scalar {
    #[inline]
    fn from(value: Key) -> Self {
        match value {
            Key::Str(s) => Scalar::Str(s),
            Key::Int(i) => Scalar::Int(i),
        }
    }
}

impl From<&Key> for Scalar {
    #[inline]
    fn from(value: &Key) -> Self {
        Scalar::from(value.clone())
    }
}
