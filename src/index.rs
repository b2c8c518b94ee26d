use crate::{Key, KeyRef};

mod private {
    pub trait Sealed {}
    impl Sealed for i64 {}
    impl Sealed for i32 {}
    impl Sealed for usize {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl Sealed for crate::Key {}
    impl Sealed for crate::KeyRef<'_> {}
    impl<T> Sealed for &T where T: ?Sized + Sealed {}
}

/// Types that can look up a child of a [`NestedMap`](crate::NestedMap)
/// without building an owned [`Key`].
pub trait AsKey: private::Sealed {
    fn as_key(&self) -> KeyRef<'_>;
}

impl AsKey for i64 {
    #[inline]
    fn as_key(&self) -> KeyRef<'_> {
        KeyRef::Int(*self)
    }
}

impl AsKey for i32 {
    #[inline]
    fn as_key(&self) -> KeyRef<'_> {
        KeyRef::Int(i64::from(*self))
    }
}

impl AsKey for usize {
    #[inline]
    fn as_key(&self) -> KeyRef<'_> {
        KeyRef::Int(*self as i64)
    }
}

impl AsKey for str {
    #[inline]
    fn as_key(&self) -> KeyRef<'_> {
        KeyRef::Str(self)
    }
}

impl AsKey for String {
    #[inline]
    fn as_key(&self) -> KeyRef<'_> {
        KeyRef::Str(self.as_str())
    }
}

impl AsKey for Key {
    #[inline]
    fn as_key(&self) -> KeyRef<'_> {
        self.as_key_ref()
    }
}

impl AsKey for KeyRef<'_> {
    #[inline]
    fn as_key(&self) -> KeyRef<'_> {
        *self
    }
}

impl<T: ?Sized + AsKey> AsKey for &T {
    #[inline]
    fn as_key(&self) -> KeyRef<'_> {
        (**self).as_key()
    }
}
