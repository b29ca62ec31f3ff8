use core::fmt;

macro_rules! pool_handle {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
        pub struct $name(u32);

        impl $name {
            pub(crate) const KIND: &'static str = $kind;

            #[inline]
            pub(crate) const fn new(index: u32) -> Self {
                Self(index)
            }

            /// Slot index inside the owning renderer's pool.
            #[inline]
            pub const fn index(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", $kind, self.0)
            }
        }
    };
}

pool_handle!(
    /// Handle to a vertex array owned by a `Renderer`.
    VaoHandle,
    "vertex array"
);

pool_handle!(
    /// Handle to a texture owned by a `Renderer`.
    TextureHandle,
    "texture"
);

pool_handle!(
    /// Handle to a linked shader program owned by a `Renderer`.
    ProgramHandle,
    "program"
);

/// Append-only slot storage. Slots are never removed, so a handle stays valid
/// for as long as the pool lives.
#[derive(Debug)]
pub(crate) struct Pool<T> {
    items: Vec<T>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Pool<T> {
    pub(crate) fn push(&mut self, item: T) -> u32 {
        let index = self.items.len() as u32;
        self.items.push(item);
        index
    }

    #[inline]
    pub(crate) fn get(&self, index: u32) -> Option<&T> {
        self.items.get(index as usize)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, index: u32) -> Option<&mut T> {
        self.items.get_mut(index as usize)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.items.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_dense_indices() {
        let mut pool = Pool::default();
        assert_eq!(pool.push("a"), 0);
        assert_eq!(pool.push("b"), 1);
        assert_eq!(pool.get(1), Some(&"b"));
        assert_eq!(pool.get(2), None);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn display_names_the_pool() {
        assert_eq!(ProgramHandle::new(3).to_string(), "program#3");
        assert_eq!(VaoHandle::new(0).to_string(), "vertex array#0");
    }
}
