//! Handles into the environment's arenas.

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn from_raw(raw: u32) -> Self {
                $name(raw)
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            /// Handle for the next slot of an arena holding `len` entries.
            ///
            /// # Panics
            /// Panics past `u32::MAX` entries.
            pub(crate) fn next(len: usize) -> Self {
                let raw = u32::try_from(len).unwrap_or_else(|_| {
                    panic!(concat!(stringify!($name), " arena exceeded u32::MAX entries"))
                });
                $name(raw)
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

define_handle!(
    /// A lexical scope.
    ScopeId
);
define_handle!(
    /// A function symbol, complete or not.
    FunctionId
);
define_handle!(
    /// The overload set of one name in one scope.
    OverloadSetId
);
define_handle!(
    /// The template set of one name in one scope.
    TemplateSetId
);
