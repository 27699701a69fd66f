//! Strongly-typed index newtypes.
//!
//! These types keep the global phase-space cell index and the composite
//! velocity index apart from the raw per-axis counters (`i`, `j1`, `j2`, `j3`).

use std::fmt;

/// Macro to generate index newtypes with common functionality.
macro_rules! define_index {
    (
        $(#[$meta:meta])*
        $name:ident, $display_prefix:literal
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name(usize);

        impl $name {
            /// Create a new index.
            #[inline]
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Get the raw index value.
            #[inline]
            pub const fn get(self) -> usize {
                self.0
            }

            /// First index (0).
            pub const ZERO: Self = Self(0);

            /// Create an iterator over [0, n).
            pub fn iter(n: usize) -> impl Iterator<Item = $name> + ExactSizeIterator {
                (0..n).map($name)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<usize> for $name {
            #[inline]
            fn from(index: usize) -> Self {
                Self(index)
            }
        }

        impl From<$name> for usize {
            #[inline]
            fn from(idx: $name) -> usize {
                idx.0
            }
        }
    };
}

define_index!(
    /// Global phase-space cell index `k = i·Nv³ + j`.
    ///
    /// # Example
    ///
    /// ```
    /// use vlasov_dg::types::CellIndex;
    ///
    /// let k = CellIndex::new(42);
    /// assert_eq!(k.get(), 42);
    /// ```
    CellIndex,
    "K"
);

define_index!(
    /// Composite velocity index `j = j1·Nv² + j2·Nv + j3`.
    ///
    /// # Example
    ///
    /// ```
    /// use vlasov_dg::types::VelocityIndex;
    ///
    /// let j = VelocityIndex::new(7);
    /// assert_eq!(j.get(), 7);
    /// ```
    VelocityIndex,
    "J"
);
