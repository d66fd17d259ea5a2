//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  Request and plan IDs are handed out
//! sequentially by their owning scheduler and are never reused within one
//! scheduler's lifetime.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// The ID that follows `self` in allocation order.
            #[inline]
            pub fn next(self) -> $name {
                $name(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Host-assigned identity of a moving agent (an NPC entity).
    pub struct AgentId(u32);
}

typed_id! {
    /// Handle of a search request submitted to the search scheduler.
    pub struct RequestId(u64);
}

typed_id! {
    /// Handle of an in-flight path planning run.
    pub struct PlanId(u64);
}
