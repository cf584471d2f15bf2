use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
        #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
        #[archive(check_bytes)]
        #[repr(transparent)]
        pub struct $name(pub u32);

        impl $name {
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Position of this id in a dense, zero-based table.
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> u32 {
                id.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(NodeId, "Position of a node in a dependency tree. Id 0 is the virtual root.");
define_id!(SpanId, "Ordinal of a processed span (sentence or document window).");

impl NodeId {
    /// The synthetic node that owns no token.
    pub const ROOT: NodeId = NodeId(0);

    pub const fn is_root(self) -> bool {
        self.0 == 0
    }

    /// Node id of the token at zero-based `position` within its span.
    pub fn for_token(position: usize) -> Self {
        let id = u32::try_from(position + 1).expect("span longer than u32::MAX tokens");
        Self(id)
    }

    /// Zero-based token position, `None` for the root.
    pub fn token_position(self) -> Option<usize> {
        self.index().checked_sub(1)
    }
}
