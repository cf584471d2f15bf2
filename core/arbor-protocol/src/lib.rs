pub mod ids;
pub mod model;
pub mod srl;
pub mod token;
pub mod window;

// Re-export core types for convenience
pub use ids::{NodeId, SpanId};
pub use model::*;
pub use srl::{Argument, Predicate};
pub use token::{Token, TokenRef};
pub use window::Window;

#[cfg(test)]
mod tests {
    use super::*;
    use rkyv::{from_bytes, to_bytes};

    #[test]
    fn test_id_serialization() {
        let original = NodeId::new(42);

        let bytes = to_bytes::<_, 256>(&original).expect("Failed to serialize NodeId");
        let deserialized: NodeId = from_bytes(&bytes).expect("Failed to deserialize NodeId");

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_id_layout() {
        // NodeId(u32) is exactly 4 bytes
        assert_eq!(core::mem::size_of::<NodeId>(), 4);
    }

    #[test]
    fn test_node_id_token_positions() {
        assert!(NodeId::ROOT.is_root());
        assert_eq!(NodeId::ROOT.token_position(), None);
        assert_eq!(NodeId::for_token(0), NodeId(1));
        assert_eq!(NodeId::for_token(4).token_position(), Some(4));
    }
}
