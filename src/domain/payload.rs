//! The single-field message unit exchanged over the channel.

use serde::{Deserialize, Serialize};

/// One application message: `{"number": <integer>}` on the wire.
///
/// Immutable once constructed; created, serialized, sent, and
/// discarded. Carries no identity beyond transmission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// The sampled number.
    pub number: u32,
}

impl Payload {
    /// Creates a new `Payload`.
    #[must_use]
    pub const fn new(number: u32) -> Self {
        Self { number }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn wire_shape_is_single_number_field() {
        let Ok(json) = serde_json::to_string(&Payload::new(42)) else {
            panic!("payload should serialize");
        };
        assert_eq!(json, r#"{"number":42}"#);
    }

    #[test]
    fn round_trips_every_value_in_range() {
        for number in 0..1000 {
            let Ok(json) = serde_json::to_string(&Payload::new(number)) else {
                panic!("payload should serialize");
            };
            let Ok(decoded) = serde_json::from_str::<Payload>(&json) else {
                panic!("payload should deserialize");
            };
            assert_eq!(decoded.number, number);
        }
    }

    #[test]
    fn rejects_missing_field() {
        assert!(serde_json::from_str::<Payload>("{}").is_err());
    }
}
