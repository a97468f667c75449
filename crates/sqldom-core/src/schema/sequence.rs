//! Sequences.

use serde::{Deserialize, Serialize};

/// Numeric parameters of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceDescriptor {
    /// Minimum value.
    pub min_value: Option<i64>,
    /// Increment applied per generation.
    pub increment: i64,
    /// Last observed value, populated by extraction.
    pub current_value: Option<i64>,
}

impl Default for SequenceDescriptor {
    fn default() -> Self {
        Self {
            min_value: None,
            increment: 1,
            current_value: None,
        }
    }
}

/// A named sequence generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    /// Sequence name.
    pub name: String,
    /// Numeric parameters.
    pub descriptor: SequenceDescriptor,
}

impl Sequence {
    /// Creates a sequence with default parameters (increment 1).
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: SequenceDescriptor::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_increment_is_one() {
        let seq = Sequence::new("seq_orders");
        assert_eq!(seq.descriptor.increment, 1);
        assert!(seq.descriptor.current_value.is_none());
    }
}
