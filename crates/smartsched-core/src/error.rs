//! Error types for the graph engine.

/// Failures reported by graph construction and the ordering algorithms.
///
/// [`GraphError::CycleDetected`] is the only condition the algorithms
/// themselves raise; it propagates through every computation that needs a
/// topological order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Kahn's algorithm emitted fewer vertices than the graph holds.
    #[error("graph has cycles: topological sort emitted {emitted} of {vertex_count} vertices")]
    CycleDetected { emitted: usize, vertex_count: usize },

    /// An edge endpoint outside `0..vertex_count` was supplied to a
    /// validating constructor.
    #[error("edge {from} -> {to} references a vertex outside 0..{vertex_count}")]
    VertexOutOfRange {
        from: usize,
        to: usize,
        vertex_count: usize,
    },

    /// A source vertex outside `0..vertex_count` was requested.
    #[error("source vertex {vertex} is outside 0..{vertex_count}")]
    SourceOutOfRange { vertex: usize, vertex_count: usize },
}

impl GraphError {
    /// Returns `true` for the cycle condition.
    #[must_use]
    pub const fn is_cycle(&self) -> bool {
        matches!(self, Self::CycleDetected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::GraphError;

    #[test]
    fn cycle_message_mentions_counts() {
        let err = GraphError::CycleDetected {
            emitted: 2,
            vertex_count: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("2 of 5"), "message: {msg}");
        assert!(err.is_cycle());
    }

    #[test]
    fn out_of_range_is_not_a_cycle() {
        let err = GraphError::VertexOutOfRange {
            from: 0,
            to: 9,
            vertex_count: 3,
        };
        assert!(!err.is_cycle());
        assert!(err.to_string().contains("0 -> 9"));
    }
}
