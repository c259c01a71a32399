//! Complexity tiers by node count.

use flowdex_core::ComplexityTier;

/// Largest node count that is still [`ComplexityTier::Simple`].
pub const SIMPLE_MAX_NODES: usize = 3;

/// Largest node count that is still [`ComplexityTier::Medium`].
pub const MEDIUM_MAX_NODES: usize = 8;

/// Maps a node count to its complexity tier.
#[must_use]
pub const fn classify_complexity(node_count: usize) -> ComplexityTier {
    if node_count <= SIMPLE_MAX_NODES {
        ComplexityTier::Simple
    } else if node_count <= MEDIUM_MAX_NODES {
        ComplexityTier::Medium
    } else {
        ComplexityTier::Complex
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries() {
        assert_eq!(classify_complexity(0), ComplexityTier::Simple);
        assert_eq!(classify_complexity(3), ComplexityTier::Simple);
        assert_eq!(classify_complexity(4), ComplexityTier::Medium);
        assert_eq!(classify_complexity(8), ComplexityTier::Medium);
        assert_eq!(classify_complexity(9), ComplexityTier::Complex);
    }
}
