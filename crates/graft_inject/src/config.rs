//! Resolver configuration.
//!
//! ```
//! use graft_inject::config::{ResolverConfig, TraversalOrder};
//!
//! // Reproducible shuffling, e.g. to replay a failing order.
//! let config = ResolverConfig::new()
//!     .with_traversal(TraversalOrder::Seeded(7))
//!     .with_max_sweeps(64);
//!
//! assert_eq!(config.traversal(), TraversalOrder::Seeded(7));
//! assert_eq!(config.max_sweeps(), 64);
//! ```

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Default bound on the number of sweeps per `resolve()` call.
pub const DEFAULT_MAX_SWEEPS: usize = 1024;

/// The order in which the resolver visits objects and candidates.
///
/// Resolution results never depend on the order; shuffling exists to keep it
/// that way by surfacing code (and tests) that accidentally rely on one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    /// Registration order.
    Registration,
    /// A fresh random order on every sweep.
    Shuffled,
    /// A random order derived from a fixed seed.
    Seeded(u64),
}

impl Default for TraversalOrder {
    /// Shuffled in debug builds, registration order in release builds.
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Shuffled
        } else {
            Self::Registration
        }
    }
}

impl TraversalOrder {
    /// Creates the ordering source for one resolution session.
    pub(crate) fn orderer(self) -> Orderer {
        match self {
            Self::Registration => Orderer::Stable,
            Self::Shuffled => Orderer::Random(StdRng::from_rng(&mut rand::rng())),
            Self::Seeded(seed) => Orderer::Random(StdRng::seed_from_u64(seed)),
        }
    }
}

/// Applies a [`TraversalOrder`] to lists of objects.
pub(crate) enum Orderer {
    Stable,
    Random(StdRng),
}

impl Orderer {
    /// Reorders `items` in place.
    pub(crate) fn arrange<T>(&mut self, items: &mut [T]) {
        if let Self::Random(rng) = self {
            items.shuffle(rng);
        }
    }
}

/// Configuration for [`Graph`](crate::graph::Graph) resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Visiting order for objects and candidates.
    traversal: TraversalOrder,
    /// Whether private fields that already hold a value get a fresh one.
    overwrite_private: bool,
    /// Upper bound on sweeps per `resolve()` call.
    max_sweeps: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            traversal: TraversalOrder::default(),
            overwrite_private: false,
            max_sweeps: DEFAULT_MAX_SWEEPS,
        }
    }
}

impl ResolverConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the traversal order.
    #[must_use]
    pub fn with_traversal(mut self, traversal: TraversalOrder) -> Self {
        self.traversal = traversal;
        self
    }

    /// Replaces values already present in private fields.
    ///
    /// Off by default: a field that holds a value before resolution is never
    /// touched, whatever its directive.
    #[must_use]
    pub fn with_overwrite_private(mut self, enabled: bool) -> Self {
        self.overwrite_private = enabled;
        self
    }

    /// Sets the maximum number of sweeps per `resolve()` call.
    ///
    /// Values below one are raised to one.
    #[must_use]
    pub fn with_max_sweeps(mut self, max_sweeps: usize) -> Self {
        self.max_sweeps = max_sweeps.max(1);
        self
    }

    /// Returns the traversal order.
    #[must_use]
    pub fn traversal(&self) -> TraversalOrder {
        self.traversal
    }

    /// Returns whether private fields are overwritten.
    #[must_use]
    pub fn overwrite_private(&self) -> bool {
        self.overwrite_private
    }

    /// Returns the sweep limit.
    #[must_use]
    pub fn max_sweeps(&self) -> usize {
        self.max_sweeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ResolverConfig::default();
        assert!(!config.overwrite_private());
        assert_eq!(config.max_sweeps(), DEFAULT_MAX_SWEEPS);
        assert_eq!(config.traversal(), TraversalOrder::default());
    }

    #[test]
    fn debug_builds_shuffle_by_default() {
        if cfg!(debug_assertions) {
            assert_eq!(TraversalOrder::default(), TraversalOrder::Shuffled);
        } else {
            assert_eq!(TraversalOrder::default(), TraversalOrder::Registration);
        }
    }

    #[test]
    fn max_sweeps_is_at_least_one() {
        let config = ResolverConfig::new().with_max_sweeps(0);
        assert_eq!(config.max_sweeps(), 1);
    }

    #[test]
    fn registration_order_is_stable() {
        let mut items = vec![1, 2, 3, 4, 5];
        TraversalOrder::Registration.orderer().arrange(&mut items);
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn seeded_order_is_reproducible() {
        let mut first: Vec<u32> = (0..32).collect();
        let mut second = first.clone();

        TraversalOrder::Seeded(42).orderer().arrange(&mut first);
        TraversalOrder::Seeded(42).orderer().arrange(&mut second);

        assert_eq!(first, second);
        let mut sorted = first.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..32).collect::<Vec<_>>());
    }
}
