//! A seeded agent that picks uniformly among legal-looking moves.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::{Agent, View};
use crate::game::{AttackOrder, FortifyOrder, Placement, ReinforceOrder};

/// Plays random moves.
///
/// Reinforcements are spread one unit at a time over owned territories, up
/// to [`RandomAgent::SPREAD_LIMIT`] units; any excess lands on one random
/// territory. Each attack declaration happens with probability `aggression`.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: SmallRng,
    aggression: f64,
}

impl RandomAgent {
    /// Default probability of declaring another attack.
    pub const DEFAULT_AGGRESSION: f64 = 0.85;

    /// Reinforcements placed one unit at a time.
    pub const SPREAD_LIMIT: u32 = 64;

    /// Create an agent from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            aggression: Self::DEFAULT_AGGRESSION,
        }
    }

    /// Set the attack probability, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn with_aggression(mut self, aggression: f64) -> Self {
        self.aggression = if aggression.is_nan() {
            0.0
        } else {
            aggression.clamp(0.0, 1.0)
        };
        self
    }
}

impl Agent for RandomAgent {
    fn reinforce(&mut self, view: &View<'_>, available: u32) -> ReinforceOrder {
        let owned: Vec<_> = view.owned().collect();
        if owned.is_empty() {
            return ReinforceOrder::default();
        }
        let mut counts = vec![0u32; owned.len()];
        for _ in 0..available.min(Self::SPREAD_LIMIT) {
            counts[self.rng.random_range(0..owned.len())] += 1;
        }
        let rest = available.saturating_sub(Self::SPREAD_LIMIT);
        if rest > 0 {
            counts[self.rng.random_range(0..owned.len())] += rest;
        }
        ReinforceOrder {
            placements: owned
                .iter()
                .zip(counts)
                .filter(|&(_, units)| units > 0)
                .map(|(&territory, units)| Placement::new(territory, units))
                .collect(),
        }
    }

    fn attack(&mut self, view: &View<'_>) -> Option<AttackOrder> {
        if !self.rng.random_bool(self.aggression) {
            return None;
        }
        let options = view.attack_options();
        if options.is_empty() {
            return None;
        }
        let (from, to) = options[self.rng.random_range(0..options.len())];
        let spare = view.state().units(from) - 1;
        Some(AttackOrder {
            from,
            to,
            committed: self.rng.random_range(1..=spare),
        })
    }

    fn fortify(&mut self, view: &View<'_>) -> Option<FortifyOrder> {
        let paths = view.fortify_paths();
        let usable: Vec<_> = paths.usable().collect();
        if usable.is_empty() {
            return None;
        }
        let (from, to, capacity) = usable[self.rng.random_range(0..usable.len())];
        Some(FortifyOrder {
            from,
            to,
            units: self.rng.random_range(1..=capacity),
        })
    }
}
