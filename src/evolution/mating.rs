//! Mating schedule: who breeds with whom.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Handling of the `target % breeders` pairs that do not divide evenly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Remainder {
    /// Drop them; the next generation may be smaller than requested.
    #[default]
    Truncate,
    /// Give one extra pair to each of the top-ranked breeders so the schedule
    /// has exactly `target` pairs.
    Fill,
}

/// Ordered list of `(first, partner)` pairs of breeder ranks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatingSchedule {
    pairs: Vec<(usize, usize)>,
    dropped: usize,
}

impl MatingSchedule {
    /// Builds a schedule over `breeders` ranked breeders aiming at `target`
    /// offspring.
    ///
    /// Breeder `k` leads `target / breeders` consecutive pairs; each partner is
    /// uniform over the other `breeders - 1` breeders, never `k` itself.
    pub fn build<R: Rng>(
        breeders: usize,
        target: usize,
        remainder: Remainder,
        rng: &mut R,
    ) -> Result<Self> {
        if breeders == 0 {
            return Err(Error::NoBreeders);
        }
        if target == 0 {
            return Err(Error::EmptyNextGeneration);
        }
        if breeders == 1 {
            return Err(Error::SingleBreeder);
        }

        let per_breeder = target / breeders;
        let leftover = target % breeders;
        let (extra, dropped) = match remainder {
            Remainder::Truncate => (0, leftover),
            Remainder::Fill => (leftover, 0),
        };

        let mut pairs = Vec::with_capacity(target - dropped);
        for first in 0..breeders {
            let count = per_breeder + usize::from(first < extra);
            for _ in 0..count {
                // skip over `first` so the partner is uniform over the others
                let mut partner = rng.random_range(0..breeders - 1);
                if partner >= first {
                    partner += 1;
                }
                pairs.push((first, partner));
            }
        }

        if dropped > 0 {
            warn!(
                "mating schedule truncated: {} of {} requested pairs dropped",
                dropped, target
            );
        }
        debug!(
            "mating schedule: {} breeders, {} pairs, {} per breeder",
            breeders,
            pairs.len(),
            per_breeder
        );

        Ok(Self { pairs, dropped })
    }

    /// The pairs, grouped by first breeder in rank order.
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    /// Number of pairs, i.e. offspring to produce.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True when no pairs were scheduled.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Requested pairs left out by [`Remainder::Truncate`].
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// How often each breeder rank appears as the first element of a pair.
    pub fn lead_counts(&self, breeders: usize) -> Vec<usize> {
        let mut counts = vec![0; breeders];
        for &(first, _) in &self.pairs {
            if let Some(count) = counts.get_mut(first) {
                *count += 1;
            }
        }
        counts
    }
}
