//! Wave composition.
//!
//! The two baseline kinds scale linearly with the wave number. The special
//! kinds unlock at fixed waves and scale from their unlock wave. Only the
//! spawn order is random, and it comes from the caller's seeded RNG.

use aetheria_core::constants::*;
use aetheria_core::enums::EnemyKind;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Enemy counts for one wave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveComposition {
    pub crawlers: u32,
    pub flyers: u32,
    pub sentinels: u32,
    pub warpers: u32,
    pub saboteurs: u32,
}

impl WaveComposition {
    pub fn total(&self) -> u32 {
        self.crawlers + self.flyers + self.sentinels + self.warpers + self.saboteurs
    }

    pub fn count(&self, kind: EnemyKind) -> u32 {
        match kind {
            EnemyKind::ShadowCrawler => self.crawlers,
            EnemyKind::ShadowFlyer => self.flyers,
            EnemyKind::ShieldingSentinel => self.sentinels,
            EnemyKind::ChronoWarper => self.warpers,
            EnemyKind::Saboteur => self.saboteurs,
        }
    }

    /// Expand to an unshuffled list, grouped by kind.
    pub fn expand(&self) -> Vec<EnemyKind> {
        let mut out = Vec::with_capacity(self.total() as usize);
        for kind in EnemyKind::ALL {
            out.extend(std::iter::repeat(kind).take(self.count(kind) as usize));
        }
        out
    }
}

/// Counts for wave `n`. Wave 0 is empty.
pub fn compose_wave(n: u32) -> WaveComposition {
    // Unlocked at wave `first`, count is n - (first - 1).
    let unlock = |first: u32| {
        if n >= first {
            n - (first - 1)
        } else {
            0
        }
    };
    WaveComposition {
        crawlers: CRAWLERS_PER_WAVE * n,
        flyers: FLYERS_PER_WAVE * n,
        sentinels: unlock(SENTINEL_FIRST_WAVE),
        warpers: unlock(WARPER_FIRST_WAVE),
        saboteurs: unlock(SABOTEUR_FIRST_WAVE),
    }
}

/// Spawn list for wave `n`, shuffled with `rng`.
pub fn get_wave<R: Rng + ?Sized>(n: u32, rng: &mut R) -> Vec<EnemyKind> {
    let mut list = compose_wave(n).expand();
    list.shuffle(rng);
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn wave_zero_is_empty() {
        assert_eq!(compose_wave(0).total(), 0);
    }

    #[test]
    fn early_waves_are_baseline_only() {
        let c = compose_wave(3);
        assert_eq!(c.crawlers, 9);
        assert_eq!(c.flyers, 6);
        assert_eq!(c.sentinels + c.warpers + c.saboteurs, 0);
    }

    #[test]
    fn special_kinds_unlock_at_thresholds() {
        assert_eq!(compose_wave(4).sentinels, 1);
        assert_eq!(compose_wave(5).warpers, 0);
        assert_eq!(compose_wave(6).warpers, 1);
        assert_eq!(compose_wave(7).saboteurs, 0);

        let c = compose_wave(10);
        assert_eq!(c.crawlers, 30);
        assert_eq!(c.flyers, 20);
        assert_eq!(c.sentinels, 7);
        assert_eq!(c.warpers, 5);
        assert_eq!(c.saboteurs, 3);
        assert_eq!(c.total(), 65);
    }

    #[test]
    fn shuffle_keeps_composition() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let list = get_wave(9, &mut rng);
        let c = compose_wave(9);
        assert_eq!(list.len() as u32, c.total());
        for kind in EnemyKind::ALL {
            let n = list.iter().filter(|&&k| k == kind).count() as u32;
            assert_eq!(n, c.count(kind), "{kind:?}");
        }
    }

    #[test]
    fn same_seed_same_order() {
        let a = get_wave(8, &mut ChaCha8Rng::seed_from_u64(99));
        let b = get_wave(8, &mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
