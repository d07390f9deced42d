//! Suggesting two supporting dyes for a primary dye.
//!
//! The five angle-based patterns compute target hues, turn them into colors and look up the
//! nearest dyes. Clash and monochromatic have dedicated strategies. Whatever the pattern, the
//! answer is two distinct dyes from the pool, neither of them the primary; a search that comes
//! up short is padded with random unused pool members.

use palette::Srgb;
use std::fmt;

use crate::color;
use crate::config::HarmonyConfig;
use crate::dye::Dye;
use crate::random::RandomSource;
use crate::{Error, Result};

pub mod clash;
pub mod monochromatic;
mod pattern;
pub mod search;

pub use crate::config::SearchStrategy;
pub use monochromatic::{LightnessClusters, MonochromaticSelector};
pub use pattern::HarmonyPattern;

const SUGGESTED_COUNT: usize = 2;

pub struct HarmonyGenerator {
    config: HarmonyConfig,
    monochromatic: Box<dyn MonochromaticSelector>,
}

impl fmt::Debug for HarmonyGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HarmonyGenerator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for HarmonyGenerator {
    fn default() -> Self {
        Self::new(HarmonyConfig::default())
    }
}

impl HarmonyGenerator {
    pub fn new(config: HarmonyConfig) -> Self {
        let monochromatic = Box::new(LightnessClusters::new(config.monochromatic.clone()));

        HarmonyGenerator {
            config,
            monochromatic,
        }
    }

    /// Swaps in a different monochromatic strategy.
    pub fn with_monochromatic_selector(
        mut self,
        selector: impl MonochromaticSelector + 'static,
    ) -> Self {
        self.monochromatic = Box::new(selector);
        self
    }

    pub fn config(&self) -> &HarmonyConfig {
        &self.config
    }

    /// Picks two distinct dyes from `pool` to go with `primary`.
    ///
    /// The pool is used as given; filtering out metallic dyes or the like is up to the caller.
    /// Dyes sharing the primary's id are never picked.
    pub fn suggest<'a, R>(
        &self,
        primary: &Dye,
        pattern: HarmonyPattern,
        pool: &'a [Dye],
        rng: &mut R,
    ) -> Result<[&'a Dye; 2]>
    where
        R: RandomSource + ?Sized,
    {
        let candidates: Vec<&'a Dye> = pool.iter().filter(|dye| dye.id != primary.id).collect();

        match candidates.len() {
            0 => return Err(Error::EmptyPool),
            1 => {
                return Err(Error::InsufficientPool {
                    required: SUGGESTED_COUNT,
                    available: 1,
                })
            }
            _ => {}
        }

        let mut chosen = match pattern {
            HarmonyPattern::Monochromatic => self.monochromatic.select(primary, &candidates),
            HarmonyPattern::Clash => {
                clash::select(primary, &candidates, &self.config.clash, &self.config.angles)
            }
            _ => self.select_by_angle(primary, pattern, &candidates),
        };

        chosen.truncate(SUGGESTED_COUNT);
        search::fill_randomly(&mut chosen, &candidates, primary, SUGGESTED_COUNT, rng);

        tracing::debug!(
            primary = %primary.id,
            pattern = %pattern,
            suggested = ?chosen.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(),
            "suggested dyes"
        );

        match chosen.as_slice() {
            [first, second] => Ok([*first, *second]),
            _ => Err(Error::InsufficientPool {
                required: SUGGESTED_COUNT,
                available: chosen.len(),
            }),
        }
    }

    fn select_by_angle<'a>(
        &self,
        primary: &Dye,
        pattern: HarmonyPattern,
        candidates: &[&'a Dye],
    ) -> Vec<&'a Dye> {
        let hsv = primary.hsv();
        let Some(hues) = pattern.target_hues(hsv.hue_or_zero(), &self.config.angles) else {
            return Vec::new();
        };

        match self.config.search {
            SearchStrategy::Perceptual => {
                let targets: Vec<Srgb<f64>> = hues
                    .iter()
                    .map(|&hue| {
                        let rgb = color::hsv_to_srgb(hue, hsv.saturation, hsv.value);
                        color::oklab_to_srgb(color::clip_to_srgb(color::to_oklab(rgb)))
                    })
                    .collect();

                search::find_nearest_by_oklab(&targets, candidates)
                    .into_iter()
                    .map(|candidate| candidate.dye)
                    .collect()
            }
            SearchStrategy::Hue => search::find_nearest_by_hue(&hues, candidates, Some(primary)),
        }
    }

    /// The hex triple (primary, sub input, accent input) every pattern yields for `base`.
    pub fn pattern_samples<R>(
        &self,
        base: &Dye,
        pool: &[Dye],
        rng: &mut R,
    ) -> Result<Vec<(HarmonyPattern, [String; 3])>>
    where
        R: RandomSource + ?Sized,
    {
        HarmonyPattern::ALL
            .into_iter()
            .map(|pattern| {
                let [a, b] = self.suggest(base, pattern, pool, &mut *rng)?;
                Ok((pattern, [base.hex(), a.hex(), b.hex()]))
            })
            .collect()
    }
}

/// [`HarmonyGenerator::suggest`] with the default configuration.
pub fn generate_suggested_dyes<'a, R>(
    primary: &Dye,
    pattern: HarmonyPattern,
    pool: &'a [Dye],
    rng: &mut R,
) -> Result<[&'a Dye; 2]>
where
    R: RandomSource + ?Sized,
{
    HarmonyGenerator::default().suggest(primary, pattern, pool, rng)
}
