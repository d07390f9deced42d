//! A primary dye, its two suggestions and the pattern that produced them.

use crate::config::RatioConfig;
use crate::dye::{Catalog, Dye};
use crate::harmony::{HarmonyGenerator, HarmonyPattern};
use crate::random::RandomSource;
use crate::ratio::{compute_palette_ratio, DyeWithRole, Role};
use crate::Result;

/// Immutable once built. Regenerating produces a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub primary: Dye,
    pub suggested: [Dye; 2],
    pub pattern: HarmonyPattern,
}

impl Palette {
    pub fn new(primary: Dye, suggested: [Dye; 2], pattern: HarmonyPattern) -> Self {
        Palette {
            primary,
            suggested,
            pattern,
        }
    }

    /// Runs `generator` over `pool` and keeps the result.
    pub fn generate<R>(
        primary: Dye,
        pattern: HarmonyPattern,
        pool: &[Dye],
        generator: &HarmonyGenerator,
        rng: &mut R,
    ) -> Result<Self>
    where
        R: RandomSource + ?Sized,
    {
        let [a, b] = generator.suggest(&primary, pattern, pool, rng)?;
        let suggested = [a.clone(), b.clone()];

        Ok(Palette::new(primary, suggested, pattern))
    }

    /// Rebuilds a palette from stored ids. `None` when any id is missing from the catalog.
    pub fn from_ids(
        catalog: &Catalog,
        primary_id: &str,
        suggested_ids: [&str; 2],
        pattern: HarmonyPattern,
    ) -> Option<Self> {
        let primary = catalog.get(primary_id)?.clone();
        let a = catalog.get(suggested_ids[0])?.clone();
        let b = catalog.get(suggested_ids[1])?.clone();

        Some(Palette::new(primary, [a, b], pattern))
    }

    pub fn ratio(&self) -> [DyeWithRole<'_>; 3] {
        self.ratio_with(&RatioConfig::default())
    }

    pub fn ratio_with(&self, config: &RatioConfig) -> [DyeWithRole<'_>; 3] {
        let [a, b] = &self.suggested;
        compute_palette_ratio(&self.primary, a, b, config)
    }

    pub fn main(&self) -> DyeWithRole<'_> {
        self.with_role(Role::Main)
    }

    pub fn sub(&self) -> DyeWithRole<'_> {
        self.with_role(Role::Sub)
    }

    pub fn accent(&self) -> DyeWithRole<'_> {
        self.with_role(Role::Accent)
    }

    fn with_role(&self, role: Role) -> DyeWithRole<'_> {
        let [main, sub, accent] = self.ratio();
        match role {
            Role::Main => main,
            Role::Sub => sub,
            Role::Accent => accent,
        }
    }

    /// The suggestions as sub then accent, whatever order they were generated in.
    pub fn sorted_suggested(&self) -> [DyeWithRole<'_>; 2] {
        let [_, sub, accent] = self.ratio();
        [sub, accent]
    }

    /// Same primary, same suggestions in the same order, same pattern.
    pub fn same_combination(&self, other: &Palette) -> bool {
        self.primary.id == other.primary.id
            && self.suggested[0].id == other.suggested[0].id
            && self.suggested[1].id == other.suggested[1].id
            && self.pattern == other.pattern
    }

    pub fn is_in<'p>(&self, palettes: impl IntoIterator<Item = &'p Palette>) -> bool {
        palettes
            .into_iter()
            .any(|palette| self.same_combination(palette))
    }

    pub fn dye_ids(&self) -> [&str; 3] {
        [
            self.primary.id.as_str(),
            self.suggested[0].id.as_str(),
            self.suggested[1].id.as_str(),
        ]
    }
}
