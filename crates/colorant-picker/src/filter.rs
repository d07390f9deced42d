//! Narrowing the catalog for browsing, and building the pool suggestions are drawn from.

use std::ops::RangeInclusive;

use colorant_harmony::{Dye, DyeCategory};

/// Browsing filters. Saturation and value ranges are percentages.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOptions {
    pub category: Option<DyeCategory>,
    pub hue_range: RangeInclusive<f64>,
    pub saturation_range: RangeInclusive<f64>,
    pub value_range: RangeInclusive<f64>,
    pub exclude_metallic: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        FilterOptions {
            category: None,
            hue_range: 0.0..=360.0,
            saturation_range: 0.0..=100.0,
            value_range: 0.0..=100.0,
            exclude_metallic: false,
        }
    }
}

impl FilterOptions {
    /// Achromatic dyes count as hue 0.
    pub fn matches(&self, dye: &Dye) -> bool {
        if self.category.is_some_and(|category| category != dye.category) {
            return false;
        }

        if self.exclude_metallic && dye.is_metallic() {
            return false;
        }

        let hsv = dye.hsv();
        self.hue_range.contains(&hsv.hue_or_zero())
            && self.saturation_range.contains(&(hsv.saturation * 100.0))
            && self.value_range.contains(&(hsv.value * 100.0))
    }

    pub fn apply<'a>(&self, dyes: &'a [Dye]) -> Vec<&'a Dye> {
        dyes.iter().filter(|dye| self.matches(dye)).collect()
    }
}

/// The dyes suggestions may use. Only the metallic toggle applies here, never the browsing
/// filters.
pub fn suggestion_pool(dyes: &[Dye], exclude_metallic: bool) -> Vec<Dye> {
    dyes.iter()
        .filter(|dye| !(exclude_metallic && dye.is_metallic()))
        .cloned()
        .collect()
}
