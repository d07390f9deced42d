//! Picks two dyes from the primary's own color family.
//!
//! Candidates close to the primary's OKLCH hue are scored by how far they drift in hue, chroma
//! and lightness. The winners are spread over lightness bands so the palette reads as light,
//! mid and dark tones of one color rather than three near-duplicates.

use palette::Oklch;

use crate::color::{self, hue_distance, HUE_DIFFERENCE_MAX};
use crate::config::MonochromaticConfig;
use crate::dye::Dye;

/// Below this OKLCH chroma a hue is treated as noise.
const ACHROMATIC_CHROMA: f64 = 0.02;

/// Strategy for the monochromatic pattern.
///
/// Implementations return up to two distinct dyes from `candidates`, which never contains the
/// primary. The generator pads a short answer with random candidates.
pub trait MonochromaticSelector: Send + Sync {
    fn select<'a>(&self, primary: &Dye, candidates: &[&'a Dye]) -> Vec<&'a Dye>;
}

/// The default selector: hue-window filtering, weighted scoring and lightness clustering.
#[derive(Debug, Clone, Default)]
pub struct LightnessClusters {
    config: MonochromaticConfig,
}

#[derive(Debug, Clone, Copy)]
struct Scored<'a> {
    dye: &'a Dye,
    lightness: f64,
    in_window: bool,
    score: f64,
}

impl LightnessClusters {
    pub fn new(config: MonochromaticConfig) -> Self {
        LightnessClusters { config }
    }

    fn hue_penalty(&self, hue_diff: f64) -> f64 {
        let theta = self.config.theta_deg;
        if theta > 0.0 {
            (hue_diff - theta).max(0.0) / theta
        } else {
            hue_diff / HUE_DIFFERENCE_MAX
        }
    }

    fn score<'a>(&self, primary: Oklch<f64>, dye: &'a Dye) -> Scored<'a> {
        let weights = &self.config.weights;
        let candidate = dye.oklch();
        let hue_diff = hue_distance(color::oklch_hue(primary), color::oklch_hue(candidate));
        let chromatic =
            primary.chroma >= ACHROMATIC_CHROMA && candidate.chroma >= ACHROMATIC_CHROMA;

        let score = weights.hue * self.hue_penalty(hue_diff)
            + weights.chroma * (primary.chroma - candidate.chroma).abs()
            + weights.lightness * (primary.l - candidate.l).abs();

        Scored {
            dye,
            lightness: candidate.l,
            in_window: chromatic && hue_diff <= self.config.hue_window_deg,
            score,
        }
    }

    fn bin(&self, lightness: f64) -> usize {
        let bins = self.config.lightness_bins.max(1);
        ((lightness.clamp(0.0, 1.0) * bins as f64).floor() as usize).min(bins - 1)
    }

    /// Best candidate of two distinct lightness bins, preferring bins the primary is not in.
    fn diversify<'a>(&self, primary_lightness: f64, ranked: &[Scored<'a>]) -> Vec<&'a Dye> {
        let primary_bin = self.bin(primary_lightness);
        let mut best_per_bin: Vec<(usize, &Scored<'a>)> = Vec::new();

        for scored in ranked {
            let bin = self.bin(scored.lightness);
            if !best_per_bin.iter().any(|(b, _)| *b == bin) {
                best_per_bin.push((bin, scored));
            }
        }

        // Stable, so score order survives within each group
        best_per_bin.sort_by_key(|(bin, _)| *bin == primary_bin);

        let mut picked: Vec<&'a Dye> = best_per_bin
            .iter()
            .take(2)
            .map(|(_, scored)| scored.dye)
            .collect();

        for scored in ranked {
            if picked.len() >= 2 {
                break;
            }
            if !picked.iter().any(|d| d.id == scored.dye.id) {
                picked.push(scored.dye);
            }
        }

        picked
    }
}

impl MonochromaticSelector for LightnessClusters {
    fn select<'a>(&self, primary: &Dye, candidates: &[&'a Dye]) -> Vec<&'a Dye> {
        let base = primary.oklch();
        let scored: Vec<Scored<'a>> = candidates
            .iter()
            .filter(|dye| dye.id != primary.id)
            .map(|&dye| self.score(base, dye))
            .collect();

        let windowed: Vec<Scored<'a>> = scored.iter().copied().filter(|s| s.in_window).collect();
        let mut ranked = if windowed.len() >= 2 {
            windowed
        } else {
            tracing::debug!(
                primary = %primary.id,
                in_window = windowed.len(),
                "hue window too narrow, scoring every candidate"
            );
            scored
        };

        ranked.sort_by(|a, b| a.score.total_cmp(&b.score));

        if self.config.diversify_by_lightness {
            self.diversify(base.l, &ranked)
        } else {
            ranked.iter().take(2).map(|s| s.dye).collect()
        }
    }
}
