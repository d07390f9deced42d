//! Nearest-dye lookups over a candidate pool.
//!
//! Pools are slices of borrowed dyes so callers can pre-filter a catalog without cloning it.
//! None of these functions look at the primary dye implicitly; exclusions are explicit.

use palette::Srgb;

use crate::color::{self, hue_distance};
use crate::dye::Dye;
use crate::random::{self, RandomSource};

/// A dye together with its distance to some target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DyeCandidate<'a> {
    pub dye: &'a Dye,
    pub delta: f64,
}

/// For each target hue in order, picks the dye whose HSV hue is closest on the color wheel.
///
/// Dyes picked for an earlier target are skipped, as is `exclude`. Ties go to the dye that comes
/// first in `pool`. Returns fewer dyes than targets when the pool runs dry.
pub fn find_nearest_by_hue<'a>(
    target_hues: &[f64],
    pool: &[&'a Dye],
    exclude: Option<&Dye>,
) -> Vec<&'a Dye> {
    let mut chosen: Vec<&'a Dye> = Vec::with_capacity(target_hues.len());

    for &target in target_hues {
        let mut closest: Option<&'a Dye> = None;
        let mut min_difference = f64::INFINITY;

        for &dye in pool {
            if exclude.is_some_and(|e| e.id == dye.id) || chosen.iter().any(|c| c.id == dye.id) {
                continue;
            }

            let difference = hue_distance(dye.hsv().hue_or_zero(), target);
            if difference < min_difference {
                min_difference = difference;
                closest = Some(dye);
            }
        }

        if let Some(dye) = closest {
            chosen.push(dye);
        }
    }

    chosen
}

/// Ranks the whole pool by OKLab distance to each target and hands every target, in input
/// order, the best-ranked dye not already claimed.
///
/// The assignment is greedy: an earlier target can take a dye that would have suited a later
/// target better.
pub fn find_nearest_by_oklab<'a>(targets: &[Srgb<f64>], pool: &[&'a Dye]) -> Vec<DyeCandidate<'a>> {
    let pool_oklab: Vec<_> = pool.iter().map(|dye| dye.oklab()).collect();

    let ranked: Vec<Vec<DyeCandidate<'a>>> = targets
        .iter()
        .map(|&target| {
            let target_oklab = color::to_oklab(target);
            let mut candidates: Vec<DyeCandidate<'a>> = pool
                .iter()
                .zip(&pool_oklab)
                .map(|(&dye, &oklab)| DyeCandidate {
                    dye,
                    delta: color::delta_e_oklab(target_oklab, oklab),
                })
                .collect();

            candidates.sort_by(|a, b| a.delta.total_cmp(&b.delta));
            candidates
        })
        .collect();

    let mut results: Vec<DyeCandidate<'a>> = Vec::with_capacity(targets.len());

    for candidates in ranked {
        let unclaimed = candidates
            .into_iter()
            .find(|c| !results.iter().any(|r| r.dye.id == c.dye.id));

        if let Some(candidate) = unclaimed {
            results.push(candidate);
        }
    }

    results
}

/// Finds the dye closest to the OKLab midpoint of `a` and `b`, skipping both.
///
/// Returns `None` only when nothing but `a` and `b` is left in the pool. Ties keep the earlier
/// dye in pool order.
pub fn find_bridge_dye<'a>(a: &Dye, b: &Dye, pool: &[&'a Dye]) -> Option<&'a Dye> {
    let midpoint = color::oklab_midpoint(a.oklab(), b.oklab());

    pool.iter()
        .copied()
        .filter(|dye| dye.id != a.id && dye.id != b.id)
        .map(|dye| (dye, color::delta_e_oklab(dye.oklab(), midpoint)))
        .reduce(|best, next| if next.1 < best.1 { next } else { best })
        .map(|(dye, _)| dye)
}

/// Tops `chosen` up to `wanted` dyes with random, unused pool members other than `primary`.
pub fn fill_randomly<'a, R>(
    chosen: &mut Vec<&'a Dye>,
    pool: &[&'a Dye],
    primary: &Dye,
    wanted: usize,
    rng: &mut R,
) where
    R: RandomSource + ?Sized,
{
    while chosen.len() < wanted {
        let unused: Vec<&'a Dye> = pool
            .iter()
            .copied()
            .filter(|dye| dye.id != primary.id && !chosen.iter().any(|c| c.id == dye.id))
            .collect();

        match random::pick(rng, &unused) {
            Some(&dye) => {
                tracing::debug!(dye = %dye.id, "padding suggestions with a random dye");
                chosen.push(dye);
            }
            None => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dye::{DyeCategory, Rgb255};
    use crate::random::testing::First;

    fn dye(id: &str, r: u8, g: u8, b: u8) -> Dye {
        Dye::new(id, id, DyeCategory::Rare, Rgb255::new(r, g, b))
    }

    fn ids(dyes: &[&Dye]) -> Vec<String> {
        dyes.iter().map(|d| d.id.clone()).collect()
    }

    #[test]
    fn nearest_by_hue_picks_closest_hues_in_order() {
        let dyes = vec![
            dye("red", 255, 0, 0),
            dye("green", 0, 255, 0),
            dye("blue", 0, 0, 255),
            dye("yellow", 255, 255, 0),
        ];
        let pool: Vec<&Dye> = dyes.iter().collect();

        let result = find_nearest_by_hue(&[115.0, 250.0], &pool, Some(&dyes[0]));
        assert_eq!(ids(&result), vec!["green", "blue"]);
    }

    #[test]
    fn nearest_by_hue_never_repeats_a_dye() {
        let dyes = vec![dye("red", 255, 0, 0), dye("orange", 255, 128, 0)];
        let pool: Vec<&Dye> = dyes.iter().collect();

        let result = find_nearest_by_hue(&[0.0, 0.0], &pool, None);
        assert_eq!(ids(&result), vec!["red", "orange"]);
    }

    #[test]
    fn nearest_by_hue_breaks_ties_by_pool_order() {
        let dyes = vec![dye("gray", 128, 128, 128), dye("black", 0, 0, 0)];
        let pool: Vec<&Dye> = dyes.iter().collect();

        // Achromatic dyes all sit at hue 0
        let result = find_nearest_by_hue(&[10.0], &pool, None);
        assert_eq!(ids(&result), vec!["gray"]);
    }

    #[test]
    fn nearest_by_hue_returns_fewer_when_pool_is_small() {
        let dyes = vec![dye("red", 255, 0, 0)];
        let pool: Vec<&Dye> = dyes.iter().collect();

        assert_eq!(find_nearest_by_hue(&[0.0, 120.0], &pool, None).len(), 1);
        assert!(find_nearest_by_hue(&[0.0], &pool, Some(&dyes[0])).is_empty());
    }

    #[test]
    fn nearest_by_oklab_assigns_greedily() {
        let dyes = vec![dye("near-red", 250, 10, 10), dye("blue", 0, 0, 255)];
        let pool: Vec<&Dye> = dyes.iter().collect();

        // Both targets prefer near-red; the first target claims it.
        let targets = [Srgb::new(1.0, 0.0, 0.0), Srgb::new(0.9, 0.1, 0.1)];
        let result = find_nearest_by_oklab(&targets, &pool);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].dye.id, "near-red");
        assert_eq!(result[1].dye.id, "blue");
        assert!(result[0].delta < result[1].delta);
    }

    #[test]
    fn nearest_by_oklab_reports_zero_delta_for_exact_match() {
        let dyes = vec![dye("white", 255, 255, 255), dye("black", 0, 0, 0)];
        let pool: Vec<&Dye> = dyes.iter().collect();

        let result = find_nearest_by_oklab(&[Srgb::new(0.0, 0.0, 0.0)], &pool);
        assert_eq!(result[0].dye.id, "black");
        assert_eq!(result[0].delta, 0.0);
    }

    #[test]
    fn nearest_by_oklab_runs_out_of_candidates() {
        let dyes = vec![dye("white", 255, 255, 255)];
        let pool: Vec<&Dye> = dyes.iter().collect();

        let targets = [Srgb::new(1.0, 1.0, 1.0), Srgb::new(0.0, 0.0, 0.0)];
        assert_eq!(find_nearest_by_oklab(&targets, &pool).len(), 1);
    }

    #[test]
    fn bridge_sits_between_the_two_dyes() {
        let dyes = vec![
            dye("white", 255, 255, 255),
            dye("black", 0, 0, 0),
            dye("gray", 99, 99, 99),
            dye("red", 255, 0, 0),
        ];
        let pool: Vec<&Dye> = dyes.iter().collect();

        let bridge = find_bridge_dye(&dyes[0], &dyes[1], &pool);
        assert_eq!(bridge.map(|d| d.id.as_str()), Some("gray"));
    }

    #[test]
    fn bridge_is_none_without_other_dyes() {
        let dyes = vec![dye("white", 255, 255, 255), dye("black", 0, 0, 0)];
        let pool: Vec<&Dye> = dyes.iter().collect();

        assert_eq!(find_bridge_dye(&dyes[0], &dyes[1], &pool), None);
    }

    #[test]
    fn bridge_ties_keep_pool_order() {
        let dyes = vec![
            dye("white", 255, 255, 255),
            dye("black", 0, 0, 0),
            dye("gray", 99, 99, 99),
            dye("gray-again", 99, 99, 99),
        ];
        let pool: Vec<&Dye> = dyes.iter().rev().collect();

        let bridge = find_bridge_dye(&dyes[0], &dyes[1], &pool);
        assert_eq!(bridge.map(|d| d.id.as_str()), Some("gray-again"));
    }

    #[test]
    fn fill_randomly_skips_primary_and_chosen() {
        let dyes = vec![
            dye("primary", 255, 0, 0),
            dye("taken", 0, 255, 0),
            dye("free", 0, 0, 255),
        ];
        let pool: Vec<&Dye> = dyes.iter().collect();
        let mut chosen = vec![&dyes[1]];

        fill_randomly(&mut chosen, &pool, &dyes[0], 2, &mut First);
        assert_eq!(ids(&chosen), vec!["taken", "free"]);

        fill_randomly(&mut chosen, &pool, &dyes[0], 3, &mut First);
        assert_eq!(chosen.len(), 2);
    }
}
