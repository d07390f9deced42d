//! The clash pattern: a complementary hue with inverted lightness and chroma, joined to the
//! primary by a bridge color.

use palette::Oklch;

use super::search::{find_bridge_dye, find_nearest_by_oklab};
use crate::color::{self, normalize_hue};
use crate::config::{ClashConfig, HarmonyAngles};
use crate::dye::Dye;

/// The virtual "third color": complementary OKLCH hue, inverted lightness and chroma.
pub fn clash_target(primary: Oklch<f64>, config: &ClashConfig, angles: &HarmonyAngles) -> Oklch<f64> {
    let hue = normalize_hue(color::oklch_hue(primary) + angles.complementary);

    color::oklch(
        config.target_lightness(primary.l),
        config.target_chroma(primary.chroma),
        hue,
    )
}

/// Returns `[bridge, accent]`. The bridge is missing when the pool holds nothing besides the
/// accent, and both are missing for an empty pool.
pub(crate) fn select<'a>(
    primary: &Dye,
    candidates: &[&'a Dye],
    config: &ClashConfig,
    angles: &HarmonyAngles,
) -> Vec<&'a Dye> {
    let target = clash_target(primary.oklch(), config, angles);
    let target_rgb = color::oklab_to_srgb(color::clip_to_srgb(color::oklch_to_oklab(target)));

    let Some(accent) = find_nearest_by_oklab(&[target_rgb], candidates)
        .first()
        .map(|candidate| candidate.dye)
    else {
        return Vec::new();
    };

    tracing::debug!(
        primary = %primary.id,
        accent = %accent.id,
        target = %color::to_hex(target_rgb),
        "picked clash accent"
    );

    match find_bridge_dye(primary, accent, candidates) {
        Some(bridge) => vec![bridge, accent],
        None => vec![accent],
    }
}
