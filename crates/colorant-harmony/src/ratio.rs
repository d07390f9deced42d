//! Main/sub/accent roles and usage percentages for a three-dye palette.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{self, Display};

use crate::color::delta_e_rgb;
use crate::config::RatioConfig;
use crate::dye::Dye;

/// Percentages used before any dye is known.
pub const DEFAULT_RATIO: [u32; 3] = [70, 25, 5];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Main,
    Sub,
    Accent,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Main => "main",
            Role::Sub => "sub",
            Role::Accent => "accent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Main => "Main",
            Role::Sub => "Sub",
            Role::Accent => "Accent",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DyeWithRole<'a> {
    pub dye: &'a Dye,
    pub role: Role,
    pub percent: u32,
}

impl DyeWithRole<'_> {
    pub fn to_ratio(&self) -> ColorRatio {
        ColorRatio {
            dye_id: self.dye.id.clone(),
            role: self.role,
            percent: self.percent,
        }
    }
}

/// A role assignment detached from the dye itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorRatio {
    pub dye_id: String,
    pub role: Role,
    pub percent: u32,
}

/// Splits `primary`, `a` and `b` into main, sub and accent.
///
/// The suggested dye closer to the primary (OKLCH deltaE) becomes the sub; on a tie that is `a`.
/// Sub and accent weights decay exponentially with their distance from the primary. The three
/// percentages always add up to 100, with the main color absorbing rounding error.
pub fn compute_palette_ratio<'a>(
    primary: &'a Dye,
    a: &'a Dye,
    b: &'a Dye,
    config: &RatioConfig,
) -> [DyeWithRole<'a>; 3] {
    let delta_a = delta_e_rgb(primary.rgb, a.rgb);
    let delta_b = delta_e_rgb(primary.rgb, b.rgb);

    let ((sub, sub_delta), (accent, accent_delta)) = if delta_a <= delta_b {
        ((a, delta_a), (b, delta_b))
    } else {
        ((b, delta_b), (a, delta_a))
    };

    let weights = &config.base_weights;
    let k = config.suppression_factor;
    let [main_percent, sub_percent, accent_percent] = split_percentages([
        weights.main,
        weights.sub * (-k * sub_delta).exp(),
        weights.accent * (-k * accent_delta).exp(),
    ]);

    [
        DyeWithRole {
            dye: primary,
            role: Role::Main,
            percent: main_percent,
        },
        DyeWithRole {
            dye: sub,
            role: Role::Sub,
            percent: sub_percent,
        },
        DyeWithRole {
            dye: accent,
            role: Role::Accent,
            percent: accent_percent,
        },
    ]
}

/// Sub and accent shares are rounded and clamped to `0..=100`; main takes whatever is left.
fn split_percentages(weights: [f64; 3]) -> [u32; 3] {
    let total: f64 = weights.iter().sum();
    let share = |weight: f64| {
        let percent = (weight / total * 100.0).round();
        if percent.is_finite() {
            percent.clamp(0.0, 100.0) as u32
        } else {
            0
        }
    };

    let sub = share(weights[1]);
    let accent = share(weights[2]).min(100 - sub);

    [100 - sub - accent, sub, accent]
}

/// Reorders ratios as main, sub, accent.
pub fn sorted_by_role(mut ratios: Vec<ColorRatio>) -> Vec<ColorRatio> {
    ratios.sort_by_key(|ratio| ratio.role);
    ratios
}

pub fn find_by_dye_id<'r>(ratios: &'r [ColorRatio], dye_id: &str) -> Option<&'r ColorRatio> {
    ratios.iter().find(|ratio| ratio.dye_id == dye_id)
}

/// Remembers ratios per `(primary, a, b)` id triple.
///
/// Dyes are immutable, so an entry never goes stale for the lifetime of a catalog.
#[derive(Debug, Default)]
pub struct RatioMemo {
    config: RatioConfig,
    entries: HashMap<[String; 3], [ColorRatio; 3]>,
}

impl RatioMemo {
    pub fn new(config: RatioConfig) -> Self {
        RatioMemo {
            config,
            entries: HashMap::new(),
        }
    }

    pub fn get(&mut self, primary: &Dye, a: &Dye, b: &Dye) -> &[ColorRatio; 3] {
        let key = [primary.id.clone(), a.id.clone(), b.id.clone()];
        let config = &self.config;

        self.entries
            .entry(key)
            .or_insert_with(|| compute_palette_ratio(primary, a, b, config).map(|r| r.to_ratio()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
