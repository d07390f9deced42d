use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::config::HarmonyAngles;
use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HarmonyPattern {
    #[default]
    Triadic,
    SplitComplementary,
    Analogous,
    Monochromatic,
    Similar,
    Contrast,
    Clash,
}

impl HarmonyPattern {
    /// Every pattern, in the order they are offered to users.
    pub const ALL: [HarmonyPattern; 7] = [
        Self::Triadic,
        Self::SplitComplementary,
        Self::Analogous,
        Self::Monochromatic,
        Self::Similar,
        Self::Contrast,
        Self::Clash,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Triadic => "triadic",
            Self::SplitComplementary => "split-complementary",
            Self::Analogous => "analogous",
            Self::Monochromatic => "monochromatic",
            Self::Similar => "similar",
            Self::Contrast => "contrast",
            Self::Clash => "clash",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Triadic => "Balanced",
            Self::SplitComplementary => "Accent",
            Self::Analogous => "Gradient",
            Self::Monochromatic => "Tonal",
            Self::Similar => "Natural",
            Self::Contrast => "Contrast",
            Self::Clash => "Clash",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Triadic => "Three vivid colors in even balance",
            Self::SplitComplementary => "A distinctive trio that makes the main color stand out",
            Self::Analogous => "Three gentle colors that flow into each other",
            Self::Monochromatic => "A calm, unified trio from one color family",
            Self::Similar => "Close, easygoing shades that blend in",
            Self::Contrast => "Three colors with a clear, crisp contrast",
            Self::Clash => "A loud, energetic trio that refuses to match",
        }
    }

    /// Target hues for the angle-based patterns, `None` for the dedicated strategies.
    pub fn target_hues(&self, base_hue: f64, angles: &HarmonyAngles) -> Option<[f64; 2]> {
        match self {
            Self::Triadic => Some(angles.triadic(base_hue)),
            Self::SplitComplementary => Some(angles.split_complementary(base_hue)),
            Self::Analogous => Some(angles.analogous(base_hue)),
            Self::Similar => Some(angles.similar(base_hue)),
            Self::Contrast => Some(angles.contrast(base_hue)),
            Self::Monochromatic | Self::Clash => None,
        }
    }
}

impl Display for HarmonyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HarmonyPattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|pattern| pattern.as_str() == s)
            .ok_or_else(|| Error::InvalidPattern(s.to_owned()))
    }
}
