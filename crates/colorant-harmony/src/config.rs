//! Tunable constants of the harmony engine.
//!
//! Every angle, threshold and weight lives here rather than in the algorithms, so a YAML file can
//! override any subset of them:
//!
//! ```yaml
//! angles:
//!   similar_range: 20
//! ratio:
//!   suppression_factor: 3.0
//! ```

use serde::{Deserialize, Serialize};

use crate::color::normalize_hue;
use crate::{Error, Result};

/// How angle-based patterns turn target hues into dyes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    /// Build HSV targets with the primary's saturation and value, then match them in OKLab.
    #[default]
    Perceptual,
    /// Match the target hues directly against each dye's HSV hue.
    Hue,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HarmonyConfig {
    pub angles: HarmonyAngles,
    pub clash: ClashConfig,
    pub monochromatic: MonochromaticConfig,
    pub ratio: RatioConfig,
    pub search: SearchStrategy,
}

impl HarmonyConfig {
    /// Parses a YAML document. Missing keys keep their defaults.
    pub fn parse(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Ok(HarmonyConfig::default());
        }

        let config: HarmonyConfig =
            serde_yaml::from_str(input).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let angles = [
            ("angles.triadic_offset_1", self.angles.triadic_offset_1),
            ("angles.triadic_offset_2", self.angles.triadic_offset_2),
            ("angles.complementary", self.angles.complementary),
            (
                "angles.split_complementary_adjustment",
                self.angles.split_complementary_adjustment,
            ),
            ("angles.analogous_range", self.angles.analogous_range),
            ("angles.similar_range", self.angles.similar_range),
            ("angles.contrast_offset", self.angles.contrast_offset),
            ("monochromatic.hue_window_deg", self.monochromatic.hue_window_deg),
            ("monochromatic.theta_deg", self.monochromatic.theta_deg),
        ];

        for (name, value) in angles {
            if !value.is_finite() {
                return Err(Error::InvalidConfig(format!("`{}` must be a number", name)));
            }
        }

        let non_negative = [
            ("monochromatic.weights.hue", self.monochromatic.weights.hue),
            ("monochromatic.weights.chroma", self.monochromatic.weights.chroma),
            (
                "monochromatic.weights.lightness",
                self.monochromatic.weights.lightness,
            ),
            ("ratio.base_weights.sub", self.ratio.base_weights.sub),
            ("ratio.base_weights.accent", self.ratio.base_weights.accent),
            ("ratio.suppression_factor", self.ratio.suppression_factor),
        ];

        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "`{}` must be a non-negative number, found {}",
                    name, value
                )));
            }
        }

        if !self.ratio.base_weights.main.is_finite() || self.ratio.base_weights.main <= 0.0 {
            return Err(Error::InvalidConfig(
                "`ratio.base_weights.main` must be greater than zero".to_owned(),
            ));
        }

        if self.monochromatic.lightness_bins == 0 {
            return Err(Error::InvalidConfig(
                "`monochromatic.lightness_bins` must be at least 1".to_owned(),
            ));
        }

        Ok(())
    }
}

/// Offsets on the color wheel, in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarmonyAngles {
    pub triadic_offset_1: f64,
    pub triadic_offset_2: f64,
    pub complementary: f64,
    pub split_complementary_adjustment: f64,
    pub analogous_range: f64,
    pub similar_range: f64,
    pub contrast_offset: f64,
}

impl Default for HarmonyAngles {
    fn default() -> Self {
        HarmonyAngles {
            triadic_offset_1: 120.0,
            triadic_offset_2: 240.0,
            complementary: 180.0,
            split_complementary_adjustment: 30.0,
            analogous_range: 30.0,
            similar_range: 15.0,
            contrast_offset: 90.0,
        }
    }
}

impl HarmonyAngles {
    pub fn triadic(&self, base_hue: f64) -> [f64; 2] {
        [
            normalize_hue(base_hue + self.triadic_offset_1),
            normalize_hue(base_hue + self.triadic_offset_2),
        ]
    }

    pub fn split_complementary(&self, base_hue: f64) -> [f64; 2] {
        let complement = self.complement(base_hue);
        [
            normalize_hue(complement - self.split_complementary_adjustment),
            normalize_hue(complement + self.split_complementary_adjustment),
        ]
    }

    pub fn analogous(&self, base_hue: f64) -> [f64; 2] {
        [
            normalize_hue(base_hue - self.analogous_range),
            normalize_hue(base_hue + self.analogous_range),
        ]
    }

    pub fn similar(&self, base_hue: f64) -> [f64; 2] {
        [
            normalize_hue(base_hue - self.similar_range),
            normalize_hue(base_hue + self.similar_range),
        ]
    }

    pub fn contrast(&self, base_hue: f64) -> [f64; 2] {
        [
            self.complement(base_hue),
            normalize_hue(base_hue + self.contrast_offset),
        ]
    }

    pub fn complement(&self, base_hue: f64) -> f64 {
        normalize_hue(base_hue + self.complementary)
    }
}

/// Lightness and chroma inversion targets for the clash pattern, in OKLCH units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClashConfig {
    pub lightness_threshold: f64,
    /// Target for primaries brighter than the threshold.
    pub target_lightness_dark: f64,
    /// Target for primaries at or below the threshold.
    pub target_lightness_light: f64,
    pub chroma_threshold: f64,
    /// Target for primaries more saturated than the threshold.
    pub target_chroma_low: f64,
    /// Target for primaries at or below the threshold.
    pub target_chroma_high: f64,
}

impl Default for ClashConfig {
    fn default() -> Self {
        ClashConfig {
            lightness_threshold: 0.5,
            target_lightness_dark: 0.3,
            target_lightness_light: 0.75,
            chroma_threshold: 0.1,
            target_chroma_low: 0.05,
            target_chroma_high: 0.15,
        }
    }
}

impl ClashConfig {
    pub fn target_lightness(&self, l: f64) -> f64 {
        if l > self.lightness_threshold {
            self.target_lightness_dark
        } else {
            self.target_lightness_light
        }
    }

    pub fn target_chroma(&self, c: f64) -> f64 {
        if c > self.chroma_threshold {
            self.target_chroma_low
        } else {
            self.target_chroma_high
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonochromaticConfig {
    /// Candidates further than this from the primary hue are ignored while enough remain.
    pub hue_window_deg: f64,
    /// Hue differences beyond this are penalized more steeply.
    pub theta_deg: f64,
    pub lightness_bins: usize,
    pub diversify_by_lightness: bool,
    pub weights: MonochromaticWeights,
}

impl Default for MonochromaticConfig {
    fn default() -> Self {
        MonochromaticConfig {
            hue_window_deg: 35.0,
            theta_deg: 30.0,
            lightness_bins: 3,
            diversify_by_lightness: true,
            weights: MonochromaticWeights::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonochromaticWeights {
    pub hue: f64,
    pub chroma: f64,
    pub lightness: f64,
}

impl Default for MonochromaticWeights {
    fn default() -> Self {
        MonochromaticWeights {
            hue: 1.0,
            chroma: 0.3,
            lightness: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatioConfig {
    pub base_weights: BaseWeights,
    /// `k` in `weight * exp(-k * deltaE)`.
    pub suppression_factor: f64,
}

impl Default for RatioConfig {
    fn default() -> Self {
        RatioConfig {
            base_weights: BaseWeights::default(),
            suppression_factor: 2.5,
        }
    }
}

/// Unsuppressed weights, roughly 70:25:5.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseWeights {
    pub main: f64,
    pub sub: f64,
    pub accent: f64,
}

impl Default for BaseWeights {
    fn default() -> Self {
        BaseWeights {
            main: 1.0,
            sub: 0.357,
            accent: 0.071,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn triadic_from_zero() {
        assert_eq!(HarmonyAngles::default().triadic(0.0), [120.0, 240.0]);
    }

    #[test]
    fn split_complementary_wraps() {
        assert_eq!(
            HarmonyAngles::default().split_complementary(200.0),
            [350.0, 50.0]
        );
    }

    #[test]
    fn analogous_and_similar_wrap_below_zero() {
        let angles = HarmonyAngles::default();
        assert_eq!(angles.analogous(10.0), [340.0, 40.0]);
        assert_eq!(angles.similar(5.0), [350.0, 20.0]);
    }

    #[test]
    fn contrast_is_complement_then_right_angle() {
        assert_eq!(HarmonyAngles::default().contrast(300.0), [120.0, 30.0]);
    }

    #[test]
    fn every_target_hue_is_reduced() {
        let angles = HarmonyAngles::default();
        let mut hue = -720.0;

        while hue <= 720.0 {
            for target in angles
                .triadic(hue)
                .into_iter()
                .chain(angles.split_complementary(hue))
                .chain(angles.analogous(hue))
                .chain(angles.similar(hue))
                .chain(angles.contrast(hue))
            {
                assert!((0.0..360.0).contains(&target), "{} from {}", target, hue);
            }
            hue += 7.5;
        }
    }

    #[test]
    fn clash_inverts_lightness_and_chroma() {
        let clash = ClashConfig::default();
        assert_eq!(clash.target_lightness(0.8), 0.3);
        assert_eq!(clash.target_lightness(0.2), 0.75);
        assert_eq!(clash.target_lightness(0.5), 0.75);
        assert_eq!(clash.target_chroma(0.2), 0.05);
        assert_eq!(clash.target_chroma(0.02), 0.15);
    }

    #[test]
    fn parses_partial_yaml() {
        let config = HarmonyConfig::parse(indoc! {"
            angles:
              similar_range: 20
            ratio:
              suppression_factor: 3.0
            search: hue
        "})
        .unwrap();

        assert_eq!(config.angles.similar_range, 20.0);
        assert_eq!(config.angles.triadic_offset_1, 120.0);
        assert_eq!(config.ratio.suppression_factor, 3.0);
        assert_eq!(config.ratio.base_weights, BaseWeights::default());
        assert_eq!(config.search, SearchStrategy::Hue);
        assert_eq!(config.clash, ClashConfig::default());
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(HarmonyConfig::parse("\n").unwrap(), HarmonyConfig::default());
    }

    #[test]
    fn rejects_negative_suppression() {
        let result = HarmonyConfig::parse(indoc! {"
            ratio:
              suppression_factor: -1
        "});

        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn rejects_zero_lightness_bins() {
        let result = HarmonyConfig::parse(indoc! {"
            monochromatic:
              lightness_bins: 0
        "});

        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn rejects_malformed_yaml() {
        assert!(matches!(
            HarmonyConfig::parse("angles: [1, 2"),
            Err(Error::InvalidConfig(_))
        ));
    }
}
