//! Harmony engine for the colorant picker.
//!
//! Given a primary dye and a [`HarmonyPattern`], the engine picks two supporting dyes from a
//! catalog using hue arithmetic and nearest-neighbour search in OKLab/OKLCH, then splits the
//! resulting three-color palette into main/sub/accent roles with usage percentages.

use thiserror::Error;

pub mod color;
pub mod config;
pub mod dye;
pub mod harmony;
pub mod random;
pub mod ratio;
pub mod scheme;

pub use config::{ClashConfig, HarmonyAngles, HarmonyConfig, MonochromaticConfig, RatioConfig};
pub use dye::{Catalog, Dye, DyeCategory, DyeRecord, DyeSource, Rgb255};
pub use harmony::search::DyeCandidate;
pub use harmony::{
    generate_suggested_dyes, HarmonyGenerator, HarmonyPattern, LightnessClusters,
    MonochromaticSelector, SearchStrategy,
};
pub use random::{RandomSource, RngSource};
pub use ratio::{compute_palette_ratio, ColorRatio, DyeWithRole, RatioMemo, Role, DEFAULT_RATIO};
pub use scheme::Palette;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("No dyes available to build a palette from")]
    EmptyPool,
    #[error("Not enough dyes to build a palette. Required {required}, found {available}")]
    InsufficientPool { required: usize, available: usize },
    #[error("Unknown harmony pattern `{0}`")]
    InvalidPattern(String),
    #[error("Invalid color `{0}`. Use #RRGGBB or #RGB")]
    InvalidHex(String),
    #[error("Invalid dye catalog: {0}")]
    InvalidCatalog(String),
    #[error("Invalid harmony configuration: {0}")]
    InvalidConfig(String),
}
