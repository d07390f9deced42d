//! The dye catalog model.
//!
//! A [`Dye`] only stores its sRGB value; HSV, hex and OKLab are derived on demand so persisted
//! snapshots never carry stale derived data.

use palette::{Oklab, Oklch, Srgb};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{self, Display};

use crate::color::{self, HsvColor};
use crate::{Error, Result};

pub const METALLIC_TAG: &str = "metallic";
pub const CUSTOM_TAG: &str = "custom";
pub const CUSTOM_ID_PREFIX: &str = "custom-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DyeCategory {
    White,
    Red,
    Brown,
    Yellow,
    Green,
    Blue,
    Purple,
    Rare,
}

impl DyeCategory {
    pub const ALL: [DyeCategory; 8] = [
        Self::White,
        Self::Red,
        Self::Brown,
        Self::Yellow,
        Self::Green,
        Self::Blue,
        Self::Purple,
        Self::Rare,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Red => "red",
            Self::Brown => "brown",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Rare => "rare",
        }
    }
}

impl Display for DyeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// sRGB with 0-255 channels, the at-rest representation of a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb255 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb255 {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb255 { r, g, b }
    }

    pub fn to_srgb(self) -> Srgb<f64> {
        Srgb::new(self.r, self.g, self.b).into_format()
    }

    /// Channels are clamped before rounding.
    pub fn from_srgb(rgb: Srgb<f64>) -> Self {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgb255::new(channel(rgb.red), channel(rgb.green), channel(rgb.blue))
    }
}

impl Display for Rgb255 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.r, self.g, self.b)
    }
}

/// Where a dye comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DyeSource {
    /// Part of the static game catalog.
    Catalog,
    /// Defined by the user. Never part of a suggestion pool.
    Custom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dye {
    pub id: String,
    pub name: String,
    pub category: DyeCategory,
    /// Normalized to `[0, 1]`.
    pub rgb: Srgb<f64>,
    pub tags: Vec<String>,
    pub lodestone: Option<String>,
    pub source: DyeSource,
}

impl Dye {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: DyeCategory,
        rgb: Rgb255,
    ) -> Self {
        Dye {
            id: id.into(),
            name: name.into(),
            category,
            rgb: rgb.to_srgb(),
            tags: Vec::new(),
            lodestone: None,
            source: DyeSource::Catalog,
        }
    }

    /// A user-defined color wearing the dye shape. The id is namespaced with `custom-`.
    pub fn custom(id: &str, name: impl Into<String>, rgb: Srgb<f64>) -> Self {
        let id = if id.starts_with(CUSTOM_ID_PREFIX) {
            id.to_owned()
        } else {
            format!("{}{}", CUSTOM_ID_PREFIX, id)
        };

        Dye {
            id,
            name: name.into(),
            category: DyeCategory::White,
            rgb,
            tags: vec![CUSTOM_TAG.to_owned()],
            lodestone: None,
            source: DyeSource::Custom,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn is_metallic(&self) -> bool {
        self.has_tag(METALLIC_TAG)
    }

    pub fn is_custom(&self) -> bool {
        matches!(self.source, DyeSource::Custom)
    }

    pub fn hsv(&self) -> HsvColor {
        color::to_hsv(self.rgb)
    }

    pub fn hex(&self) -> String {
        color::to_hex(self.rgb)
    }

    pub fn oklab(&self) -> Oklab<f64> {
        color::to_oklab(self.rgb)
    }

    pub fn oklch(&self) -> Oklch<f64> {
        color::to_oklch(self.rgb)
    }

    pub fn rgb255(&self) -> Rgb255 {
        Rgb255::from_srgb(self.rgb)
    }

    /// The storable form, without derived values.
    pub fn to_record(&self) -> DyeRecord {
        DyeRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            category: self.category,
            rgb: self.rgb255(),
            tags: self.tags.clone(),
            lodestone: self.lodestone.clone(),
        }
    }

    /// Rehydrates a stored or catalog record. Records tagged `custom` become custom dyes.
    pub fn from_record(record: DyeRecord) -> Self {
        let source = if record.tags.iter().any(|t| t == CUSTOM_TAG) {
            DyeSource::Custom
        } else {
            DyeSource::Catalog
        };

        Dye {
            id: record.id,
            name: record.name,
            category: record.category,
            rgb: record.rgb.to_srgb(),
            tags: record.tags,
            lodestone: record.lodestone,
            source,
        }
    }
}

/// A dye as it appears in the catalog file and in local storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DyeRecord {
    pub id: String,
    pub name: String,
    pub category: DyeCategory,
    pub rgb: Rgb255,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lodestone: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    dyes: Vec<DyeRecord>,
}

/// The static, read-only list of dyes loaded once per session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    dyes: Vec<Dye>,
}

impl Catalog {
    /// Parses `{ "dyes": [...] }`. Ids must be non-empty and unique.
    pub fn from_json(input: &str) -> Result<Self> {
        let file: CatalogFile =
            serde_json::from_str(input).map_err(|e| Error::InvalidCatalog(e.to_string()))?;

        Self::from_records(file.dyes)
    }

    pub fn from_records(records: Vec<DyeRecord>) -> Result<Self> {
        let mut seen = HashSet::new();

        for record in &records {
            if record.id.trim().is_empty() {
                return Err(Error::InvalidCatalog(format!(
                    "Dye `{}` has an empty id",
                    record.name
                )));
            }
            if !seen.insert(record.id.as_str()) {
                return Err(Error::InvalidCatalog(format!(
                    "Duplicate dye id `{}`",
                    record.id
                )));
            }
        }

        let dyes: Vec<Dye> = records.into_iter().map(Dye::from_record).collect();
        tracing::debug!(count = dyes.len(), "loaded dye catalog");

        Ok(Catalog { dyes })
    }

    pub fn dyes(&self) -> &[Dye] {
        &self.dyes
    }

    pub fn get(&self, id: &str) -> Option<&Dye> {
        self.dyes.iter().find(|d| d.id == id)
    }

    /// Case-insensitive lookup by display name.
    pub fn find_by_name(&self, name: &str) -> Option<&Dye> {
        let name = name.trim();
        self.dyes.iter().find(|d| d.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.dyes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dyes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    static CATALOG: &str = indoc! {r#"
        {
          "dyes": [
            { "id": "dye_001", "name": "Snow White", "category": "white", "rgb": { "r": 228, "g": 223, "b": 208 } },
            { "id": "dye_060", "name": "Metallic Silver", "category": "rare", "rgb": { "r": 164, "g": 164, "b": 167 }, "tags": ["metallic"], "lodestone": "https://example.com/silver" }
          ]
        }
    "#};

    #[test]
    fn parses_catalog() {
        let catalog = Catalog::from_json(CATALOG).unwrap();

        assert_eq!(catalog.len(), 2);
        let white = catalog.get("dye_001").unwrap();
        assert_eq!(white.hex(), "#E4DFD0");
        assert_eq!(white.category, DyeCategory::White);
        assert!(!white.is_metallic());

        let silver = catalog.find_by_name("metallic silver").unwrap();
        assert!(silver.is_metallic());
        assert_eq!(
            silver.lodestone.as_deref(),
            Some("https://example.com/silver")
        );
    }

    #[test]
    fn rejects_duplicate_ids() {
        let input = r#"{ "dyes": [
            { "id": "a", "name": "A", "category": "red", "rgb": { "r": 1, "g": 2, "b": 3 } },
            { "id": "a", "name": "B", "category": "red", "rgb": { "r": 1, "g": 2, "b": 3 } }
        ] }"#;

        assert_eq!(
            Catalog::from_json(input),
            Err(Error::InvalidCatalog("Duplicate dye id `a`".to_owned()))
        );
    }

    #[test]
    fn rejects_empty_ids() {
        let input = r#"{ "dyes": [
            { "id": " ", "name": "A", "category": "red", "rgb": { "r": 1, "g": 2, "b": 3 } }
        ] }"#;

        assert!(matches!(
            Catalog::from_json(input),
            Err(Error::InvalidCatalog(_))
        ));
    }

    #[test]
    fn records_round_trip_without_derived_values() {
        let dye = Dye::new(
            "dye_010",
            "Rose Pink",
            DyeCategory::Red,
            Rgb255::new(230, 159, 150),
        );
        let record = dye.to_record();
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": "dye_010",
                "name": "Rose Pink",
                "category": "red",
                "rgb": { "r": 230, "g": 159, "b": 150 }
            })
        );
        assert_eq!(Dye::from_record(record), dye);
    }

    #[test]
    fn custom_dyes_are_namespaced_and_tagged() {
        let dye = Dye::custom("1234", "My Teal", Srgb::new(0.0, 0.5, 0.5));

        assert_eq!(dye.id, "custom-1234");
        assert!(dye.is_custom());
        assert!(dye.has_tag(CUSTOM_TAG));
        assert_eq!(dye.category, DyeCategory::White);

        let restored = Dye::from_record(dye.to_record());
        assert_eq!(restored.source, DyeSource::Custom);
        assert_eq!(Dye::custom("custom-1234", "x", dye.rgb).id, "custom-1234");
    }
}
