use chrono::{DateTime, Utc};
use colorant_harmony::{Dye, DyeRecord, HarmonyPattern, Palette};
use serde::{Deserialize, Serialize};

use super::Stored;

/// A saved palette. Dyes are stored whole so custom primaries survive without the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteEntry {
    pub id: String,
    pub primary_dye: DyeRecord,
    pub suggested_dyes: [DyeRecord; 2],
    pub pattern: HarmonyPattern,
    pub created_at: DateTime<Utc>,
}

impl PaletteEntry {
    pub fn new(id: String, palette: &Palette, created_at: DateTime<Utc>) -> Self {
        let [a, b] = &palette.suggested;

        PaletteEntry {
            id,
            primary_dye: palette.primary.to_record(),
            suggested_dyes: [a.to_record(), b.to_record()],
            pattern: palette.pattern,
            created_at,
        }
    }

    pub fn to_palette(&self) -> Palette {
        let [a, b] = &self.suggested_dyes;

        Palette::new(
            Dye::from_record(self.primary_dye.clone()),
            [Dye::from_record(a.clone()), Dye::from_record(b.clone())],
            self.pattern,
        )
    }

    /// Same primary, suggestions and pattern as `palette`. The primary must also keep its color,
    /// so an edited custom color counts as a new palette.
    pub fn matches(&self, palette: &Palette) -> bool {
        let [a, b] = &self.suggested_dyes;

        self.primary_dye.id == palette.primary.id
            && self.primary_dye.rgb == palette.primary.rgb255()
            && a.id == palette.suggested[0].id
            && b.id == palette.suggested[1].id
            && self.pattern == palette.pattern
    }
}

impl Stored for PaletteEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_valid(&self) -> bool {
        !self.primary_dye.id.is_empty() && self.suggested_dyes.iter().all(|d| !d.id.is_empty())
    }
}
