use chrono::{DateTime, Utc};
use colorant_harmony::color::HsvColor;
use colorant_harmony::dye::CUSTOM_ID_PREFIX;
use colorant_harmony::{Dye, Rgb255};
use serde::{Deserialize, Serialize};

use super::{Collection, KeyValueStore, Stored};
use crate::color_input::validate_name;
use crate::ids::IdSource;
use crate::{Error, Result};

pub const CUSTOM_COLORS_KEY: &str = "colorant-picker:custom-colors";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomColor {
    pub id: String,
    pub name: String,
    pub rgb: Rgb255,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CustomColor {
    /// The color as a dye, with id `custom-<id>`.
    pub fn to_dye(&self) -> Dye {
        Dye::custom(&self.id, self.name.clone(), self.rgb.to_srgb())
    }

    pub fn hsv(&self) -> HsvColor {
        colorant_harmony::color::to_hsv(self.rgb.to_srgb())
    }

    pub fn hex(&self) -> String {
        colorant_harmony::color::to_hex(self.rgb.to_srgb())
    }
}

impl Stored for CustomColor {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// User-defined colors, newest first. Names are unique.
#[derive(Debug, Clone)]
pub struct CustomColors {
    colors: Collection<CustomColor>,
}

impl CustomColors {
    pub fn load<K: KeyValueStore + ?Sized>(store: &K) -> Result<Self> {
        Ok(CustomColors {
            colors: Collection::load(CUSTOM_COLORS_KEY, None, store)?,
        })
    }

    pub fn list(&self) -> &[CustomColor] {
        self.colors.items()
    }

    /// Looks a color up by id, `custom-<id>` or exact (trimmed) name.
    pub fn find(&self, key: &str) -> Option<&CustomColor> {
        let key = key.trim();
        let id = key.strip_prefix(CUSTOM_ID_PREFIX).unwrap_or(key);

        self.colors
            .get(id)
            .or_else(|| self.find_by_name(key))
    }

    pub fn find_by_name(&self, name: &str) -> Option<&CustomColor> {
        let name = name.trim();
        self.list().iter().find(|color| color.name == name)
    }

    pub fn is_name_taken(&self, name: &str, exclude_id: Option<&str>) -> bool {
        let name = name.trim();
        self.list()
            .iter()
            .any(|color| color.name == name && Some(color.id.as_str()) != exclude_id)
    }

    pub fn add<K>(
        &mut self,
        name: &str,
        rgb: Rgb255,
        ids: &mut dyn IdSource,
        now: DateTime<Utc>,
        store: &mut K,
    ) -> Result<CustomColor>
    where
        K: KeyValueStore + ?Sized,
    {
        let name = validate_name(name)?;
        if self.is_name_taken(&name, None) {
            return Err(Error::InvalidCustomColor(format!(
                "A custom color named `{}` already exists",
                name
            )));
        }

        let color = CustomColor {
            id: ids.next_id(),
            name,
            rgb,
            created_at: now,
            updated_at: now,
        };
        self.colors.add(color.clone(), store)?;

        tracing::info!(id = %color.id, name = %color.name, "saved custom color");
        Ok(color)
    }

    /// Renames and/or recolors. Returns `false` when no color has `id`.
    pub fn update<K>(
        &mut self,
        id: &str,
        name: Option<&str>,
        rgb: Option<Rgb255>,
        now: DateTime<Utc>,
        store: &mut K,
    ) -> Result<bool>
    where
        K: KeyValueStore + ?Sized,
    {
        let name = name.map(validate_name).transpose()?;
        if let Some(name) = &name {
            if self.is_name_taken(name, Some(id)) {
                return Err(Error::InvalidCustomColor(format!(
                    "A custom color named `{}` already exists",
                    name
                )));
            }
        }

        self.colors.update(
            id,
            |color| {
                if let Some(name) = name {
                    color.name = name;
                }
                if let Some(rgb) = rgb {
                    color.rgb = rgb;
                }
                color.updated_at = now;
            },
            store,
        )
    }

    pub fn remove<K: KeyValueStore + ?Sized>(&mut self, id: &str, store: &mut K) -> Result<bool> {
        self.colors.remove(id, store)
    }
}
