use std::fs;
use std::path::Path;

use colorant_harmony::dye::CUSTOM_ID_PREFIX;
use colorant_harmony::{Catalog, Dye};

use crate::color_input::{is_color_literal, parse_color};
use crate::storage::CustomColors;
use crate::{Error, Result};

/// The catalog shipped with the binary.
pub static BUNDLED_CATALOG: &str = include_str!("../data/dyes.json");

/// Ids of colors typed straight on the command line are this plus the hex digits.
const INLINE_COLOR_ID_PREFIX: &str = "inline-";

/// Loads `path` or, without one, the bundled catalog.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let catalog = match path {
        Some(path) => {
            let contents = fs::read_to_string(path)?;
            Catalog::from_json(&contents)?
        }
        None => Catalog::from_json(BUNDLED_CATALOG)?,
    };

    tracing::debug!(dyes = catalog.len(), from = ?path, "catalog ready");
    Ok(catalog)
}

/// Finds the dye a user meant.
///
/// Tries, in order: a catalog id, a custom color id, a catalog dye name (case-insensitive), a
/// custom color name, and finally a hex or `r,g,b` literal, which becomes an unnamed custom dye.
pub fn resolve_dye(catalog: &Catalog, custom_colors: &CustomColors, input: &str) -> Result<Dye> {
    let input = input.trim();

    if let Some(dye) = catalog.get(input) {
        return Ok(dye.clone());
    }

    let custom_id = input.strip_prefix(CUSTOM_ID_PREFIX).unwrap_or(input);
    if let Some(color) = custom_colors.list().iter().find(|c| c.id == custom_id) {
        return Ok(color.to_dye());
    }

    if let Some(dye) = catalog.find_by_name(input) {
        return Ok(dye.clone());
    }

    if let Some(color) = custom_colors.find_by_name(input) {
        return Ok(color.to_dye());
    }

    if is_color_literal(input) {
        let rgb = parse_color(input)?;
        let hex = colorant_harmony::color::to_hex(rgb.to_srgb());
        let id = format!("{}{}", INLINE_COLOR_ID_PREFIX, hex.trim_start_matches('#'));
        return Ok(Dye::custom(&id, hex, rgb.to_srgb()));
    }

    Err(Error::UnknownDye(input.to_owned()))
}

/// How to name `dye` on the command line so [`resolve_dye`] finds it again. Colors that were
/// never saved fall back to their hex value.
pub fn dye_reference(dye: &Dye, custom_colors: &CustomColors) -> String {
    if !dye.is_custom() || custom_colors.find(&dye.id).is_some() {
        dye.id.clone()
    } else {
        dye.hex()
    }
}

/// Like [`resolve_dye`], but only catalog dyes are accepted.
pub fn catalog_dye(catalog: &Catalog, input: &str) -> Result<Dye> {
    let input = input.trim();

    catalog
        .get(input)
        .or_else(|| catalog.find_by_name(input))
        .cloned()
        .ok_or_else(|| Error::UnknownDye(input.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::testing::SequentialIds;
    use crate::storage::MemoryStore;
    use chrono::Utc;
    use colorant_harmony::Rgb255;
    use std::io::Write;
    use temp_dir::TempDir;

    #[test]
    fn bundled_catalog_loads() {
        let catalog = load_catalog(None).unwrap();

        assert_eq!(catalog.len(), 53);
        assert_eq!(catalog.get("dye_001").unwrap().name, "Snow White");
        assert_eq!(catalog.dyes().iter().filter(|d| d.is_metallic()).count(), 5);
    }

    #[test]
    fn loads_catalog_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.child("dyes.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(
            br#"{ "dyes": [ { "id": "x", "name": "X", "category": "red", "rgb": { "r": 1, "g": 2, "b": 3 } } ] }"#,
        )
        .unwrap();

        let catalog = load_catalog(Some(&path)).unwrap();
        assert_eq!(catalog.len(), 1);

        let missing = load_catalog(Some(&dir.child("missing.json")));
        assert!(matches!(missing, Err(Error::IoError(_))));
    }

    #[test]
    fn resolves_ids_names_custom_colors_and_literals() {
        let catalog = load_catalog(None).unwrap();
        let mut store = MemoryStore::default();
        let mut ids = SequentialIds::default();
        let mut custom = CustomColors::load(&store).unwrap();
        custom
            .add("Mint", Rgb255::new(150, 230, 200), &mut ids, Utc::now(), &mut store)
            .unwrap();

        assert_eq!(resolve_dye(&catalog, &custom, "dye_011").unwrap().name, "Rust Red");
        assert_eq!(resolve_dye(&catalog, &custom, "rust red").unwrap().id, "dye_011");

        let mint = resolve_dye(&catalog, &custom, "Mint").unwrap();
        assert_eq!(mint.id, "custom-id-1");
        assert_eq!(resolve_dye(&catalog, &custom, "custom-id-1").unwrap(), mint);
        assert_eq!(resolve_dye(&catalog, &custom, "id-1").unwrap(), mint);

        let literal = resolve_dye(&catalog, &custom, "#336699").unwrap();
        assert!(literal.is_custom());
        assert_eq!(literal.id, "custom-inline-336699");
        assert_eq!(literal.name, "#336699");
        assert_ne!(resolve_dye(&catalog, &custom, "#FF0000").unwrap().id, literal.id);
        assert_eq!(
            resolve_dye(&catalog, &custom, "51, 102, 153").unwrap().rgb255(),
            Rgb255::new(51, 102, 153)
        );

        assert!(matches!(
            resolve_dye(&catalog, &custom, "Nope"),
            Err(Error::UnknownDye(_))
        ));
        assert!(matches!(catalog_dye(&catalog, "Mint"), Err(Error::UnknownDye(_))));

        assert_eq!(dye_reference(&mint, &custom), "custom-id-1");
        assert_eq!(dye_reference(&literal, &custom), "#336699");
        assert_eq!(dye_reference(catalog.get("dye_011").unwrap(), &custom), "dye_011");
    }
}
