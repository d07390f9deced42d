//! Everything a command needs: the catalog, the harmony engine and local storage.

use std::fs;
use std::path::Path;

use colorant_harmony::{Catalog, Dye, HarmonyConfig, HarmonyGenerator};

use crate::catalog::{self, load_catalog};
use crate::ids::{IdSource, UuidSource};
use crate::storage::{CustomColors, DirectoryStore, KeyValueStore};
use crate::Result;

pub struct Context {
    pub catalog: Catalog,
    pub generator: HarmonyGenerator,
    pub store: Box<dyn KeyValueStore>,
    pub ids: Box<dyn IdSource>,
}

pub struct ContextOptions<'a> {
    pub catalog: Option<&'a Path>,
    pub config: Option<&'a Path>,
    pub data_dir: &'a Path,
}

impl Context {
    pub fn new(
        catalog: Catalog,
        config: HarmonyConfig,
        store: Box<dyn KeyValueStore>,
        ids: Box<dyn IdSource>,
    ) -> Self {
        Context {
            catalog,
            generator: HarmonyGenerator::new(config),
            store,
            ids,
        }
    }

    /// Reads the catalog and configuration and opens the data directory.
    pub fn load(options: ContextOptions) -> Result<Self> {
        let catalog = load_catalog(options.catalog)?;
        let config = load_config(options.config)?;
        let store = DirectoryStore::new(options.data_dir);

        tracing::debug!(data_dir = %options.data_dir.display(), "opened local storage");

        Ok(Context::new(
            catalog,
            config,
            Box::new(store),
            Box::new(UuidSource),
        ))
    }

    pub fn config(&self) -> &HarmonyConfig {
        self.generator.config()
    }

    pub fn custom_colors(&self) -> Result<CustomColors> {
        CustomColors::load(&*self.store)
    }

    /// A catalog dye, custom color or color literal.
    pub fn resolve(&self, input: &str) -> Result<Dye> {
        catalog::resolve_dye(&self.catalog, &self.custom_colors()?, input)
    }

    /// A catalog dye only. Suggestions must come from the catalog.
    pub fn resolve_catalog_dye(&self, input: &str) -> Result<Dye> {
        catalog::catalog_dye(&self.catalog, input)
    }
}

/// Defaults without a path.
pub fn load_config(path: Option<&Path>) -> Result<HarmonyConfig> {
    let Some(path) = path else {
        return Ok(HarmonyConfig::default());
    };

    let contents = fs::read_to_string(path)?;
    Ok(HarmonyConfig::parse(&contents)?)
}
