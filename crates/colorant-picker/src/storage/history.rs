use chrono::{DateTime, Utc};
use colorant_harmony::Palette;

use super::{Collection, KeyValueStore, PaletteEntry};
use crate::ids::IdSource;
use crate::Result;

pub const HISTORY_KEY: &str = "colorant-picker:history";
pub const MAX_HISTORY: usize = 10;

/// The most recently viewed palettes, newest first and without repeats.
#[derive(Debug, Clone)]
pub struct History {
    entries: Collection<PaletteEntry>,
}

impl History {
    pub fn load<K: KeyValueStore + ?Sized>(store: &K) -> Result<Self> {
        Ok(History {
            entries: Collection::load(HISTORY_KEY, Some(MAX_HISTORY), store)?,
        })
    }

    pub fn list(&self) -> &[PaletteEntry] {
        self.entries.items()
    }

    /// Records `palette`. A palette already in the history moves to the front with a fresh
    /// timestamp and keeps its id.
    pub fn record<K>(
        &mut self,
        palette: &Palette,
        ids: &mut dyn IdSource,
        now: DateTime<Utc>,
        store: &mut K,
    ) -> Result<PaletteEntry>
    where
        K: KeyValueStore + ?Sized,
    {
        let existing = self.list().iter().position(|entry| entry.matches(palette));

        let entry = match existing {
            Some(index) => {
                let mut items = self.list().to_vec();
                let mut entry = items.remove(index);
                entry.created_at = now;
                items.insert(0, entry.clone());
                self.entries.set_items(items, store)?;
                entry
            }
            None => {
                let entry = PaletteEntry::new(ids.next_id(), palette, now);
                self.entries.add(entry.clone(), store)?;
                entry
            }
        };

        tracing::debug!(id = %entry.id, moved = existing.is_some(), "recorded history entry");
        Ok(entry)
    }

    pub fn clear<K: KeyValueStore + ?Sized>(&mut self, store: &mut K) -> Result<()> {
        self.entries.clear(store)
    }
}
