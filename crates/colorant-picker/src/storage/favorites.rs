use chrono::{DateTime, Utc};
use colorant_harmony::Palette;

use super::{Collection, KeyValueStore, PaletteEntry};
use crate::ids::IdSource;
use crate::Result;

pub const FAVORITES_KEY: &str = "colorant-picker:favorites";
pub const MAX_FAVORITES: usize = 100;

/// Saved palettes, newest first. The oldest favorites fall off past [`MAX_FAVORITES`].
#[derive(Debug, Clone)]
pub struct Favorites {
    entries: Collection<PaletteEntry>,
}

impl Favorites {
    pub fn load<K: KeyValueStore + ?Sized>(store: &K) -> Result<Self> {
        Ok(Favorites {
            entries: Collection::load(FAVORITES_KEY, Some(MAX_FAVORITES), store)?,
        })
    }

    pub fn list(&self) -> &[PaletteEntry] {
        self.entries.items()
    }

    pub fn get(&self, id: &str) -> Option<&PaletteEntry> {
        self.entries.get(id)
    }

    pub fn contains(&self, palette: &Palette) -> bool {
        self.list().iter().any(|entry| entry.matches(palette))
    }

    pub fn save<K>(
        &mut self,
        palette: &Palette,
        ids: &mut dyn IdSource,
        now: DateTime<Utc>,
        store: &mut K,
    ) -> Result<PaletteEntry>
    where
        K: KeyValueStore + ?Sized,
    {
        let entry = PaletteEntry::new(ids.next_id(), palette, now);
        self.entries.add(entry.clone(), store)?;

        tracing::info!(id = %entry.id, "saved favorite");
        Ok(entry)
    }

    pub fn remove<K: KeyValueStore + ?Sized>(&mut self, id: &str, store: &mut K) -> Result<bool> {
        self.entries.remove(id, store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::testing::SequentialIds;
    use crate::storage::MemoryStore;
    use colorant_harmony::{Dye, DyeCategory, HarmonyPattern, Rgb255};

    fn palette(primary: &str) -> Palette {
        let dye = |id: &str, r, g, b| Dye::new(id, id, DyeCategory::Rare, Rgb255::new(r, g, b));
        Palette::new(
            dye(primary, 200, 30, 30),
            [dye("a", 30, 200, 30), dye("b", 30, 30, 200)],
            HarmonyPattern::Triadic,
        )
    }

    #[test]
    fn saves_and_reloads() {
        let mut store = MemoryStore::default();
        let mut ids = SequentialIds::default();
        let now = Utc::now();

        let mut favorites = Favorites::load(&store).unwrap();
        favorites.save(&palette("p1"), &mut ids, now, &mut store).unwrap();
        favorites.save(&palette("p2"), &mut ids, now, &mut store).unwrap();

        let reloaded = Favorites::load(&store).unwrap();
        let primaries: Vec<&str> = reloaded
            .list()
            .iter()
            .map(|e| e.primary_dye.id.as_str())
            .collect();

        assert_eq!(primaries, vec!["p2", "p1"]);
        assert!(reloaded.contains(&palette("p1")));
        assert_eq!(reloaded.get("id-1").map(|e| e.primary_dye.id.as_str()), Some("p1"));
    }

    #[test]
    fn keeps_at_most_a_hundred() {
        let mut store = MemoryStore::default();
        let mut ids = SequentialIds::default();
        let mut favorites = Favorites::load(&store).unwrap();

        for i in 0..(MAX_FAVORITES + 5) {
            favorites
                .save(&palette(&format!("p{}", i)), &mut ids, Utc::now(), &mut store)
                .unwrap();
        }

        assert_eq!(favorites.list().len(), MAX_FAVORITES);
        assert_eq!(favorites.list()[0].primary_dye.id, "p104");
        assert!(favorites.get("id-1").is_none());
    }

    #[test]
    fn removes_by_id() {
        let mut store = MemoryStore::default();
        let mut ids = SequentialIds::default();
        let mut favorites = Favorites::load(&store).unwrap();
        let entry = favorites
            .save(&palette("p"), &mut ids, Utc::now(), &mut store)
            .unwrap();

        assert!(favorites.remove(&entry.id, &mut store).unwrap());
        assert!(Favorites::load(&store).unwrap().list().is_empty());
    }
}
